//! Coordinate matching over exact and wildcard keys
//!
//! A [`VersionMapping`] stores `group/name` keys. Either segment of a key may
//! contain the `*` wildcard, either alone (`org.foo/*`, `*/*`) or as part of a
//! glob (`org.foo.*/bar`). Lookups prefer, in order:
//!
//! 1. an exact key,
//! 2. a key with one wildcard segment,
//! 3. a key with two wildcard segments.
//!
//! Keys of equal specificity are tried in declaration order, so the first
//! declared key wins a tie.

use std::collections::HashMap;

use glob::Pattern;

use crate::coordinate::Coordinate;

/// The token that marks a key segment as a wildcard.
pub const WILDCARD: char = '*';

#[derive(Debug, Clone)]
struct Segment {
    raw: String,
    glob: Option<Pattern>,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let glob = if raw.contains(WILDCARD) {
            // Unparseable globs fall back to literal comparison
            Pattern::new(raw).ok()
        } else {
            None
        };
        Self {
            raw: raw.to_string(),
            glob,
        }
    }

    fn is_wildcard(&self) -> bool {
        self.glob.is_some()
    }

    fn matches(&self, value: &str) -> bool {
        match &self.glob {
            Some(pattern) => pattern.matches(value),
            None => self.raw == value,
        }
    }
}

#[derive(Debug, Clone)]
struct WildcardKey {
    key: String,
    group: Segment,
    name: Segment,
    version: String,
}

impl WildcardKey {
    fn specificity(&self) -> usize {
        usize::from(self.group.is_wildcard()) + usize::from(self.name.is_wildcard())
    }

    fn matches(&self, group: &str, name: &str) -> bool {
        self.group.matches(group) && self.name.matches(name)
    }
}

/// A mapping from coordinate keys to recommended versions.
///
/// Immutable once a provider has materialized it; all lookups take `&self`.
#[derive(Debug, Clone, Default)]
pub struct VersionMapping {
    exact: HashMap<String, String>,
    wildcards: Vec<WildcardKey>,
}

impl VersionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key and its version.
    ///
    /// Keys and versions are trimmed. An empty version is ignored, as it
    /// carries no recommendation. Re-inserting a key replaces its version
    /// and keeps its original declaration position.
    pub fn insert(&mut self, key: impl AsRef<str>, version: impl AsRef<str>) {
        let key = key.as_ref().trim();
        let version = version.as_ref().trim();
        if key.is_empty() || version.is_empty() {
            return;
        }

        let wildcard = key
            .split_once('/')
            .map(|(group, name)| (Segment::parse(group), Segment::parse(name)))
            .filter(|(group, name)| group.is_wildcard() || name.is_wildcard());

        match wildcard {
            Some((group, name)) => {
                if let Some(existing) = self.wildcards.iter_mut().find(|w| w.key == key) {
                    existing.version = version.to_string();
                } else {
                    self.wildcards.push(WildcardKey {
                        key: key.to_string(),
                        group,
                        name,
                        version: version.to_string(),
                    });
                }
            }
            None => {
                self.exact.insert(key.to_string(), version.to_string());
            }
        }
    }

    /// Copy every entry of `other` into this mapping; `other` wins on
    /// duplicate keys.
    pub fn merge(&mut self, other: &VersionMapping) {
        for (key, version) in other.iter() {
            self.insert(key, version);
        }
    }

    /// The version for a `group/name` query string.
    pub fn version_for_key(&self, query: &str) -> Option<&str> {
        if let Some(version) = self.exact.get(query) {
            return Some(version.as_str());
        }

        let (group, name) = query.split_once('/')?;
        self.wildcards
            .iter()
            .filter(|w| w.matches(group, name))
            .min_by_key(|w| w.specificity())
            .map(|w| w.version.as_str())
    }

    pub fn version_for(&self, coordinate: &Coordinate) -> Option<&str> {
        self.version_for_key(&coordinate.query_key())
    }

    /// The version stored under exactly this key, wildcard keys included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.exact.get(key).map(String::as_str).or_else(|| {
            self.wildcards
                .iter()
                .find(|w| w.key == key)
                .map(|w| w.version.as_str())
        })
    }

    /// Iterate over all `(key, version)` pairs: exact keys first in no
    /// particular order, then wildcard keys in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exact
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(
                self.wildcards
                    .iter()
                    .map(|w| (w.key.as_str(), w.version.as_str())),
            )
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for VersionMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, version) in iter {
            mapping.insert(key, version);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_beats_wildcard() {
        let mapping: VersionMapping = [("org.foo/*", "1.0"), ("org.foo/bar", "2.0")]
            .into_iter()
            .collect();
        assert_eq!(mapping.version_for(&Coordinate::new("org.foo", "bar")), Some("2.0"));
        assert_eq!(mapping.version_for(&Coordinate::new("org.foo", "baz")), Some("1.0"));
    }

    #[test]
    fn test_single_wildcard_beats_catch_all() {
        let mapping: VersionMapping = [("*/*", "0.1"), ("*/bar", "3.0")].into_iter().collect();
        assert_eq!(mapping.version_for_key("any/bar"), Some("3.0"));
        assert_eq!(mapping.version_for_key("any/thing"), Some("0.1"));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let mapping: VersionMapping = [("*/bar", "1.0"), ("org.foo/*", "2.0")]
            .into_iter()
            .collect();
        assert_eq!(mapping.version_for_key("org.foo/bar"), Some("1.0"));

        let mapping: VersionMapping = [("org.foo/*", "2.0"), ("*/bar", "1.0")]
            .into_iter()
            .collect();
        assert_eq!(mapping.version_for_key("org.foo/bar"), Some("2.0"));
    }

    #[test]
    fn test_glob_segment() {
        let mapping: VersionMapping = [("com.netflix.*/*", "5.0")].into_iter().collect();
        assert_eq!(mapping.version_for_key("com.netflix.nebula/core"), Some("5.0"));
        assert_eq!(mapping.version_for_key("com.google/guava"), None);
    }

    #[test]
    fn test_absent_is_not_an_error() {
        let mapping = VersionMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.version_for_key("a/b"), None);
        assert_eq!(mapping.version_for_key("no-separator"), None);
    }

    #[test]
    fn test_empty_versions_are_ignored() {
        let mapping: VersionMapping = [("a/b", "  "), ("c/d", " 1.0 ")].into_iter().collect();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("c/d"), Some("1.0"));
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut mapping = VersionMapping::new();
        mapping.insert("org.foo/*", "1.0");
        mapping.insert("*/bar", "2.0");
        mapping.insert("org.foo/*", "1.5");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.version_for_key("org.foo/bar"), Some("1.5"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base: VersionMapping = [("a/b", "1.0"), ("c/d", "1.0")].into_iter().collect();
        let overlay: VersionMapping = [("a/b", "2.0")].into_iter().collect();
        base.merge(&overlay);
        assert_eq!(base.get("a/b"), Some("2.0"));
        assert_eq!(base.get("c/d"), Some("1.0"));
    }
}
