//! Property-file backed recommendations
//!
//! The file format is line-oriented `key=value`. Before parsing, everything
//! from a `#` to the end of its line is dropped and every `:` becomes `/`,
//! so `com.google.guava:guava = 19.0` is stored as `com.google.guava/guava`.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::coordinate::Coordinate;
use crate::matcher::VersionMapping;
use crate::{Error, Result};

use super::RecommendationProvider;
use super::lazy::LazyMapping;

/// Where a properties provider reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySource {
    File(PathBuf),
    Inline(String),
}

impl PropertySource {
    fn read(&self) -> Result<String> {
        match self {
            PropertySource::File(path) => {
                fs::read_to_string(path).map_err(|e| Error::io(path, e))
            }
            PropertySource::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertySource::File(path) => write!(f, "{}", path.display()),
            PropertySource::Inline(_) => write!(f, "<inline>"),
        }
    }
}

impl From<PathBuf> for PropertySource {
    fn from(path: PathBuf) -> Self {
        PropertySource::File(path)
    }
}

/// Provider backed by a properties file, read once on first query.
#[derive(Debug)]
pub struct PropertiesFileProvider {
    name: String,
    source: PropertySource,
    recommendations: LazyMapping,
}

impl PropertiesFileProvider {
    pub const DEFAULT_NAME: &'static str = "properties";

    pub fn new(source: impl Into<PropertySource>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            source: source.into(),
            recommendations: LazyMapping::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn source(&self) -> &PropertySource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.recommendations.is_loaded()
    }

    fn load(&self) -> Result<VersionMapping> {
        let text = self.source.read()?;
        let filtered = strip_eol_comments(&text).replace(':', "/");
        let mapping = parse_properties(&filtered);
        tracing::debug!(
            provider = %self.name,
            entries = mapping.len(),
            "Loaded property recommendations"
        );
        Ok(mapping)
    }
}

impl RecommendationProvider for PropertiesFileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version_for(&self, group: &str, name: &str) -> Result<Option<String>> {
        let mapping = self.recommendations.get_or_try_load(|| self.load())?;
        Ok(mapping
            .version_for(&Coordinate::new(group, name))
            .map(str::to_string))
    }
}

/// Drop every character from a `#` up to (not including) the next newline.
fn strip_eol_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_comment = false;
    for c in text.chars() {
        if c == '#' {
            in_comment = true;
            continue;
        }
        if c == '\n' {
            in_comment = false;
        }
        if !in_comment {
            out.push(c);
        }
    }
    out
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continuation lines (ending in an odd number of `\`) into logical
/// lines, skipping blank and `!` comment lines. Each line is paired with
/// its 1-based starting line number.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches(is_blank);
        let continuing = current.is_some();

        if !continuing && (line.is_empty() || line.starts_with('!')) {
            continue;
        }

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        let (body, continues) = if trailing % 2 == 1 {
            (&line[..line.len() - 1], true)
        } else {
            (line, false)
        };

        let entry = current.get_or_insert_with(|| (idx + 1, String::new()));
        entry.1.push_str(body);

        if !continues {
            lines.extend(current.take());
        }
    }

    lines.extend(current);
    lines
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::PropertyParse {
                        line,
                        message: format!("malformed \\uxxxx escape: \\u{}", hex),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Parse already-filtered property text into a version mapping.
///
/// Keys without a value and lines with malformed escapes are skipped with
/// a warning. Later declarations of a key replace earlier ones.
pub fn parse_properties(text: &str) -> VersionMapping {
    let mut mapping = VersionMapping::new();
    for (line_no, line) in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&line);
        let parsed = unescape(raw_key, line_no)
            .and_then(|key| unescape(raw_value, line_no).map(|value| (key, value)));
        let (key, value) = match parsed {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping unparsable property");
                continue;
            }
        };
        if value.trim().is_empty() {
            tracing::warn!(line = line_no, key = %key, "Ignoring property without a version");
            continue;
        }
        mapping.insert(key, value);
    }
    mapping
}
