//! Highest-version-wins selection
//!
//! Once a recommendation has been injected, the host still has to pick one
//! version when edges disagree. The recommender never calls into this
//! module; it is exported for hosts that do not bring their own rule.

use std::cmp::Ordering;

/// Compare two version strings.
///
/// Versions that both parse as semver compare as semver. Anything else is
/// split on `.`, `-` and `+`; numeric segments compare numerically and rank
/// above textual ones, textual segments compare lexically, and a version
/// that runs out of segments first is the lower one.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if let (Ok(va), Ok(vb)) = (semver::Version::parse(a), semver::Version::parse(b)) {
        return va.cmp(&vb);
    }

    let split = |v: &str| -> Vec<String> {
        v.split(['.', '-', '+']).map(str::to_string).collect()
    };
    let (sa, sb) = (split(a), split(b));

    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(nx), Ok(ny)) => nx.cmp(&ny),
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Ok(_)) => Ordering::Less,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len())
}

/// The highest of the candidate versions, or `None` if there are none.
///
/// Helper for the host's own conflict resolution after
/// [`DependencyRecommender::resolve_edge`](crate::DependencyRecommender::resolve_edge)
/// has run on every edge.
pub fn highest_version<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .max_by(|a, b| compare_versions(a, b))
}
