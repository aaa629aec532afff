//! Strategies deciding when a recommendation overrides a requested version

mod conflict_resolved;
mod override_transitives;

pub use conflict_resolved::ConflictResolved;
pub use override_transitives::OverrideTransitives;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::{DeclaredDependency, ModuleSelector, ResolveDetails};
use crate::{Error, Result};

/// Defines in which cases recommendations are applied.
pub trait RecommendationStrategy: Send + Sync {
    /// Called once for each dependency the project declares, before
    /// resolution starts. Lets the strategy tell direct dependencies from
    /// transitive ones later without walking the graph again.
    fn inspect_dependency(&mut self, dependency: &DeclaredDependency);

    /// Whether [`recommend_version`](Self::recommend_version) would apply a
    /// recommendation to an edge requesting `selector`.
    fn can_recommend_version(&self, selector: &ModuleSelector) -> bool;

    /// Write `version` into the edge's outcome if the strategy allows it.
    ///
    /// Returns whether the edge was changed. Fails only when a strict
    /// strategy refuses to silently replace a declared version.
    fn recommend_version(&self, details: &mut ResolveDetails, version: &str) -> Result<bool>;
}

/// The strategy variants a build can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationStrategies {
    /// Recommend only where the project did not pin a version itself.
    #[default]
    ConflictResolved,
    /// Recommend everywhere, transitive requests included.
    OverrideTransitives,
}

impl RecommendationStrategies {
    /// Build a fresh strategy object of this variant.
    pub fn create(self, strict_mode: bool) -> Box<dyn RecommendationStrategy> {
        match self {
            RecommendationStrategies::ConflictResolved => Box::new(ConflictResolved::new()),
            RecommendationStrategies::OverrideTransitives => {
                Box::new(OverrideTransitives::new(strict_mode))
            }
        }
    }
}

impl FromStr for RecommendationStrategies {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "conflict-resolved" | "conflictresolved" => {
                Ok(RecommendationStrategies::ConflictResolved)
            }
            "override-transitives" | "overridetransitives" => {
                Ok(RecommendationStrategies::OverrideTransitives)
            }
            _ => Err(Error::Configuration {
                message: format!("unknown recommendation strategy: {}", s),
            }),
        }
    }
}

impl fmt::Display for RecommendationStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationStrategies::ConflictResolved => write!(f, "conflict-resolved"),
            RecommendationStrategies::OverrideTransitives => write!(f, "override-transitives"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_conflict_resolved() {
        assert_eq!(
            RecommendationStrategies::default(),
            RecommendationStrategies::ConflictResolved
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ConflictResolved".parse::<RecommendationStrategies>().unwrap(),
            RecommendationStrategies::ConflictResolved
        );
        assert_eq!(
            "override-transitives".parse::<RecommendationStrategies>().unwrap(),
            RecommendationStrategies::OverrideTransitives
        );
        assert_eq!(
            "OVERRIDE_TRANSITIVES".parse::<RecommendationStrategies>().unwrap(),
            RecommendationStrategies::OverrideTransitives
        );
        assert!("newest".parse::<RecommendationStrategies>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecommendationStrategies::ConflictResolved.to_string(), "conflict-resolved");
        assert_eq!(
            RecommendationStrategies::OverrideTransitives.to_string(),
            "override-transitives"
        );
    }
}
