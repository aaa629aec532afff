use std::collections::HashSet;

use crate::Result;
use crate::coordinate::{Coordinate, DeclaredDependency, ModuleSelector, ResolveDetails};

use super::RecommendationStrategy;

/// Applies recommendations only to coordinates the project has not pinned.
///
/// A direct dependency declared with an explicit version keeps that
/// version. Everything else, transitive requests included, takes the
/// recommendation; the host's highest-version-wins conflict resolution
/// then settles any edges that still disagree.
#[derive(Debug, Default)]
pub struct ConflictResolved {
    first_order_with_versions: HashSet<Coordinate>,
}

impl ConflictResolved {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_pinned(&self, coordinate: &Coordinate) -> bool {
        self.first_order_with_versions.contains(coordinate)
    }
}

impl RecommendationStrategy for ConflictResolved {
    fn inspect_dependency(&mut self, dependency: &DeclaredDependency) {
        if dependency.selector.declared_version().is_some() {
            self.first_order_with_versions
                .insert(dependency.selector.coordinate());
        }
    }

    fn can_recommend_version(&self, selector: &ModuleSelector) -> bool {
        !self.is_pinned(&selector.coordinate())
    }

    fn recommend_version(&self, details: &mut ResolveDetails, version: &str) -> Result<bool> {
        if !self.can_recommend_version(&details.requested) {
            return Ok(false);
        }
        tracing::debug!(
            coordinate = %details.requested.coordinate(),
            version,
            "Recommending version"
        );
        details.use_version(version);
        Ok(true)
    }
}
