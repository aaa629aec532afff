use std::collections::HashMap;

use crate::coordinate::{Coordinate, DeclaredDependency, ModuleSelector, ResolveDetails};
use crate::{Error, Result};

use super::RecommendationStrategy;

/// Applies recommendations to every edge, overriding declared versions.
///
/// In strict mode a direct dependency whose declared version differs from
/// the recommendation is a resolution failure instead of a silent override.
#[derive(Debug, Default)]
pub struct OverrideTransitives {
    strict_mode: bool,
    /// Direct dependencies and the version each was declared with.
    direct: HashMap<Coordinate, Option<String>>,
}

impl OverrideTransitives {
    pub fn new(strict_mode: bool) -> Self {
        Self {
            strict_mode,
            direct: HashMap::new(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    fn declared_version(&self, coordinate: &Coordinate) -> Option<&str> {
        self.direct.get(coordinate).and_then(|v| v.as_deref())
    }
}

impl RecommendationStrategy for OverrideTransitives {
    fn inspect_dependency(&mut self, dependency: &DeclaredDependency) {
        let declared = dependency.selector.declared_version().map(str::to_string);
        let entry = self
            .direct
            .entry(dependency.selector.coordinate())
            .or_default();
        if declared.is_some() {
            *entry = declared;
        }
    }

    fn can_recommend_version(&self, _selector: &ModuleSelector) -> bool {
        true
    }

    fn recommend_version(&self, details: &mut ResolveDetails, version: &str) -> Result<bool> {
        let coordinate = details.requested.coordinate();

        if self.strict_mode
            && let Some(declared) = self.declared_version(&coordinate)
            && declared != version
        {
            return Err(Error::StrictConflict {
                coordinate: coordinate.to_string(),
                declared: declared.to_string(),
                recommended: version.to_string(),
            });
        }

        tracing::debug!(
            coordinate = %coordinate,
            version,
            "Overriding with recommended version"
        );
        details.use_version(version);
        Ok(true)
    }
}
