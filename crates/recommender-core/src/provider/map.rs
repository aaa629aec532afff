//! In-memory map of recommendations

use crate::Result;
use crate::coordinate::Coordinate;
use crate::matcher::VersionMapping;

use super::RecommendationProvider;

/// Provider over a mapping supplied at configuration time.
///
/// Keys may be written `group:name` or `group/name` and may use wildcards.
#[derive(Debug, Clone)]
pub struct MapProvider {
    name: String,
    recommendations: VersionMapping,
}

impl MapProvider {
    pub const DEFAULT_NAME: &'static str = "map";

    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let recommendations = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().replace(':', "/"), v.as_ref().to_string()))
            .collect();
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            recommendations,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn recommendations(&self) -> &VersionMapping {
        &self.recommendations
    }
}

impl RecommendationProvider for MapProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version_for(&self, group: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .recommendations
            .version_for(&Coordinate::new(group, name))
            .map(str::to_string))
    }
}
