//! Provider delegating to a caller-supplied function

use std::fmt;

use crate::Result;

use super::RecommendationProvider;

type Lookup = dyn Fn(&str, &str) -> Result<Option<String>> + Send + Sync;

/// Provider whose answers come from an arbitrary `(group, name)` function.
pub struct CustomProvider {
    name: String,
    lookup: Box<Lookup>,
}

impl CustomProvider {
    pub const DEFAULT_NAME: &'static str = "custom";

    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self::fallible(move |group, name| Ok(lookup(group, name)))
    }

    /// A custom provider whose function may fail.
    pub fn fallible<F>(lookup: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            lookup: Box::new(lookup),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Debug for CustomProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomProvider")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RecommendationProvider for CustomProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version_for(&self, group: &str, name: &str) -> Result<Option<String>> {
        (self.lookup)(group, name)
    }
}
