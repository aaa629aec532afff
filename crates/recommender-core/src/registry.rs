//! Ordered registry of recommendation providers
//!
//! Providers are queried in reverse registration order: the provider added
//! last has the highest priority, and [`ProviderRegistry::add_first`] places
//! a provider where it is consulted last.

use std::fmt;
use std::sync::Arc;

use crate::provider::RecommendationProvider;
use crate::{Error, Result};

/// Registry of uniquely named providers in registration order.
///
/// Populated during configuration, then shared read-only by resolution
/// threads.
///
/// # Example
///
/// ```
/// use recommender_core::{MapProvider, ProviderRegistry};
///
/// let mut registry = ProviderRegistry::new();
/// registry
///     .append(MapProvider::new([("org.foo:bar", "1.0")]).with_name("shared"))
///     .unwrap();
/// registry
///     .append(MapProvider::new([("org.foo:bar", "2.0")]).with_name("override"))
///     .unwrap();
/// assert_eq!(registry.recommended_version("org.foo", "bar"), Some("2.0".to_string()));
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn RecommendationProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register a provider with the highest priority so far.
    ///
    /// Fails if a provider of the same name is already registered.
    pub fn append<P>(&mut self, provider: P) -> Result<()>
    where
        P: RecommendationProvider + 'static,
    {
        self.append_shared(Arc::new(provider))
    }

    /// Like [`append`](Self::append), for a provider the caller keeps a
    /// handle to.
    pub fn append_shared(&mut self, provider: Arc<dyn RecommendationProvider>) -> Result<()> {
        if self.contains(provider.name()) {
            return Err(Error::DuplicateProvider {
                name: provider.name().to_string(),
            });
        }
        self.providers.push(provider);
        Ok(())
    }

    /// Register a provider with the lowest priority, replacing any provider
    /// of the same name.
    pub fn add_first<P>(&mut self, provider: P)
    where
        P: RecommendationProvider + 'static,
    {
        self.add_first_shared(Arc::new(provider));
    }

    pub fn add_first_shared(&mut self, provider: Arc<dyn RecommendationProvider>) {
        self.remove(provider.name());
        self.providers.insert(0, provider);
    }

    /// Remove a provider by name, returning it if it was registered.
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn RecommendationProvider>> {
        let index = self.providers.iter().position(|p| p.name() == name)?;
        Some(self.providers.remove(index))
    }

    /// The recommended version for a coordinate.
    ///
    /// Asks each provider from the last registered to the first and returns
    /// the first answer. A failing provider is logged and skipped.
    pub fn recommended_version(&self, group: &str, name: &str) -> Option<String> {
        for provider in self.providers.iter().rev() {
            match provider.version_for(group, name) {
                Ok(Some(version)) => return Some(version),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        provider = %provider.name(),
                        coordinate = %format!("{}:{}", group, name),
                        error = %e,
                        "Exception while polling provider for version"
                    );
                }
            }
        }
        None
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn RecommendationProvider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    /// Check if a provider of this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Provider names in registration order (lowest priority first).
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RecommendationProvider>> {
        self.providers.iter()
    }

    /// Get the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
