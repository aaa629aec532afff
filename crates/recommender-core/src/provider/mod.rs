//! Recommendation providers
//!
//! Every provider answers one question: which version is recommended for
//! `group:name`? Providers that are backed by a file or a manifest load
//! their data lazily, once, and answer every later query from memory.

mod custom;
mod lazy;
mod manifest;
mod map;
mod properties;

pub use custom::CustomProvider;
pub use manifest::{ManifestKind, ManifestProvider, ManifestResolver, StaticManifestResolver};
pub use map::MapProvider;
pub use properties::{PropertiesFileProvider, PropertySource, parse_properties};

use crate::Result;

/// A source of version recommendations.
///
/// Implementations must be safe to query from several resolution threads
/// at once.
pub trait RecommendationProvider: Send + Sync {
    /// Unique name within a [`ProviderRegistry`](crate::ProviderRegistry).
    fn name(&self) -> &str;

    /// The recommended version for a coordinate, or `None` if this provider
    /// has no opinion.
    ///
    /// Fails if the provider's backing source is missing, unreadable or
    /// malformed.
    fn version_for(&self, group: &str, name: &str) -> Result<Option<String>>;
}
