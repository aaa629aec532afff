//! Version recommendation engine for dependency resolution.
//!
//! Recommendation providers supply versions for `group/name` coordinates.
//! A [`ProviderRegistry`] queries them newest-first, and a
//! [`RecommendationStrategy`] decides whether a recommendation may replace
//! the version an edge of the dependency graph already requests.
//!
//! [`DependencyRecommender`] ties the pieces together for a host build tool.

pub mod config;
pub mod conflict;
pub mod coordinate;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod module_ref;
pub mod provider;
pub mod recommender;
pub mod registry;
pub mod strategy;

pub use config::RecommenderConfig;
pub use coordinate::{Coordinate, DeclaredDependency, ModuleSelector, ResolveDetails};
pub use error::{Error, Result};
pub use matcher::VersionMapping;
pub use module_ref::ModuleRef;
pub use provider::{
    CustomProvider, ManifestKind, ManifestProvider, ManifestResolver, MapProvider,
    PropertiesFileProvider, PropertySource, RecommendationProvider, StaticManifestResolver,
};
pub use recommender::DependencyRecommender;
pub use registry::ProviderRegistry;
pub use strategy::{
    ConflictResolved, OverrideTransitives, RecommendationStrategies, RecommendationStrategy,
};
