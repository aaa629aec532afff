//! The recommender a host build tool talks to
//!
//! `DependencyRecommender` is configured once (providers, strategy, strict
//! mode, excluded configurations) and then consulted for every edge of the
//! dependency graph, possibly from several resolution threads.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::config::RecommenderConfig;
use crate::coordinate::{DeclaredDependency, ModuleSelector, ResolveDetails};
use crate::module_ref::ModuleRef;
use crate::provider::{
    CustomProvider, ManifestKind, ManifestProvider, ManifestResolver, MapProvider,
    PropertiesFileProvider, RecommendationProvider,
};
use crate::registry::ProviderRegistry;
use crate::strategy::{RecommendationStrategies, RecommendationStrategy};
use crate::{Error, Result};

/// Providers, strategy and settings for one build.
pub struct DependencyRecommender {
    registry: ProviderRegistry,
    config: RecommenderConfig,
    strategy: Box<dyn RecommendationStrategy>,
    resolver: Arc<dyn ManifestResolver>,
    maven_bom: Arc<ManifestProvider>,
    reasons: BTreeSet<String>,
}

impl DependencyRecommender {
    /// Create a recommender with default settings.
    ///
    /// `resolver` reads the manifests behind BOM, Ivy and lock-file
    /// providers.
    pub fn new(resolver: Arc<dyn ManifestResolver>) -> Self {
        Self::with_config(RecommenderConfig::default(), resolver)
    }

    /// Create a recommender from loaded settings.
    ///
    /// The Maven BOM provider is always present, registered with the
    /// lowest priority.
    pub fn with_config(config: RecommenderConfig, resolver: Arc<dyn ManifestResolver>) -> Self {
        let maven_bom = Arc::new(ManifestProvider::new(
            ManifestKind::MavenBom,
            Arc::clone(&resolver),
        ));
        let mut registry = ProviderRegistry::new();
        registry.add_first_shared(maven_bom.clone());

        Self {
            registry,
            strategy: config.strategy.create(config.strict_mode),
            config,
            resolver,
            maven_bom,
            reasons: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// The always-present Maven BOM provider.
    pub fn maven_bom_provider(&self) -> &Arc<ManifestProvider> {
        &self.maven_bom
    }

    // Provider registration

    /// Register a properties-file provider.
    pub fn properties_file(&mut self, provider: PropertiesFileProvider) -> Result<()> {
        self.ensure_core_bom_support_not_enabled("propertiesFile")?;
        let reason = format!("recommendations from properties file: {}", provider.source());
        self.register(provider, reason)
    }

    /// Register a provider over an in-memory map.
    pub fn map(&mut self, provider: MapProvider) -> Result<()> {
        self.ensure_core_bom_support_not_enabled("map")?;
        self.register(provider, "recommendations from a provided map".to_string())
    }

    /// Register a provider backed by a caller-supplied function.
    pub fn add_provider(&mut self, provider: CustomProvider) -> Result<()> {
        self.ensure_core_bom_support_not_enabled("addProvider")?;
        let reason = format!("recommendations from custom provider {}", provider.name());
        self.register(provider, reason)
    }

    /// Register a provider reading an Ivy descriptor, e.g.
    /// `"org.platform:ivy-recs:1.0"`.
    pub fn ivy_xml(&mut self, module: &str) -> Result<()> {
        self.ivy_xml_named(ManifestKind::IvyXml.default_name(), module)
    }

    /// Like [`ivy_xml`](Self::ivy_xml), under a caller-chosen provider name
    /// so several descriptors can be registered.
    pub fn ivy_xml_named(&mut self, name: &str, module: &str) -> Result<()> {
        self.ensure_core_bom_support_not_enabled("ivyXml")?;
        self.register_manifest(ManifestKind::IvyXml, name, module, "Ivy descriptor")
    }

    /// Register a provider reading a dependency lock.
    pub fn dependency_lock(&mut self, module: &str) -> Result<()> {
        self.dependency_lock_named(ManifestKind::DependencyLock.default_name(), module)
    }

    pub fn dependency_lock_named(&mut self, name: &str, module: &str) -> Result<()> {
        self.ensure_core_bom_support_not_enabled("dependencyLock")?;
        self.register_manifest(ManifestKind::DependencyLock, name, module, "dependency lock")
    }

    /// Add a BOM module to the Maven BOM provider.
    ///
    /// Without core BOM support the module is requested as a `pom`
    /// artifact.
    pub fn maven_bom(&mut self, module: &str) -> Result<()> {
        let mut module: ModuleRef = module.parse()?;
        if !self.config.core_bom_support {
            module = module.or_extension("pom");
        }
        self.record_reason(format!("recommendations from Maven BOM: {}", module));
        self.maven_bom.add_module(module);
        Ok(())
    }

    fn register_manifest(
        &mut self,
        kind: ManifestKind,
        name: &str,
        module: &str,
        what: &str,
    ) -> Result<()> {
        let module: ModuleRef = module.parse()?;
        let reason = format!("recommendations from {}: {}", what, module);
        let provider = ManifestProvider::new(kind, Arc::clone(&self.resolver))
            .with_name(name)
            .with_module(module);
        self.register(provider, reason)
    }

    fn register<P>(&mut self, provider: P, reason: String) -> Result<()>
    where
        P: RecommendationProvider + 'static,
    {
        self.registry.append(provider)?;
        self.record_reason(reason);
        Ok(())
    }

    fn ensure_core_bom_support_not_enabled(&self, feature: &str) -> Result<()> {
        if self.config.core_bom_support {
            return Err(Error::FeatureConflict {
                feature: feature.to_string(),
            });
        }
        Ok(())
    }

    // Strategy and settings

    pub fn strategy(&self) -> RecommendationStrategies {
        self.config.strategy
    }

    /// Select the strategy. Dependencies inspected so far are forgotten.
    pub fn set_strategy(&mut self, strategy: RecommendationStrategies) {
        self.config.strategy = strategy;
        self.rebuild_strategy();
    }

    pub fn is_strict_mode(&self) -> bool {
        self.config.strict_mode
    }

    /// Toggle strict mode. Dependencies inspected so far are forgotten.
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.config.strict_mode = strict;
        self.rebuild_strategy();
    }

    fn rebuild_strategy(&mut self) {
        self.strategy = self.config.strategy.create(self.config.strict_mode);
    }

    pub fn exclude_configurations<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .excluded_configurations
            .extend(names.into_iter().map(Into::into));
    }

    pub fn excluded_configurations(&self) -> &BTreeSet<String> {
        &self.config.excluded_configurations
    }

    /// Record why recommendations are active, for audit output.
    pub fn record_reason(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.reasons.insert(reason.clone()) {
            tracing::info!(%reason, "Dependency recommendations enabled");
        }
    }

    pub fn reasons(&self) -> &BTreeSet<String> {
        &self.reasons
    }

    // Resolution

    /// Show a declared dependency to the strategy before resolution.
    pub fn inspect_dependency(&mut self, dependency: &DeclaredDependency) {
        if self.config.is_excluded(&dependency.configuration) {
            return;
        }
        self.strategy.inspect_dependency(dependency);
    }

    pub fn can_recommend_version(&self, selector: &ModuleSelector) -> bool {
        self.strategy.can_recommend_version(selector)
    }

    /// The version the providers recommend for a coordinate.
    pub fn recommended_version(&self, group: &str, name: &str) -> Option<String> {
        self.registry.recommended_version(group, name)
    }

    /// Apply the recommendation for one graph edge.
    ///
    /// Returns whether the edge's version was set. Edges in excluded
    /// configurations and coordinates without a recommendation are left
    /// alone. Fails with [`Error::StrictConflict`] when strict mode refuses
    /// the override.
    pub fn resolve_edge(&self, details: &mut ResolveDetails) -> Result<bool> {
        if self.config.is_excluded(&details.configuration) {
            return Ok(false);
        }
        if !self.strategy.can_recommend_version(&details.requested) {
            return Ok(false);
        }

        let requested = &details.requested;
        let Some(version) = self.recommended_version(&requested.group, &requested.name) else {
            return Ok(false);
        };
        self.strategy.recommend_version(details, &version)
    }
}

impl fmt::Debug for DependencyRecommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRecommender")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("reasons", &self.reasons)
            .finish_non_exhaustive()
    }
}
