//! Providers backed by published manifests (BOMs, Ivy files, lock files)
//!
//! Parsing those formats is the job of a [`ManifestResolver`] supplied by
//! the host. The provider only knows which modules to ask for and caches
//! the merged answer.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::coordinate::Coordinate;
use crate::matcher::VersionMapping;
use crate::module_ref::ModuleRef;
use crate::{Error, Result};

use super::RecommendationProvider;
use super::lazy::LazyMapping;

/// The manifest format a provider reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    MavenBom,
    IvyXml,
    DependencyLock,
}

impl ManifestKind {
    pub fn default_name(&self) -> &'static str {
        match self {
            ManifestKind::MavenBom => "maven-bom",
            ManifestKind::IvyXml => "ivy-xml",
            ManifestKind::DependencyLock => "dependency-lock",
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Turns a module reference into the version mapping its manifest declares.
pub trait ManifestResolver: Send + Sync {
    fn resolve(&self, kind: ManifestKind, module: &ModuleRef) -> Result<VersionMapping>;
}

/// A fixed catalog of manifests keyed by `group:name:version`.
///
/// The extension of the requested module is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticManifestResolver {
    manifests: HashMap<(ManifestKind, String), VersionMapping>,
}

impl StaticManifestResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(
        mut self,
        kind: ManifestKind,
        module: &ModuleRef,
        mapping: VersionMapping,
    ) -> Self {
        self.insert(kind, module, mapping);
        self
    }

    pub fn insert(&mut self, kind: ManifestKind, module: &ModuleRef, mapping: VersionMapping) {
        self.manifests.insert((kind, Self::key(module)), mapping);
    }

    fn key(module: &ModuleRef) -> String {
        format!(
            "{}:{}:{}",
            module.group,
            module.name,
            module.version.as_deref().unwrap_or_default()
        )
    }
}

impl ManifestResolver for StaticManifestResolver {
    fn resolve(&self, kind: ManifestKind, module: &ModuleRef) -> Result<VersionMapping> {
        self.manifests
            .get(&(kind, Self::key(module)))
            .cloned()
            .ok_or_else(|| Error::ManifestNotFound {
                module: module.to_string(),
            })
    }
}

/// Provider over one or more manifests of the same kind.
///
/// Mappings of all modules are merged on first query; on duplicate keys
/// the module added last wins.
pub struct ManifestProvider {
    name: String,
    kind: ManifestKind,
    modules: Mutex<Vec<ModuleRef>>,
    resolver: Arc<dyn ManifestResolver>,
    recommendations: LazyMapping,
}

impl ManifestProvider {
    pub fn new(kind: ManifestKind, resolver: Arc<dyn ManifestResolver>) -> Self {
        Self {
            name: kind.default_name().to_string(),
            kind,
            modules: Mutex::new(Vec::new()),
            resolver,
            recommendations: LazyMapping::new(),
        }
    }

    pub fn with_module(self, module: ModuleRef) -> Self {
        self.add_module(module);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(&self) -> ManifestKind {
        self.kind
    }

    /// Add a module to read recommendations from.
    ///
    /// Modules added after the first query are not picked up.
    pub fn add_module(&self, module: ModuleRef) {
        if self.recommendations.is_loaded() {
            tracing::warn!(
                provider = %self.name,
                module = %module,
                "Module added after recommendations were loaded; it will be ignored"
            );
        }
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(module);
    }

    pub fn modules(&self) -> Vec<ModuleRef> {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn load(&self) -> Result<VersionMapping> {
        let mut merged = VersionMapping::new();
        for module in self.modules() {
            let mapping = self.resolver.resolve(self.kind, &module)?;
            tracing::debug!(
                provider = %self.name,
                module = %module,
                entries = mapping.len(),
                "Resolved manifest recommendations"
            );
            merged.merge(&mapping);
        }
        Ok(merged)
    }
}

impl fmt::Debug for ManifestProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestProvider")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("modules", &self.modules())
            .finish_non_exhaustive()
    }
}

impl RecommendationProvider for ManifestProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version_for(&self, group: &str, name: &str) -> Result<Option<String>> {
        let mapping = self.recommendations.get_or_try_load(|| self.load())?;
        Ok(mapping
            .version_for(&Coordinate::new(group, name))
            .map(str::to_string))
    }
}
