//! Library coordinates and the graph edges that request them

use std::fmt;

/// A `(group, name)` pair identifying a library independent of version.
///
/// Both parts are trimmed on construction; comparison is otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
}

impl Coordinate {
    pub fn new(group: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            group: group.as_ref().trim().to_string(),
            name: name.as_ref().trim().to_string(),
        }
    }

    /// The `group/name` form providers are queried with.
    pub fn query_key(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// The requested side of a graph edge: a coordinate plus the version the
/// edge asks for, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSelector {
    pub group: String,
    pub name: String,
    pub version: Option<String>,
}

impl ModuleSelector {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.name)
    }

    /// The requested version, treating an empty string as no version.
    pub fn declared_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// A dependency declared directly by the consuming project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub selector: ModuleSelector,
    /// Name of the configuration (scope) the dependency is declared in.
    pub configuration: String,
}

impl DeclaredDependency {
    pub fn new(configuration: impl Into<String>, selector: ModuleSelector) -> Self {
        Self {
            selector,
            configuration: configuration.into(),
        }
    }
}

/// A graph edge being resolved.
///
/// Strategies write into `target` through [`ResolveDetails::use_version`];
/// the host reads it back once the edge is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveDetails {
    pub requested: ModuleSelector,
    /// Name of the configuration (scope) being resolved.
    pub configuration: String,
    target: Option<String>,
}

impl ResolveDetails {
    pub fn new(configuration: impl Into<String>, requested: ModuleSelector) -> Self {
        Self {
            requested,
            configuration: configuration.into(),
            target: None,
        }
    }

    pub fn use_version(&mut self, version: impl Into<String>) {
        self.target = Some(version.into());
    }

    /// The version a strategy selected, if any.
    pub fn target_version(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The version this edge resolves to: the selected one if set,
    /// otherwise whatever was requested.
    pub fn effective_version(&self) -> Option<&str> {
        self.target_version()
            .or_else(|| self.requested.declared_version())
    }
}
