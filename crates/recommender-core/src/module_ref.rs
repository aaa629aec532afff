//! Module references for manifest-backed providers

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A reference to a published module, written `group:name[:version][@ext]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    pub group: String,
    pub name: String,
    pub version: Option<String>,
    pub extension: Option<String>,
}

impl ModuleRef {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
            extension: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Set the extension only if none was given.
    pub fn or_extension(mut self, extension: &str) -> Self {
        if self.extension.is_none() {
            self.extension = Some(extension.to_string());
        }
        self
    }
}

impl FromStr for ModuleRef {
    type Err = Error;

    fn from_str(notation: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidModule {
            notation: notation.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = notation.trim();
        if trimmed.is_empty() {
            return Err(invalid("module may not be empty"));
        }

        let (coords, extension) = match trimmed.rsplit_once('@') {
            Some((_, "")) => return Err(invalid("empty extension")),
            Some((coords, ext)) => (coords, Some(ext.to_string())),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = coords.split(':').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("empty coordinate segment"));
        }

        match parts.as_slice() {
            [group, name] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: None,
                extension,
            }),
            [group, name, version] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: Some(version.to_string()),
                extension,
            }),
            _ => Err(invalid("expected group:name[:version][@ext]")),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(ext) = &self.extension {
            write!(f, "@{}", ext)?;
        }
        Ok(())
    }
}
