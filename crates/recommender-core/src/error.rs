//! Error types for recommender-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid recommender configuration: {message}")]
    Configuration { message: String },

    #[error("Recommendation provider already registered: {name}")]
    DuplicateProvider { name: String },

    #[error("Invalid module reference '{notation}': {reason}")]
    InvalidModule { notation: String, reason: String },

    #[error("Provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest not found for module {module}")]
    ManifestNotFound { module: String },

    #[error("Malformed property on line {line}: {message}")]
    PropertyParse { line: usize, message: String },

    #[error(
        "Dependency {coordinate} declares version {declared} but {recommended} is recommended (strict mode)"
    )]
    StrictConflict {
        coordinate: String,
        declared: String,
        recommended: String,
    },

    #[error(
        "dependencyRecommender.{feature} is not available when core BOM support is enabled"
    )]
    FeatureConflict { feature: String },

    #[error("Failed to parse recommender config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Errors raised while the recommender is being configured, before any
    /// coordinate is resolved.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. }
                | Error::DuplicateProvider { .. }
                | Error::InvalidModule { .. }
                | Error::ConfigParse { .. }
        )
    }
}
