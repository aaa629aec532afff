//! Recommender settings
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! strategy = "override-transitives"
//! strict-mode = true
//! excluded-configurations = ["annotationProcessor"]
//! core-bom-support = false
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::strategy::RecommendationStrategies;
use crate::{Error, Result};

/// Settings shared by every recommendation made during a build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RecommenderConfig {
    /// Which strategy decides when recommendations apply.
    pub strategy: RecommendationStrategies,
    /// Fail instead of overriding a conflicting direct dependency.
    pub strict_mode: bool,
    /// Configurations (scopes) whose edges are never touched.
    pub excluded_configurations: BTreeSet<String>,
    /// Whether the host resolves BOMs natively. When set, every provider
    /// kind other than Maven BOM is unavailable.
    pub core_bom_support: bool,
}

impl RecommenderConfig {
    /// Load settings from a TOML file.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No recommender config; using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn is_excluded(&self, configuration: &str) -> bool {
        self.excluded_configurations.contains(configuration)
    }
}
