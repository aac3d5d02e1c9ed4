//! Theme configuration
//!
//! Loaded from camelCase JSON; every field is optional:
//!
//! ```json
//! {
//!   "defaultTheme": "dark",
//!   "settleDelayMs": 150,
//!   "accessDiagnostics": false,
//!   "serviceOverrides": "themes/overrides.json"
//! }
//! ```

use crate::error::Result;
use crate::service::ServiceCatalog;
use crate::theme::BaseThemeName;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Startup configuration for the theme system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Base theme applied app-wide
    #[serde(default)]
    pub default_theme: BaseThemeName,

    /// Delay before a service switch settles, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Log every scoped theme read
    #[serde(default = "default_access_diagnostics")]
    pub access_diagnostics: bool,

    /// JSON file of service overrides merged over the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_overrides: Option<PathBuf>,
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_access_diagnostics() -> bool {
    cfg!(debug_assertions)
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: BaseThemeName::default(),
            settle_delay_ms: default_settle_delay_ms(),
            access_diagnostics: default_access_diagnostics(),
            service_overrides: None,
        }
    }
}

impl ThemeConfig {
    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file
    ///
    /// A relative `serviceOverrides` path is resolved against the directory
    /// containing the configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_json(&std::fs::read_to_string(path)?)?;

        if let (Some(overrides), Some(dir)) = (config.service_overrides.as_mut(), path.parent()) {
            if overrides.is_relative() {
                *overrides = dir.join(&*overrides);
            }
        }

        tracing::debug!(
            path = %path.display(),
            theme = %config.default_theme,
            "loaded theme config"
        );
        Ok(config)
    }

    /// Settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Built-in catalog with the configured override file merged in
    pub fn build_catalog(&self) -> Result<ServiceCatalog> {
        let mut catalog = ServiceCatalog::builtin();
        if let Some(path) = &self.service_overrides {
            let merged = catalog.load_overrides(path)?;
            tracing::info!(path = %path.display(), merged, "merged service overrides");
        }
        Ok(catalog)
    }
}
