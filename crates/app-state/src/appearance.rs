//! Appearance preferences
//!
//! The global (base) theme is an app-wide preference. The UI layer maps the
//! name to a concrete token set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown base theme name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid theme name: {0}")]
pub struct InvalidThemeName(pub String);

/// Name of a base token set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BaseThemeName {
    /// Azure-blue professional theme (app default)
    #[default]
    Professional,
    /// Bright neutral theme
    Light,
    /// Dark theme with near-black surfaces
    Dark,
}

impl BaseThemeName {
    /// All base themes
    pub fn all() -> [BaseThemeName; 3] {
        [BaseThemeName::Professional, BaseThemeName::Light, BaseThemeName::Dark]
    }

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseThemeName::Professional => "professional",
            BaseThemeName::Light => "light",
            BaseThemeName::Dark => "dark",
        }
    }

    /// Whether this theme uses dark surfaces
    pub fn is_dark(&self) -> bool {
        matches!(self, BaseThemeName::Dark)
    }
}

impl fmt::Display for BaseThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseThemeName {
    type Err = InvalidThemeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(BaseThemeName::Professional),
            "light" => Ok(BaseThemeName::Light),
            "dark" => Ok(BaseThemeName::Dark),
            _ => Err(InvalidThemeName(s.to_string())),
        }
    }
}
