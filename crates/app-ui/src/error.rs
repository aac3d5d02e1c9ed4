//! Theme errors
//!
//! Every error here signals a wiring or configuration mistake and is meant to
//! surface during development. An unknown service identifier is never an
//! error; it resolves to the base theme.

use app_state::ServiceId;
use thiserror::Error;

/// Errors raised by the theme layer
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A scoped theme was read where its provider is not mounted
    #[error("{context} used outside its theme provider")]
    MissingProvider {
        /// Accessor that was called
        context: String,
    },

    /// The context value belongs to a different service
    #[error("{context} expected the {expected} theme but was handed the {provided} theme")]
    ContextMismatch {
        /// Accessor that was called
        context: String,
        /// Service the caller asked for
        expected: ServiceId,
        /// Service the context value was resolved for
        provided: ServiceLabel,
    },

    /// The caller's route group belongs to a different service
    #[error("{context} read the {expected} theme from a {active} screen")]
    RouteMismatch {
        /// Accessor that was called
        context: String,
        /// Service the caller asked for
        expected: ServiceId,
        /// Route group of the active screen
        active: ServiceId,
    },

    /// The resolved theme is missing required values
    #[error("{context} provides a malformed theme: {}", fields.join(", "))]
    MalformedTheme {
        /// Accessor that was called
        context: String,
        /// Paths of the unusable fields
        fields: Vec<String>,
    },

    /// A service override catalog entry is invalid
    #[error("Invalid theme catalog: {0}")]
    InvalidCatalog(String),

    /// A style factory failed
    #[error("style factory for {screen} failed under the {theme} theme: {source}")]
    StyleFactory {
        /// Screen the styles belong to
        screen: String,
        /// Theme the factory ran against
        theme: String,
        /// Error raised by the factory
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThemeError {
    /// Whether the error should abort rendering
    ///
    /// Every theme error is a wiring or configuration mistake, so this is
    /// always true. Callers must not fall back to another service's colors.
    pub fn is_fatal(&self) -> bool {
        match self {
            ThemeError::MissingProvider { .. }
            | ThemeError::ContextMismatch { .. }
            | ThemeError::RouteMismatch { .. }
            | ThemeError::MalformedTheme { .. }
            | ThemeError::InvalidCatalog(_)
            | ThemeError::StyleFactory { .. }
            | ThemeError::Serialization(_)
            | ThemeError::Io(_) => true,
        }
    }

    /// Whether the error reports one service reading another's theme
    pub fn is_isolation_violation(&self) -> bool {
        matches!(
            self,
            ThemeError::ContextMismatch { .. } | ThemeError::RouteMismatch { .. }
        )
    }
}

/// Service a context value was resolved for, `None` meaning the base theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLabel(pub Option<ServiceId>);

impl std::fmt::Display for ServiceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(service) => write!(f, "{}", service),
            None => f.write_str("base"),
        }
    }
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
