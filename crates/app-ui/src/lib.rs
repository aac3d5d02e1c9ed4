//! Theming for the service marketplace
//!
//! Every screen is styled from a base token set (professional, light or
//! dark) overlaid with the override of the service it belongs to. Services
//! are visually isolated: a screen in the booking flow can never read the
//! education theme.
//!
//! # Modules
//!
//! - [`tokens`] - Token categories and their partial patches
//! - [`theme`] - Base token sets, colors, and gradients
//! - [`service`] - Per-service overrides and the override catalog
//! - [`resolver`] - Base + override merge and memoization
//! - [`navigation`] - Route-group introspection
//! - [`guard`] - Isolation checks for scoped reads
//! - [`scope`] - Scoped and unscoped theme access
//! - [`styles`] - Memoized style factories
//! - [`config`] - Startup configuration
//!
//! # Example
//!
//! ```rust
//! use app_ui::{get_theme, resolve, BaseThemeName, ServiceCatalog, ServiceId};
//!
//! let base = get_theme(BaseThemeName::Professional);
//! let catalog = ServiceCatalog::builtin();
//!
//! let education = catalog.get(ServiceId::Education).unwrap();
//! let theme = resolve(&base, Some((ServiceId::Education, education.as_ref())));
//! assert_eq!(theme.tokens.colors.primary, "#6A1B9A");
//! assert_eq!(theme.tokens.colors.success, base.tokens.colors.success);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod resolver;
pub mod scope;
pub mod service;
pub mod styles;
pub mod theme;
pub mod tokens;

pub use app_state::{BaseThemeName, ServiceId};

pub use config::ThemeConfig;
pub use error::{Result, ServiceLabel, ThemeError};
pub use guard::IsolationGuard;
pub use navigation::{active_group, route_group, ActiveRouteProvider, CurrentRoute};
pub use resolver::{resolve, resolve_service, ResolvedTheme, ThemeMemo};
pub use scope::{ThemeHandle, ThemeScopes};

pub use service::{
    family_default_gradients, ButtonVariant, CardVariant, ComponentVariants, InputVariant,
    LayoutKind, ServiceCatalog, ServiceOverride,
};

pub use styles::{button_styles, ButtonStyles, ThemedStyles};

pub use theme::{
    dark_theme, get_theme, is_valid_color, light_theme, parse_hex_color, professional_theme,
    rgb_to_hex, BaseTheme, Color, GradientDefinition, GradientDirection, GradientSlot,
    GradientTable,
};

pub use tokens::{
    BorderRadiusPatch, BorderRadiusTokens, ColorPatch, ColorTokens, Padding, ShadowPatch,
    ShadowPreset, ShadowTokens, SpacingPatch, SpacingTokens, TokenSet, TypographyPatch,
    TypographyTokens,
};
