//! Service marketplace theming
//!
//! Wires the theme stack from [`app_state`] to the token catalog, resolver and
//! isolation guard from [`app_ui`]. Hosts build one [`ThemeSystem`] at startup
//! and forward navigation events to it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_state::{
    BaseThemeName, NavigationLifecycle, ServiceId, StackPhase, ThemeStackController,
    ThemeStackState,
};
pub use app_ui::{
    CurrentRoute, ResolvedTheme, Result, ThemeConfig, ThemeError, ThemeHandle, ThemeScopes,
    ThemedStyles,
};

use app_ui::{route_group, IsolationGuard};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber for the theme crates
///
/// `RUST_LOG` takes precedence over `filter`. Later calls are ignored.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("tracing initialized");
    }
}

/// Theme scopes plus the route holder they check against
#[derive(Debug)]
pub struct ThemeSystem {
    scopes: ThemeScopes,
    route: CurrentRoute,
}

impl ThemeSystem {
    /// Build the theme system from configuration
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let catalog = config.build_catalog()?;
        let controller =
            ThemeStackController::with_settings(config.default_theme, config.settle_delay());
        let route = CurrentRoute::new();
        let guard = IsolationGuard::new(Arc::new(route.clone()))
            .with_diagnostics(config.access_diagnostics);

        tracing::info!(
            theme = %config.default_theme,
            services = catalog.len(),
            "theme system ready"
        );

        Ok(Self {
            scopes: ThemeScopes::with_guard(controller, catalog, guard),
            route,
        })
    }

    /// Build the theme system from a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&ThemeConfig::load(path)?)
    }

    /// Scoped and unscoped theme access
    pub fn scopes(&self) -> &ThemeScopes {
        &self.scopes
    }

    /// Theme stack controller
    pub fn controller(&self) -> &ThemeStackController {
        self.scopes.controller()
    }

    /// Route holder shared with the isolation guard
    pub fn route(&self) -> &CurrentRoute {
        &self.route
    }

    /// Record a focused screen and enter its service
    ///
    /// Routes outside every service group update the route holder only; the
    /// stack keeps its current service.
    pub fn focus(&self, path: &str) {
        self.route.set(path);
        match route_group(path) {
            Some(service) => self.controller().on_navigation_focus(service),
            None => tracing::trace!(path, "focused route has no service group"),
        }
    }

    /// Forward a blur event to the stack
    pub fn blur(&self) {
        self.controller().on_navigation_blur();
    }

    /// Return to the app root, clearing the theme history
    pub fn reset_to_root(&self, path: &str) {
        self.route.set(path);
        self.controller().reset_theme_stack();
    }
}

impl Default for ThemeSystem {
    fn default() -> Self {
        let route = CurrentRoute::new();
        Self {
            scopes: ThemeScopes::new(
                ThemeStackController::new(),
                app_ui::ServiceCatalog::builtin(),
                Arc::new(route.clone()),
            ),
            route,
        }
    }
}
