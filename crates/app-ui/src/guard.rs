//! Isolation guard for scoped theme reads
//!
//! Every scoped accessor runs [`IsolationGuard::validate_access`] before it
//! hands a theme to a caller. A failed check is a wiring bug: reading another
//! service's colors is worse than failing loudly, so there is no fallback.

use crate::error::{Result, ServiceLabel, ThemeError};
use crate::navigation::{active_group, ActiveRouteProvider};
use crate::resolver::ResolvedTheme;
use app_state::ServiceId;
use std::borrow::Borrow;
use std::sync::Arc;

/// Validates scoped theme reads against the active route
#[derive(Clone)]
pub struct IsolationGuard {
    routes: Arc<dyn ActiveRouteProvider>,
    diagnostics: bool,
}

impl std::fmt::Debug for IsolationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsolationGuard")
            .field("active_route", &self.routes.active_route())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl IsolationGuard {
    /// Create a guard reading the active route from `routes`
    ///
    /// Access diagnostics are on in debug builds only.
    pub fn new(routes: Arc<dyn ActiveRouteProvider>) -> Self {
        Self {
            routes,
            diagnostics: cfg!(debug_assertions),
        }
    }

    /// Enable or disable access diagnostics
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Whether access diagnostics are logged
    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    /// Check a scoped theme read
    ///
    /// Fails when:
    /// - `value` is `None` (accessor used outside its provider)
    /// - `value` was resolved for a different service
    /// - the active route group belongs to a different service
    /// - `value` is structurally incomplete
    ///
    /// A route outside every service group is not checked against `expected`.
    /// On success the checked value is handed back.
    pub fn validate_access<T: Borrow<ResolvedTheme>>(
        &self,
        context_name: &str,
        expected: ServiceId,
        value: Option<T>,
    ) -> Result<T> {
        let active_route = self.routes.active_route();
        if self.diagnostics {
            tracing::debug!(
                context = context_name,
                %expected,
                route = active_route.as_deref().unwrap_or("<none>"),
                "scoped theme accessed"
            );
        }

        let value = value.ok_or_else(|| ThemeError::MissingProvider {
            context: context_name.to_string(),
        })?;
        let theme: &ResolvedTheme = value.borrow();

        if theme.service != Some(expected) {
            return Err(ThemeError::ContextMismatch {
                context: context_name.to_string(),
                expected,
                provided: ServiceLabel(theme.service),
            });
        }

        if let Some(active) = active_group(self.routes.as_ref()) {
            if active != expected {
                return Err(ThemeError::RouteMismatch {
                    context: context_name.to_string(),
                    expected,
                    active,
                });
            }
        }

        let missing = theme.missing_fields();
        if !missing.is_empty() {
            return Err(ThemeError::MalformedTheme {
                context: context_name.to_string(),
                fields: missing,
            });
        }

        Ok(value)
    }
}
