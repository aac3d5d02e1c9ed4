//! Scoped theme access
//!
//! [`ThemeScopes`] is the composition root for theme reads. It owns one
//! parameterized provider per mounted service instead of a hand-written
//! provider per service, plus the unscoped theme driven by the stack
//! controller.
//!
//! ```
//! use app_state::{ServiceId, ThemeStackController};
//! use app_ui::navigation::CurrentRoute;
//! use app_ui::scope::ThemeScopes;
//! use app_ui::service::ServiceCatalog;
//! use std::sync::Arc;
//!
//! let route = CurrentRoute::at("/(education)/courses");
//! let scopes = ThemeScopes::new(
//!     ThemeStackController::new(),
//!     ServiceCatalog::builtin(),
//!     Arc::new(route.clone()),
//! );
//!
//! scopes.mount(ServiceId::Education);
//! let theme = scopes.use_service_theme("use_education_theme", ServiceId::Education)?;
//! assert_eq!(theme.tokens().colors.primary, "#6A1B9A");
//!
//! // Reading the education theme as booking is a wiring bug.
//! scopes.mount(ServiceId::Booking);
//! assert!(scopes.use_service_theme("use_booking_theme", ServiceId::Booking).is_err());
//! # Ok::<(), app_ui::ThemeError>(())
//! ```

use crate::error::Result;
use crate::guard::IsolationGuard;
use crate::navigation::ActiveRouteProvider;
use crate::resolver::{resolve_service, ResolvedTheme, ThemeMemo};
use crate::service::{ComponentVariants, LayoutKind, ServiceCatalog};
use crate::styles::ThemedStyles;
use crate::theme::{dark_theme, light_theme, professional_theme, BaseTheme, BaseThemeName};
use crate::theme::{GradientDefinition, GradientSlot, GradientTable};
use crate::tokens::TokenSet;
use app_state::{ServiceId, ThemeStackController};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Base themes built once, so their token sets keep a stable identity
#[derive(Debug)]
struct BaseThemes {
    professional: BaseTheme,
    light: BaseTheme,
    dark: BaseTheme,
}

impl BaseThemes {
    fn new() -> Self {
        Self {
            professional: professional_theme(),
            light: light_theme(),
            dark: dark_theme(),
        }
    }

    fn get(&self, name: BaseThemeName) -> &BaseTheme {
        match name {
            BaseThemeName::Professional => &self.professional,
            BaseThemeName::Light => &self.light,
            BaseThemeName::Dark => &self.dark,
        }
    }
}

/// Scoped and unscoped theme access for the whole app
#[derive(Debug)]
pub struct ThemeScopes {
    controller: ThemeStackController,
    catalog: Arc<ServiceCatalog>,
    bases: BaseThemes,
    guard: IsolationGuard,
    active: ThemeMemo,
    providers: RwLock<HashMap<ServiceId, Arc<ThemeMemo>>>,
}

impl ThemeScopes {
    /// Create scopes over a controller and catalog
    ///
    /// `routes` reports the focused route for isolation checks.
    pub fn new(
        controller: ThemeStackController,
        catalog: ServiceCatalog,
        routes: Arc<dyn ActiveRouteProvider>,
    ) -> Self {
        Self::with_guard(controller, catalog, IsolationGuard::new(routes))
    }

    /// Create scopes with a preconfigured guard
    pub fn with_guard(
        controller: ThemeStackController,
        catalog: ServiceCatalog,
        guard: IsolationGuard,
    ) -> Self {
        Self {
            controller,
            catalog: Arc::new(catalog),
            bases: BaseThemes::new(),
            guard,
            active: ThemeMemo::new(),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Stack controller driving the unscoped theme
    pub fn controller(&self) -> &ThemeStackController {
        &self.controller
    }

    /// Override catalog
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Isolation guard applied to scoped reads
    pub fn guard(&self) -> &IsolationGuard {
        &self.guard
    }

    /// Base theme for `name`
    pub fn base_theme(&self, name: BaseThemeName) -> &BaseTheme {
        self.bases.get(name)
    }

    // ========== Unscoped ==========

    /// Theme for the active service under the global theme
    ///
    /// Follows the stack controller. Not isolation-checked; shared chrome
    /// such as tab bars reads this.
    pub fn active_theme(&self) -> Arc<ResolvedTheme> {
        let state = self.controller.state();
        let (base, service) = (state.global_theme, state.active_service);
        self.active.get_or_resolve(base, service, || {
            resolve_service(self.bases.get(base), &self.catalog, service)
        })
    }

    // ========== Providers ==========

    /// Mount the provider for `service`
    ///
    /// Returns false when it was already mounted. [`ServiceId::Unknown`] has
    /// no provider and is never mounted.
    pub fn mount(&self, service: ServiceId) -> bool {
        if !service.is_known() {
            tracing::warn!("ignoring theme provider for unknown service");
            return false;
        }

        let mut providers = self.providers.write();
        if providers.contains_key(&service) {
            return false;
        }
        tracing::debug!(%service, "theme provider mounted");
        providers.insert(service, Arc::new(ThemeMemo::new()));
        true
    }

    /// Unmount the provider for `service`
    pub fn unmount(&self, service: ServiceId) -> bool {
        let removed = self.providers.write().remove(&service).is_some();
        if removed {
            tracing::debug!(%service, "theme provider unmounted");
        }
        removed
    }

    /// Whether a provider for `service` is mounted
    pub fn is_mounted(&self, service: ServiceId) -> bool {
        self.providers.read().contains_key(&service)
    }

    /// Value the provider for `service` currently supplies, unchecked
    pub fn provider_value(&self, service: ServiceId) -> Option<Arc<ResolvedTheme>> {
        let memo = self.providers.read().get(&service).cloned()?;
        let base = self.controller.global_theme();
        Some(memo.get_or_resolve(base, Some(service), || {
            resolve_service(self.bases.get(base), &self.catalog, Some(service))
        }))
    }

    /// Read the theme of `service` from its provider
    ///
    /// `context_name` names the accessor in errors and diagnostics. Fails
    /// when the provider is not mounted or the read crosses service
    /// boundaries.
    pub fn use_service_theme(&self, context_name: &str, service: ServiceId) -> Result<ThemeHandle> {
        let theme = self
            .guard
            .validate_access(context_name, service, self.provider_value(service))?;
        Ok(ThemeHandle { theme })
    }
}

/// Checked read access to one service's resolved theme
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    theme: Arc<ResolvedTheme>,
}

impl ThemeHandle {
    /// Service the theme belongs to
    pub fn service(&self) -> Option<ServiceId> {
        self.theme.service
    }

    /// Merged tokens
    pub fn tokens(&self) -> &TokenSet {
        &self.theme.tokens
    }

    /// Layout family
    pub fn layout(&self) -> LayoutKind {
        self.theme.layout
    }

    /// Component variant choices
    pub fn component_variants(&self) -> &ComponentVariants {
        &self.theme.component_variants
    }

    /// All gradients
    pub fn gradients(&self) -> &GradientTable {
        &self.theme.gradients
    }

    /// Gradient for one slot
    pub fn get_gradient(&self, slot: GradientSlot) -> &GradientDefinition {
        self.theme.get_gradient(slot)
    }

    /// Underlying resolved theme
    pub fn theme(&self) -> &Arc<ResolvedTheme> {
        &self.theme
    }

    /// Styles for this theme from a screen's style adapter
    pub fn styles<S, F, E>(&self, adapter: &ThemedStyles<S, F>) -> Result<Arc<S>>
    where
        F: Fn(&TokenSet, LayoutKind, &ComponentVariants) -> std::result::Result<S, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        adapter.styles(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThemeError;
    use crate::navigation::CurrentRoute;
    use crate::styles::button_styles;

    fn scopes_at(path: &str) -> (ThemeScopes, CurrentRoute) {
        let route = CurrentRoute::at(path);
        let scopes = ThemeScopes::new(
            ThemeStackController::new(),
            ServiceCatalog::builtin(),
            Arc::new(route.clone()),
        );
        (scopes, route)
    }

    // ==========================================================================
    // Provider Tests
    // ==========================================================================

    #[test]
    fn test_mount_and_unmount() {
        let (scopes, _) = scopes_at("/");
        assert!(scopes.mount(ServiceId::Booking));
        assert!(!scopes.mount(ServiceId::Booking));
        assert!(!scopes.mount(ServiceId::Unknown));
        assert!(scopes.is_mounted(ServiceId::Booking));

        assert!(scopes.unmount(ServiceId::Booking));
        assert!(!scopes.unmount(ServiceId::Booking));
        assert!(scopes.provider_value(ServiceId::Booking).is_none());
    }

    #[test]
    fn test_read_outside_provider_fails() {
        let (scopes, _) = scopes_at("/(healthcare)/doctors");
        let err = scopes
            .use_service_theme("use_healthcare_theme", ServiceId::Healthcare)
            .unwrap_err();
        assert!(matches!(err, ThemeError::MissingProvider { .. }));
    }

    #[test]
    fn test_scoped_read_in_own_route_group() {
        let (scopes, _) = scopes_at("/(education)/courses/42");
        scopes.mount(ServiceId::Education);

        let handle = scopes
            .use_service_theme("use_education_theme", ServiceId::Education)
            .unwrap();
        assert_eq!(handle.service(), Some(ServiceId::Education));
        assert_eq!(handle.tokens().colors.primary, "#6A1B9A");
        assert_eq!(handle.layout(), LayoutKind::Academic);
        assert_eq!(
            handle.get_gradient(GradientSlot::Header),
            &handle.gradients().header
        );
    }

    #[test]
    fn test_scoped_read_from_other_route_group_fails() {
        let (scopes, route) = scopes_at("/(education)/courses");
        scopes.mount(ServiceId::Booking);

        let err = scopes
            .use_service_theme("use_booking_theme", ServiceId::Booking)
            .unwrap_err();
        assert!(err.is_isolation_violation());

        route.set("/(booking)/slots");
        assert!(scopes
            .use_service_theme("use_booking_theme", ServiceId::Booking)
            .is_ok());
    }

    #[test]
    fn test_provider_value_is_memoized_per_global_theme() {
        let (scopes, _) = scopes_at("/(booking)/slots");
        scopes.mount(ServiceId::Booking);

        let first = scopes.use_service_theme("use_booking_theme", ServiceId::Booking).unwrap();
        let second = scopes.use_service_theme("use_booking_theme", ServiceId::Booking).unwrap();
        assert!(Arc::ptr_eq(first.theme(), second.theme()));

        scopes.controller().set_global_theme(BaseThemeName::Dark);
        let dark = scopes.use_service_theme("use_booking_theme", ServiceId::Booking).unwrap();
        assert!(!Arc::ptr_eq(first.theme(), dark.theme()));
        assert_eq!(dark.theme().base, BaseThemeName::Dark);
    }

    #[test]
    fn test_handle_styles() {
        let (scopes, _) = scopes_at("/(entertainment)/events");
        scopes.mount(ServiceId::Entertainment);
        let adapter = ThemedStyles::new("events", button_styles);

        let handle = scopes
            .use_service_theme("use_entertainment_theme", ServiceId::Entertainment)
            .unwrap();
        let first = handle.styles(&adapter).unwrap();
        let again = handle.styles(&adapter).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.background, handle.tokens().colors.primary);
    }

    // ==========================================================================
    // Active Theme Tests
    // ==========================================================================

    #[test]
    fn test_active_theme_follows_stack() {
        let (scopes, _) = scopes_at("/");
        let base = scopes.active_theme();
        assert_eq!(base.service, None);
        assert!(Arc::ptr_eq(
            &base.tokens,
            &scopes.base_theme(BaseThemeName::Professional).tokens
        ));

        scopes.controller().set_active_service(ServiceId::Education);
        let education = scopes.active_theme();
        assert_eq!(education.service, Some(ServiceId::Education));
        assert!(Arc::ptr_eq(&education, &scopes.active_theme()));

        scopes.controller().push_service_theme(ServiceId::Booking);
        assert_eq!(scopes.active_theme().service, Some(ServiceId::Booking));

        scopes.controller().pop_service_theme();
        assert_eq!(scopes.active_theme().service, Some(ServiceId::Education));

        scopes.controller().reset_theme_stack();
        assert_eq!(*scopes.active_theme(), *base);
    }

    #[test]
    fn test_active_theme_unknown_service_degrades() {
        let (scopes, _) = scopes_at("/");
        scopes.controller().set_active_service(ServiceId::Unknown);

        let theme = scopes.active_theme();
        assert_eq!(theme.service, None);
        assert_eq!(*theme.tokens, *scopes.base_theme(BaseThemeName::Professional).tokens);
    }
}
