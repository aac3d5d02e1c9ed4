//! Route-group introspection
//!
//! Screens are organised in route groups, one per service, in the host
//! router's file layout:
//!
//! ```text
//! /(tabs)/home             -> main
//! /(education)/courses/42  -> education
//! /(booking)/slots         -> booking
//! ```
//!
//! The theme layer never drives navigation itself. It only asks the host
//! which route is active so it can tell which service a screen belongs to.

use app_state::ServiceId;
use parking_lot::RwLock;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Service owning the route group of `path`
///
/// The first segment decides. Grouped segments (`(education)`) and bare
/// service names (`education`) are both accepted; `(tabs)` and the root path
/// belong to the main app. Returns `None` for paths outside any service group.
pub fn route_group(path: &str) -> Option<ServiceId> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();

    if first.is_empty() {
        return Some(ServiceId::Main);
    }

    let name = first
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(first);

    if name.eq_ignore_ascii_case("tabs") {
        return Some(ServiceId::Main);
    }

    let service = ServiceId::parse_quiet(name);
    service.is_known().then_some(service)
}

/// Host navigator view of the currently focused route
#[cfg_attr(test, automock)]
pub trait ActiveRouteProvider: Send + Sync {
    /// Path of the focused screen, if the host knows it
    fn active_route(&self) -> Option<String>;
}

/// Service owning the focused screen's route group
pub fn active_group<P: ActiveRouteProvider + ?Sized>(provider: &P) -> Option<ServiceId> {
    provider.active_route().as_deref().and_then(route_group)
}

/// Route holder updated by the host on every focus change
///
/// Cheap to clone; clones share the same route.
#[derive(Debug, Clone, Default)]
pub struct CurrentRoute {
    path: Arc<RwLock<Option<String>>>,
}

impl CurrentRoute {
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder already pointing at `path`
    pub fn at(path: impl Into<String>) -> Self {
        let route = Self::new();
        route.set(path);
        route
    }

    /// Record the newly focused route
    pub fn set(&self, path: impl Into<String>) {
        *self.path.write() = Some(path.into());
    }

    /// Forget the current route
    pub fn clear(&self) {
        *self.path.write() = None;
    }
}

impl ActiveRouteProvider for CurrentRoute {
    fn active_route(&self) -> Option<String> {
        self.path.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_group_grouped_segments() {
        assert_eq!(route_group("/(education)/courses/42"), Some(ServiceId::Education));
        assert_eq!(route_group("(booking)/slots"), Some(ServiceId::Booking));
        assert_eq!(route_group("/(healthcare)"), Some(ServiceId::Healthcare));
        assert_eq!(route_group("/(entertainment)/events?id=3"), Some(ServiceId::Entertainment));
    }

    #[test]
    fn test_route_group_main_app() {
        assert_eq!(route_group("/"), Some(ServiceId::Main));
        assert_eq!(route_group(""), Some(ServiceId::Main));
        assert_eq!(route_group("/(tabs)/home"), Some(ServiceId::Main));
        assert_eq!(route_group("/main/profile"), Some(ServiceId::Main));
    }

    #[test]
    fn test_route_group_bare_and_unknown() {
        assert_eq!(route_group("/education/exams"), Some(ServiceId::Education));
        assert_eq!(route_group("/settings"), None);
        assert_eq!(route_group("/(auth)/login"), None);
    }

    #[test]
    fn test_current_route_shared_between_clones() {
        let route = CurrentRoute::new();
        assert_eq!(active_group(&route), None);

        let host = route.clone();
        host.set("/(booking)/checkout");
        assert_eq!(route.active_route().as_deref(), Some("/(booking)/checkout"));
        assert_eq!(active_group(&route), Some(ServiceId::Booking));

        host.clear();
        assert_eq!(route.active_route(), None);
        assert_eq!(active_group(&CurrentRoute::at("/(tabs)")), Some(ServiceId::Main));
    }

    #[test]
    fn test_mock_provider_default_group() {
        let mut provider = MockActiveRouteProvider::new();
        provider
            .expect_active_route()
            .returning(|| Some("/(healthcare)/doctors".to_string()));

        assert_eq!(active_group(&provider), Some(ServiceId::Healthcare));
    }
}
