//! Theme resolution
//!
//! [`resolve`] overlays a service override onto a base theme. It is a pure
//! function: the same inputs always produce an equal [`ResolvedTheme`].
//!
//! Tokens merge shallowly per category. A field present in the override
//! replaces the base field; every other field of that category keeps its base
//! value. Composite fields are replaced whole, never merged recursively.
//!
//! Gradients resolve per slot in three tiers: the override's own gradient,
//! then the service family default, then the base theme's gradient.

use crate::service::{
    family_default_gradients, ComponentVariants, LayoutKind, ServiceCatalog, ServiceOverride,
};
use crate::theme::{BaseTheme, BaseThemeName, GradientDefinition, GradientSlot, GradientTable};
use crate::tokens::TokenSet;
use app_state::ServiceId;
use parking_lot::Mutex;
use std::sync::Arc;

/// A fully merged theme, ready for styling
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    /// Base theme the tokens derive from
    pub base: BaseThemeName,
    /// Service the theme was resolved for, `None` for the plain base theme
    pub service: Option<ServiceId>,
    /// Merged tokens
    pub tokens: Arc<TokenSet>,
    /// Layout family
    pub layout: LayoutKind,
    /// Component variant choices
    pub component_variants: Arc<ComponentVariants>,
    /// Gradient for every slot
    pub gradients: GradientTable,
}

impl ResolvedTheme {
    /// Gradient for a slot
    pub fn get_gradient(&self, slot: GradientSlot) -> &GradientDefinition {
        self.gradients.get(slot)
    }

    /// Short label for logs and error messages, e.g. "education/professional"
    pub fn label(&self) -> String {
        match self.service {
            Some(service) => format!("{}/{}", service, self.base),
            None => self.base.to_string(),
        }
    }

    /// Paths of unusable fields; empty when the theme is complete
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = self.tokens.missing_fields();
        for slot in GradientSlot::all() {
            if self.gradients.get(slot).validate().is_err() {
                missing.push(format!("gradients.{}", slot));
            }
        }
        missing
    }
}

/// Merge a base theme with an optional service override
///
/// With no override the base token set is shared as-is and the base gradients
/// are used unchanged.
pub fn resolve(base: &BaseTheme, service: Option<(ServiceId, &ServiceOverride)>) -> ResolvedTheme {
    let Some((service, entry)) = service else {
        return ResolvedTheme {
            base: base.name,
            service: None,
            tokens: Arc::clone(&base.tokens),
            layout: LayoutKind::default(),
            component_variants: Arc::new(ComponentVariants::default()),
            gradients: base.gradients.clone(),
        };
    };

    let tokens = TokenSet {
        colors: entry.colors.apply(&base.tokens.colors),
        typography: entry.typography.apply(&base.tokens.typography),
        spacing: entry.spacing.apply(&base.tokens.spacing),
        border_radius: entry.border_radius.apply(&base.tokens.border_radius),
        shadows: entry.shadows.apply(&base.tokens.shadows),
    };

    let defaults = family_default_gradients(service);
    let mut gradients = base.gradients.clone();
    for slot in GradientSlot::all() {
        if let Some(gradient) = entry.gradients.get(&slot).or_else(|| defaults.get(&slot)) {
            *gradients.get_mut(slot) = gradient.clone();
        }
    }

    ResolvedTheme {
        base: base.name,
        service: Some(service),
        tokens: Arc::new(tokens),
        layout: entry.layout.unwrap_or_default(),
        component_variants: Arc::new(entry.component_variants.unwrap_or_default()),
        gradients,
    }
}

/// Resolve a base theme for a service looked up in `catalog`
///
/// Services without an override resolve to the plain base theme. A known
/// service keeps its tag so scoped reads still see whose theme it is;
/// [`ServiceId::Unknown`] resolves exactly like no service at all.
pub fn resolve_service(
    base: &BaseTheme,
    catalog: &ServiceCatalog,
    service: Option<ServiceId>,
) -> ResolvedTheme {
    let Some(id) = service.filter(|id| id.is_known()) else {
        return resolve(base, None);
    };

    match catalog.get(id) {
        Some(entry) => resolve(base, Some((id, entry.as_ref()))),
        None => ResolvedTheme {
            service: Some(id),
            ..resolve(base, None)
        },
    }
}

/// Single-slot memo over resolver inputs
///
/// Returns the same `Arc` for as long as the inputs stay equal, so consumers
/// that memoize on identity see exactly one change per input change.
#[derive(Debug, Default)]
pub struct ThemeMemo {
    slot: Mutex<Option<(MemoKey, Arc<ResolvedTheme>)>>,
}

type MemoKey = (BaseThemeName, Option<ServiceId>);

impl ThemeMemo {
    /// Create an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached theme for the inputs, computing it with `compute` on a miss
    pub fn get_or_resolve(
        &self,
        base: BaseThemeName,
        service: Option<ServiceId>,
        compute: impl FnOnce() -> ResolvedTheme,
    ) -> Arc<ResolvedTheme> {
        let mut slot = self.slot.lock();
        if let Some((key, theme)) = slot.as_ref() {
            if *key == (base, service) {
                tracing::trace!(%base, ?service, "resolved theme memo hit");
                return Arc::clone(theme);
            }
        }

        tracing::trace!(%base, ?service, "resolving theme");
        let theme = Arc::new(compute());
        *slot = Some(((base, service), Arc::clone(&theme)));
        theme
    }

    /// Drop the cached value
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}
