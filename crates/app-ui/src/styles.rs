//! Theme-aware style factories
//!
//! Screens build their style sheets from `(tokens, layout, variants)`.
//! [`ThemedStyles`] binds one factory to one screen and recomputes only when
//! one of those three inputs changes identity, so re-renders under the same
//! theme hand back the same `Arc`.

use crate::error::{Result, ThemeError};
use crate::resolver::ResolvedTheme;
use crate::service::{ButtonVariant, ComponentVariants, LayoutKind};
use crate::theme::Color;
use crate::tokens::TokenSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Memoizing adapter between a resolved theme and a style factory
///
/// The factory is fixed at construction; two adapters never share a cache.
pub struct ThemedStyles<S, F> {
    screen: String,
    factory: F,
    cache: Mutex<Option<Cached<S>>>,
}

/// Inputs of the last computation, held so their identity cannot be reused
struct Cached<S> {
    tokens: Arc<TokenSet>,
    layout: LayoutKind,
    variants: Arc<ComponentVariants>,
    styles: Arc<S>,
}

impl<S> Cached<S> {
    fn matches(&self, theme: &ResolvedTheme) -> bool {
        Arc::ptr_eq(&self.tokens, &theme.tokens)
            && self.layout == theme.layout
            && Arc::ptr_eq(&self.variants, &theme.component_variants)
    }
}

impl<S, F> std::fmt::Debug for ThemedStyles<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemedStyles")
            .field("screen", &self.screen)
            .field("cached", &self.cache.lock().is_some())
            .finish()
    }
}

impl<S, F> ThemedStyles<S, F> {
    /// Bind `factory` to `screen`
    pub fn new(screen: impl Into<String>, factory: F) -> Self {
        Self {
            screen: screen.into(),
            factory,
            cache: Mutex::new(None),
        }
    }

    /// Screen name used in logs and errors
    pub fn screen(&self) -> &str {
        &self.screen
    }

    /// Drop the cached styles
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    /// Styles for `theme`, running the factory only when its inputs changed
    ///
    /// A factory error is returned as [`ThemeError::StyleFactory`] and leaves
    /// the previous cache entry untouched.
    pub fn styles<E>(&self, theme: &ResolvedTheme) -> Result<Arc<S>>
    where
        F: Fn(&TokenSet, LayoutKind, &ComponentVariants) -> std::result::Result<S, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut cache = self.cache.lock();
        if let Some(cached) = cache.as_ref().filter(|cached| cached.matches(theme)) {
            return Ok(Arc::clone(&cached.styles));
        }

        tracing::debug!(screen = %self.screen, theme = %theme.label(), "computing styles");
        let styles = (self.factory)(&theme.tokens, theme.layout, &theme.component_variants)
            .map_err(|source| {
                let err = ThemeError::StyleFactory {
                    screen: self.screen.clone(),
                    theme: theme.label(),
                    source: source.into(),
                };
                tracing::error!(error = %err, "style factory failed");
                err
            })?;

        let styles = Arc::new(styles);
        *cache = Some(Cached {
            tokens: Arc::clone(&theme.tokens),
            layout: theme.layout,
            variants: Arc::clone(&theme.component_variants),
            styles: Arc::clone(&styles),
        });
        Ok(styles)
    }
}

// =============================================================================
// Button Styles
// =============================================================================

/// Computed primary button styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyles {
    /// Background color
    pub background: Color,
    /// Label color
    pub text_color: Color,
    /// Border color
    pub border_color: Option<Color>,
    /// Border width
    pub border_width: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Corner radius
    pub border_radius: f32,
    /// Label size
    pub font_size: f32,
    /// Label weight
    pub font_weight: u16,
    /// Whether the background is drawn from the button gradient
    pub gradient: bool,
}

/// Primary button styles for a token set
///
/// Usable directly as a [`ThemedStyles`] factory.
pub fn button_styles(
    tokens: &TokenSet,
    layout: LayoutKind,
    variants: &ComponentVariants,
) -> std::result::Result<ButtonStyles, std::convert::Infallible> {
    let colors = &tokens.colors;
    let (background, text_color, border_color) = match variants.button {
        ButtonVariant::Filled | ButtonVariant::Pill | ButtonVariant::Gradient => {
            (colors.primary.clone(), colors.on_primary.clone(), None)
        }
        ButtonVariant::Outlined => (
            "transparent".to_string(),
            colors.primary.clone(),
            Some(colors.primary.clone()),
        ),
        ButtonVariant::Flat => ("transparent".to_string(), colors.primary.clone(), None),
    };

    let border_radius = if variants.button == ButtonVariant::Pill {
        tokens.border_radius.full
    } else {
        tokens.border_radius.button
    };

    // Clinical screens are form-heavy.
    let (padding_vertical, font_size) = match layout {
        LayoutKind::Clinical => (
            tokens.spacing.button_padding.vertical * 0.75,
            tokens.typography.sizes.body,
        ),
        _ => (
            tokens.spacing.button_padding.vertical,
            tokens.typography.sizes.subtitle,
        ),
    };

    Ok(ButtonStyles {
        background,
        text_color,
        border_width: if border_color.is_some() { 1.0 } else { 0.0 },
        border_color,
        padding_horizontal: tokens.spacing.button_padding.horizontal,
        padding_vertical,
        border_radius,
        font_size,
        font_weight: tokens.typography.weights.semibold,
        gradient: variants.button == ButtonVariant::Gradient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, resolve_service};
    use crate::service::ServiceCatalog;
    use crate::theme::{dark_theme, professional_theme};
    use app_state::ServiceId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Styled = std::result::Result<String, std::fmt::Error>;

    fn counting_factory(
        calls: &AtomicUsize,
    ) -> impl Fn(&TokenSet, LayoutKind, &ComponentVariants) -> Styled + '_ {
        move |tokens: &TokenSet, layout: LayoutKind, _: &ComponentVariants| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}:{:?}", tokens.colors.primary, layout))
        }
    }

    // ==========================================================================
    // Memoization Tests
    // ==========================================================================

    #[test]
    fn test_same_theme_returns_same_styles() {
        let calls = AtomicUsize::new(0);
        let styles = ThemedStyles::new("course_list", counting_factory(&calls));
        let theme = resolve_service(
            &professional_theme(),
            &ServiceCatalog::builtin(),
            Some(ServiceId::Education),
        );

        let first = styles.styles(&theme).unwrap();
        let second = styles.styles(&theme).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*first, "#6A1B9A:Academic");
    }

    #[test]
    fn test_equal_but_distinct_tokens_recompute() {
        let calls = AtomicUsize::new(0);
        let styles = ThemedStyles::new("slots", counting_factory(&calls));
        let catalog = ServiceCatalog::builtin();
        let base = professional_theme();

        let a = resolve_service(&base, &catalog, Some(ServiceId::Booking));
        let b = resolve_service(&base, &catalog, Some(ServiceId::Booking));
        assert_eq!(a, b);

        let first = styles.styles(&a).unwrap();
        let second = styles.styles(&b).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_change_recomputes() {
        let calls = AtomicUsize::new(0);
        let styles = ThemedStyles::new("home", counting_factory(&calls));
        let mut theme = resolve(&professional_theme(), None);

        styles.styles(&theme).unwrap();
        theme.layout = LayoutKind::Clinical;
        let recomputed = styles.styles(&theme).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(recomputed.ends_with("Clinical"));

        styles.invalidate();
        styles.styles(&theme).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_factory_error_is_wrapped() {
        let styles = ThemedStyles::new(
            "events",
            |_: &TokenSet, _: LayoutKind, _: &ComponentVariants| {
                Err::<(), _>("poster ratio out of range")
            },
        );
        let theme = resolve_service(
            &dark_theme(),
            &ServiceCatalog::builtin(),
            Some(ServiceId::Entertainment),
        );

        let err = styles.styles(&theme).unwrap_err();
        match &err {
            ThemeError::StyleFactory { screen, theme, .. } => {
                assert_eq!(screen, "events");
                assert_eq!(theme, "entertainment/dark");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    // ==========================================================================
    // Button Style Tests
    // ==========================================================================

    #[test]
    fn test_button_styles_follow_variants() {
        let base = professional_theme();
        let tokens = &base.tokens;

        let filled =
            button_styles(tokens, LayoutKind::CardBased, &ComponentVariants::default()).unwrap();
        assert_eq!(filled.background, tokens.colors.primary);
        assert_eq!(filled.border_width, 0.0);
        assert_eq!(filled.border_radius, tokens.border_radius.button);

        let variants = ComponentVariants {
            button: ButtonVariant::Outlined,
            ..ComponentVariants::default()
        };
        let outlined = button_styles(tokens, LayoutKind::CardBased, &variants).unwrap();
        assert_eq!(outlined.background, "transparent");
        assert_eq!(outlined.border_color.as_deref(), Some(tokens.colors.primary.as_str()));
        assert_eq!(outlined.border_width, 1.0);

        let variants = ComponentVariants {
            button: ButtonVariant::Pill,
            ..ComponentVariants::default()
        };
        let pill = button_styles(tokens, LayoutKind::Clinical, &variants).unwrap();
        assert_eq!(pill.border_radius, tokens.border_radius.full);
        assert_eq!(pill.font_size, tokens.typography.sizes.body);
        assert!(pill.padding_vertical < filled.padding_vertical);
    }

    #[test]
    fn test_button_styles_through_adapter() {
        let styles = ThemedStyles::new("checkout", button_styles);
        let theme = resolve_service(
            &professional_theme(),
            &ServiceCatalog::builtin(),
            Some(ServiceId::Education),
        );

        let computed = styles.styles(&theme).unwrap();
        assert_eq!(computed.background, "#6A1B9A");
        assert_eq!(
            computed.gradient,
            theme.component_variants.button == ButtonVariant::Gradient
        );
    }
}
