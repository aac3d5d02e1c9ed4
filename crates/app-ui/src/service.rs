//! Service override catalog
//!
//! Each service overrides only the token fields that differ from the base
//! theme, and adds layout, component-variant and gradient metadata. The
//! built-in catalog covers the five known services. Extra entries can be
//! merged from JSON at startup.
//!
//! Gradients fall back in three tiers: the service's own gradient for a slot,
//! then the fixed per-service defaults from [`family_default_gradients`], then
//! the base theme's gradient.

use crate::error::{Result, ThemeError};
use crate::theme::{GradientDefinition, GradientDirection, GradientSlot};
use crate::tokens::*;
use app_state::ServiceId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// Layout & Variants
// =============================================================================

/// Screen layout family a service uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Cards in a scrolling feed
    #[default]
    CardBased,
    /// Dense, form-heavy clinical screens
    Clinical,
    /// Course outlines and lesson lists
    Academic,
    /// Full-bleed media and posters
    Entertainment,
}

/// Button style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Solid fill
    #[default]
    Filled,
    /// Outline only
    Outlined,
    /// Fully rounded ends
    Pill,
    /// Gradient fill
    Gradient,
    /// Text only
    Flat,
}

/// Text input style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    /// Outlined box
    #[default]
    Outlined,
    /// Filled box
    Filled,
    /// Bottom border only
    Underlined,
}

/// Card style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    /// Raised with a shadow
    #[default]
    Elevated,
    /// Bordered, no shadow
    Outlined,
    /// No border or shadow
    Flat,
}

/// Variant choices for the shared components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ComponentVariants {
    /// Button style
    pub button: ButtonVariant,
    /// Input style
    pub input: InputVariant,
    /// Card style
    pub card: CardVariant,
}

// =============================================================================
// Service Override
// =============================================================================

/// Partial token set plus metadata for one service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ServiceOverride {
    /// Color overrides
    pub colors: ColorPatch,
    /// Typography overrides
    pub typography: TypographyPatch,
    /// Spacing overrides
    pub spacing: SpacingPatch,
    /// Border radius overrides
    pub border_radius: BorderRadiusPatch,
    /// Shadow overrides
    pub shadows: ShadowPatch,
    /// Layout family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
    /// Component variants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_variants: Option<ComponentVariants>,
    /// Gradients for the slots this service styles itself
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub gradients: BTreeMap<GradientSlot, GradientDefinition>,
}

impl ServiceOverride {
    /// Check every gradient and token value in the override
    ///
    /// The patches are overlaid onto a complete base, so any replacement that
    /// would leave a category unusable is reported by its token path.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (slot, gradient) in &self.gradients {
            gradient
                .validate()
                .map_err(|e| format!("gradient {}: {}", slot, e))?;
        }

        let base = crate::theme::professional_theme();
        let merged = TokenSet {
            colors: self.colors.apply(&base.tokens.colors),
            typography: self.typography.apply(&base.tokens.typography),
            spacing: self.spacing.apply(&base.tokens.spacing),
            border_radius: self.border_radius.apply(&base.tokens.border_radius),
            shadows: self.shadows.apply(&base.tokens.shadows),
        };

        let bad = merged.missing_fields();
        if !bad.is_empty() {
            return Err(format!("invalid tokens: {}", bad.join(", ")));
        }
        Ok(())
    }
}

// =============================================================================
// Family Default Gradients
// =============================================================================

/// Fixed fallback gradients for a service family
///
/// The table is partial: a slot missing here falls through to the base
/// theme's gradient. The main app and unknown services have no defaults.
pub fn family_default_gradients(service: ServiceId) -> BTreeMap<GradientSlot, GradientDefinition> {
    let mut table = BTreeMap::new();
    match service {
        ServiceId::Education => {
            table.insert(
                GradientSlot::Header,
                GradientDefinition::new(&["#4A148C", "#7B1FA2"], GradientDirection::HORIZONTAL),
            );
            table.insert(
                GradientSlot::Accent,
                GradientDefinition::new(&["#FFB300", "#FF8F00"], GradientDirection::DIAGONAL),
            );
        }
        ServiceId::Booking => {
            table.insert(
                GradientSlot::Header,
                GradientDefinition::new(&["#00695C", "#26A69A"], GradientDirection::HORIZONTAL),
            );
            table.insert(
                GradientSlot::Card,
                GradientDefinition::new(&["#E0F2F1", "#FFFFFF"], GradientDirection::VERTICAL),
            );
        }
        ServiceId::Healthcare => {
            table.insert(
                GradientSlot::Header,
                GradientDefinition::new(&["#0277BD", "#4FC3F7"], GradientDirection::HORIZONTAL),
            );
            table.insert(
                GradientSlot::Background,
                GradientDefinition::new(&["#F1F8FE", "#FFFFFF"], GradientDirection::VERTICAL),
            );
        }
        ServiceId::Entertainment => {
            table.insert(
                GradientSlot::Header,
                GradientDefinition::new(&["#880E4F", "#D81B60"], GradientDirection::HORIZONTAL),
            );
            table.insert(
                GradientSlot::Button,
                GradientDefinition::new(&["#FF4081", "#F50057"], GradientDirection::HORIZONTAL),
            );
            table.insert(
                GradientSlot::Surface,
                GradientDefinition::new(&["#1A0A12", "#2D1420"], GradientDirection::VERTICAL),
            );
        }
        ServiceId::Main | ServiceId::Unknown => {}
    }
    table
}

// =============================================================================
// Built-in Overrides
// =============================================================================

fn color(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Main app shell: base tokens, card layout
pub fn main_override() -> ServiceOverride {
    ServiceOverride {
        layout: Some(LayoutKind::CardBased),
        ..ServiceOverride::default()
    }
}

/// Education: academic purple
pub fn education_override() -> ServiceOverride {
    let mut gradients = BTreeMap::new();
    gradients.insert(
        GradientSlot::Button,
        GradientDefinition::new(&["#8E24AA", "#6A1B9A"], GradientDirection::HORIZONTAL),
    );
    gradients.insert(
        GradientSlot::Card,
        GradientDefinition::new(&["#F3E5F5", "#FFFFFF"], GradientDirection::VERTICAL),
    );

    ServiceOverride {
        colors: ColorPatch {
            primary: color("#6A1B9A"),
            primary_container: color("#F3E5F5"),
            secondary: color("#FFB300"),
            on_secondary: color("#1B1F24"),
            info: color("#7B1FA2"),
            ..ColorPatch::default()
        },
        typography: TypographyPatch {
            line_heights: Some(LineHeights {
                tight: 1.25,
                normal: 1.6,
                relaxed: 1.85,
            }),
            ..TypographyPatch::default()
        },
        border_radius: BorderRadiusPatch {
            card: Some(8.0),
            ..BorderRadiusPatch::default()
        },
        layout: Some(LayoutKind::Academic),
        component_variants: Some(ComponentVariants {
            button: ButtonVariant::Filled,
            input: InputVariant::Outlined,
            card: CardVariant::Outlined,
        }),
        gradients,
        ..ServiceOverride::default()
    }
}

/// Booking: teal cards with pill buttons
pub fn booking_override() -> ServiceOverride {
    ServiceOverride {
        colors: ColorPatch {
            primary: color("#00897B"),
            primary_container: color("#E0F2F1"),
            secondary: color("#FF7043"),
            ..ColorPatch::default()
        },
        spacing: SpacingPatch {
            card_padding: Some(Padding::new(20.0, 18.0)),
            ..SpacingPatch::default()
        },
        border_radius: BorderRadiusPatch {
            button: Some(24.0),
            card: Some(16.0),
            ..BorderRadiusPatch::default()
        },
        layout: Some(LayoutKind::CardBased),
        component_variants: Some(ComponentVariants {
            button: ButtonVariant::Pill,
            input: InputVariant::Filled,
            card: CardVariant::Elevated,
        }),
        ..ServiceOverride::default()
    }
}

/// Healthcare: calm clinical blue
pub fn healthcare_override() -> ServiceOverride {
    let mut gradients = BTreeMap::new();
    gradients.insert(
        GradientSlot::Button,
        GradientDefinition::new(&["#0288D1", "#0277BD"], GradientDirection::HORIZONTAL),
    );

    ServiceOverride {
        colors: ColorPatch {
            primary: color("#0277BD"),
            primary_container: color("#E1F5FE"),
            secondary: color("#00ACC1"),
            background: color("#F7FBFE"),
            success: color("#2E7D32"),
            ..ColorPatch::default()
        },
        spacing: SpacingPatch {
            input_padding: Some(Padding::new(16.0, 14.0)),
            ..SpacingPatch::default()
        },
        border_radius: BorderRadiusPatch {
            button: Some(6.0),
            input: Some(6.0),
            card: Some(8.0),
            ..BorderRadiusPatch::default()
        },
        shadows: ShadowPatch {
            md: Some(ShadowPreset::new("#01579B", 1.0, 0.08, 4.0, 2.0)),
            ..ShadowPatch::default()
        },
        layout: Some(LayoutKind::Clinical),
        component_variants: Some(ComponentVariants {
            button: ButtonVariant::Filled,
            input: InputVariant::Outlined,
            card: CardVariant::Outlined,
        }),
        gradients,
        ..ServiceOverride::default()
    }
}

/// Entertainment: dark stage with magenta accents
pub fn entertainment_override() -> ServiceOverride {
    let mut gradients = BTreeMap::new();
    gradients.insert(
        GradientSlot::Background,
        GradientDefinition::new(&["#12060C", "#000000"], GradientDirection::VERTICAL),
    );
    gradients.insert(
        GradientSlot::Card,
        GradientDefinition::new(
            &["rgba(216, 27, 96, 0.35)", "rgba(0, 0, 0, 0.9)"],
            GradientDirection::VERTICAL,
        ),
    );

    ServiceOverride {
        colors: ColorPatch {
            primary: color("#D81B60"),
            on_primary: color("#FFFFFF"),
            primary_container: color("#3D0A1F"),
            secondary: color("#7C4DFF"),
            background: color("#0E0A0C"),
            on_background: color("#F5EEF1"),
            surface: color("#1C1418"),
            on_surface: color("#F5EEF1"),
            text_primary: color("#F5EEF1"),
            text_secondary: color("#B9A9B1"),
            ..ColorPatch::default()
        },
        typography: TypographyPatch {
            sizes: Some(FontSizes {
                display: 40.0,
                headline: 30.0,
                title: 22.0,
                subtitle: 18.0,
                body: 16.0,
                caption: 12.0,
            }),
            ..TypographyPatch::default()
        },
        border_radius: BorderRadiusPatch {
            card: Some(20.0),
            ..BorderRadiusPatch::default()
        },
        layout: Some(LayoutKind::Entertainment),
        component_variants: Some(ComponentVariants {
            button: ButtonVariant::Gradient,
            input: InputVariant::Filled,
            card: CardVariant::Flat,
        }),
        gradients,
        ..ServiceOverride::default()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Overrides for every known service
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    overrides: HashMap<ServiceId, Arc<ServiceOverride>>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ServiceCatalog {
    /// Catalog with no overrides; every service resolves to the base theme
    pub fn empty() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// The built-in overrides for all five services
    pub fn builtin() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(ServiceId::Main, Arc::new(main_override()));
        overrides.insert(ServiceId::Education, Arc::new(education_override()));
        overrides.insert(ServiceId::Booking, Arc::new(booking_override()));
        overrides.insert(ServiceId::Healthcare, Arc::new(healthcare_override()));
        overrides.insert(ServiceId::Entertainment, Arc::new(entertainment_override()));
        Self { overrides }
    }

    /// Override for a service
    ///
    /// Returns `None` for unknown services and services without an entry.
    pub fn get(&self, service: ServiceId) -> Option<Arc<ServiceOverride>> {
        let found = self.overrides.get(&service).cloned();
        if found.is_none() {
            tracing::warn!(%service, "no theme override registered, using base theme");
        }
        found
    }

    /// Register or replace the override for a service
    pub fn insert(&mut self, service: ServiceId, entry: ServiceOverride) -> Result<()> {
        if !service.is_known() {
            return Err(ThemeError::InvalidCatalog(
                "override registered for an unknown service".to_string(),
            ));
        }
        entry
            .validate()
            .map_err(|e| ThemeError::InvalidCatalog(format!("{}: {}", service, e)))?;
        self.overrides.insert(service, Arc::new(entry));
        Ok(())
    }

    /// Merge overrides from a JSON object keyed by service name
    ///
    /// Entries replace the existing override for their service. The whole
    /// document is validated before anything is applied.
    ///
    /// ```rust
    /// use app_ui::service::ServiceCatalog;
    /// use app_ui::ServiceId;
    ///
    /// let mut catalog = ServiceCatalog::builtin();
    /// catalog
    ///     .merge_json(
    ///         r##"{"booking": {"colors": {"primary": "#1565C0"}, "layout": "clinical"}}"##,
    ///     )
    ///     .unwrap();
    /// let booking = catalog.get(ServiceId::Booking).unwrap();
    /// assert_eq!(booking.colors.primary.as_deref(), Some("#1565C0"));
    /// ```
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let raw: BTreeMap<String, ServiceOverride> = serde_json::from_str(json)?;

        let mut parsed = Vec::with_capacity(raw.len());
        for (key, entry) in raw {
            let service = ServiceId::parse_quiet(&key);
            if !service.is_known() {
                return Err(ThemeError::InvalidCatalog(format!(
                    "unknown service {:?}",
                    key
                )));
            }
            entry
                .validate()
                .map_err(|e| ThemeError::InvalidCatalog(format!("{}: {}", service, e)))?;
            parsed.push((service, entry));
        }

        let count = parsed.len();
        for (service, entry) in parsed {
            tracing::debug!(%service, "theme override loaded");
            self.overrides.insert(service, Arc::new(entry));
        }
        Ok(count)
    }

    /// Merge overrides from a JSON file
    pub fn load_overrides(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let json = std::fs::read_to_string(path.as_ref())?;
        self.merge_json(&json)
    }

    /// Number of registered overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no overrides are registered
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_known_services() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        for service in ServiceId::known() {
            let entry = catalog.get(service).unwrap();
            assert!(entry.validate().is_ok(), "{} override invalid", service);
            assert!(entry.layout.is_some());
        }
        assert!(catalog.get(ServiceId::Unknown).is_none());
    }

    #[test]
    fn test_education_primary() {
        let education = education_override();
        assert_eq!(education.colors.primary.as_deref(), Some("#6A1B9A"));
        assert!(education.colors.success.is_none());
        assert_eq!(education.layout, Some(LayoutKind::Academic));
    }

    #[test]
    fn test_family_defaults_are_partial() {
        for service in ServiceId::known() {
            let defaults = family_default_gradients(service);
            assert!(defaults.len() < GradientSlot::all().len());
            for gradient in defaults.values() {
                assert!(gradient.validate().is_ok());
            }
        }
        assert!(family_default_gradients(ServiceId::Main).is_empty());
        assert!(family_default_gradients(ServiceId::Unknown).is_empty());
    }

    #[test]
    fn test_override_json_shape() {
        let entry: ServiceOverride = serde_json::from_str(
            r##"{
                "colors": {"primary": "#123456"},
                "spacing": {"buttonPadding": {"horizontal": 20, "vertical": 8}},
                "layout": "card-based",
                "componentVariants": {"button": "pill", "input": "underlined", "card": "flat"},
                "gradients": {
                    "header": {"colors": ["#000000", "#111111"], "direction": {"x": 1, "y": 0}}
                }
            }"##,
        )
        .unwrap();

        assert_eq!(entry.colors.primary.as_deref(), Some("#123456"));
        assert_eq!(entry.spacing.button_padding, Some(Padding::new(20.0, 8.0)));
        assert_eq!(entry.layout, Some(LayoutKind::CardBased));
        assert_eq!(entry.component_variants.unwrap().input, InputVariant::Underlined);
        assert!(entry.gradients.contains_key(&GradientSlot::Header));
    }

    #[test]
    fn test_merge_json_replaces_entry() {
        let mut catalog = ServiceCatalog::builtin();
        let count = catalog
            .merge_json(r##"{"healthcare": {"colors": {"primary": "#00838F"}}}"##)
            .unwrap();

        assert_eq!(count, 1);
        let healthcare = catalog.get(ServiceId::Healthcare).unwrap();
        assert_eq!(healthcare.colors.primary.as_deref(), Some("#00838F"));
        assert_eq!(healthcare.layout, None);
    }

    #[test]
    fn test_merge_json_rejects_bad_entries_atomically() {
        let mut catalog = ServiceCatalog::builtin();
        let before = catalog.get(ServiceId::Booking).unwrap();

        let err = catalog
            .merge_json(
                r##"{
                    "booking": {"colors": {"primary": "#000000"}},
                    "education": {"gradients": {
                        "card": {"colors": ["#FFFFFF"], "direction": {"x": 0, "y": 1}}
                    }}
                }"##,
            )
            .unwrap_err();
        assert!(matches!(err, ThemeError::InvalidCatalog(_)));
        assert_eq!(catalog.get(ServiceId::Booking).unwrap(), before);

        let err = catalog.merge_json(r##"{"pets": {}}"##).unwrap_err();
        assert!(err.to_string().contains("unknown service"));

        let err = catalog
            .merge_json(r##"{"main": {"colors": {"surface": "not-a-color"}}}"##)
            .unwrap_err();
        assert!(err.to_string().contains("colors.surface"));

        let err = catalog.merge_json("{not json").unwrap_err();
        assert!(matches!(err, ThemeError::Serialization(_)));
    }

    #[test]
    fn test_merge_json_rejects_unusable_tokens_in_every_category() {
        let cases = [
            (r##"{"typography": {"fontFamily": ""}}"##, "typography.font_family"),
            (r##"{"spacing": {"md": -4}}"##, "spacing.md"),
            (r##"{"borderRadius": {"card": -1}}"##, "border_radius.card"),
            (
                r##"{"shadows": {"md": {"shadowColor": "",
                    "shadowOffset": {"width": 0, "height": 2},
                    "shadowOpacity": 0.2, "shadowRadius": 4, "elevation": 2}}}"##,
                "shadows.md",
            ),
            (
                r##"{"shadows": {"lg": {"shadowColor": "#000000",
                    "shadowOffset": {"width": 0, "height": 4},
                    "shadowOpacity": 3.0, "shadowRadius": 8, "elevation": 6}}}"##,
                "shadows.lg",
            ),
            (r##"{"colors": {"error": ""}}"##, "colors.error"),
        ];

        for (entry, path) in cases {
            let mut catalog = ServiceCatalog::builtin();
            let before = catalog.get(ServiceId::Booking).unwrap();

            let err = catalog
                .merge_json(&format!(r#"{{"booking": {}}}"#, entry))
                .unwrap_err();
            assert!(matches!(err, ThemeError::InvalidCatalog(_)), "{}", path);
            assert!(err.to_string().contains(path), "{}: {}", path, err);
            assert_eq!(catalog.get(ServiceId::Booking).unwrap(), before);
        }
    }

    #[test]
    fn test_merge_json_rejects_misspelled_top_level_key() {
        let mut catalog = ServiceCatalog::builtin();
        for entry in [
            r##"{"booking": {"colours": {"primary": "#000000"}}}"##,
            r##"{"booking": {"borderradius": {"card": 4}}}"##,
        ] {
            let err = catalog.merge_json(entry).unwrap_err();
            assert!(matches!(err, ThemeError::Serialization(_)), "{}", entry);
        }
        assert_eq!(
            catalog.get(ServiceId::Booking).unwrap().layout,
            Some(LayoutKind::CardBased)
        );
    }

    #[test]
    fn test_insert_rejects_unknown_service() {
        let mut catalog = ServiceCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.insert(ServiceId::Unknown, ServiceOverride::default()).is_err());
        assert!(catalog.insert(ServiceId::Main, ServiceOverride::default()).is_ok());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r##"{"entertainment": {"layout": "academic"}}"##).unwrap();

        let mut catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.load_overrides(&path).unwrap(), 1);
        assert_eq!(
            catalog.get(ServiceId::Entertainment).unwrap().layout,
            Some(LayoutKind::Academic)
        );

        let missing = catalog.load_overrides(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ThemeError::Io(_))));
    }
}
