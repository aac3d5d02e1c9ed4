//! Design tokens
//!
//! A [`TokenSet`] is the complete record of design values that screen styles
//! are derived from. It has five fixed categories: colors, typography,
//! spacing, border radii and shadows.
//!
//! Every category has a `*Patch` twin holding one `Option` per top-level
//! field. Applying a patch replaces exactly the fields it sets and keeps the
//! rest. Composite fields such as [`SpacingTokens::button_padding`] are
//! replaced whole; a patch cannot change only their `vertical` part.

use crate::theme::{is_valid_color, Color};
use serde::{Deserialize, Serialize};

/// Generates a partial twin of a token category.
macro_rules! token_patch {
    (
        $(#[$meta:meta])*
        $patch:ident => $target:ident { $($field:ident: $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default, deny_unknown_fields)]
        pub struct $patch {
            $(
                #[doc = concat!("Replacement for `", stringify!($field), "`")]
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $patch {
            /// Overlay the fields set in this patch onto `base`
            pub fn apply(&self, base: &$target) -> $target {
                $target {
                    $($field: match &self.$field {
                        Some(value) => value.clone(),
                        None => base.$field.clone(),
                    },)*
                }
            }

            /// Whether the patch leaves every field untouched
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            /// Names of the fields this patch replaces
            pub fn fields(&self) -> Vec<&'static str> {
                let mut fields = Vec::new();
                $(
                    if self.$field.is_some() {
                        fields.push(stringify!($field));
                    }
                )*
                fields
            }
        }
    };
}

// =============================================================================
// Colors
// =============================================================================

/// Semantic colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTokens {
    /// Brand color for primary actions
    pub primary: Color,
    /// Content drawn on `primary`
    pub on_primary: Color,
    /// Tinted container behind primary content
    pub primary_container: Color,
    /// Secondary accent
    pub secondary: Color,
    /// Content drawn on `secondary`
    pub on_secondary: Color,
    /// Screen background
    pub background: Color,
    /// Content drawn on `background`
    pub on_background: Color,
    /// Cards, sheets and other raised surfaces
    pub surface: Color,
    /// Content drawn on `surface`
    pub on_surface: Color,
    /// Alternate surface for grouped content
    pub surface_variant: Color,
    /// Primary text
    pub text_primary: Color,
    /// Muted text
    pub text_secondary: Color,
    /// Positive state
    pub success: Color,
    /// Cautionary state
    pub warning: Color,
    /// Error state
    pub error: Color,
    /// Informational state
    pub info: Color,
    /// Default border
    pub border: Color,
    /// Hairline separators
    pub divider: Color,
    /// Text input fill
    pub input_background: Color,
    /// Text input outline
    pub input_border: Color,
    /// Text input content
    pub input_text: Color,
    /// Text input placeholder
    pub input_placeholder: Color,
    /// Disabled controls
    pub disabled: Color,
    /// Modal scrim
    pub overlay: Color,
}

impl ColorTokens {
    /// All colors with their field names
    pub fn entries(&self) -> [(&'static str, &Color); 24] {
        [
            ("primary", &self.primary),
            ("on_primary", &self.on_primary),
            ("primary_container", &self.primary_container),
            ("secondary", &self.secondary),
            ("on_secondary", &self.on_secondary),
            ("background", &self.background),
            ("on_background", &self.on_background),
            ("surface", &self.surface),
            ("on_surface", &self.on_surface),
            ("surface_variant", &self.surface_variant),
            ("text_primary", &self.text_primary),
            ("text_secondary", &self.text_secondary),
            ("success", &self.success),
            ("warning", &self.warning),
            ("error", &self.error),
            ("info", &self.info),
            ("border", &self.border),
            ("divider", &self.divider),
            ("input_background", &self.input_background),
            ("input_border", &self.input_border),
            ("input_text", &self.input_text),
            ("input_placeholder", &self.input_placeholder),
            ("disabled", &self.disabled),
            ("overlay", &self.overlay),
        ]
    }
}

token_patch! {
    /// Partial [`ColorTokens`]
    ColorPatch => ColorTokens {
        primary: Color,
        on_primary: Color,
        primary_container: Color,
        secondary: Color,
        on_secondary: Color,
        background: Color,
        on_background: Color,
        surface: Color,
        on_surface: Color,
        surface_variant: Color,
        text_primary: Color,
        text_secondary: Color,
        success: Color,
        warning: Color,
        error: Color,
        info: Color,
        border: Color,
        divider: Color,
        input_background: Color,
        input_border: Color,
        input_text: Color,
        input_placeholder: Color,
        disabled: Color,
        overlay: Color,
    }
}

// =============================================================================
// Typography
// =============================================================================

/// Font sizes in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    /// Hero numbers and splash titles
    pub display: f32,
    /// Screen headlines
    pub headline: f32,
    /// Section titles
    pub title: f32,
    /// Secondary titles
    pub subtitle: f32,
    /// Body copy
    pub body: f32,
    /// Captions and footnotes
    pub caption: f32,
}

/// Named font weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontWeights {
    /// Normal (400)
    pub regular: u16,
    /// Medium (500)
    pub medium: u16,
    /// Semi-bold (600)
    pub semibold: u16,
    /// Bold (700)
    pub bold: u16,
}

/// Line-height multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineHeights {
    /// Headings
    pub tight: f32,
    /// Body copy
    pub normal: f32,
    /// Long-form reading
    pub relaxed: f32,
}

/// Typography scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    /// Font family name
    pub font_family: String,
    /// Size scale
    pub sizes: FontSizes,
    /// Weight names
    pub weights: FontWeights,
    /// Line-height multipliers
    pub line_heights: LineHeights,
}

impl TypographyTokens {
    /// Line height in points for a size and multiplier
    pub fn line_height(size: f32, multiplier: f32) -> f32 {
        (size * multiplier).round()
    }
}

token_patch! {
    /// Partial [`TypographyTokens`]
    TypographyPatch => TypographyTokens {
        font_family: String,
        sizes: FontSizes,
        weights: FontWeights,
        line_heights: LineHeights,
    }
}

// =============================================================================
// Spacing
// =============================================================================

/// Horizontal and vertical padding pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Left and right padding
    pub horizontal: f32,
    /// Top and bottom padding
    pub vertical: f32,
}

impl Padding {
    /// Create a padding pair
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Spacing scale on a 4pt grid, plus component paddings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingTokens {
    /// 2pt
    pub xxs: f32,
    /// 4pt
    pub xs: f32,
    /// 8pt
    pub sm: f32,
    /// 16pt
    pub md: f32,
    /// 24pt
    pub lg: f32,
    /// 32pt
    pub xl: f32,
    /// 48pt
    pub xxl: f32,
    /// Button content padding
    pub button_padding: Padding,
    /// Text input content padding
    pub input_padding: Padding,
    /// Card content padding
    pub card_padding: Padding,
}

impl SpacingTokens {
    /// Get a scale value by name
    pub fn get(&self, name: &str) -> Option<f32> {
        match name {
            "xxs" => Some(self.xxs),
            "xs" => Some(self.xs),
            "sm" => Some(self.sm),
            "md" => Some(self.md),
            "lg" => Some(self.lg),
            "xl" => Some(self.xl),
            "xxl" => Some(self.xxl),
            _ => None,
        }
    }

    fn scale(&self) -> [(&'static str, f32); 7] {
        [
            ("xxs", self.xxs),
            ("xs", self.xs),
            ("sm", self.sm),
            ("md", self.md),
            ("lg", self.lg),
            ("xl", self.xl),
            ("xxl", self.xxl),
        ]
    }
}

token_patch! {
    /// Partial [`SpacingTokens`]
    SpacingPatch => SpacingTokens {
        xxs: f32,
        xs: f32,
        sm: f32,
        md: f32,
        lg: f32,
        xl: f32,
        xxl: f32,
        button_padding: Padding,
        input_padding: Padding,
        card_padding: Padding,
    }
}

// =============================================================================
// Border Radius
// =============================================================================

/// Border radius scale plus component radii
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadiusTokens {
    /// Square corners
    pub none: f32,
    /// Small radius
    pub sm: f32,
    /// Medium radius
    pub md: f32,
    /// Large radius
    pub lg: f32,
    /// Extra large radius
    pub xl: f32,
    /// Fully rounded
    pub full: f32,
    /// Buttons
    pub button: f32,
    /// Text inputs
    pub input: f32,
    /// Cards
    pub card: f32,
    /// Chips and tags
    pub chip: f32,
}

token_patch! {
    /// Partial [`BorderRadiusTokens`]
    BorderRadiusPatch => BorderRadiusTokens {
        none: f32,
        sm: f32,
        md: f32,
        lg: f32,
        xl: f32,
        full: f32,
        button: f32,
        input: f32,
        card: f32,
        chip: f32,
    }
}

// =============================================================================
// Shadows
// =============================================================================

/// Shadow offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowOffset {
    /// Horizontal offset
    pub width: f32,
    /// Vertical offset
    pub height: f32,
}

/// Platform shadow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowPreset {
    /// Shadow color
    pub shadow_color: Color,
    /// Offset of the shadow
    pub shadow_offset: ShadowOffset,
    /// Opacity from 0.0 to 1.0
    pub shadow_opacity: f32,
    /// Blur radius
    pub shadow_radius: f32,
    /// Android elevation
    pub elevation: f32,
}

impl ShadowPreset {
    /// Create a new shadow preset
    pub fn new(color: &str, height: f32, opacity: f32, radius: f32, elevation: f32) -> Self {
        Self {
            shadow_color: color.to_string(),
            shadow_offset: ShadowOffset { width: 0.0, height },
            shadow_opacity: opacity,
            shadow_radius: radius,
            elevation,
        }
    }

    /// A shadow that draws nothing
    pub fn flat() -> Self {
        Self::new("transparent", 0.0, 0.0, 0.0, 0.0)
    }
}

/// Named shadow presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowTokens {
    /// No shadow
    pub none: ShadowPreset,
    /// Subtle lift
    pub sm: ShadowPreset,
    /// Cards
    pub md: ShadowPreset,
    /// Sheets and dialogs
    pub lg: ShadowPreset,
}

impl ShadowTokens {
    /// Standard presets in the given shadow color
    pub fn standard(color: &str) -> Self {
        Self {
            none: ShadowPreset::flat(),
            sm: ShadowPreset::new(color, 1.0, 0.08, 2.0, 1.0),
            md: ShadowPreset::new(color, 2.0, 0.12, 6.0, 3.0),
            lg: ShadowPreset::new(color, 6.0, 0.16, 12.0, 8.0),
        }
    }

    fn entries(&self) -> [(&'static str, &ShadowPreset); 4] {
        [
            ("none", &self.none),
            ("sm", &self.sm),
            ("md", &self.md),
            ("lg", &self.lg),
        ]
    }
}

token_patch! {
    /// Partial [`ShadowTokens`]
    ShadowPatch => ShadowTokens {
        none: ShadowPreset,
        sm: ShadowPreset,
        md: ShadowPreset,
        lg: ShadowPreset,
    }
}

// =============================================================================
// Token Set
// =============================================================================

/// Complete set of design tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    /// Semantic colors
    pub colors: ColorTokens,
    /// Typography scale
    pub typography: TypographyTokens,
    /// Spacing scale
    pub spacing: SpacingTokens,
    /// Border radii
    pub border_radius: BorderRadiusTokens,
    /// Shadow presets
    pub shadows: ShadowTokens,
}

impl TokenSet {
    /// Paths of fields that hold unusable values
    ///
    /// An empty result means the set is complete: every color parses and every
    /// size is a finite, non-negative number.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();

        for (name, color) in self.colors.entries() {
            if !is_valid_color(color) {
                missing.push(format!("colors.{}", name));
            }
        }

        let typography = &self.typography;
        if typography.font_family.trim().is_empty() {
            missing.push("typography.font_family".to_string());
        }
        let sizes = &typography.sizes;
        for (name, size) in [
            ("display", sizes.display),
            ("headline", sizes.headline),
            ("title", sizes.title),
            ("subtitle", sizes.subtitle),
            ("body", sizes.body),
            ("caption", sizes.caption),
        ] {
            if !(size.is_finite() && size > 0.0) {
                missing.push(format!("typography.sizes.{}", name));
            }
        }
        let weights = &typography.weights;
        for (name, weight) in [
            ("regular", weights.regular),
            ("medium", weights.medium),
            ("semibold", weights.semibold),
            ("bold", weights.bold),
        ] {
            if !(100..=900).contains(&weight) {
                missing.push(format!("typography.weights.{}", name));
            }
        }

        for (name, value) in self.spacing.scale() {
            if !is_dimension(value) {
                missing.push(format!("spacing.{}", name));
            }
        }
        for (name, padding) in [
            ("button_padding", self.spacing.button_padding),
            ("input_padding", self.spacing.input_padding),
            ("card_padding", self.spacing.card_padding),
        ] {
            if !is_dimension(padding.horizontal) || !is_dimension(padding.vertical) {
                missing.push(format!("spacing.{}", name));
            }
        }

        let radius = &self.border_radius;
        for (name, value) in [
            ("none", radius.none),
            ("sm", radius.sm),
            ("md", radius.md),
            ("lg", radius.lg),
            ("xl", radius.xl),
            ("full", radius.full),
            ("button", radius.button),
            ("input", radius.input),
            ("card", radius.card),
            ("chip", radius.chip),
        ] {
            if !is_dimension(value) {
                missing.push(format!("border_radius.{}", name));
            }
        }

        for (name, shadow) in self.shadows.entries() {
            if !is_valid_color(&shadow.shadow_color)
                || !(0.0..=1.0).contains(&shadow.shadow_opacity)
            {
                missing.push(format!("shadows.{}", name));
            }
        }

        missing
    }
}

fn is_dimension(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::professional_theme;

    #[test]
    fn test_color_patch_replaces_only_set_fields() {
        let base = professional_theme().tokens.colors.clone();
        let patch = ColorPatch {
            primary: Some("#6A1B9A".to_string()),
            ..ColorPatch::default()
        };

        let merged = patch.apply(&base);
        assert_eq!(merged.primary, "#6A1B9A");
        assert_eq!(merged.success, base.success);
        assert_eq!(merged.on_primary, base.on_primary);
        assert_eq!(patch.fields(), vec!["primary"]);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let base = professional_theme().tokens.spacing.clone();
        let patch = SpacingPatch::default();

        assert!(patch.is_empty());
        assert_eq!(patch.apply(&base), base);
    }

    #[test]
    fn test_composite_replaced_whole() {
        let base = professional_theme().tokens.spacing.clone();
        let patch = SpacingPatch {
            button_padding: Some(Padding::new(28.0, 10.0)),
            ..SpacingPatch::default()
        };

        let merged = patch.apply(&base);
        assert_eq!(merged.button_padding, Padding::new(28.0, 10.0));
        assert_eq!(merged.input_padding, base.input_padding);
        assert_eq!(merged.md, base.md);
    }

    #[test]
    fn test_patch_deserializes_camel_case() {
        let patch: ColorPatch =
            serde_json::from_str(r##"{"onPrimary": "#FFFFFF", "inputBorder": "#CCCCCC"}"##)
                .unwrap();
        assert_eq!(patch.on_primary.as_deref(), Some("#FFFFFF"));
        assert_eq!(patch.input_border.as_deref(), Some("#CCCCCC"));
        assert!(patch.primary.is_none());
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result = serde_json::from_str::<ColorPatch>(r##"{"primry": "#FFFFFF"}"##);
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_token_set_has_no_missing_fields() {
        assert!(professional_theme().tokens.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reports_paths() {
        let mut tokens = (*professional_theme().tokens).clone();
        tokens.colors.surface = String::new();
        tokens.typography.sizes.body = 0.0;
        tokens.spacing.card_padding = Padding::new(f32::NAN, 4.0);
        tokens.shadows.md.shadow_opacity = 1.5;

        let missing = tokens.missing_fields();
        assert_eq!(
            missing,
            vec![
                "colors.surface",
                "typography.sizes.body",
                "spacing.card_padding",
                "shadows.md",
            ]
        );
    }

    #[test]
    fn test_spacing_lookup_and_line_height() {
        let spacing = &professional_theme().tokens.spacing;
        assert_eq!(spacing.get("md"), Some(spacing.md));
        assert_eq!(spacing.get("huge"), None);
        assert_eq!(TypographyTokens::line_height(16.0, 1.5), 24.0);
    }
}
