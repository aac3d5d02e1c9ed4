//! Base token catalog
//!
//! Three immutable base themes are available: professional (the app default),
//! light and dark. Each is a complete [`TokenSet`] plus a full
//! [`GradientTable`]. Service overrides are layered on top of one of these by
//! the resolver.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{get_theme, BaseThemeName, GradientSlot};
//!
//! let theme = get_theme(BaseThemeName::Professional);
//! let primary = &theme.tokens.colors.primary;
//! let header = theme.gradients.get(GradientSlot::Header);
//! assert!(header.colors.len() >= 2);
//! ```

use crate::tokens::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use app_state::appearance::BaseThemeName;

// =============================================================================
// Color Types
// =============================================================================

/// A color as a CSS-style string (e.g. "#FFFFFF", "#FFFFFF80", "rgba(0,0,0,0.5)")
pub type Color = String;

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            if hex.len() == 8 {
                u8::from_str_radix(&hex[6..8], 16).ok()?;
            }
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Whether a string is a color the style layer can render
pub fn is_valid_color(color: &str) -> bool {
    let color = color.trim();
    if color.starts_with('#') {
        return parse_hex_color(color).is_some();
    }
    if color.eq_ignore_ascii_case("transparent") {
        return true;
    }
    let args = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    match args {
        Some(args) => {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            (parts.len() == 3 || parts.len() == 4)
                && parts.iter().all(|p| p.parse::<f32>().is_ok())
        }
        None => false,
    }
}

// =============================================================================
// Gradients
// =============================================================================

/// Named usage context for a gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientSlot {
    /// Screen headers
    Header,
    /// Card backgrounds
    Card,
    /// Call-to-action buttons
    Button,
    /// Full-screen backgrounds
    Background,
    /// Sheets and panels
    Surface,
    /// Badges and highlights
    Accent,
}

impl GradientSlot {
    /// All slots
    pub fn all() -> [GradientSlot; 6] {
        [
            GradientSlot::Header,
            GradientSlot::Card,
            GradientSlot::Button,
            GradientSlot::Background,
            GradientSlot::Surface,
            GradientSlot::Accent,
        ]
    }
}

impl fmt::Display for GradientSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GradientSlot::Header => "header",
            GradientSlot::Card => "card",
            GradientSlot::Button => "button",
            GradientSlot::Background => "background",
            GradientSlot::Surface => "surface",
            GradientSlot::Accent => "accent",
        };
        f.write_str(name)
    }
}

/// Direction of a linear gradient, each component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDirection {
    /// Horizontal component
    pub x: f32,
    /// Vertical component
    pub y: f32,
}

impl GradientDirection {
    /// Top to bottom
    pub const VERTICAL: GradientDirection = GradientDirection { x: 0.0, y: 1.0 };
    /// Left to right
    pub const HORIZONTAL: GradientDirection = GradientDirection { x: 1.0, y: 0.0 };
    /// Top-left to bottom-right
    pub const DIAGONAL: GradientDirection = GradientDirection { x: 1.0, y: 1.0 };
}

/// A linear gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDefinition {
    /// Ordered colors, at least two
    pub colors: Vec<Color>,
    /// Direction of the gradient
    pub direction: GradientDirection,
}

impl GradientDefinition {
    /// Create a gradient from color literals
    pub fn new(colors: &[&str], direction: GradientDirection) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            direction,
        }
    }

    /// Describe why this gradient is unusable, if it is
    pub fn validate(&self) -> Result<(), String> {
        if self.colors.len() < 2 {
            return Err(format!(
                "gradient needs at least 2 colors, got {}",
                self.colors.len()
            ));
        }
        if let Some(bad) = self.colors.iter().find(|c| !is_valid_color(c)) {
            return Err(format!("invalid gradient color {:?}", bad));
        }
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        if !in_range(self.direction.x) || !in_range(self.direction.y) {
            return Err(format!(
                "gradient direction ({}, {}) outside [0, 1]",
                self.direction.x, self.direction.y
            ));
        }
        Ok(())
    }
}

/// A gradient for every slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientTable {
    /// Header gradient
    pub header: GradientDefinition,
    /// Card gradient
    pub card: GradientDefinition,
    /// Button gradient
    pub button: GradientDefinition,
    /// Background gradient
    pub background: GradientDefinition,
    /// Surface gradient
    pub surface: GradientDefinition,
    /// Accent gradient
    pub accent: GradientDefinition,
}

impl GradientTable {
    /// Gradient for a slot
    pub fn get(&self, slot: GradientSlot) -> &GradientDefinition {
        match slot {
            GradientSlot::Header => &self.header,
            GradientSlot::Card => &self.card,
            GradientSlot::Button => &self.button,
            GradientSlot::Background => &self.background,
            GradientSlot::Surface => &self.surface,
            GradientSlot::Accent => &self.accent,
        }
    }

    /// Mutable gradient for a slot
    pub fn get_mut(&mut self, slot: GradientSlot) -> &mut GradientDefinition {
        match slot {
            GradientSlot::Header => &mut self.header,
            GradientSlot::Card => &mut self.card,
            GradientSlot::Button => &mut self.button,
            GradientSlot::Background => &mut self.background,
            GradientSlot::Surface => &mut self.surface,
            GradientSlot::Accent => &mut self.accent,
        }
    }
}

// =============================================================================
// Base Themes
// =============================================================================

/// A complete base theme
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTheme {
    /// Theme name
    pub name: BaseThemeName,
    /// Token set, shared with every resolved theme that uses it unmodified
    pub tokens: Arc<TokenSet>,
    /// Gradients for every slot
    pub gradients: GradientTable,
}

impl BaseTheme {
    /// Whether this theme uses dark surfaces
    pub fn is_dark(&self) -> bool {
        self.name.is_dark()
    }
}

fn base_typography() -> TypographyTokens {
    TypographyTokens {
        font_family: "System".to_string(),
        sizes: FontSizes {
            display: 34.0,
            headline: 28.0,
            title: 22.0,
            subtitle: 18.0,
            body: 16.0,
            caption: 12.0,
        },
        weights: FontWeights {
            regular: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        },
        line_heights: LineHeights {
            tight: 1.2,
            normal: 1.5,
            relaxed: 1.75,
        },
    }
}

fn base_spacing() -> SpacingTokens {
    SpacingTokens {
        xxs: 2.0,
        xs: 4.0,
        sm: 8.0,
        md: 16.0,
        lg: 24.0,
        xl: 32.0,
        xxl: 48.0,
        button_padding: Padding::new(24.0, 12.0),
        input_padding: Padding::new(16.0, 12.0),
        card_padding: Padding::new(16.0, 16.0),
    }
}

fn base_border_radius() -> BorderRadiusTokens {
    BorderRadiusTokens {
        none: 0.0,
        sm: 4.0,
        md: 8.0,
        lg: 12.0,
        xl: 16.0,
        full: 9999.0,
        button: 8.0,
        input: 8.0,
        card: 12.0,
        chip: 16.0,
    }
}

/// Professional azure theme (app default)
pub fn professional_theme() -> BaseTheme {
    let colors = ColorTokens {
        primary: "#0078D4".to_string(),
        on_primary: "#FFFFFF".to_string(),
        primary_container: "#DEECF9".to_string(),
        secondary: "#2B88D8".to_string(),
        on_secondary: "#FFFFFF".to_string(),
        background: "#F3F6FA".to_string(),
        on_background: "#1B1F24".to_string(),
        surface: "#FFFFFF".to_string(),
        on_surface: "#1B1F24".to_string(),
        surface_variant: "#EDF2F7".to_string(),
        text_primary: "#1B1F24".to_string(),
        text_secondary: "#5C6670".to_string(),
        success: "#107C10".to_string(),
        warning: "#FFB900".to_string(),
        error: "#D13438".to_string(),
        info: "#0078D4".to_string(),
        border: "#D0D7DE".to_string(),
        divider: "#E6EBF0".to_string(),
        input_background: "#FFFFFF".to_string(),
        input_border: "#C8D1DA".to_string(),
        input_text: "#1B1F24".to_string(),
        input_placeholder: "#8A949E".to_string(),
        disabled: "#C8CDD2".to_string(),
        overlay: "rgba(0, 0, 0, 0.4)".to_string(),
    };

    BaseTheme {
        name: BaseThemeName::Professional,
        tokens: Arc::new(TokenSet {
            colors,
            typography: base_typography(),
            spacing: base_spacing(),
            border_radius: base_border_radius(),
            shadows: ShadowTokens::standard("#0B2545"),
        }),
        gradients: GradientTable {
            header: GradientDefinition::new(&["#0078D4", "#005A9E"], GradientDirection::HORIZONTAL),
            card: GradientDefinition::new(&["#FFFFFF", "#F3F6FA"], GradientDirection::VERTICAL),
            button: GradientDefinition::new(&["#2B88D8", "#0078D4"], GradientDirection::HORIZONTAL),
            background: GradientDefinition::new(
                &["#F3F6FA", "#E6EEF7"],
                GradientDirection::VERTICAL,
            ),
            surface: GradientDefinition::new(&["#FFFFFF", "#EDF2F7"], GradientDirection::VERTICAL),
            accent: GradientDefinition::new(&["#00B7C3", "#0078D4"], GradientDirection::DIAGONAL),
        },
    }
}

/// Bright neutral theme
pub fn light_theme() -> BaseTheme {
    let colors = ColorTokens {
        primary: "#3A5BD9".to_string(),
        on_primary: "#FFFFFF".to_string(),
        primary_container: "#E3E9FC".to_string(),
        secondary: "#7C5CFA".to_string(),
        on_secondary: "#FFFFFF".to_string(),
        background: "#FFFFFF".to_string(),
        on_background: "#111111".to_string(),
        surface: "#FAFAFA".to_string(),
        on_surface: "#111111".to_string(),
        surface_variant: "#F2F2F2".to_string(),
        text_primary: "#111111".to_string(),
        text_secondary: "#666666".to_string(),
        success: "#2E7D32".to_string(),
        warning: "#ED6C02".to_string(),
        error: "#D32F2F".to_string(),
        info: "#0288D1".to_string(),
        border: "#E0E0E0".to_string(),
        divider: "#EEEEEE".to_string(),
        input_background: "#FFFFFF".to_string(),
        input_border: "#D6D6D6".to_string(),
        input_text: "#111111".to_string(),
        input_placeholder: "#9E9E9E".to_string(),
        disabled: "#BDBDBD".to_string(),
        overlay: "rgba(0, 0, 0, 0.35)".to_string(),
    };

    BaseTheme {
        name: BaseThemeName::Light,
        tokens: Arc::new(TokenSet {
            colors,
            typography: base_typography(),
            spacing: base_spacing(),
            border_radius: base_border_radius(),
            shadows: ShadowTokens::standard("#000000"),
        }),
        gradients: GradientTable {
            header: GradientDefinition::new(&["#3A5BD9", "#7C5CFA"], GradientDirection::HORIZONTAL),
            card: GradientDefinition::new(&["#FFFFFF", "#FAFAFA"], GradientDirection::VERTICAL),
            button: GradientDefinition::new(&["#3A5BD9", "#2F4AB8"], GradientDirection::HORIZONTAL),
            background: GradientDefinition::new(
                &["#FFFFFF", "#F5F5F5"],
                GradientDirection::VERTICAL,
            ),
            surface: GradientDefinition::new(&["#FAFAFA", "#F2F2F2"], GradientDirection::VERTICAL),
            accent: GradientDefinition::new(&["#7C5CFA", "#3A5BD9"], GradientDirection::DIAGONAL),
        },
    }
}

/// Dark theme
pub fn dark_theme() -> BaseTheme {
    let colors = ColorTokens {
        primary: "#4CA3FF".to_string(),
        on_primary: "#00213F".to_string(),
        primary_container: "#0D3A66".to_string(),
        secondary: "#A78BFA".to_string(),
        on_secondary: "#1E1240".to_string(),
        background: "#0B0F14".to_string(),
        on_background: "#E6EDF3".to_string(),
        surface: "#151B23".to_string(),
        on_surface: "#E6EDF3".to_string(),
        surface_variant: "#1F2630".to_string(),
        text_primary: "#E6EDF3".to_string(),
        text_secondary: "#9DA7B3".to_string(),
        success: "#3FB950".to_string(),
        warning: "#D29922".to_string(),
        error: "#F85149".to_string(),
        info: "#58A6FF".to_string(),
        border: "#30363D".to_string(),
        divider: "#21262D".to_string(),
        input_background: "#0D1117".to_string(),
        input_border: "#30363D".to_string(),
        input_text: "#E6EDF3".to_string(),
        input_placeholder: "#6E7681".to_string(),
        disabled: "#484F58".to_string(),
        overlay: "rgba(0, 0, 0, 0.6)".to_string(),
    };

    BaseTheme {
        name: BaseThemeName::Dark,
        tokens: Arc::new(TokenSet {
            colors,
            typography: base_typography(),
            spacing: base_spacing(),
            border_radius: base_border_radius(),
            shadows: ShadowTokens::standard("#000000"),
        }),
        gradients: GradientTable {
            header: GradientDefinition::new(&["#151B23", "#0B0F14"], GradientDirection::VERTICAL),
            card: GradientDefinition::new(&["#1F2630", "#151B23"], GradientDirection::VERTICAL),
            button: GradientDefinition::new(&["#4CA3FF", "#2F81F7"], GradientDirection::HORIZONTAL),
            background: GradientDefinition::new(
                &["#0B0F14", "#000000"],
                GradientDirection::VERTICAL,
            ),
            surface: GradientDefinition::new(&["#151B23", "#1F2630"], GradientDirection::VERTICAL),
            accent: GradientDefinition::new(&["#A78BFA", "#4CA3FF"], GradientDirection::DIAGONAL),
        },
    }
}

/// Get a base theme by name
pub fn get_theme(name: BaseThemeName) -> BaseTheme {
    match name {
        BaseThemeName::Professional => professional_theme(),
        BaseThemeName::Light => light_theme(),
        BaseThemeName::Dark => dark_theme(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Color Utility Tests
    // ==========================================================================

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#000000"), Some((0, 0, 0)));
        assert_eq!(parse_hex_color("#6A1B9A"), Some((106, 27, 154)));
        assert_eq!(parse_hex_color("#FFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#6A1B9A80"), Some((106, 27, 154)));
        assert_eq!(parse_hex_color("#FF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(255, 255, 255), "#FFFFFF");
        assert_eq!(rgb_to_hex(0, 120, 212), "#0078D4");
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("#0078D4"));
        assert!(is_valid_color("transparent"));
        assert!(is_valid_color("rgba(0, 0, 0, 0.4)"));
        assert!(is_valid_color("rgb(10,20,30)"));
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("blue-ish"));
        assert!(!is_valid_color("rgba(0, 0)"));
    }

    // ==========================================================================
    // Gradient Tests
    // ==========================================================================

    #[test]
    fn test_gradient_validation() {
        let ok = GradientDefinition::new(&["#000000", "#FFFFFF"], GradientDirection::VERTICAL);
        assert!(ok.validate().is_ok());

        let single = GradientDefinition::new(&["#000000"], GradientDirection::VERTICAL);
        assert!(single.validate().is_err());

        let bad_dir = GradientDefinition::new(
            &["#000000", "#FFFFFF"],
            GradientDirection { x: 1.5, y: 0.0 },
        );
        assert!(bad_dir.validate().is_err());

        let bad_color = GradientDefinition::new(&["#000000", "nope"], GradientDirection::VERTICAL);
        assert!(bad_color.validate().is_err());
    }

    #[test]
    fn test_gradient_table_get_mut() {
        let mut table = professional_theme().gradients;
        table.get_mut(GradientSlot::Accent).direction = GradientDirection::VERTICAL;
        assert_eq!(table.get(GradientSlot::Accent).direction, GradientDirection::VERTICAL);
    }

    // ==========================================================================
    // Base Theme Tests
    // ==========================================================================

    #[test]
    fn test_all_base_themes_complete() {
        for name in BaseThemeName::all() {
            let theme = get_theme(name);
            assert_eq!(theme.name, name);
            assert!(
                theme.tokens.missing_fields().is_empty(),
                "{} theme incomplete: {:?}",
                name,
                theme.tokens.missing_fields()
            );
            for slot in GradientSlot::all() {
                assert!(theme.gradients.get(slot).validate().is_ok(), "{} {}", name, slot);
            }
        }
    }

    #[test]
    fn test_dark_theme_is_dark() {
        assert!(dark_theme().is_dark());
        assert!(!light_theme().is_dark());
        assert_eq!(professional_theme().tokens.colors.primary, "#0078D4");
    }
}
