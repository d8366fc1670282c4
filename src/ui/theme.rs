use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

use crate::view::CategoryStyle;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Indigo,
    Slate,
    Saffron,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Indigo, ThemePreset::Slate, ThemePreset::Saffron]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Indigo => "Indigo (light)",
            ThemePreset::Slate => "Slate (dark)",
            ThemePreset::Saffron => "Saffron (dark)",
        }
    }

    /// Parse a preset name as written in the config file
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "indigo" => Some(ThemePreset::Indigo),
            "slate" => Some(ThemePreset::Slate),
            "saffron" => Some(ThemePreset::Saffron),
            _ => None,
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Indigo => Theme::indigo(),
            ThemePreset::Slate => Theme::slate(),
            ThemePreset::Saffron => Theme::saffron(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    pub dark: bool,

    // Surfaces
    pub page: Color32,
    pub panel: Color32,
    pub card: Color32,
    pub card_hover: Color32,

    // Text
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent
    pub accent: Color32,
    pub accent_text: Color32,
    pub refresh: Color32,

    // Semantic
    pub error: Color32,
    pub error_bg: Color32,

    pub border: Color32,
}

impl Theme {
    /// Light indigo theme, the default
    pub fn indigo() -> Self {
        Self {
            dark: false,
            page: Color32::from_rgb(238, 242, 255),   // Indigo-50
            panel: Color32::WHITE,
            card: Color32::WHITE,
            card_hover: Color32::from_rgb(249, 250, 251),

            text_primary: Color32::from_rgb(17, 24, 39),    // Gray-900
            text_secondary: Color32::from_rgb(75, 85, 99),  // Gray-600
            text_muted: Color32::from_rgb(107, 114, 128),   // Gray-500

            accent: Color32::from_rgb(79, 70, 229), // Indigo-600
            accent_text: Color32::WHITE,
            refresh: Color32::from_rgb(22, 163, 74), // Green-600

            error: Color32::from_rgb(185, 28, 28),
            error_bg: Color32::from_rgb(254, 242, 242),

            border: Color32::from_rgb(229, 231, 235),
        }
    }

    /// Slate dark theme
    pub fn slate() -> Self {
        Self {
            dark: true,
            page: Color32::from_rgb(15, 23, 42),
            panel: Color32::from_rgb(22, 33, 54),
            card: Color32::from_rgb(30, 41, 59),
            card_hover: Color32::from_rgb(40, 53, 74),

            text_primary: Color32::from_rgb(241, 245, 249),
            text_secondary: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(148, 163, 184),

            accent: Color32::from_rgb(129, 140, 248), // Indigo-400
            accent_text: Color32::from_rgb(15, 23, 42),
            refresh: Color32::from_rgb(74, 222, 128),

            error: Color32::from_rgb(252, 165, 165),
            error_bg: Color32::from_rgb(69, 26, 26),

            border: Color32::from_rgb(51, 65, 85),
        }
    }

    /// Saffron dark theme
    pub fn saffron() -> Self {
        Self {
            dark: true,
            page: Color32::from_rgb(24, 20, 16),
            panel: Color32::from_rgb(33, 28, 22),
            card: Color32::from_rgb(44, 37, 29),
            card_hover: Color32::from_rgb(56, 47, 37),

            text_primary: Color32::from_rgb(250, 245, 235),
            text_secondary: Color32::from_rgb(220, 205, 185),
            text_muted: Color32::from_rgb(165, 150, 130),

            accent: Color32::from_rgb(249, 115, 22), // Orange-500
            accent_text: Color32::from_rgb(24, 20, 16),
            refresh: Color32::from_rgb(34, 197, 94),

            error: Color32::from_rgb(248, 113, 113),
            error_bg: Color32::from_rgb(66, 28, 24),

            border: Color32::from_rgb(72, 60, 46),
        }
    }

    /// Background and text color for a category badge
    pub fn badge_colors(&self, style: CategoryStyle) -> (Color32, Color32) {
        let (bg, fg) = match style {
            CategoryStyle::Politics => ((254, 226, 226), (153, 27, 27)),
            CategoryStyle::Economy => ((220, 252, 231), (22, 101, 52)),
            CategoryStyle::Education => ((219, 234, 254), (30, 64, 175)),
            CategoryStyle::Science => ((243, 232, 255), (107, 33, 168)),
            CategoryStyle::Environment => ((209, 250, 229), (6, 95, 70)),
            CategoryStyle::Sports => ((255, 237, 213), (154, 52, 18)),
            CategoryStyle::Health => ((252, 231, 243), (157, 23, 77)),
            CategoryStyle::Defense | CategoryStyle::General => ((243, 244, 246), (31, 41, 55)),
        };
        let bg = Color32::from_rgb(bg.0, bg.1, bg.2);
        let fg = Color32::from_rgb(fg.0, fg.1, fg.2);

        // Dark themes use the muted fill
        if self.dark {
            (fg.gamma_multiply(0.45), bg)
        } else {
            (bg, fg)
        }
    }

    /// Colors for the state (`indigo`) and district (`blue`) badges
    pub fn region_badge_colors(&self, district: bool) -> (Color32, Color32) {
        let (bg, fg) = if district {
            (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175))
        } else {
            (Color32::from_rgb(224, 231, 255), Color32::from_rgb(55, 48, 163))
        };
        if self.dark {
            (fg.gamma_multiply(0.45), bg)
        } else {
            (bg, fg)
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.window_fill = self.panel;
        visuals.panel_fill = self.page;
        visuals.faint_bg_color = self.card_hover;
        visuals.extreme_bg_color = self.card;

        visuals.widgets.noninteractive.bg_fill = self.card;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.weak_bg_fill = self.card_hover;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent;
        visuals.widgets.active.weak_bg_fill = self.accent;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.accent_text);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}
