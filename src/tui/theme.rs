use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::Priority;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub checkbox: Color,
    pub card_border: Color,
    pub selection_bg: Color,
    pub header_bg: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
    /// Text drawn on top of a priority badge
    pub badge_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x25, 0x2F),
            text: Color::Rgb(0xEC, 0xF0, 0xF1),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x34, 0x98, 0xDB),
            dim: Color::Rgb(0x7F, 0x8C, 0x8D),
            red: Color::Rgb(0xE7, 0x4C, 0x3C),
            green: Color::Rgb(0x27, 0xAE, 0x60),
            checkbox: Color::Rgb(0x4A, 0x90, 0xE2),
            card_border: Color::Rgb(0x95, 0xA5, 0xA6),
            selection_bg: Color::Rgb(0x2C, 0x3E, 0x50),
            header_bg: Color::Rgb(0x2C, 0x3E, 0x50),
            priority_high: Color::Rgb(0xFF, 0x6B, 0x6B),
            priority_medium: Color::Rgb(0xFF, 0xD9, 0x3D),
            priority_low: Color::Rgb(0x6B, 0xCF, 0x7F),
            badge_text: Color::Rgb(0x1A, 0x25, 0x2F),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "checkbox" => theme.checkbox = color,
                "card_border" => theme.card_border = color,
                "selection_bg" => theme.selection_bg = color,
                "header_bg" => theme.header_bg = color,
                "badge_text" => theme.badge_text = color,
                _ => tracing::warn!(key = %key, "unknown color key"),
            }
        }

        for (name, value) in &ui.priority_colors {
            let (Ok(priority), Some(color)) = (name.parse::<Priority>(), parse_hex_color(value))
            else {
                tracing::warn!(priority = %name, value = %value, "ignoring priority color");
                continue;
            };
            match priority {
                Priority::High => theme.priority_high = color,
                Priority::Medium => theme.priority_medium = color,
                Priority::Low => theme.priority_low = color,
            }
        }

        theme
    }

    /// Badge and card accent color for a priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }
}
