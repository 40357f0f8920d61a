//! Theme registry and loader

use odometer_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey: Color,
    pub digits: Color,
    pub accent: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        grey: Color::Rgb(0x92, 0x83, 0x74),
        digits: Color::Rgb(0xd8, 0xa6, 0x57),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        error: Color::Rgb(0xea, 0x69, 0x62),
    }
}

fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xd8, 0xde, 0xe9),
        grey: Color::Rgb(0x61, 0x6e, 0x88),
        digits: Color::Rgb(0x88, 0xc0, 0xd0),
        accent: Color::Rgb(0xa3, 0xbe, 0x8c),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
    }
}

fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        grey: Color::Rgb(0x62, 0x72, 0xa4),
        digits: Color::Rgb(0xbd, 0x93, 0xf9),
        accent: Color::Rgb(0x50, 0xfa, 0x7b),
        error: Color::Rgb(0xff, 0x55, 0x55),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" => gruvbox_dark(),
        "nord" => nord(),
        "dracula" => dracula(),
        other => {
            tracing::warn!("Unknown theme '{}', falling back to gruvbox-dark", other);
            gruvbox_dark()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg2, &mut theme.bg2),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.grey, &mut theme.grey),
        (&overrides.digits, &mut theme.digits),
        (&overrides.accent, &mut theme.accent),
        (&overrides.error, &mut theme.error),
    ];
    for (hex, color) in slots {
        if let Some(parsed) = hex.as_deref().and_then(parse_hex_color) {
            *color = parsed;
        }
    }
    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                digits: Some("#00ff00".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.digits, Color::Rgb(0, 255, 0)));
        assert!(matches!(theme.bg0, Color::Rgb(0x2e, 0x34, 0x40)));
    }

    #[test]
    fn test_every_listed_theme_loads() {
        for name in available_themes() {
            let config = ThemeConfig {
                name: name.to_string(),
                colors: ThemeColorOverrides::default(),
            };
            let _ = load_theme(&config);
        }
    }
}
