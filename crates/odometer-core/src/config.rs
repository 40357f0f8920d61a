use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::animation::EasingType;
use crate::counter::{CounterOptions, DEFAULT_ANIMATION_DURATION_MS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Digit font used by the terminal host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitFontKind {
    /// One cell per digit
    Plain,
    /// Multi-row block digits; rolls are visible row by row
    #[default]
    Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Delay before a roll starts, during which the old value stays visible
    #[serde(default)]
    pub animation_delay_ms: u64,
    /// Roll duration
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve: "linear", "ease_in", "ease_out", "ease_in_out", or
    /// { cubic_bezier = { x1, y1, x2, y2 } }
    #[serde(default)]
    pub easing: EasingType,
    /// Columns between digits
    #[serde(default)]
    pub digit_spacing: u16,
    /// Trailing digits that never animate (e.g. 2 for scores in hundreds)
    #[serde(default)]
    pub never_animate_digits: usize,
    /// Digit font
    #[serde(default)]
    pub font: DigitFontKind,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            animation_delay_ms: 0,
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            digit_spacing: 0,
            never_animate_digits: 0,
            font: DigitFontKind::default(),
        }
    }
}

impl From<&CounterConfig> for CounterOptions {
    fn from(config: &CounterConfig) -> Self {
        Self {
            animation_delay_ms: config.animation_delay_ms,
            animation_duration_ms: config.animation_duration_ms,
            easing: config.easing,
            digit_spacing: config.digit_spacing,
            number_of_end_digits_that_never_animate: config.never_animate_digits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a counter is rolling
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Value shown at startup
    #[serde(default = "default_initial_value")]
    pub initial_value: u64,
    /// Amount added or subtracted per key press
    #[serde(default = "default_initial_step")]
    pub initial_step: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            initial_value: default_initial_value(),
            initial_step: default_initial_step(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string (e.g. "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Background
    pub bg0: Option<String>,
    /// Status bar background
    pub bg2: Option<String>,
    /// Foreground
    pub fg0: Option<String>,
    /// Dimmed text (hints, labels)
    pub grey: Option<String>,
    /// Counter digits
    pub digits: Option<String>,
    /// Accent color (active input field)
    pub accent: Option<String>,
    /// Error color
    pub error: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Add the step to the value
    #[serde(default = "default_key_increment")]
    pub increment: String,
    /// Subtract the step from the value (clamped at 0)
    #[serde(default = "default_key_decrement")]
    pub decrement: String,
    /// Edit the step
    #[serde(default = "default_key_edit_step")]
    pub edit_step: String,
    /// Edit the number of trailing digits that never animate
    #[serde(default = "default_key_edit_never_animate")]
    pub edit_never_animate: String,
    /// Type a value to jump to
    #[serde(default = "default_key_edit_value")]
    pub edit_value: String,
    /// Switch between plain and block digits
    #[serde(default = "default_key_toggle_font")]
    pub toggle_font: String,
    /// Reset to the initial value without animating
    #[serde(default = "default_key_reset")]
    pub reset: String,
    /// Show help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            increment: default_key_increment(),
            decrement: default_key_decrement(),
            edit_step: default_key_edit_step(),
            edit_never_animate: default_key_edit_never_animate(),
            edit_value: default_key_edit_value(),
            toggle_font: default_key_toggle_font(),
            reset: default_key_reset(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_increment() -> String { "k".to_string() }
fn default_key_decrement() -> String { "j".to_string() }
fn default_key_edit_step() -> String { "s".to_string() }
fn default_key_edit_never_animate() -> String { "n".to_string() }
fn default_key_edit_value() -> String { "=".to_string() }
fn default_key_toggle_font() -> String { "f".to_string() }
fn default_key_reset() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("odometer")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_animation_duration() -> u64 {
    DEFAULT_ANIMATION_DURATION_MS
}

fn default_tick_rate() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

fn default_initial_value() -> u64 {
    100
}

fn default_initial_step() -> u64 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml(&content)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Write configuration as pretty TOML, creating parent directories
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/odometer/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("odometer")
            .join("config.toml")
    }

    /// Get the log file path used by the full-screen demo
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("odometer.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Counter options derived from the `[counter]` table
    pub fn counter_options(&self) -> CounterOptions {
        CounterOptions::from(&self.counter)
    }
}
