//! Application configuration
//!
//! Configuration loaded from .twinpane.toml file.

use serde::{Deserialize, Serialize};

/// How the two content panes are arranged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSetting {
    /// Side by side
    #[default]
    Vertical,
    /// Stacked
    Horizontal,
}

/// Edge of the screen the item panel is attached to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    #[default]
    Left,
    Right,
}

/// Application configuration loaded from .twinpane.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Pane arrangement ("vertical" or "horizontal")
    #[serde(default)]
    pub layout: LayoutSetting,

    /// Where the item panel opens ("left" or "right")
    #[serde(default)]
    pub panel_position: PanelPosition,

    /// Width of the item panel in columns
    #[serde(default = "default_panel_width")]
    pub panel_width: u16,

    /// Refresh the item list when a file is saved
    #[serde(default = "default_refresh_on_save")]
    pub refresh_on_save: bool,

    /// Move focus to the right pane when an item is picked from the panel
    #[serde(default)]
    pub focus_on_select: bool,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_panel_width() -> u16 {
    35
}

fn default_refresh_on_save() -> bool {
    true
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSetting::default(),
            panel_position: PanelPosition::default(),
            panel_width: default_panel_width(),
            refresh_on_save: default_refresh_on_save(),
            focus_on_select: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, then the config
    /// directory, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => {
                log::debug!("Using default app config");
                Self::default()
            }
        }
    }

    /// Parse config file content, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }
}
