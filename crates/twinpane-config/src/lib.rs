//! Configuration and file paths for twinpane
//!
//! This crate provides:
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)
//! - Config and cache directory helpers

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, LayoutSetting, PanelPosition};
pub use config_file::load_config_file;
