use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".twinpane.toml";

/// Load config file content from the first location that has one
///
/// Searches in:
/// 1. Current working directory as .twinpane.toml
/// 2. Home directory as .twinpane.toml
/// 3. The XDG config directory as twinpane/config.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let candidates = [Some(PathBuf::from(CONFIG_FILE)), home_config_path(), xdg_config_path()];

    for path in candidates.into_iter().flatten() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

/// ~/.twinpane.toml if HOME is set.
fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

fn xdg_config_path() -> Option<PathBuf> {
    crate::paths::app_config_path().ok()
}
