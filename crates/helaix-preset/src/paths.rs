//! Platform-specific locations for settings and exported presets.
//!
//! - **Settings**: `~/.config/helaix/settings.toml` (Linux),
//!   `~/Library/Application Support/helaix/settings.toml` (macOS),
//!   `%APPDATA%\helaix\settings.toml` (Windows)
//! - **Exports**: `~/Documents/helaix/` on every platform

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "helaix";

/// Settings file name.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Returns the default directory for exported presets.
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_under_config_dir() {
        let path = settings_path();
        assert!(path.ends_with("helaix/settings.toml"));
        assert!(path.starts_with(user_config_dir()));
    }

    #[test]
    fn test_default_output_dir() {
        assert!(default_output_dir().ends_with("Documents/helaix"));
    }
}
