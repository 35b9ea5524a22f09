//! Application settings.
//!
//! Stored as TOML at [`paths::settings_path`]. Every field has a default,
//! so a partial or missing file is valid.
//!
//! ```toml
//! output_path = "/home/me/Documents/helaix"
//! hardware_target = "Helix LT"
//! incremental_save = true
//! default_exp_pedal = 2
//! variax_enabled = false
//! variax_hardware_model = "Standard"
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use helaix_catalog::Catalog;
use helaix_variax::VariaxConfig;
use serde::{Deserialize, Serialize};

use crate::aliases::ParamAliases;
use crate::compiler::CompileOptions;
use crate::paths;
use crate::template::TemplateSource;
use crate::PresetError;

/// User settings for compiling and exporting presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory exported presets are written to.
    pub output_path: PathBuf,
    /// Target unit, e.g. "Helix Floor".
    pub hardware_target: String,
    /// Never overwrite: add `_1`, `_2`, ... to taken filenames.
    pub incremental_save: bool,
    /// Expression pedal for wah, volume and whammy blocks; 0 for none.
    pub default_exp_pedal: u32,
    /// Always drive the Variax input.
    pub variax_enabled: bool,
    /// Variax hardware model ("Standard", "JTV", "Shuriken").
    pub variax_hardware_model: String,
    /// `.hlx` file to use instead of the built-in template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    /// JSON Variax table to use instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variax_config_path: Option<PathBuf>,
    /// TOML parameter alias table to use instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: paths::default_output_dir(),
            hardware_target: "Helix Floor".to_string(),
            incremental_save: false,
            default_exp_pedal: 1,
            variax_enabled: false,
            variax_hardware_model: "Standard".to_string(),
            template_path: None,
            variax_config_path: None,
            aliases_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PresetError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings, using defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(text)?)
    }

    /// Encode the settings as TOML.
    pub fn to_toml(&self) -> Result<String, PresetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| PresetError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| PresetError::write_file(path, e))?;
        Ok(())
    }

    /// Compile options for a preset named `preset_name`.
    pub fn compile_options(&self, preset_name: impl Into<String>) -> CompileOptions {
        CompileOptions {
            preset_name: preset_name.into(),
            hardware: self.hardware_target.clone(),
            default_expression_pedal: self.default_exp_pedal,
            variax_enabled: self.variax_enabled,
            variax_hardware: self.variax_hardware_model.clone(),
        }
    }

    /// The configured template source.
    pub fn template_source(&self) -> TemplateSource {
        TemplateSource::from_path(self.template_path.clone())
    }

    /// The configured Variax table.
    ///
    /// An unusable external table yields an empty one, so resolution falls
    /// back to the keyword heuristics.
    pub fn variax_config(&self) -> Cow<'static, VariaxConfig> {
        match &self.variax_config_path {
            Some(path) => Cow::Owned(VariaxConfig::load_or_empty(path)),
            None => Cow::Borrowed(VariaxConfig::builtin()),
        }
    }

    /// The model catalog.
    pub fn catalog(&self) -> Result<&'static Catalog, PresetError> {
        Ok(Catalog::builtin()?)
    }

    /// The configured parameter alias table.
    pub fn param_aliases(&self) -> Result<ParamAliases, PresetError> {
        match &self.aliases_path {
            Some(path) => ParamAliases::load(path),
            None => Ok(ParamAliases::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.hardware_target, "Helix Floor");
        assert_eq!(settings.default_exp_pedal, 1);
        assert_eq!(settings.variax_hardware_model, "Standard");
        assert!(!settings.incremental_save);
        assert!(!settings.variax_enabled);
        assert!(settings.output_path.ends_with("Documents/helaix"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_toml("hardware_target = \"HX Stomp\"\nincremental_save = true\n").unwrap();
        assert_eq!(settings.hardware_target, "HX Stomp");
        assert!(settings.incremental_save);
        assert_eq!(settings.default_exp_pedal, 1);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg").join("settings.toml");
        let settings = Settings {
            hardware_target: "Helix LT".into(),
            default_exp_pedal: 0,
            template_path: Some("/presets/base.hlx".into()),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_default_missing() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_or_default(tmp.path().join("none.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "default_exp_pedal = \"one\"").unwrap();
        assert!(matches!(
            Settings::load_or_default(&path),
            Err(PresetError::TomlParse(_))
        ));
    }

    #[test]
    fn test_compile_options() {
        let settings = Settings {
            hardware_target: "Helix Rack".into(),
            default_exp_pedal: 3,
            variax_enabled: true,
            variax_hardware_model: "Shuriken".into(),
            ..Settings::default()
        };
        let options = settings.compile_options("Solo");
        assert_eq!(options.preset_name, "Solo");
        assert_eq!(options.hardware, "Helix Rack");
        assert_eq!(options.default_expression_pedal, 3);
        assert!(options.variax_enabled);
        assert_eq!(options.variax_hardware, "Shuriken");
    }

    #[test]
    fn test_catalog_is_builtin() {
        let catalog = Settings::default().catalog().unwrap();
        assert!(std::ptr::eq(catalog, Catalog::builtin().unwrap()));
        assert!(catalog.find_by_name("Hall").is_some());
    }

    #[test]
    fn test_external_tables() {
        let tmp = TempDir::new().unwrap();
        let variax = tmp.path().join("variax.json");
        std::fs::write(&variax, "not json").unwrap();
        let settings = Settings {
            variax_config_path: Some(variax),
            aliases_path: Some(tmp.path().join("missing.toml")),
            ..Settings::default()
        };
        assert!(settings.variax_config().is_empty());
        assert!(matches!(settings.param_aliases(), Err(PresetError::ReadFile { .. })));
        assert!(!Settings::default().variax_config().is_empty());
        assert_eq!(Settings::default().template_source(), TemplateSource::Embedded);
    }
}
