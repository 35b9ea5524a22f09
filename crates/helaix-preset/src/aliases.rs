//! Parameter key aliasing.
//!
//! Upstream parameter names are generic ("gain", "mids"); catalog models
//! use their own ("Drive", "Middle", "ChVol"). An override key is resolved
//! against a model's default parameters in this order:
//!
//! 1. exact key present in the defaults
//! 2. first alias candidate present in the defaults
//! 3. case-insensitive match against the default keys
//! 4. the original key, verbatim
//!
//! The alias table is data and can be replaced from TOML:
//!
//! ```toml
//! [aliases]
//! gain = ["Drive", "LeadGain", "Lead Drive", "ChVol", "Master"]
//! mids = ["Middle", "Mid"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PresetError;

/// Generic parameter name to candidate model keys, in preference order.
pub const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    ("gain", &["Drive", "LeadGain", "Lead Drive", "ChVol", "Master"]),
    ("drive", &["Gain", "LeadDrive", "Lead Gain", "Overdrive"]),
    ("volume", &["ChVol", "Master", "Level"]),
    ("vol", &["ChVol", "Master", "Level"]),
    ("mids", &["Middle", "Mid"]),
];

/// Alias table keyed by lowercase generic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamAliases {
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
}

impl Default for ParamAliases {
    fn default() -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(key, candidates)| {
                let candidates = candidates.iter().map(|c| (*c).to_string()).collect();
                ((*key).to_string(), candidates)
            })
            .collect();
        Self { aliases }
    }
}

impl ParamAliases {
    /// A table with no aliases.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Parse a table from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PresetError> {
        let mut table: Self = toml::from_str(text)?;
        table.aliases = std::mem::take(&mut table.aliases)
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Ok(table)
    }

    /// Load a table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| PresetError::read_file(path, e))?;
        Self::from_toml(&text)
    }

    /// Encode the table as TOML.
    pub fn to_toml(&self) -> Result<String, PresetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Add or replace the candidates for a generic name.
    pub fn with_alias<I, S>(mut self, key: &str, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.insert(
            key.to_lowercase(),
            candidates.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Candidate keys for a generic name, empty if none.
    pub fn candidates(&self, key: &str) -> &[String] {
        self.aliases
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve an override key against a model's default parameters.
    pub fn resolve_key(&self, defaults: &Map<String, Value>, key: &str) -> String {
        if defaults.contains_key(key) {
            return key.to_string();
        }

        if let Some(alias) = self
            .candidates(key)
            .iter()
            .find(|c| defaults.contains_key(c.as_str()))
        {
            tracing::debug!(key, resolved = %alias, "parameter alias");
            return alias.clone();
        }

        let lower = key.to_lowercase();
        if let Some(actual) = defaults.keys().find(|k| k.to_lowercase() == lower) {
            return actual.clone();
        }

        key.to_string()
    }

    /// Number of generic names in the table.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// True if the table holds no aliases.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
