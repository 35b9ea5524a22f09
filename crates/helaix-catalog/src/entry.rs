//! Catalog entry types.

use helaix_core::ModelFamily;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// DSP cost (percent of one path) assumed when an entry declares none.
pub const DEFAULT_DSP_COST: f64 = 3.0;

/// One model definition.
///
/// Field names follow the catalog dataset (`InternalName`, `DSP_Mono`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Internal identifier written to `@model` (unique).
    #[serde(rename = "InternalName")]
    pub internal_name: String,
    /// Display name shown in the editor. May be empty.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Real-world gear the model is based on.
    #[serde(rename = "BasedOn", default)]
    pub based_on: String,
    /// Declared mono DSP cost; zero when unknown.
    #[serde(rename = "DSP_Mono", default)]
    pub dsp_mono: f64,
    /// Declared stereo DSP cost; zero when unknown.
    #[serde(rename = "DSP_Stereo", default)]
    pub dsp_stereo: f64,
    /// Block data, including default parameters.
    #[serde(rename = "Data", default)]
    pub data: ModelData,
}

/// The `Data` object of an entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelData {
    /// Default parameter set of a freshly placed block.
    #[serde(rename = "Defaults", default)]
    pub defaults: Map<String, Value>,
    /// Other block data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Default parameters.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.data.defaults
    }

    /// Display name, or the internal identifier when the entry has none.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.internal_name
        } else {
            &self.name
        }
    }

    /// Mono DSP cost, falling back to [`DEFAULT_DSP_COST`].
    pub fn mono_cost(&self) -> f64 {
        resolve_cost(self.dsp_mono)
    }

    /// Stereo DSP cost, falling back to [`DEFAULT_DSP_COST`].
    pub fn stereo_cost(&self) -> f64 {
        resolve_cost(self.dsp_stereo)
    }

    /// Model family from the identifier prefix.
    pub fn family(&self) -> ModelFamily {
        ModelFamily::classify(&self.internal_name)
    }
}

fn resolve_cost(declared: f64) -> f64 {
    if declared > 0.0 {
        declared
    } else {
        DEFAULT_DSP_COST
    }
}
