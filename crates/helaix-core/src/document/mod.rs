//! Typed model of the `.hlx` preset document.
//!
//! The persisted format is a deeply nested JSON object. The regions the
//! compiler reads or writes are modelled as named fields; everything else is
//! collected into `extra` maps via `#[serde(flatten)]` and written back as-is.
//!
//! ```text
//! PresetDocument
//! └── data: PresetData          @device, @schema
//!     ├── meta: PresetMeta       name, dsp_map, variax_type
//!     └── tone: Tone
//!         ├── dsp0 / dsp1        DspPath: block<N> entries, outputA
//!         ├── controller         ControllerMap<ControllerBinding>
//!         ├── footswitch         PathMap<Value>
//!         ├── snapshot0..7       SnapshotSlot: blocks, controllers
//!         ├── variax             VariaxRegion
//!         └── global             GlobalRegion: cursor state
//! ```
//!
//! Encoding goes through [`serde_json::Value`] so every object is written with
//! sorted keys, matching the layout produced by the hardware editor.

mod controller;
mod path;
mod tone;
mod variax;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DocumentError;

pub use controller::{ControllerBinding, ControllerMap, ControllerValue, PathMap};
pub use path::{BlockEntry, DspPath, OutputPort, block_key, is_block_key};
pub use tone::{GlobalRegion, PathIndex, SNAPSHOT_COUNT, SnapshotSlot, Tone};
pub use variax::VariaxRegion;

/// Top level of an `.hlx` file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetDocument {
    /// Preset payload.
    #[serde(default)]
    pub data: PresetData,
    /// File-level keys (`meta`, `schema`, `version`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data` object: device identity, metadata and the tone itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetData {
    /// Numeric device code of the target unit.
    #[serde(rename = "@device", default, skip_serializing_if = "Option::is_none")]
    pub device: Option<u32>,
    /// Schema revision.
    #[serde(rename = "@schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<u32>,
    /// Display metadata.
    #[serde(default)]
    pub meta: PresetMeta,
    /// Signal chain, controllers and snapshots.
    #[serde(default)]
    pub tone: Tone,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data.meta` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetMeta {
    /// Preset display name.
    #[serde(default)]
    pub name: String,
    /// Internal model identifier to mono DSP cost, for display by consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsp_map: Option<BTreeMap<String, f64>>,
    /// Variax family the input region targets (`"jtv"` or `"shuriken"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variax_type: Option<String>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PresetDocument {
    /// Parse a document from `.hlx` JSON text.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(text).map_err(DocumentError::Parse)
    }

    /// Encode the document as a JSON value with sorted object keys.
    pub fn to_value(&self) -> Result<Value, DocumentError> {
        serde_json::to_value(self).map_err(DocumentError::Serialize)
    }

    /// Encode the document as two-space indented JSON with sorted object keys.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        let value = self.to_value()?;
        serde_json::to_string_pretty(&value).map_err(DocumentError::Serialize)
    }

    /// Preset display name.
    pub fn name(&self) -> &str {
        &self.data.meta.name
    }

    /// The tone region.
    pub fn tone(&self) -> &Tone {
        &self.data.tone
    }

    /// Mutable access to the tone region.
    pub fn tone_mut(&mut self) -> &mut Tone {
        &mut self.data.tone
    }

    /// Number of placed blocks on a path.
    pub fn block_count(&self, path: PathIndex) -> usize {
        self.tone().path(path).blocks.len()
    }
}
