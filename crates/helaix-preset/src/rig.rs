//! Compiler inputs: the abstract rig and the concrete block mapping.
//!
//! Both arrive as JSON from the design stage upstream. Field names follow
//! that wire form; every field is optional on input so a partial answer
//! still decodes.

use std::path::Path;

use helaix_core::PathIndex;
use helaix_variax::{SnapshotRequest, VariaxRequest, is_unset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PresetError;

/// Marker for the Variax pseudo-component in names and types.
pub const VARIAX_MARKER: &str = "variax";

fn mentions_variax(text: &str) -> bool {
    text.to_lowercase().contains(VARIAX_MARKER)
}

/// High-level rig design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigDescription {
    /// Short preset name proposed by the designer.
    #[serde(default)]
    pub suggested_name: String,
    /// Free-text rationale.
    #[serde(default)]
    pub explanation: String,
    /// Variax instrument for the whole preset.
    #[serde(default)]
    pub guitar_model: String,
    /// Tuning for the whole preset.
    #[serde(default)]
    pub tuning: String,
    /// Logical signal chain, in order.
    #[serde(default)]
    pub chain: Vec<RigComponent>,
    /// Performance snapshots, at most the first eight are used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<Snapshot>,
}

/// One logical component of the chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigComponent {
    /// Component kind (`amp`, `cab`, `delay`, `variax`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Display name, e.g. "Tube Screamer".
    #[serde(default)]
    pub name: String,
    /// Why the component is in the chain.
    #[serde(default)]
    pub description: String,
    /// Abstract settings text.
    #[serde(default)]
    pub settings: String,
}

/// A performance snapshot of the rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Names of the blocks enabled in this snapshot.
    #[serde(default)]
    pub active_blocks: Vec<String>,
    /// Variax instrument override.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub guitar_model: String,
    /// Tuning override.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tuning: String,
    /// Block name to parameter overrides.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl RigDescription {
    /// Parse a rig from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a rig from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| PresetError::read_file(path, e))?;
        Self::from_json(&text)
    }

    /// First chain component standing for the Variax input.
    pub fn variax_component(&self) -> Option<&RigComponent> {
        self.chain
            .iter()
            .find(|c| mentions_variax(&c.kind) || mentions_variax(&c.name))
    }

    /// Copy instrument choices from the Variax chain component into the
    /// dedicated fields when those are unset.
    ///
    /// The global field takes the component's settings text. Each snapshot
    /// takes `settings` (then `Settings`) from its parameter entry for the
    /// component.
    pub fn sync_variax_fields(&mut self) {
        let Some(component) = self.variax_component() else {
            return;
        };
        let name = component.name.clone();
        if is_unset(&self.guitar_model) {
            self.guitar_model = component.settings.clone();
        }

        for snapshot in &mut self.snapshots {
            if !is_unset(&snapshot.guitar_model) {
                continue;
            }
            let text = snapshot
                .params
                .get(&name)
                .and_then(Value::as_object)
                .and_then(|p| {
                    p.get("settings")
                        .and_then(Value::as_str)
                        .or_else(|| p.get("Settings").and_then(Value::as_str))
                });
            if let Some(text) = text {
                snapshot.guitar_model = text.to_string();
            }
        }
    }

    /// True if the rig names an instrument anywhere.
    pub fn wants_variax(&self) -> bool {
        !is_unset(&self.guitar_model) || self.snapshots.iter().any(|s| !is_unset(&s.guitar_model))
    }

    /// The rig's instrument settings as a Variax request.
    pub fn variax_request(&self) -> VariaxRequest<'_> {
        VariaxRequest {
            guitar_model: &self.guitar_model,
            tuning: &self.tuning,
            snapshots: self
                .snapshots
                .iter()
                .map(|s| SnapshotRequest {
                    guitar_model: &s.guitar_model,
                    params: Some(&s.params),
                })
                .collect(),
        }
    }
}

impl Snapshot {
    /// Parameter overrides this snapshot gives the named block.
    pub fn overrides_for(&self, block_name: &str) -> Option<&Map<String, Value>> {
        self.params.get(block_name).and_then(Value::as_object)
    }

    /// True if an active name matches the block's name or model.
    ///
    /// Matching ignores case and accepts containment either way, so
    /// "Drive" activates "Overdrive" and "Scream 808" activates "808".
    /// Empty names match nothing.
    pub fn activates(&self, block_name: &str, model_name: &str) -> bool {
        let name = block_name.to_lowercase();
        let model = model_name.to_lowercase();
        self.active_blocks.iter().any(|active| {
            let a = active.to_lowercase();
            !a.is_empty()
                && [name.as_str(), model.as_str()]
                    .into_iter()
                    .filter(|b| !b.is_empty())
                    .any(|b| a == b || a.contains(b) || b.contains(a.as_str()))
        })
    }
}

/// A block chosen for a chain component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBlock {
    /// Logical display name, matching snapshot `active_blocks` entries.
    #[serde(default)]
    pub name: String,
    /// Catalog display name or internal identifier.
    #[serde(default)]
    pub model_name: String,
    /// Requested DSP path.
    #[serde(default)]
    pub path: i64,
    /// Parameter overrides.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ResolvedBlock {
    /// A block on path 0 with no overrides.
    pub fn new(name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    /// Set the requested path.
    pub fn with_path(mut self, path: i64) -> Self {
        self.path = path;
        self
    }

    /// Add a parameter override.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// True for the Variax placeholder, which is never placed as a block.
    pub fn is_variax_placeholder(&self) -> bool {
        mentions_variax(&self.name) || mentions_variax(&self.model_name)
    }

    /// Path to place the block on; out-of-range requests and single-path
    /// hardware give path 0.
    pub fn target_path(&self, dual_path: bool) -> PathIndex {
        if dual_path {
            PathIndex::from_index(self.path)
        } else {
            PathIndex::Dsp0
        }
    }
}

/// The block mapping answer: `{"blocks": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MappingWire")]
pub struct BlockMapping {
    /// Blocks in placement order.
    pub blocks: Vec<ResolvedBlock>,
}

// A bare array of blocks is accepted as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum MappingWire {
    Wrapped {
        #[serde(default)]
        blocks: Vec<ResolvedBlock>,
    },
    Bare(Vec<ResolvedBlock>),
}

impl From<MappingWire> for BlockMapping {
    fn from(wire: MappingWire) -> Self {
        match wire {
            MappingWire::Wrapped { blocks } | MappingWire::Bare(blocks) => Self { blocks },
        }
    }
}

impl BlockMapping {
    /// Parse a mapping from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a mapping from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| PresetError::read_file(path, e))?;
        Self::from_json(&text)
    }
}
