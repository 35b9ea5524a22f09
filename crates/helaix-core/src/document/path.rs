//! DSP path containers and the block entries placed in them.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const OUTPUT_A: &str = "outputA";

/// Document key of the block at `position`.
pub fn block_key(position: usize) -> String {
    format!("block{position}")
}

/// True for keys that hold a placed block or cabinet entry.
pub fn is_block_key(key: &str) -> bool {
    key.starts_with("block") || key.starts_with("cab")
}

/// One DSP path (`dsp0` or `dsp1`).
///
/// Block and cabinet entries are typed; the primary output is typed so its
/// routing can be set; inputs, split/join nodes and any other keys are
/// carried through verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DspPath {
    /// Placed entries keyed `block<N>` / `cab<N>`.
    pub blocks: BTreeMap<String, BlockEntry>,
    /// Primary output node.
    pub output_a: Option<OutputPort>,
    /// Remaining path nodes.
    pub extra: Map<String, Value>,
}

impl DspPath {
    /// Remove every block and cabinet entry.
    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
    }

    /// Set the primary output routing, creating the output node if absent.
    pub fn set_output(&mut self, output: u32) {
        self.output_a.get_or_insert_with(OutputPort::default).output = output;
    }

    /// Blocks in position order.
    pub fn blocks_by_position(&self) -> Vec<(&str, &BlockEntry)> {
        let mut blocks: Vec<_> = self
            .blocks
            .iter()
            .map(|(k, b)| (k.as_str(), b))
            .collect();
        blocks.sort_by_key(|(_, b)| b.position.unwrap_or(u32::MAX));
        blocks
    }
}

impl Serialize for DspPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.extra.len() + self.blocks.len() + usize::from(self.output_a.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        if let Some(output) = &self.output_a {
            map.serialize_entry(OUTPUT_A, output)?;
        }
        for (key, block) in &self.blocks {
            map.serialize_entry(key, block)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DspPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut path = DspPath::default();
        for (key, value) in raw {
            if is_block_key(&key) {
                let block = serde_json::from_value(value).map_err(de::Error::custom)?;
                path.blocks.insert(key, block);
            } else if key == OUTPUT_A {
                path.output_a = Some(serde_json::from_value(value).map_err(de::Error::custom)?);
            } else {
                path.extra.insert(key, value);
            }
        }
        Ok(path)
    }
}

/// The `outputA` node of a path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputPort {
    /// Output routing selector.
    #[serde(rename = "@output", default)]
    pub output: u32,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputPort {
    /// Route to the unit's multi output.
    pub const MULTI: u32 = 1;
    /// Feed the second DSP path.
    pub const PATH_2: u32 = 2;
}

/// A block placed on a DSP path.
///
/// Identity fields are typed; model parameters live in `params`. Identity
/// keys can never be stored as parameters, so a stray `@path` or `@model`
/// in a parameter set cannot shadow the typed field on output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Internal model identifier.
    #[serde(rename = "@model", default)]
    pub model: String,
    /// Display name given by the rig.
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Baseline enabled state.
    #[serde(rename = "@enabled", default)]
    pub enabled: bool,
    /// Zero-based position within the path.
    #[serde(rename = "@position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Sub-path (A/B lane) within the path.
    #[serde(rename = "@path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<u32>,
    /// Type tag consumed by the editor's renderer.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<u32>,
    /// Model parameters.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl BlockEntry {
    /// Keys owned by typed fields.
    pub const IDENTITY_KEYS: [&'static str; 6] =
        ["@model", "@name", "@enabled", "@position", "@path", "@type"];

    /// An enabled block with no parameters.
    pub fn new(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: Some(name.into()),
            enabled: true,
            ..Self::default()
        }
    }

    /// True if `key` is owned by a typed identity field.
    pub fn is_identity_key(key: &str) -> bool {
        Self::IDENTITY_KEYS.contains(&key)
    }

    /// Store a parameter. Identity keys are refused and `false` is returned.
    pub fn set_param(&mut self, key: &str, value: Value) -> bool {
        if Self::is_identity_key(key) {
            return false;
        }
        self.params.insert(key.to_string(), value);
        true
    }

    /// Copy every non-identity entry of `params`.
    pub fn with_params(mut self, params: &Map<String, Value>) -> Self {
        for (key, value) in params {
            self.set_param(key, value.clone());
        }
        self
    }

    /// Value of a parameter.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_key_format() {
        assert_eq!(block_key(0), "block0");
        assert_eq!(block_key(11), "block11");
    }

    #[test]
    fn test_is_block_key() {
        assert!(is_block_key("block3"));
        assert!(is_block_key("cab0"));
        assert!(!is_block_key("inputA"));
        assert!(!is_block_key("outputA"));
        assert!(!is_block_key("split"));
    }

    #[test]
    fn test_identity_keys_refused() {
        let mut block = BlockEntry::new("HD2_AmpUSDeluxe", "Amp");
        assert!(!block.set_param("@path", json!(1)));
        assert!(!block.set_param("@model", json!("HD2_Other")));
        assert!(block.set_param("Drive", json!(0.4)));
        assert_eq!(block.model, "HD2_AmpUSDeluxe");
        assert_eq!(block.params.len(), 1);
    }

    #[test]
    fn test_with_params_skips_identity() {
        let defaults = json!({ "@path": 1, "@stereo": false, "Mix": 0.3 });
        let block = BlockEntry::new("HD2_ReverbHall", "Hall").with_params(defaults.as_object().unwrap());
        assert_eq!(block.param("@stereo"), Some(&json!(false)));
        assert_eq!(block.param("Mix"), Some(&json!(0.3)));
        assert!(block.param("@path").is_none());
        assert!(block.path.is_none());
    }

    #[test]
    fn test_path_splits_entries() {
        let path: DspPath = serde_json::from_value(json!({
            "inputA": { "@input": 1 },
            "outputA": { "@output": 2, "gain": 0 },
            "block0": { "@model": "HD2_DistScream808", "@enabled": false, "Gain": 0.3 },
            "cab0": { "@model": "HD2_Cab4x12Greenback25", "@mic": 3 },
            "join": { "@model": "HD2_AppDSPFlowJoin" }
        }))
        .unwrap();
        assert_eq!(path.blocks.len(), 2);
        assert_eq!(path.output_a.as_ref().unwrap().output, 2);
        assert!(path.extra.contains_key("inputA"));
        assert!(path.extra.contains_key("join"));
        assert!(!path.blocks["block0"].enabled);
    }

    #[test]
    fn test_set_output_creates_node() {
        let mut path = DspPath::default();
        path.set_output(OutputPort::MULTI);
        let value = serde_json::to_value(&path).unwrap();
        assert_eq!(value, json!({ "outputA": { "@output": 1 } }));
    }

    #[test]
    fn test_blocks_by_position() {
        let mut path = DspPath::default();
        for pos in [2u32, 0, 1] {
            let mut block = BlockEntry::new("HD2_Gate", format!("b{pos}"));
            block.position = Some(pos);
            path.blocks.insert(block_key(pos as usize), block);
        }
        let order: Vec<_> = path.blocks_by_position().iter().map(|(k, _)| *k).collect();
        assert_eq!(order, ["block0", "block1", "block2"]);
    }
}
