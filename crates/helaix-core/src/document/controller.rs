//! Per-path keyed maps: controller bindings, snapshot overrides, footswitches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PathIndex;

/// A map with one keyed container per DSP path (`dsp0`, `dsp1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMap<T> {
    /// Entries for path 0, keyed by block key.
    #[serde(default = "BTreeMap::new")]
    pub dsp0: BTreeMap<String, T>,
    /// Entries for path 1, keyed by block key.
    #[serde(default = "BTreeMap::new")]
    pub dsp1: BTreeMap<String, T>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Default for PathMap<T> {
    fn default() -> Self {
        Self {
            dsp0: BTreeMap::new(),
            dsp1: BTreeMap::new(),
            extra: Map::new(),
        }
    }
}

impl<T> PathMap<T> {
    /// Entries for one path.
    pub fn path(&self, path: PathIndex) -> &BTreeMap<String, T> {
        match path {
            PathIndex::Dsp0 => &self.dsp0,
            PathIndex::Dsp1 => &self.dsp1,
        }
    }

    /// Mutable entries for one path.
    pub fn path_mut(&mut self, path: PathIndex) -> &mut BTreeMap<String, T> {
        match path {
            PathIndex::Dsp0 => &mut self.dsp0,
            PathIndex::Dsp1 => &mut self.dsp1,
        }
    }

    /// Remove every entry on both paths. Pass-through keys are kept.
    pub fn clear(&mut self) {
        self.dsp0.clear();
        self.dsp1.clear();
    }

    /// True when neither path holds an entry.
    pub fn is_empty(&self) -> bool {
        self.dsp0.is_empty() && self.dsp1.is_empty()
    }
}

/// Controller container: per path, per block, per parameter.
///
/// Used both for the tone-level `controller` region (values are
/// [`ControllerBinding`]) and for each snapshot's `controllers` region
/// (values are [`ControllerValue`]). The optional `variax` entry holds
/// bindings for the global Variax input, keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerMap<C> {
    /// Path 0 block bindings.
    #[serde(default = "BTreeMap::new")]
    pub dsp0: BTreeMap<String, BTreeMap<String, C>>,
    /// Path 1 block bindings.
    #[serde(default = "BTreeMap::new")]
    pub dsp1: BTreeMap<String, BTreeMap<String, C>>,
    /// Variax input bindings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variax: Option<BTreeMap<String, C>>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<C> Default for ControllerMap<C> {
    fn default() -> Self {
        Self {
            dsp0: BTreeMap::new(),
            dsp1: BTreeMap::new(),
            variax: None,
            extra: Map::new(),
        }
    }
}

impl<C> ControllerMap<C> {
    /// Block bindings for one path.
    pub fn path(&self, path: PathIndex) -> &BTreeMap<String, BTreeMap<String, C>> {
        match path {
            PathIndex::Dsp0 => &self.dsp0,
            PathIndex::Dsp1 => &self.dsp1,
        }
    }

    /// Mutable block bindings for one path.
    pub fn path_mut(&mut self, path: PathIndex) -> &mut BTreeMap<String, BTreeMap<String, C>> {
        match path {
            PathIndex::Dsp0 => &mut self.dsp0,
            PathIndex::Dsp1 => &mut self.dsp1,
        }
    }

    /// Parameter bindings of one block, created empty if absent.
    pub fn block_mut(&mut self, path: PathIndex, block_key: &str) -> &mut BTreeMap<String, C> {
        self.path_mut(path).entry(block_key.to_string()).or_default()
    }

    /// Bind a parameter of a block, replacing any previous binding.
    pub fn bind(&mut self, path: PathIndex, block_key: &str, param: &str, controller: C) {
        self.block_mut(path, block_key)
            .insert(param.to_string(), controller);
    }

    /// Bind a Variax input field, creating the `variax` container if absent.
    pub fn bind_variax(&mut self, field: &str, controller: C) {
        self.variax
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), controller);
    }

    /// Remove all block bindings on both paths.
    pub fn clear(&mut self) {
        self.dsp0.clear();
        self.dsp1.clear();
    }

    /// Total number of parameter bindings across both paths.
    pub fn binding_count(&self) -> usize {
        self.dsp0
            .values()
            .chain(self.dsp1.values())
            .map(BTreeMap::len)
            .sum()
    }
}

/// A tone-level controller assignment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerBinding {
    /// Controller source (expression pedal index, snapshot, ...).
    #[serde(rename = "@controller", default)]
    pub controller: u32,
    /// Lower bound of the controlled range.
    #[serde(rename = "@min", default)]
    pub min: f64,
    /// Upper bound of the controlled range.
    #[serde(rename = "@max", default)]
    pub max: f64,
    /// Whether snapshot recall ignores this binding.
    #[serde(rename = "@snapshot_disable", default)]
    pub snapshot_disable: bool,
    /// Global block the binding targets, for input-stage bindings.
    #[serde(rename = "@globalblock", default, skip_serializing_if = "Option::is_none")]
    pub global_block: Option<String>,
    /// DSP index of the global block.
    #[serde(rename = "@globaldsp", default, skip_serializing_if = "Option::is_none")]
    pub global_dsp: Option<u32>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ControllerBinding {
    /// Snapshot controller source.
    pub const SNAPSHOT: u32 = 9;

    /// Snapshot-capable control of a global input field.
    pub const GLOBAL_SNAPSHOT: u32 = 19;

    /// A binding over the unit range `0.0..=1.0`.
    pub fn unit(controller: u32) -> Self {
        Self {
            controller,
            min: 0.0,
            max: 1.0,
            ..Self::default()
        }
    }

    /// A binding driven by snapshot recall.
    pub fn snapshot() -> Self {
        Self::unit(Self::SNAPSHOT)
    }

    /// Target a global input block.
    pub fn with_global_block(mut self, block: impl Into<String>, dsp: u32) -> Self {
        self.global_block = Some(block.into());
        self.global_dsp = Some(dsp);
        self
    }

    /// Set the controlled range.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// A snapshot's concrete value for a controlled parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerValue {
    /// Value recalled with the snapshot.
    #[serde(rename = "@value", default)]
    pub value: Value,
    /// Footswitch toggle state, written for input-stage values.
    #[serde(rename = "@fs_enabled", default, skip_serializing_if = "Option::is_none")]
    pub fs_enabled: Option<bool>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ControllerValue {
    /// A plain recalled value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the footswitch toggle state.
    pub fn with_fs_enabled(mut self, enabled: bool) -> Self {
        self.fs_enabled = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_binding_shape() {
        let value = serde_json::to_value(ControllerBinding::snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "@controller": 9,
                "@max": 1.0,
                "@min": 0.0,
                "@snapshot_disable": false
            })
        );
    }

    #[test]
    fn test_global_binding_shape() {
        let binding = ControllerBinding::unit(ControllerBinding::GLOBAL_SNAPSHOT)
            .with_range(0.0, 60.0)
            .with_global_block("inputA", 0);
        let value = serde_json::to_value(binding).unwrap();
        assert_eq!(value["@globalblock"], json!("inputA"));
        assert_eq!(value["@globaldsp"], json!(0));
        assert_eq!(value["@max"], json!(60.0));
    }

    #[test]
    fn test_controller_value_shape() {
        let plain = serde_json::to_value(ControllerValue::new(0.4)).unwrap();
        assert_eq!(plain, json!({ "@value": 0.4 }));

        let fs = serde_json::to_value(ControllerValue::new(15).with_fs_enabled(false)).unwrap();
        assert_eq!(fs, json!({ "@fs_enabled": false, "@value": 15 }));
    }

    #[test]
    fn test_bind_creates_block_container() {
        let mut map = ControllerMap::<ControllerBinding>::default();
        map.bind(PathIndex::Dsp1, "block2", "Drive", ControllerBinding::snapshot());
        map.bind(PathIndex::Dsp1, "block2", "Level", ControllerBinding::snapshot());
        assert!(map.dsp0.is_empty());
        assert_eq!(map.dsp1["block2"].len(), 2);
        assert_eq!(map.binding_count(), 2);
    }

    #[test]
    fn test_bind_variax_creates_container() {
        let mut map = ControllerMap::<ControllerValue>::default();
        assert!(map.variax.is_none());
        map.bind_variax("@variax_model", ControllerValue::new(10));
        assert_eq!(map.variax.as_ref().map(BTreeMap::len), Some(1));
    }

    #[test]
    fn test_clear_keeps_variax_and_extra() {
        let mut map: ControllerMap<ControllerBinding> =
            serde_json::from_value(json!({ "dsp0": { "block0": {} }, "dsp1": {}, "custom": 1 }))
                .unwrap();
        map.bind_variax("@variax_model", ControllerBinding::default());
        map.clear();
        assert!(map.dsp0.is_empty());
        assert!(map.variax.is_some());
        assert_eq!(map.extra["custom"], json!(1));
    }

    #[test]
    fn test_path_map_missing_paths_default_empty() {
        let map: PathMap<bool> = serde_json::from_value(json!({})).unwrap();
        assert!(map.is_empty());
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value, json!({ "dsp0": {}, "dsp1": {} }));
    }
}
