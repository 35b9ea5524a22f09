//! The `tone` region: paths, controllers, snapshots and global state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ControllerBinding, ControllerMap, ControllerValue, DspPath, PathMap, VariaxRegion};

/// Number of snapshot slots in every preset.
pub const SNAPSHOT_COUNT: usize = 8;

/// One of the two DSP paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PathIndex {
    /// First DSP (`dsp0`).
    #[default]
    Dsp0,
    /// Second DSP (`dsp1`).
    Dsp1,
}

impl PathIndex {
    /// Both paths in document order.
    pub const ALL: [PathIndex; 2] = [PathIndex::Dsp0, PathIndex::Dsp1];

    /// Path for a caller-supplied index. Anything other than `1` maps to path 0.
    pub fn from_index(index: i64) -> Self {
        if index == 1 { Self::Dsp1 } else { Self::Dsp0 }
    }

    /// Zero-based index.
    pub fn index(self) -> usize {
        match self {
            Self::Dsp0 => 0,
            Self::Dsp1 => 1,
        }
    }

    /// Document key (`"dsp0"` / `"dsp1"`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Dsp0 => "dsp0",
            Self::Dsp1 => "dsp1",
        }
    }
}

impl fmt::Display for PathIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The `data.tone` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tone {
    /// First DSP path.
    #[serde(default)]
    pub dsp0: DspPath,
    /// Second DSP path.
    #[serde(default)]
    pub dsp1: DspPath,
    /// Tone-level controller assignments.
    #[serde(default)]
    pub controller: ControllerMap<ControllerBinding>,
    /// Footswitch assignments.
    #[serde(default)]
    pub footswitch: PathMap<Value>,
    /// Snapshot slot 1.
    #[serde(default)]
    pub snapshot0: SnapshotSlot,
    /// Snapshot slot 2.
    #[serde(default)]
    pub snapshot1: SnapshotSlot,
    /// Snapshot slot 3.
    #[serde(default)]
    pub snapshot2: SnapshotSlot,
    /// Snapshot slot 4.
    #[serde(default)]
    pub snapshot3: SnapshotSlot,
    /// Snapshot slot 5.
    #[serde(default)]
    pub snapshot4: SnapshotSlot,
    /// Snapshot slot 6.
    #[serde(default)]
    pub snapshot5: SnapshotSlot,
    /// Snapshot slot 7.
    #[serde(default)]
    pub snapshot6: SnapshotSlot,
    /// Snapshot slot 8.
    #[serde(default)]
    pub snapshot7: SnapshotSlot,
    /// Variax input region. Always present in a valid document.
    #[serde(default)]
    pub variax: VariaxRegion,
    /// Editor cursor and global settings.
    #[serde(default)]
    pub global: GlobalRegion,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tone {
    /// A DSP path.
    pub fn path(&self, path: PathIndex) -> &DspPath {
        match path {
            PathIndex::Dsp0 => &self.dsp0,
            PathIndex::Dsp1 => &self.dsp1,
        }
    }

    /// Mutable access to a DSP path.
    pub fn path_mut(&mut self, path: PathIndex) -> &mut DspPath {
        match path {
            PathIndex::Dsp0 => &mut self.dsp0,
            PathIndex::Dsp1 => &mut self.dsp1,
        }
    }

    /// All snapshot slots in order.
    pub fn snapshots(&self) -> [&SnapshotSlot; SNAPSHOT_COUNT] {
        [
            &self.snapshot0,
            &self.snapshot1,
            &self.snapshot2,
            &self.snapshot3,
            &self.snapshot4,
            &self.snapshot5,
            &self.snapshot6,
            &self.snapshot7,
        ]
    }

    /// All snapshot slots in order, mutably.
    pub fn snapshots_mut(&mut self) -> [&mut SnapshotSlot; SNAPSHOT_COUNT] {
        [
            &mut self.snapshot0,
            &mut self.snapshot1,
            &mut self.snapshot2,
            &mut self.snapshot3,
            &mut self.snapshot4,
            &mut self.snapshot5,
            &mut self.snapshot6,
            &mut self.snapshot7,
        ]
    }

    /// Snapshot slot by index, `None` past the last slot.
    pub fn snapshot(&self, index: usize) -> Option<&SnapshotSlot> {
        self.snapshots().get(index).copied()
    }

    /// Mutable snapshot slot by index, `None` past the last slot.
    pub fn snapshot_mut(&mut self, index: usize) -> Option<&mut SnapshotSlot> {
        self.snapshots_mut().into_iter().nth(index)
    }
}

/// One snapshot slot (`snapshot0`..`snapshot7`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapshotSlot {
    /// Display name.
    #[serde(rename = "@name", default)]
    pub name: String,
    /// Whether `name` was set by the user rather than the editor default.
    #[serde(rename = "@custom_name", default)]
    pub custom_name: bool,
    /// Block enable state per path.
    #[serde(default)]
    pub blocks: PathMap<bool>,
    /// Parameter values recalled with this snapshot.
    #[serde(default)]
    pub controllers: ControllerMap<ControllerValue>,
    /// Keys not modelled above (`@tempo`, `@valid`, `@ledcolor`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SnapshotSlot {
    /// Give the slot a user-visible name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.custom_name = true;
    }

    /// Enable state of a block, `None` if the slot does not mention it.
    pub fn is_enabled(&self, path: PathIndex, block_key: &str) -> Option<bool> {
        self.blocks.path(path).get(block_key).copied()
    }

    /// Clear enable state and controller values on both paths.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.controllers.clear();
    }
}

/// The `data.tone.global` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRegion {
    /// DSP the editor cursor is on.
    #[serde(rename = "@cursor_dsp", default)]
    pub cursor_dsp: u32,
    /// Node group the editor cursor is on.
    #[serde(rename = "@cursor_group", default = "default_cursor_group")]
    pub cursor_group: String,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_cursor_group() -> String {
    GlobalRegion::INPUT_A.to_string()
}

impl GlobalRegion {
    /// Input group A of the first path.
    pub const INPUT_A: &'static str = "inputA";
}

impl Default for GlobalRegion {
    fn default() -> Self {
        Self {
            cursor_dsp: 0,
            cursor_group: default_cursor_group(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_index_coercion() {
        assert_eq!(PathIndex::from_index(0), PathIndex::Dsp0);
        assert_eq!(PathIndex::from_index(1), PathIndex::Dsp1);
        assert_eq!(PathIndex::from_index(2), PathIndex::Dsp0);
        assert_eq!(PathIndex::from_index(-1), PathIndex::Dsp0);
    }

    #[test]
    fn test_path_index_keys() {
        assert_eq!(PathIndex::Dsp0.key(), "dsp0");
        assert_eq!(PathIndex::Dsp1.to_string(), "dsp1");
        assert_eq!(PathIndex::Dsp1.index(), 1);
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut tone = Tone::default();
        tone.snapshot_mut(3).unwrap().rename("Lead");
        assert_eq!(tone.snapshot3.name, "Lead");
        assert!(tone.snapshot(3).unwrap().custom_name);
        assert!(tone.snapshot(SNAPSHOT_COUNT).is_none());
        assert!(tone.snapshot_mut(SNAPSHOT_COUNT).is_none());
    }

    #[test]
    fn test_snapshot_keys_serialized() {
        let value = serde_json::to_value(Tone::default()).unwrap();
        for i in 0..SNAPSHOT_COUNT {
            let slot = &value[format!("snapshot{i}")];
            assert_eq!(slot["blocks"], json!({ "dsp0": {}, "dsp1": {} }));
            assert_eq!(slot["controllers"], json!({ "dsp0": {}, "dsp1": {} }));
        }
    }

    #[test]
    fn test_slot_reset_keeps_pass_through() {
        let mut slot: SnapshotSlot = serde_json::from_value(json!({
            "@name": "SNAPSHOT 1",
            "@tempo": 120,
            "blocks": { "dsp0": { "block0": true } },
            "controllers": { "dsp0": { "block0": { "Drive": { "@value": 0.2 } } } }
        }))
        .unwrap();
        assert_eq!(slot.is_enabled(PathIndex::Dsp0, "block0"), Some(true));
        slot.reset();
        assert!(slot.blocks.is_empty());
        assert_eq!(slot.controllers.binding_count(), 0);
        assert_eq!(slot.extra["@tempo"], json!(120));
    }

    #[test]
    fn test_global_defaults() {
        let global: GlobalRegion = serde_json::from_value(json!({ "@tempo": 120 })).unwrap();
        assert_eq!(global.cursor_dsp, 0);
        assert_eq!(global.cursor_group, "inputA");
    }
}
