//! The preset compiler.
//!
//! Turns a [`RigDescription`] and its resolved blocks into a complete
//! [`PresetDocument`]:
//!
//! 1. load a fresh template
//! 2. place each block on its path at the next free position, with catalog
//!    defaults merged with sanitized overrides
//! 3. write the snapshot enable matrix and snapshot-controlled parameters
//! 4. bind the default expression pedal to pedal-type blocks
//! 5. apply or reset the Variax input
//! 6. write device, cost table, output routing and cursor defaults
//!
//! Blocks whose model is not in the catalog are dropped with a warning.
//! The only hard failure is an unusable template.
//!
//! The compiler borrows its tables and holds no mutable state, so one
//! compiler can serve concurrent compiles.

use std::collections::{BTreeMap, BTreeSet};

use helaix_catalog::{Catalog, CatalogEntry};
use helaix_core::{
    BlockEntry, ControllerBinding, ControllerValue, GlobalRegion, OutputPort, PathIndex,
    PresetDocument, SNAPSHOT_COUNT, block_key, sanitize,
};
use helaix_variax::{VariaxConfig, reset_variax};
use serde_json::Value;

use crate::aliases::ParamAliases;
use crate::budget::DspBudget;
use crate::hardware::HardwareProfile;
use crate::rig::{RigDescription, ResolvedBlock};
use crate::template::{TemplateSource, load_template};
use crate::PresetError;

/// Parameter an expression pedal drives on pedal-type blocks.
pub const PEDAL_PARAM: &str = "Pedal";

/// Per-compile settings supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Preset display name.
    pub preset_name: String,
    /// Target unit, e.g. "Helix Floor".
    pub hardware: String,
    /// Expression pedal bound to wah, volume and whammy blocks; 0 for none.
    pub default_expression_pedal: u32,
    /// Apply the Variax input even if the rig names no instrument.
    pub variax_enabled: bool,
    /// Variax hardware model, e.g. "Standard" or "Shuriken".
    pub variax_hardware: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            preset_name: "New Preset".to_string(),
            hardware: "Helix Floor".to_string(),
            default_expression_pedal: 1,
            variax_enabled: false,
            variax_hardware: "Standard".to_string(),
        }
    }
}

impl CompileOptions {
    /// Defaults with the given preset name.
    pub fn new(preset_name: impl Into<String>) -> Self {
        Self {
            preset_name: preset_name.into(),
            ..Self::default()
        }
    }

    /// Set the target unit.
    pub fn with_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = hardware.into();
        self
    }

    /// Set the default expression pedal; 0 disables pedal binding.
    pub fn with_expression_pedal(mut self, pedal: u32) -> Self {
        self.default_expression_pedal = pedal;
        self
    }

    /// Force the Variax input on for the given Variax hardware model.
    pub fn with_variax(mut self, variax_hardware: impl Into<String>) -> Self {
        self.variax_enabled = true;
        self.variax_hardware = variax_hardware.into();
        self
    }
}

/// Compiles rigs into preset documents.
#[derive(Debug, Clone)]
pub struct PresetCompiler<'a> {
    catalog: &'a Catalog,
    variax: &'a VariaxConfig,
    aliases: &'a ParamAliases,
    template: TemplateSource,
}

impl<'a> PresetCompiler<'a> {
    /// A compiler over the given tables, using the embedded template.
    pub fn new(catalog: &'a Catalog, variax: &'a VariaxConfig, aliases: &'a ParamAliases) -> Self {
        Self {
            catalog,
            variax,
            aliases,
            template: TemplateSource::Embedded,
        }
    }

    /// Use a different baseline template.
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    /// The model catalog in use.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Compile a rig and its resolved blocks into a preset.
    pub fn compile(
        &self,
        rig: &RigDescription,
        blocks: &[ResolvedBlock],
        options: &CompileOptions,
    ) -> Result<PresetDocument, PresetError> {
        let hardware = HardwareProfile::detect(&options.hardware);
        let mut rig = rig.clone();
        rig.sync_variax_fields();

        let mut doc = load_template(&self.template, &options.preset_name)?;

        if rig.snapshots.len() > SNAPSHOT_COUNT {
            tracing::warn!(
                snapshots = rig.snapshots.len(),
                "only the first {SNAPSHOT_COUNT} snapshots are used"
            );
        }
        for (slot, snapshot) in doc.tone_mut().snapshots_mut().into_iter().zip(&rig.snapshots) {
            slot.rename(snapshot.name.clone());
        }

        let mut counters = [0usize; 2];
        for block in blocks {
            if block.is_variax_placeholder() {
                tracing::debug!(block = %block.name, "Variax placeholder skipped");
                continue;
            }
            let Some(entry) = self.catalog.resolve(&block.model_name) else {
                tracing::warn!(
                    block = %block.name,
                    model = %block.model_name,
                    "model not in catalog, block dropped"
                );
                continue;
            };

            let path = block.target_path(hardware.is_dual_path());
            let position = counters[path.index()];
            counters[path.index()] += 1;

            self.place(&mut doc, &rig, block, entry, path, position, options);
        }

        if options.variax_enabled || rig.wants_variax() {
            self.variax
                .apply(&mut doc, &rig.variax_request(), &options.variax_hardware);
        } else {
            reset_variax(&mut doc);
        }

        self.apply_globals(&mut doc, hardware, counters[PathIndex::Dsp1.index()] > 0);

        for usage in DspBudget::from_document(&doc).over_capacity() {
            tracing::warn!(
                path = %usage.path,
                cost = usage.cost,
                blocks = usage.blocks,
                "DSP path over capacity"
            );
        }
        tracing::debug!(
            name = %options.preset_name,
            dsp0 = counters[0],
            dsp1 = counters[1],
            "preset compiled"
        );

        Ok(doc)
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &self,
        doc: &mut PresetDocument,
        rig: &RigDescription,
        block: &ResolvedBlock,
        entry: &CatalogEntry,
        path: PathIndex,
        position: usize,
        options: &CompileOptions,
    ) {
        let key = block_key(position);
        let mut placed = self.build_block(entry, block, position);
        let tone = doc.tone_mut();

        if options.default_expression_pedal > 0 && entry.family().accepts_expression_pedal() {
            tone.controller.bind(
                path,
                &key,
                PEDAL_PARAM,
                ControllerBinding::unit(options.default_expression_pedal),
            );
        }

        if rig.snapshots.is_empty() {
            for slot in tone.snapshots_mut() {
                slot.blocks.path_mut(path).insert(key.clone(), true);
            }
            tracing::debug!(block = %block.name, model = %entry.internal_name, %path, position, "block placed");
            tone.path_mut(path).blocks.insert(key, placed);
            return;
        }

        let enabled = enable_states(rig, block);
        placed.enabled = enabled[0];

        let overrides = self.snapshot_overrides(rig, block, entry);
        let controlled: BTreeSet<&str> = overrides
            .iter()
            .flatten()
            .filter(|(k, v)| !placed.param(k).is_some_and(|base| same_value(base, v)))
            .map(|(k, _)| k.as_str())
            .collect();

        for param in &controlled {
            tone.controller
                .bind(path, &key, param, ControllerBinding::snapshot());
        }
        for (idx, slot) in tone.snapshots_mut().into_iter().enumerate() {
            slot.blocks.path_mut(path).insert(key.clone(), enabled[idx]);
            let Some(values) = overrides.get(idx) else {
                continue;
            };
            for (param, value) in values {
                if controlled.contains(param.as_str()) {
                    slot.controllers
                        .bind(path, &key, param, ControllerValue::new(value.clone()));
                }
            }
        }

        tracing::debug!(
            block = %block.name,
            model = %entry.internal_name,
            %path,
            position,
            controlled = controlled.len(),
            "block placed"
        );
        tone.path_mut(path).blocks.insert(key, placed);
    }

    /// Catalog defaults merged with the block's sanitized overrides.
    fn build_block(&self, entry: &CatalogEntry, block: &ResolvedBlock, position: usize) -> BlockEntry {
        let id = entry.internal_name.as_str();
        let defaults = entry.defaults();
        let mut placed = BlockEntry::new(id, block.name.clone()).with_params(defaults);
        placed.position = Some(position as u32);
        placed.block_type = Some(entry.family().type_tag());

        for (name, value) in &block.params {
            let key = self.aliases.resolve_key(defaults, name);
            if !placed.set_param(&key, sanitize(id, &key, value)) {
                tracing::debug!(block = %block.name, key, "identity override ignored");
            }
        }

        // Split lanes are not generated; every block sits on lane A.
        placed.path = Some(0);
        placed
    }

    /// Per snapshot, the block's overrides keyed by resolved parameter key
    /// with sanitized values.
    fn snapshot_overrides(
        &self,
        rig: &RigDescription,
        block: &ResolvedBlock,
        entry: &CatalogEntry,
    ) -> Vec<BTreeMap<String, Value>> {
        let id = entry.internal_name.as_str();
        rig.snapshots
            .iter()
            .map(|snapshot| {
                let Some(params) = snapshot.overrides_for(&block.name) else {
                    return BTreeMap::new();
                };
                params
                    .iter()
                    .filter_map(|(name, value)| {
                        let key = self.aliases.resolve_key(entry.defaults(), name);
                        if BlockEntry::is_identity_key(&key) {
                            return None;
                        }
                        let value = sanitize(id, &key, value);
                        Some((key, value))
                    })
                    .collect()
            })
            .collect()
    }

    fn apply_globals(&self, doc: &mut PresetDocument, hardware: HardwareProfile, path2_used: bool) {
        doc.data.device = Some(hardware.device_code());
        doc.data.schema = Some(0);
        doc.data.meta.dsp_map = Some(self.catalog.dsp_cost_map());

        let tone = doc.tone_mut();
        tone.dsp0.set_output(OutputPort::MULTI);
        tone.dsp1.set_output(OutputPort::MULTI);
        if hardware.is_dual_path() && path2_used {
            tone.dsp0.set_output(OutputPort::PATH_2);
        }

        tone.global.cursor_dsp = 0;
        tone.global.cursor_group = GlobalRegion::INPUT_A.to_string();
    }
}

/// Enable state of a block in each slot.
///
/// A block no snapshot activates is enabled in the first slot so every
/// placed block is reachable.
fn enable_states(rig: &RigDescription, block: &ResolvedBlock) -> [bool; SNAPSHOT_COUNT] {
    let mut states = [false; SNAPSHOT_COUNT];
    for (state, snapshot) in states.iter_mut().zip(&rig.snapshots) {
        *state = snapshot.activates(&block.name, &block.model_name);
    }
    if !states.contains(&true) {
        states[0] = true;
    }
    states
}

// Numbers compare by value so 1 and 1.0 are the same setting.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::Snapshot;
    use serde_json::json;

    fn compile(rig: &RigDescription, blocks: &[ResolvedBlock], options: &CompileOptions) -> PresetDocument {
        let catalog = Catalog::builtin().unwrap();
        let aliases = ParamAliases::default();
        PresetCompiler::new(catalog, VariaxConfig::builtin(), &aliases)
            .compile(rig, blocks, options)
            .unwrap()
    }

    fn snapshot(name: &str, active: &[&str]) -> Snapshot {
        Snapshot {
            name: name.to_string(),
            active_blocks: active.iter().map(|s| (*s).to_string()).collect(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_block_built_from_defaults() {
        let blocks = [ResolvedBlock::new("Drive", "Scream 808").with_param("gain", 7)];
        let doc = compile(&RigDescription::default(), &blocks, &CompileOptions::new("T"));
        let block = &doc.tone().dsp0.blocks["block0"];
        assert_eq!(block.model, "HD2_DistScream808");
        assert_eq!(block.name.as_deref(), Some("Drive"));
        assert_eq!(block.position, Some(0));
        assert_eq!(block.path, Some(0));
        assert_eq!(block.block_type, Some(0));
        assert!(block.enabled);
        assert_eq!(block.param("Gain"), Some(&json!(0.7)));
        assert!(block.param("Tone").is_some());
        assert!(block.param("gain").is_none());
    }

    #[test]
    fn test_identity_overrides_ignored() {
        let blocks = [ResolvedBlock::new("Amp", "US Deluxe Nrm")
            .with_param("@path", 1)
            .with_param("@model", "HD2_Other")
            .with_param("@position", 9)];
        let doc = compile(&RigDescription::default(), &blocks, &CompileOptions::new("T"));
        let block = &doc.tone().dsp0.blocks["block0"];
        assert_eq!(block.path, Some(0));
        assert_eq!(block.model, "HD2_AmpUSDeluxeNrm");
        assert_eq!(block.position, Some(0));
        assert_eq!(block.block_type, Some(1));
    }

    #[test]
    fn test_resolve_by_internal_id() {
        let blocks = [ResolvedBlock::new("Verb", "HD2_ReverbPlate")];
        let doc = compile(&RigDescription::default(), &blocks, &CompileOptions::new("T"));
        assert_eq!(doc.tone().dsp0.blocks["block0"].model, "HD2_ReverbPlate");
        assert_eq!(doc.tone().dsp0.blocks["block0"].block_type, Some(7));
    }

    #[test]
    fn test_enable_states_force_first_slot() {
        let rig = RigDescription {
            snapshots: vec![snapshot("Clean", &["Amp"]), snapshot("Lead", &["Amp", "Drive"])],
            ..RigDescription::default()
        };
        let drive = ResolvedBlock::new("Drive", "Scream 808");
        let delay = ResolvedBlock::new("Echo", "Simple Delay");
        let drive_states = enable_states(&rig, &drive);
        assert_eq!(drive_states[..3], [false, true, false]);
        let delay_states = enable_states(&rig, &delay);
        assert_eq!(delay_states[..3], [true, false, false]);
    }

    #[test]
    fn test_enable_states_ignore_snapshots_past_last_slot() {
        let mut snapshots: Vec<Snapshot> = (0..SNAPSHOT_COUNT)
            .map(|i| snapshot(&format!("S{i}"), &["Amp"]))
            .collect();
        snapshots.push(snapshot("Overflow", &["Echo"]));
        let rig = RigDescription {
            snapshots,
            ..RigDescription::default()
        };
        let states = enable_states(&rig, &ResolvedBlock::new("Echo", "Simple Delay"));
        assert!(states[0]);
        assert_eq!(states.iter().filter(|&&on| on).count(), 1);
    }

    #[test]
    fn test_pedal_binding() {
        let blocks = [
            ResolvedBlock::new("Wah", "Teardrop 310"),
            ResolvedBlock::new("Amp", "US Deluxe Nrm"),
        ];
        let doc = compile(
            &RigDescription::default(),
            &blocks,
            &CompileOptions::new("T").with_expression_pedal(2),
        );
        let binding = &doc.tone().controller.dsp0["block0"][PEDAL_PARAM];
        assert_eq!(binding.controller, 2);
        assert_eq!(binding.min, 0.0);
        assert_eq!(binding.max, 1.0);
        assert!(!doc.tone().controller.dsp0.contains_key("block1"));

        let none = compile(
            &RigDescription::default(),
            &blocks,
            &CompileOptions::new("T").with_expression_pedal(0),
        );
        assert_eq!(none.tone().controller.binding_count(), 0);
    }

    #[test]
    fn test_same_value_numeric() {
        assert!(same_value(&json!(1), &json!(1.0)));
        assert!(!same_value(&json!(0.5), &json!(0.6)));
        assert!(same_value(&json!("a"), &json!("a")));
        assert!(!same_value(&json!(true), &json!(1)));
    }

    #[test]
    fn test_globals() {
        let doc = compile(&RigDescription::default(), &[], &CompileOptions::new("T").with_hardware("HX Stomp"));
        assert_eq!(doc.data.device, Some(6));
        assert_eq!(doc.data.schema, Some(0));
        assert!(doc.data.meta.dsp_map.as_ref().is_some_and(|m| m.contains_key("HD2_ReverbHall")));
        assert_eq!(doc.tone().dsp0.output_a.as_ref().map(|o| o.output), Some(OutputPort::MULTI));
        assert_eq!(doc.tone().global.cursor_group, "inputA");
        assert_eq!(doc.tone().global.cursor_dsp, 0);
    }

    #[test]
    fn test_options_builders() {
        let options = CompileOptions::new("Lead")
            .with_hardware("Helix LT")
            .with_expression_pedal(3)
            .with_variax("Shuriken");
        assert_eq!(options.preset_name, "Lead");
        assert_eq!(options.hardware, "Helix LT");
        assert_eq!(options.default_expression_pedal, 3);
        assert!(options.variax_enabled);
        assert_eq!(options.variax_hardware, "Shuriken");
    }
}
