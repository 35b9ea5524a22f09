//! Writing resolved Variax settings into a preset document.

use helaix_core::{ControllerBinding, ControllerValue, GlobalRegion, PresetDocument, VariaxRegion};
use serde_json::{Map, Value};

use crate::VariaxConfig;
use crate::resolve::is_unset;

/// Controller field for the modelled instrument.
pub const MODEL_FIELD: &str = "@variax_model";

/// Highest model code the global controller can select.
pub const MODEL_CODE_MAX: f64 = 60.0;

/// Instrument settings requested by a rig.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariaxRequest<'a> {
    /// Instrument for the whole preset.
    pub guitar_model: &'a str,
    /// Tuning for the whole preset.
    pub tuning: &'a str,
    /// Per-snapshot settings, in snapshot order.
    pub snapshots: Vec<SnapshotRequest<'a>>,
}

/// Instrument settings of one rig snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotRequest<'a> {
    /// Explicit instrument for the snapshot.
    pub guitar_model: &'a str,
    /// Per-block parameter overrides of the snapshot, keyed by block name.
    pub params: Option<&'a Map<String, Value>>,
}

impl SnapshotRequest<'_> {
    /// Instrument text of the snapshot.
    ///
    /// The explicit field wins. Otherwise the first parameter block whose name
    /// contains "variax" (in key order) supplies its `Model` string, else its
    /// `Settings` string.
    pub fn instrument_text(&self) -> &str {
        if !is_unset(self.guitar_model) {
            return self.guitar_model;
        }
        let Some(params) = self.params else {
            return "";
        };
        params
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains("variax"))
            .find_map(|(_, block)| {
                let block = block.as_object()?;
                block
                    .get("Model")
                    .and_then(Value::as_str)
                    .or_else(|| block.get("Settings").and_then(Value::as_str))
            })
            .unwrap_or("")
    }
}

/// What [`VariaxConfig::apply`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariaxOutcome {
    /// Global model code, `None` when the instrument text did not resolve.
    pub model_code: Option<i32>,
    /// Global tuning offsets (low string first), `None` for standard.
    pub tuning: Option<[i32; 6]>,
    /// Per-slot model codes written to snapshot controllers.
    pub snapshot_codes: Vec<Option<i32>>,
}

impl VariaxConfig {
    /// Write the requested instrument and tuning into `doc`.
    ///
    /// Sets the global Variax region, tags `meta.variax_type`, and registers
    /// the snapshot-capable model controller. When the request carries
    /// snapshots, every slot gets a model value: the snapshot's own
    /// instrument if it resolves, else the global code.
    pub fn apply(
        &self,
        doc: &mut PresetDocument,
        request: &VariaxRequest<'_>,
        hardware: &str,
    ) -> VariaxOutcome {
        let model_code = self.resolve_model(request.guitar_model, hardware);
        let tuning = self.resolve_tuning(request.tuning, hardware);

        if model_code.is_none() && !is_unset(request.guitar_model) {
            tracing::warn!(instrument = request.guitar_model, hardware, "unmapped Variax instrument");
        }

        let region = &mut doc.tone_mut().variax;
        if let Some(code) = model_code {
            region.model_code = code;
        }
        region.magnetic_mode = true;
        match tuning {
            Some(offsets) => region.set_tuning(offsets),
            None => region.custom_tuning = false,
        }

        doc.data.meta.variax_type = Some(variax_type(hardware).to_string());

        doc.tone_mut().controller.bind_variax(
            MODEL_FIELD,
            ControllerBinding::unit(ControllerBinding::GLOBAL_SNAPSHOT)
                .with_range(0.0, MODEL_CODE_MAX)
                .with_global_block(GlobalRegion::INPUT_A, 0),
        );

        let mut snapshot_codes = Vec::new();
        if !request.snapshots.is_empty() {
            for (idx, slot) in doc.tone_mut().snapshots_mut().into_iter().enumerate() {
                let text = request
                    .snapshots
                    .get(idx)
                    .map_or("", |s| s.instrument_text());
                let code = if is_unset(text) {
                    model_code
                } else {
                    self.resolve_model(text, hardware).or(model_code)
                };
                if let Some(code) = code {
                    slot.controllers
                        .bind_variax(MODEL_FIELD, ControllerValue::new(code).with_fs_enabled(false));
                }
                snapshot_codes.push(code);
            }
        }

        tracing::debug!(?model_code, ?tuning, hardware, "Variax applied");

        VariaxOutcome {
            model_code,
            tuning,
            snapshot_codes,
        }
    }
}

/// Reset the Variax region to the neutral input.
///
/// The region is required by the format, so it is replaced rather than removed.
pub fn reset_variax(doc: &mut PresetDocument) {
    doc.tone_mut().variax = VariaxRegion::neutral();
}

/// Variax family tag for `meta.variax_type`.
pub fn variax_type(hardware: &str) -> &'static str {
    if hardware.to_lowercase().contains("shuriken") {
        "shuriken"
    } else {
        "jtv"
    }
}
