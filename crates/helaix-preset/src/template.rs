//! Baseline preset template.
//!
//! Every compile starts from a template document with the routing nodes,
//! snapshot slots, global state and file-level metadata the hardware
//! editor expects. Block positions are regenerated from scratch on each
//! compile, so any placed blocks and all controller, footswitch and
//! snapshot state a template carries are removed before use.

use std::borrow::Cow;
use std::path::PathBuf;

use helaix_core::PresetDocument;
use serde_json::Value;

use crate::PresetError;

/// Template compiled into the crate.
pub const EMBEDDED_TEMPLATE_JSON: &str = include_str!("../data/template.json");

/// Where the baseline document comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template embedded in this crate.
    #[default]
    Embedded,
    /// An `.hlx` file exported from the editor.
    File(PathBuf),
}

impl TemplateSource {
    /// A file source if `path` is set, else the embedded template.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(TemplateSource::Embedded, TemplateSource::File)
    }

    fn read(&self) -> Result<Cow<'static, str>, PresetError> {
        match self {
            TemplateSource::Embedded => Ok(Cow::Borrowed(EMBEDDED_TEMPLATE_JSON)),
            TemplateSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| PresetError::template(format!("{}: {e}", path.display()))),
        }
    }
}

/// Load a fresh template named `name`, with all stale state removed.
pub fn load_template(source: &TemplateSource, name: &str) -> Result<PresetDocument, PresetError> {
    let text = source.read()?;
    let value: Value = serde_json::from_str(&text).map_err(PresetError::template)?;
    if !value.get("data").is_some_and(Value::is_object) {
        return Err(PresetError::template("document has no data region"));
    }
    let mut doc: PresetDocument = serde_json::from_value(value).map_err(PresetError::template)?;
    reset_template(&mut doc, name);
    Ok(doc)
}

/// Name the document and clear placed blocks plus every controller,
/// footswitch and snapshot map on both paths.
pub fn reset_template(doc: &mut PresetDocument, name: &str) {
    doc.data.meta.name = name.to_string();

    let tone = doc.tone_mut();
    tone.dsp0.clear_blocks();
    tone.dsp1.clear_blocks();
    tone.controller.clear();
    tone.controller.variax = None;
    tone.footswitch.clear();
    for slot in tone.snapshots_mut() {
        slot.reset();
        slot.controllers.variax = None;
    }
}
