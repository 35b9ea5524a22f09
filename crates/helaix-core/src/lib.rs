//! Core types for the HelAIx preset compiler.
//!
//! This crate holds the pieces every other HelAIx crate agrees on:
//!
//! - **Document model**: a typed tree for the `.hlx` preset format with named
//!   regions for DSP paths, controllers, snapshots, the Variax input and
//!   global cursor state. Keys the model does not know about are carried
//!   through untouched, so a template round-trips byte-compatible.
//! - **Model families**: prefix classification of internal model identifiers
//!   (`HD2_Amp...`, `HD2_Delay...`) into the families the compiler cares about.
//! - **Parameter sanitizing**: the pure value-normalization and safety-cap rules
//!   applied to every parameter before it is written to a document.
//!
//! # Example
//!
//! ```rust
//! use helaix_core::{BlockEntry, PathIndex, PresetDocument, block_key, sanitize};
//! use serde_json::json;
//!
//! let mut doc = PresetDocument::default();
//! let mut block = BlockEntry::new("HD2_DelaySimpleDelay", "Delay");
//! block.set_param("Feedback", sanitize("HD2_DelaySimpleDelay", "Feedback", &json!(0.9)));
//! doc.tone_mut().path_mut(PathIndex::Dsp0).blocks.insert(block_key(0), block);
//!
//! let text = doc.to_json_pretty().unwrap();
//! assert!(text.contains("\"Feedback\": 0.75"));
//! ```

pub mod document;
pub mod family;
pub mod sanitize;

mod error;

pub use document::{
    BlockEntry, ControllerBinding, ControllerMap, ControllerValue, DspPath, GlobalRegion,
    OutputPort, PathIndex, PathMap, PresetData, PresetDocument, PresetMeta, SNAPSHOT_COUNT,
    SnapshotSlot, Tone, VariaxRegion, block_key,
};
pub use error::DocumentError;
pub use family::ModelFamily;
pub use sanitize::sanitize;
