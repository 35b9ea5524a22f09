//! Helix preset compilation.
//!
//! Takes the two outputs of the design stage, an abstract [`RigDescription`]
//! and the concrete [`BlockMapping`] of blocks to catalog models, and
//! produces a `.hlx` [`PresetDocument`](helaix_core::PresetDocument) ready
//! for the hardware editor.
//!
//! - [`compiler`]: placement, parameter merge, snapshots, pedal and Variax
//!   wiring, global defaults
//! - [`template`]: the baseline document every compile starts from
//! - [`aliases`]: parameter-name aliases between model families
//! - [`hardware`]: path and device detection from the target unit name
//! - [`budget`]: per-path DSP usage of a compiled preset
//! - [`settings`] and [`paths`]: user configuration on disk
//! - [`export`]: writing `.hlx` files
//!
//! # Example
//!
//! ```rust
//! use helaix_catalog::Catalog;
//! use helaix_preset::{CompileOptions, ParamAliases, PresetCompiler, ResolvedBlock, RigDescription};
//! use helaix_variax::VariaxConfig;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let aliases = ParamAliases::default();
//! let compiler = PresetCompiler::new(catalog, VariaxConfig::builtin(), &aliases);
//!
//! let blocks = [
//!     ResolvedBlock::new("Drive", "Scream 808").with_param("Gain", 4.5),
//!     ResolvedBlock::new("Amp", "Brit Plexi Brt"),
//!     ResolvedBlock::new("Verb", "Hall").with_path(1),
//! ];
//! let doc = compiler
//!     .compile(&RigDescription::default(), &blocks, &CompileOptions::new("Plexi Night"))
//!     .unwrap();
//!
//! assert_eq!(doc.name(), "Plexi Night");
//! assert_eq!(doc.tone().dsp0.blocks.len(), 2);
//! assert_eq!(doc.tone().dsp1.blocks["block0"].model, "HD2_ReverbHall");
//! ```

pub mod aliases;
pub mod budget;
pub mod compiler;
pub mod export;
pub mod hardware;
pub mod paths;
pub mod rig;
pub mod settings;
pub mod template;

mod error;

pub use aliases::ParamAliases;
pub use budget::{DspBudget, PathUsage};
pub use compiler::{CompileOptions, PresetCompiler};
pub use error::PresetError;
pub use export::save_preset;
pub use hardware::HardwareProfile;
pub use rig::{BlockMapping, ResolvedBlock, RigComponent, RigDescription, Snapshot};
pub use settings::Settings;
pub use template::{TemplateSource, load_template};
