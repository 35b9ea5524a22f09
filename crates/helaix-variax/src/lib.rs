//! Variax instrument and tuning resolution.
//!
//! A Variax guitar models other instruments and alternate tunings on
//! command from the Helix. Rigs describe both in free text ("Stratocaster,
//! bridge pickup", "Drop D"); this crate turns that text into the numeric
//! model code and per-string offsets the preset format stores.
//!
//! Resolution is table driven. A [`VariaxConfig`] holds, per hardware
//! family, the model banks, text aliases that select a bank, the pickup
//! variant numbering policy, and named tunings. Anything the tables miss
//! falls back to a fixed keyword heuristic; nothing here ever fails a
//! compile.
//!
//! # Example
//!
//! ```rust
//! use helaix_variax::VariaxConfig;
//!
//! let config = VariaxConfig::builtin();
//! assert_eq!(config.resolve_model("Stratocaster", "Helix Floor"), Some(15));
//! assert_eq!(config.resolve_model("Acoustic", "Helix Floor"), Some(50));
//! assert_eq!(config.resolve_tuning("Drop D", "Helix Floor"), Some([-2, 0, 0, 0, 0, 0]));
//! assert_eq!(config.resolve_tuning("Standard", "Helix Floor"), None);
//! ```

mod apply;
mod config;
mod error;
mod resolve;

pub use apply::{
    MODEL_CODE_MAX, MODEL_FIELD, SnapshotRequest, VariaxOutcome, VariaxRequest, reset_variax,
    variax_type,
};
pub use config::{
    BUILTIN_CONFIG_JSON, Bank, BankAlias, HardwareConfig, TuningDef, VariantLogic, VariaxConfig,
};
pub use error::VariaxError;
pub use resolve::{KEYWORD_MODELS, KEYWORD_TUNINGS, is_unset};
