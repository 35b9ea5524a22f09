//! Parameter value normalization and safety caps.
//!
//! [`sanitize`] is applied to every parameter value before it is written to a
//! document. Two independent rule families apply to numeric values:
//!
//! - **Range normalization**: keys containing one of [`RANGE_KEYWORDS`] are
//!   unit-range knobs. A value above 1.0 is read as a 0-10 dial position and
//!   divided by 10, then capped at 1.0.
//! - **Safety caps**: reverb `Decay`/`VerbDecay` and delay `VerbDecay` are
//!   capped at [`DECAY_CAP`]; delay feedback (`Feedback`, `Fdbk`, `Bk`) is
//!   capped at [`FEEDBACK_CAP`] to keep repeats from running away.
//!
//! Non-numeric values, and numbers no rule touches, are returned unchanged.
//!
//! # Example
//!
//! ```rust
//! use helaix_core::sanitize;
//! use serde_json::json;
//!
//! assert_eq!(sanitize("HD2_AmpUSDeluxe", "Drive", &json!(6.5)), json!(0.65));
//! assert_eq!(sanitize("HD2_DelaySimpleDelay", "Feedback", &json!(0.9)), json!(0.75));
//! assert_eq!(sanitize("HD2_ReverbHall", "Decay", &json!(0.8)), json!(0.7));
//! assert_eq!(sanitize("HD2_ReverbHall", "Decay", &json!("long")), json!("long"));
//! ```

use serde_json::Value;

use crate::ModelFamily;

/// Key fragments (lowercase) that mark a unit-range parameter.
pub const RANGE_KEYWORDS: &[&str] = &[
    "gain", "drive", "bass", "mid", "treble", "presence", "chvol", "master", "level", "mix",
    "feedback", "fdbk", "pedal",
];

/// Reverb and delay keys (lowercase) capped at [`DECAY_CAP`].
pub const REVERB_DECAY_KEYS: &[&str] = &["decay", "verbdecay"];

/// Delay keys (lowercase) capped at [`DECAY_CAP`].
pub const DELAY_DECAY_KEYS: &[&str] = &["verbdecay"];

/// Delay keys (lowercase) capped at [`FEEDBACK_CAP`].
pub const DELAY_FEEDBACK_KEYS: &[&str] = &["feedback", "fdbk", "bk"];

/// Maximum reverb decay.
pub const DECAY_CAP: f64 = 0.7;

/// Maximum delay feedback.
pub const FEEDBACK_CAP: f64 = 0.75;

/// Dial positions above this are read on a 0-10 scale.
const UNIT_MAX: f64 = 1.0;

/// Normalize and cap a parameter value for the model `internal_id`.
///
/// Pure and idempotent: `sanitize(id, k, &sanitize(id, k, v)) == sanitize(id, k, v)`.
pub fn sanitize(internal_id: &str, key: &str, value: &Value) -> Value {
    let Some(original) = value.as_f64() else {
        return value.clone();
    };

    let key = key.to_lowercase();
    let family = ModelFamily::classify(internal_id);
    let mut val = original;

    if RANGE_KEYWORDS.iter().any(|kw| key.contains(kw)) {
        if val > UNIT_MAX {
            val /= 10.0;
        }
        val = val.min(UNIT_MAX);
    }

    let decay_keys: &[&str] = if family.is_reverb() {
        REVERB_DECAY_KEYS
    } else if family.is_delay() {
        DELAY_DECAY_KEYS
    } else {
        &[]
    };
    if decay_keys.contains(&key.as_str()) {
        val = val.min(DECAY_CAP);
    }

    if family.is_delay() && DELAY_FEEDBACK_KEYS.contains(&key.as_str()) {
        val = val.min(FEEDBACK_CAP);
    }

    if val == original {
        value.clone()
    } else {
        Value::from(val)
    }
}
