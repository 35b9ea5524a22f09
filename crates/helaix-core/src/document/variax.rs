//! The global Variax input region.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `data.tone.variax` object.
///
/// String fields are numbered as on the instrument: string 1 is the high E,
/// string 6 the low E.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariaxRegion {
    /// Input model tag, always `@variax`.
    #[serde(rename = "@model")]
    pub model: String,
    /// Whether the per-string tunings below are applied.
    #[serde(rename = "@variax_customtuning")]
    pub custom_tuning: bool,
    /// Lock of the instrument's own controls.
    #[serde(rename = "@variax_lockctrls")]
    pub lock_controls: i32,
    /// Magnetic pickups instead of modelled ones when no model is active.
    #[serde(rename = "@variax_magmode")]
    pub magnetic_mode: bool,
    /// Modelled instrument code.
    #[serde(rename = "@variax_model")]
    pub model_code: i32,
    /// String 1 level.
    #[serde(rename = "@variax_str1level")]
    pub str1_level: f64,
    /// String 1 offset in semitones.
    #[serde(rename = "@variax_str1tuning")]
    pub str1_tuning: i32,
    /// String 2 level.
    #[serde(rename = "@variax_str2level")]
    pub str2_level: f64,
    /// String 2 offset in semitones.
    #[serde(rename = "@variax_str2tuning")]
    pub str2_tuning: i32,
    /// String 3 level.
    #[serde(rename = "@variax_str3level")]
    pub str3_level: f64,
    /// String 3 offset in semitones.
    #[serde(rename = "@variax_str3tuning")]
    pub str3_tuning: i32,
    /// String 4 level.
    #[serde(rename = "@variax_str4level")]
    pub str4_level: f64,
    /// String 4 offset in semitones.
    #[serde(rename = "@variax_str4tuning")]
    pub str4_tuning: i32,
    /// String 5 level.
    #[serde(rename = "@variax_str5level")]
    pub str5_level: f64,
    /// String 5 offset in semitones.
    #[serde(rename = "@variax_str5tuning")]
    pub str5_tuning: i32,
    /// String 6 level.
    #[serde(rename = "@variax_str6level")]
    pub str6_level: f64,
    /// String 6 offset in semitones.
    #[serde(rename = "@variax_str6tuning")]
    pub str6_tuning: i32,
    /// Tone knob trim.
    #[serde(rename = "@variax_toneknob")]
    pub tone_knob: f64,
    /// Volume knob trim.
    #[serde(rename = "@variax_volumeknob")]
    pub volume_knob: f64,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VariaxRegion {
    /// Value of `@model` for the Variax input.
    pub const MODEL: &'static str = "@variax";

    /// Knob trim meaning "follow the instrument's own knob".
    pub const KNOB_FOLLOW: f64 = -0.10;

    /// The neutral input: model 0, unity levels, standard tuning, magnetic
    /// pickups, knobs following the instrument.
    pub fn neutral() -> Self {
        Self {
            model: Self::MODEL.to_string(),
            custom_tuning: false,
            lock_controls: 0,
            magnetic_mode: true,
            model_code: 0,
            str1_level: 1.0,
            str1_tuning: 0,
            str2_level: 1.0,
            str2_tuning: 0,
            str3_level: 1.0,
            str3_tuning: 0,
            str4_level: 1.0,
            str4_tuning: 0,
            str5_level: 1.0,
            str5_tuning: 0,
            str6_level: 1.0,
            str6_tuning: 0,
            tone_knob: Self::KNOB_FOLLOW,
            volume_knob: Self::KNOB_FOLLOW,
            extra: Map::new(),
        }
    }

    /// Apply semitone offsets listed low string first (`offsets[0]` is the low
    /// E), enabling custom tuning.
    pub fn set_tuning(&mut self, offsets: [i32; 6]) {
        self.custom_tuning = true;
        self.str6_tuning = offsets[0];
        self.str5_tuning = offsets[1];
        self.str4_tuning = offsets[2];
        self.str3_tuning = offsets[3];
        self.str2_tuning = offsets[4];
        self.str1_tuning = offsets[5];
    }

    /// Per-string tuning, string 1 first.
    pub fn string_tunings(&self) -> [i32; 6] {
        [
            self.str1_tuning,
            self.str2_tuning,
            self.str3_tuning,
            self.str4_tuning,
            self.str5_tuning,
            self.str6_tuning,
        ]
    }

    /// Per-string level, string 1 first.
    pub fn string_levels(&self) -> [f64; 6] {
        [
            self.str1_level,
            self.str2_level,
            self.str3_level,
            self.str4_level,
            self.str5_level,
            self.str6_level,
        ]
    }
}

impl Default for VariaxRegion {
    fn default() -> Self {
        Self::neutral()
    }
}
