//! Model family classification by internal identifier prefix.
//!
//! Internal identifiers carry their family in a prefix (`HD2_Amp`,
//! `HD2_Delay`, `VIC_Reverb`, ...). The compiler needs the family for three
//! things: the `@type` tag written on every block, the sanitizer's safety
//! caps, and deciding which blocks get the default expression pedal.
//!
//! The prefix table is data; add a row to teach the compiler a new family.
//!
//! # Example
//!
//! ```rust
//! use helaix_core::ModelFamily;
//!
//! let family = ModelFamily::classify("HD2_ReverbPlate");
//! assert_eq!(family, ModelFamily::Reverb);
//! assert_eq!(family.type_tag(), 7);
//! assert!(!family.accepts_expression_pedal());
//! ```

/// Block family of a catalog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Full amplifier.
    Amp,
    /// Preamp only.
    Preamp,
    /// Cabinet or impulse response.
    Cab,
    /// Delay.
    Delay,
    /// Reverb.
    Reverb,
    /// Wah.
    Wah,
    /// Volume pedal.
    Volume,
    /// Whammy-style pitch pedal.
    PitchWham,
    /// Anything else.
    Other,
}

/// Prefix to family, first match wins.
pub const FAMILY_PREFIXES: &[(&str, ModelFamily)] = &[
    ("HD2_Amp", ModelFamily::Amp),
    ("HD2_Preamp", ModelFamily::Preamp),
    ("HD2_Cab", ModelFamily::Cab),
    ("VIC_Cab", ModelFamily::Cab),
    ("HD2_Delay", ModelFamily::Delay),
    ("VIC_Delay", ModelFamily::Delay),
    ("HD2_Reverb", ModelFamily::Reverb),
    ("VIC_Reverb", ModelFamily::Reverb),
    ("HD2_Wah", ModelFamily::Wah),
    ("HD2_Vol", ModelFamily::Volume),
    ("HD2_PitchPitchWham", ModelFamily::PitchWham),
];

impl ModelFamily {
    /// Classify an internal model identifier.
    pub fn classify(internal_id: &str) -> Self {
        FAMILY_PREFIXES
            .iter()
            .find(|(prefix, _)| internal_id.starts_with(prefix))
            .map_or(ModelFamily::Other, |&(_, family)| family)
    }

    /// Value of the block's `@type` field.
    pub fn type_tag(self) -> u32 {
        match self {
            ModelFamily::Amp => 1,
            ModelFamily::Preamp | ModelFamily::Cab => 2,
            ModelFamily::Delay | ModelFamily::Reverb => 7,
            _ => 0,
        }
    }

    /// True for delay models.
    pub fn is_delay(self) -> bool {
        self == ModelFamily::Delay
    }

    /// True for reverb models.
    pub fn is_reverb(self) -> bool {
        self == ModelFamily::Reverb
    }

    /// True for families an expression pedal is bound to by default.
    pub fn accepts_expression_pedal(self) -> bool {
        matches!(
            self,
            ModelFamily::Wah | ModelFamily::Volume | ModelFamily::PitchWham
        )
    }
}
