//! Target hardware detection from the identifier string.

use helaix_core::PathIndex;

/// Device code for Helix Floor and Helix Rack.
pub const DEVICE_FLOOR: u32 = 2;
/// Device code for Helix LT.
pub const DEVICE_LT: u32 = 3;
/// Device code for HX Stomp.
pub const DEVICE_STOMP: u32 = 6;
/// Device code for Helix Native and anything unrecognized.
pub const DEVICE_NATIVE: u32 = 15;

/// Identifier fragments of units with two independent DSP paths.
pub const DUAL_PATH_MARKERS: [&str; 3] = ["Floor", "LT", "Rack"];

/// Capabilities of the target unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareProfile {
    dual_path: bool,
    device_code: u32,
}

impl HardwareProfile {
    /// Detect the profile from an identifier such as "Helix Floor" or
    /// "HX Stomp". Matching is by case-sensitive substring.
    pub fn detect(identifier: &str) -> Self {
        let dual_path = DUAL_PATH_MARKERS.iter().any(|m| identifier.contains(m));
        let device_code = if identifier.contains("Floor") || identifier.contains("Rack") {
            DEVICE_FLOOR
        } else if identifier.contains("LT") {
            DEVICE_LT
        } else if identifier.contains("Stomp") {
            DEVICE_STOMP
        } else {
            DEVICE_NATIVE
        };
        Self {
            dual_path,
            device_code,
        }
    }

    /// True if the unit has two 100% DSP paths.
    pub fn is_dual_path(self) -> bool {
        self.dual_path
    }

    /// Value of the document's `@device` field.
    pub fn device_code(self) -> u32 {
        self.device_code
    }

    /// Paths blocks may be placed on.
    pub fn paths(self) -> &'static [PathIndex] {
        const SINGLE: [PathIndex; 1] = [PathIndex::Dsp0];
        if self.dual_path {
            &PathIndex::ALL
        } else {
            &SINGLE
        }
    }
}
