//! Free-text instrument and tuning resolution.

use crate::VariaxConfig;

/// Keyword tunings used when no configured tuning matches, in match order.
/// Offsets are listed low string first.
pub const KEYWORD_TUNINGS: &[(&[&str], [i32; 6])] = &[
    (&["drop d"], [-2, 0, 0, 0, 0, 0]),
    (&["eb", "half step down"], [-1, -1, -1, -1, -1, -1]),
    (&["d standard", "whole step down"], [-2, -2, -2, -2, -2, -2]),
    (&["drop c"], [-4, -2, -2, -2, -2, -2]),
    (&["baritone"], [-5, -5, -5, -5, -5, -5]),
    (&["open g"], [-2, -2, 0, 0, 0, -2]),
    (&["open d"], [-2, 0, 0, -1, -2, -2]),
    (&["dadgad"], [-2, 0, 0, 0, 0, -2]),
];

/// Keyword model codes used when the hardware has no usable bank table.
pub const KEYWORD_MODELS: &[(&[&str], i32)] = &[
    (&["jaguar", "tele", "t-model"], 10),
    (&["strat", "spank"], 15),
];

/// True if `text` asks for no instrument model at all.
pub fn is_unset(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.eq_ignore_ascii_case("none")
}

impl VariaxConfig {
    /// Resolve instrument text to a model code.
    ///
    /// `None` means no mapping: the text is empty or `"none"`, or nothing
    /// matched. `"0"` and `"neutral"` select code 0. Otherwise the text is
    /// matched against the hardware's aliases and bank names; a digit 1-5
    /// anywhere in the text picks the pickup variant (default 1).
    pub fn resolve_model(&self, text: &str, hardware: &str) -> Option<i32> {
        let m = text.trim().to_lowercase();
        if is_unset(&m) {
            return None;
        }
        if m == "0" || m == "neutral" {
            return Some(0);
        }

        let Some(config) = self.hardware_config(hardware) else {
            return keyword_model(&m);
        };

        let target = config
            .aliases
            .iter()
            .find(|a| m.contains(&a.alias.to_lowercase()))
            .map_or("", |a| a.bank.as_str());

        let bank = config.banks.iter().find(|b| {
            b.name.to_lowercase() == target.to_lowercase() || m.contains(&b.name.to_lowercase())
        });

        match bank {
            Some(bank) => Some(config.variant_logic.code(bank.base_id, variant_digit(&m))),
            None => keyword_model(&m),
        }
    }

    /// Resolve tuning text to semitone offsets, low string first.
    ///
    /// `None` means standard tuning or no match.
    pub fn resolve_tuning(&self, text: &str, hardware: &str) -> Option<[i32; 6]> {
        let t = text.trim().to_lowercase();
        if t.is_empty() || t == "standard" {
            return None;
        }

        if let Some(config) = self.hardware_config(hardware)
            && let Some(tuning) = config.tunings.iter().find(|def| def.matches(&t))
        {
            return Some(tuning.offsets_array());
        }

        KEYWORD_TUNINGS
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| t.contains(k)))
            .map(|&(_, offsets)| offsets)
    }
}

fn variant_digit(text: &str) -> i32 {
    text.chars()
        .find(|c| ('1'..='5').contains(c))
        .and_then(|c| c.to_digit(10))
        .map_or(1, |d| d as i32)
}

fn keyword_model(text: &str) -> Option<i32> {
    KEYWORD_MODELS
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| text.contains(k)))
        .map(|&(_, code)| code)
}
