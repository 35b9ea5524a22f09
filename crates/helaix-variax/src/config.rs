//! Hardware-keyed Variax tables and their loaders.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::OnceLock;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::VariaxError;

/// Configuration table compiled into the crate.
pub const BUILTIN_CONFIG_JSON: &str = include_str!("../data/variax_models.json");

static BUILTIN: OnceLock<VariaxConfig> = OnceLock::new();

/// Variax model and tuning tables, keyed by lowercase hardware name.
///
/// An empty configuration is valid: every lookup then falls through to the
/// built-in keyword heuristics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariaxConfig {
    /// Per-hardware tables.
    #[serde(rename = "variax_configurations", default)]
    pub hardware: BTreeMap<String, HardwareConfig>,
}

/// Tables for one Variax hardware family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Key of another entry whose tables replace this one's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    /// How the pickup variant digit maps onto codes within a bank.
    #[serde(default)]
    pub variant_logic: VariantLogic,
    /// Model banks in match order.
    #[serde(default)]
    pub banks: Vec<Bank>,
    /// Free-text fragments that select a bank, in match order.
    ///
    /// Accepted as a list of `{alias, bank}` entries or as an
    /// `{alias: bank}` object.
    #[serde(default, deserialize_with = "list_or_map")]
    pub aliases: Vec<BankAlias>,
    /// Named tunings in match order.
    ///
    /// Accepted as a list of `{name, offsets, aliases}` entries or as a
    /// `{name: {offsets, aliases}}` object.
    #[serde(default, deserialize_with = "list_or_map")]
    pub tunings: Vec<TuningDef>,
}

/// Entry that can also be written as one `key: body` pair of an object.
trait KeyedEntry: Sized {
    type Body: for<'de> Deserialize<'de>;

    fn from_entry(key: String, body: Self::Body) -> Self;
}

impl KeyedEntry for BankAlias {
    type Body = String;

    fn from_entry(alias: String, bank: String) -> Self {
        Self { alias, bank }
    }
}

#[derive(Deserialize)]
struct TuningBody {
    #[serde(default)]
    offsets: Vec<i32>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl KeyedEntry for TuningDef {
    type Body = TuningBody;

    fn from_entry(name: String, body: TuningBody) -> Self {
        Self {
            name,
            offsets: body.offsets,
            aliases: body.aliases,
        }
    }
}

// Object entries keep document order.
fn list_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: KeyedEntry + Deserialize<'de>,
{
    struct ListOrMap<T>(PhantomData<T>);

    impl<'de, T: KeyedEntry + Deserialize<'de>> Visitor<'de> for ListOrMap<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of entries or an object keyed by name")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some(entry) = seq.next_element()? {
                out.push(entry);
            }
            Ok(out)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some((key, body)) = map.next_entry::<String, T::Body>()? {
                out.push(T::from_entry(key, body));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(ListOrMap(PhantomData))
}

/// Numbering of the five pickup variants within a bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariantLogic {
    /// Variant 1 is the bank base, variant 5 is base + 4.
    #[default]
    Sequential,
    /// Variant 5 is the bank base, variant 1 is base + 4.
    Inverted,
}

impl VariantLogic {
    /// Model code for pickup `variant` (1..=5) in a bank starting at `base`.
    pub fn code(self, base: i32, variant: i32) -> i32 {
        match self {
            VariantLogic::Sequential => base + (variant - 1),
            VariantLogic::Inverted => base + (5 - variant),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            VariantLogic::Sequential => "sequential",
            VariantLogic::Inverted => "inverted",
        }
    }
}

// Anything other than "inverted" numbers sequentially.
impl<'de> Deserialize<'de> for VariantLogic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(if text.eq_ignore_ascii_case("inverted") {
            VariantLogic::Inverted
        } else {
            VariantLogic::Sequential
        })
    }
}

impl Serialize for VariantLogic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A bank of five related models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    /// Bank name as printed on the model knob.
    pub name: String,
    /// Code of the bank's first model.
    pub base_id: i32,
}

/// A free-text fragment that selects a bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAlias {
    /// Lowercase fragment searched for in the instrument text.
    pub alias: String,
    /// Name of the selected bank.
    pub bank: String,
}

/// A named alternate tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningDef {
    /// Tuning name.
    pub name: String,
    /// Semitone offsets, low string first.
    pub offsets: Vec<i32>,
    /// Other names for the tuning.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TuningDef {
    /// Offsets as a six-string array; missing strings are 0, extras ignored.
    pub fn offsets_array(&self) -> [i32; 6] {
        let mut out = [0; 6];
        for (slot, &v) in out.iter_mut().zip(&self.offsets) {
            *slot = v;
        }
        out
    }

    /// True if `text` (lowercase) names this tuning.
    pub fn matches(&self, text: &str) -> bool {
        self.name.to_lowercase() == text
            || self.aliases.iter().any(|alias| {
                let alias = alias.to_lowercase();
                alias == text || text.contains(&alias)
            })
    }
}

impl VariaxConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, VariaxError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VariaxError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| VariaxError::read_file(path, e))?;
        Self::from_json(&text)
    }

    /// Load a configuration file, falling back to an empty table on any error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Variax configuration unusable, using keyword heuristics");
            Self::default()
        })
    }

    /// The table embedded in this crate, loaded on first use.
    ///
    /// A malformed embedded table yields an empty configuration.
    pub fn builtin() -> &'static VariaxConfig {
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_CONFIG_JSON).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "embedded Variax configuration is invalid, using keyword heuristics");
                Self::default()
            })
        })
    }

    /// Tables for a hardware name.
    ///
    /// Matches the lowercase name exactly, else the first key (in sorted
    /// order) the name contains. One level of `inherits` is followed; a
    /// dangling parent yields `None`.
    pub fn hardware_config(&self, hardware: &str) -> Option<&HardwareConfig> {
        let key = hardware.to_lowercase();
        let config = self.hardware.get(&key).or_else(|| {
            self.hardware
                .iter()
                .find(|(k, _)| !k.is_empty() && key.contains(k.as_str()))
                .map(|(_, v)| v)
        })?;
        match config.inherits.as_deref() {
            Some(parent) if !parent.is_empty() => self.hardware.get(parent),
            _ => Some(config),
        }
    }

    /// True if no hardware tables are configured.
    pub fn is_empty(&self) -> bool {
        self.hardware.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let config = VariaxConfig::from_json(BUILTIN_CONFIG_JSON).unwrap();
        assert!(config.hardware.contains_key("jtv"));
        assert!(config.hardware.contains_key("shuriken"));
        assert_eq!(config.hardware["shuriken"].variant_logic, VariantLogic::Inverted);
    }

    #[test]
    fn test_hardware_lookup_exact_then_contains() {
        let config = VariaxConfig::builtin();
        let jtv = &config.hardware["jtv"];
        assert_eq!(config.hardware_config("JTV"), Some(jtv));
        assert_eq!(config.hardware_config("JTV-59"), Some(jtv));
        assert_eq!(config.hardware_config("Helix Floor"), Some(jtv));
        assert_eq!(config.hardware_config("Standard"), Some(jtv));
        assert_eq!(
            config.hardware_config("Shuriken SR270"),
            Some(&config.hardware["shuriken"])
        );
        assert!(config.hardware_config("Telecaster").is_none());
    }

    #[test]
    fn test_dangling_inherit_is_none() {
        let config = VariaxConfig::from_json(
            r#"{ "variax_configurations": { "odd": { "inherits": "missing" } } }"#,
        )
        .unwrap();
        assert!(config.hardware_config("odd").is_none());
    }

    #[test]
    fn test_object_shaped_tables() {
        let config = VariaxConfig::from_json(
            r#"{ "variax_configurations": { "jtv": {
                "variant_logic": "sequential",
                "banks": [ { "name": "Spank", "base_id": 15 }, { "name": "Acoustic", "base_id": 50 } ],
                "aliases": { "dreadnought": "Acoustic", "strat": "Spank" },
                "tunings": { "Drop D": { "offsets": [-2, 0, 0, 0, 0, 0], "aliases": ["dropped d"] } }
            } } }"#,
        )
        .unwrap();
        let jtv = &config.hardware["jtv"];
        assert_eq!(jtv.aliases[0], BankAlias { alias: "dreadnought".into(), bank: "Acoustic".into() });
        assert_eq!(jtv.aliases[1].bank, "Spank");
        assert_eq!(jtv.tunings[0].name, "Drop D");
        assert_eq!(jtv.tunings[0].aliases, ["dropped d"]);
        assert_eq!(config.resolve_model("Dreadnought", "Standard JTV"), Some(50));
        assert_eq!(config.resolve_tuning("dropped d", "JTV"), Some([-2, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_null_tables_are_empty() {
        let config: HardwareConfig =
            serde_json::from_str(r#"{ "aliases": null, "tunings": null }"#).unwrap();
        assert!(config.aliases.is_empty());
        assert!(config.tunings.is_empty());
    }

    #[test]
    fn test_variant_logic_codes() {
        assert_eq!(VariantLogic::Sequential.code(15, 1), 15);
        assert_eq!(VariantLogic::Sequential.code(15, 5), 19);
        assert_eq!(VariantLogic::Inverted.code(15, 1), 19);
        assert_eq!(VariantLogic::Inverted.code(15, 5), 15);
    }

    #[test]
    fn test_variant_logic_unknown_is_sequential() {
        let config: HardwareConfig =
            serde_json::from_str(r#"{ "variant_logic": "zigzag" }"#).unwrap();
        assert_eq!(config.variant_logic, VariantLogic::Sequential);
    }

    #[test]
    fn test_offsets_array_pads_and_truncates() {
        let short = TuningDef { name: "x".into(), offsets: vec![-2], aliases: vec![] };
        assert_eq!(short.offsets_array(), [-2, 0, 0, 0, 0, 0]);
        let long = TuningDef { name: "x".into(), offsets: vec![1; 8], aliases: vec![] };
        assert_eq!(long.offsets_array(), [1; 6]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = VariaxConfig::load("/nonexistent/variax.json").unwrap_err();
        assert!(matches!(err, VariaxError::ReadFile { .. }));
        assert!(VariaxConfig::load_or_empty("/nonexistent/variax.json").is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variax.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(VariaxConfig::load(&path), Err(VariaxError::Parse(_))));
        assert!(VariaxConfig::load_or_empty(&path).is_empty());
    }
}
