//! Helix model catalog.
//!
//! The catalog is the registry of every amp, cab and effect model the
//! compiler can place: internal identifier, display name, the gear it is
//! based on, DSP cost and default parameter set. It is built once and only
//! read afterwards.
//!
//! Two lookups are indexed:
//!
//! - [`Catalog::find_by_name`]: display name, case-insensitive
//! - [`Catalog::find_by_id`]: internal identifier, exact
//!
//! [`Catalog::builtin`] parses the dataset embedded in this crate exactly
//! once per process. Concurrent first callers block until the load finishes
//! and then share the result; a parse failure is cached and returned to every
//! caller.
//!
//! # Example
//!
//! ```rust
//! use helaix_catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let hall = catalog.find_by_name("hall").unwrap();
//! assert_eq!(hall.internal_name, "HD2_ReverbHall");
//! assert!(catalog.find_by_id("HD2_ReverbHall").is_some());
//! assert!(catalog.find_by_id("hd2_reverbhall").is_none());
//! ```

mod entry;
mod error;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

pub use entry::{CatalogEntry, DEFAULT_DSP_COST, ModelData};
pub use error::CatalogError;

/// Catalog dataset compiled into the crate.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

static BUILTIN: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// Read-only model registry.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    /// Build a catalog from entries, indexing names and identifiers.
    ///
    /// When two entries share a display name (ignoring case), the later one
    /// wins the name lookup. Duplicate identifiers are an error.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.internal_name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(entry.internal_name.clone()));
            }
            if !entry.name.is_empty() {
                by_name.insert(entry.name.to_lowercase(), idx);
            }
        }

        Ok(Self {
            entries,
            by_name,
            by_id,
        })
    }

    /// The catalog embedded in this crate, loaded on first use.
    pub fn builtin() -> Result<&'static Catalog, CatalogError> {
        BUILTIN
            .get_or_init(|| {
                let result = Catalog::from_json(BUILTIN_CATALOG_JSON);
                match &result {
                    Ok(catalog) => tracing::debug!(entries = catalog.len(), "model catalog loaded"),
                    Err(e) => tracing::error!(error = %e, "embedded model catalog is invalid"),
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Look up an entry by display name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Look up an entry by exact internal identifier.
    pub fn find_by_id(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Resolve a model reference: display name first, then internal identifier.
    pub fn resolve(&self, model: &str) -> Option<&CatalogEntry> {
        self.find_by_name(model).or_else(|| self.find_by_id(model))
    }

    /// True if `id` is a known internal identifier.
    pub fn is_valid_model(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All entries in dataset order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterate over all entries in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Display names of all entries, falling back to the identifier.
    pub fn display_names(&self) -> Vec<&str> {
        self.entries.iter().map(CatalogEntry::display_name).collect()
    }

    /// Entries whose name, identifier or reference gear contains `filter`,
    /// ignoring case. An empty filter matches everything.
    pub fn search(&self, filter: &str) -> Vec<&CatalogEntry> {
        let needle = filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.name.to_lowercase().contains(&needle)
                    || e.internal_name.to_lowercase().contains(&needle)
                    || e.based_on.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Mono DSP cost of a model, `None` for unknown identifiers.
    pub fn dsp_cost(&self, id: &str) -> Option<f64> {
        self.find_by_id(id).map(CatalogEntry::mono_cost)
    }

    /// Internal identifier to resolved mono DSP cost, for every entry.
    pub fn dsp_cost_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.internal_name.clone(), e.mono_cost()))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
