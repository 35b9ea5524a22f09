//! DSP usage of a compiled preset.
//!
//! Each path runs on its own DSP chip with a 100% budget. Costs come from
//! the document's own `meta.dsp_map`, so a saved preset can be re-checked
//! without the catalog.

use helaix_catalog::DEFAULT_DSP_COST;
use helaix_core::{PathIndex, PresetDocument};

/// Budget of one DSP path, in percent.
pub const PATH_CAPACITY: f64 = 100.0;

/// Load above which a path has little room left for edits on the unit.
pub const RECOMMENDED_LOAD: f64 = 65.0;

/// Usage of one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathUsage {
    /// The path.
    pub path: PathIndex,
    /// Placed blocks.
    pub blocks: usize,
    /// Summed mono cost, in percent.
    pub cost: f64,
}

impl PathUsage {
    /// True if the blocks cannot all run.
    pub fn is_over_capacity(&self) -> bool {
        self.cost > PATH_CAPACITY
    }

    /// True if the load exceeds [`RECOMMENDED_LOAD`].
    pub fn is_above_recommended(&self) -> bool {
        self.cost > RECOMMENDED_LOAD
    }

    /// Remaining budget; negative when over capacity.
    pub fn headroom(&self) -> f64 {
        PATH_CAPACITY - self.cost
    }
}

/// Usage of both paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DspBudget {
    paths: [PathUsage; 2],
}

impl DspBudget {
    /// Sum the cost of every placed block per path.
    ///
    /// Models missing from `meta.dsp_map` are charged [`DEFAULT_DSP_COST`].
    pub fn from_document(doc: &PresetDocument) -> Self {
        let dsp_map = doc.data.meta.dsp_map.as_ref();
        let paths = PathIndex::ALL.map(|path| {
            let blocks = &doc.tone().path(path).blocks;
            let cost: f64 = blocks
                .values()
                .map(|b| {
                    dsp_map
                        .and_then(|m| m.get(&b.model))
                        .copied()
                        .unwrap_or(DEFAULT_DSP_COST)
                })
                .sum();
            PathUsage {
                path,
                blocks: blocks.len(),
                cost,
            }
        });
        Self { paths }
    }

    /// Usage of one path.
    pub fn path(&self, path: PathIndex) -> &PathUsage {
        &self.paths[path.index()]
    }

    /// Usage of both paths in order.
    pub fn paths(&self) -> &[PathUsage] {
        &self.paths
    }

    /// Combined cost of both paths.
    pub fn total(&self) -> f64 {
        self.paths.iter().map(|p| p.cost).sum()
    }

    /// Paths over capacity.
    pub fn over_capacity(&self) -> impl Iterator<Item = &PathUsage> {
        self.paths.iter().filter(|p| p.is_over_capacity())
    }
}
