//! Writing compiled presets to disk.

use std::path::{Path, PathBuf};

use helaix_core::PresetDocument;

use crate::PresetError;

/// File extension of preset files, without the dot.
pub const PRESET_EXTENSION: &str = "hlx";

/// File stem for a requested filename: a trailing `.hlx` is dropped.
pub fn preset_stem(filename: &str) -> &str {
    filename
        .strip_suffix(".hlx")
        .unwrap_or(filename)
}

/// Path a preset named `filename` would be written to in `dir`.
///
/// Without `incremental` this is `<dir>/<stem>.hlx`, overwriting any
/// existing file. With it, the first of `<stem>.hlx`, `<stem>_1.hlx`,
/// `<stem>_2.hlx`, ... that does not exist yet.
pub fn target_path(dir: &Path, filename: &str, incremental: bool) -> PathBuf {
    let stem = preset_stem(filename);
    let mut path = dir.join(format!("{stem}.{PRESET_EXTENSION}"));
    if incremental {
        let mut counter = 1;
        while path.exists() {
            path = dir.join(format!("{stem}_{counter}.{PRESET_EXTENSION}"));
            counter += 1;
        }
    }
    path
}

/// Save a preset as two-space indented JSON, creating `dir` if needed.
///
/// Returns the path written.
pub fn save_preset(
    doc: &PresetDocument,
    dir: impl AsRef<Path>,
    filename: &str,
    incremental: bool,
) -> Result<PathBuf, PresetError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| PresetError::create_dir(dir, e))?;
    }

    let path = target_path(dir, filename, incremental);
    let content = doc.to_json_pretty()?;
    std::fs::write(&path, content).map_err(|e| PresetError::write_file(&path, e))?;
    tracing::debug!(path = %path.display(), "preset written");
    Ok(path)
}
