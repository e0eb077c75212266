//! Level files on disk.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use strictly_sokoban::Level;
use tracing::{debug, info, instrument};

/// Extension of level files.
pub const LEVEL_EXTENSION: &str = "txt";

/// Lists the level files in `dir`, sorted by file name.
#[instrument(skip(dir), fields(dir = %dir.display()))]
pub fn level_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read levels directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(count = paths.len(), "Found level files");
    Ok(paths)
}

/// Reads a single level, named after its file stem.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_level(path: &Path) -> Result<Level> {
    let layout = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read level {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Level::new(name, layout))
}

/// Reads every level in `dir` in play order.
///
/// Layout text is not validated here; the engine reports parse errors when
/// the level is started or checked.
#[instrument(skip(dir), fields(dir = %dir.display()))]
pub fn load_levels(dir: &Path) -> Result<Vec<Level>> {
    let paths = level_paths(dir)?;
    if paths.is_empty() {
        bail!(
            "No *.{} level files found in {}",
            LEVEL_EXTENSION,
            dir.display()
        );
    }

    let levels = paths
        .iter()
        .map(|path| load_level(path))
        .collect::<Result<Vec<_>>>()?;

    info!(count = levels.len(), "Levels loaded");
    Ok(levels)
}
