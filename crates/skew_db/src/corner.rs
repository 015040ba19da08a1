//! Loading an ordered corner set from a directory of JSON databases.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::database::PinArcDatabase;

/// One loaded corner: a named database.
///
/// The name is the file stem of the JSON file the database came from and
/// is used to label corners in mismatch reports.
#[derive(Clone, Debug)]
pub struct Corner {
    /// Corner name (JSON file stem).
    pub name: String,
    /// The corner's pin → arcs database.
    pub db: PinArcDatabase,
}

/// A corner file that failed to load and was skipped.
#[derive(Debug)]
pub struct SkippedCorner {
    /// Path of the offending file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Result of loading a database directory.
#[derive(Debug, Default)]
pub struct CornerLoad {
    /// Corners in sorted-filename order. Index 0 is the reference corner.
    pub corners: Vec<Corner>,
    /// Files that could not be read or parsed.
    pub skipped: Vec<SkippedCorner>,
}

/// Errors that prevent the database directory from being read at all.
#[derive(Debug, Error)]
pub enum CornerLoadError {
    /// The given path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    /// The directory listing could not be read.
    #[error("failed to read database directory {path}: {source}")]
    ReadDir {
        /// The directory that failed to list.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Loads every `*.json` database in `dir`, sorted by filename.
///
/// Individual files that cannot be read or parsed are recorded in
/// [`CornerLoad::skipped`] and loading continues; only a missing or
/// unlistable directory is an error. The caller decides whether an empty
/// corner set is fatal.
pub fn load_corners(dir: &Path) -> Result<CornerLoad, CornerLoadError> {
    if !dir.is_dir() {
        return Err(CornerLoadError::NotADirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|source| CornerLoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut load = CornerLoad::default();
    for path in paths {
        match read_corner(&path) {
            Ok(corner) => load.corners.push(corner),
            Err(reason) => load.skipped.push(SkippedCorner { path, reason }),
        }
    }
    Ok(load)
}

fn read_corner(path: &Path) -> Result<Corner, String> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("corner")
        .to_string();
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let db = PinArcDatabase::from_json_str(&content).map_err(|e| e.to_string())?;
    Ok(Corner { name, db })
}
