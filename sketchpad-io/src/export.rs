//! PNG export of the drawing.
//!
//! The export is the current snapshot written verbatim, so what is saved is exactly
//! what undo would restore.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Snapshot;

/// File name used for every export.
pub const EXPORT_FILE_NAME: &str = "drawing.png";

/// Write `snapshot` as `dir/drawing.png`, creating `dir` when needed. Returns the written path.
pub fn export_png(dir: impl AsRef<Path>, snapshot: &Snapshot) -> Result<PathBuf, ExportError> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    export_png_to(&path, snapshot)?;
    Ok(path)
}

/// Write `snapshot` to an explicit path, e.g. one picked in a save dialog.
pub fn export_png_to(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<(), ExportError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        // fs::write does not create directories
        fs::create_dir_all(parent).map_err(|source| {
            tracing::error!(dir = %parent.display(), %source, "cannot create export directory");
            ExportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }

    fs::write(path, snapshot.as_png()).map_err(|source| {
        tracing::error!(path = %path.display(), %source, "cannot write export");
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!(
        path = %path.display(),
        width = snapshot.width(),
        height = snapshot.height(),
        "drawing exported"
    );
    Ok(())
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
