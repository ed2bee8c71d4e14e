//! sketchpad-io: encodings and files for Sketchpad.
//!
//! - Snapshots are PNG captures of the whole surface, shared behind an `Arc`.
//! - Export writes one flattened PNG with a fixed file name.
//! - Import accepts whatever the `image` crate decodes; the extension list is advisory only.
//! - Editor settings are a small JSON file; a missing file means defaults.

pub mod config;
pub mod export;
pub mod import;
pub mod snapshot;

pub use config::{ConfigError, EditorConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
pub use export::{export_png, export_png_to, ExportError, EXPORT_FILE_NAME};
pub use import::{decode_image, is_supported_image, load_image, ImportError, IMPORT_EXTENSIONS};
pub use snapshot::{Snapshot, SnapshotError};
