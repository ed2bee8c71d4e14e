//! sketchpad-ui: the event-driven editor and its egui front end.

pub mod app;
pub mod editor;

pub use app::{Action, SketchpadApp};
pub use editor::{Editor, SnapshotHistory};
