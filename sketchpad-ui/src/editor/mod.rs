// Editor module for Sketchpad UI.

pub mod history;
pub mod session;
pub mod tools;

pub use history::SnapshotHistory;
pub use session::Editor;
pub use tools::{tool_for, Eraser, Fill, Pencil, ShapeTool, Tool};
