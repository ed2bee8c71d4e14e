//! sketchpad-core: the drawing surface, tool state and undo history for Sketchpad.
//!
//! Design rules:
//! - The canvas is a plain RGBA raster; every tool is a handful of raster calls.
//! - History is linear: new work after an undo destroys the redo tail.
//! - Undo/redo past either end is a silent no-op, never an error.
//! - No I/O here. Encoding and files live in sketchpad-io.

pub mod canvas;
pub mod color;
pub mod history;
pub mod raster;
pub mod tools;

pub use canvas::{Canvas, CanvasError, Point};
pub use color::{format_hex, opaque, parse_hex, ColorParseError};
pub use ecolor::Color32;
pub use history::History;
pub use tools::{BrushWidth, Shape, ShapeKind, ToolError, ToolKind, ToolState};
