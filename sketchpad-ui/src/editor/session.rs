// The editor session: one canvas, its history and the toolbar state.
// Every UI event lands here as a method call on the UI thread.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sketchpad_core::{parse_hex, Canvas, Color32, Point, ShapeKind, ToolState};
use sketchpad_io::{export_png, export_png_to, load_image, EditorConfig, Snapshot};
use tracing::{debug, error, info, trace};

use super::history::SnapshotHistory;
use super::tools::tool_for;

/// Pointer gesture in progress between a press and its release.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    start: Point,
    last: Point,
}

#[derive(Debug)]
pub struct Editor {
    canvas: Canvas,
    history: SnapshotHistory,
    tools: ToolState,
    gesture: Option<Gesture>,
    export_dir: PathBuf,
    /// Bumped whenever canvas pixels change, so the front end knows to re-upload.
    revision: u64,
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        info!(
            width = config.canvas_width,
            height = config.canvas_height,
            max_history = ?config.max_history,
            "Starting editor session"
        );
        Self {
            canvas: Canvas::new(config.canvas_width, config.canvas_height, config.background()),
            history: SnapshotHistory::new(config.max_history),
            tools: config.tool_state(),
            gesture: None,
            export_dir: config.export_dir.clone(),
            revision: 0,
        }
    }

    /// Editor with default settings and the given surface size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(&EditorConfig {
            canvas_width: width,
            canvas_height: height,
            ..Default::default()
        })
    }

    pub fn select_pencil(&mut self) {
        self.tools.select_pencil();
    }

    pub fn select_eraser(&mut self) {
        self.tools.select_eraser();
    }

    pub fn select_fill(&mut self) {
        self.tools.select_fill();
    }

    pub fn select_shape(&mut self, shape: ShapeKind) {
        self.tools.select_shape(shape);
    }

    pub fn set_shape_filled(&mut self, filled: bool) {
        self.tools.set_shape_filled(filled);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.tools.set_color(color);
    }

    /// Set the brush color from a `#rrggbb` string.
    pub fn set_color_hex(&mut self, hex: &str) -> anyhow::Result<()> {
        let color = parse_hex(hex).with_context(|| format!("set color to '{hex}'"))?;
        self.tools.set_color(color);
        Ok(())
    }

    pub fn set_width(&mut self, width: u32) {
        self.tools.set_width(width);
    }

    pub fn pointer_down(&mut self, at: Point) {
        trace!(?at, "pointer down");
        self.gesture = Some(Gesture {
            start: at,
            last: at,
        });
    }

    /// Ignored unless a press is in progress.
    pub fn pointer_move(&mut self, to: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        let from = gesture.last;
        gesture.last = to;
        tool_for(&self.tools).drag(&mut self.canvas, from, to);
        self.touch();
    }

    /// Finish the gesture and record the result. Ignored unless a press is in progress.
    pub fn pointer_up(&mut self, at: Point) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        trace!(start = ?gesture.start, end = ?at, "pointer up");

        tool_for(&self.tools).release(&mut self.canvas, gesture.start, at);
        self.touch();
        self.record();
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo(&mut self.canvas);
        if moved {
            self.touch();
        }
        moved
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo(&mut self.canvas);
        if moved {
            self.touch();
        }
        moved
    }

    /// Blank the surface and restart history from that blank state.
    pub fn clear(&mut self) {
        info!("Clearing drawing and history");
        self.canvas.clear();
        self.history.reset();
        self.record();
        self.touch();
    }

    /// Export the surface as `drawing.png` in the configured directory.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        self.save_in(&self.export_dir)
    }

    /// Export the surface as `drawing.png` inside `dir`.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let snapshot = Snapshot::capture(&self.canvas).context("capture drawing for export")?;
        let path = export_png(dir.as_ref(), &snapshot)
            .with_context(|| format!("export drawing to {}", dir.as_ref().display()))?;
        Ok(path)
    }

    /// Export the surface to an explicit file path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let snapshot = Snapshot::capture(&self.canvas).context("capture drawing for export")?;
        export_png_to(path.as_ref(), &snapshot)
            .with_context(|| format!("export drawing to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Replace the drawing with the image at `path`, drawn at the origin, and record it.
    /// A file that cannot be read or decoded leaves everything untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let image = load_image(path, self.canvas.background())
            .with_context(|| format!("load image {}", path.display()))?;

        self.canvas.clear();
        self.canvas.draw_image_at_origin(&image);
        self.touch();
        self.record();
        Ok(())
    }

    /// Follow a change of the surface's pixel size.
    ///
    /// The surface is cleared to the new size and the current snapshot is redrawn at the
    /// origin without scaling: shrinking clips it, growing leaves background around it.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to an empty surface");
            return;
        }
        if (width, height) == (self.canvas.width(), self.canvas.height()) {
            return;
        }

        self.canvas.resize(width, height);
        self.history.render_current(&mut self.canvas);
        self.touch();
    }

    fn record(&mut self) {
        if let Err(e) = self.history.record(&self.canvas) {
            error!(error = %e, "failed to record history snapshot");
            return;
        }
        debug!(
            cursor = ?self.history.cursor(),
            len = self.history.len(),
            "history updated"
        );
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Diameter of the brush outline shown under the pointer.
    pub fn cursor_size(&self) -> u32 {
        tool_for(&self.tools).cursor_size()
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
