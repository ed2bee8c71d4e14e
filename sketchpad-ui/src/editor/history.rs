// Undo/redo history module for the editor.
// Wraps the generic History with snapshot capture and rendering onto the canvas.

use sketchpad_core::{Canvas, History};
use sketchpad_io::{Snapshot, SnapshotError};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    states: History<Snapshot>,
}

impl SnapshotHistory {
    /// `max_states` of `None` keeps every snapshot for the life of the process.
    pub fn new(max_states: Option<usize>) -> Self {
        let states = match max_states {
            Some(max) => History::with_max_states(max),
            None => History::new(),
        };
        Self { states }
    }

    /// Push an already captured snapshot, discarding any redo tail.
    pub fn append(&mut self, snapshot: Snapshot) {
        self.states.append(snapshot);
    }

    /// Capture `canvas` and append it.
    pub fn record(&mut self, canvas: &Canvas) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::capture(canvas)?;
        trace!(?snapshot, "recording snapshot");
        self.append(snapshot);
        Ok(())
    }

    /// Step back and redraw. Returns false when already at the oldest state.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        match self.states.undo() {
            Some(snapshot) => {
                render_snapshot(snapshot, canvas);
                true
            }
            None => false,
        }
    }

    /// Step forward and redraw. Returns false when already at the newest state.
    pub fn redo(&mut self, canvas: &mut Canvas) -> bool {
        match self.states.redo() {
            Some(snapshot) => {
                render_snapshot(snapshot, canvas);
                true
            }
            None => false,
        }
    }

    /// Decode the snapshot at `index` and replace the canvas pixels with it.
    /// A snapshot that fails to decode leaves the canvas as it was.
    pub fn render(&self, index: usize, canvas: &mut Canvas) -> bool {
        match self.states.get(index) {
            Some(snapshot) => render_snapshot(snapshot, canvas),
            None => {
                warn!(index, len = self.states.len(), "render requested past end of history");
                false
            }
        }
    }

    /// Redraw the snapshot under the cursor, if any.
    pub fn render_current(&self, canvas: &mut Canvas) -> bool {
        match self.states.cursor() {
            Some(index) => self.render(index, canvas),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.states.reset();
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.states.current()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.states.cursor()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.states.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.states.can_redo()
    }
}

/// Decode first, then clear and draw at the origin, so a bad snapshot never wipes the surface.
fn render_snapshot(snapshot: &Snapshot, canvas: &mut Canvas) -> bool {
    let image = match snapshot.decode(canvas.background()) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "snapshot could not be decoded, canvas left unchanged");
            return false;
        }
    };

    canvas.clear();
    canvas.draw_image_at_origin(&image);
    debug!(
        width = image.width(),
        height = image.height(),
        "snapshot rendered"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::Color32;

    fn canvas_with(pixel: Color32) -> Canvas {
        let mut canvas = Canvas::new(8, 8, Color32::WHITE);
        canvas.set_pixel(2, 2, pixel);
        canvas
    }

    #[test]
    fn test_undo_redo_render_captured_pixels() {
        let mut history = SnapshotHistory::new(None);
        let a = canvas_with(Color32::RED);
        let b = canvas_with(Color32::BLUE);
        history.record(&a).unwrap();
        history.record(&b).unwrap();

        let mut canvas = b.clone();
        assert!(history.undo(&mut canvas));
        assert_eq!(canvas, a);
        assert_eq!(history.cursor(), Some(0));

        assert!(history.redo(&mut canvas));
        assert_eq!(canvas, b);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_noops_at_the_ends_leave_pixels_alone() {
        let mut history = SnapshotHistory::new(None);
        history.record(&canvas_with(Color32::RED)).unwrap();

        let mut canvas = canvas_with(Color32::GREEN);
        assert!(!history.undo(&mut canvas));
        assert!(!history.redo(&mut canvas));
        assert_eq!(canvas, canvas_with(Color32::GREEN));
    }

    #[test]
    fn test_render_out_of_range() {
        let history = SnapshotHistory::new(None);
        let mut canvas = canvas_with(Color32::RED);
        assert!(!history.render(3, &mut canvas));
        assert!(!history.render_current(&mut canvas));
    }

    #[test]
    fn test_render_onto_larger_canvas_pads_with_background() {
        let mut history = SnapshotHistory::new(None);
        history.record(&canvas_with(Color32::RED)).unwrap();

        let mut canvas = Canvas::new(16, 16, Color32::WHITE);
        canvas.fill(Color32::BLACK);
        assert!(history.render_current(&mut canvas));

        assert_eq!(canvas.get_pixel(2, 2), Some(Color32::RED));
        assert_eq!(canvas.get_pixel(12, 12), Some(Color32::WHITE));
    }

    #[test]
    fn test_capacity_from_config() {
        let mut history = SnapshotHistory::new(Some(2));
        for color in [Color32::RED, Color32::GREEN, Color32::BLUE] {
            history.record(&canvas_with(color)).unwrap();
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
    }
}
