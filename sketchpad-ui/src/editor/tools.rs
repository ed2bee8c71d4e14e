// Drawing tools for the canvas editor.
// A tool reacts to pointer drags and releases; the editor picks one from the current ToolState.

use sketchpad_core::raster::{flood_fill, stroke_segment};
use sketchpad_core::{Canvas, Color32, Point, ShapeKind, ToolKind, ToolState};
use tracing::{debug, trace};

pub trait Tool {
    /// Pointer moved from `from` to `to` with the button held.
    fn drag(&self, _canvas: &mut Canvas, _from: Point, _to: Point) {}

    /// Button released at `end` after being pressed at `start`.
    fn release(&self, _canvas: &mut Canvas, _start: Point, _end: Point) {}

    fn name(&self) -> &str;

    fn cursor_size(&self) -> u32 {
        1
    }
}

/// Build the tool the toolbar currently selects.
pub fn tool_for(state: &ToolState) -> Box<dyn Tool> {
    let width = state.width.get();
    match state.tool {
        ToolKind::Pencil => Box::new(Pencil::new(width, state.color)),
        ToolKind::Eraser => Box::new(Eraser::new(width)),
        ToolKind::Fill => Box::new(Fill::new(state.color)),
        ToolKind::Shape => Box::new(ShapeTool {
            shape: state.shape,
            width,
            color: state.color,
            filled: state.filling,
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Pencil {
    pub size: u32,
    pub color: Color32,
}

impl Pencil {
    pub fn new(size: u32, color: Color32) -> Self {
        Self { size, color }
    }
}

impl Tool for Pencil {
    fn drag(&self, canvas: &mut Canvas, from: Point, to: Point) {
        trace!(?from, ?to, size = self.size, color = ?self.color, "Pencil stroke");
        stroke_segment(canvas, from, to, self.size as f32, self.color);
    }

    fn name(&self) -> &str {
        "Pencil"
    }

    fn cursor_size(&self) -> u32 {
        self.size
    }
}

#[derive(Debug, Clone)]
pub struct Eraser {
    pub size: u32,
    pub erase_color: Color32,
}

impl Eraser {
    /// Erases to white, the surface's background.
    pub fn new(size: u32) -> Self {
        debug!("Creating Eraser tool with size {}", size);
        Self {
            size,
            erase_color: Color32::WHITE,
        }
    }
}

impl Tool for Eraser {
    fn drag(&self, canvas: &mut Canvas, from: Point, to: Point) {
        trace!(?from, ?to, size = self.size, "Eraser stroke");
        stroke_segment(canvas, from, to, self.size as f32, self.erase_color);
    }

    fn name(&self) -> &str {
        "Eraser"
    }

    fn cursor_size(&self) -> u32 {
        self.size
    }
}

#[derive(Debug, Clone)]
pub struct Fill {
    pub color: Color32,
}

impl Fill {
    pub fn new(color: Color32) -> Self {
        Self { color }
    }
}

impl Tool for Fill {
    fn release(&self, canvas: &mut Canvas, _start: Point, end: Point) {
        if end.x < 0.0 || end.y < 0.0 {
            debug!(?end, "Fill released outside the canvas");
            return;
        }
        let filled = flood_fill(canvas, end.x as u32, end.y as u32, self.color);
        debug!(filled, "Flood fill applied");
    }

    fn name(&self) -> &str {
        "Fill"
    }
}

/// Commits one shape per drag: outline in the brush color, optionally filled.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    pub shape: ShapeKind,
    pub width: u32,
    pub color: Color32,
    pub filled: bool,
}

impl Tool for ShapeTool {
    fn release(&self, canvas: &mut Canvas, start: Point, end: Point) {
        let Some(shape) = self.shape.resolve(start, end) else {
            trace!("No shape selected, nothing to commit");
            return;
        };

        debug!(?shape, filled = self.filled, "Committing shape");
        shape.stroke(canvas, self.width as f32, self.color);
        if self.filled {
            shape.fill(canvas, self.color);
        }
    }

    fn name(&self) -> &str {
        self.shape.label()
    }

    fn cursor_size(&self) -> u32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_pencil() {
        let mut canvas = Canvas::new(20, 20, Color32::WHITE);
        let pencil = Pencil::new(3, Color32::BLACK);

        pencil.drag(&mut canvas, p(5.0, 5.0), p(15.0, 5.0));

        for x in 5..15 {
            assert_eq!(canvas.get_pixel(x, 5), Some(Color32::BLACK));
        }
        assert_eq!(canvas.get_pixel(10, 10), Some(Color32::WHITE));
    }

    #[test]
    fn test_pencil_release_draws_nothing() {
        let mut canvas = Canvas::new(20, 20, Color32::WHITE);
        Pencil::new(3, Color32::BLACK).release(&mut canvas, p(5.0, 5.0), p(5.0, 5.0));
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_eraser_to_white() {
        let mut canvas = Canvas::new(10, 10, Color32::BLACK);
        let eraser = Eraser::new(3);

        eraser.drag(&mut canvas, p(5.5, 5.5), p(5.5, 5.5));

        for y in 4..=6 {
            assert_eq!(canvas.get_pixel(5, y), Some(Color32::WHITE));
        }
    }

    #[test]
    fn test_fill_on_release() {
        let mut canvas = Canvas::new(5, 5, Color32::WHITE);
        Fill::new(Color32::RED).release(&mut canvas, p(0.0, 0.0), p(2.5, 2.5));
        assert!(canvas.pixels().iter().all(|c| *c == Color32::RED));
    }

    #[test]
    fn test_fill_outside_is_ignored() {
        let mut canvas = Canvas::new(5, 5, Color32::WHITE);
        Fill::new(Color32::RED).release(&mut canvas, p(0.0, 0.0), p(-1.0, 2.0));
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_shape_tool_outline_and_fill() {
        let mut outline = Canvas::new(40, 40, Color32::WHITE);
        let mut filled = outline.clone();

        let mut tool = ShapeTool {
            shape: ShapeKind::Rectangle,
            width: 2,
            color: Color32::BLUE,
            filled: false,
        };
        tool.release(&mut outline, p(10.0, 10.0), p(30.0, 30.0));
        assert_eq!(outline.get_pixel(20, 20), Some(Color32::WHITE));
        assert_eq!(outline.get_pixel(10, 20), Some(Color32::BLUE));

        tool.filled = true;
        tool.release(&mut filled, p(10.0, 10.0), p(30.0, 30.0));
        assert_eq!(filled.get_pixel(20, 20), Some(Color32::BLUE));
    }

    #[test]
    fn test_tool_for_follows_state() {
        let mut state = ToolState::default();
        assert_eq!(tool_for(&state).name(), "Pencil");

        state.select_eraser();
        assert_eq!(tool_for(&state).name(), "Eraser");

        state.select_shape(ShapeKind::Circle);
        let tool = tool_for(&state);
        assert_eq!(tool.name(), "Circle");
        assert_eq!(tool.cursor_size(), 5);
    }
}
