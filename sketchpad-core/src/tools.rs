// Tool selection and brush settings for the editor.
//
// All mode flags live in one ToolState owned by the editor; selecting a tool
// updates them together so they never disagree.

use std::fmt;
use std::str::FromStr;

use ecolor::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::canvas::{Canvas, Point};
use crate::color::opaque;
use crate::raster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Shape,
}

impl ToolKind {
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Shape => "Shape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    None,
    Rectangle,
    Square,
    Circle,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::None => "None",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
        }
    }

    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::None,
            ShapeKind::Rectangle,
            ShapeKind::Square,
            ShapeKind::Circle,
        ]
    }

    /// Geometry for a drag from `start` to `end`, or `None` for `ShapeKind::None`.
    ///
    /// - Rectangle spans start to end.
    /// - Square is anchored at start with side `min(|dx|, |dy|)`, extending right and down.
    /// - Circle is centered at start with radius half the drag length.
    pub fn resolve(&self, start: Point, end: Point) -> Option<Shape> {
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        match self {
            ShapeKind::None => None,
            ShapeKind::Rectangle => Some(Shape::Rect {
                x: start.x,
                y: start.y,
                w: dx,
                h: dy,
            }),
            ShapeKind::Square => {
                let side = dx.abs().min(dy.abs());
                Some(Shape::Rect {
                    x: start.x,
                    y: start.y,
                    w: side,
                    h: side,
                })
            }
            ShapeKind::Circle => Some(Shape::Circle {
                center: start,
                radius: start.distance(end) / 2.0,
            }),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ShapeKind::None),
            "rectangle" => Ok(ShapeKind::Rectangle),
            "square" => Ok(ShapeKind::Square),
            "circle" => Ok(ShapeKind::Circle),
            _ => Err(ToolError::UnknownShape {
                name: s.to_string(),
            }),
        }
    }
}

/// A committed shape in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Corner plus signed size, so dragging up or left works.
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Circle { center: Point, radius: f32 },
}

impl Shape {
    pub fn stroke(&self, canvas: &mut Canvas, width: f32, color: Color32) {
        match *self {
            Shape::Rect { x, y, w, h } => raster::stroke_rect(canvas, x, y, w, h, width, color),
            Shape::Circle { center, radius } => {
                raster::stroke_circle(canvas, center, radius, width, color)
            }
        }
    }

    pub fn fill(&self, canvas: &mut Canvas, color: Color32) {
        match *self {
            Shape::Rect { x, y, w, h } => raster::fill_rect(canvas, x, y, w, h, color),
            Shape::Circle { center, radius } => raster::fill_circle(canvas, center, radius, color),
        }
    }
}

/// Brush width in pixels, kept within the slider's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct BrushWidth(u32);

impl BrushWidth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: u32 = 5;

    /// Clamp `value` into `[MIN, MAX]`.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for BrushWidth {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for BrushWidth {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<BrushWidth> for u32 {
    fn from(width: BrushWidth) -> Self {
        width.0
    }
}

/// Every mode flag the toolbar controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub tool: ToolKind,
    pub shape: ShapeKind,
    pub color: Color32,
    pub width: BrushWidth,
    pub erasing: bool,
    pub filling: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            shape: ShapeKind::None,
            color: Color32::BLACK,
            width: BrushWidth::default(),
            erasing: false,
            filling: false,
        }
    }
}

impl ToolState {
    pub fn select_pencil(&mut self) {
        self.tool = ToolKind::Pencil;
        self.erasing = false;
        self.filling = false;
        self.shape = ShapeKind::None;
        debug!("Selected pencil");
    }

    pub fn select_eraser(&mut self) {
        self.tool = ToolKind::Eraser;
        self.erasing = true;
        self.filling = false;
        self.shape = ShapeKind::None;
        debug!("Selected eraser");
    }

    pub fn select_fill(&mut self) {
        self.tool = ToolKind::Fill;
        self.erasing = false;
        self.filling = true;
        self.shape = ShapeKind::None;
        debug!("Selected fill");
    }

    pub fn select_shape(&mut self, shape: ShapeKind) {
        self.tool = ToolKind::Shape;
        self.shape = shape;
        self.erasing = false;
        self.filling = false;
        debug!(?shape, "Selected shape");
    }

    /// Toggle filling of committed shapes without leaving the shape tool.
    pub fn set_shape_filled(&mut self, filled: bool) {
        self.filling = filled;
    }

    /// Alpha is dropped: strokes overwrite pixels without blending.
    pub fn set_color(&mut self, color: Color32) {
        self.color = opaque(color);
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = BrushWidth::new(width);
    }

    /// The shape tool with a concrete shape picked.
    pub fn active_shape(&self) -> Option<ShapeKind> {
        match (self.tool, self.shape) {
            (ToolKind::Shape, ShapeKind::None) => None,
            (ToolKind::Shape, shape) => Some(shape),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("unknown shape '{name}' (expected none, rectangle, square or circle)")]
    UnknownShape { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ToolState::default();
        assert_eq!(state.tool, ToolKind::Pencil);
        assert_eq!(state.shape, ShapeKind::None);
        assert_eq!(state.color, Color32::BLACK);
        assert_eq!(state.width.get(), 5);
        assert!(!state.erasing && !state.filling);
    }

    #[test]
    fn test_selectors_keep_flags_consistent() {
        let mut state = ToolState::default();

        state.select_shape(ShapeKind::Circle);
        assert_eq!(state.active_shape(), Some(ShapeKind::Circle));

        state.select_fill();
        assert_eq!(state.tool, ToolKind::Fill);
        assert!(state.filling);
        assert_eq!(state.shape, ShapeKind::None);

        state.select_eraser();
        assert!(state.erasing);
        assert!(!state.filling);

        state.select_shape(ShapeKind::Square);
        assert!(!state.erasing);
        assert!(!state.filling);

        state.select_pencil();
        assert_eq!(state.active_shape(), None);
    }

    #[test]
    fn test_shape_none_is_not_active() {
        let mut state = ToolState::default();
        state.select_shape(ShapeKind::None);
        assert_eq!(state.tool, ToolKind::Shape);
        assert_eq!(state.active_shape(), None);
    }

    #[test]
    fn test_set_color_drops_alpha() {
        let mut state = ToolState::default();
        state.set_color(Color32::from_rgb_additive(255, 0, 0));
        assert_eq!(state.color, Color32::from_rgb(255, 0, 0));

        state.set_color(Color32::from_black_alpha(77));
        assert!(state.color.is_opaque());
    }

    #[test]
    fn test_brush_width_is_clamped() {
        assert_eq!(BrushWidth::new(0).get(), 1);
        assert_eq!(BrushWidth::new(500).get(), 100);
        let width: BrushWidth = serde_json::from_str("250").unwrap();
        assert_eq!(width.get(), 100);
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("rectangle".parse::<ShapeKind>(), Ok(ShapeKind::Rectangle));
        assert_eq!("Circle".parse::<ShapeKind>(), Ok(ShapeKind::Circle));
        assert!("triangle".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_square_uses_shorter_side() {
        let shape = ShapeKind::Square
            .resolve(Point::new(10.0, 10.0), Point::new(40.0, 20.0))
            .unwrap();
        assert_eq!(
            shape,
            Shape::Rect {
                x: 10.0,
                y: 10.0,
                w: 10.0,
                h: 10.0
            }
        );
    }

    #[test]
    fn test_square_dragged_up_left_extends_down_right() {
        let shape = ShapeKind::Square
            .resolve(Point::new(50.0, 50.0), Point::new(30.0, 20.0))
            .unwrap();
        assert_eq!(
            shape,
            Shape::Rect {
                x: 50.0,
                y: 50.0,
                w: 20.0,
                h: 20.0
            }
        );
    }

    #[test]
    fn test_circle_radius_is_half_drag() {
        let shape = ShapeKind::Circle
            .resolve(Point::new(0.0, 0.0), Point::new(30.0, 40.0))
            .unwrap();
        assert_eq!(
            shape,
            Shape::Circle {
                center: Point::new(0.0, 0.0),
                radius: 25.0
            }
        );
    }

    #[test]
    fn test_none_resolves_to_nothing() {
        assert_eq!(
            ShapeKind::None.resolve(Point::default(), Point::new(5.0, 5.0)),
            None
        );
    }
}
