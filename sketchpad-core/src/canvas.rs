// The drawing surface every tool paints on.
// A flat row-major buffer of Color32, plus the background color that clear() restores.

use ecolor::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// A position on the surface in pixel units. Pointer input is fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color32>,
    background: Color32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        info!(
            "Creating new canvas of size {}x{} with background color {:?}",
            width, height, background
        );

        let total_pixels = width as usize * height as usize;
        debug!("Total pixels to initialize: {}", total_pixels);

        Self {
            width,
            height,
            pixels: vec![background; total_pixels],
            background,
        }
    }

    /// Build a canvas from tightly packed RGBA8 bytes, as produced by an image decoder.
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
        background: Color32,
    ) -> Result<Self, CanvasError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(CanvasError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }

        let pixels = rgba
            .chunks_exact(4)
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
            background,
        })
    }

    /// Tightly packed RGBA8 bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            out.extend_from_slice(&pixel.to_srgba_unmultiplied());
        }
        out
    }

    fn is_valid_coordinate(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn coord_to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if !self.is_valid_coordinate(x, y) {
            trace!("Requested pixel at invalid coordinates ({}, {})", x, y);
            return None;
        }
        Some(self.pixels[self.coord_to_index(x, y)])
    }

    /// Set one pixel. Returns false when (x, y) is outside the surface.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) -> bool {
        if !self.is_valid_coordinate(x, y) {
            warn!(
                "Attempted to set pixel color at invalid coordinates ({}, {})",
                x, y
            );
            return false;
        }

        let index = self.coord_to_index(x, y);
        self.pixels[index] = color;
        true
    }

    /// Signed variant used by the rasterizer; anything off-surface is clipped silently.
    pub(crate) fn plot(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = self.coord_to_index(x as u32, y as u32);
        self.pixels[index] = color;
    }

    pub fn fill(&mut self, color: Color32) {
        trace!("Filling canvas {:?}", color);
        self.pixels.fill(color);
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        info!("Clearing canvas");
        let background = self.background;
        self.fill(background);
    }

    /// Change the pixel dimensions. Like a resized HTML canvas, the old content is dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!(
            "Resizing canvas from {}x{} to {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; width as usize * height as usize];
    }

    /// Copy `image` onto this surface with its top-left corner at (0, 0).
    /// Parts of `image` that fall outside this surface are clipped.
    pub fn draw_image_at_origin(&mut self, image: &Canvas) {
        let w = self.width.min(image.width);
        let h = self.height.min(image.height);
        debug!(
            "Drawing {}x{} image at origin, {}x{} region visible",
            image.width, image.height, w, h
        );

        for y in 0..h {
            let src = image.coord_to_index(0, y);
            let dst = self.coord_to_index(0, y);
            self.pixels[dst..dst + w as usize]
                .copy_from_slice(&image.pixels[src..src + w as usize]);
        }
    }

    /// True when every pixel equals the background color.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| *p == self.background)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Color32::WHITE)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CanvasError {
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
