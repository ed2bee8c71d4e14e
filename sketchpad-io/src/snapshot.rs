//! Whole-surface captures used by the undo history.
//!
//! A snapshot is the canvas encoded as PNG. Snapshots are immutable and clones share the
//! encoded bytes, so history can hand them around freely.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use sketchpad_core::{Canvas, CanvasError, Color32};
use thiserror::Error;

#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    png: Arc<[u8]>,
}

impl Snapshot {
    /// Encode the current pixels of `canvas`.
    pub fn capture(canvas: &Canvas) -> Result<Self, SnapshotError> {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return Err(SnapshotError::EmptySurface);
        }

        let rgba = canvas.to_rgba();
        let actual = rgba.len();
        let image = RgbaImage::from_raw(width, height, rgba).ok_or(CanvasError::BufferSize {
            expected: width as usize * height as usize * 4,
            actual,
        })?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(SnapshotError::Encode)?;

        tracing::trace!(width, height, bytes = png.len(), "snapshot captured");

        Ok(Self {
            width,
            height,
            png: png.into(),
        })
    }

    /// Decode back into a canvas of the captured size.
    pub fn decode(&self, background: Color32) -> Result<Canvas, SnapshotError> {
        let image = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(SnapshotError::Decode)?
            .to_rgba8();

        let canvas = Canvas::from_rgba(image.width(), image.height(), image.as_raw(), background)?;
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The encoded PNG file contents.
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot capture a surface with zero width or height")]
    EmptySurface,

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_then_decode_preserves_pixels() {
        let mut canvas = Canvas::new(16, 9, Color32::WHITE);
        canvas.set_pixel(3, 4, Color32::from_rgb(200, 10, 60));
        canvas.set_pixel(15, 8, Color32::BLACK);

        let snapshot = Snapshot::capture(&canvas).unwrap();
        assert_eq!((snapshot.width(), snapshot.height()), (16, 9));
        assert!(snapshot.as_png().starts_with(b"\x89PNG"));

        let decoded = snapshot.decode(Color32::WHITE).unwrap();
        assert_eq!(decoded, canvas);
    }

    #[test]
    fn test_clones_share_bytes() {
        let snapshot = Snapshot::capture(&Canvas::new(4, 4, Color32::WHITE)).unwrap();
        let copy = snapshot.clone();
        assert!(std::ptr::eq(snapshot.as_png(), copy.as_png()));
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let canvas = Canvas::new(0, 10, Color32::WHITE);
        assert!(matches!(
            Snapshot::capture(&canvas),
            Err(SnapshotError::EmptySurface)
        ));
    }

    #[test]
    fn test_debug_hides_payload() {
        let snapshot = Snapshot::capture(&Canvas::new(2, 2, Color32::WHITE)).unwrap();
        let text = format!("{:?}", snapshot);
        assert!(text.contains("width: 2"));
        assert!(text.contains("png_bytes"));
    }
}
