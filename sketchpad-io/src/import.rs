//! Loading a user-picked image onto the surface.

use std::fs;
use std::path::{Path, PathBuf};

use sketchpad_core::{Canvas, Color32};
use thiserror::Error;

/// Extensions offered by the open dialog. Advisory: decoding is the real gate.
pub const IMPORT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Whether `path` carries one of [`IMPORT_EXTENSIONS`] (case-insensitive).
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            IMPORT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

/// Decode image file contents, sniffing the format from the bytes.
///
/// Translucent pixels are flattened over `background`, as if drawn onto a blank surface.
pub fn decode_image(bytes: &[u8], background: Color32) -> Result<Canvas, ImportError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImportError::Empty);
    }

    let mut rgba = image.into_raw();
    let bg = background.to_srgba_unmultiplied();
    for px in rgba.chunks_exact_mut(4) {
        let alpha = px[3] as u32;
        if alpha == 255 {
            continue;
        }
        for c in 0..3 {
            px[c] = ((px[c] as u32 * alpha + bg[c] as u32 * (255 - alpha) + 127) / 255) as u8;
        }
        px[3] = 255;
    }

    Ok(Canvas::from_rgba(width, height, &rgba, background)?)
}

/// Read and decode the image at `path`.
pub fn load_image(path: impl AsRef<Path>, background: Color32) -> Result<Canvas, ImportError> {
    let path = path.as_ref();
    if !is_supported_image(path) {
        tracing::warn!(path = %path.display(), "file extension not in the image filter, trying anyway");
    }

    let bytes = fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let canvas = decode_image(&bytes, background).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "image could not be decoded");
        e
    })?;

    tracing::info!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "image loaded"
    );
    Ok(canvas)
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels")]
    Empty,

    #[error(transparent)]
    Canvas(#[from] sketchpad_core::CanvasError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_extension_filter() {
        assert!(is_supported_image("cat.PNG"));
        assert!(is_supported_image("dir/photo.jpeg"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("no_extension"));
    }

    #[test]
    fn test_decode_png() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 255, 255]));
        image.put_pixel(2, 1, Rgba([255, 0, 0, 255]));

        let canvas = decode_image(&encode(&image, ImageFormat::Png), Color32::WHITE).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (3, 2));
        assert_eq!(canvas.get_pixel(0, 0), Some(Color32::BLUE));
        assert_eq!(canvas.get_pixel(2, 1), Some(Color32::RED));
    }

    #[test]
    fn test_transparent_pixels_become_background() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let canvas = decode_image(&encode(&image, ImageFormat::Png), Color32::WHITE).unwrap();
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode_image(b"definitely not an image", Color32::WHITE).unwrap_err();
        assert!(matches!(err, ImportError::Decode(_)));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_image("/nonexistent/dir/pic.png", Color32::WHITE).unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }
}
