//! `#rrggbb` color strings, the format color pickers and config files speak.
//!
//! Drawing colors are always opaque: pixels are written without blending, and a
//! translucent pixel would not survive a PNG snapshot unchanged.

use ecolor::{Color32, HexColor, ParseHexColorError};
use thiserror::Error;

/// Parse `#rrggbb` (or the short `#rgb` form) into an opaque color.
/// The leading `#` is optional. The `#rrggbbaa` forms are accepted only when fully opaque.
pub fn parse_hex(s: &str) -> Result<Color32, ColorParseError> {
    let digits = s.trim().trim_start_matches('#');
    // from_str_radix would also take a leading '+'
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit {
            input: s.to_string(),
        });
    }

    let color = Color32::from_hex(&format!("#{digits}")).map_err(|reason| ColorParseError::Hex {
        input: s.to_string(),
        reason,
    })?;
    if !color.is_opaque() {
        return Err(ColorParseError::Translucent {
            input: s.to_string(),
        });
    }
    Ok(color)
}

/// Lowercase `#rrggbb`. Alpha is dropped.
pub fn format_hex(color: Color32) -> String {
    HexColor::Hex6(opaque(color)).to_string()
}

/// The same color with alpha forced to fully opaque.
pub fn opaque(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgb(r, g, b)
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color '{input}' is not a hex color: {reason:?}")]
    Hex {
        input: String,
        reason: ParseHexColorError,
    },

    #[error("color '{input}' contains a non-hex digit")]
    InvalidDigit { input: String },

    #[error("color '{input}' is not opaque")]
    Translucent { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(parse_hex("#000000"), Ok(Color32::BLACK));
        assert_eq!(parse_hex("#ffffff"), Ok(Color32::WHITE));
        assert_eq!(parse_hex("1e90FF"), Ok(Color32::from_rgb(0x1e, 0x90, 0xff)));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(parse_hex("#f00"), Ok(Color32::from_rgb(255, 0, 0)));
    }

    #[test]
    fn test_parse_alpha_forms() {
        assert_eq!(parse_hex("#336699ff"), Ok(Color32::from_rgb(0x33, 0x66, 0x99)));
        assert!(matches!(
            parse_hex("#33669980"),
            Err(ColorParseError::Translucent { .. })
        ));
        assert!(matches!(
            parse_hex("#f008"),
            Err(ColorParseError::Translucent { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_hex("#12345"),
            Err(ColorParseError::Hex {
                reason: ParseHexColorError::InvalidLength,
                ..
            })
        ));
        assert!(matches!(
            parse_hex("#gg0000"),
            Err(ColorParseError::InvalidDigit { .. })
        ));
        assert!(matches!(
            parse_hex("+12345"),
            Err(ColorParseError::InvalidDigit { .. })
        ));
        assert!(parse_hex("#ééé").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_hex(Color32::from_rgb(0x1e, 0x90, 0xff)), "#1e90ff");
        assert_eq!(format_hex(Color32::BLACK), "#000000");
    }

    #[test]
    fn test_opaque() {
        assert_eq!(
            opaque(Color32::from_rgb_additive(255, 0, 0)),
            Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(opaque(Color32::BLUE), Color32::BLUE);
        assert!(opaque(Color32::from_black_alpha(10)).is_opaque());
    }
}
