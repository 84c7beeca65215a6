use image::Rgba;

use super::TransformError;

const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("transparent", [0, 0, 0, 0]),
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("lightgray", [211, 211, 211, 255]),
    ("lightgrey", [211, 211, 211, 255]),
    ("darkgray", [169, 169, 169, 255]),
    ("darkgrey", [169, 169, 169, 255]),
    ("whitesmoke", [245, 245, 245, 255]),
    ("gainsboro", [220, 220, 220, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("purple", [128, 0, 128, 255]),
    ("teal", [0, 128, 128, 255]),
    ("orange", [255, 165, 0, 255]),
    ("pink", [255, 192, 203, 255]),
    ("brown", [165, 42, 42, 255]),
    ("beige", [245, 245, 220, 255]),
    ("ivory", [255, 255, 240, 255]),
    ("gold", [255, 215, 0, 255]),
    ("coral", [255, 127, 80, 255]),
    ("salmon", [250, 128, 114, 255]),
    ("khaki", [240, 230, 140, 255]),
    ("crimson", [220, 20, 60, 255]),
    ("indigo", [75, 0, 130, 255]),
    ("violet", [238, 130, 238, 255]),
    ("skyblue", [135, 206, 235, 255]),
    ("steelblue", [70, 130, 180, 255]),
];

/// Parses an HTML-style color: `#RGB`, `#RRGGBB`, `#AARRGGBB` or a CSS
/// color name.
pub fn parse_color(input: &str) -> Result<Rgba<u8>, TransformError> {
    let trimmed = input.trim();
    let invalid = || TransformError::InvalidColor(input.to_string());

    let Some(hex) = trimmed.strip_prefix('#') else {
        return NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, rgba)| Rgba(*rgba))
            .ok_or_else(invalid);
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        3 => {
            // #RGB expands each nibble: "f80" -> ff8800
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                let pair: String = [digit, digit].iter().collect();
                *slot = channel(&pair)?;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 => Ok(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
            channel(&hex[0..2])?,
        ])),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#ff8800").unwrap(), Rgba([255, 136, 0, 255]));
        assert_eq!(parse_color("#F80").unwrap(), Rgba([255, 136, 0, 255]));
        assert_eq!(parse_color("#80ff0000").unwrap(), Rgba([255, 0, 0, 128]));
        assert_eq!(parse_color("  #000000 ").unwrap(), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(parse_color("Red").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("WHITE").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("transparent").unwrap(), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "#", "#12", "#12345", "#gggggg", "notacolor", "#ff00ff00ff"] {
            assert!(
                matches!(parse_color(input), Err(TransformError::InvalidColor(_))),
                "{input} should be rejected"
            );
        }
    }
}
