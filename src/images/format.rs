use std::fmt;

use image::ImageFormat;

/// Encodings the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Tiff,
    Gif,
    Bmp,
}

// Looked up case-insensitively; anything not listed encodes as PNG.
const FORMAT_NAMES: &[(&str, OutputFormat)] = &[
    ("JPG", OutputFormat::Jpeg),
    ("TIFF", OutputFormat::Tiff),
    ("GIF", OutputFormat::Gif),
    ("BMP", OutputFormat::Bmp),
    ("PNG", OutputFormat::Png),
];

impl OutputFormat {
    pub fn from_name(name: Option<&str>) -> Self {
        let Some(name) = name.map(str::trim) else {
            return OutputFormat::Png;
        };

        FORMAT_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, format)| *format)
            .unwrap_or(OutputFormat::Png)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Tiff => "image/tiff",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Bmp => "image/bmp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }

    fn label(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::Gif => "GIF",
            OutputFormat::Bmp => "BMP",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_names_fall_back_to_png() {
        assert_eq!(OutputFormat::from_name(None), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name(Some("unknown")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name(Some("")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name(Some("webp")), OutputFormat::Png);
        // only the short names are recognised
        assert_eq!(OutputFormat::from_name(Some("jpeg")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name(Some("TIF")), OutputFormat::Png);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(OutputFormat::from_name(Some("jpg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_name(Some("Jpg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_name(Some("tiff")), OutputFormat::Tiff);
        assert_eq!(OutputFormat::from_name(Some("GIF")), OutputFormat::Gif);
        assert_eq!(OutputFormat::from_name(Some("bMp")), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_name(Some("png")), OutputFormat::Png);
    }

    #[test]
    fn mime_types_follow_the_encoding() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Bmp.mime_type(), "image/bmp");
        assert_eq!(OutputFormat::Png.to_string(), "PNG");
    }
}
