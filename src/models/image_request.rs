use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters identifying one variant of a product image.
///
/// Field names on the wire follow the historical JSON shape (`Name`,
/// `Format`, `BackgroundColor`, ...). A request is never mutated after it
/// has been built; the service only clones it when it needs to echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRequest {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub watermark: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub width: Option<i32>,
}

impl ImageRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: None,
            watermark: None,
            background_color: None,
            height: None,
            width: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_watermark(mut self, text: impl Into<String>) -> Self {
        self.watermark = Some(text.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Canonical cache key.
    ///
    /// Every field is emitted, absent ones as `null`, and object keys are
    /// sorted, so the key only depends on field values.
    pub fn cache_key(&self) -> String {
        json!({
            "Name": self.name,
            "Format": self.format,
            "Watermark": self.watermark,
            "BackgroundColor": self.background_color,
            "Height": self.height,
            "Width": self.width,
        })
        .to_string()
    }

    /// Both dimensions, or nothing. A lone width or height is ignored.
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        }
    }

    pub fn watermark_text(&self) -> Option<&str> {
        self.watermark.as_deref().filter(|text| !text.is_empty())
    }

    pub fn background(&self) -> Option<&str> {
        self.background_color.as_deref().filter(|color| !color.is_empty())
    }
}
