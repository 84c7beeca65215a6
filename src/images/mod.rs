use thiserror::Error;

mod color;
mod format;
pub mod pipeline;
pub mod tools;

pub use color::parse_color;
pub use format::OutputFormat;
pub use pipeline::{render, stages, Stage};
pub use tools::{add_watermark, decode_image, encode_image, fill_background, resize};

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Dimensions {width}x{height} exceed the {max}px limit")]
    DimensionsTooLarge { width: i32, height: i32, max: u32 },

    #[error("Invalid {field}: {value:?}")]
    InvalidParameter { field: &'static str, value: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Intermediate encoding failed: {0}")]
    Intermediate(#[from] image::ImageError),
}

#[derive(Error, Debug)]
#[error("Failed to decode image: {0}")]
pub struct DecodeError(#[from] pub image::ImageError);

#[derive(Error, Debug)]
#[error("{format} encoding failed: {source}")]
pub struct EncodeError {
    pub format: OutputFormat,
    #[source]
    pub source: image::ImageError,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Final output of the pipeline: encoded bytes plus the encoding used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
