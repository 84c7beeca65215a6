use image::DynamicImage;
use log::debug;

use super::tools::{add_watermark, encode_image, fill_background, resize};
use super::{parse_color, EncodedImage, OutputFormat, PipelineError, TransformError};
use crate::models::ImageRequest;

/// One transform step, carrying the request value it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    Background(&'a str),
    Watermark(&'a str),
    Resize(i32, i32),
}

impl Stage<'_> {
    pub fn apply(self, image: DynamicImage) -> Result<DynamicImage, TransformError> {
        match self {
            Stage::Background(color) => Ok(fill_background(image, parse_color(color)?)),
            Stage::Watermark(text) => add_watermark(image, text),
            Stage::Resize(width, height) => resize(image, width, height),
        }
    }
}

/// Transform stages `render` runs for `request`, in execution order.
/// Encoding always follows them.
pub fn stages(request: &ImageRequest) -> Vec<Stage<'_>> {
    let mut stages = Vec::with_capacity(3);
    if let Some(color) = request.background() {
        stages.push(Stage::Background(color));
    }
    if let Some(text) = request.watermark_text() {
        stages.push(Stage::Watermark(text));
    }
    if let Some((width, height)) = request.dimensions() {
        stages.push(Stage::Resize(width, height));
    }
    stages
}

/// Runs the transformation pipeline on a decoded source image.
///
/// Compositing happens at source resolution; resize and encode come last.
/// The first failing stage aborts the run.
pub fn render(source: DynamicImage, request: &ImageRequest) -> Result<EncodedImage, PipelineError> {
    let plan = stages(request);
    let format = OutputFormat::from_name(request.format.as_deref());
    debug!("Rendering '{}' through {:?} as {}", request.name, plan, format);

    let image = plan
        .into_iter()
        .try_fold(source, |image, stage| stage.apply(image))?;

    Ok(encode_image(image, format)?)
}
