use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, Pixel, Rgba, RgbaImage};

use super::{DecodeError, EncodeError, EncodedImage, OutputFormat, TransformError};

/// Largest width or height a resize may request.
pub const MAX_DIMENSION: u32 = 8192;

/// font8x8 glyphs are 8x8 bits; each bit is drawn as a 3x3 block.
const WATERMARK_GLYPH_SCALE: u32 = 3;
const WATERMARK_COLOR: Rgba<u8> = Rgba([255, 255, 255, 200]);

const JPEG_QUALITY: u8 = 85;

pub fn decode_image(data: &[u8]) -> Result<DynamicImage, DecodeError> {
    Ok(image::load_from_memory(data)?)
}

/// Flattens `img` onto an opaque canvas of `color`, same size, unscaled.
pub fn fill_background(img: DynamicImage, color: Rgba<u8>) -> DynamicImage {
    let (width, height) = img.dimensions();
    let mut canvas = RgbaImage::from_pixel(width, height, color);
    imageops::overlay(&mut canvas, &img.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas)
}

/// Draws `text` centered on the image in semi-transparent white.
///
/// The result goes through an in-memory PNG so later stages always start
/// from a plain decoded RGBA buffer. Glyphs falling outside the image are
/// clipped.
pub fn add_watermark(img: DynamicImage, text: &str) -> Result<DynamicImage, TransformError> {
    let mut canvas = img.to_rgba8();
    let (img_w, img_h) = canvas.dimensions();

    let cell = (8 * WATERMARK_GLYPH_SCALE) as i64;
    let text_w = cell * text.chars().count() as i64;
    let origin_x = (img_w as i64 - text_w) / 2;
    let origin_y = (img_h as i64 - cell) / 2;

    for (index, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let glyph_x = origin_x + cell * index as i64;

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                // Least significant bit is the leftmost pixel.
                if bits & (1 << col) == 0 {
                    continue;
                }
                let base_x = glyph_x + col as i64 * WATERMARK_GLYPH_SCALE as i64;
                let base_y = origin_y + row as i64 * WATERMARK_GLYPH_SCALE as i64;
                for dy in 0..WATERMARK_GLYPH_SCALE as i64 {
                    for dx in 0..WATERMARK_GLYPH_SCALE as i64 {
                        let (x, y) = (base_x + dx, base_y + dy);
                        if x < 0 || y < 0 || x >= img_w as i64 || y >= img_h as i64 {
                            continue;
                        }
                        canvas.get_pixel_mut(x as u32, y as u32).blend(&WATERMARK_COLOR);
                    }
                }
            }
        }
    }

    let mut intermediate = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut intermediate), ImageFormat::Png)?;
    Ok(image::load_from_memory_with_format(&intermediate, ImageFormat::Png)?)
}

/// Resizes to exactly `width` x `height` with a bicubic filter. The aspect
/// ratio is not preserved.
pub fn resize(img: DynamicImage, width: i32, height: i32) -> Result<DynamicImage, TransformError> {
    let (target_w, target_h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(TransformError::InvalidDimensions { width, height }),
    };

    if target_w > MAX_DIMENSION || target_h > MAX_DIMENSION {
        return Err(TransformError::DimensionsTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }

    Ok(img.resize_exact(target_w, target_h, FilterType::CatmullRom))
}

pub fn encode_image(img: DynamicImage, format: OutputFormat) -> Result<EncodedImage, EncodeError> {
    let mut output = Vec::new();

    let result = match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let mut encoder = JpegEncoder::new_with_quality(&mut output, JPEG_QUALITY);
            encoder.encode_image(&img.to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(img.to_rgba8())
            .write_to(&mut Cursor::new(&mut output), format.image_format()),
    };

    result.map_err(|source| EncodeError { format, source })?;

    Ok(EncodedImage {
        data: output,
        format,
    })
}
