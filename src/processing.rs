use crate::config::CompressionConfig;
use crate::constants::{
    DEFAULT_BACKGROUND, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, OXIPNG_PRESET,
    ZOPFLI_ITERATIONS,
};
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat, RgbImage};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;
use tracing::debug;

/// Encoded result of one image transform.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub source_format: ImageFormat,
    pub source_dimensions: (u32, u32),
    pub dimensions: (u32, u32),
}

impl Transformed {
    pub fn resized(&self) -> bool {
        self.dimensions != self.source_dimensions
    }
}

/// Core image pipeline: decode -> resize -> convert color -> encode.
///
/// Pure over in-memory buffers; reading and writing files is the caller's job.
///
/// # Returns
/// * `Ok(Transformed)` - Encoded bytes plus the format actually written
/// * `Err(CompressionError::Decode)` - If `bytes` is not a supported image
/// * `Err(CompressionError::Encode)` - If the target encoder rejects the image
pub fn transform(bytes: &[u8], config: &CompressionConfig) -> Result<Transformed> {
    let source_format = image::guess_format(bytes).map_err(CompressionError::Decode)?;
    let img = image::load_from_memory_with_format(bytes, source_format)
        .map_err(CompressionError::Decode)?;
    let source_dimensions = img.dimensions();

    let format = config.format().resolve(source_format)?;
    let img = resize_image(img, config.max_width());
    let dimensions = img.dimensions();
    let img = prepare_for_format(img, format);
    if format.is_lossless_only() {
        debug!("{} is lossless, quality {} only tunes effort", format, config.quality());
    }
    let bytes = encode(&img, format, config.quality())?;

    debug!(
        "transformed {:?} {}x{} -> {} {}x{} ({} bytes)",
        source_format,
        source_dimensions.0,
        source_dimensions.1,
        format,
        dimensions.0,
        dimensions.1,
        bytes.len()
    );

    Ok(Transformed {
        bytes,
        format,
        source_format,
        source_dimensions,
        dimensions,
    })
}

/// Dimensions after fitting `width` into `max_width`, keeping the aspect ratio.
///
/// Images already at or below the limit keep their size.
pub fn target_dimensions(width: u32, height: u32, max_width: Option<u32>) -> (u32, u32) {
    match max_width {
        Some(max) if max > 0 && width > max => {
            let scale = max as f64 / width as f64;
            let new_height = ((height as f64 * scale).round() as u32).max(1);
            (max, new_height)
        }
        _ => (width, height),
    }
}

pub fn resize_image(img: DynamicImage, max_width: Option<u32>) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, max_width);
    if (new_width, new_height) == (width, height) {
        return img;
    }
    debug!(
        "resizing {}x{} -> {}x{}",
        width, height, new_width, new_height
    );
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Converts the color mode into one `format` can store.
pub fn prepare_for_format(img: DynamicImage, format: OutputFormat) -> DynamicImage {
    let has_alpha = img.color().has_alpha();
    if has_alpha && !format.supports_alpha() {
        return DynamicImage::ImageRgb8(flatten_alpha(&img, DEFAULT_BACKGROUND));
    }
    match format {
        OutputFormat::Jpeg => {
            if matches!(img, DynamicImage::ImageLuma8(_)) {
                img
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
        }
        OutputFormat::WebP | OutputFormat::Bmp | OutputFormat::Tiff => {
            if has_alpha {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
        }
        OutputFormat::Png => match img {
            DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb16(img.to_rgb16()),
            DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba16(img.to_rgba16()),
            other => other,
        },
    }
}

/// Composites the image over a solid background, dropping alpha.
pub fn flatten_alpha(img: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |channel: u8, bg: u8| -> u8 {
            ((channel as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
        };
        out.put_pixel(
            x,
            y,
            image::Rgb([
                blend(pixel[0], background[0]),
                blend(pixel[1], background[1]),
                blend(pixel[2], background[2]),
            ]),
        );
    }
    out
}

/// Encodes at `quality`; quality is ignored by BMP and TIFF.
pub fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img, quality),
        OutputFormat::Png => encode_png(img, quality),
        OutputFormat::WebP => encode_webp(img, quality),
        OutputFormat::Bmp | OutputFormat::Tiff => {
            let mut buf = Cursor::new(Vec::new());
            img.write_to(&mut buf, format.to_image_format())
                .map_err(|e| CompressionError::encode(format, e))?;
            Ok(buf.into_inner())
        }
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        let result = match img {
            DynamicImage::ImageLuma8(gray) => encoder.encode(
                gray.as_raw(),
                gray.width(),
                gray.height(),
                ExtendedColorType::L8,
            ),
            DynamicImage::ImageRgb8(rgb) => encoder.encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            ),
            other => {
                return Err(CompressionError::encode(
                    OutputFormat::Jpeg,
                    format!("cannot store {:?} pixels", other.color()),
                ))
            }
        };
        result.map_err(|e| CompressionError::encode(OutputFormat::Jpeg, e))?;
    }
    Ok(buf)
}

/// Quality picks the oxipng deflater: >=90 Zopfli, >=70 high libdeflate,
/// otherwise standard libdeflate.
pub fn png_options(quality: u8) -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.force = true;
    options.deflate = if quality >= 90 {
        match NonZeroU8::new(ZOPFLI_ITERATIONS) {
            Some(iterations) => Deflaters::Zopfli { iterations },
            None => Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            },
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };
    options
}

fn encode_png(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| CompressionError::encode(OutputFormat::Png, e))?;
    oxipng::optimize_from_memory(buf.get_ref(), &png_options(quality))
        .map_err(|e| CompressionError::encode(OutputFormat::Png, format!("oxipng: {}", e)))
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let encoder = match img {
        DynamicImage::ImageRgb8(rgb) => webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height()),
        DynamicImage::ImageRgba8(rgba) => {
            webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        }
        other => {
            return Err(CompressionError::encode(
                OutputFormat::WebP,
                format!("cannot store {:?} pixels", other.color()),
            ))
        }
    };
    let memory = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| CompressionError::encode(OutputFormat::WebP, format!("{:?}", e)))?;
    Ok(memory.to_vec())
}
