use crate::constants::DEFAULT_QUALITY;
use crate::error::Result;
use crate::formats::OutputFormat;
use crate::processing::encode;
use image::{DynamicImage, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const BACKGROUND: Rgb<u8> = Rgb([73, 109, 137]);
const RECTANGLE: Rgb<u8> = Rgb([255, 255, 255]);
const ELLIPSE: Rgb<u8> = Rgb([255, 0, 0]);

/// One generated test image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleImage {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

pub const SAMPLE_SET: &[SampleImage] = &[
    SampleImage { name: "test_large.jpg", width: 3000, height: 2000, format: OutputFormat::Jpeg },
    SampleImage { name: "test_medium.jpg", width: 1500, height: 1000, format: OutputFormat::Jpeg },
    SampleImage { name: "test_small.jpg", width: 800, height: 600, format: OutputFormat::Jpeg },
    SampleImage { name: "test_large.png", width: 3000, height: 2000, format: OutputFormat::Png },
    SampleImage { name: "test_medium.png", width: 1500, height: 1000, format: OutputFormat::Png },
    SampleImage { name: "test_large.webp", width: 3000, height: 2000, format: OutputFormat::WebP },
    SampleImage { name: "测试图片.jpg", width: 1200, height: 800, format: OutputFormat::Jpeg },
    SampleImage { name: "テスト画像.png", width: 1200, height: 800, format: OutputFormat::Png },
];

/// Flat background, a white centred rectangle and a red ellipse on top.
pub fn render_sample(width: u32, height: u32) -> RgbImage {
    let (rect_x0, rect_x1) = (width / 4, width * 3 / 4);
    let (rect_y0, rect_y1) = (height / 4, height * 3 / 4);

    // Ellipse bounded by the middle third in both directions.
    let (ell_x0, ell_x1) = (width / 3, width * 2 / 3);
    let (ell_y0, ell_y1) = (height / 3, height * 2 / 3);
    let cx = (ell_x0 + ell_x1) as f64 / 2.0;
    let cy = (ell_y0 + ell_y1) as f64 / 2.0;
    let rx = ((ell_x1 - ell_x0) as f64 / 2.0).max(0.5);
    let ry = ((ell_y1 - ell_y0) as f64 / 2.0).max(0.5);

    RgbImage::from_fn(width, height, |x, y| {
        let dx = (x as f64 + 0.5 - cx) / rx;
        let dy = (y as f64 + 0.5 - cy) / ry;
        if dx * dx + dy * dy <= 1.0 {
            ELLIPSE
        } else if (rect_x0..=rect_x1).contains(&x) && (rect_y0..=rect_y1).contains(&y) {
            RECTANGLE
        } else {
            BACKGROUND
        }
    })
}

/// Writes one sample, returning its path.
pub fn write_sample(dir: &Path, sample: &SampleImage) -> Result<PathBuf> {
    let img = DynamicImage::ImageRgb8(render_sample(sample.width, sample.height));
    let bytes = encode(&img, sample.format, DEFAULT_QUALITY)?;
    let path = dir.join(sample.name);
    fs::write(&path, bytes)?;
    info!("created {} ({}x{})", sample.name, sample.width, sample.height);
    Ok(path)
}

/// Fills `dir` with the full sample set, creating it if needed.
pub fn create_sample_set(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    SAMPLE_SET
        .iter()
        .map(|sample| write_sample(dir, sample))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_sample_layout() {
        let img = render_sample(120, 80);
        assert_eq!(img.dimensions(), (120, 80));
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(60, 40), ELLIPSE);
        // Inside the rectangle, outside the ellipse.
        assert_eq!(*img.get_pixel(32, 22), RECTANGLE);
        assert_eq!(*img.get_pixel(119, 79), BACKGROUND);
    }

    #[test]
    fn test_render_tiny_sample() {
        let img = render_sample(1, 1);
        assert_eq!(img.dimensions(), (1, 1));
    }

    #[test]
    fn test_write_sample_round_trips_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let sample = SampleImage {
            name: "テスト.png",
            width: 90,
            height: 60,
            format: OutputFormat::Png,
        };
        let path = write_sample(temp_dir.path(), &sample).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (90, 60));
    }

    #[test]
    fn test_sample_set_names() {
        assert_eq!(SAMPLE_SET.len(), 8);
        assert!(SAMPLE_SET.iter().any(|s| s.name == "测试图片.jpg"));
        assert!(SAMPLE_SET
            .iter()
            .all(|s| crate::walk::is_image_file(Path::new(s.name))));
    }
}
