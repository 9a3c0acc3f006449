use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dir_squeeze::formats::{FormatChoice, OutputFormat};
use dir_squeeze::naming::{transliterate_stem, FileNamer, NamingStrategy};
use dir_squeeze::processing::{resize_image, transform};
use dir_squeeze::{render_sample, CompressionConfig};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tempfile::TempDir;

fn encoded_sample(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(render_sample(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

fn bench_image_resizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_resizing");

    for size in [Small, Medium, Large].iter() {
        let (width, height) = match size {
            Small => (800, 600),
            Medium => (1920, 1080),
            Large => (3840, 2160),
        };
        let img = DynamicImage::ImageRgb8(render_sample(width, height));

        group.bench_with_input(
            BenchmarkId::new("resize", format!("{}x{}", width, height)),
            &img,
            |b, img| b.iter(|| resize_image(black_box(img.clone()), black_box(Some(width / 2)))),
        );
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let bytes = encoded_sample(1920, 1080);
    let mut group = c.benchmark_group("transform");
    group.sample_size(10);

    for format in [OutputFormat::WebP, OutputFormat::Jpeg, OutputFormat::Png] {
        let config = CompressionConfig::new(
            temp_dir.path(),
            Some(1280),
            FormatChoice::Convert(format),
            Some(85),
            false,
            NamingStrategy::Random,
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("to", format), &config, |b, config| {
            b.iter(|| transform(black_box(&bytes), black_box(config)))
        });
    }

    group.finish();
}

fn bench_naming(c: &mut Criterion) {
    c.bench_function("transliterate_stem", |b| {
        b.iter(|| transliterate_stem(black_box("Urlaub am Strand – Ägypten 2023 测试图片")))
    });

    c.bench_function("random_names_1000", |b| {
        b.iter(|| {
            let mut namer = FileNamer::with_seed(NamingStrategy::Random, 42);
            for _ in 0..1000 {
                black_box(namer.sanitize("IMG_0001.JPG"));
            }
        })
    });
}

enum ImageSize {
    Small,
    Medium,
    Large,
}

use ImageSize::*;

criterion_group!(benches, bench_image_resizing, bench_transform, bench_naming);
criterion_main!(benches);
