#![allow(dead_code)]

use dir_squeeze::render_sample;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes a real image of the given size, creating parent directories.
pub fn create_test_image(path: &Path, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    DynamicImage::ImageRgb8(render_sample(width, height))
        .save_with_format(path, format)
        .unwrap();
    path.to_path_buf()
}

pub fn create_test_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    create_test_image(&dir.join(name), width, height, ImageFormat::Jpeg)
}

/// A file with a `.jpg` name whose bytes stop in the middle of the header.
pub fn create_corrupt_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = create_test_jpeg(dir, name, 64, 64);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..32]).unwrap();
    path
}

pub fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(ext))
        .collect();
    files.sort();
    files
}

pub fn find_report(output_dir: &Path) -> PathBuf {
    fs::read_dir(output_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("compression_report_") && n.ends_with(".txt"))
        })
        .expect("report written")
}
