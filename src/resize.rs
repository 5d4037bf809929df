//! Batch photo resizing.
//!
//! Shrinks every photo in a folder to a quality preset's maximum width
//! and re-encodes as JPEG. Files are independent, so the work runs on
//! the rayon pool; a failed file is reported and skipped.

use crate::cli::ImageQuality;
use crate::error::{Result, VisitReportError};
use image::codecs::jpeg::JpegEncoder;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOutcome {
    pub resized: usize,
    pub failed: usize,
}

pub fn resize_folder(
    folder: &Path,
    output: &Path,
    quality: ImageQuality,
    verbose: bool,
) -> Result<ResizeOutcome> {
    if !folder.exists() {
        return Err(VisitReportError::FolderNotFound(
            folder.display().to_string(),
        ));
    }

    let images = scan_images(folder);
    if images.is_empty() {
        return Err(VisitReportError::NoImagesFound(
            folder.display().to_string(),
        ));
    }

    std::fs::create_dir_all(output)?;

    let progress = ProgressBar::new(images.len() as u64);
    let results: Vec<std::result::Result<(), String>> = images
        .par_iter()
        .map(|path| {
            let outcome = resize_one(path, output, quality)
                .map_err(|e| format!("{}: {}", path.display(), e));
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish_and_clear();

    let mut outcome = ResizeOutcome::default();
    for result in results {
        match result {
            Ok(()) => outcome.resized += 1,
            Err(message) => {
                outcome.failed += 1;
                if verbose {
                    eprintln!("✗ {}", message);
                }
            }
        }
    }
    Ok(outcome)
}

fn scan_images(folder: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| IMAGE_EXTENSIONS.iter().any(|&i| *ext == *i))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    images.sort();
    images
}

fn resize_one(path: &Path, output: &Path, quality: ImageQuality) -> Result<()> {
    let img = image::open(path).map_err(|e| VisitReportError::ImageLoad(e.to_string()))?;

    let max_width = quality.max_width();
    let resized = if img.width() > max_width {
        let new_height =
            (img.height() as u64 * max_width as u64 / img.width() as u64) as u32;
        img.resize(max_width, new_height, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("photo");
    let target = output.join(format!("{}.jpg", stem));

    let file = File::create(&target)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.jpeg_quality());
    // JPEG has no alpha channel
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| VisitReportError::ImageLoad(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_test_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
        img.save(path).expect("failed to write test image");
    }

    #[test]
    fn test_scan_images_filters_extensions() {
        let dir = tempdir().expect("tempdir failed");
        write_test_png(&dir.path().join("a.png"), 8, 8);
        write_test_png(&dir.path().join("b.jpg"), 8, 8);
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let images = scan_images(dir.path());
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn test_resize_shrinks_wide_image() {
        let dir = tempdir().expect("tempdir failed");
        let out = dir.path().join("resized");
        std::fs::create_dir_all(&out).unwrap();
        write_test_png(&dir.path().join("wide.png"), 1200, 600);

        resize_one(&dir.path().join("wide.png"), &out, ImageQuality::Low)
            .expect("resize failed");

        let result = image::open(out.join("wide.jpg")).expect("open resized failed");
        assert_eq!(result.width(), 500);
        assert_eq!(result.height(), 250);
    }

    #[test]
    fn test_resize_keeps_small_image_dimensions() {
        let dir = tempdir().expect("tempdir failed");
        let out = dir.path().join("resized");
        std::fs::create_dir_all(&out).unwrap();
        write_test_png(&dir.path().join("small.png"), 100, 80);

        resize_one(&dir.path().join("small.png"), &out, ImageQuality::Medium)
            .expect("resize failed");

        let result = image::open(out.join("small.jpg")).expect("open resized failed");
        assert_eq!((result.width(), result.height()), (100, 80));
    }

    #[test]
    fn test_resize_folder_missing_folder_is_fatal() {
        let result = resize_folder(
            Path::new("/nonexistent-folder"),
            Path::new("/tmp/out"),
            ImageQuality::Medium,
            false,
        );
        assert!(matches!(result, Err(VisitReportError::FolderNotFound(_))));
    }
}
