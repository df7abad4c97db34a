//! Common test utilities and constants for the Seihon crate.
//!
//! Provides functions for setting up and tearing down test directories,
//! creating dummy image files, and shared test constants.

use rand::{Rng, distributions::Alphanumeric};
use seihon::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

#[allow(dead_code)]
pub const TEST_TMP_DIR: &str = "tests/tmp";
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base, source, and output locations for one test run.
#[allow(dead_code)]
pub struct TestDirs {
    pub base: PathBuf,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
}

/// Helper function to create a clean test directory with source and target
/// subdirectories. A random suffix keeps parallel tests from colliding.
#[allow(dead_code)]
pub async fn setup_test_dirs(sub_path: &str) -> TestDirs {
    let rand_string: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let unique_sub_path = format!("{}-{}", sub_path, rand_string);
    let base = PathBuf::from(TEST_TMP_DIR).join(unique_sub_path);
    if base.exists() {
        fs::remove_dir_all(&base).await.unwrap();
    }
    let source_dir = base.join("source");
    let target_dir = base.join("target");

    fs::create_dir_all(&source_dir).await.unwrap();
    fs::create_dir_all(&target_dir).await.unwrap();

    TestDirs {
        base,
        source_dir,
        target_dir,
    }
}

/// Creates a dummy JPEG image of the given pixel size at the given path.
#[allow(dead_code)]
pub async fn create_dummy_image_sized(path: &Path, width: u32, height: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 60, 60]));
    let path_clone = path.to_path_buf();
    tokio::task::spawn_blocking(move || img.save_with_format(path_clone, image::ImageFormat::Jpeg))
        .await
        .map_err(|e| Error::AsyncTaskError(e.to_string()))?
        .map_err(Error::Image)?;
    Ok(())
}

/// Creates a minimal 100x100 dummy JPEG image at the given path.
#[allow(dead_code)]
pub async fn create_dummy_image(path: &Path) -> Result<()> {
    create_dummy_image_sized(path, 100, 100).await
}

/// Writes a file with a .jpg extension that no image codec can decode.
#[allow(dead_code)]
pub async fn create_corrupt_image(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, b"this is not an image").await?;
    Ok(())
}

/// Checks that a PDF file exists, is non-empty, and carries the PDF magic.
#[allow(dead_code)]
pub async fn assert_valid_pdf_file(path: &Path) {
    assert!(path.exists(), "Output PDF does not exist: {:?}", path);
    assert!(path.is_file(), "Output PDF path is not a file: {:?}", path);

    let bytes = fs::read(path).await.unwrap();
    assert!(bytes.len() > 8, "Output PDF is empty: {:?}", path);
    assert!(
        bytes.starts_with(b"%PDF"),
        "Output file lacks the PDF header: {:?}",
        path
    );
}
