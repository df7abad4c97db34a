//! Unit tests for core Seihon functionality.
//!
//! Tests individual components in isolation without full pipeline execution.

use seihon::error::Result;
use seihon::prelude::*;

mod common;
use common::{create_dummy_image, setup_test_dirs};

#[tokio::test]
async fn test_config_builder_validation() -> Result<()> {
    // Non-positive page size - should fail in our custom validate() function
    let result = SeihonConfig::builder()
        .source_path(PathBuf::from("/tmp"))
        .output_path(PathBuf::from("/tmp/out.pdf"))
        .page_size(PageSize {
            width: 0.0,
            height: 842.0,
        })
        .build();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Page size must be positive")
    );

    // Empty ignore substring
    let result = SeihonConfig::builder()
        .source_path(PathBuf::from("/tmp"))
        .output_path(PathBuf::from("/tmp/out.pdf"))
        .ignore(vec!["".to_string()])
        .build();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Ignore list must not contain empty strings")
    );

    Ok(())
}

#[tokio::test]
async fn test_config_preflight_check() -> Result<()> {
    let test_dirs = setup_test_dirs("preflight_check").await;

    // Valid configuration
    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;
    assert!(config.preflight_check().is_ok());

    // Missing output path
    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .build()?;
    let result = config.preflight_check();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Output path is required")
    );

    // Source path does not exist
    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.join("nonexistent"))
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;
    let result = config.preflight_check();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Source path does not exist")
    );

    // Source path is a file, not a directory
    let file_path = test_dirs.source_dir.join("001.jpg");
    create_dummy_image(&file_path).await?;
    let config = SeihonConfig::builder()
        .source_path(file_path)
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;
    let result = config.preflight_check();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("not a directory")
    );

    Ok(())
}

#[tokio::test]
async fn test_build_order_shallow_numeric() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_shallow").await;

    // One numbered folder; file order must be numeric, not lexicographic.
    for name in ["img2.png", "img10.png", "img1.png", "cover.png"] {
        create_dummy_image(&test_dirs.source_dir.join("vol1").join(name)).await?;
    }

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .scan_depth(ScanDepth::Shallow)
        .build()?;

    let order = config.build_order().await?;
    let names: Vec<String> = order
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    // cover.png has no digits and is excluded entirely.
    assert_eq!(names, vec!["img1.png", "img2.png", "img10.png"]);
    Ok(())
}

#[tokio::test]
async fn test_build_order_shallow_folder_order() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_folders").await;

    create_dummy_image(&test_dirs.source_dir.join("chapter10").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("chapter2").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("chapter2").join("2.jpg")).await?;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;

    let order = config.build_order().await?;
    // build_order roots every path in the canonicalized source path.
    let canonical_source = test_dirs.source_dir.canonicalize()?;
    let relative: Vec<String> = order
        .iter()
        .map(|p| {
            p.strip_prefix(&canonical_source)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        relative,
        vec!["chapter2/1.jpg", "chapter2/2.jpg", "chapter10/1.jpg"]
    );
    Ok(())
}

#[tokio::test]
async fn test_build_order_recursive_includes_root_files() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_recursive").await;

    create_dummy_image(&test_dirs.source_dir.join("0.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("part1").join("nested2").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("part1").join("nested2").join("2.jpg")).await?;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .scan_depth(ScanDepth::Recursive)
        .build()?;

    let order = config.build_order().await?;
    let names: Vec<String> = order
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    // Root files come first (the root anchors the directory order), then
    // the numbered directories in key order.
    assert_eq!(names, vec!["0.jpg", "1.jpg", "2.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_build_order_applies_ignore_list() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_ignore").await;

    create_dummy_image(&test_dirs.source_dir.join("ch1").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("ch1").join("2_draft.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("ch2_draft").join("1.jpg")).await?;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .ignore(vec!["_draft".to_string()])
        .build()?;

    let order = config.build_order().await?;
    assert_eq!(order.len(), 1);
    assert!(order[0].ends_with("ch1/1.jpg") || order[0].ends_with("ch1\\1.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_build_order_recursive_ignores_subtree() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_recursive_ignore").await;

    create_dummy_image(&test_dirs.source_dir.join("part1").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("extras_skip").join("1.jpg")).await?;
    create_dummy_image(
        &test_dirs
            .source_dir
            .join("extras_skip")
            .join("nested3")
            .join("1.jpg"),
    )
    .await?;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .scan_depth(ScanDepth::Recursive)
        .ignore(vec!["extras_skip".to_string()])
        .build()?;

    // The ignored directory and everything nested beneath it stay out of
    // the page order.
    let order = config.build_order().await?;
    assert_eq!(order.len(), 1);
    assert!(order[0].ends_with("part1/1.jpg") || order[0].ends_with("part1\\1.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_build_order_resolves_relative_components() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_relative").await;

    create_dummy_image(&test_dirs.source_dir.join("1").join("1.jpg")).await?;

    // Same source directory, reached through a parent hop.
    let indirect = test_dirs.source_dir.join("..").join("source");
    let config = SeihonConfig::builder()
        .source_path(indirect)
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;

    let order = config.build_order().await?;
    assert_eq!(order.len(), 1);
    assert!(
        order[0].is_absolute(),
        "scanned paths are rooted in the canonical source path"
    );
    assert!(order[0].ends_with("1/1.jpg") || order[0].ends_with("1\\1.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_build_order_skips_hidden_entries() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_hidden").await;

    create_dummy_image(&test_dirs.source_dir.join("ch1").join("1.jpg")).await?;
    create_dummy_image(&test_dirs.source_dir.join("ch1").join(".2.jpg")).await?;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;

    let order = config.build_order().await?;
    assert_eq!(order.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_build_order_custom_file_sorter() -> Result<()> {
    let test_dirs = setup_test_dirs("build_order_custom_sort").await;

    for name in ["1.jpg", "2.jpg", "3.jpg"] {
        create_dummy_image(&test_dirs.source_dir.join("ch1").join(name)).await?;
    }

    // Reverse the default order.
    let reverse: Arc<dyn Fn(&PathBuf, &PathBuf) -> Ordering + Sync + Send> =
        Arc::new(|a: &PathBuf, b: &PathBuf| b.cmp(a));

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.clone())
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .custom_file_sorter(reverse)
        .build()?;

    let order = config.build_order().await?;
    let names: Vec<String> = order
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["3.jpg", "2.jpg", "1.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_scanner_unreadable_root_is_fatal() -> Result<()> {
    let test_dirs = setup_test_dirs("scanner_bad_root").await;

    let config = SeihonConfig::builder()
        .source_path(test_dirs.source_dir.join("missing"))
        .output_path(test_dirs.target_dir.join("out.pdf"))
        .build()?;

    assert!(config.build_order().await.is_err());
    Ok(())
}
