//! Seihon - Image Directory to PDF Binding Library
//!
//! This crate assembles a directory tree of sequentially numbered image files
//! into a single paginated PDF document, one image per page, scaled to fit
//! the page while preserving aspect ratio and centered. It is meant for
//! scanned or exported sequences (comic pages, scanned book pages) living in
//! numerically named files and folders.
//!
//! # Getting Started
//!
//! Configure an assembly task via the `SeihonConfig` builder, then execute it
//! with [`assemble`](SeihonConfig::assemble):
//!
//! ```rust,no_run
//! use seihon::prelude::*;
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> seihon::error::Result<()> {
//!     let config = SeihonConfig::builder()
//!         .title("My Scanned Book".to_string())
//!         .source_path(PathBuf::from("./scans"))
//!         .output_path(PathBuf::from("./out/book.pdf"))
//!         .scan_depth(ScanDepth::Shallow)
//!         .page_size(PageSize::A4)
//!         .decode_failure_policy(DecodeFailurePolicy::Abort)
//!         .build()?;
//!
//!     let report = config.assemble().await?;
//!     println!("Wrote {} pages", report.pages_written);
//!
//!     Ok(())
//! }
//! ```
//!
//! Page order is derived from the numeric key of each name: every non-digit
//! character is stripped and the remaining digits are read as one integer,
//! so `img2.png` sorts before `img10.png` and a digitless `cover.png` is
//! excluded. Use [`build_order`](SeihonConfig::build_order) to inspect the
//! order without writing anything.

pub mod error;
pub mod generator;
pub mod key;
pub mod layout;
pub mod order;
pub mod path_utils;
pub mod probe;
pub mod scanner;
pub mod seihon;
pub mod types;

// Publicly expose the main `SeihonConfig` struct and its builder
pub use seihon::SeihonConfig;
pub use seihon::SeihonConfigBuilder;

// Re-export error and core types for direct access
pub use types::{
    AssembleReport, DecodeFailurePolicy, Entry, ImageDimensions, PageSize, Placement, ScanDepth,
};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types, allowing you to
/// import everything you need with a single `use seihon::prelude::*;` statement.
pub mod prelude {
    pub use super::{
        AssembleReport, DecodeFailurePolicy, Entry, ImageDimensions, PageSize, Placement,
        ScanDepth, SeihonConfig, SeihonConfigBuilder, error, generator, types,
    };
    pub use crate::key::extract_key;
    pub use crate::layout::layout;
    pub use crate::scanner::Scanner;
    pub use std::cmp::Ordering;
    pub use std::path::{Path, PathBuf};
    pub use std::sync::Arc;
}
