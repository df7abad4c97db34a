//! Generator module provides the trait and implementation for document writers.
//!
//! This module contains the common interface for paginated document writers
//! and the PDF implementation used by the assembly pipeline. A writer is
//! handed pre-computed placements; it never makes geometry decisions itself
//! and fails only on I/O or decode errors.

use crate::error::Result;
use crate::types::{PageSize, Placement};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod pdf;

/// Common interface for paginated document writers.
///
/// The `Generator` trait defines a consistent API for writers that append
/// one image per page at a caller-supplied placement. Implementations handle
/// the specifics of each output format.
#[async_trait(?Send)]
pub trait Generator {
    /// Creates a new generator instance.
    ///
    /// # Parameters
    /// * `output_path` - Full path of the document to write, including extension
    /// * `page_size` - Fixed page dimensions, in points, for every page
    /// * `title` - Document title embedded in the output metadata
    ///
    /// # Returns
    /// * `Result<Self>` - A new generator instance or an error if creation fails
    fn new(output_path: &Path, page_size: PageSize, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Appends a new page of the configured page size and draws the image at
    /// the given offset and size.
    ///
    /// # Parameters
    /// * `placement` - Pre-computed rendered size and centered offsets, in points
    /// * `image_path` - Path to the image file drawn on the page
    ///
    /// # Returns
    /// * `Result<&mut Self>` - Self reference for method chaining, or an error if failed
    async fn append_page(&mut self, placement: &Placement, image_path: &PathBuf)
    -> Result<&mut Self>
    where
        Self: Sized;

    /// Finalizes the document and writes it to the configured output path.
    async fn save(self) -> Result<()>;
}
