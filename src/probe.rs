//! Image metadata probing.
//!
//! Reads only as much of an image file as needed to learn its pixel
//! dimensions; the full decode happens later in the document writer.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ImageDimensions;

/// Reads the intrinsic pixel dimensions of an image file from its header.
///
/// This is a blocking call; callers on the async runtime should wrap it in
/// `spawn_blocking`, as [`crate::seihon::SeihonConfig::assemble`] does.
pub fn probe_dimensions(path: &Path) -> Result<ImageDimensions> {
    let (width, height) = image::image_dimensions(path).map_err(|e| Error::Probe {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(ImageDimensions { width, height })
}
