//! Page layout: fit-inside, centered placement of an image on a fixed page.
//!
//! The calculator picks the tighter of the two axis scale factors so the
//! image's longer relative dimension exactly touches the page edge, then
//! centers the shorter dimension with equal margins. It never crops and never
//! exceeds the page bounds.

use crate::error::{Error, Result};
use crate::types::{ImageDimensions, PageSize, Placement};

/// Computes the uniform scale and centered offsets placing `image` fully
/// inside `page` without distortion.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`] when either image dimension is zero;
/// dividing by a degenerate dimension would produce an infinite scale.
pub fn layout(page: PageSize, image: ImageDimensions) -> Result<Placement> {
    if image.width == 0 || image.height == 0 {
        return Err(Error::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let scale = (page.width / image.width as f64).min(page.height / image.height as f64);

    let width = image.width as f64 * scale;
    let height = image.height as f64 * scale;

    Ok(Placement {
        width,
        height,
        x_offset: (page.width - width) / 2.0,
        y_offset: (page.height - height) / 2.0,
    })
}
