//! PDF document writer built on `printpdf` 0.8.
//!
//! printpdf 0.8 uses a data-oriented API: documents are built by constructing
//! `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
//! `PdfDocument::save()`. Each appended image becomes one page with a single
//! XObject draw at the supplied placement.

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::path_utils::path_to_string_lossy;
use crate::types::{PageSize, Placement};
use async_trait::async_trait;
use memmap2::MmapOptions;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task::spawn_blocking;

/// Placing images at their native pixel size: at 72 dpi one pixel is one
/// point, so the placement's scale factor applies directly.
const NATIVE_DPI: f32 = 72.0;

/// A generator for writing single-image-per-page PDF documents.
///
/// Pages accumulate in memory in append order and are serialised once on
/// [`Generator::save`], so appends must arrive in final page order.
pub struct Pdf {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    page_size: PageSize,
    output_path: PathBuf,
}

impl Pdf {
    /// Decodes an image file into the RGB8 raw form printpdf embeds.
    ///
    /// The file is memory-mapped and decoded on a blocking thread; decoding
    /// is CPU-bound and must stay off the async runtime.
    async fn decode_image(image_path: &Path) -> Result<RawImage> {
        let file = fs::File::open(image_path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to open image file '{}': {}",
                    path_to_string_lossy(image_path),
                    e
                ),
            ))
        })?;

        let file_std = file.into_std().await;

        spawn_blocking(move || {
            // Create the read-only memory map
            let mmap = unsafe { MmapOptions::new().map(&file_std) }?;

            let decoded = image::load_from_memory(&mmap[..])?;
            let width = decoded.width() as usize;
            let height = decoded.height() as usize;
            let rgb = decoded.to_rgb8();

            Ok(RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width,
                height,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            })
        })
        .await
        .map_err(|e| Error::AsyncTaskError(e.to_string()))?
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (
            Mm::from(Pt(self.page_size.width as f32)),
            Mm::from(Pt(self.page_size.height as f32)),
        )
    }
}

#[async_trait(?Send)]
impl Generator for Pdf {
    fn new(output_path: &Path, page_size: PageSize, title: &str) -> Result<Self> {
        if output_path.as_os_str().is_empty() {
            return Err(Error::InvalidPath(
                output_path.to_path_buf(),
                "Output path is empty".to_string(),
            ));
        }

        Ok(Pdf {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            page_size,
            output_path: output_path.to_path_buf(),
        })
    }

    async fn append_page(
        &mut self,
        placement: &Placement,
        image_path: &PathBuf,
    ) -> Result<&mut Self> {
        let raw = Self::decode_image(image_path).await?;
        let pixel_width = raw.width as f32;

        let xobject_id = self.doc.add_image(&raw);

        // At NATIVE_DPI the image's native size in points equals its pixel
        // count, so the uniform placement scale is rendered / pixel width.
        let scale = placement.width as f32 / pixel_width;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(placement.x_offset as f32)),
                translate_y: Some(Pt(placement.y_offset as f32)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(NATIVE_DPI),
                rotate: None,
            },
        }];

        let (page_w, page_h) = self.page_dimensions();
        self.pages.push(PdfPage::new(page_w, page_h, ops));

        log::debug!(
            "Appended page {} for '{}'",
            self.pages.len(),
            image_path.display()
        );

        Ok(self)
    }

    async fn save(mut self) -> Result<()> {
        self.doc.with_pages(std::mem::take(&mut self.pages));

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::warn!(
                "PDF serialisation produced {} warning(s) for '{}'",
                warnings.len(),
                self.output_path.display()
            );
        }

        fs::write(&self.output_path, bytes).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write output document '{}': {}",
                    path_to_string_lossy(&self.output_path),
                    e
                ),
            ))
        })?;

        Ok(())
    }
}
