use futures::future::try_join_all;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::spawn;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, spawn_blocking};

use crate::error::{Error, Result};
use crate::generator::{Generator, pdf::Pdf};
use crate::layout::layout;
use crate::order;
use crate::probe::probe_dimensions;
use crate::scanner::Scanner;
use crate::types::{
    AssembleReport, DecodeFailurePolicy, Entry, ImageDimensions, PageSize, ScanDepth,
};

/// Limits the number of concurrent image dimension probes
const MAX_CONCURRENT_PROBES: usize = 8;

/// Type of the caller-supplied path comparators used for custom ordering.
pub type PathSorter = Arc<dyn Fn(&PathBuf, &PathBuf) -> Ordering + Sync + Send + 'static>;

/// The main Seihon assembly configuration, built declaratively using the builder pattern.
///
/// This struct encapsulates all settings needed to bind a directory tree of
/// numerically named images into one paginated PDF: source and output paths,
/// page geometry, scan behavior, and failure policy. Once configured, it can
/// be executed through two entry points:
///
/// - [`build_order`](SeihonConfig::build_order): scan and order only, returning the final page order
/// - [`assemble`](SeihonConfig::assemble): the full pipeline, writing the output document
///
/// ## Builder Pattern
///
/// Use [`SeihonConfig::builder()`](SeihonConfig::builder) to create a new configuration:
///
/// ```rust,no_run
/// # use seihon::prelude::*;
/// # use std::path::PathBuf;
/// let config = SeihonConfig::builder()
///     .title("My Scanned Book".to_string())
///     .source_path(PathBuf::from("./scans"))
///     .output_path(PathBuf::from("./out/book.pdf"))
///     .build()
///     .expect("Invalid configuration");
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(setter(into, strip_option), build_fn(validate = "Self::validate"))]
pub struct SeihonConfig {
    // --- Core Assembly Settings ---
    /// Document title embedded in the output PDF metadata.
    #[builder(default = "\"Untitled Document\".to_string()")]
    pub title: String,

    /// Source directory containing the image tree to bind.
    ///
    /// The expected structure depends on [`scan_depth`](SeihonConfig::scan_depth):
    /// numbered folders with numbered image files for [`ScanDepth::Shallow`],
    /// an arbitrarily nested tree for [`ScanDepth::Recursive`].
    #[builder(default)]
    pub source_path: PathBuf,

    /// Full path of the PDF document to write, including the file name.
    #[builder(default)]
    pub output_path: PathBuf,

    /// Directory scanning depth for collecting folders and pages.
    ///
    /// - [`ScanDepth::Shallow`]: folders under the root, pages inside each folder
    /// - [`ScanDepth::Recursive`]: the whole subtree, any nesting
    #[builder(default = "ScanDepth::Shallow")]
    pub scan_depth: ScanDepth,

    /// Substrings excluding entries from the scan.
    ///
    /// An entry whose full path contains any of these strings is left out of
    /// the results. Matching runs against the full path, so ignoring a
    /// directory also excludes everything beneath it.
    #[builder(default)]
    pub ignore: Vec<String>,

    /// Fixed page dimensions, in points, applied to every page of the run.
    #[builder(default = "PageSize::A4")]
    pub page_size: PageSize,

    /// What to do when a single image cannot be decoded or laid out.
    ///
    /// - [`DecodeFailurePolicy::Abort`]: fail the run on the first bad image
    /// - [`DecodeFailurePolicy::Skip`]: log a warning, record the path in the
    ///   report, and continue with the remaining pages
    #[builder(default = "DecodeFailurePolicy::Abort")]
    pub decode_failure_policy: DecodeFailurePolicy,

    /// Whether to create the output document's parent directory if missing.
    #[builder(default = "true")]
    pub create_parent_directory: bool,

    // --- Customization for Ordering Logic ---
    /// Custom sorting function for folders.
    ///
    /// Provides full control over folder ordering. If not provided, folders
    /// are sorted ascending by the numeric key extracted from their names.
    /// Entries without a numeric key are dropped either way.
    #[builder(default)]
    pub custom_folder_sorter: Option<PathSorter>,

    /// Custom sorting function for image files within a folder.
    ///
    /// Provides full control over page ordering. If not provided, files are
    /// sorted ascending by the numeric key extracted from their names.
    #[builder(default)]
    pub custom_file_sorter: Option<PathSorter>,
}

impl std::fmt::Debug for SeihonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeihonConfig")
            .field("title", &self.title)
            .field("source_path", &self.source_path)
            .field("output_path", &self.output_path)
            .field("scan_depth", &self.scan_depth)
            .field("ignore", &self.ignore)
            .field("page_size", &self.page_size)
            .field("decode_failure_policy", &self.decode_failure_policy)
            .field("create_parent_directory", &self.create_parent_directory)
            .field(
                "custom_folder_sorter",
                if self.custom_folder_sorter.is_some() {
                    &"Some(Function)"
                } else {
                    &"None"
                },
            )
            .field(
                "custom_file_sorter",
                if self.custom_file_sorter.is_some() {
                    &"Some(Function)"
                } else {
                    &"None"
                },
            )
            .finish()
    }
}

impl SeihonConfig {
    /// Creates a new builder for configuring `SeihonConfig`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use seihon::prelude::*;
    /// # use std::path::PathBuf;
    /// let config = SeihonConfig::builder()
    ///     .source_path(PathBuf::from("./scans"))
    ///     .output_path(PathBuf::from("./book.pdf"))
    ///     .build()
    ///     .expect("Invalid configuration");
    /// ```
    pub fn builder() -> SeihonConfigBuilder {
        SeihonConfigBuilder::default()
    }

    /// Performs validation checks on the configuration without touching any content.
    ///
    /// All entry points call this automatically, so manual invocation is
    /// optional but recommended for early error detection.
    ///
    /// # Returns
    ///
    /// * `Ok(&self)` - Configuration is valid
    /// * `Err(Error)` - Configuration has validation errors
    pub fn preflight_check(&self) -> Result<&Self> {
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Other("Output path is required".to_string()));
        }
        if self.source_path.as_os_str().is_empty() {
            return Err(Error::Other("`source_path` must be set".to_string()));
        }

        // Validate path format and characters
        crate::path_utils::validate_path(&self.source_path)?;

        if !self.source_path.exists() {
            return Err(Error::NotFound(format!(
                "Source path does not exist: {:?}",
                self.source_path
            )));
        }
        if !self.source_path.is_dir() {
            return Err(Error::InvalidPath(
                self.source_path.clone(),
                "Source path is not a directory.".to_string(),
            ));
        }

        if self.page_size.width <= 0.0 || self.page_size.height <= 0.0 {
            return Err(Error::Other(format!(
                "Page size must be positive, got {}x{}",
                self.page_size.width, self.page_size.height
            )));
        }

        Ok(self)
    }

    /// Scans the source tree and returns the image paths in final page order.
    ///
    /// This is the pure ordering half of the pipeline: folders ascending by
    /// numeric key, then each folder's files ascending by numeric key.
    /// Entries whose names contain no digits are excluded. No image is
    /// opened and nothing is written.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use seihon::prelude::*;
    /// # use std::path::PathBuf;
    /// # #[tokio::main]
    /// # async fn main() -> seihon::error::Result<()> {
    /// let config = SeihonConfig::builder()
    ///     .source_path(PathBuf::from("./scans"))
    ///     .output_path(PathBuf::from("./book.pdf"))
    ///     .build()?;
    ///
    /// for path in config.build_order().await? {
    ///     println!("{}", path.display());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build_order(&self) -> Result<Vec<PathBuf>> {
        self.preflight_check()?;

        // Resolve relative components up front so every scanned path, and
        // the recursive mode's parent-directory grouping, is rooted in one
        // canonical form.
        let root = crate::path_utils::normalize_path(&self.source_path)?;
        let scanner = Scanner::new(&root, &self.ignore);

        match self.scan_depth {
            ScanDepth::Shallow => {
                let folders =
                    self.order_entries(scanner.scan_folders().await?, &self.custom_folder_sorter)?;

                let mut ordered_pages: Vec<PathBuf> = Vec::new();
                for folder in &folders {
                    let files = self.order_entries(
                        scanner.scan_files(&folder.path).await?,
                        &self.custom_file_sorter,
                    )?;
                    ordered_pages.extend(files.into_iter().map(|e| e.path));
                }
                Ok(ordered_pages)
            }
            ScanDepth::Recursive => {
                let (folders, files) = scanner.scan_recursive().await?;

                let ordered_folders = self.order_entries(folders, &self.custom_folder_sorter)?;

                // The root anchors the walk and is not a discovered entry,
                // so it is exempt from key filtering and always comes first.
                let mut directories: Vec<PathBuf> = vec![root.clone()];
                directories.extend(ordered_folders.into_iter().map(|e| e.path));

                let mut ordered_pages: Vec<PathBuf> = Vec::new();
                for dir in &directories {
                    let in_dir: Vec<Entry> = files
                        .iter()
                        .filter(|f| f.path.parent() == Some(dir.as_path()))
                        .cloned()
                        .collect();
                    let ordered = self.order_entries(in_dir, &self.custom_file_sorter)?;
                    ordered_pages.extend(ordered.into_iter().map(|e| e.path));
                }
                Ok(ordered_pages)
            }
        }
    }

    /// Runs the full assembly pipeline: scan, order, probe, layout, write.
    ///
    /// Image dimensions are probed concurrently (bounded by a semaphore), but
    /// pages are appended to the document strictly in the globally sorted
    /// order, because the output is built incrementally and must receive its
    /// pages in final order.
    ///
    /// # Returns
    ///
    /// * `Ok(AssembleReport)` - Pages written and any paths skipped under
    ///   [`DecodeFailurePolicy::Skip`]
    /// * `Err(Error)` - Scan, decode, layout, or I/O failure, per the
    ///   configured policy
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use seihon::prelude::*;
    /// # use std::path::PathBuf;
    /// # #[tokio::main]
    /// # async fn main() -> seihon::error::Result<()> {
    /// let config = SeihonConfig::builder()
    ///     .title("My Scanned Book".to_string())
    ///     .source_path(PathBuf::from("./scans"))
    ///     .output_path(PathBuf::from("./out/book.pdf"))
    ///     .build()?;
    ///
    /// let report = config.assemble().await?;
    /// println!("Wrote {} pages", report.pages_written);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn assemble(&self) -> Result<AssembleReport> {
        let ordered_pages = self.build_order().await?;

        if ordered_pages.is_empty() {
            return Err(Error::NotFound(format!(
                "No numerically named images found under {:?}",
                self.source_path
            )));
        }

        log::info!(
            "Assembling {} page(s) from {:?} into {:?}",
            ordered_pages.len(),
            self.source_path,
            self.output_path
        );

        if self.create_parent_directory {
            if let Some(parent) = self.output_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent).await?;
                }
            }
        }

        let probed = Self::probe_all(&ordered_pages).await?;

        let mut generator = Pdf::new(&self.output_path, self.page_size, &self.title)?;
        let mut report = AssembleReport::default();

        for (path, dimensions) in ordered_pages.iter().zip(probed) {
            let appended = match dimensions.and_then(|dims| layout(self.page_size, dims)) {
                Ok(placement) => generator.append_page(&placement, path).await.map(|_| ()),
                Err(e) => Err(e),
            };

            match appended {
                Ok(()) => report.pages_written += 1,
                Err(e) => match self.decode_failure_policy {
                    DecodeFailurePolicy::Abort => return Err(e),
                    DecodeFailurePolicy::Skip => {
                        log::warn!("Skipping '{}': {}", path.display(), e);
                        report.skipped.push(path.clone());
                    }
                },
            }
        }

        if report.pages_written == 0 {
            return Err(Error::Other(
                "Every image failed to decode; nothing to write".to_string(),
            ));
        }

        generator.save().await?;

        log::info!(
            "Wrote {} page(s) to {:?} ({} skipped)",
            report.pages_written,
            self.output_path,
            report.skipped.len()
        );

        Ok(report)
    }

    // --- Private helper methods for pipeline steps ---

    /// Orders one batch of entries, applying the custom sorter if configured.
    fn order_entries(
        &self,
        entries: Vec<Entry>,
        custom_sorter: &Option<PathSorter>,
    ) -> Result<Vec<Entry>> {
        match custom_sorter {
            Some(sorter) => order::order_with(entries, sorter.as_ref()),
            None => order::order(entries),
        }
    }

    /// Probes every page's pixel dimensions concurrently, bounded by a
    /// semaphore. The result vector keeps page order; per-image failures are
    /// returned in place so the caller can apply the failure policy.
    async fn probe_all(pages: &[PathBuf]) -> Result<Vec<Result<ImageDimensions>>> {
        let semaphore = Arc::new(Semaphore::new(num_cpus::get().min(MAX_CONCURRENT_PROBES)));
        let mut handles: Vec<JoinHandle<Result<ImageDimensions>>> = Vec::new();

        for page in pages.iter().cloned() {
            let semaphore = Arc::clone(&semaphore);

            handles.push(spawn(async move {
                let _permit = semaphore.acquire().await?;
                // image header reads are blocking, keep them off the runtime
                spawn_blocking(move || probe_dimensions(&page)).await?
            }));
        }

        let results = try_join_all(handles)
            .await
            .map_err(|e| Error::AsyncTaskError(format!("Failed to join probe tasks: {}", e)))?;

        Ok(results)
    }
}

impl SeihonConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(page_size) = &self.page_size {
            if page_size.width <= 0.0 || page_size.height <= 0.0 {
                return Err(format!(
                    "Page size must be positive, got {}x{}",
                    page_size.width, page_size.height
                ));
            }
        }

        if let Some(ignore) = &self.ignore {
            if ignore.iter().any(|s| s.is_empty()) {
                return Err("Ignore list must not contain empty strings".to_string());
            }
        }

        Ok(())
    }
}
