//! Core data types, enums, and reports for the Seihon assembly library.
//!
//! This module defines the fundamental data structures used throughout Seihon:
//! - Filesystem data (`Entry`)
//! - Page geometry (`PageSize`, `ImageDimensions`, `Placement`)
//! - Enumerations for various settings (`ScanDepth`, `DecodeFailurePolicy`)
//! - Reporting types (`AssembleReport`)

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How deeply to scan the source directory for folders and image files.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanDepth {
    /// Expects structure: `source_path/folder/page.jpg` — the immediate
    /// children of the root are folders, and each folder's immediate
    /// children are the pages. Files directly under the root are ignored.
    #[default]
    Shallow,
    /// Walks the entire subtree under the root, collecting every file and
    /// every intermediate directory regardless of nesting depth.
    Recursive,
}

/// What to do when a single image cannot be decoded or laid out.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeFailurePolicy {
    /// Abort the whole run on the first unreadable image.
    #[default]
    Abort,
    /// Log a warning, record the path in the report, and continue with the
    /// remaining pages.
    Skip,
}

/// One filesystem object discovered during a scan.
///
/// Entries are owned by the scan that produced them and flow by value into
/// the ordering stage; nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    /// Full path of the object.
    pub path: PathBuf,
    /// Whether the object is a directory.
    pub is_dir: bool,
    /// Base name, lossily converted; the input for numeric key extraction.
    pub name: String,
}

impl Entry {
    /// Builds an `Entry` from a path and its directory flag, deriving the
    /// display name from the final path component.
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = crate::path_utils::file_name_lossy(&path);
        Self { path, is_dir, name }
    }
}

/// Fixed page dimensions in PDF points (1 pt = 1/72 inch).
///
/// One `PageSize` applies to every page of a run; it is never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait, 595 x 842 pt.
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };

    /// US Letter portrait, 612 x 792 pt.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Intrinsic pixel dimensions of one source image, as reported by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Where and how large one image is drawn on its page, in points.
///
/// Computed per image, consumed once by the document writer, then discarded.
/// Offsets are measured from the page corner on each axis; the layout
/// guarantees the rendered rectangle lies fully inside the page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

/// Summary of one completed `assemble` run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssembleReport {
    /// Number of pages written to the output document.
    pub pages_written: usize,
    /// Images that were skipped under [`DecodeFailurePolicy::Skip`].
    pub skipped: Vec<PathBuf>,
}
