//! Directory scanning for image collection.
//!
//! This module discovers the set of input folders and files under a root
//! path, either one level deep (folders, then their direct file children) or
//! as a full recursive walk. Hidden entries and entries matching an ignore
//! list are filtered out; classification into folders and files happens here,
//! ordering happens in [`crate::order`].

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tokio::fs::read_dir;

use crate::error::{Error, Result};
use crate::path_utils::{is_hidden, path_to_string_lossy};
use crate::types::Entry;

/// Scans a root directory for folders and image files.
///
/// A `Scanner` borrows its configuration for the duration of one scan
/// invocation; the entries it returns are owned by the caller.
#[derive(Debug)]
pub struct Scanner<'a> {
    root: &'a Path,
    ignore: &'a [String],
}

impl<'a> Scanner<'a> {
    /// Creates a new Scanner for the specified root directory.
    ///
    /// # Arguments
    ///
    /// * `root` - Path to the directory containing the image tree
    /// * `ignore` - Substrings; any entry whose full path contains one is excluded
    pub fn new(root: &'a Path, ignore: &'a [String]) -> Self {
        Self { root, ignore }
    }

    /// Lists the immediate child directories of the root, in discovery order.
    pub async fn scan_folders(&self) -> Result<Vec<Entry>> {
        let (folders, _) = self.read_children(self.root).await?;
        Ok(folders)
    }

    /// Lists the immediate child files of one folder, in discovery order.
    pub async fn scan_files(&self, folder: &Path) -> Result<Vec<Entry>> {
        let (_, files) = self.read_children(folder).await?;
        Ok(files)
    }

    /// Walks the entire subtree under the root, classifying every visited
    /// node as folder or file.
    ///
    /// Ignored entries are excluded from the results. Ignored directories are
    /// still descended into rather than pruned; since matching runs against
    /// the full path, their descendants carry the same substring and are
    /// excluded as well. Directories are returned in breadth-first discovery
    /// order; files keep the read order of their parent directory.
    pub async fn scan_recursive(&self) -> Result<(Vec<Entry>, Vec<Entry>)> {
        let mut folders: Vec<Entry> = Vec::new();
        let mut files: Vec<Entry> = Vec::new();

        // Iterative walk; async recursion would need boxing for no gain.
        let mut pending: VecDeque<PathBuf> = VecDeque::new();
        pending.push_back(self.root.to_path_buf());

        while let Some(dir) = pending.pop_front() {
            let mut entries = read_dir(&dir).await.map_err(|e| Error::Scan {
                path: dir.clone(),
                source: e,
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| Error::Scan {
                path: dir.clone(),
                source: e,
            })? {
                let path = entry.path();

                if is_hidden(&path) {
                    continue;
                }

                let is_dir = path.is_dir();
                if is_dir {
                    // Descend regardless of the ignore list; only the
                    // result set is filtered.
                    pending.push_back(path.clone());
                }

                if self.is_ignored(&path) {
                    log::debug!("Ignoring '{}' (matches ignore list)", path.display());
                    continue;
                }

                let entry = Entry::new(path, is_dir);
                if is_dir {
                    folders.push(entry);
                } else {
                    files.push(entry);
                }
            }
        }

        Ok((folders, files))
    }

    /// Reads the immediate children of one directory and partitions them
    /// into folders and files, applying the hidden and ignore filters.
    async fn read_children(&self, directory: &Path) -> Result<(Vec<Entry>, Vec<Entry>)> {
        let mut folders: Vec<Entry> = Vec::new();
        let mut files: Vec<Entry> = Vec::new();

        let mut entries = read_dir(directory).await.map_err(|e| Error::Scan {
            path: directory.to_path_buf(),
            source: e,
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| Error::Scan {
            path: directory.to_path_buf(),
            source: e,
        })? {
            let path = entry.path();

            if is_hidden(&path) {
                continue;
            }
            if self.is_ignored(&path) {
                log::debug!("Ignoring '{}' (matches ignore list)", path.display());
                continue;
            }

            let is_dir = path.is_dir();
            let entry = Entry::new(path, is_dir);
            if is_dir {
                folders.push(entry);
            } else {
                files.push(entry);
            }
        }

        Ok((folders, files))
    }

    /// Whether a path's full (lossy) string contains any ignore substring.
    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let path_str = path_to_string_lossy(path);
        self.ignore.iter().any(|needle| path_str.contains(needle))
    }
}
