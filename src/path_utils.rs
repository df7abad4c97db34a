//! Path utilities for safe and robust file path handling.
//!
//! Helpers shared by the scanner and the configuration preflight: lossy
//! string conversion, hidden-file detection, and validation of source and
//! output paths before any filesystem work starts.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Converts a path to a string with fallback to lossy conversion.
pub fn path_to_string_lossy(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Gets the file name from a path with fallback to lossy conversion.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Checks if a path's final component starts with a dot (hidden entry).
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Checks if a path is potentially problematic due to special characters.
///
/// # Returns
///
/// * `Result<()>` - Ok if the path is valid, or an error describing the issue
pub fn validate_path(path: &Path) -> Result<()> {
    let path_str = path_to_string_lossy(path);

    if path_str
        .chars()
        .any(|c| matches!(c, '<' | '>' | '"' | '|' | '?' | '*'))
    {
        return Err(Error::InvalidPath(
            path.to_path_buf(),
            "Path contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Normalizes a path for consistent handling.
///
/// Existing paths are canonicalized to resolve relative components;
/// non-existent paths (e.g., output paths) are validated and returned as-is.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    validate_path(path)?;

    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(e) => {
            if path.exists() {
                Err(Error::InvalidPath(
                    path.to_path_buf(),
                    format!("Cannot access path: {}", e),
                ))
            } else {
                Ok(path.to_path_buf())
            }
        }
    }
}
