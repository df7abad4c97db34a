//! Numeric sort-key extraction from filesystem entry names.
//!
//! An entry's key is obtained by stripping every non-digit character from its
//! name and parsing what remains as a base-10 integer, so "page420" reads as
//! 420. Separated digit runs are concatenated in their original order, not
//! treated as separate numbers: "page12b3" yields 123 and "1_of_9" yields 19.
//! That concatenation is a deliberate compatibility quirk, kept verbatim even
//! though it can produce surprising orderings for multi-number names.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// Matches every run of non-digit characters; replacing matches with
    /// nothing leaves only the digits of a name.
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new("[^0-9]+").unwrap();
}

/// Extracts the numeric sort key from an entry name.
///
/// # Returns
///
/// * `Ok(Some(key))` - The name contained at least one digit
/// * `Ok(None)` - The name contained no digits; the entry carries no key and
///   is excluded from ordering
/// * `Err(Error::KeyOverflow)` - The concatenated digit string does not fit
///   a `u64`; reported rather than silently wrapped
pub fn extract_key(name: &str) -> Result<Option<u64>> {
    let digits = NON_DIGIT_REGEX.replace_all(name, "");
    if digits.is_empty() {
        return Ok(None);
    }

    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::KeyOverflow(name.to_string()))
}
