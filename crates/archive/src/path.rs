//! Page identifier validation.
//!
//! Identifiers for directory chapters come from network-facing path segments
//! and are joined onto the chapter root, so they must never be able to leave
//! it.

use crate::error::{ErrorKind, Result};
use std::path::{Component, Path, PathBuf};

/// Validates a page identifier relative to a chapter root.
///
/// Identifiers are matched exactly, never normalized: only the strings handed
/// out by a listing resolve. Any `.`, `..` or empty segment (a doubled or
/// trailing separator) is rejected instead of collapsed, as is an absolute
/// identifier.
///
/// > **Note:** This does **not** normalize backslashes, non-UTF8 bytes, or
/// >           platform-specific weirdness. Null bytes are explicitly rejected.
///
/// # Returns
/// Returns the identifier unchanged as a relative path if valid, or
/// [`InvalidPage`](crate::error::ErrorKind::InvalidPage) if invalid.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shelf_archive::validate_page;
/// // Valid identifiers
/// assert_eq!(validate_page("001.jpg").unwrap(), Path::new("001.jpg"));
/// assert_eq!(validate_page("extras/cover.png").unwrap(), Path::new("extras/cover.png"));
/// // Invalid identifiers
/// assert!(validate_page("../../etc/passwd").is_err());
/// assert!(validate_page("a\0b").is_err());
/// // Identifiers are not resolved
/// assert!(validate_page("extras/../001.jpg").is_err());
/// assert!(validate_page("./001.jpg").is_err());
/// assert!(validate_page("001.jpg/").is_err());
/// ```
pub fn validate(identifier: &str) -> Result<PathBuf> {
    let invalid = || ErrorKind::InvalidPage(identifier.to_string());
    let path = Path::new(identifier);
    // An absolute identifier would replace the chapter root on join.
    if path.has_root() || matches!(path.components().next(), Some(Component::Prefix(_))) {
        exn::bail!(invalid());
    }
    for segment in identifier.split(std::path::is_separator) {
        // Null bytes would truncate the path in C-based syscalls.
        if matches!(segment, "" | "." | "..") || segment.contains('\0') {
            exn::bail!(invalid());
        }
    }
    Ok(PathBuf::from(identifier))
}
