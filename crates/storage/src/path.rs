//! Path validation and security utilities.
//!
//! Series and chapter names arrive from network-facing path segments and get
//! joined onto the library root. This module makes sure they can't be used
//! to walk out of it.

use std::path::{Component, Path};

use crate::error::{ErrorKind, Result};

/// Validates that `name` is exactly one normal path segment.
///
/// > **Note:** This does **not** normalize backslashes, non-UTF8 bytes, or
/// >           platform-specific weirdness. Null bytes are explicitly rejected.
///
/// # Returns
/// Returns the name as a [`Path`] if valid, or
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath) if invalid.
///
/// # Examples
///
/// ```
/// use shelf_storage::validate_name;
/// // Valid names
/// assert!(validate_name("One Piece").is_ok());
/// assert!(validate_name("ch1.cbz").is_ok());
/// // Invalid names
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("One Piece/ch1").is_err());
/// assert!(validate_name("/etc").is_err());
/// assert!(validate_name("a\0b").is_err());
/// ```
pub fn validate(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        // Null bytes pass through Path::components() on Unix but cause
        // truncation in C-based syscalls; reject them explicitly.
        (Some(Component::Normal(s)), None) if !s.as_encoded_bytes().contains(&0) => Ok(Path::new(s)),
        _ => exn::bail!(ErrorKind::InvalidPath(path.to_path_buf())),
    }
}
