//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. The underlying `std::io`, `zip` and
//! `unrar` errors are kept as child frames of the error tree.

use derive_more::{Display, Error};
use std::path::{Path, PathBuf};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The chapter location does not exist.
    #[display("chapter not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The chapter location exists but cannot be read.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// An I/O operation failed while reading a chapter.
    #[display("I/O error")]
    Io,
    /// Archive is corrupt, truncated or not actually the format its suffix
    /// claims. Don't retry with the same input.
    #[display("invalid or corrupted archive")]
    InvalidArchive,
    /// The chapter is neither a directory nor a recognised archive.
    #[display("unsupported chapter format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// The chapter is valid but holds no page with this identifier.
    #[display("page not found: {_0}")]
    PageNotFound(#[error(not(source))] String),
    /// The page identifier escapes the chapter root or contains bytes that
    /// can never name a file.
    #[display("invalid page identifier: {_0}")]
    InvalidPage(#[error(not(source))] String),
}

impl ErrorKind {
    /// Classify an I/O error raised while touching `path`.
    pub(crate) fn from_io(err: &std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io,
        }
    }

    /// Raise an I/O error raised while touching `path`, keeping it as the
    /// child frame of the classified error.
    #[track_caller]
    pub(crate) fn io(err: std::io::Error, path: &Path) -> Error {
        let kind = Self::from_io(&err, path);
        exn::Exn::new(err).raise(kind)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }

    /// Returns `true` if the chapter or the requested page does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::PageNotFound(_) | Self::InvalidPage(_))
    }
}
