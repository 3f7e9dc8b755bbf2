//! Storage Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from `shelf-archive` keep
//! their own error tree as a child frame.

use derive_more::{Display, Error};
use shelf_archive::error::{Error as ArchiveError, ErrorKind as ArchiveErrorKind};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

/// A storage error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Directory does not exist
    #[display("not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// Name is not a single path segment, or escapes the library root
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Chapter could not be resolved (unsupported format, missing page,
    /// broken archive, ...)
    #[display("chapter error: {_0}")]
    Archive(ArchiveErrorKind),
    /// The blocking task doing the work panicked or was cancelled
    #[display("blocking task failed")]
    Task,
}
impl ErrorKind {
    /// Convert an archive error into a storage error, preserving the
    /// archive crate's `Exn` frame (error tree) as a child in its own
    /// error tree.
    #[track_caller]
    pub fn archive(err: ArchiveError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Archive(inner))
    }

    pub(crate) fn map_io_error(e: IoError, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Task => true,
            Self::Archive(inner) => inner.is_retryable(),
            _ => false,
        }
    }

    /// Returns `true` if the series, chapter or page does not exist (or was
    /// addressed by a name that can never exist).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::InvalidPath(_) => true,
            Self::Archive(inner) => inner.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` if the chapter exists but is stored in a format that
    /// can't be read.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Archive(ArchiveErrorKind::UnsupportedFormat(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_errors_keep_their_kind() {
        let source: ArchiveError = ArchiveErrorKind::PageNotFound("001.jpg".to_string()).into();
        let err = ErrorKind::archive(source);
        assert!(matches!(&*err, ErrorKind::Archive(ArchiveErrorKind::PageNotFound(page)) if page == "001.jpg"));
        assert!(err.is_not_found());
        assert!(!err.is_unsupported());
    }

    #[test]
    fn classification() {
        let unsupported = ErrorKind::Archive(ArchiveErrorKind::UnsupportedFormat(PathBuf::from("a.txt")));
        assert!(unsupported.is_unsupported());
        assert!(!unsupported.is_not_found());
        assert!(!unsupported.is_retryable());
        assert!(ErrorKind::InvalidPath(PathBuf::from("..")).is_not_found());
        assert!(ErrorKind::Io(IoError::other("flaky")).is_retryable());
    }

    #[test]
    fn io_errors_are_mapped() {
        let path = Path::new("/library/series");
        let err = ErrorKind::map_io_error(IoError::new(std::io::ErrorKind::NotFound, "gone"), path);
        assert!(matches!(err, ErrorKind::NotFound(p) if p == path));
        let err = ErrorKind::map_io_error(IoError::other("weird"), path);
        assert!(matches!(err, ErrorKind::Io(_)));
    }
}
