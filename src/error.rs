//! Top-level error categories, mapped to process exit codes.

use derive_more::{Display, Error};
use shelf_storage::error::Error as StorageError;
use std::process::ExitCode;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    /// Series, chapter or page does not exist
    #[display("not found")]
    NotFound,
    /// Chapter exists but isn't a directory, zip or rar
    #[display("unsupported chapter format")]
    Unsupported,
    #[display("library error")]
    Library,
    /// Writing results to stdout or the output file failed
    #[display("failed to write output")]
    Output,
}

impl ErrorKind {
    /// Classify a storage error, keeping it as the child frame.
    #[track_caller]
    pub fn storage(err: StorageError) -> Error {
        let kind = if err.is_not_found() {
            Self::NotFound
        } else if err.is_unsupported() {
            Self::Unsupported
        } else {
            Self::Library
        };
        err.raise(kind)
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotFound => ExitCode::from(2),
            Self::Unsupported => ExitCode::from(3),
            _ => ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shelf_archive::error::ErrorKind as ArchiveErrorKind;
    use shelf_storage::error::ErrorKind as StorageErrorKind;
    use std::path::PathBuf;

    #[rstest]
    #[case(StorageErrorKind::NotFound(PathBuf::from("x")), ErrorKind::NotFound)]
    #[case(StorageErrorKind::InvalidPath(PathBuf::from("..")), ErrorKind::NotFound)]
    #[case(StorageErrorKind::Archive(ArchiveErrorKind::PageNotFound("p".into())), ErrorKind::NotFound)]
    #[case(StorageErrorKind::Archive(ArchiveErrorKind::UnsupportedFormat(PathBuf::from("a.txt"))), ErrorKind::Unsupported)]
    #[case(StorageErrorKind::Archive(ArchiveErrorKind::InvalidArchive), ErrorKind::Library)]
    #[case(StorageErrorKind::Task, ErrorKind::Library)]
    fn test_classification(#[case] source: StorageErrorKind, #[case] expected: ErrorKind) {
        let err = ErrorKind::storage(source.into());
        assert_eq!(*err, expected);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorKind::NotFound.exit_code(), ExitCode::from(2));
        assert_eq!(ErrorKind::Unsupported.exit_code(), ExitCode::from(3));
        assert_eq!(ErrorKind::Config.exit_code(), ExitCode::FAILURE);
    }
}
