//! Configuration Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Explicitly requested configuration file does not exist
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Configuration file extension is not one of toml, yaml, yml or json
    #[display("unrecognised config file format: {}", _0.display())]
    UnknownFormat(#[error(not(source))] PathBuf),
    /// Layers could not be merged or extracted
    #[display("failed to load configuration")]
    Load,
    /// The configured library is not a directory
    #[display("library is not a directory: {}", _0.display())]
    InvalidLibrary(#[error(not(source))] PathBuf),
}
