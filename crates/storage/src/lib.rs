//! Read-only access to a manga library on disk.
//!
//! ```text
//! <root>/<series>/<chapter>/<page>
//! ```
//!
//! Series are folders, chapters are folders or zip/rar archives, pages are
//! whatever files (or archive entries) a chapter holds. Listings are
//! streamed; chapter contents are resolved through `shelf-archive` on the
//! blocking pool.

pub mod backend;
pub mod error;
mod lister;
mod models;
mod path;
pub mod resolver;

pub use crate::backend::LibraryBackend;
pub use crate::backend::LocalBackend;
#[cfg(feature = "mock")]
pub use crate::backend::MockBackend;
pub use crate::lister::{EntryStream, chapter_stream, list_chapters, list_series, series_stream};
pub use crate::models::{ChapterEntry, SeriesEntry};
pub use crate::path::validate as validate_name;
pub use shelf_archive::ChapterFormat;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn LibraryBackend + Send + Sync>;
