//! Library backend trait and implementations.
//!
//! A library is a two-level tree: series folders directly under the root,
//! chapters (folders or archive files) directly under each series. Every
//! operation addresses its target by name, never by path, so that callers
//! facing the network can pass path segments straight through.

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use crate::lister::EntryStream;
use crate::models::{ChapterEntry, SeriesEntry};
use async_trait::async_trait;
use futures::TryStreamExt;
use shelf_archive::ChapterFormat;

/// Unified interface for reading a manga library.
///
/// # Naming
/// Series and chapter names must each be a single path segment; anything
/// else (`..`, `a/b`, absolute paths, embedded NUL) is rejected with
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath) before touching the
/// filesystem. See [`validate_name`](crate::validate_name).
///
/// # Examples
///
/// ```
/// use shelf_storage::{LibraryBackend, error::Result};
///
/// async fn first_page(backend: &dyn LibraryBackend, series: &str, chapter: &str) -> Result<Option<Vec<u8>>> {
///     let pages = backend.list_pages(series, chapter).await?;
///     match pages.first() {
///         Some(page) => Ok(Some(backend.get_page(series, chapter, page).await?)),
///         None => Ok(None),
///     }
/// }
/// ```
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    /// Name of the configured library (used for logging only).
    fn name(&self) -> &str;

    /// List every series in the library.
    ///
    /// Default implementation collects [`series_stream()`](Self::series_stream)
    /// into a [`Vec`]; the first error fails the whole listing.
    async fn list_series(&self) -> Result<Vec<SeriesEntry>> {
        self.series_stream().try_collect().await
    }

    /// Stream every series in the library, in enumeration order.
    fn series_stream(&self) -> EntryStream<'_, SeriesEntry>;

    /// List every chapter of `series`.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the series
    /// does not exist.
    async fn list_chapters(&self, series: &str) -> Result<Vec<ChapterEntry>> {
        self.chapter_stream(series).try_collect().await
    }

    /// Stream every chapter of `series`, in enumeration order.
    fn chapter_stream<'a>(&'a self, series: &'a str) -> EntryStream<'a, ChapterEntry>;

    /// Classify a chapter. Missing chapters are
    /// [`Unsupported`](ChapterFormat::Unsupported); only invalid names error.
    async fn chapter_format(&self, series: &str, chapter: &str) -> Result<ChapterFormat>;

    /// List the page identifiers of a chapter, in the order its directory or
    /// archive yields them.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use shelf_storage::{LibraryBackend, error::Result};
    /// # async fn example(backend: &dyn LibraryBackend) -> Result<()> {
    /// for page in backend.list_pages("One Piece", "ch1.cbz").await? {
    ///     println!("{page}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn list_pages(&self, series: &str, chapter: &str) -> Result<Vec<String>>;

    /// Fetch the raw bytes of one page. `page` must be an identifier exactly
    /// as returned by [`list_pages()`](Self::list_pages).
    async fn get_page(&self, series: &str, chapter: &str, page: &str) -> Result<Vec<u8>>;
}
