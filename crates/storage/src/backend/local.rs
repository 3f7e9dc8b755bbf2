//! Local filesystem library backend.
//!
//! Series and chapters are read straight from a directory on disk via
//! `tokio::fs`; chapter contents go through [`crate::resolver`]. The library
//! is never written to.

use crate::backend::LibraryBackend;
use crate::error::{ErrorKind, Result};
use crate::lister::{self, EntryStream};
use crate::models::{ChapterEntry, SeriesEntry};
use crate::path::validate as validate_name;
use crate::resolver;
use async_trait::async_trait;
use shelf_archive::ChapterFormat;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Local filesystem library backend.
///
/// All series and chapter names are resolved relative to the configured
/// root directory.
///
/// # Examples
///
/// ```no_run
/// use shelf_storage::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("local", "/srv/manga")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    /// Root directory for the library
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is not
    /// absolute, or exists but is not a directory. A root that does not exist
    /// (yet) is accepted; listing it reports
    /// [`NotFound`](ErrorKind::NotFound).
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() && !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn series_path(&self, series: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_name(series)?))
    }

    fn chapter_path(&self, series: &str, chapter: &str) -> Result<PathBuf> {
        Ok(self.series_path(series)?.join(validate_name(chapter)?))
    }
}

#[async_trait]
impl LibraryBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn series_stream(&self) -> EntryStream<'_, SeriesEntry> {
        lister::series_stream(&self.root)
    }

    fn chapter_stream<'a>(&'a self, series: &'a str) -> EntryStream<'a, ChapterEntry> {
        match self.series_path(series) {
            Ok(path) => lister::chapter_stream(path),
            Err(e) => Box::pin(futures::stream::once(async { Result::Err(e) })),
        }
    }

    #[instrument(skip(self), fields(library = %self.name))]
    async fn chapter_format(&self, series: &str, chapter: &str) -> Result<ChapterFormat> {
        let path = self.chapter_path(series, chapter)?;
        Ok(resolver::detect(&path).await)
    }

    #[instrument(skip(self), fields(library = %self.name, pages))]
    async fn list_pages(&self, series: &str, chapter: &str) -> Result<Vec<String>> {
        let path = self.chapter_path(series, chapter)?;
        let pages = resolver::list_pages(&path).await?;
        tracing::Span::current().record("pages", pages.len());
        Ok(pages)
    }

    #[instrument(skip(self), fields(library = %self.name, size))]
    async fn get_page(&self, series: &str, chapter: &str, page: &str) -> Result<Vec<u8>> {
        let path = self.chapter_path(series, chapter)?;
        let data = resolver::get_page(&path, page).await?;
        tracing::Span::current().record("size", data.len());
        Ok(data)
    }
}
