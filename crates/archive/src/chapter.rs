//! Dispatch from a chapter location to the backend for its format.

use crate::error::{ErrorKind, Result};
use crate::source::{DirectorySource, RarSource, ZipSource};
use crate::{ChapterFormat, PageSource};
use std::path::Path;
use tracing::instrument;

/// A chapter whose format has been detected and is supported.
///
/// Opening a chapter only stats the path; the directory or archive itself is
/// opened again by every [`PageSource`] call.
#[derive(Clone, Debug)]
pub enum Chapter {
    Directory(DirectorySource),
    Zip(ZipSource),
    Rar(RarSource),
}

impl Chapter {
    /// Detect the format of the chapter at `path` and pick its backend.
    ///
    /// Fails with [`NotFound`](ErrorKind::NotFound) if nothing exists at
    /// `path`, or [`UnsupportedFormat`](ErrorKind::UnsupportedFormat) if it is
    /// neither a directory nor a zip/rar archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| ErrorKind::io(e, path))?;
        match ChapterFormat::from_metadata(path, Some(&metadata)) {
            ChapterFormat::Directory => Ok(Self::Directory(DirectorySource::new(path))),
            ChapterFormat::Zip => Ok(Self::Zip(ZipSource::new(path))),
            ChapterFormat::Rar => Ok(Self::Rar(RarSource::new(path))),
            ChapterFormat::Unsupported => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        }
    }

    #[must_use]
    pub fn format(&self) -> ChapterFormat {
        match self {
            Self::Directory(_) => ChapterFormat::Directory,
            Self::Zip(_) => ChapterFormat::Zip,
            Self::Rar(_) => ChapterFormat::Rar,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(source) => source.root(),
            Self::Zip(source) => source.path(),
            Self::Rar(source) => source.path(),
        }
    }

    fn source(&self) -> &dyn PageSource {
        match self {
            Self::Directory(source) => source,
            Self::Zip(source) => source,
            Self::Rar(source) => source,
        }
    }
}

impl PageSource for Chapter {
    #[instrument(skip(self), fields(format = %self.format(), chapter = %self.path().display(), pages))]
    fn list_pages(&self) -> Result<Vec<String>> {
        let pages = self.source().list_pages()?;
        tracing::Span::current().record("pages", pages.len());
        Ok(pages)
    }

    #[instrument(skip(self), fields(format = %self.format(), chapter = %self.path().display(), size))]
    fn read_page(&self, identifier: &str) -> Result<Vec<u8>> {
        let bytes = self.source().read_page(identifier)?;
        tracing::Span::current().record("size", bytes.len());
        Ok(bytes)
    }
}

/// List the page identifiers of the chapter at `path`.
///
/// Shorthand for [`Chapter::open`] followed by [`PageSource::list_pages`].
pub fn list_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    Chapter::open(path)?.list_pages()
}

/// Read one page of the chapter at `path`.
///
/// Shorthand for [`Chapter::open`] followed by [`PageSource::read_page`].
pub fn read_page(path: impl AsRef<Path>, identifier: &str) -> Result<Vec<u8>> {
    Chapter::open(path)?.read_page(identifier)
}
