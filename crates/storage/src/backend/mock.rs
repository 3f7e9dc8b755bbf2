//! In-memory library backend for testing.

use crate::backend::LibraryBackend;
use crate::error::{ErrorKind, Result};
use crate::lister::EntryStream;
use crate::models::{ChapterEntry, SeriesEntry};
use crate::path::validate as validate_name;
use async_stream::stream;
use async_trait::async_trait;
use shelf_archive::ChapterFormat;
use shelf_archive::error::ErrorKind as ArchiveErrorKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

type Pages = Vec<(String, Vec<u8>)>;

/// In-memory library backend for testing.
///
/// Series and chapters live in ordered maps, so listings come back sorted by
/// name. Every entry reports the Unix epoch as its modification time. A
/// chapter's format comes from its name alone: a recognised archive
/// extension is a zip or rar chapter, no extension at all is a directory
/// chapter, anything else is unsupported.
///
/// # Examples
///
/// ```
/// use shelf_storage::{LibraryBackend, MockBackend};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_pages([
///     ("One Piece", "ch1.cbz", "001.jpg", b"jpeg..."),
/// ]);
/// assert_eq!(backend.list_pages("One Piece", "ch1.cbz").await?, vec!["001.jpg"]);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    library: BTreeMap<String, BTreeMap<String, Pages>>,
}

impl MockBackend {
    /// Create a mock library pre-populated with pages, given as
    /// `(series, chapter, page, data)`. Pages keep their given order within a
    /// chapter.
    ///
    /// Panics if a series or chapter name fails validation. If test setup is
    /// wrong, then test should not pass.
    pub fn with_pages(
        pages: impl IntoIterator<Item = (impl Into<String>, impl Into<String>, impl Into<String>, impl Into<Vec<u8>>)>,
    ) -> Self {
        let mut backend = Self { name: "mock".to_string(), library: BTreeMap::new() };
        for (series, chapter, page, data) in pages {
            backend.chapter_mut(series.into(), chapter.into()).push((page.into(), data.into()));
        }
        backend
    }

    /// Add a series with no chapters.
    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series_mut(series.into());
        self
    }

    /// Add a chapter with no pages.
    pub fn with_chapter(mut self, series: impl Into<String>, chapter: impl Into<String>) -> Self {
        self.chapter_mut(series.into(), chapter.into());
        self
    }

    fn series_mut(&mut self, series: String) -> &mut BTreeMap<String, Pages> {
        if validate_name(&series).is_err() {
            // The panic here is DELIBERATE. MockBackend is intended to be
            // used in tests; panics are expected.
            panic!("MockBackend: invalid series name {series:?}");
        }
        self.library.entry(series).or_default()
    }

    fn chapter_mut(&mut self, series: String, chapter: String) -> &mut Pages {
        if validate_name(&chapter).is_err() {
            panic!("MockBackend: invalid chapter name {chapter:?}");
        }
        self.series_mut(series).entry(chapter).or_default()
    }

    fn format_of(chapter: &str) -> ChapterFormat {
        match ChapterFormat::from_extension(chapter) {
            ChapterFormat::Unsupported if Path::new(chapter).extension().is_none() => ChapterFormat::Directory,
            format => format,
        }
    }

    fn series(&self, series: &str) -> Result<&BTreeMap<String, Pages>> {
        validate_name(series)?;
        match self.library.get(series) {
            Some(chapters) => Ok(chapters),
            None => exn::bail!(ErrorKind::NotFound(PathBuf::from(series))),
        }
    }

    fn chapter(&self, series: &str, chapter: &str) -> Result<&Pages> {
        let chapters = self.series(series)?;
        validate_name(chapter)?;
        let path = Path::new(series).join(chapter);
        let Some(pages) = chapters.get(chapter) else {
            exn::bail!(ErrorKind::Archive(ArchiveErrorKind::NotFound(path)));
        };
        if !Self::format_of(chapter).is_supported() {
            exn::bail!(ErrorKind::Archive(ArchiveErrorKind::UnsupportedFormat(path)));
        }
        Ok(pages)
    }
}

#[async_trait]
impl LibraryBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn series_stream(&self) -> EntryStream<'_, SeriesEntry> {
        Box::pin(stream! {
            for name in self.library.keys() {
                yield Ok(SeriesEntry::new(name.clone(), OffsetDateTime::UNIX_EPOCH));
            }
        })
    }

    fn chapter_stream<'a>(&'a self, series: &'a str) -> EntryStream<'a, ChapterEntry> {
        Box::pin(stream! {
            match self.series(series) {
                Ok(chapters) => {
                    for name in chapters.keys() {
                        yield Ok(ChapterEntry::new(name.clone(), OffsetDateTime::UNIX_EPOCH));
                    }
                },
                Err(e) => yield Err(e),
            }
        })
    }

    async fn chapter_format(&self, series: &str, chapter: &str) -> Result<ChapterFormat> {
        validate_name(series)?;
        validate_name(chapter)?;
        let exists = self.library.get(series).is_some_and(|chapters| chapters.contains_key(chapter));
        Ok(if exists { Self::format_of(chapter) } else { ChapterFormat::from_extension(chapter) })
    }

    async fn list_pages(&self, series: &str, chapter: &str) -> Result<Vec<String>> {
        let pages = self.chapter(series, chapter)?;
        Ok(pages.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn get_page(&self, series: &str, chapter: &str, page: &str) -> Result<Vec<u8>> {
        let pages = self.chapter(series, chapter)?;
        shelf_archive::validate_page(page).map_err(ErrorKind::archive)?;
        match pages.iter().find(|(name, _)| name == page) {
            Some((_, data)) => Ok(data.clone()),
            None => exn::bail!(ErrorKind::Archive(ArchiveErrorKind::PageNotFound(page.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PAGES: &[(&str, &str, &str, &[u8])] = &[
        ("One Piece", "ch1.cbz", "002.jpg", b"two"),
        ("One Piece", "ch1.cbz", "001.jpg", b"one"),
        ("One Piece", "ch2", "001.jpg", b"dir"),
        ("Berserk", "v01.cbr", "a.png", b"png"),
    ];

    fn backend() -> MockBackend {
        MockBackend::with_pages(PAGES.iter().copied()).with_series("Empty").with_chapter("Berserk", "notes.txt")
    }

    #[tokio::test]
    async fn test_listings_are_sorted() {
        let backend = backend();
        let series: Vec<_> = backend.list_series().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(series, vec!["Berserk", "Empty", "One Piece"]);
        let chapters: Vec<_> = backend.list_chapters("Berserk").await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(chapters, vec!["notes.txt", "v01.cbr"]);
        assert!(backend.list_chapters("Empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pages_keep_insertion_order() {
        let backend = backend();
        assert_eq!(backend.list_pages("One Piece", "ch1.cbz").await.unwrap(), vec!["002.jpg", "001.jpg"]);
        assert_eq!(backend.get_page("One Piece", "ch1.cbz", "001.jpg").await.unwrap(), b"one");
    }

    #[rstest]
    #[case("ch1.cbz", ChapterFormat::Zip)]
    #[case("ch2", ChapterFormat::Directory)]
    #[case("missing", ChapterFormat::Unsupported)]
    #[case("missing.cbr", ChapterFormat::Rar)]
    #[tokio::test]
    async fn test_chapter_format(#[case] chapter: &str, #[case] expected: ChapterFormat) {
        assert_eq!(backend().chapter_format("One Piece", chapter).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_errors() {
        let backend = backend();
        let err = backend.list_chapters("Nope").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        let err = backend.list_pages("Berserk", "notes.txt").await.unwrap_err();
        assert!(err.is_unsupported());
        let err = backend.list_pages("Berserk", "v02.cbr").await.unwrap_err();
        assert!(err.is_not_found());
        let err = backend.get_page("Berserk", "v01.cbr", "b.png").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Archive(ArchiveErrorKind::PageNotFound(p)) if p == "b.png"));
        let err = backend.get_page("Berserk", "v01.cbr", "../a.png").await.unwrap_err();
        assert!(err.is_not_found());
        let err = backend.list_pages("..", "v01.cbr").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    #[should_panic(expected = "invalid chapter name")]
    fn test_invalid_setup_panics() {
        let _ = MockBackend::with_pages([("One Piece", "../ch1", "001.jpg", b"x")]);
    }
}
