//! Async bridge to the chapter resolver.
//!
//! Archive decoding is blocking work, so it is pushed onto tokio's blocking
//! pool. Every call opens the chapter fresh; nothing is cached between calls.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use shelf_archive::ChapterFormat;
use shelf_archive::error::Result as ArchiveResult;
use std::path::Path;
use tokio::fs;
use tracing::instrument;

/// Classify the chapter at `path`. Never fails: anything that can't be
/// inspected is [`ChapterFormat::Unsupported`].
#[instrument(level = "debug", skip_all, fields(chapter = %path.display()))]
pub async fn detect(path: &Path) -> ChapterFormat {
    let metadata = fs::metadata(path).await.ok();
    ChapterFormat::from_metadata(path, metadata.as_ref())
}

/// List the page identifiers of the chapter at `chapter`, in the order the
/// underlying directory or archive yields them.
#[instrument(level = "debug", skip_all, fields(chapter = %chapter.display()))]
pub async fn list_pages(chapter: &Path) -> Result<Vec<String>> {
    let chapter = chapter.to_path_buf();
    blocking(move || shelf_archive::list_pages(&chapter)).await
}

/// Fetch the raw bytes of one page of the chapter at `chapter`.
#[instrument(level = "debug", skip_all, fields(chapter = %chapter.display(), page = %identifier))]
pub async fn get_page(chapter: &Path, identifier: &str) -> Result<Vec<u8>> {
    let chapter = chapter.to_path_buf();
    let identifier = identifier.to_string();
    blocking(move || shelf_archive::read_page(&chapter, &identifier)).await
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> ArchiveResult<T> + Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(task))
        .await
        .or_raise(|| ErrorKind::Task)?
        .map_err(ErrorKind::archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shelf_archive::error::ErrorKind as ArchiveErrorKind;
    use shelf_archive::fixtures::{write_rar, write_zip};

    const PAGES: &[(&str, &[u8])] = &[("001.jpg", b"first"), ("002.jpg", b"second")];

    fn make_chapter(dir: &Path, format: ChapterFormat) -> std::path::PathBuf {
        match format {
            ChapterFormat::Directory => {
                let path = dir.join("ch1");
                std::fs::create_dir(&path).unwrap();
                for (name, data) in PAGES {
                    std::fs::write(path.join(name), data).unwrap();
                }
                path
            },
            ChapterFormat::Zip => {
                let path = dir.join("ch1.cbz");
                write_zip(&path, PAGES);
                path
            },
            ChapterFormat::Rar => {
                let path = dir.join("ch1.cbr");
                write_rar(&path, PAGES);
                path
            },
            ChapterFormat::Unsupported => {
                let path = dir.join("ch1.txt");
                std::fs::write(&path, b"hello").unwrap();
                path
            },
        }
    }

    #[rstest]
    #[case(ChapterFormat::Directory)]
    #[case(ChapterFormat::Zip)]
    #[case(ChapterFormat::Rar)]
    #[case(ChapterFormat::Unsupported)]
    #[tokio::test]
    async fn test_detect(#[case] format: ChapterFormat) {
        let temp_dir = tempfile::tempdir().unwrap();
        let chapter = make_chapter(temp_dir.path(), format);
        assert_eq!(detect(&chapter).await, format);
    }

    #[tokio::test]
    async fn test_detect_missing_is_unsupported() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(detect(&temp_dir.path().join("gone")).await, ChapterFormat::Unsupported);
    }

    #[rstest]
    #[case(ChapterFormat::Directory)]
    #[case(ChapterFormat::Zip)]
    #[case(ChapterFormat::Rar)]
    #[tokio::test]
    async fn test_pages_roundtrip(#[case] format: ChapterFormat) {
        let temp_dir = tempfile::tempdir().unwrap();
        let chapter = make_chapter(temp_dir.path(), format);
        let mut pages = list_pages(&chapter).await.unwrap();
        pages.sort();
        assert_eq!(pages, vec!["001.jpg", "002.jpg"]);
        assert_eq!(get_page(&chapter, "002.jpg").await.unwrap(), b"second");
    }

    #[rstest]
    #[case(ChapterFormat::Directory)]
    #[case(ChapterFormat::Zip)]
    #[case(ChapterFormat::Rar)]
    #[tokio::test]
    async fn test_missing_page(#[case] format: ChapterFormat) {
        let temp_dir = tempfile::tempdir().unwrap();
        let chapter = make_chapter(temp_dir.path(), format);
        let err = get_page(&chapter, "999.jpg").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Archive(ArchiveErrorKind::PageNotFound(_))));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unsupported_chapter() {
        let temp_dir = tempfile::tempdir().unwrap();
        let chapter = make_chapter(temp_dir.path(), ChapterFormat::Unsupported);
        let err = list_pages(&chapter).await.unwrap_err();
        assert!(err.is_unsupported());
        let err = get_page(&chapter, "001.jpg").await.unwrap_err();
        assert!(err.is_unsupported());
    }
}
