//! Series and chapter listing.
//!
//! Plain directory traversal, one level deep, with no knowledge of chapter
//! formats. Entries come back in the order the OS enumerates them.

use crate::error::{ErrorKind, Result};
use crate::models::{ChapterEntry, SeriesEntry};
use async_stream::stream;
use futures::{Stream, TryStreamExt};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::SystemTime;
use tokio::fs::{self, DirEntry};

pub type EntryStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

enum WalkEntry {
    Keep(String, SystemTime),
    Skip,
}

/// Stream every series (sub-directory) of the library `root`.
///
/// Files sitting directly in the root are silently skipped. Symlinks are
/// followed. The stream ends after the first error; callers that collect it
/// never see a partial listing.
pub fn series_stream(root: impl Into<PathBuf>) -> EntryStream<'static, SeriesEntry> {
    entry_stream(root.into(), true, SeriesEntry::new)
}

/// Stream every chapter of the series folder at `series`: all entries,
/// directories and archive files alike, unfiltered.
pub fn chapter_stream(series: impl Into<PathBuf>) -> EntryStream<'static, ChapterEntry> {
    entry_stream(series.into(), false, ChapterEntry::new)
}

/// List every series of the library `root`.
///
/// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if `root` does not
/// exist.
///
/// # Examples
///
/// ```no_run
/// # use shelf_storage::error::Result;
/// # async fn example() -> Result<()> {
/// for series in shelf_storage::list_series("/srv/manga").await? {
///     println!("{} (modified {})", series.name, series.last_modified);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn list_series(root: impl AsRef<Path>) -> Result<Vec<SeriesEntry>> {
    series_stream(root.as_ref()).try_collect().await
}

/// List every chapter of the series folder at `series`.
pub async fn list_chapters(series: impl AsRef<Path>) -> Result<Vec<ChapterEntry>> {
    chapter_stream(series.as_ref()).try_collect().await
}

fn entry_stream<T: Send + 'static>(
    dir: PathBuf,
    dirs_only: bool,
    build: fn(String, SystemTime) -> T,
) -> EntryStream<'static, T> {
    Box::pin(stream! {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) => {
                yield Err(exn::Exn::from(ErrorKind::map_io_error(err, &dir)));
                return;
            },
        };
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    yield Err(exn::Exn::from(ErrorKind::map_io_error(err, &dir)));
                    return;
                },
            };
            match process_entry(entry, dirs_only).await {
                Ok(WalkEntry::Keep(name, modified)) => yield Ok(build(name, modified)),
                Ok(WalkEntry::Skip) => {},
                Err(err) => {
                    yield Err(err);
                    return;
                },
            }
        }
    })
}

async fn process_entry(entry: DirEntry, dirs_only: bool) -> Result<WalkEntry> {
    let path = entry.path();
    // `fs::metadata` rather than `entry.metadata()` so that symlinked series
    // and chapters are treated like what they point at.
    let metadata = fs::metadata(&path).await.map_err(|e| ErrorKind::map_io_error(e, &path))?;
    if dirs_only && !metadata.is_dir() {
        return Ok(WalkEntry::Skip);
    }
    let Ok(name) = entry.file_name().into_string() else {
        tracing::warn!(path = %path.display(), "Skipping entry with non-UTF-8 name");
        return Ok(WalkEntry::Skip);
    };
    let modified = metadata.modified().map_err(ErrorKind::Io)?;
    Ok(WalkEntry::Keep(name, modified))
}
