//! Chapter format detection and page access.
//!
//! A chapter on disk is either a plain directory of images, a zip-family
//! archive (`.zip`/`.cbz`) or a rar-family archive (`.rar`/`.cbr`). This crate
//! hides the difference behind a closed [`ChapterFormat`] enum and the
//! [`PageSource`] trait, providing:
//!
//! - **Format detection** from filesystem metadata and path suffix
//!   ([`ChapterFormat::detect`])
//! - **Page listing** in the order the backend yields them
//!   ([`PageSource::list_pages`])
//! - **Page extraction** of exactly one page by identifier
//!   ([`PageSource::read_page`])
//!
//! Everything here is synchronous and blocking. Detection is never cached:
//! every call looks at the filesystem again.
//!
//! ```no_run
//! use shelf_archive::{Chapter, PageSource};
//!
//! # fn example() -> shelf_archive::error::Result<()> {
//! let chapter = Chapter::open("/library/One Piece/ch1.cbz")?;
//! for page in chapter.list_pages()? {
//!     let bytes = chapter.read_page(&page)?;
//!     println!("{page}: {} bytes", bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

mod chapter;
mod detect;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod path;
mod source;
mod util;

pub use crate::chapter::{Chapter, list_pages, read_page};
pub use crate::path::validate as validate_page;
pub use crate::source::{DirectorySource, RarSource, ZipSource};
use crate::error::Result;

/// The storage representation of a chapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChapterFormat {
    /// A folder whose direct entries are the pages.
    Directory,
    /// Zip-family archive (.zip, .cbz)
    Zip,
    /// Rar-family archive (.rar, .cbr)
    Rar,
    /// Anything else; every page operation on it fails.
    Unsupported,
}

/// Read access to the pages of one chapter.
///
/// Implementations hold no open handles between calls: each method opens the
/// underlying directory or archive, does its work, and releases it before
/// returning (on error paths too).
pub trait PageSource {
    /// Identifiers of every page, in the order the backend yields them.
    fn list_pages(&self) -> Result<Vec<String>>;

    /// Raw bytes of the page named `identifier`.
    ///
    /// Returns [`PageNotFound`](crate::error::ErrorKind::PageNotFound) when
    /// the chapter holds no such page.
    fn read_page(&self, identifier: &str) -> Result<Vec<u8>>;
}
