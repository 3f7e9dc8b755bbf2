//! One [`PageSource`](crate::PageSource) implementation per supported
//! [`ChapterFormat`](crate::ChapterFormat).

mod directory;
mod rar_archive;
mod zip_archive;

pub use self::directory::DirectorySource;
pub use self::rar_archive::RarSource;
pub use self::zip_archive::ZipSource;
