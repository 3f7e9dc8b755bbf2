//! Library listing models.
//!
//! Immutable snapshots taken while scanning the library; nothing here is
//! persisted.

#[cfg(feature = "serde")]
use serde::Serialize;
use time::OffsetDateTime;

/// A series: one folder directly inside the library root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct SeriesEntry {
    /// Folder name, unique within the root
    pub name: String,
    /// Last modified timestamp of the folder
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub last_modified: OffsetDateTime,
}
impl SeriesEntry {
    pub fn new(name: impl Into<String>, last_modified: impl Into<OffsetDateTime>) -> Self {
        Self { name: name.into(), last_modified: last_modified.into() }
    }
}

/// A chapter: any entry directly inside a series folder, whether it is a
/// folder of images or a single archive file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct ChapterEntry {
    /// Entry name, unique within the series
    pub name: String,
    /// Last modified timestamp of the folder or archive
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub last_modified: OffsetDateTime,
}
impl ChapterEntry {
    pub fn new(name: impl Into<String>, last_modified: impl Into<OffsetDateTime>) -> Self {
        Self { name: name.into(), last_modified: last_modified.into() }
    }
}
