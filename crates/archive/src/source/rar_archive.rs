//! Chapters stored as rar-family archives (.rar, .cbr).
//!
//! The `unrar` bindings only open archives by path, so a page read walks the
//! headers from the start of the file and extracts the one matching entry.
//! Nothing but that entry is held in memory.

use crate::error::{ErrorKind, Result};
use crate::PageSource;
use exn::ResultExt;
use std::path::{Path, PathBuf};
use unrar::Archive;

/// A rar/cbr chapter. Every file header is a page, named by its stored path.
#[derive(Clone, Debug)]
pub struct RarSource {
    path: PathBuf,
}
impl RarSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for RarSource {
    fn list_pages(&self) -> Result<Vec<String>> {
        let archive = Archive::new(&self.path).open_for_listing().or_raise(|| ErrorKind::InvalidArchive)?;
        let mut pages = Vec::new();
        for header in archive {
            let header = header.or_raise(|| ErrorKind::InvalidArchive)?;
            match header.filename.to_str() {
                Some(name) => pages.push(name.to_string()),
                None => {
                    tracing::warn!(archive = %self.path.display(), name = ?header.filename, "Skipping non-UTF-8 page name");
                },
            }
        }
        Ok(pages)
    }

    fn read_page(&self, identifier: &str) -> Result<Vec<u8>> {
        let mut archive = Archive::new(&self.path).open_for_processing().or_raise(|| ErrorKind::InvalidArchive)?;
        while let Some(header) = archive.read_header().or_raise(|| ErrorKind::InvalidArchive)? {
            if header.entry().filename.to_str() == Some(identifier) {
                let (bytes, _rest) = header.read().or_raise(|| ErrorKind::InvalidArchive)?;
                tracing::debug!(archive = %self.path.display(), page = identifier, size = bytes.len(), "Extracted rar entry");
                return Ok(bytes);
            }
            archive = header.skip().or_raise(|| ErrorKind::InvalidArchive)?;
        }
        exn::bail!(ErrorKind::PageNotFound(identifier.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_rar;

    fn chapter(entries: &[(&str, &[u8])]) -> (tempfile::TempDir, RarSource) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ch1.cbr");
        write_rar(&path, entries);
        (temp_dir, RarSource::new(path))
    }

    #[test]
    fn test_lists_headers_in_archive_order() {
        let (_temp_dir, source) = chapter(&[("002.jpg", b"two"), ("001.jpg", b"one"), ("003.jpg", b"three")]);
        assert_eq!(source.list_pages().unwrap(), ["002.jpg", "001.jpg", "003.jpg"]);
    }

    #[test]
    fn test_extracts_single_entry() {
        let big = b"\x89PNG\r\n\x1a\n pretend this is a png".repeat(128);
        let (_temp_dir, source) = chapter(&[("001.png", b"first"), ("002.png", &big), ("003.png", b"third")]);
        assert_eq!(source.read_page("002.png").unwrap(), big);
        assert_eq!(source.read_page("003.png").unwrap(), b"third");
        assert_eq!(source.read_page("001.png").unwrap(), b"first");
    }

    #[test]
    fn test_missing_entry() {
        let (_temp_dir, source) = chapter(&[("001.jpg", b"one")]);
        let err = source.read_page("002.jpg").unwrap_err();
        assert_eq!(*err, ErrorKind::PageNotFound("002.jpg".to_string()));
    }

    #[test]
    fn test_every_listed_page_is_readable() {
        let (_temp_dir, source) = chapter(&[("a.jpg", b"a"), ("b.jpg", b"bb"), ("c.jpg", b"")]);
        for page in source.list_pages().unwrap() {
            assert!(source.read_page(&page).is_ok(), "{page} was listed but not readable");
        }
    }

    #[test]
    fn test_not_a_rar() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ch1.cbr");
        std::fs::write(&path, b"PK\x03\x04 a zip wearing a rar suffix").unwrap();
        let err = RarSource::new(&path).list_pages().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchive);
        let err = RarSource::new(&path).read_page("001.jpg").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchive);
    }
}
