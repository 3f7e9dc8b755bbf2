//! Chapters stored as zip-family archives (.zip, .cbz).

use crate::error::{ErrorKind, Result};
use crate::PageSource;
use exn::{OptionExt, ResultExt};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// A zip/cbz chapter. Every entry in the central directory is a page, named
/// by its stored path (folder prefix included).
#[derive(Clone, Debug)]
pub struct ZipSource {
    path: PathBuf,
}
impl ZipSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<ZipArchive<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| ErrorKind::io(e, &self.path))?;
        ZipArchive::new(BufReader::new(file)).or_raise(|| ErrorKind::InvalidArchive)
    }
}

impl PageSource for ZipSource {
    fn list_pages(&self) -> Result<Vec<String>> {
        let archive = self.open()?;
        // Names are kept in central-directory order.
        Ok(archive.file_names().map(str::to_owned).collect())
    }

    fn read_page(&self, identifier: &str) -> Result<Vec<u8>> {
        let mut archive = self.open()?;
        // Exact match against the stored name: no separator translation, no
        // case folding.
        let index = archive
            .index_for_name(identifier)
            .ok_or_raise(|| ErrorKind::PageNotFound(identifier.to_string()))?;
        let mut entry = archive.by_index(index).or_raise(|| ErrorKind::InvalidArchive)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).or_raise(|| ErrorKind::InvalidArchive)?;
        tracing::debug!(archive = %self.path.display(), page = identifier, size = bytes.len(), "Extracted zip entry");
        Ok(bytes)
    }
}
