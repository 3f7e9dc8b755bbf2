//! Chapters stored as a plain folder of images.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_page;
use crate::PageSource;
use std::fs;
use std::path::{Path, PathBuf};

/// A chapter folder. Every direct entry (file or subfolder) is a page.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}
impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical chapter root; symlinked pages must resolve inside it.
    fn canonical_root(&self) -> Result<PathBuf> {
        fs::canonicalize(&self.root).map_err(|e| ErrorKind::io(e, &self.root))
    }
}

impl PageSource for DirectorySource {
    fn list_pages(&self) -> Result<Vec<String>> {
        let root = self.canonical_root()?;
        let entries = fs::read_dir(&self.root).map_err(|e| ErrorKind::io(e, &self.root))?;
        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::io(e, &self.root))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                // Can't be handed out as an identifier, so it can't be
                // requested either.
                Err(raw) => {
                    tracing::warn!(chapter = %self.root.display(), name = ?raw, "Skipping non-UTF-8 page name");
                    continue;
                },
            };
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            if is_symlink && !fs::canonicalize(entry.path()).is_ok_and(|target| target.starts_with(&root)) {
                tracing::warn!(chapter = %self.root.display(), name = %name, "Skipping symlink that leaves the chapter");
                continue;
            }
            pages.push(name);
        }
        Ok(pages)
    }

    fn read_page(&self, identifier: &str) -> Result<Vec<u8>> {
        let path = self.root.join(validate_page(identifier)?);
        let root = self.canonical_root()?;
        let resolved = match fs::canonicalize(&path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(exn::Exn::new(e).raise(ErrorKind::PageNotFound(identifier.to_string())));
            },
            Err(e) => return Err(ErrorKind::io(e, &path)),
        };
        if !resolved.starts_with(&root) {
            exn::bail!(ErrorKind::InvalidPage(identifier.to_string()));
        }
        match fs::read(&resolved) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(exn::Exn::new(e).raise(ErrorKind::PageNotFound(identifier.to_string())))
            },
            Err(e) => Err(ErrorKind::io(e, &path)),
        }
    }
}
