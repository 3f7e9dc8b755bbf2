use crate::ChapterFormat;
use std::fs::Metadata;
use std::path::Path;

impl ChapterFormat {
    /// Classify the chapter at `path`.
    ///
    /// A directory always wins; otherwise only the (case-sensitive) extension
    /// is considered. No magic bytes are read, so a zip file named `.rar` is
    /// reported as [`Rar`](Self::Rar) and fails when it is opened. A path
    /// that cannot be stat'ed is classified by its suffix alone.
    #[must_use]
    pub fn detect(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_metadata(path, std::fs::metadata(path).ok().as_ref())
    }

    /// Same rules as [`detect()`](Self::detect), with metadata that the
    /// caller already fetched (`None` if it could not be).
    #[must_use]
    pub fn from_metadata(path: impl AsRef<Path>, metadata: Option<&Metadata>) -> Self {
        if metadata.is_some_and(Metadata::is_dir) {
            return ChapterFormat::Directory;
        }
        Self::from_extension(path)
    }

    /// Classify by extension only, ignoring whatever is on disk.
    #[must_use]
    pub fn from_extension(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| {
                [ChapterFormat::Zip, ChapterFormat::Rar]
                    .into_iter()
                    .find(|format| format.extensions().contains(&ext))
            })
            .unwrap_or(ChapterFormat::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use crate::ChapterFormat;
    use rstest::rstest;

    #[rstest]
    #[case("ch1.zip", ChapterFormat::Zip)]
    #[case("ch1.cbz", ChapterFormat::Zip)]
    #[case("ch1.rar", ChapterFormat::Rar)]
    #[case("ch1.cbr", ChapterFormat::Rar)]
    #[case("series/vol.2/ch1.cbz", ChapterFormat::Zip)]
    // Suffixes are matched exactly as stored.
    #[case("ch1.CBZ", ChapterFormat::Unsupported)]
    #[case("ch1.Rar", ChapterFormat::Unsupported)]
    #[case("ch1.txt", ChapterFormat::Unsupported)]
    #[case("ch1.pdf", ChapterFormat::Unsupported)]
    #[case("ch1", ChapterFormat::Unsupported)]
    // `.cbz` is a dotfile with no extension.
    #[case(".cbz", ChapterFormat::Unsupported)]
    fn test_from_extension(#[case] path: &str, #[case] expected: ChapterFormat) {
        assert_eq!(ChapterFormat::from_extension(path), expected);
    }

    #[test]
    fn test_directory_wins_over_suffix() {
        let temp_dir = tempfile::tempdir().unwrap();
        let folder = temp_dir.path().join("ch1.cbz");
        std::fs::create_dir(&folder).unwrap();
        assert_eq!(ChapterFormat::detect(&folder), ChapterFormat::Directory);
        let plain = temp_dir.path().join("ch2");
        std::fs::create_dir(&plain).unwrap();
        assert_eq!(ChapterFormat::detect(&plain), ChapterFormat::Directory);
    }

    #[test]
    fn test_files_use_suffix() {
        let temp_dir = tempfile::tempdir().unwrap();
        for (name, expected) in [
            ("a.cbz", ChapterFormat::Zip),
            ("b.cbr", ChapterFormat::Rar),
            ("c.txt", ChapterFormat::Unsupported),
        ] {
            let path = temp_dir.path().join(name);
            // Contents are irrelevant, detection never reads them.
            std::fs::write(&path, b"not really an archive").unwrap();
            assert_eq!(ChapterFormat::detect(&path), expected);
        }
    }

    #[test]
    fn test_detect_is_repeatable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ch1.cbz");
        std::fs::write(&path, b"").unwrap();
        let first = ChapterFormat::detect(&path);
        assert_eq!(ChapterFormat::detect(&path), first);
        // ... until the filesystem changes underneath.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert_eq!(ChapterFormat::detect(&path), ChapterFormat::Directory);
    }

    #[test]
    fn test_missing_path_uses_suffix() {
        assert_eq!(ChapterFormat::detect("/definitely/not/here.cbr"), ChapterFormat::Rar);
        assert_eq!(ChapterFormat::detect("/definitely/not/here"), ChapterFormat::Unsupported);
    }
}
