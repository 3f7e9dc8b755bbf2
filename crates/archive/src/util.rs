use crate::ChapterFormat;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for ChapterFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for ChapterFormat {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl ChapterFormat {
    /// Returns the file extensions recognised for this format.
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ChapterFormat::Directory | ChapterFormat::Unsupported => &[],
            ChapterFormat::Zip => &["zip", "cbz"],
            ChapterFormat::Rar => &["rar", "cbr"],
        }
    }

    /// Returns the short name (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterFormat::Directory => "directory",
            ChapterFormat::Zip => "zip",
            ChapterFormat::Rar => "rar",
            ChapterFormat::Unsupported => "unsupported",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, ChapterFormat::Unsupported)
    }
}
