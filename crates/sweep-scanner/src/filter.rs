//! The entry predicate shared by every walker.
//!
//! Walkers only enumerate; whether an entry becomes a [`Candidate`] is
//! decided here, so the fast and portable walkers cannot drift apart on depth
//! limiting, symlink exclusion, or extension matching.

use std::fs::FileType;
use std::path::Path;

use camino::Utf8Path;
use sweep_core::{Candidate, ExtensionClass};

use crate::error::ScanError;

/// Decides which walked entries are candidates.
///
/// # Examples
///
/// ```ignore
/// let filter = EntryFilter::new(2);
/// for entry in walk(root) {
///     if let Some(candidate) = filter.candidate(entry.path(), entry.depth(), entry.file_type())? {
///         // ...
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFilter {
    max_depth: usize,
}

impl EntryFilter {
    /// Creates a filter admitting entries at depth `1..=max_depth`.
    #[inline]
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns `true` if an entry at `depth` is within bounds.
    ///
    /// Depth 0 is the root itself and is never admitted.
    #[inline]
    #[must_use]
    pub const fn admits_depth(&self, depth: usize) -> bool {
        depth >= 1 && depth <= self.max_depth
    }

    /// Builds a candidate from a walked entry, if it qualifies.
    ///
    /// `file_type` must be the entry's own type (not following symlinks), so
    /// symlinks fail the regular-file check whatever they point to.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NonUtf8Path`] for an allow-listed file whose path
    /// is not valid UTF-8.
    pub fn candidate(
        &self,
        path: &Path,
        depth: usize,
        file_type: FileType,
    ) -> Result<Option<Candidate>, ScanError> {
        if !self.admits_depth(depth) || !file_type.is_file() {
            return Ok(None);
        }

        let Some(class) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExtensionClass::from_extension)
        else {
            return Ok(None);
        };

        let utf8_path =
            Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

        Ok(Some(Candidate::new(utf8_path, class, depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn file_type_of(path: &Path) -> FileType {
        fs::symlink_metadata(path).expect("metadata").file_type()
    }

    #[test]
    fn test_admits_depth() {
        let filter = EntryFilter::new(2);
        assert!(!filter.admits_depth(0));
        assert!(filter.admits_depth(1));
        assert!(filter.admits_depth(2));
        assert!(!filter.admits_depth(3));
    }

    #[test]
    fn test_regular_file_with_listed_extension() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("Setup.DMG");
        fs::write(&path, b"image").expect("write");

        let candidate = EntryFilter::new(2)
            .candidate(&path, 1, file_type_of(&path))
            .expect("utf-8 path")
            .expect("candidate");
        assert_eq!(candidate.class, ExtensionClass::DirectInstaller);
        assert_eq!(candidate.depth, 1);
    }

    #[test]
    fn test_unlisted_extension_and_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let pdf = dir.path().join("document.pdf");
        fs::write(&pdf, b"pdf").expect("write");
        let folder = dir.path().join("folder.zip");
        fs::create_dir(&folder).expect("mkdir");

        let filter = EntryFilter::new(2);
        assert!(filter.candidate(&pdf, 1, file_type_of(&pdf)).expect("ok").is_none());
        assert!(filter.candidate(&folder, 1, file_type_of(&folder)).expect("ok").is_none());
    }

    #[test]
    fn test_too_deep() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("App.pkg");
        fs::write(&path, b"pkg").expect("write");

        let filter = EntryFilter::new(1);
        assert!(filter.candidate(&path, 2, file_type_of(&path)).expect("ok").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_rejected() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let target = dir.path().join("real.dmg");
        fs::write(&target, b"image").expect("write");
        let link = dir.path().join("link.dmg");
        std::os::unix::fs::symlink(&target, &link).expect("symlink");
        let dangling = dir.path().join("dangling.pkg");
        std::os::unix::fs::symlink(dir.path().join("missing.pkg"), &dangling).expect("symlink");

        let filter = EntryFilter::new(2);
        assert!(filter.candidate(&link, 1, file_type_of(&link)).expect("ok").is_none());
        assert!(filter.candidate(&dangling, 1, file_type_of(&dangling)).expect("ok").is_none());
    }
}
