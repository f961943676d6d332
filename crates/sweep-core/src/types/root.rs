//! Scan roots.
//!
//! A [`ScanRoot`] is one top-level directory searched for installer
//! artifacts. The standard set lives under the user's home directory and is
//! built by [`standard_roots`].

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Default maximum depth below each scan root.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Home-relative directories searched by default, in scan order.
pub const STANDARD_ROOT_DIRS: &[&str] = &[
    "Downloads",
    "Desktop",
    "Documents",
    "Public",
    "Library/Downloads",
];

/// A directory to search, with its depth bound.
///
/// Existence is not checked on construction; a root that does not exist at
/// scan time contributes nothing.
///
/// # Examples
///
/// ```
/// use sweep_core::ScanRoot;
///
/// let root = ScanRoot::new("/Users/me/Downloads");
/// assert_eq!(root.max_depth, 2);
///
/// let shallow = ScanRoot::new("/Users/me/Desktop").with_max_depth(1);
/// assert_eq!(shallow.max_depth, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRoot {
    /// Directory to walk.
    pub path: Utf8PathBuf,

    /// Deepest level included (1 = direct children of `path`).
    pub max_depth: usize,
}

impl ScanRoot {
    /// Creates a root with the default depth bound.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the depth bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `true` if the root currently exists as a directory.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}

/// Builds the standard roots under `home`, in scan order.
///
/// # Examples
///
/// ```
/// use sweep_core::standard_roots;
/// use camino::Utf8Path;
///
/// let roots = standard_roots(Utf8Path::new("/Users/me"), 2);
/// assert_eq!(roots[0].path, "/Users/me/Downloads");
/// assert_eq!(roots[4].path, "/Users/me/Library/Downloads");
/// ```
#[must_use]
pub fn standard_roots(home: &Utf8Path, max_depth: usize) -> Vec<ScanRoot> {
    STANDARD_ROOT_DIRS
        .iter()
        .map(|dir| ScanRoot::new(home.join(dir)).with_max_depth(max_depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roots_order() {
        let roots = standard_roots(Utf8Path::new("/home/u"), 3);
        let paths: Vec<&str> = roots.iter().map(|r| r.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "/home/u/Downloads",
                "/home/u/Desktop",
                "/home/u/Documents",
                "/home/u/Public",
                "/home/u/Library/Downloads",
            ]
        );
        assert!(roots.iter().all(|r| r.max_depth == 3));
    }

    #[test]
    fn test_missing_root_does_not_exist() {
        let root = ScanRoot::new("/nonexistent/path/that/does/not/exist");
        assert!(!root.exists());
    }

    #[test]
    fn test_existing_root() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let path = Utf8Path::from_path(dir.path()).expect("Invalid path");
        assert!(ScanRoot::new(path).exists());
    }
}
