//! Directory traversal for installer candidates.
//!
//! This module provides the [`FileWalker`] trait and its two strategies:
//!
//! - [`FastWalker`] uses the `ignore` crate's walker
//! - [`PortableWalker`] uses the `walkdir` crate
//!
//! Both hand the depth bound to the underlying walker, never follow symbolic
//! links, and run every entry through the same [`EntryFilter`], so they yield
//! the same set of candidates for the same tree.
//!
//! # Examples
//!
//! ```
//! use sweep_scanner::{FastWalker, FileWalker};
//! use sweep_core::ScanRoot;
//!
//! let walker = FastWalker::new();
//! let root = ScanRoot::new("/nonexistent/path/that/does/not/exist");
//! assert_eq!(walker.walk(&root).count(), 0);
//! ```

use std::fmt;

use ignore::WalkBuilder;
use sweep_core::{Candidate, ScanRoot, WalkerKind};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::filter::EntryFilter;

/// A lazy stream of candidates from one root.
pub type Candidates<'a> = Box<dyn Iterator<Item = Candidate> + 'a>;

/// Enumerates candidate files below a scan root.
///
/// Implementations must honor `root.max_depth`, exclude symbolic links, and
/// match extensions through [`EntryFilter`]. Per-entry failures are logged
/// and skipped; a walk never fails as a whole.
pub trait FileWalker: fmt::Debug {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Walks `root`, yielding candidates in traversal order.
    fn walk<'a>(&'a self, root: &'a ScanRoot) -> Candidates<'a>;
}

/// Walker backed by [`ignore::Walk`].
///
/// All of the crate's filtering (hidden files, `.gitignore`, `.ignore`) is
/// disabled; a download folder is not a source tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastWalker;

impl FastWalker {
    /// Creates a new fast walker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the ignore walker for a root.
    fn build_walker(root: &ScanRoot) -> ignore::Walk {
        WalkBuilder::new(&root.path)
            // Report every file; no hidden/ignore-file filtering
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(root.max_depth))
            // Use a single thread for walking
            .threads(1)
            .build()
    }
}

impl FileWalker for FastWalker {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn walk<'a>(&'a self, root: &'a ScanRoot) -> Candidates<'a> {
        let filter = EntryFilter::new(root.max_depth);

        let candidates = Self::build_walker(root).filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log_skip(&ScanError::from(e));
                    return None;
                }
            };
            // Only stdin entries lack a file type
            let file_type = entry.file_type()?;
            accept(filter.candidate(entry.path(), entry.depth(), file_type))
        });

        Box::new(candidates)
    }
}

/// Walker backed by [`walkdir::WalkDir`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableWalker;

impl PortableWalker {
    /// Creates a new portable walker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileWalker for PortableWalker {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn walk<'a>(&'a self, root: &'a ScanRoot) -> Candidates<'a> {
        let filter = EntryFilter::new(root.max_depth);

        let candidates = WalkDir::new(&root.path)
            .follow_links(false)
            .min_depth(1)
            .max_depth(root.max_depth)
            .into_iter()
            .filter_map(move |result| match result {
                Ok(entry) => accept(filter.candidate(entry.path(), entry.depth(), entry.file_type())),
                Err(e) => {
                    log_skip(&ScanError::from(e));
                    None
                }
            });

        Box::new(candidates)
    }
}

/// Returns the walker for a configured strategy.
///
/// Both strategies are compiled in, so `Auto` always resolves to the fast walker.
#[must_use]
pub fn select_walker(kind: WalkerKind) -> Box<dyn FileWalker> {
    match kind {
        WalkerKind::Auto | WalkerKind::Fast => Box::new(FastWalker::new()),
        WalkerKind::Portable => Box::new(PortableWalker::new()),
    }
}

fn accept(result: Result<Option<Candidate>, ScanError>) -> Option<Candidate> {
    result.unwrap_or_else(|e| {
        log_skip(&e);
        None
    })
}

fn log_skip(error: &ScanError) {
    debug!(error = %error, "Skipping entry");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;

    use camino::Utf8Path;
    use tempfile::TempDir;

    /// Builds a tree with installers at depths 1 through 3 and some noise.
    fn create_fixture() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = dir.path();

        write(root, "App1.dmg");
        write(root, "App2.pkg");
        write(root, "App3.iso");
        write(root, "App.mpkg");
        write(root, "document.pdf");
        write(root, "Upper.DMG");
        write(root, ".hidden.pkg");
        write(root, "bundle.zip");
        write(root, "level1/Nested.pkg");
        write(root, "level1/level2/TooDeep.dmg");
        // Ignore files must not hide anything
        fs::write(root.join(".gitignore"), "*.iso\n").expect("write .gitignore");
        fs::create_dir(root.join("folder.dmg")).expect("mkdir");

        dir
    }

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, b"x").expect("write");
    }

    fn names(walker: &dyn FileWalker, root: &ScanRoot) -> BTreeSet<String> {
        walker
            .walk(root)
            .map(|c| {
                c.path
                    .strip_prefix(&root.path)
                    .expect("candidate under root")
                    .to_string()
            })
            .collect()
    }

    fn scan_root(dir: &TempDir, max_depth: usize) -> ScanRoot {
        let path = Utf8Path::from_path(dir.path()).expect("Invalid path");
        ScanRoot::new(path).with_max_depth(max_depth)
    }

    #[test]
    fn test_fast_walker_finds_installers() {
        let dir = create_fixture();
        let root = scan_root(&dir, 2);

        let found = names(&FastWalker::new(), &root);
        let expected: BTreeSet<String> = [
            ".hidden.pkg",
            "App.mpkg",
            "App1.dmg",
            "App2.pkg",
            "App3.iso",
            "Upper.DMG",
            "bundle.zip",
            "level1/Nested.pkg",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_walkers_agree() {
        let dir = create_fixture();
        for depth in 1..=4 {
            let root = scan_root(&dir, depth);
            assert_eq!(
                names(&FastWalker::new(), &root),
                names(&PortableWalker::new(), &root),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let dir = create_fixture();

        for walker in [select_walker(WalkerKind::Fast), select_walker(WalkerKind::Portable)] {
            let at_one = names(walker.as_ref(), &scan_root(&dir, 1));
            assert!(!at_one.contains("level1/Nested.pkg"));
            assert!(at_one.contains("App1.dmg"));

            let at_three = names(walker.as_ref(), &scan_root(&dir, 3));
            assert!(at_three.contains("level1/level2/TooDeep.dmg"));
        }
    }

    #[test]
    fn test_missing_root_is_empty() {
        let root = ScanRoot::new("/nonexistent/path/that/does/not/exist");
        assert_eq!(FastWalker::new().walk(&root).count(), 0);
        assert_eq!(PortableWalker::new().walk(&root).count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_excluded_by_both_walkers() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = dir.path();
        write(root_path, "real.dmg");
        write(root_path, "elsewhere/inner.pkg");
        std::os::unix::fs::symlink(root_path.join("real.dmg"), root_path.join("link.dmg"))
            .expect("symlink");
        std::os::unix::fs::symlink(root_path.join("gone.pkg"), root_path.join("dangling.pkg"))
            .expect("symlink");
        std::os::unix::fs::symlink(root_path.join("elsewhere"), root_path.join("linked_dir"))
            .expect("symlink");

        let root = scan_root(&dir, 2);
        for walker in [select_walker(WalkerKind::Fast), select_walker(WalkerKind::Portable)] {
            let found = names(walker.as_ref(), &root);
            assert!(found.contains("real.dmg"), "{}", walker.name());
            assert!(found.contains("elsewhere/inner.pkg"), "{}", walker.name());
            assert!(!found.contains("link.dmg"), "{}", walker.name());
            assert!(!found.contains("dangling.pkg"), "{}", walker.name());
            assert!(!found.contains("linked_dir/inner.pkg"), "{}", walker.name());
        }
    }

    #[test]
    fn test_select_walker() {
        assert_eq!(select_walker(WalkerKind::Auto).name(), "fast");
        assert_eq!(select_walker(WalkerKind::Fast).name(), "fast");
        assert_eq!(select_walker(WalkerKind::Portable).name(), "portable");
    }
}
