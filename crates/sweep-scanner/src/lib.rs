//! Filesystem scanner for installer artifacts.
//!
//! This crate finds disk images, packages and installer-like ZIP archives in
//! a user's download locations.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`FileWalker`]: depth-bounded traversal that never follows symlinks
//!   ([`FastWalker`] or [`PortableWalker`])
//! - [`InstallerClassifier`]: decides whether a ZIP wraps an application
//!   bundle, through an [`ArchiveLister`]
//! - [`ScanStats`]: atomic counters for reporting
//!
//! # Example
//!
//! ```ignore
//! use sweep_core::Config;
//! use sweep_scanner::Scanner;
//!
//! let scanner = Scanner::new(&Config::default())?;
//! for finding in scanner.scan_all_installers() {
//!     println!("{}", finding.candidate.path);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── FileWalker (per root, lazy)
//!     │       │
//!     │       ├── FastWalker (ignore crate)
//!     │       ├── PortableWalker (walkdir crate)
//!     │       └── EntryFilter (shared depth/symlink/extension rules)
//!     │
//!     ├── InstallerClassifier (archives only)
//!     │       │
//!     │       └── ArchiveLister (zipinfo, unzip, native zip, or none)
//!     │
//!     └── ScanStats (atomic counters)
//! ```
//!
//! # Failure Model
//!
//! A scan never fails once constructed. Missing roots contribute nothing;
//! unreadable entries and archives are skipped and logged at debug level.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod classifier;
mod error;
mod filter;
mod lister;
mod stats;
mod walker;

pub use classifier::{InstallerClassifier, MAX_INSTALLER_ENTRIES, is_app_bundle_entry};
pub use error::{ListError, ScanError};
pub use filter::EntryFilter;
pub use lister::{
    ArchiveLister, Listing, NativeZipLister, UnzipLister, ZipInfoLister, select_lister,
};
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::{Candidates, FastWalker, FileWalker, PortableWalker, select_walker};

use serde::Serialize;
use sweep_core::{Candidate, ClassificationVerdict, Config, ConfigError, ScanRoot};
use tracing::{debug, info};

/// One inspected candidate.
///
/// Direct installers carry no classification; archives carry the
/// classifier's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The file found.
    pub candidate: Candidate,

    /// The classifier's verdict, for archives.
    pub classification: Option<ClassificationVerdict>,
}

impl Finding {
    /// Returns `true` if the candidate should be reported as an installer.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.classification
            .as_ref()
            .is_none_or(ClassificationVerdict::is_installer)
    }
}

/// The installer scanner.
///
/// Holds the resolved roots, the selected walker, and the classifier.
/// Every scan method is lazy: nothing touches the filesystem until the
/// returned iterator is driven.
///
/// # Examples
///
/// ```
/// use sweep_core::ScanRoot;
/// use sweep_scanner::{FastWalker, InstallerClassifier, Scanner};
///
/// let scanner = Scanner::with_parts(
///     vec![ScanRoot::new("/nonexistent/path/that/does/not/exist")],
///     Box::new(FastWalker::new()),
///     InstallerClassifier::without_lister(),
/// );
/// assert_eq!(scanner.scan_all_installers().count(), 0);
/// ```
#[derive(Debug)]
pub struct Scanner {
    /// Roots in scan order.
    roots: Vec<ScanRoot>,
    /// Enumeration strategy.
    walker: Box<dyn FileWalker>,
    /// Archive classifier.
    classifier: InstallerClassifier,
    /// Statistics counters.
    stats: ScanStats,
}

impl Scanner {
    /// Creates a scanner from the configuration.
    ///
    /// Resolves the roots, picks the walker, and probes for an archive lister.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid or the
    /// standard roots cannot be resolved.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let roots = config.scan.scan_roots()?;
        let walker = select_walker(config.scan.walker);
        let classifier = InstallerClassifier::from_kind(config.classify.lister);

        info!(
            roots = roots.len(),
            max_depth = config.scan.max_depth,
            walker = walker.name(),
            lister = classifier.lister_name().unwrap_or("none"),
            "Creating scanner"
        );

        Ok(Self::with_parts(roots, walker, classifier))
    }

    /// Creates a scanner from already-built parts.
    #[must_use]
    pub fn with_parts(
        roots: Vec<ScanRoot>,
        walker: Box<dyn FileWalker>,
        classifier: InstallerClassifier,
    ) -> Self {
        Self {
            roots,
            walker,
            classifier,
            stats: ScanStats::new(),
        }
    }

    /// Returns the configured roots, in scan order.
    #[must_use]
    pub fn roots(&self) -> &[ScanRoot] {
        &self.roots
    }

    /// Returns the classifier.
    #[must_use]
    pub const fn classifier(&self) -> &InstallerClassifier {
        &self.classifier
    }

    /// Returns a snapshot of current statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Enumerates candidates under one root.
    ///
    /// A root that does not exist yields nothing.
    pub fn scan_root<'a>(&'a self, root: &'a ScanRoot) -> Candidates<'a> {
        if !root.exists() {
            self.stats.increment_roots_missing();
            return Box::new(std::iter::empty());
        }

        self.stats.increment_roots_scanned();
        debug!(root = %root.path, max_depth = root.max_depth, "Scanning root");

        Box::new(
            self.walker
                .walk(root)
                .inspect(|_| self.stats.increment_candidates()),
        )
    }

    /// Enumerates candidates under each root in order.
    ///
    /// Roots are walked one after another; a file reachable from two roots is
    /// reported twice.
    pub fn scan_all<'a>(&'a self, roots: &'a [ScanRoot]) -> Candidates<'a> {
        Box::new(roots.iter().flat_map(move |root| self.scan_root(root)))
    }

    /// Classifies one candidate.
    ///
    /// Direct installers pass through; archives go to the classifier.
    pub fn inspect(&self, candidate: Candidate) -> Finding {
        if !candidate.class.needs_inspection() {
            self.stats.increment_direct_installers();
            return Finding {
                candidate,
                classification: None,
            };
        }

        self.stats.increment_archives();
        let classification = self.classifier.is_installer_archive(&candidate.path);
        if classification.is_installer() {
            self.stats.increment_installer_archives();
        } else if classification.skip_reason().is_some() {
            self.stats.increment_skipped();
        }

        Finding {
            candidate,
            classification: Some(classification),
        }
    }

    /// Walks every configured root and classifies every candidate, accepted
    /// or not.
    ///
    /// Statistics are reset when this is called.
    pub fn inspect_all(&self) -> impl Iterator<Item = Finding> + '_ {
        self.stats.reset();
        info!(roots = self.roots.len(), "Starting scan");

        self.scan_all(&self.roots)
            .map(move |candidate| self.inspect(candidate))
    }

    /// Walks every configured root and yields the installers found.
    ///
    /// Missing roots, corrupt archives, and unreadable archives are left out
    /// silently.
    pub fn scan_all_installers(&self) -> impl Iterator<Item = Finding> + '_ {
        self.inspect_all().filter(Finding::is_accepted)
    }
}
