//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`] for counting what a scan saw and
//! [`StatsSnapshot`] for point-in-time statistics views.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](std::sync::atomic::Ordering::Relaxed)
//! ordering. Statistics are informational and don't require strict ordering
//! guarantees.
//!
//! # Examples
//!
//! ```
//! use sweep_scanner::ScanStats;
//!
//! let stats = ScanStats::new();
//! stats.increment_candidates();
//! stats.increment_direct_installers();
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.accepted(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for scan statistics.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Roots that existed and were walked.
    roots_scanned: AtomicU64,
    /// Roots that did not exist.
    roots_missing: AtomicU64,
    /// Allow-listed files found across all roots.
    candidates: AtomicU64,
    /// Disk images and packages (reported without inspection).
    direct_installers: AtomicU64,
    /// Archives passed to the classifier.
    archives: AtomicU64,
    /// Archives classified as installers.
    installer_archives: AtomicU64,
    /// Archives whose listing could not be read.
    skipped: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the scanned roots counter.
    #[inline]
    pub fn increment_roots_scanned(&self) {
        self.roots_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the missing roots counter.
    #[inline]
    pub fn increment_roots_missing(&self) {
        self.roots_missing.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the candidates counter.
    #[inline]
    pub fn increment_candidates(&self) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the direct installers counter.
    #[inline]
    pub fn increment_direct_installers(&self) {
        self.direct_installers.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the inspected archives counter.
    #[inline]
    pub fn increment_archives(&self) {
        self.archives.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the installer archives counter.
    #[inline]
    pub fn increment_installer_archives(&self) {
        self.installer_archives.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the skipped archives counter.
    #[inline]
    pub fn increment_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all statistics.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            roots_scanned: self.roots_scanned.load(Ordering::Relaxed),
            roots_missing: self.roots_missing.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            direct_installers: self.direct_installers.load(Ordering::Relaxed),
            archives: self.archives.load(Ordering::Relaxed),
            installer_archives: self.installer_archives.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    ///
    /// Useful for re-scanning.
    pub fn reset(&self) {
        self.roots_scanned.store(0, Ordering::Relaxed);
        self.roots_missing.store(0, Ordering::Relaxed);
        self.candidates.store(0, Ordering::Relaxed);
        self.direct_installers.store(0, Ordering::Relaxed);
        self.archives.store(0, Ordering::Relaxed);
        self.installer_archives.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of scan statistics.
///
/// # Examples
///
/// ```
/// use sweep_scanner::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     candidates: 6,
///     direct_installers: 3,
///     archives: 3,
///     installer_archives: 1,
///     skipped: 1,
///     ..Default::default()
/// };
///
/// assert_eq!(snap.accepted(), 4);
/// assert_eq!(snap.rejected_archives(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Roots that existed and were walked.
    pub roots_scanned: u64,
    /// Roots that did not exist.
    pub roots_missing: u64,
    /// Allow-listed files found across all roots.
    pub candidates: u64,
    /// Disk images and packages.
    pub direct_installers: u64,
    /// Archives passed to the classifier.
    pub archives: u64,
    /// Archives classified as installers.
    pub installer_archives: u64,
    /// Archives whose listing could not be read.
    pub skipped: u64,
}

impl StatsSnapshot {
    /// Returns the number of candidates reported to the user.
    #[inline]
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.direct_installers + self.installer_archives
    }

    /// Returns the number of archives not reported (data or skipped).
    #[inline]
    #[must_use]
    pub const fn rejected_archives(&self) -> u64 {
        self.archives.saturating_sub(self.installer_archives)
    }
}
