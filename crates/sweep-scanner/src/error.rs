//! Error types for the sweep-scanner crate.
//!
//! This module provides [`ScanError`] for directory traversal failures and
//! [`ListError`] for archive listing failures.
//!
//! # Error Recovery Strategy
//!
//! Neither type ever reaches the caller of a scan:
//!
//! - **Walk errors** ([`ScanError`]): log at debug level, skip the entry, continue
//! - **Listing errors** ([`ListError`]): collapse into a
//!   [`SkipReason`](sweep_core::SkipReason), classify as not an installer, continue

use std::io;
use std::process::ExitStatus;

use sweep_core::SkipReason;

/// Errors that can occur while walking a scan root.
///
/// # Examples
///
/// ```
/// use sweep_scanner::ScanError;
/// use std::path::PathBuf;
///
/// let err = ScanError::NonUtf8Path(PathBuf::from("bad"));
/// assert!(err.to_string().contains("UTF-8"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The fast walker failed to read an entry.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// The portable walker failed to read an entry.
    #[error("failed to walk directory: {0}")]
    PortableWalk(#[from] walkdir::Error),

    /// A path is not valid UTF-8.
    ///
    /// This crate uses UTF-8 paths throughout. If a non-UTF-8 path is
    /// encountered, it cannot be reported.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

/// Errors that can occur while listing an archive's entries.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// No listing capability is configured.
    #[error("no archive lister available")]
    Unavailable,

    /// The archive could not be opened.
    #[error("failed to open archive: {0}")]
    Open(#[source] io::Error),

    /// The listing tool could not be started.
    #[error("failed to start {tool}: {source}")]
    Spawn {
        /// Name of the tool.
        tool: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the listing failed midway.
    #[error("failed to read listing: {0}")]
    Io(#[from] io::Error),

    /// The listing tool exited unsuccessfully.
    #[error("{tool} exited with {status}")]
    ToolFailed {
        /// Name of the tool.
        tool: &'static str,
        /// Exit status reported by the tool.
        status: ExitStatus,
    },

    /// The in-process reader rejected the archive.
    #[error("failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ListError {
    /// Maps this error to the reason recorded on a skipped candidate.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweep_scanner::ListError;
    /// use sweep_core::SkipReason;
    ///
    /// assert_eq!(ListError::Unavailable.skip_reason(), SkipReason::NoLister);
    /// ```
    #[must_use]
    pub fn skip_reason(&self) -> SkipReason {
        match self {
            Self::Unavailable => SkipReason::NoLister,
            Self::Open(source) | Self::Io(source) => io_reason(source),
            Self::Spawn { .. } => SkipReason::Unreadable,
            Self::ToolFailed { .. } => SkipReason::Corrupt,
            Self::Zip(zip::result::ZipError::Io(source)) => io_reason(source),
            Self::Zip(_) => SkipReason::Corrupt,
        }
    }
}

fn io_reason(error: &io::Error) -> SkipReason {
    if error.kind() == io::ErrorKind::PermissionDenied {
        SkipReason::PermissionDenied
    } else {
        SkipReason::Unreadable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_permission_denied() {
        let err = ListError::Open(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.skip_reason(), SkipReason::PermissionDenied);
        assert!(err.to_string().contains("failed to open archive"));
    }

    #[test]
    fn test_open_not_found_is_unreadable() {
        let err = ListError::Open(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.skip_reason(), SkipReason::Unreadable);
    }

    #[test]
    fn test_spawn_failure() {
        let err = ListError::Spawn {
            tool: "zipinfo",
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.skip_reason(), SkipReason::Unreadable);
        assert!(err.to_string().contains("zipinfo"));
    }

    #[test]
    fn test_zip_errors() {
        let err = ListError::from(zip::result::ZipError::InvalidArchive("bad header".into()));
        assert_eq!(err.skip_reason(), SkipReason::Corrupt);

        let err = ListError::from(zip::result::ZipError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert_eq!(err.skip_reason(), SkipReason::PermissionDenied);
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NonUtf8Path(std::path::PathBuf::from("test"));
        assert_eq!(err.to_string(), "path is not valid UTF-8: test");
    }
}
