//! Classification outcomes for archive candidates.
//!
//! The classifier produces a [`ClassificationVerdict`] per archive: either a
//! [`Verdict`] backed by [`Evidence`] from the archive listing, or a
//! [`SkipReason`] when the listing could not be obtained. Skips collapse to
//! "not an installer" through [`ClassificationVerdict::is_installer`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an archive looks like a software installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A small archive carrying an application bundle.
    Installer,

    /// Anything else.
    NotInstaller,
}

impl Verdict {
    /// Returns a short label for display.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Installer => "installer",
            Self::NotInstaller => "not-installer",
        }
    }
}

/// What the classifier saw in an archive listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Evidence {
    /// Number of entries read from the listing.
    ///
    /// When [`truncated`](Self::truncated) is set this is a lower bound.
    pub entries_seen: usize,

    /// The listing was abandoned because it exceeded the entry ceiling.
    pub truncated: bool,

    /// An entry with a `.app` path component was among those read.
    pub has_app_bundle: bool,
}

/// Why an archive could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SkipReason {
    /// No listing capability is configured or available.
    NoLister,

    /// The archive could not be opened for lack of permission.
    PermissionDenied,

    /// The archive could not be read (I/O error, tool failed to start).
    Unreadable,

    /// The listing tool rejected the file as a ZIP archive.
    Corrupt,
}

impl SkipReason {
    /// Returns a short label for display.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoLister => "no-lister",
            Self::PermissionDenied => "permission-denied",
            Self::Unreadable => "unreadable",
            Self::Corrupt => "corrupt",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one archive.
///
/// # Examples
///
/// ```
/// use sweep_core::{ClassificationVerdict, Evidence, SkipReason, Verdict};
///
/// let accepted = ClassificationVerdict::Classified {
///     verdict: Verdict::Installer,
///     evidence: Evidence { entries_seen: 2, truncated: false, has_app_bundle: true },
/// };
/// assert!(accepted.is_installer());
///
/// let skipped = ClassificationVerdict::Skipped { reason: SkipReason::Corrupt };
/// assert!(!skipped.is_installer());
/// assert_eq!(skipped.verdict(), Verdict::NotInstaller);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ClassificationVerdict {
    /// The listing was read and a verdict reached.
    Classified {
        /// The decision.
        verdict: Verdict,
        /// What the decision was based on.
        evidence: Evidence,
    },

    /// The listing could not be read; treated as not an installer.
    Skipped {
        /// Why the listing failed.
        reason: SkipReason,
    },
}

impl ClassificationVerdict {
    /// Collapses the outcome to a verdict. Skips count as [`Verdict::NotInstaller`].
    #[inline]
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        match self {
            Self::Classified { verdict, .. } => *verdict,
            Self::Skipped { .. } => Verdict::NotInstaller,
        }
    }

    /// Returns `true` only for a classified installer.
    #[inline]
    #[must_use]
    pub const fn is_installer(&self) -> bool {
        matches!(self.verdict(), Verdict::Installer)
    }

    /// Returns the evidence, if the listing was read.
    #[must_use]
    pub const fn evidence(&self) -> Option<&Evidence> {
        match self {
            Self::Classified { evidence, .. } => Some(evidence),
            Self::Skipped { .. } => None,
        }
    }

    /// Returns the skip reason, if the listing could not be read.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Classified { .. } => None,
            Self::Skipped { reason } => Some(*reason),
        }
    }

    /// Returns a short label: the verdict label or `skipped:<reason>`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Classified { verdict, .. } => verdict.label().to_owned(),
            Self::Skipped { reason } => format!("skipped:{reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_is_not_installer() {
        for reason in [
            SkipReason::NoLister,
            SkipReason::PermissionDenied,
            SkipReason::Unreadable,
            SkipReason::Corrupt,
        ] {
            let verdict = ClassificationVerdict::Skipped { reason };
            assert!(!verdict.is_installer());
            assert_eq!(verdict.skip_reason(), Some(reason));
            assert!(verdict.evidence().is_none());
        }
    }

    #[test]
    fn test_classified_not_installer() {
        let verdict = ClassificationVerdict::Classified {
            verdict: Verdict::NotInstaller,
            evidence: Evidence {
                entries_seen: 6,
                truncated: true,
                has_app_bundle: true,
            },
        };
        assert!(!verdict.is_installer());
        assert_eq!(verdict.evidence().map(|e| e.truncated), Some(true));
        assert!(verdict.skip_reason().is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            ClassificationVerdict::Skipped { reason: SkipReason::PermissionDenied }.label(),
            "skipped:permission-denied"
        );
        assert_eq!(
            ClassificationVerdict::Classified {
                verdict: Verdict::Installer,
                evidence: Evidence::default(),
            }
            .label(),
            "installer"
        );
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_string(&ClassificationVerdict::Skipped { reason: SkipReason::Corrupt })
            .expect("serialize");
        assert_eq!(json, r#"{"outcome":"skipped","reason":"corrupt"}"#);
    }
}
