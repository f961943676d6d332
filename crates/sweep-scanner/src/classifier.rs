//! Installer classification for archive candidates.
//!
//! [`InstallerClassifier`] decides whether a ZIP looks like an application
//! installer: a small archive (at most [`MAX_INSTALLER_ENTRIES`] entries)
//! with an application bundle somewhere inside. Larger archives are treated
//! as data whatever they contain.
//!
//! Classification never fails. Anything that prevents reading the listing
//! (no lister, permission denied, corrupt archive) yields
//! [`ClassificationVerdict::Skipped`], which counts as "not an installer".

use std::fs::File;

use camino::Utf8Path;
use sweep_core::{ClassificationVerdict, Evidence, ListerKind, Verdict};
use tracing::debug;

use crate::error::ListError;
use crate::lister::{ArchiveLister, select_lister};

/// Archives with more entries than this are never installers.
pub const MAX_INSTALLER_ENTRIES: usize = 5;

/// Returns `true` if any path component of an archive entry ends in `.app`.
///
/// # Examples
///
/// ```
/// use sweep_scanner::is_app_bundle_entry;
///
/// assert!(is_app_bundle_entry("MyApp.app/"));
/// assert!(is_app_bundle_entry("dist/Tool.APP/Contents/Info.plist"));
/// assert!(!is_app_bundle_entry("notes/application.txt"));
/// ```
#[must_use]
pub fn is_app_bundle_entry(name: &str) -> bool {
    const SUFFIX: &[u8] = b".app";

    name.split('/').any(|component| {
        let bytes = component.as_bytes();
        bytes.len() > SUFFIX.len() && bytes[bytes.len() - SUFFIX.len()..].eq_ignore_ascii_case(SUFFIX)
    })
}

/// Classifies archive candidates through an [`ArchiveLister`].
///
/// # Examples
///
/// ```
/// use sweep_scanner::InstallerClassifier;
/// use camino::Utf8Path;
///
/// let classifier = InstallerClassifier::without_lister();
/// let verdict = classifier.is_installer_archive(Utf8Path::new("/tmp/Setup.zip"));
/// assert!(!verdict.is_installer());
/// ```
#[derive(Debug)]
pub struct InstallerClassifier {
    lister: Option<Box<dyn ArchiveLister>>,
}

impl InstallerClassifier {
    /// Creates a classifier over an optional lister.
    #[must_use]
    pub fn new(lister: Option<Box<dyn ArchiveLister>>) -> Self {
        Self { lister }
    }

    /// Creates a classifier using the lister selected for `kind`.
    #[must_use]
    pub fn from_kind(kind: ListerKind) -> Self {
        Self::new(select_lister(kind))
    }

    /// Creates a classifier backed by `lister`.
    #[must_use]
    pub fn with_lister(lister: impl ArchiveLister + 'static) -> Self {
        Self::new(Some(Box::new(lister)))
    }

    /// Creates a classifier that skips every archive.
    #[must_use]
    pub fn without_lister() -> Self {
        Self::new(None)
    }

    /// Returns the active lister's name, if any.
    #[must_use]
    pub fn lister_name(&self) -> Option<&'static str> {
        self.lister.as_deref().map(|lister| lister.name())
    }

    /// Classifies one archive.
    ///
    /// Reads at most `MAX_INSTALLER_ENTRIES + 1` names; the listing is
    /// dropped (and any listing process reaped) before returning.
    pub fn is_installer_archive(&self, archive: &Utf8Path) -> ClassificationVerdict {
        match self.inspect(archive) {
            Ok(evidence) => ClassificationVerdict::Classified {
                verdict: decide(&evidence),
                evidence,
            },
            Err(e) => {
                let reason = e.skip_reason();
                debug!(path = %archive, reason = %reason, error = %e, "Skipping archive");
                ClassificationVerdict::Skipped { reason }
            }
        }
    }

    fn inspect(&self, archive: &Utf8Path) -> Result<Evidence, ListError> {
        let lister = self.lister.as_deref().ok_or(ListError::Unavailable)?;

        // Surface permission problems before any tool gets a chance to mask them
        File::open(archive).map_err(ListError::Open)?;

        let mut evidence = Evidence::default();
        for entry in lister.list(archive)? {
            let name = entry?;
            evidence.entries_seen += 1;
            evidence.has_app_bundle |= is_app_bundle_entry(&name);

            if evidence.entries_seen > MAX_INSTALLER_ENTRIES {
                evidence.truncated = true;
                break;
            }
        }

        Ok(evidence)
    }
}

fn decide(evidence: &Evidence) -> Verdict {
    if !evidence.truncated && evidence.has_app_bundle {
        Verdict::Installer
    } else {
        Verdict::NotInstaller
    }
}
