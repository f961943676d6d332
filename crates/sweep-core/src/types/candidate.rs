//! Scan candidates and their extension classes.
//!
//! This module provides [`ExtensionClass`], which maps a file extension onto
//! the allow-list of installer and archive formats, and [`Candidate`], a
//! regular file discovered under a scan root.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Extensions reported as installers without looking inside the file.
pub const DIRECT_INSTALLER_EXTENSIONS: &[&str] = &["dmg", "pkg", "mpkg", "iso"];

/// Extensions whose contents must be classified before reporting.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// How a candidate file is treated, based on its extension.
///
/// # Examples
///
/// ```
/// use sweep_core::ExtensionClass;
/// use camino::Utf8Path;
///
/// assert_eq!(
///     ExtensionClass::from_path(Utf8Path::new("Setup.DMG")),
///     Some(ExtensionClass::DirectInstaller)
/// );
/// assert_eq!(
///     ExtensionClass::from_path(Utf8Path::new("bundle.zip")),
///     Some(ExtensionClass::Archive)
/// );
/// assert_eq!(ExtensionClass::from_path(Utf8Path::new("notes.pdf")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionClass {
    /// Disk images and packages (`dmg`, `pkg`, `mpkg`, `iso`).
    DirectInstaller,

    /// ZIP archives, which may or may not wrap an application bundle.
    Archive,
}

impl ExtensionClass {
    /// Classifies a bare extension, ignoring ASCII case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let matches = |list: &[&str]| list.iter().any(|known| ext.eq_ignore_ascii_case(known));

        if matches(DIRECT_INSTALLER_EXTENSIONS) {
            Some(Self::DirectInstaller)
        } else if matches(ARCHIVE_EXTENSIONS) {
            Some(Self::Archive)
        } else {
            None
        }
    }

    /// Classifies a path by its final extension.
    ///
    /// Only the last extension counts: `app.dmg.txt` is not an installer.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        path.extension().and_then(Self::from_extension)
    }

    /// Returns `true` for extensions that need content inspection.
    #[inline]
    #[must_use]
    pub const fn needs_inspection(self) -> bool {
        matches!(self, Self::Archive)
    }

    /// Returns a short label for display.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectInstaller => "direct-installer",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for ExtensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A regular file found under a scan root whose extension is allow-listed.
///
/// Candidates are never symbolic links; the walkers filter those out before
/// a `Candidate` is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Path of the file (the scan root joined with the relative path).
    pub path: Utf8PathBuf,

    /// How the file is treated.
    pub class: ExtensionClass,

    /// Depth below the scan root (1 = direct child).
    pub depth: usize,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, class: ExtensionClass, depth: usize) -> Self {
        Self {
            path: path.into(),
            class,
            depth,
        }
    }

    /// Returns the file name component of the candidate's path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_installer_extensions() {
        for ext in ["dmg", "pkg", "mpkg", "iso"] {
            assert_eq!(
                ExtensionClass::from_extension(ext),
                Some(ExtensionClass::DirectInstaller),
                "{ext}"
            );
        }
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(
            ExtensionClass::from_path(Utf8Path::new("App.DMG")),
            Some(ExtensionClass::DirectInstaller)
        );
        assert_eq!(
            ExtensionClass::from_path(Utf8Path::new("Tool.Pkg")),
            Some(ExtensionClass::DirectInstaller)
        );
        assert_eq!(
            ExtensionClass::from_path(Utf8Path::new("Archive.ZIP")),
            Some(ExtensionClass::Archive)
        );
    }

    #[test]
    fn test_unlisted_extensions() {
        assert_eq!(ExtensionClass::from_path(Utf8Path::new("document.pdf")), None);
        assert_eq!(ExtensionClass::from_path(Utf8Path::new("app.dmg.txt")), None);
        assert_eq!(ExtensionClass::from_path(Utf8Path::new("dmg")), None);
        assert_eq!(ExtensionClass::from_path(Utf8Path::new("archive.tar.gz")), None);
    }

    #[test]
    fn test_needs_inspection() {
        assert!(ExtensionClass::Archive.needs_inspection());
        assert!(!ExtensionClass::DirectInstaller.needs_inspection());
    }

    #[test]
    fn test_candidate_accessors() {
        let candidate = Candidate::new("/tmp/dl/App.dmg", ExtensionClass::DirectInstaller, 1);
        assert_eq!(candidate.file_name(), Some("App.dmg"));
        assert!(!candidate.class.needs_inspection());
        assert_eq!(candidate.class.to_string(), "direct-installer");
    }
}
