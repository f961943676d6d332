//! Domain types for macsweep.
//!
//! # Module Organization
//!
//! - [`candidate`] - Extension classes and scan candidates
//! - [`root`] - Scan roots and the standard root set
//! - [`verdict`] - Archive classification outcomes
//!
//! All public types are re-exported at the crate root:
//!
//! ```
//! use sweep_core::{Candidate, ExtensionClass, ScanRoot, Verdict};
//! ```

mod candidate;
mod root;
mod verdict;

pub use candidate::{ARCHIVE_EXTENSIONS, Candidate, DIRECT_INSTALLER_EXTENSIONS, ExtensionClass};
pub use root::{DEFAULT_MAX_DEPTH, STANDARD_ROOT_DIRS, ScanRoot, standard_roots};
pub use verdict::{ClassificationVerdict, Evidence, SkipReason, Verdict};
