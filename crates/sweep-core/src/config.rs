//! Configuration structures for macsweep.
//!
//! This module provides configuration types for the two halves of a scan:
//!
//! - [`ScanConfig`] - Which roots to walk, how deep, and with which walker
//! - [`ClassifyConfig`] - Which archive lister backs the classifier
//! - [`Config`] - Root configuration combining both
//!
//! All configuration types implement [`Default`]. The configuration is built
//! once (from a JSON file and/or command-line flags) and handed to the
//! scanner at construction; nothing below this layer reads the environment.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DEFAULT_MAX_DEPTH, ScanRoot, standard_roots};

/// Directory walker strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkerKind {
    /// Use the fast walker.
    #[default]
    Auto,
    /// Walk with the `ignore` crate.
    Fast,
    /// Walk with the `walkdir` crate.
    Portable,
}

/// Archive listing strategy for the installer classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListerKind {
    /// Probe `PATH` for `zipinfo`, then `unzip`; classify nothing if neither exists.
    #[default]
    Auto,
    /// `zipinfo -1` (names only).
    ZipInfo,
    /// `unzip -l` (verbose table, names extracted).
    Unzip,
    /// Read the central directory in-process.
    Native,
    /// No lister; every archive is skipped.
    None,
}

/// Configuration for the path scanner.
///
/// # Examples
///
/// ```
/// use sweep_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.max_depth, 2);
/// assert!(config.roots.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Deepest level included below every root (1 = direct children).
    pub max_depth: usize,

    /// Explicit roots. When empty, the standard roots under
    /// [`home`](Self::home) are used.
    pub roots: Vec<Utf8PathBuf>,

    /// Home directory for the standard roots. `None` means the current user's.
    pub home: Option<Utf8PathBuf>,

    /// Directory walker strategy.
    pub walker: WalkerKind,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            roots: Vec::new(),
            home: None,
            walker: WalkerKind::Auto,
        }
    }
}

impl ScanConfig {
    /// Resolves the roots to scan, in order.
    ///
    /// Explicit roots win; otherwise the standard roots under the configured
    /// or detected home directory are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHome`] if no home directory can be found
    /// and [`ConfigError::InvalidPath`] if it is not valid UTF-8.
    pub fn scan_roots(&self) -> Result<Vec<ScanRoot>, ConfigError> {
        if !self.roots.is_empty() {
            return Ok(self
                .roots
                .iter()
                .map(|path| ScanRoot::new(path.clone()).with_max_depth(self.max_depth))
                .collect());
        }

        let home = self.resolve_home()?;
        Ok(standard_roots(&home, self.max_depth))
    }

    fn resolve_home(&self) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }

        let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
        Utf8PathBuf::from_path_buf(home).map_err(|path| ConfigError::InvalidPath {
            path: Utf8PathBuf::from(path.to_string_lossy().into_owned()),
            reason: "home directory is not valid UTF-8".to_owned(),
        })
    }
}

/// Configuration for the installer classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Archive listing strategy.
    pub lister: ListerKind,
}

/// Root configuration for macsweep.
///
/// # Examples
///
/// ```
/// use sweep_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("max_depth"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner configuration.
    pub scan: ScanConfig,

    /// Classifier configuration.
    pub classify: ClassifyConfig,
}

impl Config {
    /// Loads a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid JSON for this schema.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Checks option values that the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `max_depth` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.max_depth == 0 {
            return Err(ConfigError::invalid_option(
                "max_depth",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
