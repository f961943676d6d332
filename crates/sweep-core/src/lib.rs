//! Core types, errors, and configuration for macsweep.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Domain types ([`ScanRoot`], [`Candidate`], [`ClassificationVerdict`])
//! - Configuration structures ([`Config`], [`ScanConfig`], [`ClassifyConfig`])
//! - The [`ConfigError`] type

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClassifyConfig, Config, ListerKind, ScanConfig, WalkerKind};
pub use error::ConfigError;
pub use types::*;
