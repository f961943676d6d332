//! Archive listing capabilities.
//!
//! An [`ArchiveLister`] turns an archive path into a lazy [`Listing`] of
//! entry names. The classifier reads only as many names as it needs, so a
//! listing must release its resources (a child process, an open file) when
//! it is dropped early.
//!
//! # Implementations
//!
//! - [`ZipInfoLister`]: `zipinfo -1`, one name per line
//! - [`UnzipLister`]: `unzip -l`, names extracted from the verbose table
//! - [`NativeZipLister`]: the `zip` crate, no subprocess
//!
//! [`select_lister`] picks one at startup from a [`ListerKind`].

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use camino::Utf8Path;
use sweep_core::ListerKind;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::ListError;

/// A lazy sequence of entry names.
///
/// A listing that fails midway yields an `Err` and then ends. Subprocess
/// listings report a failing exit status as a final `Err` after the last name.
pub type Listing = Box<dyn Iterator<Item = Result<String, ListError>>>;

/// Produces the entry names of an archive.
pub trait ArchiveLister: fmt::Debug {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Starts listing `archive`.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] if the listing cannot be started at all.
    fn list(&self, archive: &Utf8Path) -> Result<Listing, ListError>;
}

/// How a listing tool prints entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One name per line, nothing else.
    NamesOnly,
    /// `unzip -l` table: header, dashed rule, rows, dashed rule, totals.
    VerboseTable,
}

/// Lists archives with `zipinfo -1`.
#[derive(Debug, Clone)]
pub struct ZipInfoLister {
    program: PathBuf,
}

impl ZipInfoLister {
    /// Tool name looked up on `PATH`.
    pub const TOOL: &'static str = "zipinfo";

    /// Looks up `zipinfo` on `PATH`.
    #[must_use]
    pub fn probe() -> Option<Self> {
        probe(Self::TOOL).map(Self::with_program)
    }

    /// Uses an explicit program path.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ArchiveLister for ZipInfoLister {
    fn name(&self) -> &'static str {
        Self::TOOL
    }

    fn list(&self, archive: &Utf8Path) -> Result<Listing, ListError> {
        let listing = ToolListing::spawn(
            Self::TOOL,
            &self.program,
            &["-1"],
            archive,
            OutputFormat::NamesOnly,
        )?;
        Ok(Box::new(listing))
    }
}

/// Lists archives with `unzip -l`.
#[derive(Debug, Clone)]
pub struct UnzipLister {
    program: PathBuf,
}

impl UnzipLister {
    /// Tool name looked up on `PATH`.
    pub const TOOL: &'static str = "unzip";

    /// Looks up `unzip` on `PATH`.
    #[must_use]
    pub fn probe() -> Option<Self> {
        probe(Self::TOOL).map(Self::with_program)
    }

    /// Uses an explicit program path.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ArchiveLister for UnzipLister {
    fn name(&self) -> &'static str {
        Self::TOOL
    }

    fn list(&self, archive: &Utf8Path) -> Result<Listing, ListError> {
        let listing = ToolListing::spawn(
            Self::TOOL,
            &self.program,
            &["-l"],
            archive,
            OutputFormat::VerboseTable,
        )?;
        Ok(Box::new(listing))
    }
}

/// Lists archives in-process by reading the ZIP central directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeZipLister;

impl NativeZipLister {
    /// Creates a new native lister.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ArchiveLister for NativeZipLister {
    fn name(&self) -> &'static str {
        "native"
    }

    fn list(&self, archive: &Utf8Path) -> Result<Listing, ListError> {
        let file = File::open(archive).map_err(ListError::Open)?;
        let archive = ZipArchive::new(BufReader::new(file))?;
        Ok(Box::new(NativeListing { archive, next: 0 }))
    }
}

/// Returns the lister for a configured strategy, or `None` if the
/// classifier has to run without one.
///
/// `Auto` prefers `zipinfo`, then `unzip`. The native lister is only used
/// when asked for by name.
#[must_use]
pub fn select_lister(kind: ListerKind) -> Option<Box<dyn ArchiveLister>> {
    let lister: Option<Box<dyn ArchiveLister>> = match kind {
        ListerKind::Auto => ZipInfoLister::probe()
            .map(|l| Box::new(l) as Box<dyn ArchiveLister>)
            .or_else(|| UnzipLister::probe().map(|l| Box::new(l) as Box<dyn ArchiveLister>)),
        ListerKind::ZipInfo => ZipInfoLister::probe().map(|l| Box::new(l) as Box<dyn ArchiveLister>),
        ListerKind::Unzip => UnzipLister::probe().map(|l| Box::new(l) as Box<dyn ArchiveLister>),
        ListerKind::Native => Some(Box::new(NativeZipLister::new())),
        ListerKind::None => None,
    };

    match &lister {
        Some(lister) => debug!(lister = lister.name(), "Selected archive lister"),
        None if kind != ListerKind::None => {
            warn!(kind = ?kind, "No archive lister available, archives will not be classified");
        }
        None => {}
    }

    lister
}

fn probe(tool: &str) -> Option<PathBuf> {
    which::which(tool).ok()
}

/// Entry names read from a listing tool's stdout.
///
/// Dropping the listing before the end kills and reaps the child.
struct ToolListing {
    tool: &'static str,
    child: Child,
    lines: Split<BufReader<ChildStdout>>,
    format: OutputFormat,
    table: TableSection,
    finished: bool,
    reaped: bool,
}

impl ToolListing {
    fn spawn(
        tool: &'static str,
        program: &Path,
        args: &[&str],
        archive: &Utf8Path,
        format: OutputFormat,
    ) -> Result<Self, ListError> {
        let mut child = Command::new(program)
            .args(args)
            .arg(archive.as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ListError::Spawn { tool, source })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ListError::Spawn {
                tool,
                source: std::io::Error::other("stdout was not captured"),
            });
        };

        Ok(Self {
            tool,
            child,
            lines: BufReader::new(stdout).split(b'\n'),
            format,
            table: TableSection::Preamble,
            finished: false,
            reaped: false,
        })
    }

    /// Waits for the tool and turns a failing status into an error.
    fn finish(&mut self) -> Result<(), ListError> {
        let status = self.child.wait()?;
        self.reaped = true;
        if status.success() {
            Ok(())
        } else {
            Err(ListError::ToolFailed {
                tool: self.tool,
                status,
            })
        }
    }

    fn entry_name(&mut self, line: &str) -> Option<String> {
        match self.format {
            OutputFormat::NamesOnly => (!line.is_empty()).then(|| line.to_owned()),
            OutputFormat::VerboseTable => self.table.entry_name(line),
        }
    }
}

impl Iterator for ToolListing {
    type Item = Result<String, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(bytes)) => {
                    let line = String::from_utf8_lossy(&bytes);
                    let line = line.trim_end_matches('\r');
                    if let Some(name) = self.entry_name(line) {
                        return Some(Ok(name));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(ListError::Io(e)));
                }
                None => {
                    self.finished = true;
                    return self.finish().err().map(Err);
                }
            }
        }
    }
}

impl Drop for ToolListing {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

impl fmt::Debug for ToolListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolListing")
            .field("tool", &self.tool)
            .field("format", &self.format)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Position within an `unzip -l` table.
///
/// ```text
/// Archive:  bundle.zip
/// <archive comment, possibly with its own dashed lines>
///   Length      Date    Time    Name
/// ---------  ---------- -----   ----
///         0  2024-05-01 10:00   MyApp.app/
/// ---------                     -------
///         0                     1 file
/// ```
///
/// Rows start only at the rule directly below the column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableSection {
    Preamble,
    Columns,
    Rows,
    Footer,
}

impl TableSection {
    fn entry_name(&mut self, line: &str) -> Option<String> {
        match self {
            Self::Preamble | Self::Columns => {
                *self = if is_column_header(line) {
                    Self::Columns
                } else if *self == Self::Columns && is_rule(line) {
                    Self::Rows
                } else {
                    Self::Preamble
                };
                None
            }
            Self::Rows if is_rule(line) => {
                *self = Self::Footer;
                None
            }
            Self::Rows => table_row_name(line),
            Self::Footer => None,
        }
    }
}

/// The `Length  Date  Time  Name` line heading the table.
fn is_column_header(line: &str) -> bool {
    line.split_whitespace().eq(["Length", "Date", "Time", "Name"])
}

/// A dashed separator line (dashes and spaces only).
fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') && trimmed.chars().all(|c| c == '-' || c == ' ')
}

/// Extracts the name column from a table row: everything after the length,
/// date and time columns, with inner spaces preserved.
fn table_row_name(line: &str) -> Option<String> {
    let mut rest = line.trim_start();
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    (!rest.is_empty()).then(|| rest.to_owned())
}

/// Entry names read from the central directory.
struct NativeListing {
    archive: ZipArchive<BufReader<File>>,
    next: usize,
}

impl Iterator for NativeListing {
    type Item = Result<String, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.archive.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;

        Some(
            self.archive
                .by_index_raw(index)
                .map(|entry| entry.name().to_owned())
                .map_err(ListError::from),
        )
    }
}
