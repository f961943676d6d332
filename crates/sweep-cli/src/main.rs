//! CLI entry point for macsweep.
//!
//! This binary finds installer artifacts (disk images, packages, and ZIP
//! archives that wrap an application bundle) left behind in a user's
//! download locations.
//!
//! # Usage
//!
//! ```bash
//! macsweep [OPTIONS] <COMMAND>
//!
//! # List installers under the standard roots
//! macsweep installers
//!
//! # Full JSON report, scanning one extra level deep
//! macsweep --max-depth 3 installers --format json
//!
//! # Classify specific archives
//! macsweep --lister native classify ~/Downloads/Tool.zip
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sweep_core::{Config, ListerKind, ScanRoot, WalkerKind};
use sweep_scanner::{Finding, InstallerClassifier, Scanner, StatsSnapshot};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Find leftover installer files in a macOS home directory.
///
/// Scans Downloads, Desktop, Documents, Public and Library/Downloads for disk
/// images, packages, and ZIP archives that only wrap an application.
#[derive(Parser)]
#[command(name = "macsweep", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Deepest directory level to scan below each root (1 = direct children).
    #[arg(long, global = true, env = "MACSWEEP_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Scan this directory instead of the standard roots (repeatable).
    #[arg(long = "root", global = true, value_name = "DIR")]
    roots: Vec<Utf8PathBuf>,

    /// Home directory holding the standard roots.
    ///
    /// Defaults to the current user's home directory.
    #[arg(long, global = true, env = "MACSWEEP_HOME", value_name = "DIR")]
    home: Option<Utf8PathBuf>,

    /// Directory walker.
    #[arg(long, global = true, value_enum)]
    walker: Option<WalkerArg>,

    /// Archive lister used to inspect ZIP files.
    #[arg(long, global = true, value_enum)]
    lister: Option<ListerArg>,

    /// JSON configuration file. Command-line options override its values.
    #[arg(long, global = true, env = "MACSWEEP_CONFIG", value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List installer artifacts, one path per line.
    Installers {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,

        /// Report archives that were left out, and why, on stderr.
        #[arg(long)]
        explain: bool,
    },

    /// Show the roots that would be scanned and whether each exists.
    Roots,

    /// Classify the given archives.
    Classify {
        /// Archives to inspect.
        #[arg(required = true, value_name = "ARCHIVE")]
        archives: Vec<Utf8PathBuf>,
    },
}

/// Output format for `installers`.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One path per line.
    Plain,
    /// Pretty JSON report with every finding and statistics.
    Json,
}

/// Walker choice on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum WalkerArg {
    /// Pick automatically.
    Auto,
    /// `ignore`-based walker.
    Fast,
    /// `walkdir`-based walker.
    Portable,
}

impl From<WalkerArg> for WalkerKind {
    fn from(arg: WalkerArg) -> Self {
        match arg {
            WalkerArg::Auto => Self::Auto,
            WalkerArg::Fast => Self::Fast,
            WalkerArg::Portable => Self::Portable,
        }
    }
}

/// Lister choice on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ListerArg {
    /// `zipinfo`, then `unzip`, whichever is on `PATH`.
    Auto,
    /// `zipinfo -1`.
    Zipinfo,
    /// `unzip -l`.
    Unzip,
    /// Built-in ZIP reader.
    Native,
    /// Skip every archive.
    None,
}

impl From<ListerArg> for ListerKind {
    fn from(arg: ListerArg) -> Self {
        match arg {
            ListerArg::Auto => Self::Auto,
            ListerArg::Zipinfo => Self::ZipInfo,
            ListerArg::Unzip => Self::Unzip,
            ListerArg::Native => Self::Native,
            ListerArg::None => Self::None,
        }
    }
}

/// JSON report for `installers --format json`.
#[derive(Serialize)]
struct Report<'a> {
    installers: Vec<&'a Finding>,
    findings: &'a [Finding],
    stats: StatsSnapshot,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only results. Respects `RUST_LOG` if
/// set; otherwise uses `debug` with `--verbose` and `warn` by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the config file (if any) and CLI arguments.
///
/// Command-line values and environment variables take precedence over the
/// file, which takes precedence over defaults.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the result is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config {path}: {e}"))?,
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.scan.max_depth = max_depth;
    }
    if !cli.roots.is_empty() {
        config.scan.roots.clone_from(&cli.roots);
    }
    if let Some(home) = &cli.home {
        config.scan.home = Some(home.clone());
    }
    if let Some(walker) = cli.walker {
        config.scan.walker = walker.into();
    }
    if let Some(lister) = cli.lister {
        config.classify.lister = lister.into();
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// COMMAND HANDLERS
// =============================================================================

/// Runs the `installers` command.
fn run_installers(config: &Config, format: OutputFormat, explain: bool) -> color_eyre::Result<()> {
    let scanner = Scanner::new(config)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let written = match format {
        OutputFormat::Plain => write_plain(
            &mut stdout.lock(),
            &mut stderr.lock(),
            scanner.inspect_all(),
            explain,
        ),
        OutputFormat::Json => {
            let findings: Vec<Finding> = scanner.inspect_all().collect();
            write_json(
                &mut stdout.lock(),
                &mut stderr.lock(),
                &findings,
                scanner.stats(),
                explain,
            )
        }
    };
    finish_output(written)?;

    let stats = scanner.stats();
    info!(
        roots_scanned = stats.roots_scanned,
        roots_missing = stats.roots_missing,
        candidates = stats.candidates,
        accepted = stats.accepted(),
        skipped = stats.skipped,
        "Scan complete"
    );

    Ok(())
}

/// Writes accepted paths as they are found.
fn write_plain(
    out: &mut impl Write,
    err: &mut impl Write,
    findings: impl Iterator<Item = Finding>,
    explain: bool,
) -> io::Result<()> {
    for finding in findings {
        if finding.is_accepted() {
            writeln!(out, "{}", finding.candidate.path)?;
        } else if explain {
            explain_finding(err, &finding)?;
        }
    }
    out.flush()
}

/// Writes the pretty JSON report.
fn write_json(
    out: &mut impl Write,
    err: &mut impl Write,
    findings: &[Finding],
    stats: StatsSnapshot,
    explain: bool,
) -> io::Result<()> {
    if explain {
        for finding in findings.iter().filter(|f| !f.is_accepted()) {
            explain_finding(err, finding)?;
        }
    }

    let report = Report {
        installers: findings.iter().filter(|f| f.is_accepted()).collect(),
        findings,
        stats,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    out.flush()
}

/// Writes a left-out archive and its label.
fn explain_finding(err: &mut impl Write, finding: &Finding) -> io::Result<()> {
    let label = finding
        .classification
        .map_or_else(|| "direct-installer".to_owned(), |c| c.label());
    writeln!(err, "{}\t{label}", finding.candidate.path)
}

/// Treats a closed pipe (`macsweep installers | head`) as a clean stop.
fn finish_output(written: io::Result<()>) -> color_eyre::Result<()> {
    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

/// Runs the `roots` command.
fn run_roots(config: &Config) -> color_eyre::Result<()> {
    let roots = config.scan.scan_roots()?;
    finish_output(write_roots(&mut io::stdout().lock(), &roots))
}

/// Writes each root tagged `present` or `missing`.
fn write_roots(out: &mut impl Write, roots: &[ScanRoot]) -> io::Result<()> {
    for root in roots {
        let state = if root.exists() { "present" } else { "missing" };
        writeln!(out, "{}\t{state}", root.path)?;
    }
    out.flush()
}

/// Runs the `classify` command.
fn run_classify(config: &Config, archives: &[Utf8PathBuf]) -> color_eyre::Result<()> {
    let classifier = InstallerClassifier::from_kind(config.classify.lister);
    finish_output(write_verdicts(&mut io::stdout().lock(), &classifier, archives))
}

/// Classifies each archive and writes its label.
fn write_verdicts(
    out: &mut impl Write,
    classifier: &InstallerClassifier,
    archives: &[Utf8PathBuf],
) -> io::Result<()> {
    for archive in archives {
        let verdict = classifier.is_installer_archive(archive);
        writeln!(out, "{archive}\t{}", verdict.label())?;
    }
    out.flush()
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Layer config file and flags
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Installers { format, explain } => run_installers(&config, *format, *explain),
        Commands::Roots => run_roots(&config),
        Commands::Classify { archives } => run_classify(&config, archives),
    }
}
