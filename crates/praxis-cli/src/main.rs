//! # praxis CLI entry point
//!
//! Parses command-line arguments, resolves configuration, loads the
//! snapshot, and dispatches to subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use praxis_cli::attention::{run_expiring, run_untrained, UntrainedArgs};
use praxis_cli::config::{CliConfig, FlagOverrides, OutputFormat};
use praxis_cli::listing::{run_devices, run_members, ListArgs};
use praxis_cli::matrix::run_matrix;
use praxis_cli::pair::{run_pair, PairArgs};
use praxis_cli::stats::run_stats;
use praxis_cli::Evaluation;
use praxis_core::ReferenceDate;

/// Device-training compliance reports for a medical practice.
///
/// Evaluates which active team members hold a current briefing on which
/// active devices, as of a reference date.
#[derive(Parser, Debug)]
#[command(name = "praxis", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file (.json, .yaml, .yml).
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    as_of: Option<ReferenceDate>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Practice-wide training statistics.
    Stats,

    /// Member × device status grid.
    Matrix,

    /// Team members with their training summaries.
    Members(ListArgs),

    /// Devices with their training summaries.
    Devices(ListArgs),

    /// Status and record history of one member/device pair.
    Pair(PairArgs),

    /// Active members without a valid briefing on a device.
    Untrained(UntrainedArgs),

    /// Trainings that lapse within the next 30 days.
    Expiring,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                // --help and --version
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);
    tracing::debug!("praxis CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = CliConfig::resolve(
        cli.config.as_deref(),
        FlagOverrides {
            snapshot: cli.snapshot,
            format: cli.format,
        },
    )?;
    let as_of = cli.as_of.unwrap_or_else(ReferenceDate::today);
    let eval = Evaluation::from_config(&config, as_of)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match &cli.command {
        Commands::Stats => run_stats(&eval, &mut out),
        Commands::Matrix => run_matrix(&eval, &mut out),
        Commands::Members(args) => run_members(&eval, args, &mut out),
        Commands::Devices(args) => run_devices(&eval, args, &mut out),
        Commands::Pair(args) => run_pair(&eval, args, &mut out),
        Commands::Untrained(args) => run_untrained(&eval, args, &mut out),
        Commands::Expiring => run_expiring(&eval, &mut out),
    }?;
    out.flush()?;
    Ok(code)
}

/// Install the global subscriber on stderr.
///
/// `-v` selects the level; `RUST_LOG` overrides it when set. Setting
/// `PRAXIS_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let json = std::env::var("PRAXIS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
