//! Golf-swing physics validation runner.
//!
//! Loads simulation traces from one or more engines, checks each for
//! conservation, joint limits and numerical stability, compares the engines
//! with each other, and writes a JSON and a markdown report.
//!
//! # Commands
//!
//! - `swing-validate validate <TRACES.json>` - Validate traces exported by engines
//! - `swing-validate demo` - Validate synthetic swings with a perturbed engine
//! - `swing-validate engines` - List supported engines by category
//!
//! Set `RUST_LOG` (or pass `--verbose`) to see per-validator log lines.

mod engines;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use swing_validate::ValidationParams;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Cross-engine physics validation for golf-swing simulations
#[derive(Parser)]
#[command(name = "swing-validate")]
#[command(about = "Cross-engine physics validation for golf-swing simulations", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON array of simulation traces
    Validate {
        /// Trace file written by the engines
        #[arg(name = "TRACES")]
        traces: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        tolerances: ToleranceArgs,
    },

    /// Validate synthetic MuJoCo, Drake and Pinocchio swings
    Demo {
        /// Amplitude of the uniform noise added to Drake's shoulder joint
        #[arg(long, default_value_t = 0.001)]
        noise: f64,

        /// Seed for the noise generator
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Samples per swing
        #[arg(long, default_value_t = 200)]
        samples: usize,

        /// Swing duration in seconds
        #[arg(long, default_value_t = 2.0)]
        duration: f64,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        tolerances: ToleranceArgs,
    },

    /// List supported engines grouped by category
    Engines,
}

#[derive(Args)]
struct OutputArgs {
    /// Directory for physics_validation_results.json and physics_validation_report.md
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    fail_on_issues: bool,
}

#[derive(Args)]
struct ToleranceArgs {
    /// Start from tight tolerances
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Start from loose tolerances
    #[arg(long)]
    lenient: bool,

    /// Relative drift tolerance for energy and momentum
    #[arg(long)]
    relative_tolerance: Option<f64>,

    /// Joint limit overshoot tolerance
    #[arg(long)]
    absolute_tolerance: Option<f64>,

    /// Minimum pairwise agreement score
    #[arg(long)]
    agreement_threshold: Option<f64>,
}

impl ToleranceArgs {
    fn params(&self) -> ValidationParams {
        let mut params = if self.strict {
            ValidationParams::strict()
        } else if self.lenient {
            ValidationParams::lenient()
        } else {
            ValidationParams::default()
        };
        if let Some(tolerance) = self.relative_tolerance {
            params = params.relative_tolerance(tolerance);
        }
        if let Some(tolerance) = self.absolute_tolerance {
            params = params.absolute_tolerance(tolerance);
        }
        if let Some(threshold) = self.agreement_threshold {
            params = params.agreement_threshold(threshold);
        }
        params
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (passed, output) = match cli.command {
        Commands::Validate {
            traces,
            output,
            tolerances,
        } => {
            let loaded = run::load_traces(&traces)?;
            (run::validate(&loaded, &tolerances.params(), &output)?, output)
        }
        Commands::Demo {
            noise,
            seed,
            samples,
            duration,
            output,
            tolerances,
        } => {
            let traces = run::demo_traces(noise, seed, samples, duration)?;
            (run::validate(&traces, &tolerances.params(), &output)?, output)
        }
        Commands::Engines => {
            engines::list();
            return Ok(ExitCode::SUCCESS);
        }
    };

    if output.fail_on_issues && !passed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
