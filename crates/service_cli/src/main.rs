//! crr - Command Line Front-End for the CRR Binomial Pricer
//!
//! # Commands
//!
//! - `crr price` - Price a European or American option on the lattice
//! - `crr boundary` - Print the early-exercise boundary chart
//! - `crr convergence` - Sweep the number of time steps
//! - `crr demo` - Reference American put/call scenario
//! - `crr check` - Validate and print the resolved configuration
//!
//! Contract flags override `CRR_*` environment variables, which override the
//! TOML configuration file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{build_config, CliArgs, ContractArgs, LogLevel};
pub use error::{CliError, Result};

/// CRR binomial option pricer
#[derive(Parser)]
#[command(name = "crr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "CRR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option and compare it with its European counterpart
    Price {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Print the early-exercise boundary S*(t)
    Boundary {
        #[command(flatten)]
        contract: ContractArgs,

        /// Plot against calendar time instead of time to maturity
        #[arg(long)]
        forward_time: bool,

        /// Chart title
        #[arg(long)]
        title: Option<String>,
    },

    /// Price the same contract across several step counts
    Convergence {
        #[command(flatten)]
        contract: ContractArgs,

        /// Comma-separated step counts (e.g. 50,100,200)
        #[arg(long = "sweep", value_delimiter = ',')]
        sweep: Vec<usize>,
    },

    /// Run the reference American put and call scenario
    Demo,

    /// Check configuration and print the resolved values
    Check {
        #[command(flatten)]
        contract: ContractArgs,
    },
}

impl Commands {
    fn contract_args(&self) -> ContractArgs {
        match self {
            Commands::Price { contract }
            | Commands::Boundary { contract, .. }
            | Commands::Convergence { contract, .. }
            | Commands::Check { contract } => contract.clone(),
            Commands::Demo => ContractArgs::default(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level,
        contract: cli.command.contract_args(),
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level.as_filter_str());
    debug!(
        config_file = ?args.config_file,
        log_level = %config.log_level,
        "configuration resolved"
    );

    match cli.command {
        Commands::Price { .. } => commands::price::run(&config),
        Commands::Boundary {
            forward_time,
            title,
            ..
        } => commands::boundary::run(&config, !forward_time, title),
        Commands::Convergence { sweep, .. } => commands::convergence::run(&config, &sweep),
        Commands::Demo => commands::demo::run(),
        Commands::Check { .. } => commands::check::run(&config),
    }
}
