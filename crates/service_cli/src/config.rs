//! CLI configuration management
//!
//! Contract and engine settings are resolved from four sources.
//!
//! Priority (highest to lowest):
//! 1. Command line flags
//! 2. `CRR_*` environment variables
//! 3. TOML configuration file
//! 4. Default values (the reference scenario `S0 = K = 100`, `r = 3%`,
//!    `sigma = 20%`, `T = 1`, `N = 500`, American put)

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_pricing::lattice::{LatticeConfig, LatticeError, ModelParams, DEFAULT_TOL_EXERCISE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "crr.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}: {message}")]
    EnvError { name: String, message: String },
}

/// Log levels accepted by `--log-level` and `CRR_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Output format for `price`, `boundary` and `convergence`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// `[contract]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub dividend: f64,
    pub volatility: f64,
    pub maturity: f64,
    pub steps: usize,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub kind: PayoffType,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub style: ExerciseStyle,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.03,
            dividend: 0.0,
            volatility: 0.20,
            maturity: 1.0,
            steps: 500,
            kind: PayoffType::Put,
            style: ExerciseStyle::American,
        }
    }
}

/// `[lattice]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LatticeSection {
    pub tol_exercise: f64,
    pub parallel_threshold: Option<usize>,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            tol_exercise: DEFAULT_TOL_EXERCISE,
            parallel_threshold: None,
        }
    }
}

/// Fully resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Step counts swept by `convergence` when none are given
    pub convergence_steps: Vec<usize>,
    pub contract: ContractConfig,
    pub lattice: LatticeSection,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            format: OutputFormat::Table,
            convergence_steps: vec![50, 100, 200, 400, 800],
            contract: ContractConfig::default(),
            lattice: LatticeSection::default(),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::EnvError {
        name: name.to_string(),
        message: format!("cannot parse '{}': {}", raw, e),
    })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `CRR_*` variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let c = &mut self.contract;
        macro_rules! env_override {
            ($name:literal => $field:expr) => {
                if let Some(raw) = lookup($name) {
                    $field = parse_env($name, &raw)?;
                }
            };
        }

        env_override!("CRR_SPOT" => c.spot);
        env_override!("CRR_STRIKE" => c.strike);
        env_override!("CRR_RATE" => c.rate);
        env_override!("CRR_DIVIDEND" => c.dividend);
        env_override!("CRR_VOLATILITY" => c.volatility);
        env_override!("CRR_MATURITY" => c.maturity);
        env_override!("CRR_STEPS" => c.steps);
        env_override!("CRR_KIND" => c.kind);
        env_override!("CRR_STYLE" => c.style);
        env_override!("CRR_TOL_EXERCISE" => self.lattice.tol_exercise);
        env_override!("CRR_LOG_LEVEL" => self.log_level);
        env_override!("CRR_FORMAT" => self.format);

        if let Some(raw) = lookup("CRR_PARALLEL_THRESHOLD") {
            self.lattice.parallel_threshold = Some(parse_env("CRR_PARALLEL_THRESHOLD", &raw)?);
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }

        let args = &cli.contract;
        let c = &mut self.contract;
        c.spot = args.spot.unwrap_or(c.spot);
        c.strike = args.strike.unwrap_or(c.strike);
        c.rate = args.rate.unwrap_or(c.rate);
        c.dividend = args.dividend.unwrap_or(c.dividend);
        c.volatility = args.volatility.unwrap_or(c.volatility);
        c.maturity = args.maturity.unwrap_or(c.maturity);
        c.steps = args.steps.unwrap_or(c.steps);
        c.kind = args.kind.unwrap_or(c.kind);
        c.style = args.style.unwrap_or(c.style);

        if let Some(tol) = args.tol_exercise {
            self.lattice.tol_exercise = tol;
        }
        if args.parallel_threshold.is_some() {
            self.lattice.parallel_threshold = args.parallel_threshold;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
    }

    /// Validated model parameters for the configured contract
    pub fn model_params(&self) -> Result<ModelParams, LatticeError> {
        let c = &self.contract;
        ModelParams::new(
            c.spot,
            c.strike,
            c.rate,
            c.dividend,
            c.volatility,
            c.maturity,
            c.steps,
            c.kind,
            c.style,
        )
    }

    /// Validated engine configuration
    pub fn lattice_config(&self) -> Result<LatticeConfig, LatticeError> {
        let mut builder = LatticeConfig::builder().tol_exercise(self.lattice.tol_exercise);
        if let Some(width) = self.lattice.parallel_threshold {
            builder = builder.parallel_threshold(width);
        }
        builder.build()
    }

    /// TOML rendering of the resolved configuration
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::FileError(format!("Failed to render TOML: {}", e)))
    }
}

/// Contract flags shared by the pricing subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ContractArgs {
    /// Initial spot S0
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike K
    #[arg(long)]
    pub strike: Option<f64>,

    /// Continuously compounded risk-free rate r
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Continuous dividend yield q
    #[arg(long, allow_negative_numbers = true)]
    pub dividend: Option<f64>,

    /// Volatility sigma
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Time to maturity T in years
    #[arg(long)]
    pub maturity: Option<f64>,

    /// Number of time steps N
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Option kind (call, put)
    #[arg(long)]
    pub kind: Option<PayoffType>,

    /// Exercise style (european, american)
    #[arg(long)]
    pub style: Option<ExerciseStyle>,

    /// Exercise tie-break tolerance
    #[arg(long)]
    pub tol_exercise: Option<f64>,

    /// Evaluate lattice rows at least this wide in parallel
    #[arg(long)]
    pub parallel_threshold: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Contract overrides
    pub contract: ContractArgs,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `crr.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);

    Ok(config)
}
