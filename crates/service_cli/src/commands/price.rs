//! Price command implementation
//!
//! Prices the configured contract on the lattice and sets it against the
//! European lattice value and the Black-Scholes-Merton closed form.

use pricer_models::analytical::black_scholes_european;
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_pricing::lattice::{price, PriceResult};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Figures reported by `crr price`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSummary {
    pub kind: PayoffType,
    pub style: ExerciseStyle,
    pub steps: usize,
    pub price: f64,
    pub european_lattice: f64,
    pub black_scholes: f64,
    pub early_exercise_premium: f64,
    pub boundary_steps: usize,
    pub exercised_nodes: usize,
}

impl PriceSummary {
    /// Collects the summary from a lattice result and its European twin.
    pub fn new(result: &PriceResult, european_lattice: f64) -> Result<Self> {
        let p = result.params();
        let black_scholes = black_scholes_european(
            p.spot(),
            p.strike(),
            p.rate(),
            p.dividend(),
            p.volatility(),
            p.maturity(),
            p.payoff(),
        )?;

        Ok(Self {
            kind: p.payoff(),
            style: p.exercise(),
            steps: p.steps(),
            price: result.price(),
            european_lattice,
            black_scholes,
            early_exercise_premium: result.price() - european_lattice,
            boundary_steps: result.boundary().len(),
            exercised_nodes: result.exercised_nodes(),
        })
    }

    /// Boxed table for terminals.
    pub fn render_table(&self) -> String {
        let rows = [
            ("Contract", format!("{} {}", self.style, self.kind)),
            ("Steps", self.steps.to_string()),
            ("Lattice price", format!("{:.6}", self.price)),
            ("European (lattice)", format!("{:.6}", self.european_lattice)),
            ("European (closed form)", format!("{:.6}", self.black_scholes)),
            ("Early-exercise premium", format!("{:.6}", self.early_exercise_premium)),
            ("Boundary steps", self.boundary_steps.to_string()),
            ("Exercised nodes", self.exercised_nodes.to_string()),
        ];

        let mut out = String::new();
        out.push_str("┌────────────────────────┬──────────────────┐\n");
        for (label, value) in rows {
            out.push_str(&format!("│ {:<22} │ {:>16} │\n", label, value));
        }
        out.push_str("└────────────────────────┴──────────────────┘");
        out
    }
}

/// Run the price command
pub fn run(config: &CliConfig) -> Result<()> {
    let params = config.model_params()?;
    let lattice_config = config.lattice_config()?;

    info!(
        kind = %params.payoff(),
        style = %params.exercise(),
        steps = params.steps(),
        "Starting pricing"
    );

    let result = price(&params, &lattice_config)?;
    let european_lattice = match params.exercise() {
        ExerciseStyle::European => result.price(),
        ExerciseStyle::American => {
            price(&params.with_exercise(ExerciseStyle::European), &lattice_config)?.price()
        }
    };
    let summary = PriceSummary::new(&result, european_lattice)?;

    match config.format {
        OutputFormat::Table => println!("{}", summary.render_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    info!("Pricing complete");
    Ok(())
}
