//! Convergence command implementation
//!
//! Prices the configured contract across a list of step counts.

use pricer_pricing::lattice::{convergence, ConvergencePoint};
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Run the convergence command
///
/// An empty `sweep` falls back to `convergence_steps` from the configuration.
pub fn run(config: &CliConfig, sweep: &[usize]) -> Result<()> {
    let steps = if sweep.is_empty() {
        config.convergence_steps.as_slice()
    } else {
        sweep
    };
    if steps.is_empty() {
        return Err(CliError::InvalidArgument(
            "no step counts to sweep".to_string(),
        ));
    }

    let params = config.model_params()?;
    info!(points = steps.len(), "Starting convergence sweep");
    let points = convergence(&params, steps, &config.lattice_config()?)?;

    match config.format {
        OutputFormat::Table => print!("{}", render_table(&points)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&points)?),
    }
    Ok(())
}

/// Step count, price and change against the previous row.
pub fn render_table(points: &[ConvergencePoint]) -> String {
    let mut out = format!("{:>8}  {:>14}  {:>12}\n", "N", "price", "change");
    let mut previous: Option<f64> = None;
    for p in points {
        let change = previous
            .map(|prev| format!("{:+.6}", p.price - prev))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{:>8}  {:>14.6}  {:>12}\n", p.steps, p.price, change));
        previous = Some(p.price);
    }
    out
}
