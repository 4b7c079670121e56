//! Check command implementation
//!
//! Validates the resolved configuration against the lattice preconditions,
//! including the step-dependent risk-neutral probability, and prints it.

use pricer_pricing::lattice::StepFactors;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    let params = config.model_params()?;
    config.lattice_config()?;
    let factors = StepFactors::from_params(&params)?;

    println!("Configuration OK");
    println!();
    println!("{}", config.to_toml()?);
    println!("[step factors]");
    println!("dt          = {:.6e}", factors.dt);
    println!("up          = {:.10}", factors.up);
    println!("down        = {:.10}", factors.down);
    println!("discount    = {:.10}", factors.discount);
    println!("probability = {:.10}", factors.probability);
    Ok(())
}
