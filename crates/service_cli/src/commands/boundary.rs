//! Boundary command implementation
//!
//! Prints the early-exercise boundary chart of the configured contract.

use pricer_pricing::chart::{BoundaryChart, ChartOptions};
use pricer_pricing::lattice::price;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Run the boundary command
pub fn run(config: &CliConfig, reverse_time: bool, title: Option<String>) -> Result<()> {
    let params = config.model_params()?;
    let result = price(&params, &config.lattice_config()?)?;

    let options = ChartOptions {
        title,
        reverse_time,
    };
    let Some(chart) = BoundaryChart::from_result(&result, &options) else {
        println!("No early exercise boundary.");
        return Ok(());
    };

    match config.format {
        OutputFormat::Table => print!("{}", chart.render_table()),
        OutputFormat::Json => println!("{}", chart.to_json()?),
    }
    Ok(())
}
