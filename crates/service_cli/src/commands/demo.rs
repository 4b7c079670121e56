//! Demo command for the reference American put and call scenario.
//!
//! `S0 = K = 100`, `r = 3%`, `q = 0`, `sigma = 20%`, `T = 1`, `N = 500`.
//!
//! # Expected Output
//!
//! ```text
//! American Put: <price>
//! <boundary table>
//! American Call (q=0): <price>  |  BS Euro Call: <price>
//! ```
//!
//! Without a dividend yield the American call is never exercised early, so
//! its lattice price sits on the closed-form European call.

use pricer_models::analytical::black_scholes_european;
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_pricing::chart::{BoundaryChart, ChartOptions};
use pricer_pricing::lattice::{crr_price, PriceResult};

use crate::Result;

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const RATE: f64 = 0.03;
const DIVIDEND: f64 = 0.0;
const VOLATILITY: f64 = 0.20;
const MATURITY: f64 = 1.0;
const STEPS: usize = 500;

fn american(payoff: PayoffType) -> Result<PriceResult> {
    Ok(crr_price(
        SPOT,
        STRIKE,
        RATE,
        DIVIDEND,
        VOLATILITY,
        MATURITY,
        STEPS,
        payoff,
        ExerciseStyle::American,
    )?)
}

/// Runs the reference scenario.
pub fn run() -> Result<()> {
    println!("========================================");
    println!("CRR Binomial Pricer Demo");
    println!("========================================");
    println!();

    let put = american(PayoffType::Put)?;
    println!("American Put: {:.6}", put.price());
    match BoundaryChart::from_result(
        &put,
        &ChartOptions::with_title("American Put Early-Exercise Threshold"),
    ) {
        Some(chart) => println!("\n{}", chart.render_table()),
        None => println!("No early exercise boundary."),
    }

    let call = american(PayoffType::Call)?;
    let bs_call = black_scholes_european(
        SPOT,
        STRIKE,
        RATE,
        DIVIDEND,
        VOLATILITY,
        MATURITY,
        PayoffType::Call,
    )?;
    println!(
        "American Call (q=0): {:.6}  |  BS Euro Call: {:.6}",
        call.price(),
        bs_call
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_call_tracks_closed_form() {
        let call = american(PayoffType::Call).unwrap();
        let bs = black_scholes_european(
            SPOT,
            STRIKE,
            RATE,
            DIVIDEND,
            VOLATILITY,
            MATURITY,
            PayoffType::Call,
        )
        .unwrap();
        assert!((call.price() - bs).abs() < 1e-2);
        assert!(call.boundary().is_empty());
    }

    #[test]
    fn test_reference_put_has_boundary() {
        let put = american(PayoffType::Put).unwrap();
        assert!(put.price() > 0.0);
        assert!(!put.boundary().is_empty());
    }
}
