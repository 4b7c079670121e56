//! Entry points: single pricing run, positional convenience wrapper and
//! step-count convergence sweep.

use std::time::Instant;

use tracing::{debug, instrument};

use pricer_models::instruments::{ExerciseStyle, PayoffType};

use super::boundary::{BoundaryExtractor, ExerciseBoundary};
use super::builder::LatticeBuilder;
use super::error::LatticeError;
use super::induction::BackwardInductionEngine;
use super::params::{LatticeConfig, ModelParams};
use super::result::PriceResult;

/// Prices an option on a CRR lattice and extracts its exercise boundary.
///
/// Parameters and configuration are validated before any lattice is
/// allocated. European contracts always return an empty boundary.
///
/// # Errors
///
/// Any [`LatticeError`] raised by validation or by the step-factor check.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{price, LatticeConfig, ModelParams};
///
/// let params = ModelParams::builder()
///     .spot(100.0).strike(100.0).rate(0.03).volatility(0.2)
///     .maturity(1.0).steps(200)
///     .build().unwrap();
/// let result = price(&params, &LatticeConfig::default()).unwrap();
///
/// assert!(result.price() > 0.0);
/// assert!(!result.boundary().is_empty());
/// ```
#[instrument(
    level = "debug",
    skip_all,
    fields(
        steps = params.steps(),
        kind = %params.payoff(),
        style = %params.exercise(),
    )
)]
pub fn price(params: &ModelParams, config: &LatticeConfig) -> Result<PriceResult, LatticeError> {
    config.validate()?;
    let started = Instant::now();

    let lattice = LatticeBuilder::build(params)?;
    let output = BackwardInductionEngine::new(config).run(&lattice, params);

    let boundary = match params.exercise() {
        ExerciseStyle::American => {
            BoundaryExtractor::extract(&lattice, &output.exercise, params.payoff())
        }
        ExerciseStyle::European => ExerciseBoundary::new(),
    };

    debug!(
        price = output.root_value(),
        boundary_steps = boundary.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "lattice priced"
    );

    Ok(PriceResult::new(
        boundary,
        lattice,
        output.values,
        output.exercise,
        *params,
    ))
}

/// Positional form of [`price`] with the default [`LatticeConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::crr_price;
/// use pricer_models::instruments::{ExerciseStyle, PayoffType};
///
/// let result = crr_price(
///     100.0, 100.0, 0.03, 0.0, 0.2, 1.0, 100,
///     PayoffType::Call, ExerciseStyle::American,
/// ).unwrap();
///
/// // no dividend: an American call is never exercised early
/// assert!(result.boundary().is_empty());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn crr_price(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
    steps: usize,
    payoff: PayoffType,
    exercise: ExerciseStyle,
) -> Result<PriceResult, LatticeError> {
    let params = ModelParams::new(
        spot, strike, rate, dividend, volatility, maturity, steps, payoff, exercise,
    )?;
    price(&params, &LatticeConfig::default())
}

/// Price at one step count of a convergence sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Number of time steps.
    pub steps: usize,
    /// Lattice price at that resolution.
    pub price: f64,
}

/// Prices the same contract at each entry of `steps`.
///
/// The step count in `params` is ignored. The first failing step count
/// aborts the sweep.
pub fn convergence(
    params: &ModelParams,
    steps: &[usize],
    config: &LatticeConfig,
) -> Result<Vec<ConvergencePoint>, LatticeError> {
    steps
        .iter()
        .map(|&n| {
            let result = price(&params.with_steps(n), config)?;
            Ok(ConvergencePoint {
                steps: n,
                price: result.price(),
            })
        })
        .collect()
}
