//! Backward induction over the spot lattice.
//!
//! Rows are processed from `i = N - 1` down to `0`. Each row depends only on
//! the row after it, so nodes inside a row are independent and can be
//! evaluated on the rayon pool once the row is wide enough.

use rayon::prelude::*;
use tracing::debug;

use pricer_models::instruments::{ExerciseStyle, PayoffType};

use super::builder::{SpotLattice, StepFactors};
use super::grid::TriangularGrid;
use super::params::{LatticeConfig, ModelParams};

/// Value lattice and exercise decisions produced by one induction pass.
#[derive(Clone, Debug, PartialEq)]
pub struct InductionOutput {
    /// Option value at every node.
    pub values: TriangularGrid<f64>,
    /// `true` where immediate exercise beats continuation.
    pub exercise: TriangularGrid<bool>,
}

impl InductionOutput {
    /// Value at the root node.
    #[inline]
    pub fn root_value(&self) -> f64 {
        self.values[(0, 0)]
    }
}

/// Per-node inputs shared by every row.
#[derive(Clone, Copy)]
struct NodeRule {
    payoff: PayoffType,
    american: bool,
    strike: f64,
    discount: f64,
    probability: f64,
    tol_exercise: f64,
}

impl NodeRule {
    /// Value and exercise flag at level `j` given the next row's values.
    #[inline]
    fn evaluate(&self, spot: f64, next: &[f64], j: usize) -> (f64, bool) {
        let continuation = self.discount
            * (self.probability * next[j + 1] + (1.0 - self.probability) * next[j]);

        if !self.american {
            return (continuation, false);
        }

        let exercise = self.payoff.intrinsic(spot, self.strike);
        if exercise > continuation + self.tol_exercise {
            (exercise, true)
        } else {
            (continuation, false)
        }
    }
}

/// Computes option values and exercise decisions on a [`SpotLattice`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::{
///     BackwardInductionEngine, LatticeBuilder, LatticeConfig, ModelParams,
/// };
///
/// let params = ModelParams::builder()
///     .spot(100.0).strike(100.0).rate(0.03).volatility(0.2)
///     .maturity(1.0).steps(50)
///     .build().unwrap();
/// let lattice = LatticeBuilder::build(&params).unwrap();
///
/// let engine = BackwardInductionEngine::new(&LatticeConfig::default());
/// let output = engine.run(&lattice, &params);
///
/// assert!(output.root_value() > 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BackwardInductionEngine {
    tol_exercise: f64,
    parallel_threshold: Option<usize>,
}

impl BackwardInductionEngine {
    /// Creates an engine from a validated configuration.
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            tol_exercise: config.tol_exercise(),
            parallel_threshold: config.parallel_threshold(),
        }
    }

    /// Whether a row of `width` nodes is split across the rayon pool.
    #[inline]
    pub fn should_parallelise(&self, width: usize) -> bool {
        self.parallel_threshold.is_some_and(|threshold| width >= threshold)
    }

    /// Runs the induction from the terminal payoff back to the root.
    ///
    /// `lattice` must have been built from `params`; debug builds assert
    /// that both carry the same step count.
    pub fn run(&self, lattice: &SpotLattice, params: &ModelParams) -> InductionOutput {
        let steps = lattice.steps();
        debug_assert_eq!(
            steps,
            params.steps(),
            "lattice has {} steps but the parameters ask for {}",
            steps,
            params.steps()
        );
        let factors: &StepFactors = lattice.factors();
        let rule = NodeRule {
            payoff: params.payoff(),
            american: params.exercise() == ExerciseStyle::American,
            strike: params.strike(),
            discount: factors.discount,
            probability: factors.probability,
            tol_exercise: self.tol_exercise,
        };

        let mut values = TriangularGrid::filled(steps, 0.0_f64);
        let mut exercise = TriangularGrid::filled(steps, false);

        for (v, &s) in values.row_mut(steps).iter_mut().zip(lattice.row(steps)) {
            *v = rule.payoff.intrinsic(s, rule.strike);
        }

        let mut parallel_rows = 0_usize;
        for i in (0..steps).rev() {
            let spots = lattice.row(i);
            let (row_values, row_flags): (Vec<f64>, Vec<bool>) = {
                let next = values.row(i + 1);
                if self.should_parallelise(i + 1) {
                    parallel_rows += 1;
                    spots
                        .par_iter()
                        .enumerate()
                        .map(|(j, &s)| rule.evaluate(s, next, j))
                        .unzip()
                } else {
                    spots
                        .iter()
                        .enumerate()
                        .map(|(j, &s)| rule.evaluate(s, next, j))
                        .unzip()
                }
            };
            values.row_mut(i).copy_from_slice(&row_values);
            exercise.row_mut(i).copy_from_slice(&row_flags);
        }

        debug!(steps, parallel_rows, root = values[(0, 0)], "backward induction done");

        InductionOutput { values, exercise }
    }
}
