//! Forward construction of the CRR spot lattice.
//!
//! u = exp(σ√dt), d = 1/u, disc = exp(-r·dt),
//! p = (exp((r-q)·dt) - d) / (u - d)
//!
//! Node `(i, j)` is the spot after `i` steps with `j` up-moves:
//! S(i,j) = S0·u^j·d^(i-j).

use tracing::debug;

use super::error::LatticeError;
use super::grid::TriangularGrid;
use super::params::ModelParams;

/// Per-step multiplicative factors and risk-neutral probability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepFactors {
    /// Time step `T / N`.
    pub dt: f64,
    /// Up factor `u`.
    pub up: f64,
    /// Down factor `d = 1/u`.
    pub down: f64,
    /// One-step discount factor.
    pub discount: f64,
    /// Risk-neutral up-probability `p`.
    pub probability: f64,
}

impl StepFactors {
    /// Derives the factors from validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::DegenerateProbability` if `p` falls outside
    /// `(0, 1)`. This can depend on `N`: a large per-step drift relative to
    /// volatility pushes `p` past one on coarse grids.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::lattice::{ModelParams, StepFactors};
    ///
    /// let params = ModelParams::builder()
    ///     .spot(100.0).strike(100.0).rate(0.05).volatility(0.2)
    ///     .maturity(1.0).steps(4)
    ///     .build().unwrap();
    /// let factors = StepFactors::from_params(&params).unwrap();
    ///
    /// assert!((factors.up * factors.down - 1.0).abs() < 1e-15);
    /// assert!(factors.probability > 0.0 && factors.probability < 1.0);
    /// ```
    pub fn from_params(params: &ModelParams) -> Result<Self, LatticeError> {
        let dt = params.dt();
        let up = (params.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let discount = (-params.rate() * dt).exp();
        let growth = ((params.rate() - params.dividend()) * dt).exp();
        let probability = (growth - down) / (up - down);

        if probability.is_nan() || probability <= 0.0 || probability >= 1.0 {
            return Err(LatticeError::DegenerateProbability { probability });
        }

        Ok(Self {
            dt,
            up,
            down,
            discount,
            probability,
        })
    }
}

/// Spot prices on the triangular lattice together with the factors that
/// generated them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotLattice {
    factors: StepFactors,
    nodes: TriangularGrid<f64>,
}

impl SpotLattice {
    /// Step factors used for construction.
    #[inline]
    pub fn factors(&self) -> &StepFactors {
        &self.factors
    }

    /// Number of steps `N`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.nodes.steps()
    }

    /// Spot at node `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics outside the triangle `j <= i <= N`.
    #[inline]
    pub fn spot(&self, i: usize, j: usize) -> f64 {
        self.nodes[(i, j)]
    }

    /// Spots of row `i`, increasing in `j`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        self.nodes.row(i)
    }

    /// Underlying grid.
    #[inline]
    pub fn nodes(&self) -> &TriangularGrid<f64> {
        &self.nodes
    }
}

/// Builds [`SpotLattice`]s from model parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeBuilder;

impl LatticeBuilder {
    /// Validates the parameters, derives the step factors and builds the
    /// lattice forward in time.
    ///
    /// S(0,0) = S0; S(i,0) = S(i-1,0)·d; S(i,j) = S(i-1,j-1)·u for j ≥ 1.
    ///
    /// # Errors
    ///
    /// Any parameter error from [`ModelParams::validate`], or
    /// `LatticeError::DegenerateProbability`. Nothing is allocated on error.
    pub fn build(params: &ModelParams) -> Result<SpotLattice, LatticeError> {
        params.validate()?;
        let factors = StepFactors::from_params(params)?;

        debug!(
            steps = params.steps(),
            dt = factors.dt,
            up = factors.up,
            down = factors.down,
            discount = factors.discount,
            probability = factors.probability,
            "CRR step factors"
        );

        let steps = params.steps();
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(steps + 1);
        rows.push(vec![params.spot()]);

        for i in 1..=steps {
            let prev = &rows[i - 1];
            let mut row = Vec::with_capacity(i + 1);
            row.push(prev[0] * factors.down);
            row.extend(prev.iter().map(|s| s * factors.up));
            rows.push(row);
        }

        Ok(SpotLattice {
            factors,
            nodes: TriangularGrid::from_rows(rows),
        })
    }
}
