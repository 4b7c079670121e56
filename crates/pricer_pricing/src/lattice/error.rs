//! Error types for the binomial lattice pricer.
//!
//! Parameter variants are raised before any lattice is allocated. Shape
//! variants come from rebuilding grids or results out of external data.
//! Retrying with the same inputs cannot succeed.

use thiserror::Error;

/// Lattice pricing errors.
///
/// # Variants
/// - `InvalidStepCount`: fewer than one time step
/// - `InvalidSpot` / `InvalidStrike`: non-positive price level
/// - `InvalidVolatility` / `InvalidMaturity`: non-positive σ or T
/// - `NonFiniteInput`: NaN or infinite float input
/// - `InvalidTolerance`: negative or non-finite exercise tolerance
/// - `DegenerateProbability`: risk-neutral probability outside (0, 1)
/// - `EmptyGrid` / `MalformedGrid`: rows that do not form a triangle
/// - `InconsistentResult`: deserialised result whose parts disagree
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::LatticeError;
///
/// let err = LatticeError::DegenerateProbability { probability: 1.02 };
/// assert!(err.to_string().contains("1.020000"));
/// assert!(err.is_probability_error());
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Step count below one.
    #[error("Invalid step count {steps}: at least one time step is required")]
    InvalidStepCount {
        /// The rejected step count
        steps: usize,
    },

    /// Non-positive initial spot.
    #[error("Invalid spot price: S0 = {spot} (must be > 0)")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Non-positive strike.
    #[error("Invalid strike: K = {strike} (must be > 0)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility} (must be > 0)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Non-positive time to maturity.
    #[error("Invalid maturity: T = {maturity} (must be > 0)")]
    InvalidMaturity {
        /// The rejected maturity
        maturity: f64,
    },

    /// A float input was NaN or infinite.
    #[error("Non-finite input '{name}': {value}")]
    NonFiniteInput {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Exercise tie-break tolerance is negative or non-finite.
    #[error("Invalid exercise tolerance: {tolerance} (must be finite and >= 0)")]
    InvalidTolerance {
        /// The rejected tolerance
        tolerance: f64,
    },

    /// Risk-neutral up-probability outside the open interval (0, 1).
    #[error(
        "Risk-neutral probability out of (0,1): p = {probability:.6}. \
         Increase the number of steps or check r, q, sigma and T"
    )]
    DegenerateProbability {
        /// The computed probability
        probability: f64,
    },

    /// Grid without any row.
    #[error("triangular grid needs at least one row")]
    EmptyGrid,

    /// Row `i` does not hold `i + 1` nodes.
    #[error("row {row} must hold {expected} nodes, found {found}")]
    MalformedGrid {
        /// Offending row index
        row: usize,
        /// Required node count
        expected: usize,
        /// Actual node count
        found: usize,
    },

    /// Parts of a pricing result do not describe the same run.
    #[error("Inconsistent price result: {reason}")]
    InconsistentResult {
        /// What disagreed
        reason: String,
    },
}

impl LatticeError {
    /// `N < 1`.
    pub fn is_step_count_error(&self) -> bool {
        matches!(self, LatticeError::InvalidStepCount { .. })
    }

    /// `S0 <= 0` or `K <= 0`.
    pub fn is_price_level_error(&self) -> bool {
        matches!(
            self,
            LatticeError::InvalidSpot { .. } | LatticeError::InvalidStrike { .. }
        )
    }

    /// `sigma <= 0` or `T <= 0`.
    pub fn is_volatility_or_maturity_error(&self) -> bool {
        matches!(
            self,
            LatticeError::InvalidVolatility { .. } | LatticeError::InvalidMaturity { .. }
        )
    }

    /// Computed `p` outside `(0, 1)`.
    pub fn is_probability_error(&self) -> bool {
        matches!(self, LatticeError::DegenerateProbability { .. })
    }

    /// Grid or result rebuilt from malformed data.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            LatticeError::EmptyGrid
                | LatticeError::MalformedGrid { .. }
                | LatticeError::InconsistentResult { .. }
        )
    }
}
