//! Cox-Ross-Rubinstein binomial lattice.
//!
//! A run flows through four stages:
//!
//! 1. [`LatticeBuilder`] validates [`ModelParams`], derives the
//!    [`StepFactors`] and builds the spot lattice forward in time.
//! 2. [`BackwardInductionEngine`] fills the value lattice from the terminal
//!    payoff back to the root, recording exercise decisions.
//! 3. [`BoundaryExtractor`] turns the decisions into an
//!    [`ExerciseBoundary`] (American contracts only).
//! 4. [`price`] packages everything into a [`PriceResult`].
//!
//! Validation always happens before allocation, so a failed call leaves
//! nothing behind.
//!
//! # Example
//!
//! ```rust
//! use pricer_pricing::lattice::{price, LatticeConfig, ModelParams};
//! use pricer_models::instruments::{ExerciseStyle, PayoffType};
//!
//! let params = ModelParams::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.03)
//!     .volatility(0.20)
//!     .maturity(1.0)
//!     .steps(500)
//!     .payoff(PayoffType::Put)
//!     .exercise(ExerciseStyle::American)
//!     .build()
//!     .unwrap();
//!
//! let american = price(&params, &LatticeConfig::default()).unwrap();
//! let european = price(
//!     &params.with_exercise(ExerciseStyle::European),
//!     &LatticeConfig::default(),
//! )
//! .unwrap();
//!
//! assert!(american.price() >= european.price());
//! for (t, level) in american.boundary().points(american.factors().dt) {
//!     assert!(t < 1.0 && level > 0.0);
//! }
//! ```

mod boundary;
mod builder;
mod error;
mod grid;
mod induction;
mod params;
mod pricer;
mod result;

pub use boundary::{BoundaryExtractor, ExerciseBoundary};
pub use builder::{LatticeBuilder, SpotLattice, StepFactors};
pub use error::LatticeError;
pub use grid::TriangularGrid;
pub use induction::{BackwardInductionEngine, InductionOutput};
pub use params::{
    LatticeConfig, LatticeConfigBuilder, ModelParams, ModelParamsBuilder, DEFAULT_TOL_EXERCISE,
};
pub use pricer::{convergence, crr_price, price, ConvergencePoint};
pub use result::PriceResult;
