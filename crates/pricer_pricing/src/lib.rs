//! # Pricer Pricing (L3: Lattice Engine)
//!
//! Cox-Ross-Rubinstein binomial pricing of European and American vanilla
//! options, with extraction of the early-exercise boundary `S*(t)`.
//!
//! ## Modules
//!
//! - [`lattice`]: parameters, spot lattice construction, backward induction,
//!   boundary extraction and the [`price`] entry point
//! - [`chart`]: Chart.js compatible boundary chart and text table
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::{price, LatticeConfig, ModelParams};
//! use pricer_models::analytical::black_scholes_european;
//! use pricer_models::instruments::{ExerciseStyle, PayoffType};
//!
//! let params = ModelParams::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.03)
//!     .volatility(0.2)
//!     .maturity(1.0)
//!     .steps(600)
//!     .payoff(PayoffType::Call)
//!     .exercise(ExerciseStyle::American)
//!     .build()
//!     .unwrap();
//!
//! let lattice = price(&params, &LatticeConfig::default()).unwrap();
//! let closed_form =
//!     black_scholes_european(100.0, 100.0, 0.03, 0.0, 0.2, 1.0, PayoffType::Call).unwrap();
//!
//! assert!((lattice.price() - closed_form).abs() < 1e-2);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): serialisation of results, parameters and charts

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod chart;
pub mod lattice;

pub use chart::{BoundaryChart, ChartOptions};
pub use lattice::{
    convergence, crr_price, price, ConvergencePoint, ExerciseBoundary, LatticeConfig,
    LatticeError, ModelParams, PriceResult,
};
