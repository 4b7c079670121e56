//! Closed-form pricing for European options.
//!
//! - Black-Scholes-Merton with a continuous dividend yield
//! - Standard normal CDF
//!
//! Generic over `T: Float`. The lattice engine in `pricer_pricing` uses
//! these prices to cross-validate its European and no-dividend American
//! call results.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{black_scholes_european, BlackScholes};
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
