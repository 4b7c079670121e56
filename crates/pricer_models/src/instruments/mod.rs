//! Vanilla option vocabulary.
//!
//! - [`PayoffType`]: call or put, with the exact intrinsic value
//! - [`ExerciseStyle`]: European or American
//! - [`InstrumentError`]: parsing failures for the above
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{ExerciseStyle, PayoffType};
//!
//! let kind: PayoffType = "put".parse().unwrap();
//! let style: ExerciseStyle = "american".parse().unwrap();
//!
//! assert_eq!(kind.intrinsic(90.0_f64, 100.0), 10.0);
//! assert!(style.allows_early_exercise());
//! ```

mod error;
mod exercise;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use payoff::PayoffType;
