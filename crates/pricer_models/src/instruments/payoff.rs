//! Vanilla payoff definitions.
//!
//! This module provides the option kind (call or put) together with the
//! exact intrinsic value used at lattice nodes and at expiry.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::InstrumentError;

/// Type of vanilla option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Intrinsic value of the payoff at `spot`, floored at zero.
    ///
    /// # Arguments
    /// * `spot` - Underlying price (S)
    /// * `strike` - Strike price (K)
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        let raw = match self {
            PayoffType::Call => spot - strike,
            PayoffType::Put => strike - spot,
        };
        raw.max(T::zero())
    }

    /// Returns whether this payoff is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this payoff is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffType::Call => "call",
            PayoffType::Put => "put",
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoffType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            other => Err(InstrumentError::UnknownPayoff {
                name: other.to_string(),
            }),
        }
    }
}
