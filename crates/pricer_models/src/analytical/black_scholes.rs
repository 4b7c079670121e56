//! Black-Scholes-Merton pricing for European options with a continuous
//! dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The lattice engine uses these prices as its reference: an American call
//! on an asset without dividends must match the European call.

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::PayoffType;

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black-Scholes-Merton model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model on a non-dividend-paying underlying.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        Self::with_dividend(spot, rate, T::zero(), volatility)
    }

    /// Creates a model with a continuous dividend yield.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Continuously-compounded risk-free rate
    /// * `dividend` - Continuous dividend yield
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::with_dividend(100.0_f64, 0.05, 0.02, 0.2).unwrap();
    /// assert_eq!(bs.dividend(), 0.02);
    ///
    /// assert!(BlackScholes::with_dividend(-1.0_f64, 0.05, 0.02, 0.2).is_err());
    /// assert!(BlackScholes::with_dividend(100.0_f64, 0.05, 0.02, 0.0).is_err());
    /// ```
    pub fn with_dividend(
        spot: T,
        rate: T,
        dividend: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot.is_nan() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility.is_nan() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// At expiry the term collapses to ±100 (or 0 at the money).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();

        if expiry <= T::from(EXPIRY_EPSILON).unwrap() {
            let large = T::from(100.0).unwrap();
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate - self.dividend + half * self.volatility * self.volatility) * expiry;

        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= T::from(EXPIRY_EPSILON).unwrap() {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    ///
    /// Returns the intrinsic value once the option has expired.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::from(EXPIRY_EPSILON).unwrap() {
            return PayoffType::Call.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let df_r = (-self.rate * expiry).exp();
        let df_q = (-self.dividend * expiry).exp();

        self.spot * df_q * norm_cdf(d1) - strike * df_r * norm_cdf(d2)
    }

    /// European put price.
    ///
    /// Returns the intrinsic value once the option has expired.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= T::from(EXPIRY_EPSILON).unwrap() {
            return PayoffType::Put.intrinsic(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let df_r = (-self.rate * expiry).exp();
        let df_q = (-self.dividend * expiry).exp();

        strike * df_r * norm_cdf(-d2) - self.spot * df_q * norm_cdf(-d1)
    }

    /// European price for the given payoff kind.
    #[inline]
    pub fn price(&self, payoff: PayoffType, strike: T, expiry: T) -> T {
        match payoff {
            PayoffType::Call => self.price_call(strike, expiry),
            PayoffType::Put => self.price_put(strike, expiry),
        }
    }
}

/// Closed-form European price from raw market inputs.
///
/// Degenerate inputs (`expiry <= 0` or `volatility <= 0`) return the
/// intrinsic payoff directly instead of evaluating the formula.
///
/// # Errors
/// - `AnalyticalError::InvalidSpot` / `InvalidStrike` for non-positive levels
/// - `AnalyticalError::NumericalInstability` if the result is not finite
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes_european;
/// use pricer_models::instruments::PayoffType;
///
/// let call = black_scholes_european(100.0_f64, 100.0, 0.02, 0.0, 0.2, 1.0, PayoffType::Call).unwrap();
/// assert!(call > 8.0 && call < 10.0);
///
/// // Expired: intrinsic value
/// let put = black_scholes_european(90.0_f64, 100.0, 0.02, 0.0, 0.2, 0.0, PayoffType::Put).unwrap();
/// assert_eq!(put, 10.0);
/// ```
pub fn black_scholes_european<T: Float>(
    spot: T,
    strike: T,
    rate: T,
    dividend: T,
    volatility: T,
    expiry: T,
    payoff: PayoffType,
) -> Result<T, AnalyticalError> {
    let zero = T::zero();

    if expiry <= zero || volatility <= zero {
        return Ok(payoff.intrinsic(spot, strike));
    }

    if strike.is_nan() || strike <= zero {
        return Err(AnalyticalError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(f64::NAN),
        });
    }

    let model = BlackScholes::with_dividend(spot, rate, dividend, volatility)?;
    let price = model.price(payoff, strike, expiry);

    if !price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("{} price is not finite", payoff),
        });
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = model();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.dividend(), 0.0);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot() {
        let result = BlackScholes::new(0.0_f64, 0.05, 0.2);
        assert!(matches!(result, Err(AnalyticalError::InvalidSpot { .. })));
    }

    #[test]
    fn test_new_invalid_volatility() {
        match BlackScholes::new(100.0_f64, 0.05, -0.1) {
            Err(AnalyticalError::InvalidVolatility { volatility }) => {
                assert_eq!(volatility, -0.1);
            }
            _ => panic!("Expected InvalidVolatility error"),
        }
    }

    #[test]
    fn test_nan_volatility_rejected() {
        let result = BlackScholes::new(100.0_f64, 0.05, f64::NAN);
        assert!(matches!(
            result,
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        assert_relative_eq!(model().price_call(100.0, 1.0), 10.450583572185565, epsilon = 1e-5);
    }

    #[test]
    fn test_put_price_reference_value() {
        assert_relative_eq!(model().price_put(100.0, 1.0), 5.573526022256971, epsilon = 1e-5);
    }

    #[test]
    fn test_dividend_lowers_call_and_raises_put() {
        let plain = model();
        let paying = BlackScholes::with_dividend(100.0, 0.05, 0.03, 0.2).unwrap();
        assert!(paying.price_call(100.0, 1.0) < plain.price_call(100.0, 1.0));
        assert!(paying.price_put(100.0, 1.0) > plain.price_put(100.0, 1.0));
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let (s, r, q, t) = (100.0_f64, 0.04, 0.025, 1.5);
        let bs = BlackScholes::with_dividend(s, r, q, 0.3).unwrap();
        for k in [70.0, 90.0, 100.0, 115.0, 140.0] {
            let lhs = bs.price_call(k, t) - bs.price_put(k, t);
            let rhs = s * (-q * t).exp() - k * (-r * t).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_expired_prices_are_intrinsic() {
        let bs = BlackScholes::new(110.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.price_call(100.0, 0.0), 10.0);
        assert_eq!(bs.price_put(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = model();
        let (k, t) = (105.0, 0.75);
        assert_relative_eq!(bs.d1(k, t) - bs.d2(k, t), 0.2 * t.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_price_dispatches_on_payoff() {
        let bs = model();
        assert_eq!(bs.price(PayoffType::Call, 95.0, 0.5), bs.price_call(95.0, 0.5));
        assert_eq!(bs.price(PayoffType::Put, 95.0, 0.5), bs.price_put(95.0, 0.5));
    }

    // ==========================================================
    // Free function
    // ==========================================================

    #[test]
    fn test_free_function_matches_model() {
        let direct = BlackScholes::with_dividend(100.0, 0.03, 0.01, 0.25)
            .unwrap()
            .price_put(95.0, 2.0);
        let free =
            black_scholes_european(100.0, 95.0, 0.03, 0.01, 0.25, 2.0, PayoffType::Put).unwrap();
        assert_eq!(direct, free);
    }

    #[test]
    fn test_free_function_degenerate_inputs_return_intrinsic() {
        let zero_vol =
            black_scholes_european(120.0, 100.0, 0.05, 0.0, 0.0, 1.0, PayoffType::Call).unwrap();
        assert_eq!(zero_vol, 20.0);

        let expired =
            black_scholes_european(80.0, 100.0, 0.05, 0.0, 0.2, -1.0, PayoffType::Put).unwrap();
        assert_eq!(expired, 20.0);
    }

    #[test]
    fn test_free_function_rejects_bad_levels() {
        let bad_spot = black_scholes_european(0.0, 100.0, 0.05, 0.0, 0.2, 1.0, PayoffType::Call);
        assert!(matches!(bad_spot, Err(AnalyticalError::InvalidSpot { .. })));

        let bad_strike = black_scholes_european(100.0, -5.0, 0.05, 0.0, 0.2, 1.0, PayoffType::Put);
        assert!(matches!(
            bad_strike,
            Err(AnalyticalError::InvalidStrike { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_call_within_no_arbitrage_bounds(
                spot in 10.0_f64..500.0,
                strike in 10.0_f64..500.0,
                rate in -0.02_f64..0.15,
                dividend in 0.0_f64..0.1,
                vol in 0.01_f64..1.5,
                expiry in 0.01_f64..5.0,
            ) {
                let call = black_scholes_european(
                    spot, strike, rate, dividend, vol, expiry, PayoffType::Call,
                ).unwrap();
                let discounted_spot = spot * (-dividend * expiry).exp();
                let lower = (discounted_spot - strike * (-rate * expiry).exp()).max(0.0);
                let tol = 1e-6 * spot.max(strike);

                prop_assert!(call >= lower - tol, "call {} below {}", call, lower);
                prop_assert!(call <= discounted_spot + tol, "call {} above {}", call, discounted_spot);
            }
        }
    }
}
