//! Standard normal distribution functions.
//!
//! `norm_cdf` is generic over `T: Float` so the closed-form pricer can run
//! in `f32` or `f64`.

use num_traits::Float;

/// Chebyshev coefficients of the erfc fit, highest order first.
///
/// erfc(z) ≈ t·exp(-z² + P(t)) with t = 1 / (1 + z/2), z ≥ 0.
/// Fractional error below 1.2e-7 everywhere.
const ERFC_COEFFS: [f64; 10] = [
    0.170_872_77,
    -0.822_152_23,
    1.488_515_87,
    -1.135_203_98,
    0.278_868_07,
    -0.186_288_06,
    0.096_784_18,
    0.374_091_96,
    1.000_023_68,
    -1.265_512_23,
];

/// Complementary error function.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let one = T::one();
    let half = T::from(0.5).unwrap();

    let z = x.abs();
    let t = one / (one + half * z);

    let poly = ERFC_COEFFS
        .iter()
        .fold(T::zero(), |acc, &c| acc * t + T::from(c).unwrap());

    let tail = t * (-z * z + poly).exp();

    if x < T::zero() {
        T::from(2.0).unwrap() - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(-x/√2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-4.0_f64) < 1e-4);
/// assert!(norm_cdf(4.0_f64) > 0.9999);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    half * erfc(-x / sqrt_2)
}
