//! Model parameters and engine configuration for the CRR lattice.
//!
//! [`ModelParams`] holds the contract and market inputs of one pricing run.
//! [`LatticeConfig`] holds the numerical knobs of the engine itself.

use pricer_models::instruments::{ExerciseStyle, PayoffType};

use super::error::LatticeError;

/// Default tolerance for the exercise tie-break.
pub const DEFAULT_TOL_EXERCISE: f64 = 1e-12;

/// Inputs of one pricing run.
///
/// Immutable once built. Use [`ModelParams::builder`] or [`ModelParams::new`];
/// both validate. Deserialised values are validated again by the pricer.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::ModelParams;
/// use pricer_models::instruments::{ExerciseStyle, PayoffType};
///
/// let params = ModelParams::builder()
///     .spot(100.0)
///     .strike(95.0)
///     .rate(0.03)
///     .volatility(0.2)
///     .maturity(1.0)
///     .steps(200)
///     .payoff(PayoffType::Put)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.steps(), 200);
/// assert_eq!(params.dividend(), 0.0);
/// assert_eq!(params.exercise(), ExerciseStyle::American);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParams {
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    volatility: f64,
    maturity: f64,
    steps: usize,
    payoff: PayoffType,
    exercise: ExerciseStyle,
}

impl ModelParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// See [`ModelParams::validate`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
        maturity: f64,
        steps: usize,
        payoff: PayoffType,
        exercise: ExerciseStyle,
    ) -> Result<Self, LatticeError> {
        let params = Self {
            spot,
            strike,
            rate,
            dividend,
            volatility,
            maturity,
            steps,
            payoff,
            exercise,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> ModelParamsBuilder {
        ModelParamsBuilder::default()
    }

    /// Initial spot `S0`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike `K`.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously-compounded risk-free rate `r`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield `q`.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Volatility `sigma`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to maturity `T` in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Number of time steps `N`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Option kind.
    #[inline]
    pub fn payoff(&self) -> PayoffType {
        self.payoff
    }

    /// Exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Time step `dt = T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    /// Same contract on a different grid. Not validated until priced.
    pub fn with_steps(&self, steps: usize) -> Self {
        Self { steps, ..*self }
    }

    /// Same contract with a different exercise style.
    pub fn with_exercise(&self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..*self }
    }

    /// Validates the parameters.
    ///
    /// Checks run in a fixed order: step count, finiteness, price levels,
    /// volatility, maturity.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition as a [`LatticeError`].
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.steps < 1 {
            return Err(LatticeError::InvalidStepCount { steps: self.steps });
        }

        for (name, value) in [
            ("spot", self.spot),
            ("strike", self.strike),
            ("rate", self.rate),
            ("dividend", self.dividend),
            ("volatility", self.volatility),
            ("maturity", self.maturity),
        ] {
            if !value.is_finite() {
                return Err(LatticeError::NonFiniteInput { name, value });
            }
        }

        if self.spot <= 0.0 {
            return Err(LatticeError::InvalidSpot { spot: self.spot });
        }
        if self.strike <= 0.0 {
            return Err(LatticeError::InvalidStrike {
                strike: self.strike,
            });
        }
        if self.volatility <= 0.0 {
            return Err(LatticeError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if self.maturity <= 0.0 {
            return Err(LatticeError::InvalidMaturity {
                maturity: self.maturity,
            });
        }

        Ok(())
    }
}

/// Builder for [`ModelParams`].
///
/// `spot`, `strike`, `volatility`, `maturity` and `steps` are required.
/// `rate` and `dividend` default to zero, the payoff to a put and the
/// exercise style to American.
#[derive(Clone, Debug, Default)]
pub struct ModelParamsBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    rate: f64,
    dividend: f64,
    volatility: Option<f64>,
    maturity: Option<f64>,
    steps: Option<usize>,
    payoff: Option<PayoffType>,
    exercise: ExerciseStyle,
}

impl ModelParamsBuilder {
    /// Sets the initial spot.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    /// Sets the volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the time to maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the option kind.
    #[inline]
    pub fn payoff(mut self, payoff: PayoffType) -> Self {
        self.payoff = Some(payoff);
        self
    }

    /// Sets the exercise style.
    #[inline]
    pub fn exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// Missing required values are reported as the matching invalid-value
    /// error (a missing step count as `InvalidStepCount { steps: 0 }`, a
    /// missing float as NaN).
    pub fn build(self) -> Result<ModelParams, LatticeError> {
        ModelParams::new(
            self.spot.unwrap_or(f64::NAN),
            self.strike.unwrap_or(f64::NAN),
            self.rate,
            self.dividend,
            self.volatility.unwrap_or(f64::NAN),
            self.maturity.unwrap_or(f64::NAN),
            self.steps.unwrap_or(0),
            self.payoff.unwrap_or(PayoffType::Put),
            self.exercise,
        )
    }
}

/// Numerical configuration of the lattice engine.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeConfig;
///
/// let config = LatticeConfig::builder()
///     .tol_exercise(1e-10)
///     .parallel_threshold(512)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tol_exercise(), 1e-10);
/// assert_eq!(config.parallel_threshold(), Some(512));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    tol_exercise: f64,
    parallel_threshold: Option<usize>,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            tol_exercise: DEFAULT_TOL_EXERCISE,
            parallel_threshold: None,
        }
    }
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Exercise is chosen only when it beats continuation by more than this.
    #[inline]
    pub fn tol_exercise(&self) -> f64 {
        self.tol_exercise
    }

    /// Minimum row width evaluated on the rayon pool, if enabled.
    #[inline]
    pub fn parallel_threshold(&self) -> Option<usize> {
        self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::InvalidTolerance` if `tol_exercise` is negative
    /// or not finite.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !self.tol_exercise.is_finite() || self.tol_exercise < 0.0 {
            return Err(LatticeError::InvalidTolerance {
                tolerance: self.tol_exercise,
            });
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    tol_exercise: Option<f64>,
    parallel_threshold: Option<usize>,
}

impl LatticeConfigBuilder {
    /// Sets the exercise tie-break tolerance.
    #[inline]
    pub fn tol_exercise(mut self, tol_exercise: f64) -> Self {
        self.tol_exercise = Some(tol_exercise);
        self
    }

    /// Evaluates rows at least this wide in parallel.
    #[inline]
    pub fn parallel_threshold(mut self, width: usize) -> Self {
        self.parallel_threshold = Some(width);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::InvalidTolerance` for a bad tolerance.
    pub fn build(self) -> Result<LatticeConfig, LatticeError> {
        let config = LatticeConfig {
            tol_exercise: self.tol_exercise.unwrap_or(DEFAULT_TOL_EXERCISE),
            parallel_threshold: self.parallel_threshold,
        };
        config.validate()?;
        Ok(config)
    }
}
