//! Option exercise style definitions.
//!
//! Only the two styles a recombining vanilla lattice needs are modelled:
//! exercise at expiry (European) and exercise at any step (American).

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Option exercise style.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::European.allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    European,

    /// American style: exercise at any time up to expiry.
    #[default]
    American,
}

impl ExerciseStyle {
    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether the holder may exercise before expiry.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        self.is_american()
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseStyle {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "euro" | "eu" => Ok(ExerciseStyle::European),
            "american" | "amer" | "us" => Ok(ExerciseStyle::American),
            other => Err(InstrumentError::UnknownExerciseStyle {
                name: other.to_string(),
            }),
        }
    }
}
