//! Instrument error types.

use thiserror::Error;

/// Instrument vocabulary errors.
///
/// Raised when parsing option kinds or exercise styles from text.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::UnknownPayoff { name: "digital".to_string() };
/// assert!(format!("{}", err).contains("digital"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    /// Unrecognised option kind.
    #[error("Unknown option kind '{name}': expected 'call' or 'put'")]
    UnknownPayoff {
        /// The rejected name
        name: String,
    },

    /// Unrecognised exercise style.
    #[error("Unknown exercise style '{name}': expected 'european' or 'american'")]
    UnknownExerciseStyle {
        /// The rejected name
        name: String,
    },
}
