//! Immutable output of a lattice pricing run.

use super::boundary::ExerciseBoundary;
use super::builder::{SpotLattice, StepFactors};
#[cfg(feature = "serde")]
use super::error::LatticeError;
use super::grid::TriangularGrid;
use super::params::ModelParams;

/// Price, boundary and the full lattices of one run.
///
/// Deserialisation checks that every part describes the same run: the
/// parameters validate, all three grids share the step count of the
/// parameters, the price is the root of the value lattice and the boundary
/// stays within the decision steps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPriceResult"))]
pub struct PriceResult {
    price: f64,
    boundary: ExerciseBoundary,
    lattice: SpotLattice,
    values: TriangularGrid<f64>,
    exercise: TriangularGrid<bool>,
    params: ModelParams,
}

impl PriceResult {
    pub(crate) fn new(
        boundary: ExerciseBoundary,
        lattice: SpotLattice,
        values: TriangularGrid<f64>,
        exercise: TriangularGrid<bool>,
        params: ModelParams,
    ) -> Self {
        Self {
            price: values[(0, 0)],
            boundary,
            lattice,
            values,
            exercise,
            params,
        }
    }

    /// Fair value `V(0,0)`.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Early-exercise boundary (empty for European contracts).
    #[inline]
    pub fn boundary(&self) -> &ExerciseBoundary {
        &self.boundary
    }

    /// Spot lattice `S(i,j)`.
    #[inline]
    pub fn spot_lattice(&self) -> &SpotLattice {
        &self.lattice
    }

    /// Value lattice `V(i,j)`.
    #[inline]
    pub fn value_lattice(&self) -> &TriangularGrid<f64> {
        &self.values
    }

    /// Exercise-decision matrix.
    #[inline]
    pub fn exercise_matrix(&self) -> &TriangularGrid<bool> {
        &self.exercise
    }

    /// Step factors `dt, u, d, disc, p`.
    #[inline]
    pub fn factors(&self) -> &StepFactors {
        self.lattice.factors()
    }

    /// Parameters that produced this result.
    #[inline]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Number of nodes where exercise was optimal.
    pub fn exercised_nodes(&self) -> usize {
        self.exercise
            .rows()
            .map(|row| row.iter().filter(|&&f| f).count())
            .sum()
    }

    /// Serialises the result as pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Unchecked field layout of [`PriceResult`] as read from external data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPriceResult {
    price: f64,
    boundary: ExerciseBoundary,
    lattice: SpotLattice,
    values: TriangularGrid<f64>,
    exercise: TriangularGrid<bool>,
    params: ModelParams,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPriceResult> for PriceResult {
    type Error = LatticeError;

    fn try_from(raw: RawPriceResult) -> Result<Self, Self::Error> {
        raw.params.validate()?;

        let steps = raw.params.steps();
        for (name, grid_steps) in [
            ("spot lattice", raw.lattice.steps()),
            ("value lattice", raw.values.steps()),
            ("exercise matrix", raw.exercise.steps()),
        ] {
            if grid_steps != steps {
                return Err(LatticeError::InconsistentResult {
                    reason: format!("{} has {} steps, parameters have {}", name, grid_steps, steps),
                });
            }
        }

        if raw.price != raw.values[(0, 0)] {
            return Err(LatticeError::InconsistentResult {
                reason: format!(
                    "price {} differs from root value {}",
                    raw.price,
                    raw.values[(0, 0)]
                ),
            });
        }

        if let Some((step, _)) = raw.boundary.iter().find(|&(i, _)| i >= steps) {
            return Err(LatticeError::InconsistentResult {
                reason: format!("boundary step {} is outside 0..{}", step, steps),
            });
        }

        Ok(Self {
            price: raw.price,
            boundary: raw.boundary,
            lattice: raw.lattice,
            values: raw.values,
            exercise: raw.exercise,
            params: raw.params,
        })
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::lattice::crr_price;
    use pricer_models::instruments::{ExerciseStyle, PayoffType};

    fn american_put_json() -> serde_json::Value {
        let result = crr_price(
            100.0,
            100.0,
            0.05,
            0.0,
            0.3,
            1.0,
            12,
            PayoffType::Put,
            ExerciseStyle::American,
        )
        .unwrap();
        serde_json::to_value(&result).unwrap()
    }

    fn rebuild(json: serde_json::Value) -> Result<PriceResult, serde_json::Error> {
        serde_json::from_value(json)
    }

    #[test]
    fn test_round_trip_is_accepted() {
        let json = american_put_json();
        let restored = rebuild(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&restored).unwrap(), json);
    }

    #[test]
    fn test_empty_value_lattice_is_rejected() {
        let mut json = american_put_json();
        json["values"] = serde_json::json!([]);
        let err = rebuild(json).unwrap_err();
        assert!(err.to_string().contains("at least one row"));
    }

    #[test]
    fn test_short_value_lattice_is_rejected() {
        let mut json = american_put_json();
        json["values"] = serde_json::json!([[1.0], [0.5, 2.0]]);
        let err = rebuild(json).unwrap_err();
        assert!(err.to_string().contains("value lattice has 1 steps"));
    }

    #[test]
    fn test_price_must_match_root_value() {
        let mut json = american_put_json();
        json["price"] = serde_json::json!(123.0);
        let err = rebuild(json).unwrap_err();
        assert!(err.to_string().contains("differs from root value"));
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let mut json = american_put_json();
        json["params"]["volatility"] = serde_json::json!(-0.1);
        let err = rebuild(json).unwrap_err();
        assert!(err.to_string().contains("Invalid volatility"));
    }
}
