//! Early-exercise boundary extraction.
//!
//! For each step with at least one exercised node the boundary records the
//! critical spot `S*(i)` separating exercise from continuation. Puts are
//! exercised below the boundary and calls above it, so the search runs from
//! opposite ends of the row.

use std::collections::BTreeMap;

use pricer_models::instruments::PayoffType;

use super::builder::SpotLattice;
use super::grid::TriangularGrid;

/// Mapping from step index to critical spot, ordered by step.
///
/// Steps where no node is exercised are absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExerciseBoundary {
    levels: BTreeMap<usize, f64>,
}

impl ExerciseBoundary {
    /// Empty boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no step carries an exercise decision.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of steps with a boundary point.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Critical spot at step `i`, if any.
    #[inline]
    pub fn get(&self, step: usize) -> Option<f64> {
        self.levels.get(&step).copied()
    }

    /// `(step, S*)` pairs in increasing step order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.levels.iter().map(|(&i, &s)| (i, s))
    }

    /// `(t_i, S*)` pairs with `t_i = i·dt`, in increasing time order.
    pub fn points(&self, dt: f64) -> Vec<(f64, f64)> {
        self.iter().map(|(i, s)| (i as f64 * dt, s)).collect()
    }

    fn insert(&mut self, step: usize, level: f64) {
        self.levels.insert(step, level);
    }
}

/// Derives an [`ExerciseBoundary`] from the exercise-decision grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundaryExtractor;

impl BoundaryExtractor {
    /// Scans every row below maturity.
    ///
    /// Put: `j*` is the highest exercised level; the boundary is the midpoint
    /// of `S(i,j*)` and `S(i,j*+1)`, or `S(i,j*)` when `j* = i`.
    ///
    /// Call: `j*` is the lowest exercised level; the boundary is the midpoint
    /// of `S(i,j*-1)` and `S(i,j*)`, or `S(i,j*)` when `j* = 0`.
    pub fn extract(
        lattice: &SpotLattice,
        exercise: &TriangularGrid<bool>,
        payoff: PayoffType,
    ) -> ExerciseBoundary {
        let mut boundary = ExerciseBoundary::new();

        for i in 0..lattice.steps() {
            let flags = exercise.row(i);
            let spots = lattice.row(i);

            let level = match payoff {
                PayoffType::Put => flags.iter().rposition(|&f| f).map(|j| {
                    if j < i {
                        0.5 * (spots[j] + spots[j + 1])
                    } else {
                        spots[j]
                    }
                }),
                PayoffType::Call => flags.iter().position(|&f| f).map(|j| {
                    if j > 0 {
                        0.5 * (spots[j - 1] + spots[j])
                    } else {
                        spots[j]
                    }
                }),
            };

            if let Some(level) = level {
                boundary.insert(i, level);
            }
        }

        boundary
    }
}
