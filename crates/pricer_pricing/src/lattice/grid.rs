//! Ragged triangular storage for recombining lattices.
//!
//! Row `i` holds exactly `i + 1` nodes, so there are no unused cells to
//! guard against. Every constructor, deserialisation included, enforces
//! that shape.

use std::ops::{Index, IndexMut};

use super::error::LatticeError;

/// Triangular grid indexed by step `i` and level `j <= i`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::TriangularGrid;
///
/// let mut grid = TriangularGrid::filled(3, 0.0_f64);
/// grid[(2, 1)] = 4.5;
///
/// assert_eq!(grid.steps(), 3);
/// assert_eq!(grid.row(2), &[0.0, 4.5, 0.0]);
/// assert_eq!(grid.get(1, 2), None);
/// assert_eq!(grid.node_count(), 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TriangularGrid<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Clone> TriangularGrid<T> {
    /// Grid for `steps` steps (`steps + 1` rows) with every node set to `value`.
    pub fn filled(steps: usize, value: T) -> Self {
        let rows = (0..=steps).map(|i| vec![value.clone(); i + 1]).collect();
        Self { rows }
    }
}

impl<T> TriangularGrid<T> {
    /// Wraps pre-built rows.
    ///
    /// # Panics
    ///
    /// Panics if row `i` does not hold exactly `i + 1` nodes or if there are
    /// no rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        match Self::try_from_rows(rows) {
            Ok(grid) => grid,
            Err(err) => panic!("{}", err),
        }
    }

    /// Wraps pre-built rows, rejecting anything that is not triangular.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::EmptyGrid`] when `rows` is empty
    /// - [`LatticeError::MalformedGrid`] when row `i` does not hold `i + 1` nodes
    pub fn try_from_rows(rows: Vec<Vec<T>>) -> Result<Self, LatticeError> {
        if rows.is_empty() {
            return Err(LatticeError::EmptyGrid);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(i, len)| len != i + 1)
        {
            return Err(LatticeError::MalformedGrid {
                row,
                expected: row + 1,
                found,
            });
        }
        Ok(Self { rows })
    }

    /// Number of steps `N` (the grid has `N + 1` rows).
    #[inline]
    pub fn steps(&self) -> usize {
        self.rows.len() - 1
    }

    /// Total number of nodes, `(N + 1)(N + 2) / 2`.
    #[inline]
    pub fn node_count(&self) -> usize {
        let n = self.rows.len();
        n * (n + 1) / 2
    }

    /// Node `(i, j)`, or `None` outside the triangle.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        self.rows.get(i).and_then(|row| row.get(j))
    }

    /// Row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i > steps()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.rows[i]
    }

    /// Mutable row `i`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.rows[i]
    }

    /// Rows from step `0` to step `N`.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for TriangularGrid<T> {
    type Error = LatticeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(rows)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TriangularGrid<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.rows, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for TriangularGrid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = <Vec<Vec<T>> as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from_rows(rows).map_err(serde::de::Error::custom)
    }
}

impl<T> Index<(usize, usize)> for TriangularGrid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.rows[i][j]
    }
}

impl<T> IndexMut<(usize, usize)> for TriangularGrid<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.rows[i][j]
    }
}
