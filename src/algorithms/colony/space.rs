use crate::{core::Error, DMatrix, DVector, Float};
use serde::{Deserialize, Serialize};

/// The enumerated grid of candidate vectors the colony walks over.
///
/// Each row is one vertex of the search graph; the row count is the product of the axis domain
/// lengths. An axis shorter than the row count cycles through its values via modulo indexing.
/// Built once, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchSpace {
    grid: DMatrix<Float>,
}

impl SearchSpace {
    /// Expand an ordered list of finite discrete axis domains into the vertex grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the axis list is empty or any axis is empty.
    pub fn build<E>(axes: &[Vec<Float>]) -> Result<Self, Error<E>> {
        if axes.is_empty() {
            return Err(Error::configuration("no axis domains given"));
        }
        if let Some(d) = axes.iter().position(Vec::is_empty) {
            return Err(Error::configuration(format!("axis {d} is empty")));
        }
        let rows = axes.iter().map(Vec::len).product();
        let grid = DMatrix::from_fn(rows, axes.len(), |r, d| axes[d][r % axes[d].len()]);
        Ok(Self { grid })
    }

    /// The number of vertices in the space.
    pub fn n_vertices(&self) -> usize {
        self.grid.nrows()
    }

    /// The dimensionality of each candidate vector.
    pub fn dimension(&self) -> usize {
        self.grid.ncols()
    }

    /// The candidate vector at the given vertex index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn vertex(&self, index: usize) -> DVector<Float> {
        self.grid.row(index).transpose()
    }
}
