use super::types::EdgeWeightFormat;
use crate::error::{TfResult, TourForgeError};

/// Full N×N edge-weight matrix, flattened row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMatrix {
    dimension: usize,
    weights: Vec<i64>,
}

impl EdgeMatrix {
    pub fn zeros(dimension: usize) -> TfResult<Self> {
        let len = dimension.checked_mul(dimension).ok_or_else(|| too_large(dimension))?;
        Ok(Self {
            dimension,
            weights: vec![0; len],
        })
    }

    /// Builds a matrix from nested rows. Rows must be square.
    pub fn from_rows(rows: &[Vec<i64>]) -> TfResult<Self> {
        let n = rows.len();
        let mut m = Self::zeros(n)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(TourForgeError::InvalidArgument(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            m.weights[i * n..(i + 1) * n].copy_from_slice(row);
        }
        Ok(m)
    }

    #[inline(always)]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.weights[i * self.dimension + j]
    }

    #[inline(always)]
    fn set_symmetric(&mut self, i: usize, j: usize, value: i64) {
        let n = self.dimension;
        self.weights[i * n + j] = value;
        self.weights[j * n + i] = value;
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.dimension;
        (0..n).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn row(&self, i: usize) -> &[i64] {
        let n = self.dimension;
        &self.weights[i * n..(i + 1) * n]
    }
}

fn too_large(dimension: usize) -> TourForgeError {
    TourForgeError::InvalidArgument(format!("dimension {} is too large for a weight matrix", dimension))
}

/// Number of values an EDGE_WEIGHT_SECTION holds for `format` at `dimension`.
/// FUNCTION and UNKNOWN do not describe a matrix layout.
pub fn required_len(format: EdgeWeightFormat, dimension: usize) -> TfResult<usize> {
    let n = dimension;
    let len = match format {
        EdgeWeightFormat::FullMatrix => n.checked_mul(n),
        EdgeWeightFormat::LowerRow
        | EdgeWeightFormat::UpperRow
        | EdgeWeightFormat::LowerCol
        | EdgeWeightFormat::UpperCol => n.checked_mul(n.saturating_sub(1)).map(|v| v / 2),
        EdgeWeightFormat::LowerDiagRow
        | EdgeWeightFormat::UpperDiagRow
        | EdgeWeightFormat::LowerDiagCol
        | EdgeWeightFormat::UpperDiagCol => n
            .checked_add(1)
            .and_then(|m| n.checked_mul(m))
            .map(|v| v / 2),
        EdgeWeightFormat::Function | EdgeWeightFormat::Unknown => {
            return Err(TourForgeError::UnsupportedFormat(format))
        }
    };
    len.ok_or_else(|| too_large(n))
}

/// Expands a compact on-disk layout into a full matrix.
///
/// Triangular row layouts are mirrored so the result is symmetric; FULL_MATRIX
/// is taken as-is (row-major) and may be asymmetric. Column layouts are
/// recognized by the grammar but not expanded.
pub fn expand(format: EdgeWeightFormat, dimension: usize, values: &[i64]) -> TfResult<EdgeMatrix> {
    let expected = required_len(format, dimension)?;
    if values.len() < expected {
        return Err(TourForgeError::InvalidArgument(format!(
            "{} needs {} weights for dimension {}, got {}",
            format,
            expected,
            dimension,
            values.len()
        )));
    }

    let n = dimension;
    let mut full = EdgeMatrix::zeros(n)?;
    let mut next = values.iter().copied();
    // `values` holds at least `expected` entries, so `next` never runs dry below.
    let mut take = || next.next().unwrap_or_default();

    match format {
        EdgeWeightFormat::FullMatrix => {
            full.weights.copy_from_slice(&values[..expected]);
        }
        EdgeWeightFormat::LowerRow => {
            for i in 1..n {
                for j in 0..i {
                    full.set_symmetric(i, j, take());
                }
            }
        }
        EdgeWeightFormat::UpperRow => {
            for i in 0..n {
                for j in (i + 1)..n {
                    full.set_symmetric(i, j, take());
                }
            }
        }
        EdgeWeightFormat::LowerDiagRow => {
            for i in 0..n {
                for j in 0..=i {
                    full.set_symmetric(i, j, take());
                }
            }
        }
        EdgeWeightFormat::UpperDiagRow => {
            for i in 0..n {
                for j in i..n {
                    full.set_symmetric(i, j, take());
                }
            }
        }
        other => return Err(TourForgeError::UnsupportedFormat(other)),
    }

    Ok(full)
}
