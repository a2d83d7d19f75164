pub mod distance;
pub mod loader;
pub mod matrix;
pub mod types;

pub use self::distance::DistanceModel;
pub use self::matrix::EdgeMatrix;
pub use self::types::{EdgeWeightFormat, EdgeWeightType, Node, ProblemType, WeightRounding};

use crate::error::{TfResult, TourForgeError};
use std::io::BufRead;
use std::path::Path;

/// A loaded TSPLIB problem. Read-only once built; the optimizer only borrows it.
#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    pub comment: String,
    pub dimension: usize,
    pub problem_type: ProblemType,
    pub edge_weight_type: EdgeWeightType,
    pub edge_weight_format: EdgeWeightFormat,
    pub model: DistanceModel,
    pub nodes: Vec<Node>,
    pub weight_rounding: WeightRounding,

    // Metadata sections, parsed but unused by the solver.
    pub capacity: Option<i64>,
    pub demands: Vec<(usize, i64)>,
    pub depots: Vec<usize>,
    pub fixed_edges: Vec<(usize, usize)>,
}

impl Instance {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        loader::load_from_file(path)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> TfResult<Self> {
        loader::parse(reader)
    }

    /// Coordinate-based instance with the given formula.
    pub fn from_nodes(name: &str, kind: EdgeWeightType, nodes: Vec<Node>) -> Self {
        Self {
            name: name.to_string(),
            dimension: nodes.len(),
            problem_type: ProblemType::Tsp,
            edge_weight_type: kind,
            edge_weight_format: EdgeWeightFormat::Function,
            model: DistanceModel::Formula(kind),
            nodes,
            ..Self::empty()
        }
    }

    /// Explicit-matrix instance with placeholder nodes.
    pub fn from_matrix(name: &str, matrix: EdgeMatrix) -> Self {
        let dimension = matrix.dimension();
        let problem_type = if matrix.is_symmetric() {
            ProblemType::Tsp
        } else {
            ProblemType::Atsp
        };
        Self {
            name: name.to_string(),
            dimension,
            problem_type,
            edge_weight_type: EdgeWeightType::Explicit,
            edge_weight_format: EdgeWeightFormat::FullMatrix,
            model: DistanceModel::Explicit(matrix),
            nodes: (1..=dimension).map(Node::origin).collect(),
            ..Self::empty()
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            name: String::new(),
            comment: String::new(),
            dimension: 0,
            problem_type: ProblemType::Unknown,
            edge_weight_type: EdgeWeightType::Unknown,
            edge_weight_format: EdgeWeightFormat::Unknown,
            model: DistanceModel::Formula(EdgeWeightType::Unknown),
            nodes: Vec::new(),
            weight_rounding: WeightRounding::Raw,
            capacity: None,
            demands: Vec::new(),
            depots: Vec::new(),
            fixed_edges: Vec::new(),
        }
    }

    pub fn with_rounding(mut self, rounding: WeightRounding) -> Self {
        self.weight_rounding = rounding;
        self
    }

    /// Cost of the edge `i -> j`. Zero on the diagonal, whatever the matrix stores.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> TfResult<f64> {
        if i >= self.dimension || j >= self.dimension {
            return Err(TourForgeError::Index {
                i,
                j,
                dimension: self.dimension,
            });
        }
        if i == j {
            return Ok(0.0);
        }
        self.model.between(&self.nodes, i, j, self.weight_rounding)
    }

    /// Full cyclic cost of `tour`, including the closing edge.
    pub fn tour_cost(&self, tour: &[usize]) -> TfResult<f64> {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return Ok(0.0);
        };
        let mut cost = 0.0;
        for pair in tour.windows(2) {
            cost += self.distance(pair[0], pair[1])?;
        }
        cost += self.distance(last, first)?;
        Ok(cost)
    }

    pub fn is_symmetric(&self) -> bool {
        match &self.model {
            DistanceModel::Explicit(m) => m.is_symmetric(),
            DistanceModel::Formula(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Instance {
        Instance::from_nodes(
            "square",
            EdgeWeightType::Euc2d,
            vec![
                Node::new(1, 0.0, 0.0),
                Node::new(2, 0.0, 1.0),
                Node::new(3, 1.0, 1.0),
                Node::new(4, 1.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_tour_cost_includes_return_edge() {
        let inst = square();
        assert!((inst.tour_cost(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-12);
        assert!((inst.tour_cost(&[0, 2, 1, 3]).unwrap() - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_distance_index_checks() {
        let inst = square();
        assert!(matches!(
            inst.distance(0, 4),
            Err(TourForgeError::Index { i: 0, j: 4, dimension: 4 })
        ));
        assert_eq!(inst.distance(2, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_diagonal_overrides_matrix() {
        let m = EdgeMatrix::from_rows(&[vec![9, 2], vec![3, 9]]).unwrap();
        let inst = Instance::from_matrix("m", m);
        assert_eq!(inst.distance(0, 0).unwrap(), 0.0);
        assert_eq!(inst.distance(0, 1).unwrap(), 2.0);
        assert_eq!(inst.distance(1, 0).unwrap(), 3.0);
        assert_eq!(inst.problem_type, ProblemType::Atsp);
    }

    #[test]
    fn test_empty_tour_costs_nothing() {
        assert_eq!(square().tour_cost(&[]).unwrap(), 0.0);
    }
}
