use super::matrix::EdgeMatrix;
use super::types::{EdgeWeightType, Node, WeightRounding};
use crate::error::{TfResult, TourForgeError};

/// TSPLIB's truncated value of pi for GEO instances.
pub const TSPLIB_PI: f64 = 3.141592;
/// Earth radius (km) used by TSPLIB GEO distances.
pub const EARTH_RADIUS: f64 = 6378.388;

/// Source of edge costs for an instance.
#[derive(Debug, Clone)]
pub enum DistanceModel {
    Explicit(EdgeMatrix),
    /// Formula picked from the declared type when queried, not at load.
    Formula(EdgeWeightType),
}

impl DistanceModel {
    pub(crate) fn between(
        &self,
        nodes: &[Node],
        i: usize,
        j: usize,
        rounding: WeightRounding,
    ) -> TfResult<f64> {
        match self {
            DistanceModel::Explicit(matrix) => Ok(matrix.get(i, j) as f64),
            DistanceModel::Formula(kind) => {
                let (Some(a), Some(b)) = (nodes.get(i), nodes.get(j)) else {
                    return Err(TourForgeError::InvalidArgument(format!(
                        "no coordinates for node {} or {} ({} loaded)",
                        i + 1,
                        j + 1,
                        nodes.len()
                    )));
                };
                let raw = formula(*kind, a, b)?;
                Ok(match rounding {
                    WeightRounding::Raw => raw,
                    WeightRounding::Tsplib => tsplib_integer(*kind, raw),
                })
            }
        }
    }
}

/// Evaluates the closed-form distance for `kind`.
pub fn formula(kind: EdgeWeightType, a: &Node, b: &Node) -> TfResult<f64> {
    match kind {
        EdgeWeightType::Euc2d => Ok(euclidean_2d(a, b)),
        EdgeWeightType::Euc3d => Ok(euclidean_3d(a, b)),
        EdgeWeightType::Man2d => Ok(manhattan_2d(a, b)),
        EdgeWeightType::Man3d => Ok(manhattan_3d(a, b)),
        EdgeWeightType::Geo => Ok(geographical(a, b)),
        EdgeWeightType::Att => Ok(pseudo_euclidean(a, b)),
        other => Err(TourForgeError::NotImplemented(other)),
    }
}

#[inline(always)]
pub fn euclidean_2d(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[inline(always)]
pub fn euclidean_3d(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[inline(always)]
pub fn manhattan_2d(a: &Node, b: &Node) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[inline(always)]
pub fn manhattan_3d(a: &Node, b: &Node) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

/// Packed DDD.MM coordinate to radians.
#[inline(always)]
fn geo_radians(coord: f64) -> f64 {
    let deg = coord.round();
    let min = coord - deg;
    TSPLIB_PI * (deg + 5.0 * min / 3.0) / 180.0
}

/// Great-circle distance with the TSPLIB `+1.0` offset. Not truncated.
pub fn geographical(a: &Node, b: &Node) -> f64 {
    let lat1 = geo_radians(a.x);
    let lon1 = geo_radians(a.y);
    let lat2 = geo_radians(b.x);
    let lon2 = geo_radians(b.y);

    let q1 = (lon1 - lon2).cos();
    let q2 = (lat1 - lat2).cos();
    let q3 = (lat1 + lat2).cos();

    // Clamp guards acos against rounding just outside [-1, 1].
    let arg = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0);
    EARTH_RADIUS * arg.acos() + 1.0
}

/// ATT (pseudo-Euclidean) distance; always integral.
pub fn pseudo_euclidean(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    let t = r.round();
    if t < r {
        t + 1.0
    } else {
        t
    }
}

fn tsplib_integer(kind: EdgeWeightType, raw: f64) -> f64 {
    match kind {
        EdgeWeightType::Geo => raw.trunc(),
        _ => raw.round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pythagorean_triple() {
        let a = Node::new(1, 0.0, 0.0);
        let b = Node::new(2, 3.0, 4.0);
        assert_eq!(euclidean_2d(&a, &b), 5.0);
        assert_eq!(manhattan_2d(&a, &b), 7.0);
    }

    #[test]
    fn test_3d_uses_z() {
        let a = Node { id: 1, x: 0.0, y: 0.0, z: 0.0 };
        let b = Node { id: 2, x: 2.0, y: 3.0, z: 6.0 };
        assert_eq!(euclidean_3d(&a, &b), 7.0);
        assert_eq!(manhattan_3d(&a, &b), 11.0);
    }

    #[test]
    fn test_unimplemented_types() {
        let a = Node::origin(1);
        for kind in [
            EdgeWeightType::Max2d,
            EdgeWeightType::Ceil2d,
            EdgeWeightType::Xray1,
            EdgeWeightType::Special,
            EdgeWeightType::Unknown,
        ] {
            assert!(matches!(
                formula(kind, &a, &a),
                Err(TourForgeError::NotImplemented(k)) if k == kind
            ));
        }
    }

    #[test]
    fn test_tsplib_rounding_per_type() {
        assert_eq!(tsplib_integer(EdgeWeightType::Euc2d, 666.6), 667.0);
        assert_eq!(tsplib_integer(EdgeWeightType::Geo, 153.77), 153.0);
    }
}
