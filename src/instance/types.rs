use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A single point from NODE_COORD_SECTION.
/// `id` is the TSPLIB (1-based) identifier; the node's index in
/// `Instance::nodes` is what the solver works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y, z: 0.0 }
    }

    /// Placeholder used when distances come from an explicit matrix.
    pub fn origin(id: usize) -> Self {
        Self::new(id, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Default)]
pub enum ProblemType {
    #[strum(to_string = "TSP")]
    Tsp,
    #[strum(to_string = "ATSP")]
    Atsp,
    #[strum(to_string = "HCP")]
    Hcp,
    #[strum(to_string = "SOP")]
    Sop,
    #[strum(to_string = "CVRP")]
    Cvrp,
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Default)]
pub enum EdgeWeightType {
    #[strum(to_string = "EXPLICIT")]
    Explicit,
    #[strum(to_string = "EUC_2D")]
    Euc2d,
    #[strum(to_string = "EUC_3D")]
    Euc3d,
    #[strum(to_string = "MAX_2D")]
    Max2d,
    #[strum(to_string = "MAX_3D")]
    Max3d,
    #[strum(to_string = "MAN_2D")]
    Man2d,
    #[strum(to_string = "MAN_3D")]
    Man3d,
    #[strum(to_string = "CEIL_2D")]
    Ceil2d,
    #[strum(to_string = "GEO")]
    Geo,
    #[strum(to_string = "ATT")]
    Att,
    #[strum(to_string = "XRAY1")]
    Xray1,
    #[strum(to_string = "XRAY2")]
    Xray2,
    #[strum(to_string = "SPECIAL")]
    Special,
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Default)]
pub enum EdgeWeightFormat {
    #[strum(to_string = "FUNCTION")]
    Function,
    #[strum(to_string = "FULL_MATRIX")]
    FullMatrix,
    #[strum(to_string = "UPPER_ROW")]
    UpperRow,
    #[strum(to_string = "LOWER_ROW")]
    LowerRow,
    #[strum(to_string = "UPPER_DIAG_ROW")]
    UpperDiagRow,
    #[strum(to_string = "LOWER_DIAG_ROW")]
    LowerDiagRow,
    #[strum(to_string = "UPPER_COL")]
    UpperCol,
    #[strum(to_string = "LOWER_COL")]
    LowerCol,
    #[strum(to_string = "UPPER_DIAG_COL")]
    UpperDiagCol,
    #[strum(to_string = "LOWER_DIAG_COL")]
    LowerDiagCol,
    #[default]
    #[strum(to_string = "UNKNOWN")]
    Unknown,
}

/// How formula distances are turned into edge weights at query time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum WeightRounding {
    /// Floating point distances, exactly as the formulas produce them.
    #[default]
    Raw,
    /// TSPLIB integer convention: nearest integer for EUC/MAN, truncation for GEO.
    Tsplib,
}

/// Parses a header value, leaving unrecognized spellings at `Default` (UNKNOWN).
pub(crate) fn parse_or_unknown<T>(value: &str) -> T
where
    T: std::str::FromStr + Default,
{
    value.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keywords_round_trip_through_display() {
        for t in EdgeWeightType::iter() {
            assert_eq!(parse_or_unknown::<EdgeWeightType>(&t.to_string()), t);
        }
        for f in EdgeWeightFormat::iter() {
            assert_eq!(parse_or_unknown::<EdgeWeightFormat>(&f.to_string()), f);
        }
    }

    #[test]
    fn test_unrecognized_values_are_unknown() {
        assert_eq!(parse_or_unknown::<ProblemType>("TOUR"), ProblemType::Unknown);
        assert_eq!(
            parse_or_unknown::<EdgeWeightType>("GEOM"),
            EdgeWeightType::Unknown
        );
        assert_eq!(
            parse_or_unknown::<EdgeWeightFormat>("EDGE_LIST"),
            EdgeWeightFormat::Unknown
        );
    }
}
