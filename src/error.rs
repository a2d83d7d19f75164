use crate::instance::{EdgeWeightFormat, EdgeWeightType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse Error (line {line}): {message}")]
    Parse { line: usize, message: String },

    #[error("Unsupported EDGE_WEIGHT_FORMAT: {0}")]
    UnsupportedFormat(EdgeWeightFormat),

    #[error("Node index out of range: ({i}, {j}) for dimension {dimension}")]
    Index {
        i: usize,
        j: usize,
        dimension: usize,
    },

    #[error("Distance not implemented for EDGE_WEIGHT_TYPE {0}")]
    NotImplemented(EdgeWeightType),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type TfResult<T> = Result<T, TourForgeError>;

impl TourForgeError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
