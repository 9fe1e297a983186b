/**
* filename : error
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No data: {0}")]
    NoData(String),

    #[error("Insufficient history for {context}: need {required} observations, got {available}")]
    InsufficientHistory {
        context: String,
        required: usize,
        available: usize,
    },

    #[error("Degenerate computation: {0}")]
    DegenerateComputation(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl AnalysisError {
    pub fn insufficient(context: &str, required: usize, available: usize) -> Self {
        AnalysisError::InsufficientHistory {
            context: context.to_string(),
            required,
            available,
        }
    }
}
