use thiserror::Error;

/// Error type for the dive analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum AnalysisError {
    #[error("dive {index}: timestamp {time} does not advance on the next sample")]
    DegenerateTimestamp { index: u32, time: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type for parsing a TDR export.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ImportError {
    #[error("missing header: expected {expected} lines, found {found}")]
    MissingHeader { expected: u32, found: u32 },

    #[error("malformed row at line {line}, column {column}: {message}")]
    MalformedRow {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("invalid date or time at line {line}: {value}")]
    InvalidDate { line: u32, value: String },

    #[error("negative depth at line {line}: {depth}")]
    NegativeDepth { line: u32, depth: f64 },

    #[error("time does not increase at line {line}")]
    NonIncreasingTime { line: u32 },
}

/// Error type for loading an analysis configuration file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Json(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}
