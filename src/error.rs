use thiserror::Error;

#[derive(Debug, Error)]
pub enum UdemyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status: {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not valid json: {0}")]
    Json(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("division by zero computing {0}")]
    DivisionByZero(&'static str),

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup failures. The binary reports these on stdout and exits with 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing token, please set environment variable: {0}")]
    MissingToken(&'static str),

    #[error("Missing statement, please set environment variable: {0}")]
    MissingStatement(&'static str),

    #[error("invalid page size {value:?} in {var}: expected a positive integer")]
    InvalidPageSize { var: &'static str, value: String },

    #[error("invalid timeout {value:?} in {var}: expected a positive number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}
