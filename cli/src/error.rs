//! CLI-level errors (wraps binding errors)

use thiserror::Error;

use candlepin_core::CandlepinError;

/// Exit status for every failure the CLI reports itself.
pub const FAILURE: i32 = 1;

/// Top-level error type; what gets shown to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Api(#[from] CandlepinError),

    /// Flag parsing failed, or `--help` was requested.
    #[error("{0}")]
    Args(#[from] clap::Error),

    /// Flags parsed but their combination is not allowed.
    #[error("{0}")]
    InvalidArgs(String),

    /// No registered command matched; carries the rendered usage table.
    #[error("{0}")]
    Usage(String),

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Args(e) => e.exit_code(),
            _ => FAILURE,
        }
    }
}
