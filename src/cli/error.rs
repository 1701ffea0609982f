//! Error types for CLI operations.

use crate::capability::CapabilityError;
use crate::engine::EngineError;
use crate::parser::ParseError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while assembling or running the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed command line.
    #[error("{0}")]
    ParseError(#[from] ParseError),

    /// Capability registration error.
    #[error("{0}")]
    CapabilityError(#[from] CapabilityError),

    /// An engine run failed.
    #[error("{0}")]
    EngineError(#[from] EngineError),
}

impl CliError {
    /// The process exit code this error maps to.
    ///
    /// Usage errors (malformed tokens, empty invocations) exit with 2;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ParseError(_) | Self::EngineError(EngineError::EmptyInvocation) => 2,
            _ => 1,
        }
    }
}
