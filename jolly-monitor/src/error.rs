//! Monitor error types

use jolly_runtime::RuntimeError;
use jolly_spec::JollyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Memory error: {0}")]
    SpecError(#[from] JollyError),

    #[error("Runtime error: {0}")]
    RuntimeError(#[from] RuntimeError),

    #[error("No macro named {0:?}")]
    UnknownMacro(String),

    #[error("No label named {0:?}")]
    UnknownLabel(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error("Invalid label file at line {line}: {reason}")]
    InvalidLabelFile { line: usize, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MonitorError {
    pub fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        MonitorError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
