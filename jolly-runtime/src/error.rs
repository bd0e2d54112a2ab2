//! Runtime error types

use jolly_spec::JollyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Memory error: {0}")]
    SpecError(#[from] JollyError),

    #[error("Image too large: {size} bytes (memory holds {max})")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Machine stopped at pc {pc:#08x}")]
    Stopped { pc: u32 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
