//! # Error Types for the Jolly VM data model

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JollyError {
    #[error("Memory access out of range: address {address:#08x}")]
    OutOfRange { address: u64 },

    #[error("Value {value:#x} does not fit in an address (max {max:#08x})")]
    ValueOutOfRange { value: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, JollyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JollyError::OutOfRange { address: 0x1000008 };
        assert_eq!(err.to_string(), "Memory access out of range: address 0x1000008");

        let err = JollyError::ValueOutOfRange {
            value: 0x1000000,
            max: 0xFFFFFF,
        };
        assert_eq!(
            err.to_string(),
            "Value 0x1000000 does not fit in an address (max 0xffffff)"
        );
    }

    #[test]
    fn test_out_of_range_small_address_is_padded() {
        let err = JollyError::OutOfRange { address: 0x2a };
        assert_eq!(err.to_string(), "Memory access out of range: address 0x00002a");
    }
}
