//! # Error Types for the LEG Instruction Set

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("Invalid opcode byte: {0:#010b}")]
    InvalidOpcode(u8),

    #[error("PROM read out of range: address {address} (program is {len} bytes)")]
    PromOutOfRange { address: usize, len: usize },

    #[error("Invalid program byte {token:?} at line {line}")]
    InvalidProgramByte { line: usize, token: String },
}

pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::InvalidOpcode(0b0000_1110);
        assert_eq!(err.to_string(), "Invalid opcode byte: 0b00001110");

        let err = SpecError::PromOutOfRange {
            address: 300,
            len: 12,
        };
        assert_eq!(
            err.to_string(),
            "PROM read out of range: address 300 (program is 12 bytes)"
        );
    }
}
