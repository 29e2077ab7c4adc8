//! Runtime error types
//!
//! Every emulator-time failure is a distinct outcome; a faulting program
//! never silently produces wrong results.

use leg_spec::SpecError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Program error: {0}")]
    Program(#[from] SpecError),

    #[error("Call stack underflow: RET at PC {pc}")]
    StackUnderflow { pc: u8 },

    #[error("Division by zero at PC {pc}")]
    DivisionByZero { pc: u8 },

    #[error("RAM read out of bounds: address {address} (RAM is {len} bytes)")]
    RamOutOfBounds { address: u8, len: usize },

    #[error("Cycle limit exceeded: {limit}")]
    CycleLimitExceeded { limit: u64 },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuntimeError::StackUnderflow { pc: 20 };
        assert_eq!(err.to_string(), "Call stack underflow: RET at PC 20");

        let err = RuntimeError::CycleLimitExceeded { limit: 1000 };
        assert_eq!(err.to_string(), "Cycle limit exceeded: 1000");
    }

    #[test]
    fn test_spec_error_conversion() {
        let err: RuntimeError = SpecError::PromOutOfRange { address: 4, len: 4 }.into();
        assert!(err.to_string().contains("PROM read out of range"));
    }
}
