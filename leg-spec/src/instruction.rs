//! The 4-byte instruction tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SpecError;
use crate::opcode::DecodedOpcode;

/// One fixed-width instruction: an opcode byte and three argument bytes.
///
/// Immutable once encoded; its byte offset in a program is a multiple of 4
/// for code assembled without interleaved data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: u8,
    pub arg0: u8,
    pub arg1: u8,
    pub arg2: u8,
}

impl Instruction {
    pub const fn new(opcode: u8, arg0: u8, arg1: u8, arg2: u8) -> Self {
        Instruction {
            opcode,
            arg0,
            arg1,
            arg2,
        }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Instruction::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.opcode, self.arg0, self.arg1, self.arg2]
    }

    /// Pull the opcode byte apart into its class and addressing-mode bits.
    #[inline]
    pub fn decode(&self) -> Result<DecodedOpcode, SpecError> {
        DecodedOpcode::from_byte(self.opcode)
    }
}

/// The assembler output format: four space-separated decimal integers.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.opcode, self.arg0, self.arg1, self.arg2)
    }
}
