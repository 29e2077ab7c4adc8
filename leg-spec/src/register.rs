//! Register file naming for the LEG architecture.
//!
//! Seven slots are actually stored. Index 5 doubles as the address register
//! for LOAD/SAVE/PROM instructions, index 6 is the program counter, and
//! index 7 is not a slot at all: it is intercepted as the memory-mapped
//! I/O port.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of stored register slots. The I/O port (index 7) is not one.
pub const NUM_REGISTERS: usize = 7;

/// Register (or I/O port) index as it appears in an operand byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    /// Address register: selects the RAM/PROM cell for memory instructions.
    Addr = 5,
    /// Program counter, in bytes; a multiple of 4 while executing code.
    Pc = 6,
    /// Memory-mapped I/O port. Reads block for input, writes emit output.
    Io = 7,
}

impl Register {
    /// Resolve an operand token against the fixed register-name table.
    ///
    /// Accepts `R0`-`R4`, `ADDR` (alias `R5`), `PC`, and `IO`,
    /// case-insensitively. Anything else is not a register name.
    pub fn from_name(name: &str) -> Option<Self> {
        let matches = |other: &str| name.eq_ignore_ascii_case(other);
        if matches("R0") {
            Some(Register::R0)
        } else if matches("R1") {
            Some(Register::R1)
        } else if matches("R2") {
            Some(Register::R2)
        } else if matches("R3") {
            Some(Register::R3)
        } else if matches("R4") {
            Some(Register::R4)
        } else if matches("ADDR") || matches("R5") {
            Some(Register::Addr)
        } else if matches("PC") {
            Some(Register::Pc)
        } else if matches("IO") {
            Some(Register::Io)
        } else {
            None
        }
    }

    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Register::R0),
            1 => Some(Register::R1),
            2 => Some(Register::R2),
            3 => Some(Register::R3),
            4 => Some(Register::R4),
            5 => Some(Register::Addr),
            6 => Some(Register::Pc),
            7 => Some(Register::Io),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_io(self) -> bool {
        self == Register::Io
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::R0 => "R0",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
            Register::R4 => "R4",
            Register::Addr => "ADDR",
            Register::Pc => "PC",
            Register::Io => "IO",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
