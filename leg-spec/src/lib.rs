//! # LEG Instruction Set
//!
//! The encoding contract for the LEG 8-bit architecture, shared by the
//! assembler and the emulator.
//!
//! ## Key Features
//! - 8-bit data width, 4-byte fixed-width instructions
//! - A single opcode byte carries the operation, both operand addressing
//!   modes, and the control-flow class
//! - 7 stored registers; index 5 addresses memory, index 6 is the program
//!   counter, index 7 is intercepted as the I/O port
//! - Harvard layout: read-only PROM for code, byte-addressable RAM for data
//! - 14 ALU operations, 6 branch comparators, CALL/RET with a call stack
//!
//! ## Example
//!
//! ```rust
//! use leg_spec::{AluOp, DecodedOpcode, OpClass};
//!
//! // ADD with an immediate right operand
//! let decoded = DecodedOpcode::from_byte(0b0100_0010).unwrap();
//! assert!(matches!(decoded.class, OpClass::Alu(AluOp::Add)));
//! assert!(decoded.imm_right);
//! assert!(!decoded.imm_left);
//! ```

pub mod error;
pub mod instruction;
pub mod mnemonic;
pub mod opcode;
pub mod program;
pub mod register;

pub use error::SpecError;
pub use instruction::Instruction;
pub use mnemonic::{OpSpec, OperandMode};
pub use opcode::{AluOp, Condition, DecodedOpcode, OpClass};
pub use opcode::{CALL_OPCODE, HALT_OPCODE, IMM_LEFT, IMM_RIGHT, RET_OPCODE};
pub use program::Program;
pub use register::{Register, NUM_REGISTERS};

/// Instruction width in bytes; instruction addresses are multiples of this.
pub const INSTRUCTION_BYTES: usize = 4;

/// Size of the addressable space in bytes. Addresses are a single byte, so
/// neither PROM nor RAM can usefully exceed this.
pub const ADDRESS_SPACE: usize = 256;
