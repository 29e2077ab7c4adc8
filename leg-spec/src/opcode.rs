//! # LEG Opcode Layout
//!
//! A single opcode byte simultaneously encodes the operation, the
//! addressing mode of both operands, and the control-flow class:
//!
//! ```text
//! bit 7   left operand is an immediate literal
//! bit 6   right operand is an immediate literal
//! bit 5   compare/branch class; bits 2:0 select the comparator (0-5),
//!         value 6 is CALL, value 7 is RET
//! bit 4,3 both set: memory read through the address register
//!         (bit 0 clear = RAM, set = PROM); bit 4 alone: SAVE
//! bit 3:0 ALU selector 0-13 when bits 5 and 4 are clear
//! 0xFF    HALT
//! ```
//!
//! The assembler sets these bits and the emulator interprets them; both
//! sides go through this module so they cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SpecError;

/// Left operand is an immediate literal rather than a register/IO index.
pub const IMM_LEFT: u8 = 0b1000_0000;

/// Right operand is an immediate literal.
pub const IMM_RIGHT: u8 = 0b0100_0000;

/// Compare/branch class bit. Covers the six comparators plus CALL and RET.
pub const FLOW_CLASS: u8 = 0b0010_0000;

/// Both bits set: memory read (RAM or PROM) through the address register.
pub const MEM_READ: u8 = 0b0001_1000;

/// Bit 4 alone (pattern `00010xxx`): SAVE through the address register.
pub const MEM_WRITE: u8 = 0b0001_0000;

/// Within the memory-read family, selects PROM over RAM.
pub const PROM_SELECT: u8 = 0b0000_0001;

/// CALL base opcode.
pub const CALL_OPCODE: u8 = 0b0010_0110;

/// RET base opcode.
pub const RET_OPCODE: u8 = 0b0010_0111;

/// HALT: every bit set.
pub const HALT_OPCODE: u8 = 0xFF;

/// Whether `byte` completely fills `mask`.
#[inline]
fn fills(byte: u8, mask: u8) -> bool {
    byte & mask == mask
}

/// ALU operation, selected by the low nibble of a non-flow opcode byte.
///
/// Every result is masked to 8 bits.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Or = 0,
    And = 1,
    Add = 2,
    Sub = 3,
    /// Unary complement of the left operand; the right operand is ignored.
    Not = 4,
    Xor = 5,
    /// High byte of the 16-bit product.
    MultHigh = 6,
    /// Low byte of the 16-bit product.
    MultLow = 7,
    LShift = 8,
    RShift = 9,
    LRot = 10,
    RRot = 11,
    Mod = 12,
    Div = 13,
}

impl AluOp {
    /// Number of defined ALU operations. Selectors 14 and 15 are invalid.
    pub const COUNT: usize = 14;

    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => Some(AluOp::Or),
            1 => Some(AluOp::And),
            2 => Some(AluOp::Add),
            3 => Some(AluOp::Sub),
            4 => Some(AluOp::Not),
            5 => Some(AluOp::Xor),
            6 => Some(AluOp::MultHigh),
            7 => Some(AluOp::MultLow),
            8 => Some(AluOp::LShift),
            9 => Some(AluOp::RShift),
            10 => Some(AluOp::LRot),
            11 => Some(AluOp::RRot),
            12 => Some(AluOp::Mod),
            13 => Some(AluOp::Div),
            _ => None,
        }
    }

    #[inline]
    pub const fn selector(self) -> u8 {
        self as u8
    }

    /// Evaluate the operation. `None` only for MOD/DIV with a zero divisor.
    ///
    /// Shifts of 8 or more produce 0; rotates take the count modulo 8.
    pub fn apply(self, left: u8, right: u8) -> Option<u8> {
        let result = match self {
            AluOp::Or => left | right,
            AluOp::And => left & right,
            AluOp::Add => left.wrapping_add(right),
            AluOp::Sub => left.wrapping_sub(right),
            AluOp::Not => !left,
            AluOp::Xor => left ^ right,
            AluOp::MultHigh => ((u16::from(left) * u16::from(right)) >> 8) as u8,
            AluOp::MultLow => (u16::from(left) * u16::from(right)) as u8,
            AluOp::LShift => {
                if right >= 8 {
                    0
                } else {
                    left << right
                }
            }
            AluOp::RShift => {
                if right >= 8 {
                    0
                } else {
                    left >> right
                }
            }
            AluOp::LRot => left.rotate_left(u32::from(right) % 8),
            AluOp::RRot => left.rotate_right(u32::from(right) % 8),
            AluOp::Mod => {
                if right == 0 {
                    return None;
                }
                left % right
            }
            AluOp::Div => {
                if right == 0 {
                    return None;
                }
                left / right
            }
        };
        Some(result)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AluOp::Or => "OR",
            AluOp::And => "AND",
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::Not => "NOT",
            AluOp::Xor => "XOR",
            AluOp::MultHigh => "MULTH",
            AluOp::MultLow => "MULTL",
            AluOp::LShift => "LSHIFT",
            AluOp::RShift => "RSHIFT",
            AluOp::LRot => "LROT",
            AluOp::RRot => "RROT",
            AluOp::Mod => "MOD",
            AluOp::Div => "DIV",
        };
        write!(f, "{}", name)
    }
}

/// Branch comparator, selected by the low 3 bits of a branch opcode.
/// Comparison is unsigned 8-bit.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Eq = 0,
    Ne = 1,
    Lt = 2,
    Le = 3,
    Gt = 4,
    Ge = 5,
}

impl Condition {
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => Some(Condition::Eq),
            1 => Some(Condition::Ne),
            2 => Some(Condition::Lt),
            3 => Some(Condition::Le),
            4 => Some(Condition::Gt),
            5 => Some(Condition::Ge),
            _ => None,
        }
    }

    #[inline]
    pub const fn selector(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn holds(self, left: u8, right: u8) -> bool {
        match self {
            Condition::Eq => left == right,
            Condition::Ne => left != right,
            Condition::Lt => left < right,
            Condition::Le => left <= right,
            Condition::Gt => left > right,
            Condition::Ge => left >= right,
        }
    }
}

/// Instruction class, decoded once per fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpClass {
    /// Terminal state; operand bytes are ignored.
    Halt,
    /// ALU evaluation with write-back to the third operand.
    Alu(AluOp),
    /// Compare and jump to the absolute address in the third operand.
    Branch(Condition),
    /// Push the return address and jump to the third operand.
    Call,
    /// Pop the call stack into the program counter.
    Ret,
    /// Store the ALU result to RAM at the address register; no write-back.
    Save,
    /// Read RAM at the address register into the third operand.
    Load,
    /// Read PROM at the address register into the third operand.
    PromRead,
}

/// An opcode byte pulled apart into its class and addressing-mode bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedOpcode {
    pub class: OpClass,
    pub imm_left: bool,
    pub imm_right: bool,
}

impl DecodedOpcode {
    /// Decode one opcode byte.
    ///
    /// An ALU selector of 14 or 15 has no defined operation and fails with
    /// `InvalidOpcode` instead of falling through to a silent default.
    pub fn from_byte(byte: u8) -> Result<Self, SpecError> {
        let imm_left = fills(byte, IMM_LEFT);
        let imm_right = fills(byte, IMM_RIGHT);

        let class = if byte == HALT_OPCODE {
            OpClass::Halt
        } else if fills(byte, FLOW_CLASS) {
            match byte & 0b0000_0111 {
                0 => OpClass::Branch(Condition::Eq),
                1 => OpClass::Branch(Condition::Ne),
                2 => OpClass::Branch(Condition::Lt),
                3 => OpClass::Branch(Condition::Le),
                4 => OpClass::Branch(Condition::Gt),
                5 => OpClass::Branch(Condition::Ge),
                6 => OpClass::Call,
                _ => OpClass::Ret,
            }
        } else if fills(byte, MEM_READ) {
            if fills(byte, PROM_SELECT) {
                OpClass::PromRead
            } else {
                OpClass::Load
            }
        } else if fills(byte, MEM_WRITE) {
            OpClass::Save
        } else {
            let op = AluOp::from_selector(byte & 0b0000_1111)
                .ok_or(SpecError::InvalidOpcode(byte))?;
            OpClass::Alu(op)
        };

        Ok(DecodedOpcode {
            class,
            imm_left,
            imm_right,
        })
    }

    /// Whether the cycle writes the ALU result to the register/IO index in
    /// the third operand. Suppressed for branches, CALL/RET, and SAVE.
    #[inline]
    pub fn writes_back(&self) -> bool {
        matches!(
            self.class,
            OpClass::Alu(_) | OpClass::Load | OpClass::PromRead
        )
    }

    /// Whether the right operand is read at all. The memory-read family
    /// leaves it at zero so the pass-through shift is a no-op.
    #[inline]
    pub fn reads_right(&self) -> bool {
        !matches!(self.class, OpClass::Load | OpClass::PromRead)
    }
}
