//! Mnemonic table: the authoritative mapping from assembly mnemonics to
//! base opcode bytes and operand shapes.

use crate::opcode::{self, AluOp, Condition};

/// Operand shape of a mnemonic, driving how many tokens the assembler
/// expects and which argument bytes they land in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandMode {
    /// No operands (RET, HALT).
    None,
    /// `src_a src_b dest`; either source may be a register or an immediate.
    Alu,
    /// `src_a src_b label`; the target must resolve to a label address.
    Compare,
    /// A single label target.
    Call,
    /// A single operand: the value to store. The destination is implied by
    /// the address register.
    Save,
    /// A single destination register; the source address is implied.
    Load,
    /// `src dest`; encodes as OR with the right operand forced to an
    /// immediate zero.
    Move,
}

/// A mnemonic's base opcode byte plus its operand shape. The assembler ORs
/// immediate bits into `base` as operands resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpSpec {
    pub base: u8,
    pub mode: OperandMode,
}

impl OpSpec {
    const fn new(base: u8, mode: OperandMode) -> Self {
        OpSpec { base, mode }
    }

    /// Look up a mnemonic, case-insensitively. `None` for unknown tokens.
    pub fn for_mnemonic(mnemonic: &str) -> Option<Self> {
        let upper = mnemonic.to_ascii_uppercase();
        let spec = match upper.as_str() {
            "OR" => Self::new(AluOp::Or.selector(), OperandMode::Alu),
            "AND" => Self::new(AluOp::And.selector(), OperandMode::Alu),
            "ADD" => Self::new(AluOp::Add.selector(), OperandMode::Alu),
            "SUB" => Self::new(AluOp::Sub.selector(), OperandMode::Alu),
            "NOT" => Self::new(AluOp::Not.selector(), OperandMode::Alu),
            "XOR" => Self::new(AluOp::Xor.selector(), OperandMode::Alu),
            "MULTH" => Self::new(AluOp::MultHigh.selector(), OperandMode::Alu),
            "MULTL" => Self::new(AluOp::MultLow.selector(), OperandMode::Alu),
            "LSHIFT" => Self::new(AluOp::LShift.selector(), OperandMode::Alu),
            "RSHIFT" => Self::new(AluOp::RShift.selector(), OperandMode::Alu),
            "LROT" => Self::new(AluOp::LRot.selector(), OperandMode::Alu),
            "RROT" => Self::new(AluOp::RRot.selector(), OperandMode::Alu),
            "MOD" => Self::new(AluOp::Mod.selector(), OperandMode::Alu),
            "DIV" => Self::new(AluOp::Div.selector(), OperandMode::Alu),

            "MOV" => Self::new(AluOp::Or.selector(), OperandMode::Move),

            "BE" => Self::branch(Condition::Eq),
            "BN" => Self::branch(Condition::Ne),
            "BL" => Self::branch(Condition::Lt),
            "BLE" => Self::branch(Condition::Le),
            "BG" => Self::branch(Condition::Gt),
            "BGE" => Self::branch(Condition::Ge),

            // Unconditional jump: branch-equal with both operands register 0.
            "JUMP" => Self::new(opcode::FLOW_CLASS, OperandMode::Call),
            "CALL" => Self::new(opcode::CALL_OPCODE, OperandMode::Call),
            "RET" => Self::new(opcode::RET_OPCODE, OperandMode::None),

            "SAVE" => Self::new(opcode::MEM_WRITE, OperandMode::Save),
            "LOAD" => Self::new(opcode::MEM_READ, OperandMode::Load),
            "PROM" => Self::new(opcode::MEM_READ | opcode::PROM_SELECT, OperandMode::Load),

            "HALT" => Self::new(opcode::HALT_OPCODE, OperandMode::None),

            _ => return None,
        };
        Some(spec)
    }

    const fn branch(condition: Condition) -> Self {
        Self::new(
            opcode::FLOW_CLASS | condition.selector(),
            OperandMode::Compare,
        )
    }
}
