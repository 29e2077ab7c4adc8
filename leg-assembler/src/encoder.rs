//! Instruction encoding (second pass)
//!
//! Turns one classified source line into its emitted bytes, using the
//! completed symbol table. Operand tokens resolve in a fixed precedence
//! order: register-name table, then symbol table, then numeric literal.
//! Any operand that is *not* a register name becomes an immediate, which
//! is the only thing that distinguishes a value from a register index at
//! decode time.

use leg_spec::{Instruction, OpSpec, OperandMode, Register, IMM_LEFT, IMM_RIGHT};

use crate::error::{AssemblerError, Result};
use crate::parser::{Operand, SourceLine};
use crate::symbols::SymbolTable;

/// Bytes emitted for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedLine {
    /// One 4-byte instruction.
    Instruction(Instruction),
    /// A literal transcription of a string or data line.
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Copy)]
struct ResolvedOperand {
    value: u8,
    immediate: bool,
}

fn resolve_operand(operand: &Operand, symbols: &SymbolTable) -> Result<ResolvedOperand> {
    match operand {
        Operand::Word(word) => {
            if let Some(register) = Register::from_name(word) {
                Ok(ResolvedOperand {
                    value: register.index() as u8,
                    immediate: false,
                })
            } else if let Some(value) = symbols.lookup(word) {
                Ok(ResolvedOperand {
                    value,
                    immediate: true,
                })
            } else {
                Err(AssemblerError::UnresolvedOperand(word.clone()))
            }
        }
        Operand::Literal(value) => {
            let value = u8::try_from(*value)
                .map_err(|_| AssemblerError::UnresolvedOperand(value.to_string()))?;
            Ok(ResolvedOperand {
                value,
                immediate: true,
            })
        }
    }
}

/// Branch and call targets are always label-relative; register names and
/// raw numerals are rejected here.
fn resolve_target(operand: &Operand, symbols: &SymbolTable) -> Result<u8> {
    match operand {
        Operand::Word(word) => symbols
            .lookup(word)
            .ok_or_else(|| AssemblerError::UndefinedLabel(word.clone())),
        Operand::Literal(value) => Err(AssemblerError::UndefinedLabel(value.to_string())),
    }
}

fn expect_operands(mnemonic: &str, operands: &[Operand], count: usize) -> Result<()> {
    if operands.len() == count {
        Ok(())
    } else {
        Err(AssemblerError::SyntaxError(format!(
            "{} expects {} operand(s), got {}",
            mnemonic.to_ascii_uppercase(),
            count,
            operands.len()
        )))
    }
}

/// Encode one line against the completed symbol table. Directives and
/// blank lines emit nothing.
pub fn encode_line(line: &SourceLine, symbols: &SymbolTable) -> Result<Option<EncodedLine>> {
    match line {
        SourceLine::Empty | SourceLine::Label(_) | SourceLine::Const { .. } => Ok(None),

        SourceLine::Text(text) => {
            // Wide characters were rejected at parse time.
            let bytes = text.chars().map(|c| c as u8).collect();
            Ok(Some(EncodedLine::Bytes(bytes)))
        }

        SourceLine::Data(items) => Ok(Some(EncodedLine::Bytes(items.clone()))),

        SourceLine::Code { mnemonic, operands } => {
            let spec = OpSpec::for_mnemonic(mnemonic)
                .ok_or_else(|| AssemblerError::UnknownInstruction(mnemonic.clone()))?;
            let instruction = encode_code(mnemonic, spec, operands, symbols)?;
            Ok(Some(EncodedLine::Instruction(instruction)))
        }
    }
}

fn encode_code(
    mnemonic: &str,
    spec: OpSpec,
    operands: &[Operand],
    symbols: &SymbolTable,
) -> Result<Instruction> {
    let mut opcode = spec.base;
    let (mut arg0, mut arg1, mut arg2) = (0u8, 0u8, 0u8);

    match spec.mode {
        OperandMode::None => {
            expect_operands(mnemonic, operands, 0)?;
        }

        OperandMode::Alu => {
            expect_operands(mnemonic, operands, 3)?;
            let left = resolve_operand(&operands[0], symbols)?;
            arg0 = left.value;
            if left.immediate {
                opcode |= IMM_LEFT;
            }
            let right = resolve_operand(&operands[1], symbols)?;
            arg1 = right.value;
            if right.immediate {
                opcode |= IMM_RIGHT;
            }
            arg2 = resolve_operand(&operands[2], symbols)?.value;
        }

        OperandMode::Compare => {
            expect_operands(mnemonic, operands, 3)?;
            let left = resolve_operand(&operands[0], symbols)?;
            arg0 = left.value;
            if left.immediate {
                opcode |= IMM_LEFT;
            }
            let right = resolve_operand(&operands[1], symbols)?;
            arg1 = right.value;
            if right.immediate {
                opcode |= IMM_RIGHT;
            }
            arg2 = resolve_target(&operands[2], symbols)?;
        }

        OperandMode::Call => {
            expect_operands(mnemonic, operands, 1)?;
            arg2 = resolve_target(&operands[0], symbols)?;
        }

        OperandMode::Save => {
            expect_operands(mnemonic, operands, 1)?;
            let value = resolve_operand(&operands[0], symbols)?;
            arg0 = value.value;
            if value.immediate {
                opcode |= IMM_LEFT;
            }
        }

        OperandMode::Load => {
            expect_operands(mnemonic, operands, 1)?;
            arg2 = resolve_operand(&operands[0], symbols)?.value;
        }

        OperandMode::Move => {
            expect_operands(mnemonic, operands, 2)?;
            let src = resolve_operand(&operands[0], symbols)?;
            arg0 = src.value;
            if src.immediate {
                opcode |= IMM_LEFT;
            }
            // The right operand is a forced immediate zero, so the OR
            // passes the source through untouched.
            opcode |= IMM_RIGHT;
            arg2 = resolve_operand(&operands[1], symbols)?.value;
        }
    }

    Ok(Instruction::new(opcode, arg0, arg1, arg2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn encode_str(line: &str, symbols: &SymbolTable) -> Result<Option<EncodedLine>> {
        encode_line(&parse_line(line).unwrap(), symbols)
    }

    fn instruction(line: &str, symbols: &SymbolTable) -> Instruction {
        match encode_str(line, symbols).unwrap() {
            Some(EncodedLine::Instruction(inst)) => inst,
            other => panic!("expected an instruction, got {other:?}"),
        }
    }

    #[test]
    fn test_immediate_bit_placement() {
        let symbols = SymbolTable::new();
        // Immediate on the right only.
        assert_eq!(
            instruction("ADD R0 5 R1", &symbols),
            Instruction::new(0b0100_0010, 0, 5, 1)
        );
        // The mirror image.
        assert_eq!(
            instruction("ADD 5 R0 R1", &symbols),
            Instruction::new(0b1000_0010, 5, 0, 1)
        );
        // Register-register leaves both bits clear.
        assert_eq!(
            instruction("ADD R2 R3 R4", &symbols),
            Instruction::new(0b0000_0010, 2, 3, 4)
        );
    }

    #[test]
    fn test_constants_encode_as_immediates() {
        let mut symbols = SymbolTable::new();
        symbols.define("LIMIT".to_string(), 9);
        assert_eq!(
            instruction("SUB R0 LIMIT R0", &symbols),
            Instruction::new(0b0100_0011, 0, 9, 0)
        );
    }

    #[test]
    fn test_mov_encoding() {
        let symbols = SymbolTable::new();
        // MOV is OR with a forced immediate-zero right operand.
        assert_eq!(
            instruction("MOV R0 IO", &symbols),
            Instruction::new(0b0100_0000, 0, 0, 7)
        );
        assert_eq!(
            instruction("MOV 42 R1", &symbols),
            Instruction::new(0b1100_0000, 42, 0, 1)
        );
    }

    #[test]
    fn test_branch_requires_label_target() {
        let mut symbols = SymbolTable::new();
        symbols.define("LOOP".to_string(), 8);
        assert_eq!(
            instruction("BL R0 R1 LOOP", &symbols),
            Instruction::new(0b0010_0010, 0, 1, 8)
        );
        assert_eq!(
            encode_str("BL R0 R1 12", &symbols).unwrap_err(),
            AssemblerError::UndefinedLabel("12".to_string())
        );
        assert_eq!(
            encode_str("BL R0 R1 R2", &symbols).unwrap_err(),
            AssemblerError::UndefinedLabel("R2".to_string())
        );
    }

    #[test]
    fn test_call_jump_and_ret() {
        let mut symbols = SymbolTable::new();
        symbols.define("FN".to_string(), 16);
        assert_eq!(
            instruction("CALL FN", &symbols),
            Instruction::new(0b0010_0110, 0, 0, 16)
        );
        assert_eq!(
            instruction("JUMP FN", &symbols),
            Instruction::new(0b0010_0000, 0, 0, 16)
        );
        assert_eq!(
            instruction("RET", &symbols),
            Instruction::new(0b0010_0111, 0, 0, 0)
        );
    }

    #[test]
    fn test_memory_instructions() {
        let symbols = SymbolTable::new();
        assert_eq!(
            instruction("SAVE 42", &symbols),
            Instruction::new(0b1001_0000, 42, 0, 0)
        );
        assert_eq!(
            instruction("SAVE R3", &symbols),
            Instruction::new(0b0001_0000, 3, 0, 0)
        );
        assert_eq!(
            instruction("LOAD R0", &symbols),
            Instruction::new(0b0001_1000, 0, 0, 0)
        );
        assert_eq!(
            instruction("PROM R2", &symbols),
            Instruction::new(0b0001_1001, 0, 0, 2)
        );
    }

    #[test]
    fn test_halt_encoding() {
        let symbols = SymbolTable::new();
        assert_eq!(
            instruction("HALT", &symbols),
            Instruction::new(0xFF, 0, 0, 0)
        );
    }

    #[test]
    fn test_unknown_instruction() {
        let symbols = SymbolTable::new();
        assert_eq!(
            encode_str("FROB R0 R1 R2", &symbols).unwrap_err(),
            AssemblerError::UnknownInstruction("FROB".to_string())
        );
    }

    #[test]
    fn test_unresolved_operand() {
        let symbols = SymbolTable::new();
        assert_eq!(
            encode_str("ADD R0 COUNT R1", &symbols).unwrap_err(),
            AssemblerError::UnresolvedOperand("COUNT".to_string())
        );
        // Out-of-range literals are unresolvable too.
        assert_eq!(
            encode_str("ADD R0 300 R1", &symbols).unwrap_err(),
            AssemblerError::UnresolvedOperand("300".to_string())
        );
    }

    #[test]
    fn test_operand_count_mismatch() {
        let symbols = SymbolTable::new();
        assert!(encode_str("ADD R0 R1", &symbols).is_err());
        assert!(encode_str("RET R0", &symbols).is_err());
        assert!(encode_str("LOAD", &symbols).is_err());
    }

    #[test]
    fn test_directives_emit_nothing() {
        let symbols = SymbolTable::new();
        assert_eq!(encode_str("LABEL A", &symbols).unwrap(), None);
        assert_eq!(encode_str("CONST A 1", &symbols).unwrap(), None);
        assert_eq!(encode_str("", &symbols).unwrap(), None);
    }

    #[test]
    fn test_literal_lines() {
        let symbols = SymbolTable::new();
        assert_eq!(
            encode_str("\"HI\"", &symbols).unwrap(),
            Some(EncodedLine::Bytes(vec![72, 73]))
        );
        assert_eq!(
            encode_str("[1, 2, 250]", &symbols).unwrap(),
            Some(EncodedLine::Bytes(vec![1, 2, 250]))
        );
    }
}
