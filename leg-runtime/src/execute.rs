//! The fetch-decode-execute cycle.
//!
//! One call to [`step`] is one cycle. The opcode byte is decoded once into
//! a [`DecodedOpcode`] and every effect follows from that: operand
//! resolution (immediates, memory redirection, register-or-IO reads), ALU
//! evaluation, write-back, the SAVE side effect, branch evaluation,
//! CALL/RET, and finally the PC advance when nothing jumped.

use leg_spec::{AluOp, OpClass, Program, Register, HALT_OPCODE};

use crate::error::{Result, RuntimeError};
use crate::io::IoPort;
use crate::memory::Ram;
use crate::state::{CpuState, StepOutcome};

/// How CALL and RET execute.
///
/// The hardware decodes both through one mask, so a literal rendition runs
/// the push-and-jump *and* the pop-and-jump every time and every CALL
/// degenerates into a jump back to itself. `Split` discriminates on the
/// low opcode bit instead; `Fused` keeps the original behavior bit-exact
/// for programs assembled against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallConvention {
    /// CALL pushes the return address and jumps; RET pops into the PC.
    #[default]
    Split,
    /// Both effects run on every CALL/RET, as the original decode did.
    Fused,
}

const IO_INDEX: u8 = Register::Io as u8;
const PC_INDEX: u8 = Register::Pc as u8;

/// Execute one cycle.
///
/// Returns `Halted` on the halt opcode, `AwaitingInput` when an I/O read
/// pauses (with no state consumed), and `Continue` otherwise.
pub fn step(
    program: &Program,
    state: &mut CpuState,
    ram: &mut Ram,
    io: &mut dyn IoPort,
    convention: CallConvention,
) -> Result<StepOutcome> {
    let pc = state.pc();
    let inst = program.fetch(pc)?;

    if inst.opcode == HALT_OPCODE {
        return Ok(StepOutcome::Halted);
    }

    let decoded = inst.decode()?;
    tracing::trace!(pc, opcode = inst.opcode, class = ?decoded.class, "cycle");

    let address = state.address();

    // Left operand: immediate byte, memory cell, or register/IO read.
    let left: u8;
    let mut left_from_io = false;
    if decoded.imm_left {
        left = inst.arg0;
    } else {
        match decoded.class {
            OpClass::PromRead => left = program.read_byte(address)?,
            OpClass::Load => left = ram.read(address)?,
            _ => {
                if inst.arg0 & 0b111 == IO_INDEX {
                    match io.read_byte() {
                        Some(byte) => {
                            left = byte;
                            left_from_io = true;
                        }
                        None => return Ok(StepOutcome::AwaitingInput),
                    }
                } else {
                    left = state.read(inst.arg0);
                }
            }
        }
    }

    // Right operand: suppressed entirely for the memory-read family.
    let right: u8;
    if decoded.imm_right {
        right = inst.arg1;
    } else if !decoded.reads_right() {
        right = 0;
    } else if inst.arg1 & 0b111 == IO_INDEX {
        match io.read_byte() {
            Some(byte) => right = byte,
            None => {
                // Keep suspension instruction-atomic: the left input goes
                // back so the re-run consumes it again.
                if left_from_io {
                    io.unread_byte(left);
                }
                return Ok(StepOutcome::AwaitingInput);
            }
        }
    } else {
        right = state.read(inst.arg1);
    }

    // ALU evaluation. The memory family's low nibble doubles as a
    // pass-through selector (OR for SAVE, shift-by-zero for the reads).
    let result = match decoded.class {
        OpClass::Alu(op) => op
            .apply(left, right)
            .ok_or(RuntimeError::DivisionByZero { pc })?,
        OpClass::Save | OpClass::Load | OpClass::PromRead => {
            let op = AluOp::from_selector(inst.opcode & 0b0000_1111)
                .ok_or(leg_spec::SpecError::InvalidOpcode(inst.opcode))?;
            op.apply(left, right)
                .ok_or(RuntimeError::DivisionByZero { pc })?
        }
        _ => 0,
    };

    let mut jumped = false;

    // Write-back, unless the class suppresses it.
    if decoded.writes_back() {
        let dest = inst.arg2 & 0b111;
        if dest == IO_INDEX {
            io.write_byte(result);
        } else {
            state.write(dest, result);
            if dest == PC_INDEX {
                jumped = true;
            }
        }
    }

    // SAVE stores the ALU result at the address register.
    if decoded.class == OpClass::Save {
        ram.write(address, result);
    }

    // Branch: comparator over the operand busses, absolute target.
    if let OpClass::Branch(condition) = decoded.class {
        if condition.holds(left, right) {
            state.set_pc(inst.arg2);
            jumped = true;
        }
    }

    // CALL and RET.
    match (decoded.class, convention) {
        (OpClass::Call, CallConvention::Split) => {
            state.call_stack.push(pc.wrapping_add(4));
            state.set_pc(inst.arg2);
            jumped = true;
        }
        (OpClass::Ret, CallConvention::Split) => {
            let target = state
                .call_stack
                .pop()
                .ok_or(RuntimeError::StackUnderflow { pc })?;
            state.set_pc(target);
            jumped = true;
        }
        (OpClass::Call | OpClass::Ret, CallConvention::Fused) => {
            // Push-and-jump, immediately undone by pop-and-jump.
            state.call_stack.push(pc);
            state.set_pc(inst.arg2);
            if let Some(target) = state.call_stack.pop() {
                state.set_pc(target);
            }
            jumped = true;
        }
        _ => {}
    }

    if !jumped {
        state.advance_pc();
    }
    Ok(StepOutcome::Continue)
}
