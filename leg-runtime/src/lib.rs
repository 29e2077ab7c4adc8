//! # LEG Runtime
//!
//! Execute assembled LEG programs cycle by cycle.
//!
//! One cycle is one call: fetch four bytes at the program counter, decode
//! the opcode once, resolve the operand busses, evaluate the ALU, apply
//! write-back, memory, and flow-control effects, then advance. The only
//! blocking point is a read of the memory-mapped I/O port, which suspends
//! the run with all state intact.
//!
//! ## Example
//!
//! ```rust
//! use leg_runtime::{Emulator, EmulatorConfig, QueuedIo};
//! use leg_spec::Program;
//!
//! // MOV 7 IO; HALT
//! let program = Program::from_text("192 7 0 7\n255 0 0 0").unwrap();
//! let mut emu = Emulator::new(program, QueuedIo::new(), EmulatorConfig::default());
//! emu.run().unwrap();
//! assert_eq!(emu.io().outputs(), &[7]);
//! ```

pub mod emulator;
pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;

pub use emulator::{Emulator, EmulatorConfig, ExecutionResult, RunOutcome};
pub use error::{Result, RuntimeError};
pub use execute::{step, CallConvention};
pub use io::{parse_input_token, render_output, IoMode, IoPort, QueuedIo, PAUSE_TOKEN};
pub use memory::{Ram, ReadPolicy};
pub use state::{CpuState, StepOutcome};

/// Simple execution helper
///
/// Runs a program against a queue of input bytes and returns the bytes it
/// wrote to the I/O port.
pub fn run(program: leg_spec::Program, inputs: Vec<u8>) -> Result<Vec<u8>> {
    let mut emu = Emulator::with_inputs(program, inputs, EmulatorConfig::default());
    emu.run()?;
    Ok(emu.io_mut().take_outputs())
}
