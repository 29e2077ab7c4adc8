//! The emulator driver: one instance owns the whole machine.

use leg_spec::Program;

use crate::error::{Result, RuntimeError};
use crate::execute::{step, CallConvention};
use crate::io::{IoPort, QueuedIo};
use crate::memory::{Ram, ReadPolicy};
use crate::state::{CpuState, StepOutcome};

/// Emulator configuration.
#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    /// Cycle budget for one `run` call; exceeding it is an error rather
    /// than a silent stop.
    pub max_cycles: u64,

    /// How CALL and RET execute.
    pub call_convention: CallConvention,

    /// What a RAM read beyond the highest written cell does.
    pub ram_read_policy: ReadPolicy,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1_000_000,
            call_convention: CallConvention::default(),
            ram_read_policy: ReadPolicy::default(),
        }
    }
}

/// Why a `run` call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The halt opcode was fetched.
    Halted,
    /// Input ran dry or the pause sentinel arrived. Queue more input and
    /// call `run` again to resume from the same instruction.
    AwaitingInput,
}

/// Result of one `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Cycles executed so far, across resumed runs.
    pub cycles: u64,
    pub outcome: RunOutcome,
}

/// The LEG machine: registers, call stack, RAM, PROM, and an I/O port,
/// owned together and mutated only one cycle at a time.
#[derive(Debug)]
pub struct Emulator<I: IoPort = QueuedIo> {
    program: Program,
    state: CpuState,
    ram: Ram,
    io: I,
    config: EmulatorConfig,
    cycles: u64,
}

impl Emulator<QueuedIo> {
    /// Convenience constructor backed by an input queue.
    pub fn with_inputs(program: Program, inputs: Vec<u8>, config: EmulatorConfig) -> Self {
        Emulator::new(program, QueuedIo::with_inputs(inputs), config)
    }
}

impl<I: IoPort> Emulator<I> {
    pub fn new(program: Program, io: I, config: EmulatorConfig) -> Self {
        let ram = Ram::new(config.ram_read_policy);
        Self {
            program,
            state: CpuState::new(),
            ram,
            io,
            config,
            cycles: 0,
        }
    }

    /// Execute one cycle.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let outcome = step(
            &self.program,
            &mut self.state,
            &mut self.ram,
            &mut self.io,
            self.config.call_convention,
        )?;
        if outcome == StepOutcome::Continue {
            self.cycles += 1;
        }
        Ok(outcome)
    }

    /// Run until the machine halts or suspends on input.
    ///
    /// Does not consume the emulator: after `AwaitingInput`, queue more
    /// input through [`Emulator::io_mut`] and call `run` again.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        loop {
            if self.cycles >= self.config.max_cycles {
                return Err(RuntimeError::CycleLimitExceeded {
                    limit: self.config.max_cycles,
                });
            }
            match self.step()? {
                StepOutcome::Continue => {}
                StepOutcome::Halted => {
                    return Ok(ExecutionResult {
                        cycles: self.cycles,
                        outcome: RunOutcome::Halted,
                    })
                }
                StepOutcome::AwaitingInput => {
                    return Ok(ExecutionResult {
                        cycles: self.cycles,
                        outcome: RunOutcome::AwaitingInput,
                    })
                }
            }
        }
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
