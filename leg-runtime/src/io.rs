//! The I/O boundary: register index 7 mapped to the outside world.
//!
//! Reading the port is the only blocking operation in the machine. A port
//! returns `None` to signal the pause sentinel (or an exhausted queue),
//! which suspends the current cycle without touching any state. Token
//! conversion between bytes and external text is a separate concern,
//! selected by [`IoMode`].

use std::collections::VecDeque;

use thiserror::Error;

/// How bytes cross the boundary as text tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoMode {
    /// Tokens are decimal numerals, masked to 8 bits.
    #[default]
    Integer,
    /// Tokens are single characters in a fixed single-byte encoding.
    Text,
}

/// Input token that suspends the run instead of producing a byte.
pub const PAUSE_TOKEN: &str = "pause";

/// One side of the memory-mapped port.
pub trait IoPort {
    /// Take one byte of input. `None` means pause: the emulator suspends
    /// and the same instruction re-runs once input is available again.
    fn read_byte(&mut self) -> Option<u8>;

    /// Give back a byte consumed by `read_byte`, used when a later read in
    /// the same instruction pauses so that suspension stays
    /// instruction-atomic.
    fn unread_byte(&mut self, byte: u8);

    /// Emit one byte of output.
    fn write_byte(&mut self, byte: u8);
}

/// Queue-backed port for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct QueuedIo {
    inputs: VecDeque<u8>,
    outputs: Vec<u8>,
}

impl QueuedIo {
    pub fn new() -> Self {
        QueuedIo::default()
    }

    pub fn with_inputs(inputs: Vec<u8>) -> Self {
        QueuedIo {
            inputs: inputs.into(),
            outputs: Vec::new(),
        }
    }

    pub fn push_input(&mut self, byte: u8) {
        self.inputs.push_back(byte);
    }

    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outputs)
    }
}

impl IoPort for QueuedIo {
    fn read_byte(&mut self) -> Option<u8> {
        self.inputs.pop_front()
    }

    fn unread_byte(&mut self, byte: u8) {
        self.inputs.push_front(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.outputs.push(byte);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid integer input: {0:?}")]
    InvalidInteger(String),

    #[error("Expected a single character, got {0:?}")]
    NotACharacter(String),

    #[error("Character {0:?} does not fit in a single byte")]
    WideCharacter(char),
}

/// Parse one token of external input. `Ok(None)` is the pause sentinel.
pub fn parse_input_token(token: &str, mode: IoMode) -> Result<Option<u8>, TokenError> {
    if token.eq_ignore_ascii_case(PAUSE_TOKEN) {
        return Ok(None);
    }
    let byte = match mode {
        IoMode::Integer => {
            let value: u64 = token
                .parse()
                .map_err(|_| TokenError::InvalidInteger(token.to_string()))?;
            (value & 0xFF) as u8
        }
        IoMode::Text => {
            let mut chars = token.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(TokenError::NotACharacter(token.to_string()));
            };
            u8::try_from(u32::from(c)).map_err(|_| TokenError::WideCharacter(c))?
        }
    };
    Ok(Some(byte))
}

/// Render one byte of output as a token in the given mode.
pub fn render_output(byte: u8, mode: IoMode) -> String {
    match mode {
        IoMode::Integer => byte.to_string(),
        IoMode::Text => char::from(byte).to_string(),
    }
}
