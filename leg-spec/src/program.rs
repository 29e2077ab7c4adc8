//! # Program Container
//!
//! The assembled PROM: read-only after construction, fetched by the
//! emulator four bytes at a time and readable byte-wise through the
//! address register.
//!
//! The interchange format is line-broken decimal text, one instruction
//! (four integers) or one data run per line. A token beginning with `#`
//! ends that line's token list, so inline comments cost nothing.

use crate::error::SpecError;
use crate::instruction::Instruction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Program { bytes }
    }

    /// Parse the decimal text format produced by the assembler.
    ///
    /// Every whitespace-separated token on a line is one program byte;
    /// a `#`-prefixed token ends the line early; blank lines are skipped.
    /// A malformed token is fatal and reported with its line number.
    pub fn from_text(text: &str) -> Result<Self, SpecError> {
        let mut bytes = Vec::new();
        for (index, line) in text.lines().enumerate() {
            for token in line.split_whitespace() {
                if token.starts_with('#') {
                    break;
                }
                let byte: u8 =
                    token
                        .parse()
                        .map_err(|_| SpecError::InvalidProgramByte {
                            line: index + 1,
                            token: token.to_string(),
                        })?;
                bytes.push(byte);
            }
        }
        Ok(Program { bytes })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fetch the 4-byte instruction at `pc`. A fetch that runs past the end
    /// of the program is an error, never silently zero.
    pub fn fetch(&self, pc: u8) -> Result<Instruction, SpecError> {
        let start = usize::from(pc);
        let end = start + 4;
        if end > self.bytes.len() {
            return Err(SpecError::PromOutOfRange {
                address: start,
                len: self.bytes.len(),
            });
        }
        Ok(Instruction::new(
            self.bytes[start],
            self.bytes[start + 1],
            self.bytes[start + 2],
            self.bytes[start + 3],
        ))
    }

    /// Read a single byte, as the PROM instruction does through the
    /// address register.
    pub fn read_byte(&self, address: u8) -> Result<u8, SpecError> {
        self.bytes
            .get(usize::from(address))
            .copied()
            .ok_or(SpecError::PromOutOfRange {
                address: usize::from(address),
                len: self.bytes.len(),
            })
    }
}
