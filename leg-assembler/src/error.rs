//! Assembler errors
//!
//! Every error is fatal to the whole assembly: no partial output is ever
//! produced, and the offending token travels with the error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AssemblerError {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("Unresolved operand: {0}")]
    UnresolvedOperand(String),

    #[error("Undefined label: {0}")]
    UndefinedLabel(String),

    #[error("Invalid constant: {0}")]
    InvalidConstant(String),

    #[error("Character {0:?} does not fit in a single byte")]
    UnencodableCharacter(char),

    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("Program too large: {bytes} bytes exceed the 256-byte address space")]
    ProgramTooLarge { bytes: usize },

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<AssemblerError>,
    },
}

impl AssemblerError {
    /// Attach a 1-based source line number to an error from a single line.
    pub fn at_line(self, line: usize) -> Self {
        AssemblerError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
