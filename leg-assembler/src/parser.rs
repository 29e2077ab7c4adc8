//! Source line parser
//!
//! Classifies each source line as a directive, a literal, or one
//! instruction, and carries the sizing rule the symbol resolver depends
//! on: string and data lines occupy exactly as many program bytes as they
//! have characters or elements, everything else is zero or four.

use logos::Logos;

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;

/// An unresolved operand token as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A register name, label, or constant; resolved during encoding.
    Word(String),
    /// A numeric (or character) literal, already base-parsed.
    Literal(i64),
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLine {
    /// Blank or comment-only; emits nothing.
    Empty,
    /// `LABEL name`: binds the name to the current byte cursor.
    Label(String),
    /// `CONST name value`: binds the name to a literal byte.
    Const { name: String, value: u8 },
    /// `"text"`: transcribed to one byte per character.
    Text(String),
    /// `[n, n, ...]`: transcribed to one byte per element.
    Data(Vec<u8>),
    /// One mnemonic plus its operand tokens.
    Code {
        mnemonic: String,
        operands: Vec<Operand>,
    },
}

impl SourceLine {
    /// Number of program bytes this line assembles to. Label addresses for
    /// code following a string or data line depend on this being exact.
    pub fn byte_size(&self) -> usize {
        match self {
            SourceLine::Empty | SourceLine::Label(_) | SourceLine::Const { .. } => 0,
            SourceLine::Text(text) => text.chars().count(),
            SourceLine::Data(items) => items.len(),
            SourceLine::Code { .. } => leg_spec::INSTRUCTION_BYTES,
        }
    }
}

/// Parse one source line. Mnemonics and directive words are matched
/// case-insensitively; identifiers keep their case.
pub fn parse_line(line: &str) -> Result<SourceLine> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(AssemblerError::SyntaxError(format!(
                    "unrecognized token {:?}",
                    lexer.slice()
                )))
            }
        }
    }

    let Some(first) = tokens.first() else {
        return Ok(SourceLine::Empty);
    };

    match first {
        Token::Word(word) if word.eq_ignore_ascii_case("LABEL") => parse_label(&tokens),
        Token::Word(word) if word.eq_ignore_ascii_case("CONST") => parse_const(&tokens),
        Token::Word(word) => parse_code(word.clone(), &tokens[1..]),
        Token::Str(text) => {
            if tokens.len() != 1 {
                return Err(AssemblerError::SyntaxError(
                    "unexpected tokens after string literal".to_string(),
                ));
            }
            for c in text.chars() {
                char_to_byte(c)?;
            }
            Ok(SourceLine::Text(text.clone()))
        }
        Token::LBracket => parse_data(&tokens),
        _ => Err(AssemblerError::SyntaxError(
            "expected a mnemonic, directive, or literal".to_string(),
        )),
    }
}

fn parse_label(tokens: &[Token]) -> Result<SourceLine> {
    match tokens {
        [_, Token::Word(name)] => Ok(SourceLine::Label(name.clone())),
        _ => Err(AssemblerError::SyntaxError(
            "LABEL expects exactly one identifier".to_string(),
        )),
    }
}

fn parse_const(tokens: &[Token]) -> Result<SourceLine> {
    match tokens {
        [_, Token::Word(name), value] => Ok(SourceLine::Const {
            name: name.clone(),
            value: const_value(value)?,
        }),
        _ => Err(AssemblerError::SyntaxError(
            "CONST expects an identifier and a value".to_string(),
        )),
    }
}

fn parse_code(mnemonic: String, rest: &[Token]) -> Result<SourceLine> {
    let mut operands = Vec::new();
    for token in rest {
        let operand = match token {
            Token::Word(word) => Operand::Word(word.clone()),
            Token::Char(c) => Operand::Literal(i64::from(char_to_byte(*c)?)),
            _ => match integer_value(token) {
                Some(value) => Operand::Literal(value),
                None => {
                    return Err(AssemblerError::SyntaxError(format!(
                        "unexpected operand token {token:?}"
                    )))
                }
            },
        };
        operands.push(operand);
    }
    Ok(SourceLine::Code { mnemonic, operands })
}

fn parse_data(tokens: &[Token]) -> Result<SourceLine> {
    let Some((last, body)) = tokens[1..].split_last() else {
        return Err(AssemblerError::SyntaxError(
            "unterminated data line".to_string(),
        ));
    };
    if *last != Token::RBracket {
        return Err(AssemblerError::SyntaxError(
            "unterminated data line".to_string(),
        ));
    }

    let mut items = Vec::new();
    let mut expect_value = true;
    for token in body {
        if expect_value {
            let value = integer_value(token).ok_or_else(|| {
                AssemblerError::SyntaxError(format!(
                    "expected a numeric literal in data line, got {token:?}"
                ))
            })?;
            items.push(byte_value(value)?);
            expect_value = false;
        } else if *token == Token::Comma {
            expect_value = true;
        } else {
            return Err(AssemblerError::SyntaxError(
                "expected a comma between data elements".to_string(),
            ));
        }
    }
    if expect_value && !items.is_empty() {
        return Err(AssemblerError::SyntaxError(
            "trailing comma in data line".to_string(),
        ));
    }
    Ok(SourceLine::Data(items))
}

fn integer_value(token: &Token) -> Option<i64> {
    match token {
        Token::Number(n) | Token::Hex(n) | Token::Octal(n) | Token::Binary(n) => Some(*n),
        _ => None,
    }
}

fn const_value(token: &Token) -> Result<u8> {
    match token {
        Token::Char(c) => char_to_byte(*c),
        _ => match integer_value(token) {
            Some(value) => byte_value(value),
            None => Err(AssemblerError::InvalidConstant(format!("{token:?}"))),
        },
    }
}

fn byte_value(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| AssemblerError::InvalidConstant(value.to_string()))
}

fn char_to_byte(c: char) -> Result<u8> {
    u8::try_from(u32::from(c)).map_err(|_| AssemblerError::UnencodableCharacter(c))
}
