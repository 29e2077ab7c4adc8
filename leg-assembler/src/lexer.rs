//! # Lexer for LEG Assembly
//!
//! Assembly is line-oriented, so the lexer is run on one source line at a
//! time; comments run from `#` to the end of the line.

use logos::Logos;

/// Tokens for LEG assembly.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum Token {
    /// Mnemonics, directives, register names, label/constant identifiers.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),

    /// Decimal number
    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i64),

    /// Hexadecimal number
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| i64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(i64),

    /// Octal number
    #[regex(r"0[oO][0-7]+", |lex| i64::from_str_radix(&lex.slice()[2..], 8).ok())]
    Octal(i64),

    /// Binary number
    #[regex(r"0[bB][01]+", |lex| i64::from_str_radix(&lex.slice()[2..], 2).ok())]
    Binary(i64),

    /// Single-character literal
    #[regex(r"'[^']'", |lex| lex.slice().chars().nth(1))]
    Char(char),

    /// String literal (one per line, transcribed to character codes)
    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Str(String),

    /// Start of a data array
    #[token("[")]
    LBracket,

    /// End of a data array
    #[token("]")]
    RBracket,

    /// Separator inside a data array
    #[token(",")]
    Comma,
}
