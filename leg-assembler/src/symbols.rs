//! Symbol resolution (first pass)
//!
//! Walks the classified source lines once, assigning byte addresses to
//! labels and literal values to constants. Labels and constants share one
//! namespace, and redefinition silently overwrites the prior binding.

use std::collections::HashMap;

use crate::error::{AssemblerError, Result};
use crate::parser::SourceLine;

/// The completed symbol table, read-only during the encoding pass.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, u8>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Bind a name. A prior binding is overwritten without complaint.
    pub fn define(&mut self, name: String, value: u8) {
        self.entries.insert(name, value);
    }

    /// Case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First pass: build the symbol table from an ordered sequence of lines.
///
/// The byte cursor starts at 0 and advances by each line's exact emitted
/// size; directives and blank lines do not move it. A program that cannot
/// fit the 8-bit address space is rejected here, before any encoding.
pub fn resolve_symbols<'a, I>(lines: I) -> Result<SymbolTable>
where
    I: IntoIterator<Item = &'a SourceLine>,
{
    let mut table = SymbolTable::new();
    let mut cursor: usize = 0;

    for line in lines {
        match line {
            SourceLine::Label(name) => {
                let address = u8::try_from(cursor)
                    .map_err(|_| AssemblerError::ProgramTooLarge { bytes: cursor })?;
                table.define(name.clone(), address);
            }
            SourceLine::Const { name, value } => {
                table.define(name.clone(), *value);
            }
            _ => cursor += line.byte_size(),
        }
    }

    if cursor > leg_spec::ADDRESS_SPACE {
        return Err(AssemblerError::ProgramTooLarge { bytes: cursor });
    }
    Ok(table)
}
