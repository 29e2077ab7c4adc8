//! Assembly driver
//!
//! Runs the two passes over a whole source file and renders the decimal
//! text output. Any error aborts the assembly with the 1-based source
//! line attached; no partial output is ever produced.

use leg_spec::Program;

use crate::encoder::{encode_line, EncodedLine};
use crate::error::Result;
use crate::parser::{parse_line, SourceLine};
use crate::symbols::resolve_symbols;

/// Comment stamped at the top of every listing.
const HEADER: &str = "# Assembled with leg-assembler";

#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Append the original source as a trailing comment block, the way the
    /// listing reads back nicely next to its machine code.
    pub append_source: bool,
}

/// Assemble source text into the decimal listing format.
pub fn assemble(source: &str) -> Result<String> {
    assemble_with_options(source, &AssembleOptions::default())
}

pub fn assemble_with_options(source: &str, options: &AssembleOptions) -> Result<String> {
    let lines = parse_source(source)?;
    let symbols = resolve_symbols(lines.iter().map(|(_, line)| line))?;

    let mut out = String::from(HEADER);
    out.push('\n');
    for (line_no, line) in &lines {
        let encoded = encode_line(line, &symbols).map_err(|e| e.at_line(*line_no))?;
        match encoded {
            None => {}
            Some(EncodedLine::Instruction(inst)) => {
                out.push_str(&inst.to_string());
                out.push('\n');
            }
            Some(EncodedLine::Bytes(bytes)) => {
                if bytes.is_empty() {
                    continue;
                }
                let words: Vec<String> = bytes.iter().map(u8::to_string).collect();
                out.push_str(&words.join(" "));
                out.push('\n');
            }
        }
    }

    if options.append_source {
        out.push('\n');
        out.push_str("# Original:\n");
        for line in source.lines() {
            if line.trim().is_empty() {
                continue;
            }
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok(out)
}

/// Assemble straight to a program image, skipping the text round trip.
pub fn assemble_program(source: &str) -> Result<Program> {
    let lines = parse_source(source)?;
    let symbols = resolve_symbols(lines.iter().map(|(_, line)| line))?;

    let mut bytes = Vec::new();
    for (line_no, line) in &lines {
        match encode_line(line, &symbols).map_err(|e| e.at_line(*line_no))? {
            None => {}
            Some(EncodedLine::Instruction(inst)) => bytes.extend_from_slice(&inst.to_bytes()),
            Some(EncodedLine::Bytes(run)) => bytes.extend_from_slice(&run),
        }
    }
    Ok(Program::from_bytes(bytes))
}

fn parse_source(source: &str) -> Result<Vec<(usize, SourceLine)>> {
    source
        .lines()
        .enumerate()
        .map(|(index, raw)| {
            let line_no = index + 1;
            parse_line(raw)
                .map(|line| (line_no, line))
                .map_err(|e| e.at_line(line_no))
        })
        .collect()
}
