//! Persisted form of compiled code: the length on the first line, then one
//! integer per line.

use crate::error::CompiledFormatError;
use crate::model::ProcessedProgram;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn emit(project: &ProcessedProgram, out_dir: &Path) -> io::Result<()> {
    let path = out_dir.join(format!("{}.bl.out", project.compiled.name));
    let mut f = File::create(path)?;
    write_compiled(&mut f, &project.compiled.code)
}

pub fn write_compiled<W: Write>(out: &mut W, code: &[u32]) -> io::Result<()> {
    writeln!(out, "{}", code.len())?;
    for c in code {
        writeln!(out, "{c}")?;
    }
    Ok(())
}

/// Reads back what [`write_compiled`] produced. Blank lines are ignored.
pub fn read_compiled(src: &str) -> Result<Vec<u32>, CompiledFormatError> {
    let mut lines = src
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, text) = lines.next().ok_or(CompiledFormatError::MissingLength)?;
    let declared = parse_entry(line, text)? as usize;

    let code = lines
        .map(|(line, text)| parse_entry(line, text))
        .collect::<Result<Vec<_>, _>>()?;
    if code.len() != declared {
        return Err(CompiledFormatError::LengthMismatch {
            declared,
            actual: code.len(),
        });
    }
    Ok(code)
}

fn parse_entry(line: usize, text: &str) -> Result<u32, CompiledFormatError> {
    text.parse().map_err(|_| CompiledFormatError::NotAnInteger {
        line,
        text: text.to_string(),
    })
}
