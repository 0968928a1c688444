//! Dump the parsed program tree and its compiled code as JSON.

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::model::{CompiledProgram, ProcessedProgram, Program};

#[derive(Serialize)]
struct Dump<'a> {
    program: &'a Program,
    compiled: &'a CompiledProgram,
}

pub fn emit(project: &ProcessedProgram, out_dir: &Path) -> Result<()> {
    let path = out_dir.join(format!("{}.ast.json", project.compiled.name));
    fs::write(path, to_string(project)?)?;
    Ok(())
}

pub fn to_string(project: &ProcessedProgram) -> Result<String> {
    Ok(serde_json::to_string_pretty(&dump(project))?)
}

fn dump(project: &ProcessedProgram) -> Dump<'_> {
    Dump {
        program: &project.program,
        compiled: &project.compiled,
    }
}
