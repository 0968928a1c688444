//! Emit a C++ header holding the opcode enum and the compiled program.

use crate::model::ProcessedProgram;
use crate::processor::instruction::Instruction;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn emit(project: &ProcessedProgram, out_dir: &Path) -> io::Result<()> {
    let name = symbol(&project.compiled.name);
    let mut h = File::create(out_dir.join(format!("{name}_program.h")))?;
    write_header(&mut h, project)
}

pub fn write_header<W: Write>(h: &mut W, project: &ProcessedProgram) -> io::Result<()> {
    let name = symbol(&project.compiled.name);

    writeln!(h, "#pragma once")?;
    writeln!(h, "#include <cstdint>")?;
    writeln!(h, "// Auto-generated – DO NOT EDIT\n")?;

    // ---------------------------------------------------------------
    // 1. Enum-class for opcodes – derived from Instruction::ALL
    // ---------------------------------------------------------------
    writeln!(h, "enum class BlOpcode : uint32_t {{")?;
    for instr in Instruction::ALL {
        writeln!(h, "    {} = {},", instr.name(), instr.byte_code())?;
    }
    writeln!(h, "}};\n")?;

    // ---------------------------------------------------------------
    // 2. Program code & size symbols
    // ---------------------------------------------------------------
    let code = &project.compiled.code;
    writeln!(h, "inline constexpr uint32_t {name}_code_size = {};", code.len())?;
    write!(h, "inline constexpr uint32_t {name}_code[] = {{")?;
    for (i, c) in code.iter().enumerate() {
        if i % 16 == 0 {
            write!(h, "\n   ")?;
        }
        write!(h, " {c},")?;
    }
    writeln!(h, "\n}};")?;

    Ok(())
}

/// Program names may contain `-`, which is not valid in a C identifier.
fn symbol(name: &str) -> String {
    name.replace('-', "_")
}
