//! Human-readable listing of compiled code.

use super::instruction::Instruction;
use crate::error::ListingError;

/// One line per instruction: `<offset>: <OPCODE> [<target>]`.
pub fn disassemble(code: &[u32]) -> Result<Vec<String>, ListingError> {
    let mut lines = Vec::new();
    let mut offset = 0;
    while offset < code.len() {
        let instr = Instruction::from_byte_code(code[offset]).ok_or(ListingError::UnknownOpcode {
            offset,
            code: code[offset],
        })?;
        if instr.takes_target() {
            let target = code.get(offset + 1).ok_or(ListingError::MissingTarget {
                offset,
                instruction: instr.name(),
            })?;
            lines.push(format!("{offset}: {instr} {target}"));
            offset += 2;
        } else {
            lines.push(format!("{offset}: {instr}"));
            offset += 1;
        }
    }
    Ok(lines)
}
