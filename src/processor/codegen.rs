//! Lowers a [`Program`] into the flat byte-code sequence run by the agent VM.
//!
//! The generator borrows the program's context and body through the `swap_*`
//! exchanges, walks the body with the statement `disassemble_*` /
//! `assemble_*` pairs, and hands everything back before returning, so the
//! program value is unchanged afterwards (also when an error is returned).
//!
//! Calls to user-defined instructions are inlined at the call site; the
//! output never contains a call/return pair.

use tracing::{debug, trace};

use super::ast::{Condition, Kind, Statement};
use super::instruction::Instruction;
use crate::error::CodegenError;
use crate::model::{CompiledProgram, Context, Program};

type Result<T> = std::result::Result<T, CodegenError>;

/// How `IF_ELSE` and `WHILE` are lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JumpStyle {
    /// A single forward `JUMP_IF_NOT_*` per construct. For `IF_ELSE` the
    /// same placeholder is patched after the then-branch and again after the
    /// else-branch; `WHILE` gets no backward branch. A VM consuming this form
    /// has to supply the missing control flow itself.
    #[default]
    Compat,
    /// `IF_ELSE` jumps over the else-branch with an unconditional `JUMP`, and
    /// every `WHILE` body ends with a `JUMP` back to its condition test.
    Structured,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodegenOptions {
    pub jumps: JumpStyle,
}

/// Generates the code for `program`, terminated by `HALT`.
pub fn generated_code(program: &mut Program, options: &CodegenOptions) -> Result<CompiledProgram> {
    let mut context = program.new_context();
    program.swap_context(&mut context);
    let mut body = program.new_body();
    program.swap_body(&mut body);

    let mut generator = Generator::new(*options);
    let res = generator.statement(&mut body, &mut context);

    program.swap_context(&mut context);
    program.swap_body(&mut body);
    res?;

    generator.emit(Instruction::Halt);
    debug!(
        program = program.name(),
        len = generator.code.len(),
        "code generated"
    );
    Ok(CompiledProgram {
        name: program.name().to_string(),
        code: generator.code,
    })
}

struct Generator {
    code: Vec<u32>,
    options: CodegenOptions,
    /// User instructions currently being inlined, innermost last.
    expanding: Vec<String>,
}

impl Generator {
    fn new(options: CodegenOptions) -> Self {
        Self {
            code: Vec::new(),
            options,
            expanding: Vec::new(),
        }
    }

    fn here(&self) -> u32 {
        self.code.len() as u32
    }

    fn emit(&mut self, instr: Instruction) {
        self.code.push(instr.byte_code());
    }

    /// Emits `instr` followed by a placeholder target; returns the
    /// placeholder's position for [`Generator::patch`].
    fn emit_jump(&mut self, instr: Instruction) -> usize {
        self.emit(instr);
        let slot = self.code.len();
        self.code.push(0);
        slot
    }

    fn emit_conditional_jump(&mut self, c: Condition) -> usize {
        self.emit_jump(Instruction::conditional_jump(c))
    }

    /// Points the placeholder at `slot` to the current end of the code.
    fn patch(&mut self, slot: usize) {
        self.code[slot] = self.here();
    }

    fn statement(&mut self, s: &mut Statement, context: &mut Context) -> Result<()> {
        match s.kind() {
            Kind::Block => {
                for i in 0..s.length_of_block() {
                    let mut child = s.remove_from_block(i);
                    let res = self.statement(&mut child, context);
                    s.add_to_block(i, child);
                    res?;
                }
                Ok(())
            }
            Kind::If => {
                let (c, mut body) = s.disassemble_if();
                let jump = self.emit_conditional_jump(c);
                let res = self.statement(&mut body, context);
                self.patch(jump);
                s.assemble_if(c, body);
                res
            }
            Kind::IfElse => {
                let (c, mut then_body, mut else_body) = s.disassemble_if_else();
                let res = self.if_else(c, &mut then_body, &mut else_body, context);
                s.assemble_if_else(c, then_body, else_body);
                res
            }
            Kind::While => {
                let (c, mut body) = s.disassemble_while();
                let res = self.while_loop(c, &mut body, context);
                s.assemble_while(c, body);
                res
            }
            Kind::Call => {
                let name = s.disassemble_call();
                let res = self.call(&name, context);
                s.assemble_call(name);
                res
            }
        }
    }

    fn if_else(
        &mut self,
        c: Condition,
        then_body: &mut Statement,
        else_body: &mut Statement,
        context: &mut Context,
    ) -> Result<()> {
        let jump = self.emit_conditional_jump(c);
        self.statement(then_body, context)?;
        match self.options.jumps {
            JumpStyle::Compat => {
                self.patch(jump);
                self.statement(else_body, context)?;
                self.patch(jump);
            }
            JumpStyle::Structured => {
                let skip_else = self.emit_jump(Instruction::Jump);
                self.patch(jump);
                self.statement(else_body, context)?;
                self.patch(skip_else);
            }
        }
        Ok(())
    }

    fn while_loop(
        &mut self,
        c: Condition,
        body: &mut Statement,
        context: &mut Context,
    ) -> Result<()> {
        let head = self.here();
        let jump = self.emit_conditional_jump(c);
        self.statement(body, context)?;
        if self.options.jumps == JumpStyle::Structured {
            self.emit(Instruction::Jump);
            self.code.push(head);
        }
        self.patch(jump);
        Ok(())
    }

    fn call(&mut self, name: &str, context: &mut Context) -> Result<()> {
        if let Some((key, mut body)) = context.remove_entry(name) {
            trace!(instruction = %key, at = self.code.len(), "inlining call");
            self.expanding.push(key.clone());
            let res = self.statement(&mut body, context);
            self.expanding.pop();
            context.insert(key, body);
            return res;
        }
        if self.expanding.iter().any(|n| n == name) {
            return Err(CodegenError::RecursiveInstruction(name.to_string()));
        }
        match Instruction::primitive(name) {
            Some(instr) => {
                self.emit(instr);
                Ok(())
            }
            None => Err(CodegenError::UnknownInstruction(name.to_string())),
        }
    }
}
