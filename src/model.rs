use crate::processor::ast::{INDENT, Kind, Statement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::mem;

/// User-defined instruction name -> body (always a BLOCK).
pub type Context = HashMap<String, Statement>;

/// A complete BL program: a name, the user-defined instructions, and the
/// top-level body.
///
/// Internals are only reachable through the `swap_*` exchanges (plus
/// read-only views), so a caller that borrows the context or body has to
/// hand it back explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    name: String,
    context: Context,
    body: Statement,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    pub fn new() -> Self {
        Self {
            name: "Unnamed".to_string(),
            context: Context::new(),
            body: Statement::default(),
        }
    }

    /// Builds a program in one shot. Used by the parser once every part has
    /// been checked.
    pub fn from_parts(name: String, context: Context, body: Statement) -> Self {
        assert!(
            body.kind() == Kind::Block,
            "Violation of: [body is a BLOCK statement]"
        );
        Self {
            name,
            context,
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        assert!(!name.is_empty(), "Violation of: [n is a valid IDENTIFIER]");
        self.name = name;
    }

    /// A fresh, empty context to trade with [`Program::swap_context`].
    pub fn new_context(&self) -> Context {
        Context::new()
    }

    pub fn swap_context(&mut self, c: &mut Context) {
        mem::swap(&mut self.context, c);
    }

    /// A fresh, empty BLOCK to trade with [`Program::swap_body`].
    pub fn new_body(&self) -> Statement {
        Statement::default()
    }

    pub fn swap_body(&mut self, b: &mut Statement) {
        assert!(
            b.kind() == Kind::Block,
            "Violation of: [b is a BLOCK statement]"
        );
        mem::swap(&mut self.body, b);
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn body(&self) -> &Statement {
        &self.body
    }
}

/// Canonical BL source; instructions are printed in name order.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PROGRAM {} IS", self.name)?;

        let mut names: Vec<&String> = self.context.keys().collect();
        names.sort();
        let pad = " ".repeat(INDENT);
        for name in names {
            writeln!(f)?;
            writeln!(f, "{pad}INSTRUCTION {name} IS")?;
            self.context[name].pretty_print(f, 2 * INDENT)?;
            writeln!(f, "{pad}END {name}")?;
        }

        writeln!(f)?;
        writeln!(f, "BEGIN")?;
        self.body.pretty_print(f, INDENT)?;
        writeln!(f, "END {}", self.name)
    }
}

/// Output of the code generator: opcodes interleaved with jump targets,
/// always terminated by `HALT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledProgram {
    pub name: String,
    pub code: Vec<u32>,
}

/// Fully processed output handed to `writer`.
#[derive(Debug, Clone)]
pub struct ProcessedProgram {
    pub program: Program,
    pub compiled: CompiledProgram,
}
