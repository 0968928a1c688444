//! The functional core: tokenize, parse and lower BL programs to byte-code.
pub mod ast;
pub mod codegen;
pub mod instruction;
pub mod lexer;
pub mod listing;
pub mod script_parser;

pub use codegen::{CodegenOptions, JumpStyle};

use crate::model::ProcessedProgram;
use anyhow::{Context, Result};
use tracing::info;

/// Runs every processing pass over one BL source text.
pub fn run(src: &str, options: &CodegenOptions) -> Result<ProcessedProgram> {
    let mut tokens = lexer::tokens(src);
    info!(tokens = tokens.len(), "source tokenized");

    let mut program =
        script_parser::parse_program(&mut tokens).with_context(|| "Parsing BL program")?;
    info!(
        program = program.name(),
        instructions = program.context().len(),
        "program parsed"
    );

    let compiled = codegen::generated_code(&mut program, options)
        .with_context(|| format!("Generating code for {}", program.name()))?;
    info!(len = compiled.code.len(), jumps = ?options.jumps, "code generated");

    Ok(ProcessedProgram { program, compiled })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_pipeline() {
        let src = "PROGRAM Spin IS INSTRUCTION around IS turnright turnright END around \
                   BEGIN around END Spin";
        let processed = run(src, &CodegenOptions::default()).unwrap();
        assert_eq!(processed.compiled.name, "Spin");
        assert_eq!(processed.compiled.code, vec![2, 2, 5]);
        assert_eq!(processed.program.name(), "Spin");
    }

    #[test]
    fn test_run_reports_parse_failure() {
        let err = run("PROGRAM X IS BEGIN END Y", &CodegenOptions::default()).unwrap_err();
        assert!(err.to_string().starts_with("Parsing BL program"), "got: {err}");
        assert!(err.downcast_ref::<crate::error::ParseError>().is_some());
    }
}
