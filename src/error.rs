//! Error types for parsing, code generation and compiled-code handling.
//!
//! Two failure classes:
//!
//! - **Syntax errors** ([`SyntaxError`]) come from malformed input. A caller
//!   may report them and move on to the next program.
//! - **Contract violations** ([`ContractViolation`]) mean a structural
//!   precondition of the program model was broken, e.g. two instructions with
//!   the same name. Misusing the statement API itself (disassembling the
//!   wrong kind, a non-BLOCK body) is also a contract violation and panics.
//!
//! A failed parse never yields a partial [`crate::model::Program`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected}, found `{found}`")]
    Expected {
        expected: &'static str,
        found: String,
    },

    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("`{0}` is not a condition")]
    InvalidCondition(String),

    #[error("{construct} `{declared}` ends with `END {found}`")]
    MismatchedName {
        construct: &'static str,
        declared: String,
        found: String,
    },

    #[error("primitive instruction `{0}` cannot be redefined")]
    PrimitiveRedefinition(String),

    #[error("unexpected `{0}` after end of program")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("instruction `{0}` is declared more than once")]
    DuplicateInstruction(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("violation of program contract: {0}")]
    Contract(#[from] ContractViolation),
}

impl ParseError {
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ParseError::Contract(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("`{0}` is neither a primitive nor a user-defined instruction")]
    UnknownInstruction(String),

    #[error("instruction `{0}` calls itself (directly or indirectly)")]
    RecursiveInstruction(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("offset {offset}: unknown opcode {code}")]
    UnknownOpcode { offset: usize, code: u32 },

    #[error("offset {offset}: {instruction} is missing its jump target")]
    MissingTarget {
        offset: usize,
        instruction: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum CompiledFormatError {
    #[error("compiled program is empty, expected a length prefix")]
    MissingLength,

    #[error("line {line}: `{text}` is not a non-negative integer")]
    NotAnInteger { line: usize, text: String },

    #[error("length prefix says {declared} entries, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}
