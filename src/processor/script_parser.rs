//! Recursive-descent parser that consumes the token sequence and builds a
//! [`Program`].
//
//      program    ::= PROGRAM ident IS instr* BEGIN block END ident
//      instr      ::= INSTRUCTION ident IS block END ident
//      block      ::= stmt*
//      stmt       ::= IF cond THEN block [ELSE block] END IF
//                   | WHILE cond DO block END WHILE
//                   | ident

use std::collections::VecDeque;

use tracing::debug;

use super::ast::{Condition, Statement, is_identifier};
use super::instruction::Instruction;
use super::lexer;
use crate::error::{ContractViolation, ParseError, SyntaxError};
use crate::model::{Context, Program};

type Result<T> = std::result::Result<T, ParseError>;

/// Parses a whole program, consuming `tokens` front to back.
pub fn parse_program(tokens: &mut VecDeque<String>) -> Result<Program> {
    Parser::new(tokens).parse()
}

pub fn parse_source(src: &str) -> Result<Program> {
    let mut tokens = lexer::tokens(src);
    parse_program(&mut tokens)
}

struct Parser<'a> {
    tokens: &'a mut VecDeque<String>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a mut VecDeque<String>) -> Self {
        Self { tokens }
    }

    fn parse(&mut self) -> Result<Program> {
        self.expect_keyword("PROGRAM")?;
        let name = self.expect_identifier()?;
        self.expect_keyword("IS")?;

        let mut context = Context::new();
        while self.peek() == Some("INSTRUCTION") {
            let (instr, body) = self.parse_instruction()?;
            if context.contains_key(&instr) {
                return Err(ContractViolation::DuplicateInstruction(instr).into());
            }
            debug!(instruction = %instr, "instruction declared");
            context.insert(instr, body);
        }

        self.expect_keyword("BEGIN")?;
        let body = self.parse_block()?;
        self.expect_keyword("END")?;
        self.expect_closing_name("PROGRAM", &name)?;

        if let Some(extra) = self.tokens.pop_front() {
            return Err(SyntaxError::TrailingInput(extra).into());
        }

        debug!(program = %name, instructions = context.len(), "program parsed");
        Ok(Program::from_parts(name, context, body))
    }

    fn parse_instruction(&mut self) -> Result<(String, Statement)> {
        self.expect_keyword("INSTRUCTION")?;
        let name = self.expect_identifier()?;
        if Instruction::is_primitive_name(&name) {
            return Err(SyntaxError::PrimitiveRedefinition(name).into());
        }
        self.expect_keyword("IS")?;
        let body = self.parse_block()?;
        self.expect_keyword("END")?;
        self.expect_closing_name("INSTRUCTION", &name)?;
        Ok((name, body))
    }

    /// Reads statements until the next token cannot start one. The token that
    /// ends the block is left in place for the caller.
    fn parse_block(&mut self) -> Result<Statement> {
        let mut block = Statement::default();
        while let Some(tok) = self.peek() {
            if !(tok == "IF" || tok == "WHILE" || is_identifier(tok)) {
                break;
            }
            let stmt = self.parse_statement()?;
            let pos = block.length_of_block();
            block.add_to_block(pos, stmt);
        }
        Ok(block)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some("IF") => self.parse_if(),
            Some("WHILE") => self.parse_while(),
            _ => {
                let name = self.expect_identifier()?;
                let mut s = Statement::default();
                s.assemble_call(name);
                Ok(s)
            }
        }
    }

    fn parse_if(&mut self) -> Result<Statement> {
        self.expect_keyword("IF")?;
        let condition = self.parse_condition()?;
        self.expect_keyword("THEN")?;
        let then_body = self.parse_block()?;

        let mut s = Statement::default();
        if self.peek() == Some("ELSE") {
            self.tokens.pop_front();
            let else_body = self.parse_block()?;
            s.assemble_if_else(condition, then_body, else_body);
        } else {
            s.assemble_if(condition, then_body);
        }

        self.expect_keyword("END")?;
        self.expect_keyword("IF")?;
        Ok(s)
    }

    fn parse_while(&mut self) -> Result<Statement> {
        self.expect_keyword("WHILE")?;
        let condition = self.parse_condition()?;
        self.expect_keyword("DO")?;
        let body = self.parse_block()?;
        self.expect_keyword("END")?;
        self.expect_keyword("WHILE")?;

        let mut s = Statement::default();
        s.assemble_while(condition, body);
        Ok(s)
    }

    fn parse_condition(&mut self) -> Result<Condition> {
        let tok = self.next("a condition")?;
        Condition::from_keyword(&tok).ok_or_else(|| SyntaxError::InvalidCondition(tok).into())
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    fn next(&mut self, expected: &'static str) -> Result<String> {
        self.tokens
            .pop_front()
            .ok_or_else(|| SyntaxError::UnexpectedEnd { expected }.into())
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<()> {
        let tok = self.next(keyword)?;
        if tok != keyword {
            return Err(SyntaxError::Expected {
                expected: keyword,
                found: tok,
            }
            .into());
        }
        Ok(())
    }

    fn expect_identifier(&mut self) -> Result<String> {
        let tok = self.next("an identifier")?;
        if !is_identifier(&tok) {
            return Err(SyntaxError::InvalidIdentifier(tok).into());
        }
        Ok(tok)
    }

    fn expect_closing_name(&mut self, construct: &'static str, declared: &str) -> Result<()> {
        let found = self.next("a closing name")?;
        if found != declared {
            return Err(SyntaxError::MismatchedName {
                construct,
                declared: declared.to_string(),
                found,
            }
            .into());
        }
        Ok(())
    }
}
