//! Statement tree for one BL program *before* it is lowered to byte-code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Reserved words that can never be used as an identifier. The condition
/// keywords (see [`Condition::KEYWORDS`]) are reserved as well.
pub const KEYWORDS: &[&str] = &[
    "PROGRAM",
    "INSTRUCTION",
    "IS",
    "BEGIN",
    "END",
    "IF",
    "THEN",
    "ELSE",
    "WHILE",
    "DO",
];

/// Whether `word` is reserved, either as a keyword or a condition name.
pub fn is_reserved(word: &str) -> bool {
    KEYWORDS.contains(&word) || Condition::from_keyword(word).is_some()
}

/// `[A-Za-z][A-Za-z0-9_-]*` that is not reserved.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    first_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !is_reserved(word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsEnemy,
    NextIsNotEnemy,
    NextIsFriend,
    NextIsNotFriend,
    NextIsWall,
    NextIsNotWall,
    Random,
    True,
}

impl Condition {
    /// Source spelling of every condition, index-aligned with [`Condition::ALL`].
    pub const KEYWORDS: &'static [&'static str] = &[
        "next-is-empty",
        "next-is-not-empty",
        "next-is-enemy",
        "next-is-not-enemy",
        "next-is-friend",
        "next-is-not-friend",
        "next-is-wall",
        "next-is-not-wall",
        "random",
        "true",
    ];

    pub const ALL: [Condition; 10] = [
        Condition::NextIsEmpty,
        Condition::NextIsNotEmpty,
        Condition::NextIsEnemy,
        Condition::NextIsNotEnemy,
        Condition::NextIsFriend,
        Condition::NextIsNotFriend,
        Condition::NextIsWall,
        Condition::NextIsNotWall,
        Condition::Random,
        Condition::True,
    ];

    pub fn from_keyword(word: &str) -> Option<Condition> {
        Self::KEYWORDS
            .iter()
            .position(|k| *k == word)
            .map(|i| Self::ALL[i])
    }

    pub fn keyword(self) -> &'static str {
        Self::KEYWORDS[self as usize]
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Which case of [`Statement`] is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Block,
    If,
    IfElse,
    While,
    Call,
}

/// One executable unit. A parent exclusively owns its children.
///
/// Composite statements are taken apart with the `disassemble_*` methods,
/// which move the parts out and leave an empty `Block` behind, and put back
/// together with the matching `assemble_*` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Block(Vec<Statement>),
    If {
        condition: Condition,
        body: Box<Statement>,
    },
    IfElse {
        condition: Condition,
        then_body: Box<Statement>,
        else_body: Box<Statement>,
    },
    While {
        condition: Condition,
        body: Box<Statement>,
    },
    Call(String),
}

impl Default for Statement {
    fn default() -> Self {
        Statement::Block(Vec::new())
    }
}

impl Statement {
    pub fn kind(&self) -> Kind {
        match self {
            Statement::Block(_) => Kind::Block,
            Statement::If { .. } => Kind::If,
            Statement::IfElse { .. } => Kind::IfElse,
            Statement::While { .. } => Kind::While,
            Statement::Call(_) => Kind::Call,
        }
    }

    fn block(&self) -> &Vec<Statement> {
        match self {
            Statement::Block(children) => children,
            other => panic!("Violation of: [self is a BLOCK], got {:?}", other.kind()),
        }
    }

    fn block_mut(&mut self) -> &mut Vec<Statement> {
        match self {
            Statement::Block(children) => children,
            other => panic!("Violation of: [self is a BLOCK], got {:?}", other.kind()),
        }
    }

    pub fn length_of_block(&self) -> usize {
        self.block().len()
    }

    /// Inserts `s` so that it becomes the child at `pos`.
    pub fn add_to_block(&mut self, pos: usize, s: Statement) {
        assert!(
            s.kind() != Kind::Block,
            "Violation of: [s is not a BLOCK statement]"
        );
        let children = self.block_mut();
        assert!(pos <= children.len(), "Violation of: 0 <= pos <= |self|");
        children.insert(pos, s);
    }

    pub fn remove_from_block(&mut self, pos: usize) -> Statement {
        let children = self.block_mut();
        assert!(pos < children.len(), "Violation of: 0 <= pos < |self|");
        children.remove(pos)
    }

    pub fn assemble_if(&mut self, condition: Condition, body: Statement) {
        assert_block(&body, "body");
        *self = Statement::If {
            condition,
            body: Box::new(body),
        };
    }

    pub fn disassemble_if(&mut self) -> (Condition, Statement) {
        match mem::take(self) {
            Statement::If { condition, body } => (condition, *body),
            other => panic!("Violation of: [self is an IF], got {:?}", other.kind()),
        }
    }

    pub fn assemble_if_else(
        &mut self,
        condition: Condition,
        then_body: Statement,
        else_body: Statement,
    ) {
        assert_block(&then_body, "then_body");
        assert_block(&else_body, "else_body");
        *self = Statement::IfElse {
            condition,
            then_body: Box::new(then_body),
            else_body: Box::new(else_body),
        };
    }

    pub fn disassemble_if_else(&mut self) -> (Condition, Statement, Statement) {
        match mem::take(self) {
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => (condition, *then_body, *else_body),
            other => panic!("Violation of: [self is an IF_ELSE], got {:?}", other.kind()),
        }
    }

    pub fn assemble_while(&mut self, condition: Condition, body: Statement) {
        assert_block(&body, "body");
        *self = Statement::While {
            condition,
            body: Box::new(body),
        };
    }

    pub fn disassemble_while(&mut self) -> (Condition, Statement) {
        match mem::take(self) {
            Statement::While { condition, body } => (condition, *body),
            other => panic!("Violation of: [self is a WHILE], got {:?}", other.kind()),
        }
    }

    pub fn assemble_call(&mut self, name: String) {
        assert!(!name.is_empty(), "Violation of: [name is a valid IDENTIFIER]");
        *self = Statement::Call(name);
    }

    pub fn disassemble_call(&mut self) -> String {
        match mem::take(self) {
            Statement::Call(name) => name,
            other => panic!("Violation of: [self is a CALL], got {:?}", other.kind()),
        }
    }

    /// Writes the canonical source form of `self`, each line indented by
    /// `indent` spaces.
    pub fn pretty_print(&self, f: &mut impl fmt::Write, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        match self {
            Statement::Block(children) => {
                for child in children {
                    child.pretty_print(f, indent)?;
                }
                Ok(())
            }
            Statement::If { condition, body } => {
                writeln!(f, "{pad}IF {condition} THEN")?;
                body.pretty_print(f, indent + INDENT)?;
                writeln!(f, "{pad}END IF")
            }
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                writeln!(f, "{pad}IF {condition} THEN")?;
                then_body.pretty_print(f, indent + INDENT)?;
                writeln!(f, "{pad}ELSE")?;
                else_body.pretty_print(f, indent + INDENT)?;
                writeln!(f, "{pad}END IF")
            }
            Statement::While { condition, body } => {
                writeln!(f, "{pad}WHILE {condition} DO")?;
                body.pretty_print(f, indent + INDENT)?;
                writeln!(f, "{pad}END WHILE")
            }
            Statement::Call(name) => writeln!(f, "{pad}{name}"),
        }
    }
}

pub const INDENT: usize = 4;

fn assert_block(s: &Statement, what: &str) {
    assert!(
        s.kind() == Kind::Block,
        "Violation of: [{what} is a BLOCK statement]"
    );
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pretty_print(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(children: Vec<Statement>) -> Statement {
        Statement::Block(children)
    }

    fn call(name: &str) -> Statement {
        Statement::Call(name.into())
    }

    #[test]
    fn test_default_is_empty_block() {
        let s = Statement::default();
        assert_eq!(s.kind(), Kind::Block);
        assert_eq!(s.length_of_block(), 0);
    }

    #[test]
    fn test_block_add_remove() {
        let mut s = Statement::default();
        s.add_to_block(0, call("move"));
        s.add_to_block(0, call("turnleft"));
        s.add_to_block(2, call("skip"));
        assert_eq!(s, block(vec![call("turnleft"), call("move"), call("skip")]));

        let removed = s.remove_from_block(1);
        assert_eq!(removed, call("move"));
        assert_eq!(s.length_of_block(), 2);
    }

    #[test]
    fn test_if_round_trip() {
        let body = block(vec![call("infect")]);
        let mut s = Statement::default();
        s.assemble_if(Condition::NextIsEnemy, body.clone());
        assert_eq!(s.kind(), Kind::If);

        let (c, b) = s.disassemble_if();
        assert_eq!(c, Condition::NextIsEnemy);
        assert_eq!(b, body);
        // the extracted statement is left as an empty placeholder
        assert_eq!(s, Statement::default());

        s.assemble_if(c, b);
        assert_eq!(
            s,
            Statement::If {
                condition: Condition::NextIsEnemy,
                body: Box::new(body),
            }
        );
    }

    #[test]
    fn test_if_else_and_while_round_trip() {
        let then_body = block(vec![call("move")]);
        let else_body = block(vec![call("turnright"), call("skip")]);
        let mut s = Statement::default();
        s.assemble_if_else(Condition::Random, then_body.clone(), else_body.clone());
        let (c, t, e) = s.disassemble_if_else();
        assert_eq!((c, &t, &e), (Condition::Random, &then_body, &else_body));

        s.assemble_while(Condition::True, t);
        assert_eq!(s.kind(), Kind::While);
        let (c, b) = s.disassemble_while();
        assert_eq!(c, Condition::True);
        assert_eq!(b, then_body);
    }

    #[test]
    fn test_call_round_trip() {
        let mut s = Statement::default();
        s.assemble_call("find-food".into());
        assert_eq!(s.kind(), Kind::Call);
        assert_eq!(s.disassemble_call(), "find-food");
        assert_eq!(s.kind(), Kind::Block);
    }

    #[test]
    #[should_panic(expected = "Violation of: [self is an IF]")]
    fn test_disassemble_wrong_kind_panics() {
        let mut s = call("move");
        s.disassemble_if();
    }

    #[test]
    #[should_panic(expected = "Violation of: [body is a BLOCK statement]")]
    fn test_assemble_requires_block_child() {
        let mut s = Statement::default();
        s.assemble_while(Condition::True, call("move"));
    }

    #[test]
    fn test_condition_keywords() {
        for c in Condition::ALL {
            assert_eq!(Condition::from_keyword(c.keyword()), Some(c));
        }
        assert_eq!(Condition::from_keyword("NEXT_IS_EMPTY"), None);
    }

    #[test]
    fn test_identifiers() {
        let test_cases = vec![
            ("move", true),
            ("find-obstacle", true),
            ("Walk2", true),
            ("2walk", false),
            ("IF", false),
            ("random", false),
            ("next-is-wall", false),
            (";", false),
            ("", false),
        ];
        for (word, expected) in test_cases {
            assert_eq!(is_identifier(word), expected, "word: {word:?}");
        }
    }

    #[test]
    fn test_pretty_print() {
        let mut inner = Statement::default();
        inner.assemble_if_else(
            Condition::NextIsWall,
            block(vec![call("turnleft")]),
            block(vec![call("move")]),
        );
        let mut s = Statement::default();
        s.assemble_while(Condition::True, block(vec![inner]));

        let expected = "\
WHILE true DO
    IF next-is-wall THEN
        turnleft
    ELSE
        move
    END IF
END WHILE
";
        assert_eq!(s.to_string(), expected);
    }
}
