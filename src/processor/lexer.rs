//! Very small hand-written tokenizer for BL source.
//!
//! The lexer does not know any keywords: `PROGRAM`, `move`, `next-is-wall`
//! all come out as plain strings. The parser decides what they mean.
//
//  Lexical items:
//
//      Word     ::= [A-Za-z0-9_-]+
//      Other    ::= any single non-whitespace character
//
//  Whitespace and comments (# until end-of-line) are discarded.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }

    fn read_word(&mut self, first: char) -> String {
        let mut word = String::new();
        word.push(first);
        self.consume_while(is_word_char, &mut word);
        word
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.next_char()?;
            match ch {
                c if c.is_whitespace() => continue,
                '#' => self.skip_comment(),
                c if is_word_char(c) => return Some(self.read_word(c)),
                c => return Some(c.to_string()),
            }
        }
    }
}

/// Splits `src` into the ordered, consumable token sequence the parser reads.
pub fn tokens(src: &str) -> VecDeque<String> {
    Lexer::new(src).collect()
}

/// Same as [`tokens`], reading from an already-open character stream.
pub fn tokens_from_reader<R: BufRead>(mut reader: R) -> io::Result<VecDeque<String>> {
    let mut src = String::new();
    reader.read_to_string(&mut src)?;
    Ok(tokens(&src))
}
