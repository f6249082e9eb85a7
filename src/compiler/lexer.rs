// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tokenizer for the call-definition language.
//!
//! Input is read a line at a time so that diagnostics can show the line and
//! a column marker. Every line, including the last, ends with `'\n'`.

use crate::compiler::errors::CompileErrorKind;

/// Longest symbol or quoted string, in bytes.
pub const MAX_TOKEN_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LeftBracket,
    RightBracket,
    /// A quoted string, with escapes removed.
    Str(String),
    /// A word with at least one non-digit character.
    Symbol(String),
    Number(u32),
}

/// Characters that end a symbol.
fn ends_symbol(c: char) -> bool {
    matches!(c, '[' | ']' | ',' | '/' | ':') || c <= ' '
}

pub struct Lexer<'a> {
    lines: std::str::Lines<'a>,
    line: Vec<char>,
    line_no: usize,
    /// Index of the next character to read from `line`.
    col: usize,
    ch: char,
    eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            lines: source.lines(),
            line: Vec::new(),
            line_no: 0,
            col: 0,
            ch: ' ',
            eof: false,
        }
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// The current source line, without its line end.
    pub fn source_line(&self) -> Option<String> {
        if self.eof || self.line.is_empty() {
            return None;
        }
        Some(self.line[..self.line.len() - 1].iter().collect())
    }

    /// Column of the character just read, where diagnostics point.
    pub fn column(&self) -> usize {
        self.col.saturating_sub(1)
    }

    /// Advance to the next character. Returns `false` at end of input.
    fn get_char(&mut self) -> bool {
        if self.col >= self.line.len() {
            self.line_no += 1;
            match self.lines.next() {
                Some(text) => {
                    self.line = text.trim_end_matches(['\r', '\n']).chars().collect();
                    self.line.push('\n');
                    self.col = 0;
                }
                None => {
                    self.eof = true;
                    return false;
                }
            }
        }
        self.ch = self.line[self.col];
        self.col += 1;
        true
    }

    fn skip_comment(&mut self) -> Result<(), CompileErrorKind> {
        if !self.get_char() {
            return Err(CompileErrorKind::Syntax("End of file in comment starter"));
        }
        let starter = self.ch;
        if starter != '*' && starter != '/' {
            return Err(CompileErrorKind::Syntax("Incorrect comment starter"));
        }
        let next = |lexer: &mut Self| {
            if lexer.get_char() {
                Ok(lexer.ch)
            } else {
                Err(CompileErrorKind::Syntax("End of file inside comment"))
            }
        };
        loop {
            let c = next(self)?;
            if starter == '/' {
                if c == '\n' {
                    return Ok(());
                }
            } else if c == '*' {
                let mut c = next(self)?;
                while c == '*' {
                    c = next(self)?;
                }
                if c == '/' {
                    return Ok(());
                }
            }
        }
    }

    /// The next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, CompileErrorKind> {
        while self.ch <= ' ' || self.ch == '/' {
            if self.ch == '/' {
                self.skip_comment()?;
            }
            if !self.get_char() {
                return Ok(None);
            }
        }

        let token = match self.ch {
            '[' => {
                self.ch = ' ';
                Token::LeftBracket
            }
            ']' => {
                self.ch = ' ';
                Token::RightBracket
            }
            '"' => {
                let mut text = String::new();
                loop {
                    if !self.get_char() {
                        return Err(CompileErrorKind::Syntax("End of file inside symbol"));
                    }
                    if self.ch == '"' {
                        break;
                    }
                    if self.ch == '\\' && !self.get_char() {
                        return Err(CompileErrorKind::Syntax("End of file inside symbol"));
                    }
                    text.push(self.ch);
                    if text.len() > MAX_TOKEN_LEN {
                        return Err(CompileErrorKind::Syntax("String too long"));
                    }
                }
                self.ch = ' ';
                Token::Str(text)
            }
            _ => {
                let mut text = String::new();
                let mut value: u32 = 0;
                let mut letters = 0;
                loop {
                    text.push(self.ch);
                    if text.len() > MAX_TOKEN_LEN {
                        return Err(CompileErrorKind::Syntax("Symbol too long"));
                    }
                    match self.ch.to_digit(10) {
                        Some(d) => value = value.saturating_mul(10).saturating_add(d),
                        None => letters += 1,
                    }
                    if !self.get_char() {
                        return Err(CompileErrorKind::Syntax("End of file inside symbol"));
                    }
                    if ends_symbol(self.ch) {
                        break;
                    }
                }
                if letters > 0 {
                    Token::Symbol(text)
                } else {
                    Token::Number(value)
                }
            }
        };
        Ok(Some(token))
    }
}
