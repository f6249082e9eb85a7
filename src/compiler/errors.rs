// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile diagnostics.
//!
//! Messages are fixed strings so that a definition file author can search
//! for them. The position is captured when the error is raised.

use crate::database::WriteError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// A malformed or misplaced token.
    #[error("{0}")]
    Syntax(&'static str),
    /// A word that is not in the table it was looked up in.
    #[error("Unknown {0}")]
    Unknown(&'static str),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Multiple definition of a call tag")]
    DuplicateTag(String),
    #[error("Sorry, too many tagged calls")]
    TooManyTags,
    #[error("Tags not defined: {}", join(.0))]
    UndefinedTags(Vec<String>),
    #[error("Callarray list is too {} for this call", shortfall(.found, .expected))]
    CallArrayLength { found: usize, expected: usize },
    #[error("{0}")]
    Write(#[from] WriteError),
}

fn join(names: &[String]) -> String {
    names.join(", ")
}

fn shortfall(found: &usize, expected: &usize) -> &'static str {
    if found < expected {
        "short"
    } else {
        "long"
    }
}

/// A fatal compile error with the place it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: CompileErrorKind,
    /// 1-based line number; 0 when the error is not tied to a line.
    pub line: usize,
    /// The most recent call header, if any.
    pub last_call: Option<String>,
    /// The offending line, absent at end of file.
    pub source_line: Option<String>,
    pub column: usize,
}

impl CompileError {
    /// An error found after the whole file was read.
    pub fn unplaced(kind: CompileErrorKind) -> Self {
        CompileError {
            kind,
            line: 0,
            last_call: None,
            source_line: None,
            column: 0,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            return writeln!(f, "Error:\n{}.", self.kind);
        }
        writeln!(f, "Error at line {}:\n{}.", self.line, self.kind)?;
        if let CompileErrorKind::CallArrayLength { found, expected } = self.kind {
            writeln!(f, "Error data are:   {found}   {expected}")?;
        }
        match &self.last_call {
            Some(name) => writeln!(f, "  Last call was: {name}")?,
            None => writeln!(f)?,
        }
        if let Some(line) = &self.source_line {
            writeln!(f, "{line}")?;
            writeln!(f, "{:width$}|", "", width = self.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Non-fatal findings reported with a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    #[error("Tag \"{0}\" is defined but never used")]
    UnreferencedTag(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placed_error_layout() {
        let err = CompileError {
            kind: CompileErrorKind::Unknown("level"),
            line: 3,
            last_call: Some("foo".to_string()),
            source_line: Some("call \"bar\" mainstreem".to_string()),
            column: 21,
        };
        assert_eq!(
            err.to_string(),
            "Error at line 3:\nUnknown level.\n  Last call was: foo\n\
             call \"bar\" mainstreem\n                     |\n"
        );
    }

    #[test]
    fn test_error_without_call_or_line() {
        let err = CompileError {
            kind: CompileErrorKind::UnexpectedEof,
            line: 7,
            last_call: None,
            source_line: None,
            column: 0,
        };
        assert_eq!(err.to_string(), "Error at line 7:\nUnexpected end of file.\n\n");
        let tags = CompileError::unplaced(CompileErrorKind::UndefinedTags(vec![
            "swing".to_string(),
            "trade".to_string(),
        ]));
        assert_eq!(tags.to_string(), "Error:\nTags not defined: swing, trade.\n");
    }

    #[test]
    fn test_callarray_length_data() {
        let err = CompileError {
            kind: CompileErrorKind::CallArrayLength {
                found: 3,
                expected: 4,
            },
            line: 2,
            last_call: Some("x".to_string()),
            source_line: None,
            column: 0,
        };
        let text = err.to_string();
        assert!(text.contains("Callarray list is too short for this call."));
        assert!(text.contains("Error data are:   3   4"));
    }
}
