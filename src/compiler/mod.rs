// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compiler from call-definition text to the binary call database.
//!
//! - `lexer`: tokens and source positions
//! - `keywords`: the language's word tables
//! - `tags`: names by which calls refer to one another
//! - `parser`: the grammar, producing [`CallRecord`](crate::database::CallRecord)s
//! - `errors`: diagnostics
//!
//! The output bytes are produced by [`CallDatabase::to_bytes`] from the
//! parsed records, so the loader always reads back exactly what was parsed.

pub mod errors;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod tags;

pub use errors::{CompileError, CompileErrorKind, CompileWarning};
pub use tags::TagTable;

use crate::database::CallDatabase;
use parser::Parser;
use tracing::{info, warn};

/// The result of a successful compile.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub database: CallDatabase,
    pub bytes: Vec<u8>,
    pub tags: TagTable,
    pub warnings: Vec<CompileWarning>,
}

/// Compile definition text into a call database.
///
/// Stops at the first error. Tags that are used but never defined are
/// reported together once the whole file has been read, placed at the
/// first reference to one of them.
pub fn compile(source: &str) -> Result<Compilation, CompileError> {
    let (database, tags) = Parser::new(source).parse()?;

    let undefined = tags.undefined();
    if !undefined.is_empty() {
        let kind = CompileErrorKind::UndefinedTags(undefined);
        // Placed at the earliest reference to a missing tag.
        return Err(match tags.first_undefined_use() {
            Some(site) => CompileError {
                kind,
                line: site.line,
                last_call: site.call.clone(),
                source_line: site.source_line.clone(),
                column: site.column,
            },
            None => CompileError::unplaced(kind),
        });
    }
    let warnings: Vec<CompileWarning> = tags
        .unreferenced()
        .into_iter()
        .map(CompileWarning::UnreferencedTag)
        .collect();
    for warning in &warnings {
        warn!("{warning}");
    }

    let bytes = database
        .to_bytes()
        .map_err(|e| CompileError::unplaced(e.into()))?;
    info!(
        "{} bytes written, {} calls",
        bytes.len(),
        database.call_count()
    );
    Ok(Compilation {
        database,
        bytes,
        tags,
        warnings,
    })
}
