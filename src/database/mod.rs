// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The call database: records, flag words and the binary format.
//!
//! - `level`: dance programs
//! - `names`: the numbered setup, schema and qualifier tables
//! - `schema`: definition schemas and their body layouts
//! - `flags`: bit layouts of the flag words
//! - `record`: in-memory call records
//! - `format`: the binary writer and loader

pub mod flags;
pub mod format;
pub mod level;
pub mod names;
pub mod record;
pub mod schema;

pub use format::{CallDatabase, LoadError, WriteError};
pub use level::Level;
pub use record::{
    AlternateHeader, ArrayBody, ArrayDef, ArrayGroup, CallArrayEntry, CallBody, CallFlags,
    CallRecord, CannedMessage, Definition, Destination, EndSetup, MatrixGroup, PredClause,
    PredsMessage, RollMark, SlideMark, Stability, StabilityCode, SubCall, TagId,
};
pub use schema::{Schema, SchemaKind};
