// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Definition schemas.
//!
//! The database records the schema by its position in [`SCHEMAS`]. Most of
//! the ~140 schemas are variations of concentric evaluation that share one
//! record layout, so the layout is described separately by [`SchemaKind`].

use crate::database::names::{lookup, SCHEMAS};
use std::fmt;

/// How the body of a definition is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `setup` blocks with callarrays or predicate clauses.
    Array,
    /// No body at all.
    Nothing,
    /// A two-entry matrix.
    Matrix,
    /// A sixteen-entry partner matrix.
    PartnerMatrix,
    /// One or more `seq` sub-calls.
    Sequential,
    /// A reference to another call's tag.
    Alias,
    /// Exactly two sub-calls.
    Concentric,
}

impl SchemaKind {
    /// Number of callarray entries in a matrix body.
    pub fn matrix_entries(self) -> Option<usize> {
        match self {
            SchemaKind::Matrix => Some(2),
            SchemaKind::PartnerMatrix => Some(16),
            _ => None,
        }
    }
}

/// A schema, by its database number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schema(u8);

impl Schema {
    pub fn from_name(name: &str) -> Option<Schema> {
        lookup(SCHEMAS, name).and_then(|i| u8::try_from(i).ok()).map(Schema)
    }

    pub fn from_index(index: u8) -> Option<Schema> {
        match SCHEMAS.get(usize::from(index)) {
            Some(&name) if name != super::names::RETIRED => Some(Schema(index)),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        SCHEMAS[usize::from(self.0)]
    }

    pub fn kind(self) -> SchemaKind {
        match self.name() {
            "setup" => SchemaKind::Array,
            "nulldefine" | "nulldefine_noroll" | "nulldefine_other_elong" | "rolldefine"
            | "recenter" => SchemaKind::Nothing,
            "matrix" => SchemaKind::Matrix,
            "partnermatrix" | "partnerpartialmatrix" => SchemaKind::PartnerMatrix,
            "alias" => SchemaKind::Alias,
            name if name == "splitseq" || name.starts_with("seq") => SchemaKind::Sequential,
            _ => SchemaKind::Concentric,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> Option<SchemaKind> {
        Schema::from_name(name).map(Schema::kind)
    }

    #[test]
    fn test_schema_kinds() {
        assert_eq!(kind("setup"), Some(SchemaKind::Array));
        assert_eq!(kind("nulldefine"), Some(SchemaKind::Nothing));
        assert_eq!(kind("matrix"), Some(SchemaKind::Matrix));
        assert_eq!(kind("partnerpartialmatrix"), Some(SchemaKind::PartnerMatrix));
        assert_eq!(kind("seq_remainder"), Some(SchemaKind::Sequential));
        assert_eq!(kind("splitseq"), Some(SchemaKind::Sequential));
        assert_eq!(kind("alias"), Some(SchemaKind::Alias));
        assert_eq!(kind("crossconc"), Some(SchemaKind::Concentric));
        assert_eq!(kind("select_leads"), Some(SchemaKind::Concentric));
        assert_eq!(kind("sequence"), None);
    }

    #[test]
    fn test_index_round_trip() {
        let schema = Schema::from_name("conc").unwrap();
        assert_eq!(schema.index(), 0);
        assert_eq!(Schema::from_index(0), Some(schema));
        assert_eq!(schema.to_string(), "conc");
        // Slot 29 is retired.
        assert_eq!(Schema::from_index(29), None);
        assert_eq!(Schema::from_index(200), None);
    }
}
