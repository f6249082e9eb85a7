// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The binary call database.
//!
//! All numbers are big-endian. The file is a header followed by a stream of
//! records; the top bits of each record's first halfword say what it is
//! (see [`flags::record`]). The loader reads exactly what the writer writes,
//! so `CallDatabase::from_bytes(&db.to_bytes()?)` gives back `db`.

use crate::database::flags::{self, caf, record};
use crate::database::names::{begin_size, END_SETUPS};
use crate::database::record::*;
use crate::database::{Level, Schema, SchemaKind};
use crate::predicates::Predicate;
use thiserror::Error;
use tracing::debug;

/// A compiled set of calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallDatabase {
    pub version: String,
    /// Size of the tag table the database was compiled with.
    pub tag_count: u16,
    pub calls: Vec<CallRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("database ends unexpectedly at byte {0}")]
    Truncated(usize),
    #[error("not a call database (magic number {0})")]
    BadMagic(u16),
    #[error("database format version {0} is not supported")]
    UnsupportedVersion(u16),
    #[error("unexpected record {word:#06x} at byte {offset}")]
    UnexpectedRecord { offset: usize, word: u16 },
    #[error("unknown level {0}")]
    UnknownLevel(u16),
    #[error("unknown schema {0}")]
    UnknownSchema(u8),
    #[error("unknown setup {0}")]
    UnknownSetup(u16),
    #[error("unknown predicate {0}")]
    UnknownPredicate(u16),
    #[error("bad callarray entry {0:#06x}")]
    BadCallArrayEntry(u16),
    #[error("text at byte {0} is not UTF-8")]
    InvalidText(usize),
    #[error("header says {expected} calls, found {found}")]
    CountMismatch { expected: u16, found: usize },
    #[error("{0} bytes after the end mark")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("predicate {0} has no database number")]
    UnlistedPredicate(String),
    #[error("{what} does not fit its field")]
    FieldOverflow { what: &'static str },
}

impl CallDatabase {
    /// Number of call headers, counting compound continuations.
    pub fn call_count(&self) -> usize {
        self.calls.iter().map(CallRecord::header_count).sum()
    }

    /// Find a call by name.
    pub fn call(&self, name: &str) -> Option<&CallRecord> {
        self.calls.iter().find(|c| c.name == name)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut w = Writer::default();
        w.halfword(flags::DATABASE_MAGIC_NUM);
        w.halfword(flags::DATABASE_FORMAT_VERSION);
        w.halfword(fits(self.call_count(), "call count")?);
        w.halfword(self.tag_count);
        w.text(&self.version, "version string")?;

        for call in &self.calls {
            w.halfword(record::CALL | call.tag.unwrap_or(0));
            w.byte(call.level as u8);
            w.body(&call.body, &call.name)?;
            for continuation in &call.continuations {
                w.halfword(record::CONTINUATION);
                w.body(continuation, "")?;
            }
        }
        w.halfword(record::END);
        Ok(w.bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CallDatabase, LoadError> {
        let mut r = Reader { bytes, pos: 0 };
        let magic = r.halfword()?;
        if magic != flags::DATABASE_MAGIC_NUM {
            return Err(LoadError::BadMagic(magic));
        }
        let version = r.halfword()?;
        if version != flags::DATABASE_FORMAT_VERSION {
            return Err(LoadError::UnsupportedVersion(version));
        }
        let expected = r.halfword()?;
        let tag_count = r.halfword()?;
        let len = r.halfword()?;
        let version = r.text(usize::from(len))?;

        let mut calls: Vec<CallRecord> = Vec::new();
        loop {
            let offset = r.pos;
            let word = r.halfword()?;
            if word == record::END {
                break;
            } else if word == record::CONTINUATION {
                let (_, body) = r.body(0)?;
                match calls.last_mut() {
                    Some(call) => call.continuations.push(body),
                    None => return Err(LoadError::UnexpectedRecord { offset, word }),
                }
            } else if word & record::KIND_MASK == record::CALL {
                let tag = word & record::TAG_MASK;
                let level = r.byte()?;
                let level = Level::from_index(level)
                    .ok_or(LoadError::UnknownLevel(u16::from(level)))?;
                let (name, body) = r.body(1)?;
                calls.push(CallRecord {
                    name,
                    level,
                    tag: (tag != 0).then_some(tag),
                    body,
                    continuations: Vec::new(),
                });
            } else {
                return Err(LoadError::UnexpectedRecord { offset, word });
            }
        }
        if r.pos != bytes.len() {
            return Err(LoadError::TrailingBytes(bytes.len() - r.pos));
        }

        let database = CallDatabase {
            version,
            tag_count,
            calls,
        };
        if database.call_count() != usize::from(expected) {
            return Err(LoadError::CountMismatch {
                expected,
                found: database.call_count(),
            });
        }
        debug!(
            calls = database.call_count(),
            tags = tag_count,
            "loaded call database"
        );
        Ok(database)
    }
}

fn fits(value: usize, what: &'static str) -> Result<u16, WriteError> {
    u16::try_from(value).map_err(|_| WriteError::FieldOverflow { what })
}

#[derive(Default)]
struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    fn byte(&mut self, n: u8) {
        self.bytes.push(n);
    }

    fn halfword(&mut self, n: u16) {
        self.bytes.extend_from_slice(&n.to_be_bytes());
    }

    fn fullword(&mut self, n: u32) {
        self.bytes.extend_from_slice(&n.to_be_bytes());
    }

    fn text(&mut self, s: &str, what: &'static str) -> Result<(), WriteError> {
        self.halfword(fits(s.len(), what)?);
        self.bytes.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn body(&mut self, body: &CallBody, name: &str) -> Result<(), WriteError> {
        let namelen = u8::try_from(name.len()).map_err(|_| WriteError::FieldOverflow {
            what: "call name",
        })?;
        self.halfword(body.flags.overflow);
        self.fullword(body.flags.flags1);
        self.fullword(body.flags.heritable);
        self.halfword((u16::from(namelen) << 8) | u16::from(body.schema.index()));
        self.bytes.extend_from_slice(name.as_bytes());

        match &body.definition {
            Definition::Nothing => {}
            Definition::Array(groups) => {
                for group in groups {
                    self.alternate(group.alternate);
                    for def in &group.defs {
                        self.array_def(def)?;
                    }
                }
            }
            Definition::Matrix { flags, groups } => {
                self.fullword(*flags);
                for group in groups {
                    self.alternate(group.alternate);
                    for entry in &group.entries {
                        self.halfword(entry.encode());
                        if let CallArrayEntry::Dest(dest) = entry {
                            self.halfword(dest.y.unwrap_or(0));
                        }
                    }
                }
            }
            Definition::Sequential(parts) => parts.iter().for_each(|p| self.subcall(p)),
            Definition::Concentric(inner, outer) => {
                self.subcall(inner);
                self.subcall(outer);
            }
            Definition::Alias(tag) => self.halfword(record::SUBCALL | tag),
        }
        Ok(())
    }

    fn alternate(&mut self, header: Option<AlternateHeader>) {
        if let Some(AlternateHeader { level, keys }) = header {
            self.halfword(record::SUBCALL | level as u16);
            self.fullword(keys);
        }
    }

    fn subcall(&mut self, sub: &SubCall) {
        self.halfword(record::SUBCALL | sub.tag);
        self.fullword(sub.modifiers1);
        self.fullword(sub.modifiersh);
    }

    fn entries(&mut self, entries: &[CallArrayEntry]) {
        entries.iter().for_each(|e| self.halfword(e.encode()));
    }

    fn array_def(&mut self, def: &ArrayDef) -> Result<(), WriteError> {
        let mut flags = def.flags;
        if matches!(def.body, ArrayBody::Preds { .. }) {
            flags |= caf::PREDS;
        }
        if matches!(def.end, EndSetup::Concentric { .. }) {
            flags |= caf::CONCEND;
        }
        if flags & caf::OVERFLOW != 0 {
            return Err(WriteError::FieldOverflow {
                what: "callarray flags",
            });
        }
        self.halfword(record::ARRAY_DEF | (flags >> 7) as u16);
        self.fullword(((flags & 0x7F) << 25) | (u32::from(def.restriction) << 17) | def.qualifier);
        let start = u16::from(def.start) << 8;
        match def.end {
            EndSetup::Plain(end) => self.halfword(start | u16::from(end)),
            EndSetup::Concentric { inner, outer } => {
                self.halfword(start | u16::from(inner));
                self.halfword(u16::from(outer));
            }
        }

        match &def.body {
            ArrayBody::Plain(entries) => self.entries(entries),
            ArrayBody::Preds { message, clauses } => {
                match message {
                    PredsMessage::Text(text) => {
                        self.halfword(fits(text.len(), "predicate message")?);
                        for pair in text.as_bytes().chunks(2) {
                            let low = pair.get(1).copied().unwrap_or(0);
                            self.halfword(u16::from_be_bytes([pair[0], low]));
                        }
                    }
                    PredsMessage::Canned(canned) => self.halfword(0x8000 | *canned as u16),
                }
                for clause in clauses {
                    let index = clause
                        .predicate
                        .index()
                        .ok_or_else(|| WriteError::UnlistedPredicate(clause.predicate.to_string()))?;
                    self.halfword(record::PREDICATE);
                    self.halfword(fits(index, "predicate number")?);
                    self.entries(&clause.entries);
                }
            }
        }
        Ok(())
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take(&mut self, n: usize) -> Result<&[u8], LoadError> {
        let end = self.pos + n;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(LoadError::Truncated(self.bytes.len()))?;
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, LoadError> {
        Ok(self.take(1)?[0])
    }

    fn halfword(&mut self) -> Result<u16, LoadError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn fullword(&mut self) -> Result<u32, LoadError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn peek(&self) -> Result<u16, LoadError> {
        match self.bytes.get(self.pos..self.pos + 2) {
            Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
            None => Err(LoadError::Truncated(self.bytes.len())),
        }
    }

    fn text(&mut self, len: usize) -> Result<String, LoadError> {
        let at = self.pos;
        let raw = self.take(len)?.to_vec();
        String::from_utf8(raw).map_err(|_| LoadError::InvalidText(at))
    }

    fn unexpected(&self) -> LoadError {
        match self.peek() {
            Ok(word) => LoadError::UnexpectedRecord {
                offset: self.pos,
                word,
            },
            Err(e) => e,
        }
    }

    /// Read a definition header and body. `min_name` is 1 for a named call.
    fn body(&mut self, min_name: usize) -> Result<(String, CallBody), LoadError> {
        let overflow = self.halfword()?;
        let flags1 = self.fullword()?;
        let heritable = self.fullword()?;
        let word = self.halfword()?;
        let schema_index = word as u8;
        let schema = Schema::from_index(schema_index).ok_or(LoadError::UnknownSchema(schema_index))?;
        let namelen = usize::from(word >> 8);
        if namelen < min_name || (min_name == 0 && namelen != 0) {
            return Err(LoadError::UnexpectedRecord {
                offset: self.pos - 2,
                word,
            });
        }
        let name = self.text(namelen)?;

        let definition = match schema.kind() {
            SchemaKind::Nothing => Definition::Nothing,
            SchemaKind::Array => Definition::Array(self.array_groups()?),
            kind @ (SchemaKind::Matrix | SchemaKind::PartnerMatrix) => {
                let flags = self.fullword()?;
                let count = kind.matrix_entries().unwrap_or(0);
                let mut groups = vec![MatrixGroup {
                    alternate: None,
                    entries: self.entries(count, true)?,
                }];
                while self.peek_kind() == Some(record::SUBCALL) {
                    let alternate = Some(self.alternate()?);
                    groups.push(MatrixGroup {
                        alternate,
                        entries: self.entries(count, true)?,
                    });
                }
                Definition::Matrix { flags, groups }
            }
            SchemaKind::Sequential => {
                let mut parts = vec![self.subcall()?];
                while self.peek_kind() == Some(record::SUBCALL) {
                    parts.push(self.subcall()?);
                }
                Definition::Sequential(parts)
            }
            SchemaKind::Concentric => Definition::Concentric(self.subcall()?, self.subcall()?),
            SchemaKind::Alias => Definition::Alias(self.subcall_tag()?),
        };

        Ok((
            name,
            CallBody {
                flags: CallFlags {
                    flags1,
                    overflow,
                    heritable,
                },
                schema,
                definition,
            },
        ))
    }

    fn peek_kind(&self) -> Option<u16> {
        self.peek().ok().map(|w| w & record::KIND_MASK)
    }

    fn subcall_tag(&mut self) -> Result<TagId, LoadError> {
        if self.peek_kind() != Some(record::SUBCALL) {
            return Err(self.unexpected());
        }
        Ok(self.halfword()? & record::TAG_MASK)
    }

    fn subcall(&mut self) -> Result<SubCall, LoadError> {
        Ok(SubCall {
            tag: self.subcall_tag()?,
            modifiers1: self.fullword()?,
            modifiersh: self.fullword()?,
        })
    }

    fn alternate(&mut self) -> Result<AlternateHeader, LoadError> {
        let level = self.halfword()? & record::TAG_MASK;
        let level = u8::try_from(level)
            .ok()
            .and_then(Level::from_index)
            .ok_or(LoadError::UnknownLevel(level))?;
        Ok(AlternateHeader {
            level,
            keys: self.fullword()?,
        })
    }

    fn entries(&mut self, count: usize, matrix: bool) -> Result<Vec<CallArrayEntry>, LoadError> {
        (0..count)
            .map(|_| {
                let word = self.halfword()?;
                if word == 0 {
                    return Ok(CallArrayEntry::Empty);
                }
                let y = if matrix { Some(self.halfword()?) } else { None };
                Destination::decode(word, y)
                    .map(CallArrayEntry::Dest)
                    .ok_or(LoadError::BadCallArrayEntry(word))
            })
            .collect()
    }

    fn array_groups(&mut self) -> Result<Vec<ArrayGroup>, LoadError> {
        let mut groups: Vec<ArrayGroup> = Vec::new();
        loop {
            match self.peek()? {
                w if w & record::ARRAY_DEF != 0 => {
                    let def = self.array_def()?;
                    match groups.last_mut() {
                        Some(group) => group.defs.push(def),
                        None => groups.push(ArrayGroup {
                            alternate: None,
                            defs: vec![def],
                        }),
                    }
                }
                w if w & record::KIND_MASK == record::SUBCALL => {
                    let alternate = Some(self.alternate()?);
                    groups.push(ArrayGroup {
                        alternate,
                        defs: Vec::new(),
                    });
                }
                _ => break,
            }
        }
        if groups.is_empty() || groups.iter().any(|g| g.defs.is_empty()) {
            return Err(self.unexpected());
        }
        Ok(groups)
    }

    fn array_def(&mut self) -> Result<ArrayDef, LoadError> {
        let high = u32::from(self.halfword()? & !record::ARRAY_DEF);
        let word = self.fullword()?;
        let flags = (high << 7) | (word >> 25);
        let restriction = ((word >> 17) & 0xFF) as u8;
        let qualifier = word & 0x1FFFF;

        let setups = self.halfword()?;
        let start = (setups >> 8) as u8;
        let begin = begin_size(usize::from(start)).ok_or(LoadError::UnknownSetup(setups >> 8))?;
        let end_setup = |index: u16| {
            let index = index & 0xFF;
            match END_SETUPS.get(usize::from(index)) {
                Some(_) => Ok(index as u8),
                None => Err(LoadError::UnknownSetup(index)),
            }
        };
        let end = if flags & caf::CONCEND != 0 {
            let inner = end_setup(setups)?;
            let outer = end_setup(self.halfword()?)?;
            EndSetup::Concentric { inner, outer }
        } else {
            EndSetup::Plain(end_setup(setups)?)
        };

        let body = if flags & caf::PREDS != 0 {
            let head = self.halfword()?;
            let message = if head & 0x8000 != 0 {
                let canned = CannedMessage::from_repr(head & 0x7FFF)
                    .ok_or(LoadError::UnexpectedRecord {
                        offset: self.pos - 2,
                        word: head,
                    })?;
                PredsMessage::Canned(canned)
            } else {
                let len = usize::from(head);
                let at = self.pos;
                let mut raw = Vec::with_capacity(len + 1);
                for _ in 0..len.div_ceil(2) {
                    raw.extend_from_slice(&self.halfword()?.to_be_bytes());
                }
                raw.truncate(len);
                PredsMessage::Text(String::from_utf8(raw).map_err(|_| LoadError::InvalidText(at))?)
            };
            let mut clauses = Vec::new();
            while self.peek().ok() == Some(record::PREDICATE) {
                self.halfword()?;
                let index = self.halfword()?;
                let predicate = Predicate::from_index(usize::from(index))
                    .ok_or(LoadError::UnknownPredicate(index))?;
                clauses.push(PredClause {
                    predicate,
                    entries: self.entries(begin, false)?,
                });
            }
            ArrayBody::Preds { message, clauses }
        } else {
            ArrayBody::Plain(self.entries(begin, false)?)
        };

        Ok(ArrayDef {
            start,
            end,
            flags: flags & !(caf::PREDS | caf::CONCEND),
            restriction,
            qualifier,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use pretty_assertions::assert_eq;

    fn schema(name: &str) -> Schema {
        Schema::from_name(name).unwrap()
    }

    fn body(schema_name: &str, definition: Definition) -> CallBody {
        CallBody {
            flags: CallFlags::default(),
            schema: schema(schema_name),
            definition,
        }
    }

    fn dest(position: u8, direction: Direction) -> CallArrayEntry {
        CallArrayEntry::Dest(Destination {
            stability: Stability::default(),
            slide: None,
            roll: None,
            position,
            direction,
            y: None,
        })
    }

    fn trade() -> CallRecord {
        CallRecord {
            name: "trade".to_string(),
            level: Level::Mainstream,
            tag: Some(15),
            body: body(
                "setup",
                Definition::Array(vec![ArrayGroup {
                    alternate: None,
                    defs: vec![ArrayDef {
                        start: 2,
                        end: EndSetup::Plain(2),
                        flags: caf::ROT,
                        restriction: 0,
                        qualifier: 0,
                        body: ArrayBody::Plain(vec![
                            dest(1, Direction::South),
                            dest(0, Direction::South),
                        ]),
                    }],
                }]),
            ),
            continuations: Vec::new(),
        }
    }

    #[test]
    fn test_header_layout() {
        let db = CallDatabase {
            version: "v1".to_string(),
            tag_count: 44,
            calls: vec![trade()],
        };
        let bytes = db.to_bytes().unwrap();
        assert_eq!(&bytes[0..2], &21316u16.to_be_bytes());
        assert_eq!(&bytes[2..4], &331u16.to_be_bytes());
        assert_eq!(&bytes[4..6], &1u16.to_be_bytes());
        assert_eq!(&bytes[6..8], &44u16.to_be_bytes());
        assert_eq!(&bytes[8..12], &[0, 2, b'v', b'1']);
        // Call header: 0x2000 | tag, then the level byte.
        assert_eq!(&bytes[12..15], &[0x20, 15, 0]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0, 0]);
    }

    #[test]
    fn test_round_trip_mixed_definitions() {
        let sub = SubCall {
            tag: 15,
            modifiers1: 0x100,
            modifiersh: 0,
        };
        let mut compound = trade();
        compound.name = "trade and roll".to_string();
        compound.tag = None;
        compound.continuations.push(body("seq", Definition::Sequential(vec![sub, sub])));

        let preds = CallRecord {
            name: "maybe".to_string(),
            level: Level::C1,
            tag: None,
            body: body(
                "setup",
                Definition::Array(vec![
                    ArrayGroup {
                        alternate: None,
                        defs: vec![ArrayDef {
                            start: 2,
                            end: EndSetup::Concentric { inner: 2, outer: 5 },
                            flags: caf::ROT_OUT,
                            restriction: 3,
                            qualifier: flags::qual::LIVE | 7,
                            body: ArrayBody::Preds {
                                message: PredsMessage::Text("odd".to_string()),
                                clauses: vec![PredClause {
                                    predicate: Predicate::Always,
                                    entries: vec![CallArrayEntry::Empty, dest(3, Direction::West)],
                                }],
                            },
                        }],
                    },
                    ArrayGroup {
                        alternate: Some(AlternateHeader {
                            level: Level::C2,
                            keys: flags::inherit::LEFT,
                        }),
                        defs: vec![ArrayDef {
                            start: 2,
                            end: EndSetup::Plain(2),
                            flags: 0,
                            restriction: 0,
                            qualifier: 0,
                            body: ArrayBody::Preds {
                                message: PredsMessage::Canned(CannedMessage::NoSelect),
                                clauses: Vec::new(),
                            },
                        }],
                    },
                ]),
            ),
            continuations: Vec::new(),
        };

        let matrix_entry = Destination {
            stability: Stability::default(),
            slide: Some(SlideMark::G),
            roll: None,
            position: 4,
            direction: Direction::East,
            y: Some(2),
        };
        let matrix = CallRecord {
            name: "step".to_string(),
            level: Level::Plus,
            tag: Some(50),
            body: body(
                "matrix",
                Definition::Matrix {
                    flags: flags::mtx::USE_SELECTOR,
                    groups: vec![MatrixGroup {
                        alternate: None,
                        entries: vec![
                            CallArrayEntry::Dest(matrix_entry),
                            CallArrayEntry::Empty,
                        ],
                    }],
                },
            ),
            continuations: Vec::new(),
        };

        let alias = CallRecord {
            name: "swap".to_string(),
            level: Level::A1,
            tag: None,
            body: body("alias", Definition::Alias(15)),
            continuations: Vec::new(),
        };
        let conc = CallRecord {
            name: "both".to_string(),
            level: Level::A2,
            tag: None,
            body: body("conc", Definition::Concentric(sub, sub)),
            continuations: Vec::new(),
        };
        let nothing = CallRecord {
            name: "nothing".to_string(),
            level: Level::Mainstream,
            tag: None,
            body: body("nulldefine", Definition::Nothing),
            continuations: Vec::new(),
        };

        let db = CallDatabase {
            version: "test".to_string(),
            tag_count: 51,
            calls: vec![trade(), compound, preds, matrix, alias, conc, nothing],
        };
        assert_eq!(db.call_count(), 8);
        let bytes = db.to_bytes().unwrap();
        assert_eq!(CallDatabase::from_bytes(&bytes), Ok(db));
    }

    #[test]
    fn test_load_errors() {
        assert_eq!(CallDatabase::from_bytes(&[0x53]), Err(LoadError::Truncated(1)));
        assert_eq!(
            CallDatabase::from_bytes(&[0, 1, 0, 0]),
            Err(LoadError::BadMagic(1))
        );
        let db = CallDatabase {
            version: String::new(),
            tag_count: 44,
            calls: vec![trade()],
        };
        let mut bytes = db.to_bytes().unwrap();
        bytes[5] = 2;
        assert_eq!(
            CallDatabase::from_bytes(&bytes),
            Err(LoadError::CountMismatch {
                expected: 2,
                found: 1
            })
        );
        bytes[5] = 1;
        bytes.push(0);
        assert_eq!(CallDatabase::from_bytes(&bytes), Err(LoadError::TrailingBytes(1)));
    }

    #[test]
    fn test_unlisted_predicate_cannot_be_written() {
        let mut call = trade();
        if let Definition::Array(groups) = &mut call.body.definition {
            groups[0].defs[0].body = ArrayBody::Preds {
                message: PredsMessage::Canned(CannedMessage::CantDo),
                clauses: vec![PredClause {
                    predicate: Predicate::Direction(crate::predicates::DirectionChoice::TheMusic),
                    entries: vec![CallArrayEntry::Empty; 2],
                }],
            };
        }
        let db = CallDatabase {
            version: String::new(),
            tag_count: 44,
            calls: vec![call],
        };
        assert!(matches!(db.to_bytes(), Err(WriteError::UnlistedPredicate(_))));
    }
}
