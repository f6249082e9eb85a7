// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Recursive-descent parser from definition text to [`CallRecord`]s.
//!
//! The parser holds one token of lookahead in `tok`; `None` means end of
//! input. Each `parse_*` method documents where it leaves the lookahead.

use crate::compiler::errors::{CompileError, CompileErrorKind};
use crate::compiler::keywords::{
    alternate_key_bits, force_key_bits, GENERAL_DEFMODS, HERITABLE_FLAGS, INHERIT_DEFMODS,
    MATRIX_FLAGS, SEQUENCE_DEFMODS, TOP_LEVEL_FLAGS,
};
use crate::compiler::lexer::{Lexer, Token};
use crate::compiler::tags::{TagTable, TagUse};
use crate::database::flags::{caf, cflag1, dfm1, inherit, qual};
use crate::database::names::{
    begin_size, lookup, start_setup, END_SETUPS, NORMAL_CONCENTRIC, QUALIFIERS,
};
use crate::database::{
    AlternateHeader, ArrayBody, ArrayDef, ArrayGroup, CallArrayEntry, CallBody, CallDatabase,
    CallFlags, CallRecord, CannedMessage, Definition, Destination, EndSetup, Level, MatrixGroup,
    PredClause, PredsMessage, RollMark, Schema, SchemaKind, SlideMark, Stability, StabilityCode,
    SubCall, TagId,
};
use crate::geometry::Direction;
use crate::predicates::Predicate;
use std::str::FromStr;
use tracing::trace;

type Parse<T> = Result<T, CompileError>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    tok: Option<Token>,
    tags: TagTable,
    last_call: Option<String>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(source),
            tok: None,
            tags: TagTable::new(),
            last_call: None,
        }
    }

    /// Parse a whole definition file.
    pub fn parse(mut self) -> Parse<(CallDatabase, TagTable)> {
        let version = self.parse_version()?;
        let mut calls = Vec::new();
        self.advance_or_eof()?;
        loop {
            match &self.tok {
                None => break,
                Some(Token::Symbol(word)) if word == "call" => {}
                Some(Token::Symbol(_)) => return self.syntax("Item in illegal context"),
                Some(_) => return self.syntax("Missing indicator"),
            }
            let call = self.parse_call()?;
            trace!(name = %call.name, level = %call.level, "parsed call");
            calls.push(call);
        }
        let tag_count = u16::try_from(self.tags.len())
            .map_err(|_| CompileError::unplaced(CompileErrorKind::TooManyTags))?;
        let database = CallDatabase {
            version,
            tag_count,
            calls,
        };
        Ok((database, self.tags))
    }

    fn fail(&self, kind: CompileErrorKind) -> CompileError {
        CompileError {
            kind,
            line: self.lexer.line_no(),
            last_call: self.last_call.clone(),
            source_line: self.lexer.source_line(),
            column: self.lexer.column(),
        }
    }

    fn syntax<T>(&self, message: &'static str) -> Parse<T> {
        Err(self.fail(CompileErrorKind::Syntax(message)))
    }

    fn check<T>(&self, result: Result<T, CompileErrorKind>) -> Parse<T> {
        result.map_err(|kind| self.fail(kind))
    }

    fn reference_tag(&mut self, word: &str) -> Parse<TagId> {
        let site = TagUse {
            line: self.lexer.line_no(),
            column: self.lexer.column(),
            source_line: self.lexer.source_line(),
            call: self.last_call.clone(),
        };
        let tag = self.tags.reference(word, site);
        self.check(tag)
    }

    /// Read the next token; end of input is an error.
    fn advance(&mut self) -> Parse<()> {
        let next = self.lexer.next_token();
        match self.check(next)? {
            Some(token) => {
                self.tok = Some(token);
                Ok(())
            }
            None => {
                self.tok = None;
                Err(self.fail(CompileErrorKind::UnexpectedEof))
            }
        }
    }

    fn advance_or_eof(&mut self) -> Parse<()> {
        let next = self.lexer.next_token();
        self.tok = self.check(next)?;
        Ok(())
    }

    fn is_symbol(&self, word: &str) -> bool {
        matches!(&self.tok, Some(Token::Symbol(s)) if s == word)
    }

    fn is(&self, token: &Token) -> bool {
        self.tok.as_ref() == Some(token)
    }

    /// The lookahead, which must be a symbol.
    fn current_symbol(&self) -> Parse<String> {
        match &self.tok {
            Some(Token::Symbol(word)) => Ok(word.clone()),
            _ => self.syntax("Missing indicator"),
        }
    }

    fn expect_symbol(&mut self, message: &'static str) -> Parse<String> {
        self.advance()?;
        match &self.tok {
            Some(Token::Symbol(word)) => Ok(word.clone()),
            _ => self.syntax(message),
        }
    }

    fn expect_string(&mut self, message: &'static str) -> Parse<String> {
        self.advance()?;
        match &self.tok {
            Some(Token::Str(text)) => Ok(text.clone()),
            _ => self.syntax(message),
        }
    }

    fn expect_number(&mut self, message: &'static str) -> Parse<u32> {
        self.advance()?;
        match self.tok {
            Some(Token::Number(n)) => Ok(n),
            _ => self.syntax(message),
        }
    }

    fn parse_version(&mut self) -> Parse<String> {
        self.advance()?;
        match &self.tok {
            Some(Token::Symbol(word)) if word == "version" => {}
            Some(Token::Symbol(_)) => return self.syntax("Missing version specification"),
            _ => return self.syntax("Improper \"version\" indicator"),
        }
        self.expect_string("Improper version string -- must be in quotes")
    }

    /// Starts at `call`; leaves the lookahead after the last body.
    fn parse_call(&mut self) -> Parse<CallRecord> {
        let name = self.expect_string("Improper call name")?;
        self.last_call = Some(name.clone());
        let word = self.expect_symbol("Improper level")?;
        let level =
            Level::from_str(&word).map_err(|_| self.fail(CompileErrorKind::Unknown("level")))?;
        self.advance()?;
        self.current_symbol()?;

        let mut tag = None;
        if self.is_symbol("tag") {
            let word = self.expect_symbol("Improper tag")?;
            let defined = self.tags.define(&word);
            tag = Some(self.check(defined)?);
            self.advance()?;
            self.current_symbol()?;
        }

        let body = self.parse_body(tag.is_some())?;
        let mut continuations: Vec<CallBody> = Vec::new();
        loop {
            match &self.tok {
                Some(Token::Symbol(word)) if word != "call" => {}
                _ => break,
            }
            let previous = continuations.last().unwrap_or(&body);
            if previous.schema.kind() == SchemaKind::Alias {
                return self.syntax("Compound definitions not allowed on alias");
            }
            continuations.push(self.parse_body(tag.is_some())?);
        }

        Ok(CallRecord {
            name,
            level,
            tag,
            body,
            continuations,
        })
    }

    /// Starts at the first flag or schema word.
    fn parse_body(&mut self, tagged: bool) -> Parse<CallBody> {
        let flags = self.parse_top_flags()?;
        let funny = self.parse_per_array_flags()?;
        let word = self.current_symbol()?;
        let Some(schema) = Schema::from_name(&word) else {
            return self.syntax("Can't determine call definition type");
        };
        let kind = schema.kind();
        if funny != 0 && kind != SchemaKind::Array {
            return self.syntax("Simple_funny or lateral_to_selectees out of place");
        }

        let definition = match kind {
            SchemaKind::Array => Definition::Array(self.parse_array_groups(funny)?),
            SchemaKind::Nothing => {
                self.advance_or_eof()?;
                Definition::Nothing
            }
            SchemaKind::Matrix | SchemaKind::PartnerMatrix => self.parse_matrix(kind)?,
            SchemaKind::Sequential => {
                let mut parts = vec![self.parse_subcall("Improper seq symbol", true, flags)?];
                loop {
                    self.advance_or_eof()?;
                    if !self.is_symbol("seq") {
                        break;
                    }
                    parts.push(self.parse_subcall("Improper seq symbol", true, flags)?);
                }
                Definition::Sequential(parts)
            }
            SchemaKind::Alias => {
                if !flags.is_empty() || tagged {
                    return self.syntax("Flags not allowed with alias");
                }
                let word = self.expect_symbol("Improper alias symbol")?;
                let target = self.reference_tag(&word)?;
                self.advance_or_eof()?;
                Definition::Alias(target)
            }
            SchemaKind::Concentric => {
                let inner = self.parse_subcall("Improper conc symbol", false, flags)?;
                let outer = self.parse_subcall("Improper conc symbol", false, flags)?;
                self.advance_or_eof()?;
                Definition::Concentric(inner, outer)
            }
        };

        Ok(CallBody {
            flags,
            schema,
            definition,
        })
    }

    fn set_step_rear(&self, flags: &mut CallFlags, bits: u32) -> Parse<()> {
        if flags.flags1 & cflag1::STEP_REAR_MASK != 0 {
            return self.syntax("Too many touch/rear flags");
        }
        flags.flags1 |= bits;
        Ok(())
    }

    /// Leaves the lookahead at the first word that is not a top-level flag.
    fn parse_top_flags(&mut self) -> Parse<CallFlags> {
        let mut flags = CallFlags::default();
        loop {
            let word = self.current_symbol()?;
            let mut flag1_to_set = 0;
            let mut heritable_to_set = 0;

            if let Some(i) = lookup(TOP_LEVEL_FLAGS, &word) {
                if i >= 32 {
                    if i - 32 >= 16 {
                        return self.syntax("Too many secondary flags");
                    }
                    flags.overflow |= 1 << (i - 32);
                } else {
                    let bit = 1u32 << i;
                    if flags.flags1 & cflag1::STEP_REAR_MASK != 0
                        && bit & cflag1::STEP_REAR_MASK != 0
                    {
                        return self.syntax("Too many touch/rear flags");
                    }
                    flags.flags1 |= bit;
                }
            } else {
                match word.as_str() {
                    "step_to_nonphantom_box" => {
                        self.set_step_rear(&mut flags, cflag1::STEP_TO_NONPHAN_BOX)?
                    }
                    "rear_back_from_wave_or_qtag" => {
                        self.set_step_rear(&mut flags, cflag1::REAR_BACK_FROM_EITHER)?
                    }
                    "step_to_qtag" => self.set_step_rear(&mut flags, cflag1::STEP_TO_QTAG)?,
                    "visible_fractions" => flags.flags1 |= 7 * cflag1::VISIBLE_FRACTION_BIT,
                    "last_part_visible" => flags.flags1 |= 3 * cflag1::VISIBLE_FRACTION_BIT,
                    "first_and_last_parts_visible" => {
                        flags.flags1 |= 5 * cflag1::VISIBLE_FRACTION_BIT
                    }
                    "need_three_numbers" => flags.flags1 |= 3 * cflag1::NUMBER_BIT,
                    "optional_special_number" => flags.flags1 |= cflag1::NUMBER_MASK,
                    "base_tag_call_2" => flag1_to_set = 3 * cflag1::BASE_TAG_CALL_BIT,
                    "yoyo_is_inherited" => heritable_to_set = inherit::YOYO,
                    "gen_sting_is_inherited" => heritable_to_set = inherit::GENEROUS,
                    "mxn_is_inherited" => heritable_to_set = inherit::MXN_MASK,
                    "nxn_is_inherited" => heritable_to_set = inherit::NXN_MASK,
                    "bigmatrix_is_inherited" => {
                        heritable_to_set = inherit::MATRIX_12 | inherit::MATRIX_16
                    }
                    "revert_is_inherited" => heritable_to_set = inherit::REVERT_MASK,
                    _ => match lookup(HERITABLE_FLAGS, &word) {
                        Some(i) => heritable_to_set = 1 << i,
                        None => return Ok(flags),
                    },
                }
            }

            if flags.flags1 & flag1_to_set != 0 || flags.heritable & heritable_to_set != 0 {
                return self.syntax("Redundant indicator");
            }
            flags.flags1 |= flag1_to_set;
            flags.heritable |= heritable_to_set;
            self.advance()?;
        }
    }

    /// Callarray flags that may precede `setup`.
    fn parse_per_array_flags(&mut self) -> Parse<u32> {
        let mut result = 0;
        loop {
            result |= match self.current_symbol()?.as_str() {
                "simple_funny" => caf::FACING_FUNNY,
                "lateral_to_selectees" => caf::LATERAL_TO_SELECTEES,
                "split_to_box" => caf::SPLIT_TO_BOX,
                _ => return Ok(result),
            };
            self.advance()?;
        }
    }

    /// Starts at `setup`.
    fn parse_array_groups(&mut self, incoming: u32) -> Parse<Vec<ArrayGroup>> {
        let mut groups = Vec::new();
        let mut group = ArrayGroup {
            alternate: None,
            defs: Vec::new(),
        };
        let mut carried = incoming;
        loop {
            group.defs.push(self.parse_array_def(carried)?);
            if self.tok.is_none() {
                break;
            }
            let word = self.current_symbol()?;
            carried = 0;
            if word != "setup" {
                if word != "alternate_definition" {
                    break;
                }
                let alternate = self.parse_alternate_header()?;
                self.advance()?;
                carried = self.parse_per_array_flags()?;
                if !self.is_symbol("setup") {
                    return self.syntax("Need \"setup\" indicator");
                }
                let next = ArrayGroup {
                    alternate: Some(alternate),
                    defs: Vec::new(),
                };
                groups.push(std::mem::replace(&mut group, next));
            }
        }
        groups.push(group);
        Ok(groups)
    }

    fn parse_array_def(&mut self, carried: u32) -> Parse<ArrayDef> {
        let mut flags1 = carried;
        let mut flags2 = 0;
        let mut restriction = 0;
        let mut qualifier = 0;

        let word = self.expect_symbol("Improper starting setup")?;
        let Some(start) = start_setup(&word) else {
            return Err(self.fail(CompileErrorKind::Unknown("start setup")));
        };
        let size = begin_size(start).unwrap_or(0);
        let word = self.expect_symbol("Improper ending setup")?;
        let Some(end_index) = lookup(END_SETUPS, &word) else {
            return Err(self.fail(CompileErrorKind::Unknown("ending setup")));
        };
        let mut end = EndSetup::Plain(end_index as u8);

        let body = loop {
            self.advance()?;
            let word = self.current_symbol()?;
            match word.as_str() {
                "array" => {
                    self.advance()?;
                    let entries = self.parse_callarray(size, false)?;
                    self.advance_or_eof()?;
                    break ArrayBody::Plain(entries);
                }
                "preds" => {
                    let text = self.expect_string("Missing string")?;
                    let clauses = self.parse_pred_clauses(size)?;
                    break ArrayBody::Preds {
                        message: PredsMessage::Text(text),
                        clauses,
                    };
                }
                "predscantdo" | "predscantdocallinsetup" | "predsnoselect" => {
                    let canned = match word.as_str() {
                        "predscantdo" => CannedMessage::CantDo,
                        "predscantdocallinsetup" => CannedMessage::CantDoCallInSetup,
                        _ => CannedMessage::NoSelect,
                    };
                    let clauses = self.parse_pred_clauses(size)?;
                    break ArrayBody::Preds {
                        message: PredsMessage::Canned(canned),
                        clauses,
                    };
                }
                "qualifier" => {
                    if qualifier != 0 {
                        return self.syntax("Only one qualifier is allowed");
                    }
                    qualifier = self.parse_qualifier()?;
                }
                "restriction" => {
                    let (bits, code) = self.parse_restriction()?;
                    flags2 |= bits;
                    restriction = code;
                }
                "rotate" => flags1 |= caf::ROT,
                "no_cutting_through" => flags1 |= caf::NO_CUTTING_THROUGH,
                "no_facing_ends" => flags1 |= caf::NO_FACING_ENDS,
                "other_elongate" => flags1 |= caf::OTHER_ELONGATE,
                "really_want_diamond" => flags1 |= caf::REALLY_WANT_DIAMOND,
                "no_compress" => flags1 |= caf::NO_COMPRESS,
                "plus_eighth_rotation" => flags1 |= caf::PLUSEIGHTH_ROTATION,
                "concendsetup" if matches!(end, EndSetup::Plain(_)) => {
                    if end_index != NORMAL_CONCENTRIC {
                        return self.syntax("concendsetup with wrong end_setup");
                    }
                    let inner = self.parse_setup_specifier()?;
                    let outer = self.parse_setup_specifier()?;
                    match self.expect_number("Improper second rotation")? {
                        0 => {}
                        1 => flags1 |= caf::ROT_OUT,
                        _ => return self.syntax("Improper second rotation"),
                    }
                    end = EndSetup::Concentric { inner, outer };
                }
                _ => {
                    return self.syntax("Item in illegal context while parsing setups/preds/arrays")
                }
            }
        };

        Ok(ArrayDef {
            start: start as u8,
            end,
            flags: flags1 | flags2,
            restriction,
            qualifier,
            body,
        })
    }

    fn parse_setup_specifier(&mut self) -> Parse<u8> {
        let word = self.expect_symbol("Improper setup specifier")?;
        match lookup(END_SETUPS, &word) {
            Some(i) => Ok(i as u8),
            None => Err(self.fail(CompileErrorKind::Unknown("setup specifier"))),
        }
    }

    fn parse_qualifier(&mut self) -> Parse<u32> {
        let mut bits = 0;
        self.advance()?;
        loop {
            let Some(Token::Symbol(word)) = &self.tok else {
                break;
            };
            match word.as_str() {
                "left" | "out" => bits |= qual::LEFT,
                "right" | "in" => bits |= qual::RIGHT,
                "live" => bits |= qual::LIVE,
                "tbone" | "ntbone" => {
                    if bits & (qual::TBONE | qual::NTBONE) != 0 {
                        return self.syntax("Can't specify both \"tbone\" and \"ntbone\"");
                    }
                    bits |= if word == "tbone" {
                        qual::TBONE
                    } else {
                        qual::NTBONE
                    };
                }
                "explicit" => {
                    if bits & (qual::TBONE | qual::NTBONE) != 0 {
                        return self.syntax("Can't specify \"explicit\" and \"tbone\"");
                    }
                    bits |= qual::TBONE | qual::NTBONE;
                }
                "num" => {
                    let n = self.expect_number("Need a qualifier number here")?;
                    if n > qual::MAX_NUM {
                        return self.syntax("Number may not be greater than 14");
                    }
                    bits |= (n + 1) * qual::NUM_BIT;
                }
                _ => break,
            }
            self.advance()?;
        }
        let Some(Token::Symbol(word)) = &self.tok else {
            return self.syntax("Improper qualifier");
        };
        match lookup(QUALIFIERS, word) {
            Some(code) => Ok(bits | code as u32),
            None => Err(self.fail(CompileErrorKind::Unknown("qualifier"))),
        }
    }

    fn parse_restriction(&mut self) -> Parse<(u32, u8)> {
        const IMPROPER: &str = "Improper restriction specifier";
        let mut word = self.expect_symbol(IMPROPER)?;
        let strength = match word.as_str() {
            "unusual" => caf::RESTR_UNUSUAL,
            "forbidden" => caf::RESTR_FORBID,
            "resolve_ok" => caf::RESTR_RESOLVE_OK,
            "controversial" => caf::RESTR_CONTROVERSIAL,
            "serious_violation" => caf::RESTR_BOGUS,
            "assume_dpt" => caf::RESTR_ASSUME_DPT,
            "each_1x3" => caf::RESTR_EACH_1X3,
            _ => 0,
        };
        if strength != 0 {
            word = self.expect_symbol(IMPROPER)?;
        }
        match lookup(QUALIFIERS, &word) {
            Some(code) => Ok((strength, code as u8)),
            None => Err(self.fail(CompileErrorKind::Unknown("restriction specifier"))),
        }
    }

    /// Leaves the lookahead at the first token that does not start a clause.
    fn parse_pred_clauses(&mut self, size: usize) -> Parse<Vec<PredClause>> {
        let mut clauses = Vec::new();
        loop {
            self.advance_or_eof()?;
            if !self.is_symbol("if") {
                return Ok(clauses);
            }
            let word = self.expect_symbol("Improper predicate")?;
            let Some(predicate) = Predicate::from_name(&word) else {
                return Err(self.fail(CompileErrorKind::Unknown("predicate")));
            };
            self.advance()?;
            let entries = self.parse_callarray(size, false)?;
            clauses.push(PredClause { predicate, entries });
        }
    }

    /// Starts at `[`, ends at `]`.
    fn parse_callarray(&mut self, expected: usize, matrix: bool) -> Parse<Vec<CallArrayEntry>> {
        if !self.is(&Token::LeftBracket) {
            return self.syntax("Missing left bracket in callarray list");
        }
        let mut entries = Vec::new();
        loop {
            self.advance()?;
            let entry = match &self.tok {
                Some(Token::RightBracket) => break,
                Some(Token::Number(0)) => CallArrayEntry::Empty,
                Some(Token::Symbol(text)) => {
                    let parsed = parse_destination(text);
                    let mut dest = self.check(parsed)?;
                    if matrix {
                        let y = self.expect_number("Improper y coordinate")?;
                        match u16::try_from(y) {
                            Ok(y) => dest.y = Some(y),
                            Err(_) => return self.syntax("Improper y coordinate"),
                        }
                    }
                    CallArrayEntry::Dest(dest)
                }
                _ => return self.syntax("Improper callarray element"),
            };
            entries.push(entry);
        }
        if entries.len() != expected {
            return Err(self.fail(CompileErrorKind::CallArrayLength {
                found: entries.len(),
                expected,
            }));
        }
        Ok(entries)
    }

    /// Starts at the schema word.
    fn parse_matrix(&mut self, kind: SchemaKind) -> Parse<Definition> {
        let count = kind.matrix_entries().unwrap_or(2);
        let mut flags = 0u32;
        loop {
            self.advance()?;
            let Some(Token::Symbol(word)) = &self.tok else {
                break;
            };
            match lookup(MATRIX_FLAGS, word) {
                Some(bit) => flags |= 1 << bit,
                None => return Err(self.fail(CompileErrorKind::Unknown("matrix call flag"))),
            }
        }

        let mut groups = Vec::new();
        let mut alternate = None;
        loop {
            let entries = self.parse_callarray(count, true)?;
            groups.push(MatrixGroup { alternate, entries });
            self.advance_or_eof()?;
            if !self.is_symbol("alternate_definition") {
                break;
            }
            alternate = Some(self.parse_alternate_header()?);
            self.advance()?;
        }
        Ok(Definition::Matrix { flags, groups })
    }

    /// Starts at `alternate_definition`, ends at the level word.
    fn parse_alternate_header(&mut self) -> Parse<AlternateHeader> {
        self.advance()?;
        if !self.is(&Token::LeftBracket) {
            return self.syntax("Missing left bracket in alternate_definition list");
        }
        let mut keys = 0;
        self.advance()?;
        while !self.is(&Token::RightBracket) {
            let Some(Token::Symbol(word)) = &self.tok else {
                return self.syntax("Improper alternate_definition key");
            };
            let Some(bits) = alternate_key_bits(word) else {
                return Err(self.fail(CompileErrorKind::Unknown("alternate_definition key")));
            };
            if !inherit::merge(&mut keys, bits) {
                return self.syntax("Can't specify this combination of flags");
            }
            self.advance()?;
        }
        let word = self.expect_symbol("Improper alternate_definition level")?;
        let level = Level::from_str(&word)
            .map_err(|_| self.fail(CompileErrorKind::Unknown("alternate_definition level")))?;
        Ok(AlternateHeader { level, keys })
    }

    /// A sub-call tag and its modifier list; ends at `]`.
    fn parse_subcall(
        &mut self,
        improper: &'static str,
        is_seq: bool,
        flags: CallFlags,
    ) -> Parse<SubCall> {
        let word = self.expect_symbol(improper)?;
        let tag = self.reference_tag(&word)?;
        let (modifiers1, modifiersh) = self.parse_defmods(is_seq, flags.heritable)?;
        Ok(SubCall {
            tag,
            modifiers1,
            modifiersh,
        })
    }

    fn parse_defmods(&mut self, is_seq: bool, heritable: u32) -> Parse<(u32, u32)> {
        self.advance()?;
        if !self.is(&Token::LeftBracket) {
            return self.syntax("Missing left bracket in defmod list");
        }
        let mut rr1 = 0;
        let mut rrh = 0;
        self.advance()?;
        while !self.is(&Token::RightBracket) {
            let Some(Token::Symbol(word)) = &self.tok else {
                return self.syntax("Improper defmod key");
            };
            let word = word.clone();
            self.apply_defmod(&word, is_seq, heritable, &mut rr1, &mut rrh)?;
            self.advance()?;
        }
        Ok((rr1, rrh))
    }

    fn apply_defmod(
        &mut self,
        word: &str,
        is_seq: bool,
        heritable: u32,
        rr1: &mut u32,
        rrh: &mut u32,
    ) -> Parse<()> {
        const NOT_INHERITED: &str =
            "Can't use an \"inherit\" flag unless corresponding top level flag is on";

        if let Some(i) = lookup(GENERAL_DEFMODS, word) {
            *rr1 |= 1 << i;
            return Ok(());
        }
        if is_seq {
            if let Some(i) = lookup(SEQUENCE_DEFMODS, word) {
                *rr1 |= 1 << i;
                return Ok(());
            }
        }

        let inherited_group = match word {
            "inherit_nxn" => Some(inherit::NXN_MASK),
            "inherit_mxn" => Some(inherit::MXN_MASK),
            "inherit_bigmatrix" => Some(inherit::MATRIX_12 | inherit::MATRIX_16),
            "inherit_revert" => Some(inherit::REVERT_MASK),
            "inherit_yoyo" => Some(inherit::YOYO),
            "inherit_gensting" => Some(inherit::GENEROUS),
            _ => None,
        };
        if let Some(mask) = inherited_group {
            if mask & !heritable != 0 {
                return self.syntax(NOT_INHERITED);
            }
            *rrh |= mask;
            return Ok(());
        }

        match word {
            "allow_plain_mod" => *rr1 |= dfm1::CALL_MOD_ALLOW_PLAIN_MOD,
            "or_secondary_call" => *rr1 |= dfm1::CALL_MOD_OR_SECONDARY,
            "mandatory_secondary_call" => *rr1 |= dfm1::CALL_MOD_MAND_SECONDARY,
            "shift_three_numbers" => *rr1 |= 3 * dfm1::NUM_SHIFT_BIT,
            "insert_number" | "insert_fractal" => {
                if *rr1 & dfm1::NUM_INSERT_MASK != 0 {
                    return self.syntax("Only one number insertion is allowed");
                }
                let n = self.expect_number("Need a number here")?;
                if !(1..8).contains(&n) {
                    return self.syntax("bad number");
                }
                *rr1 |= n * dfm1::NUM_INSERT_BIT;
                if word == "insert_fractal" {
                    *rr1 |= dfm1::FRACTAL_INSERT;
                }
            }
            _ => {
                if let Some(i) = lookup(INHERIT_DEFMODS, word) {
                    let bit = 1u32 << i;
                    // Reverse and left move around during inheritance, so
                    // they need no top-level flag.
                    if bit & !(heritable | inherit::REVERSE | inherit::LEFT) != 0 {
                        return self.syntax(NOT_INHERITED);
                    }
                    *rrh |= bit;
                    return Ok(());
                }
                let Some(bits) = force_key_bits(word) else {
                    return Err(self.fail(CompileErrorKind::Unknown("defmod key")));
                };
                if bits & heritable & !(inherit::REVERSE | inherit::LEFT) != 0 {
                    return self.syntax(
                        "Can't use a \"force\" flag unless corresponding top level flag is off",
                    );
                }
                if !inherit::merge(rrh, bits) {
                    return self.syntax("Redundant \"force\" flags");
                }
            }
        }
        Ok(())
    }
}

/// Parse a callarray destination such as `CAL12W`, `FR4E` or `1W`.
///
/// Digits anywhere in the word form the position; letters before the
/// position give stability, slide and roll; the last letter is the facing.
pub fn parse_destination(text: &str) -> Result<Destination, CompileErrorKind> {
    use StabilityCode as S;
    let improper = || CompileErrorKind::Syntax("Improper callarray specifier");

    let chars: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    let letters = chars.iter().filter(|c| !c.is_ascii_digit()).count();
    let position = chars
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |n, d| n.saturating_mul(10).saturating_add(d));

    let mut code = S::None;
    let mut reverse = false;
    let mut repetition = 0;
    let mut p = 0;
    while letters >= p + 2 {
        match chars[p] {
            'Z' => match (code, reverse) {
                (S::None, false) => reverse = true,
                _ => return Err(improper()),
            },
            'A' => match (code, reverse) {
                (S::None, false) => code = S::A,
                (S::A, false) => code = S::AA,
                (S::AA, false) => repetition += 1,
                (S::A, true) => code = S::AC,
                (S::AA, true) => close_repeat(&mut code, &mut repetition),
                _ => return Err(improper()),
            },
            'C' => match (code, reverse) {
                (S::None, false) => {
                    code = S::A;
                    reverse = true;
                }
                (S::A, false) => code = S::AC,
                (S::AA, false) => close_repeat(&mut code, &mut repetition),
                (S::A, true) => code = S::AA,
                (S::AA, true) => repetition += 1,
                _ => return Err(improper()),
            },
            _ => break,
        }
        p += 1;
    }

    let mut slide = None;
    if letters >= p + 2 {
        slide = match chars[p] {
            'F' => Some(SlideMark::F),
            'G' => Some(SlideMark::G),
            _ => None,
        };
        if slide.is_some() {
            p += 1;
        }
    }
    if repetition != 0 {
        return Err(improper());
    }

    let roll = if letters == p + 2 {
        Some(match chars[p] {
            'R' => RollMark::R,
            'L' => RollMark::L,
            'M' => RollMark::M,
            _ => return Err(improper()),
        })
    } else if letters == p + 1 {
        None
    } else {
        return Err(improper());
    };

    if !Destination::valid_position(position) {
        return Err(CompileErrorKind::Syntax("Callarray number out of range"));
    }
    let direction = chars
        .last()
        .and_then(|&c| Direction::from_char(c))
        .ok_or(CompileErrorKind::Syntax("Improper callarray direction specifier"))?;

    Ok(Destination {
        stability: Stability { code, reverse },
        slide,
        roll,
        position: position as u8,
        direction,
        y: None,
    })
}

/// The closing letter of a repeated stability run: `AAC`, `AAAC` or `AAAAC`.
fn close_repeat(code: &mut StabilityCode, repetition: &mut u32) {
    let closed = match *repetition {
        0 => StabilityCode::AAC,
        1 => StabilityCode::AAAC,
        2 => StabilityCode::AAAAC,
        _ => return,
    };
    *code = closed;
    *repetition = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn dest(text: &str) -> Destination {
        parse_destination(text).unwrap()
    }

    #[test]
    fn test_plain_destinations() {
        let d = dest("3W");
        assert_eq!(d.position, 3);
        assert_eq!(d.direction, West);
        assert_eq!(d.stability, Stability::default());
        assert_eq!(dest("0n").direction, North);
        assert_eq!(dest("36S").position, 36);
    }

    #[test]
    fn test_stability_letters() {
        let cases = [
            ("Z1N", StabilityCode::None, true),
            ("A1N", StabilityCode::A, false),
            ("C1N", StabilityCode::A, true),
            ("AC1N", StabilityCode::AC, false),
            ("CA1N", StabilityCode::AC, true),
            ("AAC1N", StabilityCode::AAC, false),
            ("AAAC1N", StabilityCode::AAAC, false),
            ("AAAAC1N", StabilityCode::AAAAC, false),
            ("CCA1N", StabilityCode::AAC, true),
            ("AA1N", StabilityCode::AA, false),
        ];
        for (text, code, reverse) in cases {
            assert_eq!(dest(text).stability, Stability { code, reverse }, "{text}");
        }
    }

    #[test]
    fn test_display_round_trip_of_spellings() {
        for text in ["CAL12W", "CAFL12W", "FR4E", "Z1N", "AAAC3S", "GM0W"] {
            let parsed = dest(text);
            let again = dest(&parsed.to_string());
            assert_eq!(parsed, again, "{text}");
        }
    }

    #[test]
    fn test_slide_and_roll() {
        let d = dest("FR4E");
        assert_eq!(d.slide, Some(SlideMark::F));
        assert_eq!(d.roll, Some(RollMark::R));
        let d = dest("gm2s");
        assert_eq!(d.slide, Some(SlideMark::G));
        assert_eq!(d.roll, Some(RollMark::M));
        assert_eq!(dest("L5N").roll, Some(RollMark::L));
    }

    #[test]
    fn test_bad_destinations() {
        let improper = Err(CompileErrorKind::Syntax("Improper callarray specifier"));
        assert_eq!(parse_destination("ZZ1N"), improper);
        assert_eq!(parse_destination("ZA1N"), improper);
        assert_eq!(parse_destination("AAA1N"), improper);
        assert_eq!(parse_destination("X1N"), improper);
        assert_eq!(parse_destination("XY1N"), improper);
        assert_eq!(
            parse_destination("25N"),
            Err(CompileErrorKind::Syntax("Callarray number out of range"))
        );
        assert_eq!(
            parse_destination("38N"),
            Err(CompileErrorKind::Syntax("Callarray number out of range"))
        );
        assert_eq!(
            parse_destination("4Q"),
            Err(CompileErrorKind::Syntax("Improper callarray direction specifier"))
        );
    }
}
