// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable call catalog (Tier 1: MEMO).
//!
//! Built once from a loaded database. Calls are sorted into the main list,
//! the tagger classes and the circulating calls, and each call's name is
//! scanned for the blanks a pick has to fill in.

use crate::database::flags::{cflag1, mtx};
use crate::database::{CallDatabase, CallRecord, Definition, Level};
use tracing::debug;

/// Index into the main call list.
pub type CallId = usize;
/// Index into the host's concept table.
pub type ConceptId = u16;

pub const NUM_TAGGER_CLASSES: usize = 4;

/// Blanks in a call name that must be filled before the call can be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub selector: bool,
    pub direction: bool,
    pub odd_number_only: bool,
    /// Tagger class of a nested tagging call.
    pub tagger: Option<u8>,
    pub circcer: bool,
}

impl Requirements {
    /// Scan a call name for `@` escapes.
    pub fn from_name(name: &str) -> Self {
        let mut needs = Requirements::default();
        let mut chars = name.chars();
        while let Some(c) = chars.next() {
            if c != '@' {
                continue;
            }
            match chars.next() {
                Some('6' | 'k' | 'K' | 'V') => needs.selector = true,
                Some('h') => needs.direction = true,
                Some('D') => needs.odd_number_only = true,
                Some('v') => needs.tagger = Some(0),
                Some('w') => needs.tagger = Some(1),
                Some('x') => needs.tagger = Some(2),
                Some('y') => needs.tagger = Some(3),
                Some('N') => needs.circcer = true,
                _ => {}
            }
        }
        needs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCall {
    pub name: String,
    pub level: Level,
    pub flags1: u32,
    pub needs: Requirements,
}

impl CatalogCall {
    pub fn new(name: &str, level: Level, flags1: u32) -> Self {
        CatalogCall {
            name: name.to_string(),
            level,
            flags1,
            needs: Requirements::from_name(name),
        }
    }

    fn from_record(record: &CallRecord) -> Self {
        let mut call = CatalogCall::new(&record.name, record.level, record.body.flags.flags1);
        if let Definition::Matrix { flags, .. } = &record.body.definition {
            if flags & mtx::USE_SELECTOR != 0 {
                call.needs.selector = true;
            }
            if flags & mtx::USE_NUMBER != 0 {
                call.flags1 |= cflag1::NUMBER_BIT;
            }
        }
        call
    }

    pub fn number_count(&self) -> usize {
        ((self.flags1 & cflag1::NUMBER_MASK) / cflag1::NUMBER_BIT) as usize
    }

    /// Tagger class this call belongs to, if it is a tagging call.
    pub fn tagger_class(&self) -> Option<usize> {
        match (self.flags1 & cflag1::BASE_TAG_CALL_MASK) / cflag1::BASE_TAG_CALL_BIT {
            0 => None,
            n => Some(n as usize - 1),
        }
    }

    pub fn is_circcer(&self) -> bool {
        self.flags1 & cflag1::BASE_CIRC_CALL != 0
    }

    /// Whether an exhaustive scan can use this call as a tagger.
    ///
    /// Anything that needs a further choice of its own is skipped.
    pub fn usable_as_scanned_tagger(&self) -> bool {
        self.flags1 & (cflag1::DONT_USE_IN_RESOLVE | cflag1::NUMBER_MASK) == 0
            && self.needs.tagger.is_none()
            && !self.needs.circcer
            && !self.needs.selector
            && !self.needs.direction
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallCatalog {
    calls: Vec<CatalogCall>,
    taggers: [Vec<CatalogCall>; NUM_TAGGER_CLASSES],
    circcers: Vec<CallId>,
    /// Concepts a random pick may insert.
    concepts: Vec<ConceptId>,
    /// The short list of concepts tried by the concept scans.
    scan_concepts: Vec<ConceptId>,
}

impl CallCatalog {
    pub fn from_database(database: &CallDatabase) -> Self {
        let catalog = CallCatalog::from_calls(database.calls.iter().map(CatalogCall::from_record));
        debug!(
            "catalog: {} calls, {} circcers, taggers {:?}",
            catalog.calls.len(),
            catalog.circcers.len(),
            catalog.taggers.iter().map(Vec::len).collect::<Vec<_>>()
        );
        catalog
    }

    /// Sort calls into the main list and the tagger classes.
    ///
    /// Every tagger is in class 0 as well as its own. A class 0 tagger that
    /// itself takes a tagger is also copied into every other class, needing
    /// a tagger of that class.
    pub fn from_calls(calls: impl IntoIterator<Item = CatalogCall>) -> Self {
        let mut catalog = CallCatalog::default();
        for call in calls {
            match call.tagger_class() {
                Some(class) if class < NUM_TAGGER_CLASSES => {
                    if class != 0 {
                        catalog.taggers[0].push(call.clone());
                    } else if call.needs.tagger.is_some() {
                        for other in 1..NUM_TAGGER_CLASSES {
                            let mut copy = call.clone();
                            copy.needs.tagger = Some(other as u8);
                            catalog.taggers[other].push(copy);
                        }
                    }
                    catalog.taggers[class].push(call);
                }
                _ => {
                    if call.is_circcer() {
                        catalog.circcers.push(catalog.calls.len());
                    }
                    catalog.calls.push(call);
                }
            }
        }
        catalog
    }

    pub fn with_concepts(mut self, concepts: Vec<ConceptId>, scan_concepts: Vec<ConceptId>) -> Self {
        self.concepts = concepts;
        self.scan_concepts = scan_concepts;
        self
    }

    pub fn calls(&self) -> &[CatalogCall] {
        &self.calls
    }

    pub fn call(&self, id: CallId) -> Option<&CatalogCall> {
        self.calls.get(id)
    }

    /// Taggers of one class; empty for an unknown class.
    pub fn taggers(&self, class: usize) -> &[CatalogCall] {
        self.taggers.get(class).map_or(&[], Vec::as_slice)
    }

    /// Main-list ids of the circulating calls.
    pub fn circcers(&self) -> &[CallId] {
        &self.circcers
    }

    pub fn concepts(&self) -> &[ConceptId] {
        &self.concepts
    }

    pub fn scan_concepts(&self) -> &[ConceptId] {
        &self.scan_concepts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger(name: &str, class: u32) -> CatalogCall {
        CatalogCall::new(name, Level::Plus, cflag1::BASE_TAG_CALL_BIT * (class + 1))
    }

    #[test]
    fn test_requirements_from_name() {
        let needs = Requirements::from_name("@6 run @h, then @v");
        assert!(needs.selector);
        assert!(needs.direction);
        assert_eq!(needs.tagger, Some(0));
        assert!(!needs.circcer);
        assert_eq!(Requirements::from_name("swing thru"), Requirements::default());
        assert!(Requirements::from_name("@N by @D").circcer);
        assert!(Requirements::from_name("@N by @D").odd_number_only);
    }

    #[test]
    fn test_tagger_classes() {
        let catalog = CallCatalog::from_calls([
            CatalogCall::new("swing thru", Level::Mainstream, 0),
            tagger("tag the line", 0),
            tagger("vertical tag", 1),
            tagger("revert @v", 0),
            CatalogCall::new("circulate", Level::Mainstream, cflag1::BASE_CIRC_CALL),
        ]);
        assert_eq!(catalog.calls().len(), 2);
        assert_eq!(catalog.circcers(), &[1]);
        let class0: Vec<&str> = catalog.taggers(0).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(class0, vec!["tag the line", "vertical tag", "revert @v"]);
        assert_eq!(catalog.taggers(1).len(), 2);
        assert_eq!(catalog.taggers(1)[1].needs.tagger, Some(1));
        assert_eq!(catalog.taggers(3)[0].needs.tagger, Some(3));
        assert!(catalog.taggers(9).is_empty());
    }

    #[test]
    fn test_scanned_tagger_usability() {
        assert!(tagger("tag the line", 0).usable_as_scanned_tagger());
        assert!(!tagger("revert @v", 0).usable_as_scanned_tagger());
        let mut numbered = tagger("@9/4 tag", 0);
        numbered.flags1 |= cflag1::NUMBER_BIT;
        assert_eq!(numbered.number_count(), 1);
        assert!(!numbered.usable_as_scanned_tagger());
        let mut barred = tagger("tag", 0);
        barred.flags1 |= cflag1::DONT_USE_IN_RESOLVE;
        assert!(!barred.usable_as_scanned_tagger());
    }

    #[test]
    fn test_from_database() {
        let source = r#"version "x"
call "@6 run" plus
   nulldefine
call "circulate" mainstream base_circ_call
   nulldefine
"#;
        let out = crate::compiler::compile(source).unwrap();
        let catalog = CallCatalog::from_database(&out.database);
        assert_eq!(catalog.calls().len(), 2);
        assert!(catalog.calls()[0].needs.selector);
        assert_eq!(catalog.circcers(), &[1]);
    }
}
