// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Filling in the blanks of a picked call.
//!
//! In an exhaustive stage each dimension steps through a fixed table; in
//! any other stage it draws at random. Either way the choice is folded
//! into the running hash.

use crate::context::{CatalogCall, SearchContext};
use crate::database::flags::cflag1;
use crate::pick::{PickError, PickStage};
use crate::predicates::{DirectionChoice, Selector};
use crate::state::Counters;

/// Selectors tried by the exhaustive scans, in order.
pub const SELECTOR_SCAN: [Selector; 8] = [
    Selector::Boys,
    Selector::Girls,
    Selector::Centers,
    Selector::Ends,
    Selector::Leads,
    Selector::Trailers,
    Selector::Beaus,
    Selector::Belles,
];

/// Directions tried by the exhaustive scans, in order.
pub const DIRECTION_SCAN: [DirectionChoice; 4] = [
    DirectionChoice::Left,
    DirectionChoice::Right,
    DirectionChoice::In,
    DirectionChoice::Out,
];

pub const BITS_PER_NUMBER_FIELD: u32 = 6;
/// Numbers that fit in the packed result.
pub const MAX_NUMBER_FIELDS: usize = 5;

/// First tagger at or after `from` that a scan may use.
fn next_scannable(taggers: &[CatalogCall], mut from: usize) -> usize {
    while from < taggers.len() && !taggers[from].usable_as_scanned_tagger() {
        from += 1;
    }
    from
}

impl SearchContext {
    fn selector_scan_len(&self) -> usize {
        if self.state.stage == PickStage::PlainNiceOnly {
            4
        } else if self.options().calling_level < self.options().beau_belle_level {
            6
        } else {
            SELECTOR_SCAN.len()
        }
    }

    /// Choose a selector for a call that needs one.
    ///
    /// When `allow_iteration` is false during a scan the call sits under a
    /// concept, and "centers" is used.
    pub fn do_selector_iteration(&mut self, allow_iteration: bool) -> Selector {
        let selector = if self.in_exhaustive_search() {
            if allow_iteration {
                let it = self.state.iterators.selector as usize;
                let selector = SELECTOR_SCAN[it % SELECTOR_SCAN.len()];
                let next = it + 1;
                self.state.iterators.selector = if next >= self.selector_scan_len() {
                    0
                } else {
                    next as u32
                };
                selector
            } else {
                Selector::Centers
            }
        } else {
            // Unsymmetrical selectors make for too many "couple #3" calls.
            let r = self.draw(Selector::resolve_eligible_count()) as usize;
            Selector::from_index(r).unwrap_or(Selector::Centers)
        };
        self.hash_choice(selector.index() as u32);
        selector
    }

    pub fn do_direction_iteration(&mut self) -> DirectionChoice {
        let direction = if self.in_exhaustive_search() {
            let it = self.state.iterators.direction as usize;
            let direction = DIRECTION_SCAN[it % DIRECTION_SCAN.len()];
            if self.state.iterators.selector == 0 {
                let wrap = if self.state.stage == PickStage::PlainNiceOnly {
                    2
                } else {
                    DIRECTION_SCAN.len()
                };
                let next = it + 1;
                self.state.iterators.direction = if next >= wrap { 0 } else { next as u32 };
            }
            direction
        } else {
            let limit = DirectionChoice::available_at(self.options().calling_level);
            let r = self.draw(limit) as usize;
            DirectionChoice::from_index(r).unwrap_or_default()
        };
        self.hash_choice(direction as u32);
        direction
    }

    /// Choose `howmany` numbers in 1..=4, packed six bits apiece.
    ///
    /// Scans give each number two bits of the iterator. Calls taking three
    /// or more numbers only ever get all ones from a scan; the random stage
    /// covers the rest.
    pub fn do_number_iteration(
        &mut self,
        howmany: usize,
        odd_only: bool,
        allow_iteration: bool,
    ) -> Result<u32, PickError> {
        if howmany > MAX_NUMBER_FIELDS {
            return Err(PickError::TooManyNumbers {
                requested: howmany,
                max: MAX_NUMBER_FIELDS,
            });
        }
        let exhaustive = self.in_exhaustive_search();
        let mut list = 0;
        for i in 0..howmany {
            let this = if allow_iteration && exhaustive {
                ((self.state.iterators.number >> (i * 2)) & 3) + 1
            } else if odd_only {
                (self.draw(2) << 1) + 1
            } else {
                self.draw(4) + 1
            };
            self.hash_choice(this - 1);
            list |= this << (i as u32 * BITS_PER_NUMBER_FIELD);
        }

        if exhaustive && self.state.iterators.inside_number_idle() {
            let mut it = self.state.iterators.number.wrapping_add(1);
            if odd_only {
                while it & 0x5555_5555 != 0 {
                    it = it.wrapping_add(it & it.wrapping_neg());
                }
            }
            if howmany >= 3 || it >> (howmany * 2) != 0 {
                it = 0;
            }
            self.state.iterators.number = it;
        }
        Ok(list)
    }

    /// Choose a tagging call of class `tagclass`, returned as
    /// `(tagclass << 5) | (index + 1)`.
    pub fn do_tagger_iteration(&mut self, tagclass: usize) -> Result<u32, PickError> {
        let class = tagclass as u8;
        let count = self.memo.taggers(tagclass).len();
        let tag = if self.in_exhaustive_search() {
            let taggers = self.memo.taggers(tagclass);
            let start = self.state.iterators.tagger as usize;
            let tag = next_scannable(taggers, start);
            if tag >= count {
                return Err(PickError::NoAcceptableTaggers(class));
            }
            if self.state.iterators.inside_tagger_idle() {
                let next = next_scannable(taggers, tag + 1);
                self.state.iterators.tagger = if next >= count { 0 } else { next as u32 };
            }
            tag
        } else {
            if count == 0 {
                return Err(PickError::NoAcceptableTaggers(class));
            }
            self.draw(count) as usize
        };
        self.hash_choice(tag as u32);

        // A random draw can land on a tagger barred from resolves.
        let barred = self.memo.taggers(tagclass)[tag].flags1 & cflag1::DONT_USE_IN_RESOLVE != 0;
        if barred {
            self.count(Counters::FlagRejects);
            return Err(PickError::FlagReject);
        }
        Ok(((tagclass as u32) << 5) | (tag as u32 + 1))
    }

    /// Choose a circulating call, returned as its circcer number (from 1).
    pub fn do_circcer_iteration(&mut self) -> Result<u32, PickError> {
        let count = self.memo.circcers().len();
        if count == 0 {
            return Err(PickError::NoCirccers);
        }
        let circcer = if self.in_exhaustive_search() {
            let value = self.state.iterators.circcer + 1;
            if self.state.iterators.inside_circcer_idle() {
                let next = self.state.iterators.circcer + 1;
                self.state.iterators.circcer = if next as usize >= count { 0 } else { next };
            }
            value
        } else {
            self.draw(count) + 1
        };
        self.hash_choice(circcer - 1);
        Ok(circcer)
    }
}
