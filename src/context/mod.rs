// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The SearchContext is the core data structure that combines:
//! - Tier 1 (MEMO): the immutable call catalog
//! - Tier 2 (DYNAMIC): the pick state, mutated by every pick operation
//!
//! Each search owns its context, so independent searches (a resolve and a
//! speculative "pick random call", say) never see each other's iterators.

mod dynamic;
mod memoized;

pub use dynamic::{ConceptScan, DynamicState, ScanCursor};
pub use memoized::{
    CallCatalog, CallId, CatalogCall, ConceptId, Requirements, NUM_TAGGER_CLASSES,
};

use crate::pick::{PickOptions, RandomSource, StdRandom};
use crate::state::{Counters, Statistics};

/// Multiplier of the running choice hash.
const HASH_MULTIPLIER: u32 = 1049633;

/// Search context combining MEMO and DYNAMIC state.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     memo: CallCatalog,         // Tier 1: Immutable, cloned per context
///     state: DynamicState,       // Tier 2: Mutable, owned
///     statistics: Statistics,    // Counters, owned
/// }
/// ```
///
/// # Example
///
/// ```ignore
/// let mut ctx = SearchContext::new(catalog, PickOptions::default());
/// ctx.start_pick(SearchGoal::Resolve);
/// loop {
///     let concept = ctx.pick_concept(false);
///     match ctx.do_pick() {
///         Ok(call) => { /* try it */ }
///         Err(_) => continue,
///     }
/// }
/// ctx.end_pick();
/// ```
#[derive(Debug)]
pub struct SearchContext {
    /// Immutable call catalog (Tier 1)
    pub memo: CallCatalog,
    /// Mutable pick state (Tier 2)
    pub state: DynamicState,
    pub statistics: Statistics,
    options: PickOptions,
    random: Box<dyn RandomSource>,
}

impl SearchContext {
    /// A context drawing from an entropy-seeded generator.
    pub fn new(memo: CallCatalog, options: PickOptions) -> Self {
        Self::with_random(memo, options, Box::new(StdRandom::from_entropy()))
    }

    /// A context drawing from the given source, for replayable searches.
    pub fn with_random(
        memo: CallCatalog,
        options: PickOptions,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            memo,
            state: DynamicState::new(),
            statistics: Statistics::new(),
            options,
            random,
        }
    }

    pub fn options(&self) -> &PickOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PickOptions) {
        self.options = options;
    }

    /// A random value in `0..modulus`. Callers guarantee `modulus > 0`.
    pub(crate) fn draw(&mut self, modulus: usize) -> u32 {
        self.random.below(modulus as u32)
    }

    /// Fold a choice into the running hash, as though it had been drawn at
    /// random, so that scanned and random choices hash alike.
    pub(crate) fn hash_choice(&mut self, n: u32) {
        self.state.hash = self
            .state
            .hash
            .wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(n);
    }

    pub(crate) fn count(&mut self, counter: Counters) {
        self.statistics.increment_counter(counter);
    }

    /// The hash of the choices made since it was last set.
    pub fn hash(&self) -> u32 {
        self.state.hash
    }

    /// Restore the hash saved before an earlier candidate.
    pub fn set_hash(&mut self, hash: u32) {
        self.state.hash = hash;
    }

    /// Note the current hash as tried. Returns `false` if it already was.
    pub fn remember_candidate(&mut self) -> bool {
        self.state.seen.insert(self.state.hash)
    }

    pub fn already_seen(&self) -> bool {
        self.state.seen.contains(&self.state.hash)
    }

    pub fn forget_candidates(&mut self) {
        self.state.seen.clear();
    }
}
