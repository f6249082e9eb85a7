// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The search/pick engine.
//!
//! A resolve search repeatedly builds candidates: an optional concept, a
//! call, and whatever blanks the call has (selector, direction, numbers,
//! tagger, circcer). The engine supplies those choices. It first scans the
//! call list exhaustively, in stages of decreasing pickiness, then falls
//! back to random search.
//!
//! All operations are methods on [`SearchContext`](crate::SearchContext).

mod errors;
mod goal;
mod iterate;
mod random;
mod scan;
mod stage;

pub use errors::PickError;
pub use goal::{
    PickOptions, ResolveGoodness, SearchGoal, CONCEPT_PROBABILITY, STANDARDIZE_CONCEPT_PROBABILITY,
};
pub use iterate::{
    BITS_PER_NUMBER_FIELD, DIRECTION_SCAN, MAX_NUMBER_FIELDS, SELECTOR_SCAN,
};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use stage::{PickStage, StageDescriptor};
