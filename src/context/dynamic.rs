// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable pick state (Tier 2: DYNAMIC).

use crate::pick::{PickStage, SearchGoal};
use crate::state::Iterators;
use std::collections::HashSet;

/// Where the exhaustive scan is in the call list.
///
/// The scan runs backward from just before `start`, wrapping below zero,
/// and is complete when it has handled `start` itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    pub start: i64,
    pub current: i64,
}

/// Position in the concept sublist during a concept scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConceptScan {
    pub index: usize,
    pub limit: usize,
}

/// Everything a pick changes.
///
/// Iterators only mean something while `stage` is exhaustive.
#[derive(Debug, Clone)]
pub struct DynamicState {
    pub stage: PickStage,
    pub goal: SearchGoal,
    pub iterators: Iterators,
    pub cursor: ScanCursor,
    pub concept_scan: ConceptScan,
    /// Running hash of every choice made for the current candidate.
    pub hash: u32,
    /// Hashes of candidates already tried, so a search never offers the
    /// same thing twice.
    pub seen: HashSet<u32>,
}

impl DynamicState {
    pub fn new() -> Self {
        DynamicState {
            stage: PickStage::NotPicking,
            goal: SearchGoal::Resolve,
            iterators: Iterators::default(),
            cursor: ScanCursor::default(),
            concept_scan: ConceptScan::default(),
            hash: 0,
            seen: HashSet::new(),
        }
    }
}

impl Default for DynamicState {
    fn default() -> Self {
        Self::new()
    }
}
