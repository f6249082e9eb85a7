// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable pick-state building blocks.
//!
//! - `iterators`: the nested exhaustive-scan counters
//! - `statistics`: per-context counters

pub mod iterators;
pub mod statistics;

pub use iterators::Iterators;
pub use statistics::{Counters, Statistics};
