// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters live in the search context and are bumped by the pick
//! operations as they run.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    CallsPicked,
    LevelRejects,
    FlagRejects,
    ConceptsInserted,
    StageChanges,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    pub fn clear(&mut self) {
        self.stats = [0; COUNT];
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            let name: &'static str = counter.into();
            write!(f, "{name}={}", self.get(counter))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting() {
        let mut stats = Statistics::new();
        stats.increment_counter(Counters::FlagRejects);
        stats.increment_counter(Counters::FlagRejects);
        stats.increment_counter(Counters::CallsPicked);
        assert_eq!(stats.get(Counters::FlagRejects), 2);
        assert_eq!(stats.get(Counters::LevelRejects), 0);
        assert_eq!(
            stats.to_string(),
            "calls_picked=1 level_rejects=0 flag_rejects=2 concepts_inserted=0 stage_changes=0"
        );
        stats.clear();
        assert_eq!(stats.get(Counters::CallsPicked), 0);
    }
}
