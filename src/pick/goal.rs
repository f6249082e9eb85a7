// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! What a search is for, and the options that shape it.

use crate::database::Level;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchGoal {
    Resolve,
    Reconcile,
    Normalize,
    Standardize,
    CreateAnyLines,
    CreateWaves,
    #[strum(serialize = "create_2fl")]
    Create2fl,
    #[strum(serialize = "create_li_lo")]
    CreateLiLo,
    CreateColumns,
    RandomCall,
    ConceptCall,
    LevelCall,
    #[strum(serialize = "8person_level_call")]
    EightPersonLevelCall,
}

impl SearchGoal {
    /// Goals that begin with the exhaustive scans before going random.
    pub fn scans_first(self) -> bool {
        use SearchGoal::*;
        matches!(
            self,
            Resolve
                | Reconcile
                | Normalize
                | Standardize
                | CreateAnyLines
                | CreateWaves
                | Create2fl
                | CreateLiLo
                | CreateColumns
        )
    }

    pub fn is_level_call(self) -> bool {
        matches!(self, SearchGoal::LevelCall | SearchGoal::EightPersonLevelCall)
    }

    /// Out of 8, how often a random pick puts a concept in front of the call.
    pub fn concept_odds(self) -> Option<u32> {
        match self {
            SearchGoal::Standardize => Some(STANDARDIZE_CONCEPT_PROBABILITY),
            SearchGoal::Resolve | SearchGoal::RandomCall | SearchGoal::ConceptCall => {
                Some(CONCEPT_PROBABILITY)
            }
            _ => None,
        }
    }
}

pub const CONCEPT_PROBABILITY: u32 = 2;
pub const STANDARDIZE_CONCEPT_PROBABILITY: u32 = 6;

/// How a found resolve is to be judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveGoodness {
    /// Only one-call right-and-left-grand, allemande or short promenade.
    OnlyNice,
    /// Any one-call resolve.
    Always,
    /// Accept at random.
    Maybe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOptions {
    pub calling_level: Level,
    pub beau_belle_level: Level,
    /// Run the concept scans for resolves that have good concepts.
    pub concept_scans: bool,
    /// Start every scan at the first call, for reproducible output.
    pub diagnostic_mode: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        PickOptions {
            calling_level: Level::Mainstream,
            beau_belle_level: Level::BEAU_BELLE,
            concept_scans: false,
            diagnostic_mode: false,
        }
    }
}

impl PickOptions {
    pub fn at_level(calling_level: Level) -> Self {
        PickOptions {
            calling_level,
            ..PickOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_goal_partition() {
        let scanning: Vec<SearchGoal> = SearchGoal::iter().filter(|g| g.scans_first()).collect();
        assert_eq!(scanning.len(), 9);
        assert!(!SearchGoal::RandomCall.scans_first());
        assert!(SearchGoal::EightPersonLevelCall.is_level_call());
        assert_eq!(SearchGoal::Standardize.concept_odds(), Some(6));
        assert_eq!(SearchGoal::Normalize.concept_odds(), None);
    }

    #[test]
    fn test_goal_names() {
        assert_eq!(SearchGoal::from_str("create_li_lo"), Ok(SearchGoal::CreateLiLo));
        assert_eq!(SearchGoal::Create2fl.to_string(), "create_2fl");
    }
}
