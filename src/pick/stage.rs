// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The ordered stages of a pick.

use strum_macros::{EnumCount as EnumCountMacro, EnumIter, FromRepr};

/// Stages run in declaration order; a search only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCountMacro, FromRepr,
)]
#[repr(u8)]
pub enum PickStage {
    StartingFirstScan,
    /// Plain calls, accepting only the nicest resolves.
    PlainNiceOnly,
    /// Concept plus call, accepting only the nicest resolves.
    ConceptNiceOnly,
    PlainAcceptAll,
    ConceptAcceptAll,
    RandomSearch,
    NotPicking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    pub exhaustive: bool,
    pub nice_only: bool,
    pub with_concept: bool,
    pub display: Option<&'static str>,
}

const fn descriptor(
    exhaustive: bool,
    nice_only: bool,
    with_concept: bool,
    display: Option<&'static str>,
) -> StageDescriptor {
    StageDescriptor {
        exhaustive,
        nice_only,
        with_concept,
        display,
    }
}

const DESCRIPTORS: [StageDescriptor; 7] = [
    descriptor(false, false, false, Some("pick start first scan")),
    descriptor(true, true, false, Some("pick plain nice scan")),
    descriptor(true, true, true, Some("pick concept nice scan")),
    descriptor(true, false, false, Some("pick plain any scan")),
    descriptor(true, false, true, Some("pick concept any scan")),
    descriptor(false, false, false, Some("pick random search")),
    descriptor(false, false, false, None),
];

impl PickStage {
    pub fn descriptor(self) -> &'static StageDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn is_exhaustive(self) -> bool {
        self.descriptor().exhaustive
    }

    pub fn is_nice_only(self) -> bool {
        self.descriptor().nice_only
    }

    pub fn has_concept(self) -> bool {
        self.descriptor().with_concept
    }

    /// Status line text, absent when not picking.
    pub fn display_name(self) -> Option<&'static str> {
        self.descriptor().display
    }

    /// The following stage; `NotPicking` is terminal.
    pub fn next(self) -> PickStage {
        PickStage::from_repr(self as u8 + 1).unwrap_or(PickStage::NotPicking)
    }
}
