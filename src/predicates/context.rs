// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Evaluation context for selectors and predicates.
//!
//! Selector evaluation is otherwise pure: everything it needs beyond the
//! formation comes from [`CallOptions`], and everything it reports beyond
//! its answer (usage flags and warnings) goes into [`EvalContext`].

use crate::database::Level;
use crate::predicates::{Selector, Warning};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, FromRepr};

/// The "direction" parameter of a call, such as "left" in "left spin the top".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCountMacro, Display, FromRepr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum DirectionChoice {
    #[default]
    #[strum(serialize = "no direction")]
    NoDirection,
    Left,
    Right,
    In,
    Out,
    Back,
    Zigzag,
    Zagzig,
    Zigzig,
    Zagzag,
    #[strum(serialize = "the music")]
    TheMusic,
}

impl DirectionChoice {
    /// How many directions, from the start of the enumeration, may be used
    /// when calling at `level`.
    pub fn available_at(level: Level) -> usize {
        if level < Level::ZIG_ZAG {
            DirectionChoice::Zigzag as usize
        } else if level < Level::FACE_THE_MUSIC {
            DirectionChoice::TheMusic as usize
        } else {
            DirectionChoice::TheMusic as usize + 1
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }
}

/// Whether, and how, the "some" selector may group people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SomeMode {
    #[default]
    Disallowed,
    /// Group people in pairs.
    Pairs,
    /// Group people in threes.
    Triples,
}

/// Parameters chosen for the call being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallOptions {
    /// The selector; `None` when the call was given no "who".
    pub who: Option<Selector>,
    pub direction: DirectionChoice,
    /// Number fields, six bits each.
    pub number_fields: u32,
    pub howmany: u32,
    pub tagger: u32,
    pub circcer: u32,
}

impl CallOptions {
    pub fn with_selector(selector: Selector) -> Self {
        Self {
            who: Some(selector),
            ..Self::default()
        }
    }

    pub fn with_direction(direction: DirectionChoice) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// The first number field.
    pub fn first_number(&self) -> u32 {
        self.number_fields & 63
    }
}

/// Caller-owned state for one call-application attempt.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub options: CallOptions,
    pub selector_used: bool,
    pub direction_used: bool,
    pub number_used: bool,
    pub warnings: Vec<Warning>,
}

impl EvalContext {
    pub fn new(options: CallOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Record a warning once.
    pub fn warn(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Clear usage flags and warnings before another attempt.
    pub fn reset(&mut self) {
        self.selector_used = false;
        self.direction_used = false;
        self.number_used = false;
        self.warnings.clear();
    }
}
