// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pick failures.
//!
//! These are expected during a search. The caller moves on to the next
//! candidate; nothing is retried internally.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("no acceptable taggers in class {0}")]
    NoAcceptableTaggers(u8),
    #[error("level reject")]
    LevelReject,
    #[error("call not usable in this resolve")]
    FlagReject,
    #[error("no circulating calls")]
    NoCirccers,
    #[error("the call list is empty")]
    EmptyCallList,
    #[error("at most {max} numbers may be requested, not {requested}")]
    TooManyNumbers { requested: usize, max: usize },
}
