// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Selectors and predicates.
//!
//! This module answers "does this apply to the person at slot N" questions:
//!
//! - `selector`: the closed set of "who" designators
//! - `selectp`: selector evaluation against a formation
//! - `some`: the facing-based "some" grouping
//! - `proximity`: near/far/left/right halves of a 2x4
//! - `predicate`: the named predicates used by `if` clauses in definitions
//! - `context`: call options, usage flags and warnings for one evaluation
//! - `errors`: why an answer could not be given

pub mod context;
pub mod errors;
pub mod predicate;
pub mod proximity;
pub mod selector;
pub mod selectp;
pub mod some;

pub use context::{CallOptions, DirectionChoice, EvalContext, SomeMode};
pub use errors::{SelectorError, Warning};
pub use predicate::Predicate;
pub use selector::Selector;
pub use selectp::selectp;
