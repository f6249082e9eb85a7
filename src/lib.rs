// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A square dance call engine.
//!
//! Three pieces, used by a caller's assistant that executes calls:
//!
//! 1. **Formation encoding and selectors**: which dancers does "centers"
//!    or "boy 2" mean in this formation? See [`geometry`] and [`predicates`].
//! 2. **Call database compiler**: the call-definition language is compiled
//!    to a compact binary database. See [`compiler`] and [`database`].
//! 3. **Search/pick engine**: while looking for a resolve, choose the next
//!    call to try and fill in its blanks. See [`pick`].
//!
//! # Architecture
//!
//! The pick engine uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! The call catalog, built once from a loaded database:
//! - The main call list, with levels and resolve flags
//! - Tagging calls by class, and the circulating calls
//! - The concept sublists
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Pick state owned by one search:
//! - The current stage and the scan cursor
//! - The nested selector/direction/number/tagger/circcer iterators
//! - The running hash of choices, and the hashes already tried
//!
//! Both tiers live in a [`SearchContext`]. Independent searches each own
//! one, so nothing is shared between them.

pub mod compiler;
pub mod context;
pub mod database;
pub mod geometry;
pub mod pick;
pub mod predicates;
pub mod state;

// Re-export commonly used types
pub use compiler::{compile, CompileError, Compilation};
pub use context::{CallCatalog, SearchContext};
pub use database::{CallDatabase, CallRecord, Level};
pub use geometry::{Formation, Person, SetupKind};
pub use pick::{PickError, PickOptions, PickStage, ResolveGoodness, SearchGoal};
pub use predicates::{selectp, Selector, SelectorError};
