// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Formation encoding.
//!
//! This module contains type-safe representations of the shared data model:
//! - Direction: four-way facing direction
//! - Person, Identity: a dancer and their permanent identity
//! - Role, RoleSet: computed positional roles as a bitset
//! - SetupKind: the geometric shape and its static tables
//! - Formation: a setup kind plus its people
//! - layout: the packed three-word interchange layout

pub mod constants;
pub mod direction;
pub mod formation;
pub mod layout;
pub mod person;
pub mod role_set;
pub mod setup;

// Re-export for convenience
pub use constants::*;
pub use direction::Direction;
pub use formation::{Assumption, Formation, FormationError};
pub use layout::{LayoutError, PackedPerson};
pub use person::{Gender, Identity, Person, Roll, Slide};
pub use role_set::{Role, RoleSet};
pub use setup::{SetupAttributes, SetupKind};
