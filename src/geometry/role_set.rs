// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! RoleSet type for representing the computed positional roles of a person.
//!
//! A RoleSet is a compact bitset where bit i represents the presence of the
//! role with discriminant i.
//!
//! # Examples
//!
//! ```
//! use sd_engine::geometry::{Role, RoleSet};
//!
//! let mut set = RoleSet::empty();
//! set.insert(Role::Beau);
//! set.insert(Role::Center);
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(Role::Beau));
//! assert_eq!(format!("{}", set), "|beau center|");
//! ```

use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

/// A computed role.
///
/// Roles come in exclusive pairs; a person carrying neither member of a
/// pair is not described by that pair at all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCountMacro, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Role {
    Center2,
    Belle,
    Beau,
    Center6,
    Outer2,
    Outer6,
    Trailer,
    Lead,
    CtrDmd,
    NotCtrDmd,
    Ctr1x4,
    NotCtr1x4,
    Ctr1x6,
    NotCtr1x6,
    Outer1x3,
    NotOuter1x3,
    Facing,
    NotFacing,
    Center,
    End,
    Center4,
    OuterPairs,
    FaceFront,
    FaceBack,
    FaceLeft,
    FaceRight,
}

impl Role {
    /// Roles that depend only on the slot, not on facing direction.
    ///
    /// These are the roles a phantom spot may be judged by.
    pub const POSITIONAL: RoleSet = RoleSet::of(&[
        Role::Center,
        Role::End,
        Role::Center2,
        Role::Center6,
        Role::Outer2,
        Role::Outer6,
        Role::CtrDmd,
        Role::NotCtrDmd,
        Role::Ctr1x4,
        Role::NotCtr1x4,
        Role::Ctr1x6,
        Role::NotCtr1x6,
        Role::Outer1x3,
        Role::NotOuter1x3,
        Role::Center4,
        Role::OuterPairs,
    ]);

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A set of roles represented as a bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u32);

impl RoleSet {
    /// Create an empty role set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a role set from a slice of roles, usable in constant tables.
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < roles.len() {
            bits |= 1 << roles[i] as u32;
            i += 1;
        }
        Self(bits)
    }

    /// Create a role set from a raw bit value.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Check if the set contains a specific role.
    pub const fn contains(self, role: Role) -> bool {
        (self.0 >> role as u32) & 1 != 0
    }

    /// Insert a role into the set.
    pub fn insert(&mut self, role: Role) {
        self.0 |= 1 << role as u32;
    }

    /// Remove a role from the set.
    pub fn remove(&mut self, role: Role) {
        self.0 &= !(1 << role as u32);
    }

    /// Keep only the roles also in `other`.
    pub const fn intersection(self, other: RoleSet) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: RoleSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Get the number of roles in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Iterate over all roles in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::iter().filter(move |&role| self.contains(role))
    }
}

impl fmt::Display for RoleSet {
    /// Format a role set as "|beau center|".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", role.name())?;
        }
        write!(f, "|")
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        Self::of(roles)
    }
}
