// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A dancer occupying a formation slot.
//!
//! Identity (couple number and gender) is permanent; everything in
//! [`RoleSet`] is recomputed from geometry whenever a formation is built.

use crate::geometry::constants::NCOUPLES;
use crate::geometry::{Direction, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Boy => Gender::Girl,
            Gender::Girl => Gender::Boy,
        }
    }
}

/// Permanent identity of a real dancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    couple: u8,
    gender: Gender,
}

impl Identity {
    /// Identity for couple `1..=4`, or `None` if the couple number is out of range.
    pub fn new(couple: u8, gender: Gender) -> Option<Self> {
        if (1..=NCOUPLES).contains(&couple) {
            Some(Self { couple, gender })
        } else {
            None
        }
    }

    pub fn couple(self) -> u8 {
        self.couple
    }

    pub fn gender(self) -> Gender {
        self.gender
    }

    pub fn is_boy(self) -> bool {
        self.gender == Gender::Boy
    }

    pub fn is_girl(self) -> bool {
        self.gender == Gender::Girl
    }

    /// Couples 1 and 3 are heads.
    pub fn is_head(self) -> bool {
        self.couple % 2 == 1
    }

    pub fn is_side(self) -> bool {
        !self.is_head()
    }

    /// Head boys and side girls start in the head corners.
    pub fn is_head_corner(self) -> bool {
        self.is_head() == self.is_boy()
    }

    pub fn is_side_corner(self) -> bool {
        !self.is_head_corner()
    }

    /// Personal id: `(couple - 1) * 2 + girl`, the index used by the packed layout.
    pub fn pid(self) -> u8 {
        (self.couple - 1) * 2 + u8::from(self.is_girl())
    }

    /// Inverse of [`Identity::pid`].
    pub fn from_pid(pid: u8) -> Option<Self> {
        let gender = if pid & 1 == 0 { Gender::Boy } else { Gender::Girl };
        Self::new((pid >> 1) + 1, gender)
    }
}

/// Roll direction left behind by the last movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Roll {
    Right,
    Left,
    Neutral,
}

/// Slide direction left behind by the last movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Right,
    Left,
}

/// A person in a formation slot.
///
/// Active phantoms and virtual (tandem or couples) people have no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Person {
    pub identity: Option<Identity>,
    pub virtual_person: bool,
    pub active_phantom: bool,
    pub direction: Direction,
    pub roll: Option<Roll>,
    pub moved: bool,
    pub slide: Option<Slide>,
    pub roles: RoleSet,
}

impl Person {
    /// A real dancer with no movement history and no computed roles.
    pub fn new(couple: u8, gender: Gender, direction: Direction) -> Option<Self> {
        Identity::new(couple, gender).map(|identity| Self {
            identity: Some(identity),
            active_phantom: false,
            ..Self::active_phantom(direction)
        })
    }

    pub fn boy(couple: u8, direction: Direction) -> Option<Self> {
        Self::new(couple, Gender::Boy, direction)
    }

    pub fn girl(couple: u8, direction: Direction) -> Option<Self> {
        Self::new(couple, Gender::Girl, direction)
    }

    /// A phantom that moves like a dancer but has no identity.
    pub fn active_phantom(direction: Direction) -> Self {
        Self {
            identity: None,
            virtual_person: false,
            active_phantom: true,
            direction,
            roll: None,
            moved: false,
            slide: None,
            roles: RoleSet::empty(),
        }
    }

    /// True for a real dancer: not virtual and not an active phantom.
    pub fn is_real(&self) -> bool {
        !self.virtual_person && !self.active_phantom
    }

    pub fn gender(&self) -> Option<Gender> {
        self.identity.map(Identity::gender)
    }
}
