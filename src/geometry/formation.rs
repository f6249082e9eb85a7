// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Formations: a setup kind plus the people occupying its slots.
//!
//! Role bits are derived, never set directly: [`Formation::update_roles`]
//! recomputes every live person's [`RoleSet`] from the slot tables, the
//! lateral and tandem pairings, and the formation's rotation.

use crate::geometry::constants::{BITS_PER_PERSON, MAX_PEOPLE};
use crate::geometry::{Direction, Person, Role, RoleSet, SetupKind};
use thiserror::Error;

/// A caller-stated simplifying assumption, such as "assume waves".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Assumption {
    #[default]
    None,
    WaveOnly,
    Miniwaves,
    TwoFacedOnly,
    OneFacedOnly,
    CouplesOnly,
    LinesInOut,
    MagicOnly,
    AllFacingSame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("slot {slot} is outside a {kind} setup")]
    SlotOutOfRange { kind: SetupKind, slot: usize },
}

/// A formation of up to [`MAX_PEOPLE`] people.
///
/// An empty slot (`None`) is a phantom spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formation {
    kind: SetupKind,
    people: [Option<Person>; MAX_PEOPLE],
    pub assumption: Assumption,
    /// Quarter turns clockwise from the formation frame to the hall.
    pub rotation: u8,
    pub rotation_imprecise: bool,
}

impl Formation {
    /// An empty formation of the given kind.
    pub fn new(kind: SetupKind) -> Self {
        Self {
            kind,
            people: [None; MAX_PEOPLE],
            assumption: Assumption::None,
            rotation: 0,
            rotation_imprecise: false,
        }
    }

    /// Build a formation from per-slot people and derive their roles.
    pub fn from_people<I>(kind: SetupKind, people: I) -> Result<Self, FormationError>
    where
        I: IntoIterator<Item = Option<Person>>,
    {
        let mut formation = Self::new(kind);
        for (slot, person) in people.into_iter().enumerate() {
            if let Some(person) = person {
                formation.place(slot, person)?;
            }
        }
        formation.update_roles();
        Ok(formation)
    }

    pub fn kind(&self) -> SetupKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    /// Put a person in a slot. Roles are not updated.
    pub fn place(&mut self, slot: usize, person: Person) -> Result<(), FormationError> {
        if slot >= self.size() {
            return Err(FormationError::SlotOutOfRange {
                kind: self.kind,
                slot,
            });
        }
        self.people[slot] = Some(person);
        Ok(())
    }

    /// Empty a slot, leaving a phantom spot.
    pub fn clear(&mut self, slot: usize) {
        if slot < MAX_PEOPLE {
            self.people[slot] = None;
        }
    }

    pub fn person(&self, slot: usize) -> Option<&Person> {
        if slot < self.size() {
            self.people[slot].as_ref()
        } else {
            None
        }
    }

    pub fn is_live(&self, slot: usize) -> bool {
        self.person(slot).is_some()
    }

    pub fn live_count(&self) -> usize {
        (0..self.size()).filter(|&slot| self.is_live(slot)).count()
    }

    /// Directions of all people, two bits each, slot 0 in the most significant position.
    ///
    /// Phantom spots contribute zero bits.
    pub fn directions_word(&self) -> u32 {
        self.pack(|p| u32::from(p.direction.bits()))
    }

    /// Two set bits for each live slot, slot 0 in the most significant position.
    pub fn livemask_word(&self) -> u32 {
        self.pack(|_| 3)
    }

    fn pack(&self, bits: impl Fn(&Person) -> u32) -> u32 {
        (0..self.size()).fold(0u32, |word, slot| {
            let value = self.person(slot).map_or(0, &bits);
            (word << BITS_PER_PERSON) | value
        })
    }

    /// The slot this person would occupy if the setup were turned so that
    /// they face North.
    ///
    /// Single-row setups only turn by half turns; others by quarter turns.
    pub fn northified_index(&self, slot: usize) -> Option<usize> {
        let size = self.size();
        let d = usize::from(self.person(slot)?.direction.bits());
        let offset = if self.kind.is_single_row() {
            ((d >> 1) & 1) * (size / 2)
        } else {
            ((4 - d) * size) >> 2
        };
        Some((slot + offset) % size)
    }

    /// Recompute the role bits of every live person.
    pub fn update_roles(&mut self) {
        for slot in 0..self.size() {
            if let Some(person) = self.people[slot] {
                let roles = self.derive_roles(slot, &person);
                if let Some(p) = self.people[slot].as_mut() {
                    p.roles = roles;
                }
            }
        }
    }

    fn derive_roles(&self, slot: usize, person: &Person) -> RoleSet {
        let mut roles = self.kind.attributes().positional[slot];
        let d = person.direction;

        let lateral = if d.is_north_south() {
            self.kind.lateral_partner(slot)
        } else {
            self.kind.tandem_partner(slot)
        };
        if let Some((_, first)) = lateral {
            // Partner is on the right hand when facing North from the west slot,
            // South from the east slot, East from the north slot, West from the south slot.
            let partner_on_right = match d {
                Direction::North | Direction::East => first,
                Direction::South | Direction::West => !first,
            };
            roles.insert(if partner_on_right { Role::Beau } else { Role::Belle });
        }

        let tandem = if d.is_north_south() {
            self.kind.tandem_partner(slot)
        } else {
            self.kind.lateral_partner(slot)
        };
        if let Some((partner, first)) = tandem {
            // The first member of a pair is north (or west) of the second.
            let partner_behind = match d {
                Direction::North | Direction::West => first,
                Direction::South | Direction::East => !first,
            };
            roles.insert(if partner_behind { Role::Lead } else { Role::Trailer });

            let facing = !partner_behind
                && self
                    .person(partner)
                    .is_some_and(|p| p.direction == d.opposite());
            roles.insert(if facing { Role::Facing } else { Role::NotFacing });
        }

        if !self.rotation_imprecise {
            roles.insert(match d.rotate(self.rotation) {
                Direction::North => Role::FaceBack,
                Direction::East => Role::FaceRight,
                Direction::South => Role::FaceFront,
                Direction::West => Role::FaceLeft,
            });
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Gender;

    fn person(couple: u8, gender: Gender, d: Direction) -> Option<Person> {
        Person::new(couple, gender, d)
    }

    #[test]
    fn test_words_are_big_endian() {
        use Direction::*;
        let f = Formation::from_people(
            SetupKind::S1x4,
            [
                person(1, Gender::Boy, North),
                person(1, Gender::Girl, East),
                None,
                person(2, Gender::Girl, West),
            ],
        )
        .unwrap();
        assert_eq!(f.directions_word(), 0b00_01_00_11);
        assert_eq!(f.livemask_word(), 0b11_11_00_11);
        assert_eq!(f.live_count(), 3);
    }

    #[test]
    fn test_place_out_of_range() {
        let mut f = Formation::new(SetupKind::S2x2);
        let p = Person::active_phantom(Direction::North);
        assert_eq!(
            f.place(4, p),
            Err(FormationError::SlotOutOfRange {
                kind: SetupKind::S2x2,
                slot: 4
            })
        );
    }

    #[test]
    fn test_right_hand_wave_roles() {
        use Direction::*;
        // Right-hand wave: 0 N, 1 S, 3 N, 2 S.
        let f = Formation::from_people(
            SetupKind::S1x4,
            [
                person(1, Gender::Boy, North),
                person(1, Gender::Girl, South),
                person(2, Gender::Girl, South),
                person(2, Gender::Boy, North),
            ],
        )
        .unwrap();
        let roles = |slot| f.person(slot).unwrap().roles;
        // Everyone in a right-hand wave has a partner on the right.
        for slot in 0..4 {
            assert!(roles(slot).contains(Role::Beau), "slot {}", slot);
        }
        assert!(roles(1).contains(Role::Center));
        assert!(roles(0).contains(Role::End));
        assert!(!roles(0).contains(Role::Lead));
        assert!(!roles(0).contains(Role::Facing));
        assert!(!roles(0).contains(Role::NotFacing));
        assert!(roles(0).contains(Role::FaceBack));
        assert!(roles(1).contains(Role::FaceFront));
    }

    #[test]
    fn test_facing_couples_roles() {
        use Direction::*;
        // 0 1 face south, 3 2 face north.
        let f = Formation::from_people(
            SetupKind::S2x2,
            [
                person(1, Gender::Girl, South),
                person(1, Gender::Boy, South),
                person(3, Gender::Girl, North),
                person(3, Gender::Boy, North),
            ],
        )
        .unwrap();
        for slot in 0..4 {
            let roles = f.person(slot).unwrap().roles;
            assert!(roles.contains(Role::Facing), "slot {}", slot);
            assert!(roles.contains(Role::Trailer), "slot {}", slot);
        }
        // Facing south, slot 1 has its partner (slot 0) on the right.
        assert!(f.person(1).unwrap().roles.contains(Role::Beau));
        assert!(f.person(3).unwrap().roles.contains(Role::Beau));
    }

    #[test]
    fn test_column_roles() {
        use Direction::*;
        // Right-hand box: 0 and 3 face north, 1 and 2 face south.
        let f = Formation::from_people(
            SetupKind::S2x2,
            [
                person(1, Gender::Boy, North),
                person(1, Gender::Girl, South),
                person(2, Gender::Boy, South),
                person(2, Gender::Girl, North),
            ],
        )
        .unwrap();
        let roles = |slot| f.person(slot).unwrap().roles;
        assert!(roles(0).contains(Role::Lead));
        assert!(roles(3).contains(Role::Trailer));
        assert!(roles(1).contains(Role::Trailer));
        assert!(roles(2).contains(Role::Lead));
        assert!(roles(0).contains(Role::NotFacing));
    }

    #[test]
    fn test_east_west_tandem() {
        use Direction::*;
        // 1x2 with both facing east: slot 1 leads.
        let f = Formation::from_people(
            SetupKind::S1x2,
            [person(1, Gender::Boy, East), person(1, Gender::Girl, East)],
        )
        .unwrap();
        assert!(f.person(0).unwrap().roles.contains(Role::Trailer));
        assert!(f.person(1).unwrap().roles.contains(Role::Lead));

        let f = Formation::from_people(
            SetupKind::S1x2,
            [person(1, Gender::Boy, West), person(1, Gender::Girl, West)],
        )
        .unwrap();
        assert!(f.person(0).unwrap().roles.contains(Role::Lead));
        assert!(f.person(1).unwrap().roles.contains(Role::Trailer));
    }

    #[test]
    fn test_northified_index() {
        use Direction::*;
        let f = Formation::from_people(
            SetupKind::S1x4,
            [
                person(1, Gender::Boy, North),
                person(1, Gender::Girl, South),
                None,
                person(2, Gender::Boy, East),
            ],
        )
        .unwrap();
        assert_eq!(f.northified_index(0), Some(0));
        assert_eq!(f.northified_index(1), Some(3));
        assert_eq!(f.northified_index(3), Some(3));
        assert_eq!(f.northified_index(2), None);

        let f = Formation::from_people(
            SetupKind::S2x2,
            [
                person(1, Gender::Boy, East),
                person(1, Gender::Girl, West),
                person(2, Gender::Boy, South),
                person(2, Gender::Girl, North),
            ],
        )
        .unwrap();
        assert_eq!(f.northified_index(0), Some(3));
        assert_eq!(f.northified_index(1), Some(2));
        assert_eq!(f.northified_index(2), Some(0));
        assert_eq!(f.northified_index(3), Some(3));
    }

    #[test]
    fn test_imprecise_rotation_drops_absolute_facing() {
        use Direction::*;
        let mut f = Formation::new(SetupKind::S1x1);
        f.rotation_imprecise = true;
        f.place(0, person(4, Gender::Boy, East).unwrap()).unwrap();
        f.update_roles();
        let roles = f.person(0).unwrap().roles;
        assert!(!roles.contains(Role::FaceRight));
        assert!(roles.is_empty());
    }
}
