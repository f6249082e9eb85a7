// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Packed three-word person layout.
//!
//! In memory a [`Person`] is a struct of named fields. This module is the one
//! place that knows the packed interchange layout:
//!
//! - `id1`: liveness, phantom and virtual flags, personal id, direction,
//!   roll, slide and moved bits;
//! - `id2`: computed role bits;
//! - `id3`: permanent identity bits.

use crate::geometry::{Direction, Identity, Person, Role, RoleSet, Roll, Slide};
use thiserror::Error;

pub const BIT_PERSON: u32 = 0x0000_0800;
pub const BIT_ACT_PHAN: u32 = 0x0000_0400;
pub const BIT_TANDVIRT: u32 = 0x0000_0200;
pub const PID_MASK: u32 = 0x0000_01C0;
pub const PID_SHIFT: u32 = 6;
/// Direction field: bit 0o10 marks North/South, the low two bits give the direction.
pub const DIR_FIELD: u32 = 0o13;
pub const ROLL_IS_R: u32 = 0x0200_0000;
pub const ROLL_IS_L: u32 = 0x0400_0000;
pub const ROLL_IS_M: u32 = 0x0600_0000;
pub const ROLL_MASK: u32 = 0x0600_0000;
pub const PERSON_MOVED: u32 = 0x0800_0000;
pub const SLIDE_IS_R: u32 = 0x1000_0000;
pub const SLIDE_IS_L: u32 = 0x2000_0000;
pub const SLIDE_MASK: u32 = 0x3000_0000;

const ID1_KNOWN: u32 = BIT_PERSON
    | BIT_ACT_PHAN
    | BIT_TANDVIRT
    | PID_MASK
    | DIR_FIELD
    | ROLL_MASK
    | PERSON_MOVED
    | SLIDE_MASK;

/// id2 bit for each role.
pub fn role_bit(role: Role) -> u32 {
    match role {
        Role::Center2 => 0x8000_0000,
        Role::Belle => 0x4000_0000,
        Role::Beau => 0x2000_0000,
        Role::Center6 => 0x1000_0000,
        Role::Outer2 => 0x0800_0000,
        Role::Outer6 => 0x0400_0000,
        Role::Trailer => 0x0200_0000,
        Role::Lead => 0x0100_0000,
        Role::CtrDmd => 0x0080_0000,
        Role::NotCtrDmd => 0x0040_0000,
        Role::Ctr1x4 => 0x0020_0000,
        Role::NotCtr1x4 => 0x0010_0000,
        Role::Ctr1x6 => 0x0008_0000,
        Role::NotCtr1x6 => 0x0004_0000,
        Role::Outer1x3 => 0x0002_0000,
        Role::NotOuter1x3 => 0x0001_0000,
        Role::Facing => 0x0000_8000,
        Role::NotFacing => 0x0000_4000,
        Role::Center => 0x0000_2000,
        Role::End => 0x0000_1000,
        Role::Center4 => 0x0000_0800,
        Role::OuterPairs => 0x0000_0400,
        Role::FaceFront => 0x0000_0200,
        Role::FaceBack => 0x0000_0100,
        Role::FaceLeft => 0x0000_0080,
        Role::FaceRight => 0x0000_0040,
    }
}

pub const ID3_NSG: u32 = 0x200;
pub const ID3_NSB: u32 = 0x100;
pub const ID3_NHG: u32 = 0x080;
pub const ID3_NHB: u32 = 0x040;
pub const ID3_HCOR: u32 = 0x020;
pub const ID3_SCOR: u32 = 0x010;
pub const ID3_HEAD: u32 = 0x008;
pub const ID3_SIDE: u32 = 0x004;
pub const ID3_BOY: u32 = 0x002;
pub const ID3_GIRL: u32 = 0x001;

/// A person as three packed words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedPerson {
    pub id1: u32,
    pub id2: u32,
    pub id3: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("id1 {0:#x} does not describe a live person")]
    NotAPerson(u32),
    #[error("id1 {0:#x} has an unknown direction encoding")]
    BadDirection(u32),
    #[error("id1 {0:#x} has unknown bits set")]
    UnknownBits(u32),
    #[error("identity bits id3 {id3:#x} disagree with personal id {pid}")]
    InconsistentIdentity { pid: u32, id3: u32 },
    #[error("id2 {0:#x} has unknown role bits set")]
    UnknownRoles(u32),
}

/// Permanent identity word for a dancer.
pub fn identity_bits(identity: Identity) -> u32 {
    let mut bits = if identity.is_boy() { ID3_BOY } else { ID3_GIRL };
    bits |= if identity.is_head() { ID3_HEAD } else { ID3_SIDE };
    bits |= if identity.is_head_corner() {
        ID3_HCOR
    } else {
        ID3_SCOR
    };
    // Every dancer carries the "not" bits of the three categories they are not in.
    let own = match (identity.is_head(), identity.is_boy()) {
        (true, true) => ID3_NHB,
        (true, false) => ID3_NHG,
        (false, true) => ID3_NSB,
        (false, false) => ID3_NSG,
    };
    bits | ((ID3_NSG | ID3_NSB | ID3_NHG | ID3_NHB) & !own)
}

pub fn direction_bits(direction: Direction) -> u32 {
    match direction {
        Direction::North => 0o10,
        Direction::East => 0o01,
        Direction::South => 0o12,
        Direction::West => 0o03,
    }
}

pub fn encode(person: &Person) -> PackedPerson {
    let mut id1 = BIT_PERSON | direction_bits(person.direction);
    if person.active_phantom {
        id1 |= BIT_ACT_PHAN;
    }
    if person.virtual_person {
        id1 |= BIT_TANDVIRT;
    }
    if let Some(identity) = person.identity {
        id1 |= u32::from(identity.pid()) << PID_SHIFT;
    }
    id1 |= match person.roll {
        None => 0,
        Some(Roll::Right) => ROLL_IS_R,
        Some(Roll::Left) => ROLL_IS_L,
        Some(Roll::Neutral) => ROLL_IS_M,
    };
    if person.moved {
        id1 |= PERSON_MOVED;
    }
    id1 |= match person.slide {
        None => 0,
        Some(Slide::Right) => SLIDE_IS_R,
        Some(Slide::Left) => SLIDE_IS_L,
    };

    let id2 = person.roles.iter().fold(0, |bits, role| bits | role_bit(role));
    let id3 = person.identity.map_or(0, identity_bits);
    PackedPerson { id1, id2, id3 }
}

pub fn decode(packed: PackedPerson) -> Result<Person, LayoutError> {
    let PackedPerson { id1, id2, id3 } = packed;
    if id1 & BIT_PERSON == 0 {
        return Err(LayoutError::NotAPerson(id1));
    }
    if id1 & !ID1_KNOWN != 0 {
        return Err(LayoutError::UnknownBits(id1));
    }
    let direction = match id1 & DIR_FIELD {
        0o10 => Direction::North,
        0o01 => Direction::East,
        0o12 => Direction::South,
        0o03 => Direction::West,
        _ => return Err(LayoutError::BadDirection(id1)),
    };

    let pid = (id1 & PID_MASK) >> PID_SHIFT;
    let identity = if id3 == 0 {
        if pid != 0 {
            return Err(LayoutError::InconsistentIdentity { pid, id3 });
        }
        None
    } else {
        let identity = Identity::from_pid(pid as u8)
            .filter(|&identity| identity_bits(identity) == id3)
            .ok_or(LayoutError::InconsistentIdentity { pid, id3 })?;
        Some(identity)
    };

    let mut roles = RoleSet::empty();
    let mut seen = 0;
    for role in RoleSet::from_bits(u32::MAX).iter() {
        let bit = role_bit(role);
        seen |= bit;
        if id2 & bit != 0 {
            roles.insert(role);
        }
    }
    if id2 & !seen != 0 {
        return Err(LayoutError::UnknownRoles(id2));
    }

    let roll = match id1 & ROLL_MASK {
        ROLL_IS_R => Some(Roll::Right),
        ROLL_IS_L => Some(Roll::Left),
        ROLL_IS_M => Some(Roll::Neutral),
        _ => None,
    };
    let slide = match id1 & SLIDE_MASK {
        SLIDE_IS_R => Some(Slide::Right),
        SLIDE_IS_L => Some(Slide::Left),
        0 => None,
        _ => return Err(LayoutError::UnknownBits(id1)),
    };

    Ok(Person {
        identity,
        virtual_person: id1 & BIT_TANDVIRT != 0,
        active_phantom: id1 & BIT_ACT_PHAN != 0,
        direction,
        roll,
        moved: id1 & PERSON_MOVED != 0,
        slide,
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Gender;
    use proptest::prelude::*;

    #[test]
    fn test_identity_words() {
        let b1 = Identity::new(1, Gender::Boy).unwrap();
        let g1 = Identity::new(1, Gender::Girl).unwrap();
        let b2 = Identity::new(2, Gender::Boy).unwrap();
        let g2 = Identity::new(2, Gender::Girl).unwrap();
        assert_eq!(
            identity_bits(b1),
            ID3_NSG | ID3_NSB | ID3_NHG | ID3_HCOR | ID3_HEAD | ID3_BOY
        );
        assert_eq!(
            identity_bits(g1),
            ID3_NSG | ID3_NSB | ID3_NHB | ID3_SCOR | ID3_HEAD | ID3_GIRL
        );
        assert_eq!(
            identity_bits(b2),
            ID3_NSG | ID3_NHG | ID3_NHB | ID3_SCOR | ID3_SIDE | ID3_BOY
        );
        assert_eq!(
            identity_bits(g2),
            ID3_NSB | ID3_NHG | ID3_NHB | ID3_HCOR | ID3_SIDE | ID3_GIRL
        );
    }

    #[test]
    fn test_direction_encoding() {
        let p = Person::girl(3, Direction::South).unwrap();
        let packed = encode(&p);
        assert_eq!(packed.id1 & DIR_FIELD, 0o12);
        assert_eq!(packed.id1 & PID_MASK, 5 << PID_SHIFT);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode(PackedPerson::default()),
            Err(LayoutError::NotAPerson(0))
        );
        let bad_dir = PackedPerson {
            id1: BIT_PERSON | 0o02,
            ..Default::default()
        };
        assert_eq!(decode(bad_dir), Err(LayoutError::BadDirection(bad_dir.id1)));
        let mut packed = encode(&Person::boy(1, Direction::North).unwrap());
        packed.id3 ^= ID3_HCOR | ID3_SCOR;
        assert!(matches!(
            decode(packed),
            Err(LayoutError::InconsistentIdentity { .. })
        ));
    }

    fn arb_person() -> impl Strategy<Value = Person> {
        (
            proptest::option::of((1u8..=4, any::<bool>())),
            any::<bool>(),
            any::<bool>(),
            0u8..4,
            0u8..4,
            any::<bool>(),
            0u8..3,
            any::<u32>(),
        )
            .prop_map(
                |(id, virtual_person, active_phantom, dir, roll, moved, slide, roles)| Person {
                    identity: id.and_then(|(couple, girl)| {
                        Identity::new(couple, if girl { Gender::Girl } else { Gender::Boy })
                    }),
                    virtual_person,
                    active_phantom,
                    direction: Direction::from_bits(dir),
                    roll: [None, Some(Roll::Right), Some(Roll::Left), Some(Roll::Neutral)]
                        [roll as usize],
                    moved,
                    slide: [None, Some(Slide::Right), Some(Slide::Left)][slide as usize],
                    roles: RoleSet::from_bits(roles).intersection(RoleSet::from_bits(
                        (1u32 << <Role as strum::EnumCount>::COUNT) - 1,
                    )),
                },
            )
    }

    proptest! {
        #[test]
        fn test_layout_round_trip(person in arb_person()) {
            prop_assert_eq!(decode(encode(&person)), Ok(person));
        }
    }
}
