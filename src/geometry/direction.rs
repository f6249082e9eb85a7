// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Facing directions.
//!
//! Directions are relative to the formation's own frame: North is "up" in the
//! formation diagram. The formation rotation maps this frame onto the hall.

use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

/// A four-way facing direction, numbered clockwise from North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCountMacro)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Direction from the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// The two-bit code: North 0, East 1, South 2, West 3.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Turn clockwise by the given number of quarter turns.
    pub const fn rotate(self, quarter_turns: u8) -> Self {
        Self::from_bits(self.bits().wrapping_add(quarter_turns))
    }

    pub const fn opposite(self) -> Self {
        self.rotate(2)
    }

    /// The direction on this direction's right hand.
    pub const fn right(self) -> Self {
        self.rotate(1)
    }

    /// The direction on this direction's left hand.
    pub const fn left(self) -> Self {
        self.rotate(3)
    }

    pub const fn is_north_south(self) -> bool {
        self.bits() & 1 == 0
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Direction::West.rotate(1), Direction::North);
        assert_eq!(Direction::North.rotate(6), Direction::South);
        for d in Direction::iter() {
            assert_eq!(d.right().left(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_char_round_trip() {
        for d in Direction::iter() {
            assert_eq!(Direction::from_char(d.to_char()), Some(d));
        }
        assert_eq!(Direction::from_char('X'), None);
    }

    #[test]
    fn test_axis() {
        assert!(Direction::North.is_north_south());
        assert!(Direction::South.is_north_south());
        assert!(!Direction::East.is_north_south());
    }
}
