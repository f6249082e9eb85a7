// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! In-memory call records.
//!
//! A [`CallRecord`] is built once by the compiler (or the loader) and never
//! changes afterwards. Flag words stay raw; see [`crate::database::flags`].

use crate::database::{Level, Schema};
use crate::geometry::Direction;
use crate::predicates::Predicate;
use std::fmt;
use strum_macros::{Display, EnumIter, FromRepr};

/// Index into the compile-time tag table.
pub type TagId = u16;

/// Top-level flag words of one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallFlags {
    pub flags1: u32,
    /// Secondary flags that did not fit in `flags1`.
    pub overflow: u16,
    pub heritable: u32,
}

impl CallFlags {
    pub fn is_empty(&self) -> bool {
        self.flags1 == 0 && self.overflow == 0 && self.heritable == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub name: String,
    pub level: Level,
    pub tag: Option<TagId>,
    pub body: CallBody,
    /// Anonymous compound continuations, in source order.
    pub continuations: Vec<CallBody>,
}

impl CallRecord {
    /// Headers this record occupies in a database: itself plus continuations.
    pub fn header_count(&self) -> usize {
        1 + self.continuations.len()
    }

    /// Every body of the call, main one first.
    pub fn bodies(&self) -> impl Iterator<Item = &CallBody> {
        std::iter::once(&self.body).chain(self.continuations.iter())
    }
}

/// One definition of a call, with its own flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CallBody {
    pub flags: CallFlags,
    pub schema: Schema,
    pub definition: Definition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Nothing,
    Array(Vec<ArrayGroup>),
    Matrix {
        flags: u32,
        groups: Vec<MatrixGroup>,
    },
    Sequential(Vec<SubCall>),
    Concentric(SubCall, SubCall),
    Alias(TagId),
}

/// Introduces a group of alternative arrays, used when the call is
/// modified by the heritable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateHeader {
    pub level: Level,
    pub keys: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayGroup {
    pub alternate: Option<AlternateHeader>,
    pub defs: Vec<ArrayDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGroup {
    pub alternate: Option<AlternateHeader>,
    pub entries: Vec<CallArrayEntry>,
}

/// Ending setup of an array definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSetup {
    Plain(u8),
    /// Centers and ends end in separate setups.
    Concentric { inner: u8, outer: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    /// Index into the starting setup table.
    pub start: u8,
    pub end: EndSetup,
    /// Callarray flags, not including the bits implied by `end` and `body`.
    pub flags: u32,
    pub restriction: u8,
    pub qualifier: u32,
    pub body: ArrayBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayBody {
    Plain(Vec<CallArrayEntry>),
    /// Clauses are tried in order; the first whose predicate holds wins.
    Preds {
        message: PredsMessage,
        clauses: Vec<PredClause>,
    },
}

/// What to say when no predicate clause applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredsMessage {
    Text(String),
    Canned(CannedMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u16)]
pub enum CannedMessage {
    #[strum(serialize = "predscantdo")]
    CantDo,
    #[strum(serialize = "predscantdocallinsetup")]
    CantDoCallInSetup,
    #[strum(serialize = "predsnoselect")]
    NoSelect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredClause {
    pub predicate: Predicate,
    pub entries: Vec<CallArrayEntry>,
}

/// A reference to another call, with its definition modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCall {
    pub tag: TagId,
    pub modifiers1: u32,
    pub modifiersh: u32,
}

/// Where one starting position goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArrayEntry {
    /// This position has no legal action.
    Empty,
    Dest(Destination),
}

/// Which way a person turns on the way to their destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromRepr)]
#[repr(u8)]
pub enum StabilityCode {
    #[default]
    None,
    A,
    AC,
    AAC,
    AAAC,
    AAAAC,
    AA,
}

impl StabilityCode {
    fn letters(self) -> &'static str {
        match self {
            StabilityCode::None => "",
            StabilityCode::A => "A",
            StabilityCode::AC => "AC",
            StabilityCode::AAC => "AAC",
            StabilityCode::AAAC => "AAAC",
            StabilityCode::AAAAC => "AAAAC",
            StabilityCode::AA => "AA",
        }
    }
}

/// A stability code, possibly reversed (clockwise first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stability {
    pub code: StabilityCode,
    pub reverse: bool,
}

impl Stability {
    const REVERSE: u8 = 8;

    pub fn bits(self) -> u8 {
        self.code as u8 | if self.reverse { Self::REVERSE } else { 0 }
    }

    pub fn from_bits(bits: u8) -> Option<Stability> {
        Some(Stability {
            code: StabilityCode::from_repr(bits & 7)?,
            reverse: bits & Self::REVERSE != 0,
        })
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.reverse) {
            (StabilityCode::None, true) => f.write_str("Z"),
            (code, false) => f.write_str(code.letters()),
            (code, true) => {
                let swapped: String = code
                    .letters()
                    .chars()
                    .map(|c| if c == 'A' { 'C' } else { 'A' })
                    .collect();
                f.write_str(&swapped)
            }
        }
    }
}

/// The `F`/`G` slide indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SlideMark {
    F,
    G,
}

/// The `R`/`L`/`M` roll indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RollMark {
    R,
    L,
    M,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub stability: Stability,
    pub slide: Option<SlideMark>,
    pub roll: Option<RollMark>,
    /// Destination spot: 0..=24, or an even number up to 36.
    pub position: u8,
    pub direction: Direction,
    /// Matrix entries also carry a y coordinate.
    pub y: Option<u16>,
}

const STAB_SHIFT: u16 = 12;
const SLIDEROLL_SHIFT: u16 = 7;
const SLIDE_F: u16 = 16;
const SLIDE_G: u16 = 8;

impl Destination {
    /// Largest destination spot.
    pub const MAX_POSITION: u8 = 36;

    /// True if `position` can be encoded.
    pub fn valid_position(position: u32) -> bool {
        position <= 24 || (position <= u32::from(Self::MAX_POSITION) && position % 2 == 0)
    }

    /// The callarray halfword; never zero.
    pub fn encode(&self) -> u16 {
        let compressed = match self.position {
            p if p > 24 => u16::from(p >> 1) + 12,
            p => u16::from(p),
        };
        let slide = match self.slide {
            Some(SlideMark::F) => SLIDE_F,
            Some(SlideMark::G) => SLIDE_G,
            None => 0,
        };
        let roll = match self.roll {
            Some(RollMark::R) => 1,
            Some(RollMark::L) => 2,
            Some(RollMark::M) => 3,
            None => 0,
        };
        (u16::from(self.stability.bits()) << STAB_SHIFT)
            | ((slide | roll) << SLIDEROLL_SHIFT)
            | ((compressed + 1) << 2)
            | u16::from(self.direction.bits())
    }

    /// Decode a nonzero callarray halfword.
    pub fn decode(word: u16, y: Option<u16>) -> Option<Destination> {
        let compressed = (word >> 2) & 0x1F;
        let position = match compressed.checked_sub(1)? {
            p if p > 24 => (p - 12) * 2,
            p => p,
        };
        let slideroll = (word >> SLIDEROLL_SHIFT) & 0x1F;
        let slide = match slideroll & (SLIDE_F | SLIDE_G) {
            0 => None,
            SLIDE_F => Some(SlideMark::F),
            SLIDE_G => Some(SlideMark::G),
            _ => return None,
        };
        let roll = match slideroll & 3 {
            0 => None,
            1 => Some(RollMark::R),
            2 => Some(RollMark::L),
            _ => Some(RollMark::M),
        };
        Some(Destination {
            stability: Stability::from_bits((word >> STAB_SHIFT) as u8)?,
            slide,
            roll,
            position: position as u8,
            direction: Direction::from_bits(word as u8),
            y,
        })
    }
}

/// The callarray spelling, such as `CAL12W` or `FR4E`.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stability)?;
        if let Some(slide) = self.slide {
            write!(f, "{slide}")?;
        }
        if let Some(roll) = self.roll {
            write!(f, "{roll}")?;
        }
        write!(f, "{}{}", self.position, self.direction.to_char())?;
        if let Some(y) = self.y {
            write!(f, " {y}")?;
        }
        Ok(())
    }
}

impl CallArrayEntry {
    pub fn encode(&self) -> u16 {
        match self {
            CallArrayEntry::Empty => 0,
            CallArrayEntry::Dest(dest) => dest.encode(),
        }
    }
}

impl fmt::Display for CallArrayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArrayEntry::Empty => f.write_str("0"),
            CallArrayEntry::Dest(dest) => write!(f, "{dest}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn dest(position: u8, direction: Direction) -> Destination {
        Destination {
            stability: Stability::default(),
            slide: None,
            roll: None,
            position,
            direction,
            y: None,
        }
    }

    #[test]
    fn test_encode_known_words() {
        // Position 0 facing north is the smallest nonzero word.
        assert_eq!(dest(0, North).encode(), 0x0004);
        assert_eq!(dest(3, West).encode(), (4 << 2) | 3);
        let rolled = Destination {
            roll: Some(RollMark::R),
            ..dest(1, East)
        };
        assert_eq!(rolled.encode(), 0x80 | (2 << 2) | 1);
    }

    #[test]
    fn test_large_positions_compress() {
        let far = dest(36, South);
        assert_eq!((far.encode() >> 2) & 0x1F, 31);
        assert_eq!(Destination::decode(far.encode(), None), Some(far));
        assert!(Destination::valid_position(26));
        assert!(!Destination::valid_position(27));
        assert!(!Destination::valid_position(38));
    }

    #[test]
    fn test_decode_rejects_zero_position_field() {
        assert_eq!(Destination::decode(0x0001, None), None);
    }

    #[test]
    fn test_display_spelling() {
        let d = Destination {
            stability: Stability {
                code: StabilityCode::AC,
                reverse: true,
            },
            slide: Some(SlideMark::F),
            roll: Some(RollMark::L),
            position: 12,
            direction: West,
            y: None,
        };
        assert_eq!(d.to_string(), "CAFL12W");
        let z = Stability {
            code: StabilityCode::None,
            reverse: true,
        };
        assert_eq!(z.to_string(), "Z");
        assert_eq!(CallArrayEntry::Empty.to_string(), "0");
    }
}
