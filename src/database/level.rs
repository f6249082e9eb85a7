// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Dance levels, in increasing order of difficulty.

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString, FromRepr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    EnumCountMacro,
    EnumString,
    Display,
    FromRepr,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    #[default]
    Mainstream,
    Plus,
    A1,
    A2,
    C1,
    C2,
    C3a,
    C3,
    C3x,
    C4a,
    C4,
    C4x,
    #[strum(serialize = "dontshow")]
    DontShow,
}

impl Level {
    /// Beaus and belles are only searched for at this level and above.
    pub const BEAU_BELLE: Level = Level::A2;
    /// Zig-zag style directions become available here.
    pub const ZIG_ZAG: Level = Level::A2;
    /// "Face the music" becomes available here.
    pub const FACE_THE_MUSIC: Level = Level::C3a;

    /// Lowest level a call may have to be picked when calling at this level.
    ///
    /// Levels above C3x open the whole C3x list, and C3 and C3a share a floor.
    pub fn pick_threshold(self) -> Level {
        use Level::*;
        match self {
            Mainstream => Mainstream,
            Plus => Plus,
            A1 | A2 => A1,
            C1 => C1,
            C2 => C2,
            C3a | C3 | C3x => C3a,
            C4a | C4 | C4x => C3x,
            DontShow => DontShow,
        }
    }

    pub fn from_index(index: u8) -> Option<Level> {
        Level::from_repr(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_level_names() {
        assert_eq!(Level::from_str("c3a"), Ok(Level::C3a));
        assert_eq!(Level::from_str("dontshow"), Ok(Level::DontShow));
        assert_eq!(Level::C4x.to_string(), "c4x");
        assert!(Level::from_str("mainstreem").is_err());
    }

    #[test]
    fn test_ordering_and_thresholds() {
        assert!(Level::Mainstream < Level::Plus);
        assert!(Level::C3a < Level::C3);
        assert_eq!(Level::A2.pick_threshold(), Level::A1);
        assert_eq!(Level::C4.pick_threshold(), Level::C3x);
    }
}
