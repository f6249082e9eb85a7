// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Setup kinds and their static attribute tables.
//!
//! Slot numbering follows the classic diagrams, where numbering runs
//! clockwise-ish around the setup rather than row by row. For example:
//!
//! ```text
//! 1x4:   0 1 3 2
//! 2x2:   0 1
//!        3 2
//! 2x4:   0 1 2 3
//!        7 6 5 4
//! qtag:    0 1
//!        6 7 3 2
//!          5 4
//! 4x4:  12 13 14  0
//!       10 15  3  1
//!        9 11  7  5
//!        8  6  4  2
//! ```
//!
//! Each kind carries its lateral pairs (`x_pairs`, first member to the west),
//! its tandem pairs (`y_pairs`, first member to the north) and a table of the
//! direction-independent roles of each slot.

use crate::geometry::{Role, RoleSet};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

/// The geometric shape of a formation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCountMacro, EnumString, Display,
)]
pub enum SetupKind {
    #[strum(serialize = "nothing")]
    Nothing,
    #[strum(serialize = "1x1")]
    S1x1,
    #[strum(serialize = "1x2")]
    S1x2,
    #[strum(serialize = "1x3")]
    S1x3,
    #[strum(serialize = "2x2")]
    S2x2,
    #[strum(serialize = "1x4")]
    S1x4,
    #[strum(serialize = "dmd")]
    Dmd,
    #[strum(serialize = "1x6")]
    S1x6,
    #[strum(serialize = "2x3")]
    S2x3,
    #[strum(serialize = "short6")]
    Short6,
    #[strum(serialize = "2x4")]
    S2x4,
    #[strum(serialize = "1x8")]
    S1x8,
    #[strum(serialize = "qtag")]
    Qtag,
    #[strum(serialize = "ptpd")]
    Ptpd,
    #[strum(serialize = "spindle")]
    Spindle,
    #[strum(serialize = "bone")]
    Bone,
    #[strum(serialize = "rigger")]
    Rigger,
    #[strum(serialize = "3x4")]
    S3x4,
    #[strum(serialize = "4x4")]
    S4x4,
}

/// Static facts about one setup kind.
#[derive(Debug)]
pub struct SetupAttributes {
    /// Number of person slots.
    pub size: usize,
    /// Lateral neighbours; the first slot of each pair is west of the second.
    pub x_pairs: &'static [(usize, usize)],
    /// Tandem neighbours; the first slot of each pair is north of the second.
    pub y_pairs: &'static [(usize, usize)],
    /// Direction-independent roles of each slot, used for role derivation
    /// and for judging phantom spots.
    pub positional: &'static [RoleSet],
}

const NONE: RoleSet = RoleSet::empty();
const CTR: RoleSet = RoleSet::of(&[Role::Center]);
const END: RoleSet = RoleSet::of(&[Role::End]);

const ONE_BY_FOUR_END: RoleSet = RoleSet::of(&[Role::End, Role::Outer2, Role::Outer6]);
const ONE_BY_FOUR_CTR: RoleSet = RoleSet::of(&[Role::Center, Role::Center2, Role::Center6]);

const SIX_END: RoleSet = RoleSet::of(&[Role::End, Role::Outer6]);
const SIX_CTR: RoleSet = RoleSet::of(&[Role::Center, Role::Center2]);

const BOX_CTR: RoleSet = RoleSet::of(&[Role::Center, Role::Center4]);
const BOX_END: RoleSet = RoleSet::of(&[Role::End, Role::OuterPairs]);

const S1X6_END: RoleSet = RoleSet::of(&[
    Role::End,
    Role::Outer2,
    Role::Outer6,
    Role::NotCtr1x4,
    Role::OuterPairs,
]);
const S1X6_NEAR: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Center6,
    Role::Outer6,
    Role::Ctr1x4,
    Role::OuterPairs,
]);
const S1X6_CTR: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Center2,
    Role::Center6,
    Role::Ctr1x4,
    Role::Center4,
]);

const S1X8_END: RoleSet = RoleSet::of(&[
    Role::End,
    Role::Outer2,
    Role::Outer6,
    Role::NotCtr1x4,
    Role::NotCtr1x6,
    Role::OuterPairs,
]);
const S1X8_NEAR_END: RoleSet = RoleSet::of(&[
    Role::End,
    Role::Center6,
    Role::Outer6,
    Role::NotCtr1x4,
    Role::Ctr1x6,
    Role::OuterPairs,
]);
const S1X8_NEAR_CTR: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Center6,
    Role::Outer6,
    Role::Ctr1x4,
    Role::Ctr1x6,
    Role::Center4,
]);
const S1X8_CTR: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Center2,
    Role::Center6,
    Role::Ctr1x4,
    Role::Ctr1x6,
    Role::Center4,
]);

const QTAG_OUT: RoleSet = RoleSet::of(&[
    Role::End,
    Role::OuterPairs,
    Role::NotCtr1x4,
    Role::Center6,
    Role::Outer6,
]);
const QTAG_LINE_END: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Ctr1x4,
    Role::Center4,
    Role::Outer2,
    Role::Outer6,
]);
const QTAG_LINE_CTR: RoleSet = RoleSet::of(&[
    Role::Center,
    Role::Ctr1x4,
    Role::Center4,
    Role::Center2,
    Role::Center6,
]);

const PTPD_POINT: RoleSet = RoleSet::of(&[Role::End, Role::Outer2, Role::Outer6]);
const PTPD_CTR: RoleSet = RoleSet::of(&[Role::Center6, Role::Outer6]);
const PTPD_INNER: RoleSet = RoleSet::of(&[Role::Center, Role::Center2, Role::Center6]);

const SPINDLE_SIDE: RoleSet = RoleSet::of(&[Role::Center6, Role::Outer6]);
const SPINDLE_CTR: RoleSet = RoleSet::of(&[Role::Center, Role::Center2, Role::Center6]);
const SPINDLE_POINT: RoleSet = RoleSet::of(&[Role::End, Role::Outer2, Role::Outer6]);

const BONE_OUT: RoleSet = RoleSet::of(&[
    Role::End,
    Role::OuterPairs,
    Role::NotCtr1x4,
    Role::Outer6,
]);
const BONE_LINE_END: RoleSet =
    RoleSet::of(&[Role::Center, Role::Ctr1x4, Role::Center4, Role::Outer6]);
const BONE_LINE_CTR: RoleSet =
    RoleSet::of(&[Role::Center, Role::Ctr1x4, Role::Center4, Role::Center2]);

const S3X4_CTR: RoleSet = RoleSet::of(&[Role::Center2, Role::Center6, Role::Ctr1x4]);
const S3X4_COL: RoleSet = RoleSet::of(&[Role::Center6, Role::Outer6, Role::NotCtr1x4]);
const S3X4_LINE_END: RoleSet = RoleSet::of(&[Role::Outer2, Role::Outer6, Role::Ctr1x4]);
const S3X4_CORNER: RoleSet = RoleSet::of(&[Role::Outer2, Role::Outer6, Role::NotCtr1x4]);

static NOTHING: SetupAttributes = SetupAttributes {
    size: 0,
    x_pairs: &[],
    y_pairs: &[],
    positional: &[],
};

static S1X1: SetupAttributes = SetupAttributes {
    size: 1,
    x_pairs: &[],
    y_pairs: &[],
    positional: &[NONE],
};

static S1X2: SetupAttributes = SetupAttributes {
    size: 2,
    x_pairs: &[(0, 1)],
    y_pairs: &[],
    positional: &[NONE, NONE],
};

static S1X3: SetupAttributes = SetupAttributes {
    size: 3,
    x_pairs: &[],
    y_pairs: &[],
    positional: &[END, CTR, END],
};

static S2X2: SetupAttributes = SetupAttributes {
    size: 4,
    x_pairs: &[(0, 1), (3, 2)],
    y_pairs: &[(0, 3), (1, 2)],
    positional: &[NONE, NONE, NONE, NONE],
};

static S1X4: SetupAttributes = SetupAttributes {
    size: 4,
    x_pairs: &[(0, 1), (3, 2)],
    y_pairs: &[],
    positional: &[ONE_BY_FOUR_END, ONE_BY_FOUR_CTR, ONE_BY_FOUR_END, ONE_BY_FOUR_CTR],
};

// Points 0 (west) and 2 (east); centers 1 (north) and 3 (south).
static DMD: SetupAttributes = SetupAttributes {
    size: 4,
    x_pairs: &[],
    y_pairs: &[(1, 3)],
    positional: &[ONE_BY_FOUR_END, ONE_BY_FOUR_CTR, ONE_BY_FOUR_END, ONE_BY_FOUR_CTR],
};

// 0 1 2 5 4 3
static S1X6: SetupAttributes = SetupAttributes {
    size: 6,
    x_pairs: &[(0, 1), (2, 5), (4, 3)],
    y_pairs: &[],
    positional: &[S1X6_END, S1X6_NEAR, S1X6_CTR, S1X6_END, S1X6_NEAR, S1X6_CTR],
};

// 0 1 2
// 5 4 3
static S2X3: SetupAttributes = SetupAttributes {
    size: 6,
    x_pairs: &[(0, 1), (4, 3)],
    y_pairs: &[(0, 5), (1, 4), (2, 3)],
    positional: &[SIX_END, SIX_CTR, SIX_END, SIX_END, SIX_CTR, SIX_END],
};

//    1
// 0     2
// 5     3
//    4
static SHORT6: SetupAttributes = SetupAttributes {
    size: 6,
    x_pairs: &[],
    y_pairs: &[(0, 5), (2, 3)],
    positional: &[SIX_END, SIX_CTR, SIX_END, SIX_END, SIX_CTR, SIX_END],
};

static S2X4: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(0, 1), (2, 3), (7, 6), (5, 4)],
    y_pairs: &[(0, 7), (1, 6), (2, 5), (3, 4)],
    positional: &[
        BOX_END, BOX_CTR, BOX_CTR, BOX_END, BOX_END, BOX_CTR, BOX_CTR, BOX_END,
    ],
};

// 0 1 3 2 6 7 5 4
static S1X8: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(0, 1), (3, 2), (6, 7), (5, 4)],
    y_pairs: &[],
    positional: &[
        S1X8_END,
        S1X8_NEAR_END,
        S1X8_CTR,
        S1X8_NEAR_CTR,
        S1X8_END,
        S1X8_NEAR_END,
        S1X8_CTR,
        S1X8_NEAR_CTR,
    ],
};

static QTAG: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(0, 1), (5, 4), (6, 7), (3, 2)],
    y_pairs: &[],
    positional: &[
        QTAG_OUT,
        QTAG_OUT,
        QTAG_LINE_END,
        QTAG_LINE_CTR,
        QTAG_OUT,
        QTAG_OUT,
        QTAG_LINE_END,
        QTAG_LINE_CTR,
    ],
};

// Left diamond 0 1 2 3 (west point, north center, east point, south center),
// right diamond 4 5 6 7 (east point, south center, west point, north center).
static PTPD: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[],
    y_pairs: &[(1, 3), (7, 5)],
    positional: &[
        PTPD_POINT, PTPD_CTR, PTPD_INNER, PTPD_CTR, PTPD_POINT, PTPD_CTR, PTPD_INNER, PTPD_CTR,
    ],
};

//    0 1 2
//  7       3
//    6 5 4
static SPINDLE: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(0, 1), (5, 4)],
    y_pairs: &[(0, 6), (1, 5), (2, 4)],
    positional: &[
        SPINDLE_SIDE,
        SPINDLE_CTR,
        SPINDLE_SIDE,
        SPINDLE_POINT,
        SPINDLE_SIDE,
        SPINDLE_CTR,
        SPINDLE_SIDE,
        SPINDLE_POINT,
    ],
};

// 0         1
//   6 7 3 2
// 5         4
static BONE: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(6, 7), (3, 2)],
    y_pairs: &[(0, 5), (1, 4)],
    positional: &[
        BONE_OUT,
        BONE_OUT,
        BONE_LINE_END,
        BONE_LINE_CTR,
        BONE_OUT,
        BONE_OUT,
        BONE_LINE_END,
        BONE_LINE_CTR,
    ],
};

//       0 1
// 6 7         3 2
//       5 4
static RIGGER: SetupAttributes = SetupAttributes {
    size: 8,
    x_pairs: &[(0, 1), (5, 4), (6, 7), (3, 2)],
    y_pairs: &[(0, 5), (1, 4)],
    positional: &[
        BOX_CTR, BOX_CTR, BOX_END, BOX_END, BOX_CTR, BOX_CTR, BOX_END, BOX_END,
    ],
};

//  0  1  2  3
// 10 11  5  4
//  9  8  7  6
static S3X4: SetupAttributes = SetupAttributes {
    size: 12,
    x_pairs: &[(0, 1), (2, 3), (10, 11), (5, 4), (9, 8), (7, 6)],
    y_pairs: &[],
    positional: &[
        S3X4_CORNER,
        S3X4_COL,
        S3X4_COL,
        S3X4_CORNER,
        S3X4_LINE_END,
        S3X4_CTR,
        S3X4_CORNER,
        S3X4_COL,
        S3X4_COL,
        S3X4_CORNER,
        S3X4_LINE_END,
        S3X4_CTR,
    ],
};

static S4X4: SetupAttributes = SetupAttributes {
    size: 16,
    x_pairs: &[
        (12, 13),
        (14, 0),
        (10, 15),
        (3, 1),
        (9, 11),
        (7, 5),
        (8, 6),
        (4, 2),
    ],
    y_pairs: &[
        (12, 10),
        (9, 8),
        (13, 15),
        (11, 6),
        (14, 3),
        (7, 4),
        (0, 1),
        (5, 2),
    ],
    positional: &[
        BOX_END, BOX_END, BOX_END, BOX_CTR, BOX_END, BOX_END, BOX_END, BOX_CTR, BOX_END, BOX_END,
        BOX_END, BOX_CTR, BOX_END, BOX_END, BOX_END, BOX_CTR,
    ],
};

impl SetupKind {
    pub fn attributes(self) -> &'static SetupAttributes {
        match self {
            SetupKind::Nothing => &NOTHING,
            SetupKind::S1x1 => &S1X1,
            SetupKind::S1x2 => &S1X2,
            SetupKind::S1x3 => &S1X3,
            SetupKind::S2x2 => &S2X2,
            SetupKind::S1x4 => &S1X4,
            SetupKind::Dmd => &DMD,
            SetupKind::S1x6 => &S1X6,
            SetupKind::S2x3 => &S2X3,
            SetupKind::Short6 => &SHORT6,
            SetupKind::S2x4 => &S2X4,
            SetupKind::S1x8 => &S1X8,
            SetupKind::Qtag => &QTAG,
            SetupKind::Ptpd => &PTPD,
            SetupKind::Spindle => &SPINDLE,
            SetupKind::Bone => &BONE,
            SetupKind::Rigger => &RIGGER,
            SetupKind::S3x4 => &S3X4,
            SetupKind::S4x4 => &S4X4,
        }
    }

    pub fn size(self) -> usize {
        self.attributes().size
    }

    /// Highest slot index, or `None` for the empty setup.
    pub fn slimit(self) -> Option<usize> {
        self.size().checked_sub(1)
    }

    /// True for setups that are a single row of people.
    pub fn is_single_row(self) -> bool {
        matches!(
            self,
            SetupKind::S1x1 | SetupKind::S1x2 | SetupKind::S1x3 | SetupKind::S1x4 | SetupKind::S1x6 | SetupKind::S1x8
        )
    }

    /// The lateral partner of `slot`, and whether `slot` is the western member.
    pub fn lateral_partner(self, slot: usize) -> Option<(usize, bool)> {
        find_partner(self.attributes().x_pairs, slot)
    }

    /// The tandem partner of `slot`, and whether `slot` is the northern member.
    pub fn tandem_partner(self, slot: usize) -> Option<(usize, bool)> {
        find_partner(self.attributes().y_pairs, slot)
    }
}

fn find_partner(pairs: &[(usize, usize)], slot: usize) -> Option<(usize, bool)> {
    pairs.iter().find_map(|&(a, b)| {
        if a == slot {
            Some((b, true))
        } else if b == slot {
            Some((a, false))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tables_are_consistent() {
        for kind in SetupKind::iter() {
            let attrs = kind.attributes();
            assert_eq!(attrs.positional.len(), attrs.size, "{}", kind);
            let mut seen = vec![0u8; attrs.size];
            for &(a, b) in attrs.x_pairs {
                assert!(a < attrs.size && b < attrs.size, "{}", kind);
                seen[a] += 1;
                seen[b] += 1;
            }
            assert!(seen.iter().all(|&n| n <= 1), "{} x_pairs overlap", kind);
            let mut seen = vec![0u8; attrs.size];
            for &(a, b) in attrs.y_pairs {
                assert!(a < attrs.size && b < attrs.size, "{}", kind);
                seen[a] += 1;
                seen[b] += 1;
            }
            assert!(seen.iter().all(|&n| n <= 1), "{} y_pairs overlap", kind);
        }
    }

    #[test]
    fn test_positional_tables_hold_only_positional_roles() {
        for kind in SetupKind::iter() {
            for roles in kind.attributes().positional {
                assert_eq!(roles.intersection(Role::POSITIONAL), *roles);
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(SetupKind::from_str("qtag").unwrap(), SetupKind::Qtag);
        assert_eq!(SetupKind::S4x4.to_string(), "4x4");
        assert_eq!(SetupKind::S3x4.slimit(), Some(11));
        assert_eq!(SetupKind::Nothing.slimit(), None);
    }

    #[test]
    fn test_partners() {
        assert_eq!(SetupKind::S1x4.lateral_partner(3), Some((2, true)));
        assert_eq!(SetupKind::S1x4.lateral_partner(1), Some((0, false)));
        assert_eq!(SetupKind::S1x4.tandem_partner(1), None);
        assert_eq!(SetupKind::S2x2.tandem_partner(2), Some((1, false)));
    }
}
