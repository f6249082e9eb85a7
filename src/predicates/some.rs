// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The "some" selector.
//!
//! "Some" splits the setup into two unlabelled groups using nothing but
//! facing directions. Only the groupings tabulated here are recognized;
//! anything else is [`SelectorError::CannotDetermine`].

use crate::geometry::{Formation, SetupKind};
use crate::predicates::{SelectorError, SomeMode};

/// Decide whether the person at `place` is in the "some" group.
pub fn some_selected(
    formation: &Formation,
    place: usize,
    mode: SomeMode,
) -> Result<bool, SelectorError> {
    if mode == SomeMode::Disallowed {
        return Err(SelectorError::IllegalDesignator);
    }
    let kind = formation.kind();
    let directions = formation.directions_word();
    let livemask = formation.livemask_word();

    let (mask, bit) = match kind.slimit() {
        Some(5) => return six_person(kind, directions, livemask, place, mode),
        Some(7) => (eight_person(kind, directions, mode), place),
        Some(11) => (twelve_person(kind, directions, livemask, mode), place % 6),
        _ => (None, place),
    };
    mask.map(|m| (m >> bit) & 1 != 0)
        .ok_or(SelectorError::CannotDetermine)
}

fn six_person(
    kind: SetupKind,
    directions: u32,
    livemask: u32,
    place: usize,
    mode: SomeMode,
) -> Result<bool, SelectorError> {
    let a = (directions >> 4) & 0o303;
    let b = (directions >> 2) & 0o303;
    let c = directions & 0o303;
    let is_row = matches!(kind, SetupKind::S1x6 | SetupKind::S2x3);

    let mask = match mode {
        SomeMode::Pairs => match kind {
            SetupKind::Short6 if a == c => Some(0x5),
            _ if is_row && a == b && b != c => Some(0x3),
            _ if is_row && b == c && a != b => Some(0x6),
            _ => None,
        },
        SomeMode::Triples if is_row => {
            // A triangle of three live people facing the same way.
            let (dirs, place) = match livemask {
                0xFCC => (directions >> 6, place + 3),
                0x33F => (directions, place),
                _ => return Err(SelectorError::CannotDetermine),
            };
            let first = dirs & 3;
            if first == (dirs >> 2) & 3 && first == (dirs >> 4) & 3 {
                return Ok((3..6).contains(&place));
            }
            None
        }
        _ => None,
    };
    mask.map(|m: u32| (m >> (place % 3)) & 1 != 0)
        .ok_or(SelectorError::CannotDetermine)
}

fn eight_person(kind: SetupKind, directions: u32, mode: SomeMode) -> Option<u32> {
    let a = (directions >> 6) & 0x0303;
    let b = (directions >> 4) & 0x0303;
    let c = (directions >> 2) & 0x0303;
    let d = directions & 0x0303;

    match mode {
        SomeMode::Pairs => match kind {
            SetupKind::S1x8 => {
                if a == b && b != d && c != d {
                    Some(0x33)
                } else if b == d && c != d && a != b {
                    Some(0xAA)
                } else if c == d && b != d && a != b {
                    Some(0xCC)
                } else {
                    None
                }
            }
            SetupKind::S2x4 => {
                if a == b && b != c && c != d {
                    Some(0x33)
                } else if b == c && c != d && a != b {
                    Some(0x66)
                } else if c == d && b != c && a != b {
                    Some(0xCC)
                } else {
                    None
                }
            }
            SetupKind::Ptpd if b == d => Some(0xAA),
            SetupKind::Bone | SetupKind::Rigger if (c ^ d) == 0x202 && (a ^ b) == 0x202 => {
                Some(0x33)
            }
            SetupKind::Qtag if c == d && (a ^ b) == 0x202 => Some(0xCC),
            _ => None,
        },
        SomeMode::Triples => match kind {
            SetupKind::Qtag if (a ^ 0x0202) == b && b == d => Some(0xBB),
            SetupKind::S1x8 => match (a, b, c, d) {
                _ if a == b && b == d && c != d => Some(0xBB),
                _ if b == c && c == d && a != b => Some(0xEE),
                (0x200, 0x000, 0x002, 0x000) | (0x002, 0x202, 0x200, 0x202) => Some(0xBE),
                (0x002, 0x000, 0x200, 0x000) | (0x200, 0x202, 0x002, 0x202) => Some(0xEB),
                _ => None,
            },
            SetupKind::S2x4 => match (a, b, c, d) {
                _ if a == b && b == c && c != d => Some(0x77),
                _ if b == c && c == d && a != b => Some(0xEE),
                (0x200, 0x000, 0x000, 0x002) | (0x002, 0x202, 0x202, 0x200) => Some(0x7E),
                (0x002, 0x000, 0x000, 0x200) | (0x200, 0x202, 0x202, 0x002) => Some(0xE7),
                _ => None,
            },
            _ => None,
        },
        SomeMode::Disallowed => None,
    }
}

fn twelve_person(kind: SetupKind, directions: u32, livemask: u32, mode: SomeMode) -> Option<u32> {
    if mode != SomeMode::Triples || kind != SetupKind::S3x4 {
        return None;
    }
    let field = |shift: u32| (directions >> shift) & 0x003003;
    let (a, b, c, d, e, f) = (field(10), field(8), field(6), field(4), field(2), field(0));
    if livemask == 0xC3FC3F && (a ^ 0x002002) == d && d == e {
        Some(0x19)
    } else if livemask == 0x3CF3CF && (b ^ 0x002002) == c && c == f {
        Some(0x26)
    } else {
        None
    }
}
