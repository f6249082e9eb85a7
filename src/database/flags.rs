// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit layouts of the flag words stored in the call database.
//!
//! These words are kept raw in memory because their only consumer outside
//! this crate is the binary format, whose layout is fixed.

/// First halfword of every database file.
pub const DATABASE_MAGIC_NUM: u16 = 21316;
/// Format version written after the magic number.
pub const DATABASE_FORMAT_VERSION: u16 = 331;

/// Highest tag index a database can carry. 8191 is the compound marker.
pub const MAX_TAGS: usize = 8190;

/// Record kinds, as the top bits of a record's first halfword.
pub mod record {
    pub const END: u16 = 0x0000;
    pub const CALL: u16 = 0x2000;
    pub const SUBCALL: u16 = 0x4000;
    pub const PREDICATE: u16 = 0x6000;
    pub const ARRAY_DEF: u16 = 0x8000;
    /// A compound continuation header: no tag, no level.
    pub const CONTINUATION: u16 = 0x3FFF;
    pub const KIND_MASK: u16 = 0xE000;
    pub const TAG_MASK: u16 = 0x1FFF;
}

/// Per-array-definition flags ("callarray flags").
pub mod caf {
    pub const ROT: u32 = 0x1;
    pub const FACING_FUNNY: u32 = 0x2;
    pub const CONCEND: u32 = 0x4;
    pub const ROT_OUT: u32 = 0x8;
    pub const RESTR_MASK: u32 = 0x70;
    pub const RESTR_UNUSUAL: u32 = 0x10;
    pub const RESTR_FORBID: u32 = 0x20;
    pub const RESTR_RESOLVE_OK: u32 = 0x30;
    pub const RESTR_CONTROVERSIAL: u32 = 0x40;
    pub const RESTR_BOGUS: u32 = 0x50;
    pub const RESTR_ASSUME_DPT: u32 = 0x60;
    pub const RESTR_EACH_1X3: u32 = 0x70;
    pub const PREDS: u32 = 0x80;
    pub const NO_CUTTING_THROUGH: u32 = 0x100;
    pub const NO_FACING_ENDS: u32 = 0x200;
    pub const LATERAL_TO_SELECTEES: u32 = 0x400;
    pub const OTHER_ELONGATE: u32 = 0x800;
    pub const SPLIT_TO_BOX: u32 = 0x1000;
    pub const REALLY_WANT_DIAMOND: u32 = 0x2000;
    pub const NO_COMPRESS: u32 = 0x4000;
    pub const PLUSEIGHTH_ROTATION: u32 = 0x8000;
    /// Bits that do not fit the array-def block.
    pub const OVERFLOW: u32 = 0xFFC0_0000;
}

/// Qualifier word: the qualifier code plus modifier bits.
pub mod qual {
    pub const LEFT: u32 = 0x0001_0000;
    pub const RIGHT: u32 = 0x0000_8000;
    pub const LIVE: u32 = 0x0000_4000;
    pub const TBONE: u32 = 0x0000_2000;
    pub const NTBONE: u32 = 0x0000_1000;
    pub const NUM_MASK: u32 = 0x0000_0F00;
    pub const NUM_BIT: u32 = 0x0000_0100;
    pub const CODE: u32 = 0x0000_00FF;
    /// Largest `num N` a qualifier may carry.
    pub const MAX_NUM: u32 = 14;
}

/// Top-level call flags (`flags1`).
pub mod cflag1 {
    pub const VISIBLE_FRACTION_BIT: u32 = 0x0000_0001;
    pub const VISIBLE_FRACTION_MASK: u32 = 0x0000_0007;
    pub const STEP_REAR_MASK: u32 = 0x0000_3800;
    pub const STEP_TO_NONPHAN_BOX: u32 = 0x0000_1800;
    pub const REAR_BACK_FROM_EITHER: u32 = 0x0000_2800;
    pub const STEP_TO_QTAG: u32 = 0x0000_3000;
    pub const NUMBER_BIT: u32 = 0x0000_8000;
    pub const NUMBER_MASK: u32 = 0x0003_8000;
    pub const DONT_USE_IN_RESOLVE: u32 = 0x0020_0000;
    pub const DONT_USE_IN_NICE_RESOLVE: u32 = 0x0040_0000;
    pub const BASE_TAG_CALL_BIT: u32 = 0x0200_0000;
    pub const BASE_TAG_CALL_MASK: u32 = 0x0E00_0000;
    pub const BASE_CIRC_CALL: u32 = 0x1000_0000;
}

/// Heritable flags (`flagsh`), shared by top-level flags, definition
/// modifiers and alternate definition keys.
pub mod inherit {
    pub const REVERSE: u32 = 0x0000_0002;
    pub const LEFT: u32 = 0x0000_0004;
    pub const SINGLE: u32 = 0x0000_0400;
    pub const SINGLEFILE: u32 = 0x0000_0800;
    pub const MATRIX_12: u32 = 0x0000_0080;
    pub const MATRIX_16: u32 = 0x0000_0100;
    pub const FRACTAL: u32 = 0x0002_0000;
    pub const YOYOETC_MASK: u32 = 0x0018_0000;
    pub const YOYOETC_BIT: u32 = 0x0008_0000;
    pub const YOYO: u32 = 0x0008_0000;
    pub const GENEROUS: u32 = 0x0010_0000;
    pub const MXN_MASK: u32 = 0x01E0_0000;
    pub const MXN_BIT: u32 = 0x0020_0000;
    pub const NXN_MASK: u32 = 0x0E00_0000;
    pub const NXN_BIT: u32 = 0x0200_0000;
    pub const REVERT_MASK: u32 = 0x7000_0000;
    pub const REVERT_BIT: u32 = 0x1000_0000;
    pub const REVERT: u32 = 0x1000_0000;
    pub const REFLECT: u32 = 0x2000_0000;
    pub const REVERT_REFLECT: u32 = 0x3000_0000;
    pub const REFLECT_REVERT: u32 = 0x4000_0000;
    pub const REVERT_REFLECT_REVERT: u32 = 0x5000_0000;
    pub const REFLECT_REVERT_REFLECT: u32 = 0x6000_0000;
    pub const REFLECT_REFLECT: u32 = 0x7000_0000;

    /// Groups of which at most one member may be given.
    const EXCLUSIVE_GROUPS: [u32; 4] = [
        FRACTAL | YOYOETC_MASK,
        SINGLEFILE | SINGLE,
        MXN_MASK | NXN_MASK,
        MATRIX_12 | MATRIX_16,
    ];

    /// Merge `source` into `dest`, returning `false` if the combination is
    /// redundant or contradictory.
    ///
    /// Revert and reflect compose: "revert" after "reflect" becomes
    /// "reflect revert", and so on for up to three steps.
    pub fn merge(dest: &mut u32, source: u32) -> bool {
        let revert_source = source & REVERT_MASK;
        if revert_source != 0 {
            let composed = match (revert_source, *dest & REVERT_MASK) {
                (_, 0) => {
                    *dest |= source;
                    return true;
                }
                (REVERT, REFLECT) => REFLECT_REVERT,
                (REFLECT, REVERT) => REVERT_REFLECT,
                (REFLECT, REFLECT) => REFLECT_REFLECT,
                (REVERT, REVERT_REFLECT) => REVERT_REFLECT_REVERT,
                (REFLECT, REFLECT_REVERT) => REFLECT_REVERT_REFLECT,
                _ => return false,
            };
            *dest = (*dest & !REVERT_MASK) | composed;
            return true;
        }

        if *dest & source != 0 {
            return false;
        }
        if EXCLUSIVE_GROUPS
            .iter()
            .any(|group| *dest & group != 0 && source & group != 0)
        {
            return false;
        }
        *dest |= source;
        true
    }
}

/// Definition modifier word (`modifiers1`) of a sub-call.
pub mod dfm1 {
    pub const CALL_MOD_ALLOW_PLAIN_MOD: u32 = 0x0000_0300;
    pub const CALL_MOD_OR_SECONDARY: u32 = 0x0000_0500;
    pub const CALL_MOD_MAND_SECONDARY: u32 = 0x0000_0600;
    pub const NUM_SHIFT_BIT: u32 = 0x0004_0000;
    pub const NUM_INSERT_MASK: u32 = 0x0070_0000;
    pub const NUM_INSERT_BIT: u32 = 0x0010_0000;
    pub const FRACTAL_INSERT: u32 = 0x0100_0000;
}

/// Matrix call flags.
pub mod mtx {
    pub const USE_SELECTOR: u32 = 0x01;
    pub const USE_NUMBER: u32 = 0x400;
}

#[cfg(test)]
mod tests {
    use super::inherit::*;

    #[test]
    fn test_merge_plain_bits() {
        let mut dest = 0;
        assert!(merge(&mut dest, SINGLE));
        assert!(!merge(&mut dest, SINGLE));
        assert!(!merge(&mut dest, SINGLEFILE));
        assert!(merge(&mut dest, MATRIX_12));
        assert!(!merge(&mut dest, MATRIX_16));
        assert_eq!(dest, SINGLE | MATRIX_12);
    }

    #[test]
    fn test_merge_composes_revert_and_reflect() {
        let mut dest = 0;
        assert!(merge(&mut dest, REVERT));
        assert!(merge(&mut dest, REFLECT));
        assert_eq!(dest & REVERT_MASK, REVERT_REFLECT);
        assert!(merge(&mut dest, REVERT));
        assert_eq!(dest & REVERT_MASK, REVERT_REFLECT_REVERT);
        assert!(!merge(&mut dest, REVERT));
    }

    #[test]
    fn test_mxn_and_nxn_exclusive() {
        let mut dest = MXN_BIT * 3;
        assert!(!merge(&mut dest, NXN_BIT));
    }
}
