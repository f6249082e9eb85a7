// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Keywords of the call-definition language.
//!
//! Where a table maps words to bits, a word's bit is `1 << position` unless
//! the table says otherwise. Positions are part of the database format.

use crate::database::flags::inherit;
use crate::database::names::lookup;

/// Tags every database defines or may define, in database order. Tag 0 is
/// reserved: a zero tag means "no call".
pub const BASE_TAGS: &[&str] = &[
    "+++", "nullcall", "nullsecond", "real_base_0", "real_base_0_noflip", "base_tag_call_flip",
    "armturn_n4", "endsshadow", "chreact_1", "makepass_1", "nuclear_1", "scootback",
    "scootbacktowave", "backemup", "circulate", "trade", "plainprom", "plainpromeighths",
    "any_hand_remake_start_with_n", "passthru", "check_cross_counter", "lockit", "disband1",
    "slither", "maybegrandslither", "dixie_half_tag", "plan_ctrtoend", "prepare_to_drop", "hinge",
    "hinge_for_nicely", "hinge_with_warn", "hinge_for_breaker", "hinge_then_trade",
    "hinge_then_trade_for_breaker", "two_o_circs_for_frac", "cloverleaf", "clover",
    "tagnullcall0", "tagnullcall1", "tagnullcall2", "tagnullcall3", "circnullcall", "turnstarn",
    "revert_if_needed", "extend_n",
];

/// Words that mark callarray definitions individually.
pub const PER_ARRAY_FLAGS: &[&str] = &["simple_funny", "lateral_to_selectees", "split_to_box"];

/// Definition modifiers for any sub-call, one bit each.
pub const GENERAL_DEFMODS: &[&str] = &[
    "conc_demand_lines", "conc_demand_columns", "conc_force_lines", "conc_force_columns",
    "conc_force_otherway", "conc_force_spots", "conc_concentric_rules",
    "suppress_elongation_warnings", "or_anycall", "mandatory_anycall", "allow_forced_mod",
    "only_force_elong_if_empty", "roll_transparent_if_z", "endscando", "finish_this_part",
    "roll_transparent", "permit_touch_or_rear_back", "cpls_unless_single", "shift_one_number",
    "shift_two_numbers", "???", "???", "???", "no_check_mod_level", "???", "suppress_roll",
];

/// Extra definition modifiers for sequential parts, one bit each.
pub const SEQUENCE_DEFMODS: &[&str] = &[
    "seq_re_evaluate", "do_half_more", "seq_never_re_evaluate", "seq_re_enable_elongation_check",
    "repeat_n", "repeat_nm1", "normalize",
];

/// Top-level call flags. The first 32 go to `flags1`, the rest to the
/// overflow word.
pub const TOP_LEVEL_FLAGS: &[&str] = &[
    "first_part_visible", "first_two_parts_visible", "last_two_parts_visible",
    "12_16_matrix_means_split", "preserve_z_stuff", "split_like_dixie_style", "parallel_conc_end",
    "take_right_hands", "take_right_hands_as_couples", "yoyo_fractal_numbers", "fudge_to_q_tag",
    "step_to_wave", "rear_back_from_r_wave", "rear_back_from_qtag", "distribute_repetitions",
    "neednumber", "need_two_numbers", "need_four_numbers", "left_means_touch_or_check",
    "sequence_starter", "sequence_starter_promenade", "dont_use_in_resolve",
    "dont_use_in_nice_resolve", "split_large_setups", "split_if_z", "base_tag_call_0",
    "base_tag_call_1", "base_tag_call_3", "base_circ_call", "ends_take_right_hands",
    "funny_means_those_facing", "split_like_square_thru", "no_seq_if_no_frac",
    "can_be_one_side_lateral", "no_elongation_allowed", "imprecise_rotation", "can_be_fan",
    "equalize", "one_person_call", "yield_if_ambiguous", "do_exchange_compress",
    "anyone_who_moves_cant_roll", "fractional_numbers", "dont_raise_overcast",
    "overcast_transparent", "is_star_call", "accept_in_all_menus",
];

/// Heritable top-level flags, one bit each.
pub const HERITABLE_FLAGS: &[&str] = &[
    "diamond_is_legal", "reverse_means_mirror", "left_means_mirror", "funny_is_inherited",
    "intlk_is_inherited", "magic_is_inherited", "grand_is_inherited", "12_matrix_is_inherited",
    "16_matrix_is_inherited", "cross_is_inherited", "single_is_inherited",
    "singlefile_is_inherited", "half_is_inherited", "rewind_is_inherited", "straight_is_inherited",
    "twisted_is_inherited", "lasthalf_is_inherited", "fractal_is_inherited", "fast_is_inherited",
];

/// Keys for `alternate_definition`, in step with [`HERITABLE_FLAGS`].
pub const ALTERNATE_KEYS: &[&str] = &[
    "diamond", "reverse", "left", "funny", "interlocked", "magic", "grand", "12matrix", "16matrix",
    "cross", "single", "singlefile", "half", "rewind", "straight", "twisted", "lasthalf",
    "fractal", "fast",
];

/// `inherit_*` definition modifiers, in step with [`HERITABLE_FLAGS`].
pub const INHERIT_DEFMODS: &[&str] = &[
    "inherit_diamond", "inherit_reverse", "inherit_left", "inherit_funny", "inherit_intlk",
    "inherit_magic", "inherit_grand", "???", "???", "inherit_cross", "inherit_single",
    "inherit_singlefile", "inherit_half", "inherit_rewind", "inherit_straight", "inherit_twisted",
    "inherit_lasthalf", "inherit_fractal", "inherit_fast",
];

/// `force_*` definition modifiers, in step with [`HERITABLE_FLAGS`].
pub const FORCE_DEFMODS: &[&str] = &[
    "force_diamond", "force_reverse", "force_left", "force_funny",
    "force_intlk", "force_magic", "force_grand", "force_12_matrix", "force_16_matrix",
    "force_cross", "force_single", "force_singlefile", "force_half", "force_rewind",
    "force_straight", "force_twisted", "force_lasthalf", "force_fractal", "force_fast",
];

pub const YOYO_PLAIN: &[&str] = &[
    "yoyo", "generous", "stingy",
];

pub const YOYO_FORCE: &[&str] = &[
    "force_yoyo", "force_generous", "force_stingy",
];

pub const MXN_PLAIN: &[&str] = &[
    "1x2", "2x1", "1x3", "3x1", "0x3", "3x0", "0x4", "4x0", "6x2", "3x2",
];

pub const MXN_FORCE: &[&str] = &[
    "force_1x2", "force_2x1", "force_1x3", "force_3x1", "force_0x3", "force_3x0", "force_0x4",
    "force_4x0", "force_6x2", "force_3x2",
];

pub const NXN_PLAIN: &[&str] = &[
    "2x2", "3x3", "4x4", "5x5", "6x6", "7x7", "8x8",
];

pub const NXN_FORCE: &[&str] = &[
    "force_2x2", "force_3x3", "force_4x4", "force_5x5", "force_6x6", "force_7x7", "force_8x8",
];

pub const REVERT_PLAIN: &[&str] = &[
    "revert", "reflect", "revertreflect", "reflectrevert", "revertreflectrevert",
    "reflectrevertreflect", "reflectreflect",
];

pub const REVERT_FORCE: &[&str] = &[
    "force_revert", "force_reflect", "force_revertreflect", "force_reflectrevert",
    "force_revertreflectrevert", "force_reflectrevertreflect", "force_reflectreflect",
];

/// Matrix call flags, one bit each.
pub const MATRIX_FLAGS: &[&str] = &[
    "use_selector", "stop_and_warn_on_tbone", "tbone_is_ok", "ignore_nonselectees",
    "must_face_same_way", "find_jaywalkers", "both_selected_ok", "find_squeezers",
    "find_spreaders", "use_veer_data", "use_number", "lateral_mirror_if_right_of_center",
    "only_in", "only_out", "add_2n", "include_phantoms", "not_true_invader",
];

fn multi_bit_key(word: &str, single: &[&str], multi: [&[&str]; 4]) -> Option<u32> {
    if let Some(i) = lookup(single, word) {
        return Some(1 << i);
    }
    let units = [
        inherit::YOYOETC_BIT,
        inherit::MXN_BIT,
        inherit::NXN_BIT,
        inherit::REVERT_BIT,
    ];
    multi
        .iter()
        .zip(units)
        .find_map(|(table, unit)| lookup(table, word).map(|i| unit * (i as u32 + 1)))
}

/// Heritable bits named by an `alternate_definition` key.
pub fn alternate_key_bits(word: &str) -> Option<u32> {
    multi_bit_key(
        word,
        ALTERNATE_KEYS,
        [YOYO_PLAIN, MXN_PLAIN, NXN_PLAIN, REVERT_PLAIN],
    )
}

/// Heritable bits named by a `force_*` definition modifier.
pub fn force_key_bits(word: &str) -> Option<u32> {
    multi_bit_key(
        word,
        FORCE_DEFMODS,
        [YOYO_FORCE, MXN_FORCE, NXN_FORCE, REVERT_FORCE],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::flags::MAX_TAGS;

    #[test]
    fn test_base_tag_layout() {
        assert_eq!(BASE_TAGS.len(), 45);
        assert!(BASE_TAGS.len() < MAX_TAGS);
        assert_eq!(lookup(BASE_TAGS, "nullcall"), Some(1));
        let tagger = lookup(BASE_TAGS, "tagnullcall0").unwrap();
        assert_eq!(BASE_TAGS[tagger + 3], "tagnullcall3");
    }

    #[test]
    fn test_tables_fit_their_words() {
        assert_eq!(ALTERNATE_KEYS.len(), HERITABLE_FLAGS.len());
        assert_eq!(INHERIT_DEFMODS.len(), HERITABLE_FLAGS.len());
        assert_eq!(FORCE_DEFMODS.len(), HERITABLE_FLAGS.len());
        assert!(TOP_LEVEL_FLAGS.len() <= 32 + 16);
        assert_eq!(lookup(TOP_LEVEL_FLAGS, "base_tag_call_3"), Some(27));
        assert!(GENERAL_DEFMODS.len() <= 32);
        assert!(MATRIX_FLAGS.len() <= 32);
        // The plain and force spellings of multi-bit keys occupy their masks.
        assert_eq!(
            (inherit::YOYOETC_BIT * YOYO_PLAIN.len() as u32) & !inherit::YOYOETC_MASK,
            0
        );
        assert_eq!(REVERT_PLAIN.len(), REVERT_FORCE.len());
        assert_eq!(MXN_PLAIN.len(), MXN_FORCE.len());
    }

    #[test]
    fn test_key_bits() {
        assert_eq!(alternate_key_bits("reverse"), Some(inherit::REVERSE));
        assert_eq!(alternate_key_bits("generous"), Some(inherit::GENEROUS));
        assert_eq!(alternate_key_bits("reflect"), Some(inherit::REFLECT));
        assert_eq!(alternate_key_bits("3x3"), Some(2 * inherit::NXN_BIT));
        assert_eq!(force_key_bits("force_left"), Some(inherit::LEFT));
        assert_eq!(force_key_bits("force_1x2"), Some(inherit::MXN_BIT));
        assert_eq!(force_key_bits("reverse"), None);
    }
}
