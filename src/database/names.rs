// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Names of the numbered things a database refers to.
//!
//! A name's position in its table is the number written to the database, so
//! these tables only ever grow at the end. `"???"` holds a retired slot.

/// Placeholder for a retired table slot; never matches source text.
pub const RETIRED: &str = "???";

/// Position of `word` in `table`, skipping retired slots.
pub fn lookup(table: &[&str], word: &str) -> Option<usize> {
    table.iter().position(|&name| name != RETIRED && name == word)
}

/// Position of a starting setup by name.
pub fn start_setup(word: &str) -> Option<usize> {
    START_SETUPS.iter().position(|&(name, _)| name == word)
}

/// Number of callarray entries for the starting setup at `index`.
pub fn begin_size(index: usize) -> Option<usize> {
    START_SETUPS.get(index).map(|&(_, size)| size)
}

/// The ending setup that introduces a `concendsetup` pair.
pub const NORMAL_CONCENTRIC: usize = 169;

/// Starting setups with the number of people each callarray lists.
pub const START_SETUPS: &[(&str, usize)] = &[
    ("nothing", 0), ("1x1", 1), ("1x2", 2), ("2x1", 2), ("1x3", 3), ("3x1", 3), ("2x2", 4),
    ("dmd", 4), ("pmd", 4), ("star", 4), ("trngl", 6), ("ptrngl", 6), ("trngl4", 8),
    ("ptrngl4", 8), ("beehive", 10), ("pbeehive", 10), ("vee", 10), ("pvee", 10), ("trngl8", 16),
    ("ptrngl8", 16), ("linebox", 8), ("plinebox", 8), ("linejbox", 8), ("plinejbox", 8),
    ("linevbox", 8), ("plinevbox", 8), ("lineybox", 8), ("plineybox", 8), ("linefbox", 8),
    ("plinefbox", 8), ("bone6", 6), ("pbone6", 6), ("short6", 6), ("pshort6", 6), ("1x2dmd", 6),
    ("p1x2dmd", 6), ("2x1dmd", 6), ("p2x1dmd", 6), ("wingedstar6", 6), ("pwingedstar6", 6),
    ("qtag", 8), ("pqtag", 8), ("bone", 8), ("pbone", 8), ("rigger", 8), ("prigger", 8),
    ("3x3", 9), ("2stars", 8), ("p2stars", 8), ("spindle", 8), ("pspindle", 8), ("hrglass", 8),
    ("phrglass", 8), ("dhrglass", 8), ("pdhrglass", 8), ("crosswave", 8), ("pcrosswave", 8),
    ("1x4", 4), ("4x1", 4), ("1x8", 8), ("8x1", 8), ("2x4", 8), ("4x2", 8), ("2x3", 6), ("3x2", 6),
    ("2x5", 10), ("5x2", 10), ("d2x5", 10), ("d5x2", 10), ("wqtag", 10), ("pwqtag", 10),
    ("deep2x1dmd", 10), ("pdeep2x1dmd", 10), ("whrglass", 10), ("pwhrglass", 10), ("1x5", 5),
    ("5x1", 5), ("1x6", 6), ("6x1", 6), ("3x4", 12), ("4x3", 12), ("2x6", 12), ("6x2", 12),
    ("2x7", 14), ("7x2", 14), ("d2x7", 14), ("d7x2", 14), ("2x9", 18), ("9x2", 18), ("d3x4", 12),
    ("d4x3", 12), ("d4x5", 20), ("d5x4", 20), ("spindle12", 10), ("pspindle12", 10), ("2x8", 16),
    ("8x2", 16), ("4x4", 16), ("1x10", 10), ("10x1", 10), ("1x12", 12), ("12x1", 12), ("1x14", 14),
    ("14x1", 14), ("1x16", 16), ("16x1", 16), ("c1phan", 16), ("galaxy", 8), ("3x6", 18),
    ("6x3", 18), ("3x8", 24), ("8x3", 24), ("4x5", 20), ("5x4", 20), ("4x6", 24), ("6x4", 24),
    ("2x10", 20), ("10x2", 20), ("2x12", 24), ("12x2", 24), ("deepqtg", 12), ("pdeepqtg", 12),
    ("deepbiqtg", 16), ("pdeepbigqtg", 16), ("widerigger", 12), ("pwiderigger", 12),
    ("rigger12", 12), ("prigger12", 12), ("deepxwv", 12), ("pdeepxwv", 12), ("3oqtg", 20),
    ("p3oqtg", 20), ("thar", 8), ("alamo", 8), ("ptpd", 8), ("pptpd", 8), ("1x3dmd", 8),
    ("p1x3dmd", 8), ("3x1dmd", 8), ("p3x1dmd", 8), ("3dmd", 12), ("p3dmd", 12), ("4dmd", 16),
    ("p4dmd", 16), ("3ptpd", 12), ("p3ptpd", 12), ("4ptpd", 16), ("p4ptpd", 16), ("hqtag", 16),
    ("phqtag", 16), ("hsqtag", 12), ("phsqtag", 12), ("wingedstar", 8), ("pwingedstar", 8),
    ("3x23", 8), ("p3x23", 8), ("3x43", 10), ("p3x43", 10), ("3x223", 10), ("p3x223", 10),
    ("5x25", 12), ("p5x25", 12), ("5x45", 14), ("p5x45", 14), ("5h45", 15), ("p5h45", 15),
    ("2x3232", 12), ("p2x3232", 12), ("3mdmd", 12), ("p3mdmd", 12), ("3mptpd", 12),
    ("p3mptpd", 12), ("4mdmd", 16), ("p4mdmd", 16), ("4mptpd", 16), ("p4mptpd", 16),
    ("1x4dmd", 10), ("p1x4dmd", 10), ("bigh", 12), ("pbigh", 12), ("bigx", 12), ("pbigx", 12),
    ("bigbigh", 16), ("pbigbigh", 16), ("bigbigx", 16), ("pbigbigx", 16), ("bigrig", 12),
    ("pbigrig", 12), ("bighrgl", 12), ("pbighrgl", 12), ("bigdhrgl", 12), ("pbigdhrgl", 12),
    ("bigbone", 12), ("pbigbone", 12), ("dblbone6", 12), ("pdblbone6", 12), ("bigdmd", 12),
    ("pbigdmd", 12), ("bigptpd", 12), ("pbigptpd", 12), ("5x1dmd", 12), ("p5x1dmd", 12),
    ("1x5dmd", 12), ("p1x5dmd", 12), ("big3dmd", 18), ("pbig3dmd", 18), ("big4dmd", 24),
    ("pbig4dmd", 24), ("dblxwave", 16), ("pdblxwave", 16), ("dblspindle", 16), ("pdblspindle", 16),
    ("dblbone", 16), ("pdblbone", 16), ("dblrig", 16), ("pdblrig", 16),
];

/// Ending setups.
pub const END_SETUPS: &[&str] = &[
    "nothing", "1x1", "1x2", "1x3", "2x2", "1x4", "dmd", "star", "trngl", "trngl4", "beehive",
    "vee", "bone6", "short6", "1x5", "1x6", "2x3", "1x2dmd", "2x1dmd", "wingedstar6", "1x3p1dmd",
    "3p1x1dmd", "qtag", "bone", "1x8", "littlestars", "2stars", "1x3dmd", "3x1dmd", "spindle",
    "hrglass", "dhrglass", "hyperglass", "crosswave", "2x4", "2x5", "d2x5", "???", "???", "???",
    "???", "???", "???", "???", "???", "???", "???", "pgdmdcw", "pgdmdccw", "1x4dmd", "wqtag",
    "deep2x1dmd", "whrglass", "rigger", "3x3", "3x4", "2x6", "2x7", "d2x5", "2x9", "d3x4", "d4x5",
    "spindle12", "???", "1p5x4", "???", "???", "???", "???", "2x8", "4x4", "1x10", "1x12", "1x14",
    "1x16", "c1phan", "bigblob", "ptpd", "3dmd", "4dmd", "3ptpd", "4ptpd", "trngl8", "4p2x1dmd",
    "plinepdmd", "plinedmd", "linepdmd", "linedmd", "linebox", "linejbox", "linevbox", "lineybox",
    "linefbox", "dbltrgngl4", "boxdmd", "boxpdmd", "dmdpdmd", "hsqtag", "dmdlndmd", "hqtag",
    "wingedstar", "wingedstar12", "wingedstar16", "barredstar", "barredstar12", "barredstar16",
    "galaxy", "bigh", "bigx", "3x6", "3x8", "4x5", "4x6", "2x10", "2x12", "deepqtg", "deepbigqtg",
    "widerigger", "rigger12", "deepxwv", "3oqtg", "thar", "alamo", "???", "???", "???", "???",
    "???", "???", "???", "???", "x1x8", "???", "???", "???", "???", "???", "???", "???", "???",
    "3x23", "3x43", "3x223", "5x25", "5x45", "5h45", "2x3232", "3mdmd", "3mptpd", "4mdmd",
    "4mptpd", "bigbigh", "bigbigx", "bigrig", "bighrgl", "bigdhrgl", "bigbone", "dblbone6",
    "bigdmd", "bigptpd", "5x1dmd", "1x5dmd", "big3dmd", "big4dmd", "dblxwave", "dblspindle",
    "dblbone", "dblrig", "???", "normal_concentric",
];

/// Definition schemas.
pub const SCHEMAS: &[&str] = &[
    "conc", "crossconc", "3x3kconc", "3x3kcrossconc", "4x4kconc", "4x4kcrossconc", "singleconc",
    "singlecrossconc", "grandsingleconc", "grandsinglecrossconc", "singleconc_together",
    "singlecrossconc_together", "maybematrix_singleconc_together", "maybesingleconc",
    "maybesinglecrossconc", "maybegrandsingleconc", "maybegrandsinglecrossconc",
    "maybespecialsingleconc", "maybespecialtradeby", "specialtradeby",
    "maybegrandsingleormatrixconc", "3x3_conc", "4x4_lines_conc", "4x4_cols_conc",
    "maybe_nxn_lines_conc", "maybe_nxn_cols_conc", "maybe_nxn_1331_lines_conc",
    "maybe_nxn_1331_cols_conc", "1331_conc", "???", "1221_conc", "conc_diamond_line",
    "conc_lines_z", "conc_diamonds", "crossconc_diamonds", "conc_zs", "crossconc_zs",
    "conc_or_diamond_line", "conc_or_6_2_line", "conc6_2", "crossconc6_2", "conc6_2_line",
    "conc2_6", "crossconc2_6", "conc2_4", "crossconc2_4", "conc2_4_or_normal", "conc4_2",
    "conc4_2_prefer_1x4", "crossconc4_2", "conc4_2_or_normal", "conc_or_2_6", "conc_or_6_2", "???",
    "???", "conc2_6_or_2_4", "crossconc2_6_or_2_4", "conc_innermost", "conc_touch_by_1_of_3",
    "crossconc_innermost", "crossconc_touch_by_1_of_3", "conc_touch_by_2_of_3",
    "singleconc_together_if_odd", "singlecrossconc_together_if_odd", "conc6p", "conc6p_or_normal",
    "conc6p_or_normal_or_2x6_2x3", "conc6p_or_singletogether", "crossconc6p_or_normal",
    "conc_others", "conc6_2_tgl", "conc_to_outer_dmd", "conc_no31dwarn", "conc_specialpromenade",
    "crossconc_specialpromenade", "conc_12", "conc_16", "conc_star", "conc_star12", "conc_star16",
    "conc_bar", "conc_bar12", "conc_bar16", "conc_o", "conc_intermediate_diamond",
    "conc_outside_diamond", "maybematrix_conc", "maybematrix_conc_star", "maybematrix_conc_bar",
    "checkpoint", "checkpoint_spots", "checkpoint_mystic_ok", "cross_checkpoint",
    "reverse_checkpoint", "???", "ckpt_star", "maybe_in_out_triple_dyp_squash",
    "in_out_triple_dyp_squash", "maybe_in_out_triple_squash", "in_out_triple_squash",
    "sgl_in_out_triple_squash", "3x3_in_out_triple_squash", "4x4_in_out_triple_squash",
    "in_out_triple", "sgl_in_out_triple", "3x3_in_out_triple", "4x4_in_out_triple", "in_out_quad",
    "in_out_12mquad", "???", "???", "select_leads", "select_headliners", "select_sideliners",
    "select_original_rims", "select_original_hubs", "select_those_facing_both_sets_live",
    "select_center2", "select_center4", "select_center6", "select_who_can", "select_who_did",
    "select_who_didnt", "select_who_did_and_didnt", "???", "???", "???", "???", "setup",
    "nulldefine", "nulldefine_noroll", "nulldefine_other_elong", "matrix", "partnermatrix",
    "partnerpartialmatrix", "rolldefine", "recenter", "seq", "splitseq", "seq_with_fraction",
    "seq_with_split_1x8_id", "seq_alternate", "seq_remainder", "alias",
];

/// Qualifiers and restrictions share one table.
pub const QUALIFIERS: &[&str] = &[
    "none", "alwaysfail", "give_fudgy_warn", "wave_only", "wave_unless_say_2faced",
    "all_facing_same", "1fl_only", "2fl_only", "2fl_per_1x4", "ctr_2fl_only", "3x3_2fl_only",
    "4x4_2fl_only", "leads_only", "trailers_only", "couples_only", "3x3couples_only",
    "4x4couples_only", "ckpt_miniwaves", "ctr_miniwaves", "ctr_couples", "awkward_centers",
    "dmd_same_point", "dmd_facing", "diamond_like", "qtag_like", "qtag_like_anisotropic",
    "pu_qtag_like", "conc_cpls_same", "conc_cpls_diff", "regular_tbone", "gen_qbox",
    "nice_diamonds", "nice_wv_triangles", "nice_tnd_triangles", "magic_only", "in_or_out",
    "centers_in_or_out", "independent_in_or_out", "miniwaves", "not_miniwaves", "tgl_tandbase",
    "true_Z_cw", "true_Z_ccw", "true_PG_cw", "true_PG_ccw", "lateral_columns_empty",
    "ctrwv_end2fl", "ctr2fl_endwv", "split_dixie", "not_split_dixie", "dmd_ctrs_mwv",
    "dmd_ctrs_mwv_no_mirror", "dmd_ctrs_mwv_change_to_34_tag", "spd_base_mwv", "qtag_mwv",
    "qtag_mag_mwv", "dmd_ctrs_1f", "dmd_pts_mwv", "dmd_pts_1f", "dmd_intlk", "dmd_not_intlk",
    "tall_6", "ctr_pts_rh", "ctr_pts_lh", "extend_inroutl", "extend_inloutr", "said_diamond",
    "said_triangle", "didnt_say_triangle", "said_galaxy", "occupied_as_stars",
    "occupied_as_clumps", "occupied_as_blocks", "occupied_as_h", "occupied_as_qtag",
    "occupied_as_3x1tgl", "line_ends_looking_out", "col_ends_looking_in", "ripple_one_end",
    "ripple_both_ends", "ripple_both_ends_1x4_only", "ripple_both_centers", "ripple_any_centers",
    "people_1_and_5_real", "centers_sel", "ends_sel", "all_sel", "not_all_sel", "some_sel",
    "none_sel", "normal_unwrap_sel", "ptp_unwrap_sel", "explodable", "reverse_explodable",
    "peelable_box", "ends_are_peelable", "siamese_in_quad", "not_tboned_in_quad", "inroller_is_cw",
    "inroller_is_ccw", "outroller_is_cw", "outroller_is_ccw", "judge_is_cw", "judge_is_ccw",
    "socker_is_cw", "socker_is_ccw", "levelplus", "levela1", "levela2", "levelc1", "levelc2",
    "levelc3", "levelc4", "not_tboned", "opposite_sex", "quarterbox_or_col",
    "quarterbox_or_magic_col", "???", "???", "???", "???", "???", "???", "???", "???", "???",
    "???",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_skips_retired() {
        assert_eq!(lookup(END_SETUPS, "1x4"), Some(5));
        assert_eq!(lookup(END_SETUPS, RETIRED), None);
        assert_eq!(lookup(END_SETUPS, "normal_concentric"), Some(NORMAL_CONCENTRIC));
    }

    #[test]
    fn test_begin_sizes() {
        assert_eq!(start_setup("2x4"), Some(61));
        assert_eq!(begin_size(61), Some(8));
        assert_eq!(start_setup("1x4").and_then(begin_size), Some(4));
        assert_eq!(start_setup("qtag").and_then(begin_size), Some(8));
        assert_eq!(begin_size(START_SETUPS.len()), None);
    }

    #[test]
    fn test_schema_and_qualifier_positions() {
        assert_eq!(lookup(SCHEMAS, "conc"), Some(0));
        assert_eq!(lookup(SCHEMAS, "setup"), Some(128));
        assert_eq!(lookup(QUALIFIERS, "none"), Some(0));
        assert_eq!(lookup(QUALIFIERS, "wave_only"), Some(3));
    }
}
