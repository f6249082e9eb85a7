// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use sd_engine::context::{CallCatalog, CatalogCall};
use sd_engine::database::flags::cflag1;
use sd_engine::geometry::{Direction, Gender};
use sd_engine::pick::{ScriptedRandom, StdRandom};
use sd_engine::{Formation, Level, Person, PickOptions, SearchContext, SetupKind};

/// A small definition file touching most body layouts.
pub const CALLS_SOURCE: &str = r#"
version "integration fixture"

call "hinge" mainstream tag hinge
   setup 1x2 2x2
      array [1E 0W]

call "partner trade" mainstream tag trade
   setup 1x2 1x2
      array [1S 0S]

call "sweep a quarter" plus tag sweep
   setup 1x4 1x4
      qualifier wave_only
      rotate
      array [0N 1S 3N 2S]

call "swing thru" mainstream
   conc trade [] hinge []

call "double sweep" plus
   seq sweep [] seq sweep [repeat_n]
   yoyo_is_inherited seq sweep [inherit_yoyo]

call "also hinge" plus
   alias hinge

call "pick one" a2 left_means_mirror
   simple_funny setup 1x4 1x4
      qualifier left num 2 wave_only
      restriction forbidden wave_only
      preds "Can't tell who."
         if select [0 0 0 0]
         if always [1N 0 3S 0]
   alternate_definition [left] a2
   setup 2x2 normal_concentric concendsetup 1x2 1x2 1
      predscantdo
         if always [0 0 0 0]
"#;

/// One person per slot, in couple order: slots 0 and 1 are couple 1, and so on.
pub fn dancers(dirs: &[Direction]) -> Vec<Option<Person>> {
    dirs.iter()
        .enumerate()
        .map(|(slot, &d)| {
            let couple = (slot / 2 % 4 + 1) as u8;
            let gender = if slot % 2 == 0 { Gender::Boy } else { Gender::Girl };
            Person::new(couple, gender, d)
        })
        .collect()
}

/// A fully populated formation of `kind`.
pub fn full(kind: SetupKind, dirs: &[Direction]) -> Formation {
    Formation::from_people(kind, dancers(dirs)).unwrap()
}

/// A 1x4 with the ends facing out and the centers (slots 1 and 3) facing in.
pub fn centers_in_line() -> Formation {
    use Direction::*;
    full(SetupKind::S1x4, &[West, East, West, East])
}

/// Calls whose blanks exercise the selector, direction and number scans.
pub fn blank_calls() -> Vec<CatalogCall> {
    vec![
        CatalogCall::new("hinge", Level::Mainstream, 0),
        CatalogCall::new("@6 run", Level::Mainstream, 0),
        CatalogCall::new("@6 walk @h", Level::Mainstream, cflag1::NUMBER_BIT),
    ]
}

/// A larger list for random searches: taggers, circulators and calls with blanks.
pub fn mixed_catalog() -> CallCatalog {
    CallCatalog::from_calls([
        CatalogCall::new("swing thru", Level::Mainstream, 0),
        CatalogCall::new("@6 run", Level::Mainstream, 0),
        CatalogCall::new("@6 walk @h", Level::Mainstream, cflag1::NUMBER_BIT),
        CatalogCall::new("@h touch a quarter", Level::Mainstream, 0),
        CatalogCall::new("circulate", Level::Mainstream, cflag1::BASE_CIRC_CALL),
        CatalogCall::new("@v your neighbor", Level::Plus, 0),
        CatalogCall::new("tag the line", Level::Mainstream, cflag1::BASE_TAG_CALL_BIT),
        CatalogCall::new("vertical tag", Level::A2, cflag1::BASE_TAG_CALL_BIT),
    ])
    .with_concepts(vec![3, 5, 8], vec![3])
}

pub fn scripted(catalog: CallCatalog, draws: Vec<u32>) -> SearchContext {
    SearchContext::with_random(
        catalog,
        PickOptions::default(),
        Box::new(ScriptedRandom::new(draws)),
    )
}

pub fn seeded(catalog: CallCatalog, options: PickOptions, seed: u64) -> SearchContext {
    SearchContext::with_random(catalog, options, Box::new(StdRandom::seeded(seed)))
}
