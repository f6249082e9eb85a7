// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicates named by `if` clauses in call definitions.
//!
//! Each predicate answers a yes/no question about one person in a formation.
//! The call language refers to predicates by name; the compiled database
//! refers to them by their position in [`Predicate::all`].
//!
//! Predicates that consult the call's selector come first in that order,
//! so "does this call need a selector" is a range check on the index.

use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::geometry::{Assumption, Formation, Gender, Person, Role, Roll, SetupKind, Slide};
use crate::predicates::{selectp, DirectionChoice, EvalContext, Selector, SelectorError, SomeMode, Warning};

/// Values of `n` for the `person_select_sum` family.
const SELECT_SUMS: [u8; 6] = [5, 8, 9, 11, 13, 15];
/// Values of `n` for the `person_real_sum` family.
const REAL_SUMS: [u8; 6] = [5, 8, 9, 11, 13, 24];
const SELECT_PLUS_MAX: u8 = 12;
const SELECT_REAL_PLUS_MAX: u8 = 11;
const REAL_PLUS_MAX: u8 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Spin {
    #[strum(serialize = "cw")]
    Clockwise,
    #[strum(serialize = "ccw")]
    Counterclockwise,
}

impl Spin {
    fn roll(self) -> Roll {
        match self {
            Spin::Clockwise => Roll::Right,
            Spin::Counterclockwise => Roll::Left,
        }
    }

    /// A slide to the left carries the body clockwise.
    fn slide(self) -> Slide {
        match self {
            Spin::Clockwise => Slide::Left,
            Spin::Counterclockwise => Slide::Right,
        }
    }
}

/// What a lateral pair must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PairFacing {
    Miniwave,
    Couple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BoxSpan {
    #[strum(serialize = "2x2")]
    Box2x2,
    #[strum(serialize = "2x4")]
    Box2x4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NeighborRelation {
    #[strum(serialize = "tandem_with_someone")]
    Tandem,
    #[strum(serialize = "antitandem")]
    AntiTandem,
    #[strum(serialize = "facing_someone")]
    Facing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum File {
    Lines,
    Columns,
}

/// Who a person in a line or column is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum FilePartner {
    /// The adjacent person in the same line (or column).
    Beside,
    /// The person beside me in the other line, one place over.
    Magic,
    /// Two places along in the same line.
    OnceRemoved,
    /// Directly across in the other line.
    Across,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CastMode {
    #[strum(serialize = "cast_normal")]
    Normal,
    #[strum(serialize = "cast_pushy")]
    Pushy,
    #[strum(serialize = "cast_normal_or_warn")]
    NormalOrWarn,
    #[strum(serialize = "cast_normal_or_nowarn")]
    NormalOrNoWarn,
}

impl CastMode {
    /// Bit 0: normal cast. Bit 1: fall back to normal with a warning.
    /// Bit 2: fall back to normal silently.
    fn bits(self) -> u8 {
        match self {
            CastMode::Normal => 1,
            CastMode::Pushy => 0,
            CastMode::NormalOrWarn => 3,
            CastMode::NormalOrNoWarn => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum JudgeKind {
    #[strum(serialize = "judge_is_right")]
    JudgeRight,
    #[strum(serialize = "judge_is_left")]
    JudgeLeft,
    #[strum(serialize = "socker_is_right")]
    SockerRight,
    #[strum(serialize = "socker_is_left")]
    SockerLeft,
}

impl JudgeKind {
    /// Four words per row; rows are indexed by `size - 3`.
    fn table(self) -> &'static [u8; 24] {
        match self {
            JudgeKind::JudgeRight => &[
                2, 0, 0, 2, 1, 0, 0, 2, 3, 0, 0, 2, 1, 0, 0, 2, 7, 7, 7, 7, 1, 0, 0, 2,
            ],
            JudgeKind::JudgeLeft => &[
                0, 2, 2, 0, 0, 2, 2, 0, 0, 3, 2, 0, 0, 2, 2, 0, 7, 7, 7, 7, 0, 2, 2, 0,
            ],
            JudgeKind::SockerRight => &[
                2, 0, 2, 0, 0, 0, 2, 0, 3, 0, 2, 0, 0, 0, 2, 0, 7, 7, 7, 7, 0, 0, 2, 0,
            ],
            JudgeKind::SockerLeft => &[
                0, 2, 0, 2, 1, 2, 0, 2, 0, 3, 0, 2, 1, 2, 0, 2, 7, 7, 7, 7, 1, 2, 0, 2,
            ],
        }
    }
}

/// Where "base" is, in quarter turns from the person's own spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum BaseSpot {
    Across,
    Right,
    Here,
    Left,
}

impl BaseSpot {
    fn offset(self) -> usize {
        match self {
            BaseSpot::Across => 0,
            BaseSpot::Right => 4,
            BaseSpot::Here => 8,
            BaseSpot::Left => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    Select,
    Unselect,
    SelectNearSelect,
    SelectNearUnselect,
    UnselectNearSelect,
    UnselectNearUnselect,
    SelectOnceRemFromSelect,
    SelectOnceRemFromUnselect,
    UnselectOnceRemFromSelect,
    /// Like `SelectNearSelect`, but an empty neighbor slot counts as selected.
    SelectNearSelectOrPhantom,
    /// The person at slot `n - index` is selected.
    SelectSum(u8),
    /// The person at slot `index + n` is selected.
    SelectPlus(u8),
    /// The person at slot `index + n` is live and selected.
    SelectRealPlus(u8),
    SelectAndRoll(Spin),
    Always,
    /// Slot `index + n` is occupied.
    RealPlus(u8),
    /// Slot `n - index` is occupied.
    RealSum(u8),
    LateralPair {
        facing: PairFacing,
        /// Warn that this is a suspect "destroy the line".
        nocycle_wheel: bool,
    },
    Neighbor {
        span: BoxSpan,
        relation: NeighborRelation,
    },
    /// Facing the same way as (or opposite to) a partner in a line or column.
    FilePair {
        file: File,
        partner: FilePartner,
        same: bool,
    },
    /// Facing compared with the person once removed in a 1x4.
    LineOnceRem(PairFacing),
    InterlockedCast,
    Cast(CastMode),
    Judge(JudgeKind),
    BoyGirl {
        gender: Gender,
        rh_slide_thru: bool,
    },
    RollIs(Spin),
    SlideOrRoll(Spin),
    WithOtherSex(Gender),
    FacingOtherSex(Gender),
    LateralToSex {
        same: bool,
    },
    Direction(DirectionChoice),
    /// Exactly `n` live people after me in my half of the setup.
    CountClockwise(u8),
    /// The centers of every diamond form a right-hand (or left-hand) miniwave.
    DiamondCenters {
        right_hand: bool,
    },
    OnBase(BaseSpot),
}

impl Predicate {
    /// Every predicate the call language can name, in database order.
    pub fn all() -> impl Iterator<Item = Predicate> {
        use Predicate::*;

        let selector_predicates = [
            Select,
            Unselect,
            SelectNearSelect,
            SelectNearUnselect,
            UnselectNearSelect,
            UnselectNearUnselect,
            SelectOnceRemFromSelect,
            SelectOnceRemFromUnselect,
            UnselectOnceRemFromSelect,
            SelectNearSelectOrPhantom,
        ]
        .into_iter()
        .chain(SELECT_SUMS.into_iter().map(SelectSum))
        .chain((1..=SELECT_PLUS_MAX).map(SelectPlus))
        .chain((1..=SELECT_REAL_PLUS_MAX).map(SelectRealPlus))
        .chain(Spin::iter().map(SelectAndRoll));

        let geometric = std::iter::once(Always)
            .chain((1..=REAL_PLUS_MAX).map(RealPlus))
            .chain(REAL_SUMS.into_iter().map(RealSum))
            .chain([false, true].into_iter().flat_map(|nocycle_wheel| {
                PairFacing::iter().map(move |facing| LateralPair {
                    facing,
                    nocycle_wheel,
                })
            }))
            .chain(BoxSpan::iter().flat_map(|span| {
                NeighborRelation::iter().map(move |relation| Neighbor { span, relation })
            }))
            .chain(File::iter().flat_map(|file| {
                FilePartner::iter().flat_map(move |partner| {
                    [false, true].into_iter().map(move |same| FilePair {
                        file,
                        partner,
                        same,
                    })
                })
            }))
            .chain(PairFacing::iter().map(LineOnceRem))
            .chain(std::iter::once(InterlockedCast))
            .chain(CastMode::iter().map(Cast))
            .chain(JudgeKind::iter().map(Judge))
            .chain((0..4).map(CountClockwise))
            .chain([true, false].into_iter().map(|right_hand| DiamondCenters { right_hand }));

        let personal = [false, true]
            .into_iter()
            .flat_map(|rh_slide_thru| {
                [Gender::Boy, Gender::Girl].into_iter().map(move |gender| BoyGirl {
                    gender,
                    rh_slide_thru,
                })
            })
            .chain(Spin::iter().map(RollIs))
            .chain(Spin::iter().map(SlideOrRoll))
            .chain([Gender::Boy, Gender::Girl].into_iter().map(WithOtherSex))
            .chain([Gender::Boy, Gender::Girl].into_iter().map(FacingOtherSex))
            .chain([true, false].into_iter().map(|same| LateralToSex { same }))
            .chain(
                [
                    DirectionChoice::Left,
                    DirectionChoice::Right,
                    DirectionChoice::In,
                    DirectionChoice::Out,
                    DirectionChoice::Back,
                    DirectionChoice::Zigzag,
                    DirectionChoice::Zagzig,
                    DirectionChoice::Zigzig,
                    DirectionChoice::Zagzag,
                    DirectionChoice::NoDirection,
                ]
                .into_iter()
                .map(Direction),
            )
            .chain(BaseSpot::iter().map(OnBase));

        selector_predicates.chain(geometric).chain(personal)
    }

    pub fn from_name(name: &str) -> Option<Predicate> {
        Self::all().find(|p| p.to_string() == name)
    }

    /// Position in [`Predicate::all`], as written to the database.
    pub fn index(&self) -> Option<usize> {
        Self::all().position(|p| p == *self)
    }

    pub fn from_index(index: usize) -> Option<Predicate> {
        Self::all().nth(index)
    }

    /// Predicates that consult the call's selector.
    pub fn needs_selector(&self) -> bool {
        use Predicate::*;
        matches!(
            self,
            Select
                | Unselect
                | SelectNearSelect
                | SelectNearUnselect
                | UnselectNearSelect
                | UnselectNearUnselect
                | SelectOnceRemFromSelect
                | SelectOnceRemFromUnselect
                | UnselectOnceRemFromSelect
                | SelectNearSelectOrPhantom
                | SelectSum(_)
                | SelectPlus(_)
                | SelectRealPlus(_)
                | SelectAndRoll(_)
        )
    }

    /// Predicates that consult the call's direction.
    pub fn needs_direction(&self) -> bool {
        matches!(self, Predicate::Direction(_))
    }

    /// Answer the predicate for the person at `index`.
    pub fn evaluate(
        &self,
        ctx: &mut EvalContext,
        formation: &Formation,
        index: usize,
    ) -> Result<bool, SelectorError> {
        use Predicate::*;

        let size = formation.size();
        if index >= size {
            return Err(SelectorError::IllegalDesignator);
        }
        let kind = formation.kind();
        // Empty slots count as facing North for partner arithmetic.
        let dir = formation
            .person(index)
            .map_or(0, |p| usize::from(p.direction.bits()));
        let once_removed = if kind == SetupKind::S2x4 {
            index ^ 2
        } else {
            index ^ 3
        };

        match *self {
            Select => selected(ctx, formation, index),
            Unselect => Ok(!selected(ctx, formation, index)?),
            SelectNearSelect => {
                if !selected(ctx, formation, index)? {
                    return Ok(false);
                }
                if everyone(ctx) {
                    return Ok(true);
                }
                // "Near" is lateral; a 2x2 of people facing sideways pairs across.
                let other = if kind == SetupKind::S2x2 && dir & 1 != 0 {
                    index ^ 3
                } else {
                    index ^ 1
                };
                live_and_selected(ctx, formation, other)
            }
            SelectNearUnselect => {
                if !selected(ctx, formation, index)? || everyone(ctx) {
                    return Ok(false);
                }
                absent_or_unselected(ctx, formation, index ^ 1)
            }
            UnselectNearSelect => {
                if selected(ctx, formation, index)? || nobody(ctx) {
                    return Ok(false);
                }
                live_and_selected(ctx, formation, index ^ 1)
            }
            UnselectNearUnselect => {
                if selected(ctx, formation, index)? {
                    return Ok(false);
                }
                if nobody(ctx) {
                    return Ok(true);
                }
                if kind == SetupKind::S4x4 {
                    // Nobody else in this group of four may be selected.
                    let base = index & !3;
                    for slot in base..base + 4 {
                        if live_and_selected(ctx, formation, slot)? {
                            return Ok(false);
                        }
                    }
                    return Ok(true);
                }
                absent_or_unselected(ctx, formation, index ^ 1)
            }
            SelectOnceRemFromSelect => {
                if !selected(ctx, formation, index)? {
                    return Ok(false);
                }
                if everyone(ctx) {
                    return Ok(true);
                }
                live_and_selected(ctx, formation, once_removed)
            }
            SelectOnceRemFromUnselect => {
                if !selected(ctx, formation, index)? || everyone(ctx) {
                    return Ok(false);
                }
                absent_or_unselected(ctx, formation, once_removed)
            }
            UnselectOnceRemFromSelect => {
                if selected(ctx, formation, index)? || nobody(ctx) {
                    return Ok(false);
                }
                live_and_selected(ctx, formation, once_removed)
            }
            SelectNearSelectOrPhantom => {
                if !selected(ctx, formation, index)? {
                    return Ok(false);
                }
                if everyone(ctx) {
                    return Ok(true);
                }
                let group = if kind == SetupKind::S4x4 {
                    (index & !3)..(index & !3) + 4
                } else {
                    (index ^ 1)..(index ^ 1) + 1
                };
                for slot in group.filter(|&slot| slot != index) {
                    if formation.is_live(slot) && !selected(ctx, formation, slot)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            SelectSum(n) => selected(ctx, formation, sum_index(size, index, n)),
            SelectPlus(n) => selected(ctx, formation, plus_index(kind, size, index, dir, n)),
            SelectRealPlus(n) => {
                live_and_selected(ctx, formation, plus_index(kind, size, index, dir, n))
            }
            SelectAndRoll(spin) => Ok(selected(ctx, formation, index)?
                && formation
                    .person(index)
                    .is_some_and(|p| p.roll == Some(spin.roll()))),
            Always => Ok(true),
            RealPlus(n) => Ok(formation.is_live(plus_index(kind, size, index, dir, n))),
            RealSum(n) => Ok(formation.is_live(sum_index(size, index, n))),
            LateralPair {
                facing,
                nocycle_wheel,
            } => {
                if nocycle_wheel {
                    ctx.warn(Warning::SuspectDestroyLine);
                }
                match formation.assumption {
                    Assumption::WaveOnly | Assumption::Miniwaves => {
                        return Ok(facing == PairFacing::Miniwave)
                    }
                    Assumption::TwoFacedOnly | Assumption::CouplesOnly | Assumption::LinesInOut => {
                        return Ok(facing == PairFacing::Couple)
                    }
                    _ => {}
                }
                let me = subject(formation, index)?;
                let other = index ^ (((dir << 1) & 2) ^ 1);
                let wanted = match facing {
                    PairFacing::Miniwave => OPPOSITE,
                    PairFacing::Couple => SAME,
                };
                Ok(relation(me, formation.person(other)) == Some(wanted))
            }
            Neighbor { span, relation: r } => neighbor(formation, index, dir, span, r),
            FilePair {
                file,
                partner,
                same,
            } => file_pair(formation, index, dir, file, partner, same),
            LineOnceRem(facing) => {
                line_once_removed(ctx, formation, index, facing == PairFacing::Miniwave, false)
            }
            InterlockedCast => line_once_removed(ctx, formation, index, true, true),
            Cast(mode) => cast(ctx, formation, index, mode),
            Judge(kind) => judge(ctx, formation, index, kind),
            BoyGirl {
                gender,
                rh_slide_thru,
            } => {
                let me = subject(formation, index)?;
                if rh_slide_thru && formation.northified_index(index).is_some_and(|n| n != 0) {
                    ctx.warn(Warning::TastelessSlideThru);
                }
                Ok(me.gender() == Some(gender))
            }
            RollIs(spin) => Ok(subject(formation, index)?.roll == Some(spin.roll())),
            SlideOrRoll(spin) => {
                let me = subject(formation, index)?;
                Ok(match me.slide {
                    Some(slide) => slide == spin.slide(),
                    None => me.roll == Some(spin.roll()),
                })
            }
            WithOtherSex(gender) => with_other_sex(formation, index, index ^ 1, gender),
            FacingOtherSex(gender) => {
                with_other_sex(formation, index, index ^ (((dir << 1) & 2) ^ 3), gender)
            }
            LateralToSex { same } => {
                let me = subject(formation, index)?;
                let t = if kind == SetupKind::S1x2 {
                    0
                } else {
                    (dir << 1) & 2
                };
                let other = formation.person(index ^ t ^ 1);
                Ok(match (me.gender(), other.and_then(Person::gender)) {
                    (Some(a), Some(b)) => (a == b) == same,
                    _ => false,
                })
            }
            Direction(wanted) => {
                ctx.direction_used = true;
                if ctx.options.direction == DirectionChoice::TheMusic {
                    let facing = match wanted {
                        DirectionChoice::NoDirection => Role::FaceFront,
                        DirectionChoice::Left => Role::FaceLeft,
                        DirectionChoice::Right => Role::FaceRight,
                        DirectionChoice::Back => Role::FaceBack,
                        _ => return Ok(false),
                    };
                    return Ok(formation
                        .person(index)
                        .is_some_and(|p| p.roles.contains(facing)));
                }
                Ok(ctx.options.direction == wanted)
            }
            CountClockwise(n) => {
                let half = size / 2;
                let limit = if index >= half { size } else { half };
                let count = (index + 1..limit).filter(|&slot| formation.is_live(slot)).count();
                Ok(count == usize::from(n))
            }
            DiamondCenters { right_hand } => diamond_centers(formation, right_hand),
            OnBase(spot) => {
                if formation.rotation_imprecise {
                    return Err(SelectorError::RotationImprecise);
                }
                ctx.number_used = true;
                let n = ctx.options.first_number();
                if !(1..=4).contains(&n) {
                    return Err(SelectorError::NumberOutOfRange(n));
                }
                Ok((((index + spot.offset()) >> 2) + n as usize) & 3 == 0)
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Predicate::*;
        match *self {
            Select => write!(f, "select"),
            Unselect => write!(f, "unselect"),
            SelectNearSelect => write!(f, "select_near_select"),
            SelectNearUnselect => write!(f, "select_near_unselect"),
            UnselectNearSelect => write!(f, "unselect_near_select"),
            UnselectNearUnselect => write!(f, "unselect_near_unselect"),
            SelectOnceRemFromSelect => write!(f, "select_once_rem_from_select"),
            SelectOnceRemFromUnselect => write!(f, "select_once_rem_from_unselect"),
            UnselectOnceRemFromSelect => write!(f, "unselect_once_rem_from_select"),
            SelectNearSelectOrPhantom => write!(f, "select_near_select_or_phantom"),
            SelectSum(n) => write!(f, "person_select_sum{n}"),
            SelectPlus(n) => write!(f, "person_select_plus{n}"),
            SelectRealPlus(n) => write!(f, "person_select_real_plus{n}"),
            SelectAndRoll(spin) => write!(f, "select_and_roll_is_{spin}"),
            Always => write!(f, "always"),
            RealPlus(n) => write!(f, "person_real_plus{n}"),
            RealSum(n) => write!(f, "person_real_sum{n}"),
            LateralPair {
                facing,
                nocycle_wheel,
            } => {
                write!(f, "2x2_{facing}")?;
                if nocycle_wheel {
                    write!(f, "_nocycle_wheel")?;
                }
                Ok(())
            }
            Neighbor { span, relation } => write!(f, "{span}_{relation}"),
            FilePair {
                file,
                partner,
                same,
            } => {
                let prefix = match partner {
                    FilePartner::Magic => "magic_",
                    FilePartner::OnceRemoved => "once_rem_",
                    FilePartner::Beside | FilePartner::Across => "",
                };
                // Lines pair sideways with the person beside them; columns
                // pair sideways with the person across.
                let lateral = (file == File::Lines) != (partner == FilePartner::Across);
                let word = match (lateral, same) {
                    (true, true) => "couple",
                    (true, false) => "miniwave",
                    (false, true) => "tandem",
                    (false, false) => "antitandem",
                };
                write!(f, "{file}_{prefix}{word}")
            }
            LineOnceRem(facing) => write!(f, "x14_once_rem_{facing}"),
            InterlockedCast => write!(f, "intlk_cast_normal_or_warn"),
            Cast(mode) => write!(f, "{mode}"),
            Judge(kind) => write!(f, "{kind}"),
            BoyGirl {
                gender,
                rh_slide_thru,
            } => {
                write!(f, "{}", gender_word(gender))?;
                if rh_slide_thru {
                    write!(f, "_rh_slide_thru")?;
                }
                Ok(())
            }
            RollIs(spin) => write!(f, "roll_is_{spin}"),
            SlideOrRoll(spin) => write!(f, "slide_or_roll_is_{spin}"),
            WithOtherSex(gender) => write!(
                f,
                "x12_{}_with_{}",
                gender_noun(gender),
                gender_noun(gender.opposite())
            ),
            FacingOtherSex(gender) => write!(
                f,
                "x22_{}_facing_{}",
                gender_noun(gender),
                gender_noun(gender.opposite())
            ),
            LateralToSex { same: true } => write!(f, "lateral_to_same_sex"),
            LateralToSex { same: false } => write!(f, "lateral_to_opposite_sex"),
            Direction(DirectionChoice::NoDirection) => write!(f, "no_dir_p"),
            Direction(DirectionChoice::TheMusic) => write!(f, "the_music_p"),
            Direction(d) => write!(f, "{d}p"),
            CountClockwise(n) => match n {
                0 => write!(f, "zero_cw_people"),
                1 => write!(f, "one_cw_person"),
                2 => write!(f, "two_cw_people"),
                3 => write!(f, "three_cw_people"),
                _ => write!(f, "{n}_cw_people"),
            },
            DiamondCenters { right_hand: true } => write!(f, "dmd_ctrs_rh"),
            DiamondCenters { right_hand: false } => write!(f, "dmd_ctrs_lh"),
            OnBase(spot) => write!(f, "base_is_{spot}"),
        }
    }
}

fn gender_word(gender: Gender) -> &'static str {
    match gender {
        Gender::Boy => "boyp",
        Gender::Girl => "girlp",
    }
}

fn gender_noun(gender: Gender) -> &'static str {
    match gender {
        Gender::Boy => "boy",
        Gender::Girl => "girl",
    }
}

const SAME: u8 = 0;
const OPPOSITE: u8 = 2;

/// `Some(0)` if `other` faces the same way as `me`, `Some(2)` if opposite,
/// `None` if perpendicular or absent.
fn relation(me: &Person, other: Option<&Person>) -> Option<u8> {
    other.and_then(|o| {
        let xor = me.direction.bits() ^ o.direction.bits();
        (xor & 1 == 0).then_some(xor)
    })
}

fn subject(formation: &Formation, index: usize) -> Result<&Person, SelectorError> {
    formation
        .person(index)
        .ok_or(SelectorError::CannotDetermine)
}

fn selected(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
) -> Result<bool, SelectorError> {
    let who = ctx.options.who.ok_or(SelectorError::IllegalDesignator)?;
    selectp(formation, index, who, SomeMode::Disallowed, ctx)
}

fn live_and_selected(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
) -> Result<bool, SelectorError> {
    Ok(formation.is_live(index) && selected(ctx, formation, index)?)
}

fn absent_or_unselected(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
) -> Result<bool, SelectorError> {
    Ok(!formation.is_live(index) || !selected(ctx, formation, index)?)
}

fn everyone(ctx: &EvalContext) -> bool {
    matches!(ctx.options.who, Some(Selector::All | Selector::Everyone))
}

fn nobody(ctx: &EvalContext) -> bool {
    ctx.options.who == Some(Selector::Nobody)
}

fn sum_index(size: usize, index: usize, n: u8) -> usize {
    (i64::from(n) - index as i64).rem_euclid(size as i64) as usize
}

/// Counting forward, except that a 1x3 counts backward for people facing south.
fn plus_index(kind: SetupKind, size: usize, index: usize, dir: usize, n: u8) -> usize {
    let n = usize::from(n) % size;
    if kind == SetupKind::S1x3 && dir & 2 != 0 {
        (index + size - n) % size
    } else {
        (index + n) % size
    }
}

fn neighbor(
    formation: &Formation,
    index: usize,
    dir: usize,
    span: BoxSpan,
    relation_wanted: NeighborRelation,
) -> Result<bool, SelectorError> {
    let me = subject(formation, index)?;
    let across: usize = match span {
        BoxSpan::Box2x2 => 3,
        BoxSpan::Box2x4 => 7,
    };
    let (wanted, trailers) = match (relation_wanted, span) {
        (NeighborRelation::Tandem, _) => (SAME, 0u32),
        (NeighborRelation::AntiTandem, _) => (OPPOSITE, 0),
        (NeighborRelation::Facing, BoxSpan::Box2x2) => (OPPOSITE, 0x1B),
        (NeighborRelation::Facing, BoxSpan::Box2x4) => (OPPOSITE, 0x1B1B),
    };
    // Two bits per slot; added to the direction, the "2" bit marks someone
    // whose back is to the partner.
    if trailers != 0 && ((trailers >> (index * 2)) as usize + dir) & 2 != 0 {
        return Ok(false);
    }
    let other = if dir & 1 == 0 { index ^ across } else { index ^ 1 };
    Ok(relation(me, formation.person(other)) == Some(wanted))
}

fn file_pair(
    formation: &Formation,
    index: usize,
    dir: usize,
    file: File,
    partner: FilePartner,
    same: bool,
) -> Result<bool, SelectorError> {
    let kind = formation.kind();
    let other = match (file, partner) {
        (File::Lines, FilePartner::Beside) => {
            if kind != SetupKind::Dmd {
                match formation.assumption {
                    Assumption::WaveOnly | Assumption::MagicOnly => return Ok(!same),
                    Assumption::TwoFacedOnly => return Ok(same),
                    _ => {}
                }
            }
            match kind {
                SetupKind::Dmd => Some(index ^ 2),
                SetupKind::S1x6 if index >= 2 => Some(7 - index),
                _ => Some(index ^ 1),
            }
        }
        (File::Columns, FilePartner::Beside) => {
            match (kind, index) {
                // Wings of a qtag and points of a spindle have nobody in their column.
                (SetupKind::Qtag, 2 | 6) | (SetupKind::Spindle, 3 | 7) => return Ok(false),
                (SetupKind::Qtag | SetupKind::Spindle, _) => {}
                _ => match formation.assumption {
                    Assumption::WaveOnly | Assumption::TwoFacedOnly => return Ok(same),
                    Assumption::MagicOnly | Assumption::LinesInOut => return Ok(!same),
                    _ => {}
                },
            }
            column_partner(kind, index, dir)
        }
        (_, FilePartner::Magic) => Some(magic_partner(kind, index, dir)),
        (_, FilePartner::OnceRemoved) => Some(index ^ 2),
        (_, FilePartner::Across) if kind == SetupKind::Bone => Some(index ^ 5),
        (_, FilePartner::Across) => Some(index ^ 7),
    };
    let Some(other) = other else {
        return Ok(false);
    };
    if other >= formation.size() {
        return Err(SelectorError::IllegalDesignator);
    }
    let me = subject(formation, index)?;
    let wanted = if same { SAME } else { OPPOSITE };
    Ok(relation(me, formation.person(other)) == Some(wanted))
}

/// The person in front of or behind me in my column.
fn column_partner(kind: SetupKind, index: usize, dir: usize) -> Option<usize> {
    let backward = dir & 2 != 0;
    Some(match kind {
        SetupKind::S1x6 if index >= 2 => 7 - index,
        SetupKind::S1x3 if index == 2 || !backward => {
            // The leader of a 1x3 has nobody ahead.
            return (index != 0).then_some(3 - index);
        }
        SetupKind::S2x3 => match index {
            2 => 1,
            3 => 4,
            1 if !backward => 2,
            4 if !backward => 3,
            _ => index ^ 1,
        },
        SetupKind::Qtag => {
            if index & 3 == 0 || (index & 3 == 3 && (dir ^ (index >> 1)) & 2 != 0) {
                index ^ 7
            } else {
                index ^ 2
            }
        }
        SetupKind::Spindle => match index {
            1 if backward => 0,
            1 => 2,
            5 if backward => 6,
            5 => 4,
            0 | 2 => 1,
            _ => 5,
        },
        _ => index ^ 1,
    })
}

/// One place over in the other line; a 2x3 centers choose by facing.
fn magic_partner(kind: SetupKind, index: usize, dir: usize) -> usize {
    if kind != SetupKind::S2x3 {
        return index ^ 6;
    }
    match index {
        1 => 3 + (dir & 2),
        4 => 2 - (dir & 2),
        0..=2 => 4,
        _ => 1,
    }
}

fn line_once_removed(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
    miniwave: bool,
    interlocked_cast: bool,
) -> Result<bool, SelectorError> {
    match formation.assumption {
        Assumption::WaveOnly | Assumption::LinesInOut | Assumption::OneFacedOnly => {
            return Ok(!miniwave)
        }
        Assumption::TwoFacedOnly | Assumption::MagicOnly => return Ok(miniwave),
        _ => {}
    }
    let other = index ^ 3;
    if other >= formation.size() {
        return Err(SelectorError::IllegalDesignator);
    }
    let me = subject(formation, index)?;
    match relation(me, formation.person(other)) {
        Some(r) => Ok((r == OPPOSITE) == miniwave),
        None if interlocked_cast => {
            // Ends have to be told; centers know.
            if index & 1 == 0 {
                ctx.warn(Warning::OptForNormalCast);
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn diamond_centers(formation: &Formation, right_hand: bool) -> Result<bool, SelectorError> {
    // (north center, south center) of each diamond.
    let centers: &[(usize, usize)] = match formation.kind() {
        SetupKind::Dmd => &[(1, 3)],
        SetupKind::Ptpd => &[(1, 3), (7, 5)],
        _ => return Err(SelectorError::IllegalDesignator),
    };
    let facing = |slot: usize| formation.person(slot).map(|p| p.direction.bits());
    // East is 1, West is 3.
    let all = |north: u8, south: u8| {
        centers
            .iter()
            .all(|&(n, s)| facing(n) == Some(north) && facing(s) == Some(south))
    };
    if all(1, 3) {
        Ok(right_hand)
    } else if all(3, 1) {
        Ok(!right_hand)
    } else {
        Err(SelectorError::CannotDetermine)
    }
}

fn cast(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
    mode: CastMode,
) -> Result<bool, SelectorError> {
    let bits = mode.bits();
    let normal = bits & 1 != 0;
    match formation.assumption {
        Assumption::WaveOnly | Assumption::Miniwaves => return Ok(normal),
        Assumption::CouplesOnly | Assumption::TwoFacedOnly => return Ok(!normal),
        _ => {}
    }
    let me = subject(formation, index)?;
    let kind = formation.kind();
    let other = if kind == SetupKind::S1x6 && index >= 2 {
        7 - index
    } else {
        index ^ 1
    };
    match relation(me, formation.person(other)).map(|r| r ^ ((bits & 1) << 1)) {
        Some(0) => Ok(true),
        Some(_) => Ok(false),
        None if bits & 4 != 0 => Ok(true),
        None if bits & 2 != 0 => {
            // Centers of the line know what to do without being told.
            let inner = if kind == SetupKind::S1x6 { 4 } else { 3 };
            if kind == SetupKind::S1x2 || (index != 1 && index != inner) {
                ctx.warn(Warning::OptForNormalCast);
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn judge(
    ctx: &mut EvalContext,
    formation: &Formation,
    index: usize,
    kind: JudgeKind,
) -> Result<bool, SelectorError> {
    let setup = formation.kind();
    let row = match setup {
        SetupKind::S1x3 => 0,
        SetupKind::S1x4 => 1,
        SetupKind::S1x6 => 3,
        SetupKind::S1x8 => 5,
        _ => return Err(SelectorError::IllegalDesignator),
    };
    let table = kind.table();
    let [e0, e1, e2, e3] = [
        table[row * 4],
        table[row * 4 + 1],
        table[row * 4 + 2],
        table[row * 4 + 3],
    ];
    let me = subject(formation, index)?;
    let facing = usize::from(me.direction.bits() & 2);
    let rel_at = |slot: usize| relation(me, formation.person(slot));

    if setup == SetupKind::S1x3 {
        return Ok(rel_at(usize::from(e0) ^ facing) == Some(e2)
            && rel_at(usize::from(e1) ^ facing) != Some(e3));
    }

    let mut f = facing ^ usize::from(e1);
    let assumption = formation.assumption;
    match setup {
        SetupKind::S1x4 => match assumption {
            Assumption::WaveOnly | Assumption::TwoFacedOnly => return Ok(false),
            Assumption::AllFacingSame | Assumption::OneFacedOnly | Assumption::LinesInOut => {
                return Ok(e0 != 0)
            }
            Assumption::MagicOnly => return Ok((index & 1) != usize::from(e0)),
            _ => {}
        },
        _ => {
            if setup == SetupKind::S1x6 {
                f += f >> 1;
            } else {
                f <<= 1;
            }
            match assumption {
                Assumption::WaveOnly => return Ok(false),
                Assumption::AllFacingSame | Assumption::OneFacedOnly => return Ok(e0 != 0),
                _ => {}
            }
        }
    }

    let reverse = formation.size() / 2 - f;
    let no_impostor = rel_at(f) != Some(e3);
    if rel_at(reverse) == Some(e2) && no_impostor {
        return Ok(true);
    }
    if !formation.is_live(reverse) && no_impostor {
        ctx.warn(Warning::PhantomJudge);
        return Ok(true);
    }
    Ok(false)
}

fn with_other_sex(
    formation: &Formation,
    index: usize,
    other: usize,
    gender: Gender,
) -> Result<bool, SelectorError> {
    let me = subject(formation, index)?;
    Ok(me.gender() == Some(gender)
        && formation.person(other).and_then(Person::gender) == Some(gender.opposite()))
}
