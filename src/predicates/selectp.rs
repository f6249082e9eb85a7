// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Selector evaluation: does `selector` pick the person at `place`?
//!
//! Most selectors reduce to an exclusive pair of roles. A person carrying
//! exactly one member of the pair gets an answer; a person carrying neither
//! is not described by the pair, which makes the selector illegal for them.
//! Empty slots of small setups are judged by the slot's positional roles.

use crate::geometry::constants::PHANTOM_FALLBACK_SLIMIT;
use crate::geometry::{Formation, Gender, Identity, Person, Role, RoleSet, SetupKind};
use crate::predicates::proximity::proximity_selected;
use crate::predicates::some::some_selected;
use crate::predicates::{EvalContext, Selector, SelectorError, SomeMode};

/// Who is being judged: a live person, or an empty slot seen through its
/// positional roles.
struct Subject<'a> {
    person: Option<&'a Person>,
    roles: RoleSet,
}

impl Subject<'_> {
    /// The error for a person the selector's roles do not describe.
    fn undecided(&self) -> SelectorError {
        if self.person.is_some() {
            SelectorError::IllegalDesignator
        } else {
            SelectorError::CannotDetermine
        }
    }

    /// `Some(true)` with only `yes`, `Some(false)` with only `no`.
    fn pair(&self, yes: Role, no: Role) -> Option<bool> {
        match (self.roles.contains(yes), self.roles.contains(no)) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }

    fn decide(&self, yes: Role, no: Role) -> Result<bool, SelectorError> {
        self.pair(yes, no).ok_or_else(|| self.undecided())
    }

    fn identity(&self) -> Result<Identity, SelectorError> {
        self.person
            .and_then(|p| p.identity)
            .ok_or(SelectorError::CannotDetermine)
    }
}

/// Decide whether `selector` picks the person at `place`.
///
/// Records that a selector was used in `ctx`.
pub fn selectp(
    formation: &Formation,
    place: usize,
    selector: Selector,
    allow_some: SomeMode,
    ctx: &mut EvalContext,
) -> Result<bool, SelectorError> {
    ctx.selector_used = true;
    let selector = match selector {
        Selector::VeryCenters => Selector::Center2,
        s => s,
    };

    match selector {
        Selector::All | Selector::Everyone => return Ok(true),
        Selector::Nobody => return Ok(false),
        _ => {}
    }

    let subject = match formation.person(place) {
        Some(person) => Subject {
            person: Some(person),
            roles: person.roles,
        },
        None => phantom_subject(formation, place, selector)?,
    };

    evaluate(formation, place, selector, allow_some, &subject)
}

fn phantom_subject(
    formation: &Formation,
    place: usize,
    selector: Selector,
) -> Result<Subject<'static>, SelectorError> {
    let kind = formation.kind();
    let small = kind
        .slimit()
        .is_some_and(|slimit| slimit < PHANTOM_FALLBACK_SLIMIT);
    match kind.attributes().positional.get(place) {
        Some(&roles) if small && selector.is_positional() => Ok(Subject {
            person: None,
            roles: roles.intersection(Role::POSITIONAL),
        }),
        _ => Err(SelectorError::CannotDetermine),
    }
}

fn evaluate(
    formation: &Formation,
    place: usize,
    selector: Selector,
    allow_some: SomeMode,
    subject: &Subject<'_>,
) -> Result<bool, SelectorError> {
    use Selector::*;
    let kind = formation.kind();
    let has = |role| subject.roles.contains(role);

    match selector {
        Boys => Ok(subject.identity()?.is_boy()),
        Girls => Ok(subject.identity()?.is_girl()),
        Heads => Ok(subject.identity()?.is_head()),
        Sides => Ok(subject.identity()?.is_side()),
        HeadCorners => Ok(subject.identity()?.is_head_corner()),
        SideCorners => Ok(subject.identity()?.is_side_corner()),
        HeadBoys | HeadGirls | SideBoys | SideGirls => {
            let id = subject.identity()?;
            let (head, boy) = match selector {
                HeadBoys => (true, true),
                HeadGirls => (true, false),
                SideBoys => (false, true),
                _ => (false, false),
            };
            Ok(id.is_head() == head && id.is_boy() == boy)
        }

        Centers => subject.decide(Role::Center, Role::End),
        Ends => subject.decide(Role::End, Role::Center),
        Leads => subject.decide(Role::Lead, Role::Trailer),
        Trailers => subject.decide(Role::Trailer, Role::Lead),
        Beaus => subject.decide(Role::Beau, Role::Belle),
        Belles => subject.decide(Role::Belle, Role::Beau),

        LeadEnds | LeadCenters | TrailEnds | TrailCenters => {
            let lead = subject.decide(Role::Lead, Role::Trailer)?;
            let center = subject.decide(Role::Center, Role::End)?;
            Ok(match selector {
                LeadEnds => lead && !center,
                LeadCenters => lead && center,
                TrailEnds => !lead && !center,
                _ => !lead && center,
            })
        }
        LeadBeaus | LeadBelles | TrailBeaus | TrailBelles => {
            let lead = subject.decide(Role::Lead, Role::Trailer)?;
            let beau = subject.decide(Role::Beau, Role::Belle)?;
            Ok(match selector {
                LeadBeaus => lead && beau,
                LeadBelles => lead && !beau,
                TrailBeaus => !lead && beau,
                _ => !lead && !beau,
            })
        }
        EndBoys | EndGirls | CenterBoys | CenterGirls => {
            let center = subject.decide(Role::Center, Role::End)?;
            let boy = subject.identity()?.gender() == Gender::Boy;
            Ok(match selector {
                EndBoys => !center && boy,
                EndGirls => !center && !boy,
                CenterBoys => center && boy,
                _ => center && !boy,
            })
        }
        MysticBeaus | MysticBelles => {
            let beau = subject.decide(Role::Beau, Role::Belle)?;
            let (end, center4) = (has(Role::End), has(Role::Center4));
            // Centers of a box are mystic the other way round.
            let mystic_beau = if end && !center4 {
                beau
            } else if center4 && !end {
                !beau
            } else if has(Role::OuterPairs) {
                beau
            } else {
                return Err(subject.undecided());
            };
            Ok(mystic_beau == (selector == MysticBeaus))
        }

        Center2 | Outer6 => match kind {
            SetupKind::S3x4 if selector == Center2 => Ok(has(Role::Center2)),
            SetupKind::S4x4 if selector == Center2 => {
                let centers = formation.livemask_word() & 0x0101_0101;
                if centers == 0x0001_0001 || centers == 0x0100_0100 {
                    Ok(place & 3 == 3)
                } else {
                    Err(SelectorError::CannotDetermine)
                }
            }
            SetupKind::S1x6 => {
                let center2 = subject.decide(Role::Center2, Role::OuterPairs)?;
                Ok(center2 && selector == Center2)
            }
            _ => {
                let center2 = subject.decide(Role::Center2, Role::Outer6)?;
                Ok(center2 == (selector == Center2))
            }
        },
        Center6 => subject.decide(Role::Center6, Role::Outer2),
        Outer2 | VeryEnds => subject.decide(Role::Outer2, Role::Center6),
        CtrDmd => subject.decide(Role::CtrDmd, Role::NotCtrDmd),
        NotCtrDmd => subject.decide(Role::NotCtrDmd, Role::CtrDmd),
        CenterColOf6
            if matches!(kind, SetupKind::S3x4 | SetupKind::Qtag | SetupKind::Spindle) =>
        {
            subject.decide(Role::Center6, Role::Outer2)
        }
        Ctr1x6 | CenterWaveOf6 | CenterLineOf6 | CenterColOf6 => {
            subject.decide(Role::Ctr1x6, Role::NotCtr1x6)
        }
        Outer1x3s => subject.decide(Role::Outer1x3, Role::NotOuter1x3),
        Ctr1x4 | CenterWave | CenterLine | CenterCol => {
            subject.decide(Role::Ctr1x4, Role::NotCtr1x4)
        }
        Center4 => subject
            .pair(Role::Center4, Role::OuterPairs)
            .or_else(|| subject.pair(Role::Center4, Role::End))
            .or_else(|| subject.pair(Role::Center4, Role::NotCtr1x4))
            .ok_or_else(|| subject.undecided()),
        CenterBox => subject
            .pair(Role::Center4, Role::OuterPairs)
            .or_else(|| subject.pair(Role::Center4, Role::End))
            .ok_or_else(|| subject.undecided()),
        OuterPairs => {
            if kind == SetupKind::S1x6 {
                return subject.decide(Role::OuterPairs, Role::Center2);
            }
            let inner = [Role::Center4, Role::Center, Role::Ctr1x4];
            let outer = has(Role::OuterPairs);
            if outer && !inner.iter().all(|&r| has(r)) {
                Ok(true)
            } else if !outer && inner.iter().any(|&r| has(r)) {
                Ok(false)
            } else {
                Err(subject.undecided())
            }
        }
        ThoseFacing => subject.decide(Role::Facing, Role::NotFacing),

        The2x3 | TheDiamond | TheLine | TheColumn => shape_selected(formation, place, selector, subject),

        HeadLiners | SideLiners | FacingFront | FacingBack | FacingLeft | FacingRight => {
            if formation.rotation_imprecise {
                return Err(SelectorError::RotationImprecise);
            }
            let facing = [Role::FaceFront, Role::FaceBack, Role::FaceLeft, Role::FaceRight]
                .into_iter()
                .find(|&r| has(r))
                .ok_or_else(|| subject.undecided())?;
            Ok(match selector {
                HeadLiners => matches!(facing, Role::FaceFront | Role::FaceBack),
                SideLiners => matches!(facing, Role::FaceLeft | Role::FaceRight),
                FacingFront => facing == Role::FaceFront,
                FacingBack => facing == Role::FaceBack,
                FacingLeft => facing == Role::FaceLeft,
                _ => facing == Role::FaceRight,
            })
        }

        Boy1 | Girl1 | Couple1 | Boy2 | Girl2 | Couple2 | Boy3 | Girl3 | Couple3 | Boy4
        | Girl4 | Couple4 | Couples12 | Couples23 | Couples34 | Couples41 => {
            let person = subject.person.ok_or(SelectorError::CannotDetermine)?;
            if !person.is_real() {
                return Err(SelectorError::CannotDetermine);
            }
            let id = subject.identity()?;
            Ok(unsymmetrical_selected(selector, id))
        }

        FirstOne | LastOne | FirstTwo | LastTwo | FirstThree | LastThree | FirstFour
        | LastFour | LeftmostOne | RightmostOne | LeftmostTwo | RightmostTwo | LeftmostThree
        | RightmostThree | LeftmostFour | RightmostFour => {
            ordinal_selected(formation, place, selector)
        }

        NearLine | FarLine | LeftLine | RightLine | NearColumn | FarColumn | LeftColumn
        | RightColumn | NearBox | FarBox | LeftBox | RightBox => {
            proximity_selected(formation, place, selector)
        }
        // No setup here divides into triangles.
        InsideTriangles | OutsideTriangles | InpointTriangles | OutpointTriangles
        | BeaupointTriangles | BellepointTriangles | WaveBasedTriangles
        | TandemBasedTriangles | AnyoneBasedTriangles => Err(SelectorError::IllegalDesignator),

        SomeGroup => some_selected(formation, place, allow_some),

        All | Everyone => Ok(true),
        Nobody => Ok(false),
        VeryCenters => evaluate(formation, place, Center2, allow_some, subject),
    }
}

fn unsymmetrical_selected(selector: Selector, id: Identity) -> bool {
    use Selector::*;
    let couple = id.couple();
    match selector {
        Boy1 => couple == 1 && id.is_boy(),
        Girl1 => couple == 1 && id.is_girl(),
        Couple1 => couple == 1,
        Boy2 => couple == 2 && id.is_boy(),
        Girl2 => couple == 2 && id.is_girl(),
        Couple2 => couple == 2,
        Boy3 => couple == 3 && id.is_boy(),
        Girl3 => couple == 3 && id.is_girl(),
        Couple3 => couple == 3,
        Boy4 => couple == 4 && id.is_boy(),
        Girl4 => couple == 4 && id.is_girl(),
        Couple4 => couple == 4,
        Couples12 => matches!(couple, 1 | 2),
        Couples23 => matches!(couple, 2 | 3),
        Couples34 => matches!(couple, 3 | 4),
        Couples41 => matches!(couple, 4 | 1),
        _ => false,
    }
}

/// "The 2x3", "the diamond", "the line" and "the column": a fixed set of
/// slots chosen by the setup and its occupancy.
fn shape_selected(
    formation: &Formation,
    place: usize,
    selector: Selector,
    subject: &Subject<'_>,
) -> Result<bool, SelectorError> {
    if selector == Selector::TheDiamond {
        if let Some(answer) = subject.pair(Role::CtrDmd, Role::NotCtrDmd) {
            return Ok(answer);
        }
    }

    let livemask = formation.livemask_word();
    let mask: Option<u32> = match (formation.kind(), selector) {
        (SetupKind::Spindle, Selector::The2x3) => Some(0x77),
        (SetupKind::Qtag, Selector::The2x3) => Some(0xBB),
        (SetupKind::S4x4, Selector::The2x3) => match livemask {
            0x0F03_333F => Some(0xE888),
            0x3F0F_0333 => Some(0x888E),
            0x333F_0F03 => Some(0x88E8),
            0x0333_3F0F => Some(0x8E88),
            _ => return Err(SelectorError::CannotDetermine),
        },
        (SetupKind::S4x4, Selector::TheLine | Selector::TheColumn) => match livemask {
            0x0F03_333F => Some(0x0A84),
            0x3F0F_0333 => Some(0xA840),
            0x333F_0F03 => Some(0x840A),
            0x0333_3F0F => Some(0x40A8),
            _ => return Err(SelectorError::CannotDetermine),
        },
        _ => None,
    };
    mask.map(|m| (m >> place) & 1 != 0)
        .ok_or(SelectorError::IllegalDesignator)
}

/// "First two", "leftmost one" and the like, counted along each row.
///
/// Everyone must face the same way along the rows (first/last) or across
/// them (leftmost/rightmost), with the rows of a 2x4 or 2x2 facing
/// opposite ways. Naming a whole row or more is illegal. When the facing
/// does not fit, an 8-person setup cannot be judged; in a 4-person setup
/// the ordinal has no meaning.
fn ordinal_selected(
    formation: &Formation,
    place: usize,
    selector: Selector,
) -> Result<bool, SelectorError> {
    use Selector::*;
    let (count, along, first) = match selector {
        FirstOne => (1, true, true),
        FirstTwo => (2, true, true),
        FirstThree => (3, true, true),
        FirstFour => (4, true, true),
        LastOne => (1, true, false),
        LastTwo => (2, true, false),
        LastThree => (3, true, false),
        LastFour => (4, true, false),
        RightmostOne => (1, false, true),
        RightmostTwo => (2, false, true),
        RightmostThree => (3, false, true),
        RightmostFour => (4, false, true),
        LeftmostOne => (1, false, false),
        LeftmostTwo => (2, false, false),
        LeftmostThree => (3, false, false),
        _ => (4, false, false),
    };

    // Row length, this slot's position along its row, and the direction
    // words for "everyone faces forward" and "everyone faces backward".
    let (row_len, position, along_words, across_words, mismatch) = match formation.kind() {
        SetupKind::S2x4 => (
            4,
            place & 3,
            (0x55FF, 0xFF55),
            (0x00AA, 0xAA00),
            SelectorError::CannotDetermine,
        ),
        SetupKind::S1x8 => (
            4,
            (place ^ ((place & 3) >> 1)) & 3,
            (0x55FF, 0xFF55),
            (0x00AA, 0xAA00),
            SelectorError::CannotDetermine,
        ),
        SetupKind::S1x4 => (
            4,
            (place ^ (place >> 1)) & 3,
            (0x55, 0xFF),
            (0x00, 0xAA),
            SelectorError::IllegalDesignator,
        ),
        SetupKind::S2x2 => (
            2,
            [0, 1, 0, 1][place & 3],
            (0x5F, 0xF5),
            (0x0A, 0xA0),
            SelectorError::IllegalDesignator,
        ),
        _ => return Err(SelectorError::IllegalDesignator),
    };
    if count >= row_len {
        return Err(SelectorError::IllegalDesignator);
    }

    let directions = formation.directions_word();
    let livemask = formation.livemask_word();
    let (forward, backward) = if along { along_words } else { across_words };
    let rank = if directions == livemask & forward {
        position
    } else if directions == livemask & backward {
        row_len - 1 - position
    } else {
        return Err(mismatch);
    };

    Ok(if first {
        rank >= row_len - count
    } else {
        rank < count
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::{self, *};
    use strum::IntoEnumIterator;

    fn line(dirs: [Direction; 4]) -> Formation {
        let people = [
            Person::boy(1, dirs[0]),
            Person::girl(1, dirs[1]),
            Person::boy(2, dirs[2]),
            Person::girl(2, dirs[3]),
        ];
        Formation::from_people(SetupKind::S1x4, people).unwrap()
    }

    fn select(f: &Formation, place: usize, selector: Selector) -> Result<bool, SelectorError> {
        let mut ctx = EvalContext::default();
        selectp(f, place, selector, SomeMode::Disallowed, &mut ctx)
    }

    #[test]
    fn test_centers_and_ends() {
        // Ends face out, centers face in.
        let f = line([West, East, West, East]);
        assert_eq!(select(&f, 1, Selector::Centers), Ok(true));
        assert_eq!(select(&f, 0, Selector::Centers), Ok(false));
        assert_eq!(select(&f, 2, Selector::Ends), Ok(true));
        assert_eq!(select(&f, 3, Selector::Outer6), Ok(false));
        assert_eq!(select(&f, 3, Selector::VeryCenters), Ok(true));
    }

    #[test]
    fn test_marks_selector_used() {
        let f = line([North, South, South, North]);
        let mut ctx = EvalContext::default();
        assert!(!ctx.selector_used);
        selectp(&f, 0, Selector::Everyone, SomeMode::Disallowed, &mut ctx).unwrap();
        assert!(ctx.selector_used);
    }

    #[test]
    fn test_identity_selectors() {
        let f = line([North, South, South, North]);
        assert_eq!(select(&f, 0, Selector::HeadBoys), Ok(true));
        assert_eq!(select(&f, 1, Selector::HeadBoys), Ok(false));
        assert_eq!(select(&f, 2, Selector::SideCorners), Ok(true));
        assert_eq!(select(&f, 3, Selector::HeadCorners), Ok(true));
        assert_eq!(select(&f, 3, Selector::Couples23), Ok(true));
        assert_eq!(select(&f, 0, Selector::Couples23), Ok(false));
        assert_eq!(select(&f, 0, Selector::Couples41), Ok(true));
    }

    #[test]
    fn test_unsymmetrical_needs_real_person() {
        let mut f = line([North, South, South, North]);
        f.place(2, Person::active_phantom(South)).unwrap();
        f.update_roles();
        assert_eq!(
            select(&f, 2, Selector::Boy2),
            Err(SelectorError::CannotDetermine)
        );
        assert_eq!(select(&f, 2, Selector::Centers), Ok(false));
    }

    #[test]
    fn test_wave_beaus_and_illegal_leads() {
        let f = line([North, South, South, North]);
        assert_eq!(select(&f, 0, Selector::Beaus), Ok(true));
        assert_eq!(select(&f, 1, Selector::Belles), Ok(false));
        // Nobody in a line has a tandem partner.
        assert_eq!(
            select(&f, 0, Selector::Leads),
            Err(SelectorError::IllegalDesignator)
        );
        assert_eq!(
            select(&f, 0, Selector::FirstFour),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_phantom_fallback_only_for_positional_selectors() {
        let mut f = line([West, East, West, East]);
        f.clear(1);
        f.update_roles();
        assert_eq!(select(&f, 1, Selector::Centers), Ok(true));
        assert_eq!(select(&f, 1, Selector::Center6), Ok(true));
        assert_eq!(
            select(&f, 1, Selector::Boys),
            Err(SelectorError::CannotDetermine)
        );
        assert_eq!(
            select(&f, 1, Selector::Beaus),
            Err(SelectorError::CannotDetermine)
        );
    }

    #[test]
    fn test_no_fallback_in_large_setups() {
        let mut f = Formation::new(SetupKind::S3x4);
        f.place(0, Person::boy(1, North).unwrap()).unwrap();
        f.update_roles();
        assert_eq!(
            select(&f, 5, Selector::Center2),
            Err(SelectorError::CannotDetermine)
        );
    }

    #[test]
    fn test_facing_selectors_need_precise_rotation() {
        let mut f = line([North, South, South, North]);
        assert_eq!(select(&f, 0, Selector::FacingBack), Ok(true));
        assert_eq!(select(&f, 1, Selector::HeadLiners), Ok(true));
        assert_eq!(select(&f, 1, Selector::SideLiners), Ok(false));
        f.rotation = 1;
        f.update_roles();
        assert_eq!(select(&f, 0, Selector::FacingRight), Ok(true));
        assert_eq!(select(&f, 0, Selector::SideLiners), Ok(true));
        f.rotation_imprecise = true;
        f.update_roles();
        assert_eq!(
            select(&f, 0, Selector::FacingRight),
            Err(SelectorError::RotationImprecise)
        );
    }

    fn two_by_four(dirs: [Direction; 8]) -> Formation {
        let people = (0..8).map(|slot| {
            let couple = (slot / 2 + 1) as u8;
            let gender = if slot % 2 == 0 { Gender::Boy } else { Gender::Girl };
            Person::new(couple, gender, dirs[slot])
        });
        Formation::from_people(SetupKind::S2x4, people).unwrap()
    }

    #[test]
    fn test_ordinals_in_columns() {
        // Right-hand columns: top row faces East, bottom row faces West.
        let f = two_by_four([East, East, East, East, West, West, West, West]);
        assert_eq!(select(&f, 3, Selector::FirstOne), Ok(true));
        assert_eq!(select(&f, 2, Selector::FirstOne), Ok(false));
        assert_eq!(select(&f, 2, Selector::FirstTwo), Ok(true));
        assert_eq!(select(&f, 0, Selector::LastOne), Ok(true));
        assert_eq!(select(&f, 4, Selector::LastOne), Ok(true));
        assert_eq!(select(&f, 7, Selector::FirstOne), Ok(true));
        assert_eq!(
            select(&f, 0, Selector::LeftmostOne),
            Err(SelectorError::CannotDetermine)
        );
    }

    #[test]
    fn test_ordinals_in_lines() {
        // Lines facing out: top row North, bottom row South.
        let f = two_by_four([North, North, North, North, South, South, South, South]);
        assert_eq!(select(&f, 0, Selector::LeftmostOne), Ok(true));
        assert_eq!(select(&f, 3, Selector::RightmostOne), Ok(true));
        assert_eq!(select(&f, 1, Selector::LeftmostTwo), Ok(true));
        assert_eq!(select(&f, 2, Selector::LeftmostTwo), Ok(false));
        let line = line([North, North, North, North]);
        assert_eq!(
            select(&line, 0, Selector::FirstOne),
            Err(SelectorError::IllegalDesignator)
        );
        assert_eq!(
            select(&f, 0, Selector::LeftmostFour),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_ordinals_in_small_setups() {
        // A 1x4 facing East is a single column; slot 2 is at its head.
        let column = line([East, East, East, East]);
        let first_two: Vec<usize> = (0..4)
            .filter(|&p| select(&column, p, Selector::FirstTwo) == Ok(true))
            .collect();
        assert_eq!(first_two, vec![2, 3]);
        assert_eq!(select(&column, 0, Selector::LastOne), Ok(true));

        // Facing North, the line counts from the left.
        let facing_north = line([North, North, North, North]);
        assert_eq!(select(&facing_north, 1, Selector::LeftmostTwo), Ok(true));
        assert_eq!(select(&facing_north, 3, Selector::LeftmostTwo), Ok(false));
        assert_eq!(select(&facing_north, 2, Selector::RightmostOne), Ok(true));

        // Right-hand box circulate: rows of two facing opposite ways.
        let people = [
            Person::boy(1, East),
            Person::girl(1, East),
            Person::boy(2, West),
            Person::girl(2, West),
        ];
        let boxed = Formation::from_people(SetupKind::S2x2, people).unwrap();
        let leaders: Vec<usize> = (0..4)
            .filter(|&p| select(&boxed, p, Selector::FirstOne) == Ok(true))
            .collect();
        assert_eq!(leaders, vec![1, 3]);
        assert_eq!(
            select(&boxed, 0, Selector::FirstTwo),
            Err(SelectorError::IllegalDesignator)
        );

        // Mixed facing in a 1x4 is not a column at all.
        let wave = line([North, South, South, North]);
        assert_eq!(
            select(&wave, 0, Selector::FirstOne),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_proximity_and_triangles_dispatch() {
        let f = two_by_four([South, South, South, South, North, North, North, North]);
        assert_eq!(select(&f, 5, Selector::NearLine), Ok(true));
        assert_eq!(select(&f, 1, Selector::NearLine), Ok(false));
        assert_eq!(
            select(&f, 1, Selector::WaveBasedTriangles),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_qtag_the_2x3() {
        let dirs = [South, South, North, South, North, North, South, North];
        let people = (0..8).map(|slot| {
            let couple = (slot / 2 + 1) as u8;
            let gender = if slot % 2 == 0 { Gender::Boy } else { Gender::Girl };
            Person::new(couple, gender, dirs[slot])
        });
        let f = Formation::from_people(SetupKind::Qtag, people).unwrap();
        let chosen: Vec<usize> = (0..8)
            .filter(|&slot| select(&f, slot, Selector::The2x3) == Ok(true))
            .collect();
        assert_eq!(chosen, vec![0, 1, 3, 4, 5, 7]);
        assert_eq!(
            select(&f, 0, Selector::TheLine),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_every_selector_answers_on_full_line() {
        let f = line([North, South, South, North]);
        for selector in Selector::iter() {
            for place in 0..4 {
                let result = select(&f, place, selector);
                assert_ne!(
                    result,
                    Err(SelectorError::CannotDetermine),
                    "{} at {}",
                    selector,
                    place
                );
            }
        }
    }
}
