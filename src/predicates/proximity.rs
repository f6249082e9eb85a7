// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! "Near line", "left box" and the other selectors that pick half of a 2x4
//! by where it stands in the hall.
//!
//! The caller stands to the south: "near" is south, "far" north, "left"
//! west and "right" east, after the formation's rotation is applied. Rows
//! of the 2x4 are lines or columns; its two 2x2 halves are boxes.

use crate::geometry::{Direction, Formation, SetupKind};
use crate::predicates::{Selector, SelectorError};

/// Which part of the 2x4 a proximity selector names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Line,
    Column,
    Box,
}

fn split(selector: Selector) -> Option<(Part, Direction)> {
    use Selector::*;
    let part = match selector {
        NearLine | FarLine | LeftLine | RightLine => Part::Line,
        NearColumn | FarColumn | LeftColumn | RightColumn => Part::Column,
        NearBox | FarBox | LeftBox | RightBox => Part::Box,
        _ => return None,
    };
    let side = match selector {
        NearLine | NearColumn | NearBox => Direction::South,
        FarLine | FarColumn | FarBox => Direction::North,
        LeftLine | LeftColumn | LeftBox => Direction::West,
        _ => Direction::East,
    };
    Some((part, side))
}

/// Row (0 is the top row) and position along the row, west to east.
fn spot(place: usize) -> (usize, usize) {
    if place < 4 {
        (0, place)
    } else {
        (1, 7 - place)
    }
}

/// Decide whether a proximity selector picks the slot at `place`.
pub fn proximity_selected(
    formation: &Formation,
    place: usize,
    selector: Selector,
) -> Result<bool, SelectorError> {
    let (part, side) = split(selector).ok_or(SelectorError::IllegalDesignator)?;
    if formation.kind() != SetupKind::S2x4 {
        return Err(SelectorError::IllegalDesignator);
    }
    if formation.rotation_imprecise {
        return Err(SelectorError::RotationImprecise);
    }
    let rotation = formation.rotation;
    let (row, x) = spot(place);

    // The side of the hall this slot's row or half lies on.
    let mine = match part {
        Part::Box if x < 2 => Direction::West,
        Part::Box => Direction::East,
        _ if row == 0 => Direction::North,
        _ => Direction::South,
    }
    .rotate(rotation);
    if mine != side && mine != side.opposite() {
        // The rows, or the boxes, lie across the other axis of the hall.
        return Err(SelectorError::IllegalDesignator);
    }

    if part != Part::Box {
        let mut lines = false;
        let mut columns = false;
        for person in (0..formation.size()).filter_map(|slot| formation.person(slot)) {
            if person.direction.bits() & 1 == 0 {
                lines = true;
            } else {
                columns = true;
            }
        }
        let is_lines = match (lines, columns) {
            (true, false) => true,
            (false, true) => false,
            _ => return Err(SelectorError::CannotDetermine),
        };
        if is_lines != (part == Part::Line) {
            return Err(SelectorError::IllegalDesignator);
        }
    }
    Ok(mine == side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;
    use crate::geometry::{Gender, Person};

    fn two_by_four(dirs: [Direction; 8], rotation: u8) -> Formation {
        let people = (0..8).map(|slot| {
            let gender = if slot % 2 == 0 { Gender::Boy } else { Gender::Girl };
            Person::new((slot / 2 + 1) as u8, gender, dirs[slot])
        });
        let mut f = Formation::from_people(SetupKind::S2x4, people).unwrap();
        f.rotation = rotation;
        f.update_roles();
        f
    }

    fn chosen(f: &Formation, selector: Selector) -> Result<Vec<usize>, SelectorError> {
        let mut out = Vec::new();
        for place in 0..8 {
            if proximity_selected(f, place, selector)? {
                out.push(place);
            }
        }
        Ok(out)
    }

    const LINES_FACING_IN: [Direction; 8] =
        [South, South, South, South, North, North, North, North];
    const COLUMNS: [Direction; 8] = [East, East, East, East, West, West, West, West];

    #[test]
    fn test_near_and_far_lines() {
        let f = two_by_four(LINES_FACING_IN, 0);
        assert_eq!(chosen(&f, Selector::NearLine), Ok(vec![4, 5, 6, 7]));
        assert_eq!(chosen(&f, Selector::FarLine), Ok(vec![0, 1, 2, 3]));
        assert_eq!(
            chosen(&f, Selector::LeftLine),
            Err(SelectorError::IllegalDesignator)
        );
        assert_eq!(
            chosen(&f, Selector::NearColumn),
            Err(SelectorError::IllegalDesignator)
        );
        // The boxes are side by side across the hall.
        assert_eq!(chosen(&f, Selector::LeftBox), Ok(vec![0, 1, 6, 7]));
        assert_eq!(
            chosen(&f, Selector::NearBox),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_rotation_turns_near_into_left() {
        // A quarter turn clockwise puts the top row on the east side.
        let f = two_by_four(LINES_FACING_IN, 1);
        assert_eq!(chosen(&f, Selector::RightLine), Ok(vec![0, 1, 2, 3]));
        assert_eq!(chosen(&f, Selector::LeftLine), Ok(vec![4, 5, 6, 7]));
        assert_eq!(chosen(&f, Selector::FarBox), Ok(vec![0, 1, 6, 7]));
        assert_eq!(chosen(&f, Selector::NearBox), Ok(vec![2, 3, 4, 5]));
    }

    #[test]
    fn test_columns() {
        let f = two_by_four(COLUMNS, 2);
        assert_eq!(chosen(&f, Selector::NearColumn), Ok(vec![0, 1, 2, 3]));
        assert_eq!(
            chosen(&f, Selector::NearLine),
            Err(SelectorError::IllegalDesignator)
        );
    }

    #[test]
    fn test_mixed_rows_and_imprecise_rotation() {
        let mut dirs = LINES_FACING_IN;
        dirs[2] = East;
        let f = two_by_four(dirs, 0);
        assert_eq!(
            proximity_selected(&f, 0, Selector::NearLine),
            Err(SelectorError::CannotDetermine)
        );
        // Boxes do not care how people face.
        assert_eq!(proximity_selected(&f, 0, Selector::LeftBox), Ok(true));

        let mut f = two_by_four(LINES_FACING_IN, 0);
        f.rotation_imprecise = true;
        assert_eq!(
            proximity_selected(&f, 0, Selector::NearLine),
            Err(SelectorError::RotationImprecise)
        );
    }

    #[test]
    fn test_only_in_a_2x4() {
        let people = [North, South, South, North]
            .into_iter()
            .enumerate()
            .map(|(slot, d)| Person::new(1 + slot as u8 / 2, Gender::Boy, d));
        let f = Formation::from_people(SetupKind::S1x4, people).unwrap();
        assert_eq!(
            proximity_selected(&f, 0, Selector::NearLine),
            Err(SelectorError::IllegalDesignator)
        );
    }
}
