// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Selector failures and non-fatal warnings.

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};
use thiserror::Error;

/// Why a selector or predicate could not give an answer.
///
/// None of these are retried: the caller decides whether to abandon the
/// call or try another definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, EnumCountMacro)]
pub enum SelectorError {
    /// The selector has no meaning for this shape or person.
    #[error("this designator can't be used here")]
    IllegalDesignator,
    /// The formation does not carry enough evidence to decide.
    #[error("can't decide who are selected")]
    CannotDetermine,
    /// The selector needs the formation's absolute orientation.
    #[error("can't do this when the setup's orientation is imprecise")]
    RotationImprecise,
    /// A numeric parameter is outside the range the predicate accepts.
    #[error("number {0} is out of range here")]
    NumberOutOfRange(u32),
}

/// Advisory conditions recorded alongside a successful answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCountMacro)]
pub enum Warning {
    #[strum(serialize = "Judge or socker is a phantom.")]
    PhantomJudge,
    #[strum(serialize = "Opting for normal cast.")]
    OptForNormalCast,
    #[strum(serialize = "Slide thru from right hand is tasteless.")]
    TastelessSlideThru,
    #[strum(serialize = "Assuming this is a suspect destroy the line.")]
    SuspectDestroyLine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SelectorError::CannotDetermine.to_string(),
            "can't decide who are selected"
        );
        assert_eq!(
            SelectorError::NumberOutOfRange(7).to_string(),
            "number 7 is out of range here"
        );
    }

    #[test]
    fn test_warnings_have_text() {
        for warning in Warning::iter() {
            assert!(warning.to_string().ends_with('.'));
        }
    }
}
