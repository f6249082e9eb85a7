// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ripple-carry iterators for the exhaustive scans.
//!
//! Dimensions nest innermost first: selector, direction, number, tagger,
//! circcer. A dimension advances only when every dimension inside it has
//! wrapped back to zero, so the whole vector behaves like an odometer.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iterators {
    pub selector: u32,
    pub direction: u32,
    pub number: u32,
    pub tagger: u32,
    pub circcer: u32,
}

impl Iterators {
    pub fn reset(&mut self) {
        *self = Iterators::default();
    }

    /// Whether the selector and direction dimensions have wrapped.
    pub fn inside_number_idle(&self) -> bool {
        (self.selector | self.direction) == 0
    }

    /// Whether every dimension inside the tagger has wrapped.
    pub fn inside_tagger_idle(&self) -> bool {
        (self.selector | self.direction | self.number) == 0
    }

    pub fn inside_circcer_idle(&self) -> bool {
        (self.selector | self.direction | self.number | self.tagger) == 0
    }

    /// Whether every dimension has wrapped, so the current call is finished.
    pub fn all_idle(&self) -> bool {
        (self.selector | self.direction | self.number | self.tagger | self.circcer) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_levels() {
        let mut it = Iterators::default();
        assert!(it.all_idle());
        it.number = 3;
        assert!(it.inside_number_idle());
        assert!(!it.inside_tagger_idle());
        assert!(!it.inside_circcer_idle());
        assert!(!it.all_idle());
        it.reset();
        assert!(it.all_idle());
    }
}
