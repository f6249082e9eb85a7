// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sources of random draws for the pick engine.
//!
//! The engine only ever asks for a value below some modulus. Injecting the
//! source lets a search be replayed exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource: std::fmt::Debug {
    /// A value in `0..modulus`. `modulus` is never zero.
    fn below(&mut self, modulus: u32) -> u32;
}

/// The default source, backed by a seedable generator.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        StdRandom {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible source, for resolve tests.
    pub fn seeded(seed: u64) -> Self {
        StdRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn below(&mut self, modulus: u32) -> u32 {
        self.rng.gen_range(0..modulus)
    }
}

/// Replays a fixed list of draws, reduced modulo the request; zero once
/// the list runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<u32>,
    used: usize,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        ScriptedRandom {
            draws: draws.into_iter().collect(),
            used: 0,
        }
    }

    /// How many draws have been requested.
    pub fn used(&self) -> usize {
        self.used
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, modulus: u32) -> u32 {
        self.used += 1;
        self.draws.pop_front().unwrap_or(0) % modulus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = StdRandom::seeded(37);
        let mut b = StdRandom::seeded(37);
        let xs: Vec<u32> = (0..20).map(|_| a.below(1000)).collect();
        let ys: Vec<u32> = (0..20).map(|_| b.below(1000)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 1000));
    }

    #[test]
    fn test_scripted_source() {
        let mut s = ScriptedRandom::new([5, 9]);
        assert_eq!(s.below(4), 1);
        assert_eq!(s.below(10), 9);
        assert_eq!(s.below(3), 0);
        assert_eq!(s.used(), 3);
    }
}
