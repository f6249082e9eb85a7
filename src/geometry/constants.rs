// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constants shared by the formation encoding.
//!
//! The person slot capacity bounds every formation, and therefore the width of
//! the packed direction and live-mask words used by the selector tables.

/// Maximum number of person slots in any formation.
///
/// Sixteen slots with two bits each fill a `u32` direction word exactly.
pub const MAX_PEOPLE: usize = 16;

/// Positional fallback for phantoms is only attempted below this subject limit.
///
/// Larger setups depend too much on actual occupancy for a static table
/// to describe an unoccupied spot.
pub const PHANTOM_FALLBACK_SLIMIT: usize = 8;

/// Bits per person in the packed direction and live-mask words.
pub const BITS_PER_PERSON: usize = 2;

/// Number of couples in a square.
pub const NCOUPLES: u8 = 4;
