//! # Cell Noise
//!
//! Per-cell white noise for the dirt/stone transition band.
//!
//! ## Determinism Guarantee
//!
//! The value depends only on the integer cell position. There is no seed and
//! no floating-point state, so every platform and every run produces
//! **exactly** the same terrain.

/// Salt mixed into every cell key so the noise is not trivially zero at the
/// origin.
const CELL_SALT: u64 = 0xDEAD_BEEF_CAFE_BABE;

/// Multiplier for the FNV-style mixing rounds.
const MIX: u64 = 0x517c_c1b7_2722_0a95;

/// Number of mantissa bits used when mapping the hash to `[0, 1)`.
const UNIT_BITS: u32 = 53;

/// Mixes a cell position into a well-distributed 64-bit hash.
#[inline]
#[must_use]
pub const fn cell_hash(x: i32, y: i32) -> u64 {
    let mut hash = (x as u32 as u64) | ((y as u32 as u64) << 32);
    hash ^= CELL_SALT;
    hash = hash.wrapping_mul(MIX);
    hash ^= hash >> 32;
    hash = hash.wrapping_mul(MIX);
    hash ^= hash >> 29;
    hash
}

/// Noise value for a cell, uniformly distributed in `[0, 1)`.
#[inline]
#[must_use]
pub fn cell_noise(x: i32, y: i32) -> f64 {
    let bits = cell_hash(x, y) >> (64 - UNIT_BITS);
    bits as f64 / (1_u64 << UNIT_BITS) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        for i in -50..50 {
            assert_eq!(cell_noise(i, i * 7), cell_noise(i, i * 7));
        }
    }

    #[test]
    fn test_range() {
        for x in -100..100 {
            for y in -20..20 {
                let v = cell_noise(x, y);
                assert!((0.0..1.0).contains(&v), "noise {v} out of range at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_axes_are_not_symmetric() {
        let differing = (1..100).filter(|&i| cell_hash(i, 0) != cell_hash(0, i)).count();
        assert_eq!(differing, 99);
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let samples = 10_000;
        let below_half = (0..samples)
            .filter(|&i| cell_noise(i % 100, i / 100) < 0.5)
            .count();
        // Loose bound, the point is catching a broken mapping.
        assert!((4_000..6_000).contains(&below_half), "got {below_half}");
    }
}
