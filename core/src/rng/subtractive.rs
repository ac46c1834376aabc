//! Subtractive random number generator
//!
//! The classic 56-slot subtractive generator (Knuth's additive congruential
//! family). Not the fastest PRNG, but its output is frozen: every constant
//! below is load-bearing and the arithmetic must stay bit-exact, including
//! the overflow wraps and the `MBIG` off-by-one correction in the sample
//! step. Changing any of it silently breaks replay compatibility with
//! recorded simulations.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce exact simulation)
//! - Testing (golden vectors)
//! - Replays (re-run a recorded session from its seed)
//!
//! NOT cryptographically secure.

use crate::core::clock;
use crate::rng::state::{seed_array_serde, RngState, SEED_ARRAY_LEN};
use crate::rng::token::SeedToken;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Modulus-adjacent bound of the generator, `2^31 - 1`.
const MBIG: i32 = 0x7fff_ffff;

/// Seed mixing constant, 161803398 (first digits of the golden ratio).
const MSEED: i32 = 0x9a4e_c86;

/// `1 / (2^31 - 1)` as an exact floating literal. Written out, not
/// recomputed: recomputing can round differently and silently change every
/// float draw.
const SAMPLE_SCALE: f64 = 4.6566128752457969e-10;

/// Errors raised by the guarded sampling entry points
///
/// These are programming errors at the call site, never transient
/// conditions; nothing inside the generator recovers from them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RngError {
    #[error("upper bound must be non-negative, got {max}")]
    UpperBoundNegative { max: i32 },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i32, max: i32 },
}

/// Deterministic subtractive random number generator
///
/// Holds a 56-entry state array and two rolling indices. Every sampling call
/// mutates exactly one array slot and both indices. A generator is NOT safe
/// for concurrent mutation; give each thread of control its own instance
/// (see [`crate::rng::instance`]).
///
/// # Example
/// ```
/// use sim_rng_rs::SubtractiveRng;
///
/// let mut rng = SubtractiveRng::new(42);
/// assert_eq!(rng.next(), 1434747710);
/// assert_eq!(rng.next(), 302596119);
///
/// // Same seed, same stream.
/// let mut again = SubtractiveRng::new(42);
/// assert_eq!(again.next(), 1434747710);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtractiveRng {
    /// Internal state; slot 0 is written during seeding but never read as a
    /// sample in steady state.
    #[serde(with = "seed_array_serde")]
    seed_array: [i32; SEED_ARRAY_LEN],
    /// Rolling index, in [1, 55] after any sample.
    inext: usize,
    /// Second rolling index, 21 slots ahead of `inext` (mod 55).
    inextp: usize,
}

impl SubtractiveRng {
    /// Create a new generator from an explicit seed
    ///
    /// Total over all i32 values, including `i32::MIN`.
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let rng = SubtractiveRng::new(12345);
    /// ```
    pub fn new(seed: i32) -> Self {
        let mut rng = Self {
            seed_array: [0; SEED_ARRAY_LEN],
            inext: 0,
            inextp: 0,
        };
        rng.set_seed(seed);
        rng
    }

    /// Create a generator seeded from the coarse wall-clock tick count
    ///
    /// Convenience for throwaway randomness. Never use this where
    /// reproducibility matters; pass an explicit seed instead.
    pub fn from_clock() -> Self {
        Self::new(clock::tick_count())
    }

    /// Reseed in place, rewriting the entire internal state
    ///
    /// `i32::MIN` is mapped to `i32::MAX` (its absolute value is not
    /// representable), so `set_seed(i32::MIN)` and `set_seed(i32::MAX)`
    /// produce the same stream. Reseeding a shared generator without
    /// restoring the previous state afterwards desynchronizes every other
    /// call site drawing from it; prefer [`Self::push_seed`] for temporary
    /// reseeds.
    pub fn set_seed(&mut self, seed: i32) {
        let subtraction = if seed == i32::MIN { i32::MAX } else { seed.abs() };
        let mut mj = MSEED.wrapping_sub(subtraction);
        self.seed_array[SEED_ARRAY_LEN - 1] = mj;
        let mut mk: i32 = 1;
        // Scatter the first 54 values over the array at stride 21.
        for i in 1..55 {
            let index = (21 * i) % 55;
            self.seed_array[index] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = self.seed_array[index];
        }
        // Four mixing passes with a lag-31 subtraction.
        for _ in 1..5 {
            for k in 1..SEED_ARRAY_LEN {
                let lagged = self.seed_array[1 + (k + 30) % 55];
                self.seed_array[k] = self.seed_array[k].wrapping_sub(lagged);
                if self.seed_array[k] < 0 {
                    self.seed_array[k] = self.seed_array[k].wrapping_add(MBIG);
                }
            }
        }
        self.inext = 0;
        self.inextp = 21;
    }

    /// The raw advance step shared by every sampling method.
    ///
    /// Indices wrap from 55 back to 1; slot 0 is never sampled. Returns a
    /// value in [0, 2^31 - 1).
    fn internal_sample(&mut self) -> i32 {
        let mut inext = self.inext + 1;
        if inext >= SEED_ARRAY_LEN {
            inext = 1;
        }
        let mut inextp = self.inextp + 1;
        if inextp >= SEED_ARRAY_LEN {
            inextp = 1;
        }
        let mut num = self.seed_array[inext].wrapping_sub(self.seed_array[inextp]);
        if num == MBIG {
            num -= 1;
        }
        if num < 0 {
            num = num.wrapping_add(MBIG);
        }
        self.seed_array[inext] = num;
        self.inext = inext;
        self.inextp = inextp;
        num
    }

    /// Uniform f64 in [0, 1) from one raw sample.
    fn sample(&mut self) -> f64 {
        f64::from(self.internal_sample()) * SAMPLE_SCALE
    }

    /// Fractional position over spans wider than i32, from two raw samples.
    ///
    /// The second sample's parity picks the sign of the first; the shift and
    /// divisor constants are frozen and must not be simplified.
    fn sample_for_large_range(&mut self) -> f64 {
        let mut num = self.internal_sample();
        if self.internal_sample() % 2 == 0 {
            num = -num;
        }
        let mut result = f64::from(num);
        result += 2147483646.0;
        result / 4294967293.0
    }

    /// Generate the next raw sample, in [0, 2^31 - 1)
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(0);
    /// assert_eq!(rng.next(), 1559595546);
    /// ```
    pub fn next(&mut self) -> i32 {
        self.internal_sample()
    }

    /// Generate a value in [0, max)
    ///
    /// `next_max(0)` always yields 0.
    ///
    /// # Errors
    /// [`RngError::UpperBoundNegative`] if `max < 0`.
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(42);
    /// assert_eq!(rng.next_max(100).unwrap(), 66);
    /// ```
    pub fn next_max(&mut self, max: i32) -> Result<i32, RngError> {
        if max < 0 {
            return Err(RngError::UpperBoundNegative { max });
        }
        Ok((self.sample() * f64::from(max)) as i32)
    }

    /// Generate a value in [min, max)
    ///
    /// `next_range(k, k)` always yields `k`. Spans wider than `i32::MAX`
    /// (only reachable with bounds of opposite sign) take a two-sample wide
    /// path with its own frozen rounding behavior.
    ///
    /// # Errors
    /// [`RngError::InvalidRange`] if `min > max`.
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(7);
    /// let v = rng.next_range(10, 20).unwrap();
    /// assert!((10..20).contains(&v));
    /// ```
    pub fn next_range(&mut self, min: i32, max: i32) -> Result<i32, RngError> {
        if min > max {
            return Err(RngError::InvalidRange { min, max });
        }
        let span = i64::from(max) - i64::from(min);
        if span <= i64::from(i32::MAX) {
            return Ok((self.sample() * span as f64) as i32 + min);
        }
        // The wrapping i64 -> i32 truncation plus the wrapping add always
        // land the result back in [min, max).
        let scaled = (self.sample_for_large_range() * span as f64) as i64;
        Ok((scaled as i32).wrapping_add(min))
    }

    /// Fill a byte slice with random bytes
    ///
    /// Each byte consumes one full raw sample. Wasteful, but frozen: packing
    /// four bytes per sample would change every byte stream ever recorded.
    /// An empty slice is valid and draws nothing.
    pub fn next_bytes(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = (self.internal_sample() % 0x100) as u8;
        }
    }

    /// Generate a random i64
    ///
    /// Eight bytes via [`Self::next_bytes`], assembled little-endian, so
    /// this consumes eight raw samples.
    pub fn next_i64(&mut self) -> i64 {
        let mut buffer = [0u8; 8];
        self.next_bytes(&mut buffer);
        i64::from_le_bytes(buffer)
    }

    /// Generate a uniform f32 in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Generate a uniform f64 in [0, 1)
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(12345);
    /// let p = rng.next_f64();
    /// assert!((0.0..1.0).contains(&p));
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        self.sample()
    }

    /// Mint a fresh seed from the coarse clock xor one generator draw
    ///
    /// For creating derived generators (per entity, per subsystem) that
    /// should not share this generator's stream. The result is a seed, not
    /// uniform random output.
    pub fn create_random_seed(&mut self) -> i32 {
        clock::tick_count() ^ self.next()
    }

    /// Capture the exact internal state (for later [`Self::set_state`])
    ///
    /// Pure read; the generator is not advanced.
    pub fn state(&self) -> RngState {
        RngState {
            inext: self.inext as i32,
            inextp: self.inextp as i32,
            seed_array: self.seed_array,
        }
    }

    /// Overwrite the internal state from a snapshot
    ///
    /// Total replacement of both indices and all 56 array entries. After
    /// this, the output stream continues exactly from where the snapshot
    /// was taken.
    pub fn set_state(&mut self, state: &RngState) {
        self.inext = state.inext as usize;
        self.inextp = state.inextp as usize;
        self.seed_array = state.seed_array;
    }

    /// Temporarily reseed, restoring the current stream when the token drops
    ///
    /// # Example
    /// ```
    /// use sim_rng_rs::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(42);
    /// let expected = rng.clone().next();
    /// {
    ///     let mut token = rng.push_seed(777);
    ///     token.next(); // draws from the 777 stream
    /// }
    /// assert_eq!(rng.next(), expected); // original stream resumes
    /// ```
    pub fn push_seed(&mut self, new_seed: i32) -> SeedToken<'_> {
        let saved = self.state();
        self.set_seed(new_seed);
        SeedToken::restoring(self, saved)
    }

    /// Capture the current state without reseeding; restored on token drop
    ///
    /// Useful for speculative draws that must not advance the stream.
    pub fn push_state(&mut self) -> SeedToken<'_> {
        let saved = self.state();
        SeedToken::restoring(self, saved)
    }
}

/// Seeds from the coarse wall-clock tick count, like [`SubtractiveRng::from_clock`].
impl Default for SubtractiveRng {
    fn default() -> Self {
        Self::from_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SubtractiveRng::new(99999);
        let mut b = SubtractiveRng::new(99999);

        for _ in 0..100 {
            assert_eq!(a.next(), b.next(), "raw stream not deterministic");
        }
    }

    #[test]
    fn test_min_seed_maps_to_max_seed() {
        let mut min = SubtractiveRng::new(i32::MIN);
        let mut max = SubtractiveRng::new(i32::MAX);

        for _ in 0..32 {
            assert_eq!(min.next(), max.next());
        }
    }

    #[test]
    fn test_seed_sign_is_ignored() {
        // Seeding takes the absolute value, so +n and -n collide.
        let mut pos = SubtractiveRng::new(42);
        let mut neg = SubtractiveRng::new(-42);
        assert_eq!(pos.next(), neg.next());
    }

    #[test]
    fn test_raw_sample_range() {
        let mut rng = SubtractiveRng::new(7);
        for _ in 0..1000 {
            let v = rng.next();
            assert!((0..MBIG).contains(&v), "raw sample {} out of range", v);
        }
    }

    #[test]
    fn test_next_max_negative_is_rejected() {
        let mut rng = SubtractiveRng::new(1);
        assert_eq!(
            rng.next_max(-1),
            Err(RngError::UpperBoundNegative { max: -1 })
        );
    }

    #[test]
    fn test_next_range_inverted_is_rejected() {
        let mut rng = SubtractiveRng::new(1);
        assert_eq!(
            rng.next_range(5, 3),
            Err(RngError::InvalidRange { min: 5, max: 3 })
        );
    }

    #[test]
    fn test_next_max_zero_yields_zero() {
        let mut rng = SubtractiveRng::new(314159);
        for _ in 0..50 {
            assert_eq!(rng.next_max(0).unwrap(), 0);
        }
    }

    #[test]
    fn test_next_range_degenerate_yields_min() {
        let mut rng = SubtractiveRng::new(314159);
        for k in [-5, 0, 17, i32::MAX, i32::MIN] {
            assert_eq!(rng.next_range(k, k).unwrap(), k);
        }
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = SubtractiveRng::new(12345);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "next_f64() produced {}", v);
        }
    }

    #[test]
    fn test_next_f32_narrows_next_f64() {
        let mut wide = SubtractiveRng::new(5150);
        let mut narrow = SubtractiveRng::new(5150);
        for _ in 0..100 {
            assert_eq!(narrow.next_f32(), wide.next_f64() as f32);
        }
    }

    #[test]
    fn test_next_bytes_consumes_one_sample_per_byte() {
        let mut by_bytes = SubtractiveRng::new(42);
        let mut by_samples = SubtractiveRng::new(42);

        let mut buffer = [0u8; 16];
        by_bytes.next_bytes(&mut buffer);
        for byte in buffer {
            assert_eq!(byte, (by_samples.next() % 0x100) as u8);
        }
    }

    #[test]
    fn test_next_bytes_empty_slice_draws_nothing() {
        let mut rng = SubtractiveRng::new(42);
        let untouched = rng.clone();
        let mut empty: [u8; 0] = [];
        rng.next_bytes(&mut empty);
        assert_eq!(rng.state(), untouched.state());
    }

    #[test]
    fn test_next_i64_is_le_of_eight_samples() {
        let mut a = SubtractiveRng::new(2024);
        let mut b = SubtractiveRng::new(2024);

        let mut buffer = [0u8; 8];
        a.next_bytes(&mut buffer);
        assert_eq!(b.next_i64(), i64::from_le_bytes(buffer));
    }

    #[test]
    fn test_create_random_seed_advances_stream() {
        let mut rng = SubtractiveRng::new(1);
        let before = rng.state();
        let _ = rng.create_random_seed();
        assert_ne!(rng.state(), before, "seed minting must consume one draw");
    }

    #[test]
    fn test_wide_range_stays_in_bounds() {
        let mut rng = SubtractiveRng::new(42);
        for _ in 0..1000 {
            let v = rng.next_range(i32::MIN, i32::MAX).unwrap();
            assert!(v < i32::MAX);
        }
    }
}
