//! Four-word xorshift generator. Deterministic: same seed produces the same sequence.
//! Not cryptographically secure; do not use it for keys, tokens, or anything adversarial.

use std::fmt;

use serde::{Deserialize, Serialize};

const INITIAL_STATE_A: u32 = 1;
const INITIAL_STATE_B: u32 = 2;
const INITIAL_STATE_C: u32 = 3;

/// Snapshot of all four state words. Restoring it with [Generator::from_state]
/// continues the sequence exactly where it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorState {
    pub seed: u32,
    pub state_a: u32,
    pub state_b: u32,
    pub state_c: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    seed: u32,
    state_a: u32,
    state_b: u32,
    state_c: u32,
}

impl Default for Generator {
    /// Unseeded generator: seed 0 with the fixed shift-register constants.
    fn default() -> Self {
        Self {
            seed: 0,
            state_a: INITIAL_STATE_A,
            state_b: INITIAL_STATE_B,
            state_c: INITIAL_STATE_C,
        }
    }
}

impl Generator {
    pub fn new(seed: u32) -> Self {
        let mut generator = Self::default();
        generator.set_seed(seed);
        generator
    }

    pub fn from_state(state: GeneratorState) -> Self {
        Self {
            seed: state.seed,
            state_a: state.state_a,
            state_b: state.state_b,
            state_c: state.state_c,
        }
    }

    pub fn state(&self) -> GeneratorState {
        GeneratorState {
            seed: self.seed,
            state_a: self.state_a,
            state_b: self.state_b,
            state_c: self.state_c,
        }
    }

    /// Restart the sequence for `seed`. The shift registers always go back to
    /// their constants, so nothing drawn before the reseed leaks into the new sequence.
    pub fn set_seed(&mut self, seed: u32) {
        self.state_a = INITIAL_STATE_A;
        self.state_b = INITIAL_STATE_B;
        self.state_c = INITIAL_STATE_C;
        self.seed = seed;
    }

    /// Returns the next 32-bit value and advances all four words.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        let t = self.seed ^ (self.seed << 11);
        self.seed = self.state_a;
        self.state_a = self.state_b;
        self.state_b = self.state_c;
        self.state_c = (self.state_c ^ (self.state_c >> 19)) ^ (t ^ (t >> 8));
        self.state_c
    }

    /// Next raw value as a float. This is a plain integer-to-float conversion,
    /// not a sample from `[0, 1)`.
    #[inline]
    pub fn next_value(&mut self) -> f64 {
        f64::from(self.next_raw())
    }

    /// Whole-number value in `[min, max]` when both bounds are whole numbers
    /// and `0 <= min <= max`. With fractional bounds the result can land
    /// anywhere up to `max + 1`.
    ///
    /// Bounds are not checked. Inverted, negative or non-finite bounds still
    /// consume a draw and return a number, just not one inside the range.
    /// Use [Generator::checked_ranged_value] to reject them instead.
    #[inline]
    pub fn ranged_value(&mut self, min: f64, max: f64) -> f64 {
        map_to_range(self.next_raw(), min, max)
    }

    /// Like [Generator::ranged_value], but refuses bounds for which the result
    /// could fall outside `[min, max]`: non-finite, inverted, negative or fractional.
    /// No draw is consumed when the bounds are rejected.
    pub fn checked_ranged_value(&mut self, min: f64, max: f64) -> Result<f64, RangeError> {
        check_range(min, max)?;
        Ok(self.ranged_value(min, max))
    }

    pub fn fill_raw(&mut self, out: &mut [u32]) {
        for slot in out.iter_mut() {
            *slot = self.next_raw();
        }
    }

    /// Endless iterator over raw draws; bound it with `take`.
    pub fn draws(&mut self) -> Draws<'_> {
        Draws { generator: self }
    }
}

/// Maps a raw draw onto `[min, max]` the same way [Generator::ranged_value] does.
#[inline]
pub fn map_to_range(raw: u32, min: f64, max: f64) -> f64 {
    (f64::from(raw) % (max + 1.0 - min)) + min
}

pub fn check_range(min: f64, max: f64) -> Result<(), RangeError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RangeError::NonFinite { min, max });
    }
    if max < min {
        return Err(RangeError::Inverted { min, max });
    }
    if min < 0.0 {
        return Err(RangeError::Negative { min, max });
    }
    if min.fract() != 0.0 || max.fract() != 0.0 {
        return Err(RangeError::Fractional { min, max });
    }
    Ok(())
}

pub struct Draws<'a> {
    generator: &'a mut Generator,
}

impl Iterator for Draws<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        Some(self.generator.next_raw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    NonFinite { min: f64, max: f64 },
    Inverted { min: f64, max: f64 },
    Negative { min: f64, max: f64 },
    Fractional { min: f64, max: f64 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { min, max } => {
                write!(f, "range bounds must be finite (min={min}, max={max})")
            }
            Self::Inverted { min, max } => {
                write!(f, "range max must not be below min (min={min}, max={max})")
            }
            Self::Negative { min, max } => {
                write!(f, "range bounds must not be negative (min={min}, max={max})")
            }
            Self::Fractional { min, max } => {
                write!(f, "range bounds must be whole numbers (min={min}, max={max})")
            }
        }
    }
}

impl std::error::Error for RangeError {}
