//! Random number sources for battle mechanics.
//!
//! Every random decision in a battle (damage variance, flee rolls, AI coin
//! flips, drops) goes through [`BattleRng`] so tests and replays can swap in a
//! seeded [`PcgRng`] or a scripted [`FixedRng`].

/// Source of randomness for a battle.
///
/// Only [`next_u32`](BattleRng::next_u32) is required; the helpers derive from
/// it but may be overridden to pin individual outcomes.
pub trait BattleRng {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f32 {
        // 24 bits fit exactly in an f32 mantissa.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform variance factor in `[min, max]`.
    fn variance(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        (min + (max - min) * self.unit()).clamp(min, max)
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform index in `[0, len)`. Returns 0 for `len <= 1`.
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.next_u32() as usize % len
    }

    /// Uniform value in `[min, max]` inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % span) as u32
    }
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn unit(&mut self) -> f32 {
        (**self).unit()
    }

    fn variance(&mut self, min: f32, max: f32) -> f32 {
        (**self).variance(min, max)
    }

    fn chance(&mut self, p: f32) -> bool {
        (**self).chance(p)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

impl<R: BattleRng + ?Sized> BattleRng for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn unit(&mut self) -> f32 {
        (**self).unit()
    }

    fn variance(&mut self, min: f32, max: f32) -> f32 {
        (**self).variance(min, max)
    }

    fn chance(&mut self, p: f32) -> bool {
        (**self).chance(p)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng
    }

    /// `state' = state * multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl BattleRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Scripted source that always answers the same way.
///
/// Deterministic stand-in for tests: variance is pinned, every coin flip
/// lands on `chance`, and every pick returns `index` (clamped to the range).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRng {
    pub variance: f32,
    pub chance: bool,
    pub index: usize,
}

impl FixedRng {
    /// Neutral roll (variance 1.0), failed coin flips, first element picks.
    pub const fn neutral() -> Self {
        Self {
            variance: 1.0,
            chance: false,
            index: 0,
        }
    }

    #[must_use]
    pub const fn with_variance(mut self, variance: f32) -> Self {
        self.variance = variance;
        self
    }

    #[must_use]
    pub const fn with_chance(mut self, chance: bool) -> Self {
        self.chance = chance;
        self
    }

    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl Default for FixedRng {
    fn default() -> Self {
        Self::neutral()
    }
}

impl BattleRng for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.index as u32
    }

    fn variance(&mut self, _min: f32, _max: f32) -> f32 {
        self.variance
    }

    fn chance(&mut self, _p: f32) -> bool {
        self.chance
    }

    fn pick(&mut self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min.saturating_add(self.index as u32).min(max)
    }
}
