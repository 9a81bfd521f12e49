//! `rand`-backed battle randomness for production hosts.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use game_core::BattleRng;

/// [`BattleRng`] on top of [`StdRng`].
///
/// Seed it for reproducible sessions or let it pull from OS entropy.
#[derive(Debug, Clone)]
pub struct StdBattleRng {
    inner: StdRng,
}

impl StdBattleRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl BattleRng for StdBattleRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn unit(&mut self) -> f32 {
        self.inner.r#gen::<f32>()
    }

    fn variance(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    fn chance(&mut self, p: f32) -> bool {
        if p.is_nan() {
            return false;
        }
        self.inner.gen_bool(f64::from(p.clamp(0.0, 1.0)))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rolls() {
        let mut a = StdBattleRng::seeded(5);
        let mut b = StdBattleRng::seeded(5);
        for _ in 0..16 {
            assert_eq!(a.variance(0.85, 1.15), b.variance(0.85, 1.15));
        }
    }

    #[test]
    fn helpers_stay_in_bounds() {
        let mut rng = StdBattleRng::seeded(11);
        for _ in 0..1000 {
            assert!((0.85..=1.15).contains(&rng.variance(0.85, 1.15)));
            assert!(rng.pick(4) < 4);
            assert!((1..=3).contains(&rng.range(1, 3)));
        }
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let mut rng = StdBattleRng::seeded(3);
        assert!(!rng.chance(f32::NAN));
        assert!(rng.chance(7.0));
        assert_eq!(rng.variance(1.1, 0.9), 1.1);
        assert!(rng.variance(f32::NAN, 1.0).is_nan());
    }
}
