use fastrand::Rng;

/// A seeded pseudo-random generator.
///
/// There is no process-wide generator: every caller owns a `Random` and the seed it was built
/// with fully determines the sequence it produces.
#[derive(Clone, Debug)]
pub struct Random {
    rng: Rng,
    seed: u64,
}

impl Random {
    pub fn with_seed(seed: u64) -> Self {
        Random {
            rng: Rng::with_seed(seed),
            seed,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
        self.seed = seed;
    }

    /// Returns a value in `[min, max]`. The bounds may be given in either order.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.rng.i32(min..=max)
    }

    /// Returns a value in `[min, max)`, or `min` if the range is empty.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        // In `f64` the width of any finite range is finite. Rounding back to `f32` may still land
        // on `max` itself, which is then stepped down to the largest value below it.
        let (low, high) = (f64::from(min), f64::from(max));
        let value = (low + self.rng.f64() * (high - low)) as f32;
        if value < max {
            value
        } else {
            next_down(max).max(min)
        }
    }

    /// Returns `true` with probability `probability`, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f32) -> bool {
        if probability <= 0.0 {
            false
        } else if probability >= 1.0 {
            true
        } else {
            self.rng.f32() < probability
        }
    }
}

/// The largest `f32` smaller than a finite `value`.
fn next_down(value: f32) -> f32 {
    if value == 0.0 {
        -f32::from_bits(1)
    } else if value > 0.0 {
        f32::from_bits(value.to_bits() - 1)
    } else {
        f32::from_bits(value.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{next_down, Random};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Random::with_seed(1234);
        let mut b = Random::with_seed(1234);
        for _ in 0..64 {
            assert_eq!(a.range_i32(-100, 100), b.range_i32(-100, 100));
        }
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut random = Random::with_seed(7);
        let first: Vec<i32> = (0..16).map(|_| random.range_i32(0, 1000)).collect();
        random.reseed(7);
        let second: Vec<i32> = (0..16).map(|_| random.range_i32(0, 1000)).collect();
        assert_eq!(first, second);
        assert_eq!(random.seed(), 7);
    }

    #[test]
    fn integer_range_is_inclusive() {
        let mut random = Random::with_seed(99);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let value = random.range_i32(3, 1);
            assert!(value >= 1 && value <= 3);
            seen[(value - 1) as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
        assert_eq!(random.range_i32(5, 5), 5);
    }

    #[test]
    fn float_range_is_half_open() {
        let mut random = Random::with_seed(42);
        for _ in 0..1000 {
            let value = random.range_f32(-1.0, 1.0);
            assert!(value >= -1.0 && value < 1.0);
        }
        assert_eq!(random.range_f32(2.0, 2.0), 2.0);
    }

    #[test]
    fn float_range_excludes_max_at_large_magnitudes() {
        let mut random = Random::with_seed(3);
        for _ in 0..10_000 {
            let value = random.range_f32(16_777_216.0, 16_777_218.0);
            assert!(value >= 16_777_216.0 && value < 16_777_218.0);
        }
        for _ in 0..1000 {
            let value = random.range_f32(-f32::MAX, f32::MAX);
            assert!(value.is_finite() && value < f32::MAX);
        }
    }

    #[test]
    fn next_down_steps_one_ulp() {
        assert_eq!(next_down(16_777_218.0), 16_777_216.0);
        assert_eq!(next_down(1.0), 1.0 - f32::EPSILON / 2.0);
        assert_eq!(next_down(-1.0), -1.0 - f32::EPSILON);
        assert!(next_down(0.0) < 0.0);
    }

    #[test]
    fn chance_extremes() {
        let mut random = Random::with_seed(0);
        for _ in 0..100 {
            assert!(!random.chance(0.0));
            assert!(random.chance(1.0));
        }
    }
}
