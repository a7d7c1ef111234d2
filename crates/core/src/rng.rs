//! RNG module - injectable randomness and Fisher–Yates shuffle
//!
//! The generator never reaches for an ambient random function. Every caller
//! passes a [`RandomSource`] explicitly so that mazes can be replayed:
//!
//! - [`SimpleRng`]: seeded LCG for reproducible mazes (seed shown in the HUD)
//! - [`SequenceRng`]: replays a fixed list of samples, used by golden tests
//! - [`FnRandom`]: adapts any `FnMut() -> f64` closure

/// A uniform random source on `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, n)`, computed as `floor(sample * n)`.
    ///
    /// `n` must be non-zero.
    fn index_below(&mut self, n: usize) -> usize {
        let i = (self.next_unit() * n as f64) as usize;
        i.min(n.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current state, usable as a seed to resume the same sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_unit(&mut self) -> f64 {
        // Low LCG bits have short periods; keep the top 24.
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
///
/// Samples outside `[0, 1)` are clamped into range on construction.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    samples: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl SequenceRng {
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = if samples.is_empty() {
            vec![0.0]
        } else {
            samples.into_iter().map(clamp_unit).collect()
        };
        Self {
            samples,
            cursor: 0,
            draws: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        let v = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        self.draws += 1;
        v
    }
}

/// Adapts a closure into a [`RandomSource`].
pub struct FnRandom<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnRandom<F> {
    fn next_unit(&mut self) -> f64 {
        clamp_unit((self.0)())
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 {
        0.0
    } else if v >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        v
    }
}

/// Shuffle a slice in place using Fisher–Yates.
///
/// For `i` from `len-1` down to `1`, draws `j` in `[0, i]` and swaps `i` and `j`.
/// Consumes exactly `len-1` samples (none for slices shorter than two).
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], random: &mut R) {
    for i in (1..items.len()).rev() {
        let j = random.index_below(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_unit_samples_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v), "sample out of range: {}", v);
        }
    }

    #[test]
    fn test_index_below_never_reaches_n() {
        let mut rng = SequenceRng::constant(0.999_999_999);
        for n in 1..20 {
            assert_eq!(rng.index_below(n), n - 1);
        }
        let mut zero = SequenceRng::constant(0.0);
        assert_eq!(zero.index_below(5), 0);
    }

    #[test]
    fn test_sequence_rng_wraps_and_counts() {
        let mut rng = SequenceRng::new(vec![0.1, 0.2]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.2);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_sequence_rng_clamps_out_of_range() {
        let mut rng = SequenceRng::new(vec![-3.0, 1.0, 42.0]);
        assert_eq!(rng.next_unit(), 0.0);
        assert!(rng.next_unit() < 1.0);
        assert!(rng.next_unit() < 1.0);
    }

    #[test]
    fn test_fn_random_adapts_closures() {
        let mut n = 0.0;
        let mut rng = FnRandom(|| {
            n += 0.25;
            n
        });
        assert_eq!(rng.next_unit(), 0.25);
        assert_eq!(rng.next_unit(), 0.5);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::new(99);
        for len in 0..12 {
            let mut items: Vec<usize> = (0..len).collect();
            shuffle(&mut items, &mut rng);
            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffle_draw_count() {
        let mut rng = SequenceRng::constant(0.5);
        let mut items = [1, 2, 3, 4];
        shuffle(&mut items, &mut rng);
        assert_eq!(rng.draws(), 3);

        let mut single = [1];
        shuffle(&mut single, &mut rng);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_shuffle_all_zero_rotates_left() {
        // With j always 0 every swap pulls the head to the back.
        let mut rng = SequenceRng::constant(0.0);
        let mut items = ['u', 'r', 'd', 'l'];
        shuffle(&mut items, &mut rng);
        assert_eq!(items, ['r', 'd', 'l', 'u']);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        // Pick each j in [0, i] explicitly via the sample at its bucket center.
        let mut seen = HashSet::new();
        for j3 in 0..4 {
            for j2 in 0..3 {
                for j1 in 0..2 {
                    let samples = vec![
                        (j3 as f64 + 0.5) / 4.0,
                        (j2 as f64 + 0.5) / 3.0,
                        (j1 as f64 + 0.5) / 2.0,
                    ];
                    let mut rng = SequenceRng::new(samples);
                    let mut items = [0u8, 1, 2, 3];
                    shuffle(&mut items, &mut rng);
                    seen.insert(items);
                }
            }
        }
        assert_eq!(seen.len(), 24);
    }
}
