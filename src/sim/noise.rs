//! One-dimensional gradient noise
//!
//! The terrain is a slice through a fixed Perlin noise curve. The curve has no
//! hidden state: the same coordinate always yields the same height, so the
//! landscape never pops between adjacent columns or between frames.

use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// A deterministic height function over the real line, returning values in `[0, 1]`
pub trait HeightField {
    fn height_at(&self, x: f64) -> f64;
}

/// Any `Fn(f64) -> f64` is a height field (handy for flat test terrain)
impl<F> HeightField for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn height_at(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Seed of the permutation tables; fixed so every session sees the same curve
pub const NOISE_SEED: u32 = 0x5EED;

/// Fractal 1-D Perlin noise: a horizontal slice through 2-D fBm at `y = 0`
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    fbm: Fbm<Perlin>,
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self {
            fbm: Fbm::<Perlin>::new(NOISE_SEED)
                .set_octaves(4)
                .set_frequency(1.0)
                .set_persistence(0.5)
                .set_lacunarity(2.0),
        }
    }
}

impl HeightField for PerlinNoise {
    fn height_at(&self, x: f64) -> f64 {
        let v = self.fbm.get([x, 0.0]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_input_same_output() {
        let noise = PerlinNoise::default();
        for i in 0..1000 {
            let x = i as f64 * 0.137 - 50.0;
            assert_eq!(noise.height_at(x), noise.height_at(x));
        }
    }

    #[test]
    fn test_independent_instances_agree() {
        let a = PerlinNoise::default();
        let b = PerlinNoise::default();
        assert_eq!(a.height_at(1234.5678), b.height_at(1234.5678));
    }

    #[test]
    fn test_range() {
        let noise = PerlinNoise::default();
        for i in -20_000..20_000 {
            let h = noise.height_at(i as f64 * 0.01);
            assert!((0.0..=1.0).contains(&h), "height {h} out of range");
        }
    }

    #[test]
    fn test_dense_grid_has_no_jumps() {
        // One terrain pixel is 1/300 of a noise unit
        let noise = PerlinNoise::default();
        let step = 1.0 / 300.0;
        let mut x = 9_990.0;
        let mut prev = noise.height_at(x);
        while x < 10_010.0 {
            x += step;
            let h = noise.height_at(x);
            assert!((h - prev).abs() < 0.05, "jump of {} at {x}", (h - prev).abs());
            prev = h;
        }
    }

    #[test]
    fn test_continuous_across_lattice_points() {
        let noise = PerlinNoise::default();
        for i in -10..10 {
            let x = i as f64;
            let left = noise.height_at(x - 1e-9);
            let right = noise.height_at(x + 1e-9);
            assert!((left - right).abs() < 1e-6);
        }
    }

    #[test]
    fn test_not_constant() {
        let noise = PerlinNoise::default();
        let min = (0..3000)
            .map(|i| noise.height_at(i as f64 * 0.01))
            .fold(f64::MAX, f64::min);
        let max = (0..3000)
            .map(|i| noise.height_at(i as f64 * 0.01))
            .fold(f64::MIN, f64::max);
        assert!(max - min > 0.2, "terrain is too flat: {min}..{max}");
    }

    #[test]
    fn test_composition() {
        let noise = PerlinNoise::default();
        let x = 42.42;
        let nested = noise.height_at(1000.0 + noise.height_at(x) * 5.0);
        assert!((0.0..=1.0).contains(&nested));
        assert_eq!(nested, noise.height_at(1000.0 + noise.height_at(x) * 5.0));
    }

    #[test]
    fn test_closure_field() {
        let flat = |_x: f64| 0.25;
        assert_eq!(flat.height_at(-7.0), 0.25);
    }

    proptest! {
        #[test]
        fn prop_deterministic(x in -1.0e6f64..1.0e6) {
            let noise = PerlinNoise::default();
            prop_assert_eq!(noise.height_at(x), noise.height_at(x));
        }

        #[test]
        fn prop_in_unit_range(x in -1.0e9f64..1.0e9) {
            let h = PerlinNoise::default().height_at(x);
            prop_assert!((0.0..=1.0).contains(&h));
        }

        #[test]
        fn prop_small_step_small_change(x in -1.0e4f64..1.0e4, dx in 0.0f64..1.0e-3) {
            let noise = PerlinNoise::default();
            let diff = (noise.height_at(x + dx) - noise.height_at(x)).abs();
            // Slope of the fractal sum is bounded well below 20
            prop_assert!(diff <= 20.0 * dx + 1e-12);
        }
    }
}
