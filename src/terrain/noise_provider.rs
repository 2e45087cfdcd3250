//! Seeded noise sampling shared by every octave and selector.
//!
//! A `NoiseProvider` wraps three `noise` crate sources built from the same
//! folded seed: smooth Perlin, ridged multifractal and fractal-sum (fBm)
//! turbulence. All outputs are clamped to [-1, 1] so downstream shaping can
//! rely on a fixed range. [`UniformNoise`] equalises a smooth channel to a
//! uniform [0, 1) value for thresholds and weighted selection.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin, RidgedMulti};

/// Noise flavour to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseKind {
    /// Single-octave gradient noise
    Smooth,
    /// Ridged multifractal; sharp crests where the base noise crosses zero
    Ridged,
    /// Fractal sum of several smooth octaves
    Turbulent,
}

/// Deterministic multi-algorithm noise sampler for one seed channel.
pub struct NoiseProvider {
    seed: u32,
    smooth: Perlin,
    ridged: RidgedMulti<Perlin>,
    turbulent: Fbm<Perlin>,
}

impl NoiseProvider {
    /// Create a provider for the given world seed.
    pub fn new(seed: u64) -> Self {
        Self::with_salt(seed, 0)
    }

    /// Create an independent channel of the same world seed.
    pub fn with_salt(seed: u64, salt: u32) -> Self {
        let folded = fold_seed(seed, salt);

        let ridged = RidgedMulti::<Perlin>::new(fractal_seed(folded, 0x9e37))
            .set_octaves(4)
            .set_lacunarity(2.0);
        let turbulent = Fbm::<Perlin>::new(fractal_seed(folded, 0x7f4a))
            .set_octaves(5)
            .set_persistence(0.5)
            .set_lacunarity(2.0);

        Self {
            seed: folded,
            smooth: Perlin::new(folded),
            ridged,
            turbulent,
        }
    }

    /// The folded 32-bit seed backing this channel.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn smooth2(&self, x: f64, z: f64) -> f64 {
        bounded(self.smooth.get([x, z]))
    }

    pub fn ridged2(&self, x: f64, z: f64) -> f64 {
        bounded(self.ridged.get([x, z]))
    }

    pub fn turbulent2(&self, x: f64, z: f64) -> f64 {
        bounded(self.turbulent.get([x, z]))
    }

    pub fn smooth3(&self, x: f64, y: f64, z: f64) -> f64 {
        bounded(self.smooth.get([x, y, z]))
    }

    pub fn ridged3(&self, x: f64, y: f64, z: f64) -> f64 {
        bounded(self.ridged.get([x, y, z]))
    }

    pub fn turbulent3(&self, x: f64, y: f64, z: f64) -> f64 {
        bounded(self.turbulent.get([x, y, z]))
    }

    /// Sample any noise flavour at a 3D position. Result is in [-1, 1].
    pub fn sample(&self, kind: NoiseKind, x: f64, y: f64, z: f64) -> f64 {
        match kind {
            NoiseKind::Smooth => self.smooth3(x, y, z),
            NoiseKind::Ridged => self.ridged3(x, y, z),
            NoiseKind::Turbulent => self.turbulent3(x, y, z),
        }
    }
}

/// Side of the calibration grid sampled by [`UniformNoise`].
const CALIBRATION_SIDE: usize = 128;

/// Calibration grid spacing in noise units. Off-lattice and wider than one
/// cell so samples are close to independent.
const CALIBRATION_STEP: (f64, f64) = (1.618_034, 1.324_718);

/// Smooth noise equalised to a uniform distribution over [0, 1).
///
/// Gradient noise clusters around zero, so `(n + 1) / 2` is bell-shaped. The
/// channel's quantiles are sampled once at construction; a lookup returns the
/// rank of the local value among them. The map is monotonic, so spatial
/// coherence is unchanged.
pub struct UniformNoise {
    source: NoiseProvider,
    quantiles: Vec<f64>,
}

impl UniformNoise {
    pub fn new(source: NoiseProvider) -> Self {
        let mut quantiles: Vec<f64> = (0..CALIBRATION_SIDE * CALIBRATION_SIDE)
            .map(|i| {
                let (row, col) = (i / CALIBRATION_SIDE, i % CALIBRATION_SIDE);
                source.smooth2(
                    col as f64 * CALIBRATION_STEP.0 + 0.31,
                    row as f64 * CALIBRATION_STEP.1 + 0.17,
                )
            })
            .collect();
        quantiles.sort_by(f64::total_cmp);
        Self { source, quantiles }
    }

    pub fn with_salt(seed: u64, salt: u32) -> Self {
        Self::new(NoiseProvider::with_salt(seed, salt))
    }

    pub fn seed(&self) -> u32 {
        self.source.seed()
    }

    /// Uniform value in [0, 1) at `(x, z)`.
    pub fn unit2(&self, x: f64, z: f64) -> f64 {
        let value = self.source.smooth2(x, z);
        let rank = self.quantiles.partition_point(|&q| q < value);
        (rank as f64 / self.quantiles.len() as f64).min(1.0 - f64::EPSILON)
    }
}

/// Salt of the biome selection channel, owned by the biome selector.
pub const SELECTOR_SALT: u32 = 3;

/// Independent noise channels for one planet's terrain.
pub struct NoiseBank {
    /// Continental shape and large landforms
    pub terrain: NoiseProvider,
    /// Fine texture
    pub detail: NoiseProvider,
    /// Uniform material dithering, same channel as `detail`
    pub dither: UniformNoise,
    /// Wind streak gating
    pub streak: NoiseProvider,
    /// Temperature / moisture variation
    pub climate: NoiseProvider,
}

impl NoiseBank {
    pub fn new(seed: u64) -> Self {
        Self {
            terrain: NoiseProvider::with_salt(seed, 0),
            detail: NoiseProvider::with_salt(seed, 1),
            dither: UniformNoise::with_salt(seed, 1),
            streak: NoiseProvider::with_salt(seed, 2),
            climate: NoiseProvider::with_salt(seed, 4),
        }
    }
}

/// Fold a 64-bit seed and channel salt into the noise crate's u32 seed space (splitmix64 finaliser).
fn fold_seed(seed: u64, salt: u32) -> u32 {
    let mut z = seed ^ (salt as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 32) as u32
}

/// Octave sources of a fractal take `seed + octave`; keep headroom so that
/// addition cannot overflow.
fn fractal_seed(folded: u32, offset: u32) -> u32 {
    const MAX_OCTAVES: u32 = 32;
    folded.wrapping_add(offset).min(u32::MAX - MAX_OCTAVES)
}

fn bounded(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: [(f64, f64); 5] = [
        (0.37, 0.81),
        (12.5, -3.25),
        (-41.7, 99.1),
        (1024.3, 2048.9),
        (-0.5, -0.25),
    ];

    #[test]
    fn test_noise_reproducibility() {
        let a = NoiseProvider::new(12345);
        let b = NoiseProvider::new(12345);

        for (x, z) in POSITIONS {
            assert_eq!(a.smooth2(x, z), b.smooth2(x, z));
            assert_eq!(a.ridged2(x, z), b.ridged2(x, z));
            assert_eq!(a.turbulent2(x, z), b.turbulent2(x, z));
        }
    }

    #[test]
    fn test_noise_range() {
        let provider = NoiseProvider::new(7);
        for (x, z) in POSITIONS {
            for kind in [NoiseKind::Smooth, NoiseKind::Ridged, NoiseKind::Turbulent] {
                let value = provider.sample(kind, x, 0.3, z);
                assert!(
                    (-1.0..=1.0).contains(&value),
                    "{:?} value {} at ({}, {}) out of range",
                    kind, value, x, z
                );
            }
        }
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let a = NoiseProvider::new(1);
        let b = NoiseProvider::new(2);

        let differs = POSITIONS.iter().any(|&(x, z)| a.smooth2(x, z) != b.smooth2(x, z));
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_salted_channels_are_independent() {
        let bank = NoiseBank::new(99);
        assert_ne!(bank.terrain.seed(), bank.climate.seed());
        assert_ne!(NoiseProvider::with_salt(99, SELECTOR_SALT).seed(), bank.terrain.seed());
        assert_ne!(bank.streak.seed(), bank.detail.seed());
    }

    #[test]
    fn test_fold_seed_uses_high_bits() {
        assert_ne!(fold_seed(1, 0), fold_seed(1 << 40, 0));
        assert_eq!(fold_seed(5, 3), fold_seed(5, 3));
    }

    #[test]
    fn test_fractal_seed_keeps_octave_headroom() {
        assert_eq!(fractal_seed(10, 5), 15);
        assert_eq!(fractal_seed(u32::MAX - 2, 1), u32::MAX - 32);
        assert_eq!(fractal_seed(u32::MAX, 0x9e37), 0x9e36);
        // Seeds at the top of the range still build every octave source
        let ridged = RidgedMulti::<Perlin>::new(fractal_seed(u32::MAX - 1, 0)).set_octaves(4);
        let turbulent = Fbm::<Perlin>::new(fractal_seed(u32::MAX, 0)).set_octaves(5);
        assert!(ridged.get([0.3, 0.7]).is_finite());
        assert!(turbulent.get([0.3, 0.7]).is_finite());
    }

    #[test]
    fn test_uniform_noise_range_and_coherence() {
        let uniform = UniformNoise::with_salt(7, 5);
        for (x, z) in POSITIONS {
            assert!((0.0..1.0).contains(&uniform.unit2(x, z)));
        }
        // Monotonic remap: nearby points stay close
        let a = uniform.unit2(40.31, 12.77);
        let b = uniform.unit2(40.311, 12.77);
        assert!((a - b).abs() < 0.02, "{} vs {}", a, b);
    }

    #[test]
    fn test_uniform_noise_deciles_are_flat() {
        let uniform = UniformNoise::with_salt(77, 5);
        let side = 200;
        let mut deciles = [0usize; 10];
        for i in 0..side {
            for j in 0..side {
                let u = uniform.unit2(1000.7 + i as f64 * 0.253, -500.3 + j as f64 * 0.253);
                deciles[(u * 10.0) as usize] += 1;
            }
        }
        let total = (side * side) as f64;
        for (i, &count) in deciles.iter().enumerate() {
            let share = count as f64 / total;
            assert!((share - 0.1).abs() < 0.02, "decile {} holds {:.3}", i, share);
        }
    }

    #[test]
    fn test_golden_values() {
        // Pinned so seed folding, salts and noise setup stay stable across releases
        assert_eq!(fold_seed(12345, 0), 4_084_003_094);
        assert_eq!(fold_seed(12345, 1), 2_951_156_467);
        assert_eq!(fold_seed(12345, 2), 444_680_745);
        assert_eq!(fold_seed(12345, SELECTOR_SALT), 3_103_144_808);
        assert_eq!(fold_seed(12345, 4), 3_683_811_694);

        let provider = NoiseProvider::new(12345);
        assert_eq!(provider.smooth2(12.5, -3.25).to_bits(), 0x3fcf_337a_6b55_7174);
        assert_eq!(provider.ridged2(12.5, -3.25).to_bits(), 0xbfe6_33fe_3037_6aa4);
        assert_eq!(provider.turbulent2(12.5, -3.25).to_bits(), 0x3fe6_5aff_9652_6203);

        let selector = UniformNoise::with_salt(12345, SELECTOR_SALT);
        assert_eq!(selector.unit2(265.0 * (1.0 / 384.0), -145.0 * (1.0 / 384.0)), 1498.0 / 16384.0);
    }
}
