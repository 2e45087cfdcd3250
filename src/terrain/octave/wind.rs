//! Wind erosion: streak-gated carving biased along the prevailing wind.

use crate::core::DVec2;

use super::{Octave, OctaveConfiguration, OctaveKind, SamplingContext};
use crate::planet::Archetype;

/// Prevailing wind direction in the XZ plane (towards +Z, i.e. south).
pub const PREVAILING_WIND: DVec2 = DVec2::new(0.0, 1.0);

/// Two-branch erosion policy.
///
/// A second noise channel, stretched along the wind, gates each coordinate
/// into or out of a streak (`streak > streak_threshold`).
///
/// - In a streak: `gradient = (along mod period) / period`, which rises
///   downwind within each period. Erosion is `depth * gradient`, plus
///   `elevated_penalty * gradient` when the height accumulated so far is above
///   `height_threshold`. The contribution is the negated erosion.
/// - Outside a streak: `+deposition`.
///
/// Parameters (defaults): `depth` 4, `elevated_penalty` 3, `height_threshold`
/// 80, `deposition` 0.5, `period` 48, `streak_frequency` 0.03,
/// `streak_threshold` 0.35 (in [-1, 1]), `direction_x`/`direction_z`
/// (prevailing wind).
pub struct WindErosionOctave;

impl WindErosionOctave {
    pub const DEPTH: f64 = 4.0;
    pub const ELEVATED_PENALTY: f64 = 3.0;
    pub const HEIGHT_THRESHOLD: f64 = 80.0;
    pub const DEPOSITION: f64 = 0.5;
    pub const PERIOD: f64 = 48.0;
    pub const STREAK_FREQUENCY: f64 = 0.03;
    pub const STREAK_THRESHOLD: f64 = 0.35;
    /// Streaks are this many times longer downwind than across
    const ELONGATION: f64 = 6.0;

    /// Wind direction from the config, falling back to the prevailing wind.
    pub fn direction(cfg: &OctaveConfiguration) -> DVec2 {
        let dir = DVec2::new(
            cfg.number("direction_x", PREVAILING_WIND.x),
            cfg.number("direction_z", PREVAILING_WIND.y),
        );
        dir.try_normalize().unwrap_or(PREVAILING_WIND)
    }

    /// Streak gate value at `(x, z)`; the coordinate is in a streak when this
    /// exceeds `streak_threshold`.
    pub fn streak_value(x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let dir = Self::direction(cfg);
        let frequency = cfg.positive("streak_frequency", Self::STREAK_FREQUENCY);
        let along = x * dir.x + z * dir.y;
        let across = x * dir.y - z * dir.x;
        ctx.noise
            .streak
            .smooth2(along * frequency / Self::ELONGATION, across * frequency)
    }

    /// Downwind position within the current period, in [0, 1).
    pub fn gradient(x: f64, z: f64, cfg: &OctaveConfiguration) -> f64 {
        let dir = Self::direction(cfg);
        let period = cfg.positive("period", Self::PERIOD);
        let along = x * dir.x + z * dir.y;
        along.rem_euclid(period) / period
    }
}

impl Octave for WindErosionOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::WindErosion
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Desert, Archetype::Temperate]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let threshold = cfg.bounded("streak_threshold", Self::STREAK_THRESHOLD, -1.0, 1.0);

        if Self::streak_value(x, z, ctx, cfg) <= threshold {
            return cfg.non_negative("deposition", Self::DEPOSITION);
        }

        let depth = cfg.non_negative("depth", Self::DEPTH);
        let penalty = cfg.non_negative("elevated_penalty", Self::ELEVATED_PENALTY);
        let height_threshold = cfg.number("height_threshold", Self::HEIGHT_THRESHOLD);
        let gradient = Self::gradient(x, z, cfg);

        let mut erosion = depth * gradient;
        if ctx.accumulated > height_threshold {
            erosion += penalty * gradient;
        }
        -erosion
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;

    fn scan(
        fixture: &Fixture,
        cfg: &OctaveConfiguration,
        in_streak: bool,
    ) -> Vec<(f64, f64)> {
        let threshold = cfg.bounded("streak_threshold", WindErosionOctave::STREAK_THRESHOLD, -1.0, 1.0);
        let mut found = Vec::new();
        for i in 0..400 {
            for j in 0..40 {
                let (x, z) = (i as f64 * 3.3 + 0.4, j as f64 * 7.9 + 0.7);
                let inside = WindErosionOctave::streak_value(x, z, &fixture.ctx(0.0), cfg) > threshold;
                if inside == in_streak {
                    found.push((x, z));
                }
            }
        }
        found
    }

    #[test]
    fn test_outside_streak_deposits_exactly() {
        let fixture = Fixture::new(Archetype::Desert);
        let cfg = OctaveConfiguration::new(OctaveKind::WindErosion).with("deposition", 0.75);
        let outside = scan(&fixture, &cfg, false);
        assert!(!outside.is_empty());

        for (x, z) in outside {
            for accumulated in [0.0, 200.0] {
                let h = WindErosionOctave.contribute(x, z, &fixture.ctx(accumulated), &cfg);
                assert_eq!(h, 0.75);
            }
        }
    }

    #[test]
    fn test_inside_streak_erodes_by_gradient() {
        let fixture = Fixture::new(Archetype::Desert);
        let cfg = OctaveConfiguration::new(OctaveKind::WindErosion)
            .with("depth", 5.0)
            .with("elevated_penalty", 2.0)
            .with("height_threshold", 70.0);
        let inside = scan(&fixture, &cfg, true);
        assert!(!inside.is_empty(), "expected some streak coverage");

        for (x, z) in inside {
            let gradient = WindErosionOctave::gradient(x, z, &cfg);
            let low = WindErosionOctave.contribute(x, z, &fixture.ctx(60.0), &cfg);
            let high = WindErosionOctave.contribute(x, z, &fixture.ctx(90.0), &cfg);

            assert_eq!(low, -(5.0 * gradient));
            assert_eq!(high, -(5.0 * gradient + 2.0 * gradient));
            assert!(high <= low);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let fixture = Fixture::new(Archetype::Temperate);
        let cfg = OctaveConfiguration::new(OctaveKind::WindErosion).with("height_threshold", 80.0);
        for (x, z) in scan(&fixture, &cfg, true) {
            let at = WindErosionOctave.contribute(x, z, &fixture.ctx(80.0), &cfg);
            let below = WindErosionOctave.contribute(x, z, &fixture.ctx(10.0), &cfg);
            assert_eq!(at, below);
        }
    }

    #[test]
    fn test_gradient_increases_downwind() {
        let cfg = OctaveConfiguration::new(OctaveKind::WindErosion).with("period", 10.0);
        assert_eq!(WindErosionOctave::gradient(3.0, 0.0, &cfg), 0.0);
        assert!((WindErosionOctave::gradient(3.0, 2.5, &cfg) - 0.25).abs() < 1e-12);
        assert!((WindErosionOctave::gradient(3.0, 7.5, &cfg) - 0.75).abs() < 1e-12);
        assert!((WindErosionOctave::gradient(0.0, -2.5, &cfg) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_direction_falls_back_to_prevailing() {
        let cfg = OctaveConfiguration::new(OctaveKind::WindErosion)
            .with("direction_x", 0.0)
            .with("direction_z", 0.0);
        assert_eq!(WindErosionOctave::direction(&cfg), PREVAILING_WIND);

        let east = OctaveConfiguration::new(OctaveKind::WindErosion).with("direction_x", 3.0).with("direction_z", 0.0);
        assert_eq!(WindErosionOctave::direction(&east), DVec2::new(1.0, 0.0));
    }
}
