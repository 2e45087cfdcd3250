//! Ridged-noise shaping octaves: dunes, mesas and canyons.
//!
//! All three push ridged noise through a clamped mask raised to a
//! `steepness` exponent. Exponents below one flatten the top of the mask
//! (plateaus), exponents above one sharpen it (crests, narrow troughs).

use super::wind::PREVAILING_WIND;
use super::{Octave, OctaveConfiguration, OctaveKind, SamplingContext};
use crate::planet::Archetype;

/// Wind-aligned dune crests.
///
/// Parameters (defaults): `height` 12, `frequency` 0.02, `steepness` 1.8,
/// `stretch` 4. Frequency is divided by the planet's dune scale.
pub struct DuneOctave;

impl DuneOctave {
    pub const HEIGHT: f64 = 12.0;
    pub const FREQUENCY: f64 = 0.02;
    pub const STEEPNESS: f64 = 1.8;
    pub const STRETCH: f64 = 4.0;
}

impl Octave for DuneOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::Dune
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Desert]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let height = cfg.non_negative("height", Self::HEIGHT);
        let frequency = cfg.positive("frequency", Self::FREQUENCY) / ctx.tuning.dune_scale.max(0.1);
        let steepness = cfg.positive("steepness", Self::STEEPNESS);
        let stretch = cfg.positive("stretch", Self::STRETCH);

        // Crests run across the wind: fast variation downwind, slow across it.
        let along = x * PREVAILING_WIND.x + z * PREVAILING_WIND.y;
        let across = x * PREVAILING_WIND.y - z * PREVAILING_WIND.x;
        let ridge = ctx.noise.terrain.ridged2(along * frequency, across * frequency / stretch);

        let mask = ((ridge + 1.0) * 0.5).clamp(0.0, 1.0).powf(steepness);
        height * mask * (0.5 + 0.5 * ctx.tuning.wind_strength)
    }
}

/// Flat-topped high ground.
///
/// Parameters (defaults): `height` 24, `frequency` 0.008, `threshold` 0.25
/// (in [-1, 1]), `transition` 0.15, `steepness` 0.6.
pub struct MesaOctave;

impl MesaOctave {
    pub const HEIGHT: f64 = 24.0;
    pub const FREQUENCY: f64 = 0.008;
    pub const THRESHOLD: f64 = 0.25;
    pub const TRANSITION: f64 = 0.15;
    pub const STEEPNESS: f64 = 0.6;
}

impl Octave for MesaOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::Mesa
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Desert, Archetype::Rocky, Archetype::Volcanic]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let height = cfg.non_negative("height", Self::HEIGHT);
        let frequency = cfg.positive("frequency", Self::FREQUENCY);
        let threshold = cfg.bounded("threshold", Self::THRESHOLD, -1.0, 1.0);
        let transition = cfg.positive("transition", Self::TRANSITION);
        let steepness = cfg.positive("steepness", Self::STEEPNESS);

        let ridge = ctx.noise.terrain.ridged2(x * frequency - 431.2, z * frequency + 97.6);
        let plateau = ((ridge - threshold) / transition).clamp(0.0, 1.0);

        height * ctx.tuning.relief * plateau.powf(steepness)
    }
}

/// Narrow troughs carved along ridged-noise crest lines. Always `<= 0`.
///
/// Parameters (defaults): `depth` 24, `frequency` 0.01, `width` 0.15
/// (in (0, 1]), `steepness` 1.5.
pub struct CanyonOctave;

impl CanyonOctave {
    pub const DEPTH: f64 = 24.0;
    pub const FREQUENCY: f64 = 0.01;
    pub const WIDTH: f64 = 0.15;
    pub const STEEPNESS: f64 = 1.5;
}

impl Octave for CanyonOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::Canyon
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Desert, Archetype::Rocky, Archetype::Temperate]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let depth = cfg.non_negative("depth", Self::DEPTH);
        let frequency = cfg.positive("frequency", Self::FREQUENCY);
        let width = cfg.bounded("width", Self::WIDTH, f64::MIN_POSITIVE, 1.0);
        let steepness = cfg.positive("steepness", Self::STEEPNESS);

        let ridge = ctx.noise.terrain.ridged2(x * frequency + 1201.7, z * frequency - 644.3);
        let trough = ((ridge - (1.0 - width)) / width).clamp(0.0, 1.0);

        -(depth * ctx.tuning.relief * trough.powf(steepness))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{sample_points, Fixture};
    use super::*;

    #[test]
    fn test_dune_is_non_negative_and_bounded() {
        let fixture = Fixture::new(Archetype::Desert);
        let cfg = OctaveConfiguration::new(OctaveKind::Dune).with("height", 10.0);
        for (x, z) in sample_points() {
            let h = DuneOctave.contribute(x, z, &fixture.ctx(0.0), &cfg);
            assert!((0.0..=10.0).contains(&h), "dune height {} out of range", h);
        }
    }

    #[test]
    fn test_mesa_never_exceeds_plateau_height() {
        let fixture = Fixture::new(Archetype::Desert);
        let cfg = OctaveConfiguration::new(OctaveKind::Mesa).with("height", 20.0);
        for (x, z) in sample_points() {
            let h = MesaOctave.contribute(x, z, &fixture.ctx(0.0), &cfg);
            assert!((0.0..=20.0).contains(&h));
        }
    }

    #[test]
    fn test_mesa_low_threshold_produces_flat_tops() {
        // Threshold at the bottom of the range with a tiny transition saturates the mask.
        let fixture = Fixture::new(Archetype::Rocky);
        let cfg = OctaveConfiguration::new(OctaveKind::Mesa)
            .with("height", 15.0)
            .with("threshold", -1.0)
            .with("transition", 1e-9);
        let heights: Vec<f64> = sample_points()
            .into_iter()
            .map(|(x, z)| MesaOctave.contribute(x, z, &fixture.ctx(0.0), &cfg))
            .collect();
        assert!(heights.iter().all(|&h| h == 0.0 || h == 15.0), "mesa should be binary: {:?}", heights);
        assert!(heights.iter().any(|&h| h == 15.0));
    }

    #[test]
    fn test_canyon_is_negative_delta() {
        let fixture = Fixture::new(Archetype::Desert);
        let cfg = OctaveConfiguration::new(OctaveKind::Canyon).with("depth", 30.0);
        for (x, z) in sample_points() {
            let h = CanyonOctave.contribute(x, z, &fixture.ctx(0.0), &cfg);
            assert!((-30.0..=0.0).contains(&h), "canyon delta {} out of range", h);
        }
    }

    #[test]
    fn test_canyon_negative_width_uses_default() {
        let fixture = Fixture::new(Archetype::Temperate);
        let bad = OctaveConfiguration::new(OctaveKind::Canyon).with("width", -0.4);
        let default = OctaveConfiguration::new(OctaveKind::Canyon);
        for (x, z) in sample_points() {
            let ctx = fixture.ctx(0.0);
            let a = CanyonOctave.contribute(x, z, &ctx, &bad);
            assert!(a.is_finite());
            assert_eq!(a, CanyonOctave.contribute(x, z, &ctx, &default));
        }
    }

    #[test]
    fn test_canyon_full_width_carves_everywhere_but_shallowly() {
        let fixture = Fixture::new(Archetype::Rocky);
        let narrow = OctaveConfiguration::new(OctaveKind::Canyon).with("width", 0.05);
        let wide = OctaveConfiguration::new(OctaveKind::Canyon).with("width", 1.0);

        let carved = |cfg: &OctaveConfiguration| {
            sample_points()
                .into_iter()
                .filter(|&(x, z)| CanyonOctave.contribute(x, z, &fixture.ctx(0.0), cfg) < 0.0)
                .count()
        };
        assert!(carved(&wide) >= carved(&narrow));
    }
}
