//! Large-scale landform octaves: continental foundation and rolling hills.

use super::{Octave, OctaveConfiguration, OctaveKind, SamplingContext};
use crate::planet::Archetype;

/// Continental-scale base elevation from two octaves of smooth noise.
///
/// Parameters (defaults): `base` 64, `amplitude` 12, `frequency` 0.004.
/// Amplitude is scaled by the planet's relief factor.
pub struct FoundationOctave;

impl FoundationOctave {
    pub const BASE: f64 = 64.0;
    pub const AMPLITUDE: f64 = 12.0;
    pub const FREQUENCY: f64 = 0.004;
}

impl Octave for FoundationOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::Foundation
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &Archetype::ALL
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let base = cfg.number("base", Self::BASE);
        let amplitude = cfg.non_negative("amplitude", Self::AMPLITUDE);
        let frequency = cfg.positive("frequency", Self::FREQUENCY);

        let noise = &ctx.noise.terrain;
        let low = noise.smooth2(x * frequency, z * frequency);
        let high = noise.smooth2(x * frequency * 2.0 + 17.3, z * frequency * 2.0 - 9.1);

        base + amplitude * ctx.tuning.relief * (low + 0.5 * high) / 1.5
    }
}

/// Gentle hills whose amplitude is modulated by a slower noise field.
///
/// Parameters (defaults): `amplitude` 6, `frequency` 0.012.
pub struct RollingTerrainOctave;

impl RollingTerrainOctave {
    pub const AMPLITUDE: f64 = 6.0;
    pub const FREQUENCY: f64 = 0.012;
}

impl Octave for RollingTerrainOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::RollingTerrain
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Temperate, Archetype::Oceanic]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let amplitude = cfg.non_negative("amplitude", Self::AMPLITUDE);
        let frequency = cfg.positive("frequency", Self::FREQUENCY);

        let noise = &ctx.noise.terrain;
        let hills = noise.smooth2(x * frequency + 53.1, z * frequency + 71.9);
        let envelope = 0.5 + 0.5 * noise.smooth2(x * frequency * 0.25 - 211.4, z * frequency * 0.25 + 5.7);

        amplitude * hills * envelope
    }
}
