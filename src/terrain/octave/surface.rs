//! Surface texture octaves: fine detail and volcanic flow sheets.

use super::{smoothstep, Octave, OctaveConfiguration, OctaveKind, SamplingContext};
use crate::planet::Archetype;

/// Low-amplitude multi-frequency texture.
///
/// Parameters (defaults): `amplitude` 1, `frequency` 0.05. Flags:
/// `crystalline` adds an absolute-value facet term, `volcanic_roughness`
/// adds a ridged roughness term.
pub struct DetailOctave;

impl DetailOctave {
    pub const AMPLITUDE: f64 = 1.0;
    pub const FREQUENCY: f64 = 0.05;
}

impl Octave for DetailOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::Detail
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &Archetype::ALL
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let amplitude = cfg.non_negative("amplitude", Self::AMPLITUDE);
        let f = cfg.positive("frequency", Self::FREQUENCY);
        let noise = &ctx.noise.detail;

        let texture = 0.6 * noise.smooth2(x * f, z * f)
            + 0.3 * noise.smooth2(x * f * 2.7 + 3.1, z * f * 2.7 - 8.4)
            + 0.1 * noise.smooth2(x * f * 6.1 - 19.9, z * f * 6.1 + 4.4);
        let mut height = amplitude * texture;

        if cfg.flag("crystalline", false) {
            height += 0.5 * amplitude * noise.smooth2(x * f * 3.0 + 77.7, z * f * 3.0 + 41.2).abs();
        }
        if cfg.flag("volcanic_roughness", false) {
            height += 0.7 * amplitude * noise.ridged2(x * f * 4.0, z * f * 4.0);
        }

        height
    }
}

/// Lobate lava sheets where turbulent noise rises above a threshold.
///
/// Parameters (defaults): `thickness` 6, `frequency` 0.006, `threshold` 0.2
/// (in [-1, 1]), `roughness` 0.5 (in [0, 1]).
pub struct VolcanicFlowOctave;

impl VolcanicFlowOctave {
    pub const THICKNESS: f64 = 6.0;
    pub const FREQUENCY: f64 = 0.006;
    pub const THRESHOLD: f64 = 0.2;
    pub const ROUGHNESS: f64 = 0.5;
    /// Width of the sheet edge in noise units
    const EDGE: f64 = 0.25;
}

impl Octave for VolcanicFlowOctave {
    fn kind(&self) -> OctaveKind {
        OctaveKind::VolcanicFlow
    }

    fn supported_archetypes(&self) -> &'static [Archetype] {
        &[Archetype::Volcanic, Archetype::Rocky]
    }

    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let thickness = cfg.non_negative("thickness", Self::THICKNESS);
        let f = cfg.positive("frequency", Self::FREQUENCY);
        let threshold = cfg.bounded("threshold", Self::THRESHOLD, -1.0, 1.0);
        let roughness = cfg.bounded("roughness", Self::ROUGHNESS, 0.0, 1.0);

        let noise = &ctx.noise.terrain;
        let lobes = noise.turbulent2(x * f + 311.7, z * f - 87.3);
        let sheet = smoothstep(threshold, threshold + Self::EDGE, lobes);
        if sheet == 0.0 {
            return 0.0;
        }

        let crust = noise.ridged2(x * f * 6.0, z * f * 6.0) * roughness;
        thickness * sheet * (1.0 + 0.25 * crust)
    }
}
