//! Terrain octaves: named, parameterised height-contribution functions.
//!
//! A biome recipe is an ordered list of [`OctaveConfiguration`]s. The height at
//! a coordinate is the sum of each listed octave's contribution, evaluated in
//! order so later layers (wind erosion) can see the height built so far.

pub mod config;
mod landform;
mod shaping;
mod surface;
mod wind;

pub use config::{OctaveConfiguration, ParamValue};
pub use landform::{FoundationOctave, RollingTerrainOctave};
pub use shaping::{CanyonOctave, DuneOctave, MesaOctave};
pub use surface::{DetailOctave, VolcanicFlowOctave};
pub use wind::{WindErosionOctave, PREVAILING_WIND};

use serde::{Deserialize, Serialize};

use crate::planet::{Archetype, PhysicalProperties};
use crate::terrain::noise_provider::NoiseBank;

/// Planet-wide shaping inputs derived once from the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainTuning {
    /// Vertical exaggeration; low gravity supports taller relief
    pub relief: f64,
    /// Dune wavelength multiplier
    pub dune_scale: f64,
    /// 0..1
    pub wind_strength: f64,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            relief: 1.0,
            dune_scale: 1.0,
            wind_strength: 0.5,
        }
    }
}

/// Read-only state shared by every octave evaluated at one coordinate.
#[derive(Clone, Copy)]
pub struct SamplingContext<'a> {
    pub noise: &'a NoiseBank,
    pub properties: &'a PhysicalProperties,
    pub tuning: &'a TerrainTuning,
    pub archetype: Archetype,
    /// Height accumulated by the octaves evaluated before this one
    pub accumulated: f64,
}

impl<'a> SamplingContext<'a> {
    /// Copy of this context with a different accumulated height.
    pub fn with_accumulated(&self, accumulated: f64) -> Self {
        Self { accumulated, ..*self }
    }
}

/// Capability shared by all octave implementations.
pub trait Octave: Send + Sync {
    fn kind(&self) -> OctaveKind;

    /// Archetypes whose recipes may use this octave.
    fn supported_archetypes(&self) -> &'static [Archetype];

    fn supports(&self, archetype: Archetype) -> bool {
        self.supported_archetypes().contains(&archetype)
    }

    /// Signed height delta at `(x, z)`.
    fn contribute(&self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64;
}

/// Identifier of every octave implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OctaveKind {
    Foundation,
    Dune,
    Mesa,
    Canyon,
    Detail,
    VolcanicFlow,
    WindErosion,
    RollingTerrain,
}

impl OctaveKind {
    pub const ALL: [OctaveKind; 8] = [
        OctaveKind::Foundation,
        OctaveKind::Dune,
        OctaveKind::Mesa,
        OctaveKind::Canyon,
        OctaveKind::Detail,
        OctaveKind::VolcanicFlow,
        OctaveKind::WindErosion,
        OctaveKind::RollingTerrain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OctaveKind::Foundation => "foundation",
            OctaveKind::Dune => "dune",
            OctaveKind::Mesa => "mesa",
            OctaveKind::Canyon => "canyon",
            OctaveKind::Detail => "detail",
            OctaveKind::VolcanicFlow => "volcanic_flow",
            OctaveKind::WindErosion => "wind_erosion",
            OctaveKind::RollingTerrain => "rolling_terrain",
        }
    }

    /// The implementation behind this kind.
    pub fn octave(self) -> &'static dyn Octave {
        match self {
            OctaveKind::Foundation => &FoundationOctave,
            OctaveKind::Dune => &DuneOctave,
            OctaveKind::Mesa => &MesaOctave,
            OctaveKind::Canyon => &CanyonOctave,
            OctaveKind::Detail => &DetailOctave,
            OctaveKind::VolcanicFlow => &VolcanicFlowOctave,
            OctaveKind::WindErosion => &WindErosionOctave,
            OctaveKind::RollingTerrain => &RollingTerrainOctave,
        }
    }

    pub fn supports(self, archetype: Archetype) -> bool {
        self.octave().supports(archetype)
    }

    /// Evaluate the octave, replacing a non-finite result with zero.
    pub fn generate(self, x: f64, z: f64, ctx: &SamplingContext, cfg: &OctaveConfiguration) -> f64 {
        let value = self.octave().contribute(x, z, ctx, cfg);
        if value.is_finite() { value } else { 0.0 }
    }
}

/// Sum a recipe's contributions at `(x, z)`.
///
/// `ctx.accumulated` is ignored on entry; each octave sees the sum of the
/// octaves before it.
pub fn compose(recipe: &[OctaveConfiguration], x: f64, z: f64, ctx: &SamplingContext) -> f64 {
    recipe.iter().fold(0.0, |height, cfg| {
        let layer_ctx = ctx.with_accumulated(height);
        height + cfg.kind().generate(x, z, &layer_ctx, cfg)
    })
}

pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
