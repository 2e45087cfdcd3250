//! Procedural terrain shaping: noise, octaves and biome recipes

pub mod noise_provider;
pub use noise_provider::{NoiseBank, NoiseKind, NoiseProvider, UniformNoise};

pub mod octave;
pub use octave::{Octave, OctaveConfiguration, OctaveKind, ParamValue, SamplingContext, TerrainTuning};

pub mod biome;
pub use biome::BiomeVariant;
