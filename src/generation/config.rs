//! Column generation configuration.

use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;

/// Largest chunk side; `chunk_size^2` column indices must fit in an `i32`.
pub const MAX_CHUNK_SIZE: u32 = 46_340;

/// Half-open vertical slot range `[min_y, min_y + height)`.
///
/// Always holds at least one slot and `max_y()` always fits in an `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct VerticalRange {
    min_y: i32,
    height: u32,
}

#[derive(Deserialize)]
struct RangeFields {
    min_y: i32,
    height: u32,
}

impl TryFrom<RangeFields> for VerticalRange {
    type Error = ValidationError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        Self::try_new(fields.min_y, fields.height)
    }
}

impl Default for VerticalRange {
    fn default() -> Self {
        Self { min_y: -64, height: 384 }
    }
}

impl VerticalRange {
    /// Range of `height` slots from `min_y`. A zero height becomes one slot,
    /// and a range that would run past `i32::MAX` is shifted down to end there.
    pub fn new(min_y: i32, height: u32) -> Self {
        let height = height.clamp(1, i32::MAX as u32);
        let min_y = min_y.min(i32::MAX - height as i32);
        Self { min_y, height }
    }

    /// Like [`VerticalRange::new`], but rejects the inputs `new` would adjust.
    pub fn try_new(min_y: i32, height: u32) -> Result<Self, ValidationError> {
        let room = i32::MAX as i64 - min_y as i64;
        if height == 0 || height as i64 > room {
            return Err(ValidationError::OutOfRange {
                field: "vertical_range.height",
                value: height as f64,
                min: 1.0,
                max: room.max(0) as f64,
            });
        }
        Ok(Self { min_y, height })
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Number of slots; at least 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive upper bound.
    pub fn max_y(&self) -> i32 {
        self.min_y.saturating_add_unsigned(self.height)
    }

    pub fn contains(&self, y: i32) -> bool {
        y >= self.min_y && y < self.max_y()
    }

    /// Floor a height into the range. Non-finite input lands on the floor.
    pub fn clamp(&self, height: f64) -> i32 {
        if !height.is_finite() {
            return self.min_y;
        }
        let top = (self.max_y() - 1).max(self.min_y) as f64;
        height.floor().clamp(self.min_y as f64, top) as i32
    }

    /// Slot index of `y`, if it lies in the range.
    pub fn index_of(&self, y: i32) -> Option<usize> {
        self.contains(y).then(|| (y as i64 - self.min_y as i64) as usize)
    }

    pub fn len(&self) -> usize {
        self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }
}

/// Configuration for the column generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenerationFields")]
pub struct GenerationConfig {
    pub vertical_range: VerticalRange,
    /// Columns per chunk side, in `1..=MAX_CHUNK_SIZE`.
    pub chunk_size: u32,
}

#[derive(Deserialize)]
struct GenerationFields {
    vertical_range: VerticalRange,
    chunk_size: u32,
}

impl TryFrom<GenerationFields> for GenerationConfig {
    type Error = ValidationError;

    fn try_from(fields: GenerationFields) -> Result<Self, Self::Error> {
        let config = Self {
            vertical_range: fields.vertical_range,
            chunk_size: fields.chunk_size,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            vertical_range: VerticalRange::default(),
            chunk_size: 16,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(ValidationError::OutOfRange {
                field: "chunk_size",
                value: self.chunk_size as f64,
                min: 1.0,
                max: MAX_CHUNK_SIZE as f64,
            });
        }
        Ok(())
    }

    /// Chunk side forced into `1..=MAX_CHUNK_SIZE`.
    pub fn effective_chunk_size(&self) -> i32 {
        self.chunk_size.clamp(1, MAX_CHUNK_SIZE) as i32
    }
}
