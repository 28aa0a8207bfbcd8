use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier of one press-drag-release gesture
///
/// Allocated by the sampler on every press; `StrokeId(0)` means no stroke
/// has been drawn yet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct StrokeId(pub u64);

impl StrokeId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A single captured input observation
///
/// Samples are immutable once created. The derived velocity can be attached
/// once through [`Sample::with_velocity`], which consumes the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    position: Vec2,
    pressure: f32,
    timestamp_ms: f64,
    velocity: Option<f32>,
    stroke_id: StrokeId,
}

impl Sample {
    /// Create a sample at a surface-local position (CSS pixels)
    pub fn new(position: Vec2, pressure: f32, timestamp_ms: f64, stroke_id: StrokeId) -> Self {
        Self {
            position,
            pressure,
            timestamp_ms,
            velocity: None,
            stroke_id,
        }
    }

    /// Attach the instantaneous velocity (px/ms)
    pub fn with_velocity(self, velocity: f32) -> Self {
        Self {
            velocity: Some(velocity),
            ..self
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Amplified pressure (0.0-1.5 with the default dynamics)
    #[inline]
    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    #[inline]
    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    #[inline]
    pub fn velocity(&self) -> Option<f32> {
        self.velocity
    }

    #[inline]
    pub fn stroke_id(&self) -> StrokeId {
        self.stroke_id
    }

    /// Speed from `previous` to this sample in px/ms
    ///
    /// Elapsed time is floored to 1 ms.
    pub fn velocity_from(&self, previous: &Sample) -> f32 {
        let elapsed = (self.timestamp_ms - previous.timestamp_ms).max(1.0);
        self.position.distance(previous.position) / elapsed as f32
    }
}

/// Split a flat sample sequence into strokes
///
/// A new stroke starts wherever the stroke id changes between neighbours.
pub fn strokes(samples: &[Sample]) -> impl Iterator<Item = &[Sample]> {
    samples.chunk_by(|a, b| a.stroke_id == b.stroke_id)
}
