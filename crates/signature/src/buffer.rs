//! Accumulated point buffer

use crate::error::SignatureError;
use crate::types::{strokes, Sample};

/// Append-only history of every sample captured since the last clear
///
/// Stroke ids are non-decreasing in sequence order.
#[derive(Debug, Clone, Default)]
pub struct PointBuffer {
    samples: Vec<Sample>,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample
    pub fn push(&mut self, sample: Sample) -> Result<(), SignatureError> {
        if let Some(last) = self.samples.last() {
            if sample.stroke_id() < last.stroke_id() {
                return Err(SignatureError::StrokeOrder {
                    last: last.stroke_id(),
                    got: sample.stroke_id(),
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Append samples in order, stopping at the first one that would break
    /// stroke ordering
    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) -> Result<(), SignatureError> {
        for sample in samples {
            self.push(sample)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Number of distinct strokes in the buffer
    pub fn stroke_count(&self) -> usize {
        strokes(&self.samples).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrokeId;
    use glam::Vec2;

    fn sample(id: u64) -> Sample {
        Sample::new(Vec2::ZERO, 0.75, 0.0, StrokeId(id))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut buffer = PointBuffer::new();
        buffer.extend([sample(1), sample(1), sample(2)]).unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.stroke_count(), 2);
    }

    #[test]
    fn test_push_rejects_decreasing_stroke() {
        let mut buffer = PointBuffer::new();
        buffer.push(sample(2)).unwrap();
        let err = buffer.push(sample(1)).unwrap_err();
        assert!(matches!(
            err,
            SignatureError::StrokeOrder {
                last: StrokeId(2),
                got: StrokeId(1)
            }
        ));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut buffer = PointBuffer::new();
        buffer.push(sample(1)).unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.stroke_count(), 0);
        // Ids may continue after a clear
        buffer.push(sample(1)).unwrap();
    }
}
