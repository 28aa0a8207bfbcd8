//! Input sampler: pointer events to stroke samples
//!
//! Owns the gesture state (drawing flag, current stroke id, last raw
//! sample) and feeds moves through the live smoother.

use glam::Vec2;
use signature_config::{DynamicsConfig, SmoothingConfig};
use signature_ipc::{PointerEvent, PointerPhase};
use tracing::debug;

use crate::smoothing::LiveSmoother;
use crate::types::{Sample, StrokeId};

/// What the pad should do with the result of one event
#[derive(Debug, Clone, PartialEq)]
pub enum SamplerOutput {
    /// Nothing happened (move or leave without an active gesture)
    Ignored,
    /// A press opened a new stroke at this sample
    StrokeStarted(Sample),
    /// Samples to append to the accumulated buffer
    Samples(Vec<Sample>),
    /// The active gesture finished
    StrokeEnded { stroke_id: StrokeId },
}

#[derive(Debug, Clone)]
pub struct InputSampler {
    current_stroke: StrokeId,
    drawing: bool,
    last: Option<Sample>,
    live: LiveSmoother,
    dynamics: DynamicsConfig,
}

impl InputSampler {
    pub fn new(smoothing: SmoothingConfig, dynamics: DynamicsConfig) -> Self {
        Self {
            current_stroke: StrokeId::default(),
            drawing: false,
            last: None,
            live: LiveSmoother::new(smoothing, dynamics.max_pressure),
            dynamics,
        }
    }

    /// Process one pointer event
    ///
    /// `origin` is the client-space top-left of the surface; samples are
    /// stored in surface-local coordinates.
    pub fn handle(&mut self, event: &PointerEvent, origin: Vec2) -> SamplerOutput {
        let position = Vec2::new(event.client_x, event.client_y) - origin;

        match event.phase {
            PointerPhase::Down => {
                if self.drawing {
                    debug!("InputSampler: press during {:?}, closing it", self.current_stroke);
                }
                self.current_stroke = self.current_stroke.next();
                self.drawing = true;

                let pressure = self.dynamics.amplify(event.raw_pressure());
                let sample = Sample::new(position, pressure, event.timestamp_ms, self.current_stroke);
                self.last = Some(sample);
                self.live.begin(sample);

                debug!(
                    "InputSampler: stroke {:?} started at ({:.1}, {:.1}), pressure={:.2}",
                    self.current_stroke, position.x, position.y, pressure
                );
                SamplerOutput::StrokeStarted(sample)
            }
            PointerPhase::Move => {
                if !self.drawing {
                    return SamplerOutput::Ignored;
                }
                let pressure = self.dynamics.amplify(event.raw_pressure());
                let mut sample = Sample::new(position, pressure, event.timestamp_ms, self.current_stroke);
                if let Some(previous) = &self.last {
                    sample = sample.with_velocity(sample.velocity_from(previous));
                }
                self.last = Some(sample);
                SamplerOutput::Samples(self.live.push(sample))
            }
            PointerPhase::Up | PointerPhase::Leave => match self.end_gesture() {
                Some(stroke_id) => SamplerOutput::StrokeEnded { stroke_id },
                None => SamplerOutput::Ignored,
            },
        }
    }

    /// Finish the active gesture without a release event
    ///
    /// Returns the id of the stroke that was active. The id counter keeps
    /// its value.
    pub fn end_gesture(&mut self) -> Option<StrokeId> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        self.last = None;
        self.live.reset();
        debug!("InputSampler: stroke {:?} ended", self.current_stroke);
        Some(self.current_stroke)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Id of the most recently started stroke (`StrokeId(0)` before any press)
    pub fn current_stroke_id(&self) -> StrokeId {
        self.current_stroke
    }

    pub fn last_sample(&self) -> Option<&Sample> {
        self.last.as_ref()
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(SmoothingConfig::default(), DynamicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_move_release() {
        let mut sampler = InputSampler::default();

        let started = sampler.handle(&PointerEvent::down(10.0, 10.0, 0.0), Vec2::ZERO);
        let SamplerOutput::StrokeStarted(first) = started else {
            panic!("expected StrokeStarted");
        };
        assert_eq!(first.stroke_id(), StrokeId(1));
        assert!((first.pressure() - 0.75).abs() < 1e-6);
        assert!(sampler.is_drawing());

        let moved = sampler.handle(&PointerEvent::moved(20.0, 10.0, 16.0), Vec2::ZERO);
        let SamplerOutput::Samples(samples) = moved else {
            panic!("expected Samples");
        };
        assert_eq!(samples.len(), 1);
        assert!((samples[0].velocity().unwrap() - 0.625).abs() < 1e-6);

        let ended = sampler.handle(&PointerEvent::up(20.0, 10.0, 32.0), Vec2::ZERO);
        assert_eq!(ended, SamplerOutput::StrokeEnded { stroke_id: StrokeId(1) });
        assert!(!sampler.is_drawing());
        assert!(sampler.last_sample().is_none());
    }

    #[test]
    fn test_move_and_leave_without_press_are_ignored() {
        let mut sampler = InputSampler::default();
        assert_eq!(
            sampler.handle(&PointerEvent::moved(5.0, 5.0, 0.0), Vec2::ZERO),
            SamplerOutput::Ignored
        );
        assert_eq!(
            sampler.handle(&PointerEvent::leave(5.0, 5.0, 1.0), Vec2::ZERO),
            SamplerOutput::Ignored
        );
        assert_eq!(sampler.current_stroke_id(), StrokeId(0));
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut sampler = InputSampler::default();
        sampler.handle(&PointerEvent::down(0.0, 0.0, 0.0), Vec2::ZERO);
        assert_eq!(
            sampler.handle(&PointerEvent::leave(3.0, 0.0, 5.0), Vec2::ZERO),
            SamplerOutput::StrokeEnded { stroke_id: StrokeId(1) }
        );
        // Moving back in without a press draws nothing
        assert_eq!(
            sampler.handle(&PointerEvent::moved(4.0, 0.0, 6.0), Vec2::ZERO),
            SamplerOutput::Ignored
        );
    }

    #[test]
    fn test_stroke_ids_increase_per_press() {
        let mut sampler = InputSampler::default();
        for expected in 1..=3 {
            sampler.handle(&PointerEvent::down(0.0, 0.0, 0.0), Vec2::ZERO);
            sampler.handle(&PointerEvent::up(0.0, 0.0, 1.0), Vec2::ZERO);
            assert_eq!(sampler.current_stroke_id(), StrokeId(expected));
        }
    }

    #[test]
    fn test_pressure_sources() {
        let mut sampler = InputSampler::default();

        let pen = PointerEvent::down(0.0, 0.0, 0.0).with_pressure(0.4);
        let SamplerOutput::StrokeStarted(sample) = sampler.handle(&pen, Vec2::ZERO) else {
            panic!("expected StrokeStarted");
        };
        assert!((sample.pressure() - 0.6).abs() < 1e-6);

        let touch = PointerEvent::down(0.0, 0.0, 0.0).with_force(1.0);
        let SamplerOutput::StrokeStarted(sample) = sampler.handle(&touch, Vec2::ZERO) else {
            panic!("expected StrokeStarted");
        };
        assert!((sample.pressure() - 1.5).abs() < 1e-6);

        // Zero pressure falls back to the default
        let zero = PointerEvent::down(0.0, 0.0, 0.0).with_pressure(0.0);
        let SamplerOutput::StrokeStarted(sample) = sampler.handle(&zero, Vec2::ZERO) else {
            panic!("expected StrokeStarted");
        };
        assert!((sample.pressure() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_client_to_local_coordinates() {
        let mut sampler = InputSampler::default();
        let output = sampler.handle(&PointerEvent::down(110.0, 60.0, 0.0), Vec2::new(100.0, 50.0));
        let SamplerOutput::StrokeStarted(sample) = output else {
            panic!("expected StrokeStarted");
        };
        assert_eq!(sample.position(), Vec2::new(10.0, 10.0));
    }
}
