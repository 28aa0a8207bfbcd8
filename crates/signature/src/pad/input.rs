//! Input handling for the signature pad

use signature_ipc::{HostToPad, IpcError, PointerEvent};
use tracing::{debug, info, warn};

use crate::sampler::SamplerOutput;
use crate::types::Sample;

use super::SignaturePad;

impl SignaturePad {
    /// Feed one pointer/touch event through the sampler
    ///
    /// New samples are appended and redrawn immediately; a release (or the
    /// pointer leaving mid-stroke) exports the drawing.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match self.sampler.handle(event, self.state.origin) {
            SamplerOutput::Ignored => {}
            SamplerOutput::StrokeStarted(sample) => self.append(&[sample]),
            SamplerOutput::Samples(samples) => self.append(&samples),
            SamplerOutput::StrokeEnded { stroke_id } => {
                info!(
                    "SignaturePad: stroke {:?} finished, {} strokes / {} samples buffered",
                    stroke_id,
                    self.buffer.stroke_count(),
                    self.buffer.len()
                );
                self.publish();
            }
        }
    }

    fn append(&mut self, samples: &[Sample]) {
        if let Err(e) = self.buffer.extend(samples.iter().copied()) {
            warn!("SignaturePad: dropping samples: {}", e);
            return;
        }
        self.guarded("redraw", |pad| pad.redraw());
    }

    /// Apply one host bridge message
    pub fn dispatch(&mut self, message: HostToPad) {
        match message {
            HostToPad::Pointer(event) => self.handle_pointer(&event),
            HostToPad::Resize(size) => {
                self.notify_resize(size);
            }
            HostToPad::AnimationFrame => self.on_animation_frame(),
            HostToPad::Clear => self.clear(),
            HostToPad::SetImmersive { enabled } => self.set_immersive(enabled),
            HostToPad::SetLineColor { color } => {
                if let Err(e) = self.set_line_color(&color) {
                    warn!("SignaturePad: ignoring line color: {}", e);
                }
            }
            HostToPad::SetLineWidth { width } => {
                if let Err(e) = self.set_line_width(width) {
                    warn!("SignaturePad: ignoring line width: {}", e);
                }
            }
        }
    }

    /// Decode and apply a JSON bridge message
    pub fn dispatch_json(&mut self, json: &str) -> Result<(), IpcError> {
        let message = HostToPad::from_json(json)?;
        debug!("SignaturePad: bridge message {:?}", message);
        self.dispatch(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use signature_config::PadConfig;
    use signature_ipc::ContainerSize;

    use super::*;
    use crate::types::StrokeId;

    #[test]
    fn test_origin_offsets_samples() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.notify_resize(ContainerSize::new(800.0, 200.0).with_origin(40.0, 300.0));
        pad.on_animation_frame();

        pad.handle_pointer(&PointerEvent::down(50.0, 310.0, 0.0));
        assert_eq!(pad.buffer().samples()[0].position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_moves_without_press_are_dropped() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.handle_pointer(&PointerEvent::moved(10.0, 10.0, 0.0));
        pad.handle_pointer(&PointerEvent::up(10.0, 10.0, 5.0));
        assert!(pad.buffer().is_empty());
        assert_eq!(pad.last_signature(), None);
    }

    #[test]
    fn test_live_smoothing_appends_fitted_samples() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.handle_pointer(&PointerEvent::down(10.0, 10.0, 0.0));
        for i in 1..6 {
            let y = if i % 2 == 0 { 10.0 } else { 40.0 };
            pad.handle_pointer(&PointerEvent::moved(10.0 + i as f32 * 30.0, y, i as f64 * 16.0));
        }
        // One press sample, one raw sample, then three per move
        assert_eq!(pad.buffer().len(), 1 + 1 + 4 * 3);
        assert!(pad.buffer().samples().iter().all(|s| s.stroke_id() == StrokeId(1)));
        assert!(!pad.surface().unwrap().is_blank());
    }

    #[test]
    fn test_dispatch_json() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.dispatch_json(
            r#"{"type":"Pointer","data":{"phase":"Down","client_x":5.0,"client_y":6.0,"timestamp_ms":0.0}}"#,
        )
        .unwrap();
        assert!(pad.is_drawing());

        pad.dispatch_json(r#"{"type":"Clear"}"#).unwrap();
        assert!(!pad.is_drawing());
        assert_eq!(pad.last_signature(), Some(""));

        assert!(pad.dispatch_json(r#"{"type":"Explode"}"#).is_err());
    }

    #[test]
    fn test_dispatch_rejects_bad_style() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.dispatch(HostToPad::SetLineColor {
            color: "nope".to_string(),
        });
        pad.dispatch(HostToPad::SetLineWidth { width: -1.0 });
        assert_eq!(pad.state().line_width, 2.0);
        assert_eq!(pad.config().line_color, "#000000");
    }

    #[test]
    fn test_slow_straight_drag_keeps_buffer_ordered() {
        let mut pad = SignaturePad::new(PadConfig::default()).unwrap();
        pad.handle_pointer(&PointerEvent::down(10.0, 50.0, 0.0));
        for i in 1..=20 {
            pad.handle_pointer(&PointerEvent::moved(10.0 + i as f32 * 2.0, 50.0, i as f64 * 16.0));
        }
        pad.handle_pointer(&PointerEvent::up(50.0, 50.0, 336.0));

        let samples = pad.buffer().samples();
        assert_eq!(samples.last().map(|s| s.x()), Some(50.0));
        for pair in samples.windows(2) {
            assert!(pair[1].timestamp_ms() >= pair[0].timestamp_ms());
            assert!(pair[1].x() >= pair[0].x());
        }
        assert_eq!(pad.buffer().stroke_count(), 1);
    }
}
