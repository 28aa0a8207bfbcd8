//! Pointer and container events consumed by the signature pad.

use serde::{Deserialize, Serialize};

/// Stage of a press-drag-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the surface
    Leave,
}

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// A unified mouse/pen/touch event.
///
/// Coordinates are in client (viewport CSS pixel) space; the pad converts
/// them to surface-local space using the container origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    #[serde(default)]
    pub device: PointerDevice,
    pub client_x: f32,
    pub client_y: f32,
    /// Normalized pressure reported by pointer devices
    #[serde(default)]
    pub pressure: Option<f32>,
    /// Normalized force reported by touch devices
    #[serde(default)]
    pub force: Option<f32>,
    /// Monotonic capture time in milliseconds
    pub timestamp_ms: f64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, client_x: f32, client_y: f32, timestamp_ms: f64) -> Self {
        Self {
            phase,
            device: PointerDevice::Mouse,
            client_x,
            client_y,
            pressure: None,
            force: None,
            timestamp_ms,
        }
    }

    pub fn down(client_x: f32, client_y: f32, timestamp_ms: f64) -> Self {
        Self::new(PointerPhase::Down, client_x, client_y, timestamp_ms)
    }

    pub fn moved(client_x: f32, client_y: f32, timestamp_ms: f64) -> Self {
        Self::new(PointerPhase::Move, client_x, client_y, timestamp_ms)
    }

    pub fn up(client_x: f32, client_y: f32, timestamp_ms: f64) -> Self {
        Self::new(PointerPhase::Up, client_x, client_y, timestamp_ms)
    }

    pub fn leave(client_x: f32, client_y: f32, timestamp_ms: f64) -> Self {
        Self::new(PointerPhase::Leave, client_x, client_y, timestamp_ms)
    }

    /// Pen event carrying pointer pressure
    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.device = PointerDevice::Pen;
        self.pressure = Some(pressure);
        self
    }

    /// Touch event carrying touch force
    pub fn with_force(mut self, force: f32) -> Self {
        self.device = PointerDevice::Touch;
        self.force = Some(force);
        self
    }

    /// Raw device pressure: touch force for touches, pointer pressure otherwise
    pub fn raw_pressure(&self) -> Option<f32> {
        match self.device {
            PointerDevice::Touch => self.force.or(self.pressure),
            PointerDevice::Mouse | PointerDevice::Pen => self.pressure,
        }
    }
}

/// Size notification for the container hosting the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    /// Left edge of the container in client space
    #[serde(default)]
    pub left: f32,
    /// Top edge of the container in client space
    #[serde(default)]
    pub top: f32,
    /// Displayed width in CSS pixels
    pub width: f32,
    /// Displayed height in CSS pixels
    pub height: f32,
    /// Backing-store pixels per CSS pixel
    #[serde(default = "default_pixel_ratio")]
    pub device_pixel_ratio: f32,
}

fn default_pixel_ratio() -> f32 {
    1.0
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_origin(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Zero-area (or non-finite) sizes carry no drawable surface
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Backing-store size in device pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let ratio = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        (
            (self.width * ratio).round().max(1.0) as u32,
            (self.height * ratio).round().max(1.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_pressure_by_device() {
        assert_eq!(PointerEvent::down(0.0, 0.0, 0.0).raw_pressure(), None);
        assert_eq!(
            PointerEvent::down(0.0, 0.0, 0.0).with_pressure(0.3).raw_pressure(),
            Some(0.3)
        );
        assert_eq!(
            PointerEvent::down(0.0, 0.0, 0.0).with_force(0.9).raw_pressure(),
            Some(0.9)
        );
    }

    #[test]
    fn test_container_size_empty() {
        assert!(ContainerSize::new(0.0, 100.0).is_empty());
        assert!(ContainerSize::new(100.0, 0.0).is_empty());
        assert!(ContainerSize::new(f32::NAN, 10.0).is_empty());
        assert!(!ContainerSize::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_pixel_size_uses_ratio() {
        let size = ContainerSize::new(400.0, 100.0).with_pixel_ratio(2.0);
        assert_eq!(size.pixel_size(), (800, 200));

        let size = ContainerSize::new(100.5, 50.2).with_pixel_ratio(0.0);
        assert_eq!(size.pixel_size(), (101, 50));
    }
}
