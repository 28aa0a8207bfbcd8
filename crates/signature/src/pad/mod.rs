//! Signature pad: the surface manager tying the stages together
//!
//! This module provides the widget core that connects:
//! - Input handling (pointer events via [`InputSampler`])
//! - The accumulated point buffer
//! - Stroke rendering onto the CPU surface
//! - Export to a PNG data URL through the change callback
//!
//! The pad is driven entirely by its host: pointer events, resize
//! notifications, animation frames and style changes all arrive through
//! method calls (or [`HostToPad`](signature_ipc::HostToPad) messages).

mod input;
mod surface_ops;

use glam::Vec2;
use signature_config::{ConfigError, PadConfig, Rgba};
use signature_ipc::{ContainerSize, PadToHost};
use tracing::{info, warn};

use crate::buffer::PointBuffer;
use crate::error::SignatureError;
use crate::export::{to_data_url, EMPTY_SIGNATURE};
use crate::frame::FrameSlot;
use crate::render::StrokeRenderer;
use crate::sampler::InputSampler;
use crate::surface::CpuSurface;
use crate::types::StrokeId;

/// Receives the exported signature: a PNG data URL, or `""` when empty
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Adapt a [`PadToHost`] sink (e.g. a JSON bridge) into a change callback
pub fn notify_host(mut sink: impl FnMut(PadToHost) + 'static) -> ChangeCallback {
    Box::new(move |data: &str| sink(PadToHost::signature_changed(data)))
}

/// Geometry and style of the drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    /// Client-space top-left of the surface
    pub origin: Vec2,
    /// Displayed size in CSS pixels
    pub css_size: Vec2,
    /// Backing-store width in device pixels
    pub pixel_width: u32,
    /// Backing-store height in device pixels
    pub pixel_height: u32,
    pub line_color: Rgba,
    pub line_width: f32,
}

impl SurfaceState {
    fn from_config(config: &PadConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            origin: Vec2::ZERO,
            css_size: Vec2::new(config.width as f32, config.height as f32),
            pixel_width: config.width,
            pixel_height: config.height,
            line_color: config.color()?,
            line_width: config.line_width,
        })
    }

    /// Backing pixels per CSS pixel, per axis
    pub fn scale(&self) -> Vec2 {
        if self.css_size.x <= 0.0 || self.css_size.y <= 0.0 {
            return Vec2::ONE;
        }
        Vec2::new(
            self.pixel_width as f32 / self.css_size.x,
            self.pixel_height as f32 / self.css_size.y,
        )
    }
}

/// Signature capture widget core
///
/// One pad per widget instance. Owns the surface, the accumulated point
/// buffer and the gesture state; never shared across threads.
pub struct SignaturePad {
    pub(crate) config: PadConfig,
    pub(crate) state: SurfaceState,
    /// Backing raster (None until the host provides a usable size)
    pub(crate) surface: Option<CpuSurface>,
    pub(crate) buffer: PointBuffer,
    pub(crate) sampler: InputSampler,
    pub(crate) renderer: StrokeRenderer,
    pub(crate) pending_resize: FrameSlot<ContainerSize>,
    pub(crate) immersive: bool,
    pub(crate) on_change: Option<ChangeCallback>,
    pub(crate) last_signature: Option<String>,
}

impl SignaturePad {
    /// Create a pad from validated options
    ///
    /// A zero width or height in `config` leaves the surface unavailable
    /// until the first resize.
    pub fn new(config: PadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SurfaceState::from_config(&config)?;
        let surface = (state.pixel_width > 0 && state.pixel_height > 0)
            .then(|| CpuSurface::new(state.pixel_width, state.pixel_height));

        info!(
            "SignaturePad: created {}x{}, line width {}, color {}",
            config.width, config.height, config.line_width, config.line_color
        );

        Ok(Self {
            sampler: InputSampler::new(config.smoothing.clone(), config.dynamics.clone()),
            renderer: StrokeRenderer::new(state.line_width, state.line_color, config.dynamics.clone()),
            config,
            state,
            surface,
            buffer: PointBuffer::new(),
            pending_resize: FrameSlot::new(),
            immersive: false,
            on_change: None,
            last_signature: None,
        })
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Run a fallible stage, logging and swallowing its error
    ///
    /// The point buffer stays authoritative: a failed redraw or export is
    /// repaired by the next successful one.
    pub fn guarded<T>(
        &mut self,
        stage: &str,
        f: impl FnOnce(&mut Self) -> Result<T, SignatureError>,
    ) -> Option<T> {
        match f(self) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("SignaturePad: {} failed: {}", stage, e);
                None
            }
        }
    }

    /// Clear the raster and draw every buffered stroke
    ///
    /// Returns the number of strokes drawn.
    pub fn redraw(&mut self) -> Result<usize, SignatureError> {
        let scale = self.state.scale();
        let surface = self.surface.as_mut().ok_or(SignatureError::SurfaceUnavailable)?;
        surface.clear([0.0; 4]);
        Ok(self.renderer.render(self.buffer.samples(), surface, scale))
    }

    /// Encode the current drawing
    ///
    /// An empty buffer exports as `""` without touching the surface.
    pub fn export(&self) -> Result<String, SignatureError> {
        if self.buffer.is_empty() {
            return Ok(EMPTY_SIGNATURE.to_string());
        }
        let surface = self.surface.as_ref().ok_or(SignatureError::SurfaceUnavailable)?;
        to_data_url(surface)
    }

    /// Export and deliver the result to the change callback
    pub(crate) fn publish(&mut self) {
        if let Some(data) = self.guarded("export", |pad| pad.export()) {
            self.emit(data);
        }
    }

    pub(crate) fn emit(&mut self, data: String) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&data);
        }
        self.last_signature = Some(data);
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn buffer(&self) -> &PointBuffer {
        &self.buffer
    }

    pub fn surface(&self) -> Option<&CpuSurface> {
        self.surface.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.sampler.is_drawing()
    }

    pub fn is_immersive(&self) -> bool {
        self.immersive
    }

    pub fn current_stroke_id(&self) -> StrokeId {
        self.sampler.current_stroke_id()
    }

    /// Most recently exported value, if anything was exported yet
    pub fn last_signature(&self) -> Option<&str> {
        self.last_signature.as_deref()
    }
}
