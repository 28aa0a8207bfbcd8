//! Surface operations for the signature pad

use glam::Vec2;
use signature_config::{ConfigError, Rgba};
use signature_ipc::ContainerSize;
use tracing::{debug, info};

use crate::constants::MAX_SURFACE_SIZE;
use crate::export::EMPTY_SIGNATURE;
use crate::frame::FrameHandle;
use crate::surface::CpuSurface;

use super::SignaturePad;

impl SignaturePad {
    /// Queue a container resize for the next animation frame
    ///
    /// Zero-area sizes are ignored. A resize that is still pending gets
    /// replaced; only the latest size is applied.
    pub fn notify_resize(&mut self, size: ContainerSize) -> Option<FrameHandle> {
        if size.is_empty() {
            debug!(
                "SignaturePad: ignoring empty resize {}x{}",
                size.width, size.height
            );
            return None;
        }
        Some(self.pending_resize.schedule(size))
    }

    /// Run the work queued for this animation frame
    pub fn on_animation_frame(&mut self) {
        if let Some(size) = self.pending_resize.take() {
            self.apply_resize(size);
        }
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_pending()
    }

    /// Resize the backing store to match the container
    ///
    /// The raster is recreated and every buffered stroke redrawn at the new
    /// scale; the point buffer is never touched.
    fn apply_resize(&mut self, size: ContainerSize) {
        let (width, height) = size.pixel_size();
        let width = width.min(MAX_SURFACE_SIZE);
        let height = height.min(MAX_SURFACE_SIZE);

        self.state.origin = Vec2::new(size.left, size.top);
        self.state.css_size = Vec2::new(size.width, size.height);
        self.state.pixel_width = width;
        self.state.pixel_height = height;
        self.surface = Some(CpuSurface::new(width, height));

        info!(
            "SignaturePad: resized to {}x{} css, {}x{} backing",
            size.width, size.height, width, height
        );

        self.guarded("redraw", |pad| pad.redraw());
        if !self.buffer.is_empty() {
            self.publish();
        }
    }

    /// Remove every stroke and export `""`
    ///
    /// Also ends a gesture in progress. Stroke ids keep counting up.
    pub fn clear(&mut self) {
        self.sampler.end_gesture();
        self.buffer.clear();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear([0.0; 4]);
        }
        info!("SignaturePad: cleared");
        self.emit(EMPTY_SIGNATURE.to_string());
    }

    /// Enter or leave the enlarged drawing presentation
    ///
    /// Entering starts from a clean surface; leaving keeps the drawing and
    /// exports it once.
    pub fn set_immersive(&mut self, enabled: bool) {
        if enabled == self.immersive {
            return;
        }
        self.immersive = enabled;
        info!("SignaturePad: immersive mode {}", if enabled { "on" } else { "off" });

        if enabled {
            self.clear();
        } else {
            self.publish();
        }
    }

    /// Change the stroke color and redraw every stroke with it
    pub fn set_line_color(&mut self, color: &str) -> Result<(), ConfigError> {
        let rgba = Rgba::from_hex(color)?;
        self.config.line_color = color.to_string();
        self.state.line_color = rgba;
        self.renderer.set_color(rgba);
        self.restyle();
        Ok(())
    }

    /// Change the base stroke width and redraw every stroke with it
    pub fn set_line_width(&mut self, width: f32) -> Result<(), ConfigError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(width));
        }
        self.config.line_width = width;
        self.state.line_width = width;
        self.renderer.set_line_width(width);
        self.restyle();
        Ok(())
    }

    fn restyle(&mut self) {
        self.guarded("redraw", |pad| pad.redraw());
        if !self.buffer.is_empty() {
            self.publish();
        }
    }
}
