//! Dab rasterization for stroke segments

use glam::Vec2;
use signature_config::Rgba;

use super::{Segment, StrokePath};
use crate::constants::{DAB_SPACING, MAX_SEGMENT_DABS, MIN_DAB_RADIUS, MIN_DAB_SPACING};
use crate::surface::CpuSurface;

/// Per-pixel stroke coverage, combined with `max` so overlapping dabs and
/// joints between segments never darken anti-aliased edges twice
pub struct CoverageMask {
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Coverage at a pixel, 0.0 outside the mask
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Stamp every segment of a path
    ///
    /// Width is interpolated from the previous segment's width to the
    /// current one, so neighbouring segments meet without a step.
    pub fn stroke_path(&mut self, path: &StrokePath, scale: Vec2) {
        let mut start_width = match path.segments.first() {
            Some(segment) => segment.width,
            None => return,
        };
        for segment in &path.segments {
            self.stroke_segment(segment, start_width, scale);
            start_width = segment.width;
        }
    }

    /// Stamp round dabs along a quadratic segment
    ///
    /// Round dabs give round caps and joins for free. Segments whose control
    /// hull misses the mask are skipped, and the dab count is capped at
    /// `MAX_SEGMENT_DABS`. Returns the number of dabs placed.
    fn stroke_segment(&mut self, segment: &Segment, start_width: f32, scale: Vec2) -> u32 {
        let radius_scale = (scale.x + scale.y) * 0.5;
        let start_radius = (start_width * 0.5 * radius_scale).max(MIN_DAB_RADIUS);
        let end_radius = (segment.width * 0.5 * radius_scale).max(MIN_DAB_RADIUS);

        let device = Segment {
            start: segment.start * scale,
            control: segment.control * scale,
            end: segment.end * scale,
            width: segment.width,
        };
        let reach = start_radius.max(end_radius) + 1.0;
        if !self.hull_overlaps(&device, reach) {
            return 0;
        }

        let spacing = (start_radius.min(end_radius) * 2.0 * DAB_SPACING).max(MIN_DAB_SPACING);
        let steps = (device.hull_length() / spacing)
            .ceil()
            .clamp(1.0, MAX_SEGMENT_DABS as f32) as u32;

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let radius = start_radius + (end_radius - start_radius) * t;
            self.stamp_dab(device.point_at(t), radius);
        }
        steps + 1
    }

    /// Whether the bounding box of a segment's control points, grown by
    /// `reach`, touches the mask
    fn hull_overlaps(&self, segment: &Segment, reach: f32) -> bool {
        let min = segment.start.min(segment.control).min(segment.end) - Vec2::splat(reach);
        let max = segment.start.max(segment.control).max(segment.end) + Vec2::splat(reach);
        min.is_finite()
            && max.is_finite()
            && max.x >= 0.0
            && max.y >= 0.0
            && min.x <= self.width as f32
            && min.y <= self.height as f32
    }

    /// Stamp one anti-aliased disc
    ///
    /// Returns the affected region (x, y, width, height), or None when the
    /// dab lies completely outside the mask.
    pub fn stamp_dab(&mut self, center: Vec2, radius: f32) -> Option<(u32, u32, u32, u32)> {
        if !(radius > 0.0) || !center.is_finite() {
            return None;
        }

        // One extra pixel of reach for the anti-aliased rim
        let reach = radius + 1.0;
        let x_min = ((center.x - reach).floor().max(0.0) as u32).min(self.width);
        let y_min = ((center.y - reach).floor().max(0.0) as u32).min(self.height);
        let x_max = ((center.x + reach).ceil().max(0.0) as u32).min(self.width);
        let y_max = ((center.y + reach).ceil().max(0.0) as u32).min(self.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        for py in y_min..y_max {
            for px in x_min..x_max {
                // Distance from the pixel center
                let dx = (px as f32 + 0.5) - center.x;
                let dy = (py as f32 + 0.5) - center.y;
                let distance = (dx * dx + dy * dy).sqrt();

                let coverage = edge_coverage(distance, radius);
                if coverage > 0.0 {
                    let index = (py as usize) * (self.width as usize) + (px as usize);
                    let cell = &mut self.coverage[index];
                    *cell = cell.max(coverage);
                }
            }
        }

        Some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    /// Composite the mask onto a surface in a single color
    ///
    /// Returns the number of pixels touched.
    pub fn composite_onto(&self, surface: &mut CpuSurface, color: Rgba) -> usize {
        let color = color.to_array();
        let width = self.width.min(surface.width);
        let height = self.height.min(surface.height);
        let mut touched = 0;

        for y in 0..height {
            for x in 0..width {
                let coverage = self.get(x, y);
                if coverage > 0.0 {
                    surface.blend_pixel(x, y, color, coverage);
                    touched += 1;
                }
            }
        }
        touched
    }
}

/// Coverage of a pixel whose center lies `distance` from a disc of `radius`
///
/// 1.0 well inside, 0.0 well outside, linear across a one-pixel rim.
#[inline]
pub fn edge_coverage(distance: f32, radius: f32) -> f32 {
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}
