//! Variable-width stroke rendering
//!
//! Samples are turned into per-stroke lists of quadratic segments. Each
//! segment runs from the previous midpoint to the midpoint of the next
//! sample pair, with the current sample as control point, so the rendered
//! curve stays smooth even though it is made of many short pieces. Width
//! follows pressure and thins as the pointer speeds up.

mod raster;

use glam::Vec2;
use signature_config::{DynamicsConfig, Rgba};
use tracing::debug;

use crate::surface::CpuSurface;
use crate::types::{strokes, Sample, StrokeId};

pub use raster::CoverageMask;

/// One quadratic piece of a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
    /// Rendered width at the end of the segment, in CSS pixels
    pub width: f32,
}

impl Segment {
    /// Point on the curve at `t` in [0, 1]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Upper bound of the curve length (control polygon length)
    pub fn hull_length(&self) -> f32 {
        self.start.distance(self.control) + self.control.distance(self.end)
    }

    /// Zero-length segment (a tap without drag)
    pub fn is_dot(&self) -> bool {
        self.start == self.control && self.control == self.end
    }
}

/// A disjoint sub-path: the segments of one stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    pub stroke_id: StrokeId,
    pub segments: Vec<Segment>,
}

impl StrokePath {
    pub fn first_point(&self) -> Option<Vec2> {
        self.segments.first().map(|s| s.start)
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.segments.last().map(|s| s.end)
    }
}

/// Draws sample sequences onto a surface
#[derive(Debug, Clone)]
pub struct StrokeRenderer {
    line_width: f32,
    color: Rgba,
    dynamics: DynamicsConfig,
}

impl StrokeRenderer {
    pub fn new(line_width: f32, color: Rgba, dynamics: DynamicsConfig) -> Self {
        Self {
            line_width,
            color,
            dynamics,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Width of the segment bounded by `from` and `to`
    ///
    /// `line_width × mean pressure × velocity factor`, where the velocity is
    /// the one recorded on `to` (or derived from the two samples).
    pub fn segment_width(&self, from: &Sample, to: &Sample) -> f32 {
        let pressure = (from.pressure() + to.pressure()) * 0.5;
        let velocity = to.velocity().unwrap_or_else(|| to.velocity_from(from));
        self.line_width * pressure * self.dynamics.velocity_factor(velocity)
    }

    /// Build the segments of a single stroke
    ///
    /// A one-sample stroke becomes a single dot segment.
    pub fn build_path(&self, stroke: &[Sample]) -> Option<StrokePath> {
        let first = stroke.first()?;
        let stroke_id = first.stroke_id();

        if stroke.len() == 1 {
            let point = first.position();
            return Some(StrokePath {
                stroke_id,
                segments: vec![Segment {
                    start: point,
                    control: point,
                    end: point,
                    width: self.line_width * first.pressure(),
                }],
            });
        }

        let last = stroke.len() - 1;
        let segments = (0..last)
            .map(|k| {
                let current = stroke[k].position();
                let next = stroke[k + 1].position();
                let start = if k == 0 {
                    current
                } else {
                    midpoint(stroke[k - 1].position(), current)
                };
                let end = if k + 1 == last {
                    next
                } else {
                    midpoint(current, next)
                };
                Segment {
                    start,
                    control: current,
                    end,
                    width: self.segment_width(&stroke[k], &stroke[k + 1]),
                }
            })
            .collect();

        Some(StrokePath {
            stroke_id,
            segments,
        })
    }

    /// Build one sub-path per stroke in a flat sample sequence
    pub fn build_paths(&self, samples: &[Sample]) -> Vec<StrokePath> {
        strokes(samples)
            .filter_map(|stroke| self.build_path(stroke))
            .collect()
    }

    /// Draw every stroke in `samples` onto `surface`
    ///
    /// `scale` maps CSS coordinates to backing-store pixels. Returns the
    /// number of sub-paths drawn.
    pub fn render(&self, samples: &[Sample], surface: &mut CpuSurface, scale: Vec2) -> usize {
        let paths = self.build_paths(samples);
        if paths.is_empty() {
            return 0;
        }

        let mut mask = CoverageMask::new(surface.width, surface.height);
        for path in &paths {
            mask.stroke_path(path, scale);
        }
        let touched = mask.composite_onto(surface, self.color);

        debug!(
            "StrokeRenderer::render: {} samples, {} paths, {} pixels covered, scale=({:.2}, {:.2})",
            samples.len(),
            paths.len(),
            touched,
            scale.x,
            scale.y
        );
        paths.len()
    }
}

#[inline]
fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}
