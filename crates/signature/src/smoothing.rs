//! Path smoothing: redundant-point pruning and Bézier curve fitting
//!
//! [`smooth`] is the single entry point used both by the live rolling
//! buffer during a drag and by any whole-sequence pass. Sequences shorter
//! than three points pass through unchanged.

use std::collections::VecDeque;
use std::f32::consts::PI;

use glam::Vec2;
use signature_config::SmoothingConfig;
use tracing::debug;

use crate::types::Sample;

/// Prune then curve-fit a point sequence
///
/// Interpolated pressure never exceeds `max_pressure`.
pub fn smooth(points: &[Sample], config: &SmoothingConfig, max_pressure: f32) -> Vec<Sample> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let pruned = optimize_path(points, config);
    fit_curve(&pruned, config, max_pressure)
}

/// Drop near-collinear, closely spaced interior points
///
/// An interior point survives if the path turns by more than
/// `angle_threshold` at it, or if it lies further than
/// `distance_threshold` from the point two positions back. The first and
/// last points always survive.
pub fn optimize_path(points: &[Sample], config: &SmoothingConfig) -> Vec<Sample> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);

    for i in 1..last {
        let prev = points[i - 1].position();
        let cur = points[i].position();
        let next = points[i + 1].position();

        let turn = wrap_angle(direction(cur, next) - direction(prev, cur)).abs();
        let chord = if i >= 2 {
            cur.distance(points[i - 2].position())
        } else {
            0.0
        };

        if turn > config.angle_threshold || chord > config.distance_threshold {
            kept.push(points[i]);
        }
    }

    kept.push(points[last]);

    if kept.len() < points.len() {
        debug!("optimize_path: {} -> {} points", points.len(), kept.len());
    }
    kept
}

/// Join consecutive points with cubic Béziers and resample them
///
/// Every interior point gets an incoming handle pulled toward its previous
/// neighbour and an outgoing handle pulled toward its next neighbour, both
/// along the `next - prev` tangent and scaled by `smoothing_factor`. End
/// points act as their own handles. Each segment yields `curve_steps`
/// samples, the last of which is the segment's end point itself.
pub fn fit_curve(points: &[Sample], config: &SmoothingConfig, max_pressure: f32) -> Vec<Sample> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let steps = config.curve_steps.max(1);
    let last = points.len() - 1;
    let handles = |i: usize| -> (Vec2, Vec2) {
        let cur = points[i].position();
        if i == 0 || i == last {
            return (cur, cur);
        }
        let tangent = (points[i + 1].position() - points[i - 1].position())
            * (config.smoothing_factor / 6.0);
        (cur - tangent, cur + tangent)
    };

    let mut fitted = Vec::with_capacity(1 + last * steps as usize);
    fitted.push(points[0]);

    for i in 0..last {
        let from = &points[i];
        let to = &points[i + 1];
        let (_, out_handle) = handles(i);
        let (in_handle, _) = handles(i + 1);

        for step in 1..steps {
            let t = step as f32 / steps as f32;
            let position = cubic_bezier(from.position(), out_handle, in_handle, to.position(), t);
            let pressure =
                (from.pressure() * (1.0 + config.pressure_taper * (PI * t).sin())).min(max_pressure);
            let timestamp = from.timestamp_ms() + (to.timestamp_ms() - from.timestamp_ms()) * t as f64;

            let mut sample = Sample::new(position, pressure, timestamp, from.stroke_id());
            if let Some(velocity) = lerp_velocity(from, to, t) {
                sample = sample.with_velocity(velocity);
            }
            fitted.push(sample);
        }
        fitted.push(*to);
    }

    fitted
}

/// Rolling window of the newest raw samples of the active stroke
///
/// Each new raw sample re-smooths the window and yields only the newest
/// few fitted samples, so the appended path stays close behind the pointer.
/// Yielded samples always lie after everything yielded before them; the
/// newest raw sample is always the last one yielded.
#[derive(Debug, Clone)]
pub struct LiveSmoother {
    window: VecDeque<Sample>,
    config: SmoothingConfig,
    max_pressure: f32,
    /// Timestamp of the last yielded sample
    emitted_ms: Option<f64>,
}

impl LiveSmoother {
    pub fn new(config: SmoothingConfig, max_pressure: f32) -> Self {
        Self {
            window: VecDeque::with_capacity(config.live_buffer_cap.max(3)),
            config,
            max_pressure,
            emitted_ms: None,
        }
    }

    /// Start a new stroke at `first`
    pub fn begin(&mut self, first: Sample) {
        self.window.clear();
        self.window.push_back(first);
        self.emitted_ms = Some(first.timestamp_ms());
    }

    /// Forget the current stroke
    pub fn reset(&mut self) {
        self.window.clear();
        self.emitted_ms = None;
    }

    /// Number of raw samples currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Add a raw sample and return the samples to append to the buffer
    pub fn push(&mut self, sample: Sample) -> Vec<Sample> {
        self.window.push_back(sample);
        let cap = self.config.live_buffer_cap.max(3);
        while self.window.len() > cap {
            self.window.pop_front();
        }

        let emitted_ms = self.emitted_ms.replace(sample.timestamp_ms());
        if self.window.len() < 3 {
            return vec![sample];
        }

        let pruned = optimize_path(self.window.make_contiguous(), &self.config);
        if pruned.len() < 3 {
            return vec![sample];
        }

        let fitted = fit_curve(&pruned, &self.config, self.max_pressure);
        let count = self.config.live_append_count.clamp(1, fitted.len());
        let newest = &fitted[fitted.len() - count..fitted.len() - 1];

        // Fitted points from before the previous append would run backwards
        let mut appended: Vec<Sample> = newest
            .iter()
            .filter(|s| emitted_ms.is_none_or(|t| s.timestamp_ms() > t))
            .copied()
            .collect();
        appended.push(sample);
        appended
    }
}

fn direction(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Wrap an angle difference into [-π, π]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped < -PI { wrapped + 2.0 * PI } else { wrapped }
}

fn cubic_bezier(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

fn lerp_velocity(from: &Sample, to: &Sample, t: f32) -> Option<f32> {
    match (from.velocity(), to.velocity()) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (a, b) => b.or(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrokeId;
    use signature_config::MAX_PRESSURE;

    fn sample(x: f32, y: f32, t: f64) -> Sample {
        Sample::new(Vec2::new(x, y), 0.75, t, StrokeId(1))
    }

    fn zigzag(count: usize) -> Vec<Sample> {
        (0..count)
            .map(|i| {
                let y = if i % 2 == 0 { 0.0 } else { 20.0 };
                sample(i as f32 * 20.0, y, i as f64 * 16.0).with_velocity(1.0)
            })
            .collect()
    }

    #[test]
    fn test_short_sequences_unchanged() {
        let config = SmoothingConfig::default();
        for len in 0..3 {
            let points: Vec<Sample> = (0..len).map(|i| sample(i as f32, 0.0, i as f64)).collect();
            assert_eq!(smooth(&points, &config, MAX_PRESSURE), points);
            assert_eq!(optimize_path(&points, &config), points);
            assert_eq!(fit_curve(&points, &config, MAX_PRESSURE), points);
        }
    }

    #[test]
    fn test_optimize_drops_collinear_close_points() {
        let config = SmoothingConfig::default();
        let points: Vec<Sample> = (0..5).map(|i| sample(i as f32 * 2.0, 0.0, i as f64)).collect();

        let pruned = optimize_path(&points, &config);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[0], points[0]);
        assert_eq!(pruned[1], points[4]);
    }

    #[test]
    fn test_optimize_keeps_corners() {
        let config = SmoothingConfig::default();
        let points = vec![
            sample(0.0, 0.0, 0.0),
            sample(2.0, 0.0, 1.0),
            sample(2.0, 2.0, 2.0),
        ];
        assert_eq!(optimize_path(&points, &config).len(), 3);
    }

    #[test]
    fn test_optimize_keeps_distant_points() {
        let config = SmoothingConfig::default();
        // Straight line, but spaced 6 units apart: two back is 12 > 10
        let points: Vec<Sample> = (0..4).map(|i| sample(i as f32 * 6.0, 0.0, i as f64)).collect();
        let pruned = optimize_path(&points, &config);
        assert_eq!(pruned.len(), 3);
        assert_eq!(pruned[1], points[2]);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(2.0 * PI - 0.05) + 0.05).abs() < 1e-5);
        assert!((wrap_angle(-2.0 * PI + 0.05) - 0.05).abs() < 1e-5);
        assert!((wrap_angle(0.3) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_fit_curve_passes_through_points() {
        let config = SmoothingConfig::default();
        let points = zigzag(4);
        let fitted = fit_curve(&points, &config, MAX_PRESSURE);

        let steps = config.curve_steps as usize;
        assert_eq!(fitted.len(), 1 + (points.len() - 1) * steps);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(fitted[i * steps], *point);
        }
    }

    #[test]
    fn test_fit_curve_interpolates_time_and_keeps_stroke() {
        let config = SmoothingConfig::default();
        let fitted = fit_curve(&zigzag(3), &config, MAX_PRESSURE);

        for pair in fitted.windows(2) {
            assert!(pair[1].timestamp_ms() >= pair[0].timestamp_ms());
            assert_eq!(pair[1].stroke_id(), StrokeId(1));
            assert_eq!(pair[1].velocity(), Some(1.0));
        }
    }

    #[test]
    fn test_fit_curve_pressure_taper_peaks_mid_segment() {
        let config = SmoothingConfig::default();
        let fitted = fit_curve(&zigzag(3), &config, MAX_PRESSURE);
        let steps = config.curve_steps as usize;

        let mid = fitted[steps / 2].pressure();
        let near_start = fitted[1].pressure();
        assert!(mid > near_start);
        assert!(mid <= 0.75 * (1.0 + config.pressure_taper) + 1e-6);
        assert!(fitted.iter().all(|s| s.pressure() <= MAX_PRESSURE));
    }

    #[test]
    fn test_fit_curve_zero_factor_is_straight() {
        let config = SmoothingConfig {
            smoothing_factor: 0.0,
            ..Default::default()
        };
        let fitted = fit_curve(&zigzag(3), &config, MAX_PRESSURE);
        // First segment runs (0,0) -> (20,20); every sample lies on y = x
        for sample in &fitted[..=config.curve_steps as usize] {
            assert!((sample.x() - sample.y()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_live_smoother_passes_raw_until_three_points() {
        let mut live = LiveSmoother::new(SmoothingConfig::default(), MAX_PRESSURE);
        live.begin(sample(0.0, 0.0, 0.0));

        let second = sample(10.0, 0.0, 16.0).with_velocity(0.625);
        assert_eq!(live.push(second), vec![second]);
        assert_eq!(live.len(), 2);
    }

    #[test]
    fn test_live_smoother_appends_newest_points() {
        let config = SmoothingConfig::default();
        let mut live = LiveSmoother::new(config.clone(), MAX_PRESSURE);
        let points = zigzag(6);
        live.begin(points[0]);
        live.push(points[1]);

        for point in &points[2..] {
            let appended = live.push(*point);
            assert_eq!(appended.len(), config.live_append_count);
            // The newest appended sample is the raw sample itself
            assert_eq!(appended.last(), Some(point));
        }
    }

    #[test]
    fn test_live_smoother_window_is_capped() {
        let config = SmoothingConfig {
            live_buffer_cap: 4,
            ..Default::default()
        };
        let mut live = LiveSmoother::new(config, MAX_PRESSURE);
        let points = zigzag(10);
        live.begin(points[0]);
        for point in &points[1..] {
            live.push(*point);
        }
        assert_eq!(live.len(), 4);

        live.reset();
        assert!(live.is_empty());
    }

    #[test]
    fn test_fit_curve_respects_pressure_limit() {
        let config = SmoothingConfig::default();
        let points: Vec<Sample> = zigzag(4)
            .into_iter()
            .map(|s| Sample::new(s.position(), 1.0, s.timestamp_ms(), s.stroke_id()))
            .collect();
        let fitted = fit_curve(&points, &config, 1.0);
        assert!(fitted.iter().all(|s| s.pressure() <= 1.0));
        assert!(fitted.iter().any(|s| (s.pressure() - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_live_smoother_slow_straight_drag_moves_forward() {
        let mut live = LiveSmoother::new(SmoothingConfig::default(), MAX_PRESSURE);
        live.begin(sample(10.0, 50.0, 0.0));

        let mut appended = Vec::new();
        for i in 1..=20 {
            let raw = sample(10.0 + i as f32 * 2.0, 50.0, i as f64 * 16.0);
            let out = live.push(raw);
            // The newest raw sample always closes the batch
            assert_eq!(out.last(), Some(&raw));
            appended.extend(out);
        }

        for pair in appended.windows(2) {
            assert!(pair[1].timestamp_ms() > pair[0].timestamp_ms());
            assert!(pair[1].x() >= pair[0].x());
        }
    }

    #[test]
    fn test_live_smoother_curve_never_repeats_time() {
        let mut live = LiveSmoother::new(SmoothingConfig::default(), MAX_PRESSURE);
        let points = zigzag(12);
        live.begin(points[0]);

        let mut last_ms = points[0].timestamp_ms();
        for point in &points[1..] {
            for appended in live.push(*point) {
                assert!(appended.timestamp_ms() > last_ms);
                last_ms = appended.timestamp_ms();
            }
        }
    }
}
