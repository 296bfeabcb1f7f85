//! Cubic Bézier kinematics: position, velocity and acceleration along one segment.
//!
//! All functions are pure polynomials in `t`. They neither clamp nor wrap, so
//! values outside `[0, 1]` extrapolate the curve.

use glam::Vec3;

/// Generic 3-component output; position, velocity or acceleration depending on
/// which function produced it.
pub type CurveState = Vec3;

/// Scalar cubic Bernstein blend of four coefficients.
pub fn bernstein(t: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;

    uu * u * a + 3.0 * uu * t * b + 3.0 * u * tt * c + tt * t * d
}

pub fn position(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> CurveState {
    Vec3::new(
        bernstein(t, p0.x, p1.x, p2.x, p3.x),
        bernstein(t, p0.y, p1.y, p2.y, p3.y),
        bernstein(t, p0.z, p1.z, p2.z, p3.z),
    )
}

/// First derivative with respect to `t`.
pub fn velocity(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> CurveState {
    let u = 1.0 - t;
    3.0 * u * u * (p1 - p0) + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Second derivative with respect to `t`.
pub fn acceleration(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> CurveState {
    let u = 1.0 - t;
    6.0 * u * (p2 - 2.0 * p1 + p0) + 6.0 * t * (p3 - 2.0 * p2 + p1)
}

/// Everything the frame needs from the curve at a given parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub t: f32,
    pub position: CurveState,
    pub velocity: CurveState,
    pub acceleration: CurveState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub control_points: [Vec3; 4],
}

impl CubicBezier {
    pub fn new(control_points: [Vec3; 4]) -> Self {
        Self { control_points }
    }

    pub fn position(&self, t: f32) -> CurveState {
        let [p0, p1, p2, p3] = self.control_points;
        position(t, p0, p1, p2, p3)
    }

    pub fn velocity(&self, t: f32) -> CurveState {
        let [p0, p1, p2, p3] = self.control_points;
        velocity(t, p0, p1, p2, p3)
    }

    pub fn acceleration(&self, t: f32) -> CurveState {
        let [p0, p1, p2, p3] = self.control_points;
        acceleration(t, p0, p1, p2, p3)
    }

    pub fn sample(&self, t: f32) -> CurveSample {
        CurveSample {
            t,
            position: self.position(t),
            velocity: self.velocity(t),
            acceleration: self.acceleration(t),
        }
    }

    /// Evenly spaced positions from `t = 0` to `t = 1` inclusive, packed for a
    /// line-strip vertex buffer.
    pub fn polyline(&self, segments: usize) -> Vec<[f32; 3]> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.position(i as f32 / segments as f32).to_array())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_curve() -> CubicBezier {
        CubicBezier::new([
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(-0.25, 1.5, 0.0),
            Vec3::new(1.25, -3.5, 0.0),
            Vec3::new(0.5, 1.0, 0.0),
        ])
    }

    #[test]
    fn endpoints_hit_outer_control_points() {
        let curve = demo_curve();
        assert_eq!(curve.position(0.0), Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(curve.position(1.0), Vec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn bernstein_weights_sum_to_one() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert!((bernstein(t, 1.0, 1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn velocity_matches_central_difference() {
        let curve = demo_curve();
        let h = 0.001;
        let numeric = (curve.position(0.5 + h) - curve.position(0.5 - h)) / (2.0 * h);
        let analytic = curve.velocity(0.5);
        assert!(
            (numeric - analytic).abs().max_element() < 1e-3,
            "numeric {:?} vs analytic {:?}",
            numeric,
            analytic
        );
    }

    #[test]
    fn acceleration_matches_central_difference() {
        let curve = demo_curve();
        let h = 0.01;
        for t in [0.1, 0.5, 0.9] {
            let numeric = (curve.velocity(t + h) - curve.velocity(t - h)) / (2.0 * h);
            let analytic = curve.acceleration(t);
            assert!((numeric - analytic).abs().max_element() < 1e-2);
        }
    }

    #[test]
    fn endpoint_tangents() {
        let curve = demo_curve();
        let [p0, p1, p2, p3] = curve.control_points;
        assert!((curve.velocity(0.0) - 3.0 * (p1 - p0)).length() < 1e-6);
        assert!((curve.velocity(1.0) - 3.0 * (p3 - p2)).length() < 1e-6);
        assert!((curve.acceleration(0.0) - 6.0 * (p2 - 2.0 * p1 + p0)).length() < 1e-5);
    }

    #[test]
    fn extrapolates_outside_unit_interval() {
        let curve = demo_curve();
        let outside = curve.position(1.5);
        assert!(outside.is_finite());
        assert_ne!(outside, curve.position(1.0));
    }

    #[test]
    fn sample_bundles_all_three() {
        let curve = demo_curve();
        let s = curve.sample(0.25);
        assert_eq!(s.t, 0.25);
        assert_eq!(s.position, curve.position(0.25));
        assert_eq!(s.velocity, curve.velocity(0.25));
        assert_eq!(s.acceleration, curve.acceleration(0.25));
    }

    #[test]
    fn polyline_spans_whole_curve() {
        let curve = demo_curve();
        let points = curve.polyline(100);
        assert_eq!(points.len(), 101);
        assert_eq!(points[0], [-0.5, 0.0, 0.0]);
        assert_eq!(points[100], [0.5, 1.0, 0.0]);
        assert_eq!(curve.polyline(0).len(), 2);
    }
}
