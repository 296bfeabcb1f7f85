use glam::Vec3;

use crate::geometry::{GeometryError, GeometryResult};

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];
pub const SPHERE_RADIUS: f32 = 0.1;
pub const SPHERE_STACKS: u32 = 30;
pub const SPHERE_SECTORS: u32 = 30;
pub const CURVE_TIME_STEP: f64 = 0.001;
pub const CURVE_SEGMENTS: usize = 1000;
pub const FOV_RANGE_DEGREES: std::ops::RangeInclusive<f32> = 40.0..=120.0;

pub const CONTROL_POINTS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.0, 0.0),
    Vec3::new(-0.25, 1.5, 0.0),
    Vec3::new(1.25, -3.5, 0.0),
    Vec3::new(0.5, 1.0, 0.0),
];

/// Startup parameters for the scene. Fixed for the lifetime of the app except
/// for `fov_degrees` and `sphere_color`, which the parameter panel edits.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub radius: f32,
    pub stack_count: u32,
    pub sector_count: u32,
    pub control_points: [Vec3; 4],
    pub dt: f64,
    pub curve_segments: usize,
    pub fov_degrees: f32,
    pub camera_position: Vec3,
    pub sphere_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            stack_count: SPHERE_STACKS,
            sector_count: SPHERE_SECTORS,
            control_points: CONTROL_POINTS,
            dt: CURVE_TIME_STEP,
            curve_segments: CURVE_SEGMENTS,
            fov_degrees: 90.0,
            camera_position: Vec3::new(0.0, 0.0, 2.0),
            sphere_color: [0.8, 0.3, 0.02, 1.0],
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> GeometryResult<()> {
        let invalid = |msg: String| Err(GeometryError::InvalidParameter(msg));

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return invalid(format!("radius must be positive, got {}", self.radius));
        }
        if self.stack_count == 0 || self.sector_count == 0 {
            return invalid(format!(
                "tessellation counts must be positive, got {} stacks x {} sectors",
                self.stack_count, self.sector_count
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return invalid(format!("time step must be positive, got {}", self.dt));
        }
        if self.control_points.iter().any(|p| !p.is_finite()) {
            return invalid("control points must be finite".into());
        }
        if !FOV_RANGE_DEGREES.contains(&self.fov_degrees) {
            return invalid(format!(
                "field of view must be within {:?} degrees, got {}",
                FOV_RANGE_DEGREES, self.fov_degrees
            ));
        }
        Ok(())
    }
}
