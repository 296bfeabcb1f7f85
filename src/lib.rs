//! UV-sphere mesh generation and cubic Bézier kinematics, plus the wgpu
//! renderer that draws a sphere travelling along the curve.

pub mod config;
pub mod curve;
pub mod geometry;
pub mod visualization;
