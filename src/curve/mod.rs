pub mod bezier;
pub mod clock;

pub use bezier::{CubicBezier, CurveSample, CurveState};
pub use clock::CurveClock;
