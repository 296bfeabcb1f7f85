use crate::geometry::{GeometryError, GeometryResult};

/// Looping curve parameter advanced once per frame.
///
/// Time is `ticks * dt` rather than a running sum, so the wrap point does not
/// drift with accumulated rounding. Once an advance pushes time past 1.0 it
/// resets to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveClock {
    dt: f64,
    ticks: u64,
}

impl CurveClock {
    pub fn new(dt: f64) -> GeometryResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(GeometryError::InvalidParameter(format!(
                "time step must be a positive finite number, got {}",
                dt
            )));
        }
        Ok(Self { dt, ticks: 0 })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.dt
    }

    /// Curve parameter for the evaluator.
    pub fn t(&self) -> f32 {
        self.time() as f32
    }

    pub fn advance(&mut self) -> f64 {
        self.ticks += 1;
        if self.time() > 1.0 {
            tracing::trace!("Curve time wrapped after {} ticks", self.ticks);
            self.ticks = 0;
        }
        self.time()
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
