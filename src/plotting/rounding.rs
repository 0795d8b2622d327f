//! Step rounding used by the ECG grid.
//!
//! Quotients are compared in units of the step, so the same tolerance works for
//! microvolt and volt scales alike.
use crate::plotting::PlotError;
/// Absolute tolerance on `value / step` before flooring or ceiling.
///
/// It must exceed the floating-point noise of the quotient yet stay far below
/// one step, otherwise values near a multiple round to the wrong side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTolerance {
    epsilon: f64,
}
impl GridTolerance {
    pub const DEFAULT_EPSILON: f64 = 1e-9;
    pub const MIN_EPSILON: f64 = 1e-12;
    pub const MAX_EPSILON: f64 = 1e-6;
    pub fn new(epsilon: f64) -> Result<Self, PlotError> {
        if !(Self::MIN_EPSILON..=Self::MAX_EPSILON).contains(&epsilon) {
            return Err(PlotError::invalid_option(
                "grid_epsilon",
                epsilon.to_string(),
                "a value in [1e-12, 1e-6]",
            ));
        }
        Ok(Self { epsilon })
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}
impl Default for GridTolerance {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}
/// Largest multiple of `step` not exceeding `value`.
pub fn round_down(value: f64, step: f64, tol: GridTolerance) -> f64 {
    let k = (value / step + tol.epsilon).floor();
    snap(value, k * step, step, tol)
}
/// Smallest multiple of `step` not below `value`.
pub fn round_up(value: f64, step: f64, tol: GridTolerance) -> f64 {
    let k = (value / step - tol.epsilon).ceil();
    snap(value, k * step, step, tol)
}
// A value already sitting on a multiple comes back untouched, so `k * step`
// representation noise never leaks into the tick range.
fn snap(value: f64, multiple: f64, step: f64, tol: GridTolerance) -> f64 {
    if (multiple - value).abs() <= tol.epsilon * step {
        value
    } else {
        multiple
    }
}
/// Evenly spaced ticks from `start` to `stop` inclusive, generated by index.
pub fn ticks_between(start: f64, stop: f64, step: f64, tol: GridTolerance) -> Vec<f64> {
    if !(stop >= start) || !(step > 0.0) {
        return Vec::new();
    }
    let count = ((stop - start) / step + tol.epsilon).floor() as usize + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}
