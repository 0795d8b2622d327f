//! ECG paper calibration.
//!
//! Standard strip: 25 mm/s and 10 mm/mV, so a 5 mm major box is 0.2 s by
//! 0.5 mV and a 1 mm minor box is 0.04 s. The amplitude minor step follows the
//! plotting convention of four divisions per major box.
use crate::plotting::rounding::{round_down, round_up, ticks_between, GridTolerance};
use crate::plotting::time_axis::is_valid_frequency;
use crate::plotting::PlotError;
use crate::types::TimeUnits;
/// Major time step in seconds (5 mm at 25 mm/s).
pub const MAJOR_SECONDS: f64 = 0.2;
/// Minor time step in seconds (1 mm at 25 mm/s).
pub const MINOR_SECONDS: f64 = 0.04;
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSteps {
    pub major: f64,
    pub minor: f64,
}
impl GridSteps {
    /// Time-axis steps expressed in `units`. Sample units scale by `fs`.
    pub fn for_time(units: TimeUnits, fs: Option<f64>) -> Result<Self, PlotError> {
        let scale = match units {
            TimeUnits::Samples => fs
                .filter(|f| is_valid_frequency(*f))
                .ok_or_else(|| PlotError::MissingFrequency("ecg_grids (time_units = samples)".into()))?,
            TimeUnits::Seconds => 1.0,
            TimeUnits::Minutes => 1.0 / 60.0,
            TimeUnits::Hours => 1.0 / 3600.0,
        };
        Ok(Self {
            major: MAJOR_SECONDS * scale,
            minor: MINOR_SECONDS * scale,
        })
    }
}
/// Amplitude units an ECG grid can be calibrated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmplitudeUnit {
    Microvolts,
    Millivolts,
    Volts,
}
impl AmplitudeUnit {
    /// Case-insensitive match on `uv`, `mv` and `v`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "uv" => Some(AmplitudeUnit::Microvolts),
            "mv" => Some(AmplitudeUnit::Millivolts),
            "v" => Some(AmplitudeUnit::Volts),
            _ => None,
        }
    }
    pub fn steps(&self) -> GridSteps {
        match self {
            AmplitudeUnit::Microvolts => GridSteps {
                major: 500.0,
                minor: 125.0,
            },
            AmplitudeUnit::Millivolts => GridSteps {
                major: 0.5,
                minor: 0.125,
            },
            AmplitudeUnit::Volts => GridSteps {
                major: 0.0005,
                minor: 0.000125,
            },
        }
    }
}
/// Inputs for one channel's grid.
#[derive(Clone, Copy, Debug)]
pub struct GridRequest<'a> {
    pub min_sig: f64,
    pub max_sig: f64,
    /// Unit label of the channel, as written in the record.
    pub units: &'a str,
    pub fs: Option<f64>,
    pub max_time: f64,
    pub time_units: TimeUnits,
}
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTicks {
    pub major_x: Vec<f64>,
    pub minor_x: Vec<f64>,
    pub major_y: Vec<f64>,
    pub minor_y: Vec<f64>,
}
impl GridTicks {
    /// Extent of the minor ticks, `((x0, x1), (y0, y1))`; grid lines span it.
    pub fn extent(&self) -> Option<((f64, f64), (f64, f64))> {
        let x = (*self.minor_x.first()?, *self.minor_x.last()?);
        let y = (*self.minor_y.first()?, *self.minor_y.last()?);
        Some((x, y))
    }
}
/// Tick positions for an ECG grid covering the visible window.
///
/// Time ticks run from 0 to the first major multiple at or beyond
/// `max_time`; amplitude ticks run from the major multiple at or below
/// `min_sig` to the one at or above `max_sig`.
pub fn calc_ecg_grids(req: &GridRequest<'_>, tol: GridTolerance) -> Result<GridTicks, PlotError> {
    let x_steps = GridSteps::for_time(req.time_units, req.fs)?;
    let y_steps = AmplitudeUnit::parse(req.units)
        .ok_or_else(|| PlotError::invalid_option("units", req.units, "uV, mV, V"))?
        .steps();
    let x_end = round_up(req.max_time, x_steps.major, tol);
    let y_start = round_down(req.min_sig, y_steps.major, tol);
    let y_end = round_up(req.max_sig, y_steps.major, tol);
    Ok(GridTicks {
        major_x: ticks_between(0.0, x_end, x_steps.major, tol),
        minor_x: ticks_between(0.0, x_end, x_steps.minor, tol),
        major_y: ticks_between(y_start, y_end, y_steps.major, tol),
        minor_y: ticks_between(y_start, y_end, y_steps.minor, tol),
    })
}
