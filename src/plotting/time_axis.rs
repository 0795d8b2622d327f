use crate::plotting::PlotError;
use crate::types::TimeUnits;
/// Time unit plus the number of samples in one unit of it.
///
/// Built through [`TimeBase::new`], which refuses time units other than
/// samples without a finite positive frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeBase {
    units: TimeUnits,
    fs: Option<f64>,
    samples_per_unit: f64,
}
impl TimeBase {
    pub fn new(units: TimeUnits, fs: Option<f64>) -> Result<Self, PlotError> {
        let fs = fs.filter(|f| is_valid_frequency(*f));
        let samples_per_unit = match units.seconds_per_unit() {
            None => 1.0,
            Some(seconds) => {
                let fs = fs.ok_or_else(|| PlotError::MissingFrequency(format!("time_units = {units}")))?;
                fs * seconds
            }
        };
        Ok(Self {
            units,
            fs,
            samples_per_unit,
        })
    }
    pub fn samples() -> Self {
        Self {
            units: TimeUnits::Samples,
            fs: None,
            samples_per_unit: 1.0,
        }
    }
    pub fn units(&self) -> TimeUnits {
        self.units
    }
    pub fn fs(&self) -> Option<f64> {
        self.fs
    }
    /// Maps one (possibly fractional) sample index onto this base.
    pub fn to_time(&self, sample: f64) -> f64 {
        sample / self.samples_per_unit
    }
    pub fn samples_per_unit(&self) -> f64 {
        self.samples_per_unit
    }
    /// Scales a list of sample indices with the same rule as the signal axis.
    pub fn scale_indices(&self, indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| self.to_time(i as f64)).collect()
    }
}
pub fn is_valid_frequency(fs: f64) -> bool {
    fs.is_finite() && fs > 0.0
}
/// Horizontal axis for `sample_count` samples: `0..sample_count` scaled to `base`.
pub fn time_axis(sample_count: usize, base: &TimeBase) -> Vec<f64> {
    (0..sample_count).map(|i| base.to_time(i as f64)).collect()
}
/// Convenience wrapper validating `fs` on the way in.
pub fn convert(sample_count: usize, fs: Option<f64>, units: TimeUnits) -> Result<Vec<f64>, PlotError> {
    let base = TimeBase::new(units, fs)?;
    Ok(time_axis(sample_count, &base))
}
