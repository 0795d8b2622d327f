// src/types.rs
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::plotting::PlotError;

// Unit of the horizontal axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnits {
    #[default]
    Samples,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnits {
    pub const ALL: [TimeUnits; 4] = [
        TimeUnits::Samples,
        TimeUnits::Seconds,
        TimeUnits::Minutes,
        TimeUnits::Hours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnits::Samples => "samples",
            TimeUnits::Seconds => "seconds",
            TimeUnits::Minutes => "minutes",
            TimeUnits::Hours => "hours",
        }
    }

    /// Horizontal axis caption, e.g. `index/sample` or `time/second`.
    pub fn axis_label(&self) -> String {
        match self {
            TimeUnits::Samples => "index/sample".to_owned(),
            other => {
                let plural = other.as_str();
                format!("time/{}", &plural[..plural.len() - 1])
            }
        }
    }

    /// Length of one unit in seconds; `None` for sample indices.
    pub fn seconds_per_unit(&self) -> Option<f64> {
        match self {
            TimeUnits::Samples => None,
            TimeUnits::Seconds => Some(1.0),
            TimeUnits::Minutes => Some(60.0),
            TimeUnits::Hours => Some(3600.0),
        }
    }
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnits {
    type Err = PlotError;

    // Exact tokens only, no abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnits::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = TimeUnits::ALL.iter().map(|u| u.as_str()).collect();
                PlotError::invalid_option("time_units", s, allowed.join(", "))
            })
    }
}

// Channels that get an ECG grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridChannels {
    All,
    Channels(Vec<usize>),
}

impl Default for GridChannels {
    fn default() -> Self {
        GridChannels::Channels(Vec::new())
    }
}

impl GridChannels {
    pub fn contains(&self, channel: usize) -> bool {
        match self {
            GridChannels::All => true,
            GridChannels::Channels(list) => list.contains(&channel),
        }
    }
}

// Canvas size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
