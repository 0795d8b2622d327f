// src/config.rs
//! Plot options and their JSON form.
//!
//! The JSON form is loosely typed on purpose (a style may be one string or a
//! list, the grid selector may be `"all"` or a list), so each field is decoded
//! by hand and reported with its own typed failure.
use serde::Deserialize;
use serde_json::Value;
use crate::plotting::rounding::GridTolerance;
use crate::plotting::styles::{StyleSpec, ANNOTATION_STYLE_FALLBACK, SIGNAL_STYLE_FALLBACK};
use crate::plotting::PlotError;
use crate::types::{FigureSize, GridChannels, TimeUnits};

#[derive(Clone, Debug, PartialEq)]
pub struct PlotOptions {
    pub title: Option<String>,
    pub time_units: TimeUnits,
    pub sig_style: StyleSpec,
    pub ann_style: StyleSpec,
    /// Draw each annotation's symbol next to its marker.
    pub plot_ann_sym: bool,
    pub figsize: Option<FigureSize>,
    pub ecg_grids: GridChannels,
    pub grid_tolerance: GridTolerance,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: None,
            time_units: TimeUnits::Samples,
            sig_style: StyleSpec::Uniform(SIGNAL_STYLE_FALLBACK.to_owned()),
            ann_style: StyleSpec::Uniform(ANNOTATION_STYLE_FALLBACK.to_owned()),
            plot_ann_sym: false,
            figsize: None,
            ecg_grids: GridChannels::default(),
            grid_tolerance: GridTolerance::default(),
        }
    }
}

impl PlotOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_time_units(mut self, time_units: TimeUnits) -> Self {
        self.time_units = time_units;
        self
    }

    pub fn with_sig_style(mut self, style: impl Into<StyleSpec>) -> Self {
        self.sig_style = style.into();
        self
    }

    pub fn with_ann_style(mut self, style: impl Into<StyleSpec>) -> Self {
        self.ann_style = style.into();
        self
    }

    pub fn with_ann_symbols(mut self, enabled: bool) -> Self {
        self.plot_ann_sym = enabled;
        self
    }

    pub fn with_figsize(mut self, width: u32, height: u32) -> Self {
        self.figsize = Some(FigureSize::new(width, height));
        self
    }

    pub fn with_ecg_grids(mut self, grids: GridChannels) -> Self {
        self.ecg_grids = grids;
        self
    }

    pub fn with_grid_tolerance(mut self, tolerance: GridTolerance) -> Self {
        self.grid_tolerance = tolerance;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, PlotError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(&value)
    }

    /// Absent keys keep their defaults; unknown keys are ignored.
    pub fn from_json_value(value: &Value) -> Result<Self, PlotError> {
        let raw = RawPlotOptions::deserialize(value)
            .map_err(|_| PlotError::wrong_type("options", "a JSON object"))?;
        let mut options = PlotOptions::default();
        match raw.title {
            None | Some(Value::Null) => {}
            Some(Value::String(title)) => options.title = Some(title),
            Some(_) => return Err(PlotError::wrong_type("title", "a string")),
        }
        if let Some(units) = raw.time_units {
            let token = units
                .as_str()
                .ok_or_else(|| PlotError::wrong_type("time_units", "a string"))?;
            options.time_units = token.parse()?;
        }
        if let Some(style) = raw.sig_style {
            options.sig_style = StyleSpec::from_json("sig_style", &style)?;
        }
        if let Some(style) = raw.ann_style {
            options.ann_style = StyleSpec::from_json("ann_style", &style)?;
        }
        if let Some(flag) = raw.plot_ann_sym {
            options.plot_ann_sym = flag
                .as_bool()
                .ok_or_else(|| PlotError::wrong_type("plot_ann_sym", "a boolean"))?;
        }
        if let Some(size) = raw.figsize {
            options.figsize = figsize_from_json(&size)?;
        }
        if let Some(grids) = raw.ecg_grids {
            options.ecg_grids = grid_channels_from_json(&grids)?;
        }
        if let Some(eps) = raw.grid_epsilon {
            let eps = eps
                .as_f64()
                .ok_or_else(|| PlotError::wrong_type("grid_epsilon", "a number"))?;
            options.grid_tolerance = GridTolerance::new(eps)?;
        }
        Ok(options)
    }
}

#[derive(Deserialize)]
struct RawPlotOptions {
    title: Option<Value>,
    time_units: Option<Value>,
    sig_style: Option<Value>,
    ann_style: Option<Value>,
    plot_ann_sym: Option<Value>,
    figsize: Option<Value>,
    ecg_grids: Option<Value>,
    grid_epsilon: Option<Value>,
}

fn figsize_from_json(value: &Value) -> Result<Option<FigureSize>, PlotError> {
    if value.is_null() {
        return Ok(None);
    }
    let dims: Option<Vec<u32>> = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
            .collect()
    });
    match dims.as_deref() {
        Some(&[width, height]) if width > 0 && height > 0 => Ok(Some(FigureSize::new(width, height))),
        _ => Err(PlotError::wrong_type("figsize", "[width, height] in pixels")),
    }
}

fn grid_channels_from_json(value: &Value) -> Result<GridChannels, PlotError> {
    match value {
        Value::String(s) if s == "all" => Ok(GridChannels::All),
        Value::String(s) => Err(PlotError::invalid_option("ecg_grids", s.as_str(), "\"all\" or a list of channel indices")),
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_u64()
                    .map(|i| i as usize)
                    .ok_or_else(|| PlotError::wrong_type("ecg_grids", "channel indices"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(GridChannels::Channels),
        _ => Err(PlotError::wrong_type("ecg_grids", "\"all\" or a list of channel indices")),
    }
}
