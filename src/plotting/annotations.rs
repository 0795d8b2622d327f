use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::plotting::time_axis::TimeBase;
use crate::plotting::PlotError;
/// Event locations (sample indices) with optional per-event symbols.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSeries {
    pub sample: Vec<usize>,
    #[serde(default)]
    pub symbol: Option<Vec<String>>,
    #[serde(default)]
    pub fs: Option<f64>,
}
impl AnnotationSeries {
    pub fn new(sample: Vec<usize>) -> Self {
        Self {
            sample,
            ..Default::default()
        }
    }
    pub fn with_symbols(mut self, symbol: Vec<String>) -> Self {
        self.symbol = Some(symbol);
        self
    }
    pub fn with_fs(mut self, fs: f64) -> Self {
        self.fs = Some(fs);
        self
    }
    pub fn check_symbols(&self, field: &str) -> Result<(), PlotError> {
        match &self.symbol {
            Some(symbols) if symbols.len() != self.sample.len() => Err(
                PlotError::length_mismatch(field, self.sample.len(), symbols.len()),
            ),
            _ => Ok(()),
        }
    }
}
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationItem {
    Series(AnnotationSeries),
    Samples(Vec<usize>),
}
impl AnnotationItem {
    pub fn samples(&self) -> &[usize] {
        match self {
            AnnotationItem::Series(series) => &series.sample,
            AnnotationItem::Samples(samples) => samples,
        }
    }
    pub fn symbols(&self) -> Option<&[String]> {
        match self {
            AnnotationItem::Series(series) => series.symbol.as_deref(),
            AnnotationItem::Samples(_) => None,
        }
    }
}
impl From<AnnotationSeries> for AnnotationItem {
    fn from(value: AnnotationSeries) -> Self {
        AnnotationItem::Series(value)
    }
}
impl From<Vec<usize>> for AnnotationItem {
    fn from(value: Vec<usize>) -> Self {
        AnnotationItem::Samples(value)
    }
}
/// What a caller may pass as the annotation argument of a record plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnnotationInput {
    #[default]
    Absent,
    /// Overlaid on channel 0.
    Single(AnnotationItem),
    /// Entry `i` is overlaid on channel `i`.
    PerChannel(Vec<Option<AnnotationItem>>),
}
impl AnnotationInput {
    pub fn single(item: impl Into<AnnotationItem>) -> Self {
        AnnotationInput::Single(item.into())
    }
    /// Decodes the loosely typed form found in record files: `null`, an index
    /// array, a series object, or a list mixing those.
    pub fn from_json(value: &Value) -> Result<Self, PlotError> {
        match value {
            Value::Null => Ok(AnnotationInput::Absent),
            Value::Object(_) => Ok(AnnotationInput::Single(series_from_json(value)?.into())),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_number) => {
                Ok(AnnotationInput::Single(AnnotationItem::Samples(indices_from_json(items)?)))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok(None),
                    Value::Object(_) => Ok(Some(series_from_json(item)?.into())),
                    Value::Array(inner) => Ok(Some(AnnotationItem::Samples(indices_from_json(inner)?))),
                    _ => Err(annotation_type_error()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(AnnotationInput::PerChannel),
            _ => Err(annotation_type_error()),
        }
    }
}
fn annotation_type_error() -> PlotError {
    PlotError::wrong_type(
        "annotation",
        "an annotation series, an index array, null, or a list of these",
    )
}
fn series_from_json(value: &Value) -> Result<AnnotationSeries, PlotError> {
    AnnotationSeries::deserialize(value).map_err(|_| annotation_type_error())
}
fn indices_from_json(items: &[Value]) -> Result<Vec<usize>, PlotError> {
    items
        .iter()
        .map(|v| {
            v.as_u64()
                .map(|i| i as usize)
                .ok_or_else(|| PlotError::wrong_type("annotation", "non-negative integer sample indices"))
        })
        .collect()
}
/// One channel's overlay after alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedAnnotation {
    /// Unscaled sample indices, in input order.
    pub samples: Vec<usize>,
    /// Indices mapped onto the signal's time base.
    pub times: Vec<f64>,
    pub symbols: Option<Vec<String>>,
}
/// Spreads `input` over `n_channels` slots; `None` marks a channel without overlay.
pub fn align_items(
    input: &AnnotationInput,
    n_channels: usize,
) -> Result<Vec<Option<AnnotationItem>>, PlotError> {
    let mut slots: Vec<Option<AnnotationItem>> = vec![None; n_channels];
    match input {
        AnnotationInput::Absent => {}
        AnnotationInput::Single(item) => {
            if let Some(first) = slots.first_mut() {
                *first = Some(item.clone());
            }
        }
        AnnotationInput::PerChannel(items) => {
            if items.len() > n_channels {
                return Err(PlotError::length_mismatch("annotation", n_channels, items.len()));
            }
            for (slot, item) in slots.iter_mut().zip(items) {
                *slot = item.clone();
            }
        }
    }
    Ok(slots)
}
/// Aligns annotations to channels and maps them onto `base`.
///
/// Every index must address one of the `sig_len` signal rows, and symbol lists
/// must pair 1:1 with their indices.
pub fn align_annotations(
    input: &AnnotationInput,
    n_channels: usize,
    sig_len: usize,
    base: &TimeBase,
) -> Result<Vec<Option<AlignedAnnotation>>, PlotError> {
    let slots = align_items(input, n_channels)?;
    slots
        .into_iter()
        .enumerate()
        .map(|(channel, slot)| {
            let Some(item) = slot else {
                return Ok(None);
            };
            if let AnnotationItem::Series(series) = &item {
                series.check_symbols(&format!("annotation[{channel}].symbol"))?;
            }
            if let Some(&sample) = item.samples().iter().find(|&&s| s >= sig_len) {
                return Err(PlotError::SampleOutOfRange {
                    channel,
                    sample,
                    len: sig_len,
                });
            }
            Ok(Some(AlignedAnnotation {
                samples: item.samples().to_vec(),
                times: base.scale_indices(item.samples()),
                symbols: item.symbols().map(<[String]>::to_vec),
            }))
        })
        .collect()
}
