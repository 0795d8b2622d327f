use crate::config::PlotOptions;
use crate::plotting::annotations::{align_annotations, AlignedAnnotation, AnnotationInput, AnnotationSeries};
use crate::plotting::source::Record;
use crate::plotting::styles::{expand_styles, ANNOTATION_STYLE_FALLBACK, SIGNAL_STYLE_FALLBACK};
use crate::plotting::time_axis::{time_axis, TimeBase};
use crate::plotting::PlotError;
use crate::types::{GridChannels, TimeUnits};
/// Unit label used when a channel has none.
pub const NO_UNITS: &str = "NU";
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMeta {
    pub name: String,
    pub unit: String,
}
impl ChannelMeta {
    /// Amplitude axis caption, `<name>/<unit>`.
    pub fn axis_label(&self) -> String {
        format!("{}/{}", self.name, self.unit)
    }
}
/// Everything a record plot needs, normalized to one entry per channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedPlot {
    pub time_base: TimeBase,
    pub time: Vec<f64>,
    pub channels: Vec<ChannelMeta>,
    pub sig_styles: Vec<String>,
    pub ann_styles: Vec<String>,
    pub annotations: Vec<Option<AlignedAnnotation>>,
    pub grid: Vec<bool>,
}
/// Checks a record plot request and returns normalized copies of its parts.
///
/// The record is never modified; defaults for missing names and units exist
/// only in the returned [`ChannelMeta`] list.
pub fn validate_plot_items(
    record: &Record,
    options: &PlotOptions,
    annotation: &AnnotationInput,
) -> Result<ValidatedPlot, PlotError> {
    let n_sig = record.n_sig();
    if n_sig == 0 {
        return Err(PlotError::Shape(format!(
            "record '{}' has no signal channels",
            record.record_name
        )));
    }
    let time_base = TimeBase::new(options.time_units, record.fs)?;
    let time = time_axis(record.sig_len(), &time_base);
    let units = normalize_units(record.units.as_deref(), n_sig)?;
    let names = normalize_names(record.sig_name.as_deref(), n_sig)?;
    let channels = names
        .into_iter()
        .zip(units)
        .map(|(name, unit)| ChannelMeta { name, unit })
        .collect();
    options.sig_style.check("sig_style", n_sig)?;
    options.ann_style.check("ann_style", n_sig)?;
    let grid = grid_mask(&options.ecg_grids, n_sig)?;
    let annotations = align_annotations(annotation, n_sig, record.sig_len(), &time_base)?;
    Ok(ValidatedPlot {
        time_base,
        time,
        channels,
        sig_styles: expand_styles(&options.sig_style, n_sig, SIGNAL_STYLE_FALLBACK),
        ann_styles: expand_styles(&options.ann_style, n_sig, ANNOTATION_STYLE_FALLBACK),
        annotations,
        grid,
    })
}
/// Fills missing unit labels with [`NO_UNITS`].
pub fn normalize_units(units: Option<&[Option<String>]>, n_sig: usize) -> Result<Vec<String>, PlotError> {
    fill_defaults("units", units, n_sig, |_| NO_UNITS.to_owned())
}
/// Fills missing channel names with `ch1`, `ch2`, ...
pub fn normalize_names(names: Option<&[Option<String>]>, n_sig: usize) -> Result<Vec<String>, PlotError> {
    fill_defaults("sig_name", names, n_sig, |ch| format!("ch{}", ch + 1))
}
fn fill_defaults(
    field: &str,
    given: Option<&[Option<String>]>,
    n_sig: usize,
    default: impl Fn(usize) -> String,
) -> Result<Vec<String>, PlotError> {
    match given {
        None => Ok((0..n_sig).map(default).collect()),
        Some(list) if list.len() != n_sig => Err(PlotError::length_mismatch(field, n_sig, list.len())),
        Some(list) => Ok(list
            .iter()
            .enumerate()
            .map(|(ch, v)| v.clone().unwrap_or_else(|| default(ch)))
            .collect()),
    }
}
fn grid_mask(grids: &GridChannels, n_sig: usize) -> Result<Vec<bool>, PlotError> {
    if let GridChannels::Channels(list) = grids {
        if let Some(bad) = list.iter().find(|&&ch| ch >= n_sig) {
            return Err(PlotError::invalid_option(
                "ecg_grids",
                bad.to_string(),
                format!("channel indices below {n_sig}"),
            ));
        }
    }
    Ok((0..n_sig).map(|ch| grids.contains(ch)).collect())
}
/// Checks a stand-alone annotation plot and returns the time base and the
/// scaled event locations.
pub fn validate_annotation_plot(
    series: &AnnotationSeries,
    time_units: TimeUnits,
) -> Result<(TimeBase, Vec<f64>), PlotError> {
    series.check_symbols("annotation.symbol")?;
    let base = TimeBase::new(time_units, series.fs).map_err(|_| {
        PlotError::MissingFrequency(format!("annotation.fs (time_units = {time_units})"))
    })?;
    let times = base.scale_indices(&series.sample);
    Ok((base, times))
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::styles::StyleSpec;
    use ndarray::Array2;
    fn record(n_sig: usize) -> Record {
        Record::new("t", Array2::zeros((100, n_sig))).with_fs(250.0)
    }
    #[test]
    fn missing_metadata_gets_defaults() {
        let v = validate_plot_items(&record(3), &PlotOptions::default(), &AnnotationInput::Absent).unwrap();
        let names: Vec<&str> = v.channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["ch1", "ch2", "ch3"]);
        assert!(v.channels.iter().all(|c| c.unit == NO_UNITS));
        assert_eq!(v.time.len(), 100);
    }
    #[test]
    fn partial_lists_are_filled_without_touching_the_record() {
        let rec = record(2)
            .with_units([Some("mV"), None])
            .with_sig_names([None, Some("V5")]);
        let v = validate_plot_items(&rec, &PlotOptions::default(), &AnnotationInput::Absent).unwrap();
        assert_eq!(
            v.channels,
            vec![
                ChannelMeta { name: "ch1".into(), unit: "mV".into() },
                ChannelMeta { name: "V5".into(), unit: NO_UNITS.into() },
            ]
        );
        assert_eq!(rec.units, Some(vec![Some("mV".to_owned()), None]));
    }
    #[test]
    fn normalization_is_idempotent() {
        let given = vec![Some("uV".to_owned()), None];
        let once = normalize_units(Some(given.as_slice()), 2).unwrap();
        let again: Vec<Option<String>> = once.iter().cloned().map(Some).collect();
        assert_eq!(normalize_units(Some(again.as_slice()), 2).unwrap(), once);
    }
    #[test]
    fn metadata_lists_must_match_channel_count() {
        let rec = record(2).with_units([Some("mV")]);
        let err = validate_plot_items(&rec, &PlotOptions::default(), &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { ref field, .. } if field == "units"));
        let rec = record(2).with_sig_names([Some("a"), Some("b"), Some("c")]);
        let err = validate_plot_items(&rec, &PlotOptions::default(), &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { ref field, .. } if field == "sig_name"));
    }
    #[test]
    fn time_units_need_frequency() {
        let mut rec = record(1);
        rec.fs = None;
        let options = PlotOptions::default().with_time_units(TimeUnits::Minutes);
        let err = validate_plot_items(&rec, &options, &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::MissingFrequency(_)));
        assert!(validate_plot_items(&rec, &PlotOptions::default(), &AnnotationInput::Absent).is_ok());
    }
    #[test]
    fn style_lists_longer_than_channels_fail() {
        let options = PlotOptions::default().with_ann_style(StyleSpec::from(vec!["r*", "b*", "g*"]));
        let err = validate_plot_items(&record(2), &options, &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { ref field, .. } if field == "ann_style"));
    }
    #[test]
    fn styles_are_expanded() {
        let options = PlotOptions::default().with_sig_style(vec!["b"]);
        let v = validate_plot_items(&record(3), &options, &AnnotationInput::Absent).unwrap();
        assert_eq!(v.sig_styles, vec!["b", "", ""]);
        assert_eq!(v.ann_styles, vec!["r*", "r*", "r*"]);
    }
    #[test]
    fn zero_channel_records_are_rejected() {
        let err = validate_plot_items(&record(0), &PlotOptions::default(), &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::Shape(_)));
    }
    #[test]
    fn grid_selection_is_checked() {
        let options = PlotOptions::default().with_ecg_grids(GridChannels::Channels(vec![1]));
        let v = validate_plot_items(&record(2), &options, &AnnotationInput::Absent).unwrap();
        assert_eq!(v.grid, vec![false, true]);
        let options = PlotOptions::default().with_ecg_grids(GridChannels::Channels(vec![2]));
        let err = validate_plot_items(&record(2), &options, &AnnotationInput::Absent).unwrap_err();
        assert!(matches!(err, PlotError::InvalidOption { .. }));
        let options = PlotOptions::default().with_ecg_grids(GridChannels::All);
        let v = validate_plot_items(&record(2), &options, &AnnotationInput::Absent).unwrap();
        assert_eq!(v.grid, vec![true, true]);
    }
    #[test]
    fn annotation_plot_needs_its_own_frequency() {
        let series = AnnotationSeries::new(vec![100, 200]);
        let (_, times) = validate_annotation_plot(&series, TimeUnits::Samples).unwrap();
        assert_eq!(times, vec![100.0, 200.0]);
        assert!(matches!(
            validate_annotation_plot(&series, TimeUnits::Seconds),
            Err(PlotError::MissingFrequency(_))
        ));
        let (_, times) = validate_annotation_plot(&series.with_fs(100.0), TimeUnits::Seconds).unwrap();
        assert_eq!(times, vec![1.0, 2.0]);
    }
}
