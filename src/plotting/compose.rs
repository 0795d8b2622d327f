use log::{debug, info};
use crate::config::PlotOptions;
use crate::plotting::annotations::{AnnotationInput, AnnotationSeries};
use crate::plotting::figure::{Figure, Panel, TextMark, Trace, TraceStyle, Viewport, ZOrder};
use crate::plotting::grid::{calc_ecg_grids, GridRequest, GridTicks};
use crate::plotting::source::Record;
use crate::plotting::validate::{validate_annotation_plot, validate_plot_items};
use crate::plotting::PlotError;
use crate::render::RenderSurface;
use crate::types::TimeUnits;
/// Style used for stand-alone annotation plots.
pub const ANNOTATION_ONLY_STYLE: &str = "r+";
/// Builds the complete draw plan for a record: one panel per channel, with
/// annotation overlays and ECG grids where requested.
///
/// Nothing is handed to a surface here, so an error leaves no partial plot.
pub fn build_figure(
    record: &Record,
    annotation: &AnnotationInput,
    options: &PlotOptions,
) -> Result<Figure, PlotError> {
    let plan = validate_plot_items(record, options, annotation)?;
    let x_label = options.time_units.axis_label();
    let mut panels = Vec::with_capacity(plan.channels.len());
    for (ch, meta) in plan.channels.iter().enumerate() {
        let column = record.signal.column(ch);
        let signal: Vec<(f64, f64)> = plan.time.iter().copied().zip(column.iter().copied()).collect();
        let mut traces = vec![Trace {
            points: signal,
            style: TraceStyle::Format(plan.sig_styles[ch].clone()),
            z: ZOrder::Signal,
        }];
        let mut marks = Vec::new();
        if let Some(ann) = &plan.annotations[ch] {
            let overlay: Vec<(f64, f64)> = ann
                .times
                .iter()
                .zip(&ann.samples)
                .map(|(&t, &s)| (t, column[s]))
                .collect();
            if options.plot_ann_sym {
                if let Some(symbols) = &ann.symbols {
                    marks.extend(symbols.iter().zip(&overlay).map(|(text, &at)| TextMark {
                        text: text.clone(),
                        at,
                    }));
                }
            }
            traces.push(Trace {
                points: overlay,
                style: TraceStyle::Format(plan.ann_styles[ch].clone()),
                z: ZOrder::Annotation,
            });
        }
        let viewport = Viewport::fit(traces.iter().flat_map(|t| t.points.iter()));
        if plan.grid[ch] {
            let request = GridRequest {
                min_sig: viewport.y.0,
                max_sig: viewport.y.1,
                units: &meta.unit,
                fs: record.fs,
                max_time: viewport.x.1,
                time_units: options.time_units,
            };
            let ticks = calc_ecg_grids(&request, options.grid_tolerance).map_err(|err| match err {
                PlotError::InvalidOption { value, allowed, .. } => PlotError::InvalidOption {
                    field: format!("units[{ch}]"),
                    value,
                    allowed,
                },
                other => other,
            })?;
            debug!(
                "channel {ch}: ecg grid with {} major x / {} major y ticks",
                ticks.major_x.len(),
                ticks.major_y.len()
            );
            traces.extend(grid_traces(&ticks));
        }
        panels.push(Panel {
            channel: ch,
            viewport,
            traces,
            marks,
            x_label: x_label.clone(),
            y_label: Some(meta.axis_label()),
            title: if ch == 0 { options.title.clone() } else { None },
        });
    }
    Ok(Figure {
        size: options.figsize,
        panels,
    })
}
/// Validates, builds and hands the record's figure to `surface`.
pub fn plot_record<S: RenderSurface>(
    record: &Record,
    annotation: &AnnotationInput,
    options: &PlotOptions,
    surface: &mut S,
) -> Result<S::Output, PlotError> {
    let figure = build_figure(record, annotation, options)?;
    info!(
        "plotting record '{}' ({} channels, {} samples)",
        record.record_name,
        record.n_sig(),
        record.sig_len()
    );
    surface.render(&figure)
}
/// Draw plan for the event locations of a single annotation series at y = 0.
pub fn build_annotation_figure(
    series: &AnnotationSeries,
    title: Option<&str>,
    time_units: TimeUnits,
) -> Result<Figure, PlotError> {
    let (_, times) = validate_annotation_plot(series, time_units)?;
    let points: Vec<(f64, f64)> = times.into_iter().map(|t| (t, 0.0)).collect();
    let viewport = Viewport::fit(&points);
    Ok(Figure {
        size: None,
        panels: vec![Panel {
            channel: 0,
            viewport,
            traces: vec![Trace {
                points,
                style: TraceStyle::Format(ANNOTATION_ONLY_STYLE.to_owned()),
                z: ZOrder::Annotation,
            }],
            marks: Vec::new(),
            x_label: time_units.axis_label(),
            y_label: None,
            title: title.map(str::to_owned),
        }],
    })
}
pub fn plot_annotation<S: RenderSurface>(
    series: &AnnotationSeries,
    title: Option<&str>,
    time_units: TimeUnits,
    surface: &mut S,
) -> Result<S::Output, PlotError> {
    let figure = build_annotation_figure(series, title, time_units)?;
    info!("plotting {} annotation locations", series.sample.len());
    surface.render(&figure)
}
// Vertical lines span the minor y extent, horizontal lines the minor x extent.
fn grid_traces(ticks: &GridTicks) -> Vec<Trace> {
    let Some(((x0, x1), (y0, y1))) = ticks.extent() else {
        return Vec::new();
    };
    let vertical = |x: f64, style: TraceStyle, z: ZOrder| Trace {
        points: vec![(x, y0), (x, y1)],
        style,
        z,
    };
    let horizontal = |y: f64, style: TraceStyle, z: ZOrder| Trace {
        points: vec![(x0, y), (x1, y)],
        style,
        z,
    };
    let mut out = Vec::with_capacity(
        ticks.minor_x.len() + ticks.major_x.len() + ticks.minor_y.len() + ticks.major_y.len(),
    );
    out.extend(ticks.minor_x.iter().map(|&x| vertical(x, TraceStyle::GridMinor, ZOrder::GridMinor)));
    out.extend(ticks.major_x.iter().map(|&x| vertical(x, TraceStyle::GridMajor, ZOrder::GridMajor)));
    out.extend(ticks.minor_y.iter().map(|&y| horizontal(y, TraceStyle::GridMinor, ZOrder::GridMinor)));
    out.extend(ticks.major_y.iter().map(|&y| horizontal(y, TraceStyle::GridMajor, ZOrder::GridMajor)));
    out
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::annotations::AnnotationItem;
    use crate::types::GridChannels;
    use ndarray::Array2;
    fn ramp_record(n_samples: usize, n_sig: usize) -> Record {
        let signal = Array2::from_shape_fn((n_samples, n_sig), |(i, ch)| {
            ((i as f64) * 0.01).sin() * (ch as f64 + 1.0)
        });
        Record::new("ramp", signal)
            .with_fs(250.0)
            .with_units(vec![Some("mV"); n_sig])
    }
    #[test]
    fn one_panel_per_channel_with_labels() {
        let options = PlotOptions::default()
            .with_title("Record 100")
            .with_time_units(TimeUnits::Seconds);
        let fig = build_figure(&ramp_record(500, 3), &AnnotationInput::Absent, &options).unwrap();
        assert_eq!(fig.panels.len(), 3);
        assert_eq!(fig.title(), Some("Record 100"));
        assert!(fig.panels[1..].iter().all(|p| p.title.is_none()));
        assert_eq!(fig.panels[0].x_label, "time/second");
        assert_eq!(fig.panels[2].y_label.as_deref(), Some("ch3/mV"));
    }
    #[test]
    fn overlay_reads_signal_at_unscaled_indices() {
        let record = ramp_record(400, 2);
        let input = AnnotationInput::PerChannel(vec![None, Some(AnnotationItem::Samples(vec![10, 300]))]);
        let options = PlotOptions::default().with_time_units(TimeUnits::Seconds);
        let fig = build_figure(&record, &input, &options).unwrap();
        assert_eq!(fig.panels[0].traces_at(ZOrder::Annotation).count(), 0);
        let overlay = fig.panels[1].traces_at(ZOrder::Annotation).next().unwrap();
        assert_eq!(overlay.style, TraceStyle::Format("r*".into()));
        assert!((overlay.points[1].0 - 1.2).abs() < 1e-12);
        assert_eq!(overlay.points[1].1, record.signal[[300, 1]]);
    }
    #[test]
    fn symbols_are_marked_only_on_request() {
        let series = AnnotationSeries::new(vec![5, 6]).with_symbols(vec!["N".into(), "V".into()]);
        let input = AnnotationInput::single(series);
        let record = ramp_record(10, 1);
        let plain = build_figure(&record, &input, &PlotOptions::default()).unwrap();
        assert!(plain.panels[0].marks.is_empty());
        let marked = build_figure(&record, &input, &PlotOptions::default().with_ann_symbols(true)).unwrap();
        let texts: Vec<&str> = marked.panels[0].marks.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["N", "V"]);
        assert_eq!(marked.panels[0].marks[1].at, (6.0, record.signal[[6, 0]]));
    }
    #[test]
    fn grid_does_not_move_the_viewport() {
        let record = ramp_record(1000, 2);
        let options = PlotOptions::default().with_time_units(TimeUnits::Seconds);
        let without = build_figure(&record, &AnnotationInput::Absent, &options).unwrap();
        let with = build_figure(
            &record,
            &AnnotationInput::Absent,
            &options.clone().with_ecg_grids(GridChannels::Channels(vec![0])),
        )
        .unwrap();
        assert_eq!(without.panels[0].viewport, with.panels[0].viewport);
        assert!(with.panels[0].traces_at(ZOrder::GridMajor).count() > 0);
        assert_eq!(with.panels[1].traces_at(ZOrder::GridMinor).count(), 0);
    }
    #[test]
    fn grid_lines_cover_the_viewport() {
        let record = ramp_record(1000, 1);
        let options = PlotOptions::default()
            .with_time_units(TimeUnits::Seconds)
            .with_ecg_grids(GridChannels::All);
        let fig = build_figure(&record, &AnnotationInput::Absent, &options).unwrap();
        let panel = &fig.panels[0];
        let ys: Vec<f64> = panel
            .traces_at(ZOrder::GridMajor)
            .filter(|t| t.points[0].1 == t.points[1].1)
            .map(|t| t.points[0].1)
            .collect();
        let lo = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(lo <= panel.viewport.y.0 && hi >= panel.viewport.y.1);
    }
    #[test]
    fn unknown_grid_unit_names_the_channel() {
        let record = ramp_record(100, 2).with_units([Some("mV"), Some("XYZ")]);
        let options = PlotOptions::default().with_ecg_grids(GridChannels::All);
        let err = build_figure(&record, &AnnotationInput::Absent, &options).unwrap_err();
        assert!(matches!(err, PlotError::InvalidOption { ref field, .. } if field == "units[1]"));
    }
    #[test]
    fn annotation_figure_places_events_on_zero() {
        let series = AnnotationSeries::new(vec![360, 720]).with_fs(360.0);
        let fig = build_annotation_figure(&series, Some("beats"), TimeUnits::Seconds).unwrap();
        let trace = &fig.panels[0].traces[0];
        assert_eq!(trace.points, vec![(1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(trace.style, TraceStyle::Format(ANNOTATION_ONLY_STYLE.into()));
        assert_eq!(fig.panels[0].y_label, None);
        assert_eq!(fig.title(), Some("beats"));
    }
}
