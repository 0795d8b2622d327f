// src/plotting/mod.rs
// Plot-item preparation: validation, time axes, ECG grid calibration and the
// per-channel draw plan handed to a render surface.
pub mod annotations;
pub mod batch;
pub mod compose;
pub mod error;
pub mod figure;
pub mod grid;
pub mod rounding;
pub mod source;
pub mod styles;
pub mod time_axis;
pub mod validate;
pub use annotations::{AnnotationInput, AnnotationItem, AnnotationSeries};
pub use batch::{list_records, plot_directory};
pub use compose::{build_annotation_figure, build_figure, plot_annotation, plot_record};
pub use error::PlotError;
pub use figure::{Figure, Panel, TextMark, Trace, TraceStyle, Viewport, ZOrder};
pub use grid::{calc_ecg_grids, GridRequest, GridTicks};
pub use rounding::GridTolerance;
pub use source::{JsonSupplier, ManualSupplier, Record, RecordBundle, RecordSupplier};
pub use styles::StyleSpec;
pub use time_axis::{convert, TimeBase};
pub use validate::{validate_plot_items, ValidatedPlot};
