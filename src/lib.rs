// src/lib.rs
//! Plot-item preparation and ECG grid calibration for multi-channel
//! physiological records.
//!
//! [`plotting::build_figure`] validates a record, its annotations and the
//! [`PlotOptions`], then produces a [`plotting::Figure`]: one panel per channel
//! with signal traces, annotation overlays and calibrated grid lines. Any
//! [`render::RenderSurface`] can draw it; the crate ships a PNG surface and a
//! native viewer window.
pub mod config;
pub mod plotting;
pub mod render;
pub mod types;
pub use config::PlotOptions;
pub use plotting::{build_figure, plot_annotation, plot_directory, plot_record, PlotError};
pub use types::{FigureSize, GridChannels, TimeUnits};
