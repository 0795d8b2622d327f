// src/render/mod.rs
// Surfaces that turn a finished draw plan into pixels.
pub mod bitmap;
pub mod fmt;
pub mod viewer;
pub use bitmap::BitmapSurface;
pub use fmt::{FormatSpec, LineKind, Marker};
pub use viewer::ViewerSurface;
use crate::plotting::{Figure, PlotError};
/// Something that can draw a [`Figure`].
///
/// Surfaces draw traces in z-order, clip to each panel's viewport and decode
/// `TraceStyle::Format` tokens with [`FormatSpec::parse`].
pub trait RenderSurface {
    type Output;
    fn render(&mut self, figure: &Figure) -> Result<Self::Output, PlotError>;
}
