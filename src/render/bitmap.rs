use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::debug;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::plotting::{Figure, Panel, PlotError, TraceStyle, Viewport};
use crate::render::fmt::{self, FormatSpec, LineKind, Marker, GRID_MAJOR_COLOR, GRID_MINOR_COLOR};
use crate::render::RenderSurface;
type PanelChart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
const MARKER_SIZE: i32 = 4;
/// Largest bitmap the surface will allocate, in pixels.
pub const MAX_PIXELS: usize = 1 << 26;
/// Renders figures to PNG bytes.
#[derive(Clone, Debug)]
pub struct BitmapSurface {
    /// Used when the figure carries no size of its own.
    pub width: u32,
    pub panel_height: u32,
    pub background: RGBColor,
}
impl Default for BitmapSurface {
    fn default() -> Self {
        Self {
            width: 900,
            panel_height: 250,
            background: WHITE,
        }
    }
}
impl BitmapSurface {
    pub fn size_for(&self, figure: &Figure) -> (u32, u32) {
        match figure.size {
            Some(size) => (size.width, size.height),
            None => {
                let panels = u32::try_from(figure.panels.len().max(1)).unwrap_or(u32::MAX);
                (self.width, self.panel_height.saturating_mul(panels))
            }
        }
    }
}
impl RenderSurface for BitmapSurface {
    type Output = Vec<u8>;
    fn render(&mut self, figure: &Figure) -> Result<Vec<u8>, PlotError> {
        if figure.panels.is_empty() {
            return Err(PlotError::Render("figure has no panels".into()));
        }
        let (width, height) = self.size_for(figure);
        let mut buffer = vec![0u8; rgb_buffer_len(width, height)?];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&self.background)?;
            let areas = root.split_evenly((figure.panels.len(), 1));
            for (panel, area) in figure.panels.iter().zip(&areas) {
                draw_panel(area, panel)?;
            }
            root.present()?;
        }
        debug!("rendered {width}x{height} bitmap with {} panels", figure.panels.len());
        encode_png(&buffer, width, height)
    }
}
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize, PlotError> {
    let pixels = (width as usize).checked_mul(height as usize);
    match pixels {
        Some(n) if n > 0 && n <= MAX_PIXELS => Ok(n * 3),
        _ => Err(PlotError::Render(format!(
            "figure size {width}x{height} is outside 1..={MAX_PIXELS} pixels"
        ))),
    }
}
fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &Panel) -> Result<(), PlotError> {
    let Viewport { x, y } = panel.viewport;
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", 20));
    }
    let mut chart = builder.build_cartesian_2d(x.0..x.1, y.0..y.1)?;
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh().x_desc(panel.x_label.as_str());
        if let Some(label) = &panel.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }
    for trace in panel.layers() {
        match &trace.style {
            TraceStyle::GridMinor | TraceStyle::GridMajor => {
                let rgb = if trace.style == TraceStyle::GridMinor {
                    GRID_MINOR_COLOR
                } else {
                    GRID_MAJOR_COLOR
                };
                if let Some(segment) = clip_axis_line(&trace.points, &panel.viewport) {
                    chart.draw_series(LineSeries::new(segment, color(rgb).stroke_width(1)))?;
                }
            }
            TraceStyle::Format(token) => {
                let spec = FormatSpec::parse(token)?;
                let rgb = color(spec.color_or(panel.channel));
                let points = trace.points.iter().copied();
                match spec.line_kind() {
                    Some(LineKind::Solid) => {
                        chart.draw_series(LineSeries::new(points, rgb.stroke_width(1)))?;
                    }
                    Some(LineKind::Dashed) => {
                        chart.draw_series(DashedLineSeries::new(points, 6, 4, rgb.stroke_width(1)))?;
                    }
                    Some(LineKind::DashDot) => {
                        chart.draw_series(DashedLineSeries::new(points, 8, 3, rgb.stroke_width(1)))?;
                    }
                    Some(LineKind::Dotted) => {
                        chart.draw_series(DashedLineSeries::new(points, 1, 3, rgb.stroke_width(1)))?;
                    }
                    None => {}
                }
                if let Some(marker) = spec.marker {
                    draw_markers(&mut chart, &trace.points, marker, rgb)?;
                }
            }
        }
    }
    chart.draw_series(
        panel
            .marks
            .iter()
            .map(|mark| Text::new(mark.text.clone(), mark.at, ("sans-serif", 12))),
    )?;
    Ok(())
}
fn draw_markers(
    chart: &mut PanelChart<'_, '_>,
    points: &[(f64, f64)],
    marker: Marker,
    rgb: RGBColor,
) -> Result<(), PlotError> {
    let s = MARKER_SIZE;
    let stroke = rgb.stroke_width(1);
    let fill = rgb.filled();
    let at = points.iter().copied();
    match marker {
        Marker::Point => chart.draw_series(at.map(|p| Circle::new(p, 2, fill)))?,
        Marker::Circle => chart.draw_series(at.map(|p| Circle::new(p, s, fill)))?,
        Marker::TriangleUp => chart.draw_series(at.map(|p| TriangleMarker::new(p, s + 1, fill)))?,
        Marker::TriangleDown => chart.draw_series(at.map(|p| {
            EmptyElement::at(p) + Polygon::new(vec![(-s, -s), (s, -s), (0, s)], fill)
        }))?,
        Marker::Square => chart.draw_series(at.map(|p| {
            EmptyElement::at(p) + Rectangle::new([(-s, -s), (s, s)], fill)
        }))?,
        Marker::Diamond => chart.draw_series(at.map(|p| {
            EmptyElement::at(p) + Polygon::new(vec![(0, -s), (s, 0), (0, s), (-s, 0)], fill)
        }))?,
        Marker::Cross => chart.draw_series(at.map(|p| Cross::new(p, s, stroke)))?,
        Marker::Plus => chart.draw_series(at.map(|p| {
            EmptyElement::at(p)
                + PathElement::new(vec![(-s, 0), (s, 0)], stroke)
                + PathElement::new(vec![(0, -s), (0, s)], stroke)
        }))?,
        Marker::Star => chart.draw_series(at.map(|p| {
            EmptyElement::at(p)
                + Cross::new((0, 0), s, stroke)
                + PathElement::new(vec![(-s, 0), (s, 0)], stroke)
                + PathElement::new(vec![(0, -s), (0, s)], stroke)
        }))?,
        Marker::VLine => chart.draw_series(at.map(|p| {
            EmptyElement::at(p) + PathElement::new(vec![(0, -s), (0, s)], stroke)
        }))?,
        Marker::HLine => chart.draw_series(at.map(|p| {
            EmptyElement::at(p) + PathElement::new(vec![(-s, 0), (s, 0)], stroke)
        }))?,
    };
    Ok(())
}
/// Clamps an axis-parallel grid line to the viewport; `None` when it lies
/// outside.
fn clip_axis_line(points: &[(f64, f64)], vp: &Viewport) -> Option<Vec<(f64, f64)>> {
    let (&(ax, ay), &(bx, by)) = (points.first()?, points.last()?);
    let inside = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi;
    let clamp = |v: f64, (lo, hi): (f64, f64)| v.clamp(lo, hi);
    if ax == bx {
        inside(ax, vp.x).then(|| vec![(ax, clamp(ay, vp.y)), (bx, clamp(by, vp.y))])
    } else if ay == by {
        inside(ay, vp.y).then(|| vec![(clamp(ax, vp.x), ay), (clamp(bx, vp.x), by)])
    } else {
        Some(points.to_vec())
    }
}
fn color([r, g, b]: fmt::Rgb) -> RGBColor {
    RGBColor(r, g, b)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PlotError::Render("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
