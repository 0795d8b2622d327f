use eframe::egui;
use egui::Color32;
use egui_plot::{Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points};
use log::info;
use crate::plotting::{Figure, PlotError, TraceStyle, Viewport};
use crate::render::fmt::{self, FormatSpec, LineKind, Marker, GRID_MAJOR_COLOR, GRID_MINOR_COLOR};
use crate::render::RenderSurface;
/// Shows figures in a native window; `render` returns once it is closed.
#[derive(Clone, Debug)]
pub struct ViewerSurface {
    pub width: f32,
    pub panel_height: f32,
}
impl Default for ViewerSurface {
    fn default() -> Self {
        Self {
            width: 1000.0,
            panel_height: 260.0,
        }
    }
}
impl ViewerSurface {
    pub fn window_size(&self, figure: &Figure) -> [f32; 2] {
        match figure.size {
            Some(size) => [size.width as f32, size.height as f32],
            None => [self.width, self.panel_height * figure.panels.len().max(1) as f32 + 40.0],
        }
    }
}
impl RenderSurface for ViewerSurface {
    type Output = ();
    fn render(&mut self, figure: &Figure) -> Result<(), PlotError> {
        let panels = prepare(figure)?;
        let title = figure.title().unwrap_or("ecgstrip").to_owned();
        let viewport = egui::ViewportBuilder::default()
            .with_inner_size(self.window_size(figure))
            .with_title(title.clone());
        let options = eframe::NativeOptions {
            viewport,
            ..Default::default()
        };
        info!("opening viewer for '{title}'");
        let app = FigureApp { title: figure.title().map(str::to_owned), panels };
        eframe::run_native(&title, options, Box::new(|_cc| Box::new(app)))
            .map_err(|e| PlotError::Render(e.to_string()))
    }
}
/// One decoded draw call, in z-order.
#[derive(Clone, Debug, PartialEq)]
enum Layer {
    Line {
        points: Vec<[f64; 2]>,
        color: Color32,
        style: LineStyle,
    },
    Markers {
        points: Vec<[f64; 2]>,
        color: Color32,
        shape: MarkerShape,
    },
    Label {
        text: String,
        at: [f64; 2],
    },
}
#[derive(Clone, Debug, PartialEq)]
struct PanelView {
    id: usize,
    viewport: Viewport,
    x_label: String,
    y_label: Option<String>,
    layers: Vec<Layer>,
}
// Decodes every style token up front so a bad token fails before a window opens.
fn prepare(figure: &Figure) -> Result<Vec<PanelView>, PlotError> {
    if figure.panels.is_empty() {
        return Err(PlotError::Render("figure has no panels".into()));
    }
    figure
        .panels
        .iter()
        .enumerate()
        .map(|(id, panel)| -> Result<PanelView, PlotError> {
            let mut layers = Vec::new();
            for trace in panel.layers() {
                let points: Vec<[f64; 2]> = trace.points.iter().map(|&(x, y)| [x, y]).collect();
                match &trace.style {
                    TraceStyle::GridMinor => layers.push(Layer::Line {
                        points,
                        color: color(GRID_MINOR_COLOR),
                        style: LineStyle::Solid,
                    }),
                    TraceStyle::GridMajor => layers.push(Layer::Line {
                        points,
                        color: color(GRID_MAJOR_COLOR),
                        style: LineStyle::Solid,
                    }),
                    TraceStyle::Format(token) => {
                        let spec = FormatSpec::parse(token)?;
                        let rgb = color(spec.color_or(panel.channel));
                        if let Some(kind) = spec.line_kind() {
                            layers.push(Layer::Line {
                                points: points.clone(),
                                color: rgb,
                                style: line_style(kind),
                            });
                        }
                        if let Some(marker) = spec.marker {
                            layers.push(Layer::Markers {
                                points,
                                color: rgb,
                                shape: marker_shape(marker),
                            });
                        }
                    }
                }
            }
            layers.extend(panel.marks.iter().map(|mark| Layer::Label {
                text: mark.text.clone(),
                at: [mark.at.0, mark.at.1],
            }));
            Ok(PanelView {
                id,
                viewport: panel.viewport,
                x_label: panel.x_label.clone(),
                y_label: panel.y_label.clone(),
                layers,
            })
        })
        .collect()
}
fn line_style(kind: LineKind) -> LineStyle {
    match kind {
        LineKind::Solid => LineStyle::Solid,
        LineKind::Dashed => LineStyle::Dashed { length: 8.0 },
        LineKind::DashDot => LineStyle::Dashed { length: 12.0 },
        LineKind::Dotted => LineStyle::Dotted { spacing: 4.0 },
    }
}
fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Point | Marker::Circle => MarkerShape::Circle,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::TriangleDown => MarkerShape::Down,
        Marker::Square => MarkerShape::Square,
        Marker::Star => MarkerShape::Asterisk,
        Marker::Diamond => MarkerShape::Diamond,
        Marker::Plus | Marker::VLine | Marker::HLine => MarkerShape::Plus,
        Marker::Cross => MarkerShape::Cross,
    }
}
fn color([r, g, b]: fmt::Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}
struct FigureApp {
    title: Option<String>,
    panels: Vec<PanelView>,
}
impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(title) = &self.title {
                ui.vertical_centered(|ui| ui.heading(title));
            }
            let height = (ui.available_height() / self.panels.len() as f32 - 8.0).max(60.0);
            for panel in &self.panels {
                let Viewport { x, y } = panel.viewport;
                let mut plot = Plot::new(format!("panel-{}", panel.id))
                    .height(height)
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .show_grid(false)
                    .x_axis_label(panel.x_label.clone());
                if let Some(label) = &panel.y_label {
                    plot = plot.y_axis_label(label.clone());
                }
                plot.show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x.0, y.0], [x.1, y.1]));
                    for layer in &panel.layers {
                        match layer {
                            Layer::Line { points, color, style } => plot_ui.line(
                                Line::new(PlotPoints::new(points.clone())).color(*color).style(*style),
                            ),
                            Layer::Markers { points, color, shape } => plot_ui.points(
                                Points::new(PlotPoints::new(points.clone()))
                                    .color(*color)
                                    .shape(*shape)
                                    .radius(3.0)
                                    .filled(true),
                            ),
                            Layer::Label { text, at } => plot_ui.text(egui_plot::Text::new(
                                PlotPoint::new(at[0], at[1]),
                                text.clone(),
                            )),
                        }
                    }
                });
            }
        });
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotOptions;
    use crate::plotting::{build_figure, AnnotationInput, AnnotationSeries, Record};
    use crate::types::GridChannels;
    use ndarray::Array2;
    fn figure(options: &PlotOptions) -> Figure {
        let record = Record::new("v", Array2::from_shape_fn((300, 1), |(i, _)| (i as f64 * 0.1).cos()))
            .with_fs(100.0)
            .with_units([Some("mV")]);
        let annotation = AnnotationInput::single(
            AnnotationSeries::new(vec![3, 50]).with_symbols(vec!["N".into(), "A".into()]),
        );
        build_figure(&record, &annotation, options).unwrap()
    }
    #[test]
    fn layers_follow_z_order() {
        let options = PlotOptions::default()
            .with_ecg_grids(GridChannels::All)
            .with_ann_symbols(true)
            .with_time_units(crate::types::TimeUnits::Seconds);
        let panels = prepare(&figure(&options)).unwrap();
        let layers = &panels[0].layers;
        let first_signal = layers
            .iter()
            .position(|l| matches!(l, Layer::Line { color, .. } if *color == color_of(fmt::PALETTE[0])))
            .unwrap();
        assert!(layers[..first_signal].iter().all(|l| matches!(
            l,
            Layer::Line { color, .. } if *color == color_of(GRID_MINOR_COLOR) || *color == color_of(GRID_MAJOR_COLOR)
        )));
        assert!(matches!(layers[first_signal + 1], Layer::Markers { shape: MarkerShape::Asterisk, .. }));
        assert!(matches!(layers.last(), Some(Layer::Label { text, .. }) if text == "A"));
    }
    #[test]
    fn bad_token_fails_before_the_window() {
        let err = prepare(&figure(&PlotOptions::default().with_ann_style("r?"))).unwrap_err();
        assert!(matches!(err, PlotError::InvalidOption { .. }));
        assert!(matches!(prepare(&Figure::default()), Err(PlotError::Render(_))));
    }
    #[test]
    fn window_grows_with_panels() {
        let surface = ViewerSurface::default();
        let fig = figure(&PlotOptions::default());
        assert_eq!(surface.window_size(&fig), [1000.0, 300.0]);
        let sized = figure(&PlotOptions::default().with_figsize(640, 480));
        assert_eq!(surface.window_size(&sized), [640.0, 480.0]);
    }
    fn color_of(rgb: fmt::Rgb) -> Color32 {
        color(rgb)
    }
}
