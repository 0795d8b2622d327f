use crate::types::FigureSize;
/// Fraction of the data span added on each side when fitting a viewport.
pub const AUTO_MARGIN: f64 = 0.05;
/// Drawing order inside a panel; lower values are drawn first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZOrder {
    GridMinor = 1,
    GridMajor = 2,
    Signal = 3,
    Annotation = 4,
    Text = 5,
}
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceStyle {
    /// Caller-supplied format token, passed through to the surface untouched.
    Format(String),
    GridMinor,
    GridMajor,
}
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub points: Vec<(f64, f64)>,
    pub style: TraceStyle,
    pub z: ZOrder,
}
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    pub text: String,
    pub at: (f64, f64),
}
/// Visible data window of one panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: (f64, f64),
    pub y: (f64, f64),
}
impl Viewport {
    /// Data limits padded by [`AUTO_MARGIN`]; non-finite points are skipped
    /// and a degenerate span is widened so the window never collapses.
    pub fn fit<'a>(points: impl IntoIterator<Item = &'a (f64, f64)>) -> Self {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for &(px, py) in points {
            if !px.is_finite() || !py.is_finite() {
                continue;
            }
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
        if x.0 > x.1 {
            return Self {
                x: (0.0, 1.0),
                y: (0.0, 1.0),
            };
        }
        Self {
            x: pad(x),
            y: pad(y),
        }
    }
}
fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span > f64::EPSILON * hi.abs().max(lo.abs()).max(1.0) {
        (lo - span * AUTO_MARGIN, hi + span * AUTO_MARGIN)
    } else if lo == 0.0 {
        (-AUTO_MARGIN, AUTO_MARGIN)
    } else {
        (lo - lo.abs() * AUTO_MARGIN, hi + hi.abs() * AUTO_MARGIN)
    }
}
/// Draw plan for one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub channel: usize,
    /// Fitted from the data once; grid lines never move it.
    pub viewport: Viewport,
    pub traces: Vec<Trace>,
    pub marks: Vec<TextMark>,
    pub x_label: String,
    pub y_label: Option<String>,
    pub title: Option<String>,
}
impl Panel {
    /// Traces in drawing order, stable within one z level.
    pub fn layers(&self) -> Vec<&Trace> {
        let mut sorted: Vec<&Trace> = self.traces.iter().collect();
        sorted.sort_by_key(|t| t.z);
        sorted
    }
    pub fn traces_at(&self, z: ZOrder) -> impl Iterator<Item = &Trace> {
        self.traces.iter().filter(move |t| t.z == z)
    }
}
/// Everything a surface needs to draw one figure; panels are stacked top to
/// bottom in channel order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Figure {
    pub size: Option<FigureSize>,
    pub panels: Vec<Panel>,
}
impl Figure {
    pub fn title(&self) -> Option<&str> {
        self.panels.first().and_then(|p| p.title.as_deref())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fit_pads_by_five_percent() {
        let vp = Viewport::fit(&[(0.0, -1.0), (10.0, 1.0)]);
        assert_eq!(vp.x, (-0.5, 10.5));
        assert!((vp.y.0 + 1.1).abs() < 1e-12 && (vp.y.1 - 1.1).abs() < 1e-12);
    }
    #[test]
    fn flat_signal_still_gets_a_window() {
        let vp = Viewport::fit(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(vp.y.0 < 0.0 && vp.y.1 > 0.0);
        let vp = Viewport::fit(&[(0.0, 2.0), (1.0, 2.0)]);
        assert!((vp.y.0 - 1.9).abs() < 1e-12 && (vp.y.1 - 2.1).abs() < 1e-12);
    }
    #[test]
    fn non_finite_points_are_ignored() {
        let vp = Viewport::fit(&[(0.0, f64::NAN), (0.0, 1.0), (2.0, 3.0)]);
        assert!((vp.x.0 + 0.1).abs() < 1e-12 && (vp.x.1 - 2.1).abs() < 1e-12);
        let empty = Viewport::fit(std::iter::empty());
        assert_eq!(empty.x, (0.0, 1.0));
    }
    #[test]
    fn layers_sort_by_z() {
        let trace = |z| Trace {
            points: vec![],
            style: TraceStyle::GridMajor,
            z,
        };
        let panel = Panel {
            channel: 0,
            viewport: Viewport::fit(std::iter::empty()),
            traces: vec![trace(ZOrder::Annotation), trace(ZOrder::GridMinor), trace(ZOrder::Signal)],
            marks: vec![],
            x_label: String::new(),
            y_label: None,
            title: None,
        };
        let order: Vec<ZOrder> = panel.layers().iter().map(|t| t.z).collect();
        assert_eq!(order, [ZOrder::GridMinor, ZOrder::Signal, ZOrder::Annotation]);
    }
}
