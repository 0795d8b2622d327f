//! Matplotlib-style format strings (`"r*"`, `"b--"`, `"ko-"`).
//!
//! A token is any mix of at most one color letter, one marker and one line
//! style. Without a marker a solid line is implied; with a marker only, no
//! line is drawn.
use crate::plotting::PlotError;
pub type Rgb = [u8; 3];
/// Default color cycle, used when a token carries no color letter.
pub const PALETTE: [Rgb; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];
pub const GRID_MINOR_COLOR: Rgb = [0xed, 0xed, 0xed];
pub const GRID_MAJOR_COLOR: Rgb = [0xba, 0xba, 0xba];
const ALLOWED: &str = "color letters bgrcmykw, markers .,ov^<>sp*hHDd+xX|_, line styles - -- -. :";
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Point,
    Circle,
    TriangleUp,
    TriangleDown,
    Square,
    Star,
    Diamond,
    Plus,
    Cross,
    VLine,
    HLine,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub color: Option<Rgb>,
    pub marker: Option<Marker>,
    pub line: Option<LineKind>,
}
impl FormatSpec {
    pub fn parse(token: &str) -> Result<Self, PlotError> {
        let bad = || PlotError::invalid_option("style", token, ALLOWED);
        let mut spec = FormatSpec::default();
        let mut rest = token;
        while !rest.is_empty() {
            if let Some((kind, len)) = line_prefix(rest) {
                if spec.line.replace(kind).is_some() {
                    return Err(bad());
                }
                rest = &rest[len..];
                continue;
            }
            let mut chars = rest.chars();
            let c = chars.next().ok_or_else(bad)?;
            if let Some(rgb) = color_letter(c) {
                if spec.color.replace(rgb).is_some() {
                    return Err(bad());
                }
            } else if let Some(marker) = marker_char(c) {
                if spec.marker.replace(marker).is_some() {
                    return Err(bad());
                }
            } else {
                return Err(bad());
            }
            rest = chars.as_str();
        }
        Ok(spec)
    }
    pub fn line_kind(&self) -> Option<LineKind> {
        match (self.line, self.marker) {
            (Some(kind), _) => Some(kind),
            (None, None) => Some(LineKind::Solid),
            (None, Some(_)) => None,
        }
    }
    pub fn color_or(&self, channel: usize) -> Rgb {
        self.color.unwrap_or(PALETTE[channel % PALETTE.len()])
    }
}
fn line_prefix(s: &str) -> Option<(LineKind, usize)> {
    if s.starts_with("--") {
        Some((LineKind::Dashed, 2))
    } else if s.starts_with("-.") {
        Some((LineKind::DashDot, 2))
    } else if s.starts_with('-') {
        Some((LineKind::Solid, 1))
    } else if s.starts_with(':') {
        Some((LineKind::Dotted, 1))
    } else {
        None
    }
}
fn color_letter(c: char) -> Option<Rgb> {
    Some(match c {
        'b' => [0, 0, 255],
        'g' => [0, 128, 0],
        'r' => [255, 0, 0],
        'c' => [0, 191, 191],
        'm' => [191, 0, 191],
        'y' => [191, 191, 0],
        'k' => [0, 0, 0],
        'w' => [255, 255, 255],
        _ => return None,
    })
}
fn marker_char(c: char) -> Option<Marker> {
    Some(match c {
        '.' | ',' => Marker::Point,
        'o' | 'h' | 'H' => Marker::Circle,
        '^' | '>' => Marker::TriangleUp,
        'v' | '<' => Marker::TriangleDown,
        's' | 'p' => Marker::Square,
        '*' => Marker::Star,
        'D' | 'd' => Marker::Diamond,
        '+' => Marker::Plus,
        'x' | 'X' => Marker::Cross,
        '|' => Marker::VLine,
        '_' => Marker::HLine,
        _ => return None,
    })
}
