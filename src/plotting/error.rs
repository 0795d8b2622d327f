use thiserror::Error;
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid signal shape: {0}")]
    Shape(String),
    #[error("length mismatch for '{field}': expected {expected}, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid value {value:?} for '{field}'; allowed: {allowed}")]
    InvalidOption {
        field: String,
        value: String,
        allowed: String,
    },
    #[error("'{0}' needs a valid positive sampling frequency")]
    MissingFrequency(String),
    #[error("wrong type for '{field}': expected {expected}")]
    Type { field: String, expected: String },
    #[error("annotation sample {sample} on channel {channel} is outside the signal (length {len})")]
    SampleOutOfRange {
        channel: usize,
        sample: usize,
        len: usize,
    },
    #[error("record source failed: {0}")]
    Source(String),
    #[error("failed to render plot: {0}")]
    Render(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
impl PlotError {
    pub(crate) fn length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        PlotError::LengthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
    pub(crate) fn wrong_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        PlotError::Type {
            field: field.into(),
            expected: expected.into(),
        }
    }
    pub(crate) fn invalid_option(
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        PlotError::InvalidOption {
            field: field.into(),
            value: value.into(),
            allowed: allowed.into(),
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Render(value.to_string())
    }
}
impl From<ndarray::ShapeError> for PlotError {
    fn from(value: ndarray::ShapeError) -> Self {
        PlotError::Shape(value.to_string())
    }
}
