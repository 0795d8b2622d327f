use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use ndarray::Array2;
use serde::Deserialize;
use serde_json::Value;
use crate::plotting::annotations::AnnotationInput;
use crate::plotting::PlotError;
/// Multi-channel record as handed over by a record reader.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub record_name: String,
    /// samples x channels
    pub signal: Array2<f64>,
    pub fs: Option<f64>,
    pub sig_name: Option<Vec<Option<String>>>,
    pub units: Option<Vec<Option<String>>>,
}
impl Record {
    pub fn new(record_name: impl Into<String>, signal: Array2<f64>) -> Self {
        Self {
            record_name: record_name.into(),
            signal,
            fs: None,
            sig_name: None,
            units: None,
        }
    }
    /// Builds the signal matrix from rows of samples; ragged rows are a shape error.
    pub fn from_rows(record_name: impl Into<String>, rows: &[Vec<f64>]) -> Result<Self, PlotError> {
        let n_sig = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_sig) {
            return Err(PlotError::Shape(format!(
                "row {idx} has {} values, expected {n_sig}",
                row.len()
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let signal = Array2::from_shape_vec((rows.len(), n_sig), flat)?;
        Ok(Self::new(record_name, signal))
    }
    pub fn with_fs(mut self, fs: f64) -> Self {
        self.fs = Some(fs);
        self
    }
    pub fn with_sig_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = Option<S>>) -> Self {
        self.sig_name = Some(names.into_iter().map(|n| n.map(Into::into)).collect());
        self
    }
    pub fn with_units<S: Into<String>>(mut self, units: impl IntoIterator<Item = Option<S>>) -> Self {
        self.units = Some(units.into_iter().map(|u| u.map(Into::into)).collect());
        self
    }
    pub fn sig_len(&self) -> usize {
        self.signal.nrows()
    }
    pub fn n_sig(&self) -> usize {
        self.signal.ncols()
    }
}
/// A record together with whatever annotations should be overlaid on it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordBundle {
    pub record: Record,
    pub annotation: AnnotationInput,
}
/// Something that can produce records by name on demand.
pub trait RecordSupplier {
    fn load(&mut self, dir: &Path, record_name: &str) -> Result<RecordBundle, PlotError>;
}
/// In-memory supplier useful for tests and deterministic playback.
#[derive(Default)]
pub struct ManualSupplier {
    bundles: HashMap<String, RecordBundle>,
}
impl ManualSupplier {
    pub fn new(bundles: impl IntoIterator<Item = RecordBundle>) -> Self {
        Self {
            bundles: bundles
                .into_iter()
                .map(|b| (b.record.record_name.clone(), b))
                .collect(),
        }
    }
}
impl RecordSupplier for ManualSupplier {
    fn load(&mut self, _dir: &Path, record_name: &str) -> Result<RecordBundle, PlotError> {
        self.bundles
            .get(record_name)
            .cloned()
            .ok_or_else(|| PlotError::Source(format!("no record named '{record_name}'")))
    }
}
/// Reads `<dir>/<record>.json` documents.
///
/// ```json
/// { "fs": 360, "sig_name": ["MLII", "V5"], "units": ["mV", null],
///   "signal": [[-0.145, -0.065], [-0.145, -0.065]],
///   "annotation": { "sample": [18, 77], "symbol": ["+", "N"] } }
/// ```
#[derive(Clone, Debug, Default)]
pub struct JsonSupplier;
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    fs: Option<f64>,
    #[serde(default)]
    sig_name: Option<Vec<Option<String>>>,
    #[serde(default)]
    units: Option<Vec<Option<String>>>,
    signal: Value,
    #[serde(default)]
    annotation: Value,
}
impl JsonSupplier {
    pub fn path_for(dir: &Path, record_name: &str) -> PathBuf {
        dir.join(format!("{record_name}.json"))
    }
    pub fn parse(record_name: &str, text: &str) -> Result<RecordBundle, PlotError> {
        let raw: RawRecord = serde_json::from_str(text)?;
        let rows = signal_rows(&raw.signal)?;
        let mut record = Record::from_rows(record_name, &rows)?;
        record.fs = raw.fs;
        record.sig_name = raw.sig_name;
        record.units = raw.units;
        let annotation = AnnotationInput::from_json(&raw.annotation)?;
        Ok(RecordBundle { record, annotation })
    }
}
impl RecordSupplier for JsonSupplier {
    fn load(&mut self, dir: &Path, record_name: &str) -> Result<RecordBundle, PlotError> {
        let path = Self::path_for(dir, record_name);
        let text = fs::read_to_string(&path)
            .map_err(|e| PlotError::Source(format!("{}: {e}", path.display())))?;
        Self::parse(record_name, &text)
    }
}
fn signal_rows(value: &Value) -> Result<Vec<Vec<f64>>, PlotError> {
    let not_matrix = || PlotError::Shape("'signal' must be a list of numeric rows".into());
    value
        .as_array()
        .ok_or_else(not_matrix)?
        .iter()
        .map(|row| -> Result<Vec<f64>, PlotError> {
            row.as_array()
                .ok_or_else(not_matrix)?
                .iter()
                .map(|v| v.as_f64().ok_or_else(not_matrix))
                .collect()
        })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ragged_rows_are_a_shape_error() {
        let err = Record::from_rows("r", &[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PlotError::Shape(_)));
    }
    #[test]
    fn rows_become_samples_by_channels() {
        let record = Record::from_rows("r", &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!((record.sig_len(), record.n_sig()), (3, 2));
        assert_eq!(record.signal[[2, 1]], 6.0);
    }
    #[test]
    fn json_record_is_parsed() {
        let text = r#"{"fs": 360, "sig_name": ["MLII", null], "units": ["mV", "mV"],
                       "signal": [[0.1, 0.2], [0.3, 0.4]], "annotation": [1]}"#;
        let bundle = JsonSupplier::parse("100", text).unwrap();
        assert_eq!(bundle.record.record_name, "100");
        assert_eq!(bundle.record.fs, Some(360.0));
        assert_eq!(bundle.record.sig_name, Some(vec![Some("MLII".to_owned()), None]));
        assert_eq!(bundle.annotation, AnnotationInput::single(vec![1usize]));
    }
    #[test]
    fn missing_annotation_means_absent() {
        let bundle = JsonSupplier::parse("a", r#"{"signal": [[1.0]]}"#).unwrap();
        assert_eq!(bundle.annotation, AnnotationInput::Absent);
    }
    #[test]
    fn non_numeric_signal_is_a_shape_error() {
        for text in [r#"{"signal": [["a"]]}"#, r#"{"signal": [1, 2]}"#, r#"{"signal": "x"}"#] {
            assert!(matches!(JsonSupplier::parse("a", text), Err(PlotError::Shape(_))), "{text}");
        }
    }
    #[test]
    fn manual_supplier_serves_by_name() {
        let record = Record::from_rows("x1", &[vec![0.0]]).unwrap();
        let mut supplier = ManualSupplier::new([RecordBundle {
            record,
            annotation: AnnotationInput::Absent,
        }]);
        assert!(supplier.load(Path::new("."), "x1").is_ok());
        assert!(matches!(supplier.load(Path::new("."), "x2"), Err(PlotError::Source(_))));
    }
}
