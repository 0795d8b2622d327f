use std::fs;
use std::io;
use std::path::Path;
use log::{info, warn};
use crate::config::PlotOptions;
use crate::plotting::compose::plot_record;
use crate::plotting::source::RecordSupplier;
use crate::plotting::PlotError;
use crate::render::RenderSurface;
/// Extension of the header files that mark a record in a directory.
pub const HEADER_EXTENSION: &str = "hea";
/// Record names in `dir`: every `*.hea` file without its extension, sorted.
pub fn list_records(dir: &Path) -> Result<Vec<String>, PlotError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(HEADER_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_owned());
        }
    }
    names.sort();
    Ok(names)
}
pub fn record_title(record_name: &str) -> String {
    format!("Record: {record_name}")
}
/// Plots every record of `dir` in name order.
///
/// Each record is titled `Record: <name>`; `after_each` receives the surface
/// output and acts as the pause between records. The first failure stops the
/// walk. Returns the number of records plotted.
pub fn plot_directory<R, S, F>(
    dir: &Path,
    supplier: &mut R,
    surface: &mut S,
    options: &PlotOptions,
    mut after_each: F,
) -> Result<usize, PlotError>
where
    R: RecordSupplier + ?Sized,
    S: RenderSurface,
    F: FnMut(&str, S::Output) -> io::Result<()>,
{
    let names = list_records(dir)?;
    if names.is_empty() {
        warn!("no .{HEADER_EXTENSION} records in {}", dir.display());
    }
    for name in &names {
        let bundle = supplier.load(dir, name)?;
        let options = options.clone().with_title(record_title(name));
        let output = plot_record(&bundle.record, &bundle.annotation, &options, surface)?;
        after_each(name, output)?;
    }
    info!("plotted {} records from {}", names.len(), dir.display());
    Ok(names.len())
}
