// src/main.rs
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ecgstrip::plotting::{plot_directory, JsonSupplier};
use ecgstrip::render::{BitmapSurface, ViewerSurface};
use ecgstrip::PlotOptions;
#[derive(Debug, Parser)]
#[command(name = "ecgstrip", version, about = "Plot every record of a directory with ECG grids")]
struct Cli {
    /// Directory holding `<record>.hea` / `<record>.json` pairs
    dir: PathBuf,
    /// JSON file with plot options
    #[arg(long)]
    options: Option<PathBuf>,
    /// Write `<record>.png` files here instead of opening a window
    #[arg(long)]
    png: Option<PathBuf>,
}
fn load_options(path: Option<&Path>) -> Result<PlotOptions> {
    let Some(path) = path else {
        return Ok(PlotOptions::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    PlotOptions::from_json_str(&text).with_context(|| format!("parsing options in {}", path.display()))
}
fn pause(record: &str) -> io::Result<()> {
    print!("{record} done. Press enter to continue...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = load_options(cli.options.as_deref())?;
    let mut supplier = JsonSupplier;
    let plotted = match &cli.png {
        Some(out) => {
            fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
            let mut surface = BitmapSurface::default();
            plot_directory(&cli.dir, &mut supplier, &mut surface, &options, |name, png| {
                let path = out.join(format!("{name}.png"));
                fs::write(&path, png)?;
                info!("wrote {}", path.display());
                Ok(())
            })
        }
        None => {
            let mut surface = ViewerSurface::default();
            plot_directory(&cli.dir, &mut supplier, &mut surface, &options, |name, ()| pause(name))
        }
    }
    .with_context(|| format!("plotting records in {}", cli.dir.display()))?;
    println!("plotted {plotted} records");
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    fn cli(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ecgstrip").chain(args.iter().copied()))
    }
    #[test]
    fn flags_are_optional() {
        let parsed = cli(&["data", "--png", "out", "--options", "o.json"]).unwrap();
        assert_eq!(parsed.dir, PathBuf::from("data"));
        assert_eq!(parsed.options, Some(PathBuf::from("o.json")));
        assert_eq!(parsed.png, Some(PathBuf::from("out")));
        let bare = cli(&["data"]).unwrap();
        assert_eq!((bare.options, bare.png), (None, None));
    }
    #[test]
    fn bad_command_lines_are_rejected() {
        assert!(cli(&[]).is_err());
        assert!(cli(&["a", "b"]).is_err());
        assert!(cli(&["a", "--png"]).is_err());
        assert!(cli(&["a", "--svg", "x"]).is_err());
    }
    #[test]
    fn options_file_is_decoded_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.json");
        fs::write(&path, r#"{"time_units": "seconds", "ecg_grids": "all"}"#).unwrap();
        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.time_units, ecgstrip::TimeUnits::Seconds);
        fs::write(&path, r#"{"time_units": "sec"}"#).unwrap();
        let err = load_options(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("opts.json"));
        assert_eq!(load_options(None).unwrap(), PlotOptions::default());
    }
}
