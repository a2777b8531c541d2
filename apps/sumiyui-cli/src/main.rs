mod render;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use sumiyui::export::{write_axes_csv, write_midpoints_csv, write_natal_csv};
use sumiyui::{AxisTable, ChartError, ChartPipeline, Point, SwissEphemerisAdapter, SymbolTable};
use sumiyui_config::{load_settings, load_settings_from, AxisEntry, SumiyuiSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned text tables.
    Text,
    /// The full chart report as pretty-printed JSON.
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportTable {
    /// Every halfsum with its axis meaning.
    Midpoints,
    /// One row per natal point.
    Natal,
    /// Only halfsums on a named axis.
    Axes,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal halfsums with sabian symbols")]
struct Args {
    /// Birth date, YYYY-MM-DD (default from config).
    #[arg(long)]
    date: Option<String>,

    /// Local birth time, HH:MM or HH:MM:SS (default from config).
    #[arg(long)]
    time: Option<String>,

    /// Geographic latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Geographic longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Hours east of UTC: 9, -3.5 or +09:00.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Config file (otherwise configs/sumiyui.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sabian symbol table override.
    #[arg(long)]
    symbols: Option<PathBuf>,

    /// Fail instead of falling back to placeholder symbols.
    #[arg(long, default_value_t = false)]
    require_symbols: bool,

    /// Swiss Ephemeris data directory override.
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also print the full halfsum table (text format only).
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Write a CSV export after a successful run.
    #[arg(long, value_enum)]
    export: Option<ExportTable>,

    /// Export destination (default from config).
    #[arg(long)]
    export_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };

    let symbol_path = args
        .symbols
        .clone()
        .unwrap_or_else(|| settings.symbol_table.clone());
    let symbols = if args.require_symbols {
        SymbolTable::load(&symbol_path)
            .map_err(ChartError::from)
            .with_context(|| format!("Failed to load symbol table {}", symbol_path.display()))?
    } else {
        SymbolTable::load_or_placeholder(&symbol_path)
    };

    let axes = match &settings.axes {
        Some(entries) => axis_table_from_config(entries)?,
        None => AxisTable::standard(),
    };

    let ephemeris_path = args
        .ephemeris_path
        .clone()
        .or_else(|| settings.ephemeris_path.clone());
    let ephemeris = SwissEphemerisAdapter::new(ephemeris_path)
        .map_err(ChartError::from)
        .context("Failed to initialise Swiss Ephemeris")?;

    let request = BirthRequest::resolve(&args, &settings);
    log::debug!("Chart request: {:?}", request);

    let pipeline = ChartPipeline::new(&ephemeris, &symbols, &axes);
    let report = pipeline
        .run_text(
            &request.date,
            &request.time,
            request.lat,
            request.lon,
            &request.utc_offset,
        )
        .context("Chart calculation failed")?;

    match args.format {
        Format::Text => {
            print!("{}", render::natal_table(&report.natal)?);
            println!();
            print!("{}", render::axis_table(&report.important)?);
            if args.all {
                println!();
                print!("{}", render::midpoint_table(&report.midpoints)?);
            }
        }
        Format::Json => {
            let json = report
                .to_json_pretty()
                .context("Failed to serialize chart report")?;
            println!("{}", json);
        }
    }

    if let Some(table) = args.export {
        let path = args
            .export_file
            .clone()
            .unwrap_or_else(|| settings.export_file.clone());
        let file = File::create(&path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        let writer = BufWriter::new(file);
        let written = match table {
            ExportTable::Midpoints => write_midpoints_csv(&report.midpoints, writer),
            ExportTable::Natal => write_natal_csv(&report.natal, writer),
            ExportTable::Axes => write_axes_csv(&report.important, writer),
        };
        written.with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Exported {:?} table to {}", table, path.display());
    }

    Ok(())
}

/// Birth data as text, command line first, then config defaults.
#[derive(Debug)]
struct BirthRequest {
    date: String,
    time: String,
    lat: f64,
    lon: f64,
    utc_offset: String,
}

impl BirthRequest {
    fn resolve(args: &Args, settings: &SumiyuiSettings) -> Self {
        let d = &settings.defaults;
        Self {
            date: args.date.clone().unwrap_or_else(|| d.date.clone()),
            time: args.time.clone().unwrap_or_else(|| d.time.clone()),
            lat: args.lat.unwrap_or(d.latitude),
            lon: args.lon.unwrap_or(d.longitude),
            utc_offset: args
                .utc_offset
                .clone()
                .unwrap_or_else(|| d.utc_offset.to_string()),
        }
    }
}

fn axis_table_from_config(entries: &[AxisEntry]) -> anyhow::Result<AxisTable> {
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let a: Point = entry
            .a
            .parse()
            .with_context(|| format!("Invalid axis point {:?}", entry.a))?;
        let b: Point = entry
            .b
            .parse()
            .with_context(|| format!("Invalid axis point {:?}", entry.b))?;
        parsed.push((a, b, entry.meaning.clone()));
    }
    let table = AxisTable::from_entries(parsed);
    log::info!("Using {} configured axes", table.len());
    Ok(table)
}
