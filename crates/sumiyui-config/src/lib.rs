use anyhow::Context;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no explicit config path is given.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/sumiyui.toml", "../../configs/sumiyui.toml"];

/// `utc_offset` may be written as hours (`9.0`) or as text (`"+09:00"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UtcOffsetValue {
    Hours(f64),
    Text(String),
}

impl fmt::Display for UtcOffsetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtcOffsetValue::Hours(h) => write!(f, "{}", h),
            UtcOffsetValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BirthDefaults {
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: UtcOffsetValue,
}

fn default_date() -> String {
    "1980-01-01".to_string()
}

fn default_time() -> String {
    "12:00".to_string()
}

fn default_latitude() -> f64 {
    35.6895
}

fn default_longitude() -> f64 {
    139.6917
}

fn default_utc_offset() -> UtcOffsetValue {
    UtcOffsetValue::Hours(9.0)
}

impl Default for BirthDefaults {
    fn default() -> Self {
        Self {
            date: default_date(),
            time: default_time(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            utc_offset: default_utc_offset(),
        }
    }
}

/// One `[[axes]]` entry; point names are resolved by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisEntry {
    pub a: String,
    pub b: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SumiyuiSettings {
    pub symbol_table: PathBuf,
    pub ephemeris_path: Option<PathBuf>,
    pub export_file: PathBuf,
    pub defaults: BirthDefaults,
    /// Replaces the built-in axis table when present
    pub axes: Option<Vec<AxisEntry>>,
    /// File the settings were read from, if any
    pub loaded_from: Option<PathBuf>,
}

impl Default for SumiyuiSettings {
    fn default() -> Self {
        Self {
            symbol_table: PathBuf::from("sabian.csv"),
            ephemeris_path: None,
            export_file: PathBuf::from("sumiyui_all_data.csv"),
            defaults: BirthDefaults::default(),
            axes: None,
            loaded_from: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    symbol_table: Option<PathBuf>,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    export_file: Option<PathBuf>,
    #[serde(default)]
    defaults: Option<BirthDefaults>,
    #[serde(default)]
    axes: Option<Vec<AxisEntry>>,
}

/// Parse settings from TOML text. Relative paths are resolved against `base_dir`.
pub fn parse_settings(text: &str, base_dir: Option<&Path>) -> anyhow::Result<SumiyuiSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse sumiyui config: {e}"))?;
    let RootConfigToml {
        symbol_table,
        ephemeris_path,
        export_file,
        defaults,
        axes,
    } = root;

    if let Some(entries) = &axes {
        for (i, entry) in entries.iter().enumerate() {
            if entry.meaning.trim().is_empty() {
                anyhow::bail!("axes[{}] ({} / {}) has an empty meaning", i, entry.a, entry.b);
            }
        }
    }

    let resolve = |p: PathBuf| match base_dir {
        Some(dir) if p.is_relative() => dir.join(p),
        _ => p,
    };
    let fallback = SumiyuiSettings::default();

    Ok(SumiyuiSettings {
        symbol_table: symbol_table.map(resolve).unwrap_or(fallback.symbol_table),
        ephemeris_path: ephemeris_path.map(resolve),
        export_file: export_file.unwrap_or(fallback.export_file),
        defaults: defaults.unwrap_or_default(),
        axes,
        loaded_from: None,
    })
}

/// Load settings from an explicit file. A missing or malformed file is an error.
pub fn load_settings_from(path: &Path) -> anyhow::Result<SumiyuiSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    let mut settings = parse_settings(&text, path.parent())
        .with_context(|| format!("Invalid config {}", path.display()))?;
    settings.loaded_from = Some(path.to_path_buf());
    log::info!("Loaded config from {}", path.display());
    Ok(settings)
}

/// Try the common relative paths for `configs/sumiyui.toml`; built-in
/// defaults apply when none exists. A file that exists but does not parse
/// is still an error.
pub fn load_settings() -> anyhow::Result<SumiyuiSettings> {
    for p in &CONFIG_SEARCH_PATHS {
        let path = Path::new(p);
        if path.is_file() {
            return load_settings_from(path);
        }
    }
    log::info!(
        "No config found at {:?}; using built-in defaults",
        CONFIG_SEARCH_PATHS
    );
    Ok(SumiyuiSettings::default())
}
