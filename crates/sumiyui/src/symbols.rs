//! Sabian symbol lookup table.
//!
//! The table is read from a delimited file with `degree`, `symbol` and an
//! optional `meaning` column (header names are case-insensitive). Files are
//! decoded as UTF-8 (with or without BOM) first and Shift_JIS second.

use crate::degrees::SabianDegree;
use encoding_rs::{SHIFT_JIS, UTF_8};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that make a symbol table unavailable.
#[derive(Error, Debug)]
pub enum SymbolTableError {
    #[error("Symbol table not readable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Symbol table is neither UTF-8 nor Shift_JIS text")]
    Encoding,
    #[error("Symbol table is missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid symbol table row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },
    #[error("Malformed symbol table: {0}")]
    Csv(#[from] csv::Error),
}

/// Where the labels of a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolSource {
    /// Parsed from text in the named encoding.
    Parsed { encoding: &'static str },
    /// Synthesised `Degree {n} Symbol` labels.
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    labels: HashMap<SabianDegree, String>,
    source: SymbolSource,
}

/// Label used for any degree without a table entry.
pub fn placeholder_label(index: u16) -> String {
    format!("Degree {} Symbol", index)
}

/// `【symbol】 meaning`, or just `【symbol】` when there is no meaning.
pub fn format_label(symbol: &str, meaning: Option<&str>) -> String {
    match meaning.map(str::trim).filter(|m| !m.is_empty()) {
        Some(meaning) => format!("【{}】 {}", symbol.trim(), meaning),
        None => format!("【{}】", symbol.trim()),
    }
}

impl SymbolTable {
    /// Table with a synthesised label for every degree.
    pub fn placeholder() -> Self {
        let labels = SabianDegree::all()
            .map(|d| (d, placeholder_label(d.get())))
            .collect();
        Self {
            labels,
            source: SymbolSource::Placeholder,
        }
    }

    /// Read and parse the table at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SymbolTableError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SymbolTableError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse_bytes(&bytes)?;
        log::info!(
            "Loaded {} sabian symbols from {} ({:?})",
            table.len(),
            path.display(),
            table.source
        );
        Ok(table)
    }

    /// Load the table at `path`, substituting placeholders when it is unavailable.
    pub fn load_or_placeholder(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("{}; using placeholder symbols", e);
                Self::placeholder()
            }
        }
    }

    /// Decode raw file contents and parse them.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, SymbolTableError> {
        let (text, encoding) = decode_text(bytes)?;
        let mut table = Self::from_reader(text.as_bytes())?;
        table.source = SymbolSource::Parsed { encoding };
        Ok(table)
    }

    /// Parse already-decoded delimited text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SymbolTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let degree_col =
            column("degree").ok_or_else(|| SymbolTableError::MissingColumn("degree".into()))?;
        let symbol_col =
            column("symbol").ok_or_else(|| SymbolTableError::MissingColumn("symbol".into()))?;
        let meaning_col = column("meaning");

        let mut labels = HashMap::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw_degree = record.get(degree_col).unwrap_or("");
            let degree = parse_degree(raw_degree).ok_or_else(|| SymbolTableError::InvalidRow {
                line,
                message: format!("degree must be an integer in 1..=360, got {:?}", raw_degree),
            })?;
            let symbol = record.get(symbol_col).unwrap_or("");
            let meaning = meaning_col.and_then(|c| record.get(c));

            labels.insert(degree, format_label(symbol, meaning));
        }

        Ok(Self {
            labels,
            source: SymbolSource::Parsed { encoding: "UTF-8" },
        })
    }

    /// Label for `degree`, or the placeholder when the table has no entry.
    pub fn lookup(&self, degree: SabianDegree) -> String {
        self.labels
            .get(&degree)
            .cloned()
            .unwrap_or_else(|| placeholder_label(degree.get()))
    }

    /// Same as [`lookup`](Self::lookup) for a raw index.
    pub fn lookup_index(&self, index: u16) -> String {
        match SabianDegree::new(index) {
            Some(degree) => self.lookup(degree),
            None => placeholder_label(index),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn source(&self) -> SymbolSource {
        self.source
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == SymbolSource::Placeholder
    }
}

fn decode_text(bytes: &[u8]) -> Result<(Cow<'_, str>, &'static str), SymbolTableError> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Ok((text, UTF_8.name()));
    }
    log::debug!("Symbol table is not valid UTF-8, trying Shift_JIS");
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text, SHIFT_JIS.name()))
        .ok_or(SymbolTableError::Encoding)
}

/// Accepts `12` and spreadsheet-style `12.0`.
fn parse_degree(raw: &str) -> Option<SabianDegree> {
    let raw = raw.trim();
    let index = match raw.parse::<u16>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().ok()?;
            if f.fract() != 0.0 || !(1.0..=360.0).contains(&f) {
                return None;
            }
            f as u16
        }
    };
    SabianDegree::new(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_covers_every_degree() {
        let table = SymbolTable::placeholder();
        assert_eq!(table.len(), 360);
        assert!(table.is_placeholder());
        assert_eq!(table.lookup_index(1), "Degree 1 Symbol");
        assert_eq!(table.lookup_index(360), "Degree 360 Symbol");
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("A comet", Some("sudden change")), "【A comet】 sudden change");
        assert_eq!(format_label("A comet", Some("  ")), "【A comet】");
        assert_eq!(format_label("A comet", None), "【A comet】");
    }

    #[test]
    fn test_parse_degree() {
        assert_eq!(parse_degree("12").map(|d| d.get()), Some(12));
        assert_eq!(parse_degree(" 360 ").map(|d| d.get()), Some(360));
        assert_eq!(parse_degree("7.0").map(|d| d.get()), Some(7));
        assert!(parse_degree("0").is_none());
        assert!(parse_degree("361").is_none());
        assert!(parse_degree("7.5").is_none());
        assert!(parse_degree("seven").is_none());
    }

    #[test]
    fn test_from_reader_case_insensitive_headers() {
        let csv = "Degree,SYMBOL,Meaning\n1,A woman rises out of water,Emergence\n2,A comedian,\n";
        let table = SymbolTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup_index(1), "【A woman rises out of water】 Emergence");
        assert_eq!(table.lookup_index(2), "【A comedian】");
        assert_eq!(table.lookup_index(3), "Degree 3 Symbol");
    }

    #[test]
    fn test_from_reader_without_meaning_column() {
        let csv = "degree,symbol\n10,An aviator\n";
        let table = SymbolTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.lookup_index(10), "【An aviator】");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "deg,symbol\n1,x\n";
        let err = SymbolTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SymbolTableError::MissingColumn(ref c) if c == "degree"));
    }

    #[test]
    fn test_bad_degree_is_an_error() {
        let csv = "degree,symbol\n1,x\nabc,y\n";
        let err = SymbolTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SymbolTableError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn test_parse_bytes_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("degree,symbol,meaning\n5,象徴,意味\n".as_bytes());
        let table = SymbolTable::parse_bytes(&bytes).unwrap();
        assert_eq!(table.lookup_index(5), "【象徴】 意味");
        assert_eq!(table.source(), SymbolSource::Parsed { encoding: "UTF-8" });
    }

    #[test]
    fn test_parse_bytes_shift_jis_fallback() {
        let (encoded, _, _) = SHIFT_JIS.encode("degree,symbol,meaning\n5,象徴,意味\n");
        let table = SymbolTable::parse_bytes(&encoded).unwrap();
        assert_eq!(table.lookup_index(5), "【象徴】 意味");
        assert_eq!(table.source(), SymbolSource::Parsed { encoding: "Shift_JIS" });
    }
}
