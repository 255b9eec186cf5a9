//! CSV ingestion into an in-memory table.
//!
//! Header names are normalised (whitespace, quote characters and a leading
//! byte-order mark are stripped) and looked up case-insensitively. Cell
//! contents are kept as read; interpretation happens in [`crate::record`].

use crate::error::{ProcessError, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Well-known column names.
pub mod columns {
    /// Record identifier
    pub const ID: &str = "ID";
    /// Latitude in decimal degrees (required)
    pub const LATITUDE: &str = "Latitude";
    /// Longitude in decimal degrees (required)
    pub const LONGITUDE: &str = "Longitude";
    /// Ping timestamp
    pub const TIMESTAMP: &str = "Timestamp";

    /// Distance from the reference point, appended on export
    pub const DISTANCE_KM: &str = "Distance_km";
    /// Zero-based rank by distance, appended on export
    pub const DISTANCE_ORDER: &str = "Distance_Order";
    /// Distance from the anchor record, appended on nearby export
    pub const DISTANCE_FROM_ANCHOR_KM: &str = "Distance_From_Anchor_km";
    /// Zero-based rank among nearby members
    pub const NEARBY_ORDER: &str = "Nearby_Order";
}

/// A header row plus raw data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table directly from headers and rows. Headers are normalised.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.iter().map(|h| normalize_header(h)).collect();
        Self { headers, rows }
    }

    /// Read a CSV stream with a header row.
    ///
    /// Rows may have differing lengths; short rows are handled downstream.
    /// An empty stream yields an empty table rather than an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "CSV table loaded");

        Ok(Self { headers, rows })
    }

    /// Read a CSV file from disk. `-` reads standard input.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path == Path::new("-") {
            return Self::from_reader(io::stdin().lock());
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Normalised header names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        find_column(&self.headers, name)
    }

    /// Position of a column that must exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ProcessError::MissingColumn(name.to_string()))
    }
}

/// Case-insensitive column lookup over normalised headers.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    headers.iter().position(|h| h.eq_ignore_ascii_case(&wanted))
}

/// Strip whitespace, quote characters and a byte-order mark from a header.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
