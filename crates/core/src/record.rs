//! Location records and row interpretation.

use pingrank_geo::Coordinate;
use serde::Serialize;
use std::fmt;

/// One input row with usable coordinates.
///
/// `values` holds every raw cell of the row in column order, so the record can
/// be written back out with nothing dropped or reordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    /// Zero-based position among the data rows of the input
    pub row_index: usize,
    /// Display key: the `ID` cell, or the 1-based row number when absent
    pub id: String,
    /// Parsed coordinate, always within WGS84 ranges
    pub coordinate: Coordinate,
    /// Raw cells, aligned with the table headers
    pub values: Vec<String>,
}

impl LocationRecord {
    /// Raw cell at a column position.
    pub fn value(&self, column: usize) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}

/// A record annotated with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    /// The underlying record
    pub record: LocationRecord,
    /// Great-circle distance from the reference point in kilometers
    pub distance_km: f64,
    /// Zero-based rank by ascending distance
    pub distance_order: usize,
}

/// Column positions needed to interpret a row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowLayout {
    pub latitude: usize,
    pub longitude: usize,
    pub id: Option<usize>,
}

/// Why a row was left out of the results.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The cell is missing or blank
    Missing(&'static str),
    /// The cell does not parse as a finite number
    NotNumeric(&'static str, String),
    /// The pair parsed but lies outside WGS84 ranges
    OutOfRange(f64, f64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing(column) => write!(f, "{} is missing", column),
            SkipReason::NotNumeric(column, raw) => write!(f, "{} {:?} is not a number", column, raw),
            SkipReason::OutOfRange(lat, lon) => {
                write!(f, "({}, {}) is outside the valid coordinate range", lat, lon)
            }
        }
    }
}

impl RowLayout {
    /// Turn a raw row into a record, or explain why it cannot be used.
    pub(crate) fn interpret(&self, row_index: usize, row: &[String]) -> Result<LocationRecord, SkipReason> {
        let latitude = parse_degrees(row, self.latitude, crate::table::columns::LATITUDE)?;
        let longitude = parse_degrees(row, self.longitude, crate::table::columns::LONGITUDE)?;

        let coordinate = Coordinate::new(latitude, longitude);
        if !coordinate.is_valid() {
            return Err(SkipReason::OutOfRange(latitude, longitude));
        }

        let id = self
            .id
            .and_then(|col| row.get(col))
            .map(|cell| strip_quotes(cell))
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| (row_index + 1).to_string());

        Ok(LocationRecord {
            row_index,
            id,
            coordinate,
            values: row.to_vec(),
        })
    }
}

fn parse_degrees(row: &[String], column: usize, name: &'static str) -> Result<f64, SkipReason> {
    let raw = row.get(column).map(|cell| strip_quotes(cell)).unwrap_or("");
    if raw.is_empty() {
        return Err(SkipReason::Missing(name));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SkipReason::NotNumeric(name, raw.to_string())),
    }
}

fn strip_quotes(cell: &str) -> &str {
    cell.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}
