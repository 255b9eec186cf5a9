//! The ranking pipeline: parse, clean, annotate with distance, order.

use crate::error::{ProcessError, Result};
use crate::export::{self, MapPoint};
use crate::nearby::{find_nearby_from, AnchorStrategy, NearbyResult};
use crate::record::{LocationRecord, RankedRecord, RowLayout};
use crate::summary::DistanceSummary;
use crate::table::{columns, Table};
use pingrank_geo::{distances_from, Coordinate};
use std::io::Read;

/// Output of [`process`] for one input table.
///
/// Holds the surviving records twice: once in input order, which the nearby
/// query anchors on, and once ranked by distance from the reference point.
#[derive(Debug, Clone)]
pub struct ProcessedBatch {
    headers: Vec<String>,
    reference: Coordinate,
    records: Vec<LocationRecord>,
    ranked: Vec<RankedRecord>,
    total_rows: usize,
}

impl ProcessedBatch {
    /// Header row of the input.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The reference point distances were measured from.
    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    /// Valid records in original input order.
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Valid records sorted by ascending distance, `distance_order` 0..N-1.
    pub fn ranked(&self) -> &[RankedRecord] {
        &self.ranked
    }

    /// Data rows read from the input.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows dropped for missing, non-numeric or out-of-range coordinates.
    pub fn skipped(&self) -> usize {
        self.total_rows - self.records.len()
    }

    /// Count, min, max and mean of `distance_km`.
    pub fn summary(&self) -> DistanceSummary {
        DistanceSummary::from_distances(self.ranked.iter().map(|r| r.distance_km))
            .unwrap_or_default()
    }

    /// Records clustered around the anchor record.
    ///
    /// Always works on input order; the ranked order never decides the anchor.
    pub fn nearby(&self, radius_km: f64, strategy: &AnchorStrategy) -> Result<Option<NearbyResult>> {
        find_nearby_from(&self.records, &self.headers, radius_km, strategy)
    }

    /// Ranked records relabelled for map display.
    pub fn map_points(&self) -> Vec<MapPoint> {
        export::map_points(self.ranked.iter().map(|r| &r.record))
    }
}

/// Rank every usable row of `table` by distance from `reference`.
///
/// # Errors
/// * [`ProcessError::InvalidReference`] when `reference` is out of range
/// * [`ProcessError::MissingColumn`] when `Latitude`/`Longitude` is absent
/// * [`ProcessError::NoValidRows`] when nothing survives cleaning
///
/// # Example
/// ```
/// use pingrank_core::{process, Table};
/// use pingrank_geo::Coordinate;
///
/// let csv = "ID,Latitude,Longitude\nA,0,0\nB,0,1\nC,10,10\n";
/// let table = Table::from_reader(csv.as_bytes()).unwrap();
/// let batch = process(&table, Coordinate::new(0.0, 0.0)).unwrap();
///
/// let ids: Vec<&str> = batch.ranked().iter().map(|r| r.record.id.as_str()).collect();
/// assert_eq!(ids, ["A", "B", "C"]);
/// ```
pub fn process(table: &Table, reference: Coordinate) -> Result<ProcessedBatch> {
    let reference = Coordinate::checked(reference.latitude, reference.longitude)?;

    if table.is_empty() {
        return Err(ProcessError::NoValidRows { total: 0, skipped: 0 });
    }

    let layout = RowLayout {
        latitude: table.require_column(columns::LATITUDE)?,
        longitude: table.require_column(columns::LONGITUDE)?,
        id: table.column_index(columns::ID),
    };

    let mut records = Vec::with_capacity(table.len());
    for (row_index, row) in table.rows().iter().enumerate() {
        match layout.interpret(row_index, row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::debug!(row = row_index + 1, %reason, "Skipping row");
            }
        }
    }

    let total = table.len();
    let skipped = total - records.len();
    if records.is_empty() {
        tracing::warn!(total, "No row has usable coordinates");
        return Err(ProcessError::NoValidRows { total, skipped });
    }

    let ranked = rank(&records, &reference);

    tracing::info!(
        total,
        valid = records.len(),
        skipped,
        "Ranked records by distance"
    );

    Ok(ProcessedBatch {
        headers: table.headers().to_vec(),
        reference,
        records,
        ranked,
        total_rows: total,
    })
}

/// Read CSV from `reader` and [`process`] it.
pub fn process_reader<R: Read>(reader: R, reference: Coordinate) -> Result<ProcessedBatch> {
    let table = Table::from_reader(reader)?;
    process(&table, reference)
}

fn rank(records: &[LocationRecord], reference: &Coordinate) -> Vec<RankedRecord> {
    let coordinates: Vec<Coordinate> = records.iter().map(|r| r.coordinate).collect();
    let distances = distances_from(reference, &coordinates);

    let mut ranked: Vec<RankedRecord> = records
        .iter()
        .zip(distances)
        .map(|(record, distance_km)| RankedRecord {
            record: record.clone(),
            distance_km,
            distance_order: 0,
        })
        .collect();

    // Stable sort: equal distances keep input order
    ranked.sort_by(|a, b| {
        a.distance_km.partial_cmp(&b.distance_km).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (order, entry) in ranked.iter_mut().enumerate() {
        entry.distance_order = order;
    }

    ranked
}
