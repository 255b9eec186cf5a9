//! Serialising results for display and re-export.
//!
//! CSV output repeats the input header row followed by the computed columns.
//! Rows shorter than the header are padded with empty cells and longer rows
//! are cut to the header width, so the output is always rectangular.

use crate::error::Result;
use crate::nearby::NearbyResult;
use crate::record::{LocationRecord, RankedRecord};
use crate::table::columns;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

/// A record relabelled for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// Display key
    pub id: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl From<&LocationRecord> for MapPoint {
    fn from(record: &LocationRecord) -> Self {
        Self {
            id: record.id.clone(),
            lat: record.latitude(),
            lon: record.longitude(),
        }
    }
}

/// Project records onto `{id, lat, lon}`.
pub fn map_points<'a, I>(records: I) -> Vec<MapPoint>
where
    I: IntoIterator<Item = &'a LocationRecord>,
{
    records.into_iter().map(MapPoint::from).collect()
}

/// Write the ranked set as CSV with `Distance_km` and `Distance_Order` appended.
pub fn write_ranked_csv<W: Write>(writer: W, headers: &[String], ranked: &[RankedRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header_row(headers, &[columns::DISTANCE_KM, columns::DISTANCE_ORDER]))?;

    for entry in ranked {
        let mut row = padded(&entry.record, headers.len());
        row.push(entry.distance_km.to_string());
        row.push(entry.distance_order.to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write nearby members as CSV with `Distance_From_Anchor_km` and `Nearby_Order` appended.
pub fn write_nearby_csv<W: Write>(writer: W, headers: &[String], nearby: &NearbyResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header_row(
        headers,
        &[columns::DISTANCE_FROM_ANCHOR_KM, columns::NEARBY_ORDER],
    ))?;

    for member in &nearby.members {
        let mut row = padded(&member.record, headers.len());
        row.push(member.distance_from_anchor_km.to_string());
        row.push(member.nearby_order.to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Ranked set as an array of objects keyed by header name.
pub fn ranked_to_json(headers: &[String], ranked: &[RankedRecord]) -> Value {
    Value::Array(
        ranked
            .iter()
            .map(|entry| {
                let mut object = row_object(headers, &entry.record);
                object.insert(columns::DISTANCE_KM.into(), entry.distance_km.into());
                object.insert(columns::DISTANCE_ORDER.into(), entry.distance_order.into());
                Value::Object(object)
            })
            .collect(),
    )
}

/// Nearby result as `{anchor, radius_km, members}`.
pub fn nearby_to_json(headers: &[String], nearby: &NearbyResult) -> Value {
    let members: Vec<Value> = nearby
        .members
        .iter()
        .map(|member| {
            let mut object = row_object(headers, &member.record);
            object.insert(
                columns::DISTANCE_FROM_ANCHOR_KM.into(),
                member.distance_from_anchor_km.into(),
            );
            object.insert(columns::NEARBY_ORDER.into(), member.nearby_order.into());
            Value::Object(object)
        })
        .collect();

    serde_json::json!({
        "anchor": Value::Object(row_object(headers, &nearby.anchor)),
        "radius_km": nearby.radius_km,
        "members": members,
    })
}

fn header_row(headers: &[String], extra: &[&str]) -> Vec<String> {
    headers
        .iter()
        .cloned()
        .chain(extra.iter().map(|s| s.to_string()))
        .collect()
}

fn padded(record: &LocationRecord, width: usize) -> Vec<String> {
    let mut row: Vec<String> = record.values.iter().take(width).cloned().collect();
    row.resize(width, String::new());
    row
}

fn row_object(headers: &[String], record: &LocationRecord) -> Map<String, Value> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cell = record.value(i).unwrap_or_default();
            (header.clone(), Value::String(cell.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearby::AnchorStrategy;
    use crate::processor::{process_reader, ProcessedBatch};
    use pingrank_geo::Coordinate;

    fn batch(csv: &str) -> ProcessedBatch {
        process_reader(csv.as_bytes(), Coordinate::new(0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_ranked_csv_appends_columns() {
        let batch = batch("ID,Device,Latitude,Longitude\nB,tab,0,1\nA,phone,0,0\n");
        let mut out = Vec::new();
        write_ranked_csv(&mut out, batch.headers(), batch.ranked()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID,Device,Latitude,Longitude,Distance_km,Distance_Order");
        assert_eq!(lines[1], "A,phone,0,0,0,0");
        assert!(lines[2].starts_with("B,tab,0,1,111.19"));
        assert!(lines[2].ends_with(",1"));
    }

    #[test]
    fn test_ranked_csv_round_trips_through_reader() {
        let batch = batch("ID,Latitude,Longitude,UserAgent\n1,5,5,\"a, b\"\n");
        let mut out = Vec::new();
        write_ranked_csv(&mut out, batch.headers(), batch.ranked()).unwrap();

        let table = crate::Table::from_reader(out.as_slice()).unwrap();
        assert_eq!(table.rows()[0][3], "a, b");
        assert_eq!(table.column_index(columns::DISTANCE_ORDER), Some(5));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let headers: Vec<String> = ["ID", "Latitude", "Longitude", "Device"].map(String::from).to_vec();
        let ranked = vec![RankedRecord {
            record: LocationRecord {
                row_index: 0,
                id: "x".into(),
                coordinate: Coordinate::new(1.0, 2.0),
                values: vec!["x".into(), "1".into(), "2".into()],
            },
            distance_km: 5.5,
            distance_order: 0,
        }];

        let mut out = Vec::new();
        write_ranked_csv(&mut out, &headers, &ranked).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("x,1,2,,5.5,0"));
    }

    #[test]
    fn test_nearby_csv() {
        let batch = batch("ID,Latitude,Longitude\nA,0,0\nB,0,1\nC,0,0.5\n");
        let nearby = batch.nearby(100.0, &AnchorStrategy::LastRow).unwrap().unwrap();

        let mut out = Vec::new();
        write_nearby_csv(&mut out, batch.headers(), &nearby).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ID,Latitude,Longitude,Distance_From_Anchor_km,Nearby_Order");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A,0,0,55.59"));
        assert!(lines[2].ends_with(",1"));
    }

    #[test]
    fn test_ranked_json() {
        let batch = batch("ID,Latitude,Longitude\nA,0,0\n");
        let json = ranked_to_json(batch.headers(), batch.ranked());

        assert_eq!(json[0]["ID"], "A");
        assert_eq!(json[0]["Latitude"], "0");
        assert_eq!(json[0]["Distance_km"], 0.0);
        assert_eq!(json[0]["Distance_Order"], 0);
    }

    #[test]
    fn test_nearby_json() {
        let batch = batch("ID,Latitude,Longitude\nA,0,0\nB,0,1\n");
        let nearby = batch.nearby(200.0, &AnchorStrategy::LastRow).unwrap().unwrap();
        let json = nearby_to_json(batch.headers(), &nearby);

        assert_eq!(json["anchor"]["ID"], "B");
        assert_eq!(json["radius_km"], 200.0);
        assert_eq!(json["members"][0]["ID"], "A");
        assert_eq!(json["members"][0]["Nearby_Order"], 0);
    }

    #[test]
    fn test_map_point_serialises_short_names() {
        let record = LocationRecord {
            row_index: 0,
            id: "p".into(),
            coordinate: Coordinate::new(1.5, -2.5),
            values: Vec::new(),
        };
        let json = serde_json::to_value(map_points([&record])).unwrap();
        assert_eq!(json, serde_json::json!([{"id": "p", "lat": 1.5, "lon": -2.5}]));
    }
}
