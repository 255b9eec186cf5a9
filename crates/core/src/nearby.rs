//! The "nearby to last registered" clustering query.
//!
//! The anchor is chosen from records in input order. With the default
//! [`AnchorStrategy::LastRow`] that is simply the final valid row, which is
//! only "most recent" if the upload happens to be time-ordered.

use crate::error::{ProcessError, Result};
use crate::record::LocationRecord;
use crate::summary::DistanceSummary;
use crate::table::find_column;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pingrank_geo::{within_radius, Coordinate};
use serde::{Deserialize, Serialize};

/// How the anchor record is picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum AnchorStrategy {
    /// The last valid row in input order
    #[default]
    LastRow,
    /// The row with the latest parseable timestamp in `column`; later rows win
    /// ties, and the last row is used when no timestamp parses
    LatestTimestamp {
        /// Column holding the timestamp
        column: String,
    },
}

/// A record within the radius of the anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyMember {
    /// The underlying record
    pub record: LocationRecord,
    /// Great-circle distance from the anchor in kilometers, in `(0, radius]`
    pub distance_from_anchor_km: f64,
    /// Zero-based rank by ascending distance from the anchor
    pub nearby_order: usize,
}

/// The anchor record and everything clustered around it.
///
/// `members` may be empty: that is "anchor found, nobody nearby", which is
/// different from having no records at all (`None` from [`find_nearby`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResult {
    /// The record the query is centred on
    pub anchor: LocationRecord,
    /// Records within the radius, closest first
    pub members: Vec<NearbyMember>,
    /// Radius the query used
    pub radius_km: f64,
}

impl NearbyResult {
    /// True when no other record is within the radius.
    pub fn is_isolated(&self) -> bool {
        self.members.is_empty()
    }

    /// Count, min, max and mean of `distance_from_anchor_km`.
    pub fn summary(&self) -> Option<DistanceSummary> {
        DistanceSummary::from_distances(self.members.iter().map(|m| m.distance_from_anchor_km))
    }
}

/// Find records within `radius_km` of the last record.
///
/// `records` must be in original input order.
///
/// # Returns
/// * `Ok(None)` when `records` is empty
/// * `Ok(Some(result))` otherwise, possibly with no members
///
/// # Errors
/// [`ProcessError::InvalidRadius`] when the radius is not positive and finite.
pub fn find_nearby(records: &[LocationRecord], radius_km: f64) -> Result<Option<NearbyResult>> {
    find_nearby_from(records, &[], radius_km, &AnchorStrategy::LastRow)
}

/// [`find_nearby`] with a configurable anchor. `headers` resolves the
/// timestamp column for [`AnchorStrategy::LatestTimestamp`].
pub fn find_nearby_from(
    records: &[LocationRecord],
    headers: &[String],
    radius_km: f64,
    strategy: &AnchorStrategy,
) -> Result<Option<NearbyResult>> {
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(ProcessError::InvalidRadius(radius_km));
    }

    let Some(anchor_index) = select_anchor(records, headers, strategy) else {
        return Ok(None);
    };
    let anchor = &records[anchor_index];

    let coordinates: Vec<Coordinate> = records.iter().map(|r| r.coordinate).collect();
    let members: Vec<NearbyMember> = within_radius(&anchor.coordinate, &coordinates, radius_km)
        .into_iter()
        .filter(|&(index, _)| index != anchor_index)
        .enumerate()
        .map(|(nearby_order, (index, distance))| NearbyMember {
            record: records[index].clone(),
            distance_from_anchor_km: distance,
            nearby_order,
        })
        .collect();

    tracing::info!(
        anchor = %anchor.id,
        radius_km,
        members = members.len(),
        "Nearby query complete"
    );

    Ok(Some(NearbyResult {
        anchor: anchor.clone(),
        members,
        radius_km,
    }))
}

fn select_anchor(records: &[LocationRecord], headers: &[String], strategy: &AnchorStrategy) -> Option<usize> {
    let last = records.len().checked_sub(1)?;

    match strategy {
        AnchorStrategy::LastRow => Some(last),
        AnchorStrategy::LatestTimestamp { column } => {
            let Some(col) = find_column(headers, column) else {
                tracing::warn!(%column, "Timestamp column not found, anchoring on last row");
                return Some(last);
            };

            let mut latest: Option<(usize, NaiveDateTime)> = None;
            for (index, record) in records.iter().enumerate() {
                let Some(ts) = record.value(col).and_then(parse_timestamp) else {
                    continue;
                };
                if latest.map_or(true, |(_, best)| ts >= best) {
                    latest = Some((index, ts));
                }
            }

            match latest {
                Some((index, _)) => Some(index),
                None => {
                    tracing::warn!(%column, "No parseable timestamps, anchoring on last row");
                    Some(last)
                }
            }
        }
    }
}

/// Parse the timestamp layouts seen in ping exports, normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
