//! Summary statistics over computed distances.

use serde::Serialize;

/// Count, min, max and mean of a set of distances in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistanceSummary {
    /// Number of distances
    pub count: usize,
    /// Smallest distance
    pub min_km: f64,
    /// Largest distance
    pub max_km: f64,
    /// Arithmetic mean
    pub mean_km: f64,
}

impl DistanceSummary {
    /// Summarise `distances`, or `None` when there are none.
    pub fn from_distances<I>(distances: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for d in distances {
            count += 1;
            sum += d;
            min = min.min(d);
            max = max.max(d);
        }

        (count > 0).then(|| Self {
            count,
            min_km: min,
            max_km: max,
            mean_km: sum / count as f64,
        })
    }
}
