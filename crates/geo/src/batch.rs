//! Batch distance calculations with optional parallelism.
//!
//! Per-point distances are independent, so with the `parallel` feature they
//! are fanned out across the rayon pool. Output order always matches input order.

use crate::{haversine_distance, Coordinate};

/// Calculate the distance from `origin` to every point, in kilometers.
///
/// # Returns
/// Vector of distances where index `i` belongs to `points[i]`.
///
/// # Example
/// ```
/// use pingrank_geo::{distances_from, Coordinate};
///
/// let points = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
/// let distances = distances_from(&Coordinate::new(0.0, 0.0), &points);
/// assert_eq!(distances[0], 0.0);
/// assert!((distances[1] - 111.2).abs() < 0.1);
/// ```
pub fn distances_from(origin: &Coordinate, points: &[Coordinate]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|point| haversine_distance(origin, point))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|point| haversine_distance(origin, point))
            .collect()
    }
}

/// Find the points strictly farther than zero and no farther than `radius_km`.
///
/// Coincident points (distance exactly `0.0`) are excluded so that the origin
/// never matches itself.
///
/// # Returns
/// `(index, distance)` pairs sorted by distance, ties kept in input order.
pub fn within_radius(origin: &Coordinate, points: &[Coordinate], radius_km: f64) -> Vec<(usize, f64)> {
    let mut results: Vec<(usize, f64)> = distances_from(origin, points)
        .into_iter()
        .enumerate()
        .filter(|&(_, d)| d > 0.0 && d <= radius_km)
        .collect();

    // `sort_by` is stable, so equal distances keep their input order
    results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_points() -> Vec<Coordinate> {
        vec![
            // Berlin
            Coordinate::new(52.5200, 13.4050),
            // Paris
            Coordinate::new(48.8566, 2.3522),
            // London
            Coordinate::new(51.5074, -0.1276),
            // Frankfurt itself
            Coordinate::new(50.1109, 8.6821),
        ]
    }

    const FRANKFURT: Coordinate = Coordinate { latitude: 50.1109, longitude: 8.6821 };

    #[test]
    fn test_batch_distances_keep_input_order() {
        let points = create_test_points();
        let results = distances_from(&FRANKFURT, &points);

        assert_eq!(results.len(), 4);
        assert!(results[0] > 400.0 && results[0] < 450.0, "Berlin: {}", results[0]);
        assert!(results[2] > 600.0 && results[2] < 700.0, "London: {}", results[2]);
        assert_eq!(results[3], 0.0);
    }

    #[test]
    fn test_empty_batch() {
        assert!(distances_from(&FRANKFURT, &[]).is_empty());
    }

    #[test]
    fn test_radius_filter_excludes_origin_and_far_points() {
        let points = create_test_points();
        let results = within_radius(&FRANKFURT, &points, 500.0);

        let indices: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
        // Berlin (~424km) and Paris (~479km); London (~637km) and Frankfurt itself are out
        assert_eq!(indices, vec![0, 1]);
        assert!(results.iter().all(|(_, d)| *d > 0.0 && *d <= 500.0));
    }

    #[test]
    fn test_radius_ties_keep_input_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let points = vec![
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, -1.0),
            Coordinate::new(1.0, 0.0),
        ];
        let results = within_radius(&origin, &points, 200.0);
        let indices: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
        // All three sit exactly one degree away
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
