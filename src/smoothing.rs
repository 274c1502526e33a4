//! Exponential-kernel smoothing over indexed series.

/// Re-estimate every value as a kernel-weighted average over all points.
///
/// `weight(i, j) = exp(-k * |index_i - index_j|)`. Every point influences
/// every other one, so the cost is quadratic. A constant series comes back
/// unchanged.
pub fn sparse_data(points: &[(f64, f64)], k: f64) -> Vec<f64> {
    points
        .iter()
        .map(|&(index_i, _)| {
            let (total, factor) = points
                .iter()
                .fold((0.0, 0.0), |(total, factor), &(index_j, value_j)| {
                    let weight = (-k * (index_i - index_j).abs()).exp();
                    (total + value_j * weight, factor + weight)
                });
            total / factor
        })
        .collect()
}

/// Smooth values that carry no index of their own, using positions `0..n`.
pub fn sparse_values(values: &[f64], k: f64) -> Vec<f64> {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    sparse_data(&points, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_is_unchanged() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 0.5, 3.25)).collect();
        for v in sparse_data(&points, 1.0) {
            assert!((v - 3.25).abs() < 1e-12);
        }
    }

    #[test]
    fn three_point_peak_matches_closed_form() {
        let points = [(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)];
        let out = sparse_data(&points, 1.0);
        let e1 = (-1.0f64).exp();
        let e2 = (-2.0f64).exp();
        let expected_mid = 10.0 / (1.0 + 2.0 * e1);
        assert!((out[1] - expected_mid).abs() < 1e-12);
        assert!((out[1] - 5.7612).abs() < 1e-3);
        let expected_edge = 10.0 * e1 / (1.0 + e1 + e2);
        assert!((out[0] - expected_edge).abs() < 1e-12);
        assert!((out[2] - expected_edge).abs() < 1e-12);
    }

    #[test]
    fn two_equidistant_points_with_zero_decay_average() {
        let out = sparse_data(&[(0.0, 2.0), (5.0, 6.0)], 0.0);
        assert_eq!(out, vec![4.0, 4.0]);
    }

    #[test]
    fn larger_decay_keeps_points_closer_to_themselves() {
        let points = [(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)];
        let loose = sparse_data(&points, 0.5);
        let tight = sparse_data(&points, 4.0);
        assert!(tight[1] > loose[1]);
        assert!(tight[1] < 10.0);
    }

    #[test]
    fn positional_indexes_ignore_keys() {
        let values = [1.0, 5.0, 1.0];
        let by_position = sparse_values(&values, 1.0);
        let explicit = sparse_data(&[(0.0, 1.0), (1.0, 5.0), (2.0, 1.0)], 1.0);
        assert_eq!(by_position, explicit);
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(sparse_data(&[], 1.0).is_empty());
    }
}
