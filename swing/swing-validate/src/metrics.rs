//! Error metrics shared by the comparator and trajectory replay.
//!
//! Series of different lengths are truncated to the shorter one; trailing
//! samples of the longer series are dropped without resampling.

use crate::error::ComparisonError;

/// Accumulated squared error between two sample-major trajectories.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorStats {
    /// Number of scalar elements compared.
    pub count: usize,
    /// Sum of squared differences.
    pub sum_sq_diff: f64,
    /// Sum of squares of the first (reference) series.
    pub sum_sq_reference: f64,
    /// Largest absolute difference.
    pub max_abs_diff: f64,
}

impl ErrorStats {
    /// Root mean square of the difference.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rmse(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_sq_diff / self.count as f64).sqrt()
    }

    /// Root mean square magnitude of the reference series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reference_rms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_sq_reference / self.count as f64).sqrt()
    }
}

/// Compare two trajectories element-wise over their common prefix.
///
/// `reference[t]` and `other[t]` must have the same width for every compared
/// sample `t`.
pub fn trajectory_error(
    reference: &[Vec<f64>],
    other: &[Vec<f64>],
) -> Result<ErrorStats, ComparisonError> {
    let len = reference.len().min(other.len());
    let mut stats = ErrorStats::default();

    for (sample, (a, b)) in reference[..len].iter().zip(&other[..len]).enumerate() {
        if a.len() != b.len() {
            return Err(ComparisonError::ShapeMismatch {
                sample,
                left: a.len(),
                right: b.len(),
            });
        }
        for (x, y) in a.iter().zip(b) {
            let diff = x - y;
            stats.count += 1;
            stats.sum_sq_diff += diff * diff;
            stats.sum_sq_reference += x * x;
            // NaN never wins `max`; it shows up in the sums instead.
            stats.max_abs_diff = stats.max_abs_diff.max(diff.abs());
        }
    }

    if stats.count == 0 {
        return Err(ComparisonError::EmptySeries);
    }
    Ok(stats)
}

/// Agreement between two trajectories: `max(0, 1 - rmse / (rms(reference) + epsilon))`.
pub fn trajectory_agreement(
    reference: &[Vec<f64>],
    other: &[Vec<f64>],
    epsilon: f64,
) -> Result<f64, ComparisonError> {
    let stats = trajectory_error(reference, other)?;
    let normalized = stats.rmse() / (stats.reference_rms() + epsilon);
    if !normalized.is_finite() {
        return Err(ComparisonError::NonFinite);
    }
    Ok((1.0 - normalized).max(0.0))
}

/// Agreement between two scalar series: `max(0, 1 - mean(|a - b| / (|a| + epsilon)))`.
#[allow(clippy::cast_precision_loss)]
pub fn scalar_agreement(reference: &[f64], other: &[f64], epsilon: f64) -> Result<f64, ComparisonError> {
    let len = reference.len().min(other.len());
    if len == 0 {
        return Err(ComparisonError::EmptySeries);
    }

    let total: f64 = reference[..len]
        .iter()
        .zip(&other[..len])
        .map(|(a, b)| (a - b).abs() / (a.abs() + epsilon))
        .sum();
    let mean_relative_error = total / len as f64;

    if !mean_relative_error.is_finite() {
        return Err(ComparisonError::NonFinite);
    }
    Ok((1.0 - mean_relative_error).max(0.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trajectory_error_stats() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![1.0, 2.0], vec![3.0, 5.0]];
        let stats = trajectory_error(&a, &b).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.max_abs_diff, 1.0);
        assert_relative_eq!(stats.rmse(), 0.5);
        assert_relative_eq!(stats.reference_rms(), (30.0_f64 / 4.0).sqrt());
    }

    #[test]
    fn test_truncates_to_shorter() {
        let a: Vec<Vec<f64>> = (0..5).map(|i| vec![f64::from(i)]).collect();
        let b: Vec<Vec<f64>> = (0..8).map(|i| vec![f64::from(i)]).collect();
        let stats = trajectory_error(&a, &b).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.sum_sq_diff, 0.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = vec![vec![1.0, 2.0]];
        let b = vec![vec![1.0]];
        assert_eq!(
            trajectory_error(&a, &b).unwrap_err(),
            ComparisonError::ShapeMismatch {
                sample: 0,
                left: 2,
                right: 1
            }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            trajectory_error(&[], &[vec![1.0]]).unwrap_err(),
            ComparisonError::EmptySeries
        );
        assert_eq!(
            scalar_agreement(&[], &[1.0], 1e-12).unwrap_err(),
            ComparisonError::EmptySeries
        );
    }

    #[test]
    fn test_zero_signal_identical() {
        let zeros = vec![vec![0.0, 0.0]; 4];
        assert_eq!(trajectory_agreement(&zeros, &zeros, 1e-12).unwrap(), 1.0);
    }

    #[test]
    fn test_scalar_agreement_values() {
        let a = [1.0, 2.0, 4.0];
        let b = [1.1, 2.0, 4.0];
        let agreement = scalar_agreement(&a, &b, 1e-12).unwrap();
        assert_relative_eq!(agreement, 1.0 - 0.1 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_scalar_agreement_floors_at_zero() {
        let agreement = scalar_agreement(&[1.0], &[10.0], 1e-12).unwrap();
        assert_eq!(agreement, 0.0);
    }

    #[test]
    fn test_non_finite() {
        let a = vec![vec![f64::NAN]];
        let b = vec![vec![1.0]];
        assert_eq!(
            trajectory_agreement(&a, &b, 1e-12).unwrap_err(),
            ComparisonError::NonFinite
        );
        assert_eq!(
            scalar_agreement(&[f64::INFINITY], &[1.0], 1e-12).unwrap_err(),
            ComparisonError::NonFinite
        );
    }
}
