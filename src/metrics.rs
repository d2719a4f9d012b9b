//! Band-power aggregation.
//!
//! A band-power frame carries 25 values, site-major: band `b` of site `s`
//! sits at `s * 5 + b`, bands ordered theta, alpha, betaL, betaH, gamma.
//! Each band's proportion is its summed power over the reference sites
//! divided by the total power of the whole frame. Meditation and attention
//! are composites of the slow and fast band proportions respectively.

use crate::types::{DerivedMetrics, BAND_COUNT, BAND_POWER_LEN};

/// Sites whose per-band powers are summed for the proportions.
///
/// Deliberately a two-site subset of the five-site montage, carried over
/// unchanged from the upstream pipeline this bridge feeds.
const REFERENCE_SITES: [usize; 2] = [0, 3];

/// Compute the derived metrics for one band-power frame.
///
/// Returns `None` when the frame is unusable: wrong length, zero total
/// power, or a non-finite sum. Callers substitute the zero vector so the
/// downstream consumer always sees the expected shape.
pub fn compute(values: &[f64]) -> Option<DerivedMetrics> {
    if values.len() != BAND_POWER_LEN {
        return None;
    }
    let sum_pow: f64 = values.iter().sum();
    if sum_pow == 0.0 || !sum_pow.is_finite() {
        return None;
    }

    let mut proportion = [0.0f64; BAND_COUNT];
    for (band, p) in proportion.iter_mut().enumerate() {
        let total: f64 = REFERENCE_SITES
            .iter()
            .map(|&site| values[site * BAND_COUNT + band])
            .sum();
        *p = total / sum_pow;
    }

    Some(DerivedMetrics {
        theta: proportion[0],
        alpha: proportion[1],
        beta_low: proportion[2],
        beta_high: proportion[3],
        gamma: proportion[4],
        meditation: proportion[0] + proportion[1],
        attention: proportion[2] + proportion[3] + proportion[4],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn uniform_frame_yields_known_proportions() {
        // sum = 25, each band_total = 2, each proportion = 0.08
        let values = vec![1.0; BAND_POWER_LEN];
        let metrics = compute(&values).unwrap();
        assert_close(metrics.theta, 0.08);
        assert_close(metrics.alpha, 0.08);
        assert_close(metrics.beta_low, 0.08);
        assert_close(metrics.beta_high, 0.08);
        assert_close(metrics.gamma, 0.08);
        assert_close(metrics.meditation, 0.16);
        assert_close(metrics.attention, 0.24);
    }

    #[test]
    fn proportions_use_only_the_reference_sites() {
        // Power only at site 1: band totals over sites {0, 3} are all zero.
        let mut values = vec![0.0; BAND_POWER_LEN];
        for band in 0..BAND_COUNT {
            values[BAND_COUNT + band] = 3.0;
        }
        let metrics = compute(&values).unwrap();
        assert_eq!(metrics.to_args()[..5], [0.0; 5]);

        // Power at site 3 does count.
        let mut values = vec![0.0; BAND_POWER_LEN];
        values[3 * BAND_COUNT] = 5.0; // theta at site 3
        values[4 * BAND_COUNT] = 5.0; // theta at site 4, inflates the sum only
        let metrics = compute(&values).unwrap();
        assert_close(metrics.theta, 0.5);
        assert_close(metrics.meditation, 0.5);
    }

    #[test]
    fn zero_total_power_is_rejected() {
        assert!(compute(&vec![0.0; BAND_POWER_LEN]).is_none());
    }

    #[test]
    fn non_finite_power_is_rejected() {
        let mut values = vec![1.0; BAND_POWER_LEN];
        values[7] = f64::INFINITY;
        assert!(compute(&values).is_none());
        values[7] = f64::NAN;
        assert!(compute(&values).is_none());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(compute(&[1.0; 24]).is_none());
        assert!(compute(&[1.0; 26]).is_none());
        assert!(compute(&[]).is_none());
    }

    #[test]
    fn result_never_contains_non_finite_values() {
        let values: Vec<f64> = (0..BAND_POWER_LEN).map(|i| i as f64 * 0.1).collect();
        let metrics = compute(&values).unwrap();
        assert!(metrics.to_args().iter().all(|v| v.is_finite()));
    }
}
