//! Quantile evaluation over a compressed, mean-sorted centroid list.
//!
//! - **Index mapping**: `q ∈ [0,1]` maps to a target cumulative weight `t = q·W`, where
//!   `W = ∑w` is the total weight.
//! - **Center-to-center spans**: each centroid's *center* sits half its weight past its left
//!   boundary. Between adjacent centroids the span weight is `(w_left + w_right)/2`.
//! - **Edge clamps**: targets at or before the first center return the first mean; targets at
//!   or after the last center return the last mean.
//! - **Interpolation**: otherwise interpolate linearly in weight between the two centroids whose
//!   centers bracket `t`, clamped into `[left.mean, right.mean]`.
//!
//! # Guarantees
//! - The result is **monotone** in `q`.
//! - A single-centroid digest returns its mean for every `q`.
//!
//! # Edge cases
//! - **Empty digest** → [`TdError::EmptyDigest`].
//! - **`q` outside `[0,1]` or NaN** → [`TdError::QuantileOutOfRange`]; probes are rejected,
//!   never clamped.

use crate::tdigest::centroids::{is_sorted_by_mean, total_weight, Centroid};
use crate::tdigest::scale::clamp;
use crate::{TdError, TdResult};

/// Estimate the value at quantile `q` from `digest`, which must be sorted ascending by mean
/// (any output of [`merge_data`](crate::tdigest::merge_data) is).
pub fn estimate_quantile(digest: &[Centroid], q: f64) -> TdResult<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(TdError::QuantileOutOfRange { q });
    }
    let (first, last) = match (digest.first(), digest.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(TdError::EmptyDigest),
    };
    debug_assert!(is_sorted_by_mean(digest), "digest must be sorted by mean");
    if digest.len() == 1 {
        return Ok(first.mean());
    }

    let total = total_weight(digest);
    if !total.is_finite() {
        return Err(TdError::NonFiniteInput {
            context: "total weight",
        });
    }
    let target = q * total;
    let mut left_center = first.weight() / 2.0;
    if target <= left_center {
        return Ok(first.mean());
    }

    for pair in digest.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        let span = (left.weight() + right.weight()) / 2.0;
        let right_center = left_center + span;
        if target <= right_center {
            let t = (target - left_center) / span;
            let (m_left, m_right) = (left.mean(), right.mean());
            // interpolate on halved means so `m_right - m_left` cannot overflow
            let (h_left, h_right) = (0.5 * m_left, 0.5 * m_right);
            let x = 2.0 * (h_left + t * (h_right - h_left));
            return Ok(clamp(x, m_left, m_right));
        }
        left_center = right_center;
    }
    Ok(last.mean())
}

/// Estimate several quantiles; fails on the first invalid probe.
pub fn estimate_quantiles(digest: &[Centroid], qs: &[f64]) -> TdResult<Vec<f64>> {
    qs.iter().map(|&q| estimate_quantile(digest, q)).collect()
}
