use crate::tdigest::centroids::{
    coalesce_adjacent_equal_means, is_sorted_by_mean, sort_by_mean, total_weight, Centroid,
};
use crate::tdigest::options::DigestOptions;
use crate::tdigest::scale::{q_to_k, ScaleFamily};
use crate::{TdError, TdResult};

const KLIMIT_TOL: f64 = 1e-12;

/// Compress `new` and `existing` centroids into one sorted digest.
///
/// Pipeline: Combine → Sort (stable) → Coalesce equal means → k-limit merge.
///
/// - `new` need not be sorted; `existing` is typically a previous output of this function.
/// - Ties in mean keep working-set order (`new` first, then `existing`), so the result is
///   deterministic for identical input.
/// - Total weight of the result equals the total weight of the inputs exactly.
pub fn merge_data(
    new: &[Centroid],
    existing: &[Centroid],
    opts: &DigestOptions,
) -> TdResult<Vec<Centroid>> {
    opts.validate()?;

    let mut working: Vec<Centroid> = Vec::with_capacity(new.len() + existing.len());
    working.extend_from_slice(new);
    working.extend_from_slice(existing);
    if working.len() <= 1 {
        return Ok(working);
    }
    // weights are positive, so a finite total keeps every partial sum finite
    if !total_weight(&working).is_finite() {
        return Err(TdError::NonFiniteInput {
            context: "total weight",
        });
    }

    sort_by_mean(&mut working);
    let n_in = working.len();
    let coalesced = coalesce_adjacent_equal_means(working);
    ttrace!(
        "A) sort+coalesce: n_in={}, n_coalesced={}",
        n_in,
        coalesced.len()
    );

    let out = klimit_merge(&coalesced, opts.compression, opts.scale);

    debug_assert!(is_sorted_by_mean(&out), "merge output not sorted by mean");
    #[cfg(debug_assertions)]
    {
        let w_in = total_weight(&coalesced);
        let w_out = total_weight(&out);
        debug_assert!(
            (w_in - w_out).abs() <= 1e-12 * w_in.max(1.0),
            "total weight changed"
        );
    }
    ttrace!(
        "B) k-limit: d={}, scale={:?}, len_in={}, len_out={}, total_w={}",
        opts.compression,
        opts.scale,
        coalesced.len(),
        out.len(),
        total_weight(&out)
    );
    Ok(out)
}

/// Left-to-right scan over centroids sorted by mean. The open centroid keeps absorbing its
/// right neighbour while the k-span between its left edge and the prospective right edge
/// stays within one unit.
///
/// The bound covers the whole open centroid: `q0` is the weight emitted before it, not the
/// weight just before the candidate.
fn klimit_merge(items: &[Centroid], d: f64, family: ScaleFamily) -> Vec<Centroid> {
    let Some((first, rest)) = items.split_first() else {
        return Vec::new();
    };
    let total_w = total_weight(items);

    // float-to-int `as` saturates; the min keeps the add from overflowing
    let budget = (4.0 * d).min(items.len() as f64) as usize;
    let mut clusters: Vec<Centroid> = Vec::with_capacity(items.len().min(budget.saturating_add(8)));
    let mut open = *first;
    // cumulative weight emitted before `open`
    let mut w_left = 0.0_f64;
    let mut k_left = q_to_k(0.0, d, family);

    for c in rest {
        let q_right = (w_left + open.weight() + c.weight()) / total_w;
        let k_right = q_to_k(q_right, d, family);

        if k_right - k_left <= 1.0 + KLIMIT_TOL {
            open = Centroid::merge(&open, c);
        } else {
            w_left += open.weight();
            clusters.push(open);
            open = *c;
            k_left = q_to_k(w_left / total_w, d, family);
        }
    }
    clusters.push(open);
    clusters
}
