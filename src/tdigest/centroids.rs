use ordered_float::OrderedFloat;

use crate::{TdError, TdResult};

/// A centroid summarizes a cluster in the digest: the weighted mean of every sample it
/// absorbed, and their total weight.
///
/// Fields are stored as [`OrderedFloat`] so structural equality and the sort key are total.
/// `weight > 0` and both fields are finite for every centroid that leaves this module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Centroid {
    mean: OrderedFloat<f64>,
    weight: OrderedFloat<f64>,
}

impl Centroid {
    /// Validated constructor.
    ///
    /// Fails with [`TdError::NonPositiveWeight`] for `weight <= 0` (or NaN), and with
    /// [`TdError::NonFiniteInput`] for an infinite weight or a non-finite mean.
    pub fn new(mean: f64, weight: f64) -> TdResult<Self> {
        if weight.is_nan() || weight <= 0.0 {
            return Err(TdError::NonPositiveWeight { weight });
        }
        if !weight.is_finite() {
            return Err(TdError::NonFiniteInput {
                context: "centroid weight",
            });
        }
        if !mean.is_finite() {
            return Err(TdError::NonFiniteInput {
                context: "centroid mean",
            });
        }
        Ok(Self::from_parts(mean, weight))
    }

    /// Caller guarantees the invariants (positive finite weight, finite mean).
    #[inline]
    pub(crate) fn from_parts(mean: f64, weight: f64) -> Self {
        debug_assert!(weight > 0.0 && weight.is_finite());
        Centroid {
            mean: OrderedFloat::from(mean),
            weight: OrderedFloat::from(weight),
        }
    }

    /// Unit-weight centroid for a single raw sample.
    #[inline]
    pub fn point(x: f64) -> Self {
        Self::from_parts(x, 1.0)
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean.into_inner()
    }
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight.into_inner()
    }

    /// Sort key used by the compressor.
    #[inline]
    pub(crate) fn mean_key(&self) -> OrderedFloat<f64> {
        self.mean
    }

    /// Weighted-average centroid of `a` and `b`. Pure: neither input is touched.
    ///
    /// `mean = a.mean·(a.weight/w) + b.mean·(b.weight/w)` with `w = a.weight + b.weight`.
    /// The convex form keeps the mean finite for samples near `f64::MAX`; the result is
    /// clamped into `[min(a.mean, b.mean), max(a.mean, b.mean)]`.
    ///
    /// The caller must keep `w` finite (see [`merge_data`](crate::tdigest::merge_data)).
    #[inline]
    pub fn merge(a: &Centroid, b: &Centroid) -> Centroid {
        let (wa, wb) = (a.weight(), b.weight());
        let w = wa + wb;
        let (lo, hi) = if a.mean <= b.mean {
            (a.mean(), b.mean())
        } else {
            (b.mean(), a.mean())
        };
        let mean = a.mean() * (wa / w) + b.mean() * (wb / w);
        Self::from_parts(mean.max(lo).min(hi), w)
    }
}

/// One unit-weight centroid per sample, in input order. No sorting, no merging.
pub fn centroids_from_points(points: &[f64]) -> Vec<Centroid> {
    points.iter().map(|&x| Centroid::point(x)).collect()
}

/// Sum of weights.
#[inline]
pub fn total_weight(cs: &[Centroid]) -> f64 {
    cs.iter().map(Centroid::weight).sum()
}

/// Non-strictly increasing by mean (allows equal means).
#[inline]
pub fn is_sorted_by_mean(cs: &[Centroid]) -> bool {
    cs.windows(2).all(|w| w[0].mean <= w[1].mean)
}

/// Stable ascending sort by mean; ties keep their relative input order.
#[inline]
pub(crate) fn sort_by_mean(cs: &mut [Centroid]) {
    cs.sort_by_key(Centroid::mean_key);
}

/// Merge adjacent centroids that have the exact same mean into a single centroid.
/// The mean is kept bit-for-bit; only weights are summed.
pub(crate) fn coalesce_adjacent_equal_means(xs: Vec<Centroid>) -> Vec<Centroid> {
    if xs.len() <= 1 {
        return xs;
    }
    let mut out: Vec<Centroid> = Vec::with_capacity(xs.len());
    let mut acc = xs[0];
    for c in xs.into_iter().skip(1) {
        if c.mean == acc.mean {
            acc = Centroid::from_parts(acc.mean(), acc.weight() + c.weight());
        } else {
            out.push(acc);
            acc = c;
        }
    }
    out.push(acc);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(m: f64, w: f64) -> Centroid {
        Centroid::new(m, w).expect("valid centroid")
    }

    #[test]
    fn instantiates_with_mean_and_weight() {
        let c1 = c(1.0, 2.0);
        assert_eq!(c1.mean(), 1.0);
        assert_eq!(c1.weight(), 2.0);
    }

    #[test]
    fn rejects_non_positive_weight() {
        for w in [0.0, -0.0, -1.0, f64::NAN] {
            match Centroid::new(1.0, w) {
                Err(TdError::NonPositiveWeight { .. }) => {}
                other => panic!("weight {w}: expected NonPositiveWeight, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_finite_fields() {
        assert_eq!(
            Centroid::new(1.0, f64::INFINITY),
            Err(TdError::NonFiniteInput {
                context: "centroid weight"
            })
        );
        for m in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                Centroid::new(m, 1.0),
                Err(TdError::NonFiniteInput {
                    context: "centroid mean"
                })
            );
        }
    }

    #[test]
    fn merge_equal_means() {
        assert_eq!(Centroid::merge(&c(1.0, 2.0), &c(1.0, 2.0)), c(1.0, 4.0));
    }

    #[test]
    fn merge_symmetric_means() {
        assert_eq!(Centroid::merge(&c(-1.0, 2.0), &c(1.0, 2.0)), c(0.0, 4.0));
    }

    #[test]
    fn merge_weighted_means() {
        assert_eq!(Centroid::merge(&c(0.0, 1.0), &c(4.0, 3.0)), c(3.0, 4.0));
    }

    #[test]
    fn merge_is_commutative() {
        let (a, b) = (c(0.25, 3.0), c(-7.5, 0.5));
        assert_eq!(Centroid::merge(&a, &b), Centroid::merge(&b, &a));
    }

    #[test]
    fn merge_stays_finite_near_f64_max() {
        let merged = Centroid::merge(&c(1.0e308, 1.0), &c(1.5e308, 1.0));
        assert_eq!(merged.mean(), 1.25e308);
        assert_eq!(merged.weight(), 2.0);

        let heavy = Centroid::merge(&c(f64::MAX, 1.0e6), &c(f64::MAX, 3.0e6));
        assert_eq!(heavy.mean(), f64::MAX);

        let spread = Centroid::merge(&c(-f64::MAX, 1.0), &c(f64::MAX, 1.0));
        assert!(spread.mean().is_finite());
        assert_eq!(spread.mean(), 0.0);
    }

    #[test]
    fn merged_mean_stays_between_inputs() {
        let (a, b) = (c(0.1, 3.0), c(0.1 + 1e-16, 7.0));
        let m = Centroid::merge(&a, &b).mean();
        assert!(m >= a.mean() && m <= b.mean(), "{m}");
    }

    #[test]
    fn centroids_from_points_keeps_order_and_unit_weight() {
        let got = centroids_from_points(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let want = vec![
            c(1.0, 1.0),
            c(2.0, 1.0),
            c(3.0, 1.0),
            c(4.0, 1.0),
            c(5.0, 1.0),
        ];
        assert_eq!(got, want);

        let unsorted = centroids_from_points(&[3.0, -1.0, 3.0]);
        let means: Vec<f64> = unsorted.iter().map(Centroid::mean).collect();
        assert_eq!(means, vec![3.0, -1.0, 3.0]);
        assert!(centroids_from_points(&[]).is_empty());
    }

    #[test]
    fn sort_by_mean_is_stable() {
        let mut cs = vec![c(2.0, 1.0), c(1.0, 5.0), c(2.0, 2.0), c(1.0, 3.0)];
        sort_by_mean(&mut cs);
        assert_eq!(cs, vec![c(1.0, 5.0), c(1.0, 3.0), c(2.0, 1.0), c(2.0, 2.0)]);
        assert!(is_sorted_by_mean(&cs));
    }

    #[test]
    fn coalesce_sums_weight_and_keeps_mean_exact() {
        let m = 0.1 + 0.2;
        let cs = vec![c(m, 1.0), c(m, 2.5), c(1.0, 3.0)];
        let out = coalesce_adjacent_equal_means(cs);
        assert_eq!(out, vec![c(m, 3.5), c(1.0, 3.0)]);
        assert_eq!(total_weight(&out), 6.5);
    }
}
