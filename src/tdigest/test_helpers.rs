//! Assertion helpers shared by unit tests, integration tests and benches.

use crate::tdigest::centroids::Centroid;

pub fn assert_exact(label: &str, expected: f64, got: f64) {
    assert!(
        expected == got,
        "{}: expected exactly {:.9}, got {:.9}",
        label,
        expected,
        got
    );
}

/// Passes when `got` is within `tol` of `expected`, absolutely or relatively.
pub fn assert_close(label: &str, expected: f64, got: f64, tol: f64) {
    let abs = (expected - got).abs();
    let rel = abs / expected.abs().max(1e-300);
    assert!(
        abs <= tol || rel <= tol,
        "{}: expected ~= {:.9}, got {:.9}, abs_err={:.6e}, rel_err={:.6e}, tol={:.6e}",
        label,
        expected,
        got,
        abs,
        rel,
        tol
    );
}

pub fn assert_monotone_chain(label: &str, values: &[f64]) {
    for i in 1..values.len() {
        assert!(
            values[i] >= values[i - 1],
            "{}: non-monotone at i={}: {} < {}",
            label,
            i,
            values[i],
            values[i - 1]
        );
    }
}

pub fn assert_sorted_by_mean(label: &str, cs: &[Centroid]) {
    for (i, w) in cs.windows(2).enumerate() {
        assert!(
            w[0].mean() <= w[1].mean(),
            "{}: means decrease at i={}: {} > {}",
            label,
            i + 1,
            w[0].mean(),
            w[1].mean()
        );
    }
}

