/// Scale families define the q→k mapping that controls compression density.
///
/// A centroid may grow only while the `k` values at its two edges differ by at most one,
/// so a steep `k` near the tails keeps tail centroids small.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScaleFamily {
    /// k1: arcsine scale (DEFAULT). Spans `[-d, d]`, i.e. about `2·compression` centroids.
    #[default]
    K1,
    /// k2: logistic scale.
    K2,
    /// k3: double-log scale.
    K3,
    /// Piecewise-quadratic tail-friendly scale.
    Quad,
}

impl ScaleFamily {
    pub const ALL: [ScaleFamily; 4] = [
        ScaleFamily::K1,
        ScaleFamily::K2,
        ScaleFamily::K3,
        ScaleFamily::Quad,
    ];

    /// Lowercase name, as accepted by the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleFamily::K1 => "k1",
            ScaleFamily::K2 => "k2",
            ScaleFamily::K3 => "k3",
            ScaleFamily::Quad => "quad",
        }
    }
}

#[inline]
pub(crate) fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Family-aware `q → k` mapping. `d` is the compression parameter.
#[inline]
pub(crate) fn q_to_k(q: f64, d: f64, family: ScaleFamily) -> f64 {
    use std::f64::consts::{FRAC_2_PI, LN_2};
    let eps = 1e-15;
    match family {
        ScaleFamily::K1 => {
            let s = (2.0 * clamp(q, 0.0, 1.0) - 1.0).clamp(-1.0, 1.0).asin();
            d * FRAC_2_PI * s
        }
        ScaleFamily::K2 => {
            let qq = clamp(q, eps, 1.0 - eps);
            (d / (4.0 * LN_2)) * (qq / (1.0 - qq)).ln()
        }
        ScaleFamily::K3 => {
            let qq = clamp(q, eps, 1.0 - eps);
            let a = (1.0 / (1.0 - qq)).ln(); // ln(1/(1-q))
            let b = (1.0 / qq).ln(); // ln(1/q)
            let ratio = (a / b).max(eps);
            (d / 4.0) * ratio.ln()
        }
        ScaleFamily::Quad => {
            let qq = clamp(q, eps, 1.0 - eps);
            let r = if qq < 0.5 {
                (qq * 0.5).sqrt()
            } else {
                1.0 - ((1.0 - qq) * 0.5).sqrt()
            };
            d * r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_is_monotone_in_q() {
        for fam in ScaleFamily::ALL {
            let mut prev = f64::NEG_INFINITY;
            for i in 0..=1000 {
                let k = q_to_k(i as f64 / 1000.0, 100.0, fam);
                assert!(k.is_finite(), "{fam:?} at i={i}");
                assert!(k >= prev, "{fam:?} not monotone at i={i}");
                prev = k;
            }
        }
    }

    #[test]
    fn k1_spans_twice_the_compression() {
        let d = 100.0;
        let lo = q_to_k(0.0, d, ScaleFamily::K1);
        let hi = q_to_k(1.0, d, ScaleFamily::K1);
        assert!((lo + d).abs() < 1e-9);
        assert!((hi - d).abs() < 1e-9);
        assert!(q_to_k(0.5, d, ScaleFamily::K1).abs() < 1e-12);
    }

    #[test]
    fn k1_is_steeper_in_the_tails() {
        let d = 100.0;
        let step = 1e-3;
        let slope = |q: f64| q_to_k(q + step, d, ScaleFamily::K1) - q_to_k(q, d, ScaleFamily::K1);
        assert!(slope(0.99 - step) > slope(0.5));
        assert!(slope(0.01) > slope(0.5));
    }

    #[test]
    fn out_of_domain_q_is_clamped() {
        for fam in ScaleFamily::ALL {
            assert_eq!(q_to_k(-0.5, 10.0, fam), q_to_k(0.0, 10.0, fam));
            assert_eq!(q_to_k(1.5, 10.0, fam), q_to_k(1.0, 10.0, fam));
        }
    }
}
