//! tdigest-testdata
//! Synthetic data generators shared by benches and tests.
//! Random shapes are seeded so every run sees the same samples.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Available synthetic distributions.
#[derive(Clone, Copy, Debug)]
pub enum DistKind {
    /// Uniform in \[0,1)
    Uniform,
    /// Standard normal
    Normal,
    /// Log-normal: exp(N(0, σ²))
    LogNormal { sigma: f64 },
    /// Standard logistic, sampled by inverse transform
    Logistic,
    /// Mixed: clumps, broad region, and heavy tails
    Mixture,
}

/// Inverse CDF of the logistic distribution with location `mu` and scale `s`.
pub fn logistic_inv_cdf(p: f64, mu: f64, s: f64) -> f64 {
    mu - s * (1.0 / p - 1.0).ln()
}

/// `n` deterministic points `F⁻¹(i/(n+1))`, `i = 1..=n`, of the standard logistic
/// distribution, in ascending order.
pub fn logistic_grid(n: usize) -> Vec<f64> {
    let denom = n as f64 + 1.0;
    (1..=n)
        .map(|i| logistic_inv_cdf(i as f64 / denom, 0.0, 1.0))
        .collect()
}

/// `(i/n)²` for `i = 0..n`: dense near zero, sparse near one.
pub fn squared_grid(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 / n as f64).powi(2)).collect()
}

/// Seeded in-place shuffle, for feeding sorted grids in arbitrary order.
pub fn shuffled(mut xs: Vec<f64>, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    xs.shuffle(&mut rng);
    xs
}

/// Generate `n` samples for the chosen distribution.
pub fn gen_dataset(kind: DistKind, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);

    match kind {
        DistKind::Uniform => {
            for _ in 0..n {
                out.push(rng.random::<f64>());
            }
        }
        DistKind::Normal => {
            let normal = Normal::new(0.0, 1.0).expect("unit normal");
            for _ in 0..n {
                out.push(normal.sample(&mut rng));
            }
        }
        DistKind::LogNormal { sigma } => {
            let normal = Normal::new(0.0, 1.0).expect("unit normal");
            for _ in 0..n {
                let z: f64 = normal.sample(&mut rng);
                out.push((sigma * z).exp());
            }
        }
        DistKind::Logistic => {
            for _ in 0..n {
                // open interval keeps the inverse CDF finite
                let p = rng.random_range(f64::EPSILON..1.0);
                out.push(logistic_inv_cdf(p, 0.0, 1.0));
            }
        }
        DistKind::Mixture => {
            for _ in 0..n {
                let bucket: u32 = rng.random_range(0..100);
                let v = match bucket {
                    // Clumps around 0.1, 0.5, 0.9 with micro-noise
                    0..=29 => {
                        let center = match rng.random_range(0..3) {
                            0 => 0.10,
                            1 => 0.50,
                            _ => 0.90,
                        };
                        center + rng.random_range(-1.0..1.0) * 1e-3
                    }
                    // Broad uniform region
                    30..=69 => rng.random::<f64>(),
                    // Heavier tails near 0 and 1
                    _ => {
                        let exp = rng.random_range(3.0..9.0);
                        if rng.random_bool(0.5) {
                            rng.random::<f64>().clamp(1e-12, 1.0).powf(exp)
                        } else {
                            1.0 - rng.random::<f64>().clamp(1e-12, 1.0).powf(exp)
                        }
                    }
                };
                out.push(v.clamp(0.0, 1.0));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_gen() {
        for kind in [
            DistKind::Uniform,
            DistKind::Normal,
            DistKind::LogNormal { sigma: 1.0 },
            DistKind::Logistic,
            DistKind::Mixture,
        ] {
            let xs = gen_dataset(kind, 10_000, 123);
            assert_eq!(xs.len(), 10_000);
            assert!(xs.iter().all(|x| x.is_finite()), "{kind:?}");
            assert_eq!(xs, gen_dataset(kind, 10_000, 123), "{kind:?} not seeded");
        }
    }

    #[test]
    fn logistic_grid_is_sorted_and_symmetric() {
        let xs = logistic_grid(1_001);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(xs[500].abs() < 1e-12);
        assert!((xs[0] + xs[1_000]).abs() < 1e-9);
    }

    #[test]
    fn shuffled_keeps_the_multiset() {
        let xs = squared_grid(100);
        let mut ys = shuffled(xs.clone(), 7);
        assert_ne!(xs, ys);
        ys.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(xs, ys);
    }
}
