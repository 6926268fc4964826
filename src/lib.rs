//! Mergeable t-digest: compress a stream of samples into a small sorted list of weighted
//! centroids, then estimate quantiles from it with tail-weighted accuracy.
//!
//! ```
//! use naive_tdigest::tdigest::{centroids_from_points, estimate_quantile, merge_data, DigestOptions};
//!
//! let xs: Vec<f64> = (0..10_000).map(|i| i as f64).collect();
//! let digest = merge_data(&centroids_from_points(&xs), &[], &DigestOptions::default())?;
//! let p99 = estimate_quantile(&digest, 0.99)?;
//! assert!((p99 - 9_899.5).abs() < 10.0);
//! # Ok::<(), naive_tdigest::TdError>(())
//! ```
mod error;
pub mod tdigest;

pub use error::{TdError, TdResult};
