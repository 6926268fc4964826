// src/tdigest/tdigest.rs
use crate::tdigest::centroids::{centroids_from_points, total_weight, Centroid};
use crate::tdigest::compressor::merge_data;
use crate::tdigest::options::DigestOptions;
use crate::tdigest::quantile::{estimate_quantile, estimate_quantiles};
use crate::tdigest::scale::ScaleFamily;
use crate::{TdError, TdResult};

/// Immutable digest: a compressed, mean-sorted centroid list plus the options that built it.
///
/// Every ingest returns a **new** digest; `self` is never modified. Batch ingestion only; feed
/// single samples as one-element batches if you must.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TDigest {
    centroids: Vec<Centroid>,
    options: DigestOptions,
}

#[inline]
fn ensure_finite_values(values: &[f64]) -> TdResult<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(TdError::NonFiniteInput {
            context: "sample value",
        });
    }
    Ok(())
}

/* =============================================================================
 * Builder
 * ============================================================================= */

/// Builder for [`TDigest`].
///
/// Use the builder when you want to:
/// - construct an empty digest with chosen parameters, or
/// - seed a digest with centroids produced elsewhere (they are sorted and compressed on build).
#[derive(Debug, Clone, Default)]
pub struct TDigestBuilder {
    options: DigestOptions,
    init_centroids: Option<Vec<Centroid>>,
}

impl TDigestBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression parameter.
    #[inline]
    pub fn compression(mut self, compression: f64) -> Self {
        self.options.compression = compression;
        self
    }

    /// Choose the scale family used by the k-limit.
    #[inline]
    pub fn scale(mut self, s: ScaleFamily) -> Self {
        self.options.scale = s;
        self
    }

    #[inline]
    pub fn options(mut self, options: DigestOptions) -> Self {
        self.options = options;
        self
    }

    /// Seed with existing centroids.
    pub fn with_centroids(mut self, centroids: Vec<Centroid>) -> Self {
        self.init_centroids = Some(centroids);
        self
    }

    /// Validate the options and compress any seed centroids.
    pub fn build(self) -> TdResult<TDigest> {
        self.options.validate()?;
        let centroids = match self.init_centroids {
            Some(seed) => merge_data(&seed, &[], &self.options)?,
            None => Vec::new(),
        };
        Ok(TDigest {
            centroids,
            options: self.options,
        })
    }
}

/* =============================================================================
 * Digest
 * ============================================================================= */

impl TDigest {
    /// Entry point for fluent construction.
    #[inline]
    pub fn builder() -> TDigestBuilder {
        TDigestBuilder::default()
    }

    /// Build from **unsorted** raw values.
    pub fn from_values(values: &[f64], options: DigestOptions) -> TdResult<TDigest> {
        Self::builder().options(options).build()?.merge_values(values)
    }

    #[inline]
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }
    #[inline]
    pub fn options(&self) -> DigestOptions {
        self.options
    }
    #[inline]
    pub fn compression(&self) -> f64 {
        self.options.compression
    }
    #[inline]
    pub fn scale(&self) -> ScaleFamily {
        self.options.scale
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
    /// Number of centroids.
    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Total weight (∑w). For raw samples, this equals the sample count.
    #[inline]
    pub fn count(&self) -> f64 {
        total_weight(&self.centroids)
    }

    /// Weighted mean of the represented distribution; `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        let n = self.count();
        if n > 0.0 {
            // per-centroid shares keep the sum finite for means near f64::MAX
            Some(
                self.centroids
                    .iter()
                    .map(|c| c.mean() * (c.weight() / n))
                    .sum::<f64>(),
            )
        } else {
            None
        }
    }

    /// Ingest a batch of **unsorted** raw values; NaN/±inf are rejected up front.
    pub fn merge_values(&self, values: &[f64]) -> TdResult<TDigest> {
        ensure_finite_values(values)?;
        if values.is_empty() {
            return Ok(self.clone());
        }
        self.merge_centroids(&centroids_from_points(values))
    }

    /// Fold arbitrary (already validated) centroids into this digest.
    pub fn merge_centroids(&self, centroids: &[Centroid]) -> TdResult<TDigest> {
        let merged = merge_data(centroids, &self.centroids, &self.options)?;
        Ok(TDigest {
            centroids: merged,
            options: self.options,
        })
    }

    /// Fold several digests into one.
    ///
    /// Options of the first non-empty digest win; all empty (or no digests) → empty default.
    pub fn merge_digests(digests: &[TDigest]) -> TdResult<TDigest> {
        let mut non_empty = digests.iter().filter(|d| !d.is_empty());
        let Some(first) = non_empty.next() else {
            return Ok(TDigest::default());
        };
        non_empty.try_fold(first.clone(), |acc, d| acc.merge_centroids(&d.centroids))
    }

    /// Estimate the value at quantile `q ∈ [0, 1]`.
    #[inline]
    pub fn quantile(&self, q: f64) -> TdResult<f64> {
        estimate_quantile(&self.centroids, q)
    }

    pub fn quantiles(&self, qs: &[f64]) -> TdResult<Vec<f64>> {
        estimate_quantiles(&self.centroids, qs)
    }

    #[inline]
    pub fn median(&self) -> TdResult<f64> {
        self.quantile(0.5)
    }
}
