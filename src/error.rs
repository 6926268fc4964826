// src/error.rs
use core::fmt;

/// Library-wide error for naive-tdigest.
///
/// Every variant is an *invalid argument*: the digest has no I/O and nothing to retry, so a
/// failure always means the caller handed over something the algorithm cannot work with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TdError {
    /// A centroid was constructed with `weight <= 0` (or a NaN weight).
    NonPositiveWeight { weight: f64 },

    /// Compression must be finite and strictly positive.
    InvalidCompression { compression: f64 },

    /// A quantile was requested from a digest with no centroids.
    EmptyDigest,

    /// Quantile probe outside `[0, 1]` (NaN included).
    QuantileOutOfRange { q: f64 },

    /// NaN/±inf where a finite value is required.
    /// `context` pinpoints where it came from (e.g. "sample value", "centroid mean").
    NonFiniteInput { context: &'static str },
}

impl TdError {
    /// All errors raised by the digest belong to the invalid-argument category.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            TdError::NonPositiveWeight { .. }
                | TdError::InvalidCompression { .. }
                | TdError::EmptyDigest
                | TdError::QuantileOutOfRange { .. }
                | TdError::NonFiniteInput { .. }
        )
    }
}

impl fmt::Display for TdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TdError::NonPositiveWeight { weight } => write!(
                f,
                "tdigest: centroid weight must be > 0 (got {}). \
hint: drop empty clusters before building centroids",
                weight
            ),
            TdError::InvalidCompression { compression } => write!(
                f,
                "tdigest: invalid compression ({}). hint: compression must be finite and > 0",
                compression
            ),
            TdError::EmptyDigest => write!(
                f,
                "tdigest: cannot estimate a quantile from an empty digest. \
hint: merge at least one sample first"
            ),
            TdError::QuantileOutOfRange { q } => write!(
                f,
                "tdigest: quantile out of range (got {}). hint: q must lie in [0, 1]",
                q
            ),
            TdError::NonFiniteInput { context } => write!(
                f,
                "tdigest: non-finite values are not allowed ({}). \
hint: clean your data or drop NaN/±inf before building the digest",
                context
            ),
        }
    }
}

impl std::error::Error for TdError {}

pub type TdResult<T> = Result<T, TdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_invalid_argument() {
        let all = [
            TdError::NonPositiveWeight { weight: 0.0 },
            TdError::InvalidCompression { compression: -1.0 },
            TdError::EmptyDigest,
            TdError::QuantileOutOfRange { q: 1.5 },
            TdError::NonFiniteInput {
                context: "sample value",
            },
        ];
        for e in all {
            assert!(e.is_invalid_argument(), "{e:?}");
            assert!(e.to_string().starts_with("tdigest: "), "{e}");
        }
    }

    #[test]
    fn display_carries_offending_value() {
        let msg = TdError::QuantileOutOfRange { q: 1.25 }.to_string();
        assert!(msg.contains("1.25"), "{msg}");
        let msg = TdError::NonFiniteInput {
            context: "centroid mean",
        }
        .to_string();
        assert!(msg.contains("centroid mean"), "{msg}");
    }
}
