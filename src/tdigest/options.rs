use crate::tdigest::scale::ScaleFamily;
use crate::{TdError, TdResult};

/// Default compression: a practical fidelity/size trade-off (≈200 centroids with `K1`).
pub const DEFAULT_COMPRESSION: f64 = 100.0;

/// Knobs for [`merge_data`](crate::tdigest::merge_data) and [`TDigest`](crate::tdigest::TDigest).
///
/// Larger `compression` retains more centroids: higher fidelity, more memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestOptions {
    pub compression: f64,
    pub scale: ScaleFamily,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            compression: DEFAULT_COMPRESSION,
            scale: ScaleFamily::K1,
        }
    }
}

impl DigestOptions {
    #[inline]
    pub fn new(compression: f64) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_scale(mut self, scale: ScaleFamily) -> Self {
        self.scale = scale;
        self
    }

    /// Compression must be finite and `> 0`.
    pub fn validate(&self) -> TdResult<()> {
        if self.compression.is_finite() && self.compression > 0.0 {
            Ok(())
        } else {
            Err(TdError::InvalidCompression {
                compression: self.compression,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = DigestOptions::default();
        assert_eq!(o.compression, 100.0);
        assert_eq!(o.scale, ScaleFamily::K1);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn rejects_bad_compression() {
        for c in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    DigestOptions::new(c).validate(),
                    Err(TdError::InvalidCompression { .. })
                ),
                "compression {c} should be rejected"
            );
        }
        assert!(DigestOptions::new(0.5).validate().is_ok());
    }
}
