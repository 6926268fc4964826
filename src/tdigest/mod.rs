// Opt-in tracing (cheap unless env var set)
macro_rules! ttrace {
    ($($arg:tt)*) => {
        if std::env::var_os("TDIGEST_TRACE").is_some() {
            eprintln!($($arg)*);
        }
    }
}

pub mod centroids;
pub mod options;
pub mod quantile;
#[doc(hidden)]
pub mod test_helpers;

// Internal building blocks
mod compressor;
mod scale;
mod tdigest;

// Public surface
pub use centroids::{centroids_from_points, is_sorted_by_mean, total_weight, Centroid};
pub use compressor::merge_data;
pub use options::{DigestOptions, DEFAULT_COMPRESSION};
pub use quantile::{estimate_quantile, estimate_quantiles};
pub use scale::ScaleFamily;
pub use tdigest::{TDigest, TDigestBuilder};
