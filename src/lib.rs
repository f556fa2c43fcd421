//! # Storeless
//!
//! Streaming (storeless) statistics for Rust.
//!
//! A storeless statistic is updated one value at a time and never retains the
//! input, so it runs in constant memory over streams of any length. The same
//! statistic can also be evaluated in one shot over a slice range.
//!
//! ## Features
//!
//! - **Geometric Mean**: `exp(sum(ln x) / n)` over a pluggable log-sum
//! - **Sum of Logs**: plain and Kahan-compensated log-sum accumulators
//! - **Strategy Swapping**: replace the log-sum implementation before data arrives
//! - **Mergeability**: combine accumulators built on separate partitions
//!
//! ## Quick Start
//!
//! ```rust
//! use storeless::prelude::*;
//!
//! let mut gm = GeometricMean::new();
//! for growth in [1.10, 0.95, 1.20, 1.05] {
//!     gm.increment(growth);
//! }
//! println!("Average growth factor: {}", gm.result());
//! ```
//!
//! ## Pluggable Log-Sum
//!
//! [`GeometricMean`] delegates the running sum of logs to any
//! [`StorelessStatistic`](traits::StorelessStatistic). The strategy can only be
//! replaced while the mean is empty:
//!
//! ```rust
//! use storeless::moment::GeometricMean;
//! use storeless::summary::CompensatedSumOfLogs;
//! use storeless::traits::StorelessStatistic;
//!
//! let mut gm = GeometricMean::with_sum_log_impl(CompensatedSumOfLogs::new());
//! gm.increment(2.0);
//! gm.increment(8.0);
//!
//! assert!((gm.result() - 4.0).abs() < 1e-12);
//! assert!(gm.set_sum_log_impl(CompensatedSumOfLogs::new()).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! Statistic families:
//! - `summary` (default): sum-of-logs accumulators
//! - `moment` (default): geometric mean (implies `summary`)
//! - `full`: Enable all statistic families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

pub(crate) mod math;

#[cfg(feature = "summary")]
#[cfg_attr(docsrs, doc(cfg(feature = "summary")))]
pub mod summary;

#[cfg(feature = "moment")]
#[cfg_attr(docsrs, doc(cfg(feature = "moment")))]
pub mod moment;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "summary")]
    pub use crate::summary::{CompensatedSumOfLogs, SumOfLogs};

    #[cfg(feature = "moment")]
    pub use crate::moment::{DynGeometricMean, GeometricMean};
}

pub use traits::{StatError, StorelessStatistic, UnivariateStatistic};

#[cfg(feature = "summary")]
pub use summary::SumOfLogs;

#[cfg(feature = "moment")]
pub use moment::GeometricMean;
