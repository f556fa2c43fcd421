//! Summary statistics over streams
//!
//! Log-sum accumulators used as the building block of the geometric mean.
//!
//! # Algorithms
//!
//! - [`SumOfLogs`]: Plain running sum of natural logarithms
//! - [`CompensatedSumOfLogs`]: Kahan-compensated variant for long streams
//!
//! # Example
//!
//! ```
//! use storeless::summary::SumOfLogs;
//! use storeless::traits::{StorelessStatistic, UnivariateStatistic};
//!
//! let mut logs = SumOfLogs::new();
//! logs.increment_all(&[1.0, 10.0, 100.0]);
//!
//! let batch = logs.evaluate_all(&[1.0, 10.0, 100.0]).unwrap();
//! assert_eq!(batch, logs.result());
//! ```

mod compensated;
mod sum_of_logs;

pub use compensated::CompensatedSumOfLogs;
pub use sum_of_logs::SumOfLogs;
