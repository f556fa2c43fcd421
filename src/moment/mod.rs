//! Moment-style means over streams
//!
//! # Example
//!
//! ```
//! use storeless::moment::GeometricMean;
//! use storeless::traits::StorelessStatistic;
//!
//! let mut gm = GeometricMean::new();
//!
//! for value in [2.0, 8.0] {
//!     gm.increment(value);
//! }
//!
//! println!("Geometric mean: {}", gm.result());
//! println!("Values: {}", gm.count());
//! ```

mod geometric_mean;

pub use geometric_mean::{DynGeometricMean, GeometricMean};
