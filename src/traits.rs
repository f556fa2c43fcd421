//! Core traits for storeless statistics
//!
//! A statistic that can be evaluated over a slice implements
//! [`UnivariateStatistic`]. One that can also be fed values one at a time,
//! without retaining them, implements [`StorelessStatistic`]. Accumulators that
//! can be combined across partitions implement [`Mergeable`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Broad category of a [`StatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed arguments the operation cannot accept
    InvalidArgument,
    /// The operation is not allowed in the statistic's current state
    InvalidState,
}

/// Error raised by statistic operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    /// `begin..begin + length` does not lie within the input
    #[error("invalid range: begin {begin} with length {length} exceeds input of length {len}")]
    InvalidRange {
        begin: usize,
        length: usize,
        len: usize,
    },
    /// A configuration change was attempted after values were added
    #[error("implementation must be configured before values are added (n = {n})")]
    AlreadyIncremented { n: u64 },
}

impl StatError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatError::InvalidRange { .. } => ErrorKind::InvalidArgument,
            StatError::AlreadyIncremented { .. } => ErrorKind::InvalidState,
        }
    }

    /// True for bad-input errors
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// True for wrong-state errors
    pub fn is_invalid_state(&self) -> bool {
        self.kind() == ErrorKind::InvalidState
    }
}

/// Validate `begin`/`length` against `values` and return the selected range
///
/// The returned slice is empty when `length == 0`; callers decide what an
/// empty range evaluates to (NaN for every statistic in this crate).
///
/// # Example
///
/// ```
/// use storeless::traits::check_range;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(check_range(&values, 1, 2).unwrap(), &[2.0, 3.0]);
/// assert!(check_range(&values, 3, 2).is_err());
/// ```
pub fn check_range(values: &[f64], begin: usize, length: usize) -> Result<&[f64], StatError> {
    let invalid = StatError::InvalidRange {
        begin,
        length,
        len: values.len(),
    };
    let end = begin.checked_add(length).ok_or(invalid.clone())?;
    values.get(begin..end).ok_or(invalid)
}

/// A statistic computed from a slice of values
pub trait UnivariateStatistic: Debug {
    /// Evaluate the statistic over `values[begin..begin + length]`
    ///
    /// Does not touch any accumulated state. Returns
    /// [`StatError::InvalidRange`] if the range falls outside `values`.
    fn evaluate(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatError>;

    /// Evaluate the statistic over the whole slice
    fn evaluate_all(&self, values: &[f64]) -> Result<f64, StatError> {
        self.evaluate(values, 0, values.len())
    }
}

/// A statistic updated one value at a time in O(1) memory
///
/// Implementations are not synchronised. Mutation goes through `&mut self`,
/// so sharing one instance between threads requires an external lock.
pub trait StorelessStatistic: UnivariateStatistic {
    /// Add a value
    fn increment(&mut self, value: f64);

    /// Current value of the statistic
    fn result(&self) -> f64;

    /// Number of values added since creation or the last [`clear`](Self::clear)
    fn count(&self) -> u64;

    /// Reset to the empty state
    fn clear(&mut self);

    /// Add every value in `values`
    fn increment_all(&mut self, values: &[f64]) {
        for &value in values {
            self.increment(value);
        }
    }

    /// Add `values[begin..begin + length]`
    ///
    /// The range is validated before any value is added.
    fn increment_range(
        &mut self,
        values: &[f64],
        begin: usize,
        length: usize,
    ) -> Result<(), StatError> {
        let range = check_range(values, begin, length)?;
        self.increment_all(range);
        Ok(())
    }

    /// Check if no values have been added
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Accumulators that can absorb the state of another of the same kind
pub trait Mergeable {
    /// Fold `other` into `self` as if its values had been added here
    fn merge(&mut self, other: &Self);
}

impl<S: UnivariateStatistic + ?Sized> UnivariateStatistic for Box<S> {
    fn evaluate(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatError> {
        (**self).evaluate(values, begin, length)
    }
}

impl<S: StorelessStatistic + ?Sized> StorelessStatistic for Box<S> {
    fn increment(&mut self, value: f64) {
        (**self).increment(value);
    }

    fn result(&self) -> f64 {
        (**self).result()
    }

    fn count(&self) -> u64 {
        (**self).count()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
