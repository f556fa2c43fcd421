//! Geometric mean over a pluggable sum of logs
//!
//! The geometric mean of `n` values is `exp(sum(ln x_i) / n)`. The running
//! log-sum is delegated to a [`StorelessStatistic`] strategy, [`SumOfLogs`] by
//! default, which can be swapped while no values have been added.

use crate::math::exp;
use crate::summary::SumOfLogs;
use crate::traits::{Mergeable, StatError, StorelessStatistic, UnivariateStatistic};

#[cfg(feature = "std")]
use std::boxed::Box;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

/// Streaming geometric mean
///
/// Every value is forwarded unchanged to the log-sum strategy; the mean is
/// derived from the strategy's state on demand. Because of that:
///
/// - If any value is negative, the result is NaN.
/// - If all values are non-negative and finite but at least one is 0, the
///   result is 0.
/// - If both positive and negative infinity are among the values, the result
///   is NaN.
///
/// Not synchronised. Share between threads behind a lock.
///
/// # Example
///
/// ```
/// use storeless::moment::GeometricMean;
/// use storeless::traits::{StorelessStatistic, UnivariateStatistic};
///
/// let mut gm = GeometricMean::new();
///
/// for value in [1.0, 3.0, 9.0] {
///     gm.increment(value);
/// }
///
/// assert_eq!(gm.count(), 3);
/// assert!((gm.result() - 3.0).abs() < 1e-12);
///
/// // Batch evaluation leaves the accumulated state alone
/// let batch = gm.evaluate(&[2.0, 8.0, 100.0], 0, 2).unwrap();
/// assert!((batch - 4.0).abs() < 1e-12);
/// assert_eq!(gm.count(), 3);
/// ```
///
/// # Swapping the log-sum strategy
///
/// ```
/// use storeless::moment::GeometricMean;
/// use storeless::summary::SumOfLogs;
/// use storeless::traits::StorelessStatistic;
///
/// let mut gm = GeometricMean::new();
/// gm.set_sum_log_impl(SumOfLogs::new()).unwrap();
///
/// gm.increment(5.0);
/// assert!(gm.set_sum_log_impl(SumOfLogs::new()).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometricMean<S = SumOfLogs> {
    /// Log-sum strategy
    sum_of_logs: S,
}

/// Geometric mean whose log-sum strategy is chosen at runtime
pub type DynGeometricMean = GeometricMean<Box<dyn StorelessStatistic>>;

impl GeometricMean {
    /// Create an empty geometric mean backed by a fresh [`SumOfLogs`]
    pub fn new() -> Self {
        Self {
            sum_of_logs: SumOfLogs::new(),
        }
    }
}

impl DynGeometricMean {
    /// Create a geometric mean over a boxed strategy of any type
    pub fn boxed<T: StorelessStatistic + 'static>(sum_log_impl: T) -> Self {
        Self {
            sum_of_logs: Box::new(sum_log_impl),
        }
    }
}

impl<S: StorelessStatistic> GeometricMean<S> {
    /// Create a geometric mean using the given log-sum strategy
    ///
    /// The strategy is used as-is, including any values it already holds.
    pub fn with_sum_log_impl(sum_log_impl: S) -> Self {
        Self {
            sum_of_logs: sum_log_impl,
        }
    }

    /// Replace the log-sum strategy
    ///
    /// Must be called before any value is added. Returns
    /// [`StatError::AlreadyIncremented`] otherwise, leaving the current
    /// strategy in place. The rejected `sum_log_impl` is consumed and dropped;
    /// check [`has_data`](Self::has_data) first to keep it.
    pub fn set_sum_log_impl(&mut self, sum_log_impl: S) -> Result<(), StatError> {
        self.check_empty()?;
        tracing::debug!(sum_log_impl = ?sum_log_impl, "installing sum of logs implementation");
        self.sum_of_logs = sum_log_impl;
        Ok(())
    }

    /// The active log-sum strategy
    pub fn sum_log_impl(&self) -> &S {
        &self.sum_of_logs
    }

    /// Consume the mean and return its strategy
    pub fn into_sum_log_impl(self) -> S {
        self.sum_of_logs
    }

    /// Check if any values have been added
    pub fn has_data(&self) -> bool {
        self.sum_of_logs.count() > 0
    }

    fn check_empty(&self) -> Result<(), StatError> {
        if self.has_data() {
            let n = self.count();
            tracing::warn!(n, "rejected sum of logs replacement after values were added");
            return Err(StatError::AlreadyIncremented { n });
        }
        Ok(())
    }
}

impl<S: StorelessStatistic> UnivariateStatistic for GeometricMean<S> {
    /// Geometric mean of `values[begin..begin + length]`
    ///
    /// NaN if `length == 0` or if any value in the range is negative.
    fn evaluate(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatError> {
        let sum = self.sum_of_logs.evaluate(values, begin, length)?;
        Ok(exp(sum / length as f64))
    }
}

impl<S: StorelessStatistic> StorelessStatistic for GeometricMean<S> {
    fn increment(&mut self, value: f64) {
        self.sum_of_logs.increment(value);
    }

    fn result(&self) -> f64 {
        let n = self.sum_of_logs.count();
        if n > 0 {
            exp(self.sum_of_logs.result() / n as f64)
        } else {
            f64::NAN
        }
    }

    fn count(&self) -> u64 {
        self.sum_of_logs.count()
    }

    fn clear(&mut self) {
        self.sum_of_logs.clear();
    }
}

impl<S: Mergeable> Mergeable for GeometricMean<S> {
    fn merge(&mut self, other: &Self) {
        self.sum_of_logs.merge(&other.sum_of_logs);
    }
}

#[cfg(feature = "serde")]
impl<S: serde::Serialize> serde::Serialize for GeometricMean<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GeometricMean", 1)?;
        state.serialize_field("sum_of_logs", &self.sum_of_logs)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, S: serde::Deserialize<'de>> serde::Deserialize<'de> for GeometricMean<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct GeometricMeanData<S> {
            sum_of_logs: S,
        }

        let data = GeometricMeanData::<S>::deserialize(deserializer)?;
        Ok(GeometricMean {
            sum_of_logs: data.sum_of_logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ln;
    use crate::summary::CompensatedSumOfLogs;

    #[test]
    fn test_basic() {
        let mut gm = GeometricMean::new();

        gm.increment(2.0);
        gm.increment(8.0);

        assert_eq!(gm.count(), 2);
        assert!((gm.result() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_exp_mean_log() {
        let values = [1.5, 2.25, 7.0, 13.5, 0.125, 99.0];
        let mut gm = GeometricMean::new();
        gm.increment_all(&values);

        let mean_log = values.iter().map(|&v| ln(v)).sum::<f64>() / values.len() as f64;
        assert!((gm.result() - exp(mean_log)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        let gm = GeometricMean::new();

        assert!(gm.is_empty());
        assert!(!gm.has_data());
        assert!(gm.result().is_nan());
    }

    #[test]
    fn test_single_value() {
        let mut gm = GeometricMean::new();
        gm.increment(42.0);

        assert!((gm.result() - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_is_nan() {
        let mut gm = GeometricMean::new();
        gm.increment_all(&[1.0, 2.0, -3.0, 4.0]);

        assert!(gm.result().is_nan());
    }

    #[test]
    fn test_zero_gives_zero() {
        let mut gm = GeometricMean::new();
        gm.increment_all(&[5.0, 0.0, 12.0]);

        assert_eq!(gm.result(), 0.0);
    }

    #[test]
    fn test_mixed_infinities_are_nan() {
        let mut gm = GeometricMean::new();
        gm.increment(f64::INFINITY);
        gm.increment(0.0);

        assert!(gm.result().is_nan());
    }

    #[test]
    fn test_both_signed_infinities_are_nan() {
        let values = [f64::INFINITY, f64::NEG_INFINITY, 2.0];

        let mut gm = GeometricMean::new();
        gm.increment_all(&values);
        assert!(gm.result().is_nan());
        assert!(gm.evaluate_all(&values).unwrap().is_nan());

        let mut gm = GeometricMean::with_sum_log_impl(CompensatedSumOfLogs::new());
        gm.increment_all(&values);
        assert!(gm.result().is_nan());
        assert!(gm.evaluate_all(&values).unwrap().is_nan());
    }

    #[test]
    fn test_negative_infinity_alone_is_nan() {
        let mut gm = GeometricMean::new();
        gm.increment(f64::NEG_INFINITY);

        assert!(gm.result().is_nan());
        assert!(gm.evaluate_all(&[f64::NEG_INFINITY]).unwrap().is_nan());
    }

    #[test]
    fn test_positive_infinity() {
        let mut gm = GeometricMean::new();
        gm.increment_all(&[1.0, f64::INFINITY]);

        assert_eq!(gm.result(), f64::INFINITY);
    }

    #[test]
    fn test_clear() {
        let mut gm = GeometricMean::new();
        gm.increment_all(&[1.0, 2.0, 3.0]);

        gm.clear();

        assert_eq!(gm.count(), 0);
        assert!(gm.result().is_nan());

        // Reusable after clear
        gm.increment(9.0);
        assert!((gm.result() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate() {
        let gm = GeometricMean::new();
        let values = [1000.0, 1.0, 3.0, 9.0, -1.0];

        let result = gm.evaluate(&values, 1, 3).unwrap();
        assert!((result - 3.0).abs() < 1e-12);

        assert!(gm.evaluate(&values, 0, 5).unwrap().is_nan());
        assert!(gm.evaluate(&values, 2, 0).unwrap().is_nan());
        assert!(gm.is_empty());
    }

    #[test]
    fn test_evaluate_invalid_range() {
        let gm = GeometricMean::new();
        let err = gm.evaluate(&[1.0, 2.0, 3.0], 2, 5).unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err,
            StatError::InvalidRange {
                begin: 2,
                length: 5,
                len: 3
            }
        );
    }

    #[test]
    fn test_set_sum_log_impl_before_data() {
        let mut gm = GeometricMean::with_sum_log_impl(CompensatedSumOfLogs::new());
        assert!(gm.set_sum_log_impl(CompensatedSumOfLogs::new()).is_ok());

        gm.increment_all(&[2.0, 32.0]);
        assert!((gm.result() - 8.0).abs() < 1e-12);
        assert_eq!(gm.sum_log_impl().count(), 2);
    }

    #[test]
    fn test_set_sum_log_impl_replaces_strategy() {
        let mut gm = GeometricMean::new();

        // A pre-filled strategy is observable through the mean right away
        let mut seeded = SumOfLogs::new();
        seeded.increment(100.0);
        gm.set_sum_log_impl(seeded.clone()).unwrap();

        assert_eq!(gm.sum_log_impl(), &seeded);
        assert_eq!(gm.count(), 1);
        assert!((gm.result() - 100.0).abs() < 1e-10);

        gm.increment(1.0);
        assert!((gm.result() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_set_sum_log_impl_after_data_fails() {
        let mut gm = GeometricMean::new();
        gm.increment(4.0);

        let mut replacement = SumOfLogs::new();
        replacement.increment(100.0);
        replacement.increment(100.0);

        let err = gm.set_sum_log_impl(replacement).unwrap_err();
        assert_eq!(err, StatError::AlreadyIncremented { n: 1 });
        assert!(err.is_invalid_state());

        // Nothing was replaced
        assert_eq!(gm.count(), 1);
        assert!((gm.result() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_sum_log_impl_after_clear() {
        let mut gm = GeometricMean::new();
        gm.increment(4.0);
        gm.clear();

        assert!(gm.set_sum_log_impl(SumOfLogs::new()).is_ok());
    }

    #[test]
    fn test_injected_strategy_keeps_state() {
        let mut logs = SumOfLogs::new();
        logs.increment(2.0);
        logs.increment(8.0);

        let gm = GeometricMean::with_sum_log_impl(logs);

        assert_eq!(gm.count(), 2);
        assert!((gm.result() - 4.0).abs() < 1e-12);

        let logs = gm.into_sum_log_impl();
        assert!((logs.result() - ln(16.0)).abs() < 1e-12);
    }

    #[test]
    fn test_boxed_strategy() {
        let mut gm = DynGeometricMean::boxed(SumOfLogs::new());
        gm.set_sum_log_impl(Box::new(CompensatedSumOfLogs::new()))
            .unwrap();

        gm.increment_all(&[3.0, 27.0]);
        assert!((gm.result() - 9.0).abs() < 1e-12);
        assert!(gm
            .set_sum_log_impl(Box::new(SumOfLogs::new()))
            .unwrap_err()
            .is_invalid_state());
    }

    #[test]
    fn test_merge() {
        let mut a = GeometricMean::new();
        let mut b = GeometricMean::new();
        a.increment_all(&[1.0, 2.0]);
        b.increment_all(&[4.0, 8.0]);

        a.merge(&b);

        // (1 * 2 * 4 * 8)^(1/4) = 64^(1/4)
        assert_eq!(a.count(), 4);
        assert!((a.result() - 2.0 * core::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
