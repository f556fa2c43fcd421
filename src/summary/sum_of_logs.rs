//! Running sum of natural logarithms

use crate::math::ln;
use crate::traits::{check_range, Mergeable, StatError, StorelessStatistic, UnivariateStatistic};

/// Sum of the natural logarithms of the values seen
///
/// The default log-sum strategy behind
/// [`GeometricMean`](crate::moment::GeometricMean). Values are not validated:
/// a negative value contributes NaN and a zero contributes negative infinity,
/// exactly as `f64::ln` does.
///
/// # Example
///
/// ```
/// use storeless::summary::SumOfLogs;
/// use storeless::traits::StorelessStatistic;
///
/// let mut logs = SumOfLogs::new();
/// logs.increment(1.0);
/// logs.increment(core::f64::consts::E);
///
/// assert_eq!(logs.count(), 2);
/// assert!((logs.result() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SumOfLogs {
    /// Number of values seen
    n: u64,
    /// Running sum of logs
    value: f64,
}

impl SumOfLogs {
    /// Create an empty sum
    pub fn new() -> Self {
        Self { n: 0, value: 0.0 }
    }
}

impl UnivariateStatistic for SumOfLogs {
    /// Sum of logs over the range, or NaN when the range is empty
    fn evaluate(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatError> {
        let range = check_range(values, begin, length)?;
        if range.is_empty() {
            return Ok(f64::NAN);
        }
        Ok(range.iter().fold(0.0, |sum, &v| sum + ln(v)))
    }
}

impl StorelessStatistic for SumOfLogs {
    fn increment(&mut self, value: f64) {
        self.value += ln(value);
        self.n += 1;
    }

    fn result(&self) -> f64 {
        self.value
    }

    fn count(&self) -> u64 {
        self.n
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Mergeable for SumOfLogs {
    fn merge(&mut self, other: &Self) {
        self.value += other.value;
        self.n += other.n;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SumOfLogs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SumOfLogs", 2)?;
        state.serialize_field("n", &self.n)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SumOfLogs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct SumOfLogsData {
            n: u64,
            value: f64,
        }

        let data = SumOfLogsData::deserialize(deserializer)?;
        Ok(SumOfLogs {
            n: data.n,
            value: data.value,
        })
    }
}
