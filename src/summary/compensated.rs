//! Kahan-compensated sum of natural logarithms

use crate::math::ln;
use crate::traits::{check_range, Mergeable, StatError, StorelessStatistic, UnivariateStatistic};

/// Running compensated sum
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct KahanSum {
    sum: f64,
    /// Low-order bits lost by the last addition
    c: f64,
}

impl KahanSum {
    fn add(&mut self, x: f64) {
        let y = x - self.c;
        let t = self.sum + y;
        // inf - inf would poison the compensation with NaN
        self.c = if t.is_finite() { (t - self.sum) - y } else { 0.0 };
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

/// Sum of logs with Kahan compensation
///
/// A drop-in alternative to [`SumOfLogs`](super::SumOfLogs) for very long
/// streams, where the plain running sum loses low-order bits. Infinite and NaN
/// logs propagate exactly as they do in the plain sum.
///
/// # Example
///
/// ```
/// use storeless::moment::GeometricMean;
/// use storeless::summary::CompensatedSumOfLogs;
/// use storeless::traits::StorelessStatistic;
///
/// let mut gm = GeometricMean::with_sum_log_impl(CompensatedSumOfLogs::new());
/// gm.increment_all(&[1.0, 4.0, 16.0]);
///
/// assert!((gm.result() - 4.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompensatedSumOfLogs {
    /// Number of values seen
    n: u64,
    /// Compensated running sum of logs
    sum: KahanSum,
}

impl CompensatedSumOfLogs {
    /// Create an empty sum
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnivariateStatistic for CompensatedSumOfLogs {
    fn evaluate(&self, values: &[f64], begin: usize, length: usize) -> Result<f64, StatError> {
        let range = check_range(values, begin, length)?;
        if range.is_empty() {
            return Ok(f64::NAN);
        }
        let mut sum = KahanSum::default();
        for &v in range {
            sum.add(ln(v));
        }
        Ok(sum.value())
    }
}

impl StorelessStatistic for CompensatedSumOfLogs {
    fn increment(&mut self, value: f64) {
        self.sum.add(ln(value));
        self.n += 1;
    }

    fn result(&self) -> f64 {
        self.sum.value()
    }

    fn count(&self) -> u64 {
        self.n
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Mergeable for CompensatedSumOfLogs {
    fn merge(&mut self, other: &Self) {
        self.sum.add(other.sum.sum);
        self.sum.add(-other.sum.c);
        self.n += other.n;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CompensatedSumOfLogs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CompensatedSumOfLogs", 3)?;
        state.serialize_field("n", &self.n)?;
        state.serialize_field("sum", &self.sum.sum)?;
        state.serialize_field("compensation", &self.sum.c)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CompensatedSumOfLogs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct CompensatedData {
            n: u64,
            sum: f64,
            compensation: f64,
        }

        let data = CompensatedData::deserialize(deserializer)?;
        Ok(CompensatedSumOfLogs {
            n: data.n,
            sum: KahanSum {
                sum: data.sum,
                c: data.compensation,
            },
        })
    }
}
