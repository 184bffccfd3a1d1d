//! A module for summarizing distributions of samples, e.g. node degrees or component sizes.

use std::fmt;

/// The number of significant digits used for the mean of a distribution.
pub const MEAN_SIGNIFICANT_DIGITS: usize = 6;

/// The mean and extrema of a non-empty set of samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    mean: f64,
    min: f64,
    max: f64,
    digits: usize,
}

impl Summary {
    /// Summarizes the samples, returns `None` if there are none.
    ///
    /// The result doesn't depend on the order of the samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::summary::Summary;
    ///
    /// let summary = Summary::new(&[1.0, 17.0, 4.0, 4.0]).unwrap();
    /// assert_eq!(summary.to_string(), "6.5 [1, 17]");
    ///
    /// assert!(Summary::new(&[]).is_none());
    /// ```
    pub fn new(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        // Accumulate over the sorted samples so the floating point sum doesn't depend on the
        // order the samples were supplied in.
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Some(Self {
            mean,
            min,
            max,
            digits: MEAN_SIGNIFICANT_DIGITS,
        })
    }

    /// Sets the number of significant digits used when displaying the mean.
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits.max(1);
        self
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}]",
            format_significant(self.mean, self.digits),
            self.min,
            self.max
        )
    }
}

/// Summarizes integer samples such as degrees, see [`Summary::new`].
pub fn summarize_counts(samples: &[usize], digits: usize) -> Option<Summary> {
    let samples: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    Summary::new(&samples).map(|summary| summary.with_digits(digits))
}

/// Formats a number with the given number of significant digits, dropping trailing zeros, the
/// way C's `%g` conversion does.
///
/// # Examples
///
/// ```
/// use netcards::summary::format_significant;
///
/// assert_eq!(format_significant(156.0 / 34.0, 6), "4.58824");
/// assert_eq!(format_significant(2.5, 6), "2.5");
/// assert_eq!(format_significant(0.0, 6), "0");
/// assert_eq!(format_significant(12_345_678.0, 3), "1.23e+07");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);

    // The exponent has to be read after rounding to the requested precision, 9.9999996 rounds up
    // to 10 and changes the exponent.
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let summary = Summary::new(&[1.0, 17.0, 4.0]).unwrap();

        assert_eq!(summary.min(), 1.0);
        assert_eq!(summary.max(), 17.0);
        assert_eq!(summary.mean(), 22.0 / 3.0);
    }

    #[test]
    fn empty() {
        assert!(Summary::new(&[]).is_none());
        assert!(summarize_counts(&[], MEAN_SIGNIFICANT_DIGITS).is_none());
    }

    #[test]
    fn degenerate_keeps_range() {
        let summary = summarize_counts(&[0], MEAN_SIGNIFICANT_DIGITS).unwrap();
        assert_eq!(summary.to_string(), "0 [0, 0]");

        let summary = summarize_counts(&[3, 3, 3], MEAN_SIGNIFICANT_DIGITS).unwrap();
        assert_eq!(summary.to_string(), "3 [3, 3]");
    }

    #[test]
    fn order_independent() {
        let a = Summary::new(&[0.1, 0.2, 0.3, 1e9, 17.0]).unwrap();
        let b = Summary::new(&[17.0, 1e9, 0.3, 0.2, 0.1]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn fractional_extrema() {
        let summary = Summary::new(&[0.5, 1.25]).unwrap();
        assert_eq!(summary.to_string(), "0.875 [0.5, 1.25]");
    }

    #[test]
    fn digits() {
        let summary = summarize_counts(&[1, 2, 2], 3).unwrap();
        assert_eq!(summary.to_string(), "1.67 [1, 2]");
    }

    #[test]
    fn significant() {
        assert_eq!(format_significant(50.0 / 23.0, 6), "2.17391");
        assert_eq!(format_significant(1.08, 6), "1.08");
        assert_eq!(format_significant(100.0, 3), "100");
        assert_eq!(format_significant(1000.0, 3), "1e+03");
        assert_eq!(format_significant(9.9999996, 6), "10");
        assert_eq!(format_significant(0.000123456, 3), "0.000123");
        assert_eq!(format_significant(0.0000123456, 3), "1.23e-05");
        assert_eq!(format_significant(-0.5, 3), "-0.5");
        assert_eq!(format_significant(66.66666, 3), "66.7");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.5706384782076823, 3), 0.571);
        assert_eq!(round_to(-0.47561309768461413, 3), -0.476);
        assert_eq!(round_to(0.0, 3), 0.0);
    }
}
