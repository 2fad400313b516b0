//! Descriptive statistics behind the customer and product charts.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Max, Median, Min, OrderStatistics};

use crate::error::{AnalyticsError, Result};

/// Five-number summary for a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl BoxSummary {
    /// `None` for an empty sample.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mut data = Data::new(values);
        Some(Self {
            min: data.min(),
            q1: data.lower_quartile(),
            median: data.median(),
            q3: data.upper_quartile(),
            max: data.max(),
            count,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Fixed-width bins starting at the sample minimum. Bins are half-open
/// except the last, which also holds the maximum.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive or non-finite width.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn histogram(values: &[f64], bin_width: f64) -> Result<Vec<HistogramBin>> {
    if !(bin_width.is_finite() && bin_width > 0.0) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "bin width must be positive, got {bin_width}"
        )));
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Ok(Vec::new());
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let n = (((hi - lo) / bin_width).ceil() as usize).max(1);
    let mut bins: Vec<HistogramBin> = (0..n)
        .map(|i| HistogramBin {
            lower: lo + i as f64 * bin_width,
            upper: lo + (i + 1) as f64 * bin_width,
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - lo) / bin_width).floor() as usize).min(n - 1);
        bins[idx].count += 1;
    }
    Ok(bins)
}

/// Ordinary least-squares fit `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// `None` when `y` is constant.
    pub r_squared: Option<f64>,
}

impl TrendLine {
    /// `None` with fewer than two points or a constant `x`.
    #[must_use]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        use statrs::statistics::Statistics;

        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let var_x = xs.iter().variance();
        if !var_x.is_finite() || var_x == 0.0 {
            return None;
        }
        let var_y = ys.iter().variance();
        let cov = xs.iter().covariance(ys.iter());
        let slope = cov / var_x;
        let intercept = ys.iter().mean() - slope * xs.iter().mean();
        let r_squared = (var_y > 0.0).then(|| cov * cov / (var_x * var_y));
        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}
