//! Customer insights page.

use serde::{Deserialize, Serialize};

use novamart_domain::CustomerRecord;

use crate::config::DashboardConfig;
use crate::engine::DashboardEngine;
use crate::error::{AnalyticsError, Result};
use crate::stats::{histogram, BoxSummary, HistogramBin, TrendLine};

/// Box summary for one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: String,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub bin_width: u32,
    pub age_histogram: Vec<HistogramBin>,
    pub ltv_by_segment: Vec<GroupSummary>,
    pub income_ltv_trend: Option<TrendLine>,
    pub satisfaction_by_nps: Vec<GroupSummary>,
}

/// Box summaries of `value` per distinct `key`, in first-seen key order.
/// Missing values are skipped; a group with none left is omitted.
fn summaries_by<K, V>(rows: &[CustomerRecord], key: K, value: V) -> Vec<GroupSummary>
where
    K: Fn(&CustomerRecord) -> &str,
    V: Fn(&CustomerRecord) -> Option<f64>,
{
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for row in rows {
        let k = key(row);
        let slot = match groups.iter().position(|(g, _)| *g == k) {
            Some(i) => i,
            None => {
                groups.push((k, Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.extend(value(row).filter(|v| v.is_finite()));
    }
    groups
        .into_iter()
        .filter_map(|(group, values)| {
            Some(GroupSummary {
                group: group.to_string(),
                summary: BoxSummary::from_values(values)?,
            })
        })
        .collect()
}

impl DashboardEngine {
    /// Age histogram; `bin_width` defaults to the configured width.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a width outside 2..=10.
    #[allow(clippy::cast_precision_loss)]
    pub fn age_histogram(&self, bin_width: Option<u32>) -> Result<Vec<HistogramBin>> {
        let width = bin_width.unwrap_or(self.config.age_bin_width);
        let allowed = DashboardConfig::MIN_AGE_BIN_WIDTH..=DashboardConfig::MAX_AGE_BIN_WIDTH;
        if !allowed.contains(&width) {
            return Err(AnalyticsError::InvalidParameter(format!(
                "age bin width must lie in {}..={}, got {width}",
                DashboardConfig::MIN_AGE_BIN_WIDTH,
                DashboardConfig::MAX_AGE_BIN_WIDTH
            )));
        }
        let ages: Vec<f64> = self.bundle.customers.iter().map(|c| c.age as f64).collect();
        histogram(&ages, f64::from(width))
    }

    #[must_use]
    pub fn ltv_by_segment(&self) -> Vec<GroupSummary> {
        summaries_by(
            &self.bundle.customers,
            |c| c.customer_segment.as_str(),
            |c| c.lifetime_value,
        )
    }

    /// Least-squares fit of lifetime value on income, over customers that
    /// report both.
    #[must_use]
    pub fn income_ltv_trend(&self) -> Option<TrendLine> {
        let (income, ltv): (Vec<f64>, Vec<f64>) = self
            .bundle
            .customers
            .iter()
            .filter_map(|c| Some((c.income?, c.lifetime_value?)))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .unzip();
        TrendLine::fit(&income, &ltv)
    }

    #[must_use]
    pub fn satisfaction_by_nps(&self) -> Vec<GroupSummary> {
        summaries_by(
            &self.bundle.customers,
            |c| c.nps_category.as_str(),
            |c| Some(c.satisfaction_score),
        )
    }

    /// Everything on the customer page.
    ///
    /// # Errors
    ///
    /// As [`DashboardEngine::age_histogram`].
    pub fn customer_view(&self, bin_width: Option<u32>) -> Result<CustomerView> {
        Ok(CustomerView {
            bin_width: bin_width.unwrap_or(self.config.age_bin_width),
            age_histogram: self.age_histogram(bin_width)?,
            ltv_by_segment: self.ltv_by_segment(),
            income_ltv_trend: self.income_ltv_trend(),
            satisfaction_by_nps: self.satisfaction_by_nps(),
        })
    }
}
