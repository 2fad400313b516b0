//! Executive overview page.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateSpec, Reducer, SortBy, TimeBucket};
use crate::engine::DashboardEngine;
use crate::error::{AnalyticsError, Result};

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_conversions: i64,
    /// Mean over campaigns with a measured (positive) ROAS.
    pub average_roas: Option<f64>,
    pub total_customers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    pub revenue: f64,
}

/// Metric for the per-channel bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelMetric {
    Revenue,
    Conversions,
    Roas,
}

impl ChannelMetric {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Conversions => "conversions",
            Self::Roas => "roas",
        }
    }
}

impl fmt::Display for ChannelMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Revenue => "Revenue",
            Self::Conversions => "Conversions",
            Self::Roas => "ROAS",
        })
    }
}

impl FromStr for ChannelMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "conversions" => Ok(Self::Conversions),
            "roas" => Ok(Self::Roas),
            _ => Err(AnalyticsError::InvalidParameter(format!(
                "unknown channel metric: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelTotal {
    pub channel: String,
    pub value: f64,
}

impl DashboardEngine {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn kpis(&self) -> Kpis {
        let campaigns = &self.bundle.campaigns;
        let measured: Vec<f64> = campaigns
            .iter()
            .map(|c| c.roas)
            .filter(|r| *r > 0.0)
            .collect();

        Kpis {
            total_revenue: campaigns.iter().map(|c| c.revenue).sum(),
            total_conversions: campaigns.iter().map(|c| c.conversions).sum(),
            average_roas: (!measured.is_empty())
                .then(|| measured.iter().sum::<f64>() / measured.len() as f64),
            total_customers: self.bundle.customers.len(),
        }
    }

    /// Revenue summed per bucket, in date order.
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors.
    pub fn revenue_trend(&self, bucket: TimeBucket) -> Result<Vec<TrendPoint>> {
        let table = aggregate(
            &self.bundle.campaigns,
            &AggregateSpec::by(["date"])
                .bucket(bucket)
                .reduce(Reducer::sum("revenue"))
                .sort(SortBy::Keys),
        )?;
        Ok(table
            .rows
            .into_iter()
            .filter_map(|row| {
                Some(TrendPoint {
                    period: row.keys.first()?.as_date()?,
                    revenue: row.values.first().copied().flatten()?,
                })
            })
            .collect())
    }

    /// Per-channel total of `metric`, smallest first.
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors.
    pub fn channel_totals(&self, metric: ChannelMetric) -> Result<Vec<ChannelTotal>> {
        let column = metric.column();
        let table = aggregate(
            &self.bundle.campaigns,
            &AggregateSpec::by(["channel"])
                .reduce(Reducer::sum(column))
                .sort(SortBy::Value {
                    column: column.to_string(),
                    descending: false,
                }),
        )?;
        Ok(table
            .rows
            .into_iter()
            .filter_map(|row| {
                Some(ChannelTotal {
                    channel: row.keys.first()?.to_string(),
                    value: row.values.first().copied().flatten()?,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{self, date};

    #[test]
    fn test_kpis() {
        let kpis = sample::engine().kpis();
        assert_eq!(kpis.total_revenue, 1400.0);
        assert_eq!(kpis.total_conversions, 36);
        assert!((kpis.average_roas.unwrap() - 4.6).abs() < 1e-12);
        assert_eq!(kpis.total_customers, 6);
    }

    #[test]
    fn test_monthly_trend() {
        let trend = sample::engine().revenue_trend(TimeBucket::Month).unwrap();
        let periods: Vec<NaiveDate> = trend.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 4, 1)]);
        assert_eq!(trend[0].revenue, 700.0);
        assert_eq!(trend.iter().map(|p| p.revenue).sum::<f64>(), 1400.0);
    }

    #[test]
    fn test_channel_totals_ascending() {
        let totals = sample::engine().channel_totals(ChannelMetric::Revenue).unwrap();
        let channels: Vec<&str> = totals.iter().map(|t| t.channel.as_str()).collect();
        assert_eq!(channels, ["Social", "Search", "Email"]);
        assert_eq!(totals[2].value, 600.0);

        let conversions = sample::engine().channel_totals(ChannelMetric::Conversions).unwrap();
        assert_eq!(conversions.iter().map(|t| t.value).sum::<f64>(), 36.0);
    }

    #[test]
    fn test_channel_metric_parse() {
        assert_eq!("ROAS".parse::<ChannelMetric>().unwrap(), ChannelMetric::Roas);
        assert!("ctr".parse::<ChannelMetric>().is_err());
    }
}
