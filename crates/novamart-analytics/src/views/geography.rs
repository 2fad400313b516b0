//! Geographic analysis page.

use std::str::FromStr;

use novamart_domain::GeoRecord;
use serde::{Deserialize, Serialize};

use crate::engine::DashboardEngine;
use crate::error::{AnalyticsError, Result};

/// Metric sizing the map bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoMetric {
    TotalRevenue,
    TotalCustomers,
    MarketPenetration,
    YoyGrowth,
    CustomerSatisfaction,
}

impl GeoMetric {
    pub const ALL: [Self; 5] = [
        Self::TotalRevenue,
        Self::TotalCustomers,
        Self::MarketPenetration,
        Self::YoyGrowth,
        Self::CustomerSatisfaction,
    ];

    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "total_revenue",
            Self::TotalCustomers => "total_customers",
            Self::MarketPenetration => "market_penetration",
            Self::YoyGrowth => "yoy_growth",
            Self::CustomerSatisfaction => "customer_satisfaction",
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn of(&self, row: &GeoRecord) -> f64 {
        match self {
            Self::TotalRevenue => row.total_revenue,
            Self::TotalCustomers => row.total_customers as f64,
            Self::MarketPenetration => row.market_penetration,
            Self::YoyGrowth => row.yoy_growth,
            Self::CustomerSatisfaction => row.customer_satisfaction,
        }
    }
}

impl FromStr for GeoMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| AnalyticsError::InvalidParameter(format!("unknown geo metric: {s}")))
    }
}

/// One state bubble: position, size from the chosen metric, colour from
/// satisfaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub size: f64,
    pub satisfaction: f64,
}

impl DashboardEngine {
    /// State table, highest revenue first.
    #[must_use]
    pub fn states_by_revenue(&self) -> Vec<GeoRecord> {
        let mut rows = self.bundle.geographic.clone();
        rows.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
        rows
    }

    #[must_use]
    pub fn geo_bubbles(&self, metric: GeoMetric) -> Vec<GeoPoint> {
        self.bundle
            .geographic
            .iter()
            .map(|g| GeoPoint {
                state: g.state.clone(),
                latitude: g.latitude,
                longitude: g.longitude,
                size: metric.of(g),
                satisfaction: g.customer_satisfaction,
            })
            .collect()
    }
}
