//! Per-page dashboard views.
//!
//! Each submodule adds an `impl DashboardEngine` block for one page of the
//! dashboard. Views return chart-ready data; rendering is the host's job.

pub mod attribution_funnel;
pub mod campaigns;
pub mod customers;
pub mod geography;
pub mod model_eval;
pub mod overview;
pub mod products;

use serde::{Deserialize, Serialize};

pub use attribution_funnel::AttributionFunnelView;
pub use campaigns::{CampaignFilter, CampaignView, SpendMode, SpendShare};
pub use customers::{CustomerView, GroupSummary};
pub use geography::{GeoMetric, GeoPoint};
pub use model_eval::{FeatureBar, ModelEvaluation};
pub use overview::{ChannelMetric, ChannelTotal, Kpis, TrendPoint};
pub use products::{CategoryRegion, ProductMetric, ProductNode};

/// Panel content, or a placeholder when the selection left no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    NoData,
    Ready(T),
}

impl<T> Panel<T> {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::NoData => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Panel<U> {
        match self {
            Self::Ready(value) => Panel::Ready(f(value)),
            Self::NoData => Panel::NoData,
        }
    }
}
