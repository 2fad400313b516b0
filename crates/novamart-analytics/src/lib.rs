//! # NovaMart Analytics
//!
//! Pure computation layer of the marketing dashboard. Every operation takes
//! immutable tables and explicit parameters and returns a new value; the
//! presentation layer decides when to call them.
//!
//! ## Features
//!
//! - Predicate filtering and multi-key aggregation with time buckets
//! - Attribution model selection
//! - Conversion funnel metrics
//! - Classifier evaluation: confusion matrix, ROC, precision-recall
//! - Per-page dashboard views and JSON/Markdown reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novamart_analytics::{telemetry, DashboardConfig, DashboardEngine};
//! use novamart_datasets::DatasetRegistry;
//!
//! let config = DashboardConfig::from_env();
//! telemetry::init_tracing(&config);
//! let registry = DatasetRegistry::shared();
//! let engine = DashboardEngine::from_registry(&registry, config)?;
//! let funnel = engine.funnel();
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod attribution;
pub mod classification;
pub mod config;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod filter;
pub mod funnel;
pub mod reports;
pub mod stats;
pub mod telemetry;
pub mod views;

#[cfg(test)]
mod sample;

pub use aggregate::{
    aggregate, AggregateSpec, AggregateTable, GroupKey, Reducer, Reduction, SortBy, TimeBucket,
};
pub use attribution::{select_model, ChannelCredit};
pub use classification::{
    confusion_at, precision_recall_curve, roc_curve, threshold_sweep, ClassificationMetrics,
    ConfusionMatrix, PrCurve, RocCurve,
};
pub use config::DashboardConfig;
pub use correlation::CorrelationProvider;
pub use engine::DashboardEngine;
pub use error::{AnalyticsError, Result};
pub use filter::{filter, DateRange, Predicates};
pub use funnel::{compute_funnel, FunnelReport, FunnelStageMetrics};
pub use reports::DashboardReport;
pub use views::Panel;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
