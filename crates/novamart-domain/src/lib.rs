//! # NovaMart Marketing Analytics - Domain Model
//!
//! Typed records for the eleven datasets behind the marketing dashboard,
//! plus the column-access seam used by the generic filter and aggregation
//! engines. These types are the single source of truth across the loader
//! and the analytics layer.
//!
//! Every table is an immutable, ordered `Vec` of records. Nothing in this
//! crate mutates a loaded table; derived results are new values.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// COLUMN ACCESS
// =============================================================================

/// A single cell, as seen by the generic table engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl Value {
    /// Numeric view of the cell; text, dates and missing cells have none.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// Fixed-schema row with named columns.
///
/// `value` returns `None` only for a column the schema does not have; a
/// known column with no data is `Some(Value::Missing)`.
pub trait Record {
    /// Column names, in file order.
    const COLUMNS: &'static [&'static str];

    fn value(&self, column: &str) -> Option<Value>;

    fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column)
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Rule for splitting conversion credit across touched channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    FirstTouch,
    LastTouch,
    Linear,
    TimeDecay,
    PositionBased,
}

impl AttributionModel {
    pub const ALL: [Self; 5] = [
        Self::FirstTouch,
        Self::LastTouch,
        Self::Linear,
        Self::TimeDecay,
        Self::PositionBased,
    ];

    /// Column name in the attribution table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTouch => "first_touch",
            Self::LastTouch => "last_touch",
            Self::Linear => "linear",
            Self::TimeDecay => "time_decay",
            Self::PositionBased => "position_based",
        }
    }

    /// Human label, e.g. "Time Decay".
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FirstTouch => "First Touch",
            Self::LastTouch => "Last Touch",
            Self::Linear => "Linear",
            Self::TimeDecay => "Time Decay",
            Self::PositionBased => "Position Based",
        }
    }
}

impl fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributionModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::InvalidModel(s.to_string()))
    }
}

// =============================================================================
// MARKETING RECORDS
// =============================================================================

/// One campaign-day row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub date: NaiveDate,
    pub channel: String,
    pub region: String,
    pub quarter: String,
    pub campaign_type: String,
    pub spend: f64,
    pub revenue: f64,
    pub conversions: i64,
    /// Return on ad spend; 0 means "not measured" and is excluded from averages.
    pub roas: f64,
}

impl Record for CampaignRecord {
    const COLUMNS: &'static [&'static str] = &[
        "date",
        "channel",
        "region",
        "quarter",
        "campaign_type",
        "spend",
        "revenue",
        "conversions",
        "roas",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let value: Value = match column {
            "date" => self.date.into(),
            "channel" => self.channel.as_str().into(),
            "region" => self.region.as_str().into(),
            "quarter" => self.quarter.as_str().into(),
            "campaign_type" => self.campaign_type.as_str().into(),
            "spend" => self.spend.into(),
            "revenue" => self.revenue.into(),
            "conversions" => self.conversions.into(),
            "roas" => self.roas.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub age: i64,
    /// Blank in the file when the customer did not report it.
    pub income: Option<f64>,
    pub customer_segment: String,
    pub lifetime_value: Option<f64>,
    pub total_purchases: i64,
    pub tenure_months: i64,
    pub satisfaction_score: f64,
    pub nps_category: String,
}

impl Record for CustomerRecord {
    const COLUMNS: &'static [&'static str] = &[
        "age",
        "income",
        "customer_segment",
        "lifetime_value",
        "total_purchases",
        "tenure_months",
        "satisfaction_score",
        "nps_category",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let value: Value = match column {
            "age" => self.age.into(),
            "income" => self.income.into(),
            "customer_segment" => self.customer_segment.as_str().into(),
            "lifetime_value" => self.lifetime_value.into(),
            "total_purchases" => self.total_purchases.into(),
            "tenure_months" => self.tenure_months.into(),
            "satisfaction_score" => self.satisfaction_score.into(),
            "nps_category" => self.nps_category.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub category: String,
    pub subcategory: String,
    pub product_name: String,
    pub sales: f64,
    /// Percentage; negative for loss-making products.
    pub profit_margin: f64,
    pub units_sold: i64,
    pub region: String,
}

impl Record for ProductRecord {
    const COLUMNS: &'static [&'static str] = &[
        "category",
        "subcategory",
        "product_name",
        "sales",
        "profit_margin",
        "units_sold",
        "region",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let value: Value = match column {
            "category" => self.category.as_str().into(),
            "subcategory" => self.subcategory.as_str().into(),
            "product_name" => self.product_name.as_str().into(),
            "sales" => self.sales.into(),
            "profit_margin" => self.profit_margin.into(),
            "units_sold" => self.units_sold.into(),
            "region" => self.region.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

/// State-level market metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub state: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_revenue: f64,
    pub total_customers: i64,
    pub market_penetration: f64,
    pub yoy_growth: f64,
    pub customer_satisfaction: f64,
    pub store_count: i64,
}

impl GeoRecord {
    /// Fails on the first state that appears twice.
    pub fn ensure_unique_states(rows: &[Self]) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            if !seen.insert(row.state.as_str()) {
                return Err(DomainError::DuplicateKey {
                    column: "state".to_string(),
                    key: row.state.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Record for GeoRecord {
    const COLUMNS: &'static [&'static str] = &[
        "state",
        "region",
        "latitude",
        "longitude",
        "total_revenue",
        "total_customers",
        "market_penetration",
        "yoy_growth",
        "customer_satisfaction",
        "store_count",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let value: Value = match column {
            "state" => self.state.as_str().into(),
            "region" => self.region.as_str().into(),
            "latitude" => self.latitude.into(),
            "longitude" => self.longitude.into(),
            "total_revenue" => self.total_revenue.into(),
            "total_customers" => self.total_customers.into(),
            "market_penetration" => self.market_penetration.into(),
            "yoy_growth" => self.yoy_growth.into(),
            "customer_satisfaction" => self.customer_satisfaction.into(),
            "store_count" => self.store_count.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Per-channel conversion credit under each of the five attribution models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub channel: String,
    pub first_touch: f64,
    pub last_touch: f64,
    pub linear: f64,
    pub time_decay: f64,
    pub position_based: f64,
}

impl AttributionRecord {
    #[must_use]
    pub const fn credit(&self, model: AttributionModel) -> f64 {
        match model {
            AttributionModel::FirstTouch => self.first_touch,
            AttributionModel::LastTouch => self.last_touch,
            AttributionModel::Linear => self.linear,
            AttributionModel::TimeDecay => self.time_decay,
            AttributionModel::PositionBased => self.position_based,
        }
    }
}

impl Record for AttributionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "channel",
        "first_touch",
        "last_touch",
        "linear",
        "time_decay",
        "position_based",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        if column == "channel" {
            return Some(self.channel.as_str().into());
        }
        column
            .parse::<AttributionModel>()
            .ok()
            .map(|model| self.credit(model).into())
    }
}

// =============================================================================
// FUNNEL
// =============================================================================

/// Raw funnel row as read from disk; which fields are populated depends on
/// the file's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStageRecord {
    pub stage: String,
    pub visitors: Option<i64>,
    pub conversions: Option<i64>,
    pub conversion_rate: Option<f64>,
}

/// Visitor and conversion counts for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCounts {
    pub stage: String,
    pub visitors: i64,
    pub conversions: i64,
    /// Value of the file's `conversion_rate` column, when it has one.
    pub reported_rate: Option<f64>,
}

/// Stage with only a reported conversion rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRate {
    pub stage: String,
    /// `None` when the cell was not numeric.
    pub conversion_rate: Option<f64>,
}

/// Funnel table shape, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunnelInput {
    /// Counts are available. `rate_reported` is true when the file also had
    /// a `conversion_rate` column, which then takes precedence over the
    /// computed rate.
    ByCounts {
        stages: Vec<StageCounts>,
        rate_reported: bool,
    },
    ByRate(Vec<StageRate>),
}

impl FunnelInput {
    /// Pick the funnel shape from the columns present in the source file.
    ///
    /// Counts win when both `visitors` and `conversions` columns exist; every
    /// row must then carry both values.
    pub fn resolve(
        rows: Vec<FunnelStageRecord>,
        has_counts: bool,
        has_rate: bool,
    ) -> Result<Self, DomainError> {
        if has_counts {
            let stages = rows
                .into_iter()
                .enumerate()
                .map(|(row, r)| {
                    let visitors = r.visitors.ok_or_else(|| DomainError::MissingValue {
                        column: "visitors".to_string(),
                        row,
                    })?;
                    let conversions = r.conversions.ok_or_else(|| DomainError::MissingValue {
                        column: "conversions".to_string(),
                        row,
                    })?;
                    Ok(StageCounts {
                        stage: r.stage,
                        visitors,
                        conversions,
                        reported_rate: if has_rate { r.conversion_rate } else { None },
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            return Ok(Self::ByCounts {
                stages,
                rate_reported: has_rate,
            });
        }

        if has_rate {
            return Ok(Self::ByRate(
                rows.into_iter()
                    .map(|r| StageRate {
                        stage: r.stage,
                        conversion_rate: r.conversion_rate,
                    })
                    .collect(),
            ));
        }

        Err(DomainError::MissingColumns(
            "funnel needs visitors+conversions or conversion_rate".to_string(),
        ))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::ByCounts { stages, .. } => stages.len(),
            Self::ByRate(stages) => stages.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// MODEL EVALUATION RECORDS
// =============================================================================

/// One scored lead from the precomputed classifier run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Ground truth; expected to be 0 or 1, checked by the metrics engine.
    pub actual_converted: i64,
    pub predicted_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportanceRecord {
    pub feature: String,
    pub importance: f64,
    pub importance_std: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningCurvePoint {
    pub training_size: i64,
    pub train_score: f64,
    pub validation_score: f64,
}

impl LearningCurvePoint {
    /// Training sizes must strictly increase and scores lie in [0, 1].
    pub fn validate_sequence(points: &[Self]) -> Result<(), DomainError> {
        for p in points {
            for (name, score) in [
                ("train_score", p.train_score),
                ("validation_score", p.validation_score),
            ] {
                if !(0.0..=1.0).contains(&score) {
                    return Err(DomainError::OutOfRange {
                        column: name.to_string(),
                        value: score,
                    });
                }
            }
        }
        if let Some(w) = points
            .windows(2)
            .find(|w| w[1].training_size <= w[0].training_size)
        {
            return Err(DomainError::NonIncreasingSequence {
                column: "training_size".to_string(),
                previous: w[0].training_size,
                next: w[1].training_size,
            });
        }
        Ok(())
    }
}

// =============================================================================
// PASS-THROUGH TABLES
// =============================================================================

/// Customer journey table with an open schema, carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Square metric-by-metric correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    const TOLERANCE: f64 = 1e-6;

    /// Build a matrix, checking it is square, symmetric, bounded in
    /// [-1, 1] and has a unit diagonal.
    pub fn new(labels: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self, DomainError> {
        let n = labels.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return Err(DomainError::NotSquare {
                labels: n,
                rows: values.len(),
            });
        }
        for (i, row) in values.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if !(-1.0 - Self::TOLERANCE..=1.0 + Self::TOLERANCE).contains(&v) {
                    return Err(DomainError::OutOfRange {
                        column: labels[j].clone(),
                        value: v,
                    });
                }
                if i == j && (v - 1.0).abs() > Self::TOLERANCE {
                    return Err(DomainError::InvalidDiagonal {
                        label: labels[i].clone(),
                        value: v,
                    });
                }
                if (v - values[j][i]).abs() > Self::TOLERANCE {
                    return Err(DomainError::AsymmetricMatrix {
                        row: labels[i].clone(),
                        column: labels[j].clone(),
                    });
                }
            }
        }
        Ok(Self { labels, values })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Correlation between two named metrics.
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == column)?;
        Some(self.values[i][j])
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid attribution model: {0}")]
    InvalidModel(String),

    #[error("Matrix is not square: {labels} labels, {rows} rows")]
    NotSquare { labels: usize, rows: usize },

    #[error("Matrix is not symmetric at ({row}, {column})")]
    AsymmetricMatrix { row: String, column: String },

    #[error("Diagonal entry for {label} is {value}, expected 1.0")]
    InvalidDiagonal { label: String, value: f64 },

    #[error("Value {value} out of range in column {column}")]
    OutOfRange { column: String, value: f64 },

    #[error("Column {column} must strictly increase: {previous} then {next}")]
    NonIncreasingSequence {
        column: String,
        previous: i64,
        next: i64,
    },

    #[error("Duplicate {column}: {key}")]
    DuplicateKey { column: String, key: String },

    #[error("Missing value in column {column} at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Missing columns: {0}")]
    MissingColumns(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> CampaignRecord {
        CampaignRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            channel: "Email".to_string(),
            region: "North".to_string(),
            quarter: "Q1".to_string(),
            campaign_type: "Retention".to_string(),
            spend: 50.0,
            revenue: 200.0,
            conversions: 4,
            roas: 4.0,
        }
    }

    #[test]
    fn test_record_column_access() {
        let row = campaign();
        assert_eq!(row.value("channel"), Some(Value::Text("Email".to_string())));
        assert_eq!(row.value("conversions"), Some(Value::Number(4.0)));
        assert_eq!(
            row.value("date").and_then(|v| v.as_date()),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
        assert_eq!(row.value("nope"), None);
        assert!(CampaignRecord::has_column("roas"));
        assert!(!CampaignRecord::has_column("ctr"));
    }

    #[test]
    fn test_optional_values_are_missing() {
        let v: Value = Option::<f64>::None.into();
        assert!(v.is_missing());
        assert_eq!(v.to_string(), "");

        let customer = CustomerRecord {
            age: 41,
            income: None,
            customer_segment: "Regular".to_string(),
            lifetime_value: Some(2500.0),
            total_purchases: 3,
            tenure_months: 14,
            satisfaction_score: 7.0,
            nps_category: "Passive".to_string(),
        };
        assert_eq!(customer.value("income"), Some(Value::Missing));
        assert_eq!(customer.value("lifetime_value"), Some(Value::Number(2500.0)));
    }

    #[test]
    fn test_attribution_model_parse() {
        assert_eq!(
            "time_decay".parse::<AttributionModel>(),
            Ok(AttributionModel::TimeDecay)
        );
        assert_eq!(
            "u_shaped".parse::<AttributionModel>(),
            Err(DomainError::InvalidModel("u_shaped".to_string()))
        );
        for model in AttributionModel::ALL {
            assert_eq!(model.as_str().parse::<AttributionModel>(), Ok(model));
        }
    }

    #[test]
    fn test_attribution_record_columns() {
        let row = AttributionRecord {
            channel: "Search".to_string(),
            first_touch: 10.0,
            last_touch: 20.0,
            linear: 15.0,
            time_decay: 17.0,
            position_based: 14.0,
        };
        assert_eq!(row.value("linear"), Some(Value::Number(15.0)));
        assert_eq!(row.credit(AttributionModel::LastTouch), 20.0);
    }

    #[test]
    fn test_correlation_matrix_validation() {
        let labels = vec!["spend".to_string(), "revenue".to_string()];
        let ok = CorrelationMatrix::new(labels.clone(), vec![vec![1.0, 0.8], vec![0.8, 1.0]]);
        assert_eq!(ok.unwrap().get("spend", "revenue"), Some(0.8));

        let asym = CorrelationMatrix::new(labels.clone(), vec![vec![1.0, 0.8], vec![0.7, 1.0]]);
        assert!(matches!(asym, Err(DomainError::AsymmetricMatrix { .. })));

        let diag = CorrelationMatrix::new(labels.clone(), vec![vec![0.9, 0.8], vec![0.8, 1.0]]);
        assert!(matches!(diag, Err(DomainError::InvalidDiagonal { .. })));

        let ragged = CorrelationMatrix::new(labels, vec![vec![1.0]]);
        assert!(matches!(ragged, Err(DomainError::NotSquare { .. })));
    }

    #[test]
    fn test_funnel_resolution() {
        let rows = vec![
            FunnelStageRecord {
                stage: "Visit".to_string(),
                visitors: Some(1000),
                conversions: Some(400),
                conversion_rate: None,
            },
            FunnelStageRecord {
                stage: "Lead".to_string(),
                visitors: Some(400),
                conversions: Some(100),
                conversion_rate: None,
            },
        ];
        let input = FunnelInput::resolve(rows.clone(), true, false).unwrap();
        assert!(matches!(input, FunnelInput::ByCounts { rate_reported: false, .. }));
        assert_eq!(input.len(), 2);

        let by_rate = FunnelInput::resolve(rows, false, true).unwrap();
        assert!(matches!(by_rate, FunnelInput::ByRate(_)));

        let missing = FunnelInput::resolve(Vec::new(), false, false);
        assert!(matches!(missing, Err(DomainError::MissingColumns(_))));
    }

    #[test]
    fn test_learning_curve_must_increase() {
        let point = |n, s| LearningCurvePoint {
            training_size: n,
            train_score: s,
            validation_score: s,
        };
        assert!(LearningCurvePoint::validate_sequence(&[point(100, 0.9), point(200, 0.8)]).is_ok());
        assert!(matches!(
            LearningCurvePoint::validate_sequence(&[point(200, 0.9), point(200, 0.8)]),
            Err(DomainError::NonIncreasingSequence { .. })
        ));
        assert!(matches!(
            LearningCurvePoint::validate_sequence(&[point(100, 1.2)]),
            Err(DomainError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_geo_states_unique() {
        let geo = |state: &str| GeoRecord {
            state: state.to_string(),
            region: "West".to_string(),
            latitude: 19.0,
            longitude: 72.8,
            total_revenue: 1.0,
            total_customers: 1,
            market_penetration: 1.0,
            yoy_growth: 1.0,
            customer_satisfaction: 1.0,
            store_count: 1,
        };
        assert!(GeoRecord::ensure_unique_states(&[geo("Goa"), geo("Kerala")]).is_ok());
        assert!(GeoRecord::ensure_unique_states(&[geo("Goa"), geo("Goa")]).is_err());
    }
}
