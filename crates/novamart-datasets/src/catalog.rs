//! The eleven tables the dashboard reads, with their file names and the
//! columns each one must carry.

use std::fmt;

/// One of the dashboard's input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Campaigns,
    Customers,
    Products,
    Leads,
    FeatureImportance,
    LearningCurve,
    Geographic,
    Attribution,
    Funnel,
    Journey,
    Correlation,
}

impl Dataset {
    /// Load order.
    pub const ALL: [Self; 11] = [
        Self::Campaigns,
        Self::Customers,
        Self::Products,
        Self::Leads,
        Self::FeatureImportance,
        Self::LearningCurve,
        Self::Geographic,
        Self::Attribution,
        Self::Funnel,
        Self::Journey,
        Self::Correlation,
    ];

    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Campaigns => "campaign_performance.csv",
            Self::Customers => "customer_data.csv",
            Self::Products => "product_sales.csv",
            Self::Leads => "lead_scoring_results.csv",
            Self::FeatureImportance => "feature_importance.csv",
            Self::LearningCurve => "learning_curve.csv",
            Self::Geographic => "geographic_data.csv",
            Self::Attribution => "channel_attribution.csv",
            Self::Funnel => "funnel_data.csv",
            Self::Journey => "customer_journey.csv",
            Self::Correlation => "correlation_matrix.csv",
        }
    }

    /// Name of the staging table inside the ingestion connection.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::Campaigns => "campaigns",
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Leads => "leads",
            Self::FeatureImportance => "feature_importance",
            Self::LearningCurve => "learning_curve",
            Self::Geographic => "geographic",
            Self::Attribution => "attribution",
            Self::Funnel => "funnel",
            Self::Journey => "journey",
            Self::Correlation => "correlation",
        }
    }

    /// Columns that must be present. Funnel, journey and correlation have
    /// open or alternative schemas and are checked by their loaders.
    #[must_use]
    pub const fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Campaigns => &[
                "date",
                "channel",
                "region",
                "quarter",
                "campaign_type",
                "spend",
                "revenue",
                "conversions",
                "roas",
            ],
            Self::Customers => &[
                "age",
                "income",
                "customer_segment",
                "lifetime_value",
                "total_purchases",
                "tenure_months",
                "satisfaction_score",
                "nps_category",
            ],
            Self::Products => &[
                "category",
                "subcategory",
                "product_name",
                "sales",
                "profit_margin",
                "units_sold",
                "region",
            ],
            Self::Leads => &["actual_converted", "predicted_probability"],
            Self::FeatureImportance => &["feature", "importance"],
            Self::LearningCurve => &["training_size", "train_score", "validation_score"],
            Self::Geographic => &[
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
            ],
            Self::Attribution => &[
                "channel",
                "first_touch",
                "last_touch",
                "linear",
                "time_decay",
                "position_based",
            ],
            Self::Funnel => &["stage"],
            Self::Journey | Self::Correlation => &[],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names_are_distinct() {
        let names: HashSet<_> = Dataset::ALL.iter().map(Dataset::file_name).collect();
        assert_eq!(names.len(), 11);
        assert!(names.iter().all(|n| n.ends_with(".csv")));
    }
}
