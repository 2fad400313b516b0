//! In-memory bundle shared by the view and report tests.

use std::path::PathBuf;

use chrono::NaiveDate;
use novamart_datasets::DatasetBundle;
use novamart_domain::{
    AttributionRecord, CampaignRecord, CorrelationMatrix, CustomerRecord, FeatureImportanceRecord,
    FunnelInput, GeoRecord, JourneyTable, LeadRecord, LearningCurvePoint, ProductRecord,
    StageCounts,
};

use crate::config::DashboardConfig;
use crate::engine::DashboardEngine;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn config() -> DashboardConfig {
    DashboardConfig {
        data_dir: PathBuf::from("data"),
        log_level: "info".to_string(),
        default_threshold: 0.5,
        threshold_step: 0.05,
        top_products: 3,
        age_bin_width: 5,
    }
}

pub fn engine() -> DashboardEngine {
    DashboardEngine::new(std::sync::Arc::new(bundle()), config())
}

#[allow(clippy::too_many_arguments)]
fn campaign(
    day: NaiveDate,
    channel: &str,
    region: &str,
    quarter: &str,
    campaign_type: &str,
    spend: f64,
    revenue: f64,
    conversions: i64,
    roas: f64,
) -> CampaignRecord {
    CampaignRecord {
        date: day,
        channel: channel.to_string(),
        region: region.to_string(),
        quarter: quarter.to_string(),
        campaign_type: campaign_type.to_string(),
        spend,
        revenue,
        conversions,
        roas,
    }
}

#[allow(clippy::too_many_arguments)]
fn customer(
    age: i64,
    income: f64,
    segment: &str,
    ltv: f64,
    purchases: i64,
    tenure: i64,
    satisfaction: f64,
    nps: &str,
) -> CustomerRecord {
    CustomerRecord {
        age,
        income: Some(income),
        customer_segment: segment.to_string(),
        lifetime_value: Some(ltv),
        total_purchases: purchases,
        tenure_months: tenure,
        satisfaction_score: satisfaction,
        nps_category: nps.to_string(),
    }
}

fn product(
    category: &str,
    subcategory: &str,
    name: &str,
    sales: f64,
    margin: f64,
    units: i64,
    region: &str,
) -> ProductRecord {
    ProductRecord {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        product_name: name.to_string(),
        sales,
        profit_margin: margin,
        units_sold: units,
        region: region.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn geo(
    state: &str,
    region: &str,
    lat: f64,
    lon: f64,
    revenue: f64,
    customers: i64,
    penetration: f64,
    growth: f64,
    satisfaction: f64,
    stores: i64,
) -> GeoRecord {
    GeoRecord {
        state: state.to_string(),
        region: region.to_string(),
        latitude: lat,
        longitude: lon,
        total_revenue: revenue,
        total_customers: customers,
        market_penetration: penetration,
        yoy_growth: growth,
        customer_satisfaction: satisfaction,
        store_count: stores,
    }
}

fn attribution(channel: &str, credits: [f64; 5]) -> AttributionRecord {
    AttributionRecord {
        channel: channel.to_string(),
        first_touch: credits[0],
        last_touch: credits[1],
        linear: credits[2],
        time_decay: credits[3],
        position_based: credits[4],
    }
}

fn stage(name: &str, visitors: i64, conversions: i64) -> StageCounts {
    StageCounts {
        stage: name.to_string(),
        visitors,
        conversions,
        reported_rate: None,
    }
}

/// Revenue 1400, conversions 36, mean positive ROAS 4.6; Email revenue 600.
pub fn bundle() -> DatasetBundle {
    DatasetBundle {
        source: PathBuf::from("memory"),
        campaigns: vec![
            campaign(date(2024, 1, 1), "Email", "North", "Q1", "Brand", 50.0, 100.0, 5, 2.0),
            campaign(
                date(2024, 1, 3), "Search", "South", "Q1", "Performance", 100.0, 400.0, 10, 4.0,
            ),
            campaign(date(2024, 1, 10), "Email", "South", "Q1", "Performance", 25.0, 200.0, 4, 0.0),
            campaign(date(2024, 2, 5), "Social", "North", "Q1", "Brand", 80.0, 240.0, 6, 3.0),
            campaign(date(2024, 4, 2), "Search", "North", "Q2", "Brand", 40.0, 160.0, 8, 4.0),
            campaign(
                date(2024, 4, 15), "Email", "North", "Q2", "Performance", 30.0, 300.0, 3, 10.0,
            ),
        ],
        customers: vec![
            customer(22, 30_000.0, "Budget", 1000.0, 3, 6, 6.0, "Passive"),
            customer(25, 50_000.0, "Regular", 2000.0, 5, 12, 7.5, "Passive"),
            customer(31, 70_000.0, "Regular", 3000.0, 8, 24, 8.0, "Promoter"),
            customer(38, 90_000.0, "Premium", 4000.0, 12, 30, 9.0, "Promoter"),
            customer(45, 110_000.0, "Premium", 5000.0, 15, 48, 9.5, "Promoter"),
            customer(52, 60_000.0, "Budget", 1500.0, 4, 10, 4.0, "Detractor"),
        ],
        products: vec![
            product("Electronics", "Phones", "Phone X", 5000.0, 12.0, 10, "North"),
            product("Electronics", "Phones", "Phone Y", 3000.0, 8.0, 6, "South"),
            product("Electronics", "Audio", "Buds", 1000.0, 20.0, 25, "North"),
            product("Home", "Kitchen", "Blender", 2000.0, -5.0, 8, "North"),
        ],
        leads: [(1, 0.9), (1, 0.4), (0, 0.3), (0, 0.1)]
            .into_iter()
            .map(|(actual_converted, predicted_probability)| LeadRecord {
                actual_converted,
                predicted_probability,
            })
            .collect(),
        feature_importance: vec![
            FeatureImportanceRecord {
                feature: "engagement_score".to_string(),
                importance: 0.35,
                importance_std: Some(0.04),
            },
            FeatureImportanceRecord {
                feature: "email_opens".to_string(),
                importance: 0.15,
                importance_std: None,
            },
            FeatureImportanceRecord {
                feature: "website_visits".to_string(),
                importance: 0.25,
                importance_std: Some(0.03),
            },
        ],
        learning_curve: vec![
            LearningCurvePoint {
                training_size: 100,
                train_score: 0.95,
                validation_score: 0.70,
            },
            LearningCurvePoint {
                training_size: 500,
                train_score: 0.92,
                validation_score: 0.78,
            },
            LearningCurvePoint {
                training_size: 1000,
                train_score: 0.90,
                validation_score: 0.82,
            },
        ],
        geographic: vec![
            geo("Maharashtra", "West", 19.07, 72.87, 90_000.0, 1200, 12.5, 8.0, 82.0, 40),
            geo("Karnataka", "South", 12.97, 77.59, 120_000.0, 1500, 15.0, 11.0, 85.0, 35),
            geo("Delhi", "North", 28.61, 77.20, 60_000.0, 900, 9.0, 5.0, 78.0, 20),
        ],
        attribution: vec![
            attribution("Search", [40.0, 30.0, 35.0, 33.0, 36.0]),
            attribution("Email", [10.0, 25.0, 20.0, 22.0, 18.0]),
            attribution("Social", [50.0, 45.0, 45.0, 45.0, 46.0]),
        ],
        funnel: FunnelInput::ByCounts {
            stages: vec![
                stage("Visit", 10_000, 1000),
                stage("Lead", 1000, 400),
                stage("Purchase", 400, 100),
            ],
            rate_reported: false,
        },
        journey: JourneyTable {
            columns: vec!["customer_id".to_string(), "touchpoint".to_string()],
            rows: vec![
                vec![Some("C1".to_string()), Some("Search".to_string())],
                vec![Some("C1".to_string()), None],
            ],
        },
        correlation: CorrelationMatrix::new(
            vec!["spend".to_string(), "revenue".to_string()],
            vec![vec![1.0, 0.8], vec![0.8, 1.0]],
        )
        .unwrap(),
    }
}
