//! Small CSV fixtures covering all eleven tables.

use std::path::Path;

use tempfile::TempDir;

pub(crate) fn write(dir: &Path, file: &str, contents: &str) {
    std::fs::write(dir.join(file), contents).unwrap();
}

/// Fresh temp directory holding a complete, valid dataset.
pub(crate) fn write_all() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    write(
        path,
        "campaign_performance.csv",
        "date,channel,region,quarter,campaign_type,spend,revenue,conversions,roas\n\
         2024-01-01,Email,North,Q1,Retention,50.0,100.0,4,2.0\n\
         2024-01-02,Email,South,Q1,Retention,60.0,200.0,6,3.33\n\
         2024-01-08,Search,North,Q1,Acquisition,80.0,300.0,9,0.0\n\
         2024-04-02,Social,West,Q2,Brand,40.0,150.0,12,3.75\n",
    );
    write(
        path,
        "customer_data.csv",
        "age,income,customer_segment,lifetime_value,total_purchases,tenure_months,\
         satisfaction_score,nps_category\n\
         34,850000,Premium,120000,24,36,8.5,Promoter\n\
         27,420000,Regular,30000,8,12,6.0,Passive\n\
         45,600000,Premium,95000,18,48,4.0,Detractor\n",
    );
    write(
        path,
        "product_sales.csv",
        "category,subcategory,product_name,sales,profit_margin,units_sold,region\n\
         Electronics,Phones,Nova X,500000,12.5,250,North\n\
         Electronics,Audio,Nova Buds,120000,-3.0,800,South\n\
         Home,Kitchen,Nova Blend,90000,18.0,300,North\n",
    );
    write(
        path,
        "lead_scoring_results.csv",
        "actual_converted,predicted_probability\n1,0.9\n1,0.4\n0,0.3\n0,0.1\n",
    );
    write(
        path,
        "feature_importance.csv",
        "feature,importance,importance_std\nrecency,0.35,0.02\nfrequency,0.25,0.03\n",
    );
    write(
        path,
        "learning_curve.csv",
        "training_size,train_score,validation_score\n\
         100,0.95,0.70\n500,0.92,0.78\n1000,0.90,0.82\n",
    );
    write(
        path,
        "geographic_data.csv",
        "state,region,latitude,longitude,total_revenue,total_customers,\
         market_penetration,yoy_growth,customer_satisfaction,store_count\n\
         Maharashtra,West,19.75,75.71,9500000,42000,12.5,8.2,81.0,34\n\
         Karnataka,South,15.31,75.71,7200000,31000,10.1,11.4,84.5,27\n",
    );
    write(
        path,
        "channel_attribution.csv",
        "channel,first_touch,last_touch,linear,time_decay,position_based\n\
         Email,40,30,35,33,36\n\
         Search,60,70,65,67,64\n",
    );
    write(
        path,
        "funnel_data.csv",
        "stage,visitors,conversions\nVisit,10000,1000\nLead,1000,400\nPurchase,400,100\n",
    );
    write(
        path,
        "customer_journey.csv",
        "customer_id,touchpoint\nC001,Email\nC002,Search\n",
    );
    write(
        path,
        "correlation_matrix.csv",
        "metric,spend,revenue,conversions\n\
         spend,1.0,0.8,0.6\n\
         revenue,0.8,1.0,0.7\n\
         conversions,0.6,0.7,1.0\n",
    );
    dir
}
