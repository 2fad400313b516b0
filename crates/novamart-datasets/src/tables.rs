//! Typed loaders, one per table.

use std::path::Path;

use chrono::NaiveDate;
use duckdb::types::Type;
use novamart_domain::{
    AttributionRecord, CampaignRecord, CorrelationMatrix, CustomerRecord, FeatureImportanceRecord,
    FunnelInput, FunnelStageRecord, GeoRecord, JourneyTable, LeadRecord, LearningCurvePoint,
    ProductRecord,
};

use crate::catalog::Dataset;
use crate::error::{LoadError, Result};
use crate::reader::{
    integer, iso_date, lenient_real, real, text, whole, whole_opt, CsvReader, StagedTable,
};

fn select(exprs: &[String], dataset: Dataset) -> String {
    format!("SELECT {} FROM {}", exprs.join(", "), dataset.table_name())
}

fn select_columns<F>(columns: &[&str], cast: F, dataset: Dataset) -> String
where
    F: Fn(&str) -> String,
{
    let exprs: Vec<String> = columns.iter().map(|c| cast(*c)).collect();
    select(&exprs, dataset)
}

fn ensure_non_negative(dataset: Dataset, column: &str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(LoadError::parse(
            dataset,
            format!("{column} must be non-negative, got {value}"),
        ));
    }
    Ok(())
}

fn parse_date(index: usize, raw: &str) -> duckdb::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| duckdb::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

pub(crate) fn campaigns(reader: &CsvReader, dir: &Path) -> Result<Vec<CampaignRecord>> {
    let dataset = Dataset::Campaigns;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[
            iso_date("date"),
            text("channel"),
            text("region"),
            text("quarter"),
            text("campaign_type"),
            real("spend"),
            real("revenue"),
            integer("conversions"),
            real("roas"),
        ],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(CampaignRecord {
            date: parse_date(0, &row.get::<_, String>(0)?)?,
            channel: row.get(1)?,
            region: row.get(2)?,
            quarter: row.get(3)?,
            campaign_type: row.get(4)?,
            spend: row.get(5)?,
            revenue: row.get(6)?,
            conversions: whole(row, 7)?,
            roas: row.get(8)?,
        })
    })?;

    for row in &rows {
        ensure_non_negative(dataset, "spend", row.spend)?;
        ensure_non_negative(dataset, "revenue", row.revenue)?;
        if row.conversions < 0 {
            return Err(LoadError::parse(
                dataset,
                format!("conversions must be non-negative, got {}", row.conversions),
            ));
        }
    }
    Ok(rows)
}

pub(crate) fn customers(reader: &CsvReader, dir: &Path) -> Result<Vec<CustomerRecord>> {
    let dataset = Dataset::Customers;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[
            integer("age"),
            real("income"),
            text("customer_segment"),
            real("lifetime_value"),
            integer("total_purchases"),
            integer("tenure_months"),
            real("satisfaction_score"),
            text("nps_category"),
        ],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(CustomerRecord {
            age: whole(row, 0)?,
            income: row.get(1)?,
            customer_segment: row.get(2)?,
            lifetime_value: row.get(3)?,
            total_purchases: whole(row, 4)?,
            tenure_months: whole(row, 5)?,
            satisfaction_score: row.get(6)?,
            nps_category: row.get(7)?,
        })
    })?;

    for row in &rows {
        if row.age <= 0 {
            return Err(LoadError::parse(
                dataset,
                format!("age must be positive, got {}", row.age),
            ));
        }
        if let Some(ltv) = row.lifetime_value {
            ensure_non_negative(dataset, "lifetime_value", ltv)?;
        }
    }
    Ok(rows)
}

pub(crate) fn products(reader: &CsvReader, dir: &Path) -> Result<Vec<ProductRecord>> {
    let dataset = Dataset::Products;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[
            text("category"),
            text("subcategory"),
            text("product_name"),
            real("sales"),
            real("profit_margin"),
            integer("units_sold"),
            text("region"),
        ],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(ProductRecord {
            category: row.get(0)?,
            subcategory: row.get(1)?,
            product_name: row.get(2)?,
            sales: row.get(3)?,
            profit_margin: row.get(4)?,
            units_sold: whole(row, 5)?,
            region: row.get(6)?,
        })
    })?;

    for row in &rows {
        ensure_non_negative(dataset, "sales", row.sales)?;
    }
    Ok(rows)
}

pub(crate) fn leads(reader: &CsvReader, dir: &Path) -> Result<Vec<LeadRecord>> {
    let dataset = Dataset::Leads;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[integer("actual_converted"), real("predicted_probability")],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(LeadRecord {
            actual_converted: whole(row, 0)?,
            predicted_probability: row.get(1)?,
        })
    })?;

    if let Some(bad) = rows
        .iter()
        .find(|r| !(0.0..=1.0).contains(&r.predicted_probability))
    {
        return Err(LoadError::parse(
            dataset,
            format!(
                "predicted_probability must lie in [0, 1], got {}",
                bad.predicted_probability
            ),
        ));
    }
    Ok(rows)
}

pub(crate) fn feature_importance(
    reader: &CsvReader,
    dir: &Path,
) -> Result<Vec<FeatureImportanceRecord>> {
    let dataset = Dataset::FeatureImportance;
    let staged = reader.stage(dataset, dir)?;
    let std_expr = if staged.has("importance_std") {
        real("importance_std")
    } else {
        "CAST(NULL AS DOUBLE)".to_string()
    };
    let sql = select(&[text("feature"), real("importance"), std_expr], dataset);
    let rows = reader.query(dataset, &sql, |row| {
        Ok(FeatureImportanceRecord {
            feature: row.get(0)?,
            importance: row.get(1)?,
            importance_std: row.get(2)?,
        })
    })?;

    for row in &rows {
        ensure_non_negative(dataset, "importance", row.importance)?;
    }
    Ok(rows)
}

pub(crate) fn learning_curve(
    reader: &CsvReader,
    dir: &Path,
) -> Result<Vec<LearningCurvePoint>> {
    let dataset = Dataset::LearningCurve;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[
            integer("training_size"),
            real("train_score"),
            real("validation_score"),
        ],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(LearningCurvePoint {
            training_size: whole(row, 0)?,
            train_score: row.get(1)?,
            validation_score: row.get(2)?,
        })
    })?;

    LearningCurvePoint::validate_sequence(&rows).map_err(|e| LoadError::from_domain(dataset, &e))?;
    Ok(rows)
}

pub(crate) fn geographic(reader: &CsvReader, dir: &Path) -> Result<Vec<GeoRecord>> {
    let dataset = Dataset::Geographic;
    reader.stage(dataset, dir)?;
    let sql = select(
        &[
            text("state"),
            text("region"),
            real("latitude"),
            real("longitude"),
            real("total_revenue"),
            integer("total_customers"),
            real("market_penetration"),
            real("yoy_growth"),
            real("customer_satisfaction"),
            integer("store_count"),
        ],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(GeoRecord {
            state: row.get(0)?,
            region: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            total_revenue: row.get(4)?,
            total_customers: whole(row, 5)?,
            market_penetration: row.get(6)?,
            yoy_growth: row.get(7)?,
            customer_satisfaction: row.get(8)?,
            store_count: whole(row, 9)?,
        })
    })?;

    GeoRecord::ensure_unique_states(&rows).map_err(|e| LoadError::from_domain(dataset, &e))?;
    Ok(rows)
}

pub(crate) fn attribution(
    reader: &CsvReader,
    dir: &Path,
) -> Result<Vec<AttributionRecord>> {
    let dataset = Dataset::Attribution;
    reader.stage(dataset, dir)?;
    let mut exprs = vec![text("channel")];
    exprs.extend(dataset.required_columns()[1..].iter().map(|c| real(c)));
    let sql = select(&exprs, dataset);
    reader.query(dataset, &sql, |row| {
        Ok(AttributionRecord {
            channel: row.get(0)?,
            first_touch: row.get(1)?,
            last_touch: row.get(2)?,
            linear: row.get(3)?,
            time_decay: row.get(4)?,
            position_based: row.get(5)?,
        })
    })
}

pub(crate) fn funnel(reader: &CsvReader, dir: &Path) -> Result<FunnelInput> {
    let dataset = Dataset::Funnel;
    let staged = reader.stage(dataset, dir)?;
    let has_counts = staged.has("visitors") && staged.has("conversions");
    let has_rate = staged.has("conversion_rate");

    let count = |column: &str| {
        if has_counts {
            integer(column)
        } else {
            "CAST(NULL AS DOUBLE)".to_string()
        }
    };
    let rate = if has_rate {
        lenient_real("conversion_rate")
    } else {
        "CAST(NULL AS DOUBLE)".to_string()
    };
    let sql = select(
        &[text("stage"), count("visitors"), count("conversions"), rate],
        dataset,
    );
    let rows = reader.query(dataset, &sql, |row| {
        Ok(FunnelStageRecord {
            stage: row.get(0)?,
            visitors: whole_opt(row, 1)?,
            conversions: whole_opt(row, 2)?,
            conversion_rate: row.get(3)?,
        })
    })?;

    FunnelInput::resolve(rows, has_counts, has_rate)
        .map_err(|e| LoadError::from_domain(dataset, &e))
}

pub(crate) fn journey(reader: &CsvReader, dir: &Path) -> Result<JourneyTable> {
    let dataset = Dataset::Journey;
    let StagedTable { columns, .. } = reader.stage(dataset, dir)?;
    if columns.is_empty() {
        return Ok(JourneyTable::default());
    }
    let names: Vec<&str> = columns.iter().map(String::as_str).collect();
    let sql = select_columns(&names, text, dataset);
    let width = columns.len();
    let rows = reader.query(dataset, &sql, |row| {
        (0..width)
            .map(|i| row.get::<_, Option<String>>(i))
            .collect::<duckdb::Result<Vec<_>>>()
    })?;
    Ok(JourneyTable { columns, rows })
}

pub(crate) fn correlation(reader: &CsvReader, dir: &Path) -> Result<CorrelationMatrix> {
    let dataset = Dataset::Correlation;
    let StagedTable { columns, .. } = reader.stage(dataset, dir)?;
    let Some((label_column, metrics)) = columns.split_first() else {
        return Err(LoadError::schema(dataset, "no columns"));
    };

    let mut exprs = vec![text(label_column)];
    exprs.extend(metrics.iter().map(|c| real(c)));
    let sql = select(&exprs, dataset);
    let width = metrics.len();
    let rows = reader.query(dataset, &sql, |row| {
        let label: String = row.get(0)?;
        let values = (1..=width)
            .map(|i| row.get::<_, f64>(i))
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok((label, values))
    })?;

    let (labels, values): (Vec<String>, Vec<Vec<f64>>) = rows.into_iter().unzip();
    if labels.as_slice() != metrics {
        return Err(LoadError::schema(
            dataset,
            format!(
                "row labels [{}] do not match column headers [{}]",
                labels.join(", "),
                metrics.join(", ")
            ),
        ));
    }
    CorrelationMatrix::new(labels, values).map_err(|e| LoadError::from_domain(dataset, &e))
}
