//! Campaign analytics page.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use chrono::NaiveDate;
use novamart_domain::CampaignRecord;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateSpec, AggregateTable, Reducer, SortBy, TimeBucket};
use crate::engine::DashboardEngine;
use crate::error::{AnalyticsError, Result};
use crate::filter::{filter, DateRange, Predicates};
use crate::views::Panel;

/// Sidebar selection for the campaign page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFilter {
    pub channels: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    /// `None` leaves dates unconstrained.
    pub date_range: Option<DateRange>,
}

impl CampaignFilter {
    #[must_use]
    pub fn predicates(&self) -> Predicates {
        let mut predicates = Predicates::new()
            .with_in("channel", self.channels.iter().cloned())
            .with_in("region", self.regions.iter().cloned());
        if let Some(range) = self.date_range {
            predicates = predicates.with_date_range("date", range);
        }
        predicates
    }
}

/// How monthly spend by campaign type is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendMode {
    Absolute,
    /// Percentage of the month's total spend.
    Share,
}

impl FromStr for SpendMode {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" => Ok(Self::Absolute),
            "share" | "100% stacked" | "percent" => Ok(Self::Share),
            _ => Err(AnalyticsError::InvalidParameter(format!("unknown spend view: {s}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendShare {
    pub month: NaiveDate,
    pub campaign_type: String,
    /// Spend, or its share in percent; undefined for a zero-spend month.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignView {
    pub rows: usize,
    /// Revenue by (region, quarter).
    pub revenue_by_region_quarter: AggregateTable,
    /// Conversions by (week start, channel).
    pub weekly_conversions: AggregateTable,
    pub monthly_spend: Vec<SpendShare>,
}

fn monthly_spend(rows: &[CampaignRecord], mode: SpendMode) -> Result<Vec<SpendShare>> {
    let table = aggregate(
        rows,
        &AggregateSpec::by(["date", "campaign_type"])
            .bucket(TimeBucket::Month)
            .reduce(Reducer::sum("spend"))
            .sort(SortBy::Keys),
    )?;

    let mut month_totals: HashMap<NaiveDate, f64> = HashMap::new();
    for row in &table.rows {
        if let (Some(month), Some(spend)) = (row.keys[0].as_date(), row.values[0]) {
            *month_totals.entry(month).or_default() += spend;
        }
    }

    Ok(table
        .rows
        .iter()
        .filter_map(|row| {
            let month = row.keys[0].as_date()?;
            let spend = row.values[0];
            let value = match mode {
                SpendMode::Absolute => spend,
                SpendMode::Share => spend.and_then(|s| {
                    let total = month_totals.get(&month).copied().unwrap_or_default();
                    (total != 0.0).then(|| s / total * 100.0)
                }),
            };
            Some(SpendShare {
                month,
                campaign_type: row.keys[1].as_text()?.to_string(),
                value,
            })
        })
        .collect())
}

impl DashboardEngine {
    /// Selection covering every channel, region and date present.
    #[must_use]
    pub fn default_campaign_filter(&self) -> CampaignFilter {
        let campaigns = &self.bundle.campaigns;
        CampaignFilter {
            channels: campaigns.iter().map(|c| c.channel.clone()).collect(),
            regions: campaigns.iter().map(|c| c.region.clone()).collect(),
            date_range: DateRange::spanning(campaigns.iter().map(|c| c.date)),
        }
    }

    /// Campaign rows matching `selection`, in file order.
    ///
    /// # Errors
    ///
    /// Propagates filter errors.
    pub fn filtered_campaigns(&self, selection: &CampaignFilter) -> Result<Vec<CampaignRecord>> {
        filter(&self.bundle.campaigns, &selection.predicates())
    }

    /// All campaign charts for `selection`, or `NoData` when it matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Propagates filter and aggregation errors.
    pub fn campaign_view(
        &self,
        selection: &CampaignFilter,
        mode: SpendMode,
    ) -> Result<Panel<CampaignView>> {
        let rows = self.filtered_campaigns(selection)?;
        if rows.is_empty() {
            tracing::debug!("Campaign selection is empty");
            return Ok(Panel::NoData);
        }

        let revenue_by_region_quarter = aggregate(
            &rows,
            &AggregateSpec::by(["region", "quarter"]).reduce(Reducer::sum("revenue")),
        )?;
        let weekly_conversions = aggregate(
            &rows,
            &AggregateSpec::by(["date", "channel"])
                .bucket(TimeBucket::Week)
                .reduce(Reducer::sum("conversions"))
                .sort(SortBy::Keys),
        )?;

        Ok(Panel::Ready(CampaignView {
            rows: rows.len(),
            revenue_by_region_quarter,
            weekly_conversions,
            monthly_spend: monthly_spend(&rows, mode)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GroupKey;
    use crate::sample::{self, date};

    #[test]
    fn test_default_filter_keeps_everything() {
        let engine = sample::engine();
        let selection = engine.default_campaign_filter();
        assert_eq!(selection.channels.len(), 3);
        assert_eq!(
            selection.date_range,
            Some(DateRange::new(date(2024, 1, 1), date(2024, 4, 15)))
        );
        assert_eq!(
            engine.filtered_campaigns(&selection).unwrap(),
            engine.bundle().campaigns
        );
    }

    #[test]
    fn test_empty_selection_is_no_data() {
        let engine = sample::engine();
        let mut selection = engine.default_campaign_filter();
        selection.channels.clear();
        let view = engine.campaign_view(&selection, SpendMode::Absolute).unwrap();
        assert_eq!(view, Panel::NoData);
    }

    #[test]
    fn test_region_quarter_revenue() {
        let engine = sample::engine();
        let mut selection = engine.default_campaign_filter();
        selection.regions = BTreeSet::from(["North".to_string()]);
        let view = engine
            .campaign_view(&selection, SpendMode::Absolute)
            .unwrap()
            .ready()
            .unwrap();
        assert_eq!(view.rows, 4);
        let table = &view.revenue_by_region_quarter;
        let north = |quarter: &str| [GroupKey::from("North"), GroupKey::from(quarter)];
        assert_eq!(table.lookup(&north("Q1"), "revenue"), Some(340.0));
        assert_eq!(table.lookup(&north("Q2"), "revenue"), Some(460.0));
    }

    #[test]
    fn test_weekly_conversions_bucketed() {
        let engine = sample::engine();
        let view = engine
            .campaign_view(&engine.default_campaign_filter(), SpendMode::Absolute)
            .unwrap()
            .ready()
            .unwrap();
        // 2024-01-01 and 2024-01-03 share the week starting Monday 2024-01-01.
        let week = GroupKey::Date(date(2024, 1, 1));
        let conversions = |channel: &str| {
            view.weekly_conversions
                .lookup(&[week.clone(), GroupKey::from(channel)], "conversions")
        };
        assert_eq!(conversions("Email"), Some(5.0));
        assert_eq!(conversions("Search"), Some(10.0));
    }

    #[test]
    fn test_spend_share_sums_to_hundred() {
        let engine = sample::engine();
        let view = engine
            .campaign_view(&engine.default_campaign_filter(), SpendMode::Share)
            .unwrap()
            .ready()
            .unwrap();
        let january: f64 = view
            .monthly_spend
            .iter()
            .filter(|s| s.month == date(2024, 1, 1))
            .filter_map(|s| s.value)
            .sum();
        assert!((january - 100.0).abs() < 1e-9);

        let brand = view
            .monthly_spend
            .iter()
            .find(|s| s.month == date(2024, 1, 1) && s.campaign_type == "Brand")
            .unwrap();
        // Brand 50 of 175 in January
        assert!((brand.value.unwrap() - 50.0 / 175.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_spend_mode_parse() {
        assert_eq!("100% Stacked".parse::<SpendMode>().unwrap(), SpendMode::Share);
        assert_eq!("Absolute".parse::<SpendMode>().unwrap(), SpendMode::Absolute);
        assert!("stacked".parse::<SpendMode>().is_err());
    }
}
