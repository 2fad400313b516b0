//! Predicate-based row selection.
//!
//! A row is kept when it satisfies every predicate group: each
//! set-membership group is an OR over its allowed values, and each date
//! range is inclusive at both ends. An empty result is a normal outcome.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use novamart_domain::{Record, Value};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Smallest range covering every date in `dates`.
    pub fn spanning(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(Self::new(d, d)),
            Some(r) => Some(Self::new(r.start.min(d), r.end.max(d))),
        })
    }
}

/// Row predicates, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicates {
    pub categorical_in: BTreeMap<String, BTreeSet<String>>,
    pub date_range: BTreeMap<String, DateRange>,
}

impl Predicates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose `column` is one of `allowed`.
    #[must_use]
    pub fn with_in<I, S>(mut self, column: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_in
            .insert(column.to_string(), allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Keep rows whose date `column` falls inside `range`.
    #[must_use]
    pub fn with_date_range(mut self, column: &str, range: DateRange) -> Self {
        self.date_range.insert(column.to_string(), range);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categorical_in.is_empty() && self.date_range.is_empty()
    }

    fn check_columns<R: Record>(&self) -> Result<()> {
        self.categorical_in
            .keys()
            .chain(self.date_range.keys())
            .find(|c| !R::has_column(c))
            .map_or(Ok(()), |c| Err(AnalyticsError::UnknownColumn(c.clone())))
    }

    fn matches<R: Record>(&self, row: &R) -> Result<bool> {
        for (column, allowed) in &self.categorical_in {
            let keep = match row.value(column) {
                Some(Value::Text(s)) => allowed.contains(&s),
                Some(Value::Missing) | None => false,
                Some(other) => allowed.contains(&other.to_string()),
            };
            if !keep {
                return Ok(false);
            }
        }
        for (column, range) in &self.date_range {
            match row.value(column) {
                Some(Value::Date(d)) => {
                    if !range.contains(d) {
                        return Ok(false);
                    }
                }
                Some(Value::Missing) | None => return Ok(false),
                Some(_) => {
                    return Err(AnalyticsError::InvalidParameter(format!(
                        "date range on non-date column {column}"
                    )));
                }
            }
        }
        Ok(true)
    }
}

/// Rows of `table` matching all `predicates`, in input order.
///
/// # Errors
///
/// `UnknownColumn` for a predicate on a column the record type lacks (even
/// when `table` is empty); `InvalidParameter` for a date range on a
/// non-date column.
pub fn filter<R: Record + Clone>(table: &[R], predicates: &Predicates) -> Result<Vec<R>> {
    predicates.check_columns::<R>()?;

    let mut out = Vec::with_capacity(table.len());
    for row in table {
        if predicates.matches(row)? {
            out.push(row.clone());
        }
    }

    tracing::debug!(rows_in = table.len(), rows_out = out.len(), "Filter applied");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use novamart_domain::{CampaignRecord, CustomerRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(day: u32, channel: &str, region: &str) -> CampaignRecord {
        CampaignRecord {
            date: date(2024, 1, day),
            channel: channel.to_string(),
            region: region.to_string(),
            quarter: "Q1".to_string(),
            campaign_type: "Brand".to_string(),
            spend: 10.0,
            revenue: 100.0,
            conversions: 1,
            roas: 10.0,
        }
    }

    fn table() -> Vec<CampaignRecord> {
        vec![
            row(1, "Email", "North"),
            row(2, "Search", "South"),
            row(3, "Email", "South"),
            row(4, "Social", "North"),
        ]
    }

    #[test]
    fn test_full_domain_returns_input_unchanged() {
        let rows = table();
        let predicates = Predicates::new()
            .with_in("channel", ["Email", "Search", "Social"])
            .with_in("region", ["North", "South"])
            .with_date_range("date", DateRange::new(date(2024, 1, 1), date(2024, 1, 4)));
        assert_eq!(filter(&rows, &predicates).unwrap(), rows);
    }

    #[test]
    fn test_and_across_groups_or_within() {
        let predicates = Predicates::new()
            .with_in("channel", ["Email", "Social"])
            .with_in("region", ["North"]);
        let out = filter(&table(), &predicates).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].channel, "Email");
        assert_eq!(out[1].channel, "Social");
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let predicates = Predicates::new()
            .with_date_range("date", DateRange::new(date(2024, 1, 2), date(2024, 1, 3)));
        let out = filter(&table(), &predicates).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, date(2024, 1, 2));
        assert_eq!(out[1].date, date(2024, 1, 3));
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let predicates = Predicates::new().with_in("channel", Vec::<String>::new());
        assert!(filter(&table(), &predicates).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_column_rejected_on_empty_table() {
        let predicates = Predicates::new().with_in("ctr", ["high"]);
        let err = filter::<CampaignRecord>(&[], &predicates).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownColumn(c) if c == "ctr"));
    }

    #[test]
    fn test_date_range_on_numeric_column_rejected() {
        let customers = vec![CustomerRecord {
            age: 30,
            income: Some(1.0),
            customer_segment: "Premium".to_string(),
            lifetime_value: Some(1.0),
            total_purchases: 1,
            tenure_months: 1,
            satisfaction_score: 1.0,
            nps_category: "Promoter".to_string(),
        }];
        let predicates = Predicates::new()
            .with_date_range("age", DateRange::new(date(2024, 1, 1), date(2024, 1, 2)));
        assert!(matches!(
            filter(&customers, &predicates),
            Err(AnalyticsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_numeric_membership_uses_rendered_value() {
        let customers = vec![CustomerRecord {
            age: 30,
            income: Some(1.0),
            customer_segment: "Premium".to_string(),
            lifetime_value: Some(1.0),
            total_purchases: 1,
            tenure_months: 1,
            satisfaction_score: 1.0,
            nps_category: "Promoter".to_string(),
        }];
        let predicates = Predicates::new().with_in("age", ["30"]);
        assert_eq!(filter(&customers, &predicates).unwrap().len(), 1);
    }

    #[test]
    fn test_spanning_range() {
        let range = DateRange::spanning(table().iter().map(|r| r.date)).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 1, 4)));
        assert!(DateRange::spanning(std::iter::empty()).is_none());
    }
}
