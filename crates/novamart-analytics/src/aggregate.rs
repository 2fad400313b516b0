//! Multi-key grouping with optional time bucketing.
//!
//! Groups come out in first-seen order unless a sort is requested. Only
//! keys present in the input produce groups, so a mean is never taken over
//! an empty group.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use novamart_domain::{Record, Value};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Calendar granularity for date group keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    Day,
    Week,
    Month,
    Quarter,
}

impl TimeBucket {
    /// First day of the bucket holding `date`. Weeks start on Monday.
    #[must_use]
    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Self::Month => date.with_day(1).unwrap_or(date),
            Self::Quarter => {
                let month = (date.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
            }
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBucket {
    type Err = AnalyticsError;

    /// Accepts the bucket name, its adjective ("Weekly") or its
    /// one-letter frequency code ("W"), case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" | "d" => Ok(Self::Day),
            "week" | "weekly" | "w" => Ok(Self::Week),
            "month" | "monthly" | "m" => Ok(Self::Month),
            "quarter" | "quarterly" | "q" => Ok(Self::Quarter),
            _ => Err(AnalyticsError::InvalidBucket(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reduction {
    Sum,
    Mean,
    Count,
}

/// One output column: `reduction` applied to `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reducer {
    pub output: String,
    pub source: String,
    pub reduction: Reduction,
}

impl Reducer {
    pub fn new(output: &str, source: &str, reduction: Reduction) -> Self {
        Self {
            output: output.to_string(),
            source: source.to_string(),
            reduction,
        }
    }

    /// Sum of `column`, written to a column of the same name.
    pub fn sum(column: &str) -> Self {
        Self::new(column, column, Reduction::Sum)
    }

    pub fn mean(column: &str) -> Self {
        Self::new(column, column, Reduction::Mean)
    }

    /// Row count, written to `output`.
    pub fn count(output: &str, source: &str) -> Self {
        Self::new(output, source, Reduction::Count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Ascending by group key tuple.
    Keys,
    /// By one reduced column; undefined values sort last.
    Value { column: String, descending: bool },
}

/// Grouping request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSpec {
    pub group_keys: Vec<String>,
    pub time_bucket: Option<TimeBucket>,
    pub reducers: Vec<Reducer>,
    pub sort: Option<SortBy>,
}

impl AggregateSpec {
    pub fn by<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn bucket(mut self, bucket: TimeBucket) -> Self {
        self.time_bucket = Some(bucket);
        self
    }

    #[must_use]
    pub fn reduce(mut self, reducer: Reducer) -> Self {
        self.reducers.push(reducer);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortBy) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Group key cell. Date keys hold the bucket start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Text(String),
    Date(NaiveDate),
}

impl GroupKey {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Date(_) => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub keys: Vec<GroupKey>,
    /// One entry per reducer; `None` is a mean over no numeric cells.
    pub values: Vec<Option<f64>>,
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub key_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn key_index(&self, column: &str) -> Option<usize> {
        self.key_columns.iter().position(|c| c == column)
    }

    #[must_use]
    pub fn value_index(&self, column: &str) -> Option<usize> {
        self.value_columns.iter().position(|c| c == column)
    }

    /// Reduced `column` for the group whose keys equal `keys`.
    #[must_use]
    pub fn lookup(&self, keys: &[GroupKey], column: &str) -> Option<f64> {
        let idx = self.value_index(column)?;
        self.rows
            .iter()
            .find(|r| r.keys == keys)
            .and_then(|r| r.values[idx])
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    present: usize,
    rows: usize,
}

impl Accumulator {
    #[allow(clippy::cast_precision_loss)]
    fn finish(self, reduction: Reduction) -> Option<f64> {
        match reduction {
            Reduction::Sum => Some(self.sum),
            Reduction::Mean => (self.present > 0).then(|| self.sum / self.present as f64),
            Reduction::Count => Some(self.rows as f64),
        }
    }
}

fn group_key(value: Value, column: &str, bucket: Option<TimeBucket>) -> Result<Option<GroupKey>> {
    match value {
        Value::Text(s) => Ok(Some(GroupKey::Text(s))),
        Value::Date(d) => Ok(Some(GroupKey::Date(
            bucket.map_or(d, |b| b.start_of(d)),
        ))),
        Value::Missing => Ok(None),
        Value::Number(_) => Err(AnalyticsError::InvalidParameter(format!(
            "cannot group by numeric column {column}"
        ))),
    }
}

/// Group `table` by `spec.group_keys` and reduce each group.
///
/// Rows with a missing key cell are dropped. Sum and mean skip missing
/// numeric cells; count counts rows.
///
/// # Errors
///
/// `UnknownColumn` for a key or source column the record type lacks;
/// `InvalidParameter` when grouping on a numeric column or summing a
/// non-numeric one.
pub fn aggregate<R: Record>(table: &[R], spec: &AggregateSpec) -> Result<AggregateTable> {
    if let Some(column) = spec
        .group_keys
        .iter()
        .chain(spec.reducers.iter().map(|r| &r.source))
        .find(|c| !R::has_column(c))
    {
        return Err(AnalyticsError::UnknownColumn(column.clone()));
    }

    let mut index: HashMap<Vec<GroupKey>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<GroupKey>, Vec<Accumulator>)> = Vec::new();

    'rows: for row in table {
        let mut keys = Vec::with_capacity(spec.group_keys.len());
        for column in &spec.group_keys {
            let value = row.value(column).unwrap_or(Value::Missing);
            match group_key(value, column, spec.time_bucket)? {
                Some(key) => keys.push(key),
                None => continue 'rows,
            }
        }

        let slot = match index.get(&keys) {
            Some(&slot) => slot,
            None => {
                index.insert(keys.clone(), groups.len());
                groups.push((keys, vec![Accumulator::default(); spec.reducers.len()]));
                groups.len() - 1
            }
        };

        for (acc, reducer) in groups[slot].1.iter_mut().zip(&spec.reducers) {
            acc.rows += 1;
            if reducer.reduction == Reduction::Count {
                continue;
            }
            match row.value(&reducer.source).unwrap_or(Value::Missing) {
                Value::Number(n) => {
                    acc.sum += n;
                    acc.present += 1;
                }
                Value::Missing => {}
                _ => {
                    return Err(AnalyticsError::InvalidParameter(format!(
                        "cannot reduce non-numeric column {}",
                        reducer.source
                    )));
                }
            }
        }
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|(keys, accs)| AggregateRow {
            keys,
            values: accs
                .into_iter()
                .zip(&spec.reducers)
                .map(|(acc, r)| acc.finish(r.reduction))
                .collect(),
        })
        .collect();

    let value_columns: Vec<String> = spec.reducers.iter().map(|r| r.output.clone()).collect();

    match &spec.sort {
        None => {}
        Some(SortBy::Keys) => rows.sort_by(|a, b| a.keys.cmp(&b.keys)),
        Some(SortBy::Value { column, descending }) => {
            let idx = value_columns
                .iter()
                .position(|c| c == column)
                .ok_or_else(|| AnalyticsError::UnknownColumn(column.clone()))?;
            rows.sort_by(|a, b| match (a.values[idx], b.values[idx]) {
                (Some(x), Some(y)) if *descending => y.total_cmp(&x),
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
    }

    tracing::debug!(
        rows_in = table.len(),
        groups = rows.len(),
        keys = ?spec.group_keys,
        bucket = ?spec.time_bucket,
        "Aggregation applied"
    );

    Ok(AggregateTable {
        key_columns: spec.group_keys.clone(),
        value_columns,
        rows,
    })
}
