//! CSV ingestion through an in-memory DuckDB connection.
//!
//! Each file is staged as a table with `read_csv_auto`, its column list is
//! checked against the catalogue, and typed rows are pulled back out with
//! explicit casts so type problems surface as load errors.

use std::path::Path;

use duckdb::types::Type;
use duckdb::{params, Connection, Row};

use crate::catalog::Dataset;
use crate::error::{LoadError, Result};

/// Column list of a staged table.
#[derive(Debug, Clone)]
pub(crate) struct StagedTable {
    pub dataset: Dataset,
    pub columns: Vec<String>,
}

impl StagedTable {
    pub fn has(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with a schema mismatch naming every absent column.
    pub fn require(&self, columns: &[&str]) -> Result<()> {
        let missing: Vec<&str> = columns.iter().copied().filter(|c| !self.has(c)).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::schema(
                self.dataset,
                format!("missing columns: {}", missing.join(", ")),
            ))
        }
    }
}

/// Staging connection for one bundle load.
pub(crate) struct CsvReader {
    conn: Connection,
}

impl CsvReader {
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LoadError::parse(Dataset::Campaigns, format!("duckdb: {e}")))?;
        Ok(Self { conn })
    }

    /// Stage `dir/<file>` as a table and return its columns in file order.
    pub fn stage(&self, dataset: Dataset, dir: &Path) -> Result<StagedTable> {
        let path = dir.join(dataset.file_name());
        if !path.is_file() {
            return Err(LoadError::missing_file(
                dataset,
                format!("{} not found", path.display()),
            ));
        }

        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_csv_auto('{}', header = true)",
            dataset.table_name(),
            path.display().to_string().replace('\'', "''"),
        );
        self.conn
            .execute_batch(&sql)
            .map_err(|e| LoadError::parse(dataset, e.to_string()))?;

        let columns = self.query_with(
            dataset,
            r"
            SELECT column_name
            FROM information_schema.columns
            WHERE table_name = ?
            ORDER BY ordinal_position
            ",
            params![dataset.table_name()],
            |row| row.get::<_, String>(0),
        )?;

        let staged = StagedTable { dataset, columns };
        staged.require(dataset.required_columns())?;
        Ok(staged)
    }

    /// Run a parameterless query and map every row.
    pub fn query<T, F>(&self, dataset: Dataset, sql: &str, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        self.query_with(dataset, sql, params![], f)
    }

    fn query_with<T, P, F>(&self, dataset: Dataset, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: duckdb::Params,
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        let parse = |e: duckdb::Error| LoadError::parse(dataset, e.to_string());
        let mut stmt = self.conn.prepare(sql).map_err(parse)?;
        let rows = stmt.query_map(params, f).map_err(parse)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse)
    }
}

/// Quote an identifier for interpolation into SQL.
pub(crate) fn ident(column: &str) -> String {
    format!("\"{}\"", column.replace('"', "\"\""))
}

/// `CAST(col AS VARCHAR)`
pub(crate) fn text(column: &str) -> String {
    format!("CAST({} AS VARCHAR)", ident(column))
}

/// `CAST(col AS DOUBLE)`; non-numeric cells fail the load.
pub(crate) fn real(column: &str) -> String {
    format!("CAST({} AS DOUBLE)", ident(column))
}

/// `TRY_CAST(col AS DOUBLE)`; non-numeric cells become NULL.
pub(crate) fn lenient_real(column: &str) -> String {
    format!("TRY_CAST({} AS DOUBLE)", ident(column))
}

/// `CAST(col AS DOUBLE)`, for columns read back with [`whole`]. Fractional
/// cells must reach the row mapper unrounded.
pub(crate) fn integer(column: &str) -> String {
    real(column)
}

/// Largest magnitude an `f64` holds with every integer exact.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// Whole number in column `index`, or `None` for an empty cell.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn whole_opt(row: &Row<'_>, index: usize) -> duckdb::Result<Option<i64>> {
    let Some(value) = row.get::<_, Option<f64>>(index)? else {
        return Ok(None);
    };
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_EXACT {
        return Err(duckdb::Error::FromSqlConversionFailure(
            index,
            Type::Double,
            format!("expected a whole number, got {value}").into(),
        ));
    }
    Ok(Some(value as i64))
}

/// Whole number in column `index`; an empty cell is an error.
pub(crate) fn whole(row: &Row<'_>, index: usize) -> duckdb::Result<i64> {
    whole_opt(row, index)?.ok_or_else(|| {
        duckdb::Error::FromSqlConversionFailure(
            index,
            Type::Null,
            "expected a whole number, got an empty cell".into(),
        )
    })
}

/// ISO calendar date rendered as text, whatever the sniffed type was.
pub(crate) fn iso_date(column: &str) -> String {
    format!("CAST(CAST({} AS DATE) AS VARCHAR)", ident(column))
}
