//! CSV Import
//!
//! Loads a sales CSV export into a SQLite table the dashboard can read.
//! Cells are stored with the narrowest SQLite type they parse as; empty cells
//! become NULL. Column coercion still happens at normalization time.

use crate::dataset::error::{DatasetError, DatasetResult};
use crate::dataset::source::validate_table_name;
use crate::dataset::types::{RawTable, RawValue};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{Connection, ToSql};
use std::path::Path;

/// Outcome of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub rows_written: usize,
    pub rows_failed: usize,
    /// First few row errors, with 1-based line numbers
    pub errors: Vec<String>,
}

const MAX_REPORTED_ERRORS: usize = 10;

/// Read a CSV file with a header row into a raw table
pub fn read_csv(path: &Path, delimiter: u8) -> DatasetResult<(RawTable, ImportReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut report = ImportReport {
        rows_written: 0,
        rows_failed: 0,
        errors: Vec::new(),
    };

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.rows_failed += 1;
                if report.errors.len() < MAX_REPORTED_ERRORS {
                    report.errors.push(format!("Line {}: {}", line, e));
                }
                continue;
            }
        };

        if record.len() != width {
            report.rows_failed += 1;
            if report.errors.len() < MAX_REPORTED_ERRORS {
                report.errors.push(format!(
                    "Line {}: expected {} fields, found {}",
                    line,
                    width,
                    record.len()
                ));
            }
            continue;
        }

        rows.push(record.iter().map(infer_cell).collect());
    }

    Ok((RawTable { columns, rows }, report))
}

/// Narrowest SQLite value for a CSV cell
fn infer_cell(cell: &str) -> RawValue {
    let cell = cell.trim();
    if cell.is_empty() {
        RawValue::Null
    } else if let Ok(i) = cell.parse::<i64>() {
        RawValue::Integer(i)
    } else if let Some(f) = cell.parse::<f64>().ok().filter(|f| f.is_finite()) {
        RawValue::Real(f)
    } else {
        RawValue::text(cell)
    }
}

impl ToSql for RawValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(match self {
            RawValue::Null => Value::Null,
            RawValue::Integer(i) => Value::Integer(*i),
            RawValue::Real(f) => Value::Real(*f),
            RawValue::Text(s) => Value::Text(s.clone()),
            RawValue::Blob(b) => Value::Blob(b.clone()),
        }))
    }
}

/// Write a raw table into SQLite, creating or replacing the target table
pub fn write_sqlite(
    raw: &RawTable,
    path: &Path,
    table: &str,
    replace: bool,
) -> DatasetResult<usize> {
    validate_table_name(table)?;
    if raw.columns.is_empty() {
        return Err(DatasetError::Source("CSV has no columns".to_string()));
    }

    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    if replace {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS \"{}\"", table))?;
    }

    let column_list = raw
        .columns
        .iter()
        .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(", ");
    tx.execute_batch(&format!("CREATE TABLE \"{}\" ({})", table, column_list))?;

    let placeholders = vec!["?"; raw.columns.len()].join(", ");
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO \"{}\" VALUES ({})",
            table, placeholders
        ))?;
        for row in &raw.rows {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
    }

    tx.commit()?;

    tracing::info!(
        path = %path.display(),
        table = table,
        rows = raw.rows.len(),
        "Imported sales table"
    );
    Ok(raw.rows.len())
}

/// Import a CSV file into a SQLite table
pub fn import_csv(
    csv_path: &Path,
    db_path: &Path,
    table: &str,
    delimiter: u8,
    replace: bool,
) -> DatasetResult<ImportReport> {
    let (raw, mut report) = read_csv(csv_path, delimiter)?;
    report.rows_written = write_sqlite(&raw, db_path, table, replace)?;
    Ok(report)
}
