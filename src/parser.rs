use crate::error::{ChartError, Result};
use crate::ir::Row;
use serde::de::DeserializeOwned;

/// Rows as read from a JSON5 document, with opaque JSON payloads.
pub type JsonRows = Vec<Row<serde_json::Value>>;

/// Parse a JSON5 rows document and validate it.
///
/// JSON5 is used so `NaN` and `Infinity` literals surface as validation
/// errors pointing at the offending point instead of generic syntax errors.
pub fn parse_rows(input: &str) -> Result<JsonRows> {
    parse_rows_as(input)
}

pub fn parse_rows_as<T: DeserializeOwned + Default>(input: &str) -> Result<Vec<Row<T>>> {
    let rows: Vec<Row<T>> = json5::from_str(input)?;
    validate_rows(&rows)?;
    Ok(rows)
}

/// Reject non-finite values before any layout runs.
pub fn validate_rows<T>(rows: &[Row<T>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (idx, point) in row.data.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(ChartError::InvalidValue {
                    row: row_idx,
                    label: row.label.clone(),
                    index: idx,
                    value: point.value,
                });
            }
        }
    }
    Ok(())
}
