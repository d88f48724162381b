pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Column headers for an array of row objects, with the period index first.
pub(crate) fn row_headers(first: &Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = first.keys().cloned().collect();
    if let Some(pos) = headers.iter().position(|h| h == "month") {
        let month = headers.remove(pos);
        headers.insert(0, month);
    }
    headers
}

/// True for a non-empty array whose elements are objects (a schedule-like table).
pub(crate) fn is_row_array(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if matches!(arr.first(), Some(Value::Object(_))))
}
