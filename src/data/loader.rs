use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::table::{CellValue, Column, Table, TableError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A file could not be turned into a [`Table`].
///
/// Every variant is a recoverable condition: the caller reports it and the
/// session stays in its previous state, with no partial table produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    Empty,
    #[error("invalid table structure: {0}")]
    Structure(#[from] TableError),
    #[error("malformed JSON dataset: {0:#}")]
    Json(anyhow::Error),
    #[error("malformed parquet file: {0:#}")]
    Parquet(anyhow::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.tab` – delimited text with a header row
/// * `.json`    – `[{ "col_a": 1.0, "col_b": "west", ... }, ...]`
/// * `.parquet` – flat columns of scalar values
///
/// Whatever the format, the resulting table follows the same layout
/// convention: the last column is the prediction target (see
/// [`Schema::derive`](super::schema::Schema::derive)).
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_delimited(std::fs::File::open(path)?, b','),
        "tsv" | "tab" => read_delimited(std::fs::File::open(path)?, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row into a [`Table`].
///
/// Strict by design: a row whose field count differs from the header, or
/// bytes that are not valid UTF-8 text, abort the load with a [`LoadError`]
/// instead of producing a partially parsed table.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty);
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            // In strict mode the record always matches the header width.
            cells[idx].push(CellValue::parse(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Ok(Table::new(columns)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "area": 120.0, "rooms": 3, "district": "west", "price": 410.5 },
///   ...
/// ]
/// ```
///
/// Column order is taken from the first record; every record must carry the
/// same keys.
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let text = std::fs::read_to_string(path)?;
    read_json_records(&text).map_err(LoadError::Json)
}

fn read_json_records(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("expected top-level JSON array")?;
    if records.is_empty() {
        bail!("JSON dataset has no records");
    }

    let first = records[0]
        .as_object()
        .context("row 0 is not a JSON object")?;
    let names: Vec<String> = first.keys().cloned().collect();
    if names.is_empty() {
        bail!("row 0 has no fields");
    }

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::with_capacity(records.len()); names.len()];
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;
        if obj.len() != names.len() {
            bail!("row {i} has {} fields, expected {}", obj.len(), names.len());
        }
        for (idx, name) in names.iter().enumerate() {
            let val = obj
                .get(name)
                .with_context(|| format!("row {i} is missing field '{name}'"))?;
            cells[idx].push(json_to_cell(val));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::new(columns).context("assembling table")
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => CellValue::Number(f),
            _ => CellValue::Missing,
        },
        JsonValue::String(s) => CellValue::parse(s),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        JsonValue::Null => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`) as long as the columns hold scalars;
/// nested types are stringified and therefore end up categorical.
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path)?;
    read_parquet(file).map_err(LoadError::Parquet)
}

fn read_parquet(file: std::fs::File) -> Result<Table> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut names: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<CellValue>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if names.is_empty() {
            names = schema.fields().iter().map(|f| f.name().clone()).collect();
            cells = vec![Vec::new(); names.len()];
        }

        for (idx, col) in batch.columns().iter().enumerate() {
            for row in 0..batch.num_rows() {
                cells[idx].push(extract_cell(col, row));
            }
        }
    }

    if names.is_empty() {
        bail!("parquet file has no columns");
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::new(columns).context("assembling table")
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::parse(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => CellValue::parse(col.as_string::<i64>().value(row)),
        DataType::Int32 => CellValue::Number(f64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => {
            number_or_missing(f64::from(col.as_primitive::<Float32Type>().value(row)))
        }
        DataType::Float64 => number_or_missing(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Text(col.as_boolean().value(row).to_string()),
        _ => CellValue::Text(format!("{:?}", col.data_type())),
    }
}

fn number_or_missing(v: f64) -> CellValue {
    if v.is_finite() {
        CellValue::Number(v)
    } else {
        CellValue::Missing
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
