use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord};

// Required column names, matching the historical export exactly.
const COL_SITE: &str = "Launch Site";
const COL_CLASS: &str = "class";
const COL_PAYLOAD: &str = "Payload Mass (kg)";
const COL_BOOSTER: &str = "Booster Version Category";

/// A field-level validation failure in one row of the source table.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("outcome class '{0}' is not 0 or 1")]
    InvalidOutcome(String),
    #[error("payload mass '{0}' is not a finite number")]
    InvalidPayload(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (primary format)
/// * `.json`    – records-oriented array, `df.to_json(orient='records')`
/// * `.parquet` – flat scalar columns as written by Pandas or Polars
///
/// Any missing column, unparsable outcome class, or non-finite payload is an
/// error; the caller treats a failed startup load as fatal.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// -- Field parsers shared by all formats --

fn parse_outcome(raw: &str) -> Result<u8, RecordError> {
    match raw.trim() {
        "0" => Ok(0),
        "1" => Ok(1),
        other => Err(RecordError::InvalidOutcome(other.to_string())),
    }
}

fn outcome_from_i64(raw: i64) -> Result<u8, RecordError> {
    match raw {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(RecordError::InvalidOutcome(other.to_string())),
    }
}

fn parse_payload(raw: &str) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RecordError::InvalidPayload(raw.to_string()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader.  Split out from [`load_csv`] so tests can feed
/// in-memory data.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let site_idx = column(COL_SITE)?;
    let class_idx = column(COL_CLASS)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let booster_idx = column(COL_BOOSTER)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let outcome = parse_outcome(row.get(class_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}"))?;
        let payload_kg = parse_payload(row.get(payload_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}"))?;

        records.push(LaunchRecord {
            site: row.get(site_idx).unwrap_or("").to_string(),
            outcome,
            payload_kg,
            booster_category: row.get(booster_idx).unwrap_or("").to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "class": 1,
///     "Payload Mass (kg)": 2500.0,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = obj
            .get(COL_SITE)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or non-string '{COL_SITE}'"))?;
        let class = obj
            .get(COL_CLASS)
            .and_then(|v| v.as_i64())
            .with_context(|| format!("Row {i}: missing or non-integer '{COL_CLASS}'"))?;
        let payload = obj
            .get(COL_PAYLOAD)
            .and_then(|v| v.as_f64())
            .with_context(|| format!("Row {i}: missing or non-numeric '{COL_PAYLOAD}'"))?;
        let booster = obj
            .get(COL_BOOSTER)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or non-string '{COL_BOOSTER}'"))?;

        let outcome = outcome_from_i64(class).with_context(|| format!("Row {i}"))?;
        if !payload.is_finite() {
            bail!("Row {i}: payload mass is not finite");
        }

        records.push(LaunchRecord {
            site: site.to_string(),
            outcome,
            payload_kg: payload,
            booster_category: booster.to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the launch table.
///
/// Expected schema: `Launch Site` Utf8, `class` Int64 or Int32,
/// `Payload Mass (kg)` Float64 or Float32, `Booster Version Category` Utf8.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col_index = |name: &str| -> Result<usize> {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let site_col = batch.column(col_index(COL_SITE)?);
        let class_col = batch.column(col_index(COL_CLASS)?);
        let payload_col = batch.column(col_index(COL_PAYLOAD)?);
        let booster_col = batch.column(col_index(COL_BOOSTER)?);

        for row in 0..batch.num_rows() {
            let site = extract_string(site_col, row)
                .with_context(|| format!("Row {row}: failed to read '{COL_SITE}'"))?;
            let class = extract_i64(class_col, row)
                .with_context(|| format!("Row {row}: failed to read '{COL_CLASS}'"))?;
            let payload = extract_f64(payload_col, row)
                .with_context(|| format!("Row {row}: failed to read '{COL_PAYLOAD}'"))?;
            let booster = extract_string(booster_col, row)
                .with_context(|| format!("Row {row}: failed to read '{COL_BOOSTER}'"))?;

            let outcome = outcome_from_i64(class).with_context(|| format!("Row {row}"))?;
            if !payload.is_finite() {
                bail!("Row {row}: payload mass is not finite");
            }

            records.push(LaunchRecord {
                site,
                outcome,
                payload_kg: payload,
                booster_category: booster,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    let arr = col
        .as_any()
        .downcast_ref::<StringArray>()
        .with_context(|| format!("expected Utf8 column, got {:?}", col.data_type()))?;
    Ok(arr.value(row).to_string())
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("Expected Int64 or Int32 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in float column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("Expected Float64 or Float32 column, got {other:?}"),
    }
}
