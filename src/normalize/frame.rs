//! Turns a raw API payload into a typed polars table.
//!
//! The reading objects under the payload key become one row each; their key
//! union, in first-appearance order, becomes the column set. Location
//! metadata is broadcast onto every row, the `timestamp` column is parsed
//! into a timezone-aware datetime, and the `data_type` and `processed_at`
//! metadata columns are stamped onto every row. Broadcast and metadata
//! columns overwrite a reading key of the same name in place.
//!
//! Historical tables deliberately render every non-timestamp column as text,
//! mirroring what downstream consumers of this pipeline have always been
//! given; forecast tables keep native dtypes.

use crate::normalize::error::NormalizeError;
use crate::types::DataKind;
use chrono::{DateTime, Utc};
use log::warn;
use polars::prelude::*;
use serde_json::{Map, Value};

const TIMESTAMP_COL: &str = "timestamp";

/// Broadcast location columns: output name, payload key, whether the value
/// must be numeric. Order is the output order.
const LOCATION_COLUMNS: [(&str, &str, bool); 6] = [
    ("latitude", "latitude", true),
    ("longitude", "longitude", true),
    ("timezone", "timezone", false),
    ("elevation", "elevation", true),
    ("country_code", "countryCode", false),
    ("country_name", "countryName", false),
];

/// Normalizes one API payload into a DataFrame.
///
/// A missing, null, or empty reading sequence is not an error: it yields an
/// empty table and a warning, since a quiet range is an expected outcome. A
/// present-but-malformed payload (non-sequence readings, non-object rows, or
/// a broken `location` object) is a [`NormalizeError::Structure`] carrying
/// the payload's top-level keys.
pub fn normalize(kind: DataKind, payload: &Value) -> Result<DataFrame, NormalizeError> {
    let rows = match payload.get(kind.payload_key()) {
        None | Some(Value::Null) => {
            warn!("No {} data found in weather response", kind.payload_key());
            return Ok(DataFrame::empty());
        }
        Some(Value::Array(rows)) if rows.is_empty() => {
            warn!("No {} data found in weather response", kind.payload_key());
            return Ok(DataFrame::empty());
        }
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(structure_error(payload)),
    };

    let readings: Vec<&Map<String, Value>> = rows
        .iter()
        .map(|row| row.as_object().ok_or_else(|| structure_error(payload)))
        .collect::<Result<_, _>>()?;
    let height = readings.len();

    // Union of reading keys in first-appearance order.
    let mut keys: Vec<&str> = Vec::new();
    for reading in &readings {
        for key in reading.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(keys.len() + LOCATION_COLUMNS.len() + 2);
    for key in &keys {
        let cells: Vec<&Value> = readings
            .iter()
            .map(|reading| reading.get(*key).unwrap_or(&Value::Null))
            .collect();
        columns.push(build_column(kind, key, &cells)?);
    }

    if let Some(broadcast) = location_values(payload)? {
        for ((name, _, _), value) in LOCATION_COLUMNS.iter().zip(broadcast) {
            let cells: Vec<&Value> = vec![value; height];
            replace_or_push(&mut columns, build_column(kind, name, &cells)?);
        }
    }

    replace_or_push(
        &mut columns,
        Column::new("data_type".into(), vec![kind.label(); height]),
    );
    let processed_ms = Utc::now().timestamp_millis();
    replace_or_push(
        &mut columns,
        datetime_column(
            "processed_at",
            std::iter::repeat(Some(processed_ms)).take(height),
        ),
    );

    DataFrame::new(columns).map_err(NormalizeError::from)
}

/// Quality gate over a normalized table: non-empty, required columns
/// present, no nulls in the critical columns. Logs the reason and returns
/// false rather than failing.
pub fn validate_table(frame: &DataFrame) -> bool {
    if frame.height() == 0 {
        warn!("Empty DataFrame detected");
        return false;
    }

    let required = [
        "latitude",
        "longitude",
        "timestamp",
        "data_type",
        "processed_at",
    ];
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| frame.column(name).is_err())
        .collect();
    if !missing.is_empty() {
        warn!("Missing required columns: {:?}", missing);
        return false;
    }

    for name in ["latitude", "longitude", "timestamp"] {
        let nulls = frame.column(name).map(|c| c.null_count()).unwrap_or(0);
        if nulls > 0 {
            warn!("Null values found in critical column '{}' ({} rows)", name, nulls);
            return false;
        }
    }
    true
}

/// Validates the optional `location` object and returns its values in
/// [`LOCATION_COLUMNS`] order. Extra keys are ignored; a missing key or a
/// wrongly typed value makes the whole payload structurally invalid.
fn location_values(payload: &Value) -> Result<Option<Vec<&Value>>, NormalizeError> {
    let Some(location) = payload.get("location") else {
        return Ok(None);
    };
    let Some(object) = location.as_object() else {
        return Err(structure_error(payload));
    };

    let mut values = Vec::with_capacity(LOCATION_COLUMNS.len());
    for (_, source_key, numeric) in LOCATION_COLUMNS {
        let value = object
            .get(source_key)
            .ok_or_else(|| structure_error(payload))?;
        let well_typed = if numeric {
            value.is_number()
        } else {
            value.is_string()
        };
        if !well_typed {
            return Err(structure_error(payload));
        }
        values.push(value);
    }
    Ok(Some(values))
}

/// Builds one column from per-row JSON cells. `timestamp` always becomes a
/// UTC datetime; everything else is stringified for historical tables and
/// typed by content for forecast tables.
fn build_column(kind: DataKind, name: &str, cells: &[&Value]) -> Result<Column, NormalizeError> {
    if name == TIMESTAMP_COL {
        return timestamp_column(cells);
    }
    Ok(match kind {
        DataKind::Historical => utf8_column(name, cells),
        DataKind::Forecast => typed_column(name, cells),
    })
}

fn timestamp_column(cells: &[&Value]) -> Result<Column, NormalizeError> {
    let mut millis = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Value::Null => millis.push(None),
            Value::String(raw) => {
                let parsed = DateTime::parse_from_rfc3339(raw).map_err(|source| {
                    NormalizeError::TimestampParse {
                        value: raw.clone(),
                        source: Some(source),
                    }
                })?;
                millis.push(Some(parsed.with_timezone(&Utc).timestamp_millis()));
            }
            other => {
                return Err(NormalizeError::TimestampParse {
                    value: other.to_string(),
                    source: None,
                })
            }
        }
    }
    Ok(datetime_column(TIMESTAMP_COL, millis.into_iter()))
}

fn datetime_column(name: &str, millis: impl Iterator<Item = Option<i64>>) -> Column {
    Int64Chunked::from_iter_options(name.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, Some("UTC".into()))
        .into_series()
        .into()
}

/// Text column using serde_json's scalar rendering, so `0.0` stays "0.0"
/// and `65` stays "65". Nulls stay null instead of becoming literal text.
fn utf8_column(name: &str, cells: &[&Value]) -> Column {
    let values: Vec<Option<String>> = cells.iter().map(|cell| scalar_text(cell)).collect();
    Column::new(name.into(), values)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Content-typed column: Int64 when every present value is an integer,
/// Float64 when any is fractional, Boolean or String when uniform, and a
/// text fallback for mixed or all-null cells.
fn typed_column(name: &str, cells: &[&Value]) -> Column {
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_number = true;
    let mut all_bool = true;
    let mut all_string = true;
    for cell in cells {
        match cell {
            Value::Null => continue,
            Value::Number(n) => {
                saw_value = true;
                all_bool = false;
                all_string = false;
                if !n.is_i64() && !n.is_u64() {
                    all_int = false;
                }
            }
            Value::Bool(_) => {
                saw_value = true;
                all_int = false;
                all_number = false;
                all_string = false;
            }
            Value::String(_) => {
                saw_value = true;
                all_int = false;
                all_number = false;
                all_bool = false;
            }
            _ => {
                saw_value = true;
                all_int = false;
                all_number = false;
                all_bool = false;
                all_string = false;
            }
        }
    }

    if saw_value && all_number && all_int {
        let values: Vec<Option<i64>> = cells.iter().map(|c| c.as_i64()).collect();
        Column::new(name.into(), values)
    } else if saw_value && all_number {
        let values: Vec<Option<f64>> = cells.iter().map(|c| c.as_f64()).collect();
        Column::new(name.into(), values)
    } else if saw_value && all_bool {
        let values: Vec<Option<bool>> = cells.iter().map(|c| c.as_bool()).collect();
        Column::new(name.into(), values)
    } else if saw_value && all_string {
        let values: Vec<Option<String>> =
            cells.iter().map(|c| c.as_str().map(String::from)).collect();
        Column::new(name.into(), values)
    } else {
        utf8_column(name, cells)
    }
}

fn replace_or_push(columns: &mut Vec<Column>, column: Column) {
    if let Some(slot) = columns.iter_mut().find(|c| c.name() == column.name()) {
        *slot = column;
    } else {
        columns.push(column);
    }
}

fn structure_error(payload: &Value) -> NormalizeError {
    let keys = payload
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    NormalizeError::Structure { keys }
}
