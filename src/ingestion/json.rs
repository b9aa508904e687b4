//! JSON ingestion implementation.
//!
//! Supported input: a JSON array whose first element is an object, e.g. `[{"a":1}, {"a":2}]`.
//! Columns come from the key order of the first record; later records are read as-is. Scalars keep
//! their JSON kind (see [`Cell`]); `null` is a present value, not a missing one.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{DeckError, DeckResult};
use crate::types::{Cell, Row, Table};

const SHAPE_MESSAGE: &str = "JSON must be an array of objects";

/// Ingest a JSON file into a [`Table`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> DeckResult<Table> {
    let text = fs::read_to_string(path)?;
    parse_json_str(&text)
}

/// Parse JSON text into a [`Table`].
///
/// Errors:
///
/// - [`DeckError::Json`] if the text is not valid JSON.
/// - [`DeckError::Format`] if it is not a non-empty array whose first element is an object.
pub fn parse_json_str(input: &str) -> DeckResult<Table> {
    let value: JsonValue = serde_json::from_str(input)?;
    table_from_json(value)
}

/// Build a [`Table`] from an already-decoded JSON value.
pub fn table_from_json(value: JsonValue) -> DeckResult<Table> {
    let JsonValue::Array(items) = value else {
        return Err(shape_error());
    };

    let columns: Vec<String> = match items.first() {
        Some(JsonValue::Object(first)) => first.keys().cloned().collect(),
        _ => return Err(shape_error()),
    };

    let rows = items.iter().map(row_from_json).collect();
    Ok(Table::new(columns, rows))
}

fn shape_error() -> DeckError {
    DeckError::Format {
        message: SHAPE_MESSAGE.to_string(),
    }
}

fn row_from_json(item: &JsonValue) -> Row {
    match item {
        JsonValue::Object(obj) => row_from_object(obj),
        // Non-object records have no keys; every column reads as absent.
        _ => Row::new(),
    }
}

fn row_from_object(obj: &Map<String, JsonValue>) -> Row {
    obj.iter().map(|(k, v)| (k.clone(), cell_from_json(v))).collect()
}

/// Typed cell for a JSON value. Nested arrays/objects become compact JSON text.
fn cell_from_json(v: &JsonValue) -> Cell {
    match v {
        JsonValue::Null => Cell::Null,
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Number(n) => n.as_f64().map_or_else(|| Cell::Text(n.to_string()), Cell::number),
        other => Cell::Text(other.to_string()),
    }
}
