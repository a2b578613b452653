//! Normalization of loosely structured transit API responses into
//! [`VehicleRecord`]s.
//!
//! Providers disagree on envelope keys, coordinate names and id fields, so
//! every field is resolved by probing an ordered list of candidate keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::json::{coerce_number, is_truthy, scalar_number};

/// Envelope keys that may wrap the vehicle array, in priority order.
const LIST_KEYS: &[&str] = &["vehicles", "veiculos", "data", "result", "items"];
const LAT_KEYS: &[&str] = &["lat", "latitude", "y"];
const LON_KEYS: &[&str] = &["lon", "lng", "longitude", "x"];
const ID_KEYS: &[&str] = &["id", "vehicleId", "veiculoId", "placa"];
const LINE_KEYS: &[&str] = &["line", "linha"];

/// One vehicle position in the common output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    pub line: String,
    pub lat: f64,
    pub lon: f64,
}

/// Extracts vehicle positions from an arbitrary JSON response.
///
/// A top-level object is unwrapped through the first of [`LIST_KEYS`] that
/// holds an array. Anything that is still not an array yields an empty list.
/// Elements that are not objects, or whose coordinates cannot be resolved,
/// are skipped. `fallback_line` fills `line` when the element carries none.
///
/// # Errors
///
/// Returns [`NormalizeError::Coordinate`] if a coordinate key is present but
/// its value cannot be read as a number. This aborts the whole batch rather
/// than skipping the element, so a single malformed vehicle fails the run.
pub fn extract_vehicles(
    raw: &Value,
    fallback_line: Option<&str>,
) -> Result<Vec<VehicleRecord>, NormalizeError> {
    let Some(items) = unwrap_list(raw) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items.iter().filter_map(Value::as_object) {
        if let Some(record) = normalize_item(item, fallback_line)? {
            out.push(record);
        }
    }
    Ok(out)
}

fn unwrap_list(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array)),
        _ => None,
    }
}

fn normalize_item(
    item: &Map<String, Value>,
    fallback_line: Option<&str>,
) -> Result<Option<VehicleRecord>, NormalizeError> {
    let mut lat = probe_coordinate(item, LAT_KEYS)?;
    let mut lon = probe_coordinate(item, LON_KEYS)?;

    if lat.is_none() || lon.is_none() {
        if let Some(loc) = item.get("location").and_then(Value::as_object) {
            if let (Some(la), Some(lo)) = (loc.get("lat"), loc.get("lon")) {
                lat = Some(coerce_f64("location.lat", la)?);
                lon = Some(coerce_f64("location.lon", lo)?);
            }
        }
    }

    if lat.is_none() || lon.is_none() {
        // Last resort: first two numeric values in document order, booleans
        // counting as 0/1. Often wrong (ids, timestamps, flags), kept for
        // providers with unnamed fields.
        let mut nums = item.values().filter_map(scalar_number);
        if let (Some(a), Some(b)) = (nums.next(), nums.next()) {
            lat = Some(a);
            lon = Some(b);
        }
    }

    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Ok(None);
    };

    let id = first_truthy(item, ID_KEYS).map(display).unwrap_or_default();
    let line = first_truthy(item, LINE_KEYS)
        .map(display)
        .or_else(|| {
            fallback_line
                .filter(|l| !l.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_default();

    Ok(Some(VehicleRecord { id, line, lat, lon }))
}

/// First key whose value is neither `null` nor an empty string, coerced.
fn probe_coordinate(
    item: &Map<String, Value>,
    keys: &[&'static str],
) -> Result<Option<f64>, NormalizeError> {
    for &key in keys {
        match item.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.is_empty() => continue,
            Some(v) => return coerce_f64(key, v).map(Some),
        }
    }
    Ok(None)
}

fn coerce_f64(key: &'static str, value: &Value) -> Result<f64, NormalizeError> {
    coerce_number(value).ok_or_else(|| NormalizeError::Coordinate {
        key,
        value: value.to_string(),
    })
}

fn first_truthy<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .find(|v| is_truthy(v))
}

/// Renders an id or line value as text. Integer numbers print without a
/// decimal point; floats use Rust's `Debug` form, so `12.0` stays `12.0`
/// and large or tiny magnitudes use Rust exponent notation (`1e16`).
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| format!("{f:?}")),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
