//! Daily resampling of sparse quote observations.
//!
//! Quotes only exist for trading days. [`resample`] turns them into one
//! point per calendar day, carrying the last known quote forward over
//! weekends and holidays.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::SeriesError;
use crate::json::{coerce_number, is_truthy};

const TIMESTAMP_KEYS: &[&str] = &["dataHora", "dataHoraCotacao", "timestamp"];
const SELL_KEY: &str = "cotacaoVenda";
const BUY_KEY: &str = "cotacaoCompra";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A quote reported for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteObservation {
    pub date: NaiveDate,
    pub value: f64,
}

/// One day of the resampled series. `value` is `None` only before the first
/// observed day of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Reads PTAX-style records into observations, in input order.
///
/// The timestamp comes from the first truthy value of [`TIMESTAMP_KEYS`] and is
/// truncated to its date. The sell quote is preferred over the buy quote.
/// Records without a timestamp or without either quote are dropped, as are
/// records that are not JSON objects.
///
/// # Errors
///
/// A timestamp that is not a recognizable date, or a quote that is not a
/// number, fails the whole call.
pub fn quote_observations(values: &[Value]) -> Result<Vec<QuoteObservation>, SeriesError> {
    let mut out = Vec::with_capacity(values.len());

    for item in values.iter().filter_map(Value::as_object) {
        let Some(stamp) = TIMESTAMP_KEYS
            .iter()
            .filter_map(|k| item.get(*k))
            .find(|v| is_truthy(v))
        else {
            continue;
        };
        let date = parse_date(stamp)?;

        let quote = match item.get(SELL_KEY) {
            Some(v) if !v.is_null() => Some((SELL_KEY, v)),
            _ => item
                .get(BUY_KEY)
                .filter(|v| !v.is_null())
                .map(|v| (BUY_KEY, v)),
        };
        let Some((key, quote)) = quote else {
            continue;
        };

        out.push(QuoteObservation {
            date,
            value: quote_value(key, quote)?,
        });
    }

    Ok(out)
}

/// Builds the complete daily series for `[first, last]`.
///
/// When several observations share a date the first one wins. Days without
/// an observation take the most recent earlier value within the range; days
/// before the first observation stay empty. Values are rounded to six
/// decimal places.
///
/// The result always has one point per day, even when `observations` is
/// empty. A range with `first > last` yields no points.
pub fn resample(
    observations: &[QuoteObservation],
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<DailyPoint> {
    let mut by_date = BTreeMap::new();
    for obs in observations {
        by_date.entry(obs.date).or_insert(obs.value);
    }
    debug!(
        observations = observations.len(),
        distinct_days = by_date.len(),
        %first,
        %last,
        "Resampling quotes"
    );

    let mut carried = None;
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| {
            if let Some(value) = by_date.get(&date) {
                carried = Some(round6(*value));
            }
            DailyPoint {
                date,
                value: carried,
            }
        })
        .collect()
}

/// [`quote_observations`] followed by [`resample`].
///
/// # Errors
///
/// Propagates errors from [`quote_observations`].
pub fn to_daily_series(
    values: &[Value],
    first: NaiveDate,
    last: NaiveDate,
) -> Result<Vec<DailyPoint>, SeriesError> {
    let observations = quote_observations(values)?;
    Ok(resample(&observations, first, last))
}

fn parse_date(stamp: &Value) -> Result<NaiveDate, SeriesError> {
    let Value::String(raw) = stamp else {
        return Err(SeriesError::Timestamp {
            value: stamp.to_string(),
        });
    };
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SeriesError::Timestamp {
        value: raw.clone(),
    })
}

fn quote_value(key: &'static str, value: &Value) -> Result<f64, SeriesError> {
    coerce_number(value).ok_or_else(|| SeriesError::Quote {
        key,
        value: value.to_string(),
    })
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
