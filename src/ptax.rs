//! PTAX (Banco Central do Brasil) USD/BRL quote requests.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PeriodError;
use crate::fetch::{HttpClient, fetch_json};

const BASE_URL: &str = "https://olinda.bcb.gov.br/olinda/servico/PTAX/versao/v1/odata";

/// First and last calendar day of the month named by `mmyyyy`
/// (e.g. `"082021"`). A single-digit month is accepted too (`"82021"`).
pub fn month_range(mmyyyy: &str) -> Result<(NaiveDate, NaiveDate), PeriodError> {
    let format_err = || PeriodError::Format {
        value: mmyyyy.to_string(),
    };

    if !matches!(mmyyyy.len(), 5 | 6) || !mmyyyy.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_err());
    }
    let (month, year) = mmyyyy.split_at(mmyyyy.len() - 4);
    let month: u32 = month.parse().map_err(|_| format_err())?;
    let year: i32 = year.parse().map_err(|_| format_err())?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(PeriodError::OutOfRange { month, year })?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .ok_or(PeriodError::OutOfRange { month, year })?;

    Ok((first, last))
}

/// OData URL for the dollar quotes published between `first` and `last`.
/// The service takes dates as `MM-DD-YYYY`.
pub fn period_url(first: NaiveDate, last: NaiveDate) -> String {
    format!(
        "{BASE_URL}/CotacaoDolarPeriodo(dataInicial='{}',dataFinal='{}')?$top=10000&$format=json",
        first.format("%m-%d-%Y"),
        last.format("%m-%d-%Y"),
    )
}

/// Downloads the quote records for the period. A response without a
/// `value` array is treated as an empty period.
#[tracing::instrument(skip_all, fields(first = %first, last = %last))]
pub async fn fetch_quotes<C: HttpClient>(
    client: &C,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<Vec<Value>> {
    let url = period_url(first, last);
    debug!(%url, "Requesting PTAX quotes");

    let mut body = fetch_json(client, &url).await?;
    match body.get_mut("value").map(Value::take) {
        Some(Value::Array(values)) => Ok(values),
        _ => {
            warn!("PTAX response has no 'value' array");
            Ok(Vec::new())
        }
    }
}

/// File name of the monthly artifact, e.g. `dolar_082021.json`.
pub fn artifact_name(first: NaiveDate) -> String {
    format!("dolar_{:02}{:04}.json", first.month(), first.year())
}
