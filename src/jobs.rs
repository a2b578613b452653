//! The three batch jobs, wired from fetch to artifact.

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::fetch::{HttpClient, fetch_json};
use crate::output::{write_json, write_text};
use crate::ptax::{artifact_name, fetch_quotes, month_range};
use crate::regression::{LinearFit, fit_linear, plot_payload, read_vector, render_html};
use crate::series::{quote_observations, resample};
use crate::vehicles::extract_vehicles;

/// Fetches vehicle positions from `url`, normalizes them and writes the
/// records to `out`. Returns the number of records written.
#[tracing::instrument(skip(client, out), fields(out = %out.display()))]
pub async fn fetch_buses<C: HttpClient>(
    client: &C,
    url: &str,
    line: Option<&str>,
    out: &Path,
) -> Result<usize> {
    let raw = fetch_json(client, url).await?;
    let vehicles = extract_vehicles(&raw, line)?;

    if vehicles.is_empty() {
        warn!("No vehicles extracted; check the response shape of the API");
    } else {
        info!(count = vehicles.len(), "Vehicles extracted");
    }

    write_json(out, &vehicles)?;
    Ok(vehicles.len())
}

/// Fetches the PTAX quotes for `mmyyyy`, resamples them to one value per day
/// and writes `dolar_MMYYYY.json` into `out_dir`. Returns the artifact path.
///
/// Nothing is written when the period has no usable quote.
#[tracing::instrument(skip(client, out_dir))]
pub async fn fetch_dollar<C: HttpClient>(
    client: &C,
    mmyyyy: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let (first, last) = month_range(mmyyyy)?;
    info!(%first, %last, "Fetching PTAX quotes");

    let values = fetch_quotes(client, first, last).await?;
    let observations = quote_observations(&values)?;
    if observations.is_empty() {
        bail!("no quotes returned for {first}..{last}");
    }

    let series = resample(&observations, first, last);
    let path = out_dir.join(artifact_name(first));
    write_json(&path, &series)?;
    Ok(path)
}

/// Fits a line to the vectors in `x_path` / `y_path` and writes
/// `regression_plot.json` and `regression_plot.html` into `out_dir`.
#[tracing::instrument(skip_all, fields(x = %x_path.display(), y = %y_path.display()))]
pub fn run_regression(x_path: &Path, y_path: &Path, out_dir: &Path) -> Result<LinearFit> {
    let x = read_vector(x_path)?;
    let y = read_vector(y_path)?;

    let fit = fit_linear(&x, &y)?;
    info!(intercept = fit.intercept, slope = fit.slope, "Line fitted");

    let payload = plot_payload(&x, &y, &fit);
    write_json(&out_dir.join("regression_plot.json"), &payload)?;
    write_text(&out_dir.join("regression_plot.html"), &render_html(&payload)?)?;
    Ok(fit)
}
