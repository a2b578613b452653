//! Ordinary least-squares line fit and its Plotly payload.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::error::FitError;
use crate::stats::{centered_cross_sum, mean};

/// `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y` against `[1, x]` by solving the normal equations
/// `(XᵀX) β = Xᵀy`.
///
/// # Errors
///
/// Fails when the vectors differ in length, hold fewer than two points, or
/// `x` is constant (`XᵀX` is singular).
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<LinearFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(FitError::TooFewPoints(x.len()));
    }

    let mx = mean(x);
    let my = mean(y);
    let sxx = centered_cross_sum(x, mx, x, mx);
    if sxx == 0.0 || !sxx.is_finite() {
        return Err(FitError::Singular);
    }
    let slope = centered_cross_sum(x, mx, y, my) / sxx;

    Ok(LinearFit {
        intercept: my - slope * mx,
        slope,
    })
}

/// Parses whitespace-separated numbers. Text after `#` on a line is ignored.
pub fn parse_vector(text: &str) -> Result<Vec<f64>, FitError> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        for token in data.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| FitError::Parse {
                line: idx + 1,
                token: token.to_string(),
            })?;
            out.push(value);
        }
    }
    Ok(out)
}

/// Reads a vector file, see [`parse_vector`].
pub fn read_vector(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_vector(&text).with_context(|| format!("invalid data in {}", path.display()))
}

#[derive(Debug, Serialize)]
pub struct Trace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AxisTitle {
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: &'static str,
    pub xaxis: AxisTitle,
    pub yaxis: AxisTitle,
}

/// Plotly figure: the observed points plus the fitted line.
#[derive(Debug, Serialize)]
pub struct PlotPayload {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// Builds the figure. The fitted line is drawn over the sorted `x` values.
pub fn plot_payload(x: &[f64], y: &[f64], fit: &LinearFit) -> PlotPayload {
    let mut x_sorted = x.to_vec();
    x_sorted.sort_by(f64::total_cmp);
    let y_pred = x_sorted.iter().map(|&v| fit.predict(v)).collect();

    PlotPayload {
        data: vec![
            Trace {
                x: x.to_vec(),
                y: y.to_vec(),
                mode: "markers",
                kind: "scatter",
                name: "Dados",
            },
            Trace {
                x: x_sorted,
                y: y_pred,
                mode: "lines",
                kind: "scatter",
                name: "Reta estimada",
            },
        ],
        layout: Layout {
            title: "Regressão Linear",
            xaxis: AxisTitle {
                title: "Anos de estudo",
            },
            yaxis: AxisTitle { title: "Salário" },
        },
    }
}

/// Standalone page that renders `payload` with Plotly from its CDN.
pub fn render_html(payload: &PlotPayload) -> Result<String> {
    let figure = serde_json::to_string(payload)?;
    Ok(format!(
        r#"<!doctype html>
<html>
  <head><meta charset='utf-8'><script src='https://cdn.plot.ly/plotly-latest.min.js'></script></head>
  <body>
    <div id='plot' style='width:900px;height:520px'></div>
    <script>
      var obj = {figure};
      Plotly.newPlot('plot', obj.data, obj.layout);
    </script>
  </body>
</html>
"#
    ))
}
