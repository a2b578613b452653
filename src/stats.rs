//! Small numeric helpers for the regression job.

/// Arithmetic mean. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of `(x - mx) * (y - my)` over paired values. With `xs == ys` this is
/// the sum of squared deviations.
pub fn centered_cross_sum(xs: &[f64], mx: f64, ys: &[f64], my: f64) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum()
}
