/// Squashes any real into `[0, 1]` via `(cos(x) + 1) / 2`.
///
/// Used by the generative trainer and the predictor so raw data lives in the
/// same range as sigmoid outputs.
pub fn cos_fn(x: f64) -> f64 {
    (x.cos() + 1.0) * 0.5
}

/// Applies [`cos_fn`] to every element of every row.
pub fn cos_rows(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.iter().map(|&x| cos_fn(x)).collect())
        .collect()
}
