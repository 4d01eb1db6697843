pub struct SquaredError;

impl SquaredError {
    /// Σ (expected - predicted)²; accumulated across a whole epoch by the trainer.
    pub fn sum(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum()
    }

    /// Root-mean-square error. For a single output this is `|expected - predicted|`.
    pub fn rmse(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len().min(expected.len());
        if n == 0 {
            return 0.0;
        }
        (Self::sum(predicted, expected) / n as f64).sqrt()
    }
}
