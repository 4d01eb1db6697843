use serde::Serialize;

use crate::activation::cosine::cos_fn;
use crate::error::{NetworkError, Result};
use crate::loss::squared_error::SquaredError;
use crate::network::network::Network;

/// A single prediction, shaped for plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// First element of the squashed input row.
    pub x: f64,
    /// Averaged output activation.
    pub y: f64,
    /// RMSE between `y` and the squashed expected value.
    pub error: f64,
}

/// Squashes `row` with `cos_fn`, runs it through the network and compares the
/// averaged output against `cos_fn(expected)`.
///
/// Leaves the row's activations in the network.
pub fn predict(network: &mut Network, row: &[f64], expected: f64) -> Result<Prediction> {
    let squashed: Vec<f64> = row.iter().map(|&v| cos_fn(v)).collect();
    network.set_inputs(&squashed)?;
    network.forward();

    let x = network
        .input_window()?
        .first()
        .copied()
        .ok_or(NetworkError::EmptyNetwork)?;
    let y = network.outputs_average()?;
    let goal = cos_fn(expected);
    let error = SquaredError::rmse(&[y], &[goal]);

    tracing::debug!(
        given_x = row.first().copied().unwrap_or_default(),
        generated_y = y,
        predicted_y = goal,
        error,
        "prediction"
    );
    Ok(Prediction { x, y, error })
}

/// Runs every row through the network in order and returns the averaged
/// output of the **last** row only.
///
/// Rows are used as given (no cosine squash). With no rows the current output
/// average is returned unchanged.
pub fn test(network: &mut Network, rows: &[Vec<f64>]) -> Result<f64> {
    let fitted = rows
        .iter()
        .map(|row| network.fit_input(row))
        .collect::<Result<Vec<_>>>()?;
    for row in &fitted {
        network.set_inputs(row)?;
        network.forward();
    }
    network.outputs_average()
}
