use serde::Serialize;

use crate::error::{NetworkError, Result};
use crate::loss::squared_error::SquaredError;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochStats, TrainPhase};
use crate::train::train_config::{check_epochs, TrainConfig};

/// Outcome of a supervised run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainReport {
    /// 0-based index of the last epoch that ran.
    pub epoch: usize,
    /// Summed squared error of that epoch.
    pub error: f64,
    /// Whether the run stopped because `error <= target_error`.
    pub converged: bool,
}

/// Trains `network` on `inputs` → `expected` until an epoch's summed squared
/// error drops to `config.target_error` or `config.epochs` runs out.
///
/// Rows are visited in their given order and the weights are updated after
/// every row. All shapes are checked before the network is touched.
pub fn train(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<TrainReport> {
    let optimizer = Sgd::new(config.learning_rate)?;
    check_epochs(config.epochs, "epoch budget")?;
    let rows = fit_dataset(network, inputs, expected)?;

    let mut report = TrainReport {
        epoch: 0,
        error: f64::INFINITY,
        converged: false,
    };

    for epoch in 0..config.epochs {
        let error = run_epoch(network, &rows, expected, &optimizer)?;

        EpochStats {
            phase: TrainPhase::Supervised,
            epoch,
            row: None,
            learning_rate: optimizer.learning_rate,
            error,
        }
        .emit(config.progress_tx.as_ref());

        report = TrainReport {
            epoch,
            error,
            converged: error <= config.target_error,
        };
        if report.converged {
            tracing::info!(epoch, error, "target error reached");
            break;
        }
    }

    if !report.converged {
        tracing::info!(
            epochs = config.epochs,
            error = report.error,
            "epoch budget exhausted"
        );
    }
    Ok(report)
}

/// Runs a single pass over the data and returns its summed squared error.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    let rows = fit_dataset(network, inputs, expected)?;
    run_epoch(network, &rows, expected, optimizer)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn run_epoch(
    network: &mut Network,
    rows: &[Vec<f64>],
    expected: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    let mut total = 0.0;
    for (row, target) in rows.iter().zip(expected) {
        network.set_inputs(row)?;
        network.forward();
        total += SquaredError::sum(&network.outputs()?, target);
        network.backward(target)?;
        optimizer.step(network);
    }
    Ok(total)
}

/// Validates a dataset against the network and returns the input rows
/// fitted to the input layer.
pub(crate) fn fit_dataset(
    network: &Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>> {
    if inputs.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }
    if inputs.len() != expected.len() {
        return Err(NetworkError::DimensionMismatch {
            expected: inputs.len(),
            actual: expected.len(),
            context: "expected output rows",
        });
    }
    let output_width = network.output_width()?;
    if let Some(bad) = expected.iter().find(|row| row.len() != output_width) {
        return Err(NetworkError::DimensionMismatch {
            expected: output_width,
            actual: bad.len(),
            context: "expected outputs",
        });
    }
    inputs.iter().map(|row| network.fit_input(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::topology::Topology;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    fn seeded(layers: Vec<usize>, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::with_rng(&Topology::new(layers), &mut rng).unwrap()
    }

    #[test]
    fn stops_early_when_target_reached() {
        let mut net = seeded(vec![2, 1], 3);
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let expected = vec![vec![0.9], vec![0.9]];
        let report = train(&mut net, &inputs, &expected, &TrainConfig::new(0.5, 5000, 0.05)).unwrap();
        assert!(report.converged);
        assert!(report.epoch < 4999);
        assert!(report.error <= 0.05);
    }

    #[test]
    fn runs_full_budget_when_target_unreachable() {
        let mut net = seeded(vec![2, 1], 3);
        let inputs = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let expected = vec![vec![0.0], vec![1.0]];
        let report = train(&mut net, &inputs, &expected, &TrainConfig::new(0.1, 20, 0.0)).unwrap();
        assert!(!report.converged);
        assert_eq!(report.epoch, 19);
    }

    #[test]
    fn progress_channel_gets_one_record_per_epoch() {
        let (tx, rx) = mpsc::channel();
        let mut net = seeded(vec![2, 1], 1);
        let config = TrainConfig::new(0.1, 5, 0.0).with_progress(tx);
        train(&mut net, &[vec![1.0, 0.5]], &[vec![0.2]], &config).unwrap();
        drop(config);
        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert!(stats.iter().all(|s| s.phase == TrainPhase::Supervised && s.row.is_none()));
        assert_eq!(stats.last().unwrap().epoch, 4);
    }

    #[test]
    fn shape_errors_leave_network_untouched() {
        let mut net = seeded(vec![2, 2, 1], 5);
        let before = net.clone();
        let config = TrainConfig::new(0.5, 10, 0.01);

        let err = train(&mut net, &[vec![0.0, 1.0]], &[vec![0.0, 1.0]], &config).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { context: "expected outputs", .. }));

        let err = train(&mut net, &[vec![0.0, 1.0], vec![0.0, 1.0, 2.0]], &[vec![0.0], vec![1.0]], &config)
            .unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { context: "input row", .. }));

        let err = train(&mut net, &[vec![0.0, 1.0]], &[], &config).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { .. }));

        assert!(matches!(train(&mut net, &[], &[], &config), Err(NetworkError::EmptyDataset)));
        assert_eq!(net.layers(), before.layers());
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let mut net = seeded(vec![2, 1], 5);
        let data = (vec![vec![0.0, 1.0]], vec![vec![1.0]]);
        assert!(matches!(
            train(&mut net, &data.0, &data.1, &TrainConfig::new(0.0, 10, 0.01)),
            Err(NetworkError::Configuration(_))
        ));
        assert!(matches!(
            train(&mut net, &data.0, &data.1, &TrainConfig::new(0.1, 0, 0.01)),
            Err(NetworkError::Configuration(_))
        ));
    }

    #[test]
    fn single_epoch_matches_manual_step() {
        let mut a = seeded(vec![2, 1], 9);
        let mut b = a.clone();
        let sgd = Sgd::new(0.3).unwrap();
        let error = train_epoch(&mut a, &[vec![0.4, 0.8]], &[vec![0.1]], &sgd).unwrap();

        b.set_inputs(&[0.4, 0.8]).unwrap();
        b.forward();
        let expected_error = (0.1 - b.outputs().unwrap()[0]).powi(2);
        b.backward(&[0.1]).unwrap();
        b.update_weights(0.3);

        assert_eq!(error, expected_error);
        assert_eq!(a.layers(), b.layers());
    }
}
