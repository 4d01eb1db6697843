use serde::Serialize;

use crate::activation::cosine::{cos_fn, cos_rows};
use crate::error::{NetworkError, Result};
use crate::loss::squared_error::SquaredError;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochStats, TrainPhase};
use crate::train::train_config::{check_epochs, GenerativeConfig};
use crate::train::trainer::{fit_dataset, train, TrainReport};

/// Outcome of a generative run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerativeReport {
    /// Result of the supervised warm-up on the cosine-squashed data.
    pub warmup: TrainReport,
    /// `new_rows + 1` rows, each the input window followed by the squashed
    /// target it was trained towards.
    pub rows: Vec<Vec<f64>>,
}

/// Warms the network up on the cosine-squashed dataset, then keeps training
/// it on its own output.
///
/// After the warm-up, a running target starts at `expected[0][0]` and moves
/// by `config.offset` per generated row. For each row the network is stepped
/// (at most `config.epochs` times) towards `cos_fn(target)`, the input window
/// plus that squashed target is recorded, and the latest output is pushed into
/// the window as its newest element.
///
/// The output layer must have exactly one neuron.
pub fn train_generatively(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected: &[Vec<f64>],
    config: &GenerativeConfig,
) -> Result<GenerativeReport> {
    let output_width = network.output_width()?;
    if output_width != 1 {
        return Err(NetworkError::PreconditionViolation(format!(
            "generative training needs a single output neuron, the network has {output_width}"
        )));
    }
    let optimizer = Sgd::new(config.learning_rate)?;
    check_epochs(config.epochs, "per-row epoch budget")?;
    check_epochs(config.warmup_epochs, "warm-up epoch budget")?;

    let squashed_inputs = cos_rows(inputs);
    let squashed_expected = cos_rows(expected);
    fit_dataset(network, &squashed_inputs, &squashed_expected)?;
    let mut target = expected[0][0];

    let warmup = train(network, &squashed_inputs, &squashed_expected, &config.warmup())?;
    tracing::info!(
        new_rows = config.new_rows,
        offset = config.offset,
        "starting generative training"
    );

    let mut rows = Vec::with_capacity(config.new_rows + 1);
    rows.push(window_with_target(network, target)?);
    let first_output = network.outputs_average()?;
    network.shift_inputs(first_output)?;
    target += config.offset;

    for _ in 0..config.new_rows {
        let row = rows.len();
        let goal = cos_fn(target);

        for epoch in 0..config.epochs {
            network.forward();
            let output = network.outputs_average()?;
            if !output.is_finite() {
                return Err(NetworkError::Diverged { row });
            }
            let error = SquaredError::rmse(&[output], &[goal]);

            EpochStats {
                phase: TrainPhase::Generative,
                epoch,
                row: Some(row),
                learning_rate: optimizer.learning_rate,
                error,
            }
            .emit(config.progress_tx.as_ref());

            if error <= config.target_error {
                break;
            }
            network.backward(&[goal])?;
            optimizer.step(network);
        }

        let generated = window_with_target(network, target)?;
        tracing::info!(row, values = ?generated, "created new row");
        rows.push(generated);

        let latest = network.outputs_average()?;
        network.shift_inputs(latest)?;
        target += config.offset;
    }

    Ok(GenerativeReport { warmup, rows })
}

fn window_with_target(network: &Network, target: f64) -> Result<Vec<f64>> {
    let mut row = network.input_window()?;
    row.push(cos_fn(target));
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::topology::Topology;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    fn seeded(layers: Vec<usize>) -> Network {
        let mut rng = StdRng::seed_from_u64(11);
        Network::with_rng(&Topology::new(layers), &mut rng).unwrap()
    }

    fn sequence() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let inputs = (1..=6)
            .map(|i| (0..4).map(|k| (i + k) as f64).collect())
            .collect();
        let expected = (1..=6).map(|i| vec![(i + 4) as f64]).collect();
        (inputs, expected)
    }

    #[test]
    fn produces_one_row_per_request_plus_initial() {
        let (inputs, expected) = sequence();
        let mut net = seeded(vec![4, 2, 1]);
        let config = GenerativeConfig::new(0.4, 50, 0.05, 5, 1.0).with_warmup_epochs(20);
        let report = train_generatively(&mut net, &inputs, &expected, &config).unwrap();

        assert_eq!(report.rows.len(), 6);
        for (k, row) in report.rows.iter().enumerate() {
            assert_eq!(row.len(), 5);
            assert_relative_eq!(row[4], cos_fn(5.0 + k as f64));
            assert!(row.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn first_row_is_last_training_window() {
        let (inputs, expected) = sequence();
        let mut net = seeded(vec![4, 2, 1]);
        let config = GenerativeConfig::new(0.4, 10, 0.05, 0, 1.0).with_warmup_epochs(5);
        let report = train_generatively(&mut net, &inputs, &expected, &config).unwrap();

        assert_eq!(report.rows.len(), 1);
        let last: Vec<f64> = inputs[5].iter().map(|&x| cos_fn(x)).collect();
        assert_eq!(&report.rows[0][..4], last.as_slice());
    }

    #[test]
    fn consecutive_rows_are_shifted_windows() {
        let (inputs, expected) = sequence();
        let mut net = seeded(vec![4, 3, 1]);
        let config = GenerativeConfig::new(0.4, 30, 0.05, 4, 0.5).with_warmup_epochs(10);
        let report = train_generatively(&mut net, &inputs, &expected, &config).unwrap();

        for pair in report.rows.windows(2) {
            assert_eq!(pair[1][..3], pair[0][1..4]);
            // newest input is a sigmoid output
            assert!((0.0..=1.0).contains(&pair[1][3]));
        }
    }

    #[test]
    fn reports_warmup_and_generative_progress() {
        let (inputs, expected) = sequence();
        let (tx, rx) = mpsc::channel();
        let mut net = seeded(vec![4, 2, 1]);
        let config = GenerativeConfig::new(0.4, 3, 0.0, 2, 1.0)
            .with_warmup_epochs(4)
            .with_progress(tx);
        train_generatively(&mut net, &inputs, &expected, &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        let supervised = stats.iter().filter(|s| s.phase == TrainPhase::Supervised).count();
        let generative: Vec<&EpochStats> =
            stats.iter().filter(|s| s.phase == TrainPhase::Generative).collect();
        assert_eq!(supervised, 4);
        // target error 0.0 is never met, so each row runs its full budget
        assert_eq!(generative.len(), 6);
        assert_eq!(generative[0].row, Some(1));
        assert_eq!(generative[5].row, Some(2));
    }

    #[test]
    fn requires_single_output() {
        let (inputs, _) = sequence();
        let expected: Vec<Vec<f64>> = inputs.iter().map(|_| vec![0.0, 1.0]).collect();
        let mut net = seeded(vec![4, 2, 2]);
        let before = net.clone();
        let config = GenerativeConfig::new(0.4, 10, 0.05, 2, 1.0);
        let err = train_generatively(&mut net, &inputs, &expected, &config).unwrap_err();
        assert!(matches!(err, NetworkError::PreconditionViolation(_)));
        assert_eq!(net.layers(), before.layers());
    }

    #[test]
    fn rejects_empty_data_and_bad_budgets_before_training() {
        let mut net = seeded(vec![4, 2, 1]);
        let before = net.clone();
        let config = GenerativeConfig::new(0.4, 10, 0.05, 2, 1.0);
        assert!(matches!(
            train_generatively(&mut net, &[], &[], &config),
            Err(NetworkError::EmptyDataset)
        ));

        let (inputs, expected) = sequence();
        let no_steps = GenerativeConfig::new(0.4, 0, 0.05, 2, 1.0);
        assert!(matches!(
            train_generatively(&mut net, &inputs, &expected, &no_steps),
            Err(NetworkError::Configuration(_))
        ));
        assert_eq!(net.layers(), before.layers());
    }

    #[test]
    fn non_finite_output_reports_divergence() {
        let mut net = seeded(vec![2, 1]);
        let config = GenerativeConfig::new(0.4, 5, 0.05, 3, 1.0).with_warmup_epochs(2);
        let err = train_generatively(&mut net, &[vec![f64::INFINITY, 1.0]], &[vec![1.0]], &config)
            .unwrap_err();
        assert!(matches!(err, NetworkError::Diverged { row: 1 }));
    }
}
