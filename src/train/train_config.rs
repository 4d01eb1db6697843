use std::sync::mpsc;

use crate::error::{NetworkError, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a supervised `train` run.
///
/// # Fields
/// - `learning_rate` — gradient-descent step size, must be > 0
/// - `epochs`        — hard cap on full passes over the data, must be ≥ 1
/// - `target_error`  — the run stops once an epoch's summed squared error is
///                     at or below this value
/// - `progress_tx`   — optional channel; one `EpochStats` is sent per epoch
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub target_error: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(learning_rate: f64, epochs: usize, target_error: f64) -> Self {
        TrainConfig {
            learning_rate,
            epochs,
            target_error,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}

/// Configuration for a `train_generatively` run.
///
/// # Fields
/// - `learning_rate` — shared by the warm-up and the autoregressive phase
/// - `epochs`        — cap on inner steps spent on each generated row
/// - `warmup_epochs` — epoch budget of the supervised warm-up
/// - `target_error`  — warm-up threshold (summed squared error) and per-row
///                     threshold (RMSE)
/// - `new_rows`      — rows to generate after the initial recorded row
/// - `offset`        — amount the running target advances per row
/// - `progress_tx`   — optional channel for warm-up epochs and inner steps
#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub warmup_epochs: usize,
    pub target_error: f64,
    pub new_rows: usize,
    pub offset: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl GenerativeConfig {
    pub const DEFAULT_WARMUP_EPOCHS: usize = 250;

    /// Creates a `GenerativeConfig` with the default warm-up budget and no
    /// progress channel.
    pub fn new(
        learning_rate: f64,
        epochs: usize,
        target_error: f64,
        new_rows: usize,
        offset: f64,
    ) -> Self {
        GenerativeConfig {
            learning_rate,
            epochs,
            warmup_epochs: Self::DEFAULT_WARMUP_EPOCHS,
            target_error,
            new_rows,
            offset,
            progress_tx: None,
        }
    }

    pub fn with_warmup_epochs(mut self, warmup_epochs: usize) -> Self {
        self.warmup_epochs = warmup_epochs;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Settings for the supervised warm-up phase.
    pub fn warmup(&self) -> TrainConfig {
        TrainConfig {
            learning_rate: self.learning_rate,
            epochs: self.warmup_epochs,
            target_error: self.target_error,
            progress_tx: self.progress_tx.clone(),
        }
    }
}

pub(crate) fn check_epochs(epochs: usize, what: &str) -> Result<()> {
    if epochs == 0 {
        return Err(NetworkError::Configuration(format!(
            "{what} must be at least 1"
        )));
    }
    Ok(())
}
