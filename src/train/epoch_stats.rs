use std::sync::mpsc;

use serde::{Deserialize, Serialize};

/// Which loop produced an `EpochStats` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainPhase {
    /// A full pass of the supervised trainer over its rows.
    Supervised,
    /// One inner step of the autoregressive loop.
    Generative,
}

/// Progress record emitted by the training loops.
///
/// The supervised trainer sends one per epoch. The generative loop sends one
/// per inner step and tags it with the index of the row being generated.
/// Values go to the optional `progress_tx` channel of the run's config and are
/// mirrored as `tracing` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    pub phase: TrainPhase,
    /// 0-based epoch (or inner step) index.
    pub epoch: usize,
    /// Generated-row index; `None` for supervised epochs.
    pub row: Option<usize>,
    pub learning_rate: f64,
    /// Summed squared error for supervised epochs, RMSE for generative steps.
    pub error: f64,
}

impl EpochStats {
    /// Logs the record and forwards it to `tx`. A dropped receiver is ignored.
    pub(crate) fn emit(self, tx: Option<&mpsc::Sender<EpochStats>>) {
        match self.row {
            Some(row) => tracing::debug!(
                row,
                epoch = self.epoch,
                learning_rate = self.learning_rate,
                error = self.error,
                "generative step"
            ),
            None => tracing::debug!(
                epoch = self.epoch,
                learning_rate = self.learning_rate,
                error = self.error,
                "epoch"
            ),
        }
        if let Some(tx) = tx {
            let _ = tx.send(self);
        }
    }
}
