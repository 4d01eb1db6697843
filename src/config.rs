use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::padding::InputPadding;
use crate::network::topology::Topology;
use crate::train::train_config::{GenerativeConfig, TrainConfig};

/// Hyperparameters for a command-line run, loadable from JSON.
///
/// Every field has a default, so a config file only needs the values it
/// changes. The input width is not configured: it comes from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Hidden layer sizes between the input and the single output neuron.
    pub hidden_layers: Vec<usize>,
    pub learning_rate: f64,
    /// Supervised epoch budget, and the per-row budget when generating.
    pub epochs: usize,
    pub warmup_epochs: usize,
    pub target_error: f64,
    pub new_rows: usize,
    pub offset: f64,
    pub padding: InputPadding,
    /// Optional seed for the input layer; empty means zeros.
    pub collectors: Vec<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            hidden_layers: vec![2],
            learning_rate: 0.4,
            epochs: 500,
            warmup_epochs: GenerativeConfig::DEFAULT_WARMUP_EPOCHS,
            target_error: 0.05,
            new_rows: 10,
            offset: 1.0,
            padding: InputPadding::ZeroFill,
            collectors: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// `[input_width, hidden..., 1]`, validated.
    pub fn topology(&self, input_width: usize) -> Result<Topology> {
        let mut layers = Vec::with_capacity(self.hidden_layers.len() + 2);
        layers.push(input_width);
        layers.extend_from_slice(&self.hidden_layers);
        layers.push(1);
        let topology = Topology::with_collectors(layers, self.collectors.clone());
        topology.validate()?;
        Ok(topology)
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.learning_rate, self.epochs, self.target_error)
    }

    pub fn generative_config(&self) -> GenerativeConfig {
        GenerativeConfig::new(
            self.learning_rate,
            self.epochs,
            self.target_error,
            self.new_rows,
            self.offset,
        )
        .with_warmup_epochs(self.warmup_epochs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"learning_rate": 0.1, "padding": "legacy"}"#).unwrap();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.padding, InputPadding::Legacy);
        assert_eq!(config.epochs, 500);
        assert_eq!(config.hidden_layers, vec![2]);
    }

    #[test]
    fn topology_wraps_hidden_layers() {
        let config = RunConfig {
            hidden_layers: vec![5, 3],
            ..RunConfig::default()
        };
        assert_eq!(config.topology(4).unwrap().layers, vec![4, 5, 3, 1]);
        assert!(matches!(config.topology(0), Err(NetworkError::Configuration(_))));
    }

    #[test]
    fn generative_config_carries_every_field() {
        let config = RunConfig::default();
        let g = config.generative_config();
        assert_eq!(g.learning_rate, 0.4);
        assert_eq!(g.epochs, 500);
        assert_eq!(g.warmup_epochs, 250);
        assert_eq!(g.new_rows, 10);
        assert_eq!(g.offset, 1.0);
        assert!(g.progress_tx.is_none());
    }
}
