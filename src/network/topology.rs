use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Shape of a network plus an optional seed for the input layer.
///
/// Fields:
/// - `layers`     — neuron count per layer, input first, output last
/// - `collectors` — initial input activations; empty means "start from zeros",
///                  otherwise its length must equal `layers[0]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub layers: Vec<usize>,
    #[serde(default)]
    pub collectors: Vec<f64>,
}

impl Topology {
    /// Topology with no collector seed.
    pub fn new(layers: Vec<usize>) -> Topology {
        Topology {
            layers,
            collectors: Vec::new(),
        }
    }

    pub fn with_collectors(layers: Vec<usize>, collectors: Vec<f64>) -> Topology {
        Topology { layers, collectors }
    }

    /// Checks the shape invariants; returns a `Configuration` error describing
    /// the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(NetworkError::Configuration(format!(
                "a topology needs at least 2 layers, got {}",
                self.layers.len()
            )));
        }
        if let Some(i) = self.layers.iter().position(|&n| n == 0) {
            return Err(NetworkError::Configuration(format!(
                "layer {i} has no neurons"
            )));
        }
        if !self.collectors.is_empty() && self.collectors.len() != self.layers[0] {
            return Err(NetworkError::Configuration(format!(
                "{} collectors supplied for an input layer of {} neurons",
                self.collectors.len(),
                self.layers[0]
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Pads the collector seed with `1.0` up to the input width.
    pub fn fill_collectors(&mut self) {
        if let Some(&width) = self.layers.first() {
            while self.collectors.len() < width {
                self.collectors.push(1.0);
            }
        }
    }

    /// Initial activations for the input layer.
    pub(crate) fn input_seed(&self) -> Vec<f64> {
        if self.collectors.is_empty() {
            vec![0.0; self.layers[0]]
        } else {
            self.collectors.clone()
        }
    }

    /// Serializes the topology to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a topology from JSON and validates it.
    pub fn load_json(path: &str) -> Result<Topology> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let topology: Topology = serde_json::from_reader(reader)?;
        topology.validate()?;
        Ok(topology)
    }
}
