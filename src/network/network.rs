use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::activation::sigmoid::{sigmoid, sigmoid_derivative};
use crate::error::{NetworkError, Result};
use crate::layers::{Connection, Layer};
use crate::network::padding::InputPadding;
use crate::network::topology::Topology;

/// A densely connected feed-forward network.
///
/// Layers are stored by value and neurons are addressed by their position in
/// a layer; every connection carries the position of the neuron it feeds.
/// The shape never changes after construction, only activations, errors and
/// weights do, and only through the methods below.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Network {
    layers: Vec<Layer>,
    #[serde(skip)]
    padding: InputPadding,
}

impl Network {
    /// Builds a network from `topology` with weights drawn from `thread_rng`.
    pub fn new(topology: &Topology) -> Result<Network> {
        Network::with_rng(topology, &mut rand::thread_rng())
    }

    /// Builds a network drawing its initial weights, uniform on `[0, 1)`, from `rng`.
    ///
    /// Layer 0 starts from the topology's collectors (zeros if none). Every
    /// later layer starts with each neuron holding the sum of the previous
    /// layer's starting activations.
    pub fn with_rng<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Result<Network> {
        topology.validate()?;

        let mut layers = Vec::with_capacity(topology.layers.len());
        layers.push(Layer::from_activations(&topology.input_seed()));

        for &size in &topology.layers[1..] {
            let prev = layers.len() - 1;
            let seed = layers[prev].activation_sum();
            for neuron in layers[prev].neurons.iter_mut() {
                neuron.connections = (0..size)
                    .map(|target| Connection::new(target, rng.gen::<f64>()))
                    .collect();
            }
            layers.push(Layer::from_activations(&vec![seed; size]));
        }

        Ok(Network {
            layers,
            padding: InputPadding::default(),
        })
    }

    /// Replaces the rule used to fit short input rows.
    pub fn with_padding(mut self, padding: InputPadding) -> Network {
        self.padding = padding;
        self
    }

    pub fn padding(&self) -> InputPadding {
        self.padding
    }

    // -----------------------------------------------------------------------
    // Structure queries
    // -----------------------------------------------------------------------

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the output layer, or `None` for a network with no layers.
    pub fn last_index(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    fn input_layer(&self) -> Result<&Layer> {
        self.layers.first().ok_or(NetworkError::EmptyNetwork)
    }

    fn output_layer(&self) -> Result<&Layer> {
        self.layers.last().ok_or(NetworkError::EmptyNetwork)
    }

    pub fn input_width(&self) -> Result<usize> {
        Ok(self.input_layer()?.len())
    }

    pub fn output_width(&self) -> Result<usize> {
        Ok(self.output_layer()?.len())
    }

    /// Current output-layer activations.
    pub fn outputs(&self) -> Result<Vec<f64>> {
        Ok(self.output_layer()?.activations())
    }

    /// Mean of the output-layer activations.
    pub fn outputs_average(&self) -> Result<f64> {
        let output = self.output_layer()?;
        Ok(output.activation_sum() / output.len() as f64)
    }

    /// Current input-layer activations.
    pub fn input_window(&self) -> Result<Vec<f64>> {
        Ok(self.input_layer()?.activations())
    }

    /// Weight of the connection from neuron `from` in layer `layer` to neuron
    /// `to` in layer `layer + 1`.
    pub fn weight(&self, layer: usize, from: usize, to: usize) -> Option<f64> {
        self.layers
            .get(layer)?
            .neurons
            .get(from)?
            .connections
            .get(to)
            .map(|c| c.weight)
    }

    /// Overwrites a single connection weight.
    pub fn set_weight(&mut self, layer: usize, from: usize, to: usize, weight: f64) -> Result<()> {
        let layer_count = self.layers.len();
        let neurons = &mut self
            .layers
            .get_mut(layer)
            .ok_or(NetworkError::DimensionMismatch {
                expected: layer_count,
                actual: layer,
                context: "layer index",
            })?
            .neurons;
        let width = neurons.len();
        let connections = &mut neurons
            .get_mut(from)
            .ok_or(NetworkError::DimensionMismatch {
                expected: width,
                actual: from,
                context: "source neuron index",
            })?
            .connections;
        let fan_out = connections.len();
        let connection = connections
            .get_mut(to)
            .ok_or(NetworkError::DimensionMismatch {
                expected: fan_out,
                actual: to,
                context: "target neuron index",
            })?;
        connection.weight = weight;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Input window
    // -----------------------------------------------------------------------

    /// Fits `row` to the input layer under the current padding rule without
    /// touching the network.
    pub fn fit_input(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.padding.apply(row, self.input_width()?)
    }

    /// Loads `row` into the input layer.
    pub fn set_inputs(&mut self, row: &[f64]) -> Result<()> {
        let fitted = self.fit_input(row)?;
        for (neuron, value) in self.layers[0].neurons.iter_mut().zip(fitted) {
            neuron.activation = value;
        }
        Ok(())
    }

    /// Drops the oldest input (position 0), moves the rest down one place and
    /// writes `newest` into the last position.
    pub fn shift_inputs(&mut self, newest: f64) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        let inputs = &mut self.layers[0].neurons;
        for i in 1..inputs.len() {
            inputs[i - 1].activation = inputs[i].activation;
        }
        if let Some(last) = inputs.last_mut() {
            last.activation = newest;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Training primitives
    // -----------------------------------------------------------------------

    /// Forward pass over the current input activations.
    pub fn forward(&mut self) {
        for i in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(i);
            let prev = &before[i - 1];
            for (j, neuron) in after[0].neurons.iter_mut().enumerate() {
                let sum: f64 = prev
                    .neurons
                    .iter()
                    .map(|p| p.activation * p.weight_to(j))
                    .sum();
                neuron.activation = sigmoid(sum);
            }
        }
    }

    /// Computes every neuron's delta against `expected`, output layer first.
    pub fn backward(&mut self, expected: &[f64]) -> Result<()> {
        let width = self.output_width()?;
        if expected.len() != width {
            return Err(NetworkError::DimensionMismatch {
                expected: width,
                actual: expected.len(),
                context: "expected outputs",
            });
        }

        let last = self.layers.len() - 1;
        for (neuron, target) in self.layers[last].neurons.iter_mut().zip(expected) {
            neuron.error = (neuron.activation - target) * sigmoid_derivative(neuron.activation);
        }

        // Hidden deltas read the next layer's deltas, so walk backwards.
        for i in (0..last).rev() {
            let (before, after) = self.layers.split_at_mut(i + 1);
            let next = &after[0];
            for neuron in before[i].neurons.iter_mut() {
                let raw: f64 = neuron
                    .connections
                    .iter()
                    .map(|c| c.weight * next.neurons[c.target].error)
                    .sum();
                neuron.error = raw * sigmoid_derivative(neuron.activation);
            }
        }
        Ok(())
    }

    /// One gradient-descent step: `w -= lr * delta(target) * activation(source)`.
    pub fn update_weights(&mut self, learning_rate: f64) {
        for i in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(i);
            let current = &after[0];
            for source in before[i - 1].neurons.iter_mut() {
                let activation = source.activation;
                for c in source.connections.iter_mut() {
                    c.weight -= learning_rate * current.neurons[c.target].error * activation;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Snapshot export
    // -----------------------------------------------------------------------

    /// Pretty-printed JSON snapshot of every layer, neuron and weight.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the JSON snapshot to `path`.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layers.is_empty() {
            return writeln!(f, "<empty network>");
        }
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "layer {i}")?;
            for neuron in layer.neurons() {
                writeln!(
                    f,
                    "  neuron activation={:.6} error={:.6}",
                    neuron.activation, neuron.error
                )?;
                for c in &neuron.connections {
                    writeln!(f, "    -> {} weight={:.6}", c.target, c.weight)?;
                }
            }
        }
        Ok(())
    }
}
