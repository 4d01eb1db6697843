use serde::Serialize;

use crate::layers::neuron::Neuron;

/// Ordered neurons of one layer. A neuron's position is its only identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layer {
    pub(crate) neurons: Vec<Neuron>,
}

impl Layer {
    /// Builds a layer whose neurons start from the given activations.
    pub fn from_activations(activations: &[f64]) -> Layer {
        Layer {
            neurons: activations.iter().map(|&a| Neuron::new(a)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn activations(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.activation).collect()
    }

    /// Sum of all activations; seeds the next layer at construction time.
    pub fn activation_sum(&self) -> f64 {
        self.neurons.iter().map(|n| n.activation).sum()
    }
}
