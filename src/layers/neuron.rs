use serde::Serialize;

/// A weighted link to a neuron in the next layer.
///
/// `target` is that neuron's position in its layer. Only `weight` is exported
/// in snapshots; the target is implied by the connection's own position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub weight: f64,
    #[serde(skip)]
    pub target: usize,
}

impl Connection {
    pub fn new(target: usize, weight: f64) -> Connection {
        Connection { weight, target }
    }
}

/// A single unit: its current activation, its backpropagated delta, and one
/// outgoing connection per neuron of the next layer (in that layer's order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neuron {
    pub activation: f64,
    pub error: f64,
    pub connections: Vec<Connection>,
}

impl Neuron {
    pub fn new(activation: f64) -> Neuron {
        Neuron {
            activation,
            error: 0.0,
            connections: Vec::new(),
        }
    }

    /// Weight of the connection feeding the neuron at `target` in the next layer.
    #[inline]
    pub fn weight_to(&self, target: usize) -> f64 {
        self.connections[target].weight
    }
}
