use crate::error::{NetworkError, Result};
use crate::network::network::Network;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    /// Rejects learning rates that are not finite and strictly positive.
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetworkError::Configuration(format!(
                "learning rate must be a positive finite number, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies one gradient-descent step using the deltas left by the last
    /// backward pass.
    pub fn step(&self, network: &mut Network) {
        network.update_weights(self.learning_rate);
    }
}
