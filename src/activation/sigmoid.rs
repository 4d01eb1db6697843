use std::f64::consts::E;

/// Logistic transfer function: 1 / (1 + e^-x).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the logistic function, expressed in terms of its *output*.
///
/// Neurons keep only their post-transfer activation, so the derivative is
/// evaluated as `a * (1 - a)` rather than from the pre-activation sum.
pub fn sigmoid_derivative(activation: f64) -> f64 {
    activation * (1.0 - activation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centred_at_half() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn derivative_matches_output_form() {
        let a = sigmoid(0.3);
        assert_relative_eq!(sigmoid_derivative(a), a * (1.0 - a));
        assert_relative_eq!(sigmoid_derivative(0.5), 0.25);
    }
}
