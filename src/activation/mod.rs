pub mod cosine;
pub mod sigmoid;

pub use cosine::{cos_fn, cos_rows};
pub use sigmoid::{sigmoid, sigmoid_derivative};
