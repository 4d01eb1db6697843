pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod predict;
pub mod train;

// Convenience re-exports
pub use activation::cosine::cos_fn;
pub use config::RunConfig;
pub use error::{NetworkError, Result};
pub use layers::{Connection, Layer, Neuron};
pub use network::{InputPadding, Network, Topology};
pub use optim::sgd::Sgd;
pub use predict::{predict, test, Prediction};
pub use train::{
    train, train_generatively, EpochStats, GenerativeConfig, GenerativeReport, TrainConfig,
    TrainPhase, TrainReport,
};
