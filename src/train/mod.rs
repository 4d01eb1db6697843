pub mod epoch_stats;
pub mod generative;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, TrainPhase};
pub use generative::{train_generatively, GenerativeReport};
pub use train_config::{GenerativeConfig, TrainConfig};
pub use trainer::{train, train_epoch, TrainReport};
