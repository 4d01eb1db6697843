pub mod network;
pub mod padding;
pub mod topology;

pub use network::Network;
pub use padding::InputPadding;
pub use topology::Topology;
