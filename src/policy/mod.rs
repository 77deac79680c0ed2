mod config;
mod neural_network;
mod parameter_space;
mod policy;

pub use config::{NetworkConfig, NetworkConfigBuilder};
pub use neural_network::NeuralNetwork;
pub use parameter_space::ParameterSpace;
pub use policy::Policy;
