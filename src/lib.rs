//! Gaussian neural network policies.
//!
//! A [`NeuralNetwork`] maps states to actions sampled from a normal distribution whose mean is
//! the output of a fully connected network and whose deviation is estimated from its hidden
//! units. Weights live in an explicit [`Session`](engine::Session) so several policies can share
//! one, each under its own scope.

pub mod activations;
pub mod configs;
pub mod engine;
pub mod error;
pub mod initialization;
pub mod policy;
pub mod spaces;

pub use error::{PolicyErr, Result};
pub use policy::{NetworkConfig, NeuralNetwork, Policy};
