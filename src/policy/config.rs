use std::{fmt, sync::Arc};

use ndarray::Array2;

use super::NeuralNetwork;
use crate::{
    PolicyErr, Result,
    activations::{ActFn, Activation},
    engine::{DType, Scope, Session},
    initialization::{RandInit, WeightInit},
    spaces::Space,
};

/// The immutable record of everything needed to build a `NeuralNetwork`.
///
/// Structural copies of a network are made by cloning its config with a different scope.
#[derive(Clone)]
pub struct NetworkConfig {
    layers: Vec<usize>,
    state_space: Arc<dyn Space>,
    action_space: Arc<dyn Space>,
    weights: Option<Vec<Array2<f32>>>,
    init_weights: Arc<dyn WeightInit>,
    activation: Activation,
    dtype: DType,
    scope: Scope,
    do_setup: bool,
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("layers", &self.layers)
            .field("state_space", &self.state_space)
            .field("action_space", &self.action_space)
            .field("weights", &self.weights.as_ref().map(|w| w.len()))
            .field("activation", &self.activation)
            .field("dtype", &self.dtype)
            .field("scope", &self.scope)
            .field("do_setup", &self.do_setup)
            .finish_non_exhaustive()
    }
}

impl NetworkConfig {
    /// Starts building a `NetworkConfig`.
    ///
    /// # Arguments
    /// * `layers` - The layer sizes, the first is the input size and the last the output size.
    /// * `state_space` - The space states are drawn from.
    /// * `action_space` - The space actions belong to.
    pub fn builder<S, A>(
        layers: impl Into<Vec<usize>>,
        state_space: S,
        action_space: A,
    ) -> NetworkConfigBuilder
    where
        S: Space + 'static,
        A: Space + 'static,
    {
        Self::builder_shared(layers, Arc::new(state_space), Arc::new(action_space))
    }

    /// Same as `builder` for spaces that are already shared.
    pub fn builder_shared(
        layers: impl Into<Vec<usize>>,
        state_space: Arc<dyn Space>,
        action_space: Arc<dyn Space>,
    ) -> NetworkConfigBuilder {
        NetworkConfigBuilder {
            config: Self {
                layers: layers.into(),
                state_space,
                action_space,
                weights: None,
                init_weights: Arc::new(RandInit::default()),
                activation: Activation::Default,
                dtype: DType::default(),
                scope: Scope::default(),
                do_setup: false,
            },
        }
    }

    /// Returns a copy of this config under another scope.
    pub fn with_scope(&self, scope: impl Into<Scope>) -> Self {
        Self {
            scope: scope.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this config with another setup flag.
    pub fn with_setup(&self, do_setup: bool) -> Self {
        Self {
            do_setup,
            ..self.clone()
        }
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn state_space(&self) -> &dyn Space {
        self.state_space.as_ref()
    }

    pub fn action_space(&self) -> &dyn Space {
        self.action_space.as_ref()
    }

    pub fn weights(&self) -> Option<&[Array2<f32>]> {
        self.weights.as_deref()
    }

    pub fn init_weights(&self) -> &dyn WeightInit {
        self.init_weights.as_ref()
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn do_setup(&self) -> bool {
        self.do_setup
    }

    /// Checks that the config describes a buildable network.
    ///
    /// # Returns
    /// The activation function of every hidden layer, or an `InvalidConfig` error.
    pub(super) fn validate(&self) -> Result<Vec<ActFn>> {
        let layers = &self.layers;

        if layers.len() < 2 {
            return Err(PolicyErr::InvalidConfig(format!(
                "at least two layers needed, got {}",
                layers.len()
            )));
        }

        if let Some(i) = layers.iter().position(|&size| size == 0) {
            return Err(PolicyErr::InvalidConfig(format!("layer {i} has size 0")));
        }

        let activation = self.activation.resolve(layers.len() - 2)?;

        let (input, output) = (layers[0], layers[layers.len() - 1]);
        let state_dim = self.state_space.dimension();
        let action_dim = self.action_space.dimension();

        if state_dim != input {
            return Err(PolicyErr::InvalidConfig(format!(
                "the state space has dimension {state_dim} but the input layer has size {input}"
            )));
        }

        if action_dim != output {
            return Err(PolicyErr::InvalidConfig(format!(
                "the action space has dimension {action_dim} but the output layer has size {output}"
            )));
        }

        if let Some(weights) = &self.weights {
            if weights.len() != layers.len() - 1 {
                return Err(PolicyErr::InvalidConfig(format!(
                    "got {} weight matrices for {} layer transitions",
                    weights.len(),
                    layers.len() - 1
                )));
            }

            for (i, (w, dim)) in weights.iter().zip(layers.windows(2)).enumerate() {
                if w.dim() != (dim[0], dim[1]) {
                    return Err(PolicyErr::InvalidConfig(format!(
                        "weight matrix {i} has shape {:?}, expected ({}, {})",
                        w.dim(),
                        dim[0],
                        dim[1]
                    )));
                }
            }
        }

        Ok(activation)
    }
}

/// Builds a `NetworkConfig`, every optional argument starts at its default.
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Initial values for the action weights, one matrix per layer transition.
    pub fn weights(mut self, weights: Vec<Array2<f32>>) -> Self {
        self.config.weights = Some(weights);
        self
    }

    /// The initializer for every weight that isn't given explicitly.
    pub fn init_weights<W: WeightInit + 'static>(mut self, init_weights: W) -> Self {
        self.config.init_weights = Arc::new(init_weights);
        self
    }

    pub fn activation(mut self, activation: impl Into<Activation>) -> Self {
        self.config.activation = activation.into();
        self
    }

    pub fn dtype(mut self, dtype: DType) -> Self {
        self.config.dtype = dtype;
        self
    }

    pub fn scope(mut self, scope: impl Into<Scope>) -> Self {
        self.config.scope = scope.into();
        self
    }

    /// Whether the network graph is built right away.
    pub fn do_setup(mut self, do_setup: bool) -> Self {
        self.config.do_setup = do_setup;
        self
    }

    pub fn build(self) -> NetworkConfig {
        self.config
    }

    /// Builds the config and the network it describes.
    pub fn create(self, session: &mut Session) -> Result<NeuralNetwork> {
        NeuralNetwork::new(self.build(), session)
    }
}
