use std::sync::Arc;

use rand_distr::{Normal, Uniform};

use super::{ActFnSpec, ActivationSpec, InitSpec, PolicySpec, SpaceSpec};
use crate::{
    PolicyErr, Result,
    activations::{ActFn, Activation},
    engine::Session,
    initialization::{ConstInit, FanInit, RandInit},
    policy::{NetworkConfig, NetworkConfigBuilder, NeuralNetwork},
    spaces::{BoundedSpace, RdSpace, Space},
};

/// Builds `NeuralNetwork` policies given a specification.
#[derive(Default)]
pub struct PolicyBuilder;

impl PolicyBuilder {
    /// Creates a new `PolicyBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new policy following a spec, together with the session holding its weights.
    ///
    /// # Arguments
    /// * `spec` - The specification for the policy.
    pub fn build(&self, spec: &PolicySpec) -> Result<(NeuralNetwork, Session)> {
        let mut session = self.generate_session(spec.seed);
        let config = self.resolve_config(spec)?;
        let network = NeuralNetwork::new(config, &mut session)?;

        Ok((network, session))
    }

    /// Turns a spec into the `NetworkConfig` it describes.
    pub fn resolve_config(&self, spec: &PolicySpec) -> Result<NetworkConfig> {
        let state_space = self.resolve_space(&spec.state_space)?;
        let action_space = self.resolve_space(&spec.action_space)?;

        let builder = NetworkConfig::builder_shared(spec.layers.clone(), state_space, action_space)
            .activation(self.resolve_activation(spec.activation.as_ref()))
            .dtype(spec.dtype)
            .scope(spec.scope.as_str())
            .do_setup(spec.do_setup);

        let builder = self.resolve_init(spec.init, builder)?;
        Ok(builder.build())
    }

    fn resolve_space(&self, spec: &SpaceSpec) -> Result<Arc<dyn Space>> {
        let space: Arc<dyn Space> = match spec {
            SpaceSpec::Bounded { low, high, shape } => {
                Arc::new(BoundedSpace::uniform(*low, *high, shape)?)
            }
            SpaceSpec::Rd { shape } => Arc::new(RdSpace::new(shape)),
        };

        Ok(space)
    }

    fn resolve_activation(&self, spec: Option<&ActivationSpec>) -> Activation {
        let Some(spec) = spec else {
            return Activation::Default;
        };

        match spec {
            ActivationSpec::Single(act_fn) => Activation::Single(self.resolve_act_fn(*act_fn)),
            ActivationSpec::PerLayer(act_fns) => Activation::PerLayer(
                act_fns
                    .iter()
                    .map(|act_fn| self.resolve_act_fn(*act_fn))
                    .collect(),
            ),
        }
    }

    fn resolve_act_fn(&self, spec: ActFnSpec) -> ActFn {
        match spec {
            ActFnSpec::Sigmoid { amp } => ActFn::sigmoid(amp),
            ActFnSpec::Tanh => ActFn::Tanh,
            ActFnSpec::Relu => ActFn::Relu,
            ActFnSpec::Identity => ActFn::Identity,
        }
    }

    fn resolve_init(
        &self,
        spec: Option<InitSpec>,
        builder: NetworkConfigBuilder,
    ) -> Result<NetworkConfigBuilder> {
        let Some(spec) = spec else {
            return Ok(builder);
        };

        let builder = match spec {
            InitSpec::Const { value } => builder.init_weights(ConstInit::new(value)),
            InitSpec::Normal { mean, std_dev } => {
                let normal = Normal::new(mean, std_dev)
                    .map_err(|e| PolicyErr::InvalidConfig(format!("normal initializer: {e}")))?;
                builder.init_weights(RandInit::new(normal))
            }
            InitSpec::Uniform { low, high } => {
                let uniform = Uniform::new(low, high)
                    .map_err(|e| PolicyErr::InvalidConfig(format!("uniform initializer: {e}")))?;
                builder.init_weights(RandInit::new(uniform))
            }
            InitSpec::Xavier => builder.init_weights(FanInit::Xavier),
            InitSpec::XavierUniform => builder.init_weights(FanInit::XavierUniform),
            InitSpec::Kaiming => builder.init_weights(FanInit::Kaiming),
            InitSpec::Lecun => builder.init_weights(FanInit::Lecun),
            InitSpec::LecunUniform => builder.init_weights(FanInit::LecunUniform),
        };

        Ok(builder)
    }

    fn generate_session(&self, seed: Option<u64>) -> Session {
        match seed {
            Some(seed) => Session::seeded(seed),
            None => Session::new(),
        }
    }
}
