use log::{debug, info};
use ndarray::{Array1, Array2, ArrayD, ArrayView2, ArrayViewD, Axis, IxDyn};
use rand_distr::{Distribution, Normal};

use super::{NetworkConfig, NetworkConfigBuilder, ParameterSpace, Policy};
use crate::{
    PolicyErr, Result,
    activations::ActFn,
    engine::{self, DType, Feed, Placeholder, Scope, Session, Tensor, Update, Variable},
    error::NO_ENGINE_SUPPORT,
    spaces::Space,
};

/// The tensors built by `NeuralNetwork::setup`.
#[derive(Debug)]
struct Graph {
    w_action: Vec<Variable>,
    w_var: Vec<Variable>,
    h: Vec<Tensor>,
    a_pred: Tensor,
    var: Tensor,
}

/// A fully connected neural network policy.
///
/// The action is sampled from a gaussian whose mean is the output of the network and whose
/// standard deviation is a weighted sum of every hidden unit, taken in absolute value.
///
/// Building the network is a two step process: `new` validates the config and declares the
/// inputs, `setup` creates the weights and the graphs. `setup` runs right away if the config asks
/// for it and can't run twice.
#[derive(Debug)]
pub struct NeuralNetwork {
    config: NetworkConfig,
    activation: Vec<ActFn>,
    x: Placeholder,
    a: Placeholder,
    graph: Option<Graph>,
}

impl NeuralNetwork {
    /// Starts building a `NeuralNetwork`, see `NetworkConfig::builder`.
    pub fn builder<S, A>(
        layers: impl Into<Vec<usize>>,
        state_space: S,
        action_space: A,
    ) -> NetworkConfigBuilder
    where
        S: Space + 'static,
        A: Space + 'static,
    {
        NetworkConfig::builder(layers, state_space, action_space)
    }

    /// Creates a new `NeuralNetwork`.
    ///
    /// # Arguments
    /// * `config` - The description of the network.
    /// * `session` - Where the weights are allocated if the config asks for an immediate setup.
    ///
    /// # Returns
    /// A `NotSupported` error if the tensor engine is missing from this build, an `InvalidConfig`
    /// error if the config is malformed.
    pub fn new(config: NetworkConfig, session: &mut Session) -> Result<Self> {
        if !engine::AVAILABLE {
            return Err(PolicyErr::NotSupported(NO_ENGINE_SUPPORT));
        }

        let activation = config.validate()?;
        let layers = config.layers();

        let x = Placeholder::new("X", config.dtype(), layers[0]);
        let a = Placeholder::new("a", config.dtype(), layers[layers.len() - 1]);

        let mut network = Self {
            config,
            activation,
            x,
            a,
            graph: None,
        };

        if network.config.do_setup() {
            network.setup(session)?;
        }

        Ok(network)
    }

    /// Creates the weights and builds the action and variance graphs.
    ///
    /// # Arguments
    /// * `session` - Where the weights are allocated.
    ///
    /// # Returns
    /// A `MultipleCalls` error if the network is already set up.
    pub fn setup(&mut self, session: &mut Session) -> Result<()> {
        if self.graph.is_some() {
            return Err(PolicyErr::MultipleCalls("network is already set up"));
        }

        let scope = self.config.scope();
        let layers = self.config.layers();

        let action_scope = scope.child("action_estimator");
        let w_action: Vec<Variable> = match self.config.weights() {
            Some(weights) => weights
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let name = action_scope.qualify(&format!("weights_{i}"));
                    session.create_variable(&name, w.clone())
                })
                .collect(),
            None => layers
                .windows(2)
                .enumerate()
                .map(|(i, dim)| self.init_variable(session, &action_scope, i, (dim[0], dim[1])))
                .collect::<Result<Vec<_>>>()?,
        };

        let (h, a_pred) = self.generate_network(&w_action);

        let variance_scope = scope.child("variance_estimator");
        let w_var = layers[1..layers.len() - 1]
            .iter()
            .enumerate()
            .map(|(i, &size)| self.init_variable(session, &variance_scope, i, (size, 1)))
            .collect::<Result<Vec<_>>>()?;

        let var = Self::generate_variance(&h, &w_var);

        info!(
            scope = scope.as_str(),
            transitions = w_action.len(),
            hidden = w_var.len();
            "network set up"
        );

        self.graph = Some(Graph {
            w_action,
            w_var,
            h,
            a_pred,
            var,
        });

        Ok(())
    }

    fn init_variable(
        &self,
        session: &mut Session,
        scope: &Scope,
        i: usize,
        shape: (usize, usize),
    ) -> Result<Variable> {
        let initial = self.config.init_weights().init(session.rng(), shape);

        if initial.dim() != shape {
            return Err(PolicyErr::InvalidConfig(format!(
                "the weight initializer returned shape {:?}, expected {shape:?}",
                initial.dim()
            )));
        }

        Ok(session.create_variable(&scope.qualify(&format!("weights_{i}")), initial))
    }

    /// Chains the hidden layers, the last transition is linear.
    fn generate_network(&self, w_action: &[Variable]) -> (Vec<Tensor>, Tensor) {
        let mut h = vec![Tensor::placeholder(&self.x)];

        for (i, act_fn) in self.activation.iter().enumerate() {
            let w_i = Tensor::variable(&w_action[i]);
            let h_i = h[i].matmul(&w_i).activation(*act_fn);
            h.push(h_i);
        }

        let w_out = Tensor::variable(&w_action[w_action.len() - 1]);
        let a_pred = h[h.len() - 1].matmul(&w_out);

        (h, a_pred)
    }

    /// The absolute value of the weighted sum of every hidden unit.
    fn generate_variance(h: &[Tensor], w_var: &[Variable]) -> Tensor {
        let terms: Vec<_> = h[1..]
            .iter()
            .zip(w_var)
            .map(|(h_i, w_i)| h_i.matmul(&Tensor::variable(w_i)).reduce_sum())
            .collect();

        Tensor::add_n(&terms).abs()
    }

    /// Builds a network with the same structure under another scope.
    ///
    /// The copy gets its own weights, updating one network never changes the other.
    ///
    /// # Arguments
    /// * `session` - Where the copy's weights are allocated.
    /// * `scope` - The scope of the copy.
    /// * `do_setup` - Whether the copy is set up right away.
    pub fn copy(
        &self,
        session: &mut Session,
        scope: impl Into<Scope>,
        do_setup: bool,
    ) -> Result<Self> {
        let config = self.config.with_scope(scope).with_setup(do_setup);
        let copy = Self::new(config, session)?;

        info!(
            from = self.config.scope().as_str(),
            into = copy.scope().as_str(),
            set_up = copy.is_set_up();
            "network copied"
        );

        Ok(copy)
    }

    /// Evaluates the mean action and the variance estimate for a batch of flattened states.
    ///
    /// # Arguments
    /// * `session` - The session holding the weights.
    /// * `states` - One flattened state per row.
    ///
    /// # Returns
    /// The mean actions, one per row, and the variance estimate of the whole batch.
    pub fn mean_and_variance(
        &self,
        session: &Session,
        states: ArrayView2<f32>,
    ) -> Result<(Array2<f32>, f32)> {
        let graph = self.graph()?;
        let feed = Feed::new().with(&self.x, states)?;

        let out = session.run(&[&graph.a_pred, &graph.var], &feed)?;
        let [mean, var] =
            <[Array2<f32>; 2]>::try_from(out).map_err(|out| PolicyErr::ShapeMismatch {
                what: "session fetches".to_string(),
                got: vec![out.len()],
                expected: vec![2],
            })?;

        Ok((mean, var[[0, 0]]))
    }

    fn graph(&self) -> Result<&Graph> {
        self.graph.as_ref().ok_or(PolicyErr::NotSetUp)
    }

    pub fn is_set_up(&self) -> bool {
        self.graph.is_some()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn layers(&self) -> &[usize] {
        self.config.layers()
    }

    /// The activation function of every hidden layer.
    pub fn activation(&self) -> &[ActFn] {
        &self.activation
    }

    pub fn scope(&self) -> &Scope {
        self.config.scope()
    }

    pub fn dtype(&self) -> DType {
        self.config.dtype()
    }

    /// The state input, of shape `(batch, layers[0])`.
    pub fn x(&self) -> &Placeholder {
        &self.x
    }

    /// The action input, of shape `(batch, layers[-1])`, for building losses over the policy.
    pub fn a(&self) -> &Placeholder {
        &self.a
    }

    /// The weights of every layer transition, `None` until set up.
    pub fn w_action(&self) -> Option<&[Variable]> {
        self.graph.as_ref().map(|graph| graph.w_action.as_slice())
    }

    /// The variance weights of every hidden layer, `None` until set up.
    pub fn w_var(&self) -> Option<&[Variable]> {
        self.graph.as_ref().map(|graph| graph.w_var.as_slice())
    }

    /// The input followed by every hidden layer, `None` until set up.
    pub fn h(&self) -> Option<&[Tensor]> {
        self.graph.as_ref().map(|graph| graph.h.as_slice())
    }

    /// The mean action, `None` until set up.
    pub fn a_pred(&self) -> Option<&Tensor> {
        self.graph.as_ref().map(|graph| &graph.a_pred)
    }

    /// The variance estimate, `None` until set up.
    pub fn var(&self) -> Option<&Tensor> {
        self.graph.as_ref().map(|graph| &graph.var)
    }
}

impl Policy for NeuralNetwork {
    fn map(&self, session: &mut Session, state: ArrayViewD<f32>) -> Result<ArrayD<f32>> {
        let state_space = self.config.state_space();

        if !state_space.contains(state.view()) {
            return Err(PolicyErr::StateOutOfSpace {
                got: state.shape().to_vec(),
                expected: state_space.shape().to_vec(),
            });
        }

        let x = state
            .iter()
            .copied()
            .collect::<Array1<f32>>()
            .insert_axis(Axis(0));

        let (mean, var) = self.mean_and_variance(session, x.view())?;

        let action = mean
            .iter()
            .map(|&mean| Normal::new(mean, var).map(|normal| normal.sample(session.rng())))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PolicyErr::InvalidVariance(format!("{var}: {e}")))?;

        debug!(var = var; "sampled action");

        let shape = self.config.action_space().shape();
        ArrayD::from_shape_vec(IxDyn(shape), action).map_err(|_| PolicyErr::ShapeMismatch {
            what: "action".to_string(),
            got: mean.shape().to_vec(),
            expected: shape.to_vec(),
        })
    }

    fn parameters(&self, session: &Session) -> Result<Vec<Array2<f32>>> {
        self.graph()?
            .w_action
            .iter()
            .map(|w| session.value(w).map(|value| value.to_owned()))
            .collect()
    }

    fn set_parameters(&self, session: &mut Session, updates: &[Update]) -> Result<()> {
        self.graph()?;
        session.apply(updates)
    }

    fn parameter_space(&self) -> ParameterSpace {
        let shapes = self
            .config
            .layers()
            .windows(2)
            .map(|dim| (dim[0], dim[1]))
            .collect();

        ParameterSpace::new(shapes)
    }
}
