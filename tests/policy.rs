use ndarray::{Array2, ArrayD, IxDyn, array};
use rand::rngs::StdRng;

use nn_policy::{
    NeuralNetwork, Policy, PolicyErr, Result,
    activations::ActFn,
    configs::{PolicyBuilder, PolicySpec},
    engine::{Session, Update},
    initialization::FanInit,
    spaces::{BoundedSpace, RdSpace, Space},
};

const SPEC: &str = r#"{
    "layers": [3, 5, 4, 2],
    "state_space": { "bounded": { "low": -1.0, "high": 1.0, "shape": [3] } },
    "action_space": { "rd": { "shape": [2] } },
    "activation": [{ "sigmoid": { "amp": 1.0 } }, "tanh"],
    "init": "xavier",
    "do_setup": true,
    "seed": 42
}"#;

fn network(session: &mut Session, do_setup: bool) -> Result<NeuralNetwork> {
    let state_space = BoundedSpace::uniform(-1., 1., &[3])?;
    let action_space = RdSpace::new(&[2]);

    NeuralNetwork::builder([3, 5, 2], state_space, action_space)
        .init_weights(FanInit::Kaiming)
        .activation(ActFn::Relu)
        .do_setup(do_setup)
        .create(session)
}

#[test]
fn malformed_layers_are_rejected() {
    let mut session = Session::seeded(0);

    let single_layer = NeuralNetwork::builder([3], RdSpace::new(&[3]), RdSpace::new(&[3]))
        .create(&mut session);
    assert!(matches!(single_layer, Err(PolicyErr::InvalidConfig(_))));

    let short_activation =
        NeuralNetwork::builder([3, 4, 4, 2], RdSpace::new(&[3]), RdSpace::new(&[2]))
            .activation(vec![ActFn::Relu])
            .create(&mut session);
    assert!(matches!(short_activation, Err(PolicyErr::InvalidConfig(_))));

    assert!(session.is_empty());
}

#[cfg(not(feature = "engine"))]
#[test]
fn requires_the_engine() {
    let mut session = Session::seeded(0);
    let created = NeuralNetwork::builder([3, 2], RdSpace::new(&[3]), RdSpace::new(&[2]))
        .create(&mut session);

    assert!(matches!(created, Err(PolicyErr::NotSupported(_))));
}

#[test]
fn deferred_setup() -> Result<()> {
    let mut session = Session::seeded(1);
    let mut policy = network(&mut session, false)?;
    let state = ArrayD::zeros(IxDyn(&[3]));

    assert!(session.is_empty());
    assert!(matches!(
        policy.map(&mut session, state.view()),
        Err(PolicyErr::NotSetUp)
    ));

    policy.setup(&mut session)?;
    assert_eq!(session.len(), 3);
    assert_eq!(policy.map(&mut session, state.view())?.shape(), [2]);

    assert!(matches!(
        policy.setup(&mut session),
        Err(PolicyErr::MultipleCalls(_))
    ));
    assert_eq!(session.len(), 3);

    Ok(())
}

#[test]
fn sampled_states_map_to_finite_actions() -> Result<()> {
    let mut session = Session::seeded(2);
    let policy = network(&mut session, true)?;
    let state_space = policy.config().state_space();

    for _ in 0..50 {
        let state = state_space.sample(session.rng());
        let action = policy.map(&mut session, state.view())?;

        assert_eq!(action.shape(), [2]);
        assert!(action.iter().all(|a| a.is_finite()));
    }

    Ok(())
}

#[test]
fn states_outside_the_space_are_rejected() -> Result<()> {
    let mut session = Session::seeded(3);
    let policy = network(&mut session, true)?;

    let too_far = ArrayD::from_elem(IxDyn(&[3]), 2.);
    let wrong_shape = ArrayD::zeros(IxDyn(&[4]));

    for state in [too_far, wrong_shape] {
        assert!(matches!(
            policy.map(&mut session, state.view()),
            Err(PolicyErr::StateOutOfSpace { .. })
        ));
    }

    Ok(())
}

#[test]
fn networks_in_one_scope_do_not_share_weights() -> Result<()> {
    let mut session = Session::seeded(4);
    let first = network(&mut session, true)?;
    let second = network(&mut session, true)?;

    assert_eq!(session.len(), 6);

    let first_names: Vec<_> = first.w_action().unwrap().iter().map(|w| w.name()).collect();
    let second_names: Vec<_> = second.w_action().unwrap().iter().map(|w| w.name()).collect();
    assert!(first_names.iter().all(|name| !second_names.contains(name)));

    Ok(())
}

#[test]
fn target_copy_is_independent() -> Result<()> {
    let mut session = Session::seeded(5);
    let behavior = network(&mut session, true)?;
    let target = behavior.copy(&mut session, "target", true)?;

    assert_eq!(target.layers(), behavior.layers());
    assert_eq!(target.scope().as_str(), "target");
    assert!(
        target
            .w_action()
            .unwrap()
            .iter()
            .all(|w| w.name().starts_with("target/action_estimator/"))
    );

    let before = target.parameters(&session)?;

    let updates: Vec<_> = behavior
        .w_action()
        .unwrap()
        .iter()
        .map(|w| {
            let (rows, cols) = w.shape();
            Update::assign(w, Array2::from_elem((rows, cols), 7.))
        })
        .collect();
    behavior.set_parameters(&mut session, &updates)?;

    assert!(
        behavior
            .parameters(&session)?
            .iter()
            .all(|w| w.iter().all(|&x| x == 7.))
    );
    assert_eq!(target.parameters(&session)?, before);

    Ok(())
}

#[test]
fn parameter_updates_through_the_trait_object() -> Result<()> {
    let mut session = Session::seeded(6);
    let network = network(&mut session, true)?;
    let policy: &dyn Policy = &network;

    let space = policy.parameter_space();
    assert_eq!(space.shapes(), [(3, 5), (5, 2)]);
    assert_eq!(space.size(), 25);

    let before = policy.parameters(&session)?;
    let updates: Vec<_> = network
        .w_action()
        .unwrap()
        .iter()
        .zip(&before)
        .map(|(w, value)| Update::assign_add(w, Array2::ones(value.dim())))
        .collect();
    policy.set_parameters(&mut session, &updates)?;

    for (after, before) in policy.parameters(&session)?.iter().zip(&before) {
        assert_eq!(after, &(before + 1f32));
    }

    Ok(())
}

#[test]
fn closures_initialize_weights() -> Result<()> {
    let mut session = Session::seeded(7);
    let state_space = RdSpace::new(&[2]);
    let action_space = RdSpace::new(&[1]);

    let network = NeuralNetwork::builder([2, 2, 1], state_space, action_space)
        .init_weights(|_: &mut StdRng, shape: (usize, usize)| Array2::from_elem(shape, 0.1f32))
        .activation(ActFn::Identity)
        .do_setup(true)
        .create(&mut session)?;

    let (mean, var) = network.mean_and_variance(&session, array![[1., 1.]].view())?;

    // hidden = [0.2, 0.2], mean = 0.04, var = |0.02 + 0.02|
    assert!((mean[[0, 0]] - 0.04).abs() < 1e-6);
    assert!((var - 0.04).abs() < 1e-6);

    Ok(())
}

#[test]
fn spec_builds_are_reproducible() -> Result<()> {
    let spec = PolicySpec::from_json(SPEC)?;
    let builder = PolicyBuilder::new();

    let (first, mut first_session) = builder.build(&spec)?;
    let (second, mut second_session) = builder.build(&spec)?;

    assert_eq!(first.activation(), [ActFn::sigmoid(1.), ActFn::Tanh]);
    assert_eq!(first.parameters(&first_session)?, second.parameters(&second_session)?);

    let state = ArrayD::from_elem(IxDyn(&[3]), 0.5);
    let first_action = first.map(&mut first_session, state.view())?;
    let second_action = second.map(&mut second_session, state.view())?;
    assert_eq!(first_action, second_action);

    Ok(())
}

#[test]
fn spaces_sample_their_own_members() {
    let mut rng = <StdRng as rand::SeedableRng>::seed_from_u64(8);
    let bounded = BoundedSpace::uniform(-2., 3., &[2, 2]).unwrap();
    let rd = RdSpace::new(&[5]);

    for _ in 0..20 {
        assert!(bounded.contains(bounded.sample(&mut rng).view()));
        assert!(rd.contains(rd.sample(&mut rng).view()));
    }
}
