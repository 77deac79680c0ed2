use std::env;

use log::info;
use ndarray::Axis;
use nn_policy::{
    Policy,
    configs::{PolicyBuilder, PolicySpec},
};

const DEFAULT_STEPS: usize = 5;

const DEFAULT_SPEC: &str = r#"{
    "layers": [4, 8, 8, 2],
    "state_space": { "bounded": { "low": -1.0, "high": 1.0, "shape": [4] } },
    "action_space": { "rd": { "shape": [2] } },
    "activation": "tanh",
    "init": "xavier",
    "scope": "behavior",
    "do_setup": true
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let spec = match args.next() {
        Some(path) => {
            info!("loading policy spec from {path}");
            PolicySpec::load(&path)?
        }
        None => PolicySpec::from_json(DEFAULT_SPEC)?,
    };

    let steps = match args.next() {
        Some(steps) => steps.parse::<usize>()?,
        None => DEFAULT_STEPS,
    };

    let (mut behavior, mut session) = PolicyBuilder::new().build(&spec)?;
    if !behavior.is_set_up() {
        behavior.setup(&mut session)?;
    }

    let target = behavior.copy(&mut session, "target", true)?;
    info!(variables = session.len(); "session ready");

    let state_space = behavior.config().state_space();

    for step in 0..steps {
        let state = state_space.sample(session.rng());
        let action = behavior.map(&mut session, state.view())?;
        let target_action = target.map(&mut session, state.view())?;

        let flat = state.view().into_shape_with_order((1, state.len()))?;
        let (mean, var) = behavior.mean_and_variance(&session, flat)?;

        info!(
            step = step,
            var = var;
            "state {state} mean {} action {action} target {target_action}",
            mean.index_axis(Axis(0), 0)
        );
    }

    for policy in [&behavior, &target] {
        let space = policy.parameter_space();
        println!(
            "{}: {} parameters in {:?}",
            policy.scope(),
            space.size(),
            space.shapes()
        );
    }

    Ok(())
}
