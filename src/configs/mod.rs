mod builder;
mod spec;

pub use builder::PolicyBuilder;
pub use spec::{ActFnSpec, ActivationSpec, InitSpec, PolicySpec, SpaceSpec};
