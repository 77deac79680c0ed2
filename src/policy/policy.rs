use ndarray::{Array2, ArrayD, ArrayViewD};

use super::ParameterSpace;
use crate::{
    Result,
    engine::{Session, Update},
};

/// A decision rule mapping states to (possibly stochastic) actions.
///
/// Every method that touches parameter values receives the `Session` holding them.
pub trait Policy {
    /// Chooses an action for `state`.
    fn map(&self, session: &mut Session, state: ArrayViewD<f32>) -> Result<ArrayD<f32>>;

    /// Returns the current values of the policy's parameters.
    fn parameters(&self, session: &Session) -> Result<Vec<Array2<f32>>>;

    /// Runs externally built update operations over the policy's parameters.
    ///
    /// Parameters are session owned variables, so they are changed through `Update`s instead of
    /// being assigned directly.
    fn set_parameters(&self, session: &mut Session, updates: &[Update]) -> Result<()>;

    /// Describes the parameters of the policy.
    fn parameter_space(&self) -> ParameterSpace;
}
