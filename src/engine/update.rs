use ndarray::Array2;

use super::Variable;

/// An update operation over a variable, built outside a `Session` and run by `Session::apply`.
#[derive(Clone, Debug)]
pub enum Update {
    Assign { var: Variable, value: Array2<f32> },
    AssignAdd { var: Variable, delta: Array2<f32> },
    AssignSub { var: Variable, delta: Array2<f32> },
}

impl Update {
    /// Replaces the value of `var` by `value`.
    pub fn assign(var: &Variable, value: Array2<f32>) -> Self {
        Self::Assign {
            var: var.clone(),
            value,
        }
    }

    /// Adds `delta` to the value of `var`.
    pub fn assign_add(var: &Variable, delta: Array2<f32>) -> Self {
        Self::AssignAdd {
            var: var.clone(),
            delta,
        }
    }

    /// Subtracts `delta` from the value of `var`, the usual gradient step.
    pub fn assign_sub(var: &Variable, delta: Array2<f32>) -> Self {
        Self::AssignSub {
            var: var.clone(),
            delta,
        }
    }

    pub fn var(&self) -> &Variable {
        match self {
            Update::Assign { var, .. }
            | Update::AssignAdd { var, .. }
            | Update::AssignSub { var, .. } => var,
        }
    }

    pub(super) fn operand(&self) -> &Array2<f32> {
        match self {
            Update::Assign { value, .. } => value,
            Update::AssignAdd { delta, .. } | Update::AssignSub { delta, .. } => delta,
        }
    }

    pub(super) fn apply_to(&self, target: &mut Array2<f32>) {
        match self {
            Update::Assign { value, .. } => target.assign(value),
            Update::AssignAdd { delta, .. } => *target += delta,
            Update::AssignSub { delta, .. } => *target -= delta,
        }
    }
}
