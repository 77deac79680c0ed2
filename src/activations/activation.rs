use super::ActFn;
use crate::{PolicyErr, Result};

/// How the activation functions of a network's hidden layers are given.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Activation {
    /// The logistic sigmoid on every hidden layer.
    #[default]
    Default,
    /// The same function broadcast to every hidden layer.
    Single(ActFn),
    /// One function per hidden layer.
    PerLayer(Vec<ActFn>),
}

impl From<ActFn> for Activation {
    fn from(value: ActFn) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<ActFn>> for Activation {
    fn from(value: Vec<ActFn>) -> Self {
        Self::PerLayer(value)
    }
}

impl Activation {
    /// Expands this activation into one function per hidden layer.
    ///
    /// # Arguments
    /// * `hidden` - The amount of hidden layers, that is, `layers.len() - 2`.
    ///
    /// # Returns
    /// The list of activation functions or an error if an explicit list has the wrong size.
    pub fn resolve(&self, hidden: usize) -> Result<Vec<ActFn>> {
        match self {
            Activation::Default => Ok(vec![ActFn::default(); hidden]),
            Activation::Single(act_fn) => Ok(vec![*act_fn; hidden]),
            Activation::PerLayer(act_fns) if act_fns.len() != hidden => {
                Err(PolicyErr::InvalidConfig(format!(
                    "activation list has wrong size, got {} and expected {hidden}",
                    act_fns.len()
                )))
            }
            Activation::PerLayer(act_fns) => Ok(act_fns.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast() {
        assert_eq!(Activation::Default.resolve(2).unwrap(), [ActFn::default(); 2]);
        assert_eq!(
            Activation::Single(ActFn::Tanh).resolve(3).unwrap(),
            [ActFn::Tanh; 3]
        );
        assert!(Activation::Default.resolve(0).unwrap().is_empty());
    }

    #[test]
    fn per_layer_size_is_checked() {
        let act = Activation::PerLayer(vec![ActFn::Relu, ActFn::Tanh]);

        assert_eq!(act.resolve(2).unwrap(), [ActFn::Relu, ActFn::Tanh]);
        assert!(matches!(act.resolve(1), Err(PolicyErr::InvalidConfig(_))));
        assert!(matches!(act.resolve(3), Err(PolicyErr::InvalidConfig(_))));
    }
}
