use std::collections::HashMap;

use log::debug;
use ndarray::{Array2, ArrayView2};
use rand::{SeedableRng, rngs::StdRng};

use super::{Feed, Tensor, Update, Variable, tensor::Op};
use crate::{PolicyErr, Result};

/// The execution context: owns the storage of every variable and evaluates tensors.
///
/// Nothing here is global, whoever needs to read or write parameters gets the session passed in.
#[derive(Debug)]
pub struct Session {
    variables: HashMap<String, Array2<f32>>,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a new `Session` seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a new `Session` with a deterministic random number generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            variables: HashMap::new(),
            rng,
        }
    }

    /// The random number generator used for initialization and sampling.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Returns the amount of variables in the session.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Allocates a new variable.
    ///
    /// If `name` is already taken the first free `name_<n>` is used instead, so a variable never
    /// aliases the storage of another.
    ///
    /// # Arguments
    /// * `name` - The fully qualified name of the variable.
    /// * `initial` - The initial value, which also fixes the variable's shape.
    ///
    /// # Returns
    /// The handle to the new variable.
    pub fn create_variable(&mut self, name: &str, initial: Array2<f32>) -> Variable {
        let mut unique = name.to_string();
        let mut n = 0;

        while self.variables.contains_key(&unique) {
            n += 1;
            unique = format!("{name}_{n}");
        }

        debug!(
            name = unique.as_str(),
            rows = initial.nrows(),
            cols = initial.ncols();
            "creating variable"
        );

        let var = Variable::new(unique.clone(), initial.dim());
        self.variables.insert(unique, initial);
        var
    }

    /// Returns the current value of `var`.
    pub fn value(&self, var: &Variable) -> Result<ArrayView2<'_, f32>> {
        self.variables
            .get(var.name())
            .map(|value| value.view())
            .ok_or_else(|| PolicyErr::UnknownVariable(var.name().to_string()))
    }

    /// Evaluates `fetches` against `feed`.
    ///
    /// # Returns
    /// The values of the fetched tensors, in the same order.
    pub fn run(&self, fetches: &[&Tensor], feed: &Feed) -> Result<Vec<Array2<f32>>> {
        let mut cache = HashMap::new();

        fetches
            .iter()
            .map(|tensor| self.eval(tensor, feed, &mut cache))
            .collect()
    }

    /// Runs every update, either all of them are applied or none is.
    ///
    /// # Returns
    /// An error if an update targets an unknown variable or has the wrong shape.
    pub fn apply(&mut self, updates: &[Update]) -> Result<()> {
        for update in updates {
            let value = self.value(update.var())?;
            let operand = update.operand();

            if value.dim() != operand.dim() {
                return Err(PolicyErr::ShapeMismatch {
                    what: format!("update of '{}'", update.var().name()),
                    got: operand.shape().to_vec(),
                    expected: value.shape().to_vec(),
                });
            }
        }

        for update in updates {
            if let Some(target) = self.variables.get_mut(update.var().name()) {
                update.apply_to(target);
            }
        }

        debug!("applied {} updates", updates.len());
        Ok(())
    }

    fn eval(
        &self,
        tensor: &Tensor,
        feed: &Feed,
        cache: &mut HashMap<usize, Array2<f32>>,
    ) -> Result<Array2<f32>> {
        if let Some(value) = cache.get(&tensor.id()) {
            return Ok(value.clone());
        }

        let value = match tensor.op() {
            Op::Placeholder(placeholder) => feed.get(placeholder)?.to_owned(),
            Op::Variable(var) => self.value(var)?.to_owned(),
            Op::MatMul(lhs, rhs) => {
                let lhs = self.eval(lhs, feed, cache)?;
                let rhs = self.eval(rhs, feed, cache)?;

                if lhs.ncols() != rhs.nrows() {
                    return Err(PolicyErr::ShapeMismatch {
                        what: "matmul".to_string(),
                        got: rhs.shape().to_vec(),
                        expected: vec![lhs.ncols(), rhs.ncols()],
                    });
                }

                lhs.dot(&rhs)
            }
            Op::Activation(act_fn, x) => self.eval(x, feed, cache)?.mapv_into(|x| act_fn.f(x)),
            Op::ReduceSum(x) => Array2::from_elem((1, 1), self.eval(x, feed, cache)?.sum()),
            Op::AddN(xs) => {
                let mut acc: Option<Array2<f32>> = None;

                for x in xs {
                    let x = self.eval(x, feed, cache)?;

                    acc = match acc {
                        None => Some(x),
                        Some(acc) if acc.dim() != x.dim() => {
                            return Err(PolicyErr::ShapeMismatch {
                                what: "add_n".to_string(),
                                got: x.shape().to_vec(),
                                expected: acc.shape().to_vec(),
                            });
                        }
                        Some(acc) => Some(acc + x),
                    };
                }

                acc.unwrap_or_else(|| Array2::zeros((1, 1)))
            }
            Op::Abs(x) => self.eval(x, feed, cache)?.mapv_into(f32::abs),
        };

        cache.insert(tensor.id(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{
        activations::ActFn,
        engine::{DType, Placeholder},
    };

    #[test]
    fn variable_names_are_made_unique() {
        let mut session = Session::seeded(0);

        let a = session.create_variable("global/w", Array2::zeros((1, 1)));
        let b = session.create_variable("global/w", Array2::ones((1, 1)));
        let c = session.create_variable("global/w", Array2::ones((1, 1)));

        assert_eq!(a.name(), "global/w");
        assert_eq!(b.name(), "global/w_1");
        assert_eq!(c.name(), "global/w_2");
        assert_eq!(session.len(), 3);
        assert_eq!(session.value(&a).unwrap()[[0, 0]], 0.);
        assert_eq!(session.value(&b).unwrap()[[0, 0]], 1.);
    }

    #[test]
    fn evaluates_a_small_graph() {
        let mut session = Session::seeded(0);
        let x = Placeholder::new("X", DType::Float32, 2);
        let w = session.create_variable("w", array![[1., 2.], [3., 4.]]);

        let h = Tensor::placeholder(&x).matmul(&Tensor::variable(&w));
        let relu = h.activation(ActFn::Relu);
        let total = Tensor::add_n(&[h.reduce_sum(), relu.reduce_sum()]).abs();

        let input = array![[1., -1.]];
        let feed = Feed::new().with(&x, input.view()).unwrap();
        let out = session.run(&[&h, &relu, &total], &feed).unwrap();

        assert_eq!(out[0], array![[-2f32, -2.]]);
        assert_eq!(out[1], array![[0f32, 0.]]);
        assert_eq!(out[2], array![[4f32]]);
    }

    #[test]
    fn empty_add_n_is_zero() {
        let session = Session::seeded(0);
        let out = session.run(&[&Tensor::add_n(&[])], &Feed::new()).unwrap();

        assert_eq!(out[0], array![[0f32]]);
    }

    #[test]
    fn missing_feed() {
        let session = Session::seeded(0);
        let x = Placeholder::new("X", DType::Float32, 2);

        let err = session
            .run(&[&Tensor::placeholder(&x)], &Feed::new())
            .unwrap_err();
        assert!(matches!(err, PolicyErr::MissingFeed(name) if name == "X"));
    }

    #[test]
    fn feed_columns_are_checked() {
        let x = Placeholder::new("X", DType::Float32, 2);
        let input = array![[1., 2., 3.]];

        assert!(matches!(
            Feed::new().with(&x, input.view()),
            Err(PolicyErr::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn updates_are_all_or_nothing() {
        let mut session = Session::seeded(0);
        let a = session.create_variable("a", Array2::zeros((2, 1)));
        let b = session.create_variable("b", Array2::zeros((1, 1)));

        let updates = [
            Update::assign(&a, Array2::ones((2, 1))),
            Update::assign(&b, Array2::ones((2, 2))),
        ];
        assert!(session.apply(&updates).is_err());
        assert_eq!(session.value(&a).unwrap(), Array2::<f32>::zeros((2, 1)));

        session
            .apply(&[
                Update::assign_add(&a, Array2::ones((2, 1))),
                Update::assign_sub(&b, Array2::from_elem((1, 1), 0.5)),
            ])
            .unwrap();
        assert_eq!(session.value(&a).unwrap(), Array2::<f32>::ones((2, 1)));
        assert_eq!(session.value(&b).unwrap()[[0, 0]], -0.5);
    }

    #[test]
    fn unknown_variable() {
        let mut other = Session::seeded(0);
        let var = other.create_variable("w", Array2::zeros((1, 1)));

        let session = Session::seeded(0);
        assert!(matches!(
            session.value(&var),
            Err(PolicyErr::UnknownVariable(_))
        ));
    }
}
