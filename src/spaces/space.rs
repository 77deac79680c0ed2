use std::fmt::Debug;

use ndarray::{ArrayD, ArrayViewD};
use rand::rngs::StdRng;

/// A set of states or actions.
pub trait Space: Debug + Send + Sync {
    /// Whether `x` is an element of this space.
    fn contains(&self, x: ArrayViewD<f32>) -> bool;

    /// The shape of every element of this space.
    fn shape(&self) -> &[usize];

    /// Draws an element of this space.
    fn sample(&self, rng: &mut StdRng) -> ArrayD<f32>;

    /// The amount of scalars in an element once flattened.
    fn dimension(&self) -> usize {
        self.shape().iter().product()
    }
}
