use ndarray::Array2;
use rand::rngs::StdRng;

/// Produces the initial value of a weight matrix.
pub trait WeightInit: Send + Sync {
    /// Should generate a matrix of exactly `shape`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `shape` - The `(rows, cols)` of the weight matrix.
    ///
    /// # Returns
    /// The initial weights.
    fn init(&self, rng: &mut StdRng, shape: (usize, usize)) -> Array2<f32>;
}

impl<F> WeightInit for F
where
    F: Fn(&mut StdRng, (usize, usize)) -> Array2<f32> + Send + Sync,
{
    fn init(&self, rng: &mut StdRng, shape: (usize, usize)) -> Array2<f32> {
        self(rng, shape)
    }
}
