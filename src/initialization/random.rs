use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::{distr::uniform::Error as UniformError, rngs::StdRng};
use rand_distr::{Distribution, Normal, NormalError, Uniform};

use super::WeightInit;

/// The standard deviation of the default initializer.
pub const DEFAULT_STD_DEV: f32 = 0.1;

/// A weight initializer that follows a certain probabilistic distribution.
#[derive(Clone, Copy, Debug)]
pub struct RandInit<D: Distribution<f32>> {
    distribution: D,
}

impl<D: Distribution<f32>> RandInit<D> {
    /// Creates a new `RandInit` weight initializer.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the weights from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }
}

impl RandInit<Uniform<f32>> {
    /// Creates a new `RandInit` weight initializer with a uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(low: f32, high: f32) -> Result<Self, UniformError> {
        Ok(Self::new(Uniform::new(low, high)?))
    }
}

impl RandInit<Normal<f32>> {
    /// Creates a new `RandInit` weight initializer with a normal distribution.
    ///
    /// # Arguments
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(mean: f32, std_dev: f32) -> Result<Self, NormalError> {
        Ok(Self::new(Normal::new(mean, std_dev)?))
    }
}

impl Default for RandInit<Normal<f32>> {
    /// Zero mean normal weights with a standard deviation of `0.1`.
    fn default() -> Self {
        // SAFETY: The standard deviation is a finite constant.
        Self::normal(0., DEFAULT_STD_DEV).unwrap()
    }
}

impl<D: Distribution<f32> + Send + Sync> WeightInit for RandInit<D> {
    fn init(&self, rng: &mut StdRng, shape: (usize, usize)) -> Array2<f32> {
        Array2::random_using(shape, &self.distribution, rng)
    }
}
