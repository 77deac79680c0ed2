use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};
use rand::{Rng, rngs::StdRng};

use super::Space;
use crate::{PolicyErr, Result};

/// A box in `R^n`: every element must lie between the inclusive lower and upper bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedSpace {
    lower: ArrayD<f32>,
    upper: ArrayD<f32>,
}

impl BoundedSpace {
    /// Creates a new `BoundedSpace`.
    ///
    /// # Arguments
    /// * `lower` - The elementwise lower bound.
    /// * `upper` - The elementwise upper bound.
    ///
    /// # Returns
    /// An error if the bounds have different shapes, or if anywhere `lower > upper` or
    /// `upper - lower` is not finite.
    pub fn new(lower: ArrayD<f32>, upper: ArrayD<f32>) -> Result<Self> {
        if lower.shape() != upper.shape() {
            return Err(PolicyErr::ShapeMismatch {
                what: "bounds of a bounded space".to_string(),
                got: upper.shape().to_vec(),
                expected: lower.shape().to_vec(),
            });
        }

        let valid = Zip::from(&lower)
            .and(&upper)
            .all(|&l, &u| l <= u && (u - l).is_finite());

        if !valid {
            return Err(PolicyErr::InvalidConfig(
                "bounded space needs lower <= upper and a finite width between them".into(),
            ));
        }

        Ok(Self { lower, upper })
    }

    /// Creates a new `BoundedSpace` with the same scalar bounds on every element.
    pub fn uniform(low: f32, high: f32, shape: &[usize]) -> Result<Self> {
        let lower = ArrayD::from_elem(IxDyn(shape), low);
        let upper = ArrayD::from_elem(IxDyn(shape), high);
        Self::new(lower, upper)
    }

    pub fn lower(&self) -> ArrayViewD<'_, f32> {
        self.lower.view()
    }

    pub fn upper(&self) -> ArrayViewD<'_, f32> {
        self.upper.view()
    }
}

impl Space for BoundedSpace {
    fn contains(&self, x: ArrayViewD<f32>) -> bool {
        x.shape() == self.lower.shape()
            && Zip::from(&x)
                .and(&self.lower)
                .and(&self.upper)
                .all(|&x, &l, &u| l <= x && x <= u)
    }

    fn shape(&self) -> &[usize] {
        self.lower.shape()
    }

    fn sample(&self, rng: &mut StdRng) -> ArrayD<f32> {
        Zip::from(&self.lower)
            .and(&self.upper)
            .map_collect(|&l, &u| rng.random_range(l..=u))
    }
}
