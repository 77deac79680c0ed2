use ndarray::{ArrayD, ArrayViewD, IxDyn};
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use super::Space;

/// The unbounded real space of a given shape, any finite value is a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RdSpace {
    shape: Vec<usize>,
}

impl RdSpace {
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }
}

impl Space for RdSpace {
    fn contains(&self, x: ArrayViewD<f32>) -> bool {
        x.shape() == self.shape.as_slice() && x.iter().all(|x| x.is_finite())
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn sample(&self, rng: &mut StdRng) -> ArrayD<f32> {
        ArrayD::random_using(IxDyn(&self.shape), StandardNormal, rng)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn membership() {
        let space = RdSpace::new(&[1, 2]);

        assert!(space.contains(arr2(&[[1e6, -3.]]).into_dyn().view()));
        assert!(!space.contains(arr2(&[[f32::NAN, 0.]]).into_dyn().view()));
        assert!(!space.contains(arr2(&[[0.], [0.]]).into_dyn().view()));
    }

    #[test]
    fn samples_have_the_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let space = RdSpace::new(&[4]);

        assert_eq!(space.sample(&mut rng).shape(), &[4]);
        assert!(space.contains(space.sample(&mut rng).view()));
    }
}
