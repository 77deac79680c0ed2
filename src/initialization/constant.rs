use ndarray::Array2;
use rand::rngs::StdRng;

use super::WeightInit;

/// A weight initializer that always generates the same value.
#[derive(Clone, Copy, Debug)]
pub struct ConstInit {
    value: f32,
}

impl ConstInit {
    /// Creates a new `ConstInit` weight initializer.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl WeightInit for ConstInit {
    fn init(&self, _rng: &mut StdRng, shape: (usize, usize)) -> Array2<f32> {
        Array2::from_elem(shape, self.value)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn fills_the_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = ConstInit::new(0.5).init(&mut rng, (3, 2));

        assert_eq!(w.dim(), (3, 2));
        assert!(w.iter().all(|&x| x == 0.5));
    }
}
