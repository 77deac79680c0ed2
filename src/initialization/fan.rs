use ndarray::Array2;
use rand::rngs::StdRng;
use rand_distr::Uniform;

use super::{RandInit, WeightInit};

/// Weight initializers scaled by the fan in (rows) and fan out (columns) of the weight matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FanInit {
    /// Normal with a standard deviation of `sqrt(2 / (fan_in + fan_out))`.
    Xavier,
    /// Uniform in `±sqrt(6 / (fan_in + fan_out))`.
    XavierUniform,
    /// Normal with a standard deviation of `sqrt(2 / fan_in)`.
    Kaiming,
    /// Normal with a standard deviation of `sqrt(1 / fan_in)`.
    Lecun,
    /// Uniform in `±sqrt(3 / fan_in)`.
    LecunUniform,
}

impl WeightInit for FanInit {
    fn init(&self, rng: &mut StdRng, shape: (usize, usize)) -> Array2<f32> {
        let (fan_in, fan_out) = (shape.0.max(1) as f32, shape.1.max(1) as f32);

        match self {
            FanInit::Xavier => normal(rng, shape, (2. / (fan_in + fan_out)).sqrt()),
            FanInit::XavierUniform => uniform(rng, shape, (6. / (fan_in + fan_out)).sqrt()),
            FanInit::Kaiming => normal(rng, shape, (2. / fan_in).sqrt()),
            FanInit::Lecun => normal(rng, shape, (1. / fan_in).sqrt()),
            FanInit::LecunUniform => uniform(rng, shape, (3. / fan_in).sqrt()),
        }
    }
}

fn normal(rng: &mut StdRng, shape: (usize, usize), std_dev: f32) -> Array2<f32> {
    // SAFETY: Both fans are at least 1, so the standard deviation is finite and positive.
    RandInit::normal(0., std_dev).unwrap().init(rng, shape)
}

fn uniform(rng: &mut StdRng, shape: (usize, usize), range: f32) -> Array2<f32> {
    // SAFETY: Both fans are at least 1, so the range is finite and positive.
    RandInit::new(Uniform::new_inclusive(-range, range).unwrap()).init(rng, shape)
}
