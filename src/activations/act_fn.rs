use std::ptr;

use super::Sigmoid;

/// An elementwise activation function applied after a hidden layer's weighted sum.
#[derive(Clone, Copy, Debug)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    Tanh,
    Relu,
    Identity,
    /// Any user supplied unary function.
    Custom(fn(f32) -> f32),
}
use ActFn::*;

impl Default for ActFn {
    fn default() -> Self {
        Sigmoid(Sigmoid::default())
    }
}

impl PartialEq for ActFn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sigmoid(a), Sigmoid(b)) => a == b,
            (Tanh, Tanh) | (Relu, Relu) | (Identity, Identity) => true,
            (Custom(a), Custom(b)) => ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl ActFn {
    pub fn sigmoid(amp: f32) -> Self {
        Sigmoid(Sigmoid::new(amp))
    }

    pub fn custom(f: fn(f32) -> f32) -> Self {
        Custom(f)
    }

    pub fn f(&self, x: f32) -> f32 {
        match self {
            Sigmoid(a) => a.f(x),
            Tanh => x.tanh(),
            Relu => x.max(0.),
            Identity => x,
            Custom(f) => f(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(x: f32) -> f32 {
        2. * x
    }

    #[test]
    fn default_is_logistic() {
        assert_eq!(ActFn::default(), ActFn::sigmoid(1.));
        assert_eq!(ActFn::default().f(0.), 0.5);
    }

    #[test]
    fn builtin_functions() {
        assert_eq!(Relu.f(-3.), 0.);
        assert_eq!(Relu.f(3.), 3.);
        assert_eq!(Identity.f(-1.5), -1.5);
        assert!((Tanh.f(1.) - 1f32.tanh()).abs() < f32::EPSILON);
    }

    #[test]
    fn custom_functions_compare_by_address() {
        let f = ActFn::custom(double);

        assert_eq!(f.f(2.), 4.);
        assert_eq!(f, ActFn::custom(double));
        assert_ne!(f, Identity);
    }
}
