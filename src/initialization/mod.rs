mod constant;
mod fan;
mod random;
mod weight_init;

pub use constant::ConstInit;
pub use fan::FanInit;
pub use random::RandInit;
pub use weight_init::WeightInit;
