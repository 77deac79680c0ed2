mod bounded;
mod rd;
mod space;

pub use bounded::BoundedSpace;
pub use rd::RdSpace;
pub use space::Space;
