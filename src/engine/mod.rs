//! A small symbolic tensor engine.
//!
//! Expressions are built once as [`Tensor`] graphs over [`Placeholder`]s and [`Variable`]s and
//! evaluated later against a [`Session`], which owns the variable storage and the random number
//! generator used for sampling.

mod dtype;
mod feed;
mod scope;
mod session;
mod tensor;
mod update;

pub use dtype::DType;
pub use feed::Feed;
pub use scope::Scope;
pub use session::Session;
pub use tensor::{Placeholder, Tensor, Variable};
pub use update::Update;

/// Whether this build carries the tensor engine.
pub const AVAILABLE: bool = cfg!(feature = "engine");
