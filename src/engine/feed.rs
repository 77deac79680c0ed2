use std::collections::HashMap;

use ndarray::ArrayView2;

use super::Placeholder;
use crate::{PolicyErr, Result};

/// The concrete values fed to the placeholders of a graph for one evaluation.
#[derive(Debug, Default)]
pub struct Feed<'a> {
    values: HashMap<usize, ArrayView2<'a, f32>>,
}

impl<'a> Feed<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `value` to `placeholder`.
    ///
    /// # Returns
    /// A `ShapeMismatch` error if the amount of columns isn't the placeholder's.
    pub fn with(mut self, placeholder: &Placeholder, value: ArrayView2<'a, f32>) -> Result<Self> {
        if value.ncols() != placeholder.cols() {
            return Err(PolicyErr::ShapeMismatch {
                what: format!("feed of placeholder '{}'", placeholder.name()),
                got: value.shape().to_vec(),
                expected: vec![value.nrows(), placeholder.cols()],
            });
        }

        self.values.insert(placeholder.id(), value);
        Ok(self)
    }

    pub(super) fn get(&self, placeholder: &Placeholder) -> Result<ArrayView2<'a, f32>> {
        self.values
            .get(&placeholder.id())
            .copied()
            .ok_or_else(|| PolicyErr::MissingFeed(placeholder.name().to_string()))
    }
}
