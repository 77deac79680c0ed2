/// The shapes of a policy's parameter matrices, in the order `Policy::parameters` returns them.
///
/// Parameters are unbounded, so the shapes fully describe the space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSpace {
    shapes: Vec<(usize, usize)>,
}

impl ParameterSpace {
    pub fn new(shapes: Vec<(usize, usize)>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[(usize, usize)] {
        &self.shapes
    }

    /// The total amount of scalar parameters.
    pub fn size(&self) -> usize {
        self.shapes.iter().map(|(rows, cols)| rows * cols).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size() {
        let space = ParameterSpace::new(vec![(2, 3), (3, 1)]);
        assert_eq!(space.size(), 9);
        assert_eq!(space.shapes().len(), 2);
    }
}
