use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::DType;
use crate::activations::ActFn;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named input slot of shape `(batch, cols)` whose value is fed at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    id: usize,
    name: String,
    dtype: DType,
    cols: usize,
}

impl Placeholder {
    /// Declares a new `Placeholder`, the batch dimension is left free.
    ///
    /// # Arguments
    /// * `name` - The name of the placeholder.
    /// * `dtype` - The numeric type callers should feed.
    /// * `cols` - The fixed amount of columns.
    pub fn new(name: impl Into<String>, dtype: DType, cols: usize) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            dtype,
            cols,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// A handle to a matrix stored in a `Session`.
///
/// Only sessions hand out variables, the name is unique inside the session that created it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    shape: (usize, usize),
}

impl Variable {
    pub(super) fn new(name: String, shape: (usize, usize)) -> Self {
        Self { name, shape }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

#[derive(Debug)]
pub(super) enum Op {
    Placeholder(Placeholder),
    Variable(Variable),
    MatMul(Tensor, Tensor),
    Activation(ActFn, Tensor),
    ReduceSum(Tensor),
    AddN(Vec<Tensor>),
    Abs(Tensor),
}

#[derive(Debug)]
struct Node {
    id: usize,
    op: Op,
}

/// A node of a symbolic computation graph.
///
/// Cloning a `Tensor` is cheap and shares the node, so several expressions can be built on top of
/// the same intermediate results and a `Session` evaluates each shared node only once per run.
#[derive(Clone, Debug)]
pub struct Tensor(Arc<Node>);

impl Tensor {
    fn new(op: Op) -> Self {
        Self(Arc::new(Node { id: next_id(), op }))
    }

    pub fn placeholder(placeholder: &Placeholder) -> Self {
        Self::new(Op::Placeholder(placeholder.clone()))
    }

    pub fn variable(variable: &Variable) -> Self {
        Self::new(Op::Variable(variable.clone()))
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Tensor) -> Self {
        Self::new(Op::MatMul(self.clone(), rhs.clone()))
    }

    /// Applies `act_fn` to every element.
    pub fn activation(&self, act_fn: ActFn) -> Self {
        Self::new(Op::Activation(act_fn, self.clone()))
    }

    /// Sums every element into a `1x1` tensor.
    pub fn reduce_sum(&self) -> Self {
        Self::new(Op::ReduceSum(self.clone()))
    }

    /// Elementwise sum of equally shaped tensors, an empty list sums to a `1x1` zero.
    pub fn add_n(tensors: &[Tensor]) -> Self {
        Self::new(Op::AddN(tensors.to_vec()))
    }

    pub fn abs(&self) -> Self {
        Self::new(Op::Abs(self.clone()))
    }

    pub fn id(&self) -> usize {
        self.0.id
    }

    pub(super) fn op(&self) -> &Op {
        &self.0.op
    }
}
