use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The numeric type tag of a placeholder.
///
/// Evaluation always happens in `f32`, the tag documents what callers are expected to feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    #[default]
    #[serde(alias = "float")]
    Float32,
    #[serde(alias = "double")]
    Float64,
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Float32 => f.write_str("float32"),
            DType::Float64 => f.write_str("float64"),
        }
    }
}
