use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, engine::DType};

fn default_scope() -> String {
    "global".to_string()
}

/// The specification for the `ActFn` enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFnSpec {
    Sigmoid { amp: f32 },
    Tanh,
    Relu,
    Identity,
}

/// The specification for the `Activation` enum, either one function for every hidden layer or
/// a list with one function per hidden layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivationSpec {
    Single(ActFnSpec),
    PerLayer(Vec<ActFnSpec>),
}

/// The specification for the weight initializers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitSpec {
    Const { value: f32 },
    Normal { mean: f32, std_dev: f32 },
    Uniform { low: f32, high: f32 },
    Xavier,
    XavierUniform,
    Kaiming,
    Lecun,
    LecunUniform,
}

/// The specification for the `Space` implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceSpec {
    Bounded {
        low: f32,
        high: f32,
        shape: Vec<usize>,
    },
    Rd {
        shape: Vec<usize>,
    },
}

/// The specification for a `NeuralNetwork` policy and the session it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySpec {
    pub layers: Vec<usize>,
    pub state_space: SpaceSpec,
    pub action_space: SpaceSpec,
    #[serde(default)]
    pub activation: Option<ActivationSpec>,
    #[serde(default)]
    pub init: Option<InitSpec>,
    #[serde(default)]
    pub dtype: DType,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub do_setup: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PolicySpec {
    /// Parses a `PolicySpec` from a JSON string.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a `PolicySpec` from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
