use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// Message used when the crate was built without the tensor engine.
pub const NO_ENGINE_SUPPORT: &str =
    "the tensor engine is not available, rebuild with the `engine` feature enabled";

/// The result type used in the entire policy crate.
pub type Result<T> = std::result::Result<T, PolicyErr>;

/// The policy crate's error type.
#[derive(Debug)]
pub enum PolicyErr {
    /// A required dependency is not available in this build.
    NotSupported(&'static str),
    /// The arguments given to build a network are malformed.
    InvalidConfig(String),
    /// A one-shot operation was invoked more than once.
    MultipleCalls(&'static str),
    /// The network graph was used before `setup` ran.
    NotSetUp,
    /// The given state is not a member of the policy's state space.
    StateOutOfSpace {
        got: Vec<usize>,
        expected: Vec<usize>,
    },
    ShapeMismatch {
        what: String,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
    MissingFeed(String),
    UnknownVariable(String),
    InvalidVariance(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for PolicyErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyErr::NotSupported(msg) => write!(f, "not supported: {msg}"),
            PolicyErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            PolicyErr::MultipleCalls(msg) => write!(f, "multiple calls: {msg}"),
            PolicyErr::NotSetUp => {
                write!(f, "the network is not set up, call `setup` before using it")
            }
            PolicyErr::StateOutOfSpace { got, expected } => write!(
                f,
                "the state (shape {got:?}) is not contained in the state space (shape {expected:?})"
            ),
            PolicyErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch in {what}, got {got:?} and expected {expected:?}"
            ),
            PolicyErr::MissingFeed(name) => {
                write!(f, "no value was fed for placeholder '{name}'")
            }
            PolicyErr::UnknownVariable(name) => {
                write!(f, "the variable '{name}' does not exist in this session")
            }
            PolicyErr::InvalidVariance(msg) => write!(f, "invalid variance estimate: {msg}"),
            PolicyErr::Io(e) => write!(f, "io error: {e}"),
            PolicyErr::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for PolicyErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PolicyErr::Io(e) => Some(e),
            PolicyErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PolicyErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PolicyErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
