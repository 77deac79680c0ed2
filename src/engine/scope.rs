use std::fmt::{self, Display};

const SEPARATOR: char = '/';

/// A namespace that isolates the variables of one network from the ones of another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scope(String);

impl Default for Scope {
    fn default() -> Self {
        Self::new("global")
    }
}

impl Scope {
    /// Creates a new root `Scope`.
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self(name.trim_matches(SEPARATOR).to_string())
    }

    /// Returns a scope nested inside this one.
    pub fn child(&self, name: &str) -> Self {
        Self(self.qualify(name))
    }

    /// Returns the fully qualified name of `leaf` inside this scope.
    pub fn qualify(&self, leaf: &str) -> String {
        let leaf = leaf.trim_matches(SEPARATOR);

        if self.0.is_empty() {
            return leaf.to_string();
        }

        format!("{}{SEPARATOR}{leaf}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting() {
        let scope = Scope::default().child("action_estimator");

        assert_eq!(scope.as_str(), "global/action_estimator");
        assert_eq!(scope.qualify("weights_0"), "global/action_estimator/weights_0");
    }

    #[test]
    fn empty_root() {
        let scope = Scope::new("");
        assert_eq!(scope.qualify("w"), "w");
        assert_eq!(Scope::new("/target/").child("a").as_str(), "target/a");
    }
}
