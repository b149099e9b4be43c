use serde::{Deserialize, Serialize};

/// Identity of a kind of good traded on the exchange.
///
/// Goods are compared by name and used as inventory keys; two units of the
/// same good are interchangeable except for the producer that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Good(String);

impl Good {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Good {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Good {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Good {
    fn from(name: String) -> Self {
        Self(name)
    }
}
