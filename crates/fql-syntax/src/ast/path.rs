use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier standing for "every row" inside `COUNT(*)`.
pub const WILDCARD: &str = "*";

/// Dot-separated field reference (e.g. `age`, `user.address.city`).
///
/// Every segment but the last names a relation to traverse; the last one
/// names the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathOperand {
    identifiers: Vec<String>,
}

impl PathOperand {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_dotted(path: &str) -> Self {
        Self::new(path.split('.'))
    }

    /// The single-segment `*` path used by `COUNT(*)`.
    pub fn wildcard() -> Self {
        Self::new([WILDCARD])
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Dotted rendering, e.g. `user.address.city`.
    pub fn path(&self) -> String {
        self.identifiers.join(".")
    }

    pub fn is_wildcard(&self) -> bool {
        self.identifiers.len() == 1 && self.identifiers[0] == WILDCARD
    }

    /// Relation segments, i.e. everything but the field name.
    pub fn relations(&self) -> &[String] {
        match self.identifiers.split_last() {
            Some((_, relations)) => relations,
            None => &[],
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.identifiers.last().map(String::as_str)
    }
}

impl fmt::Display for PathOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
