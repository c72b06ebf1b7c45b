//! Validated identifiers used as entity names and relation endpoints.
//!
//! An identifier follows the grammar `[A-Za-z_][A-Za-z0-9_]*`. The
//! [`Identifier`] type can only hold values that satisfy that rule.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid identifier")]
pub struct InvalidIdentifier(String);

impl InvalidIdentifier {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.0
    }
}

/// A syntactically valid diagram identifier.
///
/// # Examples
///
/// ```
/// use umlcase_core::identifier::Identifier;
///
/// let user = Identifier::new("User").unwrap();
/// assert_eq!(user, "User");
///
/// assert!(Identifier::new("1st").is_err());
/// assert!(Identifier::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates an `Identifier` after checking it against the identifier grammar.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if `name` is empty, starts with a digit,
    /// or contains characters other than ASCII letters, digits and `_`.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let name = name.into();
        if is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidIdentifier(name))
        }
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns `true` if `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = InvalidIdentifier;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Identifier> for &str {
    fn eq(&self, other: &Identifier) -> bool {
        *self == other.0
    }
}
