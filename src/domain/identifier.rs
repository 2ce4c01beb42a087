use std::{fmt, ops::Deref, str::FromStr};

use serde::Serialize;

/// The identifier of a document in the index.
///
/// Identifiers are non-empty strings of ASCII digits, kept exactly as they
/// appear in the index (including any leading zeros, e.g. `0050`).
///
/// Ordering is the ordering of the underlying strings, *not* of the numbers
/// they spell: `"100" < "23" < "5"`. Component leaders are chosen with this
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates a new `Identifier` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifierError`] if the string is empty or contains
    /// anything other than ASCII digits.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidIdentifierError> {
        let s = s.into();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidIdentifierError(s));
        }
        Ok(Self(s))
    }

    /// Wraps a string that the caller has already matched as `[0-9]+`.
    pub(crate) fn from_digits(s: &str) -> Self {
        debug_assert!(!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
        Self(s.to_string())
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = InvalidIdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when a string is not a valid document identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid identifier '{0}': must be non-empty and contain only digits (0-9)")]
pub struct InvalidIdentifierError(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("1"; "single digit")]
    #[test_case("0050"; "leading zeros")]
    #[test_case("8446"; "four digits")]
    fn valid_identifiers(input: &str) {
        let id = Identifier::new(input).unwrap();
        assert_eq!(id.as_str(), input);
        assert_eq!(id.to_string(), input);
    }

    #[test_case(""; "empty")]
    #[test_case("RFC0050"; "prefixed")]
    #[test_case("12a"; "trailing letter")]
    #[test_case(" 12"; "leading space")]
    #[test_case("-1"; "negative")]
    fn invalid_identifiers(input: &str) {
        assert_eq!(
            Identifier::new(input),
            Err(InvalidIdentifierError(input.to_string()))
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut ids: Vec<Identifier> = ["5", "23", "100"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();

        let sorted: Vec<&str> = ids.iter().map(Identifier::as_str).collect();
        assert_eq!(sorted, ["100", "23", "5"]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = Identifier::new("0793").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0793\"");
    }
}
