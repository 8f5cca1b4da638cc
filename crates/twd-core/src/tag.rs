//! Tag identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque tag identifier.
///
/// Surrounding whitespace is trimmed on construction; a tag that is empty
/// after trimming is rejected, everything else is passed through to `timew`
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

/// Error type for empty or whitespace-only tags.
#[derive(Debug, Clone, Error)]
#[error("invalid tag: must not be empty")]
pub struct InvalidTag;

impl Tag {
    pub fn new(raw: &str) -> Result<Self, InvalidTag> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidTag);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let tag = Tag::new("  work \t").unwrap();
        assert_eq!(tag.as_str(), "work");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("   ").is_err());
        assert!(Tag::new("\t\n").is_err());
    }

    #[test]
    fn preserves_inner_whitespace() {
        // timew allows multi-word tags; only the edges are trimmed
        let tag = Tag::new("deep work").unwrap();
        assert_eq!(tag.as_str(), "deep work");
    }

    #[test]
    fn parses_via_from_str() {
        let tag: Tag = "play".parse().unwrap();
        assert_eq!(tag.to_string(), "play");
    }
}
