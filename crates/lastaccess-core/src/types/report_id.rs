//! Report identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque report identifier assigned by the upstream API.
///
/// The value is never interpreted. It must be non-empty and free of
/// whitespace, control characters and `/`, since it travels as a single
/// path segment both on the relay and upstream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    /// Create a new report identifier, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        let reason = if s.is_empty() {
            Some("must not be empty")
        } else if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("must not contain whitespace or control characters")
        } else if s.contains('/') {
            Some("must not contain '/'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInputError::ReportId {
                value: s,
                reason: reason.to_string(),
            }
            .into()),
            None => Ok(Self(s)),
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReportId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ReportId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ReportId::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_opaque_ids() {
        let id = ReportId::new("0a1b2c3d4e5f").unwrap();
        assert_eq!(id.as_str(), "0a1b2c3d4e5f");
        assert_eq!(id.to_string(), "0a1b2c3d4e5f");
    }

    #[test]
    fn rejects_empty() {
        assert!(ReportId::new("").is_err());
    }

    #[test]
    fn rejects_whitespace_and_slashes() {
        assert!(ReportId::new("abc def").is_err());
        assert!(ReportId::new("abc/def").is_err());
        assert!(ReportId::new("abc\n").is_err());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<ReportId>(r#""r-1""#).is_ok());
        assert!(serde_json::from_str::<ReportId>(r#""""#).is_err());
    }
}
