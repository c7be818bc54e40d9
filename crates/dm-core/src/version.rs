//! Strongly-typed migration version token.
//!
//! Versions are compared as plain strings. That ordering only matches creation
//! order when every token in a directory has the same width and format (for
//! example zero-padded timestamps); callers are expected to guarantee it.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A non-empty migration version token, e.g. `20240105120000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MigrationVersion(String);

impl<'de> Deserialize<'de> for MigrationVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MigrationVersion::try_new(s)
            .ok_or_else(|| serde::de::Error::custom("MigrationVersion must not be empty"))
    }
}

impl MigrationVersion {
    /// Create a new version, panicking if the token is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(token: impl Into<String>) -> Self {
        let s = token.into();
        assert!(!s.is_empty(), "MigrationVersion must not be empty");
        Self(s)
    }

    /// Try to create a new version, returning `None` if the token is empty.
    pub fn try_new(token: impl Into<String>) -> Option<Self> {
        let s = token.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Extract the version from a migration file name.
    ///
    /// The version is everything before the first `_`, so
    /// `0002_add_tasks.down.sql` yields `0002`. Returns `None` when the name
    /// has no separator or the prefix is empty.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (token, _) = file_name.split_once('_')?;
        Self::try_new(token)
    }

    /// Extract the version from one line of `migrate info` output.
    ///
    /// Lines have the form `<version>/<description>`; the version is the part
    /// before the first `/`.
    pub fn from_status_line(line: &str) -> Option<Self> {
        let (token, _) = line.trim().split_once('/')?;
        Self::try_new(token.trim())
    }

    /// Return the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for MigrationVersion {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MigrationVersion {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s).ok_or("MigrationVersion must not be empty")
    }
}

impl PartialEq<str> for MigrationVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
