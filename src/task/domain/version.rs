//! Version counters and the conditional-update token protocol.

use super::{ParseExpectedVersionError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic per-task version counter.
///
/// Starts at [`Version::INITIAL`] on creation and grows by exactly 1 on
/// every accepted update. Its decimal rendering is the entity tag exposed
/// to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned to a freshly created task.
    pub const INITIAL: Self = Self(1);

    /// Largest version representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u64 = i64::MAX as u64;

    /// Creates a version from a persisted counter value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidVersion`] when the value is zero
    /// or exceeds the schema-backed maximum (`i64::MAX`).
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(TaskDomainError::InvalidVersion(value));
        }
        Ok(Self(value))
    }

    /// Returns the counter advanced by exactly 1.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the underlying counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-asserted version token for conditional updates.
///
/// Tokens arrive verbatim from an `If-Match`-style header: the decimal
/// version, optionally wrapped in one pair of double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpectedVersion(u64);

impl ExpectedVersion {
    /// Parses a conditional-update token.
    ///
    /// Surrounding whitespace and one pair of double quotes are stripped
    /// before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseExpectedVersionError`] when the remainder is not a
    /// positive integer within the persisted version range.
    pub fn parse(token: &str) -> Result<Self, ParseExpectedVersionError> {
        let trimmed = token.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed);
        let value = unquoted
            .parse::<u64>()
            .map_err(|_| ParseExpectedVersionError(token.to_owned()))?;
        if value == 0 || value > Version::MAX_PERSISTED_VALUE {
            return Err(ParseExpectedVersionError(token.to_owned()));
        }
        Ok(Self(value))
    }

    /// Returns whether the token matches the given version.
    #[must_use]
    pub const fn matches(self, version: Version) -> bool {
        self.0 == version.value()
    }

    /// Returns the asserted counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
