//! # Identity Newtypes
//!
//! Identifier newtypes for the three collections the compliance engine
//! consumes. Each identifier is a distinct type; you cannot pass a
//! [`DeviceId`] where a [`TeamMemberId`] is expected.
//!
//! ## Validation
//!
//! Identifiers are opaque strings issued by the practice database. The only
//! constraint enforced here is non-emptiness, both at construction and on
//! deserialization (`serde(try_from = "String")`), so a blank foreign key in
//! an exported snapshot is rejected at the boundary instead of silently
//! matching nothing.
//!
//! ## Ordering
//!
//! All identifiers are totally ordered (lexicographic). The training engine
//! relies on [`TrainingRecordId`] ordering as the deterministic tie-break
//! between records sharing a training date.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn validate_non_empty(value: &str, kind: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier { kind });
    }
    Ok(())
}

/// Identifier of a medical device in the practice's device register.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] if the string is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_non_empty(&s, "device ID")?;
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a team member (employee) of the practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamMemberId(String);

impl TeamMemberId {
    /// Create a team member identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] if the string is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_non_empty(&s, "team member ID")?;
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamMemberId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamMemberId> for String {
    fn from(id: TeamMemberId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a single documented training event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrainingRecordId(String);

impl TrainingRecordId {
    /// Create a training record identifier, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] if the string is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        validate_non_empty(&s, "training record ID")?;
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TrainingRecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrainingRecordId> for String {
    fn from(id: TrainingRecordId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TrainingRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
