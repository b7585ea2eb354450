//! # Input Data Model
//!
//! The three collections the engine consumes: [`Device`], [`TeamMember`],
//! and [`TrainingRecord`]. Field names follow the practice database export
//! (`is_active`, `team_member_id`, `valid_until`, ...), so a JSON dump of
//! the backend tables deserializes directly.
//!
//! Dates are calendar dates. The backend sometimes emits full timestamps
//! for date columns and the training form submits an empty string for an
//! absent expiry; both are accepted here so that one odd row cannot make a
//! whole snapshot unreadable.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use praxis_core::{DeviceId, TeamMemberId, TrainingRecordId};

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// A medical device from the practice's device register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier.
    pub id: DeviceId,
    /// Display name (e.g. "EKG-Gerät Schiller AT-102").
    pub name: String,
    /// Whether the device is in service. Only active devices require training.
    #[serde(default)]
    pub is_active: bool,
    /// Manufacturer, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Model designation, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Device {
    /// Create an active device with no manufacturer/model metadata.
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_active: true,
            manufacturer: None,
            model: None,
        }
    }

    /// Return a copy of this device marked as out of service.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

// ---------------------------------------------------------------------------
// TeamMember
// ---------------------------------------------------------------------------

/// A member of the practice team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Team member identifier.
    pub id: TeamMemberId,
    /// Linked login account, if the member has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title (e.g. "MFA", "Ärztin").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Explicit activity flag. `None` means not recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Employment status as recorded by HR (e.g. "active", "terminated").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
}

impl TeamMember {
    /// Create a team member with only the required fields set.
    pub fn new(
        id: TeamMemberId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            user_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            position: None,
            is_active: None,
            employment_status: None,
        }
    }

    /// The display name: `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Training metadata
// ---------------------------------------------------------------------------

/// Kind of training event. Descriptive only; it does not affect status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingType {
    /// First instruction on the device.
    #[default]
    Initial,
    /// Periodic refresher.
    Refresher,
    /// Instruction after a device or procedure update.
    Update,
    /// Formal recertification.
    Recertification,
    /// Any value this version does not know.
    Other,
}

impl TrainingType {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Refresher => "refresher",
            Self::Update => "update",
            Self::Recertification => "recertification",
            Self::Other => "other",
        }
    }

    /// German label as shown in the practice UI.
    pub fn label_de(self) -> &'static str {
        match self {
            Self::Initial => "Ersteinweisung",
            Self::Refresher => "Auffrischung",
            Self::Update => "Update",
            Self::Recertification | Self::Other => "Rezertifizierung",
        }
    }
}

impl From<String> for TrainingType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "initial" => Self::Initial,
            "refresher" => Self::Refresher,
            "update" => Self::Update,
            "recertification" => Self::Recertification,
            _ => Self::Other,
        }
    }
}

impl From<TrainingType> for String {
    fn from(value: TrainingType) -> Self {
        value.as_str().to_string()
    }
}

/// Who delivered a training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainerRole {
    /// A member of the practice team.
    Internal,
    /// A representative of the device manufacturer.
    Manufacturer,
    /// Any other external trainer.
    External,
}

impl TrainerRole {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Manufacturer => "manufacturer",
            Self::External => "external",
        }
    }

    /// German label as shown in the practice UI.
    pub fn label_de(self) -> &'static str {
        match self {
            Self::Internal => "Intern",
            Self::Manufacturer => "Hersteller",
            Self::External => "Extern",
        }
    }
}

impl From<String> for TrainerRole {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "internal" => Self::Internal,
            "manufacturer" => Self::Manufacturer,
            _ => Self::External,
        }
    }
}

impl From<TrainerRole> for String {
    fn from(value: TrainerRole) -> Self {
        value.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// TrainingRecord
// ---------------------------------------------------------------------------

/// One documented training of a team member on a device.
///
/// Records are append-only. The only mutation the backend performs is
/// flipping `is_valid` to `false` to retract a record; the engine ignores
/// such records entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Record identifier.
    pub id: TrainingRecordId,
    /// The device trained on.
    pub device_id: DeviceId,
    /// The team member who was trained.
    pub team_member_id: TeamMemberId,
    /// Calendar date the training took place.
    #[serde(deserialize_with = "deserialize_date")]
    pub training_date: NaiveDate,
    /// Last calendar date the training is valid. `None` never expires.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_until: Option<NaiveDate>,
    /// Soft-invalidation flag. Defaults to `true` when absent.
    #[serde(default = "default_true")]
    pub is_valid: bool,
    /// Kind of training.
    #[serde(default)]
    pub training_type: TrainingType,
    /// Name of the trainer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_name: Option<String>,
    /// Role of the trainer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_role: Option<TrainerRole>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TrainingRecord {
    /// Create a valid initial training record without expiry.
    pub fn new(
        id: TrainingRecordId,
        team_member_id: TeamMemberId,
        device_id: DeviceId,
        training_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            device_id,
            team_member_id,
            training_date,
            valid_until: None,
            is_valid: true,
            training_type: TrainingType::Initial,
            trainer_name: None,
            trainer_role: None,
            notes: None,
        }
    }

    /// Set the expiry date.
    pub fn with_valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    /// Mark the record as retracted.
    pub fn invalidated(mut self) -> Self {
        self.is_valid = false;
        self
    }

    /// Whether this record belongs to the given pair.
    pub fn is_for(&self, member_id: &TeamMemberId, device_id: &DeviceId) -> bool {
        &self.team_member_id == member_id && &self.device_id == device_id
    }
}

fn default_true() -> bool {
    true
}

/// Parse a calendar date, accepting `YYYY-MM-DD` or an RFC 3339 timestamp
/// (whose calendar date is taken in its own offset).
fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|e| format!("invalid date \"{raw}\": {e}"))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_calendar_date(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
