//! # Training Status & Pair Resolution
//!
//! Defines [`TrainingStatus`], the per-record [`RecordExpiry`]
//! classification, and [`resolve_status`], which decides the status of one
//! (team member, device) pair from the training records.
//!
//! ## Resolution
//!
//! ```text
//! valid records for (member, device)
//!   ├─ none                                  → untrained
//!   └─ governing = latest training_date (ties: greatest record id)
//!        ├─ valid_until absent               → trained
//!        ├─ valid_until <  as_of             → expired
//!        ├─ valid_until <  as_of + 30 days   → expiring
//!        └─ otherwise                        → trained
//! ```
//!
//! All comparisons are on calendar dates. A training valid until today is
//! still valid today and reports `expiring`. The 30-day window is fixed.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};

use crate::model::TrainingRecord;

/// Days before `valid_until` in which a still-valid training is flagged
/// as expiring.
pub const EXPIRY_LOOKAHEAD_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// TrainingStatus
// ---------------------------------------------------------------------------

/// The compliance status of one (team member, device) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// No valid training record exists for the pair.
    Untrained,
    /// Covered by a training that does not lapse within the lookahead window.
    Trained,
    /// Covered, but the governing training lapses within the lookahead window.
    Expiring,
    /// The governing training has lapsed.
    Expired,
}

impl TrainingStatus {
    /// All statuses in display order.
    pub const ALL: [TrainingStatus; 4] = [
        TrainingStatus::Trained,
        TrainingStatus::Expiring,
        TrainingStatus::Expired,
        TrainingStatus::Untrained,
    ];

    /// Whether the pair currently counts as trained for coverage purposes.
    ///
    /// `Expiring` is covered: the training is still valid, only flagged.
    pub fn is_covered(self) -> bool {
        matches!(self, Self::Trained | Self::Expiring)
    }

    /// Whether the pair needs someone to act soon.
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::Expiring | Self::Expired)
    }

    /// German badge label as shown in the practice UI.
    pub fn label_de(self) -> &'static str {
        match self {
            Self::Trained => "Eingewiesen",
            Self::Expiring => "Läuft ab",
            Self::Expired => "Abgelaufen",
            Self::Untrained => "Nicht eingewiesen",
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Untrained => "untrained",
            Self::Trained => "trained",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordExpiry
// ---------------------------------------------------------------------------

/// Expiry classification of a single record's `valid_until` as of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordExpiry {
    /// No expiry date; never lapses.
    NoExpiry,
    /// Valid beyond the lookahead window.
    Valid,
    /// Valid, but lapses within the lookahead window.
    Expiring,
    /// Lapsed before the reference date.
    Expired,
}

impl RecordExpiry {
    /// Classify an optional expiry date against the reference date.
    pub fn classify(valid_until: Option<NaiveDate>, as_of: ReferenceDate) -> Self {
        match valid_until {
            None => Self::NoExpiry,
            Some(until) if until < as_of.date() => Self::Expired,
            Some(until) if until < as_of.plus_days(EXPIRY_LOOKAHEAD_DAYS) => Self::Expiring,
            Some(_) => Self::Valid,
        }
    }

    /// The pair status a governing record with this expiry produces.
    pub fn to_status(self) -> TrainingStatus {
        match self {
            Self::NoExpiry | Self::Valid => TrainingStatus::Trained,
            Self::Expiring => TrainingStatus::Expiring,
            Self::Expired => TrainingStatus::Expired,
        }
    }
}

// ---------------------------------------------------------------------------
// PairStatus
// ---------------------------------------------------------------------------

/// The resolved status of a pair together with the record that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairStatus {
    /// The pair's status.
    pub status: TrainingStatus,
    /// The governing record. `None` exactly when `status` is `Untrained`.
    #[serde(rename = "governing_record", skip_serializing_if = "Option::is_none")]
    pub governing: Option<TrainingRecord>,
}

impl PairStatus {
    /// Status of a pair without any valid record.
    pub fn untrained() -> Self {
        Self {
            status: TrainingStatus::Untrained,
            governing: None,
        }
    }

    /// Derive the status from a governing record.
    pub fn from_governing(record: &TrainingRecord, as_of: ReferenceDate) -> Self {
        Self {
            status: RecordExpiry::classify(record.valid_until, as_of).to_status(),
            governing: Some(record.clone()),
        }
    }

    /// Build from an optional governing record.
    pub fn from_optional(record: Option<&TrainingRecord>, as_of: ReferenceDate) -> Self {
        match record {
            Some(r) => Self::from_governing(r, as_of),
            None => Self::untrained(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Order two candidate records so that the governing one compares greater:
/// later `training_date` first, then greater record id.
pub(crate) fn governing_order(a: &TrainingRecord, b: &TrainingRecord) -> std::cmp::Ordering {
    a.training_date
        .cmp(&b.training_date)
        .then_with(|| a.id.cmp(&b.id))
}

/// Select the governing record among candidates, ignoring invalidated ones.
pub fn select_governing<'a, I>(candidates: I) -> Option<&'a TrainingRecord>
where
    I: IntoIterator<Item = &'a TrainingRecord>,
{
    candidates
        .into_iter()
        .filter(|r| r.is_valid)
        .max_by(|a, b| governing_order(a, b))
}

/// Resolve the training status of one (team member, device) pair.
///
/// Only records with `is_valid = true` for exactly this pair are
/// considered. The result is independent of the order of `records`.
pub fn resolve_status(
    member_id: &TeamMemberId,
    device_id: &DeviceId,
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> PairStatus {
    let governing = select_governing(records.iter().filter(|r| r.is_for(member_id, device_id)));
    PairStatus::from_optional(governing, as_of)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
