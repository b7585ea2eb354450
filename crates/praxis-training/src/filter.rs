//! # Member & Device Filtering
//!
//! Text search combined with a status predicate over summaries, as used by
//! the member and device list views. Both filters are stable: the output
//! keeps the input order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use praxis_core::ValidationError;

use crate::model::{Device, TeamMember};
use crate::summary::TrainingSummary;

/// Status predicate applied to a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Every pair covered (`trained == total`, expiring pairs included).
    Trained,
    /// At least one untrained pair.
    Untrained,
    /// At least one expiring pair.
    Expiring,
    /// At least one expired pair.
    Expired,
}

impl StatusFilter {
    /// Whether a summary passes this filter.
    pub fn matches(self, summary: &TrainingSummary) -> bool {
        match self {
            Self::All => true,
            Self::Trained => summary.trained == summary.total,
            Self::Untrained => summary.untrained > 0,
            Self::Expiring => summary.expiring > 0,
            Self::Expired => summary.expired > 0,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trained => "trained",
            Self::Untrained => "untrained",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "trained" => Ok(Self::Trained),
            "untrained" => Ok(Self::Untrained),
            "expiring" => Ok(Self::Expiring),
            "expired" => Ok(Self::Expired),
            _ => Err(ValidationError::UnknownStatusFilter(s.to_string())),
        }
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
fn matches_query(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Filter members by name and summary status.
///
/// `query` is matched case-insensitively against the full name. The text
/// filter is applied first; `summary_fn` is only called for members that
/// pass it, and not at all under [`StatusFilter::All`].
pub fn filter_members<'a, F>(
    members: &'a [TeamMember],
    query: &str,
    status_filter: StatusFilter,
    mut summary_fn: F,
) -> Vec<&'a TeamMember>
where
    F: FnMut(&TeamMember) -> TrainingSummary,
{
    let needle = query.to_lowercase();
    members
        .iter()
        .filter(|m| matches_query(&m.full_name(), &needle))
        .filter(|m| status_filter == StatusFilter::All || status_filter.matches(&summary_fn(*m)))
        .collect()
}

/// Filter devices by name and summary status. Counterpart of
/// [`filter_members`] for the device list view.
pub fn filter_devices<'a, F>(
    devices: &'a [Device],
    query: &str,
    status_filter: StatusFilter,
    mut summary_fn: F,
) -> Vec<&'a Device>
where
    F: FnMut(&Device) -> TrainingSummary,
{
    let needle = query.to_lowercase();
    devices
        .iter()
        .filter(|d| matches_query(&d.name, &needle))
        .filter(|d| status_filter == StatusFilter::All || status_filter.matches(&summary_fn(*d)))
        .collect()
}
