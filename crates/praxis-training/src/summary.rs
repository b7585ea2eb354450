//! # Summaries & Practice Statistics
//!
//! Aggregates pair statuses per team member, per device, and across the
//! whole practice.
//!
//! ## Counting Rule
//!
//! `trained` counts every covered pair, i.e. `Trained` **and** `Expiring`.
//! `expiring` counts the `Expiring` pairs again as a flagged subset. Hence
//!
//! ```text
//! trained + untrained + expired == total      expiring <= trained
//! ```
//!
//! The completion percentage is `round(trained / total * 100)`, so an
//! expiring training still counts as complete. Flattening the counts would
//! change the displayed compliance rates.

use serde::{Deserialize, Serialize};

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};

use crate::model::{Device, TeamMember, TrainingRecord};
use crate::status::{resolve_status, TrainingStatus};

/// `round(part / whole * 100)`, rounding halves up; `0` when `whole == 0`.
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u32
}

// ---------------------------------------------------------------------------
// TrainingSummary
// ---------------------------------------------------------------------------

/// Status counts for one member across devices, or one device across members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Covered pairs (`Trained` + `Expiring`).
    pub trained: usize,
    /// Pairs flagged `Expiring` (a subset of `trained`).
    pub expiring: usize,
    /// `Expired` pairs.
    pub expired: usize,
    /// `Untrained` pairs.
    pub untrained: usize,
    /// Number of counterpart entities considered.
    pub total: usize,
}

impl TrainingSummary {
    /// Count one more pair.
    pub fn record(&mut self, status: TrainingStatus) {
        self.total += 1;
        match status {
            TrainingStatus::Trained => self.trained += 1,
            TrainingStatus::Expiring => {
                self.trained += 1;
                self.expiring += 1;
            }
            TrainingStatus::Expired => self.expired += 1,
            TrainingStatus::Untrained => self.untrained += 1,
        }
    }

    /// Summarize a sequence of statuses.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TrainingStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, s| {
            acc.record(s);
            acc
        })
    }

    /// Rounded percentage of covered pairs; `0` for an empty summary.
    pub fn completion_percent(&self) -> u32 {
        round_percent(self.trained, self.total)
    }

    /// Whether every pair is covered (expiring pairs included).
    ///
    /// Vacuously true for an empty summary.
    pub fn is_fully_trained(&self) -> bool {
        self.trained == self.total
    }
}

/// Summarize one team member across the active devices.
pub fn summarize_member(
    member_id: &TeamMemberId,
    active_devices: &[Device],
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> TrainingSummary {
    TrainingSummary::from_statuses(
        active_devices
            .iter()
            .map(|d| resolve_status(member_id, &d.id, records, as_of).status),
    )
}

/// Summarize one device across the active team members.
pub fn summarize_device(
    device_id: &DeviceId,
    active_members: &[TeamMember],
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> TrainingSummary {
    TrainingSummary::from_statuses(
        active_members
            .iter()
            .map(|m| resolve_status(&m.id, device_id, records, as_of).status),
    )
}

// ---------------------------------------------------------------------------
// PracticeStatistics
// ---------------------------------------------------------------------------

/// Practice-wide training coverage.
///
/// Serialized with camelCase keys, matching the dashboard's stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStatistics {
    /// Number of active devices.
    pub total_devices: usize,
    /// Number of active team members.
    pub total_members: usize,
    /// `total_devices × total_members`.
    pub total_required: usize,
    /// Covered pairs (`Trained` + `Expiring`).
    pub trained_combinations: usize,
    /// `Expiring` pairs.
    pub expiring_count: usize,
    /// `Expired` pairs.
    pub expired_count: usize,
    /// `round(trained_combinations / total_required * 100)`, `0` when nothing is required.
    pub completion_rate: u32,
}

impl PracticeStatistics {
    /// Assemble statistics from the dimensions and the statuses of every pair.
    ///
    /// `statuses` must hold exactly one status per member × device pair.
    pub(crate) fn from_statuses<I>(total_devices: usize, total_members: usize, statuses: I) -> Self
    where
        I: IntoIterator<Item = TrainingStatus>,
    {
        let summary = TrainingSummary::from_statuses(statuses);
        let total_required = total_devices * total_members;
        Self {
            total_devices,
            total_members,
            total_required,
            trained_combinations: summary.trained,
            expiring_count: summary.expiring,
            expired_count: summary.expired,
            completion_rate: round_percent(summary.trained, total_required),
        }
    }

    /// Pairs without any current coverage (untrained or expired).
    ///
    /// Saturates at zero for statistics whose counts disagree, such as a
    /// hand-edited report read back from JSON.
    pub fn uncovered(&self) -> usize {
        self.total_required.saturating_sub(self.trained_combinations)
    }
}

/// Compute practice-wide statistics over the full member × device cross
/// product, including pairs that have no training record at all.
pub fn compute_statistics(
    active_devices: &[Device],
    active_members: &[TeamMember],
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> PracticeStatistics {
    let statuses = active_members.iter().flat_map(|m| {
        active_devices
            .iter()
            .map(move |d| resolve_status(&m.id, &d.id, records, as_of).status)
    });
    PracticeStatistics::from_statuses(active_devices.len(), active_members.len(), statuses)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use praxis_core::TrainingRecordId;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> ReferenceDate {
        ReferenceDate::new(date(2026, 1, 15))
    }

    fn device(id: &str) -> Device {
        Device::new(DeviceId::new(id).unwrap(), id)
    }

    fn member(id: &str) -> TeamMember {
        TeamMember::new(TeamMemberId::new(id).unwrap(), "Test", id)
    }

    fn training(id: &str, m: &str, d: &str, until: Option<NaiveDate>) -> TrainingRecord {
        let r = TrainingRecord::new(
            TrainingRecordId::new(id).unwrap(),
            TeamMemberId::new(m).unwrap(),
            DeviceId::new(d).unwrap(),
            date(2025, 6, 1),
        );
        match until {
            Some(u) => r.with_valid_until(u),
            None => r,
        }
    }

    #[test]
    fn round_percent_matches_math_round() {
        assert_eq!(round_percent(0, 0), 0);
        assert_eq!(round_percent(1, 3), 33);
        assert_eq!(round_percent(2, 3), 67);
        assert_eq!(round_percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(round_percent(3, 3), 100);
    }

    #[test]
    fn summary_counts_expiring_inside_trained() {
        let s = TrainingSummary::from_statuses([
            TrainingStatus::Trained,
            TrainingStatus::Expiring,
            TrainingStatus::Expired,
            TrainingStatus::Untrained,
        ]);
        assert_eq!(
            s,
            TrainingSummary {
                trained: 2,
                expiring: 1,
                expired: 1,
                untrained: 1,
                total: 4,
            }
        );
        assert_eq!(s.completion_percent(), 50);
        assert!(!s.is_fully_trained());
    }

    #[test]
    fn empty_summary_is_zero_and_vacuously_complete() {
        let s = TrainingSummary::default();
        assert_eq!(s.completion_percent(), 0);
        assert!(s.is_fully_trained());
    }

    #[test]
    fn member_summary_over_devices() {
        let devices = vec![device("d-1"), device("d-2"), device("d-3")];
        let records = vec![
            training("t-1", "m-1", "d-1", None),
            training("t-2", "m-1", "d-2", Some(date(2026, 2, 1))),
        ];
        let s = summarize_member(&TeamMemberId::new("m-1").unwrap(), &devices, &records, as_of());
        assert_eq!(s.trained, 2);
        assert_eq!(s.expiring, 1);
        assert_eq!(s.untrained, 1);
        assert_eq!(s.total, 3);
    }

    #[test]
    fn device_summary_over_members() {
        let members = vec![member("m-1"), member("m-2")];
        let records = vec![training("t-1", "m-2", "d-1", Some(date(2026, 1, 10)))];
        let s = summarize_device(&DeviceId::new("d-1").unwrap(), &members, &records, as_of());
        assert_eq!(s.expired, 1);
        assert_eq!(s.untrained, 1);
        assert_eq!(s.total, 2);
    }

    #[test]
    fn statistics_degenerate_inputs() {
        let stats = compute_statistics(&[], &[], &[], as_of());
        assert_eq!(stats, PracticeStatistics::default());

        let only_devices = compute_statistics(&[device("d-1")], &[], &[], as_of());
        assert_eq!(only_devices.total_devices, 1);
        assert_eq!(only_devices.total_required, 0);
        assert_eq!(only_devices.completion_rate, 0);
    }

    #[test]
    fn statistics_serialize_camel_case() {
        let stats = compute_statistics(&[device("d-1")], &[member("m-1")], &[], as_of());
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalRequired"], 1);
        assert_eq!(json["trainedCombinations"], 0);
        assert_eq!(json["completionRate"], 0);
    }

    #[test]
    fn uncovered_counts_untrained_and_expired_pairs() {
        let stats = PracticeStatistics::from_statuses(
            2,
            2,
            [
                TrainingStatus::Trained,
                TrainingStatus::Expiring,
                TrainingStatus::Expired,
                TrainingStatus::Untrained,
            ],
        );
        assert_eq!(stats.total_required, 4);
        assert_eq!(stats.uncovered(), 2);
        assert_eq!(stats.completion_rate, 50);
    }

    #[test]
    fn uncovered_saturates_on_inconsistent_counts() {
        let stats: PracticeStatistics = serde_json::from_str(
            r#"{"totalDevices":1,"totalMembers":1,"totalRequired":0,
                "trainedCombinations":2,"expiringCount":0,"expiredCount":0,
                "completionRate":0}"#,
        )
        .unwrap();
        assert_eq!(stats.uncovered(), 0);
    }

    fn status_strategy() -> impl Strategy<Value = TrainingStatus> {
        prop_oneof![
            Just(TrainingStatus::Trained),
            Just(TrainingStatus::Expiring),
            Just(TrainingStatus::Expired),
            Just(TrainingStatus::Untrained),
        ]
    }

    proptest! {
        /// trained + untrained + expired == total, and expiring <= trained.
        #[test]
        fn summary_overlap_invariant(statuses in prop::collection::vec(status_strategy(), 0..64)) {
            let s = TrainingSummary::from_statuses(statuses.iter().copied());
            prop_assert_eq!(s.trained + s.untrained + s.expired, s.total);
            prop_assert!(s.expiring <= s.trained);
            prop_assert_eq!(s.total, statuses.len());
            prop_assert!(s.completion_percent() <= 100);
        }

        /// Percentages never exceed 100 and are 0 only when nothing is covered.
        #[test]
        fn round_percent_bounds(whole in 1usize..10_000, frac in 0usize..=100) {
            let part = whole * frac / 100;
            let pct = round_percent(part, whole);
            prop_assert!(pct <= 100);
            prop_assert_eq!(pct == 0, part * 200 < whole);
        }
    }
}
