//! # Pair History
//!
//! Every training record of one (team member, device) pair, newest first,
//! each annotated with its own expiry classification and whether it is the
//! record that decides the pair's status. Invalidated records are listed
//! too; they are never governing.

use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};

use crate::model::TrainingRecord;
use crate::status::{governing_order, select_governing, RecordExpiry};

/// One record in a pair's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The record itself.
    pub record: TrainingRecord,
    /// The record's own expiry classification as of the reference date.
    pub expiry: RecordExpiry,
    /// Whether this record decides the pair's status.
    pub is_governing: bool,
}

/// All records for a pair, newest `training_date` first.
///
/// Records sharing a training date are ordered by greater id first, so the
/// governing record always precedes the other valid records of its day.
pub fn pair_history(
    member_id: &TeamMemberId,
    device_id: &DeviceId,
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> Vec<HistoryEntry> {
    let mut pair: Vec<&TrainingRecord> = records
        .iter()
        .filter(|r| r.is_for(member_id, device_id))
        .collect();
    pair.sort_by(|a, b| governing_order(b, a));

    // Compared by address: ids are not guaranteed unique in an export.
    let governing = select_governing(pair.iter().copied());

    pair.into_iter()
        .map(|record| HistoryEntry {
            expiry: RecordExpiry::classify(record.valid_until, as_of),
            is_governing: governing.is_some_and(|g| std::ptr::eq(g, record)),
            record: record.clone(),
        })
        .collect()
}
