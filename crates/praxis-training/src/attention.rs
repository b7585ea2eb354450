//! # Attention Lists
//!
//! The two worklists the practice acts on: who still needs a device
//! briefing, and which trainings lapse within the lookahead window.

use chrono::NaiveDate;
use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId, TrainingRecordId};

use crate::matrix::StatusMatrix;
use crate::model::{TeamMember, TrainingRecord};
use crate::status::{resolve_status, TrainingStatus};

/// Active members without current coverage (`untrained` or `expired`) for
/// one device, in member order.
pub fn members_requiring_training<'a>(
    device_id: &DeviceId,
    active_members: &'a [TeamMember],
    records: &[TrainingRecord],
    as_of: ReferenceDate,
) -> Vec<&'a TeamMember> {
    active_members
        .iter()
        .filter(|m| !resolve_status(&m.id, device_id, records, as_of).status.is_covered())
        .collect()
}

/// A covered pair whose governing training lapses within the lookahead
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringTraining {
    /// Member of the pair.
    pub member_id: TeamMemberId,
    /// Device of the pair.
    pub device_id: DeviceId,
    /// The governing record.
    pub record_id: TrainingRecordId,
    /// Last day the training is valid.
    pub valid_until: NaiveDate,
    /// Days from the reference date to `valid_until`; `0` means today.
    pub days_remaining: i64,
}

/// All `expiring` cells of the matrix, soonest expiry first.
///
/// Cells expiring on the same day keep matrix (row-major) order.
pub fn expiring_soon(matrix: &StatusMatrix) -> Vec<ExpiringTraining> {
    let as_of = matrix.reference_date();
    let mut out: Vec<ExpiringTraining> = matrix
        .attention_entries()
        .into_iter()
        .filter(|e| e.cell.status == TrainingStatus::Expiring)
        .filter_map(|e| {
            let record = e.cell.governing.as_ref()?;
            let valid_until = record.valid_until?;
            Some(ExpiringTraining {
                member_id: e.member_id.clone(),
                device_id: e.device_id.clone(),
                record_id: record.id.clone(),
                valid_until,
                days_remaining: as_of.days_until(valid_until),
            })
        })
        .collect();
    out.sort_by_key(|t| t.valid_until);
    out
}
