//! # Status Matrix
//!
//! The complete member × device grid of [`PairStatus`] for one snapshot
//! evaluated as of one [`ReferenceDate`].
//!
//! The free functions in [`crate::status`] and [`crate::summary`] scan all
//! records for every pair. The matrix indexes valid records by pair once and
//! resolves every cell exactly once, then answers member summaries, device
//! summaries, and practice statistics from those cells. Results are
//! identical to the free functions for the same inputs.
//!
//! ## Layout
//!
//! Rows follow the order of the member slice, columns the order of the
//! device slice. Cells are stored row-major.
//!
//! ## Dangling records
//!
//! Records that reference a member or device outside the active sets cannot
//! be placed in the grid. They are counted in
//! [`excluded_records`](StatusMatrix::excluded_records) and otherwise
//! ignored; they typically belong to deactivated devices or former staff.

use std::collections::HashMap;

use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};

use crate::model::{Device, TeamMember, TrainingRecord};
use crate::status::{select_governing, PairStatus, TrainingStatus};
use crate::summary::{PracticeStatistics, TrainingSummary};

/// One cell of the matrix with its coordinates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatrixEntry<'a> {
    /// Row key.
    pub member_id: &'a TeamMemberId,
    /// Column key.
    pub device_id: &'a DeviceId,
    /// Resolved status of the pair.
    #[serde(flatten)]
    pub cell: &'a PairStatus,
}

/// Member × device grid of resolved pair statuses.
#[derive(Debug, Clone)]
pub struct StatusMatrix {
    reference_date: ReferenceDate,
    members: Vec<TeamMemberId>,
    devices: Vec<DeviceId>,
    cells: Vec<PairStatus>,
    member_index: HashMap<TeamMemberId, usize>,
    device_index: HashMap<DeviceId, usize>,
    excluded_records: usize,
}

impl StatusMatrix {
    /// Resolve every (member, device) pair of the active sets.
    pub fn build(
        active_members: &[TeamMember],
        active_devices: &[Device],
        records: &[TrainingRecord],
        as_of: ReferenceDate,
    ) -> Self {
        let members: Vec<TeamMemberId> = active_members.iter().map(|m| m.id.clone()).collect();
        let devices: Vec<DeviceId> = active_devices.iter().map(|d| d.id.clone()).collect();

        // First occurrence wins for lookups when an id repeats.
        let mut member_index = HashMap::with_capacity(members.len());
        for (i, id) in members.iter().enumerate() {
            member_index.entry(id.clone()).or_insert(i);
        }
        let mut device_index = HashMap::with_capacity(devices.len());
        for (i, id) in devices.iter().enumerate() {
            device_index.entry(id.clone()).or_insert(i);
        }

        let mut by_pair: HashMap<(&TeamMemberId, &DeviceId), Vec<&TrainingRecord>> =
            HashMap::new();
        let mut excluded_records = 0usize;
        for record in records {
            if member_index.contains_key(&record.team_member_id)
                && device_index.contains_key(&record.device_id)
            {
                by_pair
                    .entry((&record.team_member_id, &record.device_id))
                    .or_default()
                    .push(record);
            } else {
                excluded_records += 1;
            }
        }

        if excluded_records > 0 {
            tracing::debug!(
                excluded_records,
                total_records = records.len(),
                "training records outside the active member/device sets were excluded"
            );
        }

        let mut cells = Vec::with_capacity(members.len() * devices.len());
        for member_id in &members {
            for device_id in &devices {
                let governing = by_pair
                    .get(&(member_id, device_id))
                    .and_then(|candidates| select_governing(candidates.iter().copied()));
                cells.push(PairStatus::from_optional(governing, as_of));
            }
        }

        Self {
            reference_date: as_of,
            members,
            devices,
            cells,
            member_index,
            device_index,
            excluded_records,
        }
    }

    /// The date this matrix was evaluated as of.
    pub fn reference_date(&self) -> ReferenceDate {
        self.reference_date
    }

    /// Row keys in order.
    pub fn members(&self) -> &[TeamMemberId] {
        &self.members
    }

    /// Column keys in order.
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    /// Number of cells (`members × devices`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of records that referenced a member or device outside the
    /// active sets.
    pub fn excluded_records(&self) -> usize {
        self.excluded_records
    }

    /// The status of one pair, if both ids are part of the matrix.
    pub fn get(&self, member_id: &TeamMemberId, device_id: &DeviceId) -> Option<&PairStatus> {
        let row = *self.member_index.get(member_id)?;
        let col = *self.device_index.get(device_id)?;
        self.cells.get(row * self.devices.len() + col)
    }

    /// The cells of one member's row, in device order.
    pub fn row(&self, member_id: &TeamMemberId) -> Option<&[PairStatus]> {
        let row = *self.member_index.get(member_id)?;
        let width = self.devices.len();
        self.cells.get(row * width..(row + 1) * width)
    }

    /// Iterate one device's column, in member order.
    pub fn column<'a>(
        &'a self,
        device_id: &DeviceId,
    ) -> Option<impl Iterator<Item = &'a PairStatus> + 'a> {
        let col = *self.device_index.get(device_id)?;
        Some(self.cells.iter().skip(col).step_by(self.devices.len()))
    }

    /// Summary of one member across all devices.
    pub fn member_summary(&self, member_id: &TeamMemberId) -> Option<TrainingSummary> {
        self.row(member_id)
            .map(|cells| TrainingSummary::from_statuses(cells.iter().map(|c| c.status)))
    }

    /// Summary of one device across all members.
    pub fn device_summary(&self, device_id: &DeviceId) -> Option<TrainingSummary> {
        self.column(device_id)
            .map(|cells| TrainingSummary::from_statuses(cells.map(|c| c.status)))
    }

    /// Practice-wide statistics over all cells.
    pub fn statistics(&self) -> PracticeStatistics {
        PracticeStatistics::from_statuses(
            self.devices.len(),
            self.members.len(),
            self.cells.iter().map(|c| c.status),
        )
    }

    /// Iterate all cells row-major with their coordinates.
    pub fn entries(&self) -> impl Iterator<Item = MatrixEntry<'_>> + '_ {
        let width = self.devices.len();
        self.cells.iter().enumerate().map(move |(i, cell)| MatrixEntry {
            member_id: &self.members[i / width],
            device_id: &self.devices[i % width],
            cell,
        })
    }

    /// Cells whose status is `expiring` or `expired`, row-major.
    pub fn attention_entries(&self) -> Vec<MatrixEntry<'_>> {
        self.entries()
            .filter(|e| e.cell.status.needs_attention())
            .collect()
    }

    /// Count cells with the given status.
    pub fn count(&self, status: TrainingStatus) -> usize {
        self.cells.iter().filter(|c| c.status == status).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
