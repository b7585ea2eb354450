//! # praxis-cli — Device-Training Compliance Reports
//!
//! Provides the `praxis` command-line interface. It loads a practice
//! snapshot (devices, team members, training records) exported from the
//! practice database, evaluates it as of a reference date, and prints
//! reports as text tables or JSON.
//!
//! ## Subcommands
//!
//! - `praxis stats`: Practice-wide statistics.
//! - `praxis matrix`: The member × device status grid.
//! - `praxis members` / `praxis devices`: Filtered lists with summaries.
//! - `praxis pair`: One pair's status and full record history.
//! - `praxis untrained`: Members still needing a briefing on a device.
//! - `praxis expiring`: Trainings lapsing within the next 30 days.
//!
//! ```bash
//! praxis --snapshot export.json stats
//! praxis --snapshot export.yaml --as-of 2026-01-15 members --status expired
//! praxis --format json expiring
//! ```
//!
//! The CLI only reads. Every handler returns an exit code and writes to
//! the supplied writer, so handlers are testable without a process.

pub mod attention;
pub mod config;
pub mod listing;
pub mod matrix;
pub mod pair;
pub mod stats;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};
use praxis_training::{DefaultMembershipPolicy, Device, Snapshot, StatusMatrix, TeamMember};

use crate::config::{CliConfig, OutputFormat};

/// Load a snapshot file, choosing the parser by extension.
///
/// `.yaml`/`.yml` are parsed as YAML, `.json` as JSON. Any other extension
/// is rejected rather than guessed.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let snapshot = Snapshot::from_path(path)
        .with_context(|| format!("failed to load snapshot: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        devices = snapshot.devices.len(),
        team_members = snapshot.team_members.len(),
        trainings = snapshot.trainings.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// A loaded snapshot bound to a reference date and output format.
///
/// The active member and device sets are computed once on construction.
#[derive(Debug, Clone)]
pub struct Evaluation {
    snapshot: Snapshot,
    as_of: ReferenceDate,
    format: OutputFormat,
    active_members: Vec<TeamMember>,
    active_devices: Vec<Device>,
}

impl Evaluation {
    /// Bind a snapshot to a reference date using the default membership
    /// policy.
    pub fn new(snapshot: Snapshot, as_of: ReferenceDate, format: OutputFormat) -> Self {
        let active_members = snapshot.active_members(&DefaultMembershipPolicy);
        let active_devices = snapshot.active_devices();
        Self {
            snapshot,
            as_of,
            format,
            active_members,
            active_devices,
        }
    }

    /// Load the configured snapshot.
    pub fn from_config(config: &CliConfig, as_of: ReferenceDate) -> Result<Self> {
        let path = config.snapshot_path()?;
        let snapshot = load_snapshot(path)?;
        Ok(Self::new(snapshot, as_of, config.format))
    }

    /// The underlying snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The reference date.
    pub fn as_of(&self) -> ReferenceDate {
        self.as_of
    }

    /// The output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Active team members, in snapshot order.
    pub fn active_members(&self) -> &[TeamMember] {
        &self.active_members
    }

    /// Active devices, in snapshot order.
    pub fn active_devices(&self) -> &[Device] {
        &self.active_devices
    }

    /// Build the status matrix over the active sets.
    pub fn matrix(&self) -> StatusMatrix {
        StatusMatrix::build(
            &self.active_members,
            &self.active_devices,
            &self.snapshot.trainings,
            self.as_of,
        )
    }

    /// Look up any team member in the snapshot, active or not.
    pub fn member(&self, id: &TeamMemberId) -> Option<&TeamMember> {
        self.snapshot.team_members.iter().find(|m| &m.id == id)
    }

    /// Look up any device in the snapshot, active or not.
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.snapshot.devices.iter().find(|d| &d.id == id)
    }

    fn member_name(&self, id: &TeamMemberId) -> String {
        self.member(id)
            .map(TeamMember::full_name)
            .unwrap_or_else(|| id.to_string())
    }

    fn device_name(&self, id: &DeviceId) -> String {
        self.device(id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Write a report in the configured format: `report` as pretty JSON, or
    /// the text rendering produced by `text`.
    fn emit<T, F>(&self, out: &mut dyn Write, report: &T, text: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, report)
                    .context("failed to serialize report")?;
                writeln!(out)?;
            }
            OutputFormat::Text => text(out)?,
        }
        Ok(())
    }
}
