//! # Practice Snapshot
//!
//! The read-only input of every computation: the practice's devices, team
//! members, and training records as loaded at one moment.
//!
//! A snapshot is never mutated by the engine. Its [`digest`](Snapshot::digest)
//! is a SHA-256 over the canonical serialization, so two snapshots with
//! equal content share a digest regardless of how their source files were
//! formatted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use praxis_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, PraxisError,
    ReferenceDate, ValidationError,
};

use crate::matrix::StatusMatrix;
use crate::membership::MembershipPolicy;
use crate::model::{Device, TeamMember, TrainingRecord};

/// Devices, team members, and training records of one practice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All devices, active or not.
    #[serde(default)]
    pub devices: Vec<Device>,
    /// All team members, active or not.
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    /// All training records, valid or not.
    #[serde(default)]
    pub trainings: Vec<TrainingRecord>,
}

impl Snapshot {
    /// Assemble a snapshot from its collections.
    pub fn new(
        devices: Vec<Device>,
        team_members: Vec<TeamMember>,
        trainings: Vec<TrainingRecord>,
    ) -> Self {
        Self {
            devices,
            team_members,
            trainings,
        }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, PraxisError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a snapshot from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self, PraxisError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read a snapshot file, choosing the parser by extension.
    ///
    /// `.yaml`/`.yml` are parsed as YAML, `.json` as JSON, case-insensitively.
    /// Any other extension is rejected before the file is read.
    pub fn from_path(path: &Path) -> Result<Self, PraxisError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, PraxisError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(ValidationError::UnsupportedSnapshotFormat(
                    path.display().to_string(),
                )
                .into())
            }
        };

        let content = std::fs::read_to_string(path)?;
        parse(&content)
    }

    /// Devices with `is_active == true`, in snapshot order.
    pub fn active_devices(&self) -> Vec<Device> {
        self.devices.iter().filter(|d| d.is_active).cloned().collect()
    }

    /// Team members the policy considers active, in snapshot order.
    pub fn active_members<P>(&self, policy: &P) -> Vec<TeamMember>
    where
        P: MembershipPolicy + ?Sized,
    {
        self.team_members
            .iter()
            .filter(|m| policy.is_active(m))
            .cloned()
            .collect()
    }

    /// Content digest over the canonical serialization of the snapshot.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }

    /// Build the status matrix over the active members and devices.
    pub fn evaluate<P>(&self, policy: &P, as_of: ReferenceDate) -> StatusMatrix
    where
        P: MembershipPolicy + ?Sized,
    {
        let members = self.active_members(policy);
        let devices = self.active_devices();
        tracing::debug!(
            active_members = members.len(),
            active_devices = devices.len(),
            records = self.trainings.len(),
            as_of = %as_of,
            "evaluating snapshot"
        );
        StatusMatrix::build(&members, &devices, &self.trainings, as_of)
    }
}
