//! # Pair Subcommand
//!
//! Status and full record history of one (team member, device) pair.
//! Works for inactive members and devices as well; the ids only have to
//! exist in the snapshot.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use praxis_core::{DeviceId, TeamMemberId};
use praxis_training::{pair_history, resolve_status, HistoryEntry, PairStatus, RecordExpiry};

use crate::Evaluation;

/// Arguments for the `praxis pair` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    /// Team member id.
    #[arg(long)]
    pub member: String,

    /// Device id.
    #[arg(long)]
    pub device: String,
}

#[derive(Serialize)]
struct PairReport<'a> {
    member_id: &'a TeamMemberId,
    device_id: &'a DeviceId,
    #[serde(flatten)]
    status: PairStatus,
    history: Vec<HistoryEntry>,
}

/// Execute the pair subcommand.
pub fn run_pair(eval: &Evaluation, args: &PairArgs, out: &mut dyn Write) -> Result<u8> {
    let member_id = TeamMemberId::new(args.member.as_str()).context("invalid --member")?;
    let device_id = DeviceId::new(args.device.as_str()).context("invalid --device")?;

    let Some(member) = eval.member(&member_id) else {
        bail!("unknown team member: {member_id}");
    };
    let Some(device) = eval.device(&device_id) else {
        bail!("unknown device: {device_id}");
    };

    let records = &eval.snapshot().trainings;
    let report = PairReport {
        member_id: &member_id,
        device_id: &device_id,
        status: resolve_status(&member_id, &device_id, records, eval.as_of()),
        history: pair_history(&member_id, &device_id, records, eval.as_of()),
    };

    eval.emit(out, &report, |out| {
        writeln!(
            out,
            "{} / {}: {} (Stand {})",
            member.full_name(),
            device.name,
            report.status.status.label_de(),
            eval.as_of()
        )?;
        if report.history.is_empty() {
            writeln!(out, "  keine Einweisungen erfasst")?;
        }
        for entry in &report.history {
            let r = &entry.record;
            let until = r
                .valid_until
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unbefristet".to_string());
            let state = if !r.is_valid {
                "ungültig"
            } else {
                match entry.expiry {
                    RecordExpiry::NoExpiry | RecordExpiry::Valid => "gültig",
                    RecordExpiry::Expiring => "läuft ab",
                    RecordExpiry::Expired => "abgelaufen",
                }
            };
            let marker = if entry.is_governing { "*" } else { " " };
            writeln!(
                out,
                "  {marker} {}  {:<16} bis {:<11} {:<10} [{}]",
                r.training_date,
                r.training_type.label_de(),
                until,
                state,
                r.id
            )?;
        }
        Ok(())
    })?;
    Ok(0)
}
