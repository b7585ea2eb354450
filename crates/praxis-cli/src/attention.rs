//! # Untrained & Expiring Subcommands
//!
//! The two worklists: who still needs a briefing on a device, and which
//! trainings lapse within the lookahead window.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate};
use praxis_training::{
    expiring_soon, members_requiring_training, resolve_status, ExpiringTraining, TrainingStatus,
    EXPIRY_LOOKAHEAD_DAYS,
};

use crate::Evaluation;

/// Arguments for the `praxis untrained` subcommand.
#[derive(Args, Debug, Clone)]
pub struct UntrainedArgs {
    /// Device id.
    #[arg(long)]
    pub device: String,
}

#[derive(Serialize)]
struct UntrainedEntry<'a> {
    member_id: &'a str,
    name: String,
    status: TrainingStatus,
}

#[derive(Serialize)]
struct UntrainedReport<'a> {
    device_id: &'a DeviceId,
    reference_date: ReferenceDate,
    members: Vec<UntrainedEntry<'a>>,
}

/// Execute the untrained subcommand.
///
/// Fails if the device does not exist or is not active.
pub fn run_untrained(eval: &Evaluation, args: &UntrainedArgs, out: &mut dyn Write) -> Result<u8> {
    let device_id = DeviceId::new(args.device.as_str()).context("invalid --device")?;
    let Some(device) = eval.device(&device_id) else {
        bail!("unknown device: {device_id}");
    };
    if !device.is_active {
        bail!("device {device_id} is not active");
    }

    let records = &eval.snapshot().trainings;
    let members = members_requiring_training(&device_id, eval.active_members(), records, eval.as_of())
        .into_iter()
        .map(|m| UntrainedEntry {
            member_id: m.id.as_str(),
            name: m.full_name(),
            status: resolve_status(&m.id, &device_id, records, eval.as_of()).status,
        })
        .collect();

    let report = UntrainedReport {
        device_id: &device_id,
        reference_date: eval.as_of(),
        members,
    };

    eval.emit(out, &report, |out| {
        writeln!(
            out,
            "{}: {} Mitarbeiter ohne gültige Einweisung (Stand {})",
            device.name,
            report.members.len(),
            report.reference_date
        )?;
        for m in &report.members {
            writeln!(out, "  {:<30} {}", m.name, m.status.label_de())?;
        }
        Ok(())
    })?;
    Ok(0)
}

#[derive(Serialize)]
struct ExpiringReport {
    reference_date: ReferenceDate,
    lookahead_days: u64,
    trainings: Vec<ExpiringTraining>,
}

/// Execute the expiring subcommand.
pub fn run_expiring(eval: &Evaluation, out: &mut dyn Write) -> Result<u8> {
    let matrix = eval.matrix();
    let report = ExpiringReport {
        reference_date: eval.as_of(),
        lookahead_days: EXPIRY_LOOKAHEAD_DAYS,
        trainings: expiring_soon(&matrix),
    };

    eval.emit(out, &report, |out| {
        writeln!(
            out,
            "{} Einweisungen laufen in den nächsten {} Tagen ab (Stand {})",
            report.trainings.len(),
            report.lookahead_days,
            report.reference_date
        )?;
        for t in &report.trainings {
            let when = match t.days_remaining {
                0 => "heute".to_string(),
                1 => "morgen".to_string(),
                n => format!("in {n} Tagen"),
            };
            writeln!(
                out,
                "  {}  {:<14} {:<30} {}",
                t.valid_until,
                when,
                eval.member_name(&t.member_id),
                eval.device_name(&t.device_id)
            )?;
        }
        Ok(())
    })?;
    Ok(0)
}
