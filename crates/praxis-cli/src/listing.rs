//! # Members & Devices Subcommands
//!
//! Filtered list views. Each entry carries its training summary and
//! completion percentage; the status filter is applied to that summary.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use praxis_training::{
    filter_devices, filter_members, StatusFilter, StatusMatrix, TrainingSummary,
};

use crate::Evaluation;

/// Arguments shared by `praxis members` and `praxis devices`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive substring of the name.
    #[arg(long, short, default_value = "")]
    pub query: String,

    /// Status filter: all, trained, untrained, expiring, expired.
    #[arg(long, short, default_value = "all")]
    pub status: StatusFilter,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    id: &'a str,
    name: String,
    #[serde(flatten)]
    summary: TrainingSummary,
    completion_percent: u32,
}

#[derive(Serialize)]
struct ListReport<'a> {
    query: &'a str,
    status: StatusFilter,
    entries: Vec<ListEntry<'a>>,
}

/// Execute the members subcommand.
pub fn run_members(eval: &Evaluation, args: &ListArgs, out: &mut dyn Write) -> Result<u8> {
    let matrix = eval.matrix();
    let hits = filter_members(eval.active_members(), &args.query, args.status, |m| {
        row_summary(&matrix, &m.id)
    });
    let entries = hits
        .into_iter()
        .map(|m| entry(m.id.as_str(), m.full_name(), row_summary(&matrix, &m.id)))
        .collect();
    write_list(eval, args, entries, "Mitarbeiter", out)
}

/// Execute the devices subcommand.
pub fn run_devices(eval: &Evaluation, args: &ListArgs, out: &mut dyn Write) -> Result<u8> {
    let matrix = eval.matrix();
    let hits = filter_devices(eval.active_devices(), &args.query, args.status, |d| {
        column_summary(&matrix, &d.id)
    });
    let entries = hits
        .into_iter()
        .map(|d| entry(d.id.as_str(), d.name.clone(), column_summary(&matrix, &d.id)))
        .collect();
    write_list(eval, args, entries, "Geräte", out)
}

fn row_summary(matrix: &StatusMatrix, id: &praxis_core::TeamMemberId) -> TrainingSummary {
    matrix.member_summary(id).unwrap_or_default()
}

fn column_summary(matrix: &StatusMatrix, id: &praxis_core::DeviceId) -> TrainingSummary {
    matrix.device_summary(id).unwrap_or_default()
}

fn entry(id: &str, name: String, summary: TrainingSummary) -> ListEntry<'_> {
    ListEntry {
        id,
        name,
        summary,
        completion_percent: summary.completion_percent(),
    }
}

fn write_list(
    eval: &Evaluation,
    args: &ListArgs,
    entries: Vec<ListEntry<'_>>,
    heading: &str,
    out: &mut dyn Write,
) -> Result<u8> {
    let report = ListReport {
        query: &args.query,
        status: args.status,
        entries,
    };

    eval.emit(out, &report, |out| {
        writeln!(
            out,
            "{heading} ({} Treffer, Filter: {}, Stand {})",
            report.entries.len(),
            report.status,
            eval.as_of()
        )?;
        for e in &report.entries {
            let s = &e.summary;
            writeln!(
                out,
                "  {:<30} {:>3}%  {}/{} eingewiesen, {} läuft ab, {} abgelaufen, {} fehlt",
                e.name, e.completion_percent, s.trained, s.total, s.expiring, s.expired, s.untrained
            )?;
        }
        Ok(())
    })?;
    Ok(0)
}
