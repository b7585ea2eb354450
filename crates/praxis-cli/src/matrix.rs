//! # Matrix Subcommand
//!
//! Prints the full member × device status grid. Text output is a table with
//! one row per active member and one column per active device; JSON output
//! lists every cell with its governing record. Both end with the pairs that
//! need attention (expiring or expired).

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use praxis_core::{DeviceId, ReferenceDate, TeamMemberId};
use praxis_training::{MatrixEntry, PracticeStatistics};

use crate::Evaluation;

#[derive(Serialize)]
struct MatrixReport<'a> {
    reference_date: ReferenceDate,
    members: &'a [TeamMemberId],
    devices: &'a [DeviceId],
    cells: Vec<MatrixEntry<'a>>,
    attention: Vec<MatrixEntry<'a>>,
    statistics: PracticeStatistics,
}

/// Execute the matrix subcommand.
pub fn run_matrix(eval: &Evaluation, out: &mut dyn Write) -> Result<u8> {
    let matrix = eval.matrix();
    let report = MatrixReport {
        reference_date: matrix.reference_date(),
        members: matrix.members(),
        devices: matrix.devices(),
        cells: matrix.entries().collect(),
        attention: matrix.attention_entries(),
        statistics: matrix.statistics(),
    };

    let row_labels: Vec<String> = report.members.iter().map(|m| eval.member_name(m)).collect();
    let col_labels: Vec<String> = report.devices.iter().map(|d| eval.device_name(d)).collect();

    eval.emit(out, &report, |out| {
        if report.members.is_empty() || report.devices.is_empty() {
            writeln!(out, "Keine aktiven Mitarbeiter oder Geräte.")?;
            return Ok(());
        }

        let first_width = row_labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Mitarbeiter".len());
        // Wide enough for the longest status label.
        let widths: Vec<usize> = col_labels
            .iter()
            .map(|l| l.chars().count().max("Nicht eingewiesen".chars().count()))
            .collect();

        write!(out, "{:<first_width$}", "Mitarbeiter")?;
        for (label, &width) in col_labels.iter().zip(&widths) {
            write!(out, "  {label:<width$}")?;
        }
        writeln!(out)?;

        let mut cells = report.cells.iter();
        for row_label in &row_labels {
            write!(out, "{row_label:<first_width$}")?;
            for &width in &widths {
                if let Some(entry) = cells.next() {
                    write!(out, "  {:<width$}", entry.cell.status.label_de())?;
                }
            }
            writeln!(out)?;
        }

        let s = report.statistics;
        writeln!(
            out,
            "\n{} von {} eingewiesen ({}%), {} laufen ab, {} abgelaufen",
            s.trained_combinations, s.total_required, s.completion_rate, s.expiring_count, s.expired_count
        )?;

        if !report.attention.is_empty() {
            writeln!(out, "\nHandlungsbedarf:")?;
            for entry in &report.attention {
                writeln!(
                    out,
                    "  {:<first_width$}  {:<30} {}",
                    eval.member_name(entry.member_id),
                    eval.device_name(entry.device_id),
                    entry.cell.status.label_de()
                )?;
            }
        }
        Ok(())
    })?;
    Ok(0)
}
