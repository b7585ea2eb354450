//! # Stats Subcommand
//!
//! Practice-wide training coverage, as shown on the dashboard's stat cards.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use praxis_core::ReferenceDate;
use praxis_training::PracticeStatistics;

use crate::Evaluation;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    reference_date: ReferenceDate,
    #[serde(flatten)]
    statistics: PracticeStatistics,
    excluded_records: usize,
}

/// Execute the stats subcommand.
pub fn run_stats(eval: &Evaluation, out: &mut dyn Write) -> Result<u8> {
    let matrix = eval.matrix();
    let report = StatsReport {
        reference_date: eval.as_of(),
        statistics: matrix.statistics(),
        excluded_records: matrix.excluded_records(),
    };
    let s = report.statistics;

    eval.emit(out, &report, |out| {
        writeln!(out, "Einweisungen zum {}", report.reference_date)?;
        writeln!(out, "  Geräte (aktiv):          {}", s.total_devices)?;
        writeln!(out, "  Mitarbeiter (aktiv):     {}", s.total_members)?;
        writeln!(out, "  Erforderlich:            {}", s.total_required)?;
        writeln!(out, "  Eingewiesen:             {}", s.trained_combinations)?;
        writeln!(out, "  Läuft ab (30 Tage):      {}", s.expiring_count)?;
        writeln!(out, "  Abgelaufen:              {}", s.expired_count)?;
        writeln!(out, "  Erfüllungsgrad:          {}%", s.completion_rate)?;
        Ok(())
    })?;
    Ok(0)
}
