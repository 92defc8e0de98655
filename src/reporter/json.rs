use crate::error::Result;
use crate::reporter::ScheduleReport;
use serde::Serialize;

/// Generate the full JSON report of a schedule (entries + cost breakdown).
pub fn generate_json_report(report: &ScheduleReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Summary statistics as JSON, for `--quiet` output.
#[derive(Serialize)]
pub struct JsonSummary {
    pub num_class_groups: usize,
    pub total_cost: f64,
    pub generations_run: u32,
    pub elapsed_ms: u64,
    pub insufficient_teachers: usize,
    pub feasible: bool,
}

pub fn generate_json_summary(report: &ScheduleReport) -> Result<String> {
    let summary = JsonSummary {
        num_class_groups: report.entries.len(),
        total_cost: report.cost.total,
        generations_run: report.generations_run,
        elapsed_ms: report.elapsed_ms,
        insufficient_teachers: report.insufficient_teachers.len(),
        feasible: report.is_feasible(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
