//! Renders a finished [`crate::search::SearchOutcome`] as JSON, Markdown, or
//! colourised text, plus per-teacher and per-student-group schedule
//! extracts.

mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::catalogue::Catalogue;
use crate::cost::CostBreakdown;
use crate::error::Result;
use crate::search::SearchOutcome;
use crate::types::{CourseId, StudentGroupId, TeacherId};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// One placed class group, joined against the catalogue for display names.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub class_group: u64,
    pub course: String,
    pub is_lab: bool,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub day: i64,
    pub starting_timeslot: i64,
    pub num_timeslots: u32,
}

/// Run bookkeeping not tied to any one class group: when the run happened
/// and which crate version produced it, matching the teacher's own
/// `ScheduleMetadata`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
}

/// A rendering-ready view of a search outcome: the placed entries, the cost
/// breakdown, and the run's bookkeeping (generations, elapsed time, soft
/// teacher-assignment shortfalls).
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub entries: Vec<ScheduleEntry>,
    pub cost: CostBreakdown,
    pub generations_run: u32,
    pub elapsed_ms: u64,
    pub insufficient_teachers: Vec<(String, u64)>,
    pub metadata: ReportMetadata,
}

impl ScheduleReport {
    pub fn is_feasible(&self) -> bool {
        self.cost.hc0_class_double_booking == 0
            && self.cost.hc1_teacher_double_booking == 0
            && self.cost.hc2_student_conflict == 0
    }
}

/// Build a [`ScheduleReport`] from a finished search outcome, joining every
/// class group's first session against the catalogue for names.
pub fn build_report(catalogue: &Catalogue, outcome: &SearchOutcome) -> ScheduleReport {
    let mut entries: Vec<ScheduleEntry> = outcome
        .best
        .class_groups
        .iter()
        .filter_map(|&group| {
            let sessions = outcome.best.sessions_of(group)?;
            let first = sessions.first()?;
            let course = catalogue.course(&first.course);
            Some(ScheduleEntry {
                class_group: group,
                course: first.course.0.clone(),
                is_lab: course.map(|c| c.is_lab).unwrap_or(false),
                teacher: first
                    .teacher
                    .as_ref()
                    .and_then(|t| catalogue.teacher(t))
                    .map(|t| t.id.0.clone()),
                room: first
                    .room
                    .as_ref()
                    .and_then(|r| catalogue.room(r))
                    .map(|r| r.id.0.clone()),
                day: first.day,
                starting_timeslot: first.timeslot,
                num_timeslots: sessions.len() as u32,
            })
        })
        .collect();
    entries.sort_by(|a, b| (a.day, a.starting_timeslot, &a.course).cmp(&(b.day, b.starting_timeslot, &b.course)));

    ScheduleReport {
        entries,
        cost: outcome.best_cost,
        generations_run: outcome.generations_run,
        elapsed_ms: outcome.elapsed.as_millis() as u64,
        insufficient_teachers: outcome
            .teacher_report
            .insufficient
            .iter()
            .map(|(course, group)| (course.0.clone(), *group))
            .collect(),
        metadata: ReportMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

/// Generate all requested report formats and write them to `output_dir`.
pub fn generate_reports(report: &ScheduleReport, output_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(report)?;
                fs::write(output_dir.join("schedule.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(report);
                fs::write(output_dir.join("schedule.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(report);
                fs::write(output_dir.join("schedule.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Every class group taught by `teacher_id`, as a human-readable block.
pub fn generate_teacher_schedule(report: &ScheduleReport, teacher_id: &TeacherId) -> Option<String> {
    let entries: Vec<&ScheduleEntry> = report
        .entries
        .iter()
        .filter(|e| e.teacher.as_deref() == Some(teacher_id.0.as_str()))
        .collect();

    if entries.is_empty() {
        return None;
    }

    let mut lines = vec![format!("# Schedule for {}", teacher_id), String::new()];
    lines.push(format!("## Teaching {} class groups\n", entries.len()));
    for entry in entries {
        lines.push(format!(
            "- **{}**{} — day {}, timeslot {} ({} slots) — room {}",
            entry.course,
            if entry.is_lab { " (Lab)" } else { "" },
            entry.day,
            entry.starting_timeslot,
            entry.num_timeslots,
            entry.room.as_deref().unwrap_or("TBD"),
        ));
    }
    Some(lines.join("\n"))
}

/// Every class group a given student group's courses map onto, based on the
/// catalogue's own `assigned_courses` (and its sub-groups'); this reports
/// what the cohort *should* attend, not a per-student pick (the preprocessor
/// does not retain which replica each simulated student was routed to).
pub fn generate_student_group_schedule(
    report: &ScheduleReport,
    catalogue: &Catalogue,
    group_id: &StudentGroupId,
) -> Option<String> {
    let group = catalogue.student_group(group_id)?;

    let mut courses: std::collections::HashSet<&CourseId> = group.assigned_courses.iter().collect();
    for sub in &group.sub_groups {
        courses.extend(sub.assigned_courses.iter());
    }

    let entries: Vec<&ScheduleEntry> = report
        .entries
        .iter()
        .filter(|e| courses.iter().any(|c| c.0 == e.course))
        .collect();

    let mut lines = vec![format!("# Schedule for {}", group_id), String::new()];
    if entries.is_empty() {
        lines.push("No class groups scheduled for this cohort's courses.".to_string());
    } else {
        for entry in entries {
            lines.push(format!(
                "- **{}**{} — day {}, timeslot {} — teacher {} — room {}",
                entry.course,
                if entry.is_lab { " (Lab)" } else { "" },
                entry.day,
                entry.starting_timeslot,
                entry.teacher.as_deref().unwrap_or("TBD"),
                entry.room.as_deref().unwrap_or("TBD"),
            ));
        }
    }
    Some(lines.join("\n"))
}
