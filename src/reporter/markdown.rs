use crate::reporter::ScheduleReport;

/// Generate a markdown report of the schedule.
pub fn generate_markdown_report(report: &ScheduleReport) -> String {
    let mut lines = vec![
        "# Schedule Report".to_string(),
        String::new(),
        format!("Generated: {} (v{})", report.metadata.generated_at, report.metadata.algorithm_version),
        format!("Generations run: {}", report.generations_run),
        format!("Elapsed: {}ms", report.elapsed_ms),
        String::new(),
    ];

    lines.push("## Cost Breakdown\n".to_string());
    lines.push("| Metric | Count |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| HC0 class double-booking | {} |", report.cost.hc0_class_double_booking));
    lines.push(format!("| HC1 teacher double-booking | {} |", report.cost.hc1_teacher_double_booking));
    lines.push(format!("| HC2 student conflict | {} |", report.cost.hc2_student_conflict));
    lines.push(format!("| SC0 teacher unpreferred timeslot | {} |", report.cost.sc0_teacher_unpreferred));
    lines.push(format!("| SC1 discouraged timeslot | {} |", report.cost.sc1_discouraged_timeslot));
    lines.push(format!("| SC2 teacher load cap (informational) | {:.1} |", report.cost.sc2_teacher_load_cap));
    lines.push(format!("| **Total cost** | **{:.1}** |", report.cost.total));
    lines.push(String::new());

    if !report.insufficient_teachers.is_empty() {
        lines.push("## Insufficient Teachers\n".to_string());
        for (course, group) in &report.insufficient_teachers {
            lines.push(format!("- class group {group} of course '{course}' has no eligible teacher"));
        }
        lines.push(String::new());
    }

    lines.push("## Class Groups\n".to_string());
    lines.push("| Course | Day | Timeslot | Length | Teacher | Room |".to_string());
    lines.push("|--------|-----|----------|--------|---------|------|".to_string());
    for entry in &report.entries {
        let name = if entry.is_lab {
            format!("{} (Lab)", entry.course)
        } else {
            entry.course.clone()
        };
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            name,
            entry.day,
            entry.starting_timeslot,
            entry.num_timeslots,
            entry.teacher.as_deref().unwrap_or("TBD"),
            entry.room.as_deref().unwrap_or("TBD"),
        ));
    }

    lines.join("\n")
}
