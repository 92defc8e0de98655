use crate::reporter::ScheduleReport;
use colored::Colorize;
use std::collections::HashMap;

/// Generate a plain text report (with colors for terminal).
pub fn generate_text_report(report: &ScheduleReport) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               SCHEDULE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generations run: {}", report.generations_run));
    lines.push(format!("Elapsed:         {}ms", report.elapsed_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("COST BREAKDOWN".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  HC0 class double-booking:     {}", report.cost.hc0_class_double_booking));
    lines.push(format!("  HC1 teacher double-booking:   {}", report.cost.hc1_teacher_double_booking));
    lines.push(format!("  HC2 student conflict:         {}", report.cost.hc2_student_conflict));
    lines.push(format!("  SC0 teacher unpreferred:      {}", report.cost.sc0_teacher_unpreferred));
    lines.push(format!("  SC1 discouraged timeslot:     {}", report.cost.sc1_discouraged_timeslot));
    lines.push(format!("  Total cost:                   {:.1}", report.cost.total));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if report.is_feasible() {
        lines.push("FEASIBLE: all hard constraints satisfied".green().to_string());
    } else {
        lines.push("INFEASIBLE: hard constraint violations remain".red().to_string());
    }
    if !report.insufficient_teachers.is_empty() {
        lines.push(format!(
            "  ! {} class group(s) could not be given a teacher",
            report.insufficient_teachers.len()
        ).yellow().to_string());
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    lines.push("CLASS GROUPS".to_string());
    lines.push("─".repeat(40));

    let mut by_day: HashMap<i64, Vec<&crate::reporter::ScheduleEntry>> = HashMap::new();
    for entry in &report.entries {
        by_day.entry(entry.day).or_default().push(entry);
    }
    let mut days: Vec<_> = by_day.keys().copied().collect();
    days.sort();

    for day in days {
        let entries = &by_day[&day];
        lines.push(format!("\n{}", format!("Day {day}").bold()));
        for entry in entries.iter() {
            let name = if entry.is_lab {
                format!("{} (Lab)", entry.course)
            } else {
                entry.course.clone()
            };
            lines.push(format!(
                "  ts {} | {} | {} | room {}",
                entry.starting_timeslot,
                name,
                entry.teacher.as_deref().unwrap_or("TBD"),
                entry.room.as_deref().unwrap_or("TBD").dimmed(),
            ));
        }
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout.
pub fn print_summary(report: &ScheduleReport) {
    println!();
    if report.is_feasible() {
        println!("{}", "✓ Schedule generated successfully".green().bold());
    } else {
        println!("{}", "✗ Schedule has hard constraint violations".red().bold());
    }
    println!();
    println!("  Class groups:   {}", report.entries.len());
    println!("  Total cost:     {:.1}", report.cost.total);
    println!(
        "  Insufficient teachers: {}",
        report.insufficient_teachers.len()
    );
    println!("  Generations:    {}", report.generations_run);
    println!("  Time:           {}ms", report.elapsed_ms);
    println!();
}
