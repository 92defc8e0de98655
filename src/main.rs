use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use school_scheduler::catalogue::Catalogue;
use school_scheduler::parser::validate_catalogue;
use school_scheduler::reporter::{
    build_report, generate_json_summary, generate_reports, generate_student_group_schedule,
    generate_teacher_schedule, print_summary, OutputFormat, ScheduleReport,
};
use school_scheduler::search::find_best_solution_with_progress;
use school_scheduler::types::{StudentGroupId, TeacherId};
use school_scheduler::{preprocessor, Result as SchedulerResult};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "school-scheduler")]
#[command(about = "University course timetabling generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run against the bundled demo catalogue
    Demo {
        /// Output directory for schedule files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },

    /// Generate a schedule from catalogue data
    Schedule {
        /// Directory containing the catalogue JSON files
        #[arg(short, long, default_value = "./data")]
        data: PathBuf,

        /// Path to the TOML application config
        #[arg(short, long, default_value = "./config/app.config")]
        config: PathBuf,

        /// Output directory for schedule files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-render a previously generated schedule.json without re-solving
    Report {
        /// Path to schedule.json written by `schedule`
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing the catalogue JSON files (needed to resolve names)
        #[arg(short, long, default_value = "./data")]
        data: PathBuf,

        /// Path to the TOML application config
        #[arg(short, long, default_value = "./config/app.config")]
        config: PathBuf,

        /// Render the schedule for a specific teacher
        #[arg(long)]
        teacher: Option<String>,

        /// Render the schedule for a specific student group id
        #[arg(long)]
        student_group: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { output } => run_demo(&output),
        Commands::Schedule {
            data,
            config,
            output,
            format,
            quiet,
        } => run_schedule(&data, &config, &output, &format, quiet),
        Commands::Report {
            schedule,
            data,
            config,
            teacher,
            student_group,
        } => run_report(&schedule, &data, &config, teacher, student_group),
    }
}

fn run_demo(output: &PathBuf) -> Result<()> {
    println!("{}", "School Scheduler Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_dir = PathBuf::from("demos/small_university");
    if !demo_dir.join("courses.json").exists() {
        println!("{}", "Demo data not found. Creating sample catalogue...".yellow());
        create_demo_data(&demo_dir)?;
    }

    run_schedule(&demo_dir, &demo_dir.join("app.config"), output, "all", false)
}

fn run_schedule(data: &PathBuf, config: &PathBuf, output: &PathBuf, format: &str, quiet: bool) -> Result<()> {
    let catalogue = Catalogue::load(data, config).context("failed to load catalogue")?;

    if !quiet {
        let validation = validate_catalogue(&catalogue);
        for warning in &validation.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} divisions, {} courses, {} teachers, {} rooms, {} student groups",
            catalogue.divisions.len(),
            catalogue.courses.len(),
            catalogue.teachers.len(),
            catalogue.rooms.len(),
            catalogue.student_groups.len(),
        );
        println!("\nPreprocessing enrolment and running evolutionary search...\n");
    }

    let report = solve(&catalogue, quiet)?;

    let formats = parse_formats(format);
    generate_reports(&report, output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary(&report)?);
    } else {
        print_summary(&report);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn solve(catalogue: &Catalogue, quiet: bool) -> SchedulerResult<ScheduleReport> {
    let preprocessed = preprocessor::preprocess(catalogue)?;
    let outcome = find_best_solution_with_progress(catalogue, &preprocessed, quiet)?;
    Ok(build_report(catalogue, &outcome))
}

fn run_report(
    schedule_path: &PathBuf,
    data: &PathBuf,
    config: &PathBuf,
    teacher: Option<String>,
    student_group: Option<String>,
) -> Result<()> {
    let content = std::fs::read_to_string(schedule_path)
        .with_context(|| format!("failed to read {}", schedule_path.display()))?;
    let report: ScheduleReport = serde_json::from_str(&content)?;

    if let Some(name) = teacher {
        let id = TeacherId(name);
        match generate_teacher_schedule(&report, &id) {
            Some(text) => println!("{text}"),
            None => println!("Teacher has no assigned class groups"),
        }
    } else if let Some(group_id) = student_group {
        let catalogue = Catalogue::load(data, config).context("failed to load catalogue")?;
        let id = StudentGroupId(group_id);
        match generate_student_group_schedule(&report, &catalogue, &id) {
            Some(text) => println!("{text}"),
            None => println!("Student group not found"),
        }
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

/// Writes a small, self-consistent demo catalogue: one division, two
/// courses (one lab-bearing), two teachers, two rooms, and a regular
/// student group with a GE sub-group — enough to exercise every
/// preprocessor and search code path without a real institution's data.
fn create_demo_data(dir: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    std::fs::write(
        dir.join("room_features.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {"name": "lab_bench"},
            {"name": "projector"}
        ]))?,
    )?;

    std::fs::write(
        dir.join("divisions.json"),
        serde_json::to_string_pretty(&serde_json::json!([{"name": "College of Science"}]))?,
    )?;

    std::fs::write(
        dir.join("teachers.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {"name": "Dr. Santos", "previous_load": 6.0, "unpreferred_timeslots": [{"day": 0, "timeslot": 0}]},
            {"name": "Dr. Reyes", "previous_load": 3.0, "unpreferred_timeslots": []}
        ]))?,
    )?;

    std::fs::write(
        dir.join("rooms.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {"name": "Room 101", "capacity": 40, "division": "College of Science", "features": []},
            {"name": "Bio Lab", "capacity": 25, "division": "College of Science", "features": ["lab_bench"]}
        ]))?,
    )?;

    std::fs::write(
        dir.join("courses.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {
                "course_name": "Biology 101",
                "division": "College of Science",
                "has_lab": true,
                "num_timeslots": 2,
                "num_lab_timeslots": 3,
                "num_units": 3.0,
                "num_lab_units": 1.0,
                "prerequisites": [],
                "candidate_teachers": ["Dr. Santos", "Dr. Reyes"],
                "room_requirements": [],
                "lab_requirements": ["lab_bench"]
            },
            {
                "course_name": "Calculus 1",
                "division": "College of Science",
                "has_lab": false,
                "num_timeslots": 2,
                "num_units": 3.0,
                "prerequisites": [],
                "candidate_teachers": ["Dr. Reyes"],
                "room_requirements": []
            }
        ]))?,
    )?;

    std::fs::write(
        dir.join("study_plans.json"),
        serde_json::to_string_pretty(&serde_json::json!({
            "divisions": [{
                "name": "College of Science",
                "degrees": [{
                    "name": "BS Biology",
                    "plans": [{
                        "year_level": 1,
                        "semester": 1,
                        "courses": ["Biology 101", "Calculus 1"]
                    }]
                }]
            }]
        }))?,
    )?;

    std::fs::write(
        dir.join("student_groups.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {"degree_name": "BS Biology", "year_level": 1, "num_members": 45}
        ]))?,
    )?;

    std::fs::write(
        dir.join("regular_student_ges_electives.json"),
        serde_json::to_string_pretty(&serde_json::json!([
            {"degree_name": "BS Biology", "year_level": 1, "num_members": 5, "courses": []}
        ]))?,
    )?;

    std::fs::write(
        dir.join("irregular_student_groups.json"),
        serde_json::to_string_pretty(&serde_json::json!([]))?,
    )?;

    std::fs::write(
        dir.join("app.config"),
        r#"semester = 1
num_unique_days = 5
days_with_double_timeslots = [2]
num_timeslots = 20
max_lecture_capacity = 40
max_lab_capacity = 25
max_annual_teacher_load = 24.0
max_semestral_teacher_load = 12.0
num_generations = 200
num_offsprings_per_generation = 30
crossover_rate = 0.8
mutation_rate = 0.3
seed = 42
"#,
    )?;

    println!("{}", "Demo catalogue created successfully!".green());
    Ok(())
}
