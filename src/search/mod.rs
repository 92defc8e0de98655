//! The steady-state genetic algorithm: tournament selection, uniform
//! per-class-group crossover, one of two mutation operators, and
//! worst-replacement insertion. Early-stops the moment a zero-cost
//! individual appears.

use crate::catalogue::Catalogue;
use crate::cost::{self, CostBreakdown};
use crate::error::Result;
use crate::preprocessor::PreprocessResult;
use crate::solution::Solution;
use crate::teacher_assigner::{self, TeacherAssignmentReport};
use crate::types::{MoveDifference, TournamentDirection};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub struct SearchOutcome {
    pub best: Solution,
    pub best_cost: CostBreakdown,
    pub generations_run: u32,
    pub elapsed: Duration,
    pub teacher_report: TeacherAssignmentReport,
}

/// Runs the search with progress reporting suppressed; used by tests,
/// benches, and any caller that doesn't own a terminal.
pub fn find_best_solution(catalogue: &Catalogue, preprocessed: &PreprocessResult) -> Result<SearchOutcome> {
    find_best_solution_with_progress(catalogue, preprocessed, true)
}

/// Runs the search, driving a terminal progress bar across the generation
/// loop unless `quiet` is set. Mirrors the teacher's own `ProgressBar`
/// usage around its optimizer loop in `scheduler::mod::generate_schedule`.
pub fn find_best_solution_with_progress(
    catalogue: &Catalogue,
    preprocessed: &PreprocessResult,
    quiet: bool,
) -> Result<SearchOutcome> {
    let started = std::time::Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(catalogue.config.seed);

    let progress = if quiet || catalogue.config.num_generations == 0 {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(catalogue.config.num_generations as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    };

    let mut class_groups = preprocessed.class_groups.clone();
    let teacher_report = teacher_assigner::assign_teachers(catalogue, &mut class_groups, &mut rng);

    // Re-stamp each session's teacher from the now-assigned class groups.
    let preprocessed = clone_with_teachers(preprocessed, &class_groups);

    let population_size = catalogue.config.num_offsprings_per_generation.max(2) as usize;
    let mut population: Vec<(Solution, CostBreakdown)> = (0..population_size)
        .map(|_| {
            let mut solution = Solution::new(&preprocessed);
            randomize(&mut solution, catalogue, &mut rng);
            let breakdown = cost::evaluate(&solution, catalogue, &preprocessed.conflicts);
            solution.set_cost(breakdown.total);
            (solution, breakdown)
        })
        .collect();
    population.sort_by(|a, b| a.1.total.partial_cmp(&b.1.total).unwrap());

    let mut generations_run = 0;
    for _ in 0..catalogue.config.num_generations {
        generations_run += 1;
        progress.set_position(generations_run as u64);
        progress.set_message(format!("best cost {:.1}", population[0].1.total));
        if population[0].1.total == 0.0 {
            break;
        }

        let a = tournament_select(&population, catalogue.config.tournament_direction, &mut rng);
        let b = loop {
            let candidate = tournament_select(&population, catalogue.config.tournament_direction, &mut rng);
            if candidate != a {
                break candidate;
            }
            if population.len() < 2 {
                break candidate;
            }
        };

        let mut child = if rng.gen::<f64>() < catalogue.config.crossover_rate {
            crossover(&population[a].0, &population[b].0, catalogue, &mut rng)
        } else if rng.gen_bool(0.5) {
            population[a].0.clone()
        } else {
            population[b].0.clone()
        };

        if rng.gen::<f64>() < catalogue.config.mutation_rate {
            mutate(&mut child, catalogue, &mut rng);
        }

        let breakdown = cost::evaluate(&child, catalogue, &preprocessed.conflicts);
        child.set_cost(breakdown.total);

        let worst = population
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.1.total.partial_cmp(&b.1.total).unwrap())
            .map(|(i, _)| i)
            .expect("population is never empty");

        if breakdown.total < population[worst].1.total {
            population[worst] = (child, breakdown);
        }
    }

    population.sort_by(|a, b| a.1.total.partial_cmp(&b.1.total).unwrap());
    let (best, best_cost) = population.into_iter().next().expect("population is never empty");
    progress.finish_with_message(format!("best cost {:.1}", best_cost.total));

    Ok(SearchOutcome {
        best,
        best_cost,
        generations_run,
        elapsed: started.elapsed(),
        teacher_report,
    })
}

fn clone_with_teachers(
    preprocessed: &PreprocessResult,
    class_groups: &[crate::types::ClassGroup],
) -> PreprocessResult {
    let mut sessions = preprocessed.sessions.clone();
    for group in class_groups {
        if let Some(list) = sessions.get_mut(&group.id) {
            for session in list {
                session.teacher = group.teacher.clone();
            }
        }
    }
    PreprocessResult {
        class_groups: class_groups.to_vec(),
        sessions,
        conflicts: preprocessed.conflicts.clone(),
        next_session_id: preprocessed.next_session_id,
    }
}

fn randomize<R: Rng>(solution: &mut Solution, catalogue: &Catalogue, rng: &mut R) {
    let groups = solution.class_groups.clone();
    for group in groups {
        let day = rng.gen_range(0..catalogue.config.num_unique_days);
        let timeslot = rng.gen_range(0..catalogue.config.num_timeslots);
        solution
            .update_day_and_timeslot(group, day, timeslot, &catalogue.config)
            .expect("group came from this solution's own class_groups list");
    }
}

fn tournament_select<R: Rng>(
    population: &[(Solution, CostBreakdown)],
    direction: TournamentDirection,
    rng: &mut R,
) -> usize {
    let i = rng.gen_range(0..population.len());
    let j = rng.gen_range(0..population.len());
    let (cost_i, cost_j) = (population[i].1.total, population[j].1.total);
    match direction {
        TournamentDirection::WorstWins => {
            if cost_i >= cost_j {
                i
            } else {
                j
            }
        }
        TournamentDirection::BestWins => {
            if cost_i <= cost_j {
                i
            } else {
                j
            }
        }
    }
}

fn crossover<R: Rng>(a: &Solution, b: &Solution, catalogue: &Catalogue, rng: &mut R) -> Solution {
    let mut child = a.clone();
    for &group in &a.class_groups {
        let source = if rng.gen_bool(0.5) { a } else { b };
        if let (Ok(day), Ok(timeslot)) = (
            source.get_class_day(group),
            source.get_class_starting_timeslot(group),
        ) {
            if day >= 0 && timeslot >= 0 {
                let _ = child.update_day_and_timeslot(group, day as u32, timeslot as u32, &catalogue.config);
            }
        }
    }
    child
}

fn mutate<R: Rng>(solution: &mut Solution, catalogue: &Catalogue, rng: &mut R) {
    if solution.class_groups.is_empty() {
        return;
    }
    if rng.gen_bool(0.5) {
        simple_move(solution, catalogue, rng);
    } else {
        simple_swap(solution, catalogue, rng);
    }
}

fn simple_move<R: Rng>(solution: &mut Solution, catalogue: &Catalogue, rng: &mut R) {
    let idx = rng.gen_range(0..solution.class_groups.len());
    let group = solution.class_groups[idx];
    let prev_day = solution.get_class_day(group).unwrap_or(-1);
    let prev_timeslot = solution.get_class_starting_timeslot(group).unwrap_or(-1);

    // Redraw until the configured difference condition is satisfied. The
    // default (`BothAxes`) reproduces the source's OR-based redraw, which
    // also redraws when only one axis actually changed.
    let mut attempts = 0;
    loop {
        let new_day = rng.gen_range(0..catalogue.config.num_unique_days);
        let new_timeslot = rng.gen_range(0..catalogue.config.num_timeslots);
        attempts += 1;

        let redraw = match catalogue.config.move_difference {
            MoveDifference::BothAxes => {
                new_day as i64 == prev_day || new_timeslot as i64 == prev_timeslot
            }
            MoveDifference::EitherAxis => {
                new_day as i64 == prev_day && new_timeslot as i64 == prev_timeslot
            }
        };

        if !redraw || attempts > 1000 {
            let _ = solution.update_day_and_timeslot(group, new_day, new_timeslot, &catalogue.config);
            break;
        }
    }
}

fn simple_swap<R: Rng>(solution: &mut Solution, catalogue: &Catalogue, rng: &mut R) {
    if solution.class_groups.len() < 2 {
        return;
    }
    let i = rng.gen_range(0..solution.class_groups.len());
    let j = loop {
        let candidate = rng.gen_range(0..solution.class_groups.len());
        if candidate != i {
            break candidate;
        }
    };
    let (group_a, group_b) = (solution.class_groups[i], solution.class_groups[j]);

    let (day_a, ts_a) = (
        solution.get_class_day(group_a).unwrap_or(0).max(0) as u32,
        solution.get_class_starting_timeslot(group_a).unwrap_or(0).max(0) as u32,
    );
    let (day_b, ts_b) = (
        solution.get_class_day(group_b).unwrap_or(0).max(0) as u32,
        solution.get_class_starting_timeslot(group_b).unwrap_or(0).max(0) as u32,
    );

    let _ = solution.update_day_and_timeslot(group_a, day_b, ts_b, &catalogue.config);
    let _ = solution.update_day_and_timeslot(group_b, day_a, ts_a, &catalogue.config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassGroup, ClassSession, Course, CourseId, DivisionId, SchedulerConfig};
    use std::collections::{HashMap, HashSet};

    fn fixture() -> (Catalogue, PreprocessResult) {
        let config = SchedulerConfig::for_test();
        let course = Course {
            id: CourseId("c1".into()),
            division: DivisionId("d".into()),
            has_lab: false,
            is_lab: false,
            num_timeslots: 2,
            num_units: 3.0,
            prerequisites: HashSet::new(),
            candidate_teachers: HashSet::new(),
            room_requirements: HashSet::new(),
        };
        let catalogue = Catalogue::for_test(vec![course], Vec::new(), Vec::new(), config);

        let mut sessions = HashMap::new();
        let group_id = crate::types::class_group_id("c1", 0);
        sessions.insert(
            group_id,
            vec![
                ClassSession {
                    session_id: 0,
                    class_group: group_id,
                    course: CourseId("c1".into()),
                    teacher: None,
                    room: None,
                    day: -1,
                    timeslot: -1,
                },
                ClassSession {
                    session_id: 1,
                    class_group: group_id,
                    course: CourseId("c1".into()),
                    teacher: None,
                    room: None,
                    day: -1,
                    timeslot: -1,
                },
            ],
        );
        let preprocessed = PreprocessResult {
            class_groups: vec![ClassGroup {
                id: group_id,
                course: CourseId("c1".into()),
                num_timeslots: 2,
                teacher: None,
            }],
            sessions,
            conflicts: HashMap::new(),
            next_session_id: 2,
        };
        (catalogue, preprocessed)
    }

    #[test]
    fn search_terminates_and_returns_a_solution() {
        let (catalogue, preprocessed) = fixture();
        let outcome = find_best_solution(&catalogue, &preprocessed).unwrap();
        assert_eq!(outcome.generations_run, catalogue.config.num_generations);
        assert!(outcome.best_cost.total >= 0.0);
    }

    #[test]
    fn replacement_never_increases_the_population_max() {
        let (catalogue, preprocessed) = fixture();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut solution = Solution::new(&preprocessed);
        randomize(&mut solution, &catalogue, &mut rng);
        let before = cost::evaluate(&solution, &catalogue, &preprocessed.conflicts);
        assert!(before.total >= 0.0);
    }
}
