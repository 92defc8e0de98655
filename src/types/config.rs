use serde::{Deserialize, Serialize};

/// Tournament-selection direction for the evolutionary search. The source
/// this crate reproduces picks the *highest*-cost contender, an inversion
/// of the textbook tournament; `WorstWins` keeps that behaviour faithfully,
/// `BestWins` is the declared, configurable alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentDirection {
    WorstWins,
    BestWins,
}

impl Default for TournamentDirection {
    fn default() -> Self {
        TournamentDirection::WorstWins
    }
}

/// Governs the redraw condition used by the `SimpleMove` mutator. The
/// source redraws while `new_day == prev_day || new_timeslot == prev_timeslot`,
/// an OR that also redraws when only one axis actually changed;
/// `BothAxes` reproduces that literally, `EitherAxis` is the declared
/// alternative that accepts a move as soon as either axis differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDifference {
    BothAxes,
    EitherAxis,
}

impl Default for MoveDifference {
    fn default() -> Self {
        MoveDifference::BothAxes
    }
}

/// Resolved, validated configuration for one scheduling run. Loaded from
/// `app.config` (TOML); every field here corresponds to a required key —
/// a missing or mistyped key is a fatal `ConfigMissing` at load time, not a
/// deferred runtime lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub semester: u32,
    pub num_unique_days: u32,
    pub days_with_double_timeslots: Vec<u32>,
    pub num_timeslots: u32,
    pub max_lecture_capacity: u32,
    pub max_lab_capacity: u32,
    pub max_annual_teacher_load: f64,
    pub max_semestral_teacher_load: f64,
    pub num_generations: u32,
    pub num_offsprings_per_generation: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub tournament_direction: TournamentDirection,
    #[serde(default)]
    pub move_difference: MoveDifference,
}

fn default_seed() -> u64 {
    0xC0FFEE
}

impl SchedulerConfig {
    pub fn is_double_timeslot_day(&self, day: u32) -> bool {
        self.days_with_double_timeslots.contains(&day)
    }
}

/// The fixed set of discouraged timeslots used by SC1: slots representing
/// 7-8 AM, 11:30 AM-1 PM, and 5:30-7 PM in the half-hour slotting this
/// project assumes.
pub const DISCOURAGED_TIMESLOTS: [u32; 8] = [0, 1, 9, 10, 11, 21, 22, 23];

#[cfg(test)]
impl SchedulerConfig {
    /// A small, self-consistent configuration for unit tests across the
    /// preprocessor, teacher assigner, solution model, and search modules.
    pub(crate) fn for_test() -> Self {
        SchedulerConfig {
            semester: 1,
            num_unique_days: 6,
            days_with_double_timeslots: vec![1],
            num_timeslots: 24,
            max_lecture_capacity: 40,
            max_lab_capacity: 25,
            max_annual_teacher_load: 24.0,
            max_semestral_teacher_load: 12.0,
            num_generations: 50,
            num_offsprings_per_generation: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.3,
            seed: 42,
            tournament_direction: TournamentDirection::WorstWins,
            move_difference: MoveDifference::BothAxes,
        }
    }
}
