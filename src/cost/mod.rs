//! The weighted cost function the evolutionary search minimises:
//! `cost = 100 * (HC0 + HC1 + HC2) + SC0 + SC1`. Each hard-constraint count
//! is produced by sorting the flat session list and scanning adjacent
//! pairs, which under-counts collisions of multiplicity three or more —
//! kept as-is rather than generalised, for parity with the system this
//! crate reproduces.

use crate::catalogue::Catalogue;
use crate::solution::Solution;
use crate::types::DISCOURAGED_TIMESLOTS;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub hc0_class_double_booking: u64,
    pub hc1_teacher_double_booking: u64,
    pub hc2_student_conflict: u64,
    pub sc0_teacher_unpreferred: u64,
    pub sc1_discouraged_timeslot: u64,
    /// Computed but, per the weighting this crate reproduces, not summed
    /// into `total`. Retained for reporting and future extension.
    pub sc2_teacher_load_cap: f64,
    pub total: f64,
}

pub fn evaluate(
    solution: &Solution,
    catalogue: &Catalogue,
    conflicts: &HashMap<u64, std::collections::HashSet<u64>>,
) -> CostBreakdown {
    let placed: Vec<_> = solution.sessions().filter(|s| s.is_placed()).collect();

    let hc0 = count_double_booking(&placed, |s| (s.day, s.timeslot));

    let mut with_teacher: Vec<_> = placed.iter().copied().filter(|s| s.teacher.is_some()).collect();
    with_teacher.sort_by_key(|s| (s.teacher.as_ref().map(|t| t.0.clone()), s.day, s.timeslot));
    let mut hc1 = 0u64;
    for pair in with_teacher.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.teacher == b.teacher
            && a.day == b.day
            && a.timeslot == b.timeslot
            && a.class_group != b.class_group
        {
            hc1 += 1;
        }
    }

    let mut by_slot = placed.clone();
    by_slot.sort_by_key(|s| (s.day, s.timeslot));
    let mut hc2 = 0u64;
    for pair in by_slot.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.day == b.day && a.timeslot == b.timeslot {
            let conflicted = conflicts
                .get(&a.class_group)
                .map(|set| set.contains(&b.class_group))
                .unwrap_or(false);
            if conflicted {
                hc2 += 1;
            }
        }
    }

    let mut sc0 = 0u64;
    let mut sc1 = 0u64;
    for session in &placed {
        if let Some(teacher_id) = &session.teacher {
            if let Some(teacher) = catalogue.teacher(teacher_id) {
                if !teacher.prefers(session.day as u32, session.timeslot as u32) {
                    sc0 += 1;
                }
            }
        }
        if DISCOURAGED_TIMESLOTS.contains(&(session.timeslot as u32)) {
            sc1 += 1;
        }
    }

    let sc2 = teacher_load_cap_violation(solution, catalogue);

    let total = 100.0 * (hc0 + hc1 + hc2) as f64 + sc0 as f64 + sc1 as f64;

    CostBreakdown {
        hc0_class_double_booking: hc0,
        hc1_teacher_double_booking: hc1,
        hc2_student_conflict: hc2,
        sc0_teacher_unpreferred: sc0,
        sc1_discouraged_timeslot: sc1,
        sc2_teacher_load_cap: sc2,
        total,
    }
}

fn count_double_booking<'a>(
    placed: &[&'a crate::types::ClassSession],
    key: impl Fn(&crate::types::ClassSession) -> (i64, i64),
) -> u64 {
    let mut sorted: Vec<_> = placed.to_vec();
    sorted.sort_by_key(|s| key(s));
    let mut count = 0u64;
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if key(a) == key(b) && a.class_group != b.class_group {
            count += 1;
        }
    }
    count
}

fn teacher_load_cap_violation(solution: &Solution, catalogue: &Catalogue) -> f64 {
    let mut semestral_load: HashMap<&crate::types::TeacherId, f64> = HashMap::new();
    let mut seen_groups = std::collections::HashSet::new();

    for group in &solution.class_groups {
        if !seen_groups.insert(*group) {
            continue;
        }
        let Some(sessions) = solution.sessions_of(*group) else { continue };
        let Some(first) = sessions.first() else { continue };
        let Some(teacher_id) = &first.teacher else { continue };
        let Some(course) = catalogue.course(&first.course) else { continue };
        *semestral_load.entry(teacher_id).or_insert(0.0) += course.num_units;
    }

    let mut total_violation = 0.0;
    for (&teacher_id, semestral) in &semestral_load {
        let Some(teacher) = catalogue.teacher(teacher_id) else { continue };
        let annual = teacher.previous_load + semestral;
        total_violation += (semestral - catalogue.config.max_semestral_teacher_load).max(0.0);
        total_violation += (annual - catalogue.config.max_annual_teacher_load).max(0.0);
    }
    total_violation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;
    use crate::preprocessor::PreprocessResult;
    use crate::types::{ClassGroup, ClassSession, CourseId, DivisionId, SchedulerConfig};
    use std::collections::{HashMap as Map, HashSet};

    fn session(group: u64, course: &str, day: i64, timeslot: i64) -> ClassSession {
        ClassSession {
            session_id: group,
            class_group: group,
            course: CourseId(course.into()),
            teacher: None,
            room: None,
            day,
            timeslot,
        }
    }

    fn minimal_catalogue() -> Catalogue {
        let course = crate::types::Course {
            id: CourseId("c1".into()),
            division: DivisionId("d".into()),
            has_lab: false,
            is_lab: false,
            num_timeslots: 1,
            num_units: 3.0,
            prerequisites: HashSet::new(),
            candidate_teachers: HashSet::new(),
            room_requirements: HashSet::new(),
        };
        Catalogue::for_test(vec![course], Vec::new(), Vec::new(), SchedulerConfig::for_test())
    }

    #[test]
    fn zero_cost_when_nothing_overlaps() {
        let catalogue = minimal_catalogue();
        let mut sessions = Map::new();
        sessions.insert(1, vec![session(1, "c1", 0, 0)]);
        sessions.insert(2, vec![session(2, "c1", 0, 5)]);
        let result = PreprocessResult {
            class_groups: vec![
                ClassGroup { id: 1, course: CourseId("c1".into()), num_timeslots: 1, teacher: None },
                ClassGroup { id: 2, course: CourseId("c1".into()), num_timeslots: 1, teacher: None },
            ],
            sessions,
            conflicts: Map::new(),
            next_session_id: 3,
        };
        let solution = crate::solution::Solution::new(&result);
        let breakdown = evaluate(&solution, &catalogue, &Map::new());
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn class_double_booking_is_detected() {
        let catalogue = minimal_catalogue();
        let mut sessions = Map::new();
        sessions.insert(1, vec![session(1, "c1", 0, 0)]);
        sessions.insert(2, vec![session(2, "c1", 0, 0)]);
        let result = PreprocessResult {
            class_groups: vec![
                ClassGroup { id: 1, course: CourseId("c1".into()), num_timeslots: 1, teacher: None },
                ClassGroup { id: 2, course: CourseId("c1".into()), num_timeslots: 1, teacher: None },
            ],
            sessions,
            conflicts: Map::new(),
            next_session_id: 3,
        };
        let solution = crate::solution::Solution::new(&result);
        let breakdown = evaluate(&solution, &catalogue, &Map::new());
        assert_eq!(breakdown.hc0_class_double_booking, 1);
        assert_eq!(breakdown.total, 100.0);
    }
}
