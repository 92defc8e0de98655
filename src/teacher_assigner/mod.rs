//! Greedy, least-loaded teacher assignment. Non-optimal by design: load caps
//! are respected but nothing here looks ahead to avoid starving a later
//! course of a qualified teacher.

use crate::catalogue::Catalogue;
use crate::types::{ClassGroup, CourseId, TeacherId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TeacherAssignmentReport {
    pub insufficient: Vec<(CourseId, u64)>,
}

/// Assigns a teacher to every class group, mutating `class_groups` in
/// place. Groups for which no candidate teacher fits under both load caps
/// are left teacher-less and recorded in the returned report; the caller
/// does not treat this as fatal (see `SchedulerError::InsufficientTeachers`).
pub fn assign_teachers<R: Rng>(
    catalogue: &Catalogue,
    class_groups: &mut [ClassGroup],
    rng: &mut R,
) -> TeacherAssignmentReport {
    let mut report = TeacherAssignmentReport::default();
    let mut running_load: HashMap<TeacherId, f64> = HashMap::new();

    let mut order: Vec<usize> = (0..class_groups.len()).collect();
    order.shuffle(rng);

    for idx in order {
        let course_id = class_groups[idx].course.clone();
        let course = match catalogue.course(&course_id) {
            Some(c) => c,
            None => continue,
        };

        let mut candidates: Vec<&TeacherId> = course.candidate_teachers.iter().collect();
        candidates.shuffle(rng);
        candidates.sort_by(|a, b| {
            let load_a = *running_load.get(*a).unwrap_or(&0.0);
            let load_b = *running_load.get(*b).unwrap_or(&0.0);
            load_a.partial_cmp(&load_b).unwrap_or(std::cmp::Ordering::Equal)
        });

        let min_load = candidates
            .first()
            .map(|t| *running_load.get(*t).unwrap_or(&0.0))
            .unwrap_or(0.0);

        let chosen = candidates.into_iter().find(|t| {
            let current = *running_load.get(*t).unwrap_or(&0.0);
            if current > min_load {
                return false;
            }
            let teacher = match catalogue.teacher(t) {
                Some(t) => t,
                None => return false,
            };
            let within_semestral = current + course.num_units <= catalogue.config.max_semestral_teacher_load;
            let within_annual =
                teacher.previous_load + current + course.num_units <= catalogue.config.max_annual_teacher_load;
            within_semestral && within_annual
        });

        match chosen {
            Some(teacher_id) => {
                *running_load.entry(teacher_id.clone()).or_insert(0.0) += course.num_units;
                class_groups[idx].teacher = Some(teacher_id.clone());
            }
            None => {
                tracing::warn!(
                    course = %course_id,
                    class_group = class_groups[idx].id,
                    "no teacher available within load caps"
                );
                report.insufficient.push((course_id, class_groups[idx].id));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;
    use crate::types::{Course, DivisionId, SchedulerConfig, Teacher};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn course(id: &str, units: f64, teachers: &[&str]) -> Course {
        Course {
            id: CourseId(id.to_string()),
            division: DivisionId("div".to_string()),
            has_lab: false,
            is_lab: false,
            num_timeslots: 3,
            num_units: units,
            prerequisites: HashSet::new(),
            candidate_teachers: teachers.iter().map(|t| TeacherId(t.to_string())).collect(),
            room_requirements: HashSet::new(),
        }
    }

    fn teacher(id: &str) -> Teacher {
        Teacher {
            id: TeacherId(id.to_string()),
            previous_load: 0.0,
            unpreferred_timeslots: HashSet::new(),
        }
    }

    #[test]
    fn prefers_the_least_loaded_candidate() {
        let mut config = SchedulerConfig::for_test();
        config.max_semestral_teacher_load = 100.0;
        config.max_annual_teacher_load = 100.0;

        let catalogue = Catalogue::for_test(
            vec![course("c1", 3.0, &["t1", "t2"]), course("c2", 3.0, &["t1", "t2"])],
            vec![teacher("t1"), teacher("t2")],
            Vec::new(),
            config,
        );

        let mut groups = vec![
            ClassGroup { id: 1, course: CourseId("c1".into()), num_timeslots: 3, teacher: None },
            ClassGroup { id: 2, course: CourseId("c2".into()), num_timeslots: 3, teacher: None },
        ];

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = assign_teachers(&catalogue, &mut groups, &mut rng);

        assert!(report.insufficient.is_empty());
        let assigned: HashSet<_> = groups.iter().filter_map(|g| g.teacher.clone()).collect();
        assert_eq!(assigned.len(), 2, "the two courses should go to different teachers");
    }

    #[test]
    fn reports_insufficient_teachers_when_caps_exhausted() {
        let mut config = SchedulerConfig::for_test();
        config.max_semestral_teacher_load = 2.0;
        config.max_annual_teacher_load = 2.0;

        let catalogue = Catalogue::for_test(
            vec![course("c1", 3.0, &["t1"])],
            vec![teacher("t1")],
            Vec::new(),
            config,
        );

        let mut groups = vec![ClassGroup {
            id: 1,
            course: CourseId("c1".into()),
            num_timeslots: 3,
            teacher: None,
        }];

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let report = assign_teachers(&catalogue, &mut groups, &mut rng);

        assert_eq!(report.insufficient.len(), 1);
        assert!(groups[0].teacher.is_none());
    }
}
