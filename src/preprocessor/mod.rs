//! Projects student-group enrolment onto class-group replicas, materializes
//! their class sessions, and builds the class-conflict relation by
//! simulating one student at a time.

use crate::catalogue::Catalogue;
use crate::error::{Result, SchedulerError};
use crate::types::{class_group_id, ClassGroup, ClassSession, Course, CourseId, RoomId};
use std::collections::{HashMap, HashSet};

pub struct PreprocessResult {
    pub class_groups: Vec<ClassGroup>,
    pub sessions: HashMap<u64, Vec<ClassSession>>,
    pub conflicts: HashMap<u64, HashSet<u64>>,
    /// One past the highest session id handed out; the solution model
    /// continues from here when a double-timeslot day transition needs to
    /// mint fresh sessions.
    pub next_session_id: u64,
}

pub fn preprocess(catalogue: &Catalogue) -> Result<PreprocessResult> {
    let enrollees = project_enrolment(catalogue);

    let mut class_groups = Vec::new();
    let mut sessions = HashMap::new();
    let mut replicas_by_course: HashMap<CourseId, u32> = HashMap::new();
    let mut next_session_id: u64 = 0;

    for (course_id, &count) in &enrollees {
        let course = catalogue
            .course(course_id)
            .expect("enrolment projection only references catalogue courses");

        materialize_replicas(
            catalogue,
            course,
            count,
            catalogue.config.max_lecture_capacity,
            "lecture",
            &mut class_groups,
            &mut sessions,
            &mut replicas_by_course,
            &mut next_session_id,
        )?;

        if course.has_lab {
            let lab = catalogue
                .lab_of(course_id)
                .expect("has_lab courses always have a paired lab course");
            materialize_replicas(
                catalogue,
                lab,
                count,
                catalogue.config.max_lab_capacity,
                "lab",
                &mut class_groups,
                &mut sessions,
                &mut replicas_by_course,
                &mut next_session_id,
            )?;
        }
    }

    let conflicts = build_conflict_graph(catalogue, &replicas_by_course)?;

    Ok(PreprocessResult {
        class_groups,
        sessions,
        conflicts,
        next_session_id,
    })
}

/// Enrolment projection, known to over-count: a sub-group's members are
/// added once per sub-group for every course in
/// `parent.assigned_courses ∪ sub.assigned_courses`, so two sibling
/// sub-groups that both inherit the same parent course each contribute a
/// full add for it. This mirrors the source's behaviour and is kept
/// deliberately rather than deduplicated away.
fn project_enrolment(catalogue: &Catalogue) -> HashMap<CourseId, u32> {
    let mut enrollees: HashMap<CourseId, u32> = HashMap::new();

    for group in &catalogue.student_groups {
        let regular = group.regular_member_count();
        for course in &group.assigned_courses {
            *enrollees.entry(course.clone()).or_insert(0) += regular;
        }

        for sub in &group.sub_groups {
            let inherited: HashSet<&CourseId> =
                group.assigned_courses.iter().chain(sub.assigned_courses.iter()).collect();
            for course in inherited {
                *enrollees.entry(course.clone()).or_insert(0) += sub.num_members;
            }
        }
    }

    enrollees
}

#[allow(clippy::too_many_arguments)]
fn materialize_replicas(
    catalogue: &Catalogue,
    course: &Course,
    num_enrollees: u32,
    capacity: u32,
    kind: &str,
    class_groups: &mut Vec<ClassGroup>,
    sessions: &mut HashMap<u64, Vec<ClassSession>>,
    replicas_by_course: &mut HashMap<CourseId, u32>,
    next_session_id: &mut u64,
) -> Result<()> {
    if num_enrollees == 0 {
        replicas_by_course.insert(course.id.clone(), 0);
        return Ok(());
    }
    if capacity == 0 {
        return Err(SchedulerError::InsufficientCapacity {
            course: course.id.0.clone(),
            kind: kind.to_string(),
        }
        .into());
    }

    let num_classes = (num_enrollees as f64 / capacity as f64).ceil() as u32;
    replicas_by_course.insert(course.id.clone(), num_classes);

    let name_key = course.name_key();
    let room = pick_room(catalogue, course, capacity);

    for replica in 0..num_classes {
        let group_id = class_group_id(&name_key, replica);
        let mut group_sessions = Vec::with_capacity(course.num_timeslots as usize);
        for _ in 0..course.num_timeslots {
            group_sessions.push(ClassSession {
                session_id: *next_session_id,
                class_group: group_id,
                course: course.id.clone(),
                teacher: None,
                room: room.clone(),
                day: -1,
                timeslot: -1,
            });
            *next_session_id += 1;
        }
        sessions.insert(group_id, group_sessions);
        class_groups.push(ClassGroup {
            id: group_id,
            course: course.id.clone(),
            num_timeslots: course.num_timeslots,
            teacher: None,
        });
    }

    Ok(())
}

/// Rooms are assigned once here and never revisited by the search (room
/// optimisation is out of scope). Picks the first room in the course's
/// division meeting its feature requirements and the replica's capacity.
fn pick_room(catalogue: &Catalogue, course: &Course, capacity: u32) -> Option<RoomId> {
    catalogue
        .rooms
        .iter()
        .filter(|r| r.division == course.division)
        .filter(|r| r.capacity >= capacity)
        .find(|r| course.room_requirements.iter().all(|f| r.has_feature(f)))
        .map(|r| r.id.clone())
}

fn build_conflict_graph(
    catalogue: &Catalogue,
    replicas_by_course: &HashMap<CourseId, u32>,
) -> Result<HashMap<u64, HashSet<u64>>> {
    let mut conflicts: HashMap<u64, HashSet<u64>> = HashMap::new();
    let mut occupancy: HashMap<CourseId, Vec<u32>> = HashMap::new();

    for group in &catalogue.student_groups {
        let regular = group.regular_member_count();
        for _ in 0..regular {
            let picked = pick_groups_for_student(
                catalogue,
                &group.assigned_courses,
                replicas_by_course,
                &mut occupancy,
            )?;
            record_conflicts(&picked, &mut conflicts);
        }

        for sub in &group.sub_groups {
            let courses: HashSet<CourseId> = group
                .assigned_courses
                .iter()
                .chain(sub.assigned_courses.iter())
                .cloned()
                .collect();
            for _ in 0..sub.num_members {
                let picked = pick_groups_for_student(
                    catalogue,
                    &courses,
                    replicas_by_course,
                    &mut occupancy,
                )?;
                record_conflicts(&picked, &mut conflicts);
            }
        }
    }

    Ok(conflicts)
}

fn pick_groups_for_student(
    catalogue: &Catalogue,
    courses: &HashSet<CourseId>,
    replicas_by_course: &HashMap<CourseId, u32>,
    occupancy: &mut HashMap<CourseId, Vec<u32>>,
) -> Result<Vec<u64>> {
    let mut picked = Vec::with_capacity(courses.len() * 2);

    for course_id in courses {
        let course = match catalogue.course(course_id) {
            Some(c) => c,
            None => continue,
        };
        picked.push(pick_one_replica(
            course,
            catalogue.config.max_lecture_capacity,
            "lecture",
            replicas_by_course,
            occupancy,
        )?);

        if course.has_lab {
            let lab = catalogue
                .lab_of(course_id)
                .expect("has_lab courses always have a paired lab course");
            picked.push(pick_one_replica(
                lab,
                catalogue.config.max_lab_capacity,
                "lab",
                replicas_by_course,
                occupancy,
            )?);
        }
    }

    Ok(picked)
}

fn pick_one_replica(
    course: &Course,
    capacity: u32,
    kind: &str,
    replicas_by_course: &HashMap<CourseId, u32>,
    occupancy: &mut HashMap<CourseId, Vec<u32>>,
) -> Result<u64> {
    let num_replicas = *replicas_by_course.get(&course.id).unwrap_or(&0);
    let occ = occupancy
        .entry(course.id.clone())
        .or_insert_with(|| vec![0; num_replicas as usize]);

    match occ.iter().position(|&count| count < capacity) {
        Some(idx) => {
            occ[idx] += 1;
            Ok(class_group_id(&course.name_key(), idx as u32))
        }
        None => Err(SchedulerError::InsufficientCapacity {
            course: course.id.0.clone(),
            kind: kind.to_string(),
        }
        .into()),
    }
}

fn record_conflicts(picked: &[u64], conflicts: &mut HashMap<u64, HashSet<u64>>) {
    for i in 0..picked.len() {
        for j in (i + 1)..picked.len() {
            conflicts.entry(picked[i]).or_default().insert(picked[j]);
            conflicts.entry(picked[j]).or_default().insert(picked[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_recording_is_symmetric() {
        let mut conflicts: HashMap<u64, HashSet<u64>> = HashMap::new();
        record_conflicts(&[1, 2, 3], &mut conflicts);
        assert!(conflicts[&1].contains(&2));
        assert!(conflicts[&2].contains(&1));
        assert!(conflicts[&1].contains(&3));
        assert!(conflicts[&2].contains(&3));
    }
}
