//! The read-only, fully-resolved bundle of entities that the preprocessor,
//! teacher assigner, and evolutionary search all borrow from. Built once at
//! startup by [`Catalogue::load`] and never mutated afterward.

use crate::error::{Result, SchedulerError};
use crate::parser::json::{self, *};
use crate::types::{
    Course, CourseId, Degree, DegreeId, Division, DivisionId, Room, RoomFeature, RoomFeatureId,
    RoomId, SchedulerConfig, StudentGroup, StudentGroupId, SubStudentGroup, Teacher, TeacherId,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub struct Catalogue {
    pub divisions: Vec<Division>,
    pub degrees: Vec<Degree>,
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub room_features: Vec<RoomFeature>,
    pub teachers: Vec<Teacher>,
    pub student_groups: Vec<StudentGroup>,
    pub config: SchedulerConfig,

    division_index: HashMap<DivisionId, usize>,
    degree_index: HashMap<DegreeId, usize>,
    course_index: HashMap<CourseId, usize>,
    room_index: HashMap<RoomId, usize>,
    room_feature_index: HashMap<RoomFeatureId, usize>,
    teacher_index: HashMap<TeacherId, usize>,
    student_group_index: HashMap<StudentGroupId, usize>,
    lecture_to_lab: HashMap<CourseId, CourseId>,
}

impl Catalogue {
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    pub fn teacher(&self, id: &TeacherId) -> Option<&Teacher> {
        self.teacher_index.get(id).map(|&i| &self.teachers[i])
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn room_feature(&self, id: &RoomFeatureId) -> Option<&RoomFeature> {
        self.room_feature_index.get(id).map(|&i| &self.room_features[i])
    }

    pub fn degree(&self, id: &DegreeId) -> Option<&Degree> {
        self.degree_index.get(id).map(|&i| &self.degrees[i])
    }

    pub fn division(&self, id: &DivisionId) -> Option<&Division> {
        self.division_index.get(id).map(|&i| &self.divisions[i])
    }

    pub fn student_group(&self, id: &StudentGroupId) -> Option<&StudentGroup> {
        self.student_group_index.get(id).map(|&i| &self.student_groups[i])
    }

    /// The lab course paired with a lecture course, if `has_lab` was set.
    pub fn lab_of(&self, lecture: &CourseId) -> Option<&Course> {
        self.lecture_to_lab.get(lecture).and_then(|id| self.course(id))
    }

    /// Teachers who list `course` among their candidate courses.
    pub fn candidate_teachers(&self, course: &CourseId) -> Vec<&Teacher> {
        match self.course(course) {
            Some(c) => c
                .candidate_teachers
                .iter()
                .filter_map(|tid| self.teacher(tid))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn load(data_dir: &Path, config_path: &Path) -> Result<Catalogue> {
        let config = crate::parser::config::load_config(config_path)?;

        let room_feature_rows = json::load_room_features(&data_dir.join("room_features.json"))?;
        let division_rows = json::load_divisions(&data_dir.join("divisions.json"))?;
        let room_rows = json::load_rooms(&data_dir.join("rooms.json"))?;
        let teacher_rows = json::load_teachers(&data_dir.join("teachers.json"))?;
        let course_rows = json::load_courses(&data_dir.join("courses.json"))?;
        let study_plans = json::load_study_plans(&data_dir.join("study_plans.json"))?;
        let student_group_rows = json::load_student_groups(&data_dir.join("student_groups.json"))?;
        let ges_rows =
            json::load_ges_electives(&data_dir.join("regular_student_ges_electives.json"))?;
        let irregular_rows =
            json::load_irregular_groups(&data_dir.join("irregular_student_groups.json"))?;

        let room_features: Vec<RoomFeature> = room_feature_rows
            .into_iter()
            .map(|r| RoomFeature::new(r.name))
            .collect();

        let teachers: Vec<Teacher> = teacher_rows
            .into_iter()
            .map(|r| Teacher {
                id: TeacherId(r.name),
                previous_load: r.previous_load,
                unpreferred_timeslots: unpreferred_set(&r.unpreferred_timeslots),
            })
            .collect();

        let rooms: Vec<Room> = room_rows
            .into_iter()
            .map(|r| Room {
                id: room_id(&r.name),
                capacity: r.capacity,
                division: division_id(&r.division),
                features: r.features.into_iter().map(RoomFeatureId).collect(),
            })
            .collect();

        // courses.json lists lecture (or standalone) courses only; a
        // has_lab course gets a synthesized, separately-id'd lab Course.
        let mut courses: Vec<Course> = Vec::with_capacity(course_rows.len() * 2);
        let mut lecture_to_lab: HashMap<CourseId, CourseId> = HashMap::new();
        for row in &course_rows {
            let id = CourseId(row.course_name.clone());
            let lecture = Course {
                id: id.clone(),
                division: division_id(&row.division),
                has_lab: row.has_lab,
                is_lab: false,
                num_timeslots: row.num_timeslots,
                num_units: row.num_units,
                prerequisites: course_id_set(&row.prerequisites),
                candidate_teachers: teacher_id_set(&row.candidate_teachers),
                room_requirements: feature_id_set(&row.room_requirements),
            };
            courses.push(lecture);

            if row.has_lab {
                let lab_id = CourseId(format!("{} (Lab)", row.course_name));
                let lab = Course {
                    id: lab_id.clone(),
                    division: division_id(&row.division),
                    has_lab: false,
                    is_lab: true,
                    num_timeslots: row.num_lab_timeslots.max(1),
                    num_units: row.num_lab_units,
                    prerequisites: HashSet::new(),
                    candidate_teachers: teacher_id_set(&row.candidate_teachers),
                    room_requirements: feature_id_set(&row.lab_requirements),
                };
                courses.push(lab);
                lecture_to_lab.insert(id, lab_id);
            }
        }

        // Degrees and study-plan course assignments, flattened from the
        // nested division -> degree -> plan[] shape.
        let mut degrees: Vec<Degree> = Vec::new();
        let mut degree_plan_courses: HashMap<(String, u32), HashSet<String>> = HashMap::new();
        for division_plan in &study_plans.divisions {
            for degree_plan in &division_plan.degrees {
                degrees.push(Degree {
                    id: degree_id(&degree_plan.name),
                    division: division_id(&division_plan.name),
                });

                let mut last_key: Option<(u32, u32)> = None;
                for plan in &degree_plan.plans {
                    let key = (plan.year_level, plan.semester);
                    if let Some(prev) = last_key {
                        if key < prev {
                            return Err(SchedulerError::OutOfOrderPlan {
                                division: division_plan.name.clone(),
                            }
                            .into());
                        }
                    }
                    last_key = Some(key);

                    if plan.semester == config.semester {
                        degree_plan_courses
                            .entry((degree_plan.name.clone(), plan.year_level))
                            .or_default()
                            .extend(plan.courses.iter().cloned());
                    }
                }
            }
        }

        let mut student_groups: Vec<StudentGroup> = student_group_rows
            .into_iter()
            .map(|r| {
                let assigned = degree_plan_courses
                    .get(&(r.degree_name.clone(), r.year_level))
                    .cloned()
                    .unwrap_or_default();
                StudentGroup {
                    id: student_group_key(&r.degree_name, r.year_level),
                    degree: degree_id(&r.degree_name),
                    year_level: r.year_level,
                    num_members: r.num_members,
                    assigned_courses: course_id_set(&assigned.into_iter().collect::<Vec<_>>()),
                    sub_groups: Vec::new(),
                }
            })
            .collect();

        let mut group_index: HashMap<StudentGroupId, usize> = student_groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.clone(), i))
            .collect();

        for row in ges_rows {
            let key = student_group_key(&row.degree_name, row.year_level);
            if let Some(&idx) = group_index.get(&key) {
                student_groups[idx].sub_groups.push(SubStudentGroup {
                    num_members: row.num_members,
                    assigned_courses: course_id_set(&row.courses),
                });
            } else {
                tracing::warn!(
                    degree = %row.degree_name,
                    year_level = row.year_level,
                    "GE/elective group has no matching parent student group; skipping"
                );
            }
        }

        for row in irregular_rows {
            let key = student_group_key(&row.degree_name, row.year_level);
            if let Some(&idx) = group_index.get(&key) {
                let mut courses = row.additional_courses;
                courses.extend(row.uncompleted_courses);
                student_groups[idx].sub_groups.push(SubStudentGroup {
                    num_members: row.num_members,
                    assigned_courses: course_id_set(&courses),
                });
            } else {
                tracing::warn!(
                    degree = %row.degree_name,
                    year_level = row.year_level,
                    "irregular student group has no matching parent student group; skipping"
                );
            }
        }
        group_index.clear();

        let divisions: Vec<Division> = division_rows
            .into_iter()
            .map(|r| {
                let id = division_id(&r.name);
                Division {
                    courses: courses
                        .iter()
                        .filter(|c| c.division == id)
                        .map(|c| c.id.clone())
                        .collect(),
                    degrees: degrees
                        .iter()
                        .filter(|d| d.division == id)
                        .map(|d| d.id.clone())
                        .collect(),
                    rooms: rooms
                        .iter()
                        .filter(|rm| rm.division == id)
                        .map(|rm| rm.id.clone())
                        .collect(),
                    id,
                }
            })
            .collect();

        let catalogue = Catalogue::assemble(
            divisions,
            degrees,
            courses,
            rooms,
            room_features,
            teachers,
            student_groups,
            lecture_to_lab,
            config,
        );

        catalogue.validate_references()?;
        Ok(catalogue)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        divisions: Vec<Division>,
        degrees: Vec<Degree>,
        courses: Vec<Course>,
        rooms: Vec<Room>,
        room_features: Vec<RoomFeature>,
        teachers: Vec<Teacher>,
        student_groups: Vec<StudentGroup>,
        lecture_to_lab: HashMap<CourseId, CourseId>,
        config: SchedulerConfig,
    ) -> Catalogue {
        Catalogue {
            division_index: divisions.iter().enumerate().map(|(i, d)| (d.id.clone(), i)).collect(),
            degree_index: degrees.iter().enumerate().map(|(i, d)| (d.id.clone(), i)).collect(),
            course_index: courses.iter().enumerate().map(|(i, c)| (c.id.clone(), i)).collect(),
            room_index: rooms.iter().enumerate().map(|(i, r)| (r.id.clone(), i)).collect(),
            room_feature_index: room_features
                .iter()
                .enumerate()
                .map(|(i, f)| (f.id.clone(), i))
                .collect(),
            teacher_index: teachers.iter().enumerate().map(|(i, t)| (t.id.clone(), i)).collect(),
            student_group_index: student_groups
                .iter()
                .enumerate()
                .map(|(i, g)| (g.id.clone(), i))
                .collect(),
            lecture_to_lab,
            divisions,
            degrees,
            courses,
            rooms,
            room_features,
            teachers,
            student_groups,
            config,
        }
    }

    /// Builds a catalogue directly from in-memory entities, bypassing file
    /// I/O. Used by this crate's own tests to exercise the preprocessor,
    /// teacher assigner, and search over small, hand-built fixtures.
    #[cfg(test)]
    pub(crate) fn for_test(
        courses: Vec<Course>,
        teachers: Vec<Teacher>,
        student_groups: Vec<StudentGroup>,
        config: SchedulerConfig,
    ) -> Catalogue {
        Catalogue::assemble(
            Vec::new(),
            Vec::new(),
            courses,
            Vec::new(),
            Vec::new(),
            teachers,
            student_groups,
            HashMap::new(),
            config,
        )
    }

    fn validate_references(&self) -> Result<()> {
        for course in &self.courses {
            if self.division(&course.division).is_none() {
                return Err(SchedulerError::ReferenceMissing {
                    file: "courses.json".into(),
                    kind: "division".into(),
                    name: course.division.0.clone(),
                }
                .into());
            }
            for prereq in &course.prerequisites {
                if self.course(prereq).is_none() {
                    return Err(SchedulerError::ReferenceMissing {
                        file: "courses.json".into(),
                        kind: "course".into(),
                        name: prereq.0.clone(),
                    }
                    .into());
                }
            }
            for teacher in &course.candidate_teachers {
                if self.teacher(teacher).is_none() {
                    return Err(SchedulerError::ReferenceMissing {
                        file: "courses.json".into(),
                        kind: "teacher".into(),
                        name: teacher.0.clone(),
                    }
                    .into());
                }
            }
            for feature in &course.room_requirements {
                if self.room_feature(feature).is_none() {
                    return Err(SchedulerError::ReferenceMissing {
                        file: "courses.json".into(),
                        kind: "room feature".into(),
                        name: feature.0.clone(),
                    }
                    .into());
                }
            }
        }

        for room in &self.rooms {
            if self.division(&room.division).is_none() {
                return Err(SchedulerError::ReferenceMissing {
                    file: "rooms.json".into(),
                    kind: "division".into(),
                    name: room.division.0.clone(),
                }
                .into());
            }
            for feature in &room.features {
                if self.room_feature(feature).is_none() {
                    return Err(SchedulerError::ReferenceMissing {
                        file: "rooms.json".into(),
                        kind: "room feature".into(),
                        name: feature.0.clone(),
                    }
                    .into());
                }
            }
        }

        for group in &self.student_groups {
            if self.degree(&group.degree).is_none() {
                return Err(SchedulerError::ReferenceMissing {
                    file: "student_groups.json".into(),
                    kind: "degree".into(),
                    name: group.degree.0.clone(),
                }
                .into());
            }
            for course in group.assigned_courses.iter().chain(
                group
                    .sub_groups
                    .iter()
                    .flat_map(|sg| sg.assigned_courses.iter()),
            ) {
                if self.course(course).is_none() {
                    return Err(SchedulerError::ReferenceMissing {
                        file: "study_plans.json".into(),
                        kind: "course".into(),
                        name: course.0.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_group_id_is_stable_under_same_inputs() {
        let a = crate::types::class_group_id("Math 101", 0);
        let b = crate::types::class_group_id("Math 101", 0);
        assert_eq!(a, b);
    }

    #[test]
    fn class_group_id_differs_by_replica() {
        let a = crate::types::class_group_id("Math 101", 0);
        let b = crate::types::class_group_id("Math 101", 1);
        assert_ne!(a, b);
    }
}
