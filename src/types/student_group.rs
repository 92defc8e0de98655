use crate::types::{CourseId, DegreeId, StudentGroupId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A cohort of students sharing a degree, year level, and study-plan courses.
/// `num_members` is meant to be written exactly once, during catalogue load;
/// the loader enforces this, not the type itself (serde needs a plain field).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: StudentGroupId,
    pub degree: DegreeId,
    pub year_level: u32,
    pub num_members: u32,
    #[serde(default)]
    pub assigned_courses: HashSet<CourseId>,
    #[serde(default)]
    pub sub_groups: Vec<SubStudentGroup>,
}

impl StudentGroup {
    /// Members who are not accounted for by any sub-group; these take
    /// exactly `assigned_courses` and nothing else.
    pub fn regular_member_count(&self) -> u32 {
        let sub_total: u32 = self.sub_groups.iter().map(|sg| sg.num_members).sum();
        self.num_members.saturating_sub(sub_total)
    }
}

/// A sub-cohort of a `StudentGroup`: GE/elective takers or irregular
/// students, who inherit the parent's study-plan courses in addition to
/// their own. Disjoint in membership from its siblings and from the
/// parent's regular block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubStudentGroup {
    pub num_members: u32,
    #[serde(default)]
    pub assigned_courses: HashSet<CourseId>,
}
