use crate::types::{CourseId, DivisionId, RoomFeatureId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A course offering. A lab-bearing lecture course has its own paired lab
/// `Course`, looked up by id through `Catalogue::lab_of`; `is_lab` courses
/// never have prerequisites of their own and never carry a lab themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub division: DivisionId,
    #[serde(default)]
    pub has_lab: bool,
    #[serde(default)]
    pub is_lab: bool,
    pub num_timeslots: u32,
    #[serde(default)]
    pub num_units: f64,
    #[serde(default)]
    pub prerequisites: HashSet<CourseId>,
    #[serde(default)]
    pub candidate_teachers: HashSet<TeacherId>,
    #[serde(default)]
    pub room_requirements: HashSet<RoomFeatureId>,
}

impl Course {
    /// The display name used when hashing class-group ids: lab courses are
    /// suffixed so their replicas hash distinctly from the lecture's.
    pub fn name_key(&self) -> String {
        if self.is_lab {
            format!("{} (Lab)", self.id.0)
        } else {
            self.id.0.clone()
        }
    }
}
