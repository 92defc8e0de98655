use crate::types::{CourseId, DegreeId, DivisionId, RoomId};
use serde::{Deserialize, Serialize};

/// An academic division (e.g. a college or department). Courses, degrees,
/// and rooms are each owned by exactly one division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    #[serde(default)]
    pub courses: Vec<CourseId>,
    #[serde(default)]
    pub degrees: Vec<DegreeId>,
    #[serde(default)]
    pub rooms: Vec<RoomId>,
}

/// A degree program offered by a division.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Degree {
    pub id: DegreeId,
    pub division: DivisionId,
}
