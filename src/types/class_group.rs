use crate::types::{CourseId, RoomId, TeacherId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Stable identifier for a class group: a hash over the course's name key
/// (lab courses get a `" (Lab)"` suffix, see `Course::name_key`) and the
/// replica index, matching the source's `std::hash<std::string>` scheme.
pub fn class_group_id(name_key: &str, replica_index: u32) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    name_key.hash(&mut hasher);
    replica_index.hash(&mut hasher);
    hasher.finish()
}

/// A logical class (one replica of an offering). A class group owns one or
/// more class sessions, materialized by the preprocessor with day/timeslot
/// left unassigned (`None`); the solution model assigns concrete values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: u64,
    pub course: CourseId,
    pub num_timeslots: u32,
    pub teacher: Option<TeacherId>,
}

/// A sentinel meaning "not yet placed in a day or timeslot".
pub const UNASSIGNED: i64 = -1;

/// A single (day, timeslot, room) occupancy belonging to a class group. All
/// sessions in a group share `class_group`, `course`, `teacher`, `room`,
/// and `day`; their `timeslot`s form a consecutive block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSession {
    pub session_id: u64,
    pub class_group: u64,
    pub course: CourseId,
    pub teacher: Option<TeacherId>,
    pub room: Option<RoomId>,
    pub day: i64,
    pub timeslot: i64,
}

impl ClassSession {
    pub fn is_placed(&self) -> bool {
        self.day != UNASSIGNED && self.timeslot != UNASSIGNED
    }
}
