use crate::types::TeacherId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single (day, timeslot) pair a teacher would rather not be scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnpreferredTimeslot {
    pub day: u32,
    pub timeslot: u32,
}

/// A teacher. `potential_courses` is deliberately not a stored field here:
/// it is derived on demand from the catalogue's `Course::candidate_teachers`
/// sets, which forecloses the self-assignment bug present in one revision
/// of the source this crate's behaviour is grounded on (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    /// Units already carried earlier in the academic year (the other
    /// semester), counted toward the annual load cap.
    #[serde(default)]
    pub previous_load: f64,
    #[serde(default)]
    pub unpreferred_timeslots: HashSet<UnpreferredTimeslot>,
}

impl Teacher {
    pub fn prefers(&self, day: u32, timeslot: u32) -> bool {
        !self.unpreferred_timeslots.contains(&UnpreferredTimeslot { day, timeslot })
    }
}
