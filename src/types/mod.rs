mod class_group;
mod config;
mod course;
mod division;
mod room;
mod student_group;
mod teacher;

pub use class_group::*;
pub use config::*;
pub use course::*;
pub use division::*;
pub use room::*;
pub use student_group::*;
pub use teacher::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for room-feature identifiers (a feature is identified by its name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomFeatureId(pub String);

/// Newtype for room identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

/// Newtype for division identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionId(pub String);

/// Newtype for degree identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DegreeId(pub String);

/// Newtype for course identifiers. Lab courses get their own id, distinct
/// from their lecture parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub String);

/// Newtype for teacher identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub String);

/// Newtype for student-group identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentGroupId(pub String);

macro_rules! id_display {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

id_display!(
    RoomFeatureId,
    RoomId,
    DivisionId,
    DegreeId,
    CourseId,
    TeacherId,
    StudentGroupId
);
