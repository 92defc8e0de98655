//! Raw on-disk JSON row shapes and their assembly into catalogue entities.
//!
//! Each catalogue file is loaded with the same generic [`load_json_file`]
//! helper; the row shapes here intentionally mirror the files on disk
//! (snake_case, flat where the file is flat, nested where `study_plans.json`
//! is nested) rather than the richer in-memory catalogue types.

use crate::error::{Result, SchedulerError};
use crate::types::{
    CourseId, DegreeId, DivisionId, RoomFeatureId, RoomId, StudentGroupId, TeacherId,
    UnpreferredTimeslot,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(SchedulerError::FileNotFound { path: path_str }.into());
    }
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::InvalidContents {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

#[derive(Debug, Deserialize)]
pub struct RoomFeatureRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UnpreferredTimeslotRow {
    pub day: u32,
    pub timeslot: u32,
}

#[derive(Debug, Deserialize)]
pub struct TeacherRow {
    pub name: String,
    #[serde(default)]
    pub previous_load: f64,
    #[serde(default)]
    pub unpreferred_timeslots: Vec<UnpreferredTimeslotRow>,
}

#[derive(Debug, Deserialize)]
pub struct DivisionRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomRow {
    pub name: String,
    pub capacity: u32,
    pub division: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseRow {
    pub course_name: String,
    pub division: String,
    #[serde(default)]
    pub has_lab: bool,
    pub num_timeslots: u32,
    #[serde(default)]
    pub num_lab_timeslots: u32,
    #[serde(default)]
    pub num_units: f64,
    #[serde(default)]
    pub num_lab_units: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub candidate_teachers: Vec<String>,
    #[serde(default)]
    pub room_requirements: Vec<String>,
    #[serde(default)]
    pub lab_requirements: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanEntryRow {
    pub year_level: u32,
    pub semester: u32,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DegreePlanRow {
    pub name: String,
    #[serde(default)]
    pub plans: Vec<StudyPlanEntryRow>,
}

#[derive(Debug, Deserialize)]
pub struct DivisionPlanRow {
    pub name: String,
    #[serde(default)]
    pub degrees: Vec<DegreePlanRow>,
}

#[derive(Debug, Deserialize)]
pub struct StudyPlansFile {
    #[serde(default)]
    pub divisions: Vec<DivisionPlanRow>,
}

#[derive(Debug, Deserialize)]
pub struct StudentGroupRow {
    pub degree_name: String,
    pub year_level: u32,
    pub num_members: u32,
}

#[derive(Debug, Deserialize)]
pub struct GesElectiveRow {
    pub degree_name: String,
    pub year_level: u32,
    pub num_members: u32,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IrregularGroupRow {
    pub degree_name: String,
    pub year_level: u32,
    pub num_members: u32,
    #[serde(default)]
    pub additional_courses: Vec<String>,
    #[serde(default)]
    pub uncompleted_courses: Vec<String>,
}

pub fn load_room_features(path: &Path) -> Result<Vec<RoomFeatureRow>> {
    load_json_file(path)
}

pub fn load_teachers(path: &Path) -> Result<Vec<TeacherRow>> {
    load_json_file(path)
}

pub fn load_divisions(path: &Path) -> Result<Vec<DivisionRow>> {
    load_json_file(path)
}

pub fn load_rooms(path: &Path) -> Result<Vec<RoomRow>> {
    load_json_file(path)
}

pub fn load_courses(path: &Path) -> Result<Vec<CourseRow>> {
    load_json_file(path)
}

pub fn load_study_plans(path: &Path) -> Result<StudyPlansFile> {
    load_json_file(path)
}

pub fn load_student_groups(path: &Path) -> Result<Vec<StudentGroupRow>> {
    load_json_file(path)
}

pub fn load_ges_electives(path: &Path) -> Result<Vec<GesElectiveRow>> {
    load_json_file(path)
}

pub fn load_irregular_groups(path: &Path) -> Result<Vec<IrregularGroupRow>> {
    load_json_file(path)
}

pub(crate) fn course_id_set(names: &[String]) -> HashSet<CourseId> {
    names.iter().cloned().map(CourseId).collect()
}

pub(crate) fn teacher_id_set(names: &[String]) -> HashSet<TeacherId> {
    names.iter().cloned().map(TeacherId).collect()
}

pub(crate) fn feature_id_set(names: &[String]) -> HashSet<RoomFeatureId> {
    names.iter().cloned().map(RoomFeatureId).collect()
}

pub(crate) fn unpreferred_set(rows: &[UnpreferredTimeslotRow]) -> HashSet<UnpreferredTimeslot> {
    rows.iter()
        .map(|r| UnpreferredTimeslot {
            day: r.day,
            timeslot: r.timeslot,
        })
        .collect()
}

// These id-constructing helpers are also used by the class-group materializer
// inside the preprocessor; re-exported here to keep the name->id conversions
// in one place.
pub(crate) fn division_id(name: &str) -> DivisionId {
    DivisionId(name.to_string())
}

pub(crate) fn degree_id(name: &str) -> DegreeId {
    DegreeId(name.to_string())
}

pub(crate) fn student_group_key(degree: &str, year_level: u32) -> StudentGroupId {
    StudentGroupId(format!("{degree}-y{year_level}"))
}

pub(crate) fn room_id(name: &str) -> RoomId {
    RoomId(name.to_string())
}
