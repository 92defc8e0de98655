use crate::catalogue::Catalogue;

/// Soft, advisory checks over a loaded catalogue. Unlike the hard
/// reference checks `Catalogue::load` performs (which are fatal), these are
/// warnings an operator should see but that do not block a run.
#[derive(Debug, Default)]
pub struct CatalogueValidation {
    pub warnings: Vec<String>,
}

pub fn validate_catalogue(catalogue: &Catalogue) -> CatalogueValidation {
    let mut result = CatalogueValidation::default();

    check_duplicate_course_ids(catalogue, &mut result);
    check_courses_have_teachers(catalogue, &mut result);
    check_student_group_capacity(catalogue, &mut result);

    result
}

fn check_duplicate_course_ids(catalogue: &Catalogue, result: &mut CatalogueValidation) {
    let mut seen = std::collections::HashSet::new();
    for course in &catalogue.courses {
        if !seen.insert(&course.id) {
            result
                .warnings
                .push(format!("duplicate course id '{}'", course.id));
        }
    }
}

fn check_courses_have_teachers(catalogue: &Catalogue, result: &mut CatalogueValidation) {
    for course in &catalogue.courses {
        if course.candidate_teachers.is_empty() {
            result
                .warnings
                .push(format!("course '{}' has no candidate teachers", course.id));
        }
    }
}

fn check_student_group_capacity(catalogue: &Catalogue, result: &mut CatalogueValidation) {
    for group in &catalogue.student_groups {
        let sub_total: u32 = group.sub_groups.iter().map(|sg| sg.num_members).sum();
        if sub_total > group.num_members {
            result.warnings.push(format!(
                "student group '{}' has sub-groups totalling {} but num_members is {}",
                group.id, sub_total, group.num_members
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_warnings() {
        let mut result = CatalogueValidation::default();
        result
            .warnings
            .push("course 'x' has no candidate teachers".to_string());
        assert_eq!(result.warnings.len(), 1);
    }
}
