//! Pure rules for course progress and notes, independent of transport.

use crate::error::StoreError;
use crate::models::{Course, NewCourse};

/// Clamp an arbitrary user-entered value into the valid progress range.
/// Every progress mutation funnels through this before it is sent.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Map a pointer position along a horizontal progress track to a percentage.
/// Positions left of the track map to 0, positions past its right edge to 100.
pub fn percent_from_track(pointer_x: f64, track_left: f64, track_width: f64) -> u8 {
    if track_width <= 0.0 {
        return 0;
    }
    let x = (pointer_x - track_left).clamp(0.0, track_width);
    (x / track_width * 100.0).round() as u8
}

/// Display rule: the completion label comes from the store-reported flag,
/// the client never derives it from progress on its own.
pub fn progress_label(course: &Course) -> String {
    if course.completed {
        "Completed!".to_string()
    } else {
        format!("{}% Complete", course.progress)
    }
}

/// A note must have non-blank text. Returns the trimmed text to submit.
pub fn validate_note_text(text: &str) -> Result<&str, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(
            "note text must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}

pub fn validate_new_course(course: &NewCourse) -> Result<(), StoreError> {
    if course.name.trim().is_empty() {
        return Err(StoreError::Validation(
            "course name must not be empty".to_string(),
        ));
    }
    if course.description.trim().is_empty() {
        return Err(StoreError::Validation(
            "course description must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Enrollment is one-way: the action is offered only while not yet enrolled.
pub fn can_enroll(course: &Course) -> bool {
    !course.enrolled
}

/// Case-insensitive substring filter over a fetched course list.
pub fn filter_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return courses.iter().collect();
    }
    courses
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query)
                || c.description.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentSummary {
    pub enrolled: usize,
    pub completed: usize,
    /// Mean progress across enrolled courses, 0 when nothing is enrolled.
    pub mean_progress: u8,
}

pub fn enrollment_summary(courses: &[Course]) -> EnrollmentSummary {
    let enrolled: Vec<&Course> = courses.iter().filter(|c| c.enrolled).collect();
    let completed = enrolled.iter().filter(|c| c.completed).count();
    let mean_progress = if enrolled.is_empty() {
        0
    } else {
        let total: u64 = enrolled.iter().map(|c| c.progress as u64).sum();
        (total / enrolled.len() as u64) as u8
    };
    EnrollmentSummary {
        enrolled: enrolled.len(),
        completed,
        mean_progress,
    }
}
