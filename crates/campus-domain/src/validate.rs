//! Stateless invariant checks run before every create/update.
//!
//! Each check is a pure function returning a [`ValidationFailure`] naming
//! the offending field. Callers merge partial updates onto the stored row
//! before calling, so one-sided updates are still validated as a full pair.

use chrono::NaiveDate;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// End date must be strictly after start date.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationFailure> {
    if end <= start {
        return Err(ValidationFailure::new(
            "end_date",
            "end date must be after start date",
        ));
    }
    Ok(())
}

/// Capacity must be positive and enrollment must fit within it.
pub fn capacity(capacity: i32, current_enrollment: i32) -> Result<(), ValidationFailure> {
    if capacity <= 0 {
        return Err(ValidationFailure::new("capacity", "capacity must be positive"));
    }
    if current_enrollment < 0 {
        return Err(ValidationFailure::new(
            "current_enrollment",
            "current enrollment cannot be negative",
        ));
    }
    if current_enrollment > capacity {
        return Err(ValidationFailure::new(
            "current_enrollment",
            "current enrollment cannot exceed capacity",
        ));
    }
    Ok(())
}

/// Each non-null score must lie in [0, 100]. Violations aggregate into one
/// failure message.
pub fn grade_scores(scores: &[(&'static str, Option<f32>)]) -> Result<(), ValidationFailure> {
    let out_of_range: Vec<&str> = scores
        .iter()
        .filter(|(_, v)| v.is_some_and(|v| !(0.0..=100.0).contains(&v)))
        .map(|(name, _)| *name)
        .collect();
    if out_of_range.is_empty() {
        return Ok(());
    }
    Err(ValidationFailure::new(
        "grades",
        format!(
            "grades must be between 0 and 100: {}",
            out_of_range.join(", ")
        ),
    ))
}

/// Week numbers run 1–52.
pub fn week_number(week: i32) -> Result<(), ValidationFailure> {
    if !(1..=52).contains(&week) {
        return Err(ValidationFailure::new(
            "week_number",
            "week number must be between 1 and 52",
        ));
    }
    Ok(())
}
