//! Submission rules for patient records.
//!
//! [`validate_submission`] turns raw form text into a [`PatientDraft`] or a
//! [`Rejection`]. Nothing here touches storage; a rejected submission never
//! reaches the store.

use std::num::{IntErrorKind, ParseIntError};

use serde::Deserialize;

/// Stored in place of a blank gender.
pub const GENDER_PLACEHOLDER: &str = "—";

/// Inclusive age bounds.
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// Column widths of the `patients` table, in characters.
pub const NAME_MAX_LEN: usize = 200;
pub const GENDER_MAX_LEN: usize = 50;
pub const PROBLEM_MAX_LEN: usize = 500;

/// Raw form fields as submitted. Missing fields deserialize as empty text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub problem: String,
}

/// A validated, normalized patient prior to id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub problem: String,
}

/// Why a submission was turned away. The `Display` text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Please fill in name, age, and health issue.")]
    MissingFields,

    #[error("Please enter a valid age (0–150).")]
    InvalidAgeFormat,

    #[error("Age must be between 0 and 150.")]
    AgeOutOfRange,

    #[error("{field} must be at most {max} characters.")]
    FieldTooLong { field: &'static str, max: usize },
}

/// Validate and normalize a submission.
///
/// Rules apply in order: trim, required fields, integer age, age range,
/// column widths, gender placeholder. The first failing rule wins.
///
/// ```
/// use patient_register_core::patient::{validate_submission, PatientForm, GENDER_PLACEHOLDER};
///
/// let form = PatientForm {
///     name: "  Jane Doe ".into(),
///     age: "34".into(),
///     gender: "".into(),
///     problem: "fever".into(),
/// };
/// let draft = validate_submission(&form).unwrap();
/// assert_eq!(draft.name, "Jane Doe");
/// assert_eq!(draft.gender, GENDER_PLACEHOLDER);
/// ```
pub fn validate_submission(form: &PatientForm) -> Result<PatientDraft, Rejection> {
    let name = form.name.trim();
    let age = form.age.trim();
    let gender = form.gender.trim();
    let problem = form.problem.trim();

    if name.is_empty() || age.is_empty() || problem.is_empty() {
        return Err(Rejection::MissingFields);
    }

    // An integer too wide for i32 is still an integer, just out of range.
    let age: i32 = age.parse().map_err(|err: ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Rejection::AgeOutOfRange,
        _ => Rejection::InvalidAgeFormat,
    })?;
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(Rejection::AgeOutOfRange);
    }

    check_width("Name", name, NAME_MAX_LEN)?;
    check_width("Gender", gender, GENDER_MAX_LEN)?;
    check_width("Health issue", problem, PROBLEM_MAX_LEN)?;

    let gender = if gender.is_empty() {
        GENDER_PLACEHOLDER
    } else {
        gender
    };

    Ok(PatientDraft {
        name: name.to_string(),
        age,
        gender: gender.to_string(),
        problem: problem.to_string(),
    })
}

fn check_width(field: &'static str, value: &str, max: usize) -> Result<(), Rejection> {
    if value.chars().count() > max {
        return Err(Rejection::FieldTooLong { field, max });
    }
    Ok(())
}
