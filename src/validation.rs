//! Input validation for a scheduling run.
//!
//! Structural checks on the entity lists handed to the engine, run
//! before any algorithm. Detects:
//! - Duplicate identity keys (students, room numbers, chairman emails)
//! - Chairman pool members without the `Chairman` role
//!
//! Chairman-role filtering is the caller's responsibility; this module
//! makes that precondition explicit and checkable instead of an
//! implicit assumption. Per-entity invariants (inverted intervals,
//! equal supervisor/reviewer, and the like) are already rejected at
//! construction via [`crate::error::ModelError`].

use std::collections::HashSet;

use crate::models::{Defense, Person, Room};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same identity key.
    DuplicateId,
    /// A chairman pool member lacks the `Chairman` role.
    MissingChairmanRole,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the entity lists for one scheduling run.
///
/// Checks:
/// 1. No duplicate student names among defenses
/// 2. No duplicate room numbers
/// 3. No duplicate emails in the chairman pool
/// 4. Every pool member carries the `Chairman` role
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(defenses: &[Defense], rooms: &[Room], chairmen: &[Person]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut students = HashSet::new();
    for defense in defenses {
        if !students.insert(defense.student_name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate student name: {}", defense.student_name),
            ));
        }
    }

    let mut numbers = HashSet::new();
    for room in rooms {
        if !numbers.insert(room.number.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room number: {}", room.number),
            ));
        }
    }

    let mut emails = HashSet::new();
    for person in chairmen {
        if !emails.insert(person.email.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate chairman email: {}", person.email),
            ));
        }
        if !person.can_be_chairman() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingChairmanRole,
                format!("{} ({}) lacks the chairman role", person.name, person.email),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
