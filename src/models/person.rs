//! Person model.
//!
//! Faculty members who participate in defenses as supervisor, reviewer,
//! or chairman. The email address is the identity key: two `Person`
//! values with the same email are the same person everywhere in the
//! engine, regardless of the other fields.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::TimeSlot;
use crate::error::ModelError;

/// A committee role a person can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Thesis supervisor.
    Supervisor,
    /// Thesis reviewer.
    Reviewer,
    /// Committee chairman.
    Chairman,
}

/// A faculty member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Display name.
    pub name: String,
    /// Identity key. Non-empty, must contain `@`.
    pub email: String,
    /// Roles this person can fill.
    pub roles: HashSet<Role>,
    /// Periods when this person cannot participate.
    pub unavailable: Vec<TimeSlot>,
}

impl Person {
    /// Creates a new person with no roles and no unavailability.
    ///
    /// Fails on an empty name or an email without `@`.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let email = email.into();
        if name.is_empty() {
            return Err(ModelError::EmptyField("person name"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(ModelError::InvalidEmail(email));
        }
        Ok(Self {
            name,
            email,
            roles: HashSet::new(),
            unavailable: Vec::new(),
        })
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Adds an unavailability window.
    pub fn with_unavailable(mut self, slot: TimeSlot) -> Self {
        self.unavailable.push(slot);
        self
    }

    /// Whether this person is free during the given slot.
    ///
    /// False iff any declared unavailability window overlaps `slot`.
    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        !self.unavailable.iter().any(|u| u.overlaps(slot))
    }

    /// Whether this person may serve as chairman.
    pub fn can_be_chairman(&self) -> bool {
        self.roles.contains(&Role::Chairman)
    }
}

// Identity is the email alone. Name, roles, and unavailability are
// attributes of the same person, not part of the key.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Person::new("", "a@x.org").is_err());
        assert!(Person::new("Alice", "").is_err());
        assert!(Person::new("Alice", "not-an-email").is_err());
        assert!(Person::new("Alice", "alice@example.com").is_ok());
    }

    #[test]
    fn test_identity_by_email() {
        let a = Person::new("Alice", "a@x.org").unwrap();
        let also_a = Person::new("Dr. Alice", "a@x.org").unwrap().with_role(Role::Chairman);
        let b = Person::new("Alice", "b@x.org").unwrap();
        assert_eq!(a, also_a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_roles() {
        let p = Person::new("Alice", "a@x.org")
            .unwrap()
            .with_role(Role::Chairman)
            .with_role(Role::Supervisor);
        assert!(p.can_be_chairman());
        assert!(p.roles.contains(&Role::Supervisor));
        assert!(!p.roles.contains(&Role::Reviewer));
    }

    #[test]
    fn test_availability() {
        let p = Person::new("Alice", "a@x.org")
            .unwrap()
            .with_unavailable(TimeSlot::new(600, 660).unwrap());

        assert!(p.is_available_at(&TimeSlot::new(540, 600).unwrap())); // touches only
        assert!(!p.is_available_at(&TimeSlot::new(630, 690).unwrap()));
        assert!(p.is_available_at(&TimeSlot::new(660, 720).unwrap()));
    }
}
