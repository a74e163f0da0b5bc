//! Room model.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A room where defenses can be held.
///
/// The room number is the identity key; the name is display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Display name.
    pub name: String,
    /// Identity key (e.g. "A-204").
    pub number: String,
    /// Seats available. Always positive.
    pub capacity: i32,
}

impl Room {
    /// Creates a room with the default capacity of 20.
    ///
    /// Fails on an empty name or number.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let number = number.into();
        if name.is_empty() {
            return Err(ModelError::EmptyField("room name"));
        }
        if number.is_empty() {
            return Err(ModelError::EmptyField("room number"));
        }
        Ok(Self {
            name,
            number,
            capacity: 20,
        })
    }

    /// Sets the capacity. Fails if not positive.
    pub fn with_capacity(mut self, capacity: i32) -> Result<Self, ModelError> {
        if capacity <= 0 {
            return Err(ModelError::InvalidCapacity(capacity));
        }
        self.capacity = capacity;
        Ok(self)
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Room {}
