//! Phone entity model and DTOs.

use cadastro_core::types::{DbId, Timestamp};
use cadastro_core::validation::PhoneInput;
use serde::Serialize;
use sqlx::FromRow;

/// A phone number owned by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Phone {
    pub id: DbId,
    pub person_id: DbId,
    pub number: String,
    pub kind: String,
    pub created_at: Timestamp,
}

/// DTO for creating a phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePhone {
    pub person_id: DbId,
    pub number: String,
    pub kind: String,
}

impl CreatePhone {
    pub fn new(person_id: DbId, input: &PhoneInput) -> Self {
        Self {
            person_id,
            number: input.number.clone(),
            kind: input.kind.clone(),
        }
    }
}
