//! Field-level validation for person and phone submissions.
//!
//! Validation failures are recovered locally by the caller: the submission is
//! re-presented with one human-readable message per failing field, in form
//! order.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::job_level::JobLevel;
use crate::types::DbId;

pub const MSG_NAME_REQUIRED: &str = "Nome não pode ser vazio";
pub const MSG_NUMBER_REQUIRED: &str = "Número deve ser informado";
pub const MSG_KIND_REQUIRED: &str = "Tipo deve ser informado";

/// Person fields submitted by the registration form.
///
/// `id` is `Some` (and positive) when an existing record is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonInput {
    pub id: Option<DbId>,
    #[validate(length(min = 1))]
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub job_level: Option<JobLevel>,
}

impl PersonInput {
    /// The identity of a pre-existing record, if this submission edits one.
    pub fn existing_id(&self) -> Option<DbId> {
        self.id.filter(|id| *id > 0)
    }

    /// Trim text fields and turn blank optional fields into `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.sex = normalize_optional(self.sex);
        self
    }

    /// Messages for every failing field, in form order.
    pub fn validation_messages(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_messages(&errors, &[("name", MSG_NAME_REQUIRED)]),
        }
    }
}

/// Phone fields submitted for a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PhoneInput {
    #[validate(length(min = 1))]
    pub number: String,
    #[validate(length(min = 1))]
    pub kind: String,
}

impl PhoneInput {
    pub fn new(number: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            number: number.into().trim().to_string(),
            kind: kind.into().trim().to_string(),
        }
    }

    /// Messages for every failing field, in form order.
    pub fn validation_messages(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_messages(
                &errors,
                &[("number", MSG_NUMBER_REQUIRED), ("kind", MSG_KIND_REQUIRED)],
            ),
        }
    }
}

/// Trim an optional text field, mapping blank values to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One message per failing field, walking `fields` (name, message) in order
/// so the output is deterministic.
fn collect_messages(errors: &ValidationErrors, fields: &[(&str, &str)]) -> Vec<String> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter(|(field, _)| by_field.contains_key(*field))
        .map(|(_, message)| message.to_string())
        .collect()
}
