//! Person entity model and DTOs.

use cadastro_core::job_level::JobLevel;
use cadastro_core::resume::Resume;
use cadastro_core::types::{DbId, Timestamp};
use cadastro_core::validation::PersonInput;
use serde::Serialize;
use sqlx::FromRow;

/// A registered person, including the stored résumé when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub job_level: Option<JobLevel>,
    pub resume: Option<Resume>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Person {
    /// The form payload that would re-create this person's editable fields.
    pub fn to_input(&self) -> PersonInput {
        PersonInput {
            id: Some(self.id),
            name: self.name.clone(),
            sex: self.sex.clone(),
            profession_id: self.profession_id,
            job_level: self.job_level,
        }
    }
}

/// Raw `persons` row; résumé parts and job level are stored as plain columns.
#[derive(Debug, FromRow)]
pub(crate) struct PersonRow {
    pub id: DbId,
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub job_level: Option<String>,
    pub resume_data: Option<Vec<u8>>,
    pub resume_content_type: Option<String>,
    pub resume_file_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            sex: row.sex,
            profession_id: row.profession_id,
            job_level: row.job_level.and_then(|code| code.parse().ok()),
            resume: Resume::from_parts(
                row.resume_data,
                row.resume_content_type,
                row.resume_file_name,
            ),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Listing projection: no résumé bytes, profession name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub id: DbId,
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub profession_name: Option<String>,
    pub job_level: Option<JobLevel>,
    pub resume_file_name: Option<String>,
}

impl PersonSummary {
    /// Cells of one person report row, in template column order.
    pub fn report_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.sex.clone().unwrap_or_default(),
            self.profession_name.clone().unwrap_or_default(),
            self.job_level
                .map(|level| level.label().to_string())
                .unwrap_or_default(),
        ]
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PersonSummaryRow {
    pub id: DbId,
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub profession_name: Option<String>,
    pub job_level: Option<String>,
    pub resume_file_name: Option<String>,
}

impl From<PersonSummaryRow> for PersonSummary {
    fn from(row: PersonSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            sex: row.sex,
            profession_id: row.profession_id,
            profession_name: row.profession_name,
            job_level: row.job_level.and_then(|code| code.parse().ok()),
            resume_file_name: row.resume_file_name,
        }
    }
}

/// Full set of writable person fields. Updates overwrite every column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePerson {
    pub name: String,
    pub sex: Option<String>,
    pub profession_id: Option<DbId>,
    pub job_level: Option<JobLevel>,
    pub resume: Option<Resume>,
}

impl SavePerson {
    pub fn new(input: &PersonInput, resume: Option<Resume>) -> Self {
        Self {
            name: input.name.clone(),
            sex: input.sex.clone(),
            profession_id: input.profession_id,
            job_level: input.job_level,
            resume,
        }
    }
}
