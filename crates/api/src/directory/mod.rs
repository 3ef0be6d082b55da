//! Person and phone workflows behind the HTTP handlers.
//!
//! [`PersonDirectory`] validates submissions, orchestrates the record store
//! and the report generator, and returns JSON view states. Validation
//! failures never surface as errors: the submission comes back with one
//! message per failing field and nothing is persisted.

mod person;
mod phone;

use std::sync::Arc;

use cadastro_core::error::CoreError;
use cadastro_core::job_level::{job_level_options, JobLevelOption};
use cadastro_core::report::ReportGenerator;
use cadastro_core::search::{Page, PageRequest, PersonFilter};
use cadastro_core::types::DbId;
use cadastro_core::validation::{normalize_optional, PersonInput, PhoneInput};
use cadastro_db::models::person::{Person, PersonSummary};
use cadastro_db::models::phone::Phone;
use cadastro_db::models::profession::Profession;
use cadastro_db::RecordStore;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub struct PersonDirectory {
    store: Arc<dyn RecordStore>,
    reports: Arc<dyn ReportGenerator>,
}

/// Optional search terms; blank terms are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub sex: Option<String>,
}

impl SearchCriteria {
    pub fn new(name: Option<String>, sex: Option<String>) -> Self {
        Self {
            name: normalize_optional(name),
            sex: normalize_optional(sex),
        }
    }

    /// Filter for on-screen listings: substring match on name and sex.
    pub fn listing_filter(&self) -> PersonFilter {
        PersonFilter::new()
            .name_contains(self.name.as_deref())
            .sex_contains(self.sex.as_deref())
    }

    /// Filter for the PDF report: substring match on name, exact match on sex.
    pub fn report_filter(&self) -> PersonFilter {
        PersonFilter::new()
            .name_contains(self.name.as_deref())
            .sex_equals(self.sex.as_deref())
    }
}

/// Contents of the person form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonForm {
    #[serde(flatten)]
    pub fields: PersonInput,
    /// Name of the stored résumé when editing a person that has one.
    pub resume_file_name: Option<String>,
}

impl From<PersonInput> for PersonForm {
    fn from(fields: PersonInput) -> Self {
        Self {
            fields,
            resume_file_name: None,
        }
    }
}

/// Registration screen: form, current search, one page of persons and the
/// lookup lists for the form's selection controls.
#[derive(Debug, Serialize)]
pub struct PersonView {
    pub person: PersonForm,
    pub criteria: SearchCriteria,
    pub people: Page<PersonSummary>,
    pub professions: Vec<Profession>,
    pub job_levels: Vec<JobLevelOption>,
    pub errors: Vec<String>,
}

/// Phone screen of one person.
#[derive(Debug, Serialize)]
pub struct PhoneView {
    pub person: Person,
    pub phone: PhoneInput,
    pub phones: Vec<Phone>,
    pub errors: Vec<String>,
}

/// A generated document ready to be streamed as an attachment.
#[derive(Debug)]
pub struct ReportFile {
    pub content_type: &'static str,
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

impl PersonDirectory {
    pub fn new(store: Arc<dyn RecordStore>, reports: Arc<dyn ReportGenerator>) -> Self {
        Self { store, reports }
    }

    async fn require_person(&self, id: DbId) -> AppResult<Person> {
        self.store
            .find_person(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Person",
                id,
            }))
    }

    async fn person_view(
        &self,
        person: PersonForm,
        criteria: SearchCriteria,
        request: &PageRequest,
        errors: Vec<String>,
    ) -> AppResult<PersonView> {
        let people = self
            .store
            .search_people(&criteria.listing_filter(), request)
            .await?;
        let professions = self.store.list_professions().await?;
        Ok(PersonView {
            person,
            criteria,
            people,
            professions,
            job_levels: job_level_options(),
            errors,
        })
    }
}
