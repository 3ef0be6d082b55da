use cadastro_core::error::CoreError;
use cadastro_core::report::{PERSON_REPORT, REPORT_FILE_NAME};
use cadastro_core::resume::Resume;
use cadastro_core::search::{PageRequest, Sort};
use cadastro_core::types::DbId;
use cadastro_core::validation::PersonInput;
use cadastro_db::models::person::{PersonSummary, SavePerson};

use super::{PersonDirectory, PersonForm, PersonView, ReportFile, SearchCriteria};
use crate::error::{AppError, AppResult};

impl PersonDirectory {
    /// Empty form plus the requested page of all persons.
    pub async fn listing(&self, request: &PageRequest) -> AppResult<PersonView> {
        self.person_view(
            PersonForm::default(),
            SearchCriteria::default(),
            request,
            Vec::new(),
        )
        .await
    }

    /// Create or fully overwrite a person.
    ///
    /// A non-empty `upload` replaces the résumé. Without one, an edit keeps
    /// the stored résumé and a new person gets none. Editing an id that does
    /// not exist is a not-found error.
    pub async fn save(
        &self,
        input: PersonInput,
        upload: Option<Resume>,
        request: &PageRequest,
    ) -> AppResult<PersonView> {
        let input = input.normalized();
        let errors = input.validation_messages();
        if !errors.is_empty() {
            tracing::debug!(?errors, "Person submission rejected");
            return self
                .person_view(input.into(), SearchCriteria::default(), request, errors)
                .await;
        }

        let upload = upload.filter(|resume| !resume.is_empty());
        let person = match input.existing_id() {
            Some(id) => {
                let resume = match upload {
                    Some(resume) => Some(resume),
                    None => self.require_person(id).await?.resume,
                };
                self.store
                    .update_person(id, &SavePerson::new(&input, resume))
                    .await?
                    .ok_or(AppError::Core(CoreError::NotFound {
                        entity: "Person",
                        id,
                    }))?
            }
            None => {
                self.store
                    .create_person(&SavePerson::new(&input, upload))
                    .await?
            }
        };
        tracing::info!(
            person_id = person.id,
            has_resume = person.resume.is_some(),
            "Person saved"
        );

        self.listing(request).await
    }

    /// Delete a person and its phones. A missing id is silently ignored.
    pub async fn delete(&self, id: DbId, request: &PageRequest) -> AppResult<PersonView> {
        if self.store.delete_person(id).await? {
            tracing::info!(person_id = id, "Person deleted");
        } else {
            tracing::debug!(person_id = id, "Delete of missing person ignored");
        }
        self.listing(request).await
    }

    /// Form pre-filled with a stored person.
    pub async fn edit(&self, id: DbId, request: &PageRequest) -> AppResult<PersonView> {
        let person = self.require_person(id).await?;
        let form = PersonForm {
            fields: person.to_input(),
            resume_file_name: person.resume.map(|resume| resume.file_name),
        };
        self.person_view(form, SearchCriteria::default(), request, Vec::new())
            .await
    }

    /// One page of persons matching `criteria` (substring on name and sex).
    pub async fn search(
        &self,
        criteria: SearchCriteria,
        request: &PageRequest,
    ) -> AppResult<PersonView> {
        self.person_view(PersonForm::default(), criteria, request, Vec::new())
            .await
    }

    /// PDF listing of every person matching `criteria`, with exact sex match.
    pub async fn report(&self, criteria: &SearchCriteria) -> AppResult<ReportFile> {
        let people = self
            .store
            .list_people(&criteria.report_filter(), Sort::default())
            .await?;
        let rows: Vec<Vec<String>> = people.iter().map(PersonSummary::report_row).collect();

        let bytes = self
            .reports
            .generate(PERSON_REPORT, &rows)
            .map_err(|e| AppError::InternalError(format!("Report generation failed: {e}")))?;
        tracing::info!(rows = rows.len(), size = bytes.len(), "Person report generated");

        Ok(ReportFile {
            content_type: self.reports.content_type(),
            file_name: REPORT_FILE_NAME,
            bytes,
        })
    }

    /// The stored résumé of a person, `None` when there is nothing to send.
    pub async fn resume(&self, id: DbId) -> AppResult<Option<Resume>> {
        let person = self.require_person(id).await?;
        Ok(person.resume.filter(|resume| !resume.is_empty()))
    }
}
