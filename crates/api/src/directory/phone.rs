use cadastro_core::error::CoreError;
use cadastro_core::types::DbId;
use cadastro_core::validation::PhoneInput;
use cadastro_db::models::person::Person;
use cadastro_db::models::phone::CreatePhone;

use super::{PersonDirectory, PhoneView};
use crate::error::{AppError, AppResult};

impl PersonDirectory {
    pub async fn phones(&self, person_id: DbId) -> AppResult<PhoneView> {
        let person = self.require_person(person_id).await?;
        self.phone_view(person, PhoneInput::default(), Vec::new())
            .await
    }

    /// Attach a phone to a person. Empty fields are reported, not stored.
    pub async fn add_phone(&self, person_id: DbId, input: PhoneInput) -> AppResult<PhoneView> {
        let person = self.require_person(person_id).await?;

        let errors = input.validation_messages();
        if !errors.is_empty() {
            tracing::debug!(person_id, ?errors, "Phone submission rejected");
            return self.phone_view(person, input, errors).await;
        }

        let phone = self
            .store
            .create_phone(&CreatePhone::new(person.id, &input))
            .await?;
        tracing::info!(person_id, phone_id = phone.id, "Phone added");

        self.phone_view(person, PhoneInput::default(), Vec::new())
            .await
    }

    /// Delete one phone and return its owner's remaining phones.
    pub async fn remove_phone(&self, phone_id: DbId) -> AppResult<PhoneView> {
        let phone = self
            .store
            .find_phone(phone_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Phone",
                id: phone_id,
            }))?;

        self.store.delete_phone(phone.id).await?;
        tracing::info!(person_id = phone.person_id, phone_id, "Phone removed");

        let person = self.require_person(phone.person_id).await?;
        self.phone_view(person, PhoneInput::default(), Vec::new())
            .await
    }

    async fn phone_view(
        &self,
        person: Person,
        phone: PhoneInput,
        errors: Vec<String>,
    ) -> AppResult<PhoneView> {
        let phones = self.store.list_phones(person.id).await?;
        Ok(PhoneView {
            person,
            phone,
            phones,
            errors,
        })
    }
}
