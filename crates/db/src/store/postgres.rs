//! PostgreSQL-backed store delegating to the repositories.

use async_trait::async_trait;
use cadastro_core::search::{Page, PageRequest, PersonFilter, Sort};
use cadastro_core::types::DbId;

use super::{CredentialStore, RecordStore, StoreError};
use crate::models::person::{Person, PersonSummary, SavePerson};
use crate::models::phone::{CreatePhone, Phone};
use crate::models::profession::Profession;
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::User;
use crate::repositories::{PersonRepo, PhoneRepo, ProfessionRepo, SessionRepo, UserRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn search_people(
        &self,
        filter: &PersonFilter,
        request: &PageRequest,
    ) -> Result<Page<PersonSummary>, StoreError> {
        let (content, total) = PersonRepo::search(&self.pool, filter, request).await?;
        tracing::debug!(
            clauses = filter.clauses().len(),
            page = request.page,
            total,
            "Person search"
        );
        Ok(Page::new(content, request, total))
    }

    async fn list_people(
        &self,
        filter: &PersonFilter,
        sort: Sort,
    ) -> Result<Vec<PersonSummary>, StoreError> {
        Ok(PersonRepo::list(&self.pool, filter, sort).await?)
    }

    async fn find_person(&self, id: DbId) -> Result<Option<Person>, StoreError> {
        Ok(PersonRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_person(&self, input: &SavePerson) -> Result<Person, StoreError> {
        Ok(PersonRepo::create(&self.pool, input).await?)
    }

    async fn update_person(
        &self,
        id: DbId,
        input: &SavePerson,
    ) -> Result<Option<Person>, StoreError> {
        Ok(PersonRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_person(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(PersonRepo::delete(&self.pool, id).await?)
    }

    async fn list_phones(&self, person_id: DbId) -> Result<Vec<Phone>, StoreError> {
        Ok(PhoneRepo::list_by_person(&self.pool, person_id).await?)
    }

    async fn find_phone(&self, id: DbId) -> Result<Option<Phone>, StoreError> {
        Ok(PhoneRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_phone(&self, input: &CreatePhone) -> Result<Phone, StoreError> {
        Ok(PhoneRepo::create(&self.pool, input).await?)
    }

    async fn delete_phone(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(PhoneRepo::delete(&self.pool, id).await?)
    }

    async fn list_professions(&self) -> Result<Vec<Profession>, StoreError> {
        Ok(ProfessionRepo::list(&self.pool).await?)
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_login(&self.pool, login).await?)
    }

    async fn ensure_user(
        &self,
        login: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<bool, StoreError> {
        Ok(UserRepo::ensure(&self.pool, login, password_hash, role).await?)
    }

    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_session_user(&self, jti: &str) -> Result<Option<User>, StoreError> {
        Ok(SessionRepo::find_active_user(&self.pool, jti).await?)
    }

    async fn revoke_session(&self, jti: &str) -> Result<bool, StoreError> {
        Ok(SessionRepo::revoke(&self.pool, jti).await?)
    }
}
