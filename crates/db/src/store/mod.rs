//! Record store abstractions.
//!
//! The API depends on [`RecordStore`] and [`CredentialStore`] trait objects so
//! the same handlers run against PostgreSQL ([`postgres::PgStore`]) or the
//! in-process [`memory::MemoryStore`].

use async_trait::async_trait;
use cadastro_core::search::{Page, PageRequest, PersonFilter, Sort};
use cadastro_core::types::DbId;

use crate::models::person::{Person, PersonSummary, SavePerson};
use crate::models::phone::{CreatePhone, Phone};
use crate::models::profession::Profession;
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::User;

pub mod memory;
pub mod postgres;

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referential or check constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Persistence of persons, phones and the profession lookup list.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// One page of persons matching `filter`.
    async fn search_people(
        &self,
        filter: &PersonFilter,
        request: &PageRequest,
    ) -> Result<Page<PersonSummary>, StoreError>;

    /// All persons matching `filter`, unpaginated.
    async fn list_people(
        &self,
        filter: &PersonFilter,
        sort: Sort,
    ) -> Result<Vec<PersonSummary>, StoreError>;

    async fn find_person(&self, id: DbId) -> Result<Option<Person>, StoreError>;

    async fn create_person(&self, input: &SavePerson) -> Result<Person, StoreError>;

    /// Overwrite a person. `None` when no person has `id`.
    async fn update_person(
        &self,
        id: DbId,
        input: &SavePerson,
    ) -> Result<Option<Person>, StoreError>;

    /// Delete a person and its phones. Returns false when nothing was deleted.
    async fn delete_person(&self, id: DbId) -> Result<bool, StoreError>;

    async fn list_phones(&self, person_id: DbId) -> Result<Vec<Phone>, StoreError>;

    async fn find_phone(&self, id: DbId) -> Result<Option<Phone>, StoreError>;

    async fn create_phone(&self, input: &CreatePhone) -> Result<Phone, StoreError>;

    async fn delete_phone(&self, id: DbId) -> Result<bool, StoreError>;

    async fn list_professions(&self) -> Result<Vec<Profession>, StoreError>;
}

/// Login accounts and their sessions, consulted by the auth gate.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, StoreError>;

    /// Create the account unless the login exists. Returns true when created.
    async fn ensure_user(
        &self,
        login: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<bool, StoreError>;

    /// Record a newly issued session for an existing account.
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError>;

    /// The account behind session `jti`, while the session is neither revoked
    /// nor expired.
    async fn find_session_user(&self, jti: &str) -> Result<Option<User>, StoreError>;

    /// Revoke session `jti`. Returns false when it is unknown or already revoked.
    async fn revoke_session(&self, jti: &str) -> Result<bool, StoreError>;
}
