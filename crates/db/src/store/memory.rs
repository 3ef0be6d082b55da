//! In-process store for local runs and tests.
//!
//! Mirrors the PostgreSQL behaviour that callers can observe: sequential ids
//! per table, foreign-key checks, cascading phone deletion, `NULLS LAST`
//! ordering on ascending sorts and `id` as the ordering tiebreaker.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use cadastro_core::roles::{ROLE_ADMIN, ROLE_USER};
use cadastro_core::search::{Page, PageRequest, PersonFilter, Sort, SortDirection, SortField};
use cadastro_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CredentialStore, RecordStore, StoreError};
use crate::models::person::{Person, PersonSummary, SavePerson};
use crate::models::phone::{CreatePhone, Phone};
use crate::models::profession::{Profession, SEED_PROFESSIONS};
use crate::models::session::{CreateSession, UserSession};
use crate::models::user::User;

#[derive(Debug, Default)]
struct State {
    persons: BTreeMap<DbId, Person>,
    phones: BTreeMap<DbId, Phone>,
    professions: Vec<Profession>,
    users: HashMap<String, User>,
    sessions: HashMap<String, UserSession>,
    last_person_id: DbId,
    last_phone_id: DbId,
    last_user_id: DbId,
}

impl State {
    fn summary(&self, person: &Person) -> PersonSummary {
        let profession_name = person.profession_id.and_then(|id| {
            self.professions
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.name.clone())
        });
        PersonSummary {
            id: person.id,
            name: person.name.clone(),
            sex: person.sex.clone(),
            profession_id: person.profession_id,
            profession_name,
            job_level: person.job_level,
            resume_file_name: person.resume.as_ref().map(|r| r.file_name.clone()),
        }
    }

    fn matching(&self, filter: &PersonFilter, sort: Sort) -> Vec<PersonSummary> {
        let mut matches: Vec<&Person> = self
            .persons
            .values()
            .filter(|p| filter.matches(&p.name, p.sex.as_deref()))
            .collect();
        matches.sort_by(|a, b| compare(a, b, sort));
        matches.into_iter().map(|p| self.summary(p)).collect()
    }

    fn check_profession(&self, profession_id: Option<DbId>) -> Result<(), StoreError> {
        match profession_id {
            Some(id) if !self.professions.iter().any(|p| p.id == id) => Err(
                StoreError::Constraint(format!("profession {id} does not exist")),
            ),
            _ => Ok(()),
        }
    }
}

fn next_id(last: &mut DbId) -> DbId {
    *last += 1;
    *last
}

/// Order two persons the way `ORDER BY <field> <dir>, id ASC` does.
fn compare(a: &Person, b: &Person, sort: Sort) -> Ordering {
    let primary = match sort.field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Sex => nulls_last(a.sex.as_deref(), b.sex.as_deref()),
        SortField::Id => a.id.cmp(&b.id),
    };
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then(a.id.cmp(&b.id))
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Record and credential store held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store seeded with the standard profession list.
    pub fn new() -> Self {
        let professions = SEED_PROFESSIONS
            .iter()
            .zip(1..)
            .map(|(name, id)| Profession {
                id,
                name: name.to_string(),
            })
            .collect();
        Self {
            state: RwLock::new(State {
                professions,
                ..State::default()
            }),
        }
    }

    /// Enable or disable a login. Returns false when the login is unknown.
    pub async fn set_user_active(&self, login: &str, active: bool) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(login) {
            Some(user) => {
                user.is_active = active;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search_people(
        &self,
        filter: &PersonFilter,
        request: &PageRequest,
    ) -> Result<Page<PersonSummary>, StoreError> {
        let state = self.state.read().await;
        let all = state.matching(filter, request.sort);
        let total = all.len() as i64;
        let content = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn list_people(
        &self,
        filter: &PersonFilter,
        sort: Sort,
    ) -> Result<Vec<PersonSummary>, StoreError> {
        Ok(self.state.read().await.matching(filter, sort))
    }

    async fn find_person(&self, id: DbId) -> Result<Option<Person>, StoreError> {
        Ok(self.state.read().await.persons.get(&id).cloned())
    }

    async fn create_person(&self, input: &SavePerson) -> Result<Person, StoreError> {
        let mut state = self.state.write().await;
        state.check_profession(input.profession_id)?;

        let now = Utc::now();
        let person = Person {
            id: next_id(&mut state.last_person_id),
            name: input.name.clone(),
            sex: input.sex.clone(),
            profession_id: input.profession_id,
            job_level: input.job_level,
            resume: input.resume.clone(),
            created_at: now,
            updated_at: now,
        };
        state.persons.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update_person(
        &self,
        id: DbId,
        input: &SavePerson,
    ) -> Result<Option<Person>, StoreError> {
        let mut state = self.state.write().await;
        state.check_profession(input.profession_id)?;

        let Some(person) = state.persons.get_mut(&id) else {
            return Ok(None);
        };
        person.name = input.name.clone();
        person.sex = input.sex.clone();
        person.profession_id = input.profession_id;
        person.job_level = input.job_level;
        person.resume = input.resume.clone();
        person.updated_at = Utc::now();
        Ok(Some(person.clone()))
    }

    async fn delete_person(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if state.persons.remove(&id).is_none() {
            return Ok(false);
        }
        let before = state.phones.len();
        state.phones.retain(|_, phone| phone.person_id != id);
        tracing::debug!(
            person_id = id,
            phones = before - state.phones.len(),
            "Cascaded person delete to phones"
        );
        Ok(true)
    }

    async fn list_phones(&self, person_id: DbId) -> Result<Vec<Phone>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .phones
            .values()
            .filter(|phone| phone.person_id == person_id)
            .cloned()
            .collect())
    }

    async fn find_phone(&self, id: DbId) -> Result<Option<Phone>, StoreError> {
        Ok(self.state.read().await.phones.get(&id).cloned())
    }

    async fn create_phone(&self, input: &CreatePhone) -> Result<Phone, StoreError> {
        let mut state = self.state.write().await;
        if !state.persons.contains_key(&input.person_id) {
            return Err(StoreError::Constraint(format!(
                "person {} does not exist",
                input.person_id
            )));
        }
        let phone = Phone {
            id: next_id(&mut state.last_phone_id),
            person_id: input.person_id,
            number: input.number.clone(),
            kind: input.kind.clone(),
            created_at: Utc::now(),
        };
        state.phones.insert(phone.id, phone.clone());
        Ok(phone)
    }

    async fn delete_phone(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.phones.remove(&id).is_some())
    }

    async fn list_professions(&self) -> Result<Vec<Profession>, StoreError> {
        let mut professions = self.state.read().await.professions.clone();
        professions.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(professions)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(login).cloned())
    }

    async fn ensure_user(
        &self,
        login: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<bool, StoreError> {
        if ![ROLE_ADMIN, ROLE_USER].contains(&role) {
            return Ok(false);
        }
        let mut state = self.state.write().await;
        if state.users.contains_key(login) {
            return Ok(false);
        }
        let now = Utc::now();
        let user = User {
            id: next_id(&mut state.last_user_id),
            login: login.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.login.clone(), user);
        Ok(true)
    }

    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        let mut state = self.state.write().await;
        if !state.users.values().any(|u| u.id == input.user_id) {
            return Err(StoreError::Constraint(format!(
                "user {} does not exist",
                input.user_id
            )));
        }
        if state.sessions.contains_key(&input.jti) {
            return Err(StoreError::Constraint(format!(
                "session {} already exists",
                input.jti
            )));
        }
        let session = UserSession {
            jti: input.jti.clone(),
            user_id: input.user_id,
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        state.sessions.insert(session.jti.clone(), session.clone());
        Ok(session)
    }

    async fn find_session_user(&self, jti: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        let Some(session) = state
            .sessions
            .get(jti)
            .filter(|s| s.is_active_at(Utc::now()))
        else {
            return Ok(None);
        };
        Ok(state
            .users
            .values()
            .find(|u| u.id == session.user_id)
            .cloned())
    }

    async fn revoke_session(&self, jti: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(jti) {
            Some(session) if !session.is_revoked => {
                session.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
