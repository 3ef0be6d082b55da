//! Repository for the `phones` table.

use cadastro_core::types::DbId;
use sqlx::PgPool;

use crate::models::phone::{CreatePhone, Phone};

const COLUMNS: &str = "id, person_id, number, kind, created_at";

pub struct PhoneRepo;

impl PhoneRepo {
    /// Insert a phone. Fails with a foreign-key violation if the person is missing.
    pub async fn create(pool: &PgPool, input: &CreatePhone) -> Result<Phone, sqlx::Error> {
        let query = format!(
            "INSERT INTO phones (person_id, number, kind) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phone>(&query)
            .bind(input.person_id)
            .bind(&input.number)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Phone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phones WHERE id = $1");
        sqlx::query_as::<_, Phone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Phones of a person in insertion order.
    pub async fn list_by_person(pool: &PgPool, person_id: DbId) -> Result<Vec<Phone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phones WHERE person_id = $1 ORDER BY id");
        sqlx::query_as::<_, Phone>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a phone by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM phones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
