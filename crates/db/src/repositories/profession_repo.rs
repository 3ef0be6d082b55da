//! Repository for the read-only `professions` lookup table.

use sqlx::PgPool;

use crate::models::profession::Profession;

pub struct ProfessionRepo;

impl ProfessionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Profession>, sqlx::Error> {
        sqlx::query_as::<_, Profession>("SELECT id, name FROM professions ORDER BY name, id")
            .fetch_all(pool)
            .await
    }
}
