//! Repository for the `persons` table, including the filtered search.
//!
//! Searches never join `phones`, so each person appears at most once. The
//! WHERE clause is assembled from the [`PersonFilter`] clauses with numbered
//! bind parameters; every bind is a string.

use cadastro_core::search::{
    contains_pattern, Clause, PageRequest, PersonFilter, Sort, SortDirection, SortField,
};
use cadastro_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{Person, PersonRow, PersonSummary, PersonSummaryRow, SavePerson};

/// Column list for full `persons` rows.
const COLUMNS: &str = "\
    id, name, sex, profession_id, job_level, \
    resume_data, resume_content_type, resume_file_name, \
    created_at, updated_at";

/// Column list for listing rows, aliased against `persons p` and `professions pr`.
const SUMMARY_COLUMNS: &str = "\
    p.id, p.name, p.sex, p.profession_id, pr.name AS profession_name, \
    p.job_level, p.resume_file_name";

const SUMMARY_FROM: &str = "persons p LEFT JOIN professions pr ON pr.id = p.profession_id";

pub struct PersonRepo;

impl PersonRepo {
    /// One page of persons matching `filter`, plus the total match count.
    pub async fn search(
        pool: &PgPool,
        filter: &PersonFilter,
        request: &PageRequest,
    ) -> Result<(Vec<PersonSummary>, i64), sqlx::Error> {
        let (where_clause, binds) = where_clause(filter);

        let count_query = format!("SELECT COUNT(*) FROM persons p{where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for value in &binds {
            count = count.bind(value);
        }
        let total = count.fetch_one(pool).await?;

        let limit_idx = binds.len() + 1;
        let offset_idx = binds.len() + 2;
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM {SUMMARY_FROM}{where_clause} \
             ORDER BY {} LIMIT ${limit_idx} OFFSET ${offset_idx}",
            order_by(request.sort)
        );
        let mut rows = sqlx::query_as::<_, PersonSummaryRow>(&query);
        for value in &binds {
            rows = rows.bind(value);
        }
        let rows = rows
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows.into_iter().map(PersonSummary::from).collect(), total))
    }

    /// Every person matching `filter`, unpaginated.
    pub async fn list(
        pool: &PgPool,
        filter: &PersonFilter,
        sort: Sort,
    ) -> Result<Vec<PersonSummary>, sqlx::Error> {
        let (where_clause, binds) = where_clause(filter);
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM {SUMMARY_FROM}{where_clause} ORDER BY {}",
            order_by(sort)
        );
        let mut rows = sqlx::query_as::<_, PersonSummaryRow>(&query);
        for value in &binds {
            rows = rows.bind(value);
        }
        let rows = rows.fetch_all(pool).await?;
        Ok(rows.into_iter().map(PersonSummary::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        let row = sqlx::query_as::<_, PersonRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Person::from))
    }

    pub async fn create(pool: &PgPool, input: &SavePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (\
                name, sex, profession_id, job_level, \
                resume_data, resume_content_type, resume_file_name\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let resume = input.resume.as_ref();
        let row = sqlx::query_as::<_, PersonRow>(&query)
            .bind(&input.name)
            .bind(input.sex.as_deref())
            .bind(input.profession_id)
            .bind(input.job_level.map(|level| level.code()))
            .bind(resume.map(|r| r.data.as_slice()))
            .bind(resume.map(|r| r.content_type.as_str()))
            .bind(resume.map(|r| r.file_name.as_str()))
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Overwrite every writable column. Returns `None` if no row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SavePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET \
                name = $2, sex = $3, profession_id = $4, job_level = $5, \
                resume_data = $6, resume_content_type = $7, resume_file_name = $8, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let resume = input.resume.as_ref();
        let row = sqlx::query_as::<_, PersonRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.sex.as_deref())
            .bind(input.profession_id)
            .bind(input.job_level.map(|level| level.code()))
            .bind(resume.map(|r| r.data.as_slice()))
            .bind(resume.map(|r| r.content_type.as_str()))
            .bind(resume.map(|r| r.file_name.as_str()))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Person::from))
    }

    /// Delete a person (phones cascade). Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Render `filter` as ` WHERE ...` (empty when there are no clauses) and the
/// values to bind, in placeholder order starting at `$1`.
fn where_clause(filter: &PersonFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    for clause in filter.clauses() {
        let idx = binds.len() + 1;
        match clause {
            Clause::NameContains(term) => {
                conditions.push(format!("p.name ILIKE ${idx} ESCAPE '\\'"));
                binds.push(contains_pattern(term));
            }
            Clause::SexContains(term) => {
                conditions.push(format!("p.sex ILIKE ${idx} ESCAPE '\\'"));
                binds.push(contains_pattern(term));
            }
            Clause::SexEquals(term) => {
                conditions.push(format!("LOWER(p.sex) = LOWER(${idx})"));
                binds.push(term.clone());
            }
        }
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// ORDER BY expression for `sort`, with `id` as the tiebreaker.
fn order_by(sort: Sort) -> String {
    let column = match sort.field {
        SortField::Name => "p.name",
        SortField::Sex => "p.sex",
        SortField::Id => return format!("p.id {}", direction(sort.direction)),
    };
    format!("{column} {}, p.id ASC", direction(sort.direction))
}

fn direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}
