//! Repository tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database with the migrations applied. Run with
//! `DATABASE_URL` set and `--ignored`.

use cadastro_core::resume::Resume;
use cadastro_core::search::{PageRequest, PersonFilter, Sort};
use cadastro_core::validation::PhoneInput;
use cadastro_db::models::person::SavePerson;
use cadastro_db::models::phone::CreatePhone;
use cadastro_db::models::session::CreateSession;
use cadastro_db::repositories::{PersonRepo, PhoneRepo, ProfessionRepo, SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

fn person(name: &str, sex: Option<&str>) -> SavePerson {
    SavePerson {
        name: name.to_string(),
        sex: sex.map(str::to_string),
        ..SavePerson::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_search_filters_and_paginates(pool: PgPool) {
    for (name, sex) in [
        ("Ana Souza", Some("F")),
        ("Bruno Lima", Some("M")),
        ("Mariana Alves", Some("F")),
        ("Juliana", Some("Feminino")),
    ] {
        PersonRepo::create(&pool, &person(name, sex)).await.unwrap();
    }

    let filter = PersonFilter::new()
        .name_contains(Some("ana"))
        .sex_contains(Some("F"));
    let request = PageRequest::from_params(Some(0), Some(2), None).unwrap();
    let (rows, total) = PersonRepo::search(&pool, &filter, &request).await.unwrap();

    assert_eq!(total, 3);
    let names: Vec<_> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Souza", "Juliana"]);

    let exact = PersonFilter::new().sex_equals(Some("f"));
    let rows = PersonRepo::list(&pool, &exact, Sort::default()).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_like_wildcards_match_literally(pool: PgPool) {
    PersonRepo::create(&pool, &person("100% Silva", None)).await.unwrap();
    PersonRepo::create(&pool, &person("Silva", None)).await.unwrap();

    let filter = PersonFilter::new().name_contains(Some("%"));
    let rows = PersonRepo::list(&pool, &filter, Sort::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "100% Silva");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_resume_round_trips_and_update_overwrites(pool: PgPool) {
    let professions = ProfessionRepo::list(&pool).await.unwrap();
    let created = PersonRepo::create(
        &pool,
        &SavePerson {
            name: "Ana".into(),
            profession_id: Some(professions[0].id),
            resume: Resume::from_parts(
                Some(b"%PDF".to_vec()),
                Some("application/pdf".into()),
                Some("cv.pdf".into()),
            ),
            ..SavePerson::default()
        },
    )
    .await
    .unwrap();

    let found = PersonRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.resume.as_ref().map(|r| r.data.as_slice()), Some(&b"%PDF"[..]));

    let updated = PersonRepo::update(&pool, created.id, &person("Ana Maria", None))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.resume.is_none());
    assert!(updated.profession_id.is_none());

    assert!(PersonRepo::update(&pool, created.id + 100, &person("X", None))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_person_delete_cascades_to_phones(pool: PgPool) {
    let created = PersonRepo::create(&pool, &person("Ana", None)).await.unwrap();
    let phone = PhoneRepo::create(
        &pool,
        &CreatePhone::new(created.id, &PhoneInput::new("1111", "fixo")),
    )
    .await
    .unwrap();

    assert!(PersonRepo::delete(&pool, created.id).await.unwrap());
    assert!(PhoneRepo::find_by_id(&pool, phone.id).await.unwrap().is_none());
    assert!(!PersonRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_phone_requires_existing_person(pool: PgPool) {
    let result = PhoneRepo::create(&pool, &CreatePhone::new(999, &PhoneInput::new("1", "x"))).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_user_ensure_and_lookup(pool: PgPool) {
    assert!(UserRepo::ensure(&pool, "admin", "hash", "admin").await.unwrap());
    assert!(!UserRepo::ensure(&pool, "admin", "hash", "admin").await.unwrap());

    let user = UserRepo::find_by_login(&pool, "admin").await.unwrap().unwrap();
    assert_eq!(user.role, "admin");
    assert!(user.is_active);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_session_lifecycle(pool: PgPool) {
    UserRepo::ensure(&pool, "admin", "hash", "admin").await.unwrap();
    let user = UserRepo::find_by_login(&pool, "admin").await.unwrap().unwrap();

    let input = CreateSession {
        jti: "s1".to_string(),
        user_id: user.id,
        expires_at: Utc::now() + Duration::minutes(5),
    };
    let session = SessionRepo::create(&pool, &input).await.unwrap();
    assert!(!session.is_revoked);

    let found = SessionRepo::find_active_user(&pool, "s1").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.role, "admin");

    assert!(SessionRepo::revoke(&pool, "s1").await.unwrap());
    assert!(!SessionRepo::revoke(&pool, "s1").await.unwrap());
    assert!(SessionRepo::find_active_user(&pool, "s1").await.unwrap().is_none());
}
