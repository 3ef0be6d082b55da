//! Profession lookup model.

use cadastro_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Profession {
    pub id: DbId,
    pub name: String,
}

/// Professions seeded by `20260301000002_create_professions.sql`, in id order.
pub const SEED_PROFESSIONS: &[&str] = &[
    "Analista",
    "Desenvolvedor",
    "Designer",
    "Gerente",
    "Testador",
];
