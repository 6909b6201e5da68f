//! Repository for the `obreros` table.

use sqlx::PgPool;

use andamio_core::types::DbId;

use crate::models::obrero::{CreateObrero, Obrero, UpdateObrero};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre_completo, is_active, created_at, updated_at";

/// Provides CRUD operations for obreros.
pub struct ObreroRepo;

impl ObreroRepo {
    /// Insert a new obrero, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateObrero) -> Result<Obrero, sqlx::Error> {
        let query = format!(
            "INSERT INTO obreros (nombre_completo) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Obrero>(&query)
            .bind(&input.nombre_completo)
            .fetch_one(pool)
            .await
    }

    /// Find an obrero by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Obrero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM obreros WHERE id = $1");
        sqlx::query_as::<_, Obrero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all obreros, active first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Obrero>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM obreros ORDER BY is_active DESC, nombre_completo ASC");
        sqlx::query_as::<_, Obrero>(&query).fetch_all(pool).await
    }

    /// Update an obrero. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObrero,
    ) -> Result<Option<Obrero>, sqlx::Error> {
        let query = format!(
            "UPDATE obreros SET
                nombre_completo = COALESCE($2, nombre_completo),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Obrero>(&query)
            .bind(id)
            .bind(&input.nombre_completo)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate an obrero. Loan history keeps referencing it, so obreros
    /// are never hard-deleted. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE obreros SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
