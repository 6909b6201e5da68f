//! Repository for the `bodegas` table.

use sqlx::PgPool;

use andamio_core::types::DbId;

use crate::models::bodega::{Bodega, CreateBodega, UpdateBodega};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, kind, obra_id, is_active, created_at, updated_at";

/// Provides CRUD operations for bodegas.
pub struct BodegaRepo;

impl BodegaRepo {
    /// Insert a new bodega, returning the created row.
    ///
    /// The kind/obra pairing rule is also a DB CHECK; a violation surfaces
    /// as a database error the API layer turns into a 400.
    pub async fn create(pool: &PgPool, input: &CreateBodega) -> Result<Bodega, sqlx::Error> {
        let query = format!(
            "INSERT INTO bodegas (nombre, kind, obra_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bodega>(&query)
            .bind(&input.nombre)
            .bind(input.kind.as_str())
            .bind(input.obra_id)
            .fetch_one(pool)
            .await
    }

    /// Find a bodega by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bodega>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bodegas WHERE id = $1");
        sqlx::query_as::<_, Bodega>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bodegas, central first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Bodega>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bodegas ORDER BY kind ASC, nombre ASC");
        sqlx::query_as::<_, Bodega>(&query).fetch_all(pool).await
    }

    /// Update a bodega. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBodega,
    ) -> Result<Option<Bodega>, sqlx::Error> {
        let query = format!(
            "UPDATE bodegas SET
                nombre = COALESCE($2, nombre),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bodega>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a bodega. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bodegas SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
