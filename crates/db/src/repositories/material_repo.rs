//! Repository for the `materiales` table.

use sqlx::PgPool;

use andamio_core::types::DbId;

use crate::models::material::{CreateMaterial, Material, UpdateMaterial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, nombre, unidad, precio_unitario, stock_minimo, is_active, created_at, updated_at";

/// Provides CRUD operations for materiales.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a new material, returning the created row.
    ///
    /// If `stock_minimo` is `None` in the input, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materiales (nombre, unidad, precio_unitario, stock_minimo)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&input.nombre)
            .bind(input.unidad.as_str())
            .bind(input.precio_unitario)
            .bind(input.stock_minimo)
            .fetch_one(pool)
            .await
    }

    /// Find a material by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materiales WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all materiales, active first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM materiales ORDER BY is_active DESC, nombre ASC");
        sqlx::query_as::<_, Material>(&query).fetch_all(pool).await
    }

    /// Update a material. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materiales SET
                precio_unitario = COALESCE($2, precio_unitario),
                stock_minimo = COALESCE($3, stock_minimo),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(input.precio_unitario)
            .bind(input.stock_minimo)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a material. Ledger rows keep referencing it, so materials
    /// are never hard-deleted. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE materiales SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
