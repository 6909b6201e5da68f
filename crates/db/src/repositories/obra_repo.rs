//! Repository for the `obras` table and the obra-obrero assignment table.

use sqlx::PgPool;

use andamio_core::types::DbId;

use crate::models::obra::{CreateObra, Obra, UpdateObra};
use crate::models::obrero::Obrero;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, direccion, estado, created_at, updated_at";

/// Provides CRUD and assignment operations for obras.
pub struct ObraRepo;

impl ObraRepo {
    /// Insert a new obra (always `abierta`), optionally assigning an initial
    /// obrero in the same transaction.
    pub async fn create(pool: &PgPool, input: &CreateObra) -> Result<Obra, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO obras (direccion) VALUES ($1) RETURNING {COLUMNS}"
        );
        let obra = sqlx::query_as::<_, Obra>(&query)
            .bind(&input.direccion)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(obrero_id) = input.obrero_id {
            sqlx::query("INSERT INTO obra_obrero (obra_id, obrero_id) VALUES ($1, $2)")
                .bind(obra.id)
                .bind(obrero_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(obra)
    }

    /// Find an obra by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Obra>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM obras WHERE id = $1");
        sqlx::query_as::<_, Obra>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all obras, open first, most recent first within each estado.
    pub async fn list(pool: &PgPool) -> Result<Vec<Obra>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM obras ORDER BY estado ASC, created_at DESC");
        sqlx::query_as::<_, Obra>(&query).fetch_all(pool).await
    }

    /// Update an obra. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObra,
    ) -> Result<Option<Obra>, sqlx::Error> {
        let query = format!(
            "UPDATE obras SET
                direccion = COALESCE($2, direccion),
                estado = COALESCE($3, estado),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Obra>(&query)
            .bind(id)
            .bind(&input.direccion)
            .bind(&input.estado)
            .fetch_optional(pool)
            .await
    }

    /// Close an obra. Returns `true` if a row changed estado.
    pub async fn close(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE obras SET estado = 'cerrada', updated_at = NOW()
             WHERE id = $1 AND estado = 'abierta'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Obra-obrero assignments ──────────────────────────────────────

    /// Assign an obrero to an obra. Idempotent: re-assigning is a no-op.
    pub async fn assign_obrero(
        pool: &PgPool,
        obra_id: DbId,
        obrero_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO obra_obrero (obra_id, obrero_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_obra_obrero DO NOTHING",
        )
        .bind(obra_id)
        .bind(obrero_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove an obrero from an obra. Returns `true` if an assignment existed.
    pub async fn unassign_obrero(
        pool: &PgPool,
        obra_id: DbId,
        obrero_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM obra_obrero WHERE obra_id = $1 AND obrero_id = $2")
                .bind(obra_id)
                .bind(obrero_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the obreros assigned to an obra.
    pub async fn list_obreros(pool: &PgPool, obra_id: DbId) -> Result<Vec<Obrero>, sqlx::Error> {
        sqlx::query_as::<_, Obrero>(
            "SELECT o.id, o.nombre_completo, o.is_active, o.created_at, o.updated_at
             FROM obreros o
             JOIN obra_obrero oo ON oo.obrero_id = o.id
             WHERE oo.obra_id = $1
             ORDER BY o.nombre_completo ASC",
        )
        .bind(obra_id)
        .fetch_all(pool)
        .await
    }
}
