//! The warehouse inventory ledger.
//!
//! `record_movement` is the only writer of `inventario` lines and the only
//! producer of `movimientos_inventario` rows. It runs as one transaction:
//! the source line is read under `FOR UPDATE`, the stock check happens on
//! the locked value, both line updates and the movement append commit
//! together or not at all.

use sqlx::{PgPool, Postgres, Transaction};

use andamio_core::error::CoreError;
use andamio_core::inventory::{normalize_movement, NormalizedMovement};
use andamio_core::types::DbId;

use crate::models::inventario::{MovementFilter, RecordMovement, StockLevel, StockMovement};
use crate::repositories::map_db_err;

/// Column list for movement queries.
const MOVEMENT_COLUMNS: &str = "id, material_id, bodega_origen_id, bodega_destino_id, \
    kind, cantidad, usuario_id, obra_id, nota, created_at";

/// Default page size for movement listings.
const DEFAULT_PAGE_SIZE: i64 = 50;
/// Hard cap on movement page size.
const MAX_PAGE_SIZE: i64 = 200;

/// The inventory ledger: movement recording and stock-level queries.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Record a stock movement, atomically updating the affected inventory
    /// lines and appending the immutable ledger row.
    ///
    /// Fails with `InvalidMovementShape` / `Validation` before touching the
    /// database, with `NotFound` for unknown material or bodegas, and with
    /// `InsufficientStock` when the source line would go negative. On any
    /// error the transaction rolls back and no state changes.
    pub async fn record_movement(
        pool: &PgPool,
        input: &RecordMovement,
        usuario_id: DbId,
    ) -> Result<StockMovement, CoreError> {
        let normalized = normalize_movement(
            input.kind,
            input.bodega_origen_id,
            input.bodega_destino_id,
            input.cantidad,
        )?;

        let mut tx = pool.begin().await.map_err(map_db_err)?;

        Self::ensure_material_exists(&mut tx, input.material_id).await?;
        if let Some(bodega_id) = normalized.origen {
            Self::ensure_bodega_exists(&mut tx, bodega_id).await?;
        }
        if let Some(bodega_id) = normalized.destino {
            Self::ensure_bodega_exists(&mut tx, bodega_id).await?;
        }

        Self::apply_lines(&mut tx, input.material_id, &normalized).await?;

        let query = format!(
            "INSERT INTO movimientos_inventario
                (material_id, bodega_origen_id, bodega_destino_id, kind, cantidad,
                 usuario_id, obra_id, nota)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {MOVEMENT_COLUMNS}"
        );
        let movement = sqlx::query_as::<_, StockMovement>(&query)
            .bind(input.material_id)
            .bind(normalized.origen)
            .bind(normalized.destino)
            .bind(input.kind.as_str())
            .bind(normalized.cantidad)
            .bind(usuario_id)
            .bind(input.obra_id)
            .bind(&input.nota)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        tracing::info!(
            movement_id = movement.id,
            kind = %movement.kind,
            material_id = movement.material_id,
            cantidad = movement.cantidad,
            "Recorded stock movement"
        );
        Ok(movement)
    }

    /// Current quantity for a (bodega, material) pair; 0 when no line exists.
    pub async fn query_level(
        pool: &PgPool,
        bodega_id: DbId,
        material_id: DbId,
    ) -> Result<i64, CoreError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(
                (SELECT cantidad FROM inventario WHERE bodega_id = $1 AND material_id = $2), 0)",
        )
        .bind(bodega_id)
        .bind(material_id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;
        Ok(row.0)
    }

    /// Stock level for a (bodega, material) pair with the below-minimum flag.
    pub async fn level(
        pool: &PgPool,
        bodega_id: DbId,
        material_id: DbId,
    ) -> Result<StockLevel, CoreError> {
        sqlx::query_as::<_, StockLevel>(
            "SELECT $1::bigint AS bodega_id,
                    m.id AS material_id,
                    COALESCE(i.cantidad, 0) AS cantidad,
                    m.stock_minimo,
                    (COALESCE(i.cantidad, 0) < m.stock_minimo) AS bajo_minimo
             FROM materiales m
             LEFT JOIN inventario i ON i.material_id = m.id AND i.bodega_id = $1
             WHERE m.id = $2",
        )
        .bind(bodega_id)
        .bind(material_id)
        .fetch_optional(pool)
        .await
        .map_err(map_db_err)?
        .ok_or(CoreError::NotFound {
            entity: "Material",
            id: material_id,
        })
    }

    /// True iff the current level is below the material's stock_minimo.
    pub async fn is_below_minimum(
        pool: &PgPool,
        bodega_id: DbId,
        material_id: DbId,
    ) -> Result<bool, CoreError> {
        Ok(Self::level(pool, bodega_id, material_id).await?.bajo_minimo)
    }

    /// All inventory lines in a bodega, with below-minimum flags.
    pub async fn list_levels(pool: &PgPool, bodega_id: DbId) -> Result<Vec<StockLevel>, CoreError> {
        sqlx::query_as::<_, StockLevel>(
            "SELECT i.bodega_id, i.material_id, i.cantidad, m.stock_minimo,
                    (i.cantidad < m.stock_minimo) AS bajo_minimo
             FROM inventario i
             JOIN materiales m ON m.id = i.material_id
             WHERE i.bodega_id = $1
             ORDER BY m.nombre ASC",
        )
        .bind(bodega_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_err)
    }

    /// Every line currently below its material's minimum, across all bodegas.
    pub async fn list_below_minimum(pool: &PgPool) -> Result<Vec<StockLevel>, CoreError> {
        sqlx::query_as::<_, StockLevel>(
            "SELECT i.bodega_id, i.material_id, i.cantidad, m.stock_minimo,
                    TRUE AS bajo_minimo
             FROM inventario i
             JOIN materiales m ON m.id = i.material_id
             WHERE i.cantidad < m.stock_minimo AND m.is_active
             ORDER BY i.bodega_id ASC, m.nombre ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(map_db_err)
    }

    /// List movements matching the filter, newest first.
    ///
    /// Restartable: each call re-runs the query from its offset, so callers
    /// can page through the history lazily.
    pub async fn list_movements(
        pool: &PgPool,
        filter: &MovementFilter,
    ) -> Result<Vec<StockMovement>, CoreError> {
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM movimientos_inventario
             WHERE ($1::bigint IS NULL OR material_id = $1)
               AND ($2::bigint IS NULL OR bodega_origen_id = $2 OR bodega_destino_id = $2)
               AND ($3::timestamptz IS NULL OR created_at >= $3)
               AND ($4::timestamptz IS NULL OR created_at <= $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, StockMovement>(&query)
            .bind(filter.material_id)
            .bind(filter.bodega_id)
            .bind(filter.desde)
            .bind(filter.hasta)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ── Transaction internals ────────────────────────────────────────

    async fn ensure_material_exists(
        tx: &mut Transaction<'_, Postgres>,
        material_id: DbId,
    ) -> Result<(), CoreError> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM materiales WHERE id = $1 AND is_active = TRUE")
                .bind(material_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(map_db_err)?;
        row.map(|_| ()).ok_or(CoreError::NotFound {
            entity: "Material",
            id: material_id,
        })
    }

    async fn ensure_bodega_exists(
        tx: &mut Transaction<'_, Postgres>,
        bodega_id: DbId,
    ) -> Result<(), CoreError> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM bodegas WHERE id = $1 AND is_active = TRUE")
                .bind(bodega_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(map_db_err)?;
        row.map(|_| ()).ok_or(CoreError::NotFound {
            entity: "Bodega",
            id: bodega_id,
        })
    }

    /// Apply the normalized movement to the inventory lines: subtract from
    /// the locked source line, upsert-add on the destination line.
    async fn apply_lines(
        tx: &mut Transaction<'_, Postgres>,
        material_id: DbId,
        normalized: &NormalizedMovement,
    ) -> Result<(), CoreError> {
        if let Some(origen) = normalized.origen {
            // Lock the source line; a missing line means zero stock.
            let line: Option<(i64,)> = sqlx::query_as(
                "SELECT cantidad FROM inventario
                 WHERE bodega_id = $1 AND material_id = $2
                 FOR UPDATE",
            )
            .bind(origen)
            .bind(material_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_err)?;

            let available = line.map(|(c,)| c).unwrap_or(0);
            if available < normalized.cantidad {
                return Err(CoreError::InsufficientStock {
                    bodega_id: origen,
                    material_id,
                    available,
                    requested: normalized.cantidad,
                });
            }

            sqlx::query(
                "UPDATE inventario SET cantidad = cantidad - $3, updated_at = NOW()
                 WHERE bodega_id = $1 AND material_id = $2",
            )
            .bind(origen)
            .bind(material_id)
            .bind(normalized.cantidad)
            .execute(&mut **tx)
            .await
            .map_err(map_db_err)?;
        }

        if let Some(destino) = normalized.destino {
            sqlx::query(
                "INSERT INTO inventario (bodega_id, material_id, cantidad)
                 VALUES ($1, $2, $3)
                 ON CONFLICT ON CONSTRAINT uq_inventario_linea
                 DO UPDATE SET cantidad = inventario.cantidad + EXCLUDED.cantidad,
                               updated_at = NOW()",
            )
            .bind(destino)
            .bind(material_id)
            .bind(normalized.cantidad)
            .execute(&mut **tx)
            .await
            .map_err(map_db_err)?;
        }

        Ok(())
    }
}
