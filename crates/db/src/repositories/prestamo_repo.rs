//! The tool custody tracker.
//!
//! Loan creation and return each run as one transaction that locks the
//! herramienta row, so the loan record and the tool's derived estado can
//! never disagree: an `en_uso` tool always has exactly one `activo` loan
//! (the partial unique index backs this up at the storage level).

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use andamio_core::custody::{self, LoanState, ReturnCondition, ToolState};
use andamio_core::error::CoreError;
use andamio_core::types::DbId;

use crate::models::prestamo::{CreatePrestamo, Prestamo, PrestamoFilter, ReturnPrestamo};
use crate::repositories::map_db_err;

/// Column list for prestamo queries.
const COLUMNS: &str = "id, herramienta_id, obrero_id, bodega_id, obra_id, fecha_prestamo, \
    fecha_devolucion_estimada, fecha_devolucion_real, estado, usuario_id, nota, \
    created_at, updated_at";

/// Default page size for loan listings.
const DEFAULT_PAGE_SIZE: i64 = 50;
/// Hard cap on loan page size.
const MAX_PAGE_SIZE: i64 = 200;

/// Loan lifecycle and queries.
pub struct PrestamoRepo;

impl PrestamoRepo {
    /// Create a loan for an available tool, moving it to `en_uso`.
    ///
    /// Fails with `ToolNotAvailable` unless the tool is `disponible`, and
    /// with `NotFound` for unknown tool/obrero/bodega/obra. The loan insert
    /// and the estado update share one transaction.
    pub async fn create_loan(
        pool: &PgPool,
        input: &CreatePrestamo,
        usuario_id: DbId,
    ) -> Result<Prestamo, CoreError> {
        let mut tx = pool.begin().await.map_err(map_db_err)?;

        let estado = Self::lock_tool(&mut tx, input.herramienta_id).await?;
        custody::ensure_loanable(input.herramienta_id, estado)?;

        Self::ensure_exists(&mut tx, "Obrero", "obreros", input.obrero_id).await?;
        Self::ensure_exists(&mut tx, "Bodega", "bodegas", input.bodega_id).await?;
        Self::ensure_exists(&mut tx, "Obra", "obras", input.obra_id).await?;

        let query = format!(
            "INSERT INTO prestamos
                (herramienta_id, obrero_id, bodega_id, obra_id,
                 fecha_devolucion_estimada, usuario_id, nota)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let prestamo = sqlx::query_as::<_, Prestamo>(&query)
            .bind(input.herramienta_id)
            .bind(input.obrero_id)
            .bind(input.bodega_id)
            .bind(input.obra_id)
            .bind(input.fecha_devolucion_estimada)
            .bind(usuario_id)
            .bind(&input.nota)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        Self::set_tool_estado(&mut tx, input.herramienta_id, ToolState::EnUso).await?;

        tx.commit().await.map_err(map_db_err)?;

        tracing::info!(
            prestamo_id = prestamo.id,
            herramienta_id = prestamo.herramienta_id,
            obrero_id = prestamo.obrero_id,
            "Created tool loan"
        );
        Ok(prestamo)
    }

    /// Return a loan, closing it with the reported condition and moving the
    /// tool to the corresponding estado (disponible / danada / extraviada).
    ///
    /// Fails with `NoActiveLoan` if the loan is not `activo`.
    pub async fn return_loan(
        pool: &PgPool,
        prestamo_id: DbId,
        input: &ReturnPrestamo,
    ) -> Result<Prestamo, CoreError> {
        let mut tx = pool.begin().await.map_err(map_db_err)?;

        let row: Option<(DbId, String)> = sqlx::query_as(
            "SELECT herramienta_id, estado FROM prestamos WHERE id = $1 FOR UPDATE",
        )
        .bind(prestamo_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_err)?;
        let (herramienta_id, estado) = row.ok_or(CoreError::NotFound {
            entity: "Prestamo",
            id: prestamo_id,
        })?;

        if LoanState::parse(&estado)? != LoanState::Activo {
            return Err(CoreError::NoActiveLoan { herramienta_id });
        }

        // Lock the tool row after the loan row (consistent ordering with
        // create_loan, which locks the tool first but cannot race an
        // existing activo loan on the same tool).
        Self::lock_tool(&mut tx, herramienta_id).await?;

        let condition: ReturnCondition = input.condicion;
        let query = format!(
            "UPDATE prestamos SET
                estado = $2,
                fecha_devolucion_real = NOW(),
                nota = COALESCE($3, nota),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let prestamo = sqlx::query_as::<_, Prestamo>(&query)
            .bind(prestamo_id)
            .bind(condition.loan_state().as_str())
            .bind(&input.nota)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        Self::set_tool_estado(&mut tx, herramienta_id, condition.tool_state()).await?;

        tx.commit().await.map_err(map_db_err)?;

        tracing::info!(
            prestamo_id,
            herramienta_id,
            condicion = ?condition,
            "Returned tool loan"
        );
        Ok(prestamo)
    }

    /// Find a loan by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prestamo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prestamos WHERE id = $1");
        sqlx::query_as::<_, Prestamo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The `activo` loan for a tool, if any. There is at most one.
    pub async fn find_active_for_tool(
        pool: &PgPool,
        herramienta_id: DbId,
    ) -> Result<Option<Prestamo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prestamos WHERE herramienta_id = $1 AND estado = 'activo'"
        );
        sqlx::query_as::<_, Prestamo>(&query)
            .bind(herramienta_id)
            .fetch_optional(pool)
            .await
    }

    /// List loans matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PrestamoFilter,
    ) -> Result<Vec<Prestamo>, sqlx::Error> {
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = filter.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM prestamos
             WHERE ($1::text IS NULL OR estado = $1)
               AND ($2::bigint IS NULL OR herramienta_id = $2)
               AND ($3::bigint IS NULL OR obrero_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Prestamo>(&query)
            .bind(&filter.estado)
            .bind(filter.herramienta_id)
            .bind(filter.obrero_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Active loans whose estimated return date is before `today`.
    pub async fn list_overdue(
        pool: &PgPool,
        today: NaiveDate,
    ) -> Result<Vec<Prestamo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prestamos
             WHERE estado = 'activo' AND fecha_devolucion_estimada < $1
             ORDER BY fecha_devolucion_estimada ASC"
        );
        sqlx::query_as::<_, Prestamo>(&query)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    // ── Transaction internals ────────────────────────────────────────

    /// Lock the tool row and return its parsed estado.
    async fn lock_tool(
        tx: &mut Transaction<'_, Postgres>,
        herramienta_id: DbId,
    ) -> Result<ToolState, CoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT estado FROM herramientas WHERE id = $1 AND is_active = TRUE FOR UPDATE",
        )
        .bind(herramienta_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_err)?;
        let (estado,) = row.ok_or(CoreError::NotFound {
            entity: "Herramienta",
            id: herramienta_id,
        })?;
        ToolState::parse(&estado)
    }

    async fn set_tool_estado(
        tx: &mut Transaction<'_, Postgres>,
        herramienta_id: DbId,
        estado: ToolState,
    ) -> Result<(), CoreError> {
        sqlx::query("UPDATE herramientas SET estado = $2, updated_at = NOW() WHERE id = $1")
            .bind(herramienta_id)
            .bind(estado.as_str())
            .execute(&mut **tx)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn ensure_exists(
        tx: &mut Transaction<'_, Postgres>,
        entity: &'static str,
        table: &str,
        id: DbId,
    ) -> Result<(), CoreError> {
        let query = format!("SELECT id FROM {table} WHERE id = $1");
        let row: Option<(DbId,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_err)?;
        row.map(|_| ()).ok_or(CoreError::NotFound { entity, id })
    }
}
