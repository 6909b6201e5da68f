//! Repository for the `herramientas` table.
//!
//! Plain CRUD plus the administrative custody transitions (mantenimiento,
//! disponible, baja). Loan-driven transitions live in `PrestamoRepo` so the
//! loan row and the tool estado always change in one transaction.

use sqlx::PgPool;

use andamio_core::custody::{self, AdminTransition, ToolState};
use andamio_core::error::CoreError;
use andamio_core::types::DbId;

use crate::models::herramienta::{CreateHerramienta, Herramienta, UpdateHerramienta};
use crate::repositories::map_db_err;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, marca, estado, is_active, created_at, updated_at";

/// Provides CRUD and administrative state transitions for herramientas.
pub struct HerramientaRepo;

impl HerramientaRepo {
    /// Insert a new herramienta (estado `disponible`), returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHerramienta,
    ) -> Result<Herramienta, sqlx::Error> {
        let query = format!(
            "INSERT INTO herramientas (nombre, marca) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Herramienta>(&query)
            .bind(&input.nombre)
            .bind(&input.marca)
            .fetch_one(pool)
            .await
    }

    /// Find a herramienta by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Herramienta>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM herramientas WHERE id = $1");
        sqlx::query_as::<_, Herramienta>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all herramientas, active first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Herramienta>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM herramientas ORDER BY is_active DESC, nombre ASC");
        sqlx::query_as::<_, Herramienta>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive fields. `estado` is deliberately not updatable here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHerramienta,
    ) -> Result<Option<Herramienta>, sqlx::Error> {
        let query = format!(
            "UPDATE herramientas SET
                nombre = COALESCE($2, nombre),
                marca = COALESCE($3, marca),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Herramienta>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.marca)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Apply an administrative custody transition (mantenimiento /
    /// disponible / baja) under a row lock so it cannot race a loan.
    pub async fn apply_admin_transition(
        pool: &PgPool,
        id: DbId,
        transition: AdminTransition,
    ) -> Result<Herramienta, CoreError> {
        let mut tx = pool.begin().await.map_err(map_db_err)?;

        let estado: Option<(String,)> =
            sqlx::query_as("SELECT estado FROM herramientas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_err)?;
        let (estado,) = estado.ok_or(CoreError::NotFound {
            entity: "Herramienta",
            id,
        })?;

        let next = custody::admin_transition(ToolState::parse(&estado)?, transition)?;

        let query = format!(
            "UPDATE herramientas SET estado = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let herramienta = sqlx::query_as::<_, Herramienta>(&query)
            .bind(id)
            .bind(next.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;
        Ok(herramienta)
    }
}
