//! Repository for the `actividades` table (per-obra work items).

use sqlx::PgPool;

use andamio_core::types::DbId;

use crate::models::actividad::{Actividad, CreateActividad};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, obra_id, nombre, tipo, descripcion, horas_estimadas, estado, created_at, updated_at";

/// Provides actividad storage scoped to an obra.
pub struct ActividadRepo;

impl ActividadRepo {
    /// Insert a new actividad under the given obra, returning the created row.
    pub async fn create(
        pool: &PgPool,
        obra_id: DbId,
        input: &CreateActividad,
    ) -> Result<Actividad, sqlx::Error> {
        let query = format!(
            "INSERT INTO actividades (obra_id, nombre, tipo, descripcion, horas_estimadas)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actividad>(&query)
            .bind(obra_id)
            .bind(&input.nombre)
            .bind(&input.tipo)
            .bind(&input.descripcion)
            .bind(input.horas_estimadas)
            .fetch_one(pool)
            .await
    }

    /// List the actividades of an obra, oldest first.
    pub async fn list_for_obra(pool: &PgPool, obra_id: DbId) -> Result<Vec<Actividad>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM actividades WHERE obra_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Actividad>(&query)
            .bind(obra_id)
            .fetch_all(pool)
            .await
    }
}
