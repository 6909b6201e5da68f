//! Actividad (per-obra work item) entity model and DTOs.

use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An activity row from the `actividades` table.
///
/// `estado` is one of `pendiente | en_progreso | completada` (DB CHECK);
/// new rows start `pendiente`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actividad {
    pub id: DbId,
    pub obra_id: DbId,
    pub nombre: String,
    pub tipo: Option<String>,
    pub descripcion: Option<String>,
    pub horas_estimadas: Option<i32>,
    pub estado: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an actividad. New actividades start `pendiente`;
/// the owning obra comes from the URL, not the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActividad {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    #[validate(length(max = 100))]
    pub tipo: Option<String>,
    #[validate(length(max = 1000))]
    pub descripcion: Option<String>,
    #[validate(range(min = 1))]
    pub horas_estimadas: Option<i32>,
}
