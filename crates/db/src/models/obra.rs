//! Obra (construction project) entity model and DTOs.

use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const OBRA_ABIERTA: &str = "abierta";
pub const OBRA_CERRADA: &str = "cerrada";

/// A project row from the `obras` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Obra {
    pub id: DbId,
    pub direccion: String,
    pub estado: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new obra. New obras always start `abierta`; an
/// initial obrero assignment may be given at creation time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObra {
    #[validate(length(min = 1, max = 200))]
    pub direccion: String,
    pub obrero_id: Option<DbId>,
}

/// DTO for updating an obra.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateObra {
    #[validate(length(min = 1, max = 200))]
    pub direccion: Option<String>,
    /// `abierta` or `cerrada`.
    pub estado: Option<String>,
}

/// An obra-obrero assignment row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObraObrero {
    pub obra_id: DbId,
    pub obrero_id: DbId,
    pub assigned_at: Timestamp,
}
