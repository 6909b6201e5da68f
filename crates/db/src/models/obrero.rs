//! Obrero (field worker) entity model and DTOs.

use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A worker row from the `obreros` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Obrero {
    pub id: DbId,
    pub nombre_completo: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new obrero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObrero {
    #[validate(length(min = 1, max = 150))]
    pub nombre_completo: String,
}

/// DTO for updating an obrero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateObrero {
    #[validate(length(min = 1, max = 150))]
    pub nombre_completo: Option<String>,
    pub is_active: Option<bool>,
}
