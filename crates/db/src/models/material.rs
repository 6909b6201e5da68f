//! Material entity model and DTOs.

use andamio_core::inventory::UnidadMedida;
use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A material row from the `materiales` table.
///
/// `precio_unitario` is integer CLP; `stock_minimo` is the reorder threshold
/// checked by the below-minimum queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub nombre: String,
    pub unidad: String,
    pub precio_unitario: i64,
    pub stock_minimo: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new material.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterial {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    pub unidad: UnidadMedida,
    #[validate(range(min = 1))]
    pub precio_unitario: i64,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0))]
    pub stock_minimo: Option<i64>,
}

/// DTO for updating an existing material. Identity (nombre/unidad) is
/// immutable; only price, threshold, and active flag may change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMaterial {
    #[validate(range(min = 1))]
    pub precio_unitario: Option<i64>,
    #[validate(range(min = 0))]
    pub stock_minimo: Option<i64>,
    pub is_active: Option<bool>,
}
