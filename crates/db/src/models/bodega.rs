//! Bodega (warehouse) entity model and DTOs.

use andamio_core::inventory::BodegaKind;
use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A warehouse row from the `bodegas` table.
///
/// `obra_id` is set exactly when `kind` is `obra` (DB CHECK enforced).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bodega {
    pub id: DbId,
    pub nombre: String,
    pub kind: String,
    pub obra_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new bodega.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBodega {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    pub kind: BodegaKind,
    /// Required iff `kind` is `obra`.
    pub obra_id: Option<DbId>,
}

/// DTO for updating a bodega. Kind and owning obra are immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBodega {
    #[validate(length(min = 1, max = 150))]
    pub nombre: Option<String>,
    pub is_active: Option<bool>,
}
