//! Stock movement and ledger DTOs.
//!
//! `inventario` rows exist only for (bodega, material) pairs that have ever
//! had a movement and are written exclusively by
//! `InventoryRepo::record_movement`; they are read back as [`StockLevel`].

use andamio_core::inventory::MovementKind;
use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An immutable row from the `movimientos_inventario` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockMovement {
    pub id: DbId,
    pub material_id: DbId,
    pub bodega_origen_id: Option<DbId>,
    pub bodega_destino_id: Option<DbId>,
    pub kind: String,
    pub cantidad: i64,
    pub usuario_id: DbId,
    pub obra_id: Option<DbId>,
    pub nota: Option<String>,
    pub created_at: Timestamp,
}

/// Request DTO for recording a movement.
///
/// For `ajuste`, `cantidad` is a signed delta and exactly one bodega field
/// is set; for every other kind `cantidad` must be positive and the bodega
/// fields must match the kind's shape (validated in `andamio_core`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordMovement {
    pub kind: MovementKind,
    pub material_id: DbId,
    pub bodega_origen_id: Option<DbId>,
    pub bodega_destino_id: Option<DbId>,
    pub cantidad: i64,
    pub obra_id: Option<DbId>,
    #[validate(length(max = 500))]
    pub nota: Option<String>,
}

/// Filters for listing movements. All fields optional; `bodega_id` matches
/// either side of the movement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementFilter {
    pub material_id: Option<DbId>,
    pub bodega_id: Option<DbId>,
    pub desde: Option<Timestamp>,
    pub hasta: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A stock level with its below-minimum flag, as returned by level queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockLevel {
    pub bodega_id: DbId,
    pub material_id: DbId,
    pub cantidad: i64,
    pub stock_minimo: i64,
    pub bajo_minimo: bool,
}
