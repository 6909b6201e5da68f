//! Handlers for the inventory ledger: movements, stock levels, alerts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::inventario::{MovementFilter, RecordMovement, StockLevel, StockMovement};
use andamio_db::repositories::InventoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireBodeguero, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/inventario/movimientos
///
/// Record a stock movement. Serialization failures from concurrent movements
/// on the same lines are retried once before surfacing a 409.
pub async fn record_movement(
    State(state): State<AppState>,
    RequireBodeguero(user): RequireBodeguero,
    Json(input): Json<RecordMovement>,
) -> AppResult<(StatusCode, Json<StockMovement>)> {
    input.validate()?;

    let movement = match InventoryRepo::record_movement(&state.pool, &input, user.user_id).await {
        Err(CoreError::ConcurrencyConflict(_)) => {
            InventoryRepo::record_movement(&state.pool, &input, user.user_id).await?
        }
        other => other?,
    };

    Ok((StatusCode::CREATED, Json(movement)))
}

/// GET /api/v1/inventario/movimientos
///
/// Movement history, newest first, filterable by material, bodega, and a
/// date window.
pub async fn list_movements(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let movements = InventoryRepo::list_movements(&state.pool, &filter).await?;
    Ok(Json(movements))
}

/// GET /api/v1/inventario/niveles/{bodega_id}/{material_id}
pub async fn get_level(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path((bodega_id, material_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<StockLevel>> {
    let level = InventoryRepo::level(&state.pool, bodega_id, material_id).await?;
    Ok(Json(level))
}

/// GET /api/v1/inventario/bajo-minimo
///
/// Every (bodega, material) line currently below the material's threshold.
pub async fn list_below_minimum(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<StockLevel>>> {
    let levels = InventoryRepo::list_below_minimum(&state.pool).await?;
    Ok(Json(levels))
}
