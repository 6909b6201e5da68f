//! Handlers for the `/bodegas` resource, including per-bodega stock levels.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::bodega::{Bodega, CreateBodega, UpdateBodega};
use andamio_db::models::inventario::StockLevel;
use andamio_db::repositories::{BodegaRepo, InventoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/bodegas
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateBodega>,
) -> AppResult<(StatusCode, Json<Bodega>)> {
    input.validate()?;
    let bodega = BodegaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(bodega)))
}

/// GET /api/v1/bodegas
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Bodega>>> {
    let bodegas = BodegaRepo::list(&state.pool).await?;
    Ok(Json(bodegas))
}

/// GET /api/v1/bodegas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Bodega>> {
    let bodega = BodegaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bodega",
            id,
        }))?;
    Ok(Json(bodega))
}

/// PUT /api/v1/bodegas/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBodega>,
) -> AppResult<Json<Bodega>> {
    input.validate()?;
    let bodega = BodegaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bodega",
            id,
        }))?;
    Ok(Json(bodega))
}

/// DELETE /api/v1/bodegas/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = BodegaRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Bodega",
            id,
        }))
    }
}

/// GET /api/v1/bodegas/{id}/inventario
///
/// All stock levels for one bodega, with the below-minimum flag per line.
pub async fn inventario(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<StockLevel>>> {
    // 404 for unknown bodegas rather than an empty list.
    BodegaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bodega",
            id,
        }))?;
    let levels = InventoryRepo::list_levels(&state.pool, id).await?;
    Ok(Json(levels))
}
