//! Handlers for the `/obreros` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::obrero::{CreateObrero, Obrero, UpdateObrero};
use andamio_db::repositories::ObreroRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/obreros
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateObrero>,
) -> AppResult<(StatusCode, Json<Obrero>)> {
    input.validate()?;
    let obrero = ObreroRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(obrero)))
}

/// GET /api/v1/obreros
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Obrero>>> {
    let obreros = ObreroRepo::list(&state.pool).await?;
    Ok(Json(obreros))
}

/// GET /api/v1/obreros/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Obrero>> {
    let obrero = ObreroRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Obrero",
            id,
        }))?;
    Ok(Json(obrero))
}

/// PUT /api/v1/obreros/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateObrero>,
) -> AppResult<Json<Obrero>> {
    input.validate()?;
    let obrero = ObreroRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Obrero",
            id,
        }))?;
    Ok(Json(obrero))
}

/// DELETE /api/v1/obreros/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = ObreroRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Obrero",
            id,
        }))
    }
}
