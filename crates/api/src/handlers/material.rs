//! Handlers for the `/materiales` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::material::{CreateMaterial, Material, UpdateMaterial};
use andamio_db::repositories::MaterialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/materiales
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateMaterial>,
) -> AppResult<(StatusCode, Json<Material>)> {
    input.validate()?;
    let material = MaterialRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// GET /api/v1/materiales
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Material>>> {
    let materiales = MaterialRepo::list(&state.pool).await?;
    Ok(Json(materiales))
}

/// GET /api/v1/materiales/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Material>> {
    let material = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(material))
}

/// PUT /api/v1/materiales/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaterial>,
) -> AppResult<Json<Material>> {
    input.validate()?;
    let material = MaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(material))
}

/// DELETE /api/v1/materiales/{id}
///
/// Soft delete: clears `is_active` so existing movement history stays intact.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = MaterialRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))
    }
}
