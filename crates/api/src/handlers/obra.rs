//! Handlers for the `/obras` resource and its obrero assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::obra::{CreateObra, Obra, UpdateObra};
use andamio_db::models::obrero::Obrero;
use andamio_db::repositories::ObraRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/obras
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateObra>,
) -> AppResult<(StatusCode, Json<Obra>)> {
    input.validate()?;
    let obra = ObraRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(obra)))
}

/// GET /api/v1/obras
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Obra>>> {
    let obras = ObraRepo::list(&state.pool).await?;
    Ok(Json(obras))
}

/// GET /api/v1/obras/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Obra>> {
    let obra = ObraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Obra", id }))?;
    Ok(Json(obra))
}

/// PUT /api/v1/obras/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateObra>,
) -> AppResult<Json<Obra>> {
    input.validate()?;
    if let Some(estado) = &input.estado {
        if estado != andamio_db::models::obra::OBRA_ABIERTA
            && estado != andamio_db::models::obra::OBRA_CERRADA
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown obra estado: {estado}"
            ))));
        }
    }
    let obra = ObraRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Obra", id }))?;
    Ok(Json(obra))
}

/// POST /api/v1/obras/{id}/cerrar
///
/// Mark an obra as `cerrada`. Closing is idempotent at the HTTP level: an
/// already-closed obra returns the current row.
pub async fn cerrar(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Obra>> {
    ObraRepo::close(&state.pool, id).await?;
    let obra = ObraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Obra", id }))?;
    Ok(Json(obra))
}

/// GET /api/v1/obras/{id}/obreros
pub async fn list_obreros(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Obrero>>> {
    ObraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Obra", id }))?;
    let obreros = ObraRepo::list_obreros(&state.pool, id).await?;
    Ok(Json(obreros))
}

/// PUT /api/v1/obras/{id}/obreros/{obrero_id}
///
/// Assign an obrero to the obra. Re-assigning is a no-op.
pub async fn assign_obrero(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, obrero_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ObraRepo::assign_obrero(&state.pool, id, obrero_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/obras/{id}/obreros/{obrero_id}
pub async fn unassign_obrero(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((id, obrero_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = ObraRepo::unassign_obrero(&state.pool, id, obrero_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ObraObrero",
            id: obrero_id,
        }))
    }
}
