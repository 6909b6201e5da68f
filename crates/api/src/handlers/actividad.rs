//! Handlers for the actividades nested under `/obras/{id}/actividades`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::actividad::{Actividad, CreateActividad};
use andamio_db::repositories::{ActividadRepo, ObraRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/obras/{obra_id}/actividades
pub async fn list_by_obra(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(obra_id): Path<DbId>,
) -> AppResult<Json<Vec<Actividad>>> {
    ObraRepo::find_by_id(&state.pool, obra_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Obra",
            id: obra_id,
        }))?;
    let actividades = ActividadRepo::list_for_obra(&state.pool, obra_id).await?;
    Ok(Json(actividades))
}

/// POST /api/v1/obras/{obra_id}/actividades
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(obra_id): Path<DbId>,
    Json(input): Json<CreateActividad>,
) -> AppResult<(StatusCode, Json<Actividad>)> {
    input.validate()?;
    ObraRepo::find_by_id(&state.pool, obra_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Obra",
            id: obra_id,
        }))?;
    let actividad = ActividadRepo::create(&state.pool, obra_id, &input).await?;
    Ok((StatusCode::CREATED, Json(actividad)))
}
