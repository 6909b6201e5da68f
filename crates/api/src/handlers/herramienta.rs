//! Handlers for the `/herramientas` resource.
//!
//! Descriptive CRUD is separate from custody: `estado` only changes through
//! the transition endpoints here or the loan endpoints in `prestamo`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use andamio_core::custody::AdminTransition;
use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::herramienta::{CreateHerramienta, Herramienta, UpdateHerramienta};
use andamio_db::repositories::HerramientaRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireBodeguero};
use crate::state::AppState;

/// POST /api/v1/herramientas
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateHerramienta>,
) -> AppResult<(StatusCode, Json<Herramienta>)> {
    input.validate()?;
    let herramienta = HerramientaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(herramienta)))
}

/// GET /api/v1/herramientas
///
/// Tool catalog is readable by any authenticated user, obreros included.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Herramienta>>> {
    let herramientas = HerramientaRepo::list(&state.pool).await?;
    Ok(Json(herramientas))
}

/// GET /api/v1/herramientas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Herramienta>> {
    let herramienta = HerramientaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Herramienta",
            id,
        }))?;
    Ok(Json(herramienta))
}

/// PUT /api/v1/herramientas/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHerramienta>,
) -> AppResult<Json<Herramienta>> {
    input.validate()?;
    let herramienta = HerramientaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Herramienta",
            id,
        }))?;
    Ok(Json(herramienta))
}

// ---------------------------------------------------------------------------
// Custody transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/herramientas/{id}/mantenimiento
///
/// Send a `disponible` or `danada` tool to maintenance.
pub async fn to_mantenimiento(
    State(state): State<AppState>,
    RequireBodeguero(_user): RequireBodeguero,
    Path(id): Path<DbId>,
) -> AppResult<Json<Herramienta>> {
    let herramienta =
        HerramientaRepo::apply_admin_transition(&state.pool, id, AdminTransition::Mantenimiento)
            .await?;
    Ok(Json(herramienta))
}

/// POST /api/v1/herramientas/{id}/disponible
///
/// Bring a tool back from maintenance.
pub async fn to_disponible(
    State(state): State<AppState>,
    RequireBodeguero(_user): RequireBodeguero,
    Path(id): Path<DbId>,
) -> AppResult<Json<Herramienta>> {
    let herramienta =
        HerramientaRepo::apply_admin_transition(&state.pool, id, AdminTransition::Disponible)
            .await?;
    Ok(Json(herramienta))
}

/// POST /api/v1/herramientas/{id}/baja
///
/// Retire a tool permanently. Admin only; blocked while a loan is open.
pub async fn to_baja(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Herramienta>> {
    let herramienta =
        HerramientaRepo::apply_admin_transition(&state.pool, id, AdminTransition::Baja).await?;
    Ok(Json(herramienta))
}
