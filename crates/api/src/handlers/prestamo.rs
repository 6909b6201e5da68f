//! Handlers for the `/prestamos` resource (tool custody).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use validator::Validate;

use andamio_core::custody::LoanState;
use andamio_core::error::CoreError;
use andamio_core::types::DbId;
use andamio_db::models::prestamo::{CreatePrestamo, Prestamo, PrestamoFilter, ReturnPrestamo};
use andamio_db::repositories::PrestamoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireBodeguero, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/prestamos
///
/// Open a loan for an available tool. A concurrent loan attempt on the same
/// tool loses the row lock race and is retried once; if the tool is then
/// `en_uso` the retry surfaces the 409 `TOOL_NOT_AVAILABLE`.
pub async fn create(
    State(state): State<AppState>,
    RequireBodeguero(user): RequireBodeguero,
    Json(input): Json<CreatePrestamo>,
) -> AppResult<(StatusCode, Json<Prestamo>)> {
    input.validate()?;

    let prestamo = match PrestamoRepo::create_loan(&state.pool, &input, user.user_id).await {
        Err(CoreError::ConcurrencyConflict(_)) => {
            PrestamoRepo::create_loan(&state.pool, &input, user.user_id).await?
        }
        other => other?,
    };

    Ok((StatusCode::CREATED, Json(prestamo)))
}

/// POST /api/v1/prestamos/{id}/devolver
///
/// Close a loan with the reported condition. The tool moves to `disponible`,
/// `danada`, or `extraviada` accordingly.
pub async fn devolver(
    State(state): State<AppState>,
    RequireBodeguero(_user): RequireBodeguero,
    Path(id): Path<DbId>,
    Json(input): Json<ReturnPrestamo>,
) -> AppResult<Json<Prestamo>> {
    input.validate()?;

    let prestamo = match PrestamoRepo::return_loan(&state.pool, id, &input).await {
        Err(CoreError::ConcurrencyConflict(_)) => {
            PrestamoRepo::return_loan(&state.pool, id, &input).await?
        }
        other => other?,
    };

    Ok(Json(prestamo))
}

/// GET /api/v1/prestamos
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(filter): Query<PrestamoFilter>,
) -> AppResult<Json<Vec<Prestamo>>> {
    if let Some(estado) = &filter.estado {
        // Reject unknown estados up front instead of returning an empty list.
        LoanState::parse(estado).map_err(AppError::Core)?;
    }
    let prestamos = PrestamoRepo::list(&state.pool, &filter).await?;
    Ok(Json(prestamos))
}

/// GET /api/v1/prestamos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Prestamo>> {
    let prestamo = PrestamoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prestamo",
            id,
        }))?;
    Ok(Json(prestamo))
}

/// GET /api/v1/prestamos/vencidos
///
/// Active loans past their estimated return date as of today (UTC).
pub async fn list_overdue(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Prestamo>>> {
    let today = Utc::now().date_naive();
    let prestamos = PrestamoRepo::list_overdue(&state.pool, today).await?;
    Ok(Json(prestamos))
}
