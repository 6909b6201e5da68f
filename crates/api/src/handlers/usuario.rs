//! Admin-only handlers for the `/admin/usuarios` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use andamio_core::error::CoreError;
use andamio_core::roles::ALL_ROLES;
use andamio_core::types::DbId;
use andamio_db::models::usuario::{CreateUsuario, UpdateUsuario, UsuarioResponse};
use andamio_db::repositories::{SesionRepo, UsuarioRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/usuarios`. The plaintext password is hashed
/// here; the repository layer only ever sees the hash.
#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `POST /admin/usuarios/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Reject role names outside the known set before they reach the DB CHECK.
fn validate_role(role: &str) -> Result<(), AppError> {
    if ALL_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))))
    }
}

/// POST /api/v1/admin/usuarios
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUsuarioRequest>,
) -> AppResult<(StatusCode, Json<UsuarioResponse>)> {
    validate_role(&input.role)?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)?;
    let create = CreateUsuario {
        username: input.username,
        email: input.email,
        password_hash,
        role: input.role,
    };
    let usuario = UsuarioRepo::create(&state.pool, &create).await?;
    Ok((StatusCode::CREATED, Json(usuario.into())))
}

/// GET /api/v1/admin/usuarios
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UsuarioResponse>>> {
    let usuarios = UsuarioRepo::list(&state.pool).await?;
    Ok(Json(usuarios.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/admin/usuarios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))?;
    Ok(Json(usuario.into()))
}

/// PUT /api/v1/admin/usuarios/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUsuario>,
) -> AppResult<Json<UsuarioResponse>> {
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    let usuario = UsuarioRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }))?;
    Ok(Json(usuario.into()))
}

/// DELETE /api/v1/admin/usuarios/{id}
///
/// Deactivates the account and revokes all of its sessions.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UsuarioRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }));
    }
    SesionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/usuarios/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password)?;
    let password_hash = hash_password(&input.password)?;

    let updated = UsuarioRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Usuario",
            id,
        }));
    }
    // Force re-login everywhere after a password reset.
    SesionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
