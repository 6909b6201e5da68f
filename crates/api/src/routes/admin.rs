//! Route definitions for the admin area (`/admin/usuarios`).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::usuario;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /usuarios                      -> list
/// POST   /usuarios                      -> create
/// GET    /usuarios/{id}                 -> get_by_id
/// PUT    /usuarios/{id}                 -> update
/// DELETE /usuarios/{id}                 -> deactivate + revoke sessions
/// POST   /usuarios/{id}/reset-password  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(usuario::list).post(usuario::create))
        .route(
            "/usuarios/{id}",
            get(usuario::get_by_id)
                .put(usuario::update)
                .delete(usuario::delete),
        )
        .route(
            "/usuarios/{id}/reset-password",
            post(usuario::reset_password),
        )
}
