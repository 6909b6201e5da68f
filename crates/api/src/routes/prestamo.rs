//! Route definitions for the `/prestamos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prestamo;
use crate::state::AppState;

/// Routes mounted at `/prestamos`.
///
/// ```text
/// GET  /                 -> list
/// POST /                 -> create
/// GET  /vencidos         -> list_overdue
/// GET  /{id}             -> get_by_id
/// POST /{id}/devolver    -> devolver
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prestamo::list).post(prestamo::create))
        // Registered before `/{id}` so the literal segment wins.
        .route("/vencidos", get(prestamo::list_overdue))
        .route("/{id}", get(prestamo::get_by_id))
        .route("/{id}/devolver", post(prestamo::devolver))
}
