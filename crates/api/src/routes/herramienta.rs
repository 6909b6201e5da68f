//! Route definitions for the `/herramientas` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::herramienta;
use crate::state::AppState;

/// Routes mounted at `/herramientas`.
///
/// ```text
/// GET  /                       -> list (any authenticated user)
/// POST /                       -> create (admin)
/// GET  /{id}                   -> get_by_id (any authenticated user)
/// PUT  /{id}                   -> update (admin)
/// POST /{id}/mantenimiento     -> to_mantenimiento (bodeguero/admin)
/// POST /{id}/disponible        -> to_disponible (bodeguero/admin)
/// POST /{id}/baja              -> to_baja (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(herramienta::list).post(herramienta::create))
        .route(
            "/{id}",
            get(herramienta::get_by_id).put(herramienta::update),
        )
        .route("/{id}/mantenimiento", post(herramienta::to_mantenimiento))
        .route("/{id}/disponible", post(herramienta::to_disponible))
        .route("/{id}/baja", post(herramienta::to_baja))
}
