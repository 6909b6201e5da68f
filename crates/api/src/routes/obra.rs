//! Route definitions for the `/obras` resource and its obrero assignments.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{actividad, obra};
use crate::state::AppState;

/// Routes mounted at `/obras`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// POST   /{id}/cerrar               -> cerrar
/// GET    /{id}/obreros              -> list_obreros
/// PUT    /{id}/obreros/{obrero_id}  -> assign_obrero
/// DELETE /{id}/obreros/{obrero_id}  -> unassign_obrero
/// GET    /{id}/actividades          -> list_by_obra
/// POST   /{id}/actividades          -> create actividad
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(obra::list).post(obra::create))
        .route("/{id}", get(obra::get_by_id).put(obra::update))
        .route("/{id}/cerrar", post(obra::cerrar))
        .route("/{id}/obreros", get(obra::list_obreros))
        .route(
            "/{id}/obreros/{obrero_id}",
            put(obra::assign_obrero).delete(obra::unassign_obrero),
        )
        .route(
            "/{id}/actividades",
            get(actividad::list_by_obra).post(actividad::create),
        )
}
