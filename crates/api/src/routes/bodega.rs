//! Route definitions for the `/bodegas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bodega;
use crate::state::AppState;

/// Routes mounted at `/bodegas`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete (soft)
/// GET    /{id}/inventario   -> stock levels for this bodega
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bodega::list).post(bodega::create))
        .route(
            "/{id}",
            get(bodega::get_by_id)
                .put(bodega::update)
                .delete(bodega::delete),
        )
        .route("/{id}/inventario", get(bodega::inventario))
}
