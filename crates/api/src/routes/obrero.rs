//! Route definitions for the `/obreros` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::obrero;
use crate::state::AppState;

/// Routes mounted at `/obreros`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(obrero::list).post(obrero::create))
        .route(
            "/{id}",
            get(obrero::get_by_id)
                .put(obrero::update)
                .delete(obrero::delete),
        )
}
