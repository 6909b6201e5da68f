//! Route definitions for the inventory ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::inventario;
use crate::state::AppState;

/// Routes mounted at `/inventario`.
///
/// ```text
/// GET  /movimientos                           -> list_movements
/// POST /movimientos                           -> record_movement
/// GET  /niveles/{bodega_id}/{material_id}     -> get_level
/// GET  /bajo-minimo                           -> list_below_minimum
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/movimientos",
            get(inventario::list_movements).post(inventario::record_movement),
        )
        .route(
            "/niveles/{bodega_id}/{material_id}",
            get(inventario::get_level),
        )
        .route("/bajo-minimo", get(inventario::list_below_minimum))
}
