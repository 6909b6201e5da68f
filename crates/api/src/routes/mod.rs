pub mod admin;
pub mod auth;
pub mod bodega;
pub mod health;
pub mod herramienta;
pub mod inventario;
pub mod material;
pub mod obra;
pub mod obrero;
pub mod prestamo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/refresh                               refresh (public)
/// /auth/logout                                logout (requires auth)
///
/// /admin/usuarios                             list, create (admin only)
/// /admin/usuarios/{id}                        get, update, deactivate
/// /admin/usuarios/{id}/reset-password         reset password
///
/// /materiales                                 catalog CRUD
/// /bodegas                                    catalog CRUD + /{id}/inventario
/// /obras                                      CRUD + cerrar + obrero assignments
/// /obreros                                    catalog CRUD
/// /herramientas                               catalog CRUD + custody transitions
///
/// /inventario/movimientos                     ledger: record + history
/// /inventario/niveles/{bodega_id}/{material_id}   single stock level
/// /inventario/bajo-minimo                     below-threshold report
///
/// /prestamos                                  loans: create, list, devolver
/// /prestamos/vencidos                         overdue loans
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/materiales", material::router())
        .nest("/bodegas", bodega::router())
        .nest("/obras", obra::router())
        .nest("/obreros", obrero::router())
        .nest("/herramientas", herramienta::router())
        .nest("/inventario", inventario::router())
        .nest("/prestamos", prestamo::router())
}
