//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Catalog repositories return
//! `sqlx::Error` and leave HTTP classification to the API layer; the
//! ledger and custody repositories (`InventoryRepo`, `PrestamoRepo`) and
//! the custody side of `HerramientaRepo` return `CoreError` because their
//! domain failures (insufficient stock, tool not available, no active
//! loan) are the whole point of those methods.

pub mod actividad_repo;
pub mod bodega_repo;
pub mod herramienta_repo;
pub mod inventario_repo;
pub mod material_repo;
pub mod obra_repo;
pub mod obrero_repo;
pub mod prestamo_repo;
pub mod sesion_repo;
pub mod usuario_repo;

pub use actividad_repo::ActividadRepo;
pub use bodega_repo::BodegaRepo;
pub use herramienta_repo::HerramientaRepo;
pub use inventario_repo::InventoryRepo;
pub use material_repo::MaterialRepo;
pub use obra_repo::ObraRepo;
pub use obrero_repo::ObreroRepo;
pub use prestamo_repo::PrestamoRepo;
pub use sesion_repo::SesionRepo;
pub use usuario_repo::UsuarioRepo;

use andamio_core::error::CoreError;

/// Map a sqlx error from a transactional domain operation to a `CoreError`.
///
/// Serialization failures (40001), deadlock victims (40P01) and
/// lock-not-available (55P03) become `ConcurrencyConflict`, which callers
/// may retry once. Everything else is an internal error.
pub(crate) fn map_db_err(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref().is_some_and(is_retryable_code) {
            return CoreError::ConcurrencyConflict(db_err.to_string());
        }
    }
    CoreError::Internal(format!("Database error: {err}"))
}

/// Postgres SQLSTATE codes where retrying the transaction can succeed.
fn is_retryable_code(code: &str) -> bool {
    matches!(code, "40001" | "40P01" | "55P03")
}
