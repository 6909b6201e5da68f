//! Prestamo (tool loan) entity model and DTOs.

use andamio_core::custody::ReturnCondition;
use andamio_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A loan row from the `prestamos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prestamo {
    pub id: DbId,
    pub herramienta_id: DbId,
    pub obrero_id: DbId,
    pub bodega_id: DbId,
    pub obra_id: DbId,
    pub fecha_prestamo: Timestamp,
    pub fecha_devolucion_estimada: NaiveDate,
    pub fecha_devolucion_real: Option<Timestamp>,
    pub estado: String,
    pub usuario_id: DbId,
    pub nota: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a loan.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrestamo {
    pub herramienta_id: DbId,
    pub obrero_id: DbId,
    pub bodega_id: DbId,
    pub obra_id: DbId,
    pub fecha_devolucion_estimada: NaiveDate,
    #[validate(length(max = 500))]
    pub nota: Option<String>,
}

/// DTO for returning a loan.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReturnPrestamo {
    pub condicion: ReturnCondition,
    #[validate(length(max = 500))]
    pub nota: Option<String>,
}

/// Filters for listing loans.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrestamoFilter {
    pub estado: Option<String>,
    pub herramienta_id: Option<DbId>,
    pub obrero_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
