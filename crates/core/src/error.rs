use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The source/destination warehouses do not match the movement kind
    /// (e.g. an entrada with a source, a transferencia onto itself).
    #[error("Invalid movement shape: {0}")]
    InvalidMovementShape(String),

    /// A salida, transferencia, or negative ajuste would drive the source
    /// inventory line below zero.
    #[error(
        "Insufficient stock for material {material_id} in bodega {bodega_id}: \
         {available} available, {requested} requested"
    )]
    InsufficientStock {
        bodega_id: DbId,
        material_id: DbId,
        available: i64,
        requested: i64,
    },

    /// The tool is not in the `disponible` state, so no loan can be created.
    #[error("Herramienta {herramienta_id} is not available for loan (estado: {estado})")]
    ToolNotAvailable { herramienta_id: DbId, estado: String },

    /// A return was requested for a tool with no `activo` loan.
    #[error("Herramienta {herramienta_id} has no active loan")]
    NoActiveLoan { herramienta_id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A concurrent transaction touched the same row; safe to retry once.
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
