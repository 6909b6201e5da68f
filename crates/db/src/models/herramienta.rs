//! Herramienta (tool) entity model and DTOs.

use andamio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A tool row from the `herramientas` table.
///
/// `estado` belongs to the custody tracker: while a loan is open it is
/// updated only inside the loan transactions, never through plain CRUD.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Herramienta {
    pub id: DbId,
    pub nombre: String,
    pub marca: Option<String>,
    pub estado: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new herramienta. New tools start `disponible`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHerramienta {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    #[validate(length(max = 100))]
    pub marca: Option<String>,
}

/// DTO for updating descriptive fields. `estado` is excluded on purpose;
/// it changes only through loan or administrative transitions.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHerramienta {
    #[validate(length(min = 1, max = 150))]
    pub nombre: Option<String>,
    #[validate(length(max = 100))]
    pub marca: Option<String>,
    pub is_active: Option<bool>,
}
