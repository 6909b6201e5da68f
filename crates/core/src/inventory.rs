//! Stock movement kinds, units of measure, and movement-shape validation.
//!
//! A movement's *shape* is the combination of its kind, source warehouse,
//! and destination warehouse. [`normalize_movement`] checks the shape rules
//! and reduces every kind (including signed ajustes) to a single canonical
//! form: subtract `cantidad` from `origen`, add `cantidad` to `destino`.
//! The repository layer applies that form inside one transaction without
//! re-deriving any per-kind logic.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Unit of measure for a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnidadMedida {
    Unidad,
    Metro,
    M2,
    M3,
    Kg,
    Litro,
    Saco,
}

impl UnidadMedida {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnidadMedida::Unidad => "unidad",
            UnidadMedida::Metro => "metro",
            UnidadMedida::M2 => "m2",
            UnidadMedida::M3 => "m3",
            UnidadMedida::Kg => "kg",
            UnidadMedida::Litro => "litro",
            UnidadMedida::Saco => "saco",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "unidad" => Ok(UnidadMedida::Unidad),
            "metro" => Ok(UnidadMedida::Metro),
            "m2" => Ok(UnidadMedida::M2),
            "m3" => Ok(UnidadMedida::M3),
            "kg" => Ok(UnidadMedida::Kg),
            "litro" => Ok(UnidadMedida::Litro),
            "saco" => Ok(UnidadMedida::Saco),
            other => Err(CoreError::Validation(format!(
                "Unknown unidad de medida: {other}"
            ))),
        }
    }
}

/// Kind of warehouse: the central yard or a project-site bodega.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodegaKind {
    Central,
    Obra,
}

impl BodegaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodegaKind::Central => "central",
            BodegaKind::Obra => "obra",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "central" => Ok(BodegaKind::Central),
            "obra" => Ok(BodegaKind::Obra),
            other => Err(CoreError::Validation(format!("Unknown bodega kind: {other}"))),
        }
    }
}

/// Kind of stock movement recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entrada,
    Salida,
    Transferencia,
    Ajuste,
    Devolucion,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "entrada",
            MovementKind::Salida => "salida",
            MovementKind::Transferencia => "transferencia",
            MovementKind::Ajuste => "ajuste",
            MovementKind::Devolucion => "devolucion",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "entrada" => Ok(MovementKind::Entrada),
            "salida" => Ok(MovementKind::Salida),
            "transferencia" => Ok(MovementKind::Transferencia),
            "ajuste" => Ok(MovementKind::Ajuste),
            "devolucion" => Ok(MovementKind::Devolucion),
            other => Err(CoreError::Validation(format!(
                "Unknown movement kind: {other}"
            ))),
        }
    }
}

/// Canonical movement form produced by [`normalize_movement`].
///
/// `cantidad` is always positive; it is subtracted from `origen` (when set)
/// and added to `destino` (when set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedMovement {
    pub origen: Option<DbId>,
    pub destino: Option<DbId>,
    pub cantidad: i64,
}

/// Validate a movement's shape and reduce it to canonical form.
///
/// Shape rules:
/// - `entrada` / `devolucion`: destination only, `cantidad > 0`.
/// - `salida`: source only, `cantidad > 0`.
/// - `transferencia`: both warehouses, source != destination, `cantidad > 0`.
/// - `ajuste`: exactly one warehouse, `cantidad != 0`. The sign of
///   `cantidad` is the direction of the adjustment: positive deltas become
///   a destination-side add, negative deltas a source-side subtract (which
///   is stock-checked like a salida).
pub fn normalize_movement(
    kind: MovementKind,
    origen: Option<DbId>,
    destino: Option<DbId>,
    cantidad: i64,
) -> Result<NormalizedMovement, CoreError> {
    match kind {
        MovementKind::Entrada | MovementKind::Devolucion => {
            let destino = require_positive(kind, cantidad)
                .and_then(|_| only_destino(kind, origen, destino))?;
            Ok(NormalizedMovement {
                origen: None,
                destino: Some(destino),
                cantidad,
            })
        }
        MovementKind::Salida => {
            require_positive(kind, cantidad)?;
            let origen = origen.ok_or_else(|| shape_err(kind, "requires a bodega de origen"))?;
            if destino.is_some() {
                return Err(shape_err(kind, "must not have a bodega de destino"));
            }
            Ok(NormalizedMovement {
                origen: Some(origen),
                destino: None,
                cantidad,
            })
        }
        MovementKind::Transferencia => {
            require_positive(kind, cantidad)?;
            let origen = origen.ok_or_else(|| shape_err(kind, "requires a bodega de origen"))?;
            let destino = destino.ok_or_else(|| shape_err(kind, "requires a bodega de destino"))?;
            if origen == destino {
                return Err(shape_err(kind, "origen and destino must differ"));
            }
            Ok(NormalizedMovement {
                origen: Some(origen),
                destino: Some(destino),
                cantidad,
            })
        }
        MovementKind::Ajuste => {
            let bodega = match (origen, destino) {
                (Some(b), None) | (None, Some(b)) => b,
                _ => return Err(shape_err(kind, "requires exactly one bodega")),
            };
            if cantidad == 0 {
                return Err(CoreError::Validation(
                    "Ajuste delta must be non-zero".into(),
                ));
            }
            if cantidad > 0 {
                Ok(NormalizedMovement {
                    origen: None,
                    destino: Some(bodega),
                    cantidad,
                })
            } else {
                Ok(NormalizedMovement {
                    origen: Some(bodega),
                    destino: None,
                    cantidad: -cantidad,
                })
            }
        }
    }
}

fn require_positive(kind: MovementKind, cantidad: i64) -> Result<(), CoreError> {
    if cantidad <= 0 {
        return Err(CoreError::Validation(format!(
            "Movement cantidad must be positive for {}",
            kind.as_str()
        )));
    }
    Ok(())
}

fn only_destino(
    kind: MovementKind,
    origen: Option<DbId>,
    destino: Option<DbId>,
) -> Result<DbId, CoreError> {
    if origen.is_some() {
        return Err(shape_err(kind, "must not have a bodega de origen"));
    }
    destino.ok_or_else(|| shape_err(kind, "requires a bodega de destino"))
}

fn shape_err(kind: MovementKind, detail: &str) -> CoreError {
    CoreError::InvalidMovementShape(format!("{} {detail}", kind.as_str()))
}
