//! Tool custody state machine and loan lifecycle rules.
//!
//! A tool's `estado` while a loan is open is owned by the loan lifecycle:
//! `create_loan` moves `disponible -> en_uso`, and the return condition
//! decides where the tool lands afterwards. Administrative transitions
//! (mantenimiento, baja) never run while a loan is active, and `baja` is
//! terminal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Custody state of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolState {
    Disponible,
    EnUso,
    Mantenimiento,
    Danada,
    /// Terminal: the tool was reported lost on a loan return. No further
    /// loans are permitted; only `baja` is reachable from here.
    Extraviada,
    /// Terminal: retired from service.
    Baja,
}

impl ToolState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolState::Disponible => "disponible",
            ToolState::EnUso => "en_uso",
            ToolState::Mantenimiento => "mantenimiento",
            ToolState::Danada => "danada",
            ToolState::Extraviada => "extraviada",
            ToolState::Baja => "baja",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "disponible" => Ok(ToolState::Disponible),
            "en_uso" => Ok(ToolState::EnUso),
            "mantenimiento" => Ok(ToolState::Mantenimiento),
            "danada" => Ok(ToolState::Danada),
            "extraviada" => Ok(ToolState::Extraviada),
            "baja" => Ok(ToolState::Baja),
            other => Err(CoreError::Internal(format!(
                "Unknown herramienta estado in store: {other}"
            ))),
        }
    }
}

/// State of a loan record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanState {
    Activo,
    Devuelto,
    Extraviado,
    Danado,
}

impl LoanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanState::Activo => "activo",
            LoanState::Devuelto => "devuelto",
            LoanState::Extraviado => "extraviado",
            LoanState::Danado => "danado",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "activo" => Ok(LoanState::Activo),
            "devuelto" => Ok(LoanState::Devuelto),
            "extraviado" => Ok(LoanState::Extraviado),
            "danado" => Ok(LoanState::Danado),
            other => Err(CoreError::Internal(format!(
                "Unknown prestamo estado in store: {other}"
            ))),
        }
    }
}

/// Condition reported when a loan is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCondition {
    Normal,
    Perdida,
    Danada,
}

impl ReturnCondition {
    /// Loan state recorded for this return condition.
    pub fn loan_state(&self) -> LoanState {
        match self {
            ReturnCondition::Normal => LoanState::Devuelto,
            ReturnCondition::Perdida => LoanState::Extraviado,
            ReturnCondition::Danada => LoanState::Danado,
        }
    }

    /// Tool state after a return in this condition.
    pub fn tool_state(&self) -> ToolState {
        match self {
            ReturnCondition::Normal => ToolState::Disponible,
            ReturnCondition::Perdida => ToolState::Extraviada,
            ReturnCondition::Danada => ToolState::Danada,
        }
    }
}

/// Check that a tool may receive a new loan.
pub fn ensure_loanable(herramienta_id: DbId, estado: ToolState) -> Result<(), CoreError> {
    if estado != ToolState::Disponible {
        return Err(CoreError::ToolNotAvailable {
            herramienta_id,
            estado: estado.as_str().to_string(),
        });
    }
    Ok(())
}

/// Administrative transitions requested outside the loan lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTransition {
    /// `disponible | danada -> mantenimiento`
    Mantenimiento,
    /// `mantenimiento -> disponible`
    Disponible,
    /// any non-terminal state `-> baja` (terminal)
    Baja,
}

/// Apply an administrative transition, returning the new tool state.
///
/// `en_uso` is owned by the loan lifecycle, so neither mantenimiento nor
/// baja may be applied while a loan is open; the caller resolves the loan
/// first. `baja` and `extraviada` are terminal.
pub fn admin_transition(estado: ToolState, transition: AdminTransition) -> Result<ToolState, CoreError> {
    let next = match (transition, estado) {
        (AdminTransition::Mantenimiento, ToolState::Disponible | ToolState::Danada) => {
            ToolState::Mantenimiento
        }
        (AdminTransition::Disponible, ToolState::Mantenimiento) => ToolState::Disponible,
        (AdminTransition::Baja, ToolState::Baja) => {
            return Err(CoreError::Conflict(
                "Herramienta is already dada de baja".into(),
            ))
        }
        (AdminTransition::Baja, ToolState::EnUso) => {
            return Err(CoreError::Conflict(
                "Herramienta has an active loan; return it before dar de baja".into(),
            ))
        }
        (AdminTransition::Baja, _) => ToolState::Baja,
        (transition, estado) => {
            return Err(CoreError::Conflict(format!(
                "Cannot apply {} to herramienta in estado {}",
                match transition {
                    AdminTransition::Mantenimiento => "mantenimiento",
                    AdminTransition::Disponible => "disponible",
                    AdminTransition::Baja => "baja",
                },
                estado.as_str()
            )))
        }
    };
    Ok(next)
}

/// A loan is overdue when it is still `activo` and today is past the
/// estimated return date.
pub fn is_overdue(estado: LoanState, fecha_devolucion_estimada: NaiveDate, today: NaiveDate) -> bool {
    estado == LoanState::Activo && today > fecha_devolucion_estimada
}
