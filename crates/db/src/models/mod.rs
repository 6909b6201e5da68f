//! Entity models and DTOs.
//!
//! Row structs derive `FromRow` and mirror the migration schema exactly.
//! Enum-valued columns (estados, kinds, unidades) are stored as `String`
//! in row structs; the `andamio_core` enums own parsing and transition
//! rules. Create/Update DTOs carry the typed enums and `validator` rules.

pub mod actividad;
pub mod bodega;
pub mod herramienta;
pub mod inventario;
pub mod material;
pub mod obra;
pub mod obrero;
pub mod prestamo;
pub mod sesion;
pub mod usuario;
