//! HTTP request handlers, one module per resource.

pub mod actividad;
pub mod auth;
pub mod bodega;
pub mod herramienta;
pub mod inventario;
pub mod material;
pub mod obra;
pub mod obrero;
pub mod prestamo;
pub mod usuario;
