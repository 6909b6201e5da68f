//! Domain logic for the Andamio construction-inventory backend.
//!
//! This crate is deliberately free of async, HTTP, and database concerns:
//! movement-shape validation, the tool custody state machine, role names,
//! and the shared error taxonomy all live here so the repository and API
//! layers can agree on one set of rules.

pub mod custody;
pub mod error;
pub mod inventory;
pub mod roles;
pub mod types;
