//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `usuarios.role` in
//! `20260301000001_create_usuarios.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_BODEGUERO: &str = "bodeguero";
pub const ROLE_OBRERO: &str = "obrero";

/// All valid role names, in privilege order.
pub const ALL_ROLES: [&str; 4] = [ROLE_ADMIN, ROLE_SUPERVISOR, ROLE_BODEGUERO, ROLE_OBRERO];

/// Staff roles may read catalogs, inventory levels, and movement history.
/// Obreros are not staff; they only see their own loans.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SUPERVISOR || role == ROLE_BODEGUERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_excludes_obrero() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_SUPERVISOR));
        assert!(is_staff(ROLE_BODEGUERO));
        assert!(!is_staff(ROLE_OBRERO));
        assert!(!is_staff("somebody-else"));
    }
}
