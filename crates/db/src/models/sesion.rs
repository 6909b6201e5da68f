//! Refresh-token session model.

use andamio_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sesiones` table. Only the SHA-256 hash of the
/// refresh token is stored; the plaintext never touches the database.
#[derive(Debug, Clone, FromRow)]
pub struct Sesion {
    pub id: DbId,
    pub usuario_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
