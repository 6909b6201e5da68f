//! Repository for the `sesiones` table (refresh-token sessions).

use sqlx::PgPool;

use andamio_core::types::{DbId, Timestamp};

use crate::models::sesion::Sesion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, usuario_id, refresh_token_hash, expires_at, revoked_at, created_at";

/// Provides session storage for refresh-token rotation.
pub struct SesionRepo;

impl SesionRepo {
    /// Create a session for the given user and refresh-token hash.
    pub async fn create(
        pool: &PgPool,
        usuario_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Sesion, sqlx::Error> {
        let query = format!(
            "INSERT INTO sesiones (usuario_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sesion>(&query)
            .bind(usuario_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live (non-revoked, non-expired) session by token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Sesion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sesiones
             WHERE refresh_token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Sesion>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if a live session was revoked.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sesiones SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live session for a user (logout-everywhere, deactivation).
    pub async fn revoke_all_for_user(pool: &PgPool, usuario_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sesiones SET revoked_at = NOW()
             WHERE usuario_id = $1 AND revoked_at IS NULL",
        )
        .bind(usuario_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
