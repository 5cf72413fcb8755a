//! Administrator-privilege lookup backed by the profiles table.

use async_trait::async_trait;
use milestone_board_core::UserId;
use sqlx::PgPool;

use super::{PrivilegeStore, StoreError};

/// Postgres-backed privilege lookup.
///
/// The administrator flag lives server-side only; it is looked up fresh for
/// every privileged action and never cached in a client-visible token.
pub struct PgPrivilegeStore {
    pool: PgPool,
}

impl PgPrivilegeStore {
    /// Creates a new privilege store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrivilegeStore for PgPrivilegeStore {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, StoreError> {
        let is_admin: Option<bool> =
            sqlx::query_scalar("SELECT is_admin FROM profiles WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        // No profile row means no privilege.
        Ok(is_admin.unwrap_or(false))
    }
}
