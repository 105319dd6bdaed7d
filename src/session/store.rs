use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::Profile;

/// Where profiles come from. The seam exists so the cache can be exercised
/// against an in-memory store in tests.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the profile attached to an identity. `Ok(None)` means the
    /// identity exists but carries no profile row.
    async fn load_profile(&self, identity: Uuid) -> anyhow::Result<Option<Profile>>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn load_profile(&self, identity: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role, is_approved, sales_id, created_at
             FROM profiles WHERE id = $1",
        )
        .bind(identity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
