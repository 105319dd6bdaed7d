//! Session-scoped profile state.
//!
//! Each authenticated identity gets one [`SessionCache`] holding its profile
//! (role + approval status), fetched once and coalesced across concurrent
//! requests. The [`Sessions`] registry owns the caches and lives inside the
//! application state — constructed explicitly and injected, never a
//! module-level global.

mod cache;
mod store;

pub use cache::{ProfileFetchError, SessionCache, SessionSnapshot};
pub use store::{PgProfileStore, ProfileStore};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry of live session caches, keyed by identity.
pub struct Sessions {
    store: Arc<dyn ProfileStore>,
    inner: RwLock<HashMap<Uuid, Arc<SessionCache>>>,
}

impl fmt::Debug for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sessions").finish_non_exhaustive()
    }
}

impl Sessions {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_create(&self, identity: Uuid) -> Arc<SessionCache> {
        {
            let map = self.inner.read().await;
            if let Some(cache) = map.get(&identity) {
                return cache.clone();
            }
        }
        let mut map = self.inner.write().await;
        map.entry(identity)
            .or_insert_with(|| Arc::new(SessionCache::new(identity, self.store.clone())))
            .clone()
    }

    /// Tear the session down. Called on logout, before the response goes
    /// out, so a later login by a different actor starts from nothing.
    pub async fn remove(&self, identity: Uuid) {
        self.inner.write().await.remove(&identity);
    }

    /// Force the identity's next access to re-read its profile. Called after
    /// admin edits to role or approval.
    pub async fn invalidate(&self, identity: Uuid) {
        let cache = {
            let map = self.inner.read().await;
            map.get(&identity).cloned()
        };
        if let Some(cache) = cache {
            cache.invalidate().await;
        }
    }

    pub async fn contains(&self, identity: Uuid) -> bool {
        self.inner.read().await.contains_key(&identity)
    }
}
