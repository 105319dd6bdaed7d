use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::debug;
use uuid::Uuid;

use super::store::ProfileStore;
use crate::authz::Role;
use crate::modules::users::model::Profile;

/// A profile fetch failed (row missing, store unreachable). The cache keeps
/// `profile_loaded = false` in this case; the guard answers with `Defer`
/// rather than letting navigation proceed on a null profile.
#[derive(Debug, Clone)]
pub struct ProfileFetchError(pub String);

impl fmt::Display for ProfileFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile fetch failed: {}", self.0)
    }
}

impl std::error::Error for ProfileFetchError {}

/// Point-in-time view of a session the navigation guard evaluates against.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub profile: Option<Profile>,
    pub profile_loaded: bool,
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_approved(&self) -> bool {
        self.profile.as_ref().map(|p| p.is_approved).unwrap_or(false)
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }
}

#[derive(Default)]
struct CacheState {
    profile: Option<Profile>,
    loaded: bool,
    last_error: Option<String>,
    /// Present while a fetch is in flight; waiters subscribe instead of
    /// issuing their own store request.
    pending: Option<watch::Receiver<()>>,
}

/// Per-identity profile cache.
///
/// Invariants:
/// - at most one store request in flight at a time; concurrent callers
///   adopt the pending fetch's outcome,
/// - a loaded profile is reused until `force = true` or invalidation,
/// - a failed fetch leaves the cache unloaded with a visible error.
pub struct SessionCache {
    identity: Uuid,
    store: Arc<dyn ProfileStore>,
    inner: Mutex<CacheState>,
}

impl fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl SessionCache {
    pub fn new(identity: Uuid, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            identity,
            store,
            inner: Mutex::new(CacheState::default()),
        }
    }

    pub fn identity(&self) -> Uuid {
        self.identity
    }

    /// Fetch the profile, reusing the cached copy unless `force` is set.
    pub async fn fetch_profile(&self, force: bool) -> Result<Profile, ProfileFetchError> {
        let mut force = force;
        loop {
            let mut waiter = {
                let mut state = self.inner.lock().await;
                if !force && state.loaded {
                    if let Some(profile) = state.profile.clone() {
                        return Ok(profile);
                    }
                }
                match state.pending.clone() {
                    Some(rx) => rx,
                    None => {
                        let (tx, rx) = watch::channel(());
                        state.pending = Some(rx);
                        drop(state);
                        return self.run_fetch(tx).await;
                    }
                }
            };

            // Someone else's fetch is in flight; adopt whatever it produces.
            let _ = waiter.changed().await;
            force = false;

            let state = self.inner.lock().await;
            if state.loaded {
                if let Some(profile) = state.profile.clone() {
                    return Ok(profile);
                }
            }
            if let Some(err) = state.last_error.clone() {
                return Err(ProfileFetchError(err));
            }
            // State was reset while we waited; go around again.
        }
    }

    async fn run_fetch(&self, tx: watch::Sender<()>) -> Result<Profile, ProfileFetchError> {
        let result = self.store.load_profile(self.identity).await;

        let mut state = self.inner.lock().await;
        state.pending = None;
        let outcome = match result {
            Ok(Some(profile)) => {
                state.profile = Some(profile.clone());
                state.loaded = true;
                state.last_error = None;
                Ok(profile)
            }
            Ok(None) => {
                debug!(identity = %self.identity, "no profile row for identity");
                state.profile = None;
                state.loaded = false;
                let msg = "profile record not found".to_string();
                state.last_error = Some(msg.clone());
                Err(ProfileFetchError(msg))
            }
            Err(err) => {
                state.profile = None;
                state.loaded = false;
                let msg = err.to_string();
                state.last_error = Some(msg.clone());
                Err(ProfileFetchError(msg))
            }
        };
        drop(state);

        let _ = tx.send(());
        outcome
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock().await;
        SessionSnapshot {
            profile: state.profile.clone(),
            profile_loaded: state.loaded,
            last_error: state.last_error.clone(),
        }
    }

    /// Drop the cached profile so the next fetch re-reads the store. Used
    /// after admin edits to the underlying row.
    pub async fn invalidate(&self) {
        let mut state = self.inner.lock().await;
        state.profile = None;
        state.loaded = false;
        state.last_error = None;
    }
}
