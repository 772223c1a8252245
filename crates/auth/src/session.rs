//! Session token lifecycle
//!
//! The session manager owns every read and write of the token keys. It is created
//! once at start-up, loads whatever a previous run left behind, and publishes the
//! current [`StoredSession`] to subscribers after each change.

use portal_core::storage::{ACCESS_TOKEN_KEY, EXPIRES_IN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS};
use portal_core::{AuthResponse, CoreResult, CustomerAuthResponse, SessionStore, StoredSession};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: watch::Sender<StoredSession>,
}

impl SessionManager {
    /// Load the stored session from `store`
    pub fn load(store: Arc<dyn SessionStore>) -> CoreResult<Self> {
        let initial = read_session(store.as_ref())?;
        debug!(
            has_access = initial.access_token.is_some(),
            has_refresh = initial.refresh_token.is_some(),
            "Loaded stored session"
        );
        let (current, _) = watch::channel(initial);
        Ok(Self { store, current })
    }

    /// Snapshot of the stored tokens
    pub fn current(&self) -> StoredSession {
        self.current.borrow().clone()
    }

    /// Receive every session change from now on
    pub fn subscribe(&self) -> watch::Receiver<StoredSession> {
        self.current.subscribe()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current.borrow().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current.borrow().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().access_token.is_some()
    }

    /// Replace the session with an admin token pair
    ///
    /// A failed write clears the session rather than leaving a mix of old and new
    /// tokens behind.
    pub fn store_admin_tokens(&self, tokens: &AuthResponse) -> CoreResult<()> {
        let written = self
            .store
            .set_item(ACCESS_TOKEN_KEY, &tokens.access)
            .and_then(|()| self.store.set_item(REFRESH_TOKEN_KEY, &tokens.refresh))
            .and_then(|()| self.store.remove_item(EXPIRES_IN_KEY));
        self.settle(written)?;
        info!("Stored admin session");
        Ok(())
    }

    /// Replace the session with a customer token
    pub fn store_customer_tokens(&self, tokens: &CustomerAuthResponse) -> CoreResult<()> {
        let written = self
            .store
            .set_item(ACCESS_TOKEN_KEY, &tokens.access)
            .and_then(|()| {
                self.store
                    .set_item(EXPIRES_IN_KEY, &tokens.expires_in.to_string())
            })
            .and_then(|()| self.store.remove_item(REFRESH_TOKEN_KEY));
        self.settle(written)?;
        info!(expires_in = tokens.expires_in, "Stored customer session");
        Ok(())
    }

    /// Swap in a refreshed access token, keeping the refresh token
    pub fn store_access_token(&self, access: &str) -> CoreResult<()> {
        self.store.set_item(ACCESS_TOKEN_KEY, access)?;
        debug!("Stored refreshed access token");
        self.publish()
    }

    /// Drop every token; no request is made
    ///
    /// Every key is attempted even if one removal fails; the first error is returned.
    pub fn logout(&self) -> CoreResult<()> {
        let cleared = self.remove_all();
        self.publish()?;
        cleared?;
        info!("Session cleared");
        Ok(())
    }

    /// Publish the outcome of a multi-key write, clearing the session if it failed
    fn settle(&self, written: CoreResult<()>) -> CoreResult<()> {
        if let Err(e) = written {
            warn!(error = %e, "Session write failed, clearing stored tokens");
            if let Err(clear_err) = self.remove_all() {
                warn!(error = %clear_err, "Could not clear session after failed write");
            }
            if let Err(publish_err) = self.publish() {
                warn!(error = %publish_err, "Could not reload session after failed write");
            }
            return Err(e);
        }
        self.publish()
    }

    fn remove_all(&self) -> CoreResult<()> {
        let mut first_err = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove_item(key) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn publish(&self) -> CoreResult<()> {
        let session = read_session(self.store.as_ref())?;
        self.current.send_replace(session);
        Ok(())
    }
}

fn read_session(store: &dyn SessionStore) -> CoreResult<StoredSession> {
    Ok(StoredSession {
        access_token: store.get_item(ACCESS_TOKEN_KEY)?,
        refresh_token: store.get_item(REFRESH_TOKEN_KEY)?,
        expires_in: store.get_item(EXPIRES_IN_KEY)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::MemoryStore;
    use portal_core::storage::mock::MockSessionStore;

    fn manager() -> (SessionManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SessionManager::load(store.clone()).unwrap(), store)
    }

    #[test]
    fn admin_tokens_are_written_verbatim() {
        let (session, store) = manager();
        session
            .store_admin_tokens(&AuthResponse {
                access: "access-token".into(),
                refresh: "refresh-token".into(),
            })
            .unwrap();

        assert_eq!(
            store.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("access-token")
        );
        assert_eq!(
            store.get_item(REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("refresh-token")
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn customer_tokens_store_expiry_as_string() {
        let (session, store) = manager();
        session
            .store_customer_tokens(&CustomerAuthResponse {
                access: "a".into(),
                expires_in: 120,
            })
            .unwrap();

        assert_eq!(store.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("a"));
        assert_eq!(store.get_item(EXPIRES_IN_KEY).unwrap().as_deref(), Some("120"));
        assert_eq!(session.current().expires_in.as_deref(), Some("120"));
    }

    #[test]
    fn new_login_replaces_previous_session() {
        let (session, _store) = manager();
        session
            .store_admin_tokens(&AuthResponse {
                access: "admin-access".into(),
                refresh: "admin-refresh".into(),
            })
            .unwrap();
        session
            .store_customer_tokens(&CustomerAuthResponse {
                access: "customer-access".into(),
                expires_in: 60,
            })
            .unwrap();

        let current = session.current();
        assert_eq!(current.access_token.as_deref(), Some("customer-access"));
        assert_eq!(current.refresh_token, None);
        assert_eq!(current.expires_in.as_deref(), Some("60"));
    }

    #[test]
    fn load_picks_up_existing_tokens() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(ACCESS_TOKEN_KEY, "left-over").unwrap();
        store.set_item(REFRESH_TOKEN_KEY, "refresh").unwrap();

        let session = SessionManager::load(store).unwrap();
        assert_eq!(session.access_token().as_deref(), Some("left-over"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh"));
    }

    #[test]
    fn logout_clears_all_keys_and_notifies() {
        let (session, store) = manager();
        session
            .store_admin_tokens(&AuthResponse {
                access: "a".into(),
                refresh: "r".into(),
            })
            .unwrap();
        let mut rx = session.subscribe();

        session.logout().unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
        for key in SESSION_KEYS {
            assert_eq!(store.get_item(key).unwrap(), None);
        }
    }

    #[test]
    fn refreshed_access_keeps_refresh_token() {
        let (session, _store) = manager();
        session
            .store_admin_tokens(&AuthResponse {
                access: "old".into(),
                refresh: "r".into(),
            })
            .unwrap();
        session.store_access_token("new").unwrap();

        assert_eq!(session.access_token().as_deref(), Some("new"));
        assert_eq!(session.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn partial_admin_write_clears_session() {
        let backing = Arc::new(MemoryStore::new());
        backing.set_item(ACCESS_TOKEN_KEY, "old-access").unwrap();
        backing.set_item(REFRESH_TOKEN_KEY, "old-refresh").unwrap();

        let mut store = MockSessionStore::new();
        let reads = backing.clone();
        store
            .expect_get_item()
            .returning(move |key| reads.get_item(key));
        let writes = backing.clone();
        store.expect_set_item().returning(move |key, value| {
            if key == REFRESH_TOKEN_KEY {
                Err(portal_core::CoreError::storage_error("disk full"))
            } else {
                writes.set_item(key, value)
            }
        });
        let removals = backing.clone();
        store
            .expect_remove_item()
            .returning(move |key| removals.remove_item(key));

        let session = SessionManager::load(Arc::new(store)).unwrap();
        let result = session.store_admin_tokens(&AuthResponse {
            access: "new-access".into(),
            refresh: "new-refresh".into(),
        });

        assert!(result.is_err());
        for key in SESSION_KEYS {
            assert_eq!(backing.get_item(key).unwrap(), None);
        }
        assert!(session.current().is_empty());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn partial_customer_write_clears_session() {
        let backing = Arc::new(MemoryStore::new());
        backing.set_item(ACCESS_TOKEN_KEY, "old-access").unwrap();

        let mut store = MockSessionStore::new();
        let reads = backing.clone();
        store
            .expect_get_item()
            .returning(move |key| reads.get_item(key));
        let writes = backing.clone();
        store.expect_set_item().returning(move |key, value| {
            if key == EXPIRES_IN_KEY {
                Err(portal_core::CoreError::storage_error("disk full"))
            } else {
                writes.set_item(key, value)
            }
        });
        let removals = backing.clone();
        store
            .expect_remove_item()
            .returning(move |key| removals.remove_item(key));

        let session = SessionManager::load(Arc::new(store)).unwrap();
        let result = session.store_customer_tokens(&CustomerAuthResponse {
            access: "new-access".into(),
            expires_in: 60,
        });

        assert!(result.is_err());
        assert_eq!(backing.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(session.current(), StoredSession::default());
    }

    #[test]
    fn storage_failure_propagates() {
        let mut store = MockSessionStore::new();
        store.expect_get_item().returning(|_| Ok(None));
        store
            .expect_set_item()
            .returning(|_, _| Err(portal_core::CoreError::storage_error("disk full")));

        let session = SessionManager::load(Arc::new(store)).unwrap();
        let result = session.store_access_token("a");
        assert!(result.is_err());
        assert!(!session.is_authenticated());
    }
}
